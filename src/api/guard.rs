//! Route guard: role-based access to the dashboards.
//!
//! A protected request proceeds only when the session holds a user whose
//! role is allowed. Anything else, whether no session or the wrong role,
//! gets the same `303 See Other` to `/login`.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::domain::{Role, User};
use crate::session::{CookieSession, CookieStorage, SessionStore};

/// Where unauthenticated or unauthorized requests are sent.
pub const LOGIN_PATH: &str = "/login";

/// Allowed-role policy of a protected route.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    allowed_roles: Option<Vec<Role>>,
}

/// Outcome of [`RouteGuard::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed as this user.
    Allow(User),
    /// Send the client to [`LOGIN_PATH`].
    RedirectToLogin,
}

impl RouteGuard {
    /// Any logged-in user passes.
    #[must_use]
    pub const fn authenticated() -> Self {
        Self {
            allowed_roles: None,
        }
    }

    /// Only users with `role` pass.
    #[must_use]
    pub fn only(role: Role) -> Self {
        Self {
            allowed_roles: Some(vec![role]),
        }
    }

    /// Decides what to do with the session user.
    #[must_use]
    pub fn check(&self, user: Option<User>) -> GuardDecision {
        match user {
            Some(user)
                if self
                    .allowed_roles
                    .as_ref()
                    .is_none_or(|roles| roles.contains(&user.role)) =>
            {
                GuardDecision::Allow(user)
            }
            _ => GuardDecision::RedirectToLogin,
        }
    }
}

/// The session user, attached to requests that passed the guard.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware state: the policy plus the cookie settings.
#[derive(Debug, Clone)]
pub struct GuardState {
    /// Policy applied to every request.
    pub guard: RouteGuard,
    /// Whether rewritten cookies carry `Secure`.
    pub secure_cookies: bool,
}

/// Opens the session carried by the request's cookies.
#[must_use]
pub fn request_session(headers: &HeaderMap, secure_cookies: bool) -> CookieSession {
    SessionStore::new(CookieStorage::from_headers(headers).with_secure(secure_cookies))
}

/// `Set-Cookie` headers for whatever the session changed.
#[must_use]
pub fn cookie_headers(session: &CookieSession) -> HeaderMap {
    let mut headers = HeaderMap::new();
    session.storage().apply(&mut headers);
    headers
}

/// Axum middleware enforcing a [`GuardState`].
///
/// On success the request continues with a [`CurrentUser`] extension. On
/// redirect a malformed session cookie is expired in the same response.
pub async fn enforce(
    State(state): State<GuardState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut session = request_session(request.headers(), state.secure_cookies);
    match state.guard.check(session.load()) {
        GuardDecision::Allow(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        GuardDecision::RedirectToLogin => {
            tracing::debug!(path = %request.uri().path(), "redirecting to login");
            (cookie_headers(&session), Redirect::to(LOGIN_PATH)).into_response()
        }
    }
}
