//! Session storage over HTTP cookies.
//!
//! Built from the request's `Cookie` headers; every change is recorded in a
//! [`CookieJar`] and written back as `Set-Cookie` headers by
//! [`CookieStorage::apply`].

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use cookie::{Cookie, CookieJar, SameSite};

use super::SessionStorage;

/// Cookie-backed [`SessionStorage`].
#[derive(Debug, Clone, Default)]
pub struct CookieStorage {
    jar: CookieJar,
    secure: bool,
}

impl CookieStorage {
    /// Reads every cookie the client sent.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut jar = CookieJar::new();
        for value in headers.get_all(COOKIE) {
            let Ok(raw) = value.to_str() else {
                continue;
            };
            for cookie in Cookie::split_parse(raw).flatten() {
                jar.add_original(cookie.into_owned());
            }
        }
        Self { jar, secure: false }
    }

    /// Marks cookies written from now on as `Secure`.
    #[must_use]
    pub const fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Appends one `Set-Cookie` header per cookie changed since the request.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for cookie in self.jar.delta() {
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    headers.append(SET_COOKIE, value);
                }
                Err(e) => tracing::warn!(name = cookie.name(), error = %e, "unencodable cookie"),
            }
        }
    }
}

impl SessionStorage for CookieStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.jar.get(key).map(|c| c.value().to_string())
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.jar.add(
            Cookie::build((key.to_owned(), value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(self.secure),
        );
    }

    fn remove_item(&mut self, key: &str) {
        self.jar
            .remove(Cookie::build((key.to_owned(), String::new())).path("/"));
    }
}
