//! Login, logout and registration handlers.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    LoginPageView, LoginRequest, LoginResponse, NavbarView, RegisterPageView, RegisterRequest,
    RegisterResponse, Toast,
};
use crate::api::guard::{LOGIN_PATH, cookie_headers, request_session};
use crate::app_state::AppState;
use crate::error::{AppError, ErrorResponse};
use crate::service::Registration;

/// `GET /login`: Login page.
#[utoipa::path(
    get,
    path = "/login",
    tag = "Auth",
    summary = "Login page",
    responses(
        (status = 200, description = "Login page", body = LoginPageView),
    )
)]
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let mut session = request_session(&headers, state.secure_cookies);
    let navbar = session.load().as_ref().map(NavbarView::from);
    (cookie_headers(&session), Json(LoginPageView { navbar }))
}

/// `POST /login`: Log in by e-mail.
///
/// # Errors
///
/// Returns [`AppError`] for blank fields or an unknown e-mail.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    summary = "Log in",
    description = "Looks the user up by e-mail and stores the record in the session cookie. The password must be present but is not verified.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = LoginResponse),
        (status = 400, description = "Blank field", body = ErrorResponse),
        (status = 401, description = "Unknown e-mail", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.account.login(&req.email, &req.password).await?;

    let mut session = request_session(&headers, state.secure_cookies);
    session.save(&user)?;

    let response = LoginResponse {
        toast: Toast::success(
            "Login realizado com sucesso!",
            format!("Bem-vindo(a), {}!", user.name),
        ),
        redirect_to: user.role.dashboard_path(),
        user,
    };
    Ok((cookie_headers(&session), Json(response)))
}

/// `POST /logout`: End the session.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    summary = "Log out",
    responses(
        (status = 303, description = "Session cleared; redirected to /"),
    )
)]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let mut session = request_session(&headers, state.secure_cookies);
    session.clear();
    (cookie_headers(&session), Redirect::to("/"))
}

/// `GET /register`: Registration form.
///
/// # Errors
///
/// Returns [`AppError`] when the backend fails.
#[utoipa::path(
    get,
    path = "/register",
    tag = "Auth",
    summary = "Registration page",
    description = "Role choices and the plans on offer, cheapest first.",
    responses(
        (status = 200, description = "Registration page", body = RegisterPageView),
        (status = 500, description = "Backend failure", body = ErrorResponse),
    )
)]
pub async fn register_page(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let plans = state.account.registration_plans().await?;
    Ok(Json(RegisterPageView::new(&plans)))
}

/// `POST /register`: Create an account.
///
/// # Errors
///
/// Returns [`AppError`] for blank fields, a missing plan or a taken e-mail.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    summary = "Create an account",
    description = "Creates an active user. Organizers must choose a plan; other roles never keep one.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Blank field, unknown role or missing plan", body = ErrorResponse),
        (status = 409, description = "E-mail already registered", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .account
        .register(Registration {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
            plan_id: req.plan_id,
        })
        .await?;

    let response = RegisterResponse {
        toast: Toast::success("Conta criada com sucesso!", "Você pode fazer login agora."),
        redirect_to: LOGIN_PATH,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Public authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
        .route("/register", get(register_page).post(register))
}
