use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::auth::{
        LoginRequest, LoginResponse, ResendOtpRequest, SectionList, VerifyOtpRequest,
        VerifyOtpResponse,
    },
    error::AppResult,
    middleware::auth::AuthAdmin,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/verify", post(verify))
        .route("/admin/resend", post(resend))
        .route("/admin/logout", post(logout))
        .route("/admin/sections", get(sections))
}

#[utoipa::path(
    post,
    path = "/api/auth/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Code emailed, returns otp token", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/admin/verify",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Access token issued", body = ApiResponse<VerifyOtpResponse>),
        (status = 401, description = "Wrong code or expired token")
    ),
    tag = "Auth"
)]
pub async fn verify(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> AppResult<Json<ApiResponse<VerifyOtpResponse>>> {
    let resp = auth_service::verify_otp(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/admin/resend",
    request_body = ResendOtpRequest,
    responses(
        (status = 200, description = "Fresh code emailed", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Unknown or consumed token")
    ),
    tag = "Auth"
)]
pub async fn resend(
    State(state): State<AppState>,
    Json(payload): Json<ResendOtpRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::resend_otp(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/admin/logout",
    responses(
        (status = 200, description = "Session revoked"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    admin: AuthAdmin,
) -> AppResult<Json<ApiResponse<()>>> {
    let resp = auth_service::logout(&state, &admin).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/auth/admin/sections",
    responses(
        (status = 200, description = "Sections visible to this role", body = ApiResponse<SectionList>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn sections(admin: AuthAdmin) -> Json<ApiResponse<SectionList>> {
    Json(auth_service::sections(&admin))
}
