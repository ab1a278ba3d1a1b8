use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::donations::CreateDonationRequest,
    error::AppResult,
    models::Donation,
    response::ApiResponse,
    services::donation_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_donation))
}

#[utoipa::path(
    post,
    path = "/api/donations",
    request_body = CreateDonationRequest,
    responses(
        (status = 200, description = "Donation recorded as PENDING", body = ApiResponse<Donation>),
        (status = 400, description = "Invalid donation")
    ),
    tag = "Donations"
)]
pub async fn create_donation(
    State(state): State<AppState>,
    Json(payload): Json<CreateDonationRequest>,
) -> AppResult<Json<ApiResponse<Donation>>> {
    let resp = donation_service::create_donation(&state, payload).await?;
    Ok(Json(resp))
}
