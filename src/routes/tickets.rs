use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::tickets::CreateTicketRequest,
    error::AppResult,
    models::SupportTicket,
    response::ApiResponse,
    services::ticket_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_ticket))
}

#[utoipa::path(
    post,
    path = "/api/tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 200, description = "Ticket created", body = ApiResponse<SupportTicket>),
        (status = 400, description = "Missing required field")
    ),
    tag = "Tickets"
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(payload): Json<CreateTicketRequest>,
) -> AppResult<Json<ApiResponse<SupportTicket>>> {
    let resp = ticket_service::create_ticket(&state, payload).await?;
    Ok(Json(resp))
}
