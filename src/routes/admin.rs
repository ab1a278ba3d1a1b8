use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::{
        donations::{DonationList, ReviewDonationRequest},
        orders::{OrderList, OrderWithItems, UpdateOrderStatusRequest},
        pets::{LostReportList, PetList},
        tickets::{ResolveTicketRequest, TicketList},
    },
    error::AppResult,
    middleware::auth::AuthAdmin,
    models::{Donation, LostReport, Order, SupportTicket},
    response::ApiResponse,
    routes::params::{DonationListQuery, LostReportListQuery, OrderListQuery, Pagination},
    services::{donation_service, order_service, pet_service, ticket_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/{order_no}", get(get_order))
        .route("/orders/{order_no}/status", patch(update_order_status))
        .route("/donations", get(list_donations))
        .route("/donations/{id}", get(get_donation))
        .route("/donations/{id}/review", patch(review_donation))
        .route("/lost-reports", get(list_lost_reports))
        .route("/lost-reports/{id}/found", patch(mark_found))
        .route("/pets", get(list_pets))
        .route("/tickets", get(list_tickets))
        .route("/tickets/{id}/resolve", patch(resolve_ticket))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by exact status"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
        (status = 200, description = "All orders (ORDER_TRACKING section)", body = ApiResponse<OrderList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, &admin, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{order_no}",
    params(("order_no" = String, Path, description = "Order number")),
    responses(
        (status = 200, description = "Order with items", body = ApiResponse<OrderWithItems>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_order(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(order_no): Path<String>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = order_service::get_order(&state, &admin, &order_no).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{order_no}/status",
    params(("order_no" = String, Path, description = "Order number")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated", body = ApiResponse<Order>),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(order_no): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::update_status(&state, &admin, &order_no, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/donations",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "All donations (DONATIONS section)", body = ApiResponse<DonationList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_donations(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Query(query): Query<DonationListQuery>,
) -> AppResult<Json<ApiResponse<DonationList>>> {
    let resp = donation_service::list_donations(&state, &admin, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/donations/{id}",
    params(("id" = Uuid, Path, description = "Donation ID")),
    responses(
        (status = 200, description = "Donation", body = ApiResponse<Donation>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_donation(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Donation>>> {
    let resp = donation_service::get_donation(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/donations/{id}/review",
    params(("id" = Uuid, Path, description = "Donation ID")),
    request_body = ReviewDonationRequest,
    responses(
        (status = 200, description = "Donation reviewed", body = ApiResponse<Donation>),
        (status = 400, description = "Invalid review status"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn review_donation(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewDonationRequest>,
) -> AppResult<Json<ApiResponse<Donation>>> {
    let resp = donation_service::review_donation(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/lost-reports",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("resolved" = Option<bool>, Query, description = "Filter by resolution")
    ),
    responses(
        (status = 200, description = "Lost reports (LOST_PETS section)", body = ApiResponse<LostReportList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_lost_reports(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Query(query): Query<LostReportListQuery>,
) -> AppResult<Json<ApiResponse<LostReportList>>> {
    let resp = pet_service::list_lost_reports(&state, &admin, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/lost-reports/{id}/found",
    params(("id" = Uuid, Path, description = "Lost report ID")),
    responses(
        (status = 200, description = "Report resolved", body = ApiResponse<LostReport>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn mark_found(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<LostReport>>> {
    let resp = pet_service::mark_found(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/pets",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Registered pets (SUPER_ADMIN)", body = ApiResponse<PetList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_pets(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<PetList>>> {
    let resp = pet_service::list_pets(&state, &admin, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/tickets",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Support tickets (SUPER_ADMIN)", body = ApiResponse<TicketList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<TicketList>>> {
    let resp = ticket_service::list_tickets(&state, &admin, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/tickets/{id}/resolve",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = ResolveTicketRequest,
    responses(
        (status = 200, description = "Ticket resolved", body = ApiResponse<SupportTicket>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn resolve_ticket(
    State(state): State<AppState>,
    admin: AuthAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResolveTicketRequest>,
) -> AppResult<Json<ApiResponse<SupportTicket>>> {
    let resp = ticket_service::resolve_ticket(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}
