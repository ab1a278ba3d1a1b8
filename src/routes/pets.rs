use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::pets::{RegisterPetRequest, ReportLostRequest},
    error::AppResult,
    models::{LostReport, Pet},
    response::ApiResponse,
    services::pet_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_pet))
        .route("/{id}", get(get_pet))
        .route("/tag/{tag_code}", get(get_pet_by_tag))
        .route("/{id}/lost", post(report_lost))
}

#[utoipa::path(
    post,
    path = "/api/pets",
    request_body = RegisterPetRequest,
    responses(
        (status = 200, description = "Pet registered with tag code and QR URL", body = ApiResponse<Pet>),
        (status = 400, description = "Missing required field")
    ),
    tag = "Pets"
)]
pub async fn register_pet(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPetRequest>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let resp = pet_service::register_pet(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/pets/{id}",
    params(("id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Pet profile", body = ApiResponse<Pet>),
        (status = 404, description = "Not Found")
    ),
    tag = "Pets"
)]
pub async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let resp = pet_service::get_pet(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/pets/tag/{tag_code}",
    params(("tag_code" = String, Path, description = "Tag code from a scanned QR")),
    responses(
        (status = 200, description = "Pet profile", body = ApiResponse<Pet>),
        (status = 404, description = "Not Found")
    ),
    tag = "Pets"
)]
pub async fn get_pet_by_tag(
    State(state): State<AppState>,
    Path(tag_code): Path<String>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let resp = pet_service::get_pet_by_tag(&state, &tag_code).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/pets/{id}/lost",
    params(("id" = Uuid, Path, description = "Pet ID")),
    request_body = ReportLostRequest,
    responses(
        (status = 200, description = "Lost report filed", body = ApiResponse<LostReport>),
        (status = 404, description = "Pet not found")
    ),
    tag = "Pets"
)]
pub async fn report_lost(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReportLostRequest>,
) -> AppResult<Json<ApiResponse<LostReport>>> {
    let resp = pet_service::report_lost(&state, id, payload).await?;
    Ok(Json(resp))
}
