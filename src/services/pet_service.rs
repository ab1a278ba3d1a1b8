use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::pets::{LostReportList, PetList, RegisterPetRequest, ReportLostRequest},
    entity::{
        LostReports, Pets,
        lost_reports::{
            ActiveModel as LostReportActive, Column as LostReportCol, Model as LostReportModel,
        },
        pets::{ActiveModel as PetActive, Column as PetCol, Model as PetModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthAdmin, ensure_section, ensure_super_admin},
    models::{AdminSection, LostReport, Pet},
    response::{ApiResponse, Meta},
    routes::params::{LostReportListQuery, Pagination},
    state::AppState,
};

/// Register a pet and assign its tag. The QR URL points at the public tag
/// lookup page; rendering the QR image itself is a client concern.
pub async fn register_pet(
    state: &AppState,
    payload: RegisterPetRequest,
) -> AppResult<ApiResponse<Pet>> {
    if payload.name.trim().is_empty() || payload.species.trim().is_empty() {
        return Err(AppError::BadRequest("Pet name and species are required".into()));
    }
    if payload.owner_name.trim().is_empty()
        || payload.owner_email.trim().is_empty()
        || payload.owner_phone.trim().is_empty()
    {
        return Err(AppError::BadRequest("Owner contact details are required".into()));
    }

    let id = Uuid::new_v4();
    let tag_code = build_tag_code(id);
    let qr_url = format!("{}/p/{}", state.public_base_url, tag_code);

    let pet = PetActive {
        id: Set(id),
        name: Set(payload.name),
        species: Set(payload.species),
        breed: Set(payload.breed),
        color: Set(payload.color),
        age_months: Set(payload.age_months),
        photo_url: Set(payload.photo_url),
        owner_name: Set(payload.owner_name),
        owner_email: Set(payload.owner_email),
        owner_phone: Set(payload.owner_phone),
        tag_code: Set(tag_code),
        qr_url: Set(qr_url),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Pet registered",
        pet_from_entity(pet),
        Some(Meta::empty()),
    ))
}

pub async fn get_pet(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Pet>> {
    let pet = Pets::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Ok",
        pet_from_entity(pet),
        Some(Meta::empty()),
    ))
}

/// Landing lookup for a scanned tag.
pub async fn get_pet_by_tag(state: &AppState, tag_code: &str) -> AppResult<ApiResponse<Pet>> {
    let pet = Pets::find()
        .filter(PetCol::TagCode.eq(tag_code))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Ok",
        pet_from_entity(pet),
        Some(Meta::empty()),
    ))
}

pub async fn list_pets(
    state: &AppState,
    admin: &AuthAdmin,
    pagination: Pagination,
) -> AppResult<ApiResponse<PetList>> {
    ensure_super_admin(admin)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Pets::find().order_by_desc(PetCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let pets = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(pet_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Pets", PetList { items: pets }, Some(meta)))
}

/// File a lost report for a registered pet.
pub async fn report_lost(
    state: &AppState,
    pet_id: Uuid,
    payload: ReportLostRequest,
) -> AppResult<ApiResponse<LostReport>> {
    if payload.last_seen_address.trim().is_empty() {
        return Err(AppError::BadRequest("Last seen address is required".into()));
    }
    if payload.contact_phone.trim().is_empty() {
        return Err(AppError::BadRequest("Contact phone is required".into()));
    }

    // The report must point at a registered pet.
    Pets::find_by_id(pet_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let report = LostReportActive {
        id: Set(Uuid::new_v4()),
        pet_id: Set(pet_id),
        last_seen_address: Set(payload.last_seen_address),
        last_seen_at: Set(payload.last_seen_at.map(Into::into)),
        details: Set(payload.details),
        contact_phone: Set(payload.contact_phone),
        resolved_at: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Lost report filed",
        lost_report_from_entity(report),
        Some(Meta::empty()),
    ))
}

pub async fn list_lost_reports(
    state: &AppState,
    admin: &AuthAdmin,
    query: LostReportListQuery,
) -> AppResult<ApiResponse<LostReportList>> {
    ensure_section(admin, AdminSection::LostPets)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(resolved) = query.resolved {
        condition = condition.add(if resolved {
            LostReportCol::ResolvedAt.is_not_null()
        } else {
            LostReportCol::ResolvedAt.is_null()
        });
    }

    let finder = LostReports::find()
        .filter(condition)
        .order_by_desc(LostReportCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let reports = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(lost_report_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Lost reports",
        LostReportList { items: reports },
        Some(meta),
    ))
}

pub async fn mark_found(
    state: &AppState,
    admin: &AuthAdmin,
    report_id: Uuid,
) -> AppResult<ApiResponse<LostReport>> {
    ensure_section(admin, AdminSection::LostPets)?;

    let existing = LostReports::find_by_id(report_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: LostReportActive = existing.into();
    active.resolved_at = Set(Some(Utc::now().into()));
    let report = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(admin.admin_id),
        "lost_report_resolved",
        Some("lost_reports"),
        Some(serde_json::json!({ "report_id": report.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Report resolved",
        lost_report_from_entity(report),
        Some(Meta::empty()),
    ))
}

fn pet_from_entity(model: PetModel) -> Pet {
    Pet {
        id: model.id,
        name: model.name,
        species: model.species,
        breed: model.breed,
        color: model.color,
        age_months: model.age_months,
        photo_url: model.photo_url,
        owner_name: model.owner_name,
        owner_email: model.owner_email,
        owner_phone: model.owner_phone,
        tag_code: model.tag_code,
        qr_url: model.qr_url,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn lost_report_from_entity(model: LostReportModel) -> LostReport {
    LostReport {
        id: model.id,
        pet_id: model.pet_id,
        last_seen_address: model.last_seen_address,
        last_seen_at: model.last_seen_at.map(|dt| dt.with_timezone(&Utc)),
        details: model.details,
        contact_phone: model.contact_phone,
        resolved_at: model.resolved_at.map(|dt| dt.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn build_tag_code(pet_id: Uuid) -> String {
    let suffix = pet_id.simple().to_string();
    format!("KOI{}", &suffix[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_code_is_short_and_uppercase() {
        let code = build_tag_code(Uuid::new_v4());
        assert_eq!(code.len(), 11);
        assert!(code.starts_with("KOI"));
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }
}
