use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::donations::{CreateDonationRequest, DonationList, ReviewDonationRequest},
    entity::{
        Donations,
        donations::{ActiveModel as DonationActive, Column as DonationCol, Model as DonationModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthAdmin, ensure_section},
    models::{AdminSection, Donation, DonationStatus},
    response::{ApiResponse, Meta},
    routes::params::DonationListQuery,
    state::AppState,
};

/// Record a manual donation. Verification against the payment channel happens
/// later by hand, so every donation starts PENDING.
pub async fn create_donation(
    state: &AppState,
    payload: CreateDonationRequest,
) -> AppResult<ApiResponse<Donation>> {
    if payload.donor_name.trim().is_empty() {
        return Err(AppError::BadRequest("Donor name is required".into()));
    }
    if payload.amount <= 0 {
        return Err(AppError::BadRequest("Amount must be positive".into()));
    }
    if payload.transaction_ref.trim().is_empty() {
        return Err(AppError::BadRequest("Transaction reference is required".into()));
    }

    let donation = DonationActive {
        id: Set(Uuid::new_v4()),
        donor_name: Set(payload.donor_name),
        donor_email: Set(payload.donor_email),
        amount: Set(payload.amount),
        method: Set(payload.method),
        transaction_ref: Set(payload.transaction_ref),
        message: Set(payload.message),
        status: Set(DonationStatus::Pending.as_str().to_string()),
        review_note: Set(None),
        verified_at: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Donation recorded",
        donation_from_entity(donation)?,
        Some(Meta::empty()),
    ))
}

/// Admin decision on a pending donation: VERIFIED or REJECTED, with an
/// optional note. Verification stamps `verified_at`.
pub async fn review_donation(
    state: &AppState,
    admin: &AuthAdmin,
    id: Uuid,
    payload: ReviewDonationRequest,
) -> AppResult<ApiResponse<Donation>> {
    ensure_section(admin, AdminSection::Donations)?;

    if payload.status == DonationStatus::Pending {
        return Err(AppError::BadRequest(
            "Review status must be VERIFIED or REJECTED".into(),
        ));
    }

    let existing = Donations::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: DonationActive = existing.into();
    active.status = Set(payload.status.as_str().to_string());
    active.review_note = Set(payload.note);
    if payload.status == DonationStatus::Verified {
        active.verified_at = Set(Some(Utc::now().into()));
    }
    active.updated_at = Set(Utc::now().into());
    let donation = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(admin.admin_id),
        "donation_review",
        Some("donations"),
        Some(serde_json::json!({ "donation_id": donation.id, "status": donation.status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Donation reviewed",
        donation_from_entity(donation)?,
        Some(Meta::empty()),
    ))
}

pub async fn get_donation(
    state: &AppState,
    admin: &AuthAdmin,
    id: Uuid,
) -> AppResult<ApiResponse<Donation>> {
    ensure_section(admin, AdminSection::Donations)?;
    let donation = Donations::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Ok",
        donation_from_entity(donation)?,
        Some(Meta::empty()),
    ))
}

pub async fn list_donations(
    state: &AppState,
    admin: &AuthAdmin,
    query: DonationListQuery,
) -> AppResult<ApiResponse<DonationList>> {
    ensure_section(admin, AdminSection::Donations)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(DonationCol::Status.eq(status.as_str()));
    }

    let finder = Donations::find()
        .filter(condition)
        .order_by_desc(DonationCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let donations = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(donation_from_entity)
        .collect::<AppResult<Vec<Donation>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Donations",
        DonationList { items: donations },
        Some(meta),
    ))
}

fn donation_from_entity(model: DonationModel) -> AppResult<Donation> {
    let status = DonationStatus::parse(&model.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("Unknown donation status {}", model.status))
    })?;
    Ok(Donation {
        id: model.id,
        donor_name: model.donor_name,
        donor_email: model.donor_email,
        amount: model.amount,
        method: model.method,
        transaction_ref: model.transaction_ref,
        message: model.message,
        status,
        review_note: model.review_note,
        verified_at: model.verified_at.map(|dt| dt.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
