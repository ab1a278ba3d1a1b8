use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::tickets::{CreateTicketRequest, ResolveTicketRequest, TicketList},
    entity::{
        SupportTickets,
        support_tickets::{
            ActiveModel as TicketActive, Column as TicketCol, Model as TicketModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthAdmin, ensure_super_admin},
    models::{SupportTicket, TicketStatus},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn create_ticket(
    state: &AppState,
    payload: CreateTicketRequest,
) -> AppResult<ApiResponse<SupportTicket>> {
    if payload.email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".into()));
    }
    if payload.subject.trim().is_empty() || payload.message.trim().is_empty() {
        return Err(AppError::BadRequest("Subject and message are required".into()));
    }

    let ticket = TicketActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        email: Set(payload.email),
        subject: Set(payload.subject),
        message: Set(payload.message),
        status: Set(TicketStatus::Open.as_str().to_string()),
        reply: Set(None),
        resolved_at: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Ticket created",
        ticket_from_entity(ticket)?,
        Some(Meta::empty()),
    ))
}

pub async fn list_tickets(
    state: &AppState,
    admin: &AuthAdmin,
    pagination: Pagination,
) -> AppResult<ApiResponse<TicketList>> {
    ensure_super_admin(admin)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = SupportTickets::find().order_by_desc(TicketCol::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let tickets = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ticket_from_entity)
        .collect::<AppResult<Vec<SupportTicket>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Tickets",
        TicketList { items: tickets },
        Some(meta),
    ))
}

pub async fn resolve_ticket(
    state: &AppState,
    admin: &AuthAdmin,
    id: Uuid,
    payload: ResolveTicketRequest,
) -> AppResult<ApiResponse<SupportTicket>> {
    ensure_super_admin(admin)?;

    let existing = SupportTickets::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: TicketActive = existing.into();
    active.status = Set(TicketStatus::Resolved.as_str().to_string());
    active.reply = Set(payload.reply);
    active.resolved_at = Set(Some(Utc::now().into()));
    active.updated_at = Set(Utc::now().into());
    let ticket = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Ticket resolved",
        ticket_from_entity(ticket)?,
        Some(Meta::empty()),
    ))
}

fn ticket_from_entity(model: TicketModel) -> AppResult<SupportTicket> {
    let status = TicketStatus::parse(&model.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("Unknown ticket status {}", model.status))
    })?;
    Ok(SupportTicket {
        id: model.id,
        name: model.name,
        email: model.email,
        subject: model.subject,
        message: model.message,
        status,
        reply: model.reply,
        resolved_at: model.resolved_at.map(|dt| dt.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
