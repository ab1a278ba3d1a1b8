use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use uuid::Uuid;

use sea_orm::{Condition, PaginatorTrait, QueryOrder, QuerySelect};

use crate::{
    audit::log_audit,
    dto::orders::{CheckoutRequest, OrderList, OrderWithItems, UpdateOrderStatusRequest},
    entity::{
        OrderItems, Orders, Pets,
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Model as OrderModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthAdmin, ensure_section},
    models::{AdminSection, Order, OrderItem, OrderStatus},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

/// Create an order from the submitted line items. Orders start in PENDING and
/// only move via the admin status update.
pub async fn checkout(
    state: &AppState,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("Order has no items".into()));
    }
    if payload.recipient_name.trim().is_empty() || payload.recipient_phone.trim().is_empty() {
        return Err(AppError::BadRequest("Recipient name and phone are required".into()));
    }
    if payload.shipping_fee < 0 {
        return Err(AppError::BadRequest("Shipping fee cannot be negative".into()));
    }

    let mut subtotal: i64 = 0;
    for item in &payload.items {
        if item.quantity <= 0 {
            return Err(AppError::BadRequest("Item quantity must be positive".into()));
        }
        if item.unit_price < 0 {
            return Err(AppError::BadRequest("Item price cannot be negative".into()));
        }
        // Prices come straight off the request, so totals must not wrap.
        let line_total = item
            .unit_price
            .checked_mul(i64::from(item.quantity))
            .ok_or_else(|| AppError::BadRequest("Item total is too large".into()))?;
        subtotal = subtotal
            .checked_add(line_total)
            .ok_or_else(|| AppError::BadRequest("Order total is too large".into()))?;
    }
    let total = subtotal
        .checked_add(payload.shipping_fee)
        .ok_or_else(|| AppError::BadRequest("Order total is too large".into()))?;

    // A linked pet supplies the QR URL printed on the tag.
    let qr_url = match payload.pet_id {
        Some(pet_id) => {
            let pet = Pets::find_by_id(pet_id)
                .one(&state.orm)
                .await?
                .ok_or_else(|| AppError::BadRequest("Linked pet does not exist".into()))?;
            Some(pet.qr_url)
        }
        None => None,
    };

    let txn = state.orm.begin().await?;

    let order_id = Uuid::new_v4();
    let order = OrderActive {
        id: Set(order_id),
        order_no: Set(build_order_no(order_id)),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        subtotal: Set(subtotal),
        shipping_fee: Set(payload.shipping_fee),
        total: Set(total),
        recipient_name: Set(payload.recipient_name),
        recipient_phone: Set(payload.recipient_phone),
        address: Set(payload.address),
        city: Set(payload.city),
        pet_id: Set(payload.pet_id),
        qr_url: Set(qr_url),
        created_at: NotSet,
        updated_at: NotSet,
        expires_at: Set(None),
    }
    .insert(&txn)
    .await?;

    let mut items: Vec<OrderItem> = Vec::with_capacity(payload.items.len());
    for item in payload.items {
        let inserted = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(item.product_id),
            sku: Set(item.sku),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        items.push(order_item_from_entity(inserted));
    }

    txn.commit().await?;

    Ok(ApiResponse::success(
        "Order placed",
        OrderWithItems {
            order: order_from_entity(order)?,
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Public tracking lookup by human-readable order number.
pub async fn track_order(
    state: &AppState,
    order_no: &str,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = find_by_order_no(state, order_no).await?;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_item_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Ok",
        OrderWithItems {
            order: order_from_entity(order)?,
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Admin listing across all orders, exact-match status filter only.
pub async fn list_orders(
    state: &AppState,
    admin: &AuthAdmin,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_section(admin, AdminSection::OrderTracking)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status.as_str()));
    }

    let mut finder = Orders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect::<AppResult<Vec<Order>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items: orders },
        Some(meta),
    ))
}

/// Admin view of a single order with its items.
pub async fn get_order(
    state: &AppState,
    admin: &AuthAdmin,
    order_no: &str,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_section(admin, AdminSection::OrderTracking)?;
    let order = find_by_order_no(state, order_no).await?;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_item_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Order found",
        OrderWithItems {
            order: order_from_entity(order)?,
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Set an order to any of the enumerated statuses. No transition graph is
/// enforced; the status tracker records whatever the admin picks.
pub async fn update_status(
    state: &AppState,
    admin: &AuthAdmin,
    order_no: &str,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_section(admin, AdminSection::OrderTracking)?;

    let existing = find_by_order_no(state, order_no).await?;

    let mut active: OrderActive = existing.into();
    active.status = Set(payload.status.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(admin.admin_id),
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({ "order_no": order.order_no, "status": order.status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order updated",
        order_from_entity(order)?,
        Some(Meta::empty()),
    ))
}

pub(crate) async fn find_by_order_no(state: &AppState, order_no: &str) -> AppResult<OrderModel> {
    Orders::find()
        .filter(OrderCol::OrderNo.eq(order_no))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

pub(crate) fn order_from_entity(model: OrderModel) -> AppResult<Order> {
    let status = OrderStatus::parse(&model.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("Unknown order status {}", model.status))
    })?;
    Ok(Order {
        id: model.id,
        order_no: model.order_no,
        status,
        progress_step: status.progress_step(),
        subtotal: model.subtotal,
        shipping_fee: model.shipping_fee,
        total: model.total,
        recipient_name: model.recipient_name,
        recipient_phone: model.recipient_phone,
        address: model.address,
        city: model.city,
        pet_id: model.pet_id,
        qr_url: model.qr_url,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        expires_at: model.expires_at.map(|dt| dt.with_timezone(&Utc)),
    })
}

pub(crate) fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        sku: model.sku,
        quantity: model.quantity,
        unit_price: model.unit_price,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn build_order_no(order_id: Uuid) -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = order_id.to_string();
    let short = &suffix[..8];
    format!("PK-{}-{}", date, short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_no_is_human_readable() {
        let id = Uuid::new_v4();
        let order_no = build_order_no(id);
        assert!(order_no.starts_with("PK-"));
        let parts: Vec<&str> = order_no.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 8);
    }
}
