mod common;

use uuid::Uuid;

use pet_koi_api::{
    dto::{
        orders::{CheckoutItem, CheckoutRequest, UpdateOrderStatusRequest},
        pets::RegisterPetRequest,
    },
    error::AppError,
    middleware::auth::AuthAdmin,
    models::{AdminRole, OrderStatus},
    routes::params::OrderListQuery,
    services::{order_service, pet_service},
};

fn tracker() -> AuthAdmin {
    AuthAdmin {
        admin_id: Uuid::new_v4(),
        session_id: Uuid::new_v4(),
        role: AdminRole::OrderTracker,
    }
}

fn checkout_request(pet_id: Option<Uuid>) -> CheckoutRequest {
    CheckoutRequest {
        items: vec![
            CheckoutItem {
                product_id: Uuid::new_v4(),
                sku: "TAG-RED-M".into(),
                quantity: 2,
                unit_price: 450,
            },
            CheckoutItem {
                product_id: Uuid::new_v4(),
                sku: "COLLAR-BLUE".into(),
                quantity: 1,
                unit_price: 700,
            },
        ],
        recipient_name: "Anika Rahman".into(),
        recipient_phone: "+8801700000000".into(),
        address: "House 12, Road 5, Dhanmondi".into(),
        city: "Dhaka".into(),
        shipping_fee: 60,
        pet_id,
    }
}

// Checkout -> public tracking lookup -> admin drives the status through the
// whole enumeration; every status is accepted and read back unchanged.
#[tokio::test]
async fn checkout_track_and_update_through_all_statuses() -> anyhow::Result<()> {
    let Some((state, _outbox)) = common::setup_state().await? else {
        return Ok(());
    };

    let pet = pet_service::register_pet(
        &state,
        RegisterPetRequest {
            name: "Mishti".into(),
            species: "cat".into(),
            breed: Some("Deshi".into()),
            color: Some("white".into()),
            age_months: Some(18),
            photo_url: None,
            owner_name: "Anika Rahman".into(),
            owner_email: "anika@example.com".into(),
            owner_phone: "+8801700000000".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(pet.qr_url.ends_with(&pet.tag_code));

    let placed = order_service::checkout(&state, checkout_request(Some(pet.id)))
        .await?
        .data
        .unwrap();
    assert_eq!(placed.order.status, OrderStatus::Pending);
    assert_eq!(placed.order.progress_step, 0);
    assert_eq!(placed.order.subtotal, 2 * 450 + 700);
    assert_eq!(placed.order.total, 2 * 450 + 700 + 60);
    assert!(placed.order.order_no.starts_with("PK-"));
    assert_eq!(placed.order.qr_url.as_deref(), Some(pet.qr_url.as_str()));
    assert_eq!(placed.items.len(), 2);

    let order_no = placed.order.order_no.clone();

    let tracked = order_service::track_order(&state, &order_no)
        .await?
        .data
        .unwrap();
    assert_eq!(tracked.order.id, placed.order.id);

    // No transition graph: every status in the enumeration may follow any
    // other, and reads back exactly as written.
    let admin = tracker();
    for status in OrderStatus::ALL {
        let updated = order_service::update_status(
            &state,
            &admin,
            &order_no,
            UpdateOrderStatusRequest { status },
        )
        .await?
        .data
        .unwrap();
        assert_eq!(updated.status, status);

        let fetched = order_service::get_order(&state, &admin, &order_no)
            .await?
            .data
            .unwrap();
        assert_eq!(fetched.order.status, status);
        assert_eq!(fetched.order.progress_step, status.progress_step());
    }

    Ok(())
}

#[tokio::test]
async fn update_status_on_unknown_order_is_not_found() -> anyhow::Result<()> {
    let Some((state, _outbox)) = common::setup_state().await? else {
        return Ok(());
    };

    let admin = tracker();
    let err = order_service::update_status(
        &state,
        &admin,
        "PK-20250101-deadbeef",
        UpdateOrderStatusRequest {
            status: OrderStatus::Shipped,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    // And nothing was created.
    let all = order_service::list_orders(
        &state,
        &admin,
        OrderListQuery {
            page: None,
            per_page: None,
            status: None,
            sort_order: None,
        },
    )
    .await?;
    assert_eq!(all.meta.unwrap().total, Some(0));

    Ok(())
}

#[tokio::test]
async fn list_orders_filters_by_exact_status() -> anyhow::Result<()> {
    let Some((state, _outbox)) = common::setup_state().await? else {
        return Ok(());
    };

    let admin = tracker();
    let placed = order_service::checkout(&state, checkout_request(None))
        .await?
        .data
        .unwrap();
    order_service::update_status(
        &state,
        &admin,
        &placed.order.order_no,
        UpdateOrderStatusRequest {
            status: OrderStatus::Delivered,
        },
    )
    .await?;

    let delivered = order_service::list_orders(
        &state,
        &admin,
        OrderListQuery {
            page: None,
            per_page: None,
            status: Some(OrderStatus::Delivered),
            sort_order: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(delivered.items.len(), 1);

    let cancelled = order_service::list_orders(
        &state,
        &admin,
        OrderListQuery {
            page: None,
            per_page: None,
            status: Some(OrderStatus::Cancelled),
            sort_order: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert!(cancelled.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn order_tracking_is_section_gated() -> anyhow::Result<()> {
    let Some((state, _outbox)) = common::setup_state().await? else {
        return Ok(());
    };

    let placed = order_service::checkout(&state, checkout_request(None))
        .await?
        .data
        .unwrap();

    let lost_pet_admin = AuthAdmin {
        admin_id: Uuid::new_v4(),
        session_id: Uuid::new_v4(),
        role: AdminRole::LostPet,
    };
    let err = order_service::update_status(
        &state,
        &lost_pet_admin,
        &placed.order.order_no,
        UpdateOrderStatusRequest {
            status: OrderStatus::Shipped,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    Ok(())
}

#[tokio::test]
async fn checkout_rejects_empty_and_invalid_items() -> anyhow::Result<()> {
    let Some((state, _outbox)) = common::setup_state().await? else {
        return Ok(());
    };

    let mut empty = checkout_request(None);
    empty.items.clear();
    let err = order_service::checkout(&state, empty).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let mut zero_qty = checkout_request(None);
    zero_qty.items[0].quantity = 0;
    let err = order_service::checkout(&state, zero_qty).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Extreme prices must be rejected, not wrapped into a bogus total.
    let mut huge_line = checkout_request(None);
    huge_line.items[0].unit_price = i64::MAX;
    let err = order_service::checkout(&state, huge_line).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let mut huge_total = checkout_request(None);
    huge_total.items[0].quantity = 1;
    huge_total.items[0].unit_price = i64::MAX;
    huge_total.items[1].quantity = 1;
    huge_total.items[1].unit_price = 1;
    let err = order_service::checkout(&state, huge_total).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}
