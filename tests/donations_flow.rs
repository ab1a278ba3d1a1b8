mod common;

use uuid::Uuid;

use pet_koi_api::{
    dto::donations::{CreateDonationRequest, ReviewDonationRequest},
    error::AppError,
    middleware::auth::AuthAdmin,
    models::{AdminRole, DonationStatus},
    routes::params::DonationListQuery,
    services::donation_service,
};

fn super_admin() -> AuthAdmin {
    AuthAdmin {
        admin_id: Uuid::new_v4(),
        session_id: Uuid::new_v4(),
        role: AdminRole::SuperAdmin,
    }
}

fn donation_request() -> CreateDonationRequest {
    CreateDonationRequest {
        donor_name: "Farhan Chowdhury".into(),
        donor_email: Some("farhan@example.com".into()),
        amount: 1500,
        method: "bkash".into(),
        transaction_ref: "BK9A7F3C21".into(),
        message: Some("For the shelter cats".into()),
    }
}

// Donation starts PENDING; verification stamps verified_at and keeps the
// reviewer's note, all visible on a subsequent fetch.
#[tokio::test]
async fn donation_is_pending_until_verified_with_note() -> anyhow::Result<()> {
    let Some((state, _outbox)) = common::setup_state().await? else {
        return Ok(());
    };

    let created = donation_service::create_donation(&state, donation_request())
        .await?
        .data
        .unwrap();
    assert_eq!(created.status, DonationStatus::Pending);
    assert!(created.verified_at.is_none());

    let admin = super_admin();
    let reviewed = donation_service::review_donation(
        &state,
        &admin,
        created.id,
        ReviewDonationRequest {
            status: DonationStatus::Verified,
            note: Some("Matched bKash statement".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(reviewed.status, DonationStatus::Verified);
    assert!(reviewed.verified_at.is_some());

    let fetched = donation_service::get_donation(&state, &admin, created.id)
        .await?
        .data
        .unwrap();
    assert_eq!(fetched.status, DonationStatus::Verified);
    assert!(fetched.verified_at.is_some());
    assert_eq!(fetched.review_note.as_deref(), Some("Matched bKash statement"));

    Ok(())
}

#[tokio::test]
async fn rejected_donation_keeps_verified_at_empty() -> anyhow::Result<()> {
    let Some((state, _outbox)) = common::setup_state().await? else {
        return Ok(());
    };

    let created = donation_service::create_donation(&state, donation_request())
        .await?
        .data
        .unwrap();

    let admin = super_admin();
    let reviewed = donation_service::review_donation(
        &state,
        &admin,
        created.id,
        ReviewDonationRequest {
            status: DonationStatus::Rejected,
            note: Some("No matching transaction".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(reviewed.status, DonationStatus::Rejected);
    assert!(reviewed.verified_at.is_none());

    Ok(())
}

#[tokio::test]
async fn review_validates_status_target_and_access() -> anyhow::Result<()> {
    let Some((state, _outbox)) = common::setup_state().await? else {
        return Ok(());
    };

    let created = donation_service::create_donation(&state, donation_request())
        .await?
        .data
        .unwrap();

    let admin = super_admin();

    // PENDING is not a review decision.
    let err = donation_service::review_donation(
        &state,
        &admin,
        created.id,
        ReviewDonationRequest {
            status: DonationStatus::Pending,
            note: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Unknown donation.
    let err = donation_service::review_donation(
        &state,
        &admin,
        Uuid::new_v4(),
        ReviewDonationRequest {
            status: DonationStatus::Verified,
            note: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    // Donations are outside the ORDER_TRACKER section.
    let tracker = AuthAdmin {
        admin_id: Uuid::new_v4(),
        session_id: Uuid::new_v4(),
        role: AdminRole::OrderTracker,
    };
    let err = donation_service::review_donation(
        &state,
        &tracker,
        created.id,
        ReviewDonationRequest {
            status: DonationStatus::Verified,
            note: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    Ok(())
}

#[tokio::test]
async fn list_donations_filters_by_status() -> anyhow::Result<()> {
    let Some((state, _outbox)) = common::setup_state().await? else {
        return Ok(());
    };

    let admin = super_admin();
    let first = donation_service::create_donation(&state, donation_request())
        .await?
        .data
        .unwrap();
    donation_service::create_donation(&state, donation_request()).await?;

    donation_service::review_donation(
        &state,
        &admin,
        first.id,
        ReviewDonationRequest {
            status: DonationStatus::Verified,
            note: None,
        },
    )
    .await?;

    let pending = donation_service::list_donations(
        &state,
        &admin,
        DonationListQuery {
            page: None,
            per_page: None,
            status: Some(DonationStatus::Pending),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(pending.items.len(), 1);

    let verified = donation_service::list_donations(
        &state,
        &admin,
        DonationListQuery {
            page: None,
            per_page: None,
            status: Some(DonationStatus::Verified),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(verified.items.len(), 1);
    assert_eq!(verified.items[0].id, first.id);

    Ok(())
}
