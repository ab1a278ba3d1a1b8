mod common;

use jsonwebtoken::{DecodingKey, Validation, decode};
use sea_orm::EntityTrait;
use uuid::Uuid;

use pet_koi_api::{
    dto::auth::{Claims, LoginRequest, ResendOtpRequest, VerifyOtpRequest},
    entity::AdminSessions,
    error::AppError,
    middleware::auth::AuthAdmin,
    models::{AdminRole, AdminSection},
    services::auth_service,
    state::AppState,
};

// Two-step login: password -> emailed code -> access token. The code is
// single-use and non-digit garbage in the submitted code never verifies.
#[tokio::test]
async fn otp_login_verify_is_single_use() -> anyhow::Result<()> {
    let Some((state, outbox)) = common::setup_state().await? else {
        return Ok(());
    };

    common::create_admin(&state, "root@petkoi.test", "hunter2!", AdminRole::SuperAdmin).await?;

    // Wrong password never reaches the OTP step.
    let err = auth_service::login(
        &state,
        LoginRequest {
            email: "root@petkoi.test".into(),
            password: "wrong".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::AuthenticationFailed));
    assert!(outbox.lock().unwrap().is_empty());

    let login = auth_service::login(
        &state,
        LoginRequest {
            email: "root@petkoi.test".into(),
            password: "hunter2!".into(),
        },
    )
    .await?;
    let otp_token = login.data.unwrap().otp_token;
    let code = common::last_emailed_code(&outbox);

    // A code with a letter shoved in strips to 5 digits and is incomplete.
    let mangled = format!("{}a{}", &code[..2], &code[3..]);
    let err = auth_service::verify_otp(
        &state,
        VerifyOtpRequest {
            otp_token,
            code: mangled,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::AuthenticationFailed));

    // Correct pair succeeds and yields a bearer token plus the role.
    let verified = auth_service::verify_otp(
        &state,
        VerifyOtpRequest {
            otp_token,
            code: code.clone(),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(verified.token.starts_with("Bearer "));
    assert_eq!(verified.role, AdminRole::SuperAdmin);

    // Same pair a second time fails: the token was consumed.
    let err = auth_service::verify_otp(&state, VerifyOtpRequest { otp_token, code })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthenticationFailed));

    Ok(())
}

#[tokio::test]
async fn resend_replaces_code_under_same_token() -> anyhow::Result<()> {
    let Some((state, outbox)) = common::setup_state().await? else {
        return Ok(());
    };

    common::create_admin(&state, "ops@petkoi.test", "s3cret!!", AdminRole::OrderTracker).await?;

    let login = auth_service::login(
        &state,
        LoginRequest {
            email: "ops@petkoi.test".into(),
            password: "s3cret!!".into(),
        },
    )
    .await?;
    let otp_token = login.data.unwrap().otp_token;
    let first_code = common::last_emailed_code(&outbox);

    let resent = auth_service::resend_otp(&state, ResendOtpRequest { otp_token }).await?;
    assert_eq!(resent.data.unwrap().otp_token, otp_token);
    let second_code = common::last_emailed_code(&outbox);

    if first_code != second_code {
        // The replaced code no longer verifies.
        let err = auth_service::verify_otp(
            &state,
            VerifyOtpRequest {
                otp_token,
                code: first_code,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::AuthenticationFailed));
    }

    let verified = auth_service::verify_otp(
        &state,
        VerifyOtpRequest {
            otp_token,
            code: second_code,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(verified.role, AdminRole::OrderTracker);

    Ok(())
}

#[tokio::test]
async fn logout_revokes_backing_session() -> anyhow::Result<()> {
    let Some((state, outbox)) = common::setup_state().await? else {
        return Ok(());
    };

    let admin_id =
        common::create_admin(&state, "root@petkoi.test", "hunter2!", AdminRole::SuperAdmin).await?;

    let login = auth_service::login(
        &state,
        LoginRequest {
            email: "root@petkoi.test".into(),
            password: "hunter2!".into(),
        },
    )
    .await?;
    let otp_token = login.data.unwrap().otp_token;
    let code = common::last_emailed_code(&outbox);

    let verified = auth_service::verify_otp(&state, VerifyOtpRequest { otp_token, code })
        .await?
        .data
        .unwrap();

    let auth = auth_admin_from_token(&state, &verified.token)?;
    assert_eq!(auth.admin_id, admin_id);

    let session = AdminSessions::find_by_id(auth.session_id)
        .one(&state.orm)
        .await?
        .expect("session row");
    assert!(session.revoked_at.is_none());

    auth_service::logout(&state, &auth).await?;

    let session = AdminSessions::find_by_id(auth.session_id)
        .one(&state.orm)
        .await?
        .expect("session row");
    assert!(session.revoked_at.is_some());

    Ok(())
}

#[tokio::test]
async fn sections_follow_role_mapping() {
    let tracker = AuthAdmin {
        admin_id: Uuid::new_v4(),
        session_id: Uuid::new_v4(),
        role: AdminRole::OrderTracker,
    };
    let sections = auth_service::sections(&tracker).data.unwrap().sections;
    assert_eq!(sections, vec![AdminSection::OrderTracking]);

    let root = AuthAdmin {
        admin_id: Uuid::new_v4(),
        session_id: Uuid::new_v4(),
        role: AdminRole::SuperAdmin,
    };
    let sections = auth_service::sections(&root).data.unwrap().sections;
    assert_eq!(sections.len(), 5);
}

fn auth_admin_from_token(state: &AppState, token: &str) -> anyhow::Result<AuthAdmin> {
    let raw = token.trim_start_matches("Bearer ").trim();
    let decoded = decode::<Claims>(
        raw,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(AuthAdmin {
        admin_id: Uuid::parse_str(&decoded.claims.sub)?,
        session_id: Uuid::parse_str(&decoded.claims.sid)?,
        role: decoded.claims.role,
    })
}
