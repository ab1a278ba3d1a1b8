use argon2::Argon2;
use password_hash::{PasswordHash, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::auth::{
        Claims, LoginRequest, LoginResponse, ResendOtpRequest, SectionList, VerifyOtpRequest,
        VerifyOtpResponse,
    },
    entity::{
        AdminSessions, Admins, OtpTokens,
        admin_sessions::ActiveModel as SessionActive,
        admins::{Column as AdminCol, Model as AdminModel},
        otp_tokens::ActiveModel as OtpActive,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthAdmin,
    models::AdminRole,
    response::{ApiResponse, Meta},
    state::AppState,
};

const OTP_TTL_MINUTES: i64 = 5;
const ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Step one of admin login: password check, then a 6-digit code goes out by
/// email and the caller gets the opaque token to present with that code.
pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;

    let admin = Admins::find()
        .filter(AdminCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::AuthenticationFailed)?;

    let parsed_hash = PasswordHash::new(&admin.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::AuthenticationFailed);
    }

    let otp_token = Uuid::new_v4();
    let code = generate_otp_code();

    OtpActive {
        id: Set(otp_token),
        admin_id: Set(admin.id),
        code: Set(code.clone()),
        expires_at: Set((Utc::now() + Duration::minutes(OTP_TTL_MINUTES)).into()),
        consumed_at: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    state.mailer.send_otp_code(&admin.email, &code).await?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(admin.id),
        "admin_login",
        Some("admins"),
        Some(serde_json::json!({ "admin_id": admin.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Verification code sent",
        LoginResponse { otp_token },
        Some(Meta::empty()),
    ))
}

/// Step two: exchange the opaque token plus the emailed code for an access
/// token. The code row is consumed on first success, so a replay of the same
/// pair fails.
pub async fn verify_otp(
    state: &AppState,
    payload: VerifyOtpRequest,
) -> AppResult<ApiResponse<VerifyOtpResponse>> {
    let code = normalize_otp_code(&payload.code).ok_or(AppError::AuthenticationFailed)?;

    let otp = OtpTokens::find_by_id(payload.otp_token)
        .one(&state.orm)
        .await?
        .ok_or(AppError::AuthenticationFailed)?;

    if otp.consumed_at.is_some()
        || otp.expires_at.with_timezone(&Utc) < Utc::now()
        || otp.code != code
    {
        return Err(AppError::AuthenticationFailed);
    }

    let admin = Admins::find_by_id(otp.admin_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::AuthenticationFailed)?;
    let role = admin_role(&admin)?;

    let mut active: OtpActive = otp.into();
    active.consumed_at = Set(Some(Utc::now().into()));
    active.update(&state.orm).await?;

    let session_id = Uuid::new_v4();
    SessionActive {
        id: Set(session_id),
        admin_id: Set(admin.id),
        created_at: NotSet,
        revoked_at: Set(None),
    }
    .insert(&state.orm)
    .await?;

    let token = issue_access_token(state, &admin, session_id, role)?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(admin.id),
        "admin_otp_verified",
        Some("admins"),
        Some(serde_json::json!({ "admin_id": admin.id, "session_id": session_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Logged in",
        VerifyOtpResponse { token, role },
        Some(Meta::empty()),
    ))
}

/// Reissue a fresh code and expiry under the same opaque token.
pub async fn resend_otp(
    state: &AppState,
    payload: ResendOtpRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let otp = OtpTokens::find_by_id(payload.otp_token)
        .one(&state.orm)
        .await?
        .ok_or(AppError::AuthenticationFailed)?;

    if otp.consumed_at.is_some() {
        return Err(AppError::AuthenticationFailed);
    }

    let admin = Admins::find_by_id(otp.admin_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::AuthenticationFailed)?;

    let code = generate_otp_code();
    let otp_token = otp.id;

    let mut active: OtpActive = otp.into();
    active.code = Set(code.clone());
    active.expires_at = Set((Utc::now() + Duration::minutes(OTP_TTL_MINUTES)).into());
    active.update(&state.orm).await?;

    state.mailer.send_otp_code(&admin.email, &code).await?;

    Ok(ApiResponse::success(
        "Verification code resent",
        LoginResponse { otp_token },
        Some(Meta::empty()),
    ))
}

/// Revoke the session backing the presented access token.
pub async fn logout(state: &AppState, admin: &AuthAdmin) -> AppResult<ApiResponse<()>> {
    let session = AdminSessions::find_by_id(admin.session_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::AuthenticationFailed)?;

    let mut active: SessionActive = session.into();
    active.revoked_at = Set(Some(Utc::now().into()));
    active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(admin.admin_id),
        "admin_logout",
        Some("admins"),
        Some(serde_json::json!({ "session_id": admin.session_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("Logged out", (), Some(Meta::empty())))
}

/// Sections the session's role may see; the admin console builds its
/// navigation from this list.
pub fn sections(admin: &AuthAdmin) -> ApiResponse<SectionList> {
    ApiResponse::success(
        "Ok",
        SectionList {
            sections: admin.role.sections().to_vec(),
        },
        Some(Meta::empty()),
    )
}

fn admin_role(admin: &AdminModel) -> AppResult<AdminRole> {
    AdminRole::parse(&admin.role)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Unknown admin role {}", admin.role)))
}

fn issue_access_token(
    state: &AppState,
    admin: &AdminModel,
    session_id: Uuid,
    role: AdminRole,
) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ACCESS_TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: admin.id.to_string(),
        sid: session_id.to_string(),
        role,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    Ok(format!("Bearer {token}"))
}

fn generate_otp_code() -> String {
    use rand::Rng;
    let code: u32 = rand::rng().random_range(100_000..1_000_000);
    code.to_string()
}

/// Strip anything that is not an ASCII digit; the result only counts as a
/// code when exactly 6 digits remain.
pub fn normalize_otp_code(input: &str) -> Option<String> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 6 { Some(digits) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_otp_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn normalize_strips_non_digits() {
        assert_eq!(normalize_otp_code("123456").as_deref(), Some("123456"));
        assert_eq!(normalize_otp_code(" 12 34 56 ").as_deref(), Some("123456"));
        // "12a456" strips to 5 digits and is never treated as complete.
        assert_eq!(normalize_otp_code("12a456"), None);
        assert_eq!(normalize_otp_code("1234567"), None);
        assert_eq!(normalize_otp_code(""), None);
    }
}
