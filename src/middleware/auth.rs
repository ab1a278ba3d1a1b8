use axum::{
    extract::{FromRef, FromRequestParts},
    http::header,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::{
    dto::auth::Claims,
    entity::AdminSessions,
    error::AppError,
    models::{AdminRole, AdminSection},
    state::AppState,
};

#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub admin_id: Uuid,
    pub session_id: Uuid,
    pub role: AdminRole,
}

pub fn ensure_section(admin: &AuthAdmin, section: AdminSection) -> Result<(), AppError> {
    if !admin.role.can_access(section) {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_super_admin(admin: &AuthAdmin) -> Result<(), AppError> {
    if admin.role != AdminRole::SuperAdmin {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

impl<S> FromRequestParts<S> for AuthAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::BadRequest("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::BadRequest("Invalid Authorization scheme".into()));
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::AuthenticationFailed)?;

        let admin_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AppError::AuthenticationFailed)?;
        let session_id = Uuid::parse_str(&decoded.claims.sid)
            .map_err(|_| AppError::AuthenticationFailed)?;

        // The token stays valid only while its backing session row is live;
        // logout revokes the row.
        let session = AdminSessions::find_by_id(session_id)
            .one(&state.orm)
            .await?
            .ok_or(AppError::AuthenticationFailed)?;
        if session.revoked_at.is_some() || session.admin_id != admin_id {
            return Err(AppError::AuthenticationFailed);
        }

        Ok(AuthAdmin {
            admin_id,
            session_id,
            role: decoded.claims.role,
        })
    }
}
