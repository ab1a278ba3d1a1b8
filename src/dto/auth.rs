use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{AdminRole, AdminSection};

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// First login step succeeded; the emailed 6-digit code must now be verified
/// together with this opaque token.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub otp_token: Uuid,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct VerifyOtpRequest {
    pub otp_token: Uuid,
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyOtpResponse {
    pub token: String,
    pub role: AdminRole,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ResendOtpRequest {
    pub otp_token: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionList {
    pub sections: Vec<AdminSection>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub sid: String,
    pub role: AdminRole,
    pub exp: usize,
}
