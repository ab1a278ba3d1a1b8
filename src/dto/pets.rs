use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{LostReport, Pet};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterPetRequest {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub age_months: Option<i32>,
    pub photo_url: Option<String>,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportLostRequest {
    pub last_seen_address: String,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub details: Option<String>,
    pub contact_phone: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PetList {
    pub items: Vec<Pet>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LostReportList {
    pub items: Vec<LostReport>,
}
