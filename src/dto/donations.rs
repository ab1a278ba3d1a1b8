use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Donation, DonationStatus};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDonationRequest {
    pub donor_name: String,
    pub donor_email: Option<String>,
    /// Amount in BDT.
    pub amount: i64,
    /// Payment channel the donor used, e.g. "bkash", "nagad", "bank".
    pub method: String,
    pub transaction_ref: String,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewDonationRequest {
    /// Must be VERIFIED or REJECTED.
    pub status: DonationStatus,
    pub note: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DonationList {
    pub items: Vec<Donation>,
}
