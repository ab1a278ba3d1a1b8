use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::SupportTicket;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveTicketRequest {
    pub reply: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketList {
    pub items: Vec<SupportTicket>,
}
