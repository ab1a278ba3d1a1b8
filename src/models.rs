use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Fulfillment status of an order. The wire strings are a fixed contract;
/// other systems match them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    UnderReview,
    Paid,
    OrderPlaced,
    PaymentUnderReview,
    PaymentVerified,
    OrderPacked,
    Shipped,
    InTransit,
    OutForDelivery,
    Delivered,
    Failed,
    Cancelled,
    Expired,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 14] = [
        OrderStatus::Pending,
        OrderStatus::UnderReview,
        OrderStatus::Paid,
        OrderStatus::OrderPlaced,
        OrderStatus::PaymentUnderReview,
        OrderStatus::PaymentVerified,
        OrderStatus::OrderPacked,
        OrderStatus::Shipped,
        OrderStatus::InTransit,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Failed,
        OrderStatus::Cancelled,
        OrderStatus::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::UnderReview => "UNDER_REVIEW",
            OrderStatus::Paid => "PAID",
            OrderStatus::OrderPlaced => "ORDER_PLACED",
            OrderStatus::PaymentUnderReview => "PAYMENT_UNDER_REVIEW",
            OrderStatus::PaymentVerified => "PAYMENT_VERIFIED",
            OrderStatus::OrderPacked => "ORDER_PACKED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::InTransit => "IN_TRANSIT",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Failed => "FAILED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Expired => "EXPIRED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == value)
    }

    /// Position in the progress stepper shown on the tracking page.
    /// Only the primary fulfillment milestones count; everything else,
    /// including terminal failure states, reports step 0.
    pub fn progress_step(&self) -> u8 {
        match self {
            OrderStatus::OrderPlaced => 1,
            OrderStatus::PaymentUnderReview => 2,
            OrderStatus::PaymentVerified => 3,
            OrderStatus::Shipped => 4,
            OrderStatus::Delivered => 5,
            _ => 0,
        }
    }
}

/// Admin console role. `SuperAdmin` sees every section; the rest map to a
/// single section each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    SuperAdmin,
    OrderTracker,
    LostPet,
    Adoption,
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminSection {
    OrderTracking,
    LostPets,
    Adoption,
    Health,
    Donations,
}

impl AdminRole {
    pub const ALL_SECTIONS: [AdminSection; 5] = [
        AdminSection::OrderTracking,
        AdminSection::LostPets,
        AdminSection::Adoption,
        AdminSection::Health,
        AdminSection::Donations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "SUPER_ADMIN",
            AdminRole::OrderTracker => "ORDER_TRACKER",
            AdminRole::LostPet => "LOST_PET",
            AdminRole::Adoption => "ADOPTION",
            AdminRole::Health => "HEALTH",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SUPER_ADMIN" => Some(AdminRole::SuperAdmin),
            "ORDER_TRACKER" => Some(AdminRole::OrderTracker),
            "LOST_PET" => Some(AdminRole::LostPet),
            "ADOPTION" => Some(AdminRole::Adoption),
            "HEALTH" => Some(AdminRole::Health),
            _ => None,
        }
    }

    pub fn sections(&self) -> &'static [AdminSection] {
        match self {
            AdminRole::SuperAdmin => &Self::ALL_SECTIONS,
            AdminRole::OrderTracker => &[AdminSection::OrderTracking],
            AdminRole::LostPet => &[AdminSection::LostPets],
            AdminRole::Adoption => &[AdminSection::Adoption],
            AdminRole::Health => &[AdminSection::Health],
        }
    }

    pub fn can_access(&self, section: AdminSection) -> bool {
        self.sections().contains(&section)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationStatus {
    Pending,
    Verified,
    Rejected,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "PENDING",
            DonationStatus::Verified => "VERIFIED",
            DonationStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(DonationStatus::Pending),
            "VERIFIED" => Some(DonationStatus::Verified),
            "REJECTED" => Some(DonationStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "OPEN",
            TicketStatus::Resolved => "RESOLVED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "OPEN" => Some(TicketStatus::Open),
            "RESOLVED" => Some(TicketStatus::Resolved),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_no: String,
    pub status: OrderStatus,
    /// Step reached on the tracking page stepper, derived from `status`.
    pub progress_step: u8,
    pub subtotal: i64,
    pub shipping_fee: i64,
    pub total: i64,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub address: String,
    pub city: String,
    pub pet_id: Option<Uuid>,
    pub qr_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub sku: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Pet {
    pub id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub age_months: Option<i32>,
    pub photo_url: Option<String>,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub tag_code: String,
    pub qr_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LostReport {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub last_seen_address: String,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub details: Option<String>,
    pub contact_phone: String,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Donation {
    pub id: Uuid,
    pub donor_name: String,
    pub donor_email: Option<String>,
    /// Amount in BDT.
    pub amount: i64,
    pub method: String,
    pub transaction_ref: String,
    pub message: Option<String>,
    pub status: DonationStatus,
    pub review_note: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SupportTicket {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: TicketStatus,
    pub reply: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_wire_strings_are_exact() {
        let expected = [
            "PENDING",
            "UNDER_REVIEW",
            "PAID",
            "ORDER_PLACED",
            "PAYMENT_UNDER_REVIEW",
            "PAYMENT_VERIFIED",
            "ORDER_PACKED",
            "SHIPPED",
            "IN_TRANSIT",
            "OUT_FOR_DELIVERY",
            "DELIVERED",
            "FAILED",
            "CANCELLED",
            "EXPIRED",
        ];
        for (status, wire) in OrderStatus::ALL.iter().zip(expected) {
            assert_eq!(status.as_str(), wire);
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{wire}\""));
            assert_eq!(OrderStatus::parse(wire), Some(*status));
        }
        assert_eq!(OrderStatus::parse("SHIPPING"), None);
    }

    #[test]
    fn progress_steps_follow_primary_sequence() {
        assert_eq!(OrderStatus::OrderPlaced.progress_step(), 1);
        assert_eq!(OrderStatus::PaymentUnderReview.progress_step(), 2);
        assert_eq!(OrderStatus::PaymentVerified.progress_step(), 3);
        assert_eq!(OrderStatus::Shipped.progress_step(), 4);
        assert_eq!(OrderStatus::Delivered.progress_step(), 5);
        // Everything else, failure states included, stays at step 0.
        assert_eq!(OrderStatus::Pending.progress_step(), 0);
        assert_eq!(OrderStatus::InTransit.progress_step(), 0);
        assert_eq!(OrderStatus::Cancelled.progress_step(), 0);
        assert_eq!(OrderStatus::Expired.progress_step(), 0);
    }

    #[test]
    fn order_tracker_sees_only_order_tracking() {
        let sections = AdminRole::OrderTracker.sections();
        assert_eq!(sections, &[AdminSection::OrderTracking]);
        assert!(AdminRole::OrderTracker.can_access(AdminSection::OrderTracking));
        assert!(!AdminRole::OrderTracker.can_access(AdminSection::LostPets));
        assert!(!AdminRole::OrderTracker.can_access(AdminSection::Donations));
    }

    #[test]
    fn super_admin_sees_all_five_sections() {
        let sections = AdminRole::SuperAdmin.sections();
        assert_eq!(sections.len(), 5);
        for section in AdminRole::ALL_SECTIONS {
            assert!(AdminRole::SuperAdmin.can_access(section));
        }
    }

    #[test]
    fn admin_role_wire_strings_are_exact() {
        let pairs = [
            (AdminRole::SuperAdmin, "SUPER_ADMIN"),
            (AdminRole::OrderTracker, "ORDER_TRACKER"),
            (AdminRole::LostPet, "LOST_PET"),
            (AdminRole::Adoption, "ADOPTION"),
            (AdminRole::Health, "HEALTH"),
        ];
        for (role, wire) in pairs {
            assert_eq!(role.as_str(), wire);
            assert_eq!(AdminRole::parse(wire), Some(role));
            assert_eq!(serde_json::to_string(&role).unwrap(), format!("\"{wire}\""));
        }
    }

    #[test]
    fn donation_status_wire_strings_are_exact() {
        for (status, wire) in [
            (DonationStatus::Pending, "PENDING"),
            (DonationStatus::Verified, "VERIFIED"),
            (DonationStatus::Rejected, "REJECTED"),
        ] {
            assert_eq!(status.as_str(), wire);
            assert_eq!(DonationStatus::parse(wire), Some(status));
        }
    }
}
