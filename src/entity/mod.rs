pub mod admin_sessions;
pub mod admins;
pub mod audit_logs;
pub mod donations;
pub mod lost_reports;
pub mod order_items;
pub mod orders;
pub mod otp_tokens;
pub mod pets;
pub mod support_tickets;

pub use admin_sessions::Entity as AdminSessions;
pub use admins::Entity as Admins;
pub use audit_logs::Entity as AuditLogs;
pub use donations::Entity as Donations;
pub use lost_reports::Entity as LostReports;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use otp_tokens::Entity as OtpTokens;
pub use pets::Entity as Pets;
pub use support_tickets::Entity as SupportTickets;
