pub mod auth;
pub mod donations;
pub mod orders;
pub mod pets;
pub mod tickets;
