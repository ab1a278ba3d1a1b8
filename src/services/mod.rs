pub mod auth_service;
pub mod donation_service;
pub mod order_service;
pub mod pet_service;
pub mod ticket_service;
