pub mod error;
pub mod payment_service;
