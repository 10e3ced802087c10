//! Trait seams for external collaborators.

pub mod payment_gateway;

pub use payment_gateway::{LoggingPaymentGateway, PaymentGateway};
