//! Checkout

pub mod errors;
pub mod form;
pub mod notifier;
pub mod pipeline;
pub mod service;
pub mod validation;

pub use errors::{CheckoutError, NotificationError};
pub use service::*;
