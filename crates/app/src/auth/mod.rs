//! Authentication

mod credentials;
mod errors;
mod models;
mod service;

pub use credentials::*;
pub use errors::*;
pub use models::*;
pub use service::*;
