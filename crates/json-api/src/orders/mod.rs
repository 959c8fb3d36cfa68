//! Orders

mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;
