//! Shared storefront domain, persistence and identity modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod storage;

#[cfg(test)]
mod test;
