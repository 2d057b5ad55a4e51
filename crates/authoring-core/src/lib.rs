//! # authoring-core
//!
//! Core crate for the authoring module host. Contains configuration schemas,
//! the content and plugin-registry domain types shared by modules, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
