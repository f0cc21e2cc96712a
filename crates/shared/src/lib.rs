//! Shared types, errors, and configuration for Planwise.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes
//! - Typed IDs for categories and fixed expenses
//! - Thousands-separator formatting for display
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use config::{AllocatorConfig, AppConfig, ReportConfig, ReportFormat};
pub use error::{AppError, AppResult};
pub use format::format_thousands;
