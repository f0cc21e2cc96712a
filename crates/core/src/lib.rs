//! Core business logic for Planwise.
//!
//! This crate contains pure business logic with ZERO file, network or logging
//! dependencies. All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `budget` - Income allocation across spending categories, spending
//!   profiles, fixed-expense floors and report rendering

pub mod budget;
