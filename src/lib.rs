//! Monthly Shift Roster
//!
//! This library provides the roster domain model, a greedy coverage filler,
//! constraint analysis and an axum REST API for generating monthly rosters.
//!
//! Generation is a single deterministic pass: the same problem and seed always
//! produce the same grid.

pub mod api;
pub mod config;
#[cfg(feature = "console")]
pub mod console;
pub mod constraints;
pub mod demo_data;
pub mod domain;
pub mod dto;
pub mod error;
pub mod generator;
pub mod import;
pub mod summary;
