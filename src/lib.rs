//! Payroll engine for hourly shift work.
//!
//! This crate computes paid time and pay for shifts under a wage history
//! that can be revised retroactively. It covers night-window minutes
//! (22:00 to 05:00) paid at a 25% premium, pay periods that close on the
//! 25th, and year-to-date earnings against a fixed annual income threshold.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
