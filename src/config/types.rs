//! Configuration types for the payroll service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `payroll.yaml`. Payroll rules themselves (closing
//! day, night window, premium, threshold) are fixed in code and do not
//! appear here.

use serde::Deserialize;

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind, e.g. `"0.0.0.0"`.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub filter: String,
}

/// Payslip settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PayslipConfig {
    /// Name printed as the issuer on every payslip.
    pub issuer: String,
}

/// The complete service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Payslip settings.
    pub payslip: PayslipConfig,
}
