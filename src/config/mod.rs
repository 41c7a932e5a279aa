//! Configuration loading for the payroll service.
//!
//! Only the service shell is configurable: listener address, default log
//! filter and the payslip issuer name.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Payslips issued by: {}", config.issuer());
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{LoggingConfig, PayrollConfig, PayslipConfig, ServerConfig};
