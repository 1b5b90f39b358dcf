//! Port traits implemented by adapters.

pub mod config_port;
pub mod metrics_port;
pub mod report_port;
