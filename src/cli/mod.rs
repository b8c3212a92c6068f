//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod config;
mod logging;
mod service;

pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use service::{
    ListOptions, ListRequest, ServiceSubcommand, build_options, handle_service_command,
    list_services, report_service_error,
};
