//! svcurls library
//!
//! Lists the node port URLs of services running in a locally managed
//! cluster. The binary wraps this library; tests use it directly.

pub mod cli;
pub mod config;
pub mod error;
pub mod kube;
pub mod service;

// Re-export commonly used types for convenience
pub use error::ServiceListError;
pub use service::{
    DisplayRow, NO_NODE_PORT, NamespaceScope, OutputFormat, PlatformContext, PlatformRule,
    ServiceResolution, SuppressionRules, UrlSuppression, UrlTemplate, present, render_json,
    render_table,
};
