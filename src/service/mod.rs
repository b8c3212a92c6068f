//! Service listing
//!
//! Resolution turns cluster services into `ServiceResolution`s, the
//! presenter classifies them into `DisplayRow`s, and the renderer formats
//! the rows for output.

mod model;
mod platform;
mod presenter;
mod render;
mod resolver;
mod template;

pub use model::{DisplayRow, NAMESPACE_ALL, NamespaceScope, ServiceResolution};
pub use platform::{
    DRIVER_DOCKER, OS_DARWIN, PlatformContext, PlatformRule, SuppressionRules, UrlSuppression,
    default_rules,
};
pub use presenter::{NO_NODE_PORT, present};
pub use render::{HEADERS, OutputFormat, render, render_json, render_table};
#[cfg(test)]
pub use resolver::MockServiceResolver;
pub use resolver::{
    KubeServiceResolver, ServiceResolver, internal_ip, node_port_urls, resolve_services,
};
pub use template::{DEFAULT_URL_TEMPLATE, UrlParams, UrlTemplate, UrlTemplateError};
