//! Kubernetes client module
//!
//! Builds clients for the kubeconfig context that belongs to a profile.
//!
//! Local clusters usually listen on a private or loopback address. When the
//! user has `HTTP_PROXY`/`HTTPS_PROXY` set, those addresses are appended to
//! `NO_PROXY` so API requests are not sent through a corporate proxy.

mod host;

pub use host::{HostStatus, KubeHostStatus, node_is_ready};
#[cfg(test)]
pub use host::MockHostStatus;

use anyhow::{Context, Result};
use kube::config::KubeConfigOptions;
use kube::{Client, Config};
use std::net::IpAddr;
use url::Url;

/// Create a client for a named kubeconfig context
pub async fn create_client_for_context(context: &str) -> Result<Client> {
    let options = KubeConfigOptions {
        context: Some(context.to_string()),
        ..Default::default()
    };
    let config = Config::from_kubeconfig(&options)
        .await
        .with_context(|| format!("Failed to load kubeconfig context '{}'", context))?;

    if let Ok(url) = Url::parse(&config.cluster_url.to_string()) {
        if let Some(host) = url.host_str() {
            ensure_no_proxy_bypass(host);
        }
    }

    tracing::debug!("Using API server {} for context {}", config.cluster_url, context);
    Client::try_from(config).context("Failed to create Kubernetes client")
}

/// Append a local cluster host to NO_PROXY unless it is already covered
fn ensure_no_proxy_bypass(host: &str) {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if !is_local_host(host) {
        return;
    }

    let current = std::env::var("NO_PROXY")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var("no_proxy").ok())
        .unwrap_or_default();

    if no_proxy_contains(&current, host) {
        return;
    }

    let updated = if current.is_empty() {
        host.to_string()
    } else {
        format!("{},{}", current, host)
    };
    tracing::debug!("Adding {} to NO_PROXY", host);

    // SAFETY: runs once per command before any request is issued, and no
    // other task reads the environment concurrently.
    unsafe {
        std::env::set_var("NO_PROXY", &updated);
        std::env::set_var("no_proxy", &updated);
    }
}

/// Whether a host is a loopback, private or local-only address
fn is_local_host(host: &str) -> bool {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return match ip {
            IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
            // fc00::/7 unique local addresses
            IpAddr::V6(v6) => v6.is_loopback() || (v6.segments()[0] & 0xfe00) == 0xfc00,
        };
    }

    host == "localhost"
        || host.ends_with(".localhost")
        || host.ends_with(".local")
        || host.ends_with(".internal")
}

/// Check NO_PROXY entries for a match on `host`
///
/// Entries match exactly, as a domain suffix (`example.com` and
/// `.example.com` both cover `api.example.com`), or `*` for everything.
fn no_proxy_contains(no_proxy: &str, host: &str) -> bool {
    no_proxy
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .any(|entry| {
            if entry == "*" {
                return true;
            }
            let domain = entry.trim_start_matches("*.").trim_start_matches('.');
            host == domain || host.ends_with(&format!(".{}", domain))
        })
}
