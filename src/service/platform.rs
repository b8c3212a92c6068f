//! Host platform detection and URL suppression rules
//!
//! Some host OS / cluster driver combinations publish node ports on an
//! address the host cannot reach. Rows for those platforms keep their port
//! status but have the URL text blanked.

use serde::{Deserialize, Serialize};

/// Operating system name used for macOS hosts
pub const OS_DARWIN: &str = "darwin";

/// Container-based driver name
pub const DRIVER_DOCKER: &str = "docker";

/// Host operating system and the driver backing the cluster node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformContext {
    pub operating_system: String,
    pub cluster_driver: String,
}

impl PlatformContext {
    pub fn new(operating_system: impl Into<String>, cluster_driver: impl Into<String>) -> Self {
        Self {
            operating_system: operating_system.into(),
            cluster_driver: cluster_driver.into(),
        }
    }

    /// Platform of the running process combined with the profile's driver
    pub fn current(cluster_driver: &str) -> Self {
        Self::new(host_os_name(std::env::consts::OS), cluster_driver)
    }
}

/// Map Rust's OS names onto the names drivers and profiles use
fn host_os_name(os: &str) -> &str {
    match os {
        "macos" => OS_DARWIN,
        other => other,
    }
}

/// Decides whether URLs should be hidden on a platform
pub trait UrlSuppression {
    fn should_suppress_urls(&self, platform: &PlatformContext) -> bool;
}

impl<F> UrlSuppression for F
where
    F: Fn(&PlatformContext) -> bool,
{
    fn should_suppress_urls(&self, platform: &PlatformContext) -> bool {
        self(platform)
    }
}

/// An OS / driver pair whose node port URLs are not reachable from the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRule {
    pub os: String,
    pub driver: String,
}

impl PlatformRule {
    pub fn new(os: impl Into<String>, driver: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            driver: driver.into(),
        }
    }

    pub fn matches(&self, platform: &PlatformContext) -> bool {
        self.os == platform.operating_system && self.driver == platform.cluster_driver
    }
}

/// Suppress URLs when any rule matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionRules {
    rules: Vec<PlatformRule>,
}

impl SuppressionRules {
    pub fn new(rules: Vec<PlatformRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PlatformRule] {
        &self.rules
    }
}

impl Default for SuppressionRules {
    /// Docker on macOS runs the node inside a VM, so node IPs are unreachable
    fn default() -> Self {
        Self::new(default_rules())
    }
}

/// Built-in suppression rules
pub fn default_rules() -> Vec<PlatformRule> {
    vec![PlatformRule::new(OS_DARWIN, DRIVER_DOCKER)]
}

impl UrlSuppression for SuppressionRules {
    fn should_suppress_urls(&self, platform: &PlatformContext) -> bool {
        self.rules.iter().any(|rule| rule.matches(platform))
    }
}
