//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::service::{
    DEFAULT_URL_TEMPLATE, DRIVER_DOCKER, OutputFormat, PlatformRule, SuppressionRules,
    default_rules,
};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Namespace listed when `-n` is not given (empty lists all namespaces)
    #[serde(default)]
    pub default_namespace: String,

    /// Node port URL format
    #[serde(default = "default_url_format")]
    pub url_format: String,

    /// Output format for `service list`
    #[serde(default)]
    pub output: OutputFormat,

    /// Known cluster profiles by name
    #[serde(default = "default_profiles")]
    pub profiles: BTreeMap<String, ProfileConfig>,

    /// OS / driver pairs whose node port URLs are hidden
    #[serde(default = "default_rules")]
    pub suppress_urls: Vec<PlatformRule>,
}

/// Settings for one cluster profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileConfig {
    /// Driver backing the cluster node (e.g. docker, kvm2, hyperkit)
    #[serde(default)]
    pub driver: String,

    /// Kubeconfig context (defaults to the profile name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Control plane node name (defaults to the profile name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,

    /// Node address used in URLs instead of the node's InternalIP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_ip: Option<String>,
}

impl ProfileConfig {
    pub fn context_name<'a>(&'a self, profile: &'a str) -> &'a str {
        self.context.as_deref().unwrap_or(profile)
    }

    /// Machine name of the primary control plane
    pub fn machine_name<'a>(&'a self, profile: &'a str) -> &'a str {
        self.node_name.as_deref().unwrap_or(profile)
    }
}

impl Config {
    pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles.get(name)
    }

    pub fn suppression_rules(&self) -> SuppressionRules {
        SuppressionRules::new(self.suppress_urls.clone())
    }
}

// Default value functions
fn default_profile() -> String {
    "minikube".to_string()
}

fn default_url_format() -> String {
    DEFAULT_URL_TEMPLATE.to_string()
}

fn default_profiles() -> BTreeMap<String, ProfileConfig> {
    let mut profiles = BTreeMap::new();
    profiles.insert(
        default_profile(),
        ProfileConfig {
            driver: DRIVER_DOCKER.to_string(),
            ..Default::default()
        },
    );
    profiles
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            default_namespace: String::new(),
            url_format: default_url_format(),
            output: OutputFormat::default(),
            profiles: default_profiles(),
            suppress_urls: default_rules(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.profile, "minikube");
        assert_eq!(config.default_namespace, "");
        assert_eq!(config.url_format, "http://{{.IP}}:{{.Port}}");
        assert_eq!(config.output, OutputFormat::Table);
        assert_eq!(config.profile("minikube").unwrap().driver, "docker");
        assert_eq!(config.suppress_urls, vec![PlatformRule::new("darwin", "docker")]);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("defaultNamespace"));
        assert!(yaml.contains("urlFormat"));
        assert!(yaml.contains("suppressUrls"));
        assert!(!yaml.contains("nodeIp"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
profile: dev
output: json
profiles:
  dev:
    driver: kvm2
    nodeIp: 192.168.39.10
suppressUrls:
  - os: darwin
    driver: docker
  - os: windows
    driver: docker
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.profile, "dev");
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.url_format, DEFAULT_URL_TEMPLATE);
        let dev = config.profile("dev").unwrap();
        assert_eq!(dev.driver, "kvm2");
        assert_eq!(dev.node_ip.as_deref(), Some("192.168.39.10"));
        assert!(config.profile("minikube").is_none());
        assert_eq!(config.suppress_urls.len(), 2);
    }

    #[test]
    fn test_profile_name_fallbacks() {
        let profile = ProfileConfig::default();
        assert_eq!(profile.context_name("minikube"), "minikube");
        assert_eq!(profile.machine_name("minikube"), "minikube");

        let profile = ProfileConfig {
            context: Some("kind-dev".to_string()),
            node_name: Some("dev-control-plane".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.context_name("dev"), "kind-dev");
        assert_eq!(profile.machine_name("dev"), "dev-control-plane");
    }
}
