//! Configuration system for svcurls
//!
//! Holds the active profile, per-profile cluster settings and output
//! preferences, persisted as YAML.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, ProfileConfig};

use crate::service::OutputFormat;
use anyhow::Context;

/// Get a configuration value by key (dot notation)
///
/// Profile settings are addressed as `profiles.<name>.<field>`.
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    if let Some((profile, field)) = split_profile_key(key)? {
        let settings = config
            .profile(profile)
            .ok_or_else(|| anyhow::anyhow!("Profile '{}' is not defined", profile))?;
        return match field {
            "driver" => Ok(settings.driver.clone()),
            "context" => Ok(settings.context.clone().unwrap_or_default()),
            "nodeName" => Ok(settings.node_name.clone().unwrap_or_default()),
            "nodeIp" => Ok(settings.node_ip.clone().unwrap_or_default()),
            _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
        };
    }

    match key {
        "profile" => Ok(config.profile.clone()),
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "urlFormat" => Ok(config.url_format.clone()),
        "output" => Ok(config.output.to_string()),
        "suppressUrls" => serde_yaml::to_string(&config.suppress_urls)
            .map_err(|e| anyhow::anyhow!("Failed to serialize suppressUrls: {}", e)),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
///
/// Setting a field of an unknown profile creates that profile.
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    if let Some((profile, field)) = split_profile_key(key)? {
        let optional = || (!value.is_empty()).then(|| value.to_string());
        let settings = config.profiles.entry(profile.to_string()).or_default();
        match field {
            "driver" => settings.driver = value.to_string(),
            "context" => settings.context = optional(),
            "nodeName" => settings.node_name = optional(),
            "nodeIp" => settings.node_ip = optional(),
            _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
        }
        return Ok(());
    }

    match key {
        "profile" => {
            config.profile = value.to_string();
        }
        "defaultNamespace" => {
            config.default_namespace = value.to_string();
        }
        "urlFormat" => {
            crate::service::UrlTemplate::parse(value).context("urlFormat is not a valid format")?;
            config.url_format = value.to_string();
        }
        "output" => {
            config.output = value
                .parse::<OutputFormat>()
                .context("output must be 'table' or 'json'")?;
        }
        "suppressUrls" => {
            config.suppress_urls = serde_yaml::from_str(value).context(
                "suppressUrls must be a YAML list (e.g., '[{os: darwin, driver: docker}]')",
            )?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

/// Split `profiles.<name>.<field>` into name and field
fn split_profile_key(key: &str) -> anyhow::Result<Option<(&str, &str)>> {
    let Some(rest) = key.strip_prefix("profiles.") else {
        return Ok(None);
    };
    match rest.rsplit_once('.') {
        Some((name, field)) if !name.is_empty() && !field.is_empty() => Ok(Some((name, field))),
        _ => Err(anyhow::anyhow!(
            "Profile keys take the form profiles.<name>.<field>, got {}",
            key
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_top_level_keys() {
        let config = Config::default();
        assert_eq!(get_config_value(&config, "profile").unwrap(), "minikube");
        assert_eq!(get_config_value(&config, "output").unwrap(), "table");
        assert_eq!(
            get_config_value(&config, "urlFormat").unwrap(),
            "http://{{.IP}}:{{.Port}}"
        );
        assert!(get_config_value(&config, "nope").is_err());
    }

    #[test]
    fn test_get_profile_keys() {
        let config = Config::default();
        assert_eq!(
            get_config_value(&config, "profiles.minikube.driver").unwrap(),
            "docker"
        );
        assert_eq!(get_config_value(&config, "profiles.minikube.nodeIp").unwrap(), "");
        assert!(get_config_value(&config, "profiles.other.driver").is_err());
        assert!(get_config_value(&config, "profiles.minikube").is_err());
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();
        set_config_value(&mut config, "output", "JSON").unwrap();
        assert_eq!(config.output, OutputFormat::Json);

        set_config_value(&mut config, "defaultNamespace", "kube-system").unwrap();
        assert_eq!(config.default_namespace, "kube-system");

        assert!(set_config_value(&mut config, "output", "yaml").is_err());
        assert!(set_config_value(&mut config, "urlFormat", "{{.Nope}}").is_err());
        assert_eq!(config.url_format, "http://{{.IP}}:{{.Port}}");
    }

    #[test]
    fn test_set_profile_creates_and_clears() {
        let mut config = Config::default();
        set_config_value(&mut config, "profiles.dev.driver", "kvm2").unwrap();
        set_config_value(&mut config, "profiles.dev.nodeIp", "192.168.39.10").unwrap();
        let dev = config.profile("dev").unwrap();
        assert_eq!(dev.driver, "kvm2");
        assert_eq!(dev.node_ip.as_deref(), Some("192.168.39.10"));

        set_config_value(&mut config, "profiles.dev.nodeIp", "").unwrap();
        assert_eq!(config.profile("dev").unwrap().node_ip, None);
    }

    #[test]
    fn test_set_suppress_urls() {
        let mut config = Config::default();
        set_config_value(
            &mut config,
            "suppressUrls",
            "[{os: darwin, driver: docker}, {os: darwin, driver: podman}]",
        )
        .unwrap();
        assert_eq!(config.suppress_urls.len(), 2);
        assert_eq!(config.suppress_urls[1].driver, "podman");
    }
}
