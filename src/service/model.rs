//! Service list data model
//!
//! `ServiceResolution` is what the resolver produces for each service,
//! `DisplayRow` is what the renderer consumes.

use serde::Serialize;

/// Namespace value that selects every namespace in the cluster
pub const NAMESPACE_ALL: &str = "";

/// Which namespaces to list services from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceScope {
    All,
    Named(String),
}

impl NamespaceScope {
    /// Build a scope from a namespace flag value
    ///
    /// Only the empty string selects every namespace; `all` is an
    /// ordinary namespace name.
    pub fn from_flag(value: &str) -> Self {
        let value = value.trim();
        if value == NAMESPACE_ALL {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }

    /// Namespace name, or `None` for all namespaces
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Named(ns) => Some(ns),
        }
    }
}

/// Resolved endpoints for one cluster service
///
/// `urls` is empty exactly when the service has no node port assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResolution {
    pub namespace: String,
    pub name: String,
    pub urls: Vec<String>,
}

impl ServiceResolution {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, urls: Vec<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            urls,
        }
    }

    pub fn has_node_port(&self) -> bool {
        !self.urls.is_empty()
    }
}

/// One row of the service list output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub namespace: String,
    pub name: String,
    /// Shown in the TARGET PORT column
    #[serde(rename = "targetPort")]
    pub port_status: String,
    /// Newline separated URLs, shown in the URL column
    #[serde(rename = "url")]
    pub urls: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_from_flag() {
        assert_eq!(NamespaceScope::from_flag(""), NamespaceScope::All);
        assert_eq!(
            NamespaceScope::from_flag("all"),
            NamespaceScope::Named("all".to_string())
        );
        assert_eq!(
            NamespaceScope::from_flag("kube-system"),
            NamespaceScope::Named("kube-system".to_string())
        );
        assert_eq!(NamespaceScope::from_flag(" default ").namespace(), Some("default"));
        assert_eq!(NamespaceScope::All.namespace(), None);
    }

    #[test]
    fn test_has_node_port() {
        assert!(!ServiceResolution::new("default", "kubernetes", vec![]).has_node_port());
        assert!(
            ServiceResolution::new("default", "web", vec!["http://10.0.0.2:30080".into()])
                .has_node_port()
        );
    }
}
