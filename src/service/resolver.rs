//! Service URL resolution
//!
//! Lists services in a namespace scope and builds one URL per node port,
//! addressed at the profile's node IP.

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Node, Service};
use kube::api::ListParams;
use kube::{Api, Client};

use super::model::{NamespaceScope, ServiceResolution};
use super::template::{UrlParams, UrlTemplate};

/// Resolves the services in a scope to their reachable URLs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceResolver: Send + Sync {
    async fn resolve(
        &self,
        scope: &NamespaceScope,
        template: &UrlTemplate,
    ) -> Result<Vec<ServiceResolution>>;
}

/// Resolver that queries the Kubernetes API
pub struct KubeServiceResolver {
    client: Client,
    node_name: String,
    node_ip: Option<String>,
}

impl KubeServiceResolver {
    /// `node_ip` skips the node lookup when the address is already known
    pub fn new(client: Client, node_name: impl Into<String>, node_ip: Option<String>) -> Self {
        Self {
            client,
            node_name: node_name.into(),
            node_ip,
        }
    }

    async fn node_ip(&self) -> Result<String> {
        if let Some(ip) = &self.node_ip {
            return Ok(ip.clone());
        }

        let nodes: Api<Node> = Api::all(self.client.clone());
        let node = nodes
            .get(&self.node_name)
            .await
            .with_context(|| format!("Failed to get node {}", self.node_name))?;

        internal_ip(&node)
            .ok_or_else(|| anyhow::anyhow!("Node {} has no InternalIP address", self.node_name))
    }
}

#[async_trait]
impl ServiceResolver for KubeServiceResolver {
    async fn resolve(
        &self,
        scope: &NamespaceScope,
        template: &UrlTemplate,
    ) -> Result<Vec<ServiceResolution>> {
        let ip = self.node_ip().await?;
        tracing::debug!("Resolving service URLs against node IP {}", ip);

        let api: Api<Service> = match scope.namespace() {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };
        let services = api
            .list(&ListParams::default())
            .await
            .context("Failed to list services")?;

        tracing::debug!("Found {} services", services.items.len());
        Ok(resolve_services(&services.items, &ip, template))
    }
}

/// First `InternalIP` address reported by a node
pub fn internal_ip(node: &Node) -> Option<String> {
    node.status
        .as_ref()?
        .addresses
        .as_ref()?
        .iter()
        .find(|addr| addr.type_ == "InternalIP")
        .map(|addr| addr.address.clone())
}

/// URLs for every port of `service` that has a node port, in port order
pub fn node_port_urls(service: &Service, ip: &str, template: &UrlTemplate) -> Vec<String> {
    let Some(ports) = service.spec.as_ref().and_then(|spec| spec.ports.as_ref()) else {
        return Vec::new();
    };

    ports
        .iter()
        .filter_map(|port| {
            let node_port = port.node_port.filter(|p| *p > 0)?;
            Some(template.render(&UrlParams {
                ip,
                port: node_port,
                name: port.name.as_deref().unwrap_or_default(),
            }))
        })
        .collect()
}

/// Build sorted resolutions, dropping services without a name
pub fn resolve_services(
    services: &[Service],
    ip: &str,
    template: &UrlTemplate,
) -> Vec<ServiceResolution> {
    let mut resolved: Vec<ServiceResolution> = services
        .iter()
        .filter_map(|service| {
            let name = service.metadata.name.as_deref().filter(|n| !n.is_empty());
            let Some(name) = name else {
                tracing::debug!("Skipping service without a name");
                return None;
            };
            let namespace = service.metadata.namespace.clone().unwrap_or_default();
            Some(ServiceResolution::new(
                namespace,
                name,
                node_port_urls(service, ip, template),
            ))
        })
        .collect();

    resolved.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{NodeAddress, NodeStatus, ServicePort, ServiceSpec};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn service(namespace: &str, name: &str, ports: Vec<(Option<&str>, Option<i32>)>) -> Service {
        Service {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            spec: Some(ServiceSpec {
                ports: Some(
                    ports
                        .into_iter()
                        .enumerate()
                        .map(|(i, (port_name, node_port))| ServicePort {
                            name: port_name.map(str::to_string),
                            port: 8000 + i as i32,
                            node_port,
                            ..Default::default()
                        })
                        .collect(),
                ),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_node_port_urls_skip_ports_without_node_port() {
        let svc = service(
            "default",
            "web",
            vec![
                (Some("http"), Some(30080)),
                (Some("metrics"), None),
                (Some("grpc"), Some(0)),
                (Some("https"), Some(30443)),
            ],
        );
        let urls = node_port_urls(&svc, "192.168.49.2", &UrlTemplate::default());
        assert_eq!(
            urls,
            vec!["http://192.168.49.2:30080", "http://192.168.49.2:30443"]
        );
    }

    #[test]
    fn test_node_port_urls_with_name_field() {
        let svc = service("default", "web", vec![(Some("http"), Some(30080)), (None, Some(30081))]);
        let template = UrlTemplate::parse("{{.Name}}={{.IP}}:{{.Port}}").unwrap();
        let urls = node_port_urls(&svc, "10.0.0.5", &template);
        assert_eq!(urls, vec!["http=10.0.0.5:30080", "=10.0.0.5:30081"]);
    }

    #[test]
    fn test_service_without_spec_has_no_urls() {
        let svc = Service {
            metadata: ObjectMeta {
                name: Some("headless".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(node_port_urls(&svc, "10.0.0.5", &UrlTemplate::default()).is_empty());
    }

    #[test]
    fn test_resolve_services_sorted_and_filtered() {
        let mut unnamed = service("default", "", vec![(None, Some(30001))]);
        unnamed.metadata.name = None;
        let services = vec![
            service("kube-system", "kube-dns", vec![(Some("dns"), None)]),
            service("default", "web", vec![(None, Some(30080))]),
            unnamed,
            service("default", "api", vec![]),
        ];

        let resolved = resolve_services(&services, "192.168.49.2", &UrlTemplate::default());
        let keys: Vec<(&str, &str)> = resolved
            .iter()
            .map(|r| (r.namespace.as_str(), r.name.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("default", "api"), ("default", "web"), ("kube-system", "kube-dns")]
        );
        assert!(resolved[0].urls.is_empty());
        assert_eq!(resolved[1].urls, vec!["http://192.168.49.2:30080"]);
        assert!(resolved[2].urls.is_empty());
    }

    #[test]
    fn test_internal_ip() {
        let node = Node {
            status: Some(NodeStatus {
                addresses: Some(vec![
                    NodeAddress {
                        type_: "Hostname".to_string(),
                        address: "minikube".to_string(),
                    },
                    NodeAddress {
                        type_: "InternalIP".to_string(),
                        address: "192.168.49.2".to_string(),
                    },
                ]),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(internal_ip(&node), Some("192.168.49.2".to_string()));
        assert_eq!(internal_ip(&Node::default()), None);
    }
}
