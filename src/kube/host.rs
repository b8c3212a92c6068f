//! Cluster host status
//!
//! A profile's machine is considered running when its node is registered
//! with the API server and reports `Ready`.

use anyhow::Result;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Node;
use kube::{Api, Client};

/// Reports whether the machine backing a profile is up
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostStatus: Send + Sync {
    async fn is_host_running(&self, machine: &str) -> Result<bool>;
}

/// Host status backed by the cluster's Node objects
pub struct KubeHostStatus {
    client: Client,
}

impl KubeHostStatus {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HostStatus for KubeHostStatus {
    async fn is_host_running(&self, machine: &str) -> Result<bool> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        match nodes.get_opt(machine).await {
            Ok(Some(node)) => {
                let ready = node_is_ready(&node);
                tracing::debug!("Node {} ready: {}", machine, ready);
                Ok(ready)
            }
            Ok(None) => {
                tracing::debug!("Node {} not found", machine);
                Ok(false)
            }
            Err(e) => {
                // An unreachable API server means the host is down
                tracing::warn!("Failed to query node {}: {}", machine, e);
                Ok(false)
            }
        }
    }
}

/// Whether a node's `Ready` condition is `True`
pub fn node_is_ready(node: &Node) -> bool {
    node.status
        .as_ref()
        .and_then(|status| status.conditions.as_ref())
        .map(|conditions| {
            conditions
                .iter()
                .any(|c| c.type_ == "Ready" && c.status == "True")
        })
        .unwrap_or(false)
}
