use std::path::PathBuf;
use std::time::Duration;

use crate::admin::DockerAdminClient;
use crate::errors::Result;
use crate::pruner::FsPruner;

/// Parameters locating the registry container and its storage.
#[derive(Clone, Debug)]
pub struct DockerBackendConfig {
    /// Name of the running registry container targeted by `docker exec`.
    pub container_name: String,
    /// Base URL of the registry's read-only HTTP API.
    pub registry_url: String,
    /// Root of the registry's filesystem storage as visible to this process.
    pub storage_root: PathBuf,
    /// Path of the registry config file inside the container.
    pub registry_config_path: String,
    /// Upper bound on a single garbage-collect run.
    pub exec_timeout: Duration,
    /// Per-request timeout for catalog/tag reads.
    pub http_timeout: Duration,
}

impl DockerBackendConfig {
    pub fn new(container_name: impl Into<String>) -> Self {
        let container_name = container_name.into();
        Self {
            registry_url: format!("http://{container_name}:5000"),
            storage_root: PathBuf::from("/var/lib/registry/docker/registry/v2"),
            registry_config_path: String::from("/etc/docker/registry/config.yml"),
            exec_timeout: Duration::from_secs(600),
            http_timeout: Duration::from_secs(10),
            container_name,
        }
    }

    pub fn get_admin_client(&self) -> Result<DockerAdminClient> {
        DockerAdminClient::new(self)
    }

    pub fn get_pruner(&self) -> FsPruner {
        FsPruner::new(self.storage_root.clone())
    }
}
