use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use regsweep_backend_docker::DockerBackendConfig;

/// Registry deletion-webhook cleanup service.
///
/// Listens for registry deletion notifications, runs the registry's garbage
/// collector, and removes orphaned repository storage.
#[derive(Parser)]
pub struct Cli {
    /// Port the webhook endpoint listens on.
    #[arg(long, env = "PORT", default_value_t = 5002)]
    pub port: u16,

    /// Name of the running registry container.
    #[arg(long, env = "CONTAINER_NAME")]
    pub container_name: String,

    /// Base URL of the registry's read-only API; defaults to
    /// http://<container-name>:5000.
    #[arg(long, env = "REGISTRY_URL")]
    pub registry_url: Option<String>,

    /// Root of the registry's filesystem storage as mounted for this process.
    #[arg(
        long,
        env = "REGISTRY_STORAGE_ROOT",
        default_value = "/var/lib/registry/docker/registry/v2"
    )]
    pub storage_root: PathBuf,

    /// Path of the registry config file inside the container.
    #[arg(
        long,
        env = "REGISTRY_CONFIG_PATH",
        default_value = "/etc/docker/registry/config.yml"
    )]
    pub registry_config: String,

    /// Upper bound in seconds on a single garbage-collect run.
    #[arg(long, env = "GC_TIMEOUT_SECS", default_value_t = 600)]
    pub gc_timeout_secs: u64,
}

impl Cli {
    pub fn backend_config(&self) -> DockerBackendConfig {
        let mut config = DockerBackendConfig::new(&self.container_name);
        if let Some(url) = &self.registry_url {
            config.registry_url = url.clone();
        }
        config.storage_root = self.storage_root.clone();
        config.registry_config_path = self.registry_config.clone();
        config.exec_timeout = Duration::from_secs(self.gc_timeout_secs);
        config
    }
}
