use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::process::Command;

use regsweep_core::registry::{AdminClient, Catalog, GcSummary, TagList};
use regsweep_core::RepositoryName;

use crate::config::DockerBackendConfig;
use crate::errors::{Error, Result};

/// Administrative surface of a registry running in a local docker container.
///
/// Garbage collection shells out to the `docker` CLI against the named
/// container; catalog and tag reads go through the registry's v2 HTTP API.
#[derive(Clone, Debug)]
pub struct DockerAdminClient {
    container_name: String,
    registry_url: String,
    registry_config_path: String,
    exec_timeout: Duration,
    http: reqwest::Client,
}

impl DockerAdminClient {
    pub fn new(config: &DockerBackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            container_name: config.container_name.clone(),
            registry_url: config.registry_url.trim_end_matches('/').to_string(),
            registry_config_path: config.registry_config_path.clone(),
            exec_timeout: config.exec_timeout,
            http,
        })
    }

    /// Confirm the configured container is among the currently running ones.
    /// The service cannot operate without its administrative channel, so
    /// callers treat a failure here as fatal.
    pub async fn probe_container(&self) -> Result<()> {
        let output = Command::new("docker")
            .args(["ps", "--filter"])
            .arg(format!("name={}", self.container_name))
            .args(["--format", "{{.Names}}"])
            .output()
            .await?;
        if !output.status.success() {
            tracing::error!(
                status = %output.status,
                "failed to list containers:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(Error::ContainerNotFound(self.container_name.clone()));
        }
        let names = String::from_utf8_lossy(&output.stdout);
        if !name_listed(&names, &self.container_name) {
            return Err(Error::ContainerNotFound(self.container_name.clone()));
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.registry_url, path);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

/// The `docker ps` name filter is a substring match; require an exact hit so
/// a lookalike container is never accepted.
fn name_listed(ps_output: &str, container_name: &str) -> bool {
    ps_output.lines().any(|line| line.trim() == container_name)
}

/// Run a command with an upper bound on its runtime. The child is killed when
/// the deadline abandons it; otherwise a timed-out exec would keep running
/// and a webhook redelivery could stack a second one on top of it.
async fn run_with_deadline(
    mut command: Command,
    deadline: Duration,
) -> Result<std::process::Output> {
    command.kill_on_drop(true);
    tokio::time::timeout(deadline, command.output())
        .await
        .map_err(|_| Error::Timeout(deadline))?
        .map_err(Error::Io)
}

/// Capture both output streams and check the exit status. Output is logged
/// on the failure branch as well; a failed run is exactly when an operator
/// needs to see what the collector printed.
fn check_gc_output(output: std::process::Output) -> Result<GcSummary> {
    let summary = GcSummary {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !output.status.success() {
        if !summary.stdout.is_empty() {
            tracing::info!(
                status = %output.status,
                "garbage collect stdout:\n{}",
                summary.stdout
            );
        }
        tracing::error!(
            status = %output.status,
            "garbage collect exited abnormally:\n{}",
            summary.stderr
        );
        return Err(Error::GarbageCollectFailed {
            status: output.status,
            stderr: summary.stderr,
        });
    }
    Ok(summary)
}

#[async_trait]
impl AdminClient for DockerAdminClient {
    async fn run_garbage_collect(&self) -> regsweep_core::Result<GcSummary> {
        let mut command = Command::new("docker");
        command
            .args(["exec", &self.container_name])
            .args(["registry", "garbage-collect"])
            .arg(&self.registry_config_path);

        tracing::info!(container = %self.container_name, "starting garbage collect");
        let output = run_with_deadline(command, self.exec_timeout).await?;
        Ok(check_gc_output(output)?)
    }

    async fn get_catalog(&self) -> regsweep_core::Result<Catalog> {
        Ok(self.get_json::<Catalog>("/v2/_catalog").await?)
    }

    async fn get_tags(&self, repository: &RepositoryName) -> regsweep_core::Result<TagList> {
        let path = format!("/v2/{}/tags/list", repository);
        Ok(self.get_json::<TagList>(&path).await?)
    }
}
