//! Infrastructure implementation of the `ContainerEngine` port.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ContainerEngine};
use crate::domain::container::{DAEMON_PROBE_TIMEOUT, EngineHost, HostCall};

/// `stop` waits for each container's grace period.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(120);

/// Backend shutdown and launch calls return quickly; launching does not wait
/// for readiness.
pub const HOST_CALL_TIMEOUT: Duration = Duration::from_secs(30);

const PS_FORMAT: &str = "{{json .}}";

pub struct ContainerCli<R> {
    runner: R,
    program: String,
    host: EngineHost,
}

impl<R: CommandRunner> ContainerCli<R> {
    #[must_use]
    pub fn new(runner: R, program: &str) -> Self {
        Self {
            runner,
            program: program.to_string(),
            host: EngineHost::current(),
        }
    }

    /// Control the backend as it is run on `host`.
    #[must_use]
    pub fn with_host(mut self, host: EngineHost) -> Self {
        self.host = host;
        self
    }

    /// Try `calls` in order and return the first successful output, or the
    /// last attempt when none succeeds.
    async fn first_success(&self, calls: Vec<HostCall>) -> Result<Output> {
        let mut last = None;
        for call in calls {
            if let Some(path) = call.requires_path.as_deref().filter(|p| !Path::new(p).exists()) {
                tracing::debug!(path, "engine launcher not present");
                continue;
            }
            let args: Vec<&str> = call.args.iter().map(String::as_str).collect();
            let attempt = self
                .runner
                .run_with_timeout(&call.program, &args, HOST_CALL_TIMEOUT)
                .await;
            match attempt {
                Ok(o) if o.status.success() => return Ok(o),
                other => {
                    tracing::debug!(program = %call.program, "engine host call did not succeed");
                    last = Some(other);
                }
            }
        }
        last.context("no container engine installation found")?
    }
}

impl<R: CommandRunner> ContainerEngine for ContainerCli<R> {
    async fn ps(&self, all: bool) -> Result<Output> {
        if all {
            self.runner
                .run(&self.program, &["ps", "-a", "--format", PS_FORMAT])
                .await
        } else {
            self.runner
                .run(&self.program, &["ps", "--format", PS_FORMAT])
                .await
        }
    }

    async fn ps_ids(&self) -> Result<Output> {
        self.runner.run(&self.program, &["ps", "-q"]).await
    }

    async fn start(&self, id: &str) -> Result<Output> {
        self.runner.run(&self.program, &["start", id]).await
    }

    async fn stop(&self, ids: &[&str]) -> Result<Output> {
        let mut args = Vec::with_capacity(ids.len() + 1);
        args.push("stop");
        args.extend_from_slice(ids);
        self.runner
            .run_with_timeout(&self.program, &args, STOP_TIMEOUT)
            .await
    }

    async fn remove(&self, id: &str) -> Result<Output> {
        self.runner.run(&self.program, &["rm", id]).await
    }

    async fn info(&self) -> Result<Output> {
        self.runner
            .run_with_timeout(&self.program, &["info"], DAEMON_PROBE_TIMEOUT)
            .await
    }

    async fn shutdown(&self) -> Result<Output> {
        self.first_success(self.host.shutdown_calls()).await
    }

    async fn launch(&self) -> Result<Output> {
        let local_app_data = std::env::var("LOCALAPPDATA").ok();
        self.first_success(self.host.launch_calls(local_app_data.as_deref()))
            .await
    }
}
