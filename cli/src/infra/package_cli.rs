//! Infrastructure implementation of the `PackageManager` port.
//!
//! Every call is a fixed argument template; names are never spliced into a
//! shell string.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{CommandRunner, PackageManager};

/// `list` and `search`.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// `install`, `uninstall` and `update` may download large archives.
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

pub struct PackageCli<R> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> PackageCli<R> {
    #[must_use]
    pub fn new(runner: R, program: &str) -> Self {
        Self {
            runner,
            program: resolve_program(program),
        }
    }

    async fn call(&self, args: &[&str], timeout: Duration) -> Result<Output> {
        tracing::debug!(program = %self.program, ?args, "package manager call");
        self.runner
            .run_with_timeout(&self.program, args, timeout)
            .await
    }
}

/// scoop ships as a `.cmd` shim on Windows, which `CreateProcess` only finds
/// by its full name.
fn resolve_program(program: &str) -> String {
    if cfg!(windows) && Path::new(program).extension().is_none() {
        format!("{program}.cmd")
    } else {
        program.to_string()
    }
}

impl<R: CommandRunner> PackageManager for PackageCli<R> {
    async fn list(&self) -> Result<Output> {
        self.call(&["list"], QUERY_TIMEOUT).await
    }

    async fn search(&self, query: &str) -> Result<Output> {
        if query.is_empty() {
            self.call(&["search"], QUERY_TIMEOUT).await
        } else {
            self.call(&["search", query], QUERY_TIMEOUT).await
        }
    }

    async fn install(&self, name: &str) -> Result<Output> {
        self.call(&["install", name], INSTALL_TIMEOUT).await
    }

    async fn uninstall(&self, name: &str) -> Result<Output> {
        self.call(&["uninstall", name], INSTALL_TIMEOUT).await
    }

    async fn update(&self, name: &str) -> Result<Output> {
        self.call(&["update", name], INSTALL_TIMEOUT).await
    }
}
