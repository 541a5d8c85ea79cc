//! Browserslist updater module
//!
//! Waits for the framework collaborator, then keeps its browserslist
//! database current by shelling out to the external updater CLI, either
//! before each build or on a repeating timer.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::config::{Config, UpdateCommand};
use crate::error::{Result, UpdaterError};
use crate::framework::{FRAMEWORK_MODULE, FrameworkHandle};
use crate::hooks::PreBuildListener;
use crate::registry::ModuleRegistry;

/// Failure handling for a single update attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Return the failure to the caller, so a build-triggered update can
    /// flag the build.
    Propagate,
    /// Log the failure at error level and report success. Used on the
    /// unattended periodic path, where a transient failure must not kill
    /// the timer or the process.
    LogAndSuppress,
}

pub struct BrowserslistModule {
    path: PathBuf,
    command: UpdateCommand,
    timer: OnceLock<JoinHandle<()>>,
}

impl BrowserslistModule {
    /// Initialize the module: suspend until the framework collaborator is
    /// registered, record its path, and wire up the configured triggers.
    /// Configuration is read once here; later changes are not observed.
    pub async fn init(registry: &ModuleRegistry, config: &Config) -> Result<Arc<Self>> {
        let framework = registry.wait_for::<FrameworkHandle>(FRAMEWORK_MODULE).await?;

        let module = Arc::new(Self {
            path: framework.path().to_path_buf(),
            command: config.update_command.clone(),
            timer: OnceLock::new(),
        });

        if config.run_on_build {
            framework.pre_build_hook().tap(module.clone()).await;
        }

        if config.update_interval_ms > 0 {
            let worker = Arc::clone(&module);
            let period = Duration::from_millis(config.update_interval_ms);
            let handle = tokio::spawn(async move {
                let mut ticks = tokio::time::interval(period);
                // The first tick completes immediately: one update up
                // front, then one per period. A slow updater delays the
                // next tick instead of causing a burst.
                ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticks.tick().await;
                    let _ = worker.update(ErrorPolicy::LogAndSuppress).await;
                }
            });
            // The timer runs for the rest of the process; the handle is
            // kept only so hosts can observe that it exists.
            let _ = module.timer.set(handle);
        }

        Ok(module)
    }

    /// Working directory the updater command runs in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether init started the periodic update timer.
    pub fn has_periodic_timer(&self) -> bool {
        self.timer.get().is_some()
    }

    /// Run the external updater once. Overlapping calls (a timer tick
    /// racing a build-triggered update) are not serialized here; the
    /// updater tool owns its database file.
    pub async fn update(&self, policy: ErrorPolicy) -> Result<()> {
        info!(path = %self.path.display(), "updating browserslist database");
        match self.run_updater().await {
            Ok(()) => {
                info!("browserslist database update complete");
                Ok(())
            }
            Err(err) => match policy {
                ErrorPolicy::Propagate => Err(err),
                ErrorPolicy::LogAndSuppress => {
                    error!("browserslist database update failed: {err}");
                    Ok(())
                }
            },
        }
    }

    async fn run_updater(&self) -> Result<()> {
        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args)
            .current_dir(&self.path)
            .kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd
            .output()
            .await
            .map_err(|err| UpdaterError::DatabaseUpdateFailed {
                message: spawn_failure(&self.command.program, err),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            debug!("updater stdout: {}", stdout.trim());
        }
        if !stderr.trim().is_empty() {
            debug!("updater stderr: {}", stderr.trim());
        }

        if !output.status.success() {
            return Err(UpdaterError::DatabaseUpdateFailed {
                message: format!(
                    "{} {}: {}",
                    self.command.program,
                    output.status,
                    truncate_snippet(stderr.trim(), 500)
                ),
            });
        }
        Ok(())
    }
}

/// Build-triggered path: a failing update propagates and can block or
/// flag the build.
#[async_trait]
impl PreBuildListener for BrowserslistModule {
    async fn on_pre_build(&self) -> Result<()> {
        self.update(ErrorPolicy::Propagate).await
    }
}

fn spawn_failure(program: &str, err: std::io::Error) -> String {
    if err.kind() == std::io::ErrorKind::NotFound {
        format!("{program} executable not found")
    } else {
        err.to_string()
    }
}

fn truncate_snippet(input: &str, max: usize) -> String {
    if input.len() <= max {
        return input.to_string();
    }
    // Lossy-decoded stderr can put a multibyte char across the cut point
    let mut end = max;
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &input[..end])
}
