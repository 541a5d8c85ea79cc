//! Capability handle for the Adapt framework collaborator.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::hooks::PreBuildHook;

/// Well-known registry name the framework publishes itself under.
pub const FRAMEWORK_MODULE: &str = "adaptframework";

/// Handle to the framework module: the build working directory plus the
/// pre-build extensibility point. Immutable once constructed; a resolved
/// handle stays valid for the life of the process.
pub struct FrameworkHandle {
    path: PathBuf,
    pre_build_hook: PreBuildHook,
}

impl FrameworkHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pre_build_hook: PreBuildHook::new(),
        }
    }

    /// Root of the framework checkout, used as the working directory for
    /// build-adjacent subprocesses.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pre_build_hook(&self) -> &PreBuildHook {
        &self.pre_build_hook
    }

    /// Run every registered pre-build callback. The build pipeline calls
    /// this before each build; a callback failure flags the build.
    pub async fn run_pre_build(&self) -> Result<()> {
        self.pre_build_hook.invoke().await
    }
}
