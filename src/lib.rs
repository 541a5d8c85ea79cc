//! Keeps the browserslist browser-compatibility database current for the
//! Adapt framework build process.
//!
//! The host registers the framework collaborator on a [`ModuleRegistry`];
//! [`BrowserslistModule::init`] waits for it, reads configuration once, and
//! wires up the configured triggers: a pre-build callback, a periodic
//! update timer, or both. Each trigger shells out to the external updater
//! CLI in the framework's working directory.

pub mod config;
pub mod error;
pub mod framework;
pub mod hooks;
pub mod logging;
pub mod registry;
pub mod updater;

pub use config::{Config, UpdateCommand};
pub use error::{Result, UpdaterError};
pub use framework::{FRAMEWORK_MODULE, FrameworkHandle};
pub use hooks::{PreBuildHook, PreBuildListener};
pub use registry::ModuleRegistry;
pub use updater::{BrowserslistModule, ErrorPolicy};

// Load env from a simple, standardized location resolution.
// This uses dotenvy::dotenv().ok() which loads .env if present and silently ignores if missing.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}
