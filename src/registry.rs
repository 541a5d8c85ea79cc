//! Asynchronous module registry
//!
//! A small service locator with async readiness: the host publishes each
//! module under a well-known name, and consumers suspend until the name
//! they depend on becomes available. The registry is an explicit instance
//! handed to consumers, so the wiring stays visible at call sites.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Notify;

use crate::error::{Result, UpdaterError};

#[derive(Default)]
pub struct ModuleRegistry {
    modules: DashMap<String, Arc<dyn Any + Send + Sync>>,
    registered: Notify,
}

impl ModuleRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Publish a module under `name`, waking every pending `wait_for`.
    pub fn register<T: Any + Send + Sync>(&self, name: &str, module: Arc<T>) {
        self.modules.insert(name.to_string(), module);
        self.registered.notify_waiters();
    }

    /// Suspend until a module named `name` has been registered, then hand
    /// back a typed reference. There is no timeout: resolution blocks for
    /// as long as the host takes to publish the module. A name registered
    /// under a different type is an error.
    pub async fn wait_for<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        let mut registered = std::pin::pin!(self.registered.notified());
        loop {
            // Arm the notification before checking the map so a register
            // racing this call cannot be missed.
            registered.as_mut().enable();
            if let Some(entry) = self.modules.get(name) {
                return Arc::clone(entry.value()).downcast::<T>().map_err(|_| {
                    UpdaterError::Registry {
                        message: format!("module '{name}' is registered with an unexpected type"),
                    }
                });
            }
            registered.as_mut().await;
            registered.set(self.registered.notified());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }
}
