//! Pre-build hook: an ordered callback list invoked before each build.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;

/// Callback registered on the pre-build hook.
#[async_trait]
pub trait PreBuildListener: Send + Sync {
    async fn on_pre_build(&self) -> Result<()>;
}

#[async_trait]
impl<T> PreBuildListener for Arc<T>
where
    T: PreBuildListener + ?Sized,
{
    async fn on_pre_build(&self) -> Result<()> {
        (**self).on_pre_build().await
    }
}

/// Extensibility point owned by the build pipeline. Listeners run
/// sequentially in registration order; the first failure skips the
/// remaining listeners and propagates, so the pipeline can flag the build.
#[derive(Default)]
pub struct PreBuildHook {
    listeners: RwLock<Vec<Arc<dyn PreBuildListener>>>,
}

impl PreBuildHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. Invocation order follows registration order.
    pub async fn tap(&self, listener: Arc<dyn PreBuildListener>) {
        self.listeners.write().await.push(listener);
    }

    pub async fn len(&self) -> usize {
        self.listeners.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.listeners.read().await.is_empty()
    }

    /// Invoke every registered callback once, in order. Listeners are
    /// snapshotted first so a callback that taps does not deadlock.
    pub async fn invoke(&self) -> Result<()> {
        let listeners: Vec<_> = self.listeners.read().await.to_vec();
        for listener in listeners {
            listener.on_pre_build().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpdaterError;
    use std::sync::Mutex;

    struct Recorder {
        id: usize,
        log: Arc<Mutex<Vec<usize>>>,
        fail: bool,
    }

    #[async_trait]
    impl PreBuildListener for Recorder {
        async fn on_pre_build(&self) -> Result<()> {
            self.log.lock().unwrap().push(self.id);
            if self.fail {
                return Err(UpdaterError::DatabaseUpdateFailed {
                    message: format!("listener {} failed", self.id),
                });
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn listeners_run_in_registration_order() {
        let hook = PreBuildHook::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        for id in 0..3 {
            hook.tap(Arc::new(Recorder {
                id,
                log: Arc::clone(&log),
                fail: false,
            }))
            .await;
        }

        assert_eq!(hook.len().await, 3);
        hook.invoke().await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn first_failure_skips_later_listeners() {
        let hook = PreBuildHook::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        hook.tap(Arc::new(Recorder {
            id: 0,
            log: Arc::clone(&log),
            fail: true,
        }))
        .await;
        hook.tap(Arc::new(Recorder {
            id: 1,
            log: Arc::clone(&log),
            fail: false,
        }))
        .await;

        assert!(hook.invoke().await.is_err());
        assert_eq!(*log.lock().unwrap(), vec![0]);
    }

    #[tokio::test]
    async fn empty_hook_invokes_cleanly() {
        let hook = PreBuildHook::new();
        assert!(hook.is_empty().await);
        hook.invoke().await.unwrap();
    }
}
