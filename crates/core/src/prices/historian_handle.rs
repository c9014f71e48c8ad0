use log::info;
use std::sync::{Arc, PoisonError, RwLock};

use super::{PriceError, PriceHistorian};
use crate::errors::Result;

/// Explicit init/get/reset lifecycle around the process-wide historian.
///
/// Owned by the application context and passed to whoever values holdings.
#[derive(Default)]
pub struct PriceHistorianHandle {
    inner: RwLock<Option<Arc<PriceHistorian>>>,
}

impl PriceHistorianHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `historian`. Fails if one is already installed.
    pub fn init(&self, historian: PriceHistorian) -> Result<Arc<PriceHistorian>> {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(PriceError::AlreadyInitialized.into());
        }
        let historian = Arc::new(historian);
        *slot = Some(Arc::clone(&historian));
        info!(
            "Price historian initialized (mocked: {})",
            historian.is_mocked()
        );
        Ok(historian)
    }

    pub fn get(&self) -> Result<Arc<PriceHistorian>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| PriceError::NotInitialized.into())
    }

    pub fn is_initialized(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drops the installed historian so a fresh one can be initialized.
    /// Clones already handed out keep working until dropped.
    pub fn reset(&self) -> Option<Arc<PriceHistorian>> {
        let previous = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            info!("Price historian reset");
        }
        previous
    }
}
