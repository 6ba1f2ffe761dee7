use crate::error::Result;
use crate::package::Package;
use crate::platform::PackageHandle;
use std::sync::{Arc, Mutex};

/// Process-wide slot for the current application's package.
///
/// The slot caches one adapter and replaces it wholesale once its backing
/// reference dies. Check and replace happen under a single lock, so
/// concurrent callers see exactly one replacement per staleness event.
pub(crate) struct CurrentSlot<F> {
    provider: F,
    slot: Mutex<Option<Arc<Package>>>,
}

impl<F> CurrentSlot<F>
where
    F: Fn() -> Result<PackageHandle>,
{
    pub(crate) const fn new(provider: F) -> Self {
        Self {
            provider,
            slot: Mutex::new(None),
        }
    }

    pub(crate) fn get(&self) -> Result<Arc<Package>> {
        let mut slot = self.slot.lock().unwrap();

        if let Some(package) = slot.as_ref() {
            if package.originator().is_some() {
                return Ok(package.clone());
            }
            log::debug!("Current package reference died, refreshing from platform");
        }

        let handle = (self.provider)()?;
        let package = Arc::new(Package::from_handle(&handle));
        *slot = Some(package.clone());
        Ok(package)
    }
}
