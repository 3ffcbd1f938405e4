use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};
use wayfarer_geo::location_fix::{Accuracy, LocationFix};

use crate::{
    error::LocationError,
    platform::{LocationPlatform, WatchOptions},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcquireOptions {
    pub accuracy: Accuracy,

    /// Budget for the one-shot fix, permission prompt excluded
    pub timeout: Duration,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::High,
            timeout: Duration::from_secs(3),
        }
    }
}

/// Keeps a position subscription alive. Dropping the handle also releases
/// the subscription.
#[derive(Debug)]
pub struct WatchHandle {
    task: AbortHandle,
}

impl WatchHandle {
    pub fn cancel(self) {
        self.task.abort();
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct LocationProvider<P> {
    platform: P,
    acquire: AcquireOptions,
    watch: WatchOptions,
    active_watch: Mutex<Option<AbortHandle>>,
}

impl<P> LocationProvider<P>
where
    P: LocationPlatform,
{
    pub fn new(platform: P) -> Self {
        Self::with_options(platform, AcquireOptions::default(), WatchOptions::default())
    }

    pub fn with_options(platform: P, acquire: AcquireOptions, watch: WatchOptions) -> Self {
        Self {
            platform,
            acquire,
            watch,
            active_watch: Mutex::new(None),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    async fn ensure_permission(&self) -> Result<(), LocationError> {
        let status = self.platform.request_foreground_permission().await;

        if status.is_granted() {
            Ok(())
        } else {
            warn!("LocationProvider: foreground permission denied");
            Err(LocationError::PermissionDenied)
        }
    }

    /// Requests a single fix. Reports exactly one outcome: the fix, or the
    /// first failure. A fix arriving after the deadline is dropped with the
    /// platform future.
    pub async fn acquire_once(&self) -> Result<LocationFix, LocationError> {
        self.ensure_permission().await?;

        debug!(
            "LocationProvider: requesting {} accuracy fix, timeout {:?}",
            self.acquire.accuracy, self.acquire.timeout
        );

        let position = self.platform.current_position(self.acquire.accuracy);

        match tokio::time::timeout(self.acquire.timeout, position).await {
            Ok(Ok(fix)) => {
                info!(
                    "LocationProvider: initial fix at {}",
                    fix.coordinate
                );
                Ok(fix)
            }
            Ok(Err(error)) => {
                warn!("LocationProvider: position request failed: {}", error);
                Err(LocationError::Unavailable(error))
            }
            Err(_) => {
                warn!(
                    "LocationProvider: no fix within {:?}",
                    self.acquire.timeout
                );
                Err(LocationError::AcquisitionTimeout(self.acquire.timeout))
            }
        }
    }

    /// Subscribes to position updates and calls `on_update` for every fix
    /// until the returned handle is released. Any previous subscription made
    /// through this provider is cancelled first.
    pub async fn watch_continuous<F>(&self, mut on_update: F) -> Result<WatchHandle, LocationError>
    where
        F: FnMut(LocationFix) + Send + 'static,
    {
        self.cancel_watch();
        self.ensure_permission().await?;

        let mut receiver = self.platform.watch_position(self.watch).await?;

        debug!(
            "LocationProvider: watching positions every {:?} / {}",
            self.watch.time_interval, self.watch.distance_interval
        );

        let task = tokio::spawn(async move {
            while let Some(fix) = receiver.recv().await {
                on_update(fix);
            }

            debug!("LocationProvider: position stream closed");
        });

        if let Some(previous) = self.active_watch.lock().replace(task.abort_handle()) {
            previous.abort();
        }

        Ok(WatchHandle {
            task: task.abort_handle(),
        })
    }

    pub fn cancel_watch(&self) {
        if let Some(active) = self.active_watch.lock().take() {
            debug!("LocationProvider: cancelling active watch");
            active.abort();
        }
    }
}
