use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::sync::mpsc;
use tracing::debug;
use wayfarer_geo::{
    coordinate::Coordinate,
    location_fix::{Accuracy, LocationFix},
};

use crate::platform::{LocationPlatform, PermissionStatus, PlatformError, WatchOptions};

const WATCH_CHANNEL_CAPACITY: usize = 16;

#[derive(Default)]
struct SimulationStats {
    permission_requests: AtomicUsize,
    position_requests: AtomicUsize,
    subscriptions_started: AtomicUsize,
    active_subscriptions: AtomicUsize,
}

struct ActiveSubscription(Arc<SimulationStats>);

impl Drop for ActiveSubscription {
    fn drop(&mut self) {
        self.0.active_subscriptions.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Replays a scripted track. The one-shot fix is the first scripted fix;
/// every subscription replays the whole track, one fix per `time_interval`,
/// skipping fixes closer than `distance_interval` to the last one sent.
#[derive(Clone)]
pub struct SimulatedPlatform {
    permission: PermissionStatus,
    services_enabled: bool,
    fixes: Arc<Vec<LocationFix>>,
    first_fix_delay: Duration,
    stats: Arc<SimulationStats>,
}

impl SimulatedPlatform {
    pub fn new(fixes: Vec<LocationFix>) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            services_enabled: true,
            fixes: Arc::new(fixes),
            first_fix_delay: Duration::ZERO,
            stats: Arc::new(SimulationStats::default()),
        }
    }

    pub fn from_coordinates<I>(coordinates: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        Self::new(
            coordinates
                .into_iter()
                .map(|coordinate| LocationFix::new(coordinate, Accuracy::High))
                .collect(),
        )
    }

    pub fn with_permission(mut self, permission: PermissionStatus) -> Self {
        self.permission = permission;
        self
    }

    /// Permission can still be granted, but every position request fails.
    pub fn with_services_disabled(mut self) -> Self {
        self.services_enabled = false;
        self
    }

    pub fn with_first_fix_delay(mut self, delay: Duration) -> Self {
        self.first_fix_delay = delay;
        self
    }

    pub fn permission_requests(&self) -> usize {
        self.stats.permission_requests.load(Ordering::SeqCst)
    }

    pub fn position_requests(&self) -> usize {
        self.stats.position_requests.load(Ordering::SeqCst)
    }

    pub fn subscriptions_started(&self) -> usize {
        self.stats.subscriptions_started.load(Ordering::SeqCst)
    }

    pub fn active_subscriptions(&self) -> usize {
        self.stats.active_subscriptions.load(Ordering::SeqCst)
    }
}

impl LocationPlatform for SimulatedPlatform {
    async fn request_foreground_permission(&self) -> PermissionStatus {
        self.stats.permission_requests.fetch_add(1, Ordering::SeqCst);
        self.permission
    }

    async fn current_position(&self, accuracy: Accuracy) -> Result<LocationFix, PlatformError> {
        self.stats.position_requests.fetch_add(1, Ordering::SeqCst);

        if !self.services_enabled {
            return Err(PlatformError::ServicesDisabled);
        }

        tokio::time::sleep(self.first_fix_delay).await;

        self.fixes
            .first()
            .map(|fix| LocationFix { accuracy, ..*fix })
            .ok_or_else(|| PlatformError::PositionUnavailable("empty track".to_string()))
    }

    async fn watch_position(
        &self,
        options: WatchOptions,
    ) -> Result<mpsc::Receiver<LocationFix>, PlatformError> {
        if !self.services_enabled {
            return Err(PlatformError::ServicesDisabled);
        }

        let (sender, receiver) = mpsc::channel(WATCH_CHANNEL_CAPACITY);

        self.stats
            .subscriptions_started
            .fetch_add(1, Ordering::SeqCst);
        self.stats
            .active_subscriptions
            .fetch_add(1, Ordering::SeqCst);

        let fixes = Arc::clone(&self.fixes);
        let guard = ActiveSubscription(Arc::clone(&self.stats));

        tokio::spawn(async move {
            let _guard = guard;
            let mut last_sent: Option<Coordinate> = None;

            for fix in fixes.iter() {
                tokio::select! {
                    _ = sender.closed() => return,
                    _ = tokio::time::sleep(options.time_interval) => {}
                }

                if let Some(last) = last_sent {
                    if last.haversine_distance(&fix.coordinate) < options.distance_interval {
                        continue;
                    }
                }

                let fix = LocationFix {
                    accuracy: options.accuracy,
                    ..*fix
                };

                if sender.send(fix).await.is_err() {
                    return;
                }

                last_sent = Some(fix.coordinate);
            }

            debug!("SimulatedPlatform: track exhausted, holding subscription open");
            sender.closed().await;
        });

        Ok(receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_watch_skips_fixes_below_distance_interval() {
        let platform = SimulatedPlatform::from_coordinates([
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.000001),
            Coordinate::new(0.0, 0.001),
        ]);

        let mut receiver = platform
            .watch_position(WatchOptions::default())
            .await
            .unwrap();

        let first = receiver.recv().await.unwrap();
        let second = receiver.recv().await.unwrap();

        assert_eq!(first.coordinate, Coordinate::new(0.0, 0.0));
        assert_eq!(second.coordinate, Coordinate::new(0.0, 0.001));
    }

    #[tokio::test(start_paused = true)]
    async fn test_current_position_uses_requested_accuracy() {
        let platform = SimulatedPlatform::from_coordinates([Coordinate::new(1.0, 1.0)]);

        let fix = platform.current_position(Accuracy::Balanced).await.unwrap();

        assert_eq!(fix.accuracy, Accuracy::Balanced);
        assert_eq!(platform.position_requests(), 1);
    }
}
