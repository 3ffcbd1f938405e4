use std::{sync::Arc, time::Duration};

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use wayfarer_directions::{
    directions_provider::DirectionsProvider, error::RouteError, route_fetcher::RouteFetcher,
};
use wayfarer_geo::{coordinate::Coordinate, location_fix::LocationFix, route::Route};
use wayfarer_location::{
    error::LocationError,
    platform::LocationPlatform,
    provider::{LocationProvider, WatchHandle},
};

use crate::{
    config::SessionConfig,
    events::{CameraCommand, Notice, NoticeLevel, Region, UiEvent},
    render::RenderFrame,
    state::{FetchTag, RouteOutcome, SessionState},
};

/// UI events the rendering surface may leave undrained. Past this, new
/// camera commands and notices are dropped; frames are unaffected.
pub const UI_EVENT_CAPACITY: usize = 64;

pub(crate) enum SessionEvent {
    InitialFix(Result<LocationFix, LocationError>),
    LocationUpdated { subscription: u64, fix: LocationFix },
    MapTapped(Coordinate),
    RouteResolved {
        tag: FetchTag,
        result: Result<Route, RouteError>,
    },
    Shutdown,
}

/// The map screen's side of a running session: forwards taps, reads frames.
#[derive(Clone)]
pub struct SessionHandle {
    events: mpsc::UnboundedSender<SessionEvent>,
    frames: watch::Receiver<RenderFrame>,
}

impl SessionHandle {
    /// Forwards a map tap. Returns false once the session has stopped.
    pub fn tap(&self, coordinate: Coordinate) -> bool {
        self.events
            .send(SessionEvent::MapTapped(coordinate))
            .is_ok()
    }

    /// Stops the session and releases its location subscription.
    pub fn shutdown(&self) {
        let _ = self.events.send(SessionEvent::Shutdown);
    }

    pub fn frame(&self) -> RenderFrame {
        self.frames.borrow().clone()
    }

    pub fn frames(&self) -> watch::Receiver<RenderFrame> {
        self.frames.clone()
    }
}

/// Owns the [`SessionState`] and applies every transition on a single task.
/// Location updates and route results are delivered as events, in order.
pub struct Session<P, D> {
    config: SessionConfig,
    state: SessionState,
    location: Arc<LocationProvider<P>>,
    fetcher: Arc<RouteFetcher<D>>,
    watch: Option<WatchHandle>,
    watch_allowed: bool,
    events: mpsc::UnboundedSender<SessionEvent>,
    inbox: mpsc::UnboundedReceiver<SessionEvent>,
    frames: watch::Sender<RenderFrame>,
    ui: mpsc::Sender<UiEvent>,
}

impl<P, D> Session<P, D>
where
    P: LocationPlatform,
    D: DirectionsProvider,
{
    pub fn new(
        config: SessionConfig,
        platform: P,
        directions: D,
    ) -> (Self, SessionHandle, mpsc::Receiver<UiEvent>) {
        let (events, inbox) = mpsc::unbounded_channel();
        let (frames, frames_receiver) = watch::channel(RenderFrame::default());
        let (ui, ui_receiver) = mpsc::channel(UI_EVENT_CAPACITY);

        let session = Self {
            config,
            state: SessionState::new(),
            location: Arc::new(LocationProvider::with_options(
                platform,
                config.acquire,
                config.watch,
            )),
            fetcher: Arc::new(RouteFetcher::new(directions)),
            watch: None,
            watch_allowed: true,
            events: events.clone(),
            inbox,
            frames,
            ui,
        };

        let handle = SessionHandle {
            events,
            frames: frames_receiver,
        };

        (session, handle, ui_receiver)
    }

    /// Runs until [`SessionHandle::shutdown`] is called.
    pub async fn run(mut self) {
        self.start();

        while let Some(event) = self.inbox.recv().await {
            if matches!(event, SessionEvent::Shutdown) {
                break;
            }

            self.handle(event).await;
        }

        self.teardown();
    }

    fn start(&mut self) {
        info!("Session: locating");
        self.state.begin_locating();
        self.publish();

        let location = Arc::clone(&self.location);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = location.acquire_once().await;
            let _ = events.send(SessionEvent::InitialFix(result));
        });
    }

    async fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::InitialFix(result) => self.on_initial_fix(result).await,
            SessionEvent::LocationUpdated { subscription, fix } => {
                self.on_location(subscription, fix)
            }
            SessionEvent::MapTapped(coordinate) => self.on_tap(coordinate).await,
            SessionEvent::RouteResolved { tag, result } => self.on_route(tag, result),
            SessionEvent::Shutdown => {}
        }
    }

    async fn on_initial_fix(&mut self, result: Result<LocationFix, LocationError>) {
        match result {
            Ok(fix) => {
                self.state.finish_locating(Some(fix));
                self.center_on(fix.coordinate);
            }
            Err(error) => {
                self.state.finish_locating(None);
                self.notify(Notice::from(&error));

                if matches!(error, LocationError::PermissionDenied) {
                    self.watch_allowed = false;
                } else {
                    self.camera(CameraCommand::CenterOn {
                        region: self.config.default_region,
                        animation: Duration::ZERO,
                    });
                }
            }
        }

        self.publish();

        if self.watch_allowed {
            self.restart_watch().await;
        }
    }

    fn on_location(&mut self, subscription: u64, fix: LocationFix) {
        if !self.state.is_current_subscription(subscription) {
            debug!(
                "Session: dropping fix from superseded subscription #{}",
                subscription
            );
            return;
        }

        self.state.apply_fix(fix);
        self.center_on(fix.coordinate);
        self.publish();
    }

    async fn on_tap(&mut self, coordinate: Coordinate) {
        let destination = match Coordinate::try_new(coordinate.latitude(), coordinate.longitude())
        {
            Ok(destination) => destination,
            Err(error) => {
                self.notify(Notice::from(&error));
                return;
            }
        };

        let tag = self.state.select_destination(destination);
        info!(
            "Session: destination {} selected (fetch #{})",
            destination, tag.generation
        );
        self.publish();
        self.spawn_fetch(tag);

        // The subscription is tied to the destination it was started for
        if self.watch.is_some() {
            self.restart_watch().await;
        }
    }

    fn spawn_fetch(&self, tag: FetchTag) {
        let fetcher = Arc::clone(&self.fetcher);
        let events = self.events.clone();
        let origin = self.state.current_location();

        tokio::spawn(async move {
            let result = fetcher.fetch_route(origin, tag.destination).await;
            let _ = events.send(SessionEvent::RouteResolved { tag, result });
        });
    }

    fn on_route(&mut self, tag: FetchTag, result: Result<Route, RouteError>) {
        match self.state.apply_route(&tag, result) {
            RouteOutcome::Applied => {
                info!(
                    "Session: route #{} with {} positions ({})",
                    tag.generation,
                    self.state.route().len(),
                    self.state.route().length()
                );
                self.publish();
            }
            RouteOutcome::Failed(error) => {
                self.notify(Notice::from(&error));
                self.publish();
            }
            RouteOutcome::Stale => {
                debug!(
                    "Session: discarding route #{} for {}",
                    tag.generation, tag.destination
                );
            }
        }
    }

    async fn restart_watch(&mut self) {
        if let Some(previous) = self.watch.take() {
            previous.cancel();
        }

        let subscription = self.state.next_subscription();
        let events = self.events.clone();

        let result = self
            .location
            .watch_continuous(move |fix| {
                let _ = events.send(SessionEvent::LocationUpdated { subscription, fix });
            })
            .await;

        match result {
            Ok(handle) => {
                debug!("Session: watch subscription #{} started", subscription);
                self.watch = Some(handle);
            }
            Err(error) => {
                if matches!(error, LocationError::PermissionDenied) {
                    self.watch_allowed = false;
                }
                self.notify(Notice::from(&error));
            }
        }
    }

    fn center_on(&self, coordinate: Coordinate) {
        self.camera(CameraCommand::CenterOn {
            region: Region::around(coordinate, self.config.camera.follow_delta),
            animation: self.config.camera.animation,
        });
    }

    fn camera(&self, command: CameraCommand) {
        self.push_ui(UiEvent::Camera(command));
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => info!("Session: {}", notice.message),
            NoticeLevel::Error => warn!("Session: {}", notice.message),
        }

        self.push_ui(UiEvent::Notice(notice));
    }

    fn push_ui(&self, event: UiEvent) {
        if let Err(mpsc::error::TrySendError::Full(event)) = self.ui.try_send(event) {
            debug!("Session: UI queue full, dropping {:?}", event);
        }
    }

    fn publish(&self) {
        self.frames.send_replace(RenderFrame::from(&self.state));
    }

    fn teardown(&mut self) {
        if let Some(watch) = self.watch.take() {
            watch.cancel();
        }
        self.location.cancel_watch();

        info!("Session: stopped");
    }
}
