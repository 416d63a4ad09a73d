//! Async driver that owns a mounted carousel
//!
//! One tokio task per mounted carousel exclusively owns its
//! [`CarouselController`]. User input arrives over an mpsc channel, the
//! auto-advance cadence is a [`tokio::time::Interval`], and the edge
//! correction is a single optional deadline armed when a transition starts.
//! All three are multiplexed in one `select!` loop, so there is never more
//! than one mutation in progress and every transition settles exactly once.
//!
//! Unmounting aborts the task. The interval and the pending settle live in
//! the task's stack frame, so nothing can touch the carousel afterwards.

use std::future;
use std::sync::Arc;

use submid_config::{AutoAdvancePolicy, CarouselSettings};
use submid_model::PromoItem;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::controller::{CarouselController, CarouselSnapshot};
use super::state::Navigation;
use crate::error::DriverError;

const COMMAND_BUFFER: usize = 64;

/// Inputs accepted by a mounted carousel.
#[derive(Debug, Clone)]
pub enum CarouselCommand {
    Advance,
    Retreat,
    JumpTo(usize),
    GestureStart(f32),
    GestureMove(f32),
    GestureEnd,
    /// Open the detail overlay for the slide at this extended index.
    Select(usize),
    CloseDetail,
    ReplaceItems(Arc<[PromoItem]>),
}

impl CarouselCommand {
    /// Commands that count as user navigation for
    /// [`AutoAdvancePolicy::RestartOnManual`].
    fn is_manual_navigation(&self) -> bool {
        matches!(
            self,
            CarouselCommand::Advance
                | CarouselCommand::Retreat
                | CarouselCommand::JumpTo(_)
                | CarouselCommand::GestureEnd
        )
    }
}

/// Mounts carousels with a shared set of timings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarouselDriver {
    settings: CarouselSettings,
}

impl CarouselDriver {
    pub fn new(settings: CarouselSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    /// Spawn the event loop for a new carousel. Must be called from within a
    /// tokio runtime.
    pub fn mount(&self, items: impl Into<Arc<[PromoItem]>>) -> CarouselHandle {
        let controller = CarouselController::with_settings(items, &self.settings);
        self.mount_controller(controller)
    }

    pub fn mount_controller(&self, controller: CarouselController) -> CarouselHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());

        info!(
            promos = controller.store().len(),
            auto_advance = self.settings.auto_advance.enabled,
            "carousel mounted"
        );

        let task = tokio::spawn(run_carousel(
            controller,
            self.settings,
            command_rx,
            snapshot_tx,
        ));

        CarouselHandle {
            remote: CarouselRemote {
                commands: command_tx,
                snapshots: snapshot_rx,
            },
            task: Some(task),
        }
    }
}

/// Cloneable input side of a mounted carousel.
#[derive(Debug, Clone)]
pub struct CarouselRemote {
    commands: mpsc::Sender<CarouselCommand>,
    snapshots: watch::Receiver<CarouselSnapshot>,
}

impl CarouselRemote {
    pub async fn send(&self, command: CarouselCommand) -> Result<(), DriverError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| DriverError::Unmounted)
    }

    pub async fn advance(&self) -> Result<(), DriverError> {
        self.send(CarouselCommand::Advance).await
    }

    pub async fn retreat(&self) -> Result<(), DriverError> {
        self.send(CarouselCommand::Retreat).await
    }

    /// Jump to a logical index. Indices outside the current list are
    /// rejected here rather than inside the event loop.
    pub async fn jump_to(&self, index: usize) -> Result<(), DriverError> {
        let len = self.snapshots.borrow().item_count;
        if len > 0 && index >= len {
            return Err(crate::error::CarouselError::IndexOutOfRange {
                index,
                len,
            }
            .into());
        }
        self.send(CarouselCommand::JumpTo(index)).await
    }

    pub async fn gesture_start(&self, x: f32) -> Result<(), DriverError> {
        self.send(CarouselCommand::GestureStart(x)).await
    }

    pub async fn gesture_move(&self, x: f32) -> Result<(), DriverError> {
        self.send(CarouselCommand::GestureMove(x)).await
    }

    pub async fn gesture_end(&self) -> Result<(), DriverError> {
        self.send(CarouselCommand::GestureEnd).await
    }

    pub async fn select(&self, extended_index: usize) -> Result<(), DriverError> {
        self.send(CarouselCommand::Select(extended_index)).await
    }

    pub async fn close_detail(&self) -> Result<(), DriverError> {
        self.send(CarouselCommand::CloseDetail).await
    }

    pub async fn replace_items(
        &self,
        items: impl Into<Arc<[PromoItem]>>,
    ) -> Result<(), DriverError> {
        self.send(CarouselCommand::ReplaceItems(items.into())).await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> CarouselSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<CarouselSnapshot> {
        self.snapshots.clone()
    }
}

/// Owner of a mounted carousel. Dropping it unmounts the carousel.
#[derive(Debug)]
pub struct CarouselHandle {
    remote: CarouselRemote,
    task: Option<JoinHandle<()>>,
}

impl CarouselHandle {
    pub fn remote(&self) -> CarouselRemote {
        self.remote.clone()
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        self.remote.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<CarouselSnapshot> {
        self.remote.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Tear the carousel down and wait until its task is gone. The pending
    /// settle and the auto-advance timer are cancelled with it.
    pub async fn unmount(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            match task.await {
                Ok(()) => {}
                Err(err) if err.is_cancelled() => {}
                Err(err) => warn!(error = %err, "carousel task failed"),
            }
            info!("carousel unmounted");
        }
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_carousel(
    mut controller: CarouselController,
    settings: CarouselSettings,
    mut commands: mpsc::Receiver<CarouselCommand>,
    snapshots: watch::Sender<CarouselSnapshot>,
) {
    let auto = settings.auto_advance;
    let mut ticker = auto.enabled.then(|| {
        let mut interval =
            time::interval_at(Instant::now() + auto.interval, auto.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });
    let mut settle_at: Option<Instant> = None;

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("all carousel remotes dropped, stopping");
                    break;
                };
                let manual = command.is_manual_navigation();
                let nav = apply_command(&mut controller, command);
                if nav.is_some_and(Navigation::started) {
                    settle_at = Some(Instant::now() + settings.transition);
                } else if !controller.in_transition() {
                    // A reload drops the in-flight transition with it.
                    settle_at = None;
                }
                if manual && auto.policy == AutoAdvancePolicy::RestartOnManual {
                    if let Some(ticker) = ticker.as_mut() {
                        ticker.reset();
                    }
                }
            }
            _ = next_tick(&mut ticker) => {
                if controller.advance().started() {
                    settle_at = Some(Instant::now() + settings.transition);
                }
            }
            _ = settle_deadline(settle_at) => {
                settle_at = None;
                controller.settle();
            }
        }

        let next = controller.snapshot();
        snapshots.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}

/// Apply one input. Returns the navigation outcome for navigating commands.
fn apply_command(
    controller: &mut CarouselController,
    command: CarouselCommand,
) -> Option<Navigation> {
    match command {
        CarouselCommand::Advance => Some(controller.advance()),
        CarouselCommand::Retreat => Some(controller.retreat()),
        CarouselCommand::JumpTo(index) => match controller.jump_to(index) {
            Ok(nav) => Some(nav),
            Err(err) => {
                warn!(error = %err, "rejected carousel jump");
                None
            }
        },
        CarouselCommand::GestureStart(x) => {
            controller.gesture_start(x);
            None
        }
        CarouselCommand::GestureMove(x) => {
            controller.gesture_move(x);
            None
        }
        CarouselCommand::GestureEnd => {
            controller.gesture_end().map(|(_, nav)| nav)
        }
        CarouselCommand::Select(extended_index) => {
            controller.select(extended_index);
            None
        }
        CarouselCommand::CloseDetail => {
            controller.close_detail();
            None
        }
        CarouselCommand::ReplaceItems(items) => {
            controller.replace_items(items);
            None
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => future::pending::<()>().await,
    }
}

async fn settle_deadline(at: Option<Instant>) {
    match at {
        Some(at) => time::sleep_until(at).await,
        None => future::pending::<()>().await,
    }
}
