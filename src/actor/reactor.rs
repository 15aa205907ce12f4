//! The reactor's job is to keep the canvas state coherent.
//!
//! It takes events from the host surface (pointer, keyboard, wheel, screen
//! changes, direct commands), applies them to the engine one at a time,
//! and pushes the derived scene outward. It also owns the only two
//! autonomous activities in the system: the fullscreen idle sweep and the
//! dock-position persistence, both of which die with the reactor's
//! cancellation token rather than lingering as leaked tasks.

mod query;
mod replay;

pub use query::{QueryRequest, ReactorQueryHandle};
pub use replay::{replay, Record};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::actor;
use crate::actor::dock::{DockState, DockStore};
use crate::actor::input::{
    shortcut_for, DragGesture, GestureUpdate, InputEvent, PointerTarget, ReleasedGesture, Shortcut,
};
use crate::canvas::{CanvasCommand, CanvasEngine, EventResponse, PanSession, TabNavigator};
use crate::common::config::Config;
use crate::model::geometry::{display_scale, Point, Size};
use crate::model::workspace::InteractionMode;
use crate::render::{SceneFrame, SceneSink};
use crate::ui::frame::FrameDragSession;

pub type Sender = actor::Sender<Event>;
type Receiver = actor::Receiver<Event>;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// The host surface's dimensions changed. This is always the first
    /// event sent on startup.
    ScreenParametersChanged(Size),

    /// Raw pointer/keyboard/wheel input, already hit-tested by the host.
    Input(InputEvent),

    /// A direct engine command, bypassing input translation.
    Command(CanvasCommand),

    /// A state snapshot request. Not recorded and never replayed.
    #[serde(skip)]
    Query(QueryRequest),
}

/// Cheap handle for talking to a running reactor: send events, run
/// queries.
#[derive(Clone)]
pub struct ReactorHandle {
    sender: Sender,
    queries: ReactorQueryHandle,
}

impl ReactorHandle {
    pub fn new(sender: Sender) -> ReactorHandle {
        let queries = ReactorQueryHandle::new(sender.clone());
        ReactorHandle { sender, queries }
    }

    pub fn sender(&self) -> Sender { self.sender.clone() }

    pub fn send(&self, event: Event) { self.sender.send(event) }
}

impl std::ops::Deref for ReactorHandle {
    type Target = ReactorQueryHandle;

    fn deref(&self) -> &Self::Target { &self.queries }
}

pub struct Reactor {
    engine: CanvasEngine,
    navigator: TabNavigator,
    dock: DockState,
    gesture: DragGesture,
    sink: Arc<dyn SceneSink>,
    last_frame: Option<SceneFrame>,
    /// URLs the engine asked the host to open outside the canvas.
    external_opens: Vec<String>,
}

impl Reactor {
    /// Starts the reactor on the current runtime. The sweep interval and
    /// the event loop both stop when `cancel` fires.
    pub fn spawn(
        config: Config,
        store: DockStore,
        sink: Arc<dyn SceneSink>,
        cancel: CancellationToken,
    ) -> (ReactorHandle, JoinHandle<()>) {
        let (tx, rx) = actor::channel();
        let reactor = Reactor {
            engine: CanvasEngine::new(config.canvas.clone()),
            navigator: TabNavigator::new(),
            dock: DockState::load(store, &config.dock),
            gesture: DragGesture::default(),
            sink,
            last_frame: None,
            external_opens: Vec::new(),
        };
        let handle = ReactorHandle::new(tx);
        let task = tokio::spawn(reactor.run(rx, cancel));
        (handle, task)
    }

    async fn run(mut self, mut rx: Receiver, cancel: CancellationToken) {
        let mut sweep = tokio::time::interval(self.engine.settings().sweep_period());
        sweep.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.publish_scene();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("reactor cancelled, stopping the idle sweep");
                    break;
                }
                _ = sweep.tick() => self.sweep_idle(),
                event = rx.recv() => match event {
                    Some((span, event)) => {
                        let _guard = span.enter();
                        self.handle_event(event);
                    }
                    None => {
                        debug!("all senders dropped, reactor exiting");
                        break;
                    }
                },
            }
        }
    }

    fn sweep_idle(&mut self) {
        let restored = self.engine.sweep_idle(Instant::now());
        if !restored.is_empty() {
            self.publish_scene();
        }
    }

    #[instrument(skip(self))]
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::ScreenParametersChanged(size) => self.engine.set_screen(size),
            Event::Command(command) => self.apply_command(command),
            Event::Input(input) => self.handle_input(input),
            Event::Query(request) => {
                // Queries are read-only; nothing to republish.
                self.answer(request);
                return;
            }
        }
        self.publish_scene();
    }

    fn apply_command(&mut self, command: CanvasCommand) {
        if let CanvasCommand::UpdateSettings(patch) = &command {
            // A facet change could leave the primed highlight on a tab
            // that is no longer visible.
            if patch.filter.is_some() {
                self.navigator.clear_primed();
            }
        }
        let response = self.engine.handle_command(command, Instant::now());
        self.process_response(response);
    }

    fn process_response(&mut self, response: EventResponse) {
        if let Some(url) = response.open_external {
            info!(%url, "external open requested");
            self.external_opens.push(url);
        }
    }

    fn handle_input(&mut self, input: InputEvent) {
        let now = Instant::now();
        match input {
            InputEvent::KeyDown { key, alt, text_input_focused } => {
                let Some(shortcut) = shortcut_for(key, alt, text_input_focused) else {
                    return;
                };
                self.handle_shortcut(shortcut, now);
            }
            InputEvent::PointerDown { target, pos } => self.pointer_down(target, pos, now),
            InputEvent::PointerMove { pos, over_window } => {
                // Raw mouse movement returns tab selection to the pointer.
                self.navigator.clear_primed();
                if let Some(id) = over_window {
                    self.engine.record_activity(id, now);
                }
                match self.gesture.pointer_move(pos) {
                    GestureUpdate::None => {}
                    GestureUpdate::PanTo(pan) => self.engine.set_viewport_pan(pan.x, pan.y),
                    GestureUpdate::MoveWindow { window, target } => {
                        self.engine.move_window(window, target.x, target.y)
                    }
                    GestureUpdate::DockTo(pos) => self.dock.drag_to(pos),
                }
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                if self.gesture.release() == ReleasedGesture::Dock {
                    self.dock.end_drag();
                }
            }
            InputEvent::DoubleClick { target } => {
                if let PointerTarget::WindowHeader(id) = target {
                    self.engine.toggle_fullscreen(id, now);
                }
            }
            InputEvent::Wheel { delta_y, target } => {
                if let PointerTarget::WindowContent(id) = target {
                    self.engine.record_activity(id, now);
                }
                // The engine rejects the zoom itself in window mode.
                self.engine.zoom_viewport(delta_y);
            }
        }
    }

    fn handle_shortcut(&mut self, shortcut: Shortcut, now: Instant) {
        debug!(?shortcut, "keyboard shortcut");
        match shortcut {
            Shortcut::NextTab => self.navigator.next(&self.engine),
            Shortcut::PrevTab => self.navigator.prev(&self.engine),
            Shortcut::ConfirmTab => {
                if let Some(code) = self.navigator.confirm(&self.engine) {
                    let response = self.engine.open_window(&code, now);
                    self.process_response(response);
                }
            }
            Shortcut::CloseActiveWindow => {
                if let Some(id) = self.engine.active_workspace().active_window {
                    self.engine.close_window(id);
                }
            }
            Shortcut::CloseActiveWorkspace => {
                if self.engine.workspaces().len() > 1 {
                    self.engine.close_workspace(self.engine.active_id());
                } else {
                    // The final workspace is never closed; the destructive
                    // path goes through the confirmation flow instead.
                    self.engine.begin_hard_reset();
                }
            }
        }
    }

    fn pointer_down(&mut self, target: PointerTarget, pos: Point, now: Instant) {
        match target {
            PointerTarget::Canvas => {
                let ws = self.engine.active_workspace();
                if ws.interaction_mode == InteractionMode::Canvas {
                    self.gesture.begin_pan(PanSession::begin(pos, &ws.viewport));
                }
            }
            PointerTarget::WindowHeader(id) => {
                self.engine.focus_window(id);
                let ws = self.engine.active_workspace();
                if let Some(window) = ws.window(id) {
                    if !window.fullscreen {
                        let scale = display_scale(&ws.viewport, window.pinned);
                        self.gesture.begin_window(
                            id,
                            FrameDragSession::begin(pos, Point::new(window.x, window.y)),
                            scale,
                        );
                    }
                }
            }
            PointerTarget::WindowContent(id) => {
                // The focus overlay routes clicks on inactive windows here
                // before any content interaction.
                self.engine.focus_window(id);
                self.engine.record_activity(id, now);
            }
            PointerTarget::DockHandle => {
                self.dock.begin_drag(pos);
                self.gesture.begin_dock();
            }
            PointerTarget::DockReset => self.dock.reset(),
        }
    }

    fn publish_scene(&mut self) {
        let frame = SceneFrame::derive(self.engine.active_workspace());
        if self.last_frame.as_ref() == Some(&frame) {
            return;
        }
        self.sink.present(&frame);
        self.last_frame = Some(frame);
    }
}
