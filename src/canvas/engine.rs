//! The engine owns every workspace and is the only writer of their state.
//!
//! All mutation funnels through the operations here (directly, or via
//! [`CanvasCommand`] dispatch). Operations on ids that no longer resolve
//! are silent no-ops; callers are expected to hold live ids and there is
//! nothing useful to report when they don't.

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::canvas::viewport::zoom_about_center;
use crate::common::collections::HashMap;
use crate::common::config::CanvasSettings;
use crate::model::geometry::{Size, Viewport};
use crate::model::registry::{self, ContentView, IDE_CODE};
use crate::model::window::{Extent, RestoreState, Window, WindowId, FULLSCREEN_Z};
use crate::model::workspace::{
    FirmamentLayer, IdeOpenMode, InteractionMode, SettingsPatch, Workspace, WorkspaceId, BASE_Z,
};

/// Typed literal gating the destructive hard reset.
pub const CONFIRM_PHRASE: &str = "CONFIRM";

/// Screen dimensions assumed until the host reports real ones.
const DEFAULT_SCREEN: Size = Size { width: 1920.0, height: 1080.0 };

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CanvasCommand {
    CreateWorkspace,
    CloseWorkspace(WorkspaceId),
    ActivateWorkspace(WorkspaceId),
    BeginRename(WorkspaceId),
    Rename {
        workspace: WorkspaceId,
        title: String,
    },
    CancelRename,
    /// Merge of optional settings fields into the active workspace.
    UpdateSettings(SettingsPatch),
    ToggleLayer(FirmamentLayer),
    BeginHardReset,
    SetResetPhrase(String),
    CancelHardReset,
    ConfirmHardReset,
    OpenWindow {
        code: String,
    },
    CloseWindow(WindowId),
    FocusWindow(WindowId),
    MoveWindow {
        window: WindowId,
        x: f64,
        y: f64,
    },
    TogglePin(WindowId),
    ToggleFullscreen(WindowId),
    RecordActivity(WindowId),
    /// Pop a project window out into the external IDE.
    PopOutProject(WindowId),
    Zoom {
        delta_y: f64,
    },
    PanTo {
        x: f64,
        y: f64,
    },
}

/// Externally visible effects of one operation.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    /// A freshly opened (and therefore focused) window.
    pub opened: Option<WindowId>,
    /// A URL the host should open outside the canvas.
    pub open_external: Option<String>,
}

pub struct CanvasEngine {
    settings: CanvasSettings,
    workspaces: Vec<Workspace>,
    active: WorkspaceId,
    renaming: Option<WorkspaceId>,
    /// The typed confirmation phrase while the hard-reset prompt is open.
    reset_prompt: Option<String>,
    workspace_serial: u64,
    window_serial: u64,
    /// Last input instant per window, feeding the idle sweep.
    activity: HashMap<WindowId, Instant>,
    screen: Size,
}

impl CanvasEngine {
    pub fn new(settings: CanvasSettings) -> CanvasEngine {
        let first = WorkspaceId::from_serial(1);
        CanvasEngine {
            settings,
            workspaces: vec![Workspace::fresh(first, "MAIN INSTANCE")],
            active: first,
            renaming: None,
            reset_prompt: None,
            workspace_serial: 1,
            window_serial: 0,
            activity: HashMap::default(),
            screen: DEFAULT_SCREEN,
        }
    }

    pub fn settings(&self) -> &CanvasSettings { &self.settings }

    pub fn screen(&self) -> Size { self.screen }

    pub fn set_screen(&mut self, screen: Size) {
        debug!(?screen, "screen parameters changed");
        self.screen = screen;
    }

    pub fn workspaces(&self) -> &[Workspace] { &self.workspaces }

    pub fn active_id(&self) -> WorkspaceId { self.active_workspace().id }

    fn active_index(&self) -> usize {
        // The active id must always resolve; fall back to the first
        // workspace if it doesn't.
        self.workspaces.iter().position(|w| w.id == self.active).unwrap_or(0)
    }

    pub fn active_workspace(&self) -> &Workspace { &self.workspaces[self.active_index()] }

    pub fn active_workspace_mut(&mut self) -> &mut Workspace {
        let index = self.active_index();
        &mut self.workspaces[index]
    }

    pub fn renaming(&self) -> Option<WorkspaceId> { self.renaming }

    pub fn reset_prompt(&self) -> Option<&str> { self.reset_prompt.as_deref() }

    /// True iff the prompt is open and the exact token has been typed.
    pub fn purge_enabled(&self) -> bool {
        self.reset_prompt.as_deref() == Some(CONFIRM_PHRASE)
    }

    // --- Workspace store ----------------------------------------------

    pub fn create_workspace(&mut self) -> WorkspaceId {
        self.workspace_serial += 1;
        let id = WorkspaceId::from_serial(self.workspace_serial);
        let title = format!("INSTANCE {}", self.workspaces.len() + 1);
        info!(%id, title, "create workspace");
        self.workspaces.push(Workspace::fresh(id, title));
        self.active = id;
        self.renaming = None;
        id
    }

    pub fn close_workspace(&mut self, id: WorkspaceId) {
        if self.workspaces.len() == 1 {
            debug!(%id, "ignoring close of the last workspace");
            return;
        }
        let Some(index) = self.workspaces.iter().position(|w| w.id == id) else {
            return;
        };
        let removed = self.workspaces.remove(index);
        for window in &removed.windows {
            self.activity.remove(&window.id);
        }
        info!(%id, "closed workspace");
        if self.active == id {
            // Activation falls to whatever is now last in the list.
            self.active = self.workspaces[self.workspaces.len() - 1].id;
        }
    }

    pub fn activate_workspace(&mut self, id: WorkspaceId) {
        if self.workspaces.iter().any(|w| w.id == id) {
            self.active = id;
            // Switching is mutually exclusive with a rename in progress.
            self.renaming = None;
        }
    }

    pub fn begin_rename(&mut self, id: WorkspaceId) {
        if self.workspaces.iter().any(|w| w.id == id) {
            self.renaming = Some(id);
        }
    }

    pub fn rename_workspace(&mut self, id: WorkspaceId, title: String) {
        if let Some(ws) = self.workspaces.iter_mut().find(|w| w.id == id) {
            ws.title = title;
        }
        self.renaming = None;
    }

    pub fn cancel_rename(&mut self) { self.renaming = None; }

    pub fn update_active(&mut self, patch: &SettingsPatch) {
        patch.apply(self.active_workspace_mut());
    }

    pub fn toggle_layer(&mut self, layer: FirmamentLayer) {
        let ws = self.active_workspace_mut();
        ws.firmament_layers.toggle(layer.flag());
    }

    // --- Hard reset ----------------------------------------------------

    pub fn begin_hard_reset(&mut self) { self.reset_prompt = Some(String::new()); }

    pub fn set_reset_phrase(&mut self, phrase: &str) {
        if self.reset_prompt.is_some() {
            self.reset_prompt = Some(phrase.to_uppercase());
        }
    }

    pub fn cancel_hard_reset(&mut self) { self.reset_prompt = None; }

    pub fn confirm_hard_reset(&mut self) -> bool {
        let Some(phrase) = self.reset_prompt.clone() else {
            return false;
        };
        let purged = self.hard_reset(self.active_id(), &phrase);
        if purged {
            self.reset_prompt = None;
        }
        purged
    }

    /// Clears the workspace's windows, stacking, viewport, and interaction
    /// defaults. Rejected silently unless `phrase` is the exact token.
    pub fn hard_reset(&mut self, id: WorkspaceId, phrase: &str) -> bool {
        if phrase != CONFIRM_PHRASE {
            return false;
        }
        let Some(ws) = self.workspaces.iter_mut().find(|w| w.id == id) else {
            return false;
        };
        info!(%id, "hard reset");
        for window in &ws.windows {
            self.activity.remove(&window.id);
        }
        ws.windows.clear();
        ws.active_window = None;
        ws.top_z = BASE_Z;
        ws.viewport = Viewport::default();
        ws.interaction_mode = InteractionMode::Canvas;
        ws.firmament_locked = true;
        ws.show_stars = true;
        ws.auto_rotate = true;
        ws.auto_rotate_speed = 0.2;
        true
    }

    // --- Window collection ---------------------------------------------

    pub fn open_window(&mut self, code: &str, now: Instant) -> EventResponse {
        let mut response = EventResponse::default();
        let ws_index = self.active_index();
        if code == IDE_CODE && self.workspaces[ws_index].ide_open_mode == IdeOpenMode::Tab {
            debug!("routing IDE to an external tab");
            response.open_external = Some("/ide".to_string());
            return response;
        }

        let title = registry::find(code).map(|d| d.name.to_string()).unwrap_or_else(|| code.to_string());
        let width = self.settings.default_window_width;
        let height = self.settings.default_window_height;
        let center = self.screen.center();
        self.window_serial += 1;
        let id = WindowId::from_serial(self.window_serial);

        let ws = &mut self.workspaces[ws_index];
        let stagger = self.settings.open_stagger_px * ws.windows.len() as f64;
        let z = ws.next_z();
        let window = Window {
            id,
            code: code.to_string(),
            title,
            x: center.x - width / 2.0 + stagger,
            y: center.y - height / 2.0 + stagger,
            width: Extent::Px(width),
            height: Extent::Px(height),
            z,
            pinned: false,
            fullscreen: false,
            restore: None,
        };
        info!(%id, code, z, "open window");
        ws.windows.push(window);
        ws.active_window = Some(id);
        self.activity.insert(id, now);
        response.opened = Some(id);
        response
    }

    pub fn close_window(&mut self, id: WindowId) {
        let ws = self.active_workspace_mut();
        let before = ws.windows.len();
        ws.windows.retain(|w| w.id != id);
        if ws.windows.len() == before {
            return;
        }
        info!(%id, "closed window");
        if ws.active_window == Some(id) {
            // No auto-promotion of another window.
            ws.active_window = None;
        }
        self.activity.remove(&id);
    }

    pub fn focus_window(&mut self, id: WindowId) {
        let ws = self.active_workspace_mut();
        if ws.window(id).is_none() {
            return;
        }
        let z = ws.next_z();
        if let Some(window) = ws.window_mut(id) {
            window.z = z;
        }
        ws.active_window = Some(id);
    }

    pub fn move_window(&mut self, id: WindowId, x: f64, y: f64) {
        if let Some(window) = self.active_workspace_mut().window_mut(id) {
            window.x = x;
            window.y = y;
        }
    }

    pub fn toggle_pin(&mut self, id: WindowId) {
        if let Some(window) = self.active_workspace_mut().window_mut(id) {
            // Position is deliberately untouched: under a transformed
            // viewport the window jumps on screen. See DESIGN.md.
            window.pinned = !window.pinned;
        }
    }

    pub fn toggle_fullscreen(&mut self, id: WindowId, now: Instant) {
        let index = self.active_index();
        let Some(window) = self.workspaces[index].window_mut(id) else {
            return;
        };
        if window.fullscreen {
            Self::exit_fullscreen(window);
        } else {
            window.restore = Some(RestoreState {
                x: window.x,
                y: window.y,
                width: window.width,
                height: window.height,
                pinned: window.pinned,
                z: window.z,
            });
            window.fullscreen = true;
            window.x = 0.0;
            window.y = 0.0;
            window.width = Extent::Fill;
            window.height = Extent::Fill;
            // Fullscreen must cover the whole screen regardless of the
            // viewport, so the window is forced to float.
            window.pinned = false;
            window.z = FULLSCREEN_Z;
            self.activity.insert(id, now);
        }
    }

    fn exit_fullscreen(window: &mut Window) {
        let Some(restore) = window.restore.take() else {
            warn!(id = %window.id, "fullscreen window without a restore snapshot");
            window.fullscreen = false;
            return;
        };
        window.fullscreen = false;
        window.x = restore.x;
        window.y = restore.y;
        window.width = restore.width;
        window.height = restore.height;
        window.pinned = restore.pinned;
        window.z = restore.z;
    }

    pub fn record_activity(&mut self, id: WindowId, now: Instant) {
        if self.active_workspace().window(id).is_some() {
            self.activity.insert(id, now);
        }
    }

    /// Restores every fullscreen window of the active workspace whose last
    /// activity is older than the idle timeout. Returns the restored ids.
    pub fn sweep_idle(&mut self, now: Instant) -> Vec<WindowId> {
        let timeout = self.settings.idle_timeout();
        let index = self.active_index();
        let mut restored = Vec::new();
        for window in &mut self.workspaces[index].windows {
            if !window.fullscreen {
                continue;
            }
            let idle = match self.activity.get(&window.id) {
                // tokio's duration_since saturates to zero for stamps in
                // the future.
                Some(stamp) => now.duration_since(*stamp) > timeout,
                None => false,
            };
            if idle {
                info!(id = %window.id, "idle timeout, restoring fullscreen window");
                Self::exit_fullscreen(window);
                restored.push(window.id);
            }
        }
        restored
    }

    // --- Viewport ------------------------------------------------------

    pub fn zoom_viewport(&mut self, delta_y: f64) {
        let center = self.screen.center();
        let index = self.active_index();
        if self.workspaces[index].interaction_mode == InteractionMode::Window {
            return;
        }
        let viewport = self.workspaces[index].viewport;
        self.workspaces[index].viewport =
            zoom_about_center(viewport, delta_y, center, &self.settings);
    }

    pub fn set_viewport_pan(&mut self, x: f64, y: f64) {
        let ws = self.active_workspace_mut();
        ws.viewport.x = x;
        ws.viewport.y = y;
    }

    // --- Command dispatch ----------------------------------------------

    pub fn handle_command(&mut self, command: CanvasCommand, now: Instant) -> EventResponse {
        debug!(?command, "canvas command");
        match command {
            CanvasCommand::CreateWorkspace => {
                self.create_workspace();
            }
            CanvasCommand::CloseWorkspace(id) => self.close_workspace(id),
            CanvasCommand::ActivateWorkspace(id) => self.activate_workspace(id),
            CanvasCommand::BeginRename(id) => self.begin_rename(id),
            CanvasCommand::Rename { workspace, title } => self.rename_workspace(workspace, title),
            CanvasCommand::CancelRename => self.cancel_rename(),
            CanvasCommand::UpdateSettings(patch) => self.update_active(&patch),
            CanvasCommand::ToggleLayer(layer) => self.toggle_layer(layer),
            CanvasCommand::BeginHardReset => self.begin_hard_reset(),
            CanvasCommand::SetResetPhrase(phrase) => self.set_reset_phrase(&phrase),
            CanvasCommand::CancelHardReset => self.cancel_hard_reset(),
            CanvasCommand::ConfirmHardReset => {
                self.confirm_hard_reset();
            }
            CanvasCommand::OpenWindow { code } => return self.open_window(&code, now),
            CanvasCommand::CloseWindow(id) => self.close_window(id),
            CanvasCommand::FocusWindow(id) => self.focus_window(id),
            CanvasCommand::MoveWindow { window, x, y } => self.move_window(window, x, y),
            CanvasCommand::TogglePin(id) => self.toggle_pin(id),
            CanvasCommand::ToggleFullscreen(id) => self.toggle_fullscreen(id, now),
            CanvasCommand::RecordActivity(id) => self.record_activity(id, now),
            CanvasCommand::PopOutProject(id) => return self.pop_out_project(id),
            CanvasCommand::Zoom { delta_y } => self.zoom_viewport(delta_y),
            CanvasCommand::PanTo { x, y } => self.set_viewport_pan(x, y),
        }
        EventResponse::default()
    }

    fn pop_out_project(&mut self, id: WindowId) -> EventResponse {
        let mut response = EventResponse::default();
        if let Some(window) = self.active_workspace().window(id) {
            if matches!(registry::resolve(&window.code), ContentView::Project(_)) {
                response.open_external = Some(format!("/ide?project={}", window.code));
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::workspace::TabFilter;

    fn engine() -> CanvasEngine { CanvasEngine::new(CanvasSettings::default()) }

    fn open(engine: &mut CanvasEngine, code: &str, now: Instant) -> WindowId {
        engine.open_window(code, now).opened.expect("window should open")
    }

    #[test]
    fn starts_with_one_main_instance() {
        let engine = engine();
        assert_eq!(engine.workspaces().len(), 1);
        assert_eq!(engine.active_workspace().title, "MAIN INSTANCE");
        assert_eq!(engine.active_workspace().top_z, BASE_Z);
    }

    #[test]
    fn first_window_is_centered_above_base_z() {
        let mut engine = engine();
        let now = Instant::now();
        let id = open(&mut engine, "GGP", now);

        let ws = engine.active_workspace();
        let window = ws.window(id).unwrap();
        assert_eq!(window.z, 101);
        assert_eq!((window.x, window.y), (560.0, 240.0));
        assert_eq!(window.title, "Governance Graph Processor");
        assert_eq!(ws.active_window, Some(id));
    }

    #[test]
    fn second_window_staggers_and_refocus_restacks() {
        let mut engine = engine();
        let now = Instant::now();
        let foo = open(&mut engine, "GGP", now);
        let bar = open(&mut engine, "SIG", now);

        {
            let ws = engine.active_workspace();
            assert_eq!((ws.window(bar).unwrap().x, ws.window(bar).unwrap().y), (580.0, 260.0));
            assert!(ws.window(bar).unwrap().z > ws.window(foo).unwrap().z);
        }

        engine.focus_window(foo);
        let ws = engine.active_workspace();
        assert!(ws.window(foo).unwrap().z > ws.window(bar).unwrap().z);
        assert_eq!(ws.active_window, Some(foo));
    }

    #[test]
    fn most_recently_focused_has_strictly_highest_z() {
        let mut engine = engine();
        let now = Instant::now();
        let a = open(&mut engine, "GGP", now);
        let b = open(&mut engine, "SIG", now);
        let c = open(&mut engine, "MUX", now);

        for id in [a, c, b, a, c] {
            engine.focus_window(id);
            let ws = engine.active_workspace();
            let top = ws.window(id).unwrap().z;
            assert!(ws.windows.iter().filter(|w| w.id != id).all(|w| w.z < top));
        }
    }

    #[test]
    fn closing_the_active_window_clears_activation() {
        let mut engine = engine();
        let now = Instant::now();
        let a = open(&mut engine, "GGP", now);
        let b = open(&mut engine, "SIG", now);

        engine.close_window(b);
        let ws = engine.active_workspace();
        assert_eq!(ws.active_window, None);
        assert!(ws.window(a).is_some());
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut engine = engine();
        let now = Instant::now();
        let id = open(&mut engine, "GGP", now);
        let bogus = WindowId::from_serial(999);

        engine.close_window(bogus);
        engine.focus_window(bogus);
        engine.move_window(bogus, 5.0, 5.0);
        engine.toggle_pin(bogus);
        engine.toggle_fullscreen(bogus, now);
        engine.close_workspace(WorkspaceId::from_serial(999));

        let ws = engine.active_workspace();
        assert_eq!(ws.windows.len(), 1);
        assert_eq!(ws.active_window, Some(id));
    }

    #[test]
    fn last_workspace_cannot_be_closed() {
        let mut engine = engine();
        let only = engine.active_id();
        engine.close_workspace(only);
        assert_eq!(engine.workspaces().len(), 1);
        assert_eq!(engine.active_id(), only);
    }

    #[test]
    fn closing_the_active_workspace_activates_the_last_remaining() {
        let mut engine = engine();
        let first = engine.active_id();
        let second = engine.create_workspace();
        let third = engine.create_workspace();
        assert_eq!(engine.active_id(), third);

        engine.close_workspace(third);
        assert_eq!(engine.active_id(), second);

        engine.activate_workspace(first);
        engine.close_workspace(second);
        // Closing an inactive workspace never steals activation.
        assert_eq!(engine.active_id(), first);
    }

    #[test]
    fn switching_workspaces_cancels_a_rename_in_progress() {
        let mut engine = engine();
        let first = engine.active_id();
        let second = engine.create_workspace();

        engine.begin_rename(second);
        assert_eq!(engine.renaming(), Some(second));
        engine.activate_workspace(first);
        assert_eq!(engine.renaming(), None);

        engine.begin_rename(first);
        engine.rename_workspace(first, "OPS".to_string());
        assert_eq!(engine.renaming(), None);
        assert_eq!(engine.active_workspace().title, "OPS");
    }

    #[test]
    fn update_active_touches_only_the_active_workspace() {
        let mut engine = engine();
        let first = engine.active_id();
        engine.create_workspace();

        engine.update_active(&SettingsPatch {
            show_stars: Some(false),
            filter: Some(TabFilter::Engine),
            ..Default::default()
        });
        assert!(!engine.active_workspace().show_stars);
        assert_eq!(engine.active_workspace().filter, TabFilter::Engine);

        let other = engine.workspaces().iter().find(|w| w.id == first).unwrap();
        assert!(other.show_stars);
        assert_eq!(other.filter, TabFilter::All);
    }

    #[test]
    fn partial_confirmation_leaves_the_purge_disabled() {
        let mut engine = engine();
        let now = Instant::now();
        open(&mut engine, "GGP", now);

        engine.begin_hard_reset();
        engine.set_reset_phrase("CONF");
        assert!(!engine.purge_enabled());
        assert!(!engine.confirm_hard_reset());
        assert_eq!(engine.active_workspace().windows.len(), 1);

        engine.set_reset_phrase("CONFIRM");
        assert!(engine.purge_enabled());
        assert!(engine.confirm_hard_reset());
        assert_eq!(engine.active_workspace().windows.len(), 0);
        assert_eq!(engine.reset_prompt(), None);
    }

    #[test]
    fn hard_reset_clears_only_the_target_workspace() {
        let mut engine = engine();
        let now = Instant::now();
        let first = engine.active_id();
        open(&mut engine, "GGP", now);

        let second = engine.create_workspace();
        open(&mut engine, "SIG", now);
        engine.update_active(&SettingsPatch {
            show_stars: Some(false),
            filter: Some(TabFilter::Project),
            ..Default::default()
        });
        engine.zoom_viewport(-100.0);

        assert!(engine.hard_reset(second, CONFIRM_PHRASE));

        let ws = engine.active_workspace();
        assert_eq!(ws.windows.len(), 0);
        assert_eq!(ws.active_window, None);
        assert_eq!(ws.top_z, BASE_Z);
        assert_eq!(ws.viewport, Viewport::default());
        assert!(ws.show_stars);
        // Facet and dock preferences survive a purge.
        assert_eq!(ws.filter, TabFilter::Project);

        let other = engine.workspaces().iter().find(|w| w.id == first).unwrap();
        assert_eq!(other.windows.len(), 1);
    }

    #[test]
    fn fullscreen_round_trip_restores_every_field() {
        let mut engine = engine();
        let now = Instant::now();
        let id = open(&mut engine, "GGP", now);
        engine.move_window(id, 123.0, 456.0);
        engine.toggle_pin(id);
        let before = engine.active_workspace().window(id).unwrap().clone();

        engine.toggle_fullscreen(id, now);
        {
            let window = engine.active_workspace().window(id).unwrap();
            assert!(window.fullscreen);
            assert!(window.restore.is_some());
            assert_eq!((window.x, window.y), (0.0, 0.0));
            assert_eq!(window.width, Extent::Fill);
            assert_eq!(window.height, Extent::Fill);
            assert!(!window.pinned);
            assert_eq!(window.z, FULLSCREEN_Z);
        }

        engine.toggle_fullscreen(id, now);
        let window = engine.active_workspace().window(id).unwrap();
        assert!(!window.fullscreen);
        assert_eq!(window.restore, None);
        assert_eq!(window, &before);
    }

    #[test]
    fn fullscreen_flag_and_snapshot_stay_in_lockstep() {
        let mut engine = engine();
        let now = Instant::now();
        let id = open(&mut engine, "GGP", now);

        for _ in 0..5 {
            engine.toggle_fullscreen(id, now);
            let window = engine.active_workspace().window(id).unwrap();
            assert_eq!(window.fullscreen, window.restore.is_some());
        }
    }

    #[test_log::test]
    fn idle_sweep_restores_after_the_timeout() {
        let mut engine = engine();
        let t0 = Instant::now();
        let id = open(&mut engine, "GGP", t0);
        engine.move_window(id, 100.0, 200.0);
        engine.toggle_fullscreen(id, t0);

        assert_eq!(engine.sweep_idle(t0 + Duration::from_secs(5)), vec![]);
        assert!(engine.active_workspace().window(id).unwrap().fullscreen);

        assert_eq!(engine.sweep_idle(t0 + Duration::from_secs(11)), vec![id]);
        let window = engine.active_workspace().window(id).unwrap();
        assert!(!window.fullscreen);
        assert_eq!((window.x, window.y), (100.0, 200.0));
        assert_eq!(window.restore, None);
    }

    #[test_log::test]
    fn activity_defers_the_idle_sweep() {
        let mut engine = engine();
        let t0 = Instant::now();
        let id = open(&mut engine, "GGP", t0);
        engine.toggle_fullscreen(id, t0);

        engine.record_activity(id, t0 + Duration::from_secs(8));
        assert_eq!(engine.sweep_idle(t0 + Duration::from_secs(11)), vec![]);
        assert!(engine.active_workspace().window(id).unwrap().fullscreen);

        assert_eq!(engine.sweep_idle(t0 + Duration::from_secs(19)), vec![id]);
    }

    #[test]
    fn sweep_skips_background_workspaces() {
        let mut engine = engine();
        let t0 = Instant::now();
        let id = open(&mut engine, "GGP", t0);
        engine.toggle_fullscreen(id, t0);

        engine.create_workspace();
        assert_eq!(engine.sweep_idle(t0 + Duration::from_secs(60)), vec![]);

        // Back in its own workspace the window is restored on the next tick.
        engine.activate_workspace(WorkspaceId::from_serial(1));
        assert_eq!(engine.sweep_idle(t0 + Duration::from_secs(60)), vec![id]);
    }

    #[test]
    fn ide_opens_externally_in_tab_mode() {
        let mut engine = engine();
        let now = Instant::now();

        let response = engine.open_window(IDE_CODE, now);
        assert_eq!(response.open_external.as_deref(), Some("/ide"));
        assert_eq!(response.opened, None);
        assert_eq!(engine.active_workspace().windows.len(), 0);

        engine.update_active(&SettingsPatch {
            ide_open_mode: Some(IdeOpenMode::Window),
            ..Default::default()
        });
        let response = engine.open_window(IDE_CODE, now);
        assert_eq!(response.open_external, None);
        assert!(response.opened.is_some());
        assert_eq!(engine.active_workspace().windows.len(), 1);
    }

    #[test]
    fn projects_pop_out_into_the_ide() {
        let mut engine = engine();
        let now = Instant::now();
        let project = open(&mut engine, "FRK", now);
        let system = open(&mut engine, "SIG", now);

        let response = engine.handle_command(CanvasCommand::PopOutProject(project), now);
        assert_eq!(response.open_external.as_deref(), Some("/ide?project=FRK"));

        let response = engine.handle_command(CanvasCommand::PopOutProject(system), now);
        assert_eq!(response.open_external, None);
    }

    #[test]
    fn unknown_codes_open_with_the_code_as_title() {
        let mut engine = engine();
        let now = Instant::now();
        let id = open(&mut engine, "XYZ", now);
        assert_eq!(engine.active_workspace().window(id).unwrap().title, "XYZ");
    }

    #[test]
    fn zoom_is_rejected_in_window_mode() {
        let mut engine = engine();
        engine.update_active(&SettingsPatch {
            interaction_mode: Some(InteractionMode::Window),
            ..Default::default()
        });
        engine.zoom_viewport(-100.0);
        assert_eq!(engine.active_workspace().viewport.scale, 1.0);

        engine.update_active(&SettingsPatch {
            interaction_mode: Some(InteractionMode::Canvas),
            ..Default::default()
        });
        engine.zoom_viewport(-100.0);
        assert!(engine.active_workspace().viewport.scale > 1.0);
    }

    #[test]
    fn workspace_list_never_empties_and_active_always_resolves() {
        let mut engine = engine();
        for _ in 0..4 {
            engine.create_workspace();
        }
        // Close everything closable, in arbitrary order.
        let ids: Vec<_> = engine.workspaces().iter().map(|w| w.id).collect();
        for id in ids {
            engine.close_workspace(id);
            assert!(!engine.workspaces().is_empty());
            let active = engine.active_id();
            assert!(engine.workspaces().iter().any(|w| w.id == active));
        }
        assert_eq!(engine.workspaces().len(), 1);
    }
}
