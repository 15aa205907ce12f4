//! Read-only state queries answered by the reactor between events.

use std::sync::mpsc::{sync_channel, RecvError, SyncSender};

use crate::actor::reactor::{Event, Reactor, Sender};
use crate::model::server::{DockData, WindowData, WorkspaceData};
use crate::model::window::WindowId;
use crate::render::SceneFrame;

#[derive(Clone)]
pub struct ReactorQueryHandle {
    tx: Sender,
}

impl ReactorQueryHandle {
    pub(super) fn new(tx: Sender) -> Self { Self { tx } }

    fn send_query<T>(
        &self,
        build: impl FnOnce(SyncSender<T>) -> QueryRequest,
    ) -> Result<T, RecvError> {
        let (tx, rx) = sync_channel(1);
        if self.tx.try_send(Event::Query(build(tx))).is_err() {
            return Err(RecvError);
        }
        rx.recv().map_err(|_| RecvError)
    }

    pub fn query_workspaces(&self) -> Vec<WorkspaceData> {
        self.send_query(QueryRequest::Workspaces).unwrap_or_default()
    }

    pub fn query_active_workspace(&self) -> Option<WorkspaceData> {
        self.send_query(QueryRequest::ActiveWorkspace).ok()
    }

    /// Windows of the active workspace.
    pub fn query_windows(&self) -> Vec<WindowData> {
        self.send_query(QueryRequest::Windows).unwrap_or_default()
    }

    pub fn query_active_window_id(&self) -> Option<WindowId> {
        self.send_query(QueryRequest::ActiveWindowId).ok().flatten()
    }

    pub fn query_dock(&self) -> Option<DockData> {
        self.send_query(QueryRequest::Dock).ok()
    }

    pub fn query_scene(&self) -> Option<SceneFrame> {
        self.send_query(QueryRequest::Scene).ok()
    }

    pub fn query_primed_tab(&self) -> Option<String> {
        self.send_query(QueryRequest::PrimedTab).ok().flatten()
    }

    /// The typed phrase while the hard-reset prompt is open.
    pub fn query_reset_prompt(&self) -> Option<String> {
        self.send_query(QueryRequest::ResetPrompt).ok().flatten()
    }

    pub fn query_external_opens(&self) -> Vec<String> {
        self.send_query(QueryRequest::ExternalOpens).unwrap_or_default()
    }
}

#[derive(Debug)]
pub enum QueryRequest {
    Workspaces(SyncSender<Vec<WorkspaceData>>),
    ActiveWorkspace(SyncSender<WorkspaceData>),
    Windows(SyncSender<Vec<WindowData>>),
    ActiveWindowId(SyncSender<Option<WindowId>>),
    Dock(SyncSender<DockData>),
    Scene(SyncSender<SceneFrame>),
    PrimedTab(SyncSender<Option<String>>),
    ResetPrompt(SyncSender<Option<String>>),
    ExternalOpens(SyncSender<Vec<String>>),
}

impl Reactor {
    pub(super) fn answer(&mut self, request: QueryRequest) {
        // A dead receiver means the querying side gave up; nothing to do.
        match request {
            QueryRequest::Workspaces(resp) => {
                let active = self.engine.active_id();
                let data = self
                    .engine
                    .workspaces()
                    .iter()
                    .enumerate()
                    .map(|(index, ws)| WorkspaceData::from_workspace(ws, index, ws.id == active))
                    .collect();
                let _ = resp.send(data);
            }
            QueryRequest::ActiveWorkspace(resp) => {
                let active = self.engine.active_id();
                let index = self
                    .engine
                    .workspaces()
                    .iter()
                    .position(|ws| ws.id == active)
                    .unwrap_or(0);
                let _ = resp.send(WorkspaceData::from_workspace(
                    self.engine.active_workspace(),
                    index,
                    true,
                ));
            }
            QueryRequest::Windows(resp) => {
                let ws = self.engine.active_workspace();
                let data = ws
                    .windows
                    .iter()
                    .map(|w| WindowData::from_window(w, ws.active_window == Some(w.id)))
                    .collect();
                let _ = resp.send(data);
            }
            QueryRequest::ActiveWindowId(resp) => {
                let _ = resp.send(self.engine.active_workspace().active_window);
            }
            QueryRequest::Dock(resp) => {
                let _ = resp.send(self.dock.data());
            }
            QueryRequest::Scene(resp) => {
                let _ = resp.send(SceneFrame::derive(self.engine.active_workspace()));
            }
            QueryRequest::PrimedTab(resp) => {
                let _ = resp.send(self.navigator.primed().map(str::to_string));
            }
            QueryRequest::ResetPrompt(resp) => {
                let _ = resp.send(self.engine.reset_prompt().map(str::to_string));
            }
            QueryRequest::ExternalOpens(resp) => {
                let _ = resp.send(self.external_opens.clone());
            }
        }
    }
}
