//! Keyboard-driven cyclic selection over the launchable tab list.
//!
//! The primed selection is a pure keyboard cursor: it never follows the
//! mouse, and any raw pointer movement hands control back to hover by
//! clearing it.

use tracing::debug;

use super::engine::CanvasEngine;
use crate::model::registry::{self, EngineDescriptor};

#[derive(Debug, Default)]
pub struct TabNavigator {
    /// Code of the primed tab, if any.
    primed: Option<String>,
    /// Free-text predicate over code/name/description.
    query: String,
}

impl TabNavigator {
    pub fn new() -> TabNavigator { TabNavigator::default() }

    pub fn primed(&self) -> Option<&str> { self.primed.as_deref() }

    pub fn clear_primed(&mut self) { self.primed = None; }

    pub fn query(&self) -> &str { &self.query }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        // A narrowed list could leave the highlight on a hidden item.
        self.primed = None;
    }

    /// The tab list under the active workspace's facet and the free-text
    /// query, in registry order.
    pub fn visible(&self, engine: &CanvasEngine) -> Vec<&'static EngineDescriptor> {
        let filter = engine.active_workspace().filter;
        registry::tabs()
            .iter()
            .filter(|tab| filter.admits(tab.kind) && tab.matches_query(&self.query))
            .collect()
    }

    /// Where cycling starts: the primed tab when it is still visible, else
    /// the active window's code, else the head of the list.
    fn seed_index(
        &self,
        engine: &CanvasEngine,
        visible: &[&'static EngineDescriptor],
    ) -> Option<usize> {
        if let Some(code) = self.primed.as_deref() {
            if let Some(index) = visible.iter().position(|t| t.code == code) {
                return Some(index);
            }
        }
        if let Some(window) = engine.active_workspace().active_window_record() {
            if let Some(index) = visible.iter().position(|t| t.code == window.code) {
                return Some(index);
            }
        }
        if visible.is_empty() { None } else { Some(0) }
    }

    pub fn next(&mut self, engine: &CanvasEngine) { self.step(engine, 1); }

    pub fn prev(&mut self, engine: &CanvasEngine) { self.step(engine, -1); }

    fn step(&mut self, engine: &CanvasEngine, delta: isize) {
        let visible = self.visible(engine);
        let Some(index) = self.seed_index(engine, &visible) else {
            return;
        };
        let len = visible.len() as isize;
        let next = (index as isize + delta).rem_euclid(len) as usize;
        debug!(code = visible[next].code, "primed tab");
        self.primed = Some(visible[next].code.to_string());
    }

    /// The code to open for Enter, clearing the primed selection.
    pub fn confirm(&mut self, engine: &CanvasEngine) -> Option<String> {
        let visible = self.visible(engine);
        let index = self.seed_index(engine, &visible)?;
        let code = visible[index].code.to_string();
        self.primed = None;
        Some(code)
    }
}
