//! Multi-workspace canvas window manager: a pure state engine wrapped in
//! an event-loop actor, with input translation, presentation math, and one
//! piece of durable state (the dock position).

pub mod actor;
pub mod canvas;
pub mod common;
pub mod model;
pub mod render;
pub mod ui;
