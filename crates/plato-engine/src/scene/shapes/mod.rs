//! Per-command payloads and their `DrawList` push helpers.

pub mod line;
pub mod mesh;
