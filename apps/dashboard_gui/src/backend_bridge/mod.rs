//! Bridge between the egui thread and the async store worker.

pub mod commands;
pub mod runtime;
