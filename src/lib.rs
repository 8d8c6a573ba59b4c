#![warn(clippy::all)]

mod appearance;
mod catalog;
mod config;
mod engine;
mod grid;
mod loop_controller;
mod pattern;
mod traits;

pub use appearance::{
    apply_appearance_override, radial_density, resolve_appearance, setup_entity_engine,
    OverrideOutcome, Presentation, ResolvedAppearance,
};
pub use catalog::{PatternCategory, PatternKind, MAX_TRANSIENT_PHASE};
pub use config::{AppearanceConfig, AppearanceMode, AppearanceOverride};
pub use engine::GoLEngine;
pub use grid::Grid;
pub use loop_controller::{
    loop_update_fps, update_loop_pattern, LoopState, MAX_LOOP_FPS, MIN_LOOP_FPS,
};
pub use pattern::{stamp_pattern, Pattern, MAX_RLE_CELLS};
pub use traits::CellMask;

pub const VERSION: &str = "0.1.0";
