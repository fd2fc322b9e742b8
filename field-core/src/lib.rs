//! Core 2-D particle field simulation library.
//!
//! Main components:
//! - [`particle`]: particles and the fixed-size particle set.
//! - [`palette`]: light/dark themes and their two-colour palettes.
//! - [`links`]: proximity links between rendered particle positions.
//! - [`surface`]: the drawing surface seam and a recording surface.
//! - [`scheduler`]: cancellable frame scheduling.
//! - [`phases`]: per-tick advance and draw phases.
//! - [`simulator`]: the running/stopped simulator that ties it together.
//! - [`config`]: field configuration loaded from TOML.
//! - [`types`]: shared type aliases and IDs.

pub mod config;
pub mod links;
pub mod palette;
pub mod particle;
pub mod phases;
pub mod scheduler;
pub mod simulator;
pub mod surface;
pub mod types;
