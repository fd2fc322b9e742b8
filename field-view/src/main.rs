//! Application entry point for the particle field viewer.
//!
//! This binary parses the command line, installs logging, loads the field
//! configuration and hands everything else to [`Viewer`] from the
//! `viewer` module.

mod surface;
mod viewer;

use clap::Parser;
use field_core::{config::FieldConfig, palette::Theme};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

/// Animated particle field with proximity links.
#[derive(Parser, Debug)]
#[command(name = "particle-field", version, about = "Animated particle field viewer")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "particle-field.toml")]
    config: PathBuf,

    /// Initial theme: light or dark. Overrides the config file.
    #[arg(long)]
    theme: Option<Theme>,

    /// Seed for a reproducible particle layout.
    #[arg(long)]
    seed: Option<u64>,

    /// Particle count. Overrides the config file.
    #[arg(long)]
    count: Option<usize>,
}

/// Starts the native eframe application.
///
/// A missing or broken config file is not fatal: the defaults are used
/// and a warning is logged.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut cfg = match FieldConfig::load(&args.config) {
        Ok(cfg) => {
            tracing::info!("Loaded configuration from {}", args.config.display());
            cfg
        }
        Err(e) => {
            tracing::warn!("{e}. Using defaults.");
            FieldConfig::default()
        }
    };

    if let Some(theme) = args.theme {
        cfg.theme = theme;
    }
    match args.count {
        Some(0) => tracing::warn!("--count must be at least 1, keeping {}", cfg.particle_count),
        Some(count) => cfg.particle_count = count,
        None => {}
    }

    let seed = args.seed;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Particle Field"),
        ..Default::default()
    };

    eframe::run_native(
        "Particle Field",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(cfg, seed)))),
    )
}
