//! Desktop host for the particle field built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`Simulator`] driven by
//! egui repaints and implements [`eframe::App`]. The central panel is the
//! host container: its rectangle is the field's surface, and every
//! repaint delivers the pending frame.

use crate::surface::{ShapeSurface, color32};
use eframe::App;
use field_core::{
    config::FieldConfig,
    palette::{Rgba, Theme},
    scheduler::FrameQueue,
    simulator::Simulator,
    surface::Surface,
};
use glam::Vec2;

/// Main application state.
///
/// The typical per-frame update is:
/// 1. Handle top-bar input (run toggle, theme toggle).
/// 2. [`Viewer::sync_field`] reconciles the simulator with the panel:
///    start, stop or resize as needed, then deliver the due frame.
/// 3. Paint the recorded shapes and the veil over them.
///
/// ### Fields
/// - `sim` - The particle field simulator.
/// - `theme` - Theme source of truth; forwarded to `sim` on change.
/// - `want_running` - Whether the field should be animating.
/// - `ticks` - Ticks run since the current start (for display only).
///
/// The status bar is laid out before the central panel, so the numbers it
/// shows are from the previous repaint's [`Viewer::sync_field`]. While the
/// field runs a repaint follows every frame, so it trails by one tick.
pub struct Viewer {
    sim: Simulator<ShapeSurface>,
    theme: Theme,
    want_running: bool,
    ticks: u64,
}

impl Viewer {
    /// Creates a viewer whose field starts on the first painted frame.
    ///
    /// ### Parameters
    /// - `cfg` - Field configuration; `cfg.theme` is the initial theme.
    /// - `seed` - Fixed seed for a reproducible layout, or `None`.
    pub fn new(cfg: FieldConfig, seed: Option<u64>) -> Self {
        let theme = cfg.theme;
        let sim = match seed {
            Some(seed) => Simulator::with_seed(cfg, FrameQueue::new(), seed),
            None => Simulator::new(cfg, FrameQueue::new()),
        };

        Self {
            sim,
            theme,
            want_running: true,
            ticks: 0,
        }
    }

    /// Flips the theme and recolours the running field.
    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.sim.on_theme_change(self.theme);
    }

    /// Brings the simulator in line with the panel `rect` and runs the
    /// due frame.
    ///
    /// Starting is deferred to this point so that particles are laid out
    /// over the real panel size rather than an empty one.
    ///
    /// ### Returns
    /// The number of ticks run (0 or 1).
    fn sync_field(&mut self, rect: egui::Rect) -> usize {
        let size = Vec2::new(rect.width(), rect.height());

        match (self.want_running, self.sim.is_running()) {
            (true, false) => {
                let surface = ShapeSurface::new(rect.min, size);
                if self.sim.start(surface, self.theme).is_ok() {
                    self.ticks = 0;
                }
            }
            (false, true) => {
                self.sim.stop();
            }
            _ => {}
        }

        let resized = match self.sim.surface_mut() {
            Some(surface) => {
                surface.set_origin(rect.min);
                surface.size() != size
            }
            None => false,
        };
        if resized {
            self.sim.on_resize(size.x, size.y);
        }

        let ran = self.sim.pump();
        self.ticks += ran as u64;
        ran
    }

    /// Builds the top panel (run toggle, theme toggle).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let run_label = if self.want_running { "⏸ Pause" } else { "▶ Run" };
                if ui.button(run_label).clicked() {
                    self.want_running = !self.want_running;
                }

                let theme_label = match self.theme {
                    Theme::Dark => "🌙 Dark",
                    Theme::Light => "☀ Light",
                };
                if ui
                    .button(theme_label)
                    .on_hover_text("Toggle theme")
                    .clicked()
                {
                    self.toggle_theme();
                }
            });
        });
    }

    /// Counts shown in the status bar, as of the last `sync_field`.
    fn field_stats(&self) -> FieldStats {
        FieldStats {
            particles: self.sim.particles().map_or(0, |p| p.len()),
            links: self.sim.surface().map_or(0, ShapeSurface::line_count),
            ticks: self.ticks,
        }
    }

    /// Builds the bottom status bar.
    ///
    /// egui needs this panel before the central one, so the counts are
    /// one repaint old (see [`Viewer`]).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let stats = self.field_stats();
            ui.horizontal(|ui| {
                ui.label(format!("{}", self.sim.state()));
                ui.separator();
                ui.label(format!("particles: {}", stats.particles));
                ui.separator();
                ui.label(format!("links: {}", stats.links));
                ui.separator();
                ui.label(format!("tick: {}", stats.ticks));
                ui.separator();
                ui.label(format!("theme: {}", self.theme));
            });
        });
    }

    /// Builds the central panel holding the field.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        let backdrop = color32(self.theme.backdrop());
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(backdrop))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;

                self.sync_field(rect);

                if let Some(surface) = self.sim.surface() {
                    painter.extend(surface.shapes().iter().cloned());
                }
                painter.add(egui::Shape::mesh(veil_mesh(rect, self.theme.backdrop())));

                if self.sim.is_running() {
                    ctx.request_repaint();
                }
            });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FieldStats {
    particles: usize,
    links: usize,
    ticks: u64,
}

/// Vertical wash over the field, from 70% backdrop at the top through
/// 30% in the middle to opaque at the bottom.
fn veil_mesh(rect: egui::Rect, backdrop: Rgba) -> egui::Mesh {
    let stops = [(rect.top(), 0.7), (rect.center().y, 0.3), (rect.bottom(), 1.0)];

    let mut mesh = egui::Mesh::default();
    for (y, alpha) in stops {
        let color = color32(backdrop.with_alpha(alpha));
        mesh.colored_vertex(egui::pos2(rect.left(), y), color);
        mesh.colored_vertex(egui::pos2(rect.right(), y), color);
    }
    for band in 0..2u32 {
        let top = band * 2;
        mesh.add_triangle(top, top + 1, top + 2);
        mesh.add_triangle(top + 1, top + 3, top + 2);
    }
    mesh
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dark = self.theme == Theme::Dark;
        if ctx.style().visuals.dark_mode != dark {
            ctx.set_visuals(if dark {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
        }

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}
