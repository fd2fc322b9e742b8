//! The particle field simulator.
//!
//! [`Simulator`] owns everything a running field needs: the particle set,
//! the attached surface, the frame scheduler and the active palette. Its
//! only mutators are [`Simulator::start`], [`Simulator::stop`],
//! [`Simulator::on_resize`], [`Simulator::on_theme_change`] and
//! [`Simulator::on_frame`].
//!
//! Lifecycle:
//!
//! ```text
//! Stopped --start--> Running --stop--> Stopped
//! ```
//!
//! Both transitions are no-ops when already in the target state. While
//! running, exactly one frame is pending at any time; delivering it runs
//! one tick and schedules the next.

use crate::{
    config::FieldConfig,
    palette::{Palette, Theme},
    particle::ParticleSet,
    phases,
    scheduler::{FrameQueue, FrameScheduler, FrameToken},
    surface::Surface,
};
use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};
use std::fmt;

/// Lifecycle state of a [`Simulator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Stopped => write!(f, "Stopped"),
            RunState::Running => write!(f, "Running"),
        }
    }
}

/// State that exists only between `start` and `stop`.
#[derive(Debug)]
struct Session<S> {
    surface: S,
    particles: ParticleSet,
    pending: Option<FrameToken>,
}

/// Continuous simulation of floating, interconnected particles.
///
/// ### Fields
/// - `cfg` - Particle count, link and wrap tunables.
/// - `scheduler` - Source of frame tokens; owned so that cancellation
///   happens in the same place as scheduling.
/// - `rng` - Randomness for creating particles on `start`.
/// - `theme` / `palette` - Active colour scheme, kept across restarts.
/// - `session` - Present only while running.
/// - `positions` - Rendered-position scratch buffer reused every tick.
#[derive(Debug)]
pub struct Simulator<S, Q = FrameQueue> {
    cfg: FieldConfig,
    scheduler: Q,
    rng: StdRng,
    theme: Theme,
    palette: Palette,
    session: Option<Session<S>>,
    positions: Vec<Vec2>,
}

impl<S: Surface, Q: FrameScheduler> Simulator<S, Q> {
    /// Creates a stopped simulator seeded from the operating system.
    pub fn new(cfg: FieldConfig, scheduler: Q) -> Self {
        Self::with_rng(cfg, scheduler, StdRng::from_os_rng())
    }

    /// Creates a stopped simulator with a reproducible particle layout.
    pub fn with_seed(cfg: FieldConfig, scheduler: Q, seed: u64) -> Self {
        Self::with_rng(cfg, scheduler, StdRng::seed_from_u64(seed))
    }

    fn with_rng(cfg: FieldConfig, scheduler: Q, rng: StdRng) -> Self {
        let theme = cfg.theme;
        let positions = Vec::with_capacity(cfg.particle_count);
        Self {
            cfg,
            scheduler,
            rng,
            theme,
            palette: theme.palette(),
            session: None,
            positions,
        }
    }

    pub fn state(&self) -> RunState {
        if self.session.is_some() {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.cfg
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn particles(&self) -> Option<&ParticleSet> {
        self.session.as_ref().map(|s| &s.particles)
    }

    /// Rendered positions from the most recent tick.
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn surface(&self) -> Option<&S> {
        self.session.as_ref().map(|s| &s.surface)
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.session.as_mut().map(|s| &mut s.surface)
    }

    pub fn scheduler(&self) -> &Q {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Q {
        &mut self.scheduler
    }

    /// The frame the running loop is waiting for.
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.session.as_ref().and_then(|s| s.pending)
    }

    /// Starts the loop on `surface` with `theme`'s palette.
    ///
    /// A fresh particle set is laid out over the surface's current size
    /// and the first frame is scheduled.
    ///
    /// Layout happens only here. On a zero-area surface every anchor lands
    /// at the origin, and a later [`on_resize`](Self::on_resize) does not
    /// spread them out again; start once the surface has its real size.
    ///
    /// ### Returns
    /// - `Ok(())` if the simulator was stopped and is now running.
    /// - `Err(surface)` handing the surface back untouched if it was
    ///   already running; nothing is scheduled in that case.
    pub fn start(&mut self, surface: S, theme: Theme) -> Result<(), S> {
        if self.session.is_some() {
            tracing::debug!("start ignored: particle field already running");
            return Err(surface);
        }

        self.theme = theme;
        self.palette = theme.palette();

        let size = surface.size();
        let particles =
            ParticleSet::random_in_viewport(self.cfg.particle_count, size, &self.cfg, &mut self.rng);
        let pending = Some(self.scheduler.schedule());

        tracing::debug!(
            particles = particles.len(),
            width = size.x,
            height = size.y,
            %theme,
            "particle field started"
        );

        self.positions.clear();
        self.session = Some(Session {
            surface,
            particles,
            pending,
        });
        Ok(())
    }

    /// Stops the loop and hands the surface back.
    ///
    /// The pending frame is cancelled and the particles are dropped. A
    /// token delivered after this call is ignored, so no drawing can
    /// happen once `stop` returns.
    ///
    /// ### Returns
    /// The surface passed to `start`, or `None` if already stopped.
    pub fn stop(&mut self) -> Option<S> {
        let Some(session) = self.session.take() else {
            tracing::debug!("stop ignored: particle field not running");
            return None;
        };

        if let Some(token) = session.pending {
            self.scheduler.cancel(token);
        }
        self.positions.clear();

        tracing::debug!("particle field stopped");
        Some(session.surface)
    }

    /// Switches palette; particle state is untouched.
    ///
    /// While stopped only the remembered theme changes; `start` always
    /// applies the theme it is given.
    pub fn on_theme_change(&mut self, theme: Theme) {
        if theme == self.theme {
            return;
        }
        tracing::info!(from = %self.theme, to = %theme, "particle field theme changed");
        self.theme = theme;
        self.palette = theme.palette();
    }

    /// Resizes the attached surface; particle state is untouched.
    ///
    /// Negative extents are treated as zero. A no-op while stopped.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(width, height, "resize ignored: particle field not running");
            return;
        };
        session
            .surface
            .resize(Vec2::new(width.max(0.0), height.max(0.0)));
    }

    /// Delivers a scheduled frame.
    ///
    /// Runs one tick if `token` is the pending frame of the running loop,
    /// then schedules the next frame. Stale or cancelled tokens and
    /// tokens arriving while stopped are ignored.
    ///
    /// ### Returns
    /// `true` if the token was accepted and the loop advanced.
    pub fn on_frame(&mut self, token: FrameToken) -> bool {
        let Some(session) = self.session.as_mut() else {
            tracing::trace!(token = token.id(), "frame ignored: particle field stopped");
            return false;
        };
        if session.pending != Some(token) {
            tracing::trace!(token = token.id(), "frame ignored: stale token");
            return false;
        }

        session.pending = None;
        let drawn = phases::tick(
            &mut session.surface,
            &mut session.particles,
            &self.palette,
            &self.cfg,
            &mut self.positions,
        );
        if !drawn {
            tracing::trace!("tick skipped: surface has no area");
        }
        session.pending = Some(self.scheduler.schedule());
        true
    }
}

impl<S: Surface> Simulator<S, FrameQueue> {
    /// Delivers every frame that is due on the built-in queue.
    ///
    /// ### Returns
    /// The number of ticks run, which is at most one per call.
    pub fn pump(&mut self) -> usize {
        let due = self.scheduler.take_due();
        due.into_iter().filter(|&token| self.on_frame(token)).count()
    }
}
