use crate::config::FieldConfig;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// A drifting, orbiting point.
///
/// Only `base` and `orbit_angle` change after creation, and only through
/// [`Particle::advance`]; everything else is fixed for the particle's
/// lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    base: Vec2,
    velocity: Vec2,
    orbit_angle: f32,
    angular_speed: f32,
    orbit_radius: f32,
    display_radius: f32,
}

impl Particle {
    pub fn new(
        base: Vec2,
        velocity: Vec2,
        orbit_angle: f32,
        angular_speed: f32,
        orbit_radius: f32,
        display_radius: f32,
    ) -> Self {
        Self {
            base,
            velocity,
            orbit_angle,
            angular_speed,
            orbit_radius,
            display_radius,
        }
    }

    /// Draws a particle anchored somewhere inside a `size` viewport.
    ///
    /// An axis with no extent places every anchor at `0` on that axis.
    pub fn random(size: Vec2, cfg: &FieldConfig, rng: &mut impl Rng) -> Self {
        let base = Vec2::new(uniform_below(size.x, rng), uniform_below(size.y, rng));
        let velocity = Vec2::new(
            rng.random_range(-cfg.drift_speed..=cfg.drift_speed),
            rng.random_range(-cfg.drift_speed..=cfg.drift_speed),
        );

        Self {
            base,
            velocity,
            orbit_angle: rng.random_range(0.0..TAU),
            angular_speed: rng.random_range(-cfg.angular_speed..=cfg.angular_speed),
            orbit_radius: rng.random_range(cfg.orbit_radius[0]..=cfg.orbit_radius[1]),
            display_radius: rng.random_range(cfg.display_radius[0]..=cfg.display_radius[1]),
        }
    }

    pub fn base(&self) -> Vec2 {
        self.base
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }

    pub fn angular_speed(&self) -> f32 {
        self.angular_speed
    }

    pub fn orbit_radius(&self) -> f32 {
        self.orbit_radius
    }

    pub fn display_radius(&self) -> f32 {
        self.display_radius
    }

    /// Where the particle is drawn: the anchor plus its orbit offset.
    pub fn rendered_position(&self) -> Vec2 {
        let (sin, cos) = self.orbit_angle.sin_cos();
        self.base + Vec2::new(sin, cos) * self.orbit_radius
    }

    /// Advances the orbit phase and the drift anchor by one tick.
    ///
    /// The phase is kept in `[0, TAU)`. The anchor is wrapped per axis
    /// into `[-margin, extent + margin]` of the `size` viewport.
    pub fn advance(&mut self, size: Vec2, margin: f32) {
        self.orbit_angle = wrap_angle(self.orbit_angle + self.angular_speed);
        self.base += self.velocity;
        self.base.x = wrap(self.base.x, size.x, margin);
        self.base.y = wrap(self.base.y, size.y, margin);
    }
}

/// Wraps `v` into `[-margin, extent + margin]`.
///
/// Leaving past one side re-enters exactly at the opposite side; values
/// inside the range are returned untouched.
pub fn wrap(v: f32, extent: f32, margin: f32) -> f32 {
    if v < -margin {
        extent + margin
    } else if v > extent + margin {
        -margin
    } else {
        v
    }
}

/// Reduces an angle into `[0, TAU)`.
fn wrap_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid rounds up to TAU for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

fn uniform_below(max: f32, rng: &mut impl Rng) -> f32 {
    if max > 0.0 {
        rng.random_range(0.0..max)
    } else {
        0.0
    }
}

/// The fixed-size particle collection of one running simulation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Creates `count` random particles for a `size` viewport.
    pub fn random_in_viewport(
        count: usize,
        size: Vec2,
        cfg: &FieldConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let particles = (0..count)
            .map(|_| Particle::random(size, cfg, rng))
            .collect();

        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn wrap_moves_past_either_edge_to_the_opposite_one() {
        assert_eq!(wrap(-50.5, 800.0, 50.0), 850.0);
        assert_eq!(wrap(850.5, 800.0, 50.0), -50.0);
        // Exactly on the boundary is still inside.
        assert_eq!(wrap(-50.0, 800.0, 50.0), -50.0);
        assert_eq!(wrap(850.0, 800.0, 50.0), 850.0);
        assert_eq!(wrap(400.0, 800.0, 50.0), 400.0);
    }

    #[test]
    fn rendered_position_adds_orbit_offset() {
        let p = Particle::new(Vec2::new(10.0, 20.0), Vec2::ZERO, 0.0, 0.0, 30.0, 2.0);
        // sin(0) = 0, cos(0) = 1.
        assert_eq!(p.rendered_position(), Vec2::new(10.0, 50.0));

        let p = Particle::new(
            Vec2::ZERO,
            Vec2::ZERO,
            std::f32::consts::FRAC_PI_2,
            0.0,
            10.0,
            2.0,
        );
        let pos = p.rendered_position();
        assert!((pos.x - 10.0).abs() < 1e-5);
        assert!(pos.y.abs() < 1e-5);
    }

    #[test]
    fn advance_moves_anchor_and_phase_only() {
        let mut p = Particle::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(0.25, -0.25),
            1.0,
            0.01,
            40.0,
            3.0,
        );
        p.advance(Vec2::new(800.0, 600.0), 50.0);

        assert_eq!(p.base(), Vec2::new(100.25, 99.75));
        assert!((p.orbit_angle() - 1.01).abs() < 1e-6);
        assert_eq!(p.velocity(), Vec2::new(0.25, -0.25));
        assert_eq!(p.angular_speed(), 0.01);
        assert_eq!(p.orbit_radius(), 40.0);
        assert_eq!(p.display_radius(), 3.0);
    }

    #[test]
    fn orbit_phase_stays_below_a_full_turn() {
        let size = Vec2::new(800.0, 600.0);
        let mut forward = Particle::new(Vec2::ZERO, Vec2::ZERO, TAU - 0.002, 0.004, 30.0, 2.0);
        forward.advance(size, 50.0);
        assert!((0.0..TAU).contains(&forward.orbit_angle()));
        assert!((forward.orbit_angle() - 0.002).abs() < 1e-5);
        forward.advance(size, 50.0);
        assert!((forward.orbit_angle() - 0.006).abs() < 1e-5);

        let mut backward = Particle::new(Vec2::ZERO, Vec2::ZERO, 0.003, -0.004, 30.0, 2.0);
        backward.advance(size, 50.0);
        assert!((0.0..TAU).contains(&backward.orbit_angle()));
        assert!((backward.orbit_angle() - (TAU - 0.001)).abs() < 1e-5);

        // Tiny negative sums must not land on TAU itself.
        let mut edge = Particle::new(Vec2::ZERO, Vec2::ZERO, 0.0, -1e-9, 30.0, 2.0);
        edge.advance(size, 50.0);
        assert!((0.0..TAU).contains(&edge.orbit_angle()));
    }

    #[test]
    fn long_runs_keep_the_orbit_speed() {
        let size = Vec2::new(800.0, 600.0);
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 0.0, 0.004, 30.0, 2.0);
        for _ in 0..1_000_000 {
            p.advance(size, 50.0);
        }
        let before = p.orbit_angle();
        p.advance(size, 50.0);
        let step = (p.orbit_angle() - before).rem_euclid(TAU);

        assert!((0.0..TAU).contains(&p.orbit_angle()));
        assert!((step - 0.004).abs() < 1e-5, "step was {step}");
    }

    #[test]
    fn advance_wraps_the_anchor() {
        let mut p = Particle::new(
            Vec2::new(-49.9, 649.9),
            Vec2::new(-0.2, 0.2),
            0.0,
            0.0,
            20.0,
            1.0,
        );
        p.advance(Vec2::new(800.0, 600.0), 50.0);
        assert_eq!(p.base(), Vec2::new(850.0, -50.0));
    }

    #[test]
    fn random_particles_respect_config_ranges() {
        let cfg = FieldConfig::default();
        let size = Vec2::new(1024.0, 768.0);
        let mut rng = StdRng::seed_from_u64(7);
        let set = ParticleSet::random_in_viewport(500, size, &cfg, &mut rng);

        assert_eq!(set.len(), 500);
        for p in set.iter() {
            assert!((0.0..=size.x).contains(&p.base().x));
            assert!((0.0..=size.y).contains(&p.base().y));
            assert!(p.velocity().x.abs() <= 0.25 && p.velocity().y.abs() <= 0.25);
            assert!(p.angular_speed().abs() <= 0.01);
            assert!((20.0..=70.0).contains(&p.orbit_radius()));
            assert!((1.0..=4.0).contains(&p.display_radius()));
            assert!((0.0..=TAU).contains(&p.orbit_angle()));
        }
    }

    #[test]
    fn random_in_empty_viewport_anchors_at_origin() {
        let cfg = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let set = ParticleSet::random_in_viewport(10, Vec2::ZERO, &cfg, &mut rng);

        assert!(set.iter().all(|p| p.base() == Vec2::ZERO));
    }
}
