//! Per-tick phases of the particle field.
//!
//! One tick is:
//! 1. Clear the surface.
//! 2. [`advance_phase`]: advance every particle and collect its
//!    rendered position.
//! 3. [`particle_phase`]: draw each particle as a glowing disc with a
//!    solid core.
//! 4. [`link_phase`]: join every pair closer than the link distance
//!    with a translucent line.
//!
//! [`tick`] runs all of them in order.

use crate::{
    config::FieldConfig, links, palette::Palette, particle::ParticleSet, surface::RadialGradient,
    surface::Surface,
};
use glam::Vec2;

/// Advances every particle by one tick and records where it is drawn.
///
/// `positions` is cleared and refilled so that `positions[i]` is the
/// rendered position of particle `i` after the update.
///
/// ### Parameters
/// - `particles` - The particle set; anchors and orbit phases are updated.
/// - `size` - Current surface size, used by the wrap rule.
/// - `margin` - Extra room beyond each edge before a particle wraps.
/// - `positions` - Scratch buffer reused across ticks.
pub fn advance_phase(
    particles: &mut ParticleSet,
    size: Vec2,
    margin: f32,
    positions: &mut Vec<Vec2>,
) {
    positions.clear();
    for p in particles.iter_mut() {
        p.advance(size, margin);
        positions.push(p.rendered_position());
    }
}

/// Draws every particle at its rendered position.
///
/// Each particle becomes a disc of its display radius filled with a
/// gradient from the glow colour to transparent at twice that radius,
/// followed by a solid accent core of half the radius.
pub fn particle_phase<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &ParticleSet,
    positions: &[Vec2],
    palette: &Palette,
) {
    for (p, &pos) in particles.iter().zip(positions) {
        let r = p.display_radius();
        surface.fill_radial_gradient(
            pos,
            r,
            RadialGradient {
                radius: r * 2.0,
                inner: palette.glow,
                outer: palette.glow.with_alpha(0.0),
            },
        );
        surface.fill_circle(pos, r * 0.5, palette.accent);
    }
}

/// Draws a line between every pair of positions closer than
/// `cfg.link_distance`, fading with distance.
///
/// ### Returns
/// The number of lines drawn.
pub fn link_phase<S: Surface + ?Sized>(
    surface: &mut S,
    positions: &[Vec2],
    palette: &Palette,
    cfg: &FieldConfig,
) -> usize {
    let mut drawn = 0;
    for link in links::find_links(positions, cfg.link_distance, cfg.link_opacity) {
        surface.stroke_line(
            positions[link.a],
            positions[link.b],
            cfg.link_width,
            palette.accent.with_alpha(link.opacity),
        );
        drawn += 1;
    }
    drawn
}

/// Runs one full tick against `surface`.
///
/// A surface without area is left alone: nothing is cleared, drawn or
/// advanced.
///
/// ### Returns
/// `true` if the tick ran, `false` if it was skipped.
pub fn tick<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &mut ParticleSet,
    palette: &Palette,
    cfg: &FieldConfig,
    positions: &mut Vec<Vec2>,
) -> bool {
    if !surface.has_area() {
        return false;
    }

    surface.clear();
    advance_phase(particles, surface.size(), cfg.wrap_margin, positions);
    particle_phase(surface, particles, positions, palette);
    link_phase(surface, positions, palette, cfg);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn still(x: f32, y: f32) -> Particle {
        // Zero orbit radius: the rendered position is the anchor itself.
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 0.0, 0.0, 0.0, 2.0)
    }

    #[test]
    fn advance_phase_fills_positions_in_particle_order() {
        let mut set = ParticleSet::from_particles(vec![still(1.0, 2.0), still(3.0, 4.0)]);
        let mut positions = vec![Vec2::splat(99.0)];

        advance_phase(&mut set, Vec2::new(100.0, 100.0), 50.0, &mut positions);

        assert_eq!(positions, vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn particle_phase_draws_gradient_then_core() {
        let set = ParticleSet::from_particles(vec![still(10.0, 10.0)]);
        let positions = [Vec2::new(10.0, 10.0)];
        let palette = Palette::DARK;
        let mut surface = RecordingSurface::new(100.0, 100.0);

        particle_phase(&mut surface, &set, &positions, &palette);

        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::Gradient {
                    center: Vec2::new(10.0, 10.0),
                    radius: 2.0,
                    gradient: RadialGradient {
                        radius: 4.0,
                        inner: palette.glow,
                        outer: palette.glow.with_alpha(0.0),
                    },
                },
                DrawCommand::Circle {
                    center: Vec2::new(10.0, 10.0),
                    radius: 1.0,
                    color: palette.accent,
                },
            ]
        );
    }

    #[test]
    fn link_phase_uses_accent_with_distance_opacity() {
        let positions = [Vec2::new(0.0, 0.0), Vec2::new(75.0, 0.0), Vec2::new(400.0, 0.0)];
        let cfg = FieldConfig::default();
        let palette = Palette::LIGHT;
        let mut surface = RecordingSurface::new(500.0, 500.0);

        let drawn = link_phase(&mut surface, &positions, &palette, &cfg);

        assert_eq!(drawn, 1);
        match &surface.commands()[0] {
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => {
                assert_eq!((*from, *to), (positions[0], positions[1]));
                assert_eq!(*width, 0.5);
                assert!(color.same_rgb(&palette.accent));
                assert!((color.a - 0.2).abs() < 1e-6);
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn tick_clears_first_and_draws_everything() {
        let mut set = ParticleSet::from_particles(vec![still(10.0, 10.0), still(20.0, 10.0)]);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut positions = Vec::new();

        let ran = tick(
            &mut surface,
            &mut set,
            &Palette::DARK,
            &FieldConfig::default(),
            &mut positions,
        );

        assert!(ran);
        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        // Two discs, two cores, one link.
        assert_eq!(surface.draw_count(), 5);
        assert_eq!(surface.line_count(), 1);
    }

    #[test]
    fn tick_on_zero_area_surface_is_skipped() {
        let moving = Particle::new(Vec2::ZERO, Vec2::new(1.0, 1.0), 0.0, 0.1, 10.0, 2.0);
        let mut set = ParticleSet::from_particles(vec![moving]);
        let before = set.clone();
        let mut surface = RecordingSurface::new(0.0, 300.0);
        let mut positions = Vec::new();

        let ran = tick(
            &mut surface,
            &mut set,
            &Palette::DARK,
            &FieldConfig::default(),
            &mut positions,
        );

        assert!(!ran);
        assert!(surface.commands().is_empty());
        assert_eq!(set, before);
    }
}
