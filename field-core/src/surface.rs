//! The drawing surface the simulator renders onto.
//!
//! A [`Surface`] is any 2-D raster target that can report and change its
//! size, clear itself, and fill circles, radial gradients and line
//! segments. Coordinates are surface pixels with the origin in the top-left
//! corner. [`RecordingSurface`] is a headless implementation that only
//! logs the calls it receives.

use crate::palette::Rgba;
use glam::Vec2;

/// Colour ramp from `inner` at the centre to `outer` at `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    pub radius: f32,
    pub inner: Rgba,
    pub outer: Rgba,
}

impl RadialGradient {
    /// Colour at `distance` from the centre, clamped to the ramp.
    pub fn color_at(&self, distance: f32) -> Rgba {
        let t = if self.radius > 0.0 {
            (distance / self.radius).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba {
            r: lerp(self.inner.r, self.outer.r),
            g: lerp(self.inner.g, self.outer.g),
            b: lerp(self.inner.b, self.outer.b),
            a: self.inner.a + (self.outer.a - self.inner.a) * t,
        }
    }
}

pub trait Surface {
    /// Current addressable size in pixels.
    fn size(&self) -> Vec2;

    fn resize(&mut self, size: Vec2);

    /// Erases everything drawn so far.
    fn clear(&mut self);

    /// Fills a disc of `radius` around `center`, coloured by `gradient`.
    ///
    /// The gradient radius is independent of the disc radius, so a disc
    /// may show only the inner part of its ramp.
    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, gradient: RadialGradient);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);

    /// Whether there is anything to draw on.
    fn has_area(&self) -> bool {
        let size = self.size();
        size.x > 0.0 && size.y > 0.0
    }
}

/// One call received by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Gradient {
        center: Vec2,
        radius: f32,
        gradient: RadialGradient,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
}

/// Surface that keeps a log of every call instead of rasterizing.
///
/// `clear` is logged like any other call, so the log spans every tick
/// until [`RecordingSurface::take_commands`] drains it.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear))
            .count()
    }

    /// Number of logged calls that put pixels on the surface.
    pub fn draw_count(&self) -> usize {
        self.commands.len() - self.clear_count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, gradient: RadialGradient) {
        self.commands.push(DrawCommand::Gradient {
            center,
            radius,
            gradient,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_area_requires_both_axes() {
        assert!(RecordingSurface::new(10.0, 10.0).has_area());
        assert!(!RecordingSurface::new(0.0, 10.0).has_area());
        assert!(!RecordingSurface::new(10.0, 0.0).has_area());
        assert!(!RecordingSurface::default().has_area());
    }

    #[test]
    fn gradient_interpolates_alpha_and_clamps() {
        let c = Rgba::rgb(56, 189, 248);
        let g = RadialGradient {
            radius: 4.0,
            inner: c.with_alpha(0.8),
            outer: c.with_alpha(0.0),
        };

        assert_eq!(g.color_at(0.0), c.with_alpha(0.8));
        assert!((g.color_at(2.0).a - 0.4).abs() < 1e-6);
        assert_eq!(g.color_at(10.0), c.with_alpha(0.0));
        assert!(g.color_at(3.0).same_rgb(&c));
    }

    #[test]
    fn recording_counts_calls_by_kind() {
        let mut s = RecordingSurface::new(100.0, 100.0);
        s.clear();
        s.fill_circle(Vec2::ZERO, 1.0, Rgba::rgb(0, 0, 0));
        s.stroke_line(Vec2::ZERO, Vec2::ONE, 0.5, Rgba::rgb(0, 0, 0));
        s.clear();

        assert_eq!(s.clear_count(), 2);
        assert_eq!(s.draw_count(), 2);
        assert_eq!(s.line_count(), 1);

        let taken = s.take_commands();
        assert_eq!(taken.len(), 4);
        assert!(s.commands().is_empty());
    }
}
