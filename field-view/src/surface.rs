//! egui-backed drawing surface.
//!
//! [`ShapeSurface`] turns the simulator's draw calls into [`egui::Shape`]s
//! positioned in screen space. The viewer replays them onto the panel's
//! painter every frame. Radial gradients become triangle-fan meshes whose
//! vertex colours the GPU interpolates along each radius.

use field_core::{
    palette::Rgba,
    surface::{RadialGradient, Surface},
};
use glam::Vec2;

/// Rim vertices per gradient disc.
const GRADIENT_SEGMENTS: usize = 24;

/// Converts a straight-alpha [`Rgba`] into an egui colour.
pub fn color32(c: Rgba) -> egui::Color32 {
    let a = (c.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, a)
}

/// Builds a triangle fan around `center` coloured by `gradient` out to `radius`.
pub fn radial_mesh(center: egui::Pos2, radius: f32, gradient: &RadialGradient) -> egui::Mesh {
    use std::f32::consts::TAU;

    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(center, color32(gradient.color_at(0.0)));

    let rim = color32(gradient.color_at(radius));
    for i in 0..GRADIENT_SEGMENTS {
        let t = (i as f32) / (GRADIENT_SEGMENTS as f32) * TAU;
        let offset = egui::vec2(t.cos(), t.sin()) * radius;
        mesh.colored_vertex(center + offset, rim);
    }

    let n = GRADIENT_SEGMENTS as u32;
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    mesh
}

/// Surface that records egui shapes for later painting.
///
/// ### Fields
/// - `origin` - Screen position of the surface's top-left corner.
/// - `size` - Addressable size in points.
/// - `shapes` - Shapes drawn since the last `clear`.
/// - `lines` - Number of link lines among `shapes`.
#[derive(Debug, Default)]
pub struct ShapeSurface {
    origin: egui::Pos2,
    size: Vec2,
    shapes: Vec<egui::Shape>,
    lines: usize,
}

impl ShapeSurface {
    pub fn new(origin: egui::Pos2, size: Vec2) -> Self {
        Self {
            origin,
            size,
            shapes: Vec::new(),
            lines: 0,
        }
    }

    /// Moves the surface on screen; takes effect from the next draw call.
    pub fn set_origin(&mut self, origin: egui::Pos2) {
        self.origin = origin;
    }

    pub fn shapes(&self) -> &[egui::Shape] {
        &self.shapes
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    fn to_screen(&self, p: Vec2) -> egui::Pos2 {
        egui::pos2(self.origin.x + p.x, self.origin.y + p.y)
    }
}

impl Surface for ShapeSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    fn clear(&mut self) {
        self.shapes.clear();
        self.lines = 0;
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, gradient: RadialGradient) {
        let mesh = radial_mesh(self.to_screen(center), radius, &gradient);
        self.shapes.push(egui::Shape::mesh(mesh));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.shapes
            .push(egui::Shape::circle_filled(self.to_screen(center), radius, color32(color)));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let stroke = egui::Stroke::new(width, color32(color));
        self.shapes.push(egui::Shape::line_segment(
            [self.to_screen(from), self.to_screen(to)],
            stroke,
        ));
        self.lines += 1;
    }
}
