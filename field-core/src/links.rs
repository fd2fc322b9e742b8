//! Proximity links between rendered particle positions.

use crate::types::ParticleId;
use glam::Vec2;

/// A pair of particles close enough to be joined by a line.
///
/// `a < b` always holds, and each unordered pair is reported once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: ParticleId,
    pub b: ParticleId,
    pub distance: f32,
    pub opacity: f32,
}

/// Line opacity for a pair `distance` apart.
///
/// Falls linearly from `peak` at distance `0` to `0` at `max_distance`.
/// The formula is not clamped; callers only evaluate it for linked pairs.
pub fn link_opacity(distance: f32, max_distance: f32, peak: f32) -> f32 {
    (1.0 - distance / max_distance) * peak
}

/// Scans every unordered pair of `positions` and yields those strictly
/// closer than `max_distance`.
///
/// This is a plain O(n²) scan in index order: pair `(i, j)` for `i < j`,
/// `i` ascending then `j` ascending. A pair exactly `max_distance` apart is
/// not linked.
pub fn find_links(
    positions: &[Vec2],
    max_distance: f32,
    peak: f32,
) -> impl Iterator<Item = Link> + '_ {
    positions.iter().enumerate().flat_map(move |(a, &p1)| {
        positions[a + 1..]
            .iter()
            .enumerate()
            .filter_map(move |(offset, &p2)| {
                let distance = p1.distance(p2);
                (distance < max_distance).then(|| Link {
                    a,
                    b: a + 1 + offset,
                    distance,
                    opacity: link_opacity(distance, max_distance, peak),
                })
            })
    })
}
