/// Identifier for a particle in a [`crate::particle::ParticleSet`].
///
/// This is an index into the set, and is only meaningful for the
/// lifetime of a given running simulation.
pub type ParticleId = usize;
