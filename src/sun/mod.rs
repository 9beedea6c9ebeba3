//! Solar exposure and shadow-boundary analysis.
//!
//! The pipeline: sun frames are converted into time-ordered direction
//! vectors ([`samples`]), each direction is checked for unobstructed
//! exposure ([`exposure`]) and swept for obstruction boundaries
//! ([`boundary`]), and the resulting records are closed into a triangle
//! fan over the sunlit wedge ([`wedge`]). [`analysis`] orchestrates one
//! run and defers all host-visible output to the mesh sink.

pub mod analysis;
pub mod boundary;
pub mod error;
pub mod exposure;
pub mod result;
pub mod samples;
pub mod wedge;
