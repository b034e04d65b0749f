//! Real-time particle force-field simulation.
//!
//! Particles interact pairwise through flow, tension and inverse-square terms
//! within a cutoff distance, are integrated with damping and velocity caps,
//! and are kept in check by a configurable boundary policy. Rendering and
//! input belong to the driver; see [`core::Simulator`].

pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;
