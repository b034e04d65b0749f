#![allow(missing_docs)] // Public items in submodules carry their own docs

//! Simulation core: particle model, force law, integrator, boundary policy
//! and the `Simulator` that drives them once per tick.

pub mod boundary;
pub mod config;
pub mod event;
pub mod force;
pub mod integrator;
pub mod particle;
pub mod sim;

pub use boundary::BoundaryPolicy;
pub use config::{BoundaryMode, InsertVelocity, Rect, SimConfig};
pub use event::{BoundaryEvent, BoundaryEventKind};
pub use force::ForceModel;
pub use integrator::Integrator;
pub use particle::{Kind, KindProperties, KindTable, Particle};
pub use sim::Simulator;
