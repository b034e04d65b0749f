use crate::core::config::SimConfig;
use crate::core::particle::{Particle, DIM};

/// Damped explicit Euler step with unit time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    pub damping: f64,
    pub max_velocity: Option<f64>,
}

impl Integrator {
    pub fn new(damping: f64, max_velocity: Option<f64>) -> Self {
        Self {
            damping,
            max_velocity,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.damping, config.max_velocity)
    }

    /// Advance `p` by one tick under `force` and return its position before the move.
    ///
    /// Mass is validated positive at construction, so the division is safe.
    pub fn advance(&self, p: &mut Particle, force: [f64; DIM]) -> [f64; DIM] {
        let before = p.r;
        for k in 0..DIM {
            p.a[k] = force[k] / p.mass;
            p.v[k] += p.a[k];
            p.v[k] *= self.damping;
            if let Some(cap) = self.max_velocity {
                p.v[k] = p.v[k].clamp(-cap, cap);
            }
            p.r[k] += p.v[k];
        }
        p.a = [0.0; DIM];
        before
    }
}
