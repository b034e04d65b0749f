//! Pairwise force law.
//!
//! Three scalar terms act along the unit separation `P` pointing from the
//! target toward the other particle:
//!
//! - flow: `K_flow * (ρPD_t * (|v_t| - P·v_t) - ρND_o * (|v_o| - P·v_o))`
//! - tension: `K_tension * (ρPD_t - ρND_o)`
//! - inverse-square: `q_t * q_o / d²`, like charges pushing the target away
//!
//! The flow and tension terms read the target's ρPD and the other's ρND, so
//! the force on `i` from `j` is generally not the negation of the force on
//! `j` from `i`.

use crate::core::config::SimConfig;
use crate::core::particle::{Particle, DIM};

/// Evaluates the force law with a fixed set of coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    pub cutoff: f64,
    pub k_flow: f64,
    pub k_tension: f64,
}

impl ForceModel {
    pub fn new(cutoff: f64, k_flow: f64, k_tension: f64) -> Self {
        Self {
            cutoff,
            k_flow,
            k_tension,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.cutoff, config.k_flow, config.k_tension)
    }

    /// Force exerted on `target` by `other`.
    ///
    /// Returns zero when the pair is beyond the cutoff, coincident (including
    /// separations whose square underflows), when either position is no longer
    /// finite, or when the resulting magnitude overflows.
    pub fn pair_force(&self, target: &Particle, other: &Particle) -> [f64; DIM] {
        let dx = other.r[0] - target.r[0];
        let dy = other.r[1] - target.r[1];
        let distance = dx.hypot(dy);

        // `!(d <= cutoff)` also drops NaN distances
        if !(distance <= self.cutoff) {
            return [0.0; DIM];
        }
        let d2 = distance * distance;
        if d2 == 0.0 || !distance.is_finite() {
            return [0.0; DIM];
        }

        let p = [dx / distance, dy / distance];
        let rho_pd = target.density_p;
        let rho_nd = other.density_n;

        let flow = self.k_flow
            * (rho_pd * (target.speed() - dot(&p, &target.v))
                - rho_nd * (other.speed() - dot(&p, &other.v)));
        let tension = self.k_tension * (rho_pd - rho_nd);
        let em = (target.charge * other.charge) / d2;

        let magnitude = flow + tension - em;
        // inf * 0.0 on an axis-aligned P would inject NaN
        if !magnitude.is_finite() {
            return [0.0; DIM];
        }
        [magnitude * p[0], magnitude * p[1]]
    }

    /// Net force on `particles[target]` from every other particle in the slice.
    pub fn net_force(&self, target: usize, particles: &[Particle]) -> [f64; DIM] {
        let t = &particles[target];
        particles
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != target)
            .fold([0.0; DIM], |mut acc, (_, other)| {
                let f = self.pair_force(t, other);
                acc[0] += f[0];
                acc[1] += f[1];
                acc
            })
    }

    /// Net force on every particle, all read from the same snapshot.
    pub fn all_forces(&self, particles: &[Particle]) -> Vec<[f64; DIM]> {
        (0..particles.len())
            .map(|i| self.net_force(i, particles))
            .collect()
    }
}

#[inline]
fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
