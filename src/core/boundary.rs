use crate::core::config::{BoundaryMode, Rect, SimConfig};
use crate::core::event::{BoundaryEvent, BoundaryEventKind};
use crate::core::particle::{Particle, DIM};
use rand::Rng;

/// Post-integration boundary handling for a single particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPolicy {
    pub mode: BoundaryMode,
    pub extent: [f64; DIM],
    pub radius: f64,
    pub spawn_region: Rect,
    pub reset_speed: f64,
    pub limits: [f64; DIM],
}

impl BoundaryPolicy {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            mode: config.boundary,
            extent: [config.width, config.height],
            radius: config.particle_radius,
            spawn_region: config.spawn_region,
            reset_speed: config.initial_speed,
            limits: config.position_limits(),
        }
    }

    /// Apply the configured rule to `p`, whose position before integration was `before`.
    ///
    /// Returns an event (with step and index left at zero) when the particle
    /// was reset or clamped.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        p: &mut Particle,
        before: [f64; DIM],
        rng: &mut R,
    ) -> Option<BoundaryEvent> {
        match self.mode {
            BoundaryMode::None => None,
            BoundaryMode::Reflect => {
                self.reflect(p);
                None
            }
            BoundaryMode::Reset => {
                let inside = Rect::new([0.0; DIM], self.extent).contains(&p.r);
                if inside {
                    return None;
                }
                let escaped = p.r;
                self.reset(p, rng);
                Some(BoundaryEvent::new(0, 0, BoundaryEventKind::Reset, escaped))
            }
            BoundaryMode::ClampAndWarn => {
                // NaN compares false, so it is treated as out of range
                let within = (0..DIM).all(|k| p.r[k].abs() <= self.limits[k]);
                if within {
                    return None;
                }
                let escaped = p.r;
                p.r = before;
                Some(BoundaryEvent::new(0, 0, BoundaryEventKind::Clamped, escaped))
            }
        }
    }

    fn reflect(&self, p: &mut Particle) {
        for k in 0..DIM {
            if p.r[k] <= self.radius || p.r[k] >= self.extent[k] - self.radius {
                p.v[k] = -p.v[k];
            }
        }
    }

    /// Re-seed position, velocity and acceleration.
    pub fn reset<R: Rng + ?Sized>(&self, p: &mut Particle, rng: &mut R) {
        p.r = sample_in(&self.spawn_region, rng);
        p.v = sample_velocity(self.reset_speed, rng);
        p.a = [0.0; DIM];
    }
}

/// Uniform point in `region` (inclusive).
pub(crate) fn sample_in<R: Rng + ?Sized>(region: &Rect, rng: &mut R) -> [f64; DIM] {
    let mut r = [0.0_f64; DIM];
    for (k, r_k) in r.iter_mut().enumerate() {
        *r_k = rng.random_range(region.min[k]..=region.max[k]);
    }
    r
}

/// Uniform velocity in `[-speed, speed]` per component.
pub(crate) fn sample_velocity<R: Rng + ?Sized>(speed: f64, rng: &mut R) -> [f64; DIM] {
    let mut v = [0.0_f64; DIM];
    v.iter_mut().for_each(|x| *x = rng.random_range(-speed..=speed));
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::particle::{Kind, KindProperties};
    use crate::error::Result;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(r: [f64; DIM], v: [f64; DIM]) -> Result<Particle> {
        let props = KindProperties {
            mass: 1.0,
            charge: 1.0,
        };
        Particle::new(r, v, Kind::Positive, props, 1.0, 1.0)
    }

    fn policy(mode: BoundaryMode) -> BoundaryPolicy {
        BoundaryPolicy::from_config(&SimConfig::default().with_boundary(mode))
    }

    #[test]
    fn reflect_flips_only_the_edge_axis() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = particle([797.0, 300.0], [2.0, 1.0])?;
        let ev = policy(BoundaryMode::Reflect).apply(&mut p, [795.0, 299.0], &mut rng);
        assert!(ev.is_none());
        assert_eq!(p.v, [-2.0, 1.0]);
        assert_eq!(p.r, [797.0, 300.0]);
        Ok(())
    }

    #[test]
    fn reflect_near_origin_edges() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = particle([3.0, 5.0], [-1.0, -1.0])?;
        policy(BoundaryMode::Reflect).apply(&mut p, [4.0, 6.0], &mut rng);
        assert_eq!(p.v, [1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn reset_relocates_into_spawn_region() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(99);
        let pol = policy(BoundaryMode::Reset);
        for start in [[-1.0, 300.0], [400.0, 600.5], [f64::NAN, 10.0], [1e9, -1e9]] {
            let mut p = particle([0.0, 0.0], [4.0, 4.0])?;
            p.r = start;
            p.a = [1.0, 1.0];
            let ev = pol.apply(&mut p, [0.0, 0.0], &mut rng).expect("reset expected");
            assert_eq!(ev.kind, BoundaryEventKind::Reset);
            assert!(pol.spawn_region.contains(&p.r), "landed at {:?}", p.r);
            assert!(p.v.iter().all(|v| v.abs() <= 1.0));
            assert_eq!(p.a, [0.0, 0.0]);
        }
        Ok(())
    }

    #[test]
    fn reset_ignores_particles_on_the_edge() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = particle([800.0, 0.0], [3.0, 3.0])?;
        assert!(policy(BoundaryMode::Reset)
            .apply(&mut p, [799.0, 1.0], &mut rng)
            .is_none());
        assert_eq!(p.r, [800.0, 0.0]);
        Ok(())
    }

    #[test]
    fn clamp_withholds_position_update() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = particle([-805.0, 10.0], [-6.0, 0.0])?;
        let ev = policy(BoundaryMode::ClampAndWarn)
            .apply(&mut p, [-799.0, 10.0], &mut rng)
            .expect("clamp expected");
        assert_eq!(ev.kind, BoundaryEventKind::Clamped);
        assert_eq!(ev.position, [-805.0, 10.0]);
        assert_eq!(p.r, [-799.0, 10.0]);
        assert_eq!(p.v, [-6.0, 0.0]);
        Ok(())
    }

    #[test]
    fn none_leaves_everything_alone() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = particle([-1e6, 1e6], [1.0, 1.0])?;
        assert!(policy(BoundaryMode::None)
            .apply(&mut p, [0.0, 0.0], &mut rng)
            .is_none());
        assert_eq!(p.r, [-1e6, 1e6]);
        Ok(())
    }
}
