use crate::core::boundary::{sample_in, sample_velocity, BoundaryPolicy};
use crate::core::config::{InsertVelocity, SimConfig};
use crate::core::event::BoundaryEvent;
use crate::core::force::ForceModel;
use crate::core::integrator::Integrator;
use crate::core::particle::{Kind, Particle, DIM};
use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// Aether simulation: an owned particle collection advanced one tick per `step()`.
///
/// Each step evaluates all pairwise forces against the pre-step state,
/// integrates every particle, then applies the boundary policy. Particles
/// added or removed between steps take part from the next step on.
#[derive(Debug)]
pub struct Simulator {
    config: SimConfig,
    forces: ForceModel,
    integrator: Integrator,
    boundary: BoundaryPolicy,
    rng: StdRng,
    step_count: u64,
    particles: Vec<Particle>,
    events: Vec<BoundaryEvent>,
}

impl Simulator {
    /// Validate `config` and seed `config.num_particles` particles inside the
    /// spawn region.
    ///
    /// Kinds are drawn uniformly from `config.seed_kinds`; velocities uniformly
    /// from `[-initial_speed, initial_speed]` per component.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;

        let mut rng: StdRng = match config.seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };

        let mut particles = Vec::with_capacity(config.num_particles);
        for _ in 0..config.num_particles {
            let r = sample_in(&config.spawn_region, &mut rng);
            let v = sample_velocity(config.initial_speed, &mut rng);
            let kind = config.seed_kinds[rng.random_range(0..config.seed_kinds.len())];
            particles.push(spawn(&config, &mut rng, r, v, kind)?);
        }

        log::debug!(
            "seeded {} particles ({:?} boundary, cutoff {})",
            particles.len(),
            config.boundary,
            config.cutoff
        );

        Ok(Self {
            forces: ForceModel::from_config(&config),
            integrator: Integrator::from_config(&config),
            boundary: BoundaryPolicy::from_config(&config),
            config,
            rng,
            step_count: 0,
            particles,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Read-only view of the particles, in index order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Number of completed steps.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Positions as a Vec of fixed-size arrays.
    pub fn positions(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.r).collect()
    }

    /// Velocities as a Vec of fixed-size arrays.
    pub fn velocities(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(|p| p.v).collect()
    }

    /// Compute total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Boundary events raised by the most recent step.
    pub fn boundary_events(&self) -> &[BoundaryEvent] {
        &self.events
    }

    /// Insert a particle of `kind` at `position` and return its index.
    ///
    /// The initial velocity follows `config.insert_velocity`; densities are
    /// sampled from `config.density_range`.
    ///
    /// Errors: `Error::InvalidParam` if the position is not finite.
    pub fn add_particle(&mut self, position: [f64; DIM], kind: Kind) -> Result<usize> {
        let v = match self.config.insert_velocity {
            InsertVelocity::Zero => [0.0; DIM],
            InsertVelocity::Random => sample_velocity(self.config.initial_speed, &mut self.rng),
        };
        let p = spawn(&self.config, &mut self.rng, position, v, kind)?;
        self.particles.push(p);
        let index = self.particles.len() - 1;
        log::debug!("inserted {} particle #{index} at {position:?}", kind.name());
        Ok(index)
    }

    /// Remove and return the particle at `index`; later indices shift down by one.
    pub fn remove_particle(&mut self, index: usize) -> Result<Particle> {
        let len = self.particles.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        log::debug!("removing particle #{index}");
        Ok(self.particles.remove(index))
    }

    /// Overwrite the velocity of the particle at `index`.
    pub fn set_velocity(&mut self, index: usize, v: [f64; DIM]) -> Result<()> {
        let len = self.particles.len();
        self.particles
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?
            .set_velocity(v)
    }

    /// Advance the whole system by one tick.
    ///
    /// Never fails: coincident pairs contribute no force and runaway particles
    /// are left to the boundary policy.
    pub fn step(&mut self) {
        self.step_count += 1;
        self.events.clear();

        // Forces from the pre-step snapshot, before anything moves.
        let forces = self.forces.all_forces(&self.particles);

        for (i, (p, f)) in self.particles.iter_mut().zip(forces).enumerate() {
            let before = self.integrator.advance(p, f);
            if let Some(ev) = self.boundary.apply(p, before, &mut self.rng) {
                let ev = ev.at(self.step_count, i);
                log::warn!(
                    "step {}: particle #{i} {} at x={}, y={}",
                    ev.step,
                    ev.kind.name(),
                    ev.position[0],
                    ev.position[1]
                );
                self.events.push(ev);
            }
        }

        log::trace!(
            "step {} done: {} particles, {} boundary events",
            self.step_count,
            self.particles.len(),
            self.events.len()
        );
    }

    /// Run `steps` consecutive steps.
    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }
}

/// Build a particle of `kind` with freshly sampled densities.
fn spawn(
    config: &SimConfig,
    rng: &mut StdRng,
    r: [f64; DIM],
    v: [f64; DIM],
    kind: Kind,
) -> Result<Particle> {
    let (lo, hi) = config.density_range;
    let density_p = rng.random_range(lo..=hi);
    let density_n = rng.random_range(lo..=hi);
    Particle::new(r, v, kind, config.kinds.get(kind), density_p, density_n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BoundaryMode;

    #[test]
    fn make_small_sim_ok() -> Result<()> {
        let mut sim = Simulator::new(SimConfig::default().with_seed(Some(1234)))?;
        assert_eq!(sim.num_particles(), 20);
        assert!(sim.kinetic_energy().is_finite());
        let region = sim.config().spawn_region;
        assert!(sim.particles().iter().all(|p| region.contains(&p.r)));
        sim.run(10);
        assert_eq!(sim.step_count(), 10);
        Ok(())
    }

    #[test]
    fn seeded_particles_respect_config() -> Result<()> {
        let cfg = SimConfig::default()
            .with_seed(Some(3))
            .with_num_particles(50)
            .with_density_range(0.8, 1.2);
        let sim = Simulator::new(cfg)?;
        for p in sim.particles() {
            assert!(matches!(p.kind, Kind::A | Kind::B | Kind::C));
            assert!((0.8..=1.2).contains(&p.density_p));
            assert!((0.8..=1.2).contains(&p.density_n));
            assert!(p.v.iter().all(|v| v.abs() <= 1.0));
            assert_eq!(p.mass, sim.config().kinds.get(p.kind).mass);
        }
        Ok(())
    }

    #[test]
    fn invalid_config_fails_fast() {
        let err = Simulator::new(SimConfig::default().with_damping(0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn unsampleable_reset_speed_fails_at_construction() {
        let cfg = SimConfig::default()
            .with_num_particles(0)
            .with_initial_speed(f64::MAX);
        let err = Simulator::new(cfg).unwrap_err();
        assert!(err.to_string().contains("initial_speed"));
    }

    #[test]
    fn add_and_remove_particles() -> Result<()> {
        let cfg = SimConfig::default().with_num_particles(0).with_seed(Some(8));
        let mut sim = Simulator::new(cfg)?;
        let a = sim.add_particle([150.0, 150.0], Kind::B)?;
        let b = sim.add_particle([160.0, 150.0], Kind::C)?;
        assert_eq!((a, b), (0, 1));
        assert_eq!(sim.particles()[1].charge, 2.0);
        assert_eq!(sim.particles()[0].v, [0.0, 0.0]);

        let removed = sim.remove_particle(0)?;
        assert_eq!(removed.kind, Kind::B);
        assert_eq!(sim.num_particles(), 1);
        assert_eq!(sim.particles()[0].kind, Kind::C);

        let err = sim.remove_particle(5).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 5, len: 1 }));
        Ok(())
    }

    #[test]
    fn add_rejects_non_finite_position() -> Result<()> {
        let mut sim = Simulator::new(SimConfig::default().with_num_particles(0))?;
        assert!(sim.add_particle([f64::INFINITY, 0.0], Kind::A).is_err());
        assert_eq!(sim.num_particles(), 0);
        Ok(())
    }

    #[test]
    fn random_insert_velocity_is_bounded() -> Result<()> {
        let cfg = SimConfig::default()
            .with_num_particles(0)
            .with_seed(Some(17))
            .with_initial_speed(0.25)
            .with_insert_velocity(InsertVelocity::Random);
        let mut sim = Simulator::new(cfg)?;
        for _ in 0..20 {
            sim.add_particle([400.0, 300.0], Kind::A)?;
        }
        assert!(sim
            .velocities()
            .iter()
            .all(|v| v.iter().all(|c| c.abs() <= 0.25)));
        Ok(())
    }

    #[test]
    fn events_only_cover_last_step() -> Result<()> {
        let cfg = SimConfig::default()
            .with_num_particles(0)
            .with_seed(Some(4))
            .with_boundary(BoundaryMode::Reset);
        let mut sim = Simulator::new(cfg)?;
        sim.add_particle([-20.0, 300.0], Kind::A)?;
        sim.step();
        assert_eq!(sim.boundary_events().len(), 1);
        assert_eq!(sim.boundary_events()[0].step, 1);
        assert_eq!(sim.boundary_events()[0].index, 0);
        sim.step();
        assert!(sim.boundary_events().is_empty());
        Ok(())
    }
}
