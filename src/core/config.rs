use crate::core::particle::{Kind, KindTable, DIM};
use crate::error::{Error, Result};

/// What the boundary policy does with a particle after integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Negate the velocity component of any axis within one radius of an edge.
    Reflect,
    /// Re-seed position and velocity of particles that left the viewport.
    Reset,
    /// Withhold the position update of far-out particles and log a warning.
    ClampAndWarn,
    /// No boundary handling.
    None,
}

/// Initial velocity given to particles inserted at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertVelocity {
    Zero,
    /// Uniform in `[-initial_speed, initial_speed]` per component.
    Random,
}

/// Axis-aligned rectangle `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: [f64; DIM],
    pub max: [f64; DIM],
}

impl Rect {
    pub fn new(min: [f64; DIM], max: [f64; DIM]) -> Self {
        Self { min, max }
    }

    /// Inclusive containment; NaN coordinates are never contained.
    #[inline]
    pub fn contains(&self, r: &[f64; DIM]) -> bool {
        (0..DIM).all(|k| r[k] >= self.min[k] && r[k] <= self.max[k])
    }
}

/// Simulation configuration. Fixed once a `Simulator` is built.
///
/// Start from `Default` (or one of the presets) and override with the
/// `with_*` setters; `validate` is run by `Simulator::new`.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub width: f64,
    pub height: f64,
    /// Pairs farther apart than this do not interact. May be infinite.
    pub cutoff: f64,
    pub k_flow: f64,
    pub k_tension: f64,
    /// Velocity multiplier applied every step, in (0, 1].
    pub damping: f64,
    /// Per-component velocity cap.
    pub max_velocity: Option<f64>,
    /// Position magnitude bound for `ClampAndWarn`; defaults to the viewport extents.
    pub max_position: Option<f64>,
    pub boundary: BoundaryMode,
    /// Edge margin used by `Reflect`.
    pub particle_radius: f64,
    /// Interior rectangle for seeding and reset.
    pub spawn_region: Rect,
    /// Half-width of the random velocity range used for seeding and reset.
    pub initial_speed: f64,
    /// Uniform range the density scalars are drawn from.
    pub density_range: (f64, f64),
    pub num_particles: usize,
    /// Palette seeded particles draw their kind from.
    pub seed_kinds: Vec<Kind>,
    pub insert_velocity: InsertVelocity,
    pub kinds: KindTable,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::aether()
    }
}

impl SimConfig {
    /// Full aether model: flow, tension and inverse-square terms, preon kinds,
    /// reset on leaving the viewport.
    pub fn aether() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            cutoff: 200.0,
            k_flow: 1.0,
            k_tension: 1.0,
            damping: 0.9,
            max_velocity: Some(5.0),
            max_position: None,
            boundary: BoundaryMode::Reset,
            particle_radius: 5.0,
            spawn_region: Rect::new([100.0, 100.0], [700.0, 500.0]),
            initial_speed: 1.0,
            density_range: (0.5, 1.5),
            num_particles: 20,
            seed_kinds: vec![Kind::A, Kind::B, Kind::C],
            insert_velocity: InsertVelocity::Zero,
            kinds: KindTable::default(),
            seed: None,
        }
    }

    /// Pure inverse-square model on unit masses: no cutoff, no damping, no
    /// caps, no boundary handling.
    pub fn coulomb() -> Self {
        Self {
            cutoff: f64::INFINITY,
            k_flow: 0.0,
            k_tension: 0.0,
            damping: 1.0,
            max_velocity: None,
            boundary: BoundaryMode::None,
            seed_kinds: vec![Kind::Positive, Kind::Negative],
            ..Self::aether()
        }
    }

    /// Short-range inverse-square model bouncing off the viewport edges.
    pub fn reflecting() -> Self {
        Self {
            cutoff: 50.0,
            boundary: BoundaryMode::Reflect,
            num_particles: 50,
            ..Self::coulomb()
        }
    }

    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_coefficients(mut self, k_flow: f64, k_tension: f64) -> Self {
        self.k_flow = k_flow;
        self.k_tension = k_tension;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_velocity(mut self, cap: Option<f64>) -> Self {
        self.max_velocity = cap;
        self
    }

    pub fn with_max_position(mut self, cap: Option<f64>) -> Self {
        self.max_position = cap;
        self
    }

    pub fn with_boundary(mut self, mode: BoundaryMode) -> Self {
        self.boundary = mode;
        self
    }

    pub fn with_particle_radius(mut self, radius: f64) -> Self {
        self.particle_radius = radius;
        self
    }

    pub fn with_spawn_region(mut self, region: Rect) -> Self {
        self.spawn_region = region;
        self
    }

    pub fn with_initial_speed(mut self, speed: f64) -> Self {
        self.initial_speed = speed;
        self
    }

    pub fn with_density_range(mut self, lo: f64, hi: f64) -> Self {
        self.density_range = (lo, hi);
        self
    }

    pub fn with_num_particles(mut self, n: usize) -> Self {
        self.num_particles = n;
        self
    }

    pub fn with_seed_kinds(mut self, kinds: Vec<Kind>) -> Self {
        self.seed_kinds = kinds;
        self
    }

    pub fn with_insert_velocity(mut self, mode: InsertVelocity) -> Self {
        self.insert_velocity = mode;
        self
    }

    pub fn with_kinds(mut self, kinds: KindTable) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Bounds used by `ClampAndWarn` on each axis.
    #[inline]
    pub fn position_limits(&self) -> [f64; DIM] {
        match self.max_position {
            Some(m) => [m, m],
            None => [self.width, self.height],
        }
    }

    /// Reject configurations that would make the model ill-defined.
    ///
    /// Errors: `Error::InvalidConfig` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: &str| Err(Error::InvalidConfig(msg.into()));

        if !self.width.is_finite() || self.width <= 0.0 {
            return bad("width must be finite and > 0");
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return bad("height must be finite and > 0");
        }
        // NaN fails this comparison as well
        if !(self.cutoff >= 0.0) {
            return bad("cutoff must be >= 0");
        }
        if !self.k_flow.is_finite() || !self.k_tension.is_finite() {
            return bad("force coefficients must be finite");
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return bad("damping must be in (0, 1]");
        }
        if let Some(v) = self.max_velocity {
            if !(v > 0.0) {
                return bad("max_velocity must be > 0");
            }
        }
        if let Some(p) = self.max_position {
            if !(p > 0.0) {
                return bad("max_position must be > 0");
            }
        }
        if !self.particle_radius.is_finite() || self.particle_radius < 0.0 {
            return bad("particle_radius must be finite and >= 0");
        }
        let region = &self.spawn_region;
        // Sampling needs a finite span, not just finite endpoints
        let region_ok = (0..DIM).all(|k| {
            region.min[k] <= region.max[k] && (region.max[k] - region.min[k]).is_finite()
        });
        if !region_ok {
            return bad("spawn_region must have min <= max and a finite span");
        }
        if !(self.initial_speed >= 0.0) || !(2.0 * self.initial_speed).is_finite() {
            return bad("initial_speed must be >= 0 with a finite span");
        }
        let (lo, hi) = self.density_range;
        if !(lo <= hi) || !(hi - lo).is_finite() {
            return bad("density_range must have lo <= hi and a finite span");
        }
        if self.seed_kinds.is_empty() {
            return bad("seed_kinds must not be empty");
        }
        self.kinds.validate()
    }
}
