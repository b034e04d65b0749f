use crate::error::{Error, Result};

/// Spatial dimension of the simulation plane.
pub const DIM: usize = 2;

/// Closed set of particle categories.
///
/// `A`, `B` and `C` are the three preon types of the full aether model;
/// `Positive` and `Negative` are the unit-mass charges of the simpler
/// inverse-square variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    A,
    B,
    C,
    Positive,
    Negative,
}

impl Kind {
    /// Every kind, in table order.
    pub const ALL: [Kind; 5] = [Kind::A, Kind::B, Kind::C, Kind::Positive, Kind::Negative];

    #[inline]
    fn index(self) -> usize {
        match self {
            Kind::A => 0,
            Kind::B => 1,
            Kind::C => 2,
            Kind::Positive => 3,
            Kind::Negative => 4,
        }
    }

    /// Short lowercase name, used by the Python driver and in log lines.
    pub fn name(self) -> &'static str {
        match self {
            Kind::A => "a",
            Kind::B => "b",
            Kind::C => "c",
            Kind::Positive => "positive",
            Kind::Negative => "negative",
        }
    }

    /// Parse a kind from its name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self> {
        let lower = name.to_ascii_lowercase();
        Kind::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| Error::InvalidParam(format!("unknown particle kind '{name}'")))
    }
}

/// Fixed physical constants of one kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProperties {
    /// Inertial mass (> 0).
    pub mass: f64,
    /// Signed charge.
    pub charge: f64,
}

/// Per-kind constants lookup, resolved once when a particle is created.
#[derive(Debug, Clone, PartialEq)]
pub struct KindTable {
    entries: [KindProperties; 5],
}

impl Default for KindTable {
    fn default() -> Self {
        let p = |mass, charge| KindProperties { mass, charge };
        Self {
            entries: [
                p(45.6, 0.0),
                p(34.8, -1.0),
                p(67.9, 2.0),
                p(1.0, 1.0),
                p(1.0, -1.0),
            ],
        }
    }
}

impl KindTable {
    /// Constants for `kind`.
    #[inline]
    pub fn get(&self, kind: Kind) -> KindProperties {
        self.entries[kind.index()]
    }

    /// Override the constants for one kind. Validation happens in `validate`.
    pub fn with(mut self, kind: Kind, mass: f64, charge: f64) -> Self {
        self.entries[kind.index()] = KindProperties { mass, charge };
        self
    }

    /// Check that every mass is finite and > 0 and every charge is finite.
    pub fn validate(&self) -> Result<()> {
        for kind in Kind::ALL {
            let KindProperties { mass, charge } = self.get(kind);
            if !mass.is_finite() || mass <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "mass of kind '{}' must be finite and > 0 (got {mass})",
                    kind.name()
                )));
            }
            if !charge.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "charge of kind '{}' must be finite",
                    kind.name()
                )));
            }
        }
        Ok(())
    }
}

/// A point particle in the aether plane.
///
/// Fields:
/// - `r`: position [x, y], unconstrained
/// - `v`: velocity [vx, vy]
/// - `a`: acceleration, zero outside of integration
/// - `kind`, `mass`, `charge`: category and its constants
/// - `density_p`, `density_n`: the two density scalars (ρPD, ρND)
#[derive(Debug, Clone)]
pub struct Particle {
    /// Position (x, y).
    pub r: [f64; DIM],
    /// Velocity (vx, vy).
    pub v: [f64; DIM],
    /// Acceleration (ax, ay).
    pub a: [f64; DIM],
    /// Category.
    pub kind: Kind,
    /// Mass (> 0).
    pub mass: f64,
    /// Signed charge.
    pub charge: f64,
    /// Positive density scalar ρPD.
    pub density_p: f64,
    /// Negative density scalar ρND.
    pub density_n: f64,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `mass` is non-positive or any input is NaN/inf.
    pub fn new(
        r: [f64; DIM],
        v: [f64; DIM],
        kind: Kind,
        props: KindProperties,
        density_p: f64,
        density_n: f64,
    ) -> Result<Self> {
        if !props.mass.is_finite() || props.mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !props.charge.is_finite() {
            return Err(Error::InvalidParam("charge must be finite".into()));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        if !density_p.is_finite() || !density_n.is_finite() {
            return Err(Error::InvalidParam("densities must be finite".into()));
        }
        Ok(Self {
            r,
            v,
            a: [0.0; DIM],
            kind,
            mass: props.mass,
            charge: props.charge,
            density_p,
            density_n,
        })
    }

    /// Speed |v|.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.v[0].hypot(self.v[1])
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        let vsq: f64 = self.v.iter().map(|&c| c * c).sum();
        0.5 * self.mass * vsq
    }

    /// Set velocity (validated as finite).
    pub fn set_velocity(&mut self, v: [f64; DIM]) -> Result<()> {
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        self.v = v;
        Ok(())
    }
}
