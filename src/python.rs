use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use crate::core::particle::DIM;
use crate::core::{Kind, SimConfig, Simulator};
use crate::error::Error;

fn py_err(e: Error) -> PyErr {
    match e {
        Error::IndexOutOfRange { .. } => PyIndexError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn to_array2(rows: &[[f64; DIM]]) -> Array2<f64> {
    let mut arr = Array2::<f64>::zeros((rows.len(), DIM));
    for (i, row) in rows.iter().enumerate() {
        for k in 0..DIM {
            arr[[i, k]] = row[k];
        }
    }
    arr
}

/// Python-facing wrapper around the Rust `Simulator`.
///
/// The driver (typically a pygame loop) calls `step()` once per frame and
/// reads `get_positions()` / `get_charges()` to draw.
#[pyclass]
pub struct AetherSim {
    sim: Simulator,
}

#[pymethods]
impl AetherSim {
    /// Create a simulation.
    ///
    /// Parameters
    /// - num_particles: number of particles seeded inside the spawn region
    /// - width, height: viewport extents
    /// - variant: "aether" (full force law, reset), "coulomb" (inverse-square
    ///   only, unbounded) or "reflecting" (short-range, bouncing off edges)
    /// - seed: RNG seed (int) for reproducibility; None for nondeterministic
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (num_particles=20, width=800.0, height=600.0, variant="aether", seed=None))]
    fn new(
        num_particles: usize,
        width: f64,
        height: f64,
        variant: &str,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let base = match variant {
            "aether" => SimConfig::aether(),
            "coulomb" => SimConfig::coulomb(),
            "reflecting" => SimConfig::reflecting(),
            other => {
                return Err(PyValueError::new_err(format!(
                    "unknown variant '{other}' (expected aether, coulomb or reflecting)"
                )))
            }
        };
        let config = base
            .with_viewport(width, height)
            .with_num_particles(num_particles)
            .with_seed(seed);
        let sim = Simulator::new(config).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Advance one tick (releases the GIL during computation).
    fn step(&mut self, py: Python<'_>) {
        py.detach(|| self.sim.step());
    }

    /// Advance `steps` ticks (releases the GIL during computation).
    fn run(&mut self, py: Python<'_>, steps: usize) {
        py.detach(|| self.sim.run(steps));
    }

    /// Insert a particle at (x, y); kind is one of a, b, c, positive, negative.
    /// Returns the new particle's index.
    fn add_particle(&mut self, x: f64, y: f64, kind: &str) -> PyResult<usize> {
        let kind = Kind::from_name(kind).map_err(py_err)?;
        self.sim.add_particle([x, y], kind).map_err(py_err)
    }

    /// Remove the particle at `index`; later indices shift down by one.
    fn remove_particle(&mut self, index: usize) -> PyResult<()> {
        self.sim.remove_particle(index).map(|_| ()).map_err(py_err)
    }

    fn num_particles(&self) -> usize {
        self.sim.num_particles()
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions<'py>(&self, py: Python<'py>) -> Py<PyArray2<f64>> {
        to_array2(&self.sim.positions()).into_pyarray(py).unbind()
    }

    /// Return velocities as a NumPy array of shape (N, 2), dtype=float64.
    fn get_velocities<'py>(&self, py: Python<'py>) -> Py<PyArray2<f64>> {
        to_array2(&self.sim.velocities()).into_pyarray(py).unbind()
    }

    /// Return charges as a NumPy array of shape (N,), for color mapping.
    fn get_charges<'py>(&self, py: Python<'py>) -> Py<PyArray1<f64>> {
        let charges: Vec<f64> = self.sim.particles().iter().map(|p| p.charge).collect();
        charges.into_pyarray(py).unbind()
    }

    fn get_kinetic_energy(&self) -> f64 {
        self.sim.kinetic_energy()
    }

    /// Boundary events of the last step as a list of (index, kind, x, y).
    fn get_boundary_events(&self) -> Vec<(usize, &'static str, f64, f64)> {
        self.sim
            .boundary_events()
            .iter()
            .map(|ev| (ev.index, ev.kind.name(), ev.position[0], ev.position[1]))
            .collect()
    }
}

/// The aether Python module entry point.
#[pymodule]
fn aether(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<AetherSim>()?;
    Ok(())
}
