//! Environment bindings for Python.

use numpy::PyArray1;
use pyo3::exceptions::{PyIndexError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::{Action, GameConfig, GameError};
use crate::env::HotZoneEnv;
use crate::rules::RulesEngine;
use crate::search::{BeamPlanner, PlannerConfig};

fn to_py_err(err: GameError) -> PyErr {
    match err {
        GameError::ActionOutOfRange { .. } => PyIndexError::new_err(err.to_string()),
        GameError::InvalidAction(_) | GameError::InvalidDiscard(_) | GameError::UnknownCity(_) => {
            PyValueError::new_err(err.to_string())
        }
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Python wrapper for HotZoneEnv on the built-in Europe map.
#[pyclass(name = "HotZoneEnv")]
pub struct PyHotZoneEnv {
    env: HotZoneEnv,
    planner: BeamPlanner,
}

#[pymethods]
impl PyHotZoneEnv {
    /// Create an environment.
    ///
    /// # Arguments
    /// - seed: seed of the first episode
    /// - epidemics: epidemic markers in the player deck
    /// - depth: planner lookahead in plies
    /// - beam_width: planner children kept per ply
    #[new]
    #[pyo3(signature = (seed = 42, epidemics = 3, depth = 8, beam_width = 3))]
    fn new(seed: u64, epidemics: usize, depth: u32, beam_width: usize) -> PyResult<Self> {
        let config = GameConfig::default().with_seed(seed).with_epidemics(epidemics);
        let env = HotZoneEnv::europe(config).map_err(to_py_err)?;
        let planner = BeamPlanner::new(
            PlannerConfig::default()
                .with_depth(depth)
                .with_beam_width(beam_width),
        );
        Ok(Self { env, planner })
    }

    /// Start a new episode; returns the observation.
    #[pyo3(signature = (seed = None))]
    fn reset<'py>(&mut self, py: Python<'py>, seed: Option<u64>) -> PyResult<Bound<'py, PyArray1<f32>>> {
        let obs = self.env.reset(seed).map_err(to_py_err)?;
        Ok(PyArray1::from_vec_bound(py, obs))
    }

    /// Apply an action index.
    ///
    /// Returns (observation, reward, done, info).
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: usize,
    ) -> PyResult<(Bound<'py, PyArray1<f32>>, f64, bool, Bound<'py, PyDict>)> {
        let step = self.env.step(action).map_err(to_py_err)?;

        let info = PyDict::new_bound(py);
        info.set_item("action", step.info.label)?;
        info.set_item("turn_ended", step.info.turn_ended)?;
        info.set_item("epidemics", step.info.epidemics)?;
        info.set_item("outbreaks", step.info.outbreaks)?;
        info.set_item("discarded", step.info.discarded.iter().map(|(_, c)| c.len()).sum::<usize>())?;
        info.set_item("result", step.info.result.map(|r| format!("{:?}", r)))?;

        Ok((
            PyArray1::from_vec_bound(py, step.observation),
            step.reward,
            step.done,
            info,
        ))
    }

    /// Legality of every action index, as a bool array.
    fn valid_action_mask<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        PyArray1::from_vec_bound(py, self.env.valid_action_mask())
    }

    /// Labels of the legal actions.
    fn action_labels(&self) -> Vec<String> {
        self.env.legal_labels()
    }

    /// Label of any action index.
    fn action_label(&self, action: usize) -> PyResult<String> {
        self.env.action_label(action).map_err(to_py_err)
    }

    /// Planned action indices for the active player, first action first.
    fn plan(&self) -> Vec<usize> {
        let city_count = self.env.rules().city_count();
        self.planner
            .plan(self.env.rules(), self.env.state(), self.env.goal())
            .actions
            .into_iter()
            .map(|a: Action| a.to_index(city_count))
            .collect()
    }

    /// Current observation.
    fn observation<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        PyArray1::from_vec_bound(py, self.env.observation())
    }

    #[getter]
    fn action_count(&self) -> usize {
        self.env.vocabulary_size()
    }

    #[getter]
    fn observation_width(&self) -> usize {
        crate::env::observation_width(self.env.rules().city_count())
    }

    #[getter]
    fn done(&self) -> bool {
        self.env.is_done()
    }

    #[getter]
    fn won(&self) -> bool {
        self.env.is_won()
    }

    #[getter]
    fn round(&self) -> u32 {
        self.env.round()
    }

    #[getter]
    fn outbreaks(&self) -> u32 {
        self.env.outbreaks()
    }

    #[getter]
    fn epidemics(&self) -> u32 {
        self.env.epidemics()
    }

    /// Capture the episode as bytes.
    fn snapshot(&self) -> PyResult<Vec<u8>> {
        self.env.snapshot().to_bytes().map_err(to_py_err)
    }

    /// Restore bytes produced by `snapshot`.
    fn restore(&mut self, data: Vec<u8>) -> PyResult<()> {
        let snapshot = crate::env::Snapshot::from_bytes(&data).map_err(to_py_err)?;
        self.env.restore(&snapshot).map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        let status = match self.env.result() {
            Some(r) if r.is_victory() => "won",
            Some(_) => "lost",
            None => "ongoing",
        };
        format!(
            "HotZoneEnv(episode={}, round={}, outbreaks={}, status={})",
            self.env.episode(),
            self.env.round(),
            self.env.outbreaks(),
            status
        )
    }
}
