//! Resolution bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::ActionInput;
use crate::render;
use crate::resolver::{self, ResolutionResult};

use super::py_core::PyActionInput;

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for a finished resolution.
#[pyclass(name = "Resolution")]
#[derive(Clone, Debug)]
pub struct PyResolution(pub ResolutionResult);

#[pymethods]
impl PyResolution {
    /// Card names in pop order.
    fn resolution_order(&self) -> Vec<String> {
        self.0
            .resolution_order()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Final status of each step, in pop order.
    fn statuses(&self) -> Vec<String> {
        self.0.steps.iter().map(|s| s.status().to_string()).collect()
    }

    /// Step descriptions, in pop order.
    fn descriptions(&self) -> Vec<String> {
        self.0.steps.iter().map(|s| s.description.clone()).collect()
    }

    /// Text rendering, optionally highlighting one step.
    #[pyo3(signature = (step = None))]
    fn render(&self, step: Option<u32>) -> PyResult<String> {
        match step {
            None => Ok(render::render(&self.0)),
            Some(n) => render::render_step(&self.0, n)
                .ok_or_else(|| value_error(format!("no step {n}"))),
        }
    }

    /// Serialize to JSON.
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.0).map_err(value_error)
    }

    fn __len__(&self) -> usize {
        self.0.steps.len()
    }

    fn __repr__(&self) -> String {
        format!("Resolution(steps={})", self.0.steps.len())
    }
}

/// Resolve a list of ActionInput.
///
/// Raises ValueError on invalid input or a failed resolution.
#[pyfunction(name = "resolve")]
pub fn py_resolve(actions: Vec<PyActionInput>) -> PyResult<PyResolution> {
    let inputs: Vec<ActionInput> = actions.into_iter().map(|a| a.0).collect();
    resolver::resolve(&inputs)
        .map(PyResolution)
        .map_err(value_error)
}

/// Resolve a JSON array of action objects, returning the result as JSON.
#[pyfunction]
pub fn resolve_json(payload: &str) -> PyResult<String> {
    let inputs: Vec<ActionInput> = serde_json::from_str(payload).map_err(value_error)?;
    let result = resolver::resolve(&inputs).map_err(value_error)?;
    serde_json::to_string(&result).map_err(value_error)
}

/// Resolve a JSON array of action objects, returning the text rendering.
#[pyfunction]
pub fn render_json(payload: &str) -> PyResult<String> {
    let inputs: Vec<ActionInput> = serde_json::from_str(payload).map_err(value_error)?;
    let result = resolver::resolve(&inputs).map_err(value_error)?;
    Ok(render::render(&result))
}
