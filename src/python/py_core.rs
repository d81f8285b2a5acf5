//! Action input bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::ActionInput;
use crate::rules::EffectKind;

/// Python wrapper for ActionInput.
#[pyclass(name = "ActionInput")]
#[derive(Clone, Debug)]
pub struct PyActionInput(pub ActionInput);

#[pymethods]
impl PyActionInput {
    /// Create a new action input.
    ///
    /// # Arguments
    /// - card: Card name
    /// - controller: Player label
    /// - targets: Earlier card names, player labels, or "none"
    /// - kind: Optional effect kind ("Generic", "Counter", "TargetedRemoval")
    /// - effect: Optional effect text
    #[new]
    #[pyo3(signature = (card, controller, targets = Vec::new(), kind = None, effect = None))]
    fn new(
        card: String,
        controller: String,
        targets: Vec<String>,
        kind: Option<&str>,
        effect: Option<String>,
    ) -> PyResult<Self> {
        let kind = kind
            .map(str::parse::<EffectKind>)
            .transpose()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self(ActionInput {
            card,
            controller,
            targets,
            kind,
            effect,
        }))
    }

    #[getter]
    fn card(&self) -> String {
        self.0.card.clone()
    }

    #[getter]
    fn controller(&self) -> String {
        self.0.controller.clone()
    }

    #[getter]
    fn targets(&self) -> Vec<String> {
        self.0.targets.clone()
    }

    #[getter]
    fn kind(&self) -> Option<String> {
        self.0.kind.map(|k| format!("{k:?}"))
    }

    fn __repr__(&self) -> String {
        format!(
            "ActionInput(card={:?}, controller={:?}, targets={:?})",
            self.0.card, self.0.controller, self.0.targets
        )
    }
}
