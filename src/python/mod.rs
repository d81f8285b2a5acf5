//! Python bindings for the stack resolver.
//!
//! The rules-question web service is written in Python; these bindings
//! let it call the resolver in-process.
//!
//! # Quick Start
//!
//! ```python
//! import tolaria_stack as ts
//!
//! result = ts.resolve([
//!     ts.ActionInput("Lightning Bolt", "P1", ["P2"]),
//!     ts.ActionInput("Counterspell", "P2", ["Lightning Bolt"]),
//! ])
//! assert result.statuses() == ["resolved", "countered"]
//! print(result.render())
//!
//! # Or JSON in, JSON out
//! payload = '[{"card": "Opt", "controller": "P1"}]'
//! print(ts.resolve_json(payload))
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_resolve;

pub use py_core::*;
pub use py_resolve::*;

/// tolaria_stack: deterministic stack resolution for rules questions.
#[pymodule]
fn tolaria_stack(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyActionInput>()?;
    m.add_class::<PyResolution>()?;

    m.add_function(wrap_pyfunction!(py_resolve, m)?)?;
    m.add_function(wrap_pyfunction!(resolve_json, m)?)?;
    m.add_function(wrap_pyfunction!(render_json, m)?)?;

    Ok(())
}
