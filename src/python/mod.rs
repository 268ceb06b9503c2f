//! Python bindings for the hotzone environment.
//!
//! # Quick Start
//!
//! ```python
//! import hotzone
//!
//! env = hotzone.HotZoneEnv(seed=42)
//! obs = env.reset()
//!
//! while True:
//!     mask = env.valid_action_mask()
//!     plan = env.plan()
//!     action = plan[0] if plan else int(mask.argmax())
//!     obs, reward, done, info = env.step(action)
//!     if done:
//!         break
//! ```

use pyo3::prelude::*;

mod py_env;

pub use py_env::*;

/// hotzone: a two-player disease-containment environment.
#[pymodule]
fn hotzone(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyHotZoneEnv>()?;
    Ok(())
}
