//! The `physics` module: a handful of physical constants in SI units.

use crate::interpreter::{modules::Exports, value::Value};

/// Builds the module's bindings.
#[must_use]
pub fn exports() -> Exports {
    vec![
        // standard gravity, m/s²
        ("g", Value::Number(9.81)),
        // gravitational constant
        ("G", Value::Number(6.674_3e-11)),
        // speed of light, m/s
        ("c", Value::Number(299_792_458.0)),
    ]
}
