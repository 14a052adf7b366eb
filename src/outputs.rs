use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// The defuzzified crisp value of every output variable that fired during
/// one evaluation. Created fresh per call and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    crisp_values: HashMap<VariableKey, f64>,
}

impl Outputs {
    pub(crate) fn new(crisp_values: HashMap<VariableKey, f64>) -> Self {
        Self { crisp_values }
    }

    pub fn crisp_value<I>(&self, var: Variable<I>) -> Option<f64> {
        self.crisp_values.get(&var.0).copied()
    }
}
