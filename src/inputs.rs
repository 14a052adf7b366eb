use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// The crisp facts for one evaluation, one value per input variable. A value
/// outside a variable's nominal bounds is allowed and simply fuzzifies to
/// zero membership everywhere.
#[derive(Default)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add<I>(&mut self, var: Variable<I>, val: f64) {
        self.0.insert(var.0, val);
    }
}
