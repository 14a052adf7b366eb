use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

use fixed_map::Key as FixedKey;
use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::domain::Domain;
use crate::shape::MembershipFunction;
use crate::terms::Terms;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// A typed handle to a registered linguistic variable. The `I` parameter is
/// the variable's own term enum, so a rule premise can only pair a variable
/// with one of its own labels.
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        Variable(self.0, PhantomData)
    }
}

impl<I> Copy for Variable<I> {}

/// The registry of all linguistic variables of one model, input and output
/// alike, keyed for reference from rule expressions.
#[derive(Default)]
pub struct Variables<T>(pub(crate) SlotMap<VariableKey, LinguisticVariable<T>>);

impl<T: Eq + Hash> Variables<T> {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    pub fn add<I: Into<T> + FixedKey + 'static>(
        &mut self,
        name: &'static str,
        domain: Domain,
        terms: Terms<I>,
    ) -> Variable<I> {
        let term_shapes = terms.0.iter().map(|(k, v)| (k.into(), *v));
        let key = self
            .0
            .insert(LinguisticVariable::new(name, domain, term_shapes, terms.len()));

        Variable(key, PhantomData)
    }

    /// Degrees of membership of `crisp_value` in every label of `var`,
    /// evaluated analytically at the exact input.
    pub fn fuzzify<I>(&self, var: Variable<I>, crisp_value: f64) -> HashMap<T, f64>
    where
        T: Copy,
    {
        self.0[var.0].fuzzify(crisp_value)
    }
}

pub(crate) struct LinguisticVariable<T> {
    pub(crate) name: &'static str,
    pub(crate) domain: Domain,
    pub(crate) terms: HashMap<T, MembershipFunction>,
}

impl<T: Eq + Hash> LinguisticVariable<T> {
    fn new(
        name: &'static str,
        domain: Domain,
        term_shapes: impl IntoIterator<Item = (T, MembershipFunction)>,
        n_terms: usize,
    ) -> Self {
        let mut terms = HashMap::with_capacity(n_terms);

        for (term, shape) in term_shapes {
            terms.insert(term, shape);
        }

        Self { name, domain, terms }
    }

    pub(crate) fn fuzzify(&self, crisp_value: f64) -> HashMap<T, f64>
    where
        T: Copy,
    {
        let degrees: HashMap<T, f64> = self
            .terms
            .iter()
            .map(|(term, shape)| (*term, shape.evaluate(crisp_value)))
            .collect();

        debug!(variable = self.name, crisp_value, n_terms = degrees.len(), "fuzzified input");

        degrees
    }
}

#[cfg(test)]
use fixed_map::Key;

#[cfg(test)]
#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
enum Pressure {
    Low,
    High,
}

#[test]
fn test_fuzzify_evaluates_every_label() {
    let mut terms = Terms::new();

    terms.insert(Pressure::Low, MembershipFunction::triangular(0., 0., 60.).unwrap());
    terms.insert(Pressure::High, MembershipFunction::triangular(40., 100., 100.).unwrap());

    let mut vars = Variables::<Pressure>::new();
    let pressure = vars.add("pressure", Domain::new(0. ..=100., 1.).unwrap(), terms);

    let degrees = vars.fuzzify(pressure, 45.);

    assert_eq!(degrees[&Pressure::Low], 0.25);
    assert_eq!(degrees[&Pressure::High], (45. - 40.) / 60.);
}

#[test]
fn test_fuzzify_is_total_outside_the_domain() {
    let mut terms = Terms::new();

    terms.insert(Pressure::Low, MembershipFunction::triangular(0., 0., 60.).unwrap());
    terms.insert(Pressure::High, MembershipFunction::triangular(40., 100., 100.).unwrap());

    let mut vars = Variables::<Pressure>::new();
    let pressure = vars.add("pressure", Domain::new(0. ..=100., 1.).unwrap(), terms);

    for out_of_range in [-10., 150., f64::MAX] {
        let degrees = vars.fuzzify(pressure, out_of_range);

        assert!(degrees.values().all(|d| *d == 0.));
    }
}
