use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::error::FuzzyError;
use crate::inputs::Inputs;
use crate::ops::{AndOp, DefuzzOp, OrOp};
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::{VariableKey, Variables};

/// Degrees of membership per term, per fuzzified input variable.
pub type Facts<T> = HashMap<VariableKey, HashMap<T, f64>>;

/// Aggregate firing strength per consequent term, per output variable.
pub type FiringStrengths<T> = HashMap<VariableKey, HashMap<T, f64>>;

/// A Mamdani inference engine with its operator choices spelled out instead
/// of hidden behind library defaults. `Default` gives the classic scheme:
/// min for premise AND and consequent truncation, max for aggregation,
/// centroid for defuzzification.
///
/// The engine holds no state between evaluations; `eval` borrows the
/// variables immutably, so concurrent evaluations over one model need no
/// coordination.
#[derive(Debug, Default)]
pub struct MamdaniInference {
    and_op: AndOp,
    or_op: OrOp,
    defuzz_op: DefuzzOp,
}

impl MamdaniInference {
    pub fn new(and_op: AndOp, or_op: OrOp, defuzz_op: DefuzzOp) -> Self {
        Self {
            and_op,
            or_op,
            defuzz_op,
        }
    }

    /// Runs one full evaluation: fuzzify the crisp facts, fire the rule
    /// base, aggregate the truncated consequent sets over each output
    /// variable's sample grid, and defuzzify to a crisp value per output.
    pub fn eval<T: Copy + Eq + Hash>(
        &self,
        vars: &Variables<T>,
        rules: &Rules<T>,
        inputs: &Inputs,
    ) -> Result<Outputs, FuzzyError> {
        // Fuzzificate facts
        let mut facts: Facts<T> = HashMap::with_capacity(inputs.0.len());

        for (key, crisp) in &inputs.0 {
            facts.insert(*key, vars.0[*key].fuzzify(*crisp));
        }

        let strengths = self.fire(vars, rules, &facts)?;

        if strengths.is_empty() {
            return Err(FuzzyError::NoRuleFired);
        }

        // Aggregate and defuzzificate each fired output variable
        let mut crisp_values = HashMap::with_capacity(strengths.len());

        for (var_key, label_strengths) in &strengths {
            let var = &vars.0[*var_key];
            let universe = var.domain.samples();
            let membership: Vec<f64> = universe
                .iter()
                .map(|&x| {
                    label_strengths.iter().fold(0., |acc, (term, strength)| {
                        // Truncate the consequent shape at the label's firing
                        // strength, then merge across labels
                        let truncated = self.and_op.apply(*strength, var.terms[term].evaluate(x));

                        self.or_op.apply(acc, truncated)
                    })
                })
                .collect();

            let Some(crisp) = self.defuzz_op.call(universe, &membership) else {
                return Err(FuzzyError::NoRuleFired);
            };

            debug!(variable = var.name, crisp, "defuzzified output");

            crisp_values.insert(*var_key, crisp);
        }

        Ok(Outputs::new(crisp_values))
    }

    /// Evaluates every rule against the fuzzified facts. A rule's firing
    /// strength is the fuzzy AND across its premise propositions; rules
    /// sharing a consequent label are merged with fuzzy OR. Rules with an
    /// empty premise or zero strength contribute nothing, so the returned
    /// map is independent of rule order.
    pub fn fire<T: Copy + Eq + Hash>(
        &self,
        vars: &Variables<T>,
        rules: &Rules<T>,
        facts: &Facts<T>,
    ) -> Result<FiringStrengths<T>, FuzzyError> {
        let mut strengths: FiringStrengths<T> = HashMap::new();

        for (i, rule) in rules.0.iter().enumerate() {
            let mut strength: Option<f64> = None;

            for (var_key, term) in rule.premise.propositions() {
                let var_facts = facts.get(&var_key).ok_or(FuzzyError::MissingInput {
                    variable: vars.0[var_key].name,
                })?;
                let degree = var_facts.get(term).copied().unwrap_or(0.);

                strength = Some(match strength {
                    Some(s) => self.and_op.apply(s, degree),
                    None => degree,
                });
            }

            let Some(strength) = strength else { continue };

            trace!(rule = i, strength, "evaluated rule premise");

            if strength <= 0. {
                continue;
            }

            for (var_key, term) in rule.consequence.propositions() {
                let entry = strengths.entry(var_key).or_default().entry(*term).or_insert(0.);

                *entry = self.or_op.apply(*entry, strength);
            }
        }

        Ok(strengths)
    }
}

#[test]
fn test_fan_speed() {
    use approx::assert_relative_eq;
    use fixed_map::Key;

    use crate::domain::Domain;
    use crate::shape::MembershipFunction;
    use crate::terms::Terms;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Temp {
        Cold,
        Hot,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Speed {
        Slow,
        Fast,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    enum FanTerms {
        Temp(Temp),
        Speed(Speed),
    }

    impl From<Temp> for FanTerms {
        fn from(t: Temp) -> Self {
            Self::Temp(t)
        }
    }

    impl From<Speed> for FanTerms {
        fn from(s: Speed) -> Self {
            Self::Speed(s)
        }
    }

    let mut temp_terms = Terms::new();
    let mut speed_terms = Terms::new();

    temp_terms.insert(Temp::Cold, MembershipFunction::triangular(0., 0., 20.).unwrap());
    temp_terms.insert(Temp::Hot, MembershipFunction::triangular(10., 30., 30.).unwrap());
    speed_terms.insert(Speed::Slow, MembershipFunction::triangular(0., 0., 10.).unwrap());
    speed_terms.insert(Speed::Fast, MembershipFunction::triangular(0., 10., 10.).unwrap());

    let mut vars = Variables::<FanTerms>::new();
    let temp = vars.add("temperature", Domain::new(0. ..=30., 1.).unwrap(), temp_terms);
    let speed = vars.add("speed", Domain::new(0. ..=10., 1.).unwrap(), speed_terms);
    let mut rules = Rules::with_capacity(2);

    rules.add(temp.is(Temp::Cold), speed.is(Speed::Slow));
    rules.add(temp.is(Temp::Hot), speed.is(Speed::Fast));

    let model = MamdaniInference::default();

    // temp 5 -> only Slow fires at 0.75; the truncated ramp over the
    // 11-point grid has mass 5.05 and moment 16.25
    let mut inputs = Inputs::new();

    inputs.add(temp, 5.);

    let outputs = model.eval(&vars, &rules, &inputs).unwrap();

    assert_relative_eq!(outputs.crisp_value(speed).unwrap(), 16.25 / 5.05, epsilon = 1e-12);
    assert_eq!(outputs.crisp_value(temp), None);

    // temp 25 mirrors the first case onto the rising ramp
    let mut inputs = Inputs::new();

    inputs.add(temp, 25.);

    let outputs = model.eval(&vars, &rules, &inputs).unwrap();

    assert_relative_eq!(outputs.crisp_value(speed).unwrap(), 10. - 16.25 / 5.05, epsilon = 1e-12);

    // scaling with Prod instead of clipping cancels out of the centroid,
    // leaving the untruncated ramp's center of gravity
    let prod_model = MamdaniInference::new(AndOp::Prod, OrOp::Max, DefuzzOp::Centroid);
    let mut inputs = Inputs::new();

    inputs.add(temp, 5.);

    let outputs = prod_model.eval(&vars, &rules, &inputs).unwrap();

    assert_relative_eq!(outputs.crisp_value(speed).unwrap(), 3., epsilon = 1e-12);
}

#[test]
fn test_no_rule_fired_and_missing_input() {
    use fixed_map::Key;

    use crate::domain::Domain;
    use crate::shape::MembershipFunction;
    use crate::terms::Terms;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Temp {
        Cold,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Speed {
        Slow,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    enum FanTerms {
        Temp(Temp),
        Speed(Speed),
    }

    impl From<Temp> for FanTerms {
        fn from(t: Temp) -> Self {
            Self::Temp(t)
        }
    }

    impl From<Speed> for FanTerms {
        fn from(s: Speed) -> Self {
            Self::Speed(s)
        }
    }

    let mut temp_terms = Terms::new();
    let mut speed_terms = Terms::new();

    temp_terms.insert(Temp::Cold, MembershipFunction::triangular(0., 0., 20.).unwrap());
    speed_terms.insert(Speed::Slow, MembershipFunction::triangular(0., 0., 10.).unwrap());

    let mut vars = Variables::<FanTerms>::new();
    let temp = vars.add("temperature", Domain::new(0. ..=30., 1.).unwrap(), temp_terms);
    let speed = vars.add("speed", Domain::new(0. ..=10., 1.).unwrap(), speed_terms);
    let mut rules = Rules::new();

    rules.add(temp.is(Temp::Cold), speed.is(Speed::Slow));

    let model = MamdaniInference::default();

    // A fact outside every premise's support fires nothing
    let mut inputs = Inputs::new();

    inputs.add(temp, 50.);

    assert_eq!(model.eval(&vars, &rules, &inputs), Err(FuzzyError::NoRuleFired));

    // A premise over a variable with no fact at all is a caller bug
    let inputs = Inputs::new();

    assert_eq!(
        model.eval(&vars, &rules, &inputs),
        Err(FuzzyError::MissingInput { variable: "temperature" })
    );
}
