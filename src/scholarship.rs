use std::fmt;

use fixed_map::Key;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Domain;
use crate::error::FuzzyError;
use crate::inference::MamdaniInference;
use crate::inputs::Inputs;
use crate::rules::Rules;
use crate::shape::MembershipFunction;
use crate::terms::Terms;
use crate::variable::{Variable, Variables};

/// Grade point average over [0, 4].
#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Gpa {
    Low,
    Medium,
    High,
}

/// Organizational activity, a boolean-like variable over {0, 1}.
#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Activity {
    Inactive,
    Active,
}

/// Economic condition, a boolean-like variable over {0, 1}. Weak sits at 0,
/// adequate at 1.
#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Economy {
    Weak,
    Adequate,
}

/// Output labels over the [0, 100] eligibility score.
#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Eligibility {
    NotEligible,
    Borderline,
    Eligible,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScholarshipTerm {
    Gpa(Gpa),
    Activity(Activity),
    Economy(Economy),
    Eligibility(Eligibility),
}

impl From<Gpa> for ScholarshipTerm {
    fn from(g: Gpa) -> Self {
        Self::Gpa(g)
    }
}

impl From<Activity> for ScholarshipTerm {
    fn from(a: Activity) -> Self {
        Self::Activity(a)
    }
}

impl From<Economy> for ScholarshipTerm {
    fn from(e: Economy) -> Self {
        Self::Economy(e)
    }
}

impl From<Eligibility> for ScholarshipTerm {
    fn from(e: Eligibility) -> Self {
        Self::Eligibility(e)
    }
}

/// Crisp score at or above which a candidate is classified eligible.
pub const ELIGIBLE_THRESHOLD: f64 = 70.;
/// Crisp score at or above which a candidate is still considered.
pub const BORDERLINE_THRESHOLD: f64 = 40.;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Classification {
    Eligible,
    Borderline,
    #[serde(rename = "Not Eligible")]
    NotEligible,
}

impl Classification {
    pub fn from_score(score: f64) -> Self {
        if score >= ELIGIBLE_THRESHOLD {
            Self::Eligible
        } else if score >= BORDERLINE_THRESHOLD {
            Self::Borderline
        } else {
            Self::NotEligible
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Eligible => "Eligible",
            Self::Borderline => "Borderline",
            Self::NotEligible => "Not Eligible",
        };

        f.write_str(label)
    }
}

/// One immutable evaluation record, owned by the caller. Callers that keep a
/// display history append these; the model itself retains nothing between
/// calls.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Evaluation {
    pub score: f64,
    pub classification: Classification,
}

const RULE_COUNT: usize = 5;

/// The fixed scholarship eligibility model: three input variables, one
/// output variable and five rules. Build once, then evaluate any number of
/// candidates; evaluations share no mutable state.
pub struct ScholarshipModel {
    vars: Variables<ScholarshipTerm>,
    rules: Rules<ScholarshipTerm>,
    engine: MamdaniInference,
    gpa: Variable<Gpa>,
    activity: Variable<Activity>,
    economy: Variable<Economy>,
    eligibility: Variable<Eligibility>,
}

impl ScholarshipModel {
    pub fn new() -> Result<Self, FuzzyError> {
        Self::with_rule_order(&[0, 1, 2, 3, 4])
    }

    // The rule base is declarative data, so insertion order must not change
    // any score; tests permute it through here.
    pub(crate) fn with_rule_order(order: &[usize]) -> Result<Self, FuzzyError> {
        let mut gpa_terms = Terms::new();

        gpa_terms.insert(Gpa::Low, MembershipFunction::trapezoidal(0., 0., 2.5, 3.)?);
        gpa_terms.insert(Gpa::Medium, MembershipFunction::triangular(2.5, 3., 3.5)?);
        gpa_terms.insert(Gpa::High, MembershipFunction::trapezoidal(3., 3.5, 4., 4.)?);

        let mut activity_terms = Terms::new();

        activity_terms.insert(Activity::Inactive, MembershipFunction::triangular(0., 0., 1.)?);
        activity_terms.insert(Activity::Active, MembershipFunction::triangular(0., 1., 1.)?);

        let mut economy_terms = Terms::new();

        economy_terms.insert(Economy::Weak, MembershipFunction::triangular(0., 0., 1.)?);
        economy_terms.insert(Economy::Adequate, MembershipFunction::triangular(0., 1., 1.)?);

        let mut eligibility_terms = Terms::new();

        eligibility_terms.insert(Eligibility::NotEligible, MembershipFunction::triangular(0., 0., 50.)?);
        eligibility_terms.insert(Eligibility::Borderline, MembershipFunction::triangular(25., 50., 75.)?);
        eligibility_terms.insert(Eligibility::Eligible, MembershipFunction::triangular(50., 100., 100.)?);

        let mut vars = Variables::new();
        let gpa = vars.add("gpa", Domain::new(0. ..=4., 0.01)?, gpa_terms);
        let activity = vars.add("activity", Domain::new(0. ..=1., 1.)?, activity_terms);
        let economy = vars.add("economic_status", Domain::new(0. ..=1., 1.)?, economy_terms);
        let eligibility = vars.add("eligibility_score", Domain::new(0. ..=100., 1.)?, eligibility_terms);

        let mut rules = Rules::with_capacity(RULE_COUNT);

        for &i in order {
            match i {
                0 => rules.add(
                    gpa.is(Gpa::High).and(activity.is(Activity::Active)),
                    eligibility.is(Eligibility::Eligible),
                ),
                1 => rules.add(
                    gpa.is(Gpa::High).and(activity.is(Activity::Inactive)),
                    eligibility.is(Eligibility::Borderline),
                ),
                2 => rules.add(
                    gpa.is(Gpa::Medium).and(economy.is(Economy::Weak)),
                    eligibility.is(Eligibility::Borderline),
                ),
                3 => rules.add(gpa.is(Gpa::Low), eligibility.is(Eligibility::NotEligible)),
                4 => rules.add(
                    economy.is(Economy::Weak).and(activity.is(Activity::Active)),
                    eligibility.is(Eligibility::Borderline),
                ),
                _ => unreachable!("unknown rule index"),
            }
        }

        Ok(Self {
            vars,
            rules,
            engine: MamdaniInference::default(),
            gpa,
            activity,
            economy,
            eligibility,
        })
    }

    /// Evaluates one candidate. The categorical selections arrive as
    /// booleans and map onto the boolean-like variables the way the form
    /// encodes them: active = 1, weak economic status = 0. GPA outside
    /// [0, 4] is not rejected; it fuzzifies to zero membership and will
    /// surface as `NoRuleFired` if nothing else fires.
    pub fn evaluate(&self, gpa: f64, is_active: bool, weak_economy: bool) -> Result<Evaluation, FuzzyError> {
        let mut inputs = Inputs::new();

        inputs.add(self.gpa, gpa);
        inputs.add(self.activity, if is_active { 1. } else { 0. });
        inputs.add(self.economy, if weak_economy { 0. } else { 1. });

        let outputs = self.engine.eval(&self.vars, &self.rules, &inputs)?;
        let score = outputs.crisp_value(self.eligibility).ok_or(FuzzyError::NoRuleFired)?;
        let classification = Classification::from_score(score);

        debug!(gpa, is_active, weak_economy, score, %classification, "evaluated candidate");

        Ok(Evaluation { score, classification })
    }
}

#[cfg(test)]
use approx::assert_abs_diff_eq;

#[test]
fn test_top_candidate_is_eligible() {
    let model = ScholarshipModel::new().unwrap();

    // Only rule 1 fires, at full strength; the aggregate is the whole
    // `eligible` ramp, whose grid centroid is 2133.5 / 25.5
    let result = model.evaluate(4., true, false).unwrap();

    assert_abs_diff_eq!(result.score, 83.67, epsilon = 0.5);
    assert!(result.score >= ELIGIBLE_THRESHOLD);
    assert_eq!(result.classification, Classification::Eligible);
}

#[test]
fn test_zero_gpa_is_not_eligible() {
    let model = ScholarshipModel::new().unwrap();

    // Rule 4 at full strength, nothing else
    let result = model.evaluate(0., false, false).unwrap();

    assert_abs_diff_eq!(result.score, 16.33, epsilon = 0.5);
    assert!(result.score <= 25.);
    assert_eq!(result.classification, Classification::NotEligible);

    // Rule 5 joins in, but the verdict holds
    let result = model.evaluate(0., true, true).unwrap();

    assert!(result.score < BORDERLINE_THRESHOLD);
    assert_eq!(result.classification, Classification::NotEligible);
}

#[test]
fn test_strong_gpa_without_activity_is_borderline() {
    let model = ScholarshipModel::new().unwrap();

    // Only rule 2 fires, at full strength; the full `borderline` triangle
    // is symmetric around 50
    let result = model.evaluate(3.5, false, false).unwrap();

    assert_abs_diff_eq!(result.score, 50., epsilon = 0.5);
    assert_eq!(result.classification, Classification::Borderline);
}

#[test]
fn test_gpa_far_outside_the_scale_fires_nothing() {
    let model = ScholarshipModel::new().unwrap();

    assert_eq!(model.evaluate(10., false, false), Err(FuzzyError::NoRuleFired));
    assert_eq!(model.evaluate(-3., false, false), Err(FuzzyError::NoRuleFired));
}

#[test]
fn test_score_is_monotonic_in_gpa() {
    let model = ScholarshipModel::new().unwrap();

    // Active + weak economy keeps rule 5 firing at every GPA, so the whole
    // sweep stays defined
    let scores: Vec<f64> = [0., 1., 2., 2.6, 2.75, 3., 3.2, 3.5, 3.8, 4.]
        .iter()
        .map(|&gpa| model.evaluate(gpa, true, true).unwrap().score)
        .collect();

    for pair in scores.windows(2) {
        assert!(pair[1] >= pair[0] - 1e-9, "score dropped from {} to {}", pair[0], pair[1]);
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let model = ScholarshipModel::new().unwrap();

    let first = model.evaluate(3.1, true, true).unwrap();
    let second = model.evaluate(3.1, true, true).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.score.to_bits(), second.score.to_bits());
}

#[test]
fn test_classification_thresholds() {
    assert_eq!(Classification::from_score(70.), Classification::Eligible);
    assert_eq!(Classification::from_score(69.999), Classification::Borderline);
    assert_eq!(Classification::from_score(40.), Classification::Borderline);
    assert_eq!(Classification::from_score(39.999), Classification::NotEligible);
    assert_eq!(Classification::from_score(0.), Classification::NotEligible);

    assert_eq!(Classification::Eligible.to_string(), "Eligible");
    assert_eq!(Classification::Borderline.to_string(), "Borderline");
    assert_eq!(Classification::NotEligible.to_string(), "Not Eligible");
}

#[test]
fn test_evaluation_serializes_for_the_history_table() {
    let model = ScholarshipModel::new().unwrap();
    let result = model.evaluate(4., true, false).unwrap();

    let json = serde_json::to_string(&result).unwrap();

    assert!(json.contains("\"classification\":\"Eligible\""));

    let restored: Evaluation = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, result);

    let json = serde_json::to_string(&Classification::NotEligible).unwrap();

    assert_eq!(json, "\"Not Eligible\"");
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn score_is_independent_of_rule_order(
            order in Just(vec![0usize, 1, 2, 3, 4]).prop_shuffle(),
            gpa in 0.0f64..=4.0,
            is_active: bool,
            weak_economy: bool,
        ) {
            let canonical = ScholarshipModel::new().unwrap();
            let permuted = ScholarshipModel::with_rule_order(&order).unwrap();

            let a = canonical.evaluate(gpa, is_active, weak_economy);
            let b = permuted.evaluate(gpa, is_active, weak_economy);

            match (a, b) {
                (Ok(a), Ok(b)) => {
                    // min/max never round, so the scores match bit for bit
                    prop_assert_eq!(a.score.to_bits(), b.score.to_bits());
                    prop_assert_eq!(a.classification, b.classification);
                },
                (a, b) => prop_assert_eq!(a, b),
            }
        }

        #[test]
        fn score_stays_on_the_output_scale(gpa in 0.0f64..=4.0, is_active: bool, weak_economy: bool) {
            let model = ScholarshipModel::new().unwrap();

            if let Ok(result) = model.evaluate(gpa, is_active, weak_economy) {
                prop_assert!((0. ..=100.).contains(&result.score));
            }
        }
    }
}
