use thiserror::Error;

/// Everything that can go wrong while building or running the inference
/// system. Out-of-range crisp inputs are deliberately not represented here:
/// fuzzification is total and simply yields degree zero outside a shape's
/// support.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    /// Membership-function control points must be non-decreasing.
    #[error("invalid membership shape: control points {points:?} are not non-decreasing")]
    InvalidShape { points: Vec<f64> },

    /// A domain grid could not be constructed (non-positive step or an
    /// inverted range).
    #[error("invalid domain [{min}, {max}] with step {step}")]
    InvalidDomain { min: f64, max: f64, step: f64 },

    /// No rule produced any positive firing strength, so the aggregated
    /// fuzzy set has zero mass and the centroid is undefined.
    #[error("no rule fired: aggregated output membership is empty")]
    NoRuleFired,

    /// A rule premise references a variable that was given no crisp fact.
    #[error("no input fact supplied for variable '{variable}'")]
    MissingInput { variable: &'static str },
}
