use num::Float;

/// And operator method for combining the degrees of propositions in a fuzzy
/// rule premise, and for truncating a consequent shape at a rule's firing
/// strength (`Min` is the classic Mamdani clip, `Prod` scales instead).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AndOp {
    #[default]
    Min,
    Prod,
}

impl AndOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
        }
    }
}

/// Or operator method for aggregating firing strengths of rules that share a
/// consequent label, and for merging truncated fuzzy sets across labels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
}

impl OrOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
        }
    }
}

/// Method for defuzzificating the aggregated membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DefuzzOp {
    /// Center of gravity over the sample grid:
    /// `Σ(xᵢ·μᵢ) / Σ(μᵢ)`
    #[default]
    Centroid,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
}

impl DefuzzOp {
    /// Returns `None` when the membership carries no mass, in which case a
    /// crisp value is undefined.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Option<F> {
        match self {
            Self::Centroid => {
                let (num, den) = universe
                    .iter()
                    .copied()
                    .zip(membership.iter().copied())
                    .fold((F::zero(), F::zero()), |(num, den), (x, m)| (num + x * m, den + m));

                if den > F::zero() {
                    Some(num / den)
                } else {
                    None
                }
            },
            Self::MeanOfMaximum => {
                let maximum = membership.iter().copied().reduce(F::max)?;

                if maximum <= F::zero() {
                    return None;
                }

                let (len, sum) = universe
                    .iter()
                    .copied()
                    .zip(membership.iter().copied())
                    .filter_map(|(u, m)| if m == maximum { Some(u) } else { None })
                    .fold((0usize, F::zero()), |(len, accum), next| (len + 1, accum + next));

                Some(sum / F::from(len).expect("nonzero count"))
            },
        }
    }
}

#[test]
fn test_and_or_ops() {
    assert_eq!(AndOp::Min.apply(0.3, 0.7), 0.3);
    assert_eq!(AndOp::Prod.apply(0.5, 0.5), 0.25);
    assert_eq!(OrOp::Max.apply(0.3, 0.7), 0.7);
    assert_eq!(OrOp::ProbOr.apply(0.5, 0.5), 0.75);
}

#[test]
fn test_centroid_of_symmetric_membership_is_the_midpoint() {
    let universe = [0., 1., 2., 3., 4.];
    let membership = [0., 0.5, 1., 0.5, 0.];

    assert_eq!(DefuzzOp::Centroid.call(&universe, &membership), Some(2.));
}

#[test]
fn test_defuzz_of_empty_membership_is_undefined() {
    let universe = [0., 1., 2.];
    let membership = [0., 0., 0.];

    assert_eq!(DefuzzOp::Centroid.call(&universe, &membership), None);
    assert_eq!(DefuzzOp::MeanOfMaximum.call(&universe, &membership), None);
}

#[test]
fn test_mean_of_maximum_averages_the_plateau() {
    let universe = [0., 1., 2., 3., 4.];
    let membership = [0., 1., 1., 1., 0.];

    assert_eq!(DefuzzOp::MeanOfMaximum.call(&universe, &membership), Some(2.));
}
