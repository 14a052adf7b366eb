use crate::error::FuzzyError;

/// A membership shape evaluated analytically at the exact crisp value,
/// rather than interpolated from pre-sampled grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MembershipFunction {
    /// Degree rises linearly a→b, peaks at b, falls linearly b→c.
    Triangular { a: f64, b: f64, c: f64 },
    /// Degree rises a→b, holds 1 through [b, c], falls c→d.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self, FuzzyError> {
        if a <= b && b <= c {
            Ok(Self::Triangular { a, b, c })
        } else {
            Err(FuzzyError::InvalidShape { points: vec![a, b, c] })
        }
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self, FuzzyError> {
        if a <= b && b <= c && c <= d {
            Ok(Self::Trapezoidal { a, b, c, d })
        } else {
            Err(FuzzyError::InvalidShape {
                points: vec![a, b, c, d],
            })
        }
    }

    /// Degree of membership of `x`, total over all reals and always within
    /// [0, 1]. A zero-width rising or falling edge (a == b or c == d) never
    /// reaches its linear arm, so degenerate shapes fall straight through to
    /// the plateau arm instead of dividing by zero.
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Self::Triangular { a, b, c } => {
                if x < a || x > c {
                    0.
                } else if x < b {
                    (x - a) / (b - a)
                } else if x > b {
                    (c - x) / (c - b)
                } else {
                    1.
                }
            },
            Self::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.
                } else if x < b {
                    (x - a) / (b - a)
                } else if x > c {
                    (d - x) / (d - c)
                } else {
                    1.
                }
            },
        }
    }

    /// A point at which the degree is exactly 1.
    pub fn peak(&self) -> f64 {
        match *self {
            Self::Triangular { b, .. } => b,
            Self::Trapezoidal { b, .. } => b,
        }
    }
}

#[test]
fn test_triangular_evaluation() {
    let tri = MembershipFunction::triangular(25., 50., 75.).unwrap();

    assert_eq!(tri.evaluate(24.), 0.);
    assert_eq!(tri.evaluate(25.), 0.);
    assert_eq!(tri.evaluate(37.5), 0.5);
    assert_eq!(tri.evaluate(50.), 1.);
    assert_eq!(tri.evaluate(62.5), 0.5);
    assert_eq!(tri.evaluate(75.), 0.);
    assert_eq!(tri.evaluate(100.), 0.);
}

#[test]
fn test_trapezoidal_evaluation() {
    let trap = MembershipFunction::trapezoidal(0., 0.5, 2.5, 3.).unwrap();

    assert_eq!(trap.evaluate(-1.), 0.);
    assert_eq!(trap.evaluate(0.25), 0.5);
    assert_eq!(trap.evaluate(0.5), 1.);
    assert_eq!(trap.evaluate(1.7), 1.);
    assert_eq!(trap.evaluate(2.5), 1.);
    assert_eq!(trap.evaluate(2.75), 0.5);
    assert_eq!(trap.evaluate(3.1), 0.);
}

#[test]
fn test_zero_width_edges() {
    // tri(0, 0, 50) jumps straight to 1 at the left edge
    let tri = MembershipFunction::triangular(0., 0., 50.).unwrap();

    assert_eq!(tri.evaluate(0.), 1.);
    assert_eq!(tri.evaluate(25.), 0.5);

    // trap(3, 3.5, 4, 4) holds the plateau through the right edge
    let trap = MembershipFunction::trapezoidal(3., 3.5, 4., 4.).unwrap();

    assert_eq!(trap.evaluate(4.), 1.);
    assert_eq!(trap.evaluate(3.5), 1.);
    assert_eq!(trap.evaluate(3.25), 0.5);
    assert_eq!(trap.evaluate(4.0001), 0.);
}

#[test]
fn test_rejects_decreasing_points() {
    assert_eq!(
        MembershipFunction::triangular(1., 0.5, 2.),
        Err(FuzzyError::InvalidShape {
            points: vec![1., 0.5, 2.]
        })
    );
    assert!(MembershipFunction::trapezoidal(0., 1., 0.5, 2.).is_err());
    // NaN control points cannot be ordered
    assert!(MembershipFunction::triangular(0., f64::NAN, 1.).is_err());
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_shape()(raw in prop::collection::vec(-100.0f64..100., 4), tri in any::<bool>()) -> MembershipFunction {
            let mut pts = raw;
            pts.sort_unstable_by(|a, b| a.partial_cmp(b).expect("not to find unsortable floats"));

            if tri {
                MembershipFunction::triangular(pts[0], pts[1], pts[2]).expect("sorted points")
            } else {
                MembershipFunction::trapezoidal(pts[0], pts[1], pts[2], pts[3]).expect("sorted points")
            }
        }
    }

    proptest! {
        #[test]
        fn degree_always_within_unit_interval(shape in arb_shape(), x in -200.0f64..200.) {
            let degree = shape.evaluate(x);

            prop_assert!((0. ..=1.).contains(&degree));
        }

        #[test]
        fn degree_is_one_at_peak(shape in arb_shape()) {
            prop_assert_eq!(shape.evaluate(shape.peak()), 1.);
        }
    }
}
