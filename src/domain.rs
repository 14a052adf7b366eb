use std::ops::RangeInclusive;

use crate::error::FuzzyError;
use crate::linspace::Linspace;

/// A finite sample grid over a closed interval. The grid only matters for
/// output variables, where aggregation and defuzzification walk it point by
/// point; input variables keep one for documentation and bounds but are
/// fuzzified analytically.
#[derive(Clone, Debug, PartialEq)]
pub struct Domain {
    samples: Vec<f64>,
    min: f64,
    max: f64,
}

impl Domain {
    /// If the step value is not provided, it defaults to 0.1
    pub fn new(range: RangeInclusive<f64>, step: impl Into<Option<f64>>) -> Result<Self, FuzzyError> {
        let min = *range.start();
        let max = *range.end();
        let step = step.into().unwrap_or(0.1);

        if !(step > 0.) || !(max >= min) {
            return Err(FuzzyError::InvalidDomain { min, max, step });
        }

        // The quotient picks up float noise (4.0 / 0.01 == 400.00000000000006),
        // so floor it rather than round
        let num = ((max - min) / step).floor() as usize + 1;
        let samples: Vec<f64> = Linspace::new(min, max, num).collect();

        debug_assert!(samples.windows(2).all(|w| w[0] < w[1]));

        Ok(Self { samples, min, max })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

#[test]
fn test_grid_sizes() {
    // The three grid resolutions used by the scholarship variables
    let gpa = Domain::new(0. ..=4., 0.01).unwrap();
    let flag = Domain::new(0. ..=1., 1.).unwrap();
    let score = Domain::new(0. ..=100., 1.).unwrap();

    assert_eq!(gpa.samples().len(), 401);
    assert_eq!(flag.samples(), &[0., 1.]);
    assert_eq!(score.samples().len(), 101);
    assert_eq!(score.samples().first(), Some(&0.));
    assert_eq!(score.samples().last(), Some(&100.));
}

#[test]
fn test_default_step() {
    let d = Domain::new(0. ..=1., None).unwrap();

    assert_eq!(d.samples().len(), 11);
}

#[test]
fn test_strictly_increasing() {
    let d = Domain::new(-2.5..=7.5, 0.25).unwrap();

    assert!(d.samples().windows(2).all(|w| w[0] < w[1]));
    assert_eq!(d.min(), -2.5);
    assert_eq!(d.max(), 7.5);
}

#[test]
fn test_rejects_bad_grids() {
    assert!(matches!(
        Domain::new(0. ..=4., 0.),
        Err(FuzzyError::InvalidDomain { .. })
    ));
    assert!(matches!(
        Domain::new(4. ..=0., 0.1),
        Err(FuzzyError::InvalidDomain { .. })
    ));
}
