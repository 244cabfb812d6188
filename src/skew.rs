//src/skew.rs

use crate::composition::Composition;

/// AT and GC skew derived from composition counts.
///
/// A skew with a zero denominator is undefined and carried as `None`.
/// `None` renders as "n/a" in reports and is distinct from a true zero
/// skew of a balanced sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewReport {
    /// (A - T) / (A + T), in [-1, 1] when defined.
    pub at_skew: Option<f64>,
    /// (G - C) / (G + C), in [-1, 1] when defined.
    pub gc_skew: Option<f64>,
}

impl SkewReport {
    /// Derives both skews from an existing tally.
    pub fn from_composition(comp: &Composition) -> Self {
        Self {
            at_skew: skew(comp.count(b'A'), comp.count(b'T')),
            gc_skew: skew(comp.count(b'G'), comp.count(b'C')),
        }
    }
}

/// Normalized difference of two counts; `None` when both are zero.
fn skew(x: u64, y: u64) -> Option<f64> {
    let denom = x + y;
    if denom == 0 {
        None
    } else {
        Some((x as f64 - y as f64) / denom as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skews_of(seq: &str) -> SkewReport {
        SkewReport::from_composition(&Composition::of(seq))
    }

    #[test]
    fn test_balanced_sequence_has_zero_skews() {
        let report = skews_of("AATTGGCC");
        assert_eq!(report.at_skew, Some(0.0));
        assert_eq!(report.gc_skew, Some(0.0));
    }

    #[test]
    fn test_skew_extremes() {
        assert_eq!(skews_of("AAAA").at_skew, Some(1.0));
        assert_eq!(skews_of("TTTT").at_skew, Some(-1.0));
        assert_eq!(skews_of("GGGG").gc_skew, Some(1.0));
        assert_eq!(skews_of("CCCC").gc_skew, Some(-1.0));
    }

    #[test]
    fn test_zero_denominator_is_undefined_not_zero() {
        let report = skews_of("GGCC");
        assert_eq!(report.at_skew, None);
        assert_eq!(report.gc_skew, Some(0.0));

        let report = skews_of("NNNNNN");
        assert_eq!(report.at_skew, None);
        assert_eq!(report.gc_skew, None);
    }

    #[test]
    fn test_fractional_skew() {
        // A=3, T=1 -> (3-1)/(3+1) = 0.5
        let report = skews_of("AAAT");
        assert_eq!(report.at_skew, Some(0.5));
    }
}
