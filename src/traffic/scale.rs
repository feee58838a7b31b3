/// Square-root scale: output grows with the square root of the input, so a
/// circle's *area* is proportional to the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps `value` into the range. Negative values are treated as 0; values
    /// above the domain extrapolate past the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = (self.domain.0.sqrt(), self.domain.1.sqrt());
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        let t = (value.max(0.0).sqrt() - d0) / (d1 - d0);
        r0 + (r1 - r0) * t
    }
}

/// Quantize scale over `[0, 1]` with three equal-width bins.
///
/// Returns the bin index (0, 1 or 2). Inputs below 0 land in the first bin and
/// inputs at or above 1 in the last.
pub fn quantize_thirds(value: f64) -> usize {
    if value < 1.0 / 3.0 {
        0
    } else if value < 2.0 / 3.0 {
        1
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_sqrt_scale_endpoints() {
        let scale = SqrtScale::new((0.0, 100.0), (0.0, 25.0));
        assert!(close(scale.apply(0.0), 0.0));
        assert!(close(scale.apply(100.0), 25.0));
        assert!(close(scale.apply(25.0), 12.5));
    }

    #[test]
    fn test_sqrt_scale_with_floor() {
        let scale = SqrtScale::new((0.0, 16.0), (3.0, 50.0));
        assert!(close(scale.apply(0.0), 3.0));
        assert!(close(scale.apply(4.0), 3.0 + 47.0 * 0.5));
        assert!(close(scale.apply(16.0), 50.0));
    }

    #[test]
    fn test_sqrt_scale_out_of_domain() {
        let scale = SqrtScale::new((0.0, 4.0), (3.0, 50.0));
        assert_eq!(scale.apply(-9.0), 3.0);
        assert!(close(scale.apply(16.0), 3.0 + 47.0 * 2.0));
    }

    #[test]
    fn test_sqrt_scale_degenerate_domain() {
        let scale = SqrtScale::new((0.0, 0.0), (3.0, 50.0));
        assert_eq!(scale.apply(10.0), 3.0);
    }

    #[test]
    fn test_quantize_thirds() {
        assert_eq!(quantize_thirds(0.0), 0);
        assert_eq!(quantize_thirds(0.33), 0);
        assert_eq!(quantize_thirds(1.0 / 3.0), 1);
        assert_eq!(quantize_thirds(0.5), 1);
        assert_eq!(quantize_thirds(0.66), 1);
        assert_eq!(quantize_thirds(2.0 / 3.0), 2);
        assert_eq!(quantize_thirds(1.0), 2);
        assert_eq!(quantize_thirds(-0.2), 0);
        assert_eq!(quantize_thirds(1.7), 2);
    }
}
