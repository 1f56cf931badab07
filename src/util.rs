use num::traits::One;

use crate::{Error, Result, Weight};

/// `n!` without overflow.
pub(crate) fn factorial(n: usize) -> Weight {
    (2..=n).fold(Weight::one(), |acc, x| acc * x)
}

/// `C(n, k)`; zero when `k > n`.
pub(crate) fn binomial(n: usize, k: usize) -> Weight {
    if k > n {
        return Weight::ZERO;
    }
    let k = k.min(n - k);
    // each partial product is itself a binomial, so the division is exact
    (0..k).fold(Weight::one(), |acc, i| acc * (n - i) / (i + 1))
}

/// Accepts strictly positive counts.
pub(crate) fn positive(name: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|&x| x > 0)
        .ok_or(Error::InvalidArgument { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_small_values() {
        assert_eq!(Weight::from(1u32), factorial(0));
        assert_eq!(Weight::from(1u32), factorial(1));
        assert_eq!(Weight::from(120u32), factorial(5));
        assert_eq!(Weight::from(6_227_020_800u64), factorial(13));
    }

    #[test]
    fn binomial_matches_pascal() {
        assert_eq!(Weight::from(252u32), binomial(10, 5));
        assert_eq!(Weight::from(6188u32), binomial(17, 12));
        assert_eq!(Weight::from(1u32), binomial(7, 0));
        assert_eq!(Weight::ZERO, binomial(3, 4));
    }

    #[test]
    fn positive_rejects_non_positive() {
        assert_eq!(Ok(3), positive("n", 3));
        assert_eq!(
            Err(Error::InvalidArgument { name: "n", value: 0 }),
            positive("n", 0)
        );
        assert_eq!(
            Err(Error::InvalidArgument { name: "m", value: -2 }),
            positive("m", -2)
        );
    }
}
