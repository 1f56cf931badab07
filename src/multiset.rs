//! Order-independent dice rolls with their multiplicities.
//!
//! Rolling `n` dice with `m` faces gives `m^n` ordered tuples, but most
//! aggregate questions (sums, highest dice, distinct faces) do not care about
//! order. Sorting every tuple collapses them into `C(n+m-1, n)` classes, and the
//! size of each class is a multinomial coefficient. Walking the classes instead
//! of the tuples keeps `12d6` at 6188 steps instead of about two billion.

use itertools::Itertools;
use log::{debug, trace};
use num::Integer;

use crate::util::{binomial, factorial, positive};
use crate::value::{DefaultValue, Value};
use crate::{Error, Result, Weight, DIRECT_MAX_ITERATIONS};

/// A sorted roll and the number of ordered rolls that sort to it.
pub type WeightedOutcome<T = DefaultValue> = (Vec<T>, Weight);

/// Every sorted roll of `n` dice with faces `1..=m`, in ascending
/// lexicographic order, each paired with its multiplicity.
///
/// The weights always sum to `m^n`. Fails with
/// [`Error::TooLarge`](crate::Error::TooLarge) when listing every roll would
/// take more than a fixed amount of work.
///
/// ```
/// let rolls = dicebag::enumerate(2, 3).unwrap();
/// assert_eq!(rolls.len(), 6);
/// assert_eq!(rolls[1], (vec![1, 2], 2u32.into()));
/// ```
pub fn enumerate(n: i64, m: i64) -> Result<Vec<WeightedOutcome>> {
    let n = positive("n", n)?;
    let m = positive("m", m)?;
    let m = DefaultValue::try_from(m).map_err(|_| Error::InvalidArgument {
        name: "m",
        value: m as i64,
    })?;
    enumerate_sorted(n, (1..=m).collect())
}

/// Same as [`enumerate`], but the die shows arbitrary faces.
///
/// Faces are sorted and deduplicated first, so `[3, 1, 3]` behaves like a
/// two-sided die with faces `1` and `3`.
pub fn enumerate_faces<T, I>(n: i64, faces: I) -> Result<Vec<WeightedOutcome<T>>>
where
    T: Value,
    I: IntoIterator<Item = T>,
{
    let n = positive("n", n)?;
    let faces: Vec<T> = faces.into_iter().sorted().dedup().collect();
    if faces.is_empty() {
        return Err(Error::InvalidArgument {
            name: "faces",
            value: 0,
        });
    }
    enumerate_sorted(n, faces)
}

/// Number of distinct orderings of `outcome`: `n! / (r_1! · … · r_k!)` where
/// `r_i` are the lengths of its runs of equal values.
///
/// The outcome must be sorted, otherwise equal values that are not adjacent
/// count as separate runs.
pub fn multiplicity<T>(outcome: &[T]) -> Weight
where
    T: PartialEq,
{
    let denom: Weight = outcome
        .iter()
        .dedup_with_count()
        .map(|(run, _)| factorial(run))
        .product();
    let (weight, rem) = factorial(outcome.len()).div_rem(&denom);
    debug_assert!(rem == Weight::ZERO, "multinomial division left a remainder");
    weight
}

/// Number of sorted rolls of `n` dice with `m` faces, `C(n+m-1, n)`.
pub fn outcome_count(n: i64, m: i64) -> Result<Weight> {
    let n = positive("n", n)?;
    let m = positive("m", m)?;
    Ok(binomial(n + m - 1, n))
}

fn enumerate_sorted<T>(n: usize, faces: Vec<T>) -> Result<Vec<WeightedOutcome<T>>>
where
    T: Value,
{
    let iterations = enumeration_size(n, faces.len())?;
    trace!("listing sorted rolls of {n} dice, {iterations} iterations");
    let result = faces
        .into_iter()
        .combinations_with_replacement(n)
        .map(|outcome| {
            let weight = multiplicity(&outcome);
            (outcome, weight)
        })
        .collect_vec();
    debug!("enumerated {} sorted outcomes of {n} dice", result.len());
    Ok(result)
}

/// Sorted rolls times dice per roll, checked against `DIRECT_MAX_ITERATIONS`
/// before anything is allocated. `faces` must be non-zero.
fn enumeration_size(n: usize, faces: usize) -> Result<u128> {
    let top = n as u128 + faces as u128 - 1;
    let k = (n as u128).min(faces as u128 - 1);
    // C(top, i) grows with i up to k, so stop as soon as it is past the limit
    let mut count = 1u128;
    for i in 0..k {
        count = count
            .checked_mul(top - i)
            .map_or(u128::MAX, |x| x / (i + 1));
        if count > DIRECT_MAX_ITERATIONS {
            return Err(Error::TooLarge { iterations: count });
        }
    }
    match count.checked_mul(n as u128) {
        Some(iterations) if iterations <= DIRECT_MAX_ITERATIONS => Ok(iterations),
        iterations => Err(Error::TooLarge {
            iterations: iterations.unwrap_or(u128::MAX),
        }),
    }
}
