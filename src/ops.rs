//! Aggregations over a single roll, for use with [`Die::map`](crate::Die::map).
//!
//! Rolls coming out of [`enumerate`](crate::enumerate) are sorted ascending and
//! take a fast path; anything else is sorted first.

use std::iter::Sum;

use itertools::Itertools;

fn is_sorted<T: Ord>(roll: &[T]) -> bool {
    roll.windows(2).all(|w| w[0] <= w[1])
}

fn sorted<T: Copy + Ord>(roll: &[T]) -> Vec<T> {
    roll.iter().copied().sorted_unstable().collect()
}

pub fn sum<T>(roll: &[T]) -> T
where
    T: Copy + Sum,
{
    roll.iter().copied().sum()
}

/// Sum of the `k` highest dice, or of all of them when `k` is larger.
pub fn top_sum<T>(roll: &[T], k: usize) -> T
where
    T: Copy + Ord + Sum,
{
    if is_sorted(roll) {
        roll[roll.len().saturating_sub(k)..].iter().copied().sum()
    } else {
        top_sum(&sorted(roll), k)
    }
}

/// Sum of the `k` lowest dice, or of all of them when `k` is larger.
pub fn bottom_sum<T>(roll: &[T], k: usize) -> T
where
    T: Copy + Ord + Sum,
{
    if is_sorted(roll) {
        roll[..k.min(roll.len())].iter().copied().sum()
    } else {
        bottom_sum(&sorted(roll), k)
    }
}

/// Number of different faces showing.
pub fn distinct<T>(roll: &[T]) -> usize
where
    T: Copy + Ord,
{
    if is_sorted(roll) {
        roll.iter().dedup().count()
    } else {
        distinct(&sorted(roll))
    }
}

pub fn highest<T>(roll: &[T]) -> Option<T>
where
    T: Copy + Ord,
{
    roll.iter().copied().max()
}

pub fn lowest<T>(roll: &[T]) -> Option<T>
where
    T: Copy + Ord,
{
    roll.iter().copied().min()
}

pub fn count_eq<T>(roll: &[T], face: T) -> usize
where
    T: Copy + PartialEq,
{
    roll.iter().filter(|&&x| x == face).count()
}

/// Size of the largest group of equal faces.
pub fn longest_run<T>(roll: &[T]) -> usize
where
    T: Copy + Ord,
{
    if is_sorted(roll) {
        roll.iter()
            .dedup_with_count()
            .map(|(n, _)| n)
            .max()
            .unwrap_or(0)
    } else {
        longest_run(&sorted(roll))
    }
}
