use std::borrow::Borrow;
use std::fmt::Debug;

use itertools::Itertools;
use log::debug;
use num::traits::One;
use rand::{thread_rng, RngCore};

use super::inner::DieInner;
use super::{DieLike, Iter};
use crate::multiset::enumerate;
use crate::util::positive;
use crate::value::{ComputableValue, ComputedValue, DefaultValue, Value};
use crate::{Error, Ptr, Ratio, Result, Weight, DIRECT_MAX_ITERATIONS};

/// An exact discrete distribution over values of `T`.
///
/// Values are kept sorted and distinct, each with an integer weight; the
/// probability of a value is its weight over [`Die::denom`]. Weights are
/// arbitrary precision, so no amount of joining can overflow them. Cloning is
/// cheap: the storage is shared.
#[derive(Clone)]
pub struct Die<T = DefaultValue>(Ptr<DieInner<T>>)
where
    T: Value;

impl Die {
    /// A fair die with faces `1..=faces`.
    pub fn numeric(faces: i64) -> Result<Self> {
        let max = DefaultValue::try_from(positive("m", faces)?)
            .map_err(|_| Error::InvalidArgument {
                name: "m",
                value: faces,
            })?;
        Self::uniform(1..=max)
    }

    /// All ordered rolls of `n` dice with `m` faces, one tuple per roll.
    ///
    /// Every tuple is materialized, so this fails with
    /// [`Error::TooLarge`](crate::Error::TooLarge) once `m^n` gets big.
    pub fn ordered(n: i64, m: i64) -> Result<Die<Vec<DefaultValue>>> {
        let n = positive("n", n)?;
        Self::numeric(m)?.repeat(n)
    }

    /// All rolls of `n` dice with `m` faces with order ignored; each value
    /// is the roll sorted ascending.
    pub fn unordered(n: i64, m: i64) -> Result<Die<Vec<DefaultValue>>> {
        Die::from_weights(enumerate(n, m)?)
    }
}

impl<T> Die<T>
where
    T: Value,
{
    #[must_use]
    pub fn scalar(value: T) -> Self {
        Self::new(DieInner::scalar(value))
    }

    /// Every distinct value gets the same weight; repeats count once.
    pub fn uniform<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_weights(
            values
                .into_iter()
                .sorted()
                .dedup()
                .map(|v| (v, Weight::one())),
        )
    }

    /// Builds a distribution from `(value, weight)` pairs.
    ///
    /// Equal values are merged, zero weights dropped, and the weights reduced
    /// by their common divisor. They do not need to be normalized.
    pub fn from_weights<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, Weight)>,
    {
        let die = DieInner::from_weights(pairs)?;
        debug!(
            "distribution with {} values over {}",
            die.values().len(),
            die.denom()
        );
        Ok(Self::new(die))
    }

    #[must_use]
    pub fn denom(&self) -> &Weight {
        self.0.denom()
    }

    #[must_use]
    pub fn values(&self) -> &[T] {
        self.0.values()
    }

    #[must_use]
    pub fn weights(&self) -> &[Weight] {
        self.0.weights()
    }

    #[must_use]
    pub fn weight_of(&self, value: &T) -> Weight {
        self.0.weight_of(value)
    }

    /// Exact probability of `value`; zero when it cannot come up.
    #[must_use]
    pub fn probability_of(&self, value: &T) -> Ratio {
        self.0.probability_of(value)
    }

    #[must_use]
    pub fn min_value(&self) -> &T {
        &self.values()[0]
    }

    #[must_use]
    pub fn max_value(&self) -> &T {
        &self.values()[self.values().len() - 1]
    }

    #[must_use]
    pub fn sample_rng<G>(&self, rng: &mut G) -> &T
    where
        G: RngCore,
    {
        self.0.sample_rng(rng)
    }

    #[must_use]
    pub fn sample_many_rng<G>(&self, n: usize, rng: &mut G) -> Vec<&T>
    where
        G: RngCore,
    {
        (0..n).map(|_| self.sample_rng(rng)).collect()
    }

    #[must_use]
    pub fn sample(&self) -> &T {
        self.sample_rng(&mut thread_rng())
    }

    #[must_use]
    pub fn sample_many(&self, n: usize) -> Vec<&T> {
        self.sample_many_rng(n, &mut thread_rng())
    }

    #[must_use]
    pub fn modes(&self) -> Vec<&T> {
        self.0.modes()
    }

    #[must_use]
    pub fn mode(&self) -> Option<&T> {
        self.0.mode()
    }

    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        self.0.probabilities()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.0.iter()
    }

    #[must_use]
    pub fn map<O, F>(&self, f: F) -> Die<O>
    where
        O: Value,
        F: Fn(&T) -> O,
    {
        Die::new(self.0.map(f))
    }

    #[must_use]
    pub fn apply_two<R, O, F>(&self, rhs: &Die<R>, f: F) -> Die<O>
    where
        R: Value,
        O: Value,
        F: Fn(&T, &R) -> O,
    {
        Die::new(self.0.apply_two(&rhs.0, f))
    }

    /// Joins `dice` and maps every combination of their values through `f`.
    pub fn apply<I, D, O, F>(dice: I, f: F) -> Result<Die<O>>
    where
        I: Borrow<[D]>,
        D: Borrow<Self>,
        O: Value,
        F: Fn(&[&T]) -> O,
    {
        Ok(Die::new(DieInner::<T>::apply::<I, D, Self, O, F>(dice, f)?))
    }

    /// `n` independent copies of this die, as ordered tuples.
    pub fn repeat(&self, n: usize) -> Result<Die<Vec<T>>> {
        let faces = self.values().len() as u128;
        let iterations = u32::try_from(n)
            .ok()
            .and_then(|exp| faces.checked_pow(exp))
            .map_or(u128::MAX, |x| x.max(n as u128));
        if iterations > DIRECT_MAX_ITERATIONS {
            return Err(Error::TooLarge { iterations });
        }
        Self::combine(vec![self; n])
    }

    pub fn combine<I, D>(dice: I) -> Result<Die<Vec<T>>>
    where
        I: Borrow<[D]>,
        D: Borrow<Self>,
    {
        Ok(Die::new(DieInner::<T>::combine::<I, D, Self>(dice)?))
    }

    #[must_use]
    pub(crate) fn new(value: DieInner<T>) -> Self {
        Self(Ptr::new(value))
    }
}

impl<T> Die<T>
where
    T: ComputableValue,
{
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.0.mean()
    }

    #[must_use]
    pub fn variance(&self) -> f64 {
        self.0.variance()
    }

    #[must_use]
    pub fn stddev(&self) -> f64 {
        self.0.stddev()
    }

    #[must_use]
    pub fn computed_values(&self) -> Vec<ComputedValue> {
        self.0.computed_values()
    }
}

impl<T> DieLike<T> for Die<T>
where
    T: Value,
{
    fn denom(&self) -> &Weight {
        self.0.denom()
    }

    fn values(&self) -> &[T] {
        self.0.values()
    }

    fn weights(&self) -> &[Weight] {
        self.0.weights()
    }
}

impl<T> PartialEq for Die<T>
where
    T: Value,
{
    fn eq(&self, other: &Self) -> bool {
        Ptr::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl<T> Eq for Die<T> where T: Value {}

impl<T> Debug for Die<T>
where
    T: Value,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Die")
            .field("denom", self.0.denom())
            .field("values", &self.0.values())
            .field("weights", &self.0.weights())
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a Die<T>
where
    T: Value,
{
    type Item = (&'a T, &'a Weight);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn numeric_die() {
        let d6 = Die::numeric(6).unwrap();
        assert_eq!(&[1, 2, 3, 4, 5, 6], d6.values());
        assert_eq!(&Weight::from(6u32), d6.denom());
        assert_eq!(&1, d6.min_value());
        assert_eq!(&6, d6.max_value());
        assert!((d6.mean() - 3.5).abs() < 1e-12);
        assert!(Die::numeric(0).is_err());
    }

    #[test]
    fn uniform_ignores_repeats() {
        let die = Die::uniform([3, 1, 3, 2]).unwrap();
        assert_eq!(&[1, 2, 3], die.values());
        assert_eq!(&Weight::from(3u32), die.denom());
        assert!(Die::<i32>::uniform([]).is_err());
    }

    #[test]
    fn unordered_matches_sorted_ordered_rolls() {
        let ordered = Die::ordered(3, 4)
            .unwrap()
            .map(|roll| roll.iter().copied().sorted().collect_vec());
        let unordered = Die::unordered(3, 4).unwrap();
        assert_eq!(ordered, unordered);
        assert_eq!(&Weight::from(64u32), unordered.denom());
    }

    #[test]
    fn ordered_refuses_huge_products() {
        assert!(matches!(
            Die::ordered(12, 6),
            Err(Error::TooLarge {
                iterations: 2_176_782_336
            })
        ));
        assert!(matches!(
            Die::ordered(i64::MAX, 6),
            Err(Error::TooLarge { .. })
        ));
        assert!(matches!(
            Die::scalar(1).repeat(usize::MAX),
            Err(Error::TooLarge { .. })
        ));
        assert!(Die::ordered(0, 6).is_err());
    }

    #[test]
    fn exact_probability() {
        let sum = Die::unordered(2, 6)
            .unwrap()
            .map(|roll| roll.iter().sum::<i32>());
        assert_eq!(
            Ratio::new(1.into(), 6.into()),
            sum.probability_of(&7)
        );
        assert_eq!(Ratio::new(0.into(), 1.into()), sum.probability_of(&13));
        assert_eq!(Weight::from(6u32), sum.weight_of(&7));
    }

    #[test]
    fn sampling_stays_in_support() {
        let mut rng = StdRng::seed_from_u64(7);
        let die = Die::from_weights(vec![(10, Weight::from(1u32)), (20, Weight::from(3u32))])
            .unwrap();
        let rolls = die.sample_many_rng(1000, &mut rng);
        assert!(rolls.iter().all(|&&x| x == 10 || x == 20));
        let twenties = rolls.iter().filter(|&&&x| x == 20).count();
        assert!((650..=850).contains(&twenties));
    }

    #[test]
    fn clones_share_storage() {
        let die = Die::numeric(20).unwrap();
        let other = die.clone();
        assert_eq!(die, other);
        assert_eq!(format!("{die:?}"), format!("{other:?}"));
    }
}
