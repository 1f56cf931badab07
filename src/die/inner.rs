use std::borrow::Borrow;

use itertools::Itertools;
use log::trace;
use num::bigint::RandBigInt;
use num::rational::Ratio as FractionOf;
use num::traits::{One, ToPrimitive};
use num::{BigInt, Integer};
use rand::RngCore;

use super::{DieLike, Iter};
use crate::value::{ComputableValue, ComputedValue, DefaultValue, Value};
use crate::{Error, Map, Ratio, Result, Weight, DIRECT_MAX_ITERATIONS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DieInner<T = DefaultValue>
where
    T: Value,
{
    denom: Weight,
    weights: Vec<Weight>,
    values: Vec<T>,
}

impl<T> DieInner<T>
where
    T: Value,
{
    #[must_use]
    pub fn scalar(value: T) -> Self {
        Self {
            values: vec![value],
            weights: vec![Weight::one()],
            denom: Weight::one(),
        }
    }

    /// `values` must be sorted, distinct and non-empty.
    #[must_use]
    pub fn uniform_sorted(values: Vec<T>) -> Self {
        debug_assert!(!values.is_empty());
        debug_assert!(values.windows(2).all(|w| w[0] < w[1]));
        let n = values.len();
        Self {
            values,
            weights: vec![Weight::one(); n],
            denom: Weight::from(n),
        }
    }

    pub fn from_weights<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, Weight)>,
    {
        let mut map = Map::new();
        let mut denom = Weight::ZERO;
        for (value, weight) in pairs {
            if weight == Weight::ZERO {
                continue;
            }
            denom += &weight;
            *map.entry(value).or_default() += weight;
        }
        if map.is_empty() {
            return Err(Error::EmptyDistribution);
        }
        Ok(Self::new(map, denom))
    }

    #[must_use]
    pub fn denom(&self) -> &Weight {
        &self.denom
    }

    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[must_use]
    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.values.iter().zip(self.weights.iter())
    }

    #[must_use]
    pub fn weight_of(&self, value: &T) -> Weight {
        self.values
            .binary_search(value)
            .map(|i| self.weights[i].clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn probability_of(&self, value: &T) -> Ratio {
        Ratio::new(
            BigInt::from(self.weight_of(value)),
            BigInt::from(self.denom.clone()),
        )
    }

    #[must_use]
    pub fn modes(&self) -> Vec<&T> {
        self.iter()
            .max_set_by_key(|(_, w)| *w)
            .into_iter()
            .map(|(v, _)| v)
            .collect()
    }

    #[must_use]
    pub fn mode(&self) -> Option<&T> {
        self.iter().max_by_key(|(_, w)| *w).map(|(v, _)| v)
    }

    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        self.weights.iter().map(|w| self.fraction(w)).collect_vec()
    }

    /// Weights are reduced by their common divisor; `denom` must be their sum.
    #[must_use]
    pub fn new(map: Map<T>, mut denom: Weight) -> Self {
        let mut values = Vec::with_capacity(map.len());
        let mut weights = Vec::with_capacity(map.len());
        let mut acc = denom.clone();
        for (value, weight) in map {
            acc = acc.gcd(&weight);
            values.push(value);
            weights.push(weight);
        }
        if !acc.is_one() {
            weights.iter_mut().for_each(|x| *x /= &acc);
            denom /= &acc;
        }
        Self {
            denom,
            weights,
            values,
        }
    }

    #[must_use]
    pub fn sample_rng<G>(&self, rng: &mut G) -> &T
    where
        G: RngCore,
    {
        let x = rng.gen_biguint_below(&self.denom);
        let mut pos = Weight::ZERO;
        for (v, w) in self.iter() {
            pos += w;
            if x < pos {
                return v;
            }
        }
        unreachable!()
    }

    #[must_use]
    pub fn map<O, F>(&self, f: F) -> DieInner<O>
    where
        O: Value,
        F: Fn(&T) -> O,
    {
        let mut map = Map::new();

        for (v1, w1) in self.iter() {
            *map.entry(f(v1)).or_default() += w1;
        }

        DieInner::new(map, self.denom.clone())
    }

    #[must_use]
    pub fn apply_two<T2, O, F>(&self, d2: &DieInner<T2>, f: F) -> DieInner<O>
    where
        T2: Value,
        O: Value,
        F: Fn(&T, &T2) -> O,
    {
        let mut map = Map::new();

        for (v1, w1) in self.iter() {
            for (v2, w2) in d2.iter() {
                *map.entry(f(v1, v2)).or_default() += w1 * w2;
            }
        }

        DieInner::new(map, &self.denom * &d2.denom)
    }

    pub fn apply<I, Q, D, O, F>(dice: I, f: F) -> Result<DieInner<O>>
    where
        I: Borrow<[Q]>,
        Q: Borrow<D>,
        D: DieLike<T>,
        O: Value,
        F: Fn(&[&T]) -> O,
    {
        let dice = dice.borrow();
        if dice.is_empty() {
            return Err(Error::EmptyDistribution);
        }
        let iterations = Self::iterations_of::<Q, D>(dice)?;
        trace!("direct join of {} dice, {iterations} iterations", dice.len());

        let mut map = Map::new();
        let mut value = Vec::with_capacity(dice.len());

        for p in dice
            .iter()
            .map(|x| {
                let x = x.borrow();
                x.values().iter().zip(x.weights())
            })
            .multi_cartesian_product()
        {
            value.clear();
            let mut weight = Weight::one();
            for (v, w) in p {
                value.push(v);
                weight *= w;
            }
            *map.entry(f(value.as_slice())).or_default() += weight;
        }

        let denom = dice
            .iter()
            .fold(Weight::one(), |acc, x| acc * x.borrow().denom());
        Ok(DieInner::new(map, denom))
    }

    pub fn combine<I, Q, D>(dice: I) -> Result<DieInner<Vec<T>>>
    where
        I: Borrow<[Q]>,
        Q: Borrow<D>,
        D: DieLike<T>,
    {
        Self::apply::<I, Q, D, Vec<T>, _>(dice, |v| {
            v.iter().map(|&x| x.clone()).collect()
        })
    }

    fn iterations_of<Q, D>(dice: &[Q]) -> Result<u128>
    where
        Q: Borrow<D>,
        D: DieLike<T>,
    {
        let iterations = dice.iter().try_fold(1u128, |acc, x| {
            acc.checked_mul(x.borrow().values().len() as u128)
        });
        match iterations {
            Some(iterations) if iterations <= DIRECT_MAX_ITERATIONS => Ok(iterations),
            Some(iterations) => Err(Error::TooLarge { iterations }),
            None => Err(Error::TooLarge {
                iterations: u128::MAX,
            }),
        }
    }

    fn fraction(&self, weight: &Weight) -> f64 {
        FractionOf::new_raw(weight.clone(), self.denom.clone())
            .to_f64()
            .unwrap_or(f64::NAN)
    }
}

impl<T> DieInner<T>
where
    T: ComputableValue,
{
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.iter()
            .fold(0.0, |acc, (v, w)| acc + v.compute_f64() * self.fraction(w))
    }

    #[must_use]
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        self.iter().fold(0.0, |acc, (v, w)| {
            acc + (v.compute_f64() - mean).powi(2) * self.fraction(w)
        })
    }

    #[must_use]
    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }

    #[must_use]
    pub fn computed_values(&self) -> Vec<ComputedValue> {
        self.values.iter().map(ComputableValue::compute).collect()
    }
}

impl<T> DieLike<T> for DieInner<T>
where
    T: Value,
{
    fn denom(&self) -> &Weight {
        &self.denom
    }

    fn values(&self) -> &[T] {
        &self.values
    }

    fn weights(&self) -> &[Weight] {
        &self.weights
    }
}
