use bon::Builder;
use log::trace;

use crate::util::positive;
use crate::value::{DefaultValue, Value};
use crate::{ops, Die, Error, Result};

/// How a [`Pool`] walks the rolls of its dice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// One step per sorted roll, weighted by multiplicity.
    #[default]
    Unordered,
    /// One step per ordered roll. Only feasible for small pools.
    Ordered,
}

/// `n` dice with `m` faces, reduced to a single number per roll.
///
/// ```
/// use dicebag::Pool;
///
/// // 4d6, drop the lowest
/// let stat = Pool::new(4, 6).keep_highest(3).unwrap();
/// assert_eq!(stat.min_value(), &3);
/// assert_eq!(stat.max_value(), &18);
/// ```
#[derive(Builder, Clone, Debug)]
#[builder(start_fn(name = "new"), finish_fn(vis = ""))]
pub struct Pool {
    #[builder(start_fn)]
    dice: i64,
    #[builder(start_fn)]
    faces: i64,
    #[builder(default)]
    strategy: Strategy,
}

impl Pool {
    pub fn eval_with<O, F>(&self, f: F) -> Result<Die<O>>
    where
        O: Value,
        F: Fn(&[DefaultValue]) -> O,
    {
        trace!(
            "{}d{} pool, {:?} strategy",
            self.dice,
            self.faces,
            self.strategy
        );
        let rolls = match self.strategy {
            Strategy::Unordered => Die::unordered(self.dice, self.faces)?,
            Strategy::Ordered => Die::ordered(self.dice, self.faces)?,
        };
        Ok(rolls.map(|roll| f(roll)))
    }

    pub fn sum(&self) -> Result<Die> {
        self.eval_with(ops::sum::<DefaultValue>)
    }

    pub fn keep_highest(&self, k: usize) -> Result<Die> {
        self.check_keep(k)?;
        self.eval_with(|roll| ops::top_sum(roll, k))
    }

    pub fn keep_lowest(&self, k: usize) -> Result<Die> {
        self.check_keep(k)?;
        self.eval_with(|roll| ops::bottom_sum(roll, k))
    }

    pub fn distinct(&self) -> Result<Die<usize>> {
        self.eval_with(ops::distinct::<DefaultValue>)
    }

    pub fn highest(&self) -> Result<Die> {
        self.eval_with(|roll| ops::highest(roll).unwrap_or_default())
    }

    pub fn lowest(&self) -> Result<Die> {
        self.eval_with(|roll| ops::lowest(roll).unwrap_or_default())
    }

    fn check_keep(&self, k: usize) -> Result<()> {
        let dice = positive("n", self.dice)?;
        if k > dice {
            return Err(Error::InvalidArgument {
                name: "k",
                value: i64::try_from(k).unwrap_or(i64::MAX),
            });
        }
        Ok(())
    }
}

impl<S> PoolBuilder<S>
where
    S: pool_builder::State,
    S: pool_builder::IsComplete,
{
    pub fn eval_with<O, F>(self, f: F) -> Result<Die<O>>
    where
        O: Value,
        F: Fn(&[DefaultValue]) -> O,
    {
        self.build().eval_with(f)
    }

    pub fn sum(self) -> Result<Die> {
        self.build().sum()
    }

    pub fn keep_highest(self, k: usize) -> Result<Die> {
        self.build().keep_highest(k)
    }

    pub fn keep_lowest(self, k: usize) -> Result<Die> {
        self.build().keep_lowest(k)
    }

    pub fn distinct(self) -> Result<Die<usize>> {
        self.build().distinct()
    }

    pub fn highest(self) -> Result<Die> {
        self.build().highest()
    }

    pub fn lowest(self) -> Result<Die> {
        self.build().lowest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Weight;

    #[test]
    fn five_dice_keep_three() {
        let die = Pool::new(5, 6).keep_highest(3).unwrap();
        assert_eq!(&Weight::from(7776u32), die.denom());
        assert_eq!(Weight::from(1u32), die.weight_of(&3));
        assert_eq!(Weight::from(1155u32), die.weight_of(&14));
        assert_eq!(Weight::from(276u32), die.weight_of(&18));
    }

    #[test]
    fn strategies_agree() {
        for (n, m) in [(1, 6), (3, 4), (4, 6), (6, 3)] {
            let unordered = Pool::new(n, m).distinct().unwrap();
            let ordered = Pool::new(n, m)
                .strategy(Strategy::Ordered)
                .distinct()
                .unwrap();
            assert_eq!(unordered, ordered);

            let unordered = Pool::new(n, m).keep_lowest(1).unwrap();
            let ordered = Pool::new(n, m)
                .strategy(Strategy::Ordered)
                .keep_lowest(1)
                .unwrap();
            assert_eq!(unordered, ordered);
        }
    }

    #[test]
    fn sum_of_two_dice() {
        let die = Pool::new(2, 6).sum().unwrap();
        assert_eq!(Some(&7), die.mode());
        assert!((die.mean() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn distinct_faces_in_twelve_dice() {
        let die = Pool::new(12, 6).distinct().unwrap();
        assert_eq!(&[1, 2, 3, 4, 5, 6], die.values());
        // all six faces: surjections of 12 rolls onto 6 faces
        let all_six = Weight::from(953_029_440u64);
        let total = Weight::from(2_176_782_336u64);
        assert_eq!(
            crate::Ratio::new(all_six.into(), total.into()),
            die.probability_of(&6)
        );
    }

    #[test]
    fn extremes() {
        let high = Pool::new(2, 20).highest().unwrap();
        let low = Pool::new(2, 20).lowest().unwrap();
        assert!((high.mean() - 13.825).abs() < 1e-9);
        assert!((low.mean() - 7.175).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_keep() {
        assert_eq!(
            Err(Error::InvalidArgument { name: "k", value: 4 }),
            Pool::new(3, 6).keep_highest(4)
        );
        assert!(Pool::new(0, 6).sum().is_err());
        assert!(Pool::new(12, 6)
            .strategy(Strategy::Ordered)
            .sum()
            .is_err());
    }

    #[test]
    fn huge_pools_are_refused() {
        for strategy in [Strategy::Unordered, Strategy::Ordered] {
            assert!(matches!(
                Pool::new(i64::MAX, 6).strategy(strategy).sum(),
                Err(Error::TooLarge { .. })
            ));
        }
    }
}
