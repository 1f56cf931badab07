use std::cmp::Ordering;
use std::fmt::Debug;

pub type DefaultValue = i32;
pub type ComputedValue = i64;

/// Anything that can label an outcome of a [`Die`](crate::Die).
pub trait Value: Sized + Send + Sync + Debug + Clone + PartialEq + Eq + PartialOrd + Ord {}

/// Values with a numeric reading, used for mean, variance and plotting.
pub trait ComputableValue: Value {
    fn compute(&self) -> ComputedValue;

    fn compute_f64(&self) -> f64 {
        self.compute() as f64
    }
}

macro_rules! impl_computable_value_from {
    ($typ:ty) => {
        impl $crate::value::ComputableValue for $typ {
            fn compute(&self) -> ComputedValue {
                ComputedValue::from(*self)
            }
        }
    };
}

macro_rules! impl_computable_value_trunc {
    ($typ:ty) => {
        impl $crate::value::ComputableValue for $typ {
            #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            fn compute(&self) -> ComputedValue {
                *self as ComputedValue
            }
        }
    };
}

impl<T> Value for T where T: Sized + Send + Sync + Debug + Clone + PartialEq + Eq + Ord {}

impl ComputableValue for bool {
    fn compute(&self) -> ComputedValue {
        ComputedValue::from(*self)
    }
}

impl ComputableValue for Ordering {
    fn compute(&self) -> ComputedValue {
        match self {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
}

impl_computable_value_from!(u8);
impl_computable_value_from!(u16);
impl_computable_value_from!(u32);
impl_computable_value_from!(i8);
impl_computable_value_from!(i16);
impl_computable_value_from!(i32);
impl_computable_value_from!(i64);
impl_computable_value_trunc!(u64);
impl_computable_value_trunc!(usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_primitive_values() {
        assert_eq!(7, 7u8.compute());
        assert_eq!(-3, (-3i32).compute());
        assert_eq!(5, 5usize.compute());
        assert_eq!(1, true.compute());
        assert_eq!(-1, Ordering::Less.compute());
        assert!((2.0 - 2i16.compute_f64()).abs() < f64::EPSILON);
    }
}
