mod inner;
mod ptr;

use std::iter::Zip;
use std::slice;

pub(crate) use inner::DieInner;
pub use ptr::Die;

use crate::value::Value;
use crate::Weight;

pub type Iter<'a, T> = Zip<slice::Iter<'a, T>, slice::Iter<'a, Weight>>;

/// Read access shared by [`Die`] and its inner storage, so joins accept either.
pub(crate) trait DieLike<T>
where
    T: Value,
{
    fn denom(&self) -> &Weight;
    fn values(&self) -> &[T];
    fn weights(&self) -> &[Weight];
}
