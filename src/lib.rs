mod approx;
pub mod defs;
mod die;
pub mod multiset;
pub mod ops;
mod pool;
mod print;
mod util;
mod value;

use std::sync::Arc;

pub use approx::Approx;
pub use die::Die;
pub use multiset::{enumerate, enumerate_faces, multiplicity, outcome_count, WeightedOutcome};
pub use pool::{Pool, Strategy};
pub use print::PrintExt;
use thiserror::Error;
pub use value::{ComputableValue, ComputedValue, DefaultValue, Value};

/// Exact count of ordered rolls. Never overflows.
pub type Weight = num::BigUint;
pub type Ratio = num::BigRational;
type Map<T> = std::collections::BTreeMap<T, Weight>;
type Ptr<T> = Arc<T>;
pub type Result<T> = ::core::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument `{name}`: {value}")]
    InvalidArgument { name: &'static str, value: i64 },
    #[error("distribution has no outcomes")]
    EmptyDistribution,
    #[error("too many iterations for direct evaluation: {iterations}")]
    TooLarge { iterations: u128 },
}

const DIRECT_MAX_ITERATIONS: u128 = 100_000_000;
const APPROX_MIN_SAMPLE_SIZE: u32 = 1_000_000;
