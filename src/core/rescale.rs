// src/core/rescale.rs

use log::warn;
use num::{BigInt, BigRational, One};
use crate::error::{RandomOrgError, Result};

/// Smallest integer requested from random.org.
pub const SOURCE_MIN: i64 = -1_000_000_000;
/// Largest integer requested from random.org.
pub const SOURCE_MAX: i64 = 1_000_000_000;

/// An inclusive `[min, max]` target domain for rescaled values.
///
/// The source domain `[SOURCE_MIN, SOURCE_MAX]` is split into `max - min + 1`
/// equal-width slots and a raw value maps to the slot it falls into. Exact
/// rational arithmetic keeps this correct for bounds far wider than `i64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRange {
    min: BigInt,
    max: BigInt,
    width: BigInt,
}

impl TargetRange {
    pub fn new(min: &BigInt, max: &BigInt) -> Result<Self> {
        if min > max {
            warn!("Rejecting target range [{}, {}]: min exceeds max", min, max);
            return Err(RandomOrgError::invalid_range(min, max));
        }
        Ok(TargetRange {
            min: min.clone(),
            max: max.clone(),
            width: max - min + BigInt::one(),
        })
    }

    pub fn min(&self) -> &BigInt {
        &self.min
    }

    pub fn max(&self) -> &BigInt {
        &self.max
    }

    pub fn apply(&self, raw: i64) -> Result<BigInt> {
        if !(SOURCE_MIN..=SOURCE_MAX).contains(&raw) {
            warn!("Raw value {} outside [{}, {}]", raw, SOURCE_MIN, SOURCE_MAX);
            return Err(RandomOrgError::OutOfSourceRange(raw));
        }

        let offset = BigInt::from(raw - SOURCE_MIN);
        let source_width = BigInt::from(SOURCE_MAX - SOURCE_MIN + 1);
        let position = BigRational::new(offset * &self.width, source_width);

        Ok(&self.min + position.floor().to_integer())
    }
}

pub fn rescale(raw: i64, min: &BigInt, max: &BigInt) -> Result<BigInt> {
    TargetRange::new(min, max)?.apply(raw)
}

pub fn rescale_i64(raw: i64, min: i64, max: i64) -> Result<i64> {
    narrow(&rescale(raw, &BigInt::from(min), &BigInt::from(max))?)
}

/// Converts a rescaled value into a machine integer type.
pub fn narrow<T>(value: &BigInt) -> Result<T>
where
    T: for<'a> TryFrom<&'a BigInt>,
{
    T::try_from(value).map_err(|_| {
        warn!("Value {} does not fit in {}", value, std::any::type_name::<T>());
        RandomOrgError::Overflow
    })
}
