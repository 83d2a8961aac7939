use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Sub},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

//--------------------------------------     Centavos       ---------------------------------------------------------
/// A monetary amount in Brazilian centavos. Stored as an integer column, so prices never suffer
/// floating point drift.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Centavos(i64);

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in centavos: {0}")]
pub struct CentavosConversionError(String);

impl From<i64> for Centavos {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl TryFrom<u64> for Centavos {
    type Error = CentavosConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(CentavosConversionError(format!("Value {value} is too large to convert to Centavos")))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Add for Centavos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Centavos {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<i64> for Centavos {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Centavos {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl Display for Centavos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R${}.{:02}", self.0 / 100, (self.0 % 100).abs())
    }
}

impl Centavos {
    pub fn value(&self) -> i64 {
        self.0
    }
}
