//! The ring of integers Z.

use polyfactor_integers::Integer;

use crate::traits::Ring;

impl Ring for Integer {
    fn zero() -> Self {
        Integer::zero()
    }

    fn one() -> Self {
        Integer::one()
    }

    fn is_zero(&self) -> bool {
        Integer::is_zero(self)
    }

    fn is_one(&self) -> bool {
        Integer::is_one(self)
    }

    fn from_i64(n: i64) -> Self {
        Integer::new(n)
    }

    fn pow(&self, n: u32) -> Self {
        Integer::pow(self, n)
    }
}
