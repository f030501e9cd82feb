//! The field of rationals Q.

use polyfactor_integers::Rational;

use crate::traits::{Field, Ring};

impl Ring for Rational {
    fn zero() -> Self {
        Rational::zero()
    }

    fn one() -> Self {
        Rational::one()
    }

    fn is_zero(&self) -> bool {
        Rational::is_zero(self)
    }

    fn is_one(&self) -> bool {
        Rational::is_one(self)
    }

    fn from_i64(n: i64) -> Self {
        Rational::from(n)
    }

    fn pow(&self, n: u32) -> Self {
        Rational::pow(self, n)
    }
}

impl Field for Rational {
    fn inv(&self) -> Option<Self> {
        self.recip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse() {
        let r = Rational::from_i64(-3, 7);
        let inv = Field::inv(&r).unwrap();
        assert!(<Rational as Ring>::is_one(&(r * inv)));
        assert!(Field::inv(&<Rational as Ring>::zero()).is_none());
    }
}
