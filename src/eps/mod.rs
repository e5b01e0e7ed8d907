//! Exact arithmetic over an infinitesimal placeholder.
//!
//! Stability tests on exact coefficients occasionally need to divide by a
//! quantity that is exactly zero but is treated as an arbitrarily small
//! positive perturbation (the classical ε trick in the Routh-Hurwitz
//! procedure). This module provides [`Eps`], a rational function of a single
//! infinitesimal ε with `BigRational` coefficients. Values are closed under
//! the four field operations, carry no rounding error, and can report the
//! sign they take in the one-sided limit ε → 0⁺.
//!
//! The representation is a numerator/denominator pair of polynomials in ε,
//! each kept in ascending powers with exact rational coefficients. A value
//! whose numerator and denominator are both constants degenerates to an
//! ordinary rational number.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Tri-state sign of an exactly evaluated quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Strictly negative in the limit ε → 0⁺.
    Negative,
    /// Identically zero.
    Zero,
    /// Strictly positive in the limit ε → 0⁺.
    Positive,
}

impl Sign {
    /// Sign of an exact rational number.
    pub fn of(value: &BigRational) -> Sign {
        if value.is_zero() {
            Sign::Zero
        } else if value.is_positive() {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Polynomial in ε, ascending powers. An empty coefficient vector is the
/// zero polynomial.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Poly {
    coeffs: Vec<BigRational>,
}

impl Poly {
    fn zero() -> Poly {
        Poly { coeffs: Vec::new() }
    }

    fn constant(c: BigRational) -> Poly {
        if c.is_zero() {
            Poly::zero()
        } else {
            Poly { coeffs: vec![c] }
        }
    }

    /// The monomial ε itself.
    fn epsilon() -> Poly {
        Poly {
            coeffs: vec![BigRational::zero(), BigRational::one()],
        }
    }

    fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }

    /// Drop trailing zero coefficients so the invariant "last coefficient is
    /// non-zero" holds for every non-zero polynomial.
    fn normalize(&mut self) {
        while self.coeffs.last().is_some_and(|c| c.is_zero()) {
            self.coeffs.pop();
        }
    }

    /// Index and value of the lowest-order non-zero coefficient, `None` for
    /// the zero polynomial. This term dominates as ε → 0⁺.
    fn lowest(&self) -> Option<(usize, &BigRational)> {
        self.coeffs.iter().enumerate().find(|(_, c)| !c.is_zero())
    }

    /// Divide by ε^k. Requires every coefficient below ε^k to be zero.
    fn shift_down(&mut self, k: usize) {
        if k > 0 && !self.coeffs.is_empty() {
            self.coeffs.drain(..k);
        }
    }

    fn add(&self, other: &Poly) -> Poly {
        let mut coeffs = vec![BigRational::zero(); self.coeffs.len().max(other.coeffs.len())];
        for (i, c) in self.coeffs.iter().enumerate() {
            coeffs[i] += c;
        }
        for (i, c) in other.coeffs.iter().enumerate() {
            coeffs[i] += c;
        }
        let mut p = Poly { coeffs };
        p.normalize();
        p
    }

    fn neg(&self) -> Poly {
        Poly {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }

    fn mul(&self, other: &Poly) -> Poly {
        if self.is_zero() || other.is_zero() {
            return Poly::zero();
        }
        let mut coeffs =
            vec![BigRational::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        let mut p = Poly { coeffs };
        p.normalize();
        p
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (k, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let magnitude = c.abs();
            if first {
                if c.is_negative() {
                    write!(f, "-")?;
                }
                first = false;
            } else if c.is_negative() {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            match k {
                0 => write!(f, "{}", magnitude)?,
                _ => {
                    if !magnitude.is_one() {
                        write!(f, "{}·", magnitude)?;
                    }
                    if k == 1 {
                        write!(f, "ε")?;
                    } else {
                        write!(f, "ε^{}", k)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Exact rational function of the infinitesimal ε.
///
/// Constructed from ordinary rationals via [`Eps::from_rational`] or
/// [`Eps::from_integer`], or as the placeholder itself via
/// [`Eps::epsilon`]. Arithmetic is exact; no floating-point rounding is ever
/// introduced. The sign the value takes as ε shrinks toward zero from the
/// positive side is available through [`Eps::limit_sign`].
///
/// # Examples
///
/// ```
/// use routh_rs::eps::{Eps, Sign};
///
/// // (ε·1 - 1·1) / ε is negative in the limit ε → 0⁺: the -1/ε term wins.
/// let pivot = Eps::epsilon();
/// let entry = &(&(&pivot * &Eps::from_integer(1)) - &Eps::from_integer(1)) / &pivot;
/// assert_eq!(entry.limit_sign(), Sign::Negative);
/// ```
#[derive(Debug, Clone)]
pub struct Eps {
    num: Poly,
    den: Poly,
}

impl Eps {
    /// Invariant-restoring constructor: denominator non-zero, no common
    /// power of ε between numerator and denominator.
    fn new(mut num: Poly, mut den: Poly) -> Eps {
        num.normalize();
        den.normalize();
        debug_assert!(!den.is_zero(), "Eps denominator must be non-zero");
        if num.is_zero() {
            return Eps {
                num,
                den: Poly::constant(BigRational::one()),
            };
        }
        let nv = num.lowest().map(|(k, _)| k).unwrap_or(0);
        let dv = den.lowest().map(|(k, _)| k).unwrap_or(0);
        let shift = nv.min(dv);
        num.shift_down(shift);
        den.shift_down(shift);
        Eps { num, den }
    }

    /// The exact zero.
    pub fn zero() -> Eps {
        Eps::new(Poly::zero(), Poly::constant(BigRational::one()))
    }

    /// An ordinary exact rational, free of ε.
    pub fn from_rational(value: BigRational) -> Eps {
        Eps::new(
            Poly::constant(value),
            Poly::constant(BigRational::one()),
        )
    }

    /// Convenience wrapper for small integer constants.
    pub fn from_integer(value: i64) -> Eps {
        Eps::from_rational(BigRational::from_integer(BigInt::from(value)))
    }

    /// The infinitesimal placeholder ε: positive, smaller than any positive
    /// rational in the limit.
    pub fn epsilon() -> Eps {
        Eps::new(Poly::epsilon(), Poly::constant(BigRational::one()))
    }

    /// True iff the value is identically zero (not merely zero in the
    /// limit).
    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// The value as a plain rational, if it is free of ε.
    pub fn as_rational(&self) -> Option<BigRational> {
        if self.num.coeffs.len() > 1 || self.den.coeffs.len() > 1 {
            return None;
        }
        let num = self
            .num
            .coeffs
            .first()
            .cloned()
            .unwrap_or_else(BigRational::zero);
        let den = self.den.coeffs.first()?;
        Some(num / den)
    }

    /// Sign of the value in the one-sided limit ε → 0⁺.
    ///
    /// The lowest-order non-zero term of a polynomial in ε dominates as ε
    /// shrinks, so the limiting sign of a quotient is the product of the
    /// signs of the two dominating coefficients. A value that diverges
    /// (numerator of lower ε-order than denominator) still has a
    /// well-defined limiting sign.
    pub fn limit_sign(&self) -> Sign {
        match (self.num.lowest(), self.den.lowest()) {
            (None, _) => Sign::Zero,
            (Some((_, n)), Some((_, d))) => {
                if n.is_positive() == d.is_positive() {
                    Sign::Positive
                } else {
                    Sign::Negative
                }
            }
            // The constructor guarantees a non-zero denominator.
            (Some(_), None) => Sign::Zero,
        }
    }
}

impl PartialEq for Eps {
    fn eq(&self, other: &Eps) -> bool {
        // Cross-multiplied equality of fractions.
        self.num.mul(&other.den) == other.num.mul(&self.den)
    }
}

impl Eq for Eps {}

impl Add for &Eps {
    type Output = Eps;

    fn add(self, rhs: &Eps) -> Eps {
        Eps::new(
            self.num.mul(&rhs.den).add(&rhs.num.mul(&self.den)),
            self.den.mul(&rhs.den),
        )
    }
}

impl Sub for &Eps {
    type Output = Eps;

    fn sub(self, rhs: &Eps) -> Eps {
        Eps::new(
            self.num.mul(&rhs.den).add(&rhs.num.mul(&self.den).neg()),
            self.den.mul(&rhs.den),
        )
    }
}

impl Mul for &Eps {
    type Output = Eps;

    fn mul(self, rhs: &Eps) -> Eps {
        Eps::new(self.num.mul(&rhs.num), self.den.mul(&rhs.den))
    }
}

impl Div for &Eps {
    type Output = Eps;

    /// # Panics
    ///
    /// Panics when dividing by an identically zero value. Callers that may
    /// divide by zero must substitute [`Eps::epsilon`] first.
    fn div(self, rhs: &Eps) -> Eps {
        assert!(
            !rhs.is_zero(),
            "division by an identically zero Eps value"
        );
        Eps::new(self.num.mul(&rhs.den), self.den.mul(&rhs.num))
    }
}

impl Neg for &Eps {
    type Output = Eps;

    fn neg(self) -> Eps {
        Eps::new(self.num.neg(), self.den.clone())
    }
}

impl Add for Eps {
    type Output = Eps;

    fn add(self, rhs: Eps) -> Eps {
        &self + &rhs
    }
}

impl Sub for Eps {
    type Output = Eps;

    fn sub(self, rhs: Eps) -> Eps {
        &self - &rhs
    }
}

impl Mul for Eps {
    type Output = Eps;

    fn mul(self, rhs: Eps) -> Eps {
        &self * &rhs
    }
}

impl Div for Eps {
    type Output = Eps;

    fn div(self, rhs: Eps) -> Eps {
        &self / &rhs
    }
}

impl Neg for Eps {
    type Output = Eps;

    fn neg(self) -> Eps {
        -&self
    }
}

impl fmt::Display for Eps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "({})/({})", self.num, self.den)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_rational_arithmetic_stays_exact() {
        let a = Eps::from_rational(rat(1, 3));
        let b = Eps::from_rational(rat(1, 6));
        let sum = &a + &b;
        assert_eq!(sum.as_rational(), Some(rat(1, 2)));
    }

    #[test]
    fn test_zero_is_identically_zero() {
        let z = Eps::zero();
        assert!(z.is_zero());
        assert_eq!(z.limit_sign(), Sign::Zero);
        assert_eq!(z.as_rational(), Some(rat(0, 1)));
    }

    #[test]
    fn test_epsilon_is_positive_in_the_limit() {
        assert_eq!(Eps::epsilon().limit_sign(), Sign::Positive);
        assert_eq!((-&Eps::epsilon()).limit_sign(), Sign::Negative);
        assert_eq!(Eps::epsilon().as_rational(), None);
    }

    #[test]
    fn test_constant_term_dominates_epsilon() {
        // ε - 1 tends to -1.
        let v = &Eps::epsilon() - &Eps::from_integer(1);
        assert_eq!(v.limit_sign(), Sign::Negative);
    }

    #[test]
    fn test_diverging_quotient_keeps_its_sign() {
        // (ε - 1)/ε → -∞, so the limiting sign is negative.
        let v = &(&Eps::epsilon() - &Eps::from_integer(1)) / &Eps::epsilon();
        assert_eq!(v.limit_sign(), Sign::Negative);
    }

    #[test]
    fn test_epsilon_cancels_exactly() {
        // ε·x / ε == x, exactly.
        let x = Eps::from_rational(rat(7, 2));
        let v = &(&Eps::epsilon() * &x) / &Eps::epsilon();
        assert_eq!(v, x);
        assert_eq!(v.as_rational(), Some(rat(7, 2)));
    }

    #[test]
    fn test_cross_multiplied_equality() {
        // (2 + 2ε)/2 equals 1 + ε.
        let lhs = &(&Eps::from_integer(2) + &(&Eps::epsilon() * &Eps::from_integer(2)))
            / &Eps::from_integer(2);
        let rhs = &Eps::from_integer(1) + &Eps::epsilon();
        assert_eq!(lhs, rhs);
    }

    #[test]
    #[should_panic(expected = "identically zero")]
    fn test_division_by_identical_zero_panics() {
        let _ = &Eps::from_integer(1) / &Eps::zero();
    }

    #[test]
    fn test_sign_of_rational() {
        assert_eq!(Sign::of(&rat(3, 2)), Sign::Positive);
        assert_eq!(Sign::of(&rat(-1, 5)), Sign::Negative);
        assert_eq!(Sign::of(&rat(0, 1)), Sign::Zero);
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(Eps::zero().to_string(), "0");
        assert_eq!(Eps::epsilon().to_string(), "ε");
        let v = &Eps::epsilon() - &Eps::from_integer(1);
        assert_eq!(v.to_string(), "-1 + ε");
        let q = &(&Eps::epsilon() - &Eps::from_integer(1)) / &Eps::epsilon();
        assert_eq!(q.to_string(), "(-1 + ε)/(ε)");
    }
}
