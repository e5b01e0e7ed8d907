//! Routh-Hurwitz stability analysis.
//!
//! This module builds the Routh array of a real polynomial from its
//! coefficients and counts the sign changes in the array's first column,
//! which equals the number of roots in the open right half-plane. The
//! computation stays in exact rational arithmetic throughout, so the sign
//! determination is never subject to floating-point rounding.
//!
//! The two classical degeneracies are handled:
//!
//! - a zero leading entry in a non-zero row is replaced by the
//!   infinitesimal placeholder ε (see [`crate::eps`]), resolved to its
//!   limiting sign as ε → 0⁺ when the first column is evaluated;
//! - a row that vanishes entirely is rebuilt from the derivative of the
//!   auxiliary polynomial formed by the row above it.

use ndarray::Array2;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use std::fmt;

use crate::eps::{Eps, Sign};

/// Error type for Routh array construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouthError {
    /// The coefficient sequence is empty
    EmptyPolynomial,
    /// The leading (highest-power) coefficient is zero, so the polynomial
    /// degree is ambiguous
    ZeroLeadingCoefficient,
}

impl fmt::Display for RouthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouthError::EmptyPolynomial => {
                write!(f, "Coefficient sequence is empty")
            }
            RouthError::ZeroLeadingCoefficient => {
                write!(
                    f,
                    "Leading coefficient is zero: polynomial degree is ambiguous"
                )
            }
        }
    }
}

impl std::error::Error for RouthError {}

/// Result of a Routh-Hurwitz stability analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct RouthAnalysis {
    /// The Routh array: one row per coefficient, ceil(n/2) columns. Entries
    /// are exact; rows touched by the ε rule contain ε terms.
    pub table: Array2<Eps>,
    /// Number of sign changes in the first column, equal to the number of
    /// roots with positive real part
    pub num_unstable: usize,
    /// True iff `num_unstable == 0`
    pub stable: bool,
    /// Rows whose leading entry was an exact zero and was replaced by ε
    pub epsilon_rows: Vec<usize>,
    /// Rows that vanished entirely and were rebuilt from the derivative of
    /// the auxiliary polynomial
    pub auxiliary_rows: Vec<usize>,
}

impl RouthAnalysis {
    /// Limiting signs of the first-column entries, top to bottom.
    pub fn first_column_signs(&self) -> Vec<Sign> {
        (0..self.table.nrows())
            .map(|i| self.table[[i, 0]].limit_sign())
            .collect()
    }
}

impl fmt::Display for RouthAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.table.dim();
        let rendered: Vec<Vec<String>> = (0..rows)
            .map(|i| (0..cols).map(|j| self.table[[i, j]].to_string()).collect())
            .collect();
        let widths: Vec<usize> = (0..cols)
            .map(|j| rendered.iter().map(|row| row[j].len()).max().unwrap_or(1))
            .collect();
        for (i, row) in rendered.iter().enumerate() {
            write!(f, "s^{:<2} |", rows - 1 - i)?;
            for (j, entry) in row.iter().enumerate() {
                write!(f, "  {:>width$}", entry, width = widths[j])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// State of a freshly computed row, deciding the construction strategy for
/// its final contents.
enum RowState {
    /// At least one non-zero entry: keep the recurrence result.
    Normal,
    /// Every entry is exactly zero: rebuild from the auxiliary polynomial.
    AllZero,
}

impl RowState {
    fn classify(row: &[Eps]) -> RowState {
        if row.iter().all(Eps::is_zero) {
            RowState::AllZero
        } else {
            RowState::Normal
        }
    }
}

/// Builds the Routh array of a polynomial and counts its unstable roots.
///
/// Given the coefficients of a real polynomial in **decreasing** powers,
///
/// ```text
/// P(s) = coeffs[0]·sⁿ⁻¹ + coeffs[1]·sⁿ⁻² + ... + coeffs[n-1]
/// ```
///
/// this function constructs the full Routh array and counts the sign
/// changes between consecutive non-zero entries of its first column. By the
/// Routh-Hurwitz criterion that count equals the number of roots of P in
/// the open right half-plane, so the polynomial is Hurwitz-stable exactly
/// when the count is zero.
///
/// # Arguments
///
/// * `coeffs` - Polynomial coefficients, highest power first, as exact
///   rationals. The leading coefficient must be non-zero.
///
/// # Returns
///
/// * `Ok(RouthAnalysis)` - Contains:
///   - `table`: the n × ceil(n/2) Routh array in exact arithmetic
///   - `num_unstable`: count of roots with positive real part
///   - `stable`: true iff `num_unstable == 0`
///   - `epsilon_rows`, `auxiliary_rows`: which degenerate-case rules fired
/// * `Err(RouthError)` - If the coefficient sequence is empty or its
///   leading coefficient is zero
///
/// # Algorithm
///
/// Rows 0 and 1 hold the even- and odd-offset coefficients, right-padded
/// with zeros. Each later entry is the cross product
///
/// ```text
/// row[i][j] = (pivot·row[i-2][j+1] - row[i-2][0]·row[i-1][j+1]) / pivot
/// ```
///
/// with `pivot = row[i-1][0]`. Two degeneracies are resolved before the
/// recurrence can fail:
///
/// - **Zero pivot**: a row whose leading entry is exactly zero (but which
///   is not entirely zero) has that entry replaced by the infinitesimal ε.
///   The substitution flows through later rows exactly, and each affected
///   first-column entry is evaluated in the limit ε → 0⁺.
/// - **Row of zeros**: a row that vanishes entirely is replaced by the
///   coefficients of the derivative of the auxiliary polynomial read off
///   the previous row: with `order = n - i`, the entry at column `k`
///   becomes `prev[k]·(order - 2k)`.
///
/// Exactly-zero first-column entries are dropped from the sign sequence
/// before adjacent changes are counted.
///
/// # Examples
///
/// ```
/// use routh_rs::routh::{coeffs_from_integers, routh_array};
///
/// // (s+1)³ = s³ + 3s² + 3s + 1: all roots at s = -1, stable.
/// let analysis = routh_array(&coeffs_from_integers(&[1, 3, 3, 1])).unwrap();
/// assert!(analysis.stable);
/// assert_eq!(analysis.num_unstable, 0);
///
/// // s² - 3s + 2 = (s-1)(s-2): both roots in the right half-plane.
/// let analysis = routh_array(&coeffs_from_integers(&[1, -3, 2])).unwrap();
/// assert!(!analysis.stable);
/// assert_eq!(analysis.num_unstable, 2);
/// ```
///
/// # Limitations
///
/// The zero-pivot rule always treats ε as a vanishingly small **positive**
/// quantity, matching common textbook practice of examining ε → 0⁺ only. A
/// polynomial that sits exactly on the stability boundary is therefore
/// classified as if perturbed infinitesimally in that one direction; the
/// approach direction ε → 0⁻ is not examined. Roots exactly on the
/// imaginary axis are not counted as unstable.
///
/// # References
///
/// - Gantmacher, F.R. "Applications of the Theory of Matrices", ch. XV
/// - Dorf, R.C. and Bishop, R.H. "Modern Control Systems", ch. 6
pub fn routh_array(coeffs: &[BigRational]) -> Result<RouthAnalysis, RouthError> {
    if coeffs.is_empty() {
        return Err(RouthError::EmptyPolynomial);
    }
    if coeffs[0].is_zero() {
        return Err(RouthError::ZeroLeadingCoefficient);
    }

    let n = coeffs.len();
    let cols = n.div_ceil(2);
    let mut table = Array2::from_elem((n, cols), Eps::zero());

    // Rows 0 and 1: even- and odd-offset coefficients, zero-padded.
    for (j, c) in coeffs.iter().step_by(2).enumerate() {
        table[[0, j]] = Eps::from_rational(c.clone());
    }
    for (j, c) in coeffs.iter().skip(1).step_by(2).enumerate() {
        table[[1, j]] = Eps::from_rational(c.clone());
    }

    let mut epsilon_rows = Vec::new();
    let mut auxiliary_rows = Vec::new();

    // The seeded odd row can already vanish (every odd coefficient zero).
    if n > 1 {
        let row: Vec<Eps> = (0..cols).map(|j| table[[1, j]].clone()).collect();
        if let RowState::AllZero = RowState::classify(&row) {
            replace_with_auxiliary_derivative(&mut table, 1, n);
            auxiliary_rows.push(1);
        }
    }

    for i in 2..n {
        // Zero-pivot rule: the previous row leads with an exact zero but is
        // not entirely zero. Substitute ε before dividing.
        if table[[i - 1, 0]].is_zero() {
            table[[i - 1, 0]] = Eps::epsilon();
            epsilon_rows.push(i - 1);
        }

        let mut row = vec![Eps::zero(); cols];
        for (j, entry) in row.iter_mut().enumerate().take(cols - 1) {
            let a = &table[[i - 2, 0]];
            let b = &table[[i - 2, j + 1]];
            let pivot = &table[[i - 1, 0]];
            let d = &table[[i - 1, j + 1]];
            *entry = &(&(pivot * b) - &(a * d)) / pivot;
        }

        match RowState::classify(&row) {
            RowState::Normal => {
                for (j, entry) in row.into_iter().enumerate() {
                    table[[i, j]] = entry;
                }
            }
            RowState::AllZero => {
                replace_with_auxiliary_derivative(&mut table, i, n);
                auxiliary_rows.push(i);
            }
        }
    }

    let num_unstable = count_sign_changes(
        (0..n).map(|i| table[[i, 0]].limit_sign()),
    );

    Ok(RouthAnalysis {
        table,
        num_unstable,
        stable: num_unstable == 0,
        epsilon_rows,
        auxiliary_rows,
    })
}

/// Row-of-zeros rule: overwrite row `i` with the coefficients of the
/// derivative of the auxiliary polynomial defined by row `i - 1`.
///
/// The previous row represents A(s) = Σₖ prev[k]·s^(order-2k) with
/// `order = n - i`; differentiating term by term gives the replacement
/// entry `prev[k]·(order - 2k)` at column `k`.
fn replace_with_auxiliary_derivative(table: &mut Array2<Eps>, i: usize, n: usize) {
    let order = n as i64 - i as i64;
    for k in 0..table.ncols() {
        let factor = Eps::from_integer(order - 2 * k as i64);
        let entry = &table[[i - 1, k]] * &factor;
        table[[i, k]] = entry;
    }
}

/// Counts adjacent sign changes in a sequence, ignoring exact zeros.
fn count_sign_changes(signs: impl Iterator<Item = Sign>) -> usize {
    let mut changes = 0;
    let mut previous: Option<Sign> = None;
    for sign in signs {
        if sign == Sign::Zero {
            continue;
        }
        if let Some(prev) = previous {
            if prev != sign {
                changes += 1;
            }
        }
        previous = Some(sign);
    }
    changes
}

/// Converts integer coefficients into the exact rationals [`routh_array`]
/// consumes.
///
/// # Examples
///
/// ```
/// use routh_rs::routh::{coeffs_from_integers, routh_array};
///
/// let coeffs = coeffs_from_integers(&[1, 2, 3, 4, 5]);
/// assert_eq!(routh_array(&coeffs).unwrap().num_unstable, 2);
/// ```
pub fn coeffs_from_integers(coeffs: &[i64]) -> Vec<BigRational> {
    coeffs
        .iter()
        .map(|&c| BigRational::from_integer(BigInt::from(c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(coeffs: &[i64]) -> RouthAnalysis {
        routh_array(&coeffs_from_integers(coeffs)).unwrap()
    }

    #[test]
    fn test_stable_first_order() {
        // s + 1, root at s = -1.
        let analysis = build(&[1, 1]);
        assert!(analysis.stable);
        assert_eq!(analysis.num_unstable, 0);
    }

    #[test]
    fn test_unstable_first_order() {
        // s - 1, root at s = 1.
        let analysis = build(&[1, -1]);
        assert!(!analysis.stable);
        assert_eq!(analysis.num_unstable, 1);
    }

    #[test]
    fn test_constant_polynomial() {
        // P(s) = 5: no roots at all.
        let analysis = build(&[5]);
        assert!(analysis.stable);
        assert_eq!(analysis.table.dim(), (1, 1));
    }

    #[test]
    fn test_two_right_half_plane_roots() {
        // s² - 3s + 2 = (s-1)(s-2).
        let analysis = build(&[1, -3, 2]);
        assert_eq!(analysis.num_unstable, 2);
        assert_eq!(
            analysis.first_column_signs(),
            vec![Sign::Positive, Sign::Negative, Sign::Positive]
        );
    }

    #[test]
    fn test_quartic_with_two_unstable_roots() {
        let analysis = build(&[1, 2, 3, 4, 5]);
        assert_eq!(analysis.num_unstable, 2);
        assert!(analysis.epsilon_rows.is_empty());
        assert!(analysis.auxiliary_rows.is_empty());
    }

    #[test]
    fn test_binomial_sextic_is_stable() {
        // (s+1)⁶: every root at s = -1.
        let analysis = build(&[1, 6, 15, 20, 15, 6, 1]);
        assert!(analysis.stable);
        assert_eq!(analysis.num_unstable, 0);
    }

    #[test]
    fn test_cubic_binomial_first_column_all_positive() {
        // (s+1)³ = s³ + 3s² + 3s + 1.
        let analysis = build(&[1, 3, 3, 1]);
        assert!(analysis.stable);
        assert!(analysis
            .first_column_signs()
            .iter()
            .all(|&s| s == Sign::Positive));
    }

    #[test]
    fn test_table_shape_and_seed_rows() {
        let analysis = build(&[1, 2, 3, 4, 5]);
        assert_eq!(analysis.table.dim(), (5, 3));
        let as_int = |i: usize, j: usize| {
            analysis.table[[i, j]]
                .as_rational()
                .map(|r| r.to_integer())
        };
        assert_eq!(as_int(0, 0), Some(BigInt::from(1)));
        assert_eq!(as_int(0, 1), Some(BigInt::from(3)));
        assert_eq!(as_int(0, 2), Some(BigInt::from(5)));
        assert_eq!(as_int(1, 0), Some(BigInt::from(2)));
        assert_eq!(as_int(1, 1), Some(BigInt::from(4)));
        assert_eq!(as_int(1, 2), Some(BigInt::from(0)));
    }

    #[test]
    fn test_zero_pivot_substitution() {
        // s⁴ + s³ + s² + s + 1: row 2 computes to [0, 1, 0], so its leading
        // entry becomes ε. Roots are the primitive fifth roots of unity,
        // two of which lie in the right half-plane.
        let analysis = build(&[1, 1, 1, 1, 1]);
        assert_eq!(analysis.epsilon_rows, vec![2]);
        assert_eq!(analysis.num_unstable, 2);
        assert_eq!(
            analysis.first_column_signs(),
            vec![
                Sign::Positive,
                Sign::Positive,
                Sign::Positive,
                Sign::Negative,
                Sign::Positive
            ]
        );
    }

    #[test]
    fn test_auxiliary_polynomial_row() {
        // s⁵ + 2s⁴ + 24s³ + 48s² - 25s - 50 = (s+2)(s²+25)(s-1)(s+1):
        // row 2 vanishes and is rebuilt from d/ds(2s⁴ + 48s² - 50).
        let analysis = build(&[1, 2, 24, 48, -25, -50]);
        assert_eq!(analysis.auxiliary_rows, vec![2]);
        let as_int = |j: usize| {
            analysis.table[[2, j]]
                .as_rational()
                .map(|r| r.to_integer())
        };
        assert_eq!(as_int(0), Some(BigInt::from(8)));
        assert_eq!(as_int(1), Some(BigInt::from(96)));
        assert_eq!(as_int(2), Some(BigInt::from(0)));
        // Exactly one right-half-plane root, s = 1.
        assert_eq!(analysis.num_unstable, 1);
    }

    #[test]
    fn test_pure_even_polynomial_marginal() {
        // s² + 1: roots ±j sit on the imaginary axis, none in the RHP.
        let analysis = build(&[1, 0, 1]);
        assert_eq!(analysis.auxiliary_rows, vec![1]);
        assert_eq!(analysis.num_unstable, 0);
    }

    #[test]
    fn test_empty_polynomial_rejected() {
        let coeffs: Vec<BigRational> = vec![];
        assert_eq!(
            routh_array(&coeffs),
            Err(RouthError::EmptyPolynomial)
        );
    }

    #[test]
    fn test_zero_leading_coefficient_rejected() {
        let coeffs = coeffs_from_integers(&[0, 1, 2]);
        assert_eq!(
            routh_array(&coeffs),
            Err(RouthError::ZeroLeadingCoefficient)
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            RouthError::EmptyPolynomial.to_string(),
            "Coefficient sequence is empty"
        );
        assert!(RouthError::ZeroLeadingCoefficient
            .to_string()
            .contains("degree is ambiguous"));
    }

    #[test]
    fn test_exact_fractions_survive_in_table() {
        // (s+1)³ puts 8/3 in the first column of row 2.
        let analysis = build(&[1, 3, 3, 1]);
        assert_eq!(
            analysis.table[[2, 0]].as_rational(),
            Some(BigRational::new(BigInt::from(8), BigInt::from(3)))
        );
    }

    #[test]
    fn test_display_renders_every_row() {
        let analysis = build(&[1, 2, 3, 4, 5]);
        let text = analysis.to_string();
        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("s^4 "));
        assert!(text.contains("s^0 "));
    }

    #[test]
    fn test_count_sign_changes_skips_zeros() {
        let signs = [
            Sign::Positive,
            Sign::Zero,
            Sign::Negative,
            Sign::Zero,
            Sign::Negative,
            Sign::Positive,
        ];
        assert_eq!(count_sign_changes(signs.into_iter()), 2);
    }
}
