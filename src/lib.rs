//! routh-rs: Routh-Hurwitz stability analysis in exact arithmetic
//!
//! This crate determines how many roots of a real polynomial lie in the
//! open right half of the complex plane (the classical stability question
//! for a linear system's characteristic equation) without ever computing
//! the roots. It builds the Routh array from the polynomial's coefficients
//! and counts the sign changes in the array's first column.
//!
//! All arithmetic is exact: coefficients are `num_rational::BigRational`
//! values and the degenerate zero-pivot case is handled symbolically with
//! an infinitesimal placeholder ε rather than a small floating-point
//! stand-in, so sign decisions are never corrupted by rounding.
//!
//! # Organization
//!
//! - [`routh`]: the Routh array construction and stability count
//! - [`eps`]: exact rational functions of the infinitesimal ε, with
//!   one-sided limit sign evaluation
//!
//! # Example
//!
//! ```
//! use routh_rs::{coeffs_from_integers, routh_array};
//!
//! // s⁴ + 2s³ + 3s² + 4s + 5 has two roots in the right half-plane.
//! let analysis = routh_array(&coeffs_from_integers(&[1, 2, 3, 4, 5])).unwrap();
//! assert!(!analysis.stable);
//! assert_eq!(analysis.num_unstable, 2);
//! ```

pub mod eps;
pub mod routh;

pub use eps::{Eps, Sign};
pub use routh::{coeffs_from_integers, routh_array, RouthAnalysis, RouthError};
