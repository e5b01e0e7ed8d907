//! Demonstration of Routh-Hurwitz stability analysis
//!
//! This example walks through four characteristic polynomials: a stable
//! one, an unstable one, one that needs the ε zero-pivot substitution, and
//! one whose vanishing row is rebuilt from the auxiliary polynomial.

use routh_rs::{coeffs_from_integers, routh_array};

fn report(title: &str, polynomial: &str, ints: &[i64]) {
    println!("{}", title);
    println!("{}", "-".repeat(title.len()));
    println!("P(s) = {}", polynomial);

    let analysis = routh_array(&coeffs_from_integers(ints)).expect("valid polynomial");

    println!("\nRouth array:");
    print!("{}", analysis);

    if !analysis.epsilon_rows.is_empty() {
        println!(
            "Zero pivot replaced by ε in row(s) {:?} (evaluated as ε → 0⁺)",
            analysis.epsilon_rows
        );
    }
    if !analysis.auxiliary_rows.is_empty() {
        println!(
            "Row(s) {:?} rebuilt from the auxiliary polynomial derivative",
            analysis.auxiliary_rows
        );
    }

    if analysis.stable {
        println!("Verdict: stable (no roots in the right half-plane)\n");
    } else {
        println!(
            "Verdict: unstable ({} root(s) in the right half-plane)\n",
            analysis.num_unstable
        );
    }
}

fn main() {
    println!("Routh-Hurwitz Stability Analysis Demo\n");

    report(
        "Example 1: Stable polynomial",
        "s³ + 3s² + 3s + 1  =  (s+1)³",
        &[1, 3, 3, 1],
    );

    report(
        "Example 2: Unstable polynomial",
        "s⁴ + 2s³ + 3s² + 4s + 5",
        &[1, 2, 3, 4, 5],
    );

    report(
        "Example 3: Zero pivot (ε substitution)",
        "s⁴ + s³ + s² + s + 1",
        &[1, 1, 1, 1, 1],
    );

    report(
        "Example 4: Vanishing row (auxiliary polynomial)",
        "s⁵ + 2s⁴ + 24s³ + 48s² - 25s - 50  =  (s+2)(s²+25)(s-1)(s+1)",
        &[1, 2, 24, 48, -25, -50],
    );
}
