//! Product-formula expansion.
//!
//! Decomposes one long evolution `exp(-i t H)` into an ordered sequence of
//! short exponential factors `exp(-i θ_j P_j)` using the Lie–Trotter
//! formula (order 1) or the recursive symmetric Suzuki formula (positive
//! even orders). Expansion is pure and deterministic: identical inputs
//! yield an identical factor sequence, both in term order and in angle
//! values.

use alsvid_ir::ParameterExpression;
use alsvid_pauli::{PauliTerm, SparseHamiltonian};

use crate::error::SynthResult;
use crate::request::EvolutionRequest;

/// One factor `exp(-i angle · term)` of the expanded product.
///
/// Internal artifact of the pipeline; only the lowered gate blocks leave
/// this crate.
#[derive(Debug, Clone)]
pub(crate) struct ExpansionFactor<'a> {
    /// The Pauli term being exponentiated.
    pub term: &'a PauliTerm,
    /// The exponent angle, `re(coeff) · scale · t / reps`.
    pub angle: ParameterExpression,
}

/// Expand a Hamiltonian evolution into ordered `(term, angle)` factors.
///
/// Only the real part of each coefficient enters the angles: evolution is
/// defined for Hermitian input, and interchange-level imaginary parts are
/// not the expander's concern.
pub(crate) fn expand<'a>(
    hamiltonian: &'a SparseHamiltonian,
    request: &EvolutionRequest,
) -> SynthResult<Vec<ExpansionFactor<'a>>> {
    request.validate()?;

    let terms = hamiltonian.terms();
    let mut step = Vec::new();
    suzuki_scales(terms.len(), request.order, 1.0, &mut step);

    let reps = request.reps as usize;
    let step_scale = 1.0 / request.reps as f64;
    let mut factors = Vec::with_capacity(step.len() * reps);
    for _ in 0..reps {
        factors.extend(step.iter().map(|&(index, scale)| {
            let term = &terms[index];
            ExpansionFactor {
                term,
                angle: request
                    .time
                    .scale(term.coefficient().re * scale * step_scale),
            }
        }));
    }
    Ok(factors)
}

/// Emit `(term index, scale)` pairs for one step of the order-`order`
/// formula, each scale relative to the full step.
///
/// Order 1 emits every term once. Order 2 is the symmetric palindrome
/// `[c₁/2 … c_{m−1}/2, c_m, c_{m−1}/2 … c₁/2]`. Order `2k ≥ 4` applies the
/// Suzuki recurrence
///
/// ```text
/// S_2k(s) = S_{2k−2}(p_k s)² · S_{2k−2}((1−4 p_k) s) · S_{2k−2}(p_k s)²
/// p_k     = 1 / (4 − 4^{1/(2k−1)})
/// ```
///
/// which bottoms out at the order-2 palindrome. The recursion is explicit
/// (no generator chaining) so the emission order stays auditable; every
/// level is itself a palindrome and the scales for each term sum to 1.
fn suzuki_scales(num_terms: usize, order: u32, scale: f64, out: &mut Vec<(usize, f64)>) {
    match order {
        1 => out.extend((0..num_terms).map(|index| (index, scale))),
        2 => {
            out.extend((0..num_terms.saturating_sub(1)).map(|index| (index, scale / 2.0)));
            if num_terms > 0 {
                out.push((num_terms - 1, scale));
            }
            out.extend((0..num_terms.saturating_sub(1)).rev().map(|index| (index, scale / 2.0)));
        }
        _ => {
            let p = 1.0 / (4.0 - 4f64.powf(1.0 / (order as f64 - 1.0)));
            for _ in 0..2 {
                suzuki_scales(num_terms, order - 2, scale * p, out);
            }
            suzuki_scales(num_terms, order - 2, scale * (1.0 - 4.0 * p), out);
            for _ in 0..2 {
                suzuki_scales(num_terms, order - 2, scale * p, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;
    use num_complex::Complex64;

    fn test_hamiltonian(num_terms: usize) -> SparseHamiltonian {
        let entries = (0..num_terms).map(|i| {
            (
                "Z".to_string(),
                vec![i as u32],
                Complex64::new(i as f64 + 1.0, 0.0),
            )
        });
        SparseHamiltonian::from_sparse_list(entries, num_terms as u32).unwrap()
    }

    fn angles(factors: &[ExpansionFactor<'_>]) -> Vec<f64> {
        factors
            .iter()
            .map(|f| f.angle.as_f64().expect("concrete angle"))
            .collect()
    }

    #[test]
    fn test_order1_factor_count() {
        let ham = test_hamiltonian(3);
        for reps in [1_u32, 2, 5] {
            let request = EvolutionRequest::new(1.0).with_reps(reps);
            let factors = expand(&ham, &request).unwrap();
            assert_eq!(factors.len(), 3 * reps as usize);
        }
    }

    #[test]
    fn test_order1_angles_and_order() {
        let ham = test_hamiltonian(2);
        let request = EvolutionRequest::new(0.5).with_reps(2);
        let factors = expand(&ham, &request).unwrap();
        // Store order within each step, coefficient * t / r.
        assert_eq!(angles(&factors), vec![0.25, 0.5, 0.25, 0.5]);
    }

    #[test]
    fn test_order2_palindrome() {
        let ham = test_hamiltonian(3);
        let request = EvolutionRequest::new(1.0).with_order(2);
        let factors = expand(&ham, &request).unwrap();
        assert_eq!(factors.len(), 2 * 3 - 1);

        let profile: Vec<(String, f64)> = factors
            .iter()
            .map(|f| (f.term.label(), f.angle.as_f64().unwrap()))
            .collect();
        let mut reversed = profile.clone();
        reversed.reverse();
        assert_eq!(profile, reversed, "order-2 step must be a palindrome");
    }

    #[test]
    fn test_order4_palindrome_and_growth() {
        let ham = test_hamiltonian(3);
        let order2 = expand(&ham, &EvolutionRequest::new(1.0).with_order(2)).unwrap();
        let order4 = expand(&ham, &EvolutionRequest::new(1.0).with_order(4)).unwrap();
        let order6 = expand(&ham, &EvolutionRequest::new(1.0).with_order(6)).unwrap();

        // 5^(k-1) * (2m - 1) factors per step.
        assert_eq!(order4.len(), 5 * order2.len());
        assert_eq!(order6.len(), 25 * order2.len());

        let profile: Vec<(String, f64)> = order4
            .iter()
            .map(|f| (f.term.label(), f.angle.as_f64().unwrap()))
            .collect();
        let mut reversed = profile.clone();
        reversed.reverse();
        for (a, b) in profile.iter().zip(&reversed) {
            assert_eq!(a.0, b.0);
            assert!((a.1 - b.1).abs() < 1e-12, "palindrome angle mismatch");
        }
    }

    #[test]
    fn test_angle_sums_match_full_step() {
        let ham = test_hamiltonian(4);
        for order in [1_u32, 2, 4, 6] {
            let request = EvolutionRequest::new(1.0).with_order(order).with_reps(3);
            let factors = expand(&ham, &request).unwrap();
            for term_index in 0..4 {
                let label = ham.terms()[term_index].label();
                let indices = ham.terms()[term_index].indices().to_vec();
                let total: f64 = factors
                    .iter()
                    .filter(|f| f.term.label() == label && f.term.indices() == indices)
                    .map(|f| f.angle.as_f64().unwrap())
                    .sum();
                let expected = ham.terms()[term_index].coefficient().re;
                assert!(
                    (total - expected).abs() < 1e-9,
                    "order {order}: angles for term {term_index} sum to {total}, expected {expected}"
                );
            }
        }
    }

    #[test]
    fn test_symbolic_time_flows_through() {
        let ham = test_hamiltonian(1);
        let request = EvolutionRequest::new(ParameterExpression::symbol("t")).with_reps(4);
        let factors = expand(&ham, &request).unwrap();
        assert_eq!(factors.len(), 4);
        for factor in &factors {
            assert!(factor.angle.is_symbolic());
            let bound = factor.angle.bind("t", 2.0).simplify();
            assert!((bound.as_f64().unwrap() - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_invalid_order_rejected() {
        let ham = test_hamiltonian(1);
        for order in [0_u32, 3, 5] {
            let err = expand(&ham, &EvolutionRequest::new(1.0).with_order(order)).unwrap_err();
            assert!(matches!(err, SynthError::InvalidOrder { .. }));
        }
    }

    #[test]
    fn test_zero_steps_rejected() {
        let ham = test_hamiltonian(1);
        let err = expand(&ham, &EvolutionRequest::new(1.0).with_reps(0)).unwrap_err();
        assert!(matches!(err, SynthError::InvalidStepCount { reps: 0 }));
    }

    #[test]
    fn test_single_term_order2() {
        let ham = test_hamiltonian(1);
        let factors = expand(&ham, &EvolutionRequest::new(1.0).with_order(2)).unwrap();
        // One term: the palindrome degenerates to a single full-scale factor.
        assert_eq!(angles(&factors), vec![1.0]);
    }

    #[test]
    fn test_empty_hamiltonian() {
        let ham = SparseHamiltonian::from_sparse_list([], 2).unwrap();
        let factors = expand(&ham, &EvolutionRequest::new(1.0).with_order(4)).unwrap();
        assert!(factors.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let ham = test_hamiltonian(3);
        let request = EvolutionRequest::new(0.7).with_order(4).with_reps(2);
        let a = angles(&expand(&ham, &request).unwrap());
        let b = angles(&expand(&ham, &request).unwrap());
        assert_eq!(a, b);
    }
}
