// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Generative State Combination
// ─────────────────────────────────────────────────────────────────────
//! Operators that synthesise new states from existing ones: weighted
//! blending across a population and concept design from a partial
//! per-axis specification.

use telos_types::{Axis, StateVector, TelosError, TelosResult, N_AXES};

use crate::params::ReferenceFrame;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weighted average of `states`. Weights must be non-negative, match the
/// states in length, and sum to one within tolerance.
pub fn semantic_blend(states: &[StateVector], weights: &[f64]) -> TelosResult<StateVector> {
    if states.is_empty() {
        return Err(TelosError::InvalidWeights(
            "blend requires at least one state".to_string(),
        ));
    }
    if states.len() != weights.len() {
        return Err(TelosError::InvalidWeights(format!(
            "{} states but {} weights",
            states.len(),
            weights.len()
        )));
    }
    let mut sum = 0.0;
    for &w in weights {
        if !w.is_finite() || w < 0.0 {
            return Err(TelosError::InvalidWeights(format!(
                "weights must be finite and non-negative, got {w}"
            )));
        }
        sum += w;
    }
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(TelosError::InvalidWeights(format!(
            "weights must sum to 1, got {sum}"
        )));
    }

    let mut out = [0.0; N_AXES];
    for (state, &w) in states.iter().zip(weights.iter()) {
        let x = state.as_array();
        for i in 0..N_AXES {
            out[i] += w * x[i];
        }
    }
    StateVector::from_array(out)
}

/// Build a state from a partial per-axis specification; axes left
/// unspecified fall back to the frame's equilibrium component — a
/// concept silent on Power carries equilibrium-level Power, not none.
/// Later duplicates override earlier ones.
pub fn design_concept(
    targets: &[(Axis, f64)],
    frame: &ReferenceFrame,
) -> TelosResult<StateVector> {
    let mut out = frame.equilibrium().as_array();
    for &(axis, value) in targets {
        if !value.is_finite() {
            return Err(TelosError::InvalidState(format!(
                "{} target is {value}",
                axis.label()
            )));
        }
        out[axis.index()] = value;
    }
    StateVector::from_array(out)
}
