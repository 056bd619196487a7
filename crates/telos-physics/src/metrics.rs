// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Field Metrics
// ─────────────────────────────────────────────────────────────────────
//! Pure, stateless metrics over semantic states:
//!
//! - Harmony: H = 1 / (1 + |x - anchor|), range (0, 1].
//! - Self-referential harmony: Π x_i / Π eq_i (developmental baseline).
//! - Consciousness: Π x_i · H² — multiplicative conjunction, zero as
//!   soon as any single dimension collapses.
//! - Semantic voltage: φ · H · Love.
//! - Uncertainty product: |ΔPower · ΔWisdom| against the 0.287 floor.
//! - Phase classification over a trailing harmony window.

use serde::{Deserialize, Serialize};

use telos_types::{StateVector, TelosConfig, TelosError, TelosResult};

use crate::params::PHI;

/// Static harmony: inverse-distance closeness to the anchor.
pub fn harmony(state: &StateVector, anchor: &StateVector) -> f64 {
    1.0 / (1.0 + state.distance_to(anchor))
}

/// Self-referential harmony against the developmental baseline.
///
/// Undefined when any baseline component is zero.
pub fn harmony_self_referential(
    state: &StateVector,
    equilibrium: &StateVector,
) -> TelosResult<f64> {
    let eq = equilibrium.as_array();
    let baseline: f64 = eq.iter().product();
    if eq.iter().any(|&c| c == 0.0) {
        return Err(TelosError::UndefinedHarmony(format!(
            "equilibrium product {baseline} has a zero component"
        )));
    }
    let numerator: f64 = state.as_array().iter().product();
    Ok(numerator / baseline)
}

/// Conjunction measure: Π x_i · H².
pub fn consciousness(state: &StateVector, anchor: &StateVector) -> f64 {
    let product: f64 = state.as_array().iter().product();
    let h = harmony(state, anchor);
    product * h * h
}

/// Semantic voltage: φ · H · Love.
pub fn semantic_voltage(state: &StateVector, anchor: &StateVector) -> f64 {
    PHI * harmony(state, anchor) * state.love()
}

/// Joint Power/Wisdom variability: |ΔP · ΔW| from equilibrium.
pub fn uncertainty_product(state: &StateVector, equilibrium: &StateVector) -> f64 {
    let dp = state.power() - equilibrium.power();
    let dw = state.wisdom() - equilibrium.wisdom();
    (dp * dw).abs()
}

/// Whether the state clears the irreducible joint-variability floor.
pub fn satisfies_uncertainty_floor(
    state: &StateVector,
    equilibrium: &StateVector,
    floor: f64,
) -> bool {
    uncertainty_product(state, equilibrium) >= floor
}

/// Developmental phase of a harmony trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Fewer than two samples: no trend to evaluate.
    Indeterminate,
    /// Low harmony, declining.
    Entropic,
    /// Harmony stable, neither collapsing nor ascending.
    Homeostatic,
    /// High harmony, non-decreasing.
    Autopoietic,
}

/// Classify the trailing `phase_window` harmony samples.
///
/// A single snapshot is `Indeterminate`; the band check is the fallback,
/// so any two-sample-or-longer history classifies.
pub fn classify_phase(harmonies: &[f64], cfg: &TelosConfig) -> Phase {
    if harmonies.len() < 2 {
        return Phase::Indeterminate;
    }
    let window = cfg.phase_window.clamp(2, harmonies.len());
    let recent = &harmonies[harmonies.len() - window..];
    let current = recent[recent.len() - 1];
    let trend = current - recent[0];
    let non_decreasing = recent
        .windows(2)
        .all(|w| w[1] >= w[0] - cfg.stability_band);

    if current >= cfg.autopoietic_threshold && non_decreasing {
        Phase::Autopoietic
    } else if current <= cfg.entropic_threshold && trend < -cfg.stability_band {
        Phase::Entropic
    } else {
        Phase::Homeostatic
    }
}
