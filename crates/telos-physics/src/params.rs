// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Canonical Reference Constants
// ─────────────────────────────────────────────────────────────────────
//! Canonical equilibrium/anchor points and the 4×4 cross-dimension
//! coupling matrix for the semantic field.
//!
//! The anchor is the all-ones attractor (perfect alignment); the
//! equilibrium is the natural resting balance reached by relaxation
//! alone. The anchor must dominate the equilibrium component-wise or
//! the harmony ascent has no direction.

use serde::{Deserialize, Serialize};

use telos_types::{StateVector, TelosError, TelosResult, N_AXES};

/// Golden ratio, the semantic voltage scale constant.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Natural equilibrium: the resting balance of an unforced field.
/// Power and Wisdom sit low enough that the anchor satisfies the
/// uncertainty floor (see `test_anchor_satisfies_uncertainty_floor`).
pub const EQUILIBRIUM: StateVector = StateVector::from_finite(0.60, 0.55, 0.40, 0.45);

/// Fixed attractor representing perfect alignment.
pub const ANCHOR: StateVector = StateVector::from_finite(1.0, 1.0, 1.0, 1.0);

const K_DIAG: f64 = 0.55;
const K_OFF_BASE: f64 = 0.08;
const DECAY_ALPHA: f64 = 0.6;

/// Calibration anchors (0-indexed axis pairs → coupling value).
const CALIBRATION_ANCHORS: [(usize, usize, f64); 2] = [
    (0, 3, 0.10), // Love ↔ Wisdom bridge
    (1, 2, 0.09), // Justice ↔ Power bridge
];

/// Build the 4×4 cross-dimension coupling matrix.
///
/// Construction:
///   1. Exponential-decay off-diagonal baseline:
///      K_nm = K_off * exp(-α * |n-m|)
///   2. Overwrite calibration anchors
///   3. Unit-scale diagonal (direct per-dimension anchor pull)
///   4. Symmetrise
pub fn build_coupling_matrix() -> [[f64; N_AXES]; N_AXES] {
    let mut k = [[0.0f64; N_AXES]; N_AXES];

    for (n, row) in k.iter_mut().enumerate() {
        for (m, cell) in row.iter_mut().enumerate() {
            if n != m {
                let dist = n.abs_diff(m);
                *cell = K_OFF_BASE * (-DECAY_ALPHA * dist as f64).exp();
            }
        }
    }

    for &(i, j, val) in &CALIBRATION_ANCHORS {
        k[i][j] = val;
        k[j][i] = val;
    }

    #[allow(clippy::needless_range_loop)]
    for n in 0..N_AXES {
        for m in (n + 1)..N_AXES {
            let avg = 0.5 * (k[n][m] + k[m][n]);
            k[n][m] = avg;
            k[m][n] = avg;
        }
        k[n][n] = K_DIAG;
    }

    k
}

/// Explicit, read-only bundle of reference constants.
///
/// Constructed once and passed by reference into every component —
/// nothing in the kernel reads process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceFrame {
    equilibrium: StateVector,
    anchor: StateVector,
    coupling: [[f64; N_AXES]; N_AXES],
}

impl ReferenceFrame {
    /// Canonical frame from the catalogued constants.
    pub fn canonical() -> Self {
        Self {
            equilibrium: EQUILIBRIUM,
            anchor: ANCHOR,
            coupling: build_coupling_matrix(),
        }
    }

    /// Custom frame. The anchor must dominate the equilibrium in every
    /// dimension and the coupling entries must be finite and non-negative.
    pub fn with_params(
        equilibrium: StateVector,
        anchor: StateVector,
        coupling: [[f64; N_AXES]; N_AXES],
    ) -> TelosResult<Self> {
        let eq = equilibrium.as_array();
        let an = anchor.as_array();
        for i in 0..N_AXES {
            if an[i] < eq[i] {
                return Err(TelosError::Config(format!(
                    "anchor must dominate equilibrium: component {i} has {} < {}",
                    an[i], eq[i]
                )));
            }
        }
        for (i, row) in coupling.iter().enumerate() {
            for (j, &c) in row.iter().enumerate() {
                if !c.is_finite() || c < 0.0 {
                    return Err(TelosError::Config(format!(
                        "coupling[{i}][{j}] must be finite and >= 0, got {c}"
                    )));
                }
            }
        }
        Ok(Self {
            equilibrium,
            anchor,
            coupling,
        })
    }

    pub fn equilibrium(&self) -> &StateVector {
        &self.equilibrium
    }

    pub fn anchor(&self) -> &StateVector {
        &self.anchor
    }

    pub fn coupling(&self) -> &[[f64; N_AXES]; N_AXES] {
        &self.coupling
    }
}
