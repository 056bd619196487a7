// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Semantic Field Physics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Semantic field physics: reference frame, coupled nonlinear dynamics
//! with fixed-step RK4 integration, harmony/consciousness metrics, and
//! generative state combination.

pub mod compose;
pub mod dynamics;
pub mod metrics;
pub mod params;

pub use compose::{design_concept, semantic_blend};
pub use dynamics::{SemanticField, Trajectory, TrajectorySample};
pub use metrics::{
    classify_phase, consciousness, harmony, harmony_self_referential, satisfies_uncertainty_floor,
    semantic_voltage, uncertainty_product, Phase,
};
pub use params::{build_coupling_matrix, ReferenceFrame, ANCHOR, EQUILIBRIUM, PHI};
