// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Semantic State Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! Telos Kernel — the semantic state-evolution core.

pub mod config;
pub mod error;
pub mod state;

pub use config::TelosConfig;
pub use error::{TelosError, TelosResult};
pub use state::{Axis, StateVector, N_AXES};
