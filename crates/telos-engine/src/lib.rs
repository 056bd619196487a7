// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Autopoietic Engines
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Generation-indexed evolution engines over the semantic field.
//!
//! # Evolution Invariants
//!
//! 1. **Terminal states are absorbing**: once an agent reaches
//!    `Converged` or `Exhausted`, further `evolve` calls leave its
//!    state and bookkeeping untouched.
//!
//! 2. **Snapshot-then-update**: a collective step computes every
//!    agent's derivative from one immutable snapshot taken before any
//!    write. No agent ever observes a peer's same-step update, so the
//!    result is independent of agent iteration order.
//!
//! 3. **Agents are engine-owned**: nothing outside the owning engine
//!    mutates an `Agent`; peers influence each other only through the
//!    shared mean-field term derived from the snapshot.

pub mod agent;
pub mod autopoietic;
pub mod collective;

pub use agent::{Agent, EngineStatus, EvolveReport};
pub use autopoietic::AutopoieticEngine;
pub use collective::CollectiveAutopoiesis;
