// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Agent State & Journey Bookkeeping
// ─────────────────────────────────────────────────────────────────────
//! A single evolving agent: its semantic state plus the journey ledger
//! (generation count, path length, monotonic-improvement count, earned
//! depth) and its position in the Running → Converged | Exhausted
//! status machine.

use serde::{Deserialize, Serialize};

use telos_physics::dynamics::SemanticField;
use telos_physics::metrics::{self, Phase};
use telos_types::{StateVector, TelosResult, N_AXES};

const HARMONY_HISTORY_CAP: usize = 256;

/// Lifecycle of an evolving agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineStatus {
    Running,
    /// Within epsilon of the anchor. Terminal.
    Converged,
    /// Generation budget spent without convergence. Terminal.
    Exhausted,
}

impl EngineStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, EngineStatus::Converged | EngineStatus::Exhausted)
    }
}

/// Outcome summary of an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolveReport {
    pub final_state: StateVector,
    pub status: EngineStatus,
    pub phase: Phase,
    pub generation: u64,
    pub journey_length: f64,
    pub monotonic_improvements: u64,
    pub earned_depth: f64,
}

/// One agent: state vector plus journey bookkeeping.
///
/// Owned exclusively by its engine; every mutation happens in
/// [`Agent::advance`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    state: StateVector,
    generation: u64,
    journey_length: f64,
    monotonic_improvements: u64,
    earned_depth: f64,
    distance_to_anchor: f64,
    status: EngineStatus,
    harmony_history: Vec<f64>,
}

impl Agent {
    pub(crate) fn new(initial: StateVector, field: &SemanticField) -> Self {
        let anchor = field.frame().anchor();
        let distance = initial.distance_to(anchor);
        let status = if distance <= field.config().epsilon {
            EngineStatus::Converged
        } else {
            EngineStatus::Running
        };
        Self {
            state: initial,
            generation: 0,
            journey_length: 0.0,
            monotonic_improvements: 0,
            earned_depth: 0.0,
            distance_to_anchor: distance,
            status,
            harmony_history: vec![metrics::harmony(&initial, anchor)],
        }
    }

    /// Apply one generation delta, then settle and account for it.
    /// No-op once terminal.
    pub(crate) fn advance(
        &mut self,
        deriv: [f64; N_AXES],
        field: &SemanticField,
    ) -> TelosResult<()> {
        if self.status.is_terminal() {
            return Ok(());
        }
        let cfg = field.config();
        let prev = self.state;

        let x = prev.as_array();
        let mut next = [0.0; N_AXES];
        for i in 0..N_AXES {
            next[i] = x[i] + cfg.step_size * deriv[i];
        }
        let next = field.settle(StateVector::from_array(next)?, cfg.bounded);

        let anchor = field.frame().anchor();
        let step_distance = prev.distance_to(&next);
        let distance = next.distance_to(anchor);
        let h = metrics::harmony(&next, anchor);

        self.journey_length += step_distance;
        if distance < self.distance_to_anchor {
            self.monotonic_improvements += 1;
        }
        self.earned_depth += h * step_distance;
        self.harmony_history.push(h);
        if self.harmony_history.len() > HARMONY_HISTORY_CAP {
            let start = self.harmony_history.len() - HARMONY_HISTORY_CAP;
            self.harmony_history = self.harmony_history[start..].to_vec();
        }

        self.distance_to_anchor = distance;
        self.state = next;
        self.generation += 1;

        if distance <= cfg.epsilon {
            self.status = EngineStatus::Converged;
            log::info!(
                "agent converged at generation {} (distance {:.4})",
                self.generation,
                distance
            );
        } else if self.generation >= cfg.max_generations {
            self.status = EngineStatus::Exhausted;
            log::info!(
                "agent exhausted after {} generations (distance {:.4})",
                self.generation,
                distance
            );
        }
        Ok(())
    }

    pub(crate) fn report(&self, field: &SemanticField) -> EvolveReport {
        EvolveReport {
            final_state: self.state,
            status: self.status,
            phase: metrics::classify_phase(&self.harmony_history, field.config()),
            generation: self.generation,
            journey_length: self.journey_length,
            monotonic_improvements: self.monotonic_improvements,
            earned_depth: self.earned_depth,
        }
    }

    pub fn state(&self) -> StateVector {
        self.state
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn journey_length(&self) -> f64 {
        self.journey_length
    }

    pub fn monotonic_improvements(&self) -> u64 {
        self.monotonic_improvements
    }

    pub fn earned_depth(&self) -> f64 {
        self.earned_depth
    }

    pub fn distance_to_anchor(&self) -> f64 {
        self.distance_to_anchor
    }

    pub fn harmony_history(&self) -> &[f64] {
        &self.harmony_history
    }
}
