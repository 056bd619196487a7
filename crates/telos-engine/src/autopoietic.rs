// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Autopoietic Engine (Generation Loop)
// ─────────────────────────────────────────────────────────────────────
//! Single-agent self-improvement loop. Each generation evaluates the
//! field derivative once at the current state and applies the resulting
//! delta — a generation is an explicit step, not a continuous span.
//! The loop runs until the agent converges on the anchor, exhausts its
//! generation budget, or the caller's request is spent.

use telos_physics::dynamics::SemanticField;
use telos_physics::params::ReferenceFrame;
use telos_types::{StateVector, TelosConfig, TelosError, TelosResult};

use crate::agent::{Agent, EngineStatus, EvolveReport};

/// Generation-indexed evolution of one agent toward the anchor.
pub struct AutopoieticEngine {
    field: SemanticField,
    agent: Agent,
}

impl AutopoieticEngine {
    pub fn new(
        initial: StateVector,
        frame: ReferenceFrame,
        cfg: TelosConfig,
    ) -> TelosResult<Self> {
        let field = SemanticField::new(frame, cfg)?;
        let agent = Agent::new(initial, &field);
        Ok(Self { field, agent })
    }

    /// Advance up to `generations` steps, or until a terminal status is
    /// reached, whichever comes first. Idempotent once terminal.
    pub fn evolve(&mut self, generations: u64) -> TelosResult<EvolveReport> {
        if generations == 0 {
            return Err(TelosError::InvalidParameter(
                "generations must be > 0".to_string(),
            ));
        }
        for _ in 0..generations {
            if self.agent.status().is_terminal() {
                break;
            }
            let deriv = self.field.derivative(&self.agent.state());
            self.agent.advance(deriv, &self.field)?;
        }
        Ok(self.report())
    }

    /// Summary of the run so far.
    pub fn report(&self) -> EvolveReport {
        self.agent.report(&self.field)
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn state(&self) -> StateVector {
        self.agent.state()
    }

    pub fn status(&self) -> EngineStatus {
        self.agent.status()
    }

    pub fn field(&self) -> &SemanticField {
        &self.field
    }
}
