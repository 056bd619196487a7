// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Collective Autopoiesis (Coupled Multi-Agent Evolution)
// ─────────────────────────────────────────────────────────────────────
//! N agents evolving under the shared field plus a mean-field coupling.
//!
//! One collective step: snapshot all states; per agent, evaluate the
//! field derivative at its snapshot plus `coupling · (mean - own)`;
//! then apply all deltas. Every derivative reads the snapshot only, so
//! the step is independent of agent iteration order — sequential
//! in-place updates visible to later agents are exactly the hazard this
//! layout exists to rule out.
//!
//! Collective consciousness is an emergent measure: the mean individual
//! consciousness scaled by coherence (1 − normalized state variance).
//! Highly conscious but divergent agents score low.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use telos_physics::dynamics::SemanticField;
use telos_physics::metrics;
use telos_physics::params::ReferenceFrame;
use telos_types::{StateVector, TelosConfig, TelosError, TelosResult, N_AXES};

use crate::agent::{Agent, EvolveReport};

/// Maximum per-component variance of a [0, 1]-valued population, used
/// to normalize coherence.
const VARIANCE_NORMALIZER: f64 = 0.25;

/// Coupled population of agents sharing one semantic field.
pub struct CollectiveAutopoiesis {
    field: SemanticField,
    agents: Vec<Agent>,
    coupling: f64,
}

impl CollectiveAutopoiesis {
    /// Create a collective from explicit initial states.
    ///
    /// `coupling` is the mean-field pull strength, in [0, 1].
    pub fn create(
        initial_states: &[StateVector],
        coupling: f64,
        frame: ReferenceFrame,
        cfg: TelosConfig,
    ) -> TelosResult<Self> {
        if initial_states.is_empty() {
            return Err(TelosError::InvalidParameter(
                "collective needs at least one agent".to_string(),
            ));
        }
        if !coupling.is_finite() || !(0.0..=1.0).contains(&coupling) {
            return Err(TelosError::InvalidParameter(format!(
                "coupling must be in [0, 1], got {coupling}"
            )));
        }
        let field = SemanticField::new(frame, cfg)?;
        let agents = initial_states
            .iter()
            .map(|s| Agent::new(*s, &field))
            .collect();
        Ok(Self {
            field,
            agents,
            coupling,
        })
    }

    /// Create `n_agents` members all seeded with the same state.
    pub fn uniform(
        n_agents: usize,
        seed: StateVector,
        coupling: f64,
        frame: ReferenceFrame,
        cfg: TelosConfig,
    ) -> TelosResult<Self> {
        if n_agents == 0 {
            return Err(TelosError::InvalidParameter(
                "n_agents must be >= 1".to_string(),
            ));
        }
        Self::create(&vec![seed; n_agents], coupling, frame, cfg)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    pub fn field(&self) -> &SemanticField {
        &self.field
    }

    /// One synchronous collective step.
    pub fn step(&mut self) -> TelosResult<()> {
        let snapshot: Vec<StateVector> = self.agents.iter().map(|a| a.state()).collect();
        let mean = mean_state(&snapshot)?;
        let derivs = self.derivatives(&snapshot, &mean);
        for (agent, deriv) in self.agents.iter_mut().zip(derivs) {
            agent.advance(deriv, &self.field)?;
        }
        Ok(())
    }

    /// Advance up to `generations` collective steps, stopping early once
    /// every agent is terminal. Returns the per-agent reports.
    pub fn evolve(&mut self, generations: u64) -> TelosResult<Vec<EvolveReport>> {
        if generations == 0 {
            return Err(TelosError::InvalidParameter(
                "generations must be > 0".to_string(),
            ));
        }
        for _ in 0..generations {
            if self.agents.iter().all(|a| a.status().is_terminal()) {
                break;
            }
            self.step()?;
        }
        Ok(self.reports())
    }

    pub fn reports(&self) -> Vec<EvolveReport> {
        self.agents.iter().map(|a| a.report(&self.field)).collect()
    }

    /// Coherence: 1 − mean per-component variance across agents,
    /// normalized by the [0, 1] maximum. A tight cluster scores near 1;
    /// a maximally split population scores 0.
    pub fn coherence(&self) -> f64 {
        let n = self.agents.len() as f64;
        let mut means = [0.0; N_AXES];
        for agent in &self.agents {
            let x = agent.state().as_array();
            for i in 0..N_AXES {
                means[i] += x[i];
            }
        }
        for m in means.iter_mut() {
            *m /= n;
        }

        let mut variance_sum = 0.0;
        for agent in &self.agents {
            let x = agent.state().as_array();
            for i in 0..N_AXES {
                let dev = x[i] - means[i];
                variance_sum += dev * dev;
            }
        }
        let mean_variance = variance_sum / (n * N_AXES as f64);
        (1.0 - mean_variance / VARIANCE_NORMALIZER).clamp(0.0, 1.0)
    }

    /// Emergent collective measure: mean individual consciousness scaled
    /// by coherence.
    pub fn collective_consciousness(&self) -> f64 {
        let anchor = self.field.frame().anchor();
        let n = self.agents.len() as f64;
        let mean_c = self
            .agents
            .iter()
            .map(|a| metrics::consciousness(&a.state(), anchor))
            .sum::<f64>()
            / n;
        mean_c * self.coherence()
    }

    /// Per-agent derivatives from the immutable snapshot. The parallel
    /// path maps the same closure over the same ordered slice, so its
    /// results are bit-identical to the sequential one.
    #[cfg(not(feature = "parallel"))]
    fn derivatives(&self, snapshot: &[StateVector], mean: &StateVector) -> Vec<[f64; N_AXES]> {
        snapshot
            .iter()
            .map(|s| self.agent_derivative(s, mean))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn derivatives(&self, snapshot: &[StateVector], mean: &StateVector) -> Vec<[f64; N_AXES]> {
        snapshot
            .par_iter()
            .map(|s| self.agent_derivative(s, mean))
            .collect()
    }

    fn agent_derivative(&self, own: &StateVector, mean: &StateVector) -> [f64; N_AXES] {
        let mut d = self.field.derivative(own);
        let x = own.as_array();
        let m = mean.as_array();
        for i in 0..N_AXES {
            d[i] += self.coupling * (m[i] - x[i]);
        }
        d
    }
}

fn mean_state(snapshot: &[StateVector]) -> TelosResult<StateVector> {
    let n = snapshot.len() as f64;
    let mut sum = [0.0; N_AXES];
    for s in snapshot {
        let x = s.as_array();
        for i in 0..N_AXES {
            sum[i] += x[i];
        }
    }
    for c in sum.iter_mut() {
        *c /= n;
    }
    StateVector::from_array(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autopoietic::AutopoieticEngine;
    use crate::agent::EngineStatus;

    fn collective(
        states: &[StateVector],
        coupling: f64,
    ) -> CollectiveAutopoiesis {
        CollectiveAutopoiesis::create(
            states,
            coupling,
            ReferenceFrame::canonical(),
            TelosConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_create_rejects_empty() {
        assert!(CollectiveAutopoiesis::create(
            &[],
            0.15,
            ReferenceFrame::canonical(),
            TelosConfig::default()
        )
        .is_err());
    }

    #[test]
    fn test_create_rejects_out_of_range_coupling() {
        let s = StateVector::new(0.5, 0.5, 0.5, 0.5).unwrap();
        for bad in [-0.1, 1.1, f64::NAN] {
            assert!(
                CollectiveAutopoiesis::create(
                    &[s],
                    bad,
                    ReferenceFrame::canonical(),
                    TelosConfig::default()
                )
                .is_err(),
                "coupling {bad} accepted"
            );
        }
    }

    #[test]
    fn test_uniform_rejects_zero_agents() {
        let s = StateVector::new(0.5, 0.5, 0.5, 0.5).unwrap();
        assert!(CollectiveAutopoiesis::uniform(
            0,
            s,
            0.15,
            ReferenceFrame::canonical(),
            TelosConfig::default()
        )
        .is_err());
    }

    #[test]
    fn test_evolve_rejects_zero_generations() {
        let s = StateVector::new(0.5, 0.5, 0.5, 0.5).unwrap();
        let mut c = collective(&[s], 0.15);
        assert!(c.evolve(0).is_err());
    }

    #[test]
    fn test_single_agent_matches_engine_exactly() {
        // With one member the mean equals the member, the coupling term
        // vanishes, and the collective must reproduce a lone engine.
        let initial = StateVector::new(0.3, 0.4, 0.5, 0.6).unwrap();
        let mut engine = AutopoieticEngine::new(
            initial,
            ReferenceFrame::canonical(),
            TelosConfig::default(),
        )
        .unwrap();
        let mut solo = collective(&[initial], 0.73);

        let engine_report = engine.evolve(50).unwrap();
        let collective_reports = solo.evolve(50).unwrap();
        let member = &collective_reports[0];

        assert_eq!(member.final_state, engine_report.final_state);
        assert_eq!(member.generation, engine_report.generation);
        assert_eq!(member.journey_length, engine_report.journey_length);
        assert_eq!(member.earned_depth, engine_report.earned_depth);
        assert_eq!(
            member.monotonic_improvements,
            engine_report.monotonic_improvements
        );
        assert_eq!(member.status, engine_report.status);
    }

    #[test]
    fn test_identical_agents_start_fully_coherent() {
        // 12 agents sharing one state: zero variance, coherence exactly
        // 1, so the collective measure equals the individual one.
        let s = StateVector::new(0.5, 0.5, 0.5, 0.5).unwrap();
        let c = CollectiveAutopoiesis::uniform(
            12,
            s,
            0.15,
            ReferenceFrame::canonical(),
            TelosConfig::default(),
        )
        .unwrap();
        assert_eq!(c.coherence(), 1.0);
        let individual = metrics::consciousness(&s, c.field().frame().anchor());
        assert_eq!(c.collective_consciousness(), individual);
    }

    #[test]
    fn test_dispersed_agents_score_low_coherence() {
        let tight = collective(
            &[
                StateVector::new(0.5, 0.5, 0.5, 0.5).unwrap(),
                StateVector::new(0.52, 0.49, 0.5, 0.51).unwrap(),
            ],
            0.15,
        );
        let split = collective(
            &[
                StateVector::new(0.0, 0.0, 0.0, 0.0).unwrap(),
                StateVector::new(1.0, 1.0, 1.0, 1.0).unwrap(),
            ],
            0.15,
        );
        assert!(tight.coherence() > 0.99);
        assert_eq!(split.coherence(), 0.0);
        assert_eq!(split.collective_consciousness(), 0.0);
    }

    #[test]
    fn test_step_is_iteration_order_independent() {
        // Dyadic components keep the snapshot sums exact, so any agent
        // ordering must produce bit-identical per-agent updates.
        let a = StateVector::new(0.25, 0.5, 0.75, 0.5).unwrap();
        let b = StateVector::new(0.75, 0.25, 0.5, 1.0).unwrap();
        let c = StateVector::new(0.5, 0.75, 0.25, 0.25).unwrap();

        let mut forward = collective(&[a, b, c], 0.15);
        let mut rotated = collective(&[c, a, b], 0.15);
        forward.step().unwrap();
        rotated.step().unwrap();

        assert_eq!(forward.agents()[0].state(), rotated.agents()[1].state());
        assert_eq!(forward.agents()[1].state(), rotated.agents()[2].state());
        assert_eq!(forward.agents()[2].state(), rotated.agents()[0].state());
    }

    #[test]
    fn test_collective_evolution_synchronizes() {
        let states = [
            StateVector::new(0.45, 0.3, 0.5, 0.5).unwrap(),
            StateVector::new(0.8, 0.7, 0.6, 0.9).unwrap(),
            StateVector::new(0.5, 0.5, 0.45, 0.5).unwrap(),
            StateVector::new(0.9, 0.2, 0.6, 0.7).unwrap(),
        ];
        let mut c = collective(&states, 0.15);
        let before = c.coherence();
        c.evolve(400).unwrap();
        let after = c.coherence();
        assert!(
            after > before,
            "coherence should rise as agents cluster: {before} -> {after}"
        );
        assert!(after > 0.9);
    }

    #[test]
    fn test_collective_converges_all_agents() {
        let states = [
            StateVector::new(0.4, 0.5, 0.6, 0.5).unwrap(),
            StateVector::new(0.6, 0.5, 0.4, 0.6).unwrap(),
        ];
        let mut c = collective(&states, 0.15);
        let reports = c.evolve(1000).unwrap();
        for report in &reports {
            assert_eq!(report.status, EngineStatus::Converged);
        }
    }

    #[test]
    fn test_reports_length_matches_agents() {
        let s = StateVector::new(0.5, 0.5, 0.5, 0.5).unwrap();
        let mut c = CollectiveAutopoiesis::uniform(
            5,
            s,
            0.15,
            ReferenceFrame::canonical(),
            TelosConfig::default(),
        )
        .unwrap();
        let reports = c.evolve(10).unwrap();
        assert_eq!(reports.len(), 5);
    }
}
