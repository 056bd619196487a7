// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Semantic Field Dynamics (RK4 Integrator)
// ─────────────────────────────────────────────────────────────────────
//! Coupled nonlinear dynamics of the semantic state:
//!
//!   dx_i/dt = -k (1 - H) (x_i - eq_i)
//!           + (1 + g·H) Σ_j K_ij (anchor_j - x_j)
//!           [- e · |Power| · max(0, 1 - Wisdom)   on Justice only]
//!
//! The (1 - H) gate on the relaxation term makes the anchor an exact
//! fixed point: at perfect alignment every term vanishes. Away from the
//! anchor the gate approaches 1 and the pull toward the equilibrium is
//! the plain linear one.
//!
//! Integration is fixed-step classic Runge–Kutta 4. After every step the
//! state is settled: the uncertainty floor is re-established by a minimum
//! Power/Wisdom injection, then (in bounded mode) the state is hard
//! clamped into [0, 1]^4 — a stop, not a reflection, so bounded
//! trajectories can stick at a face.

use serde::{Deserialize, Serialize};

use telos_types::{Axis, StateVector, TelosConfig, TelosError, TelosResult, N_AXES};

use crate::metrics;
use crate::params::ReferenceFrame;

/// One time-stamped trajectory point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub t: f64,
    pub state: StateVector,
}

/// Ordered samples from a single integration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    pub samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn final_state(&self) -> Option<&StateVector> {
        self.samples.last().map(|s| &s.state)
    }

    /// Harmony of every sample against the frame's anchor.
    pub fn harmonies(&self, frame: &ReferenceFrame) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| metrics::harmony(&s.state, frame.anchor()))
            .collect()
    }

    /// Harmony-weighted path length: Σ H(x_{n+1}) · |x_{n+1} - x_n|.
    ///
    /// Rewards distance travelled at high harmony, not mere arrival.
    pub fn earned_depth(&self, frame: &ReferenceFrame) -> f64 {
        self.samples
            .windows(2)
            .map(|w| {
                let step = w[0].state.distance_to(&w[1].state);
                metrics::harmony(&w[1].state, frame.anchor()) * step
            })
            .sum()
    }
}

/// The semantic field: reference frame plus tunables, able to evaluate
/// derivatives and advance states.
#[derive(Debug, Clone)]
pub struct SemanticField {
    frame: ReferenceFrame,
    cfg: TelosConfig,
}

impl SemanticField {
    pub fn new(frame: ReferenceFrame, cfg: TelosConfig) -> TelosResult<Self> {
        cfg.validate()?;
        Ok(Self { frame, cfg })
    }

    pub fn frame(&self) -> &ReferenceFrame {
        &self.frame
    }

    pub fn config(&self) -> &TelosConfig {
        &self.cfg
    }

    /// Instantaneous derivative of the field at `state`.
    pub fn derivative(&self, state: &StateVector) -> [f64; N_AXES] {
        let x = state.as_array();
        let eq = self.frame.equilibrium().as_array();
        let anchor = self.frame.anchor().as_array();
        let k = self.frame.coupling();

        let h = metrics::harmony(state, self.frame.anchor());
        let kappa = 1.0 + self.cfg.karma_gain * h;
        let relax_gate = 1.0 - h;

        let mut d = [0.0; N_AXES];
        for i in 0..N_AXES {
            let relaxation = -self.cfg.damping * relax_gate * (x[i] - eq[i]);
            let mut pull = 0.0;
            for (j, &xj) in x.iter().enumerate() {
                pull += k[i][j] * (anchor[j] - xj);
            }
            d[i] = relaxation + kappa * pull;
        }

        // Unchecked Power erodes Justice; Wisdom attenuates. The erosion
        // path touches Justice's derivative only.
        let power = x[Axis::Power.index()];
        let wisdom = x[Axis::Wisdom.index()];
        d[Axis::Justice.index()] -= self.cfg.erosion * power.abs() * (1.0 - wisdom).max(0.0);

        d
    }

    /// One classic RK4 step of size `dt` (no settling).
    pub fn rk4_step(&self, state: &StateVector, dt: f64) -> TelosResult<StateVector> {
        let k1 = self.derivative(state);
        let s2 = offset(state, &k1, dt / 2.0)?;
        let k2 = self.derivative(&s2);
        let s3 = offset(state, &k2, dt / 2.0)?;
        let k3 = self.derivative(&s3);
        let s4 = offset(state, &k3, dt)?;
        let k4 = self.derivative(&s4);

        let x = state.as_array();
        let mut next = [0.0; N_AXES];
        for i in 0..N_AXES {
            next[i] = x[i] + dt / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]);
        }
        StateVector::from_array(next)
    }

    /// Post-step settling: uncertainty-floor injection, then the bounded
    /// clamp. The clamp runs last — at the boundary the [0, 1] invariant
    /// takes precedence over the floor.
    pub fn settle(&self, state: StateVector, bounded: bool) -> StateVector {
        let injected = self.enforce_uncertainty_floor(state);
        if bounded {
            injected.clamped()
        } else {
            injected
        }
    }

    /// Push the Power/Wisdom deviations out to `sqrt(floor)` magnitude
    /// when their product falls below the floor. Sign-preserving; a zero
    /// deviation goes positive.
    fn enforce_uncertainty_floor(&self, state: StateVector) -> StateVector {
        let floor = self.cfg.uncertainty_floor;
        if floor <= 0.0 {
            return state;
        }
        let eq = self.frame.equilibrium();
        let dp = state.power() - eq.power();
        let dw = state.wisdom() - eq.wisdom();
        if (dp * dw).abs() >= floor {
            return state;
        }
        let m = floor.sqrt();
        let push = |dev: f64| {
            if dev.abs() >= m {
                dev
            } else if dev < 0.0 {
                -m
            } else {
                m
            }
        };
        log::warn!(
            "uncertainty floor injection: |dP*dW| = {:.4} < {floor:.4}",
            (dp * dw).abs()
        );
        StateVector::from_finite(
            state.love(),
            state.justice(),
            eq.power() + push(dp),
            eq.wisdom() + push(dw),
        )
    }

    /// Integrate `initial` over `duration` with fixed `step_size`.
    ///
    /// Every stored sample — including the seed — has been settled, so a
    /// bounded trajectory never leaves [0, 1]^4 at any sampled point.
    /// Non-positive `duration` or `step_size` is rejected, never clamped.
    pub fn integrate(
        &self,
        initial: StateVector,
        duration: f64,
        step_size: f64,
        bounded: bool,
    ) -> TelosResult<Trajectory> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TelosError::InvalidParameter(format!(
                "duration must be > 0, got {duration}"
            )));
        }
        if !step_size.is_finite() || step_size <= 0.0 {
            return Err(TelosError::InvalidParameter(format!(
                "step_size must be > 0, got {step_size}"
            )));
        }

        let steps = (duration / step_size).ceil() as u64;
        let mut samples = Vec::with_capacity(steps as usize + 1);
        let mut state = self.settle(initial, bounded);
        samples.push(TrajectorySample { t: 0.0, state });

        for n in 1..=steps {
            let raw = self.rk4_step(&state, step_size)?;
            state = self.settle(raw, bounded);
            samples.push(TrajectorySample {
                t: n as f64 * step_size,
                state,
            });
        }

        Ok(Trajectory { samples })
    }
}

fn offset(state: &StateVector, deriv: &[f64; N_AXES], h: f64) -> TelosResult<StateVector> {
    let x = state.as_array();
    let mut out = [0.0; N_AXES];
    for i in 0..N_AXES {
        out[i] = x[i] + h * deriv[i];
    }
    StateVector::from_array(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ANCHOR, EQUILIBRIUM};

    fn field() -> SemanticField {
        SemanticField::new(ReferenceFrame::canonical(), TelosConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let f = field();
        assert!(matches!(
            f.integrate(EQUILIBRIUM, 0.0, 0.05, true),
            Err(TelosError::InvalidParameter(_))
        ));
        assert!(f.integrate(EQUILIBRIUM, -1.0, 0.05, true).is_err());
        assert!(f.integrate(EQUILIBRIUM, f64::NAN, 0.05, true).is_err());
    }

    #[test]
    fn test_rejects_non_positive_step_size() {
        let f = field();
        assert!(matches!(
            f.integrate(EQUILIBRIUM, 1.0, 0.0, true),
            Err(TelosError::InvalidParameter(_))
        ));
        assert!(f.integrate(EQUILIBRIUM, 1.0, -0.05, true).is_err());
    }

    #[test]
    fn test_sample_count_and_timestamps() {
        let f = field();
        let traj = f.integrate(EQUILIBRIUM, 1.0, 0.1, true).unwrap();
        assert_eq!(traj.len(), 11);
        assert_eq!(traj.samples[0].t, 0.0);
        assert!((traj.samples[10].t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_anchor_is_fixed_point() {
        // Every derivative term vanishes at perfect alignment, so the
        // trajectory stays put to floating-point accuracy.
        let f = field();
        let traj = f.integrate(ANCHOR, 5.0, 0.05, false).unwrap();
        for sample in &traj.samples {
            assert!(
                sample.state.distance_to(&ANCHOR) < 1e-12,
                "drifted to {:?} at t={}",
                sample.state,
                sample.t
            );
        }
    }

    #[test]
    fn test_derivative_zero_at_anchor() {
        let f = field();
        let d = f.derivative(&ANCHOR);
        for c in d {
            assert!(c.abs() < 1e-15, "derivative component {c} non-zero at anchor");
        }
    }

    #[test]
    fn test_bounded_trajectory_stays_in_unit_box() {
        let f = field();
        let wild = StateVector::new(1.4, -0.2, 2.0, 0.7).unwrap();
        let traj = f.integrate(wild, 10.0, 0.05, true).unwrap();
        for sample in &traj.samples {
            for c in sample.state.as_array() {
                assert!((0.0..=1.0).contains(&c), "component {c} escaped [0,1]");
            }
        }
    }

    #[test]
    fn test_uncertainty_floor_holds_along_trajectory() {
        let f = field();
        // Deviations 0.05 × 0.05 start far below the floor.
        let shallow = StateVector::new(0.6, 0.55, 0.45, 0.5).unwrap();
        let traj = f.integrate(shallow, 2.0, 0.05, false).unwrap();
        for sample in &traj.samples {
            let p = metrics::uncertainty_product(&sample.state, &EQUILIBRIUM);
            assert!(p >= 0.287 - 1e-9, "product {p} below floor at t={}", sample.t);
        }
    }

    #[test]
    fn test_erosion_touches_justice_only() {
        let frame = ReferenceFrame::canonical();
        let eroding = SemanticField::new(frame.clone(), TelosConfig::default()).unwrap();
        let inert = SemanticField::new(
            frame,
            TelosConfig {
                erosion: 0.0,
                ..TelosConfig::default()
            },
        )
        .unwrap();

        let s = StateVector::new(0.4, 0.6, 0.9, 0.2).unwrap();
        let with = eroding.derivative(&s);
        let without = inert.derivative(&s);

        assert!(with[Axis::Justice.index()] < without[Axis::Justice.index()]);
        for axis in [Axis::Love, Axis::Power, Axis::Wisdom] {
            assert_eq!(with[axis.index()], without[axis.index()]);
        }
    }

    #[test]
    fn test_karma_gain_amplifies_anchor_pull() {
        let frame = ReferenceFrame::canonical();
        let geared = SemanticField::new(frame.clone(), TelosConfig::default()).unwrap();
        let flat = SemanticField::new(
            frame,
            TelosConfig {
                karma_gain: 0.0,
                ..TelosConfig::default()
            },
        )
        .unwrap();

        let s = StateVector::new(0.5, 0.5, 0.9, 0.9).unwrap();
        // Relaxation and erosion are gain-independent, so the Love
        // component isolates the κ(H) amplification.
        assert!(
            geared.derivative(&s)[Axis::Love.index()] > flat.derivative(&s)[Axis::Love.index()]
        );
    }

    #[test]
    fn test_reckless_power_erodes_justice_early() {
        let f = field();
        let reckless = StateVector::new(0.2, 0.2, 0.9, 0.2).unwrap();
        let traj = f.integrate(reckless, 50.0, 0.05, false).unwrap();
        let justice: Vec<f64> = traj
            .samples
            .iter()
            .take(6)
            .map(|s| s.state.justice())
            .collect();
        for w in justice.windows(2) {
            assert!(
                w[1] < w[0],
                "Justice should decline early under unchecked Power: {justice:?}"
            );
        }
    }

    #[test]
    fn test_wisdom_protects_earned_depth() {
        let f = field();
        let frame = ReferenceFrame::canonical();
        let reckless = StateVector::new(0.2, 0.2, 0.9, 0.2).unwrap();
        let wise = StateVector::new(0.5, 0.5, 0.5, 0.9).unwrap();

        let low = f
            .integrate(reckless, 50.0, 0.05, false)
            .unwrap()
            .earned_depth(&frame);
        let high = f
            .integrate(wise, 50.0, 0.05, false)
            .unwrap()
            .earned_depth(&frame);
        assert!(
            low < high,
            "reckless path earned {low}, wise path earned {high}"
        );
    }

    #[test]
    fn test_trajectory_harmonies_match_samples() {
        let f = field();
        let frame = ReferenceFrame::canonical();
        let traj = f.integrate(EQUILIBRIUM, 1.0, 0.1, true).unwrap();
        let hs = traj.harmonies(&frame);
        assert_eq!(hs.len(), traj.len());
        for (h, sample) in hs.iter().zip(traj.samples.iter()) {
            assert_eq!(*h, metrics::harmony(&sample.state, frame.anchor()));
        }
    }
}
