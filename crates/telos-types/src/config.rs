// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Runtime Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{TelosError, TelosResult};

/// Tunable parameters for the semantic field and the autopoietic loop.
///
/// One explicit instance is passed into every component constructor;
/// there are no process-wide singletons, so simulations with different
/// parameters can run side by side in one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelosConfig {
    /// Relaxation constant k: strength of the pull toward the natural
    /// equilibrium. Default: 1.5.
    pub damping: f64,

    /// Karma feedback gain: the anchor pull is scaled by
    /// `1 + karma_gain * harmony`. Zero disables the feedback but keeps
    /// the unity-gain pull. Default: 2.0.
    pub karma_gain: f64,

    /// Power→Justice erosion coefficient. Default: 1.8.
    pub erosion: f64,

    /// Floor on `|ΔPower · ΔWisdom|` (deviations from equilibrium).
    /// Default: 0.287.
    pub uncertainty_floor: f64,

    /// Integration / generation step size (time units). Default: 0.05.
    pub step_size: f64,

    /// Convergence radius around the anchor. Default: 0.1.
    pub epsilon: f64,

    /// Generation budget before an engine gives up. Default: 1000.
    pub max_generations: u64,

    /// Hard-clamp every step into [0, 1]^4. Default: true.
    pub bounded: bool,

    /// Harmony at or below this (and declining) classifies as entropic.
    /// Default: 0.35.
    pub entropic_threshold: f64,

    /// Harmony at or above this (and non-decreasing) classifies as
    /// autopoietic. Default: 0.7.
    pub autopoietic_threshold: f64,

    /// Harmony drift tolerated as "stable" by phase classification.
    /// Default: 0.05.
    pub stability_band: f64,

    /// Trailing samples examined for the phase trend. Default: 8.
    pub phase_window: usize,
}

impl Default for TelosConfig {
    fn default() -> Self {
        Self {
            damping: 1.5,
            karma_gain: 2.0,
            erosion: 1.8,
            uncertainty_floor: 0.287,
            step_size: 0.05,
            epsilon: 0.1,
            max_generations: 1000,
            bounded: true,
            entropic_threshold: 0.35,
            autopoietic_threshold: 0.7,
            stability_band: 0.05,
            phase_window: 8,
        }
    }
}

impl TelosConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> TelosResult<()> {
        if !self.damping.is_finite() || self.damping <= 0.0 {
            return Err(TelosError::Config(format!(
                "damping must be > 0, got {}",
                self.damping
            )));
        }
        if !self.karma_gain.is_finite() || self.karma_gain < 0.0 {
            return Err(TelosError::Config(format!(
                "karma_gain must be >= 0, got {}",
                self.karma_gain
            )));
        }
        if !self.erosion.is_finite() || self.erosion < 0.0 {
            return Err(TelosError::Config(format!(
                "erosion must be >= 0, got {}",
                self.erosion
            )));
        }
        if !self.uncertainty_floor.is_finite() || self.uncertainty_floor < 0.0 {
            return Err(TelosError::Config(format!(
                "uncertainty_floor must be >= 0, got {}",
                self.uncertainty_floor
            )));
        }
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(TelosError::Config(format!(
                "step_size must be > 0, got {}",
                self.step_size
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(TelosError::Config(format!(
                "epsilon must be > 0, got {}",
                self.epsilon
            )));
        }
        if self.max_generations == 0 {
            return Err(TelosError::Config(
                "max_generations must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.entropic_threshold) {
            return Err(TelosError::Config(format!(
                "entropic_threshold must be in [0, 1], got {}",
                self.entropic_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.autopoietic_threshold) {
            return Err(TelosError::Config(format!(
                "autopoietic_threshold must be in [0, 1], got {}",
                self.autopoietic_threshold
            )));
        }
        if self.entropic_threshold >= self.autopoietic_threshold {
            return Err(TelosError::Config(format!(
                "entropic_threshold {} must be below autopoietic_threshold {}",
                self.entropic_threshold, self.autopoietic_threshold
            )));
        }
        if !self.stability_band.is_finite() || self.stability_band <= 0.0 {
            return Err(TelosError::Config(format!(
                "stability_band must be > 0, got {}",
                self.stability_band
            )));
        }
        if self.phase_window < 2 {
            return Err(TelosError::Config(format!(
                "phase_window must be >= 2, got {}",
                self.phase_window
            )));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> TelosResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| TelosError::Config(format!("JSON parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
