// ─────────────────────────────────────────────────────────────────────
// Telos Kernel — Semantic State Vector
// ─────────────────────────────────────────────────────────────────────
//! Immutable 4-dimensional semantic state vector.
//!
//! The four coordinates carry the domain labels Love, Justice, Power,
//! Wisdom; every operation below is dimension-agnostic. All components
//! are finite by construction — `new`/`from_array` reject NaN and Inf —
//! and every transformation returns a fresh instance.

use serde::{Deserialize, Serialize};

use crate::error::{TelosError, TelosResult};

/// Number of semantic dimensions.
pub const N_AXES: usize = 4;

/// Named semantic dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Love,
    Justice,
    Power,
    Wisdom,
}

impl Axis {
    pub const ALL: [Axis; N_AXES] = [Axis::Love, Axis::Justice, Axis::Power, Axis::Wisdom];

    /// Component index of this axis.
    pub fn index(self) -> usize {
        match self {
            Axis::Love => 0,
            Axis::Justice => 1,
            Axis::Power => 2,
            Axis::Wisdom => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::Love => "Love",
            Axis::Justice => "Justice",
            Axis::Power => "Power",
            Axis::Wisdom => "Wisdom",
        }
    }
}

/// Immutable 4D semantic state.
///
/// Equality (`PartialEq`) is exact; use [`StateVector::approx_eq`] when
/// comparing trajectory samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    love: f64,
    justice: f64,
    power: f64,
    wisdom: f64,
}

impl StateVector {
    /// Validated constructor.
    pub fn new(love: f64, justice: f64, power: f64, wisdom: f64) -> TelosResult<Self> {
        Self::from_array([love, justice, power, wisdom])
    }

    /// Validated constructor from a component array.
    pub fn from_array(components: [f64; N_AXES]) -> TelosResult<Self> {
        for (axis, &c) in Axis::ALL.iter().zip(components.iter()) {
            if !c.is_finite() {
                return Err(TelosError::InvalidState(format!(
                    "{} component is {c}",
                    axis.label()
                )));
            }
        }
        Ok(Self {
            love: components[0],
            justice: components[1],
            power: components[2],
            wisdom: components[3],
        })
    }

    /// Const constructor for canonical reference points.
    ///
    /// Callers must pass finite components; runtime construction goes
    /// through [`StateVector::new`].
    pub const fn from_finite(love: f64, justice: f64, power: f64, wisdom: f64) -> Self {
        Self {
            love,
            justice,
            power,
            wisdom,
        }
    }

    pub fn love(&self) -> f64 {
        self.love
    }

    pub fn justice(&self) -> f64 {
        self.justice
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn wisdom(&self) -> f64 {
        self.wisdom
    }

    pub fn as_array(&self) -> [f64; N_AXES] {
        [self.love, self.justice, self.power, self.wisdom]
    }

    pub fn component(&self, axis: Axis) -> f64 {
        self.as_array()[axis.index()]
    }

    /// Euclidean distance in 4-space.
    pub fn distance_to(&self, other: &StateVector) -> f64 {
        let a = self.as_array();
        let b = other.as_array();
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }

    /// Component-wise clip to [0, 1]. Used by the bounded integration mode.
    pub fn clamped(self) -> StateVector {
        StateVector {
            love: self.love.clamp(0.0, 1.0),
            justice: self.justice.clamp(0.0, 1.0),
            power: self.power.clamp(0.0, 1.0),
            wisdom: self.wisdom.clamp(0.0, 1.0),
        }
    }

    /// Weighted linear interpolation toward `other`, weight in [0, 1].
    pub fn blend(&self, other: &StateVector, weight: f64) -> TelosResult<StateVector> {
        if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
            return Err(TelosError::InvalidParameter(format!(
                "blend weight must be in [0, 1], got {weight}"
            )));
        }
        let a = self.as_array();
        let b = other.as_array();
        let mut out = [0.0; N_AXES];
        for i in 0..N_AXES {
            out[i] = a[i] * (1.0 - weight) + b[i] * weight;
        }
        StateVector::from_array(out)
    }

    /// Uniform scaling by a finite factor.
    pub fn scale(&self, factor: f64) -> TelosResult<StateVector> {
        if !factor.is_finite() {
            return Err(TelosError::InvalidParameter(format!(
                "scale factor must be finite, got {factor}"
            )));
        }
        let a = self.as_array();
        StateVector::from_array([
            a[0] * factor,
            a[1] * factor,
            a[2] * factor,
            a[3] * factor,
        ])
    }

    /// Per-component tolerance comparison.
    pub fn approx_eq(&self, other: &StateVector, epsilon: f64) -> bool {
        let a = self.as_array();
        let b = other.as_array();
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= epsilon)
    }
}
