//! Overcurrent protection for a single motor branch.
//!
//! Up to `motor_protective_max_cv` (default [`MOTOR_PROTECTIVE_MAX_CV`]) the
//! branch gets an adjustable motor-protective breaker set around In; above
//! it, a molded-case breaker sized with `molded_case_multiplier` (default
//! [`MOLDED_CASE_MULTIPLIER`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

use super::params::InstallationParams;
use crate::catalog::MotorRating;
use crate::utils::{ceil_to_step, round2};

/// Largest motor (CV, inclusive) protected by a motor-protective breaker
pub const MOTOR_PROTECTIVE_MAX_CV: f64 = 40.0;

/// Lower end of the thermal adjustment, × In
pub const ADJUSTMENT_LOW_FACTOR: f64 = 0.9;

/// Upper end of the thermal adjustment, × In
pub const ADJUSTMENT_HIGH_FACTOR: f64 = 1.15;

/// Molded-case breaker rating, × In, before rounding up to the next ten
pub const MOLDED_CASE_MULTIPLIER: f64 = 1.4;

/// Molded-case breaker family
pub const MOLDED_CASE_FAMILY: &str = "DWA";

/// Motor-protective breaker frames and their maximum setting (A), ascending.
pub const MOTOR_PROTECTIVE_FRAMES: &[(&str, f64)] =
    &[("MPW40", 40.0), ("MPW65", 65.0), ("MPW100", 100.0)];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionKind {
    #[strum(serialize = "motor-protective circuit breaker")]
    MotorProtective,
    #[strum(serialize = "molded-case circuit breaker")]
    MoldedCase,
}

/// Thermal trip adjustment window (A).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRange {
    pub min_a: f64,
    pub max_a: f64,
}

impl AdjustmentRange {
    pub fn contains(&self, current_a: f64) -> bool {
        (self.min_a..=self.max_a).contains(&current_a)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakerSelection {
    pub kind: ProtectionKind,
    /// Product family / frame, e.g. `MPW40` or `DWA`
    pub family: String,
    /// Frame maximum for motor-protective breakers, rated current for molded-case (A)
    pub rating_a: f64,
    /// Present for motor-protective breakers only
    pub adjustment: Option<AdjustmentRange>,
}

impl fmt::Display for BreakerSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.adjustment {
            Some(range) => write!(
                f,
                "{} ({:.2}-{:.2} A)",
                self.family,
                round2(range.min_a),
                round2(range.max_a)
            ),
            None => write!(f, "{} {} A", self.family, self.rating_a),
        }
    }
}

pub fn select_breaker(motor: &MotorRating, params: &InstallationParams) -> BreakerSelection {
    let current = motor.current_in_a;

    if motor.cv <= params.motor_protective_max_cv {
        let range = AdjustmentRange {
            min_a: current * ADJUSTMENT_LOW_FACTOR,
            max_a: current * ADJUSTMENT_HIGH_FACTOR,
        };
        let (family, frame_max) = MOTOR_PROTECTIVE_FRAMES
            .iter()
            .find(|(_, max)| *max >= range.max_a)
            .copied()
            .unwrap_or_else(|| {
                let last = MOTOR_PROTECTIVE_FRAMES[MOTOR_PROTECTIVE_FRAMES.len() - 1];
                debug!(
                    cv = motor.cv,
                    max_a = range.max_a,
                    frame = last.0,
                    "adjustment range exceeds largest motor-protective frame"
                );
                last
            });

        BreakerSelection {
            kind: ProtectionKind::MotorProtective,
            family: family.to_string(),
            rating_a: frame_max,
            adjustment: Some(range),
        }
    } else {
        BreakerSelection {
            kind: ProtectionKind::MoldedCase,
            family: MOLDED_CASE_FAMILY.to_string(),
            rating_a: ceil_to_step(current * params.molded_case_multiplier, 10.0),
            adjustment: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::by_power;

    fn defaults() -> InstallationParams {
        InstallationParams::default()
    }

    #[test]
    fn test_small_motor_gets_motor_protective_breaker() {
        let sel = select_breaker(by_power(10.0).unwrap(), &defaults());
        assert_eq!(sel.kind, ProtectionKind::MotorProtective);
        assert_eq!(sel.family, "MPW40");
        let range = sel.adjustment.unwrap();
        assert!((range.min_a - 12.951).abs() < 1e-9);
        assert!((range.max_a - 16.5485).abs() < 1e-9);
        assert!(range.contains(14.39));
    }

    #[test]
    fn test_adjustment_label() {
        let motor = by_power(7.5).unwrap().clone().with_current(10.0);
        assert_eq!(select_breaker(&motor, &defaults()).to_string(), "MPW40 (9.00-11.50 A)");
    }

    #[test]
    fn test_frame_steps_up_with_setting() {
        assert_eq!(select_breaker(by_power(25.0).unwrap(), &defaults()).family, "MPW65");
        assert_eq!(select_breaker(by_power(40.0).unwrap(), &defaults()).family, "MPW100");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let at = select_breaker(by_power(40.0).unwrap(), &defaults());
        assert_eq!(at.kind, ProtectionKind::MotorProtective);
        let above = select_breaker(by_power(50.0).unwrap(), &defaults());
        assert_eq!(above.kind, ProtectionKind::MoldedCase);
    }

    #[test]
    fn test_molded_case_rounds_up_to_ten() {
        // 68.03 × 1.4 = 95.24
        let sel = select_breaker(by_power(50.0).unwrap(), &defaults());
        assert_eq!(sel.rating_a, 100.0);
        assert!(sel.adjustment.is_none());
        assert_eq!(sel.to_string(), "DWA 100 A");

        // 101.53 × 1.4 = 142.14
        assert_eq!(select_breaker(by_power(75.0).unwrap(), &defaults()).rating_a, 150.0);
    }

    #[test]
    fn test_configured_molded_case_multiplier() {
        let params = InstallationParams {
            molded_case_multiplier: 1.25,
            ..InstallationParams::default()
        };
        // 68.03 × 1.25 = 85.04
        assert_eq!(select_breaker(by_power(50.0).unwrap(), &params).rating_a, 90.0);
    }

    #[test]
    fn test_configured_motor_protective_limit() {
        let params = InstallationParams {
            motor_protective_max_cv: 30.0,
            ..InstallationParams::default()
        };
        let sel = select_breaker(by_power(40.0).unwrap(), &params);
        assert_eq!(sel.kind, ProtectionKind::MoldedCase);
        // 56.63 × 1.4 = 79.28
        assert_eq!(sel.rating_a, 80.0);
    }

    #[test]
    fn test_oversized_setting_clamps_to_largest_frame() {
        let motor = by_power(40.0).unwrap().clone().with_current(120.0);
        let sel = select_breaker(&motor, &defaults());
        assert_eq!(sel.family, "MPW100");
        assert_eq!(sel.kind, ProtectionKind::MotorProtective);
    }

    #[test]
    fn test_protection_kind_labels() {
        assert_eq!(
            ProtectionKind::MoldedCase.to_string(),
            "molded-case circuit breaker"
        );
    }
}
