use serde::{Deserialize, Serialize};
use validator::Validate;

use super::contactor::CONTACTOR_MARGIN;
use super::protection::{MOLDED_CASE_MULTIPLIER, MOTOR_PROTECTIVE_MAX_CV};
use super::starting::StartingPolicy;
use crate::error::{ensure_finite, SizingError};

/// Circuit run length from the panel to the motor (m)
pub const DEFAULT_RUN_LENGTH_M: f64 = 80.0;

/// Line-to-line supply voltage (V)
pub const DEFAULT_SUPPLY_VOLTAGE_V: f64 = 380.0;

/// Maximum permissible voltage drop on the branch circuit (fraction)
pub const DEFAULT_MAX_VOLTAGE_DROP: f64 = 0.04;

/// Copper resistivity at 20 °C (Ω·mm²/m)
pub const COPPER_RESISTIVITY_OHM_MM2_PER_M: f64 = 0.0172;

/// Continuous-current margin applied to In before picking a cable
pub const AMPACITY_MARGIN: f64 = 1.25;

/// Installation conditions the single-motor rules are evaluated under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InstallationParams {
    /// Circuit run length (m)
    #[validate(range(exclusive_min = 0.0, max = 10_000.0))]
    pub run_length_m: f64,

    /// Supply line-to-line voltage (V)
    #[validate(range(min = 100.0, max = 1_000.0))]
    pub voltage_v: f64,

    /// Maximum permissible voltage drop (fraction, 0.04 = 4 %)
    #[validate(range(exclusive_min = 0.0, max = 0.2))]
    pub max_voltage_drop: f64,

    /// Conductor resistivity (Ω·mm²/m)
    #[validate(range(exclusive_min = 0.0, max = 0.1))]
    pub resistivity_ohm_mm2_per_m: f64,

    /// Multiplier on In for the ampacity check
    #[validate(range(min = 1.0, max = 2.0))]
    pub ampacity_margin: f64,

    /// Enforce the minimum cable section for each motor power class
    pub apply_power_class_floor: bool,

    /// Multiplier on In for the contactor's AC-3 rating
    #[validate(range(min = 1.0, max = 2.0))]
    pub contactor_margin: f64,

    /// Largest motor (CV, inclusive) on a motor-protective breaker
    #[validate(range(min = 0.0, max = 1_000.0))]
    pub motor_protective_max_cv: f64,

    /// Multiplier on In for molded-case breaker ratings
    #[validate(range(min = 1.0, max = 3.0))]
    pub molded_case_multiplier: f64,

    /// When a reduced-current starting device is recommended
    #[validate(nested)]
    pub starting: StartingPolicy,
}

impl Default for InstallationParams {
    fn default() -> Self {
        Self {
            run_length_m: DEFAULT_RUN_LENGTH_M,
            voltage_v: DEFAULT_SUPPLY_VOLTAGE_V,
            max_voltage_drop: DEFAULT_MAX_VOLTAGE_DROP,
            resistivity_ohm_mm2_per_m: COPPER_RESISTIVITY_OHM_MM2_PER_M,
            ampacity_margin: AMPACITY_MARGIN,
            apply_power_class_floor: true,
            contactor_margin: CONTACTOR_MARGIN,
            motor_protective_max_cv: MOTOR_PROTECTIVE_MAX_CV,
            molded_case_multiplier: MOLDED_CASE_MULTIPLIER,
            starting: StartingPolicy::default(),
        }
    }
}

impl InstallationParams {
    /// Same parameters on a different run length.
    pub fn with_run_length(mut self, run_length_m: f64) -> Self {
        self.run_length_m = run_length_m;
        self
    }

    /// Same parameters with a different starting policy.
    pub fn with_starting(mut self, starting: StartingPolicy) -> Self {
        self.starting = starting;
        self
    }

    /// Same parameters with the power-class cable floor on or off.
    pub fn with_power_class_floor(mut self, apply: bool) -> Self {
        self.apply_power_class_floor = apply;
        self
    }

    /// Finite checks first, then the declared ranges.
    pub fn check(&self) -> Result<(), SizingError> {
        ensure_finite("run_length_m", self.run_length_m)?;
        ensure_finite("voltage_v", self.voltage_v)?;
        ensure_finite("max_voltage_drop", self.max_voltage_drop)?;
        ensure_finite("resistivity_ohm_mm2_per_m", self.resistivity_ohm_mm2_per_m)?;
        ensure_finite("ampacity_margin", self.ampacity_margin)?;
        ensure_finite("contactor_margin", self.contactor_margin)?;
        ensure_finite("motor_protective_max_cv", self.motor_protective_max_cv)?;
        ensure_finite("molded_case_multiplier", self.molded_case_multiplier)?;
        ensure_finite("starting.threshold_cv", self.starting.threshold_cv)?;

        self.validate()?;
        Ok(())
    }
}
