//! # Motor Catalog
//!
//! Reference ratings for W22 IE3 Premium four-pole motors at 380 V / 60 Hz.
//!
//! The table is ordered by ascending CV and each CV appears once, so a lookup
//! by power returns at most one entry. Nominal currents are the line currents
//! the sizing rules start from.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ensure_in_range, ensure_positive, SizingError};

/// Metric horsepower to kilowatt.
pub const KW_PER_CV: f64 = 0.736;

/// Catalog model line label.
pub const CATALOG_MODEL: &str = "W22 IE3 Premium";

/// Synchronous speed of a four-pole motor on a 60 Hz supply.
pub const FOUR_POLE_SYNC_RPM: u32 = 1800;

/// One motor rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorRating {
    /// Power (CV, metric horsepower)
    pub cv: f64,

    /// Power (kW)
    pub kw: f64,

    /// Nominal line current at rated load (A)
    pub current_in_a: f64,

    /// Efficiency at full load (%)
    pub efficiency_percent: f64,

    /// Power factor at full load
    pub power_factor: f64,

    /// IEC frame designation
    pub frame: String,

    /// Weight (kg)
    pub weight_kg: f64,

    /// Synchronous speed (rpm)
    pub sync_rpm: u32,

    /// Model line label
    pub model: String,
}

impl MotorRating {
    /// Copy of this rating with a different nominal current.
    pub fn with_current(mut self, current_in_a: f64) -> Self {
        self.current_in_a = current_in_a;
        self
    }

    /// Check the rating is usable by the sizing rules.
    pub fn validate(&self) -> Result<(), SizingError> {
        ensure_positive("cv", self.cv)?;
        ensure_positive("kw", self.kw)?;
        ensure_positive("current_in_a", self.current_in_a)?;
        ensure_in_range("efficiency_percent", self.efficiency_percent, 0.0, 100.0)?;
        ensure_in_range("power_factor", self.power_factor, 0.0, 1.0)?;
        Ok(())
    }
}

struct Row {
    cv: f64,
    kw: f64,
    current_in_a: f64,
    efficiency_percent: f64,
    power_factor: f64,
    frame: &'static str,
    weight_kg: f64,
}

const fn row(
    cv: f64,
    kw: f64,
    current_in_a: f64,
    efficiency_percent: f64,
    power_factor: f64,
    frame: &'static str,
    weight_kg: f64,
) -> Row {
    Row {
        cv,
        kw,
        current_in_a,
        efficiency_percent,
        power_factor,
        frame,
        weight_kg,
    }
}

const ROWS: &[Row] = &[
    row(1.0, 0.75, 1.82, 82.5, 0.76, "80", 12.5),
    row(1.5, 1.1, 2.48, 84.1, 0.80, "80", 14.0),
    row(2.0, 1.5, 3.22, 85.3, 0.83, "90S", 18.5),
    row(3.0, 2.2, 4.59, 86.7, 0.84, "90L", 22.0),
    row(4.0, 3.0, 6.11, 87.7, 0.85, "100L", 29.0),
    row(5.0, 3.7, 7.46, 88.6, 0.85, "100L", 31.0),
    row(6.0, 4.4, 8.92, 89.2, 0.84, "112M", 40.0),
    row(7.5, 5.5, 10.97, 89.6, 0.85, "132S", 55.0),
    row(10.0, 7.5, 14.39, 91.0, 0.87, "132M", 68.0),
    row(12.5, 9.2, 18.07, 91.0, 0.85, "132M/L", 75.0),
    row(15.0, 11.0, 21.51, 91.4, 0.85, "160M", 110.0),
    row(20.0, 15.0, 28.77, 92.1, 0.86, "160L", 125.0),
    row(25.0, 18.5, 34.89, 92.6, 0.87, "180M", 160.0),
    row(30.0, 22.0, 41.79, 93.0, 0.86, "180L", 175.0),
    row(40.0, 30.0, 56.63, 93.6, 0.86, "200L", 245.0),
    row(50.0, 37.0, 68.03, 93.9, 0.88, "225S/M", 330.0),
    row(60.0, 45.0, 83.42, 94.2, 0.87, "225S/M", 365.0),
    row(75.0, 55.0, 101.53, 94.6, 0.87, "250S/M", 445.0),
    row(100.0, 75.0, 139.48, 95.0, 0.86, "280S/M", 610.0),
    row(125.0, 90.0, 167.01, 95.2, 0.86, "280S/M", 660.0),
    row(150.0, 110.0, 203.70, 95.4, 0.86, "315S/M", 870.0),
    row(175.0, 132.0, 241.10, 95.6, 0.87, "315S/M", 950.0),
    row(200.0, 150.0, 273.40, 95.8, 0.87, "315S/M", 1010.0),
    row(250.0, 185.0, 336.50, 96.0, 0.87, "355M/L", 1400.0),
];

static CATALOG: Lazy<Vec<MotorRating>> = Lazy::new(|| {
    ROWS.iter()
        .map(|r| MotorRating {
            cv: r.cv,
            kw: r.kw,
            current_in_a: r.current_in_a,
            efficiency_percent: r.efficiency_percent,
            power_factor: r.power_factor,
            frame: r.frame.to_string(),
            weight_kg: r.weight_kg,
            sync_rpm: FOUR_POLE_SYNC_RPM,
            model: CATALOG_MODEL.to_string(),
        })
        .collect()
});

/// Every catalog rating, ascending by CV.
pub fn all_ratings() -> &'static [MotorRating] {
    &CATALOG
}

/// Exact-match lookup on CV.
///
/// Pass a value taken from a catalog entry's `cv` field. `None` means
/// "no motor selected" and is not an error.
pub fn by_power(cv: f64) -> Option<&'static MotorRating> {
    CATALOG.iter().find(|m| m.cv == cv)
}

/// Turn CV strings (e.g. command-line arguments) into catalog motors.
///
/// Arguments that are not numbers, and ratings the catalog does not carry,
/// are logged and skipped. Input order and duplicates are kept.
pub fn resolve<I, S>(args: I) -> Vec<MotorRating>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .filter_map(|arg| {
            let arg = arg.as_ref();
            let cv: f64 = match arg.trim().parse() {
                Ok(cv) => cv,
                Err(_) => {
                    warn!(%arg, "not a CV value, skipping");
                    return None;
                }
            };
            let motor = by_power(cv);
            if motor.is_none() {
                warn!(cv, "no catalog motor with this rating, skipping");
            }
            motor.cloned()
        })
        .collect()
}
