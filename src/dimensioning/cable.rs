//! Branch-circuit cable selection.
//!
//! Ampacities are NBR 5410 table 36, installation method B1, PVC insulation
//! at 70 °C, three loaded copper conductors.
//!
//! On top of the ampacity and voltage-drop limits, each motor power class has
//! a minimum section ([`MIN_SECTION_BY_CV`]) that the selection never goes
//! below while `apply_power_class_floor` is set.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, trace};

use super::params::InstallationParams;

/// One row of the ampacity table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CableSpec {
    /// Conductor cross-section (mm²)
    pub section_mm2: f64,
    /// Rated ampacity Iz (A)
    pub ampacity_a: f64,
}

const fn cable(section_mm2: f64, ampacity_a: f64) -> CableSpec {
    CableSpec {
        section_mm2,
        ampacity_a,
    }
}

/// Ascending by section.
pub const CABLE_TABLE: &[CableSpec] = &[
    cable(1.5, 15.5),
    cable(2.5, 21.0),
    cable(4.0, 28.0),
    cable(6.0, 36.0),
    cable(10.0, 50.0),
    cable(16.0, 68.0),
    cable(25.0, 89.0),
    cable(35.0, 110.0),
    cable(50.0, 134.0),
    cable(70.0, 171.0),
    cable(95.0, 207.0),
    cable(120.0, 239.0),
    cable(150.0, 272.0),
];

/// Minimum section per motor power class: `(largest CV in class, mm²)`,
/// ascending. Motors above the last class use its section.
pub const MIN_SECTION_BY_CV: &[(f64, f64)] = &[
    (1.0, 1.5),
    (4.0, 2.5),
    (6.0, 4.0),
    (12.5, 6.0),
    (20.0, 10.0),
    (30.0, 16.0),
    (50.0, 25.0),
    (75.0, 35.0),
    (100.0, 50.0),
    (150.0, 70.0),
    (200.0, 95.0),
    (f64::INFINITY, 120.0),
];

/// Which rule decided the section.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BindingConstraint {
    Ampacity,
    VoltageDrop,
    PowerClassFloor,
}

/// Selected cable with the figures behind the choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableSelection {
    /// Selected cross-section (mm²)
    pub section_mm2: f64,
    /// Ampacity of the selected section (A)
    pub ampacity_a: f64,
    /// In × ampacity margin (A)
    pub required_ampacity_a: f64,
    /// Section picked by ampacity alone (mm²)
    pub ampacity_section_mm2: f64,
    /// Smallest section meeting the voltage-drop limit (mm², unrounded)
    pub voltage_drop_min_mm2: f64,
    /// Power-class minimum (mm²), `None` when the floor is switched off
    pub power_class_floor_mm2: Option<f64>,
    /// Voltage drop at the selected section (fraction)
    pub voltage_drop: f64,
    pub binding: BindingConstraint,
    /// True when the table ran out and the largest section was taken
    pub clamped: bool,
}

impl CableSelection {
    /// Display label, e.g. `25 mm²`.
    pub fn label(&self) -> String {
        format!("{} mm²", self.section_mm2)
    }
}

/// First row whose ampacity covers `required_a`, or the largest row.
///
/// The flag is true when the fallback was used.
pub fn select_by_ampacity(required_a: f64) -> (CableSpec, bool) {
    match CABLE_TABLE.iter().find(|c| c.ampacity_a >= required_a) {
        Some(c) => (*c, false),
        None => (largest(), true),
    }
}

/// Smallest row whose section is at least `min_mm2`, or the largest row.
pub fn select_by_section(min_mm2: f64) -> (CableSpec, bool) {
    match CABLE_TABLE.iter().find(|c| c.section_mm2 >= min_mm2) {
        Some(c) => (*c, false),
        None => (largest(), true),
    }
}

fn largest() -> CableSpec {
    CABLE_TABLE[CABLE_TABLE.len() - 1]
}

/// Minimum section for a motor of `cv` by power class.
pub fn power_class_floor(cv: f64) -> f64 {
    MIN_SECTION_BY_CV
        .iter()
        .find(|(max_cv, _)| cv <= *max_cv)
        .map(|(_, section)| *section)
        .unwrap_or(MIN_SECTION_BY_CV[MIN_SECTION_BY_CV.len() - 1].1)
}

/// Minimum section for the drop limit: `√3 · L · I · ρ / (V · Δ)`.
pub fn voltage_drop_min_section(current_a: f64, params: &InstallationParams) -> f64 {
    (3f64.sqrt() * params.run_length_m * current_a * params.resistivity_ohm_mm2_per_m)
        / (params.voltage_v * params.max_voltage_drop)
}

/// Three-phase voltage drop on `section_mm2` carrying `current_a` (fraction of supply).
pub fn voltage_drop(section_mm2: f64, current_a: f64, params: &InstallationParams) -> f64 {
    (3f64.sqrt() * params.run_length_m * current_a * params.resistivity_ohm_mm2_per_m)
        / (section_mm2 * params.voltage_v)
}

/// Pick the cable for a motor of `cv` drawing `current_in_a`.
///
/// Ampacity first, then the voltage-drop correction, then the power-class
/// floor. Each step can only enlarge the section. The result is never smaller
/// than any active requirement, except where the table itself runs out.
pub fn select_cable(cv: f64, current_in_a: f64, params: &InstallationParams) -> CableSelection {
    let required_ampacity_a = current_in_a * params.ampacity_margin;
    let (by_ampacity, ampacity_clamped) = select_by_ampacity(required_ampacity_a);
    let drop_min = voltage_drop_min_section(current_in_a, params);

    trace!(
        current_in_a,
        required_ampacity_a,
        ampacity_section_mm2 = by_ampacity.section_mm2,
        voltage_drop_min_mm2 = drop_min,
        "cable requirements"
    );

    let (mut selected, mut binding, mut clamped) = if drop_min > by_ampacity.section_mm2 {
        let (by_drop, drop_clamped) = select_by_section(drop_min);
        (by_drop, BindingConstraint::VoltageDrop, drop_clamped)
    } else {
        (by_ampacity, BindingConstraint::Ampacity, ampacity_clamped)
    };

    let floor = params.apply_power_class_floor.then(|| power_class_floor(cv));
    if let Some(floor_mm2) = floor {
        if floor_mm2 > selected.section_mm2 {
            let (by_floor, floor_clamped) = select_by_section(floor_mm2);
            trace!(cv, floor_mm2, "power-class floor raises cable section");
            selected = by_floor;
            binding = BindingConstraint::PowerClassFloor;
            clamped = floor_clamped;
        }
    }

    if clamped {
        debug!(
            current_in_a,
            section_mm2 = selected.section_mm2,
            %binding,
            "cable requirement exceeds table, using largest section"
        );
    }

    CableSelection {
        section_mm2: selected.section_mm2,
        ampacity_a: selected.ampacity_a,
        required_ampacity_a,
        ampacity_section_mm2: by_ampacity.section_mm2,
        voltage_drop_min_mm2: drop_min,
        power_class_floor_mm2: floor,
        voltage_drop: voltage_drop(selected.section_mm2, current_in_a, params),
        binding,
        clamped,
    }
}
