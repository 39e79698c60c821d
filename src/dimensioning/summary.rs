//! Project roll-up: totals across every motor and the service-entrance breaker.
//!
//! The result does not depend on the order motors are given in. Motors are
//! put in a canonical order before anything is summed, so floating-point
//! totals come out bit-identical for any permutation of the same set.

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, trace};
use validator::Validate;

use super::starting::StartingPolicy;
use crate::catalog::MotorRating;
use crate::error::{ensure_finite, SizingError};
use crate::utils::{ceil_to_step, round2};

/// Standard main-breaker ratings (A), ascending.
pub const STANDARD_MAIN_BREAKERS_A: &[u32] = &[40, 63, 100, 125, 160, 200, 250, 400, 630, 800];

/// Main breaker must carry total In × this margin
pub const MAIN_BREAKER_MARGIN: f64 = 1.25;

/// Inrush model used unless configured otherwise
pub const DEFAULT_INRUSH_MODEL: InrushModel = InrushModel::DominantMotor;

/// Locked-rotor multiple for the largest motor in the dominant-motor model
pub const DOMINANT_MOTOR_MULTIPLIER: f64 = 7.0;

/// Starting multiple for motors with a reduced-current starting device
pub const REDUCED_START_MULTIPLIER: f64 = 3.0;

/// Starting multiple for direct-on-line motors
pub const DIRECT_ON_LINE_MULTIPLIER: f64 = 7.5;

/// How the project's starting (inrush) current is estimated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InrushModel {
    /// Every motor's In scaled by its size class: reduced-current starting
    /// at or above the starting threshold, direct-on-line below it.
    SizeClassScaled,
    /// Largest motor starting while the others run: total In minus the
    /// largest In, plus the largest In × the dominant multiplier.
    DominantMotor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SummaryPolicy {
    #[validate(range(min = 1.0, max = 2.0))]
    pub main_breaker_margin: f64,

    pub inrush_model: InrushModel,

    #[validate(range(min = 1.0, max = 12.0))]
    pub dominant_multiplier: f64,

    #[validate(range(min = 1.0, max = 12.0))]
    pub reduced_start_multiplier: f64,

    #[validate(range(min = 1.0, max = 12.0))]
    pub direct_on_line_multiplier: f64,
}

impl Default for SummaryPolicy {
    fn default() -> Self {
        Self {
            main_breaker_margin: MAIN_BREAKER_MARGIN,
            inrush_model: DEFAULT_INRUSH_MODEL,
            dominant_multiplier: DOMINANT_MOTOR_MULTIPLIER,
            reduced_start_multiplier: REDUCED_START_MULTIPLIER,
            direct_on_line_multiplier: DIRECT_ON_LINE_MULTIPLIER,
        }
    }
}

impl SummaryPolicy {
    pub fn check(&self) -> Result<(), SizingError> {
        ensure_finite("main_breaker_margin", self.main_breaker_margin)?;
        ensure_finite("dominant_multiplier", self.dominant_multiplier)?;
        ensure_finite("reduced_start_multiplier", self.reduced_start_multiplier)?;
        ensure_finite("direct_on_line_multiplier", self.direct_on_line_multiplier)?;
        self.validate()?;
        Ok(())
    }
}

/// Service-entrance breaker recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MainBreaker {
    /// No motors, nothing to protect
    NotApplicable,
    /// A rating from [`STANDARD_MAIN_BREAKERS_A`]
    Standard { rating_a: f64 },
    /// Requirement exceeded the standard list; rounded up to the next ten
    Synthesized { rating_a: f64 },
}

impl MainBreaker {
    pub fn rating_a(&self) -> Option<f64> {
        match self {
            MainBreaker::NotApplicable => None,
            MainBreaker::Standard { rating_a } | MainBreaker::Synthesized { rating_a } => {
                Some(*rating_a)
            }
        }
    }
}

impl fmt::Display for MainBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rating_a() {
            Some(rating) => write!(f, "{rating} A"),
            None => write!(f, "N/A"),
        }
    }
}

/// Pick the main breaker for a total nominal current.
pub fn select_main_breaker(total_in_a: f64, margin: f64) -> MainBreaker {
    if total_in_a <= 0.0 {
        return MainBreaker::NotApplicable;
    }

    let required = total_in_a * margin;
    match STANDARD_MAIN_BREAKERS_A
        .iter()
        .find(|&&r| f64::from(r) >= required)
    {
        Some(&r) => MainBreaker::Standard {
            rating_a: f64::from(r),
        },
        None => {
            let rating_a = ceil_to_step(required, 10.0);
            debug!(required, rating_a, "main breaker above standard ratings");
            MainBreaker::Synthesized { rating_a }
        }
    }
}

/// Motors sharing one CV rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorGroup {
    pub cv: f64,
    pub count: usize,
}

/// Totals rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayTotals {
    pub total_cv: f64,
    pub total_kw: f64,
    pub total_in_a: f64,
    pub total_inrush_a: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub motor_count: usize,
    /// One entry per distinct CV, descending
    pub motor_list: Vec<MotorGroup>,
    pub total_cv: f64,
    pub total_kw: f64,
    /// Sum of nominal currents (A)
    pub total_in_a: f64,
    /// Estimated starting current (A)
    pub total_inrush_a: f64,
    pub inrush_model: InrushModel,
    pub main_breaker: MainBreaker,
    /// Motors at or above the starting-device threshold
    pub starting_device_count: usize,
}

impl ProjectSummary {
    pub fn empty(inrush_model: InrushModel) -> Self {
        Self {
            motor_count: 0,
            motor_list: Vec::new(),
            total_cv: 0.0,
            total_kw: 0.0,
            total_in_a: 0.0,
            total_inrush_a: 0.0,
            inrush_model,
            main_breaker: MainBreaker::NotApplicable,
            starting_device_count: 0,
        }
    }

    pub fn display_totals(&self) -> DisplayTotals {
        DisplayTotals {
            total_cv: round2(self.total_cv),
            total_kw: round2(self.total_kw),
            total_in_a: round2(self.total_in_a),
            total_inrush_a: round2(self.total_inrush_a),
        }
    }
}

fn canonical_order(a: &&MotorRating, b: &&MotorRating) -> std::cmp::Ordering {
    b.cv.total_cmp(&a.cv)
        .then(b.current_in_a.total_cmp(&a.current_in_a))
        .then(b.kw.total_cmp(&a.kw))
}

fn inrush(
    motors: &[&MotorRating],
    total_in_a: f64,
    policy: &SummaryPolicy,
    starting: &StartingPolicy,
) -> f64 {
    match policy.inrush_model {
        InrushModel::SizeClassScaled => motors
            .iter()
            .map(|m| {
                let multiplier = if starting.requires_device(m.cv) {
                    policy.reduced_start_multiplier
                } else {
                    policy.direct_on_line_multiplier
                };
                m.current_in_a * multiplier
            })
            .sum(),
        InrushModel::DominantMotor => {
            let largest = motors
                .iter()
                .map(|m| m.current_in_a)
                .fold(0.0_f64, f64::max);
            total_in_a - largest + largest * policy.dominant_multiplier
        }
    }
}

/// Roll a set of motors up into one project summary.
pub fn summarize(
    motors: &[MotorRating],
    policy: &SummaryPolicy,
    starting: &StartingPolicy,
) -> ProjectSummary {
    if motors.is_empty() {
        return ProjectSummary::empty(policy.inrush_model);
    }

    let ordered: Vec<&MotorRating> = motors.iter().sorted_by(canonical_order).collect();

    let total_cv: f64 = ordered.iter().map(|m| m.cv).sum();
    let total_kw: f64 = ordered.iter().map(|m| m.kw).sum();
    let total_in_a: f64 = ordered.iter().map(|m| m.current_in_a).sum();
    let total_inrush_a = inrush(&ordered, total_in_a, policy, starting);

    let mut groups: BTreeMap<OrderedFloat<f64>, usize> = BTreeMap::new();
    for m in &ordered {
        *groups.entry(OrderedFloat(m.cv)).or_default() += 1;
    }
    let motor_list = groups
        .into_iter()
        .rev()
        .map(|(cv, count)| MotorGroup { cv: cv.0, count })
        .collect();

    let starting_device_count = ordered
        .iter()
        .filter(|m| starting.requires_device(m.cv))
        .count();

    let main_breaker = select_main_breaker(total_in_a, policy.main_breaker_margin);

    trace!(
        motor_count = ordered.len(),
        total_in_a,
        total_inrush_a,
        %main_breaker,
        "project summarized"
    );

    ProjectSummary {
        motor_count: ordered.len(),
        motor_list,
        total_cv,
        total_kw,
        total_in_a,
        total_inrush_a,
        inrush_model: policy.inrush_model,
        main_breaker,
        starting_device_count,
    }
}

/// Validate every motor and both policies, then summarize.
pub fn try_summarize(
    motors: &[MotorRating],
    policy: &SummaryPolicy,
    starting: &StartingPolicy,
) -> Result<ProjectSummary, SizingError> {
    for m in motors {
        m.validate()?;
    }
    policy.check()?;
    ensure_finite("starting.threshold_cv", starting.threshold_cv)?;
    starting.validate()?;
    Ok(summarize(motors, policy, starting))
}

/// [`summarize`] with the default policies.
pub fn summarize_default(motors: &[MotorRating]) -> ProjectSummary {
    summarize(motors, &SummaryPolicy::default(), &StartingPolicy::default())
}
