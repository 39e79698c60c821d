/// Dimensioning Engine
///
/// Maps a motor rating to the branch-circuit equipment it needs (cable,
/// breaker, contactor, starting device) and rolls a set of motors up into a
/// project summary. Everything here is a pure function of its inputs.

pub mod cable;
pub mod contactor;
pub mod params;
pub mod protection;
pub mod retrofit;
pub mod starting;
pub mod summary;

pub use cable::{BindingConstraint, CableSelection};
pub use contactor::ContactorSelection;
pub use params::InstallationParams;
pub use protection::{AdjustmentRange, BreakerSelection, ProtectionKind};
pub use retrofit::{assess_retrofit, RetrofitAssessment};
pub use starting::{StartingDevice, StartingDeviceKind, StartingPolicy};
pub use summary::{
    summarize, summarize_default, try_summarize, InrushModel, MainBreaker, MotorGroup,
    ProjectSummary, SummaryPolicy,
};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::catalog::MotorRating;
use crate::error::SizingError;

/// Equipment for one motor branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensioningResult {
    pub motor: MotorRating,
    pub cable: CableSelection,
    pub breaker: BreakerSelection,
    pub contactor: ContactorSelection,
    pub protection_type: ProtectionKind,
    /// `None` means direct-on-line starting
    pub starting_device: Option<StartingDevice>,
}

/// Size one motor's branch circuit.
///
/// Total over positive finite ratings: anything beyond the tables is clamped
/// to the largest entry or given a rounded-up rating, never rejected.
pub fn dimension(motor: &MotorRating, params: &InstallationParams) -> DimensioningResult {
    let cable = cable::select_cable(motor.cv, motor.current_in_a, params);
    let contactor = contactor::select_contactor(motor.current_in_a, params.contactor_margin);
    let breaker = protection::select_breaker(motor, params);
    let starting_device = starting::recommend(motor, &params.starting);

    trace!(
        cv = motor.cv,
        section_mm2 = cable.section_mm2,
        contactor = %contactor.model,
        breaker = %breaker,
        "motor dimensioned"
    );

    DimensioningResult {
        motor: motor.clone(),
        protection_type: breaker.kind,
        cable,
        breaker,
        contactor,
        starting_device,
    }
}

/// [`dimension`] after checking the motor and parameters.
pub fn try_dimension(
    motor: &MotorRating,
    params: &InstallationParams,
) -> Result<DimensioningResult, SizingError> {
    motor.validate()?;
    params.check()?;
    Ok(dimension(motor, params))
}
