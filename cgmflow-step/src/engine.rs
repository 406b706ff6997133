//! Navigation for the flow.
//!
//! Every function here is total: any step with any answers gives a result, and a step with no
//! way forward gives `None` rather than an error. The `*_by_name` variants take a raw step token
//! (i.e. from a stored snapshot or a URL) and treat an unknown token as a dead end.
//!
//! # Examples
//! ```
//! # use cgmflow_data::Answers;
//! # use cgmflow_step::{StepId, engine};
//! let mut answers = Answers::new();
//! assert!(!engine::can_proceed(StepId::CurrentlyUsingCgm, &answers));
//!
//! answers.currently_using_cgm = Some(false);
//! assert_eq!(engine::next_step(StepId::CurrentlyUsingCgm, &answers), Some(StepId::DeviceSelection));
//! ```

use cgmflow_data::Answers;
use super::{StepId, ValidationError};

/// The step after `step`, `None` when `step` has no forward transition
pub fn next_step(step: StepId, answers: &Answers) -> Option<StepId> {
  match step {
    StepId::CurrentlyUsingCgm => {
      if answers.currently_using_cgm == Some(true) {
        Some(StepId::CurrentDevice)
      } else {
        Some(StepId::DeviceSelection)
      }
    }
    StepId::CurrentDevice => Some(StepId::LastDeviceUpdate),
    StepId::LastDeviceUpdate => {
      if routes_to_ineligible(answers) {
        Some(StepId::IneligibleSelection)
      } else {
        Some(StepId::LastSensorsOrdered)
      }
    }
    StepId::LastSensorsOrdered => {
      // only users due for a new device get asked about switching
      if is_five_plus_years(answers) {
        Some(StepId::DeviceSwitchIntention)
      } else {
        Some(StepId::LastDoctorVisit)
      }
    }
    StepId::DeviceSwitchIntention => {
      if answers.device_switch_intention == Some(true) {
        Some(StepId::DeviceSelection)
      } else {
        Some(StepId::LastDoctorVisit)
      }
    }
    StepId::DeviceSelection => Some(StepId::LastDoctorVisit),
    StepId::LastDoctorVisit => Some(StepId::Summary),
    StepId::IneligibleSelection |
    StepId::Summary => None,
  }
}

/// The step before the current one, taken from the path actually travelled.
///
/// `history` must already end with the current step. `_step` is not consulted.
pub fn previous_step(_step: StepId, history: &[StepId]) -> Option<StepId> {
  if history.len() > 1 {
    history.get(history.len() - 2).copied()
  } else {
    None
  }
}

/// Whether the question of `step` has been answered. Steps without a question can always proceed.
pub fn can_proceed(step: StepId, answers: &Answers) -> bool {
  match step.answer_field() {
    Some(field) => answers.is_answered(field),
    None => true,
  }
}

/// Why the flow cannot move on from `step`, if anything stops it.
///
/// Besides the unanswered check, `current-device` may not repeat the device already chosen as the new device.
pub fn validation_error(step: StepId, answers: &Answers) -> Option<ValidationError> {
  if !can_proceed(step, answers) {
    return Some(ValidationError::Unanswered(step));
  }
  if step == StepId::CurrentDevice {
    if let (Some(current), Some(selected)) = (&answers.current_device, &answers.device_selection) {
      if current == selected {
        return Some(ValidationError::DeviceConflict(current.clone()));
      }
    }
  }
  None
}

/// Stricter gate for going straight back to the summary while editing.
///
/// On top of [`validation_error`] for `step`, the answers as a whole must lead from the first step
/// to the summary: not through `ineligible-selection`, and with every question on the way answered and valid.
pub fn return_to_summary_error(step: StepId, answers: &Answers) -> Option<ValidationError> {
  if let Some(err) = validation_error(step, answers) {
    return Some(err);
  }
  if step == StepId::IneligibleSelection {
    return Some(ValidationError::DeadEnd);
  }
  route_to_summary(answers).err()
}

/// Walk the flow from the first step as the answers direct, returning the steps visited up to and including the summary.
pub fn route_to_summary(answers: &Answers) -> Result<Vec<StepId>, ValidationError> {
  let mut route = vec![StepId::FIRST];
  let mut step = StepId::FIRST;

  // the transition table has no cycles so no route is longer than the step list
  while route.len() <= StepId::ALL.len() {
    match validation_error(step, answers) {
      Some(ValidationError::Unanswered(unanswered)) => return Err(ValidationError::IncompletePath(unanswered)),
      Some(err) => return Err(err),
      None => (),
    }
    match next_step(step, answers) {
      Some(StepId::IneligibleSelection) => return Err(ValidationError::Ineligible),
      Some(StepId::Summary) => {
        route.push(StepId::Summary);
        return Ok(route);
      }
      Some(next) => {
        route.push(next);
        step = next;
      }
      None => break,
    }
  }
  Err(ValidationError::IncompletePath(step))
}

fn is_five_plus_years(answers: &Answers) -> bool {
  answers.last_device_update.as_ref().map_or(false, |update| update.is_five_plus_years())
}

// a device we can't look up can only be replaced once it's old enough
fn routes_to_ineligible(answers: &Answers) -> bool {
  let unknown_device = answers.current_device.as_ref().map_or(false, |device| device.is_other());
  unknown_device && !is_five_plus_years(answers)
}

pub fn next_step_by_name(step: &str, answers: &Answers) -> Option<StepId> {
  step.parse::<StepId>().ok().and_then(|step| next_step(step, answers))
}

pub fn can_proceed_by_name(step: &str, answers: &Answers) -> bool {
  step.parse::<StepId>().map_or(false, |step| can_proceed(step, answers))
}

pub fn validation_error_by_name(step: &str, answers: &Answers) -> Option<ValidationError> {
  step.parse::<StepId>().ok().and_then(|step| validation_error(step, answers))
}
