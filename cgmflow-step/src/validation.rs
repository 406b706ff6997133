use cgmflow_data::{DeviceId, catalog};
use super::StepId;

/// Why a step cannot be left (or the summary cannot be returned to)
#[derive(Debug, PartialEq, Clone)]
pub enum ValidationError {
  /// The step's question is unanswered
  Unanswered(StepId),
  /// Current device is the same as the device already picked as the new one
  DeviceConflict(DeviceId),
  /// Answers route the flow into `ineligible-selection`
  Ineligible,
  /// Standing on `ineligible-selection`, which has no way forward
  DeadEnd,
  /// A question between the first step and the summary is unanswered
  IncompletePath(StepId),
}

impl ValidationError {
  pub fn message(&self) -> String {
    match self {
      ValidationError::Unanswered(step) => unanswered_message(step).to_owned(),
      ValidationError::DeviceConflict(device) => format!(
        "You cannot select {} as your current device because you have already selected it as your new device.",
        catalog::device_name(device)),
      ValidationError::Ineligible =>
        "With a device that is not listed and a device update less than 5 years ago, you are not eligible for replacement equipment. Please update your answer to return to the summary.".to_owned(),
      ValidationError::DeadEnd =>
        "You are not eligible for replacement equipment with these answers. Please go back and update your answers to return to the summary.".to_owned(),
      ValidationError::IncompletePath(step) => format!(
        "Please answer \"{}\" before returning to the summary.",
        super::step_question(*step)),
    }
  }
}

fn unanswered_message(step: &StepId) -> &'static str {
  match step {
    StepId::CurrentlyUsingCgm => "Please select whether you are currently using a CGM device.",
    StepId::CurrentDevice => "Please select your current CGM device.",
    StepId::LastDeviceUpdate => "Please select when your last device update was.",
    StepId::LastSensorsOrdered => "Please select when you last ordered sensors.",
    StepId::DeviceSwitchIntention => "Please indicate whether you are interested in switching devices.",
    StepId::DeviceSelection => "Please select a CGM device.",
    StepId::LastDoctorVisit => "Please indicate whether you have seen your primary care physician in the last 6 months.",
    StepId::IneligibleSelection |
    StepId::Summary => "",
  }
}

impl std::error::Error for ValidationError {}

impl std::fmt::Display for ValidationError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.message())
  }
}
