use super::StepId;

/// Illustration shown with a step
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct StepImage {
  pub src: &'static str,
  pub alt: &'static str,
}

pub fn step_title(step: StepId) -> &'static str {
  match step {
    StepId::CurrentlyUsingCgm => "Currently Using CGM",
    StepId::CurrentDevice => "Current Device",
    StepId::LastDeviceUpdate => "Last Device Update",
    StepId::LastSensorsOrdered => "Last Sensors Ordered",
    StepId::DeviceSwitchIntention => "Device Switch Intention",
    StepId::DeviceSelection => "Device Selection",
    StepId::LastDoctorVisit => "Last Doctor Visit",
    StepId::IneligibleSelection => "Ineligible Selection",
    StepId::Summary => "Summary",
  }
}

pub fn step_question(step: StepId) -> &'static str {
  match step {
    StepId::CurrentlyUsingCgm => "Are you currently using a CGM device?",
    StepId::CurrentDevice => "Which CGM device are you currently using?",
    StepId::LastDeviceUpdate => "When was your last device update?",
    StepId::LastSensorsOrdered => "When did you last order sensors?",
    StepId::DeviceSwitchIntention => "Are you interested in switching to a different CGM device?",
    StepId::DeviceSelection => "Which CGM device would you like to select?",
    StepId::LastDoctorVisit => "Have you seen your primary care physician in the last 6 months?",
    StepId::IneligibleSelection => "Unable to Provide Equipment at This Time",
    StepId::Summary => "Review Your Selections",
  }
}

pub fn step_image(step: StepId) -> StepImage {
  let (src, alt) = match step {
    StepId::CurrentlyUsingCgm => ("/images/cgm-flow/currently-using-cgm.svg", "Person wearing a continuous glucose monitor on their arm"),
    StepId::CurrentDevice => ("/images/cgm-flow/current-device.svg", "Different CGM device options displayed side by side"),
    StepId::LastDeviceUpdate => ("/images/cgm-flow/last-device-update.svg", "Calendar with checkmark indicating device update date"),
    StepId::LastSensorsOrdered => ("/images/cgm-flow/last-sensors-ordered.svg", "CGM sensor supply boxes with sensors"),
    StepId::DeviceSwitchIntention => ("/images/cgm-flow/device-switch-intention.svg", "Arrows showing transition from one CGM device to another"),
    StepId::DeviceSelection => ("/images/cgm-flow/device-selection.svg", "Hand selecting a preferred CGM device from available options"),
    StepId::LastDoctorVisit => ("/images/cgm-flow/last-doctor-visit.svg", "Doctor consultation with patient discussing CGM management"),
    StepId::IneligibleSelection => ("/images/cgm-flow/ineligible-selection.svg", "Information document indicating eligibility requirements"),
    StepId::Summary => ("/images/cgm-flow/summary.svg", "Checkmark badge showing completion of CGM device selection"),
  };
  StepImage { src, alt }
}

/// Title for a raw step token, empty when the token is not a step
pub fn step_title_by_name(step: &str) -> &'static str {
  step.parse::<StepId>().map_or("", step_title)
}

/// Question for a raw step token, empty when the token is not a step
pub fn step_question_by_name(step: &str) -> &'static str {
  step.parse::<StepId>().map_or("", step_question)
}
