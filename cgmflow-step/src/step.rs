use cgmflow_base::IdError;
use cgmflow_data::AnswerField;

/// A single step (one screen) of the flow
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "kebab-case"))]
pub enum StepId {
  CurrentlyUsingCgm,
  CurrentDevice,
  LastDeviceUpdate,
  LastSensorsOrdered,
  DeviceSwitchIntention,
  DeviceSelection,
  LastDoctorVisit,
  IneligibleSelection,
  Summary,
}

impl StepId {
  /// Every flow starts here
  pub const FIRST: StepId = StepId::CurrentlyUsingCgm;

  pub const ALL: [StepId; 9] = [
    StepId::CurrentlyUsingCgm,
    StepId::CurrentDevice,
    StepId::LastDeviceUpdate,
    StepId::LastSensorsOrdered,
    StepId::DeviceSwitchIntention,
    StepId::DeviceSelection,
    StepId::LastDoctorVisit,
    StepId::IneligibleSelection,
    StepId::Summary,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      StepId::CurrentlyUsingCgm => "currently-using-cgm",
      StepId::CurrentDevice => "current-device",
      StepId::LastDeviceUpdate => "last-device-update",
      StepId::LastSensorsOrdered => "last-sensors-ordered",
      StepId::DeviceSwitchIntention => "device-switch-intention",
      StepId::DeviceSelection => "device-selection",
      StepId::LastDoctorVisit => "last-doctor-visit",
      StepId::IneligibleSelection => "ineligible-selection",
      StepId::Summary => "summary",
    }
  }

  /// The [`Answers`](cgmflow_data::Answers) slot this step asks for. `None` for the two steps that ask nothing.
  pub fn answer_field(&self) -> Option<AnswerField> {
    match self {
      StepId::CurrentlyUsingCgm => Some(AnswerField::CurrentlyUsingCgm),
      StepId::CurrentDevice => Some(AnswerField::CurrentDevice),
      StepId::LastDeviceUpdate => Some(AnswerField::LastDeviceUpdate),
      StepId::LastSensorsOrdered => Some(AnswerField::LastSensorsOrdered),
      StepId::DeviceSwitchIntention => Some(AnswerField::DeviceSwitchIntention),
      StepId::DeviceSelection => Some(AnswerField::DeviceSelection),
      StepId::LastDoctorVisit => Some(AnswerField::LastDoctorVisit),
      StepId::IneligibleSelection |
      StepId::Summary => None,
    }
  }

  pub fn is_question(&self) -> bool {
    self.answer_field().is_some()
  }
}

impl std::fmt::Display for StepId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for StepId {
  type Err = IdError<StepId>;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    StepId::ALL.iter()
      .find(|step| step.as_str() == s)
      .copied()
      .ok_or_else(|| IdError::CannotParse(s.to_owned()))
  }
}


#[cfg(test)]
mod tests {
  use cgmflow_base::IdError;
  use cgmflow_data::AnswerField;
  use super::StepId;

  #[test]
  fn from_str() {
    for step in StepId::ALL.iter() {
      assert_eq!(step.as_str().parse::<StepId>(), Ok(*step));
    }
    assert_eq!("payment".parse::<StepId>(), Err(IdError::CannotParse("payment".to_owned())));
  }

  #[test]
  fn questions() {
    assert_eq!(StepId::LastSensorsOrdered.answer_field(), Some(AnswerField::LastSensorsOrdered));
    assert!(!StepId::Summary.is_question());
    assert!(!StepId::IneligibleSelection.is_question());
    assert_eq!(StepId::ALL.iter().filter(|step| step.is_question()).count(), AnswerField::ALL.len());
  }
}
