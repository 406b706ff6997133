use cgmflow_data::{Answers, AnswerField, InvalidValue};
use cgmflow_step::StepId;

/// Everything needed to bring a [`Session`](crate::Session) back, as written to the store
#[derive(Debug, PartialEq, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
  pub current_step: StepId,
  pub answers: Answers,
  pub step_history: Vec<StepId>,
  #[serde(default)]
  pub return_to_summary: bool,
}

#[derive(Debug, PartialEq, Clone)]
pub enum SnapshotError {
  /// Not JSON, or not the shape of a snapshot (includes unknown step ids)
  Parse(String),
  EmptyHistory,
  /// History must start at the first question
  HistoryStart(StepId),
  /// History must end with the current step
  HistoryMismatch { current: StepId, last: StepId },
  /// An answer that answering the question would have refused
  InvalidAnswer { field: AnswerField, error: InvalidValue },
}

impl std::error::Error for SnapshotError {}

impl std::fmt::Display for SnapshotError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SnapshotError::Parse(msg) => write!(f, "cannot parse snapshot: {}", msg),
      SnapshotError::EmptyHistory => write!(f, "snapshot has an empty step history"),
      SnapshotError::HistoryStart(first) => write!(f, "snapshot history starts with '{}'", first),
      SnapshotError::HistoryMismatch { current, last } =>
        write!(f, "snapshot is on '{}' but its history ends with '{}'", current, last),
      SnapshotError::InvalidAnswer { field, error } =>
        write!(f, "snapshot answer '{}' is invalid: {}", field, error),
    }
  }
}

impl Snapshot {
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }

  /// Parse a stored snapshot and check it describes a usable flow
  pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
    let snapshot = serde_json::from_str::<Snapshot>(json)
      .map_err(|e| SnapshotError::Parse(e.to_string()))?;
    snapshot.check()?;
    Ok(snapshot)
  }

  fn check(&self) -> Result<(), SnapshotError> {
    let first = self.step_history.first().ok_or(SnapshotError::EmptyHistory)?;
    if *first != StepId::FIRST {
      return Err(SnapshotError::HistoryStart(*first));
    }
    let last = self.step_history.last().ok_or(SnapshotError::EmptyHistory)?;
    if *last != self.current_step {
      return Err(SnapshotError::HistoryMismatch { current: self.current_step, last: *last });
    }
    self.answers.check().map_err(|(field, error)| SnapshotError::InvalidAnswer { field, error })
  }
}


#[cfg(test)]
mod tests {
  use cgmflow_data::{Answers, AnswerField, InvalidValue};
  use cgmflow_step::StepId;
  use cgmflow_test_util::answers;
  use super::{Snapshot, SnapshotError};

  #[test]
  fn json_shape() {
    let json = r#"{
      "currentStep": "device-selection",
      "answers": {
        "currentlyUsingCGM": false,
        "currentDevice": null,
        "lastDeviceUpdate": null,
        "lastSensorsOrdered": null,
        "deviceSwitchIntention": null,
        "deviceSelection": null,
        "lastDoctorVisit": null
      },
      "stepHistory": ["currently-using-cgm", "device-selection"]
    }"#;
    let snapshot = Snapshot::from_json(json).unwrap();
    assert_eq!(snapshot.current_step, StepId::DeviceSelection);
    assert_eq!(snapshot.answers.currently_using_cgm, Some(false));
    assert!(!snapshot.return_to_summary);

    let written = snapshot.to_json().unwrap();
    assert!(written.contains("\"returnToSummary\":false"));
    assert_eq!(Snapshot::from_json(&written), Ok(snapshot));
  }

  #[test]
  fn rejects_bad_snapshots() {
    assert!(matches!(Snapshot::from_json("{not json"), Err(SnapshotError::Parse(_))));

    // unknown step id
    let unknown = r#"{"currentStep":"payment","answers":{},"stepHistory":["payment"]}"#;
    assert!(matches!(Snapshot::from_json(unknown), Err(SnapshotError::Parse(_))));

    let empty = Snapshot {
      current_step: StepId::Summary,
      answers: answers!(Answers, currently_using_cgm = false, last_doctor_visit = true),
      step_history: vec![],
      return_to_summary: false,
    };
    assert_eq!(Snapshot::from_json(&empty.to_json().unwrap()), Err(SnapshotError::EmptyHistory));

    let mismatch = Snapshot { step_history: vec![StepId::CurrentlyUsingCgm], ..empty.clone() };
    assert_eq!(
      Snapshot::from_json(&mismatch.to_json().unwrap()),
      Err(SnapshotError::HistoryMismatch { current: StepId::Summary, last: StepId::CurrentlyUsingCgm }));

    let late_start = Snapshot { step_history: vec![StepId::LastDoctorVisit, StepId::Summary], ..empty };
    assert_eq!(
      Snapshot::from_json(&late_start.to_json().unwrap()),
      Err(SnapshotError::HistoryStart(StepId::LastDoctorVisit)));
  }

  #[test]
  fn rejects_answers_that_could_not_be_given() {
    let snapshot = |answers: &str| format!(
      r#"{{"currentStep":"last-sensors-ordered","answers":{},"stepHistory":["currently-using-cgm","current-device","last-device-update","last-sensors-ordered"]}}"#,
      answers);

    let valid = snapshot(r#"{"currentlyUsingCGM":true,"currentDevice":"other","lastDeviceUpdate":"5-plus-years"}"#);
    assert!(Snapshot::from_json(&valid).is_ok());

    let empty_device = snapshot(r#"{"currentlyUsingCGM":true,"currentDevice":"","lastDeviceUpdate":"5-plus-years"}"#);
    assert_eq!(
      Snapshot::from_json(&empty_device),
      Err(SnapshotError::InvalidAnswer { field: AnswerField::CurrentDevice, error: InvalidValue::Empty }));

    let unlisted = snapshot(r#"{"currentlyUsingCGM":true,"currentDevice":"other","lastDeviceUpdate":"forever"}"#);
    assert_eq!(
      Snapshot::from_json(&unlisted),
      Err(SnapshotError::InvalidAnswer { field: AnswerField::LastDeviceUpdate, error: InvalidValue::WrongValue }));

    let wrong_list = snapshot(r#"{"currentlyUsingCGM":true,"currentDevice":"other","lastDeviceUpdate":"5-plus-years","lastSensorsOrdered":"5-plus-years"}"#);
    assert_eq!(
      Snapshot::from_json(&wrong_list),
      Err(SnapshotError::InvalidAnswer { field: AnswerField::LastSensorsOrdered, error: InvalidValue::WrongValue }));
  }
}
