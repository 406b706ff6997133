use super::{DeviceId, TimeRangeId, InvalidValue};
use super::catalog::{self, TimeRange};

/// The accumulated answers of one flow.
///
/// Every slot always exists. `None` means the question has not been answered, never that the
/// slot was left out, and that is also how a slot serializes (`null`).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "camelCase"))]
pub struct Answers {
  #[cfg_attr(feature = "serde-support", serde(rename = "currentlyUsingCGM"))]
  pub currently_using_cgm: Option<bool>,
  pub current_device: Option<DeviceId>,
  pub last_device_update: Option<TimeRangeId>,
  pub last_sensors_ordered: Option<TimeRangeId>,
  pub device_switch_intention: Option<bool>,
  pub device_selection: Option<DeviceId>,
  pub last_doctor_visit: Option<bool>,
}

/// Names one slot of [`Answers`]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "camelCase"))]
pub enum AnswerField {
  #[cfg_attr(feature = "serde-support", serde(rename = "currentlyUsingCGM"))]
  CurrentlyUsingCgm,
  CurrentDevice,
  LastDeviceUpdate,
  LastSensorsOrdered,
  DeviceSwitchIntention,
  DeviceSelection,
  LastDoctorVisit,
}

/// What kind of value an [`AnswerField`] holds
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AnswerKind {
  Bool,
  Device,
  /// One of the listed ranges
  TimeRange(&'static [TimeRange]),
}

/// A single answered value
#[derive(Debug, PartialEq, Clone)]
pub enum AnswerValue {
  Bool(bool),
  Device(DeviceId),
  TimeRange(TimeRangeId),
}

impl From<bool> for AnswerValue {
  fn from(b: bool) -> Self {
    AnswerValue::Bool(b)
  }
}

impl From<DeviceId> for AnswerValue {
  fn from(device: DeviceId) -> Self {
    AnswerValue::Device(device)
  }
}

impl From<TimeRangeId> for AnswerValue {
  fn from(range: TimeRangeId) -> Self {
    AnswerValue::TimeRange(range)
  }
}

impl AnswerField {
  pub const ALL: [AnswerField; 7] = [
    AnswerField::CurrentlyUsingCgm,
    AnswerField::CurrentDevice,
    AnswerField::LastDeviceUpdate,
    AnswerField::LastSensorsOrdered,
    AnswerField::DeviceSwitchIntention,
    AnswerField::DeviceSelection,
    AnswerField::LastDoctorVisit,
  ];

  /// The key used for this slot in serialized answers
  pub fn key(&self) -> &'static str {
    match self {
      AnswerField::CurrentlyUsingCgm => "currentlyUsingCGM",
      AnswerField::CurrentDevice => "currentDevice",
      AnswerField::LastDeviceUpdate => "lastDeviceUpdate",
      AnswerField::LastSensorsOrdered => "lastSensorsOrdered",
      AnswerField::DeviceSwitchIntention => "deviceSwitchIntention",
      AnswerField::DeviceSelection => "deviceSelection",
      AnswerField::LastDoctorVisit => "lastDoctorVisit",
    }
  }

  pub fn kind(&self) -> AnswerKind {
    match self {
      AnswerField::CurrentlyUsingCgm |
      AnswerField::DeviceSwitchIntention |
      AnswerField::LastDoctorVisit => AnswerKind::Bool,
      AnswerField::CurrentDevice |
      AnswerField::DeviceSelection => AnswerKind::Device,
      AnswerField::LastDeviceUpdate => AnswerKind::TimeRange(&catalog::DEVICE_UPDATE_RANGES),
      AnswerField::LastSensorsOrdered => AnswerKind::TimeRange(&catalog::SENSORS_ORDERED_RANGES),
    }
  }

  /// Convert raw text (i.e. from a form) into a value for this slot.
  ///
  /// Device ids are not checked against the catalog since the eligible devices come from outside.
  pub fn parse_value(&self, s: &str) -> Result<AnswerValue, InvalidValue> {
    match self.kind() {
      AnswerKind::Bool => {
        match &s.to_lowercase()[..] {
          "true" => Ok(AnswerValue::Bool(true)),
          "false" => Ok(AnswerValue::Bool(false)),
          _ => Err(InvalidValue::WrongValue),
        }
      }
      AnswerKind::Device => Ok(AnswerValue::Device(s.parse::<DeviceId>()?)),
      AnswerKind::TimeRange(ranges) => {
        let range = s.parse::<TimeRangeId>()?;
        if !catalog::contains_range(ranges, &range) {
          return Err(InvalidValue::WrongValue);
        }
        Ok(AnswerValue::TimeRange(range))
      }
    }
  }
}

impl std::fmt::Display for AnswerField {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.key())
  }
}

impl std::str::FromStr for AnswerField {
  type Err = InvalidValue;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    AnswerField::ALL.iter()
      .find(|field| field.key() == s)
      .copied()
      .ok_or(InvalidValue::WrongValue)
  }
}

impl Answers {
  /// Create answers with every slot unanswered
  pub fn new() -> Self {
    Default::default()
  }

  pub fn is_answered(&self, field: AnswerField) -> bool {
    self.get(field).is_some()
  }

  /// Read a slot
  pub fn get(&self, field: AnswerField) -> Option<AnswerValue> {
    match field {
      AnswerField::CurrentlyUsingCgm => self.currently_using_cgm.map(AnswerValue::Bool),
      AnswerField::CurrentDevice => self.current_device.clone().map(AnswerValue::Device),
      AnswerField::LastDeviceUpdate => self.last_device_update.clone().map(AnswerValue::TimeRange),
      AnswerField::LastSensorsOrdered => self.last_sensors_ordered.clone().map(AnswerValue::TimeRange),
      AnswerField::DeviceSwitchIntention => self.device_switch_intention.map(AnswerValue::Bool),
      AnswerField::DeviceSelection => self.device_selection.clone().map(AnswerValue::Device),
      AnswerField::LastDoctorVisit => self.last_doctor_visit.map(AnswerValue::Bool),
    }
  }

  /// Answer a slot. The value must be of the slot's kind and, for time ranges, one of its ranges.
  pub fn set(&mut self, field: AnswerField, value: AnswerValue) -> Result<(), InvalidValue> {
    match (field.kind(), value) {
      (AnswerKind::Bool, AnswerValue::Bool(b)) => {
        match field {
          AnswerField::CurrentlyUsingCgm => self.currently_using_cgm = Some(b),
          AnswerField::DeviceSwitchIntention => self.device_switch_intention = Some(b),
          _ => self.last_doctor_visit = Some(b),
        }
      }
      (AnswerKind::Device, AnswerValue::Device(device)) => {
        if field == AnswerField::CurrentDevice {
          self.current_device = Some(device);
        } else {
          self.device_selection = Some(device);
        }
      }
      (AnswerKind::TimeRange(ranges), AnswerValue::TimeRange(range)) => {
        if !catalog::contains_range(ranges, &range) {
          return Err(InvalidValue::WrongValue);
        }
        if field == AnswerField::LastDeviceUpdate {
          self.last_device_update = Some(range);
        } else {
          self.last_sensors_ordered = Some(range);
        }
      }
      _ => return Err(InvalidValue::WrongType),
    }
    Ok(())
  }

  /// Check every answered slot would have been accepted by [`AnswerField::parse_value`].
  ///
  /// Answers read back from storage skip the checks done when answering, so they go through here.
  pub fn check(&self) -> Result<(), (AnswerField, InvalidValue)> {
    for field in AnswerField::ALL.iter() {
      let checked = match self.get(*field) {
        None | Some(AnswerValue::Bool(_)) => Ok(()),
        Some(AnswerValue::Device(device)) => field.parse_value(device.as_str()).map(|_| ()),
        Some(AnswerValue::TimeRange(range)) => field.parse_value(range.as_str()).map(|_| ()),
      };
      checked.map_err(|e| (*field, e))?;
    }
    Ok(())
  }

  /// Return a slot to unanswered
  pub fn clear(&mut self, field: AnswerField) {
    match field {
      AnswerField::CurrentlyUsingCgm => self.currently_using_cgm = None,
      AnswerField::CurrentDevice => self.current_device = None,
      AnswerField::LastDeviceUpdate => self.last_device_update = None,
      AnswerField::LastSensorsOrdered => self.last_sensors_ordered = None,
      AnswerField::DeviceSwitchIntention => self.device_switch_intention = None,
      AnswerField::DeviceSelection => self.device_selection = None,
      AnswerField::LastDoctorVisit => self.last_doctor_visit = None,
    }
  }
}


#[cfg(test)]
mod tests {
  use cgmflow_test_util::answers;
  use crate::{DeviceId, TimeRangeId, InvalidValue};
  use super::{Answers, AnswerField, AnswerValue};

  #[test]
  fn set_get_clear() {
    let mut answers = Answers::new();
    for field in AnswerField::ALL.iter() {
      assert!(!answers.is_answered(*field));
    }

    answers.set(AnswerField::CurrentlyUsingCgm, true.into()).unwrap();
    answers.set(AnswerField::CurrentDevice, DeviceId::from("dexcom-g6").into()).unwrap();
    answers.set(AnswerField::LastSensorsOrdered, TimeRangeId::from("3-6-months").into()).unwrap();
    assert_eq!(answers.currently_using_cgm, Some(true));
    assert_eq!(answers.get(AnswerField::CurrentDevice), Some(AnswerValue::Device("dexcom-g6".into())));
    assert_eq!(answers.last_sensors_ordered, Some("3-6-months".into()));

    answers.clear(AnswerField::CurrentDevice);
    assert_eq!(answers.current_device, None);
    assert!(answers.is_answered(AnswerField::CurrentlyUsingCgm));
  }

  #[test]
  fn set_rejects_wrong_values() {
    let mut answers = Answers::new();
    assert_eq!(answers.set(AnswerField::LastDoctorVisit, DeviceId::from("other").into()), Err(InvalidValue::WrongType));
    assert_eq!(answers.set(AnswerField::DeviceSelection, false.into()), Err(InvalidValue::WrongType));

    // a sensors range is not a device update range
    assert_eq!(answers.set(AnswerField::LastDeviceUpdate, TimeRangeId::from("0-1-months").into()), Err(InvalidValue::WrongValue));
    assert_eq!(answers, Answers::new());
  }

  #[test]
  fn check_stored_answers() {
    assert_eq!(Answers::new().check(), Ok(()));
    let valid = answers!(Answers,
      currently_using_cgm = true,
      current_device = "some-new-device",
      last_device_update = "5-plus-years",
      last_sensors_ordered = "0-1-months");
    assert_eq!(valid.check(), Ok(()));

    // fields are public, so none of these went through `set`
    let empty_device = Answers { current_device: Some(DeviceId::from("")), ..valid.clone() };
    assert_eq!(empty_device.check(), Err((AnswerField::CurrentDevice, InvalidValue::Empty)));
    let unlisted = Answers { last_device_update: Some("forever".into()), ..valid.clone() };
    assert_eq!(unlisted.check(), Err((AnswerField::LastDeviceUpdate, InvalidValue::WrongValue)));
    let wrong_list = Answers { last_sensors_ordered: Some("5-plus-years".into()), ..valid };
    assert_eq!(wrong_list.check(), Err((AnswerField::LastSensorsOrdered, InvalidValue::WrongValue)));
  }

  #[test]
  fn parse_value() {
    assert_eq!(AnswerField::CurrentlyUsingCgm.parse_value("TrUe"), Ok(AnswerValue::Bool(true)));
    assert_eq!(AnswerField::LastDoctorVisit.parse_value("false"), Ok(AnswerValue::Bool(false)));
    assert_eq!(AnswerField::LastDoctorVisit.parse_value("yes"), Err(InvalidValue::WrongValue));

    assert_eq!(AnswerField::DeviceSelection.parse_value("some-new-device"), Ok(AnswerValue::Device("some-new-device".into())));
    assert_eq!(AnswerField::CurrentDevice.parse_value(""), Err(InvalidValue::Empty));

    assert_eq!(AnswerField::LastDeviceUpdate.parse_value("5-plus-years"), Ok(AnswerValue::TimeRange(TimeRangeId::FIVE_PLUS_YEARS)));
    assert_eq!(AnswerField::LastDeviceUpdate.parse_value("6-plus-months"), Err(InvalidValue::WrongValue));
    assert_eq!(AnswerField::LastSensorsOrdered.parse_value("6-plus-months"), Ok(AnswerValue::TimeRange("6-plus-months".into())));
  }

  #[test]
  fn field_keys() {
    for field in AnswerField::ALL.iter() {
      assert_eq!(field.key().parse::<AnswerField>(), Ok(*field));
    }
    assert_eq!("currentlyUsingCgm".parse::<AnswerField>(), Err(InvalidValue::WrongValue));
  }

  #[test]
  fn answers_macro() {
    let answers = answers!(Answers, current_device = "other", last_doctor_visit = true);
    assert_eq!(answers.current_device, Some(DeviceId::OTHER));
    assert_eq!(answers.last_doctor_visit, Some(true));
    assert_eq!(answers.device_selection, None);
  }

  #[cfg(feature = "serde-support")]
  #[test]
  fn serialize_unanswered_as_null() {
    let answers = answers!(Answers, currently_using_cgm = false);
    let json = serde_json::to_value(&answers).unwrap();
    assert_eq!(json, serde_json::json!({
      "currentlyUsingCGM": false,
      "currentDevice": null,
      "lastDeviceUpdate": null,
      "lastSensorsOrdered": null,
      "deviceSwitchIntention": null,
      "deviceSelection": null,
      "lastDoctorVisit": null,
    }));
    let back: Answers = serde_json::from_value(json).unwrap();
    assert_eq!(back, answers);
  }
}
