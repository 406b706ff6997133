use cgmflow_data::{Answers, AnswerField, catalog};

/// One line of the review screen
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize))]
pub struct SummaryRow {
  pub field: AnswerField,
  pub label: &'static str,
  pub value: String,
}

const NOT_SPECIFIED: &str = "Not specified";

fn format_bool(value: Option<bool>) -> String {
  match value {
    Some(true) => "Yes".to_owned(),
    Some(false) => "No".to_owned(),
    None => NOT_SPECIFIED.to_owned(),
  }
}

fn label(field: AnswerField) -> &'static str {
  match field {
    AnswerField::CurrentlyUsingCgm => "Currently Using CGM",
    AnswerField::CurrentDevice => "Current Device",
    AnswerField::LastDeviceUpdate => "Last Device Update",
    AnswerField::LastSensorsOrdered => "Last Sensors Ordered",
    AnswerField::DeviceSwitchIntention => "Interested in Switching",
    AnswerField::DeviceSelection => "Selected Device",
    AnswerField::LastDoctorVisit => "Seen Doctor in Last 6 Months",
  }
}

/// Rows for the review screen.
///
/// Whether the user is using a CGM is always listed; every other answer only once it's answered.
pub fn summary_rows(answers: &Answers) -> Vec<SummaryRow> {
  AnswerField::ALL.iter()
    .filter_map(|field| {
      let value = match field {
        AnswerField::CurrentlyUsingCgm => Some(format_bool(answers.currently_using_cgm)),
        AnswerField::CurrentDevice => answers.current_device.as_ref().map(|d| catalog::device_name(d).into_owned()),
        AnswerField::LastDeviceUpdate => answers.last_device_update.as_ref()
          .map(|r| catalog::time_range_label(&catalog::DEVICE_UPDATE_RANGES, r).into_owned()),
        AnswerField::LastSensorsOrdered => answers.last_sensors_ordered.as_ref()
          .map(|r| catalog::time_range_label(&catalog::SENSORS_ORDERED_RANGES, r).into_owned()),
        AnswerField::DeviceSwitchIntention => answers.device_switch_intention.map(|b| format_bool(Some(b))),
        AnswerField::DeviceSelection => answers.device_selection.as_ref().map(|d| catalog::device_name(d).into_owned()),
        AnswerField::LastDoctorVisit => answers.last_doctor_visit.map(|b| format_bool(Some(b))),
      }?;
      Some(SummaryRow { field: *field, label: label(*field), value })
    })
    .collect()
}


#[cfg(test)]
mod tests {
  use cgmflow_data::{Answers, AnswerField};
  use cgmflow_test_util::answers;
  use super::summary_rows;

  #[test]
  fn empty() {
    let rows = summary_rows(&Answers::new());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label, "Currently Using CGM");
    assert_eq!(rows[0].value, "Not specified");
  }

  #[test]
  fn display_values() {
    let answers = answers!(Answers,
      currently_using_cgm = true,
      current_device = "libre-14-day",
      last_device_update = "5-plus-years",
      last_sensors_ordered = "0-1-months",
      device_switch_intention = false,
      last_doctor_visit = true);
    let rows = summary_rows(&answers)
      .into_iter()
      .map(|row| (row.field, row.value))
      .collect::<Vec<_>>();
    assert_eq!(rows, vec![
      (AnswerField::CurrentlyUsingCgm, "Yes".to_owned()),
      (AnswerField::CurrentDevice, "Libre 14 Day".to_owned()),
      (AnswerField::LastDeviceUpdate, "5+ Years".to_owned()),
      (AnswerField::LastSensorsOrdered, "0-1 months".to_owned()),
      (AnswerField::DeviceSwitchIntention, "No".to_owned()),
      (AnswerField::LastDoctorVisit, "Yes".to_owned()),
    ]);
  }

  #[test]
  fn unknown_device_shows_id() {
    let answers = answers!(Answers, currently_using_cgm = false, device_selection = "libre-3");
    let rows = summary_rows(&answers);
    assert_eq!(rows[1].label, "Selected Device");
    assert_eq!(rows[1].value, "libre-3");
  }
}
