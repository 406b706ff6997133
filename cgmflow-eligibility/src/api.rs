//! Shapes of the patient API's responses and the conversion of its device records.
//!
//! The API's device records are loosely shaped, so every field is optional and the conversion
//! falls back through the alternatives it may use.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use cgmflow_data::{Device, DeviceId};

/// Body of the `/patients/devices` response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDeviceResponse {
  pub patient_id: String,
  pub eligible_devices: Vec<DeviceData>,
  #[serde(default)]
  pub metadata: Option<Value>,
}

/// One device record as the API sends it
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceData {
  pub id: Option<String>,
  pub device_id: Option<String>,
  pub name: Option<String>,
  pub device_name: Option<String>,
  pub manufacturer: Option<String>,
  pub model: Option<String>,
  pub description: Option<String>,
  pub image_url: Option<String>,
  pub eligible: Option<bool>,
  pub eligibility_reason: Option<String>,
}

/// Body of the `/customer/pricing` response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPricingResponse {
  pub customer_id: String,
  pub pricing: Vec<DevicePricing>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePricing {
  pub device_id: String,
  pub price: f64,
  pub currency: String,
  #[serde(default)]
  pub coverage: Option<Coverage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
  pub insurance_covered: bool,
  #[serde(default)]
  pub copay: Option<f64>,
}

// first of the candidates that holds some text
fn first_text<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
  candidates.iter()
    .copied()
    .filter_map(Option::as_deref)
    .find(|text| !text.is_empty())
}

impl DeviceData {
  /// Records without an `eligible` flag count as eligible
  pub fn is_eligible(&self) -> bool {
    self.eligible.unwrap_or(true)
  }

  pub fn to_device(&self) -> Device {
    let id = first_text(&[&self.id, &self.device_id, &self.model]).unwrap_or("unknown");
    let name = first_text(&[&self.name, &self.device_name, &self.model]).unwrap_or("Unknown Device");

    let made_by = format!(
      "{} {}",
      self.manufacturer.as_deref().unwrap_or(""),
      self.model.as_deref().unwrap_or(""));
    let description = match first_text(&[&self.description]) {
      Some(description) => description.to_owned(),
      None if !made_by.trim().is_empty() => made_by.trim().to_owned(),
      None => "No description available".to_owned(),
    };

    Device {
      id: DeviceId::from(id.to_owned()),
      name: name.to_owned(),
      description,
      image: first_text(&[&self.image_url]).unwrap_or("📱").to_owned(),
    }
  }
}

/// Whether `value` has the outline of a [`PatientDeviceResponse`]
pub fn is_patient_device_response(value: &Value) -> bool {
  value.get("patientId").map_or(false, Value::is_string)
    && value.get("eligibleDevices").map_or(false, Value::is_array)
}

pub fn filter_eligible_devices(devices: Vec<DeviceData>) -> Vec<DeviceData> {
  devices.into_iter().filter(DeviceData::is_eligible).collect()
}
