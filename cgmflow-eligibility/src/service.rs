use async_trait::async_trait;
use tracing::{event, Level};
use cgmflow_data::{Device, catalog};
use super::{ApiClient, ApiConfig, ApiError};
use super::api::{self, PatientDeviceResponse, CustomerPricingResponse};

const PATIENT_DEVICES: &str = "/patients/devices";
const CUSTOMER_PRICING: &str = "/customer/pricing";

/// Where the devices a patient may pick come from
#[async_trait]
pub trait DeviceSource: std::fmt::Debug + Send + Sync {
  async fn eligible_devices(&self, patient_id: &str) -> Result<Vec<Device>, ApiError>;

  /// Whether `device_id` is among the patient's eligible devices. Any failure counts as not eligible.
  async fn validate_patient_device_eligibility(&self, patient_id: &str, device_id: &str) -> bool {
    match self.eligible_devices(patient_id).await {
      Ok(devices) => devices.iter().any(|device| device.id == device_id),
      Err(err) => {
        event!(Level::WARN, patient_id, error = %err, "cannot check eligibility");
        false
      }
    }
  }
}

/// Patient operations on the patient API
#[derive(Debug, Clone)]
pub struct PatientService {
  client: ApiClient,
}

impl PatientService {
  pub fn new(client: ApiClient) -> Self {
    PatientService { client }
  }

  pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
    Ok(Self::new(ApiClient::new(config)?))
  }

  /// The devices the patient is eligible for, in catalog form
  pub async fn fetch_eligible_devices(&self, patient_id: &str) -> Result<Vec<Device>, ApiError> {
    if patient_id.is_empty() {
      return Err(ApiError::Validation {
        message: "Patient ID is required".to_owned(),
        field: Some("patientId"),
      });
    }

    let body = self.client.get(PATIENT_DEVICES, &[("patientId", patient_id)]).await?;
    if !api::is_patient_device_response(&body) {
      return Err(ApiError::validation(
        "Invalid API response format: expected PatientDeviceResponse structure"));
    }
    let response: PatientDeviceResponse = serde_json::from_value(body)
      .map_err(|e| ApiError::validation(format!("Invalid API response format: {}", e)))?;

    let devices: Vec<Device> = api::filter_eligible_devices(response.eligible_devices).iter()
      .map(api::DeviceData::to_device)
      .collect();
    event!(Level::DEBUG, patient_id, count = devices.len(), "fetched eligible devices");
    Ok(devices)
  }

  pub async fn fetch_customer_pricing(&self, customer_id: &str) -> Result<CustomerPricingResponse, ApiError> {
    if customer_id.is_empty() {
      return Err(ApiError::Validation {
        message: "Customer ID is required".to_owned(),
        field: Some("customerId"),
      });
    }

    let body = self.client.get(CUSTOMER_PRICING, &[("customerId", customer_id)]).await?;
    serde_json::from_value(body)
      .map_err(|e| ApiError::validation(format!("Invalid API response format: {}", e)))
  }
}

#[async_trait]
impl DeviceSource for PatientService {
  async fn eligible_devices(&self, patient_id: &str) -> Result<Vec<Device>, ApiError> {
    self.fetch_eligible_devices(patient_id).await
  }
}

/// Serves the built-in catalog's shippable devices to every patient
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogSource;

#[async_trait]
impl DeviceSource for CatalogSource {
  async fn eligible_devices(&self, _patient_id: &str) -> Result<Vec<Device>, ApiError> {
    Ok(catalog::shippable_devices())
  }
}
