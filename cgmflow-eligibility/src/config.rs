use std::env;
use std::time::Duration;
use once_cell::sync::Lazy;

/// Patient used when a request doesn't name one
pub const TEST_PATIENT_ID: &str = "demo-patient-12345";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

// read .env once, a missing file is fine
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
  let _ = dotenvy::dotenv();
});

/// Load `.env` into the environment now rather than on first config read
pub fn init_dotenv() {
  Lazy::force(&DOTENV_LOADED);
}

/// Where the patient API lives and how to talk to it
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
  pub base_url: String,
  pub api_key: String,
  pub timeout: Duration,
  /// When off, devices come from the static catalog and the API is never called
  pub integration_enabled: bool,
  pub default_patient_id: String,
}

impl Default for ApiConfig {
  fn default() -> Self {
    ApiConfig {
      base_url: String::new(),
      api_key: String::new(),
      timeout: DEFAULT_TIMEOUT,
      integration_enabled: false,
      default_patient_id: TEST_PATIENT_ID.to_owned(),
    }
  }
}

impl ApiConfig {
  /// Read `PATIENT_API_BASE_URL`, `PATIENT_API_KEY`, `PATIENT_API_TIMEOUT_MS` and
  /// `CGMFLOW_API_INTEGRATION_ENABLED`, loading `.env` first
  pub fn from_env() -> Self {
    init_dotenv();
    Self::from_vars(|name| env::var(name).ok())
  }

  /// Build from any variable lookup. Unset or unparseable values keep their defaults.
  pub fn from_vars<F>(var: F) -> Self
      where F: Fn(&str) -> Option<String>
  {
    let defaults = Self::default();
    ApiConfig {
      base_url: var("PATIENT_API_BASE_URL")
        .map(|url| url.trim_end_matches('/').to_owned())
        .unwrap_or(defaults.base_url),
      api_key: var("PATIENT_API_KEY").unwrap_or(defaults.api_key),
      timeout: var("PATIENT_API_TIMEOUT_MS")
        .and_then(|ms| ms.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(defaults.timeout),
      integration_enabled: var("CGMFLOW_API_INTEGRATION_ENABLED")
        .map(|enabled| enabled == "true")
        .unwrap_or(defaults.integration_enabled),
      default_patient_id: var("CGMFLOW_DEFAULT_PATIENT_ID")
        .filter(|id| !id.is_empty())
        .unwrap_or(defaults.default_patient_id),
    }
  }
}
