//! Device eligibility for CgmFlow
//!
//! Which devices a patient may pick comes from an external patient API. [`PatientService`] calls it
//! through [`ApiClient`] and turns whatever shape of device records it returns into catalog
//! [`Device`](cgmflow_data::Device)s. [`CatalogSource`] serves the static catalog instead for when
//! the integration is switched off.

mod config;
pub use config::{ ApiConfig, init_dotenv, DEFAULT_TIMEOUT, TEST_PATIENT_ID };

mod error;
pub use error::ApiError;

pub mod api;

mod client;
pub use client::ApiClient;

mod service;
pub use service::{ DeviceSource, PatientService, CatalogSource };
