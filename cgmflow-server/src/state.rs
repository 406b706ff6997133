use std::sync::Arc;
use tracing::{event, Level};
use cgmflow::{Session, CallbackSink};
use cgmflow::data::Answers;
use cgmflow::eligibility::{DeviceSource, PatientService, CatalogSource};
use cgmflow::store::{KeyValueStore, MemoryStore, FileStore, PrefixedStore};
use super::{ServerConfig, ServerError, SessionId};

/// What every request handler shares
#[derive(Debug, Clone)]
pub struct AppState {
  store: Arc<dyn KeyValueStore>,
  devices: Arc<dyn DeviceSource>,
  default_patient_id: String,
}

impl AppState {
  pub fn new(store: Arc<dyn KeyValueStore>, devices: Arc<dyn DeviceSource>, default_patient_id: String) -> Self {
    AppState { store, devices, default_patient_id }
  }

  /// Without a store directory, snapshots live in a [`MemoryStore`] that is lost on restart.
  /// That is only meant for development. Completed flows and flows started over are removed from either store.
  pub fn from_config(config: &ServerConfig) -> Result<Self, ServerError> {
    let store: Arc<dyn KeyValueStore> = match &config.store_dir {
      Some(dir) => Arc::new(FileStore::open(dir)?),
      None => Arc::new(MemoryStore::new()),
    };

    let devices: Arc<dyn DeviceSource> = if config.api.integration_enabled {
      Arc::new(PatientService::from_config(&config.api)?)
    } else {
      Arc::new(CatalogSource)
    };
    event!(Level::INFO,
      store = ?config.store_dir,
      integration = config.api.integration_enabled,
      "configured");

    Ok(Self::new(store, devices, config.api.default_patient_id.clone()))
  }

  pub fn devices(&self) -> &dyn DeviceSource {
    self.devices.as_ref()
  }

  pub fn default_patient_id(&self) -> &str {
    &self.default_patient_id
  }

  /// Rebuild the session for `id` from its snapshot, fresh if it has none
  pub fn open_session(&self, id: SessionId) -> Session {
    let store = PrefixedStore::new(self.store.clone(), &id.store_prefix());
    let mut session = Session::restore(Arc::new(store));
    session.set_completion_sink(CallbackSink::new(move |answers: &Answers| {
      event!(Level::INFO, session = %id, ?answers, "flow submitted");
    }).boxed());
    session
  }
}
