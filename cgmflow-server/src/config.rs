use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;
use cgmflow::eligibility::{ApiConfig, ApiError, init_dotenv};
use cgmflow::store::StoreError;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ServerError {
  #[error("invalid bind address '{0}'")]
  BadBind(String),

  #[error("cannot open flow store: {0}")]
  Store(#[from] StoreError),

  #[error("cannot set up patient API: {0}")]
  Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
  pub bind: SocketAddr,
  /// Directory for flow snapshots, in memory when `None`
  pub store_dir: Option<PathBuf>,
  pub api: ApiConfig,
}

impl ServerConfig {
  /// Read `CGMFLOW_BIND`, `CGMFLOW_STORE_DIR` and the patient API settings, loading `.env` first
  pub fn from_env() -> Result<Self, ServerError> {
    init_dotenv();
    Self::from_vars(|name| env::var(name).ok())
  }

  pub fn from_vars<F>(var: F) -> Result<Self, ServerError>
      where F: Fn(&str) -> Option<String>
  {
    let bind = var("CGMFLOW_BIND").unwrap_or_else(|| DEFAULT_BIND.to_owned());
    let bind = bind.parse::<SocketAddr>().map_err(|_e| ServerError::BadBind(bind.clone()))?;
    let store_dir = var("CGMFLOW_STORE_DIR")
      .filter(|dir| !dir.is_empty())
      .map(PathBuf::from);

    Ok(ServerConfig {
      bind,
      store_dir,
      api: ApiConfig::from_vars(var),
    })
  }
}
