use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{event, Level};
use super::{ApiConfig, ApiError};

/// Thin JSON client for the patient API.
///
/// Every request carries the API key as a bearer token and is bounded by the configured timeout.
/// Unsuccessful statuses come back as the matching [`ApiError`].
#[derive(Debug, Clone)]
pub struct ApiClient {
  http: reqwest::Client,
  base_url: String,
  api_key: String,
}

impl ApiClient {
  pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
    let http = reqwest::Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(|e| ApiError::Config(e.to_string()))?;
    Ok(ApiClient {
      http,
      base_url: config.base_url.clone(),
      api_key: config.api_key.clone(),
    })
  }

  /// GET `endpoint` (relative to the base url) with query `params`, returning the JSON body
  pub async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
    let url = format!("{}{}", self.base_url, endpoint);
    event!(Level::DEBUG, %url, "patient api request");

    let response = self.http.get(&url)
      .query(params)
      .bearer_auth(&self.api_key)
      .header(CONTENT_TYPE, "application/json")
      .send()
      .await
      .map_err(network_error)?;

    let status = response.status();
    if !status.is_success() {
      let err = error_from_response(response).await;
      event!(Level::WARN, status = status.as_u16(), error = %err, "patient api request failed");
      return Err(err);
    }

    response.json::<Value>().await
      .map_err(|e| ApiError::validation(format!("Invalid API response format: {}", e)))
  }
}

fn network_error(err: reqwest::Error) -> ApiError {
  event!(Level::WARN, error = %err, "patient api unreachable");
  ApiError::Network { detail: err.to_string() }
}

// a JSON body with a `message` explains the failure, otherwise fall back to the status
async fn error_from_response(response: reqwest::Response) -> ApiError {
  let status = response.status();
  let mut message = format!("Request failed with status {}", status.as_u16());

  let body = response.text().await.unwrap_or_default();
  match serde_json::from_str::<Value>(&body) {
    Ok(Value::Object(fields)) => {
      match fields.get("message") {
        Some(Value::String(text)) => message = text.clone(),
        Some(other) => message = other.to_string(),
        None => (),
      }
    }
    Ok(_) => (),
    Err(_) => {
      if let Some(reason) = status.canonical_reason() {
        message = reason.to_owned();
      }
    }
  }

  ApiError::from_status(status.as_u16(), message)
}
