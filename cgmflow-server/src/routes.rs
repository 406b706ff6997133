use std::collections::HashMap;
use std::convert::Infallible;
use tracing::{event, Level};
use warp::{Filter, Rejection, Reply, http::StatusCode};
use cgmflow::Error;
use cgmflow::step::StepId;
use super::{AppState, SessionId, ErrorBody};
use super::handlers::{self, FlowRejection, BadRequest};

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
  warp::any().map(move || state.clone())
}

/// All routes, with rejections turned into JSON error bodies
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
  // eligible devices for the device questions
  let devices_route = warp::path!("api" / "patients" / "devices")
    .and(warp::get())
    .and(warp::query::<HashMap<String, String>>())
    .and(with_state(state.clone()))
    .and_then(handlers::devices_handler);

  // route to create a flow
  let new_route = warp::path!("flow")
    .and(warp::post())
    .and(with_state(state.clone()))
    .and_then(handlers::new_flow_handler);

  let get_route = warp::path!("flow" / SessionId)
    .and(warp::get())
    .and(with_state(state.clone()))
    .and_then(handlers::get_flow_handler);

  let answer_route = warp::path!("flow" / SessionId / "answer")
    .and(warp::post())
    .and(warp::body::json())
    .and(with_state(state.clone()))
    .and_then(handlers::answer_handler);

  let next_route = warp::path!("flow" / SessionId / "next")
    .and(warp::post())
    .and(with_state(state.clone()))
    .and_then(handlers::next_handler);

  let back_route = warp::path!("flow" / SessionId / "back")
    .and(warp::post())
    .and(with_state(state.clone()))
    .and_then(handlers::back_handler);

  let return_route = warp::path!("flow" / SessionId / "return-to-summary")
    .and(warp::post())
    .and(with_state(state.clone()))
    .and_then(handlers::return_to_summary_handler);

  let edit_route = warp::path!("flow" / SessionId / "edit" / StepId)
    .and(warp::post())
    .and(with_state(state.clone()))
    .and_then(handlers::edit_handler);

  let start_over_route = warp::path!("flow" / SessionId / "start-over")
    .and(warp::post())
    .and(with_state(state))
    .and_then(handlers::start_over_handler);

  devices_route
    .or(new_route)
    .or(get_route)
    .or(answer_route)
    .or(next_route)
    .or(back_route)
    .or(return_route)
    .or(edit_route)
    .or(start_over_route)
    .recover(handle_rejection)
}

fn flow_error_status(err: &Error) -> (StatusCode, &'static str) {
  match err {
    Error::StepId(_) => (StatusCode::BAD_REQUEST, "StepError"),
    Error::InvalidValue(_) => (StatusCode::BAD_REQUEST, "InvalidValue"),
    Error::Invalid(_) => (StatusCode::UNPROCESSABLE_ENTITY, "ValidationError"),
    Error::NotEditing |
    Error::NotOnSummary(_) => (StatusCode::CONFLICT, "NotAllowed"),
  }
}

pub async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Infallible> {
  let (status, message, code) = if let Some(FlowRejection(err)) = rejection.find::<FlowRejection>() {
    let (status, code) = flow_error_status(err);
    (status, err.to_string(), code)
  } else if let Some(BadRequest(message)) = rejection.find::<BadRequest>() {
    (StatusCode::BAD_REQUEST, message.clone(), "BadRequest")
  } else if let Some(err) = rejection.find::<warp::filters::body::BodyDeserializeError>() {
    (StatusCode::BAD_REQUEST, err.to_string(), "BadRequest")
  } else if rejection.is_not_found() {
    (StatusCode::NOT_FOUND, "Not Found".to_owned(), "NotFound")
  } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_owned(), "MethodNotAllowed")
  } else {
    event!(Level::ERROR, ?rejection, "unhandled rejection");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_owned(), "INTERNAL_SERVER_ERROR")
  };

  Ok(warp::reply::with_status(warp::reply::json(&ErrorBody::new(message, code)), status))
}


#[cfg(test)]
mod tests {
  use std::sync::Arc;
  use async_trait::async_trait;
  use serde_json::{json, Value};
  use cgmflow::data::Device;
  use cgmflow::eligibility::{ApiError, CatalogSource, DeviceSource, TEST_PATIENT_ID};
  use cgmflow::store::{FileStore, MemoryStore};
  use crate::AppState;
  use super::routes;

  #[derive(Debug)]
  struct FailingSource(ApiError);

  #[async_trait]
  impl DeviceSource for FailingSource {
    async fn eligible_devices(&self, _patient_id: &str) -> Result<Vec<Device>, ApiError> {
      Err(self.0.clone())
    }
  }

  fn memory_state() -> AppState {
    AppState::new(Arc::new(MemoryStore::new()), Arc::new(CatalogSource), TEST_PATIENT_ID.to_owned())
  }

  async fn call(state: &AppState, method: &str, path: &str, body: Option<Value>) -> (u16, Value) {
    let filter = routes(state.clone());
    let mut request = warp::test::request().method(method).path(path);
    if let Some(body) = body {
      request = request.json(&body);
    }
    let response = request.reply(&filter).await;
    let body = serde_json::from_slice(response.body()).unwrap();
    (response.status().as_u16(), body)
  }

  async fn new_flow(state: &AppState) -> String {
    let (status, body) = call(state, "POST", "/flow", None).await;
    assert_eq!(status, 201);
    assert_eq!(body["step"], "currently-using-cgm");
    body["id"].as_str().unwrap().to_owned()
  }

  async fn answer(state: &AppState, id: &str, field: &str, value: Value) -> (u16, Value) {
    call(state, "POST", &format!("/flow/{}/answer", id), Some(json!({ "field": field, "value": value }))).await
  }

  async fn next(state: &AppState, id: &str) -> Value {
    let (status, body) = call(state, "POST", &format!("/flow/{}/next", id), None).await;
    assert_eq!(status, 200);
    body
  }

  async fn to_summary(state: &AppState, id: &str) {
    answer(state, id, "currentlyUsingCGM", json!(false)).await;
    next(state, id).await;
    answer(state, id, "deviceSelection", json!("dexcom-g7")).await;
    next(state, id).await;
    answer(state, id, "lastDoctorVisit", json!(true)).await;
    let body = next(state, id).await;
    assert_eq!(body["step"], "summary");
  }

  #[tokio::test]
  async fn catalog_devices() {
    let state = memory_state();
    let (status, body) = call(&state, "GET", "/api/patients/devices", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["patientId"], TEST_PATIENT_ID);
    assert_eq!(body["count"], 4);
    assert_eq!(body["data"][0]["id"], "dexcom-g7");

    let (_status, body) = call(&state, "GET", "/api/patients/devices?patientId=p-77", None).await;
    assert_eq!(body["patientId"], "p-77");
  }

  #[tokio::test]
  async fn device_errors() {
    let state = AppState::new(
      Arc::new(MemoryStore::new()),
      Arc::new(FailingSource(ApiError::NotFound("Patient not found".to_owned()))),
      TEST_PATIENT_ID.to_owned());
    let (status, body) = call(&state, "GET", "/api/patients/devices", None).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "success": false, "error": { "message": "Patient not found", "code": "NotFoundError" } }));

    let state = AppState::new(
      Arc::new(MemoryStore::new()),
      Arc::new(FailingSource(ApiError::Network { detail: "refused".to_owned() })),
      TEST_PATIENT_ID.to_owned());
    let (status, body) = call(&state, "GET", "/api/patients/devices", None).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"]["code"], "NetworkError");
  }

  #[tokio::test]
  async fn walk_to_completion() {
    let state = memory_state();
    let id = new_flow(&state).await;

    let body = next(&state, &id).await;
    assert_eq!(body["step"], "currently-using-cgm");
    assert_eq!(body["error"], "Please select whether you are currently using a CGM device.");

    let (status, body) = answer(&state, &id, "currentlyUsingCGM", json!(false)).await;
    assert_eq!(status, 200);
    assert_eq!(body["error"], Value::Null);
    assert_eq!(body["canGoNext"], true);

    let body = next(&state, &id).await;
    assert_eq!(body["step"], "device-selection");
    assert_eq!(body["stepNumber"], 2);
    assert_eq!(body["canGoBack"], true);

    to_summary(&state, &id).await;
    let (_status, body) = call(&state, "GET", &format!("/flow/{}", id), None).await;
    assert_eq!(body["title"], "Summary");
    assert_eq!(body["summary"][0]["value"], "No");
    assert_eq!(body["summary"][1]["label"], "Selected Device");
    assert_eq!(body["summary"][1]["value"], "Dexcom G7");

    let body = next(&state, &id).await;
    assert_eq!(body["completed"], true);
    assert_eq!(body["answers"]["deviceSelection"], "dexcom-g7");
  }

  #[tokio::test]
  async fn completed_flows_are_not_kept() {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), Arc::new(CatalogSource), TEST_PATIENT_ID.to_owned());
    let id = new_flow(&state).await;
    to_summary(&state, &id).await;
    assert_eq!(store.len(), 1);

    assert_eq!(next(&state, &id).await["completed"], true);
    assert!(store.is_empty());
    let (_status, body) = call(&state, "GET", &format!("/flow/{}", id), None).await;
    assert_eq!(body["step"], "currently-using-cgm");
    assert_eq!(body["answers"]["lastDoctorVisit"], Value::Null);
  }

  #[tokio::test]
  async fn edit_from_summary() {
    let state = memory_state();
    let id = new_flow(&state).await;
    to_summary(&state, &id).await;

    let (status, body) = call(&state, "POST", &format!("/flow/{}/return-to-summary", id), None).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"]["code"], "NotAllowed");

    let (status, body) = call(&state, "POST", &format!("/flow/{}/edit/last-doctor-visit", id), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["editing"], true);

    // clearing the answer blocks the way back
    answer(&state, &id, "lastDoctorVisit", Value::Null).await;
    let (status, body) = call(&state, "POST", &format!("/flow/{}/return-to-summary", id), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["step"], "last-doctor-visit");
    assert!(body["error"].is_string());

    answer(&state, &id, "lastDoctorVisit", json!(false)).await;
    let (_status, body) = call(&state, "POST", &format!("/flow/{}/return-to-summary", id), None).await;
    assert_eq!(body["step"], "summary");
    assert_eq!(body["editing"], false);

    let (status, _body) = call(&state, "POST", &format!("/flow/{}/edit/ineligible-selection", id), None).await;
    assert_eq!(status, 400);
    let (status, _body) = call(&state, "POST", &format!("/flow/{}/edit/payment", id), None).await;
    assert_eq!(status, 404);
  }

  #[tokio::test]
  async fn back_and_start_over() {
    let state = memory_state();
    let id = new_flow(&state).await;
    answer(&state, &id, "currentlyUsingCGM", json!(true)).await;
    assert_eq!(next(&state, &id).await["step"], "current-device");

    let (_status, body) = call(&state, "POST", &format!("/flow/{}/back", id), None).await;
    assert_eq!(body["step"], "currently-using-cgm");
    assert_eq!(body["answers"]["currentlyUsingCGM"], true);

    let (_status, body) = call(&state, "POST", &format!("/flow/{}/start-over", id), None).await;
    assert_eq!(body["answers"]["currentlyUsingCGM"], Value::Null);
    assert_eq!(body["history"], json!(["currently-using-cgm"]));
  }

  #[tokio::test]
  async fn bad_requests() {
    let state = memory_state();
    let id = new_flow(&state).await;

    let (status, body) = answer(&state, &id, "favoriteColor", json!("blue")).await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);

    let (status, body) = answer(&state, &id, "lastDeviceUpdate", json!("forever")).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "InvalidValue");

    let (status, _body) = answer(&state, &id, "lastDeviceUpdate", json!(3)).await;
    assert_eq!(status, 400);

    // bools only for yes/no questions, strings only for choices
    let (status, body) = answer(&state, &id, "currentDevice", json!(true)).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "BadRequest");
    let (status, body) = answer(&state, &id, "currentlyUsingCGM", json!("true")).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "BadRequest");
    let (_status, body) = call(&state, "GET", &format!("/flow/{}", id), None).await;
    assert_eq!(body["answers"]["currentDevice"], Value::Null);
    assert_eq!(body["answers"]["currentlyUsingCGM"], Value::Null);

    let (status, _body) = call(&state, "POST", &format!("/flow/{}/edit/current-device", id), None).await;
    assert_eq!(status, 409);

    let (status, _body) = call(&state, "GET", "/flow/not-a-uuid", None).await;
    assert_eq!(status, 404);
  }

  #[tokio::test]
  async fn flows_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(Arc::new(FileStore::open(dir.path()).unwrap()), Arc::new(CatalogSource), TEST_PATIENT_ID.to_owned());
    let id = new_flow(&state).await;
    answer(&state, &id, "currentlyUsingCGM", json!(true)).await;
    next(&state, &id).await;

    let restarted = AppState::new(Arc::new(FileStore::open(dir.path()).unwrap()), Arc::new(CatalogSource), TEST_PATIENT_ID.to_owned());
    let (_status, body) = call(&restarted, "GET", &format!("/flow/{}", id), None).await;
    assert_eq!(body["step"], "current-device");
    assert_eq!(body["history"], json!(["currently-using-cgm", "current-device"]));
  }
}
