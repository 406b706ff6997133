use std::collections::HashMap;
use std::convert::Infallible;
use serde::Deserialize;
use serde_json::Value;
use tracing::{event, Level};
use tracing_attributes::instrument;
use warp::{Rejection, Reply, http::StatusCode};
use cgmflow::{Error, NextOutcome};
use cgmflow::data::{AnswerField, AnswerKind};
use cgmflow::step::StepId;
use super::{AppState, SessionId, FlowView, ErrorBody};
use super::view::DevicesBody;

#[derive(Debug)]
pub struct FlowRejection(pub Error);
impl warp::reject::Reject for FlowRejection {}

#[derive(Debug)]
pub struct BadRequest(pub String);
impl warp::reject::Reject for BadRequest {}

/// Body of `POST /flow/{id}/answer`. A missing or null value clears the answer.
///
/// Yes/no questions take a JSON bool, choice questions take the choice id as a string.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
  pub field: String,
  #[serde(default)]
  pub value: Option<Value>,
}

fn flow_reply(id: SessionId, session: &cgmflow::Session) -> warp::reply::Json {
  warp::reply::json(&FlowView::new(id, session))
}

#[instrument(skip(state))]
pub async fn devices_handler(query: HashMap<String, String>, state: AppState) -> Result<impl Reply, Infallible> {
  let patient_id = query.get("patientId")
    .filter(|id| !id.is_empty())
    .cloned()
    .unwrap_or_else(|| state.default_patient_id().to_owned());

  match state.devices().eligible_devices(&patient_id).await {
    Ok(devices) => {
      let body = DevicesBody { success: true, count: devices.len(), data: devices, patient_id };
      Ok(warp::reply::with_status(warp::reply::json(&body), StatusCode::OK))
    }
    Err(err) => {
      event!(Level::ERROR, %patient_id, error = %err, "cannot fetch eligible devices");
      let status = err.status_code()
        .and_then(|status| StatusCode::from_u16(status).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
      let body = ErrorBody::new(err.to_string(), err.code());
      Ok(warp::reply::with_status(warp::reply::json(&body), status))
    }
  }
}

#[instrument(skip(state))]
pub async fn new_flow_handler(state: AppState) -> Result<impl Reply, Rejection> {
  let id = SessionId::new_v4();
  let session = state.open_session(id);
  event!(Level::INFO, session = %id, "new flow");
  Ok(warp::reply::with_status(flow_reply(id, &session), StatusCode::CREATED))
}

#[instrument(skip(state))]
pub async fn get_flow_handler(id: SessionId, state: AppState) -> Result<impl Reply, Rejection> {
  let session = state.open_session(id);
  Ok(flow_reply(id, &session))
}

#[instrument(skip(state))]
pub async fn answer_handler(id: SessionId, request: AnswerRequest, state: AppState) -> Result<impl Reply, Rejection> {
  let field = request.field.parse::<AnswerField>()
    .map_err(|_e| warp::reject::custom(BadRequest(format!("unknown field '{}'", request.field))))?;

  let mut session = state.open_session(id);
  let is_bool = field.kind() == AnswerKind::Bool;
  let answered = match request.value {
    None | Some(Value::Null) => {
      session.clear_answer(field);
      Ok(())
    }
    Some(Value::Bool(b)) if is_bool => session.answer(field, b.into()),
    Some(Value::String(s)) if !is_bool => session.answer_str(field, &s),
    Some(other) => {
      return Err(warp::reject::custom(BadRequest(format!("'{}' is not a valid answer for '{}'", other, field))));
    }
  };
  answered.map_err(|err| warp::reject::custom(FlowRejection(err)))?;
  Ok(flow_reply(id, &session))
}

#[instrument(skip(state))]
pub async fn next_handler(id: SessionId, state: AppState) -> Result<impl Reply, Rejection> {
  let mut session = state.open_session(id);
  let view = match session.next() {
    NextOutcome::Completed(_) => {
      // submitted flows are not resumable
      session.discard_saved();
      FlowView::new(id, &session).completed()
    }
    NextOutcome::Moved(_) |
    NextOutcome::Invalid(_) |
    NextOutcome::DeadEnd => FlowView::new(id, &session),
  };
  Ok(warp::reply::json(&view))
}

#[instrument(skip(state))]
pub async fn back_handler(id: SessionId, state: AppState) -> Result<impl Reply, Rejection> {
  let mut session = state.open_session(id);
  session.back();
  Ok(flow_reply(id, &session))
}

#[instrument(skip(state))]
pub async fn return_to_summary_handler(id: SessionId, state: AppState) -> Result<impl Reply, Rejection> {
  let mut session = state.open_session(id);
  match session.return_to_summary() {
    // the error is part of the view
    Ok(()) | Err(Error::Invalid(_)) => Ok(flow_reply(id, &session)),
    Err(err) => Err(warp::reject::custom(FlowRejection(err))),
  }
}

#[instrument(skip(state))]
pub async fn edit_handler(id: SessionId, step: StepId, state: AppState) -> Result<impl Reply, Rejection> {
  let mut session = state.open_session(id);
  session.edit_step(step).map_err(|err| warp::reject::custom(FlowRejection(err)))?;
  Ok(flow_reply(id, &session))
}

#[instrument(skip(state))]
pub async fn start_over_handler(id: SessionId, state: AppState) -> Result<impl Reply, Rejection> {
  let mut session = state.open_session(id);
  session.start_over();
  Ok(flow_reply(id, &session))
}
