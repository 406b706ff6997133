use serde::Serialize;
use cgmflow::Session;
use cgmflow::data::{Answers, Device};
use cgmflow::step::{StepId, StepImage, SummaryRow, summary_rows};
use super::SessionId;

/// Everything a client needs to render the current step
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowView {
  pub id: SessionId,
  pub step: StepId,
  pub title: &'static str,
  pub question: &'static str,
  pub image: StepImage,
  pub answers: Answers,
  pub history: Vec<StepId>,
  pub editing: bool,
  pub can_go_back: bool,
  pub can_go_next: bool,
  pub step_number: usize,
  pub error: Option<String>,
  pub summary: Vec<SummaryRow>,
  pub completed: bool,
}

impl FlowView {
  pub fn new(id: SessionId, session: &Session) -> Self {
    let summary = if session.current_step() == StepId::Summary {
      summary_rows(session.answers())
    } else {
      Vec::new()
    };
    FlowView {
      id,
      step: session.current_step(),
      title: session.title(),
      question: session.question(),
      image: session.image(),
      answers: session.answers().clone(),
      history: session.history().to_vec(),
      editing: session.is_editing(),
      can_go_back: session.can_go_back(),
      can_go_next: session.can_go_next(),
      step_number: session.step_number(),
      error: session.current_error().map(|err| err.message()),
      summary,
      completed: false,
    }
  }

  pub fn completed(mut self) -> Self {
    self.completed = true;
    self
  }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
  pub message: String,
  pub code: String,
}

/// `{"success": false, "error": {...}}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
  pub success: bool,
  pub error: ErrorDetail,
}

impl ErrorBody {
  pub fn new<M: Into<String>, C: Into<String>>(message: M, code: C) -> Self {
    ErrorBody {
      success: false,
      error: ErrorDetail { message: message.into(), code: code.into() },
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicesBody {
  pub success: bool,
  pub data: Vec<Device>,
  pub patient_id: String,
  pub count: usize,
}
