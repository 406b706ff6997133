use std::sync::Arc;
use tracing::{event, Level};
use cgmflow_base::{KeyValueStore, IdError};
use cgmflow_data::{Answers, AnswerField, AnswerValue};
use cgmflow_step::{StepId, StepImage, ValidationError, engine};
use super::{Error, Snapshot, CompletionSink, NoopSink};

/// Key the snapshot is written under in the store handed to the [`Session`]
pub const STORAGE_KEY: &str = "cgm-flow-state";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EditMode {
  Normal,
  /// Came from the summary to change one answer
  Editing,
}

/// What happened on [`Session::next`]
#[derive(Debug, PartialEq, Clone)]
pub enum NextOutcome {
  /// Moved to the step
  Moved(StepId),
  /// Stayed put, the error is now the session's current error
  Invalid(ValidationError),
  /// Finished from the summary. The answers were also handed to the completion sink.
  Completed(Answers),
  /// No way forward from here (`ineligible-selection`)
  DeadEnd,
}

/// One run through the flow.
///
/// Sessions mediate between user actions and the [`engine`]. Every change is written to the store
/// as a [`Snapshot`] so the session can be picked up again with [`Session::restore`]. The store is
/// scoped to this one flow (i.e. wrap a shared store in a [`PrefixedStore`](cgmflow_base::PrefixedStore)).
///
/// # Examples
/// ```
/// # use std::sync::Arc;
/// # use cgmflow_base::MemoryStore;
/// # use cgmflow_data::AnswerField;
/// # use cgmflow_step::StepId;
/// # use cgmflow_session::{Session, NextOutcome};
/// let store = Arc::new(MemoryStore::new());
/// let mut session = Session::new(store.clone());
///
/// session.answer(AnswerField::CurrentlyUsingCgm, false.into()).unwrap();
/// assert_eq!(session.next(), NextOutcome::Moved(StepId::DeviceSelection));
///
/// // pick up where we left off
/// let session = Session::restore(store);
/// assert_eq!(session.current_step(), StepId::DeviceSelection);
/// ```
#[derive(Debug)]
pub struct Session {
  store: Arc<dyn KeyValueStore>,
  sink: Box<dyn CompletionSink>,

  current_step: StepId,
  answers: Answers,
  history: Vec<StepId>,
  mode: EditMode,
  error: Option<ValidationError>,
}

impl Session {
  /// Start a fresh session on the first step. Nothing is written until the first change.
  pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
    Session {
      store,
      sink: Box::new(NoopSink),
      current_step: StepId::FIRST,
      answers: Answers::new(),
      history: vec![StepId::FIRST],
      mode: EditMode::Normal,
      error: None,
    }
  }

  /// Pick up the session saved in `store`.
  ///
  /// Anything unusable in the store gives a fresh session instead of an error.
  pub fn restore(store: Arc<dyn KeyValueStore>) -> Self {
    let json = match store.get(STORAGE_KEY) {
      Ok(Some(json)) => json,
      Ok(None) => return Self::new(store),
      Err(err) => {
        event!(Level::WARN, error = %err, "cannot read saved flow, starting fresh");
        return Self::new(store);
      }
    };

    match Snapshot::from_json(&json) {
      Ok(snapshot) => {
        event!(Level::DEBUG, step = %snapshot.current_step, "restored flow");
        Self::from_snapshot(store, snapshot)
      }
      Err(err) => {
        event!(Level::WARN, error = %err, "discarding saved flow, starting fresh");
        Self::new(store)
      }
    }
  }

  fn from_snapshot(store: Arc<dyn KeyValueStore>, snapshot: Snapshot) -> Self {
    // edits always end on the summary, so a flag saved there is stale
    let editing = snapshot.return_to_summary && snapshot.current_step != StepId::Summary;
    let mode = if editing { EditMode::Editing } else { EditMode::Normal };
    Session {
      current_step: snapshot.current_step,
      answers: snapshot.answers,
      history: snapshot.step_history,
      mode,
      ..Self::new(store)
    }
  }

  /// Hand completed flows to `sink` instead of dropping them
  pub fn set_completion_sink(&mut self, sink: Box<dyn CompletionSink>) {
    self.sink = sink;
  }

  pub fn snapshot(&self) -> Snapshot {
    Snapshot {
      current_step: self.current_step,
      answers: self.answers.clone(),
      step_history: self.history.clone(),
      return_to_summary: self.is_editing(),
    }
  }

  pub fn current_step(&self) -> StepId {
    self.current_step
  }

  pub fn answers(&self) -> &Answers {
    &self.answers
  }

  /// Steps travelled so far, ending with the current step
  pub fn history(&self) -> &[StepId] {
    &self.history
  }

  pub fn mode(&self) -> EditMode {
    self.mode
  }

  pub fn is_editing(&self) -> bool {
    self.mode == EditMode::Editing
  }

  /// The error from the last failed move, cleared by the next answer or move
  pub fn current_error(&self) -> Option<&ValidationError> {
    self.error.as_ref()
  }

  /// 1-based position along the path travelled
  pub fn step_number(&self) -> usize {
    self.history.len()
  }

  pub fn can_go_back(&self) -> bool {
    engine::previous_step(self.current_step, &self.history).is_some()
  }

  pub fn can_go_next(&self) -> bool {
    self.current_step != StepId::IneligibleSelection
      && engine::validation_error(self.current_step, &self.answers).is_none()
  }

  pub fn title(&self) -> &'static str {
    cgmflow_step::step_title(self.current_step)
  }

  pub fn question(&self) -> &'static str {
    cgmflow_step::step_question(self.current_step)
  }

  pub fn image(&self) -> StepImage {
    cgmflow_step::step_image(self.current_step)
  }

  /// Record an answer. The step does not change.
  pub fn answer(&mut self, field: AnswerField, value: AnswerValue) -> Result<(), Error> {
    self.answers.set(field, value)?;
    event!(Level::DEBUG, %field, "answered");
    self.error = None;
    self.persist();
    Ok(())
  }

  /// Record an answer given as raw text (i.e. from a form)
  pub fn answer_str(&mut self, field: AnswerField, value: &str) -> Result<(), Error> {
    let value = field.parse_value(value)?;
    self.answer(field, value)
  }

  pub fn clear_answer(&mut self, field: AnswerField) {
    self.answers.clear(field);
    event!(Level::DEBUG, %field, "cleared answer");
    self.error = None;
    self.persist();
  }

  /// Move forward as the answers direct, or finish the flow when on the summary
  pub fn next(&mut self) -> NextOutcome {
    if self.current_step == StepId::Summary {
      self.error = None;
      event!(Level::INFO, "flow completed");
      self.sink.flow_completed(&self.answers);
      return NextOutcome::Completed(self.answers.clone());
    }

    if let Some(err) = engine::validation_error(self.current_step, &self.answers) {
      event!(Level::DEBUG, step = %self.current_step, error = %err, "cannot move on");
      self.error = Some(err.clone());
      return NextOutcome::Invalid(err);
    }

    match engine::next_step(self.current_step, &self.answers) {
      Some(next) => {
        self.go_to(next);
        NextOutcome::Moved(next)
      }
      None => NextOutcome::DeadEnd,
    }
  }

  /// Go back along the path travelled. `None` when already on the first step of the path.
  pub fn back(&mut self) -> Option<StepId> {
    let prev = engine::previous_step(self.current_step, &self.history)?;
    self.history.pop();
    self.current_step = prev;
    self.error = None;
    if prev == StepId::Summary {
      self.mode = EditMode::Normal;
    }
    event!(Level::DEBUG, step = %prev, "went back");
    self.persist();
    Some(prev)
  }

  /// Go straight back to the summary after an edit.
  ///
  /// Fails when not editing, or when the answers as a whole no longer lead to the summary.
  pub fn return_to_summary(&mut self) -> Result<(), Error> {
    if !self.is_editing() {
      return Err(Error::NotEditing);
    }
    if let Some(err) = engine::return_to_summary_error(self.current_step, &self.answers) {
      event!(Level::DEBUG, step = %self.current_step, error = %err, "cannot return to summary");
      self.error = Some(err.clone());
      return Err(Error::Invalid(err));
    }
    self.go_to(StepId::Summary);
    Ok(())
  }

  /// Leave the summary to change the answer of `target`
  pub fn edit_step(&mut self, target: StepId) -> Result<(), Error> {
    if self.current_step != StepId::Summary {
      return Err(Error::NotOnSummary(self.current_step));
    }
    if !target.is_question() {
      return Err(Error::StepId(IdError::IdUnexpected(target)));
    }
    self.history.push(target);
    self.current_step = target;
    self.mode = EditMode::Editing;
    self.error = None;
    event!(Level::DEBUG, step = %target, "editing");
    self.persist();
    Ok(())
  }

  /// Forget everything and go back to the first step
  pub fn start_over(&mut self) {
    self.current_step = StepId::FIRST;
    self.answers = Answers::new();
    self.history = vec![StepId::FIRST];
    self.mode = EditMode::Normal;
    self.error = None;
    event!(Level::INFO, "starting over");
    self.discard_saved();
  }

  /// Remove the saved snapshot but keep the flow in memory, i.e. once it has been submitted
  pub fn discard_saved(&self) {
    if let Err(err) = self.store.delete(STORAGE_KEY) {
      event!(Level::WARN, error = %err, "cannot clear saved flow");
    }
  }

  /// Same as [`Session::start_over`]
  pub fn logo_click(&mut self) {
    self.start_over()
  }

  fn go_to(&mut self, step: StepId) {
    self.history.push(step);
    self.current_step = step;
    self.error = None;
    if step == StepId::Summary {
      self.mode = EditMode::Normal;
    }
    event!(Level::DEBUG, %step, "moved");
    self.persist();
  }

  // failing to save never fails the user's action
  fn persist(&self) {
    let result = self.snapshot().to_json()
      .map_err(|e| e.to_string())
      .and_then(|json| self.store.set(STORAGE_KEY, json).map_err(|e| e.to_string()));
    if let Err(err) = result {
      event!(Level::WARN, error = %err, "cannot save flow");
    }
  }
}
