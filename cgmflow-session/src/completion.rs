use cgmflow_data::Answers;

/// Receives the answers once the flow is finished from the summary (i.e. for submission)
pub trait CompletionSink: std::fmt::Debug + Send {
  fn flow_completed(&mut self, answers: &Answers);
}

/// Sink that drops the completion
#[derive(Debug, Default)]
pub struct NoopSink;

impl CompletionSink for NoopSink {
  fn flow_completed(&mut self, _answers: &Answers) {}
}

/// Sink that wraps a closure
pub struct CallbackSink<F> {
  cb: F,
}

impl<F> std::fmt::Debug for CallbackSink<F> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "CallbackSink")
  }
}

impl<F> CallbackSink<F>
    where F: FnMut(&Answers) + Send
{
  pub fn new(cb: F) -> Self {
    CallbackSink { cb }
  }

  pub fn boxed(self) -> Box<dyn CompletionSink>
      where F: 'static
  {
    Box::new(self)
  }
}

impl<F> CompletionSink for CallbackSink<F>
    where F: FnMut(&Answers) + Send
{
  fn flow_completed(&mut self, answers: &Answers) {
    (self.cb)(answers)
  }
}
