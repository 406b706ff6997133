use cgmflow_base::IdError;
use cgmflow_data::InvalidValue;
use cgmflow_step::{StepId, ValidationError};

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
  // ID errors
  StepId(IdError<StepId>),

  // data errors
  InvalidValue(InvalidValue),

  // navigation errors
  Invalid(ValidationError),
  NotEditing,
  NotOnSummary(StepId),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::StepId(err) => write!(f, "{}", err),
      Error::InvalidValue(err) => write!(f, "invalid answer: {}", err),
      Error::Invalid(err) => write!(f, "{}", err),
      Error::NotEditing => write!(f, "not editing from the summary"),
      Error::NotOnSummary(step) => write!(f, "can only edit from the summary, currently on '{}'", step),
    }
  }
}

impl From<InvalidValue> for Error {
  fn from(err: InvalidValue) -> Self {
    Error::InvalidValue(err)
  }
}

impl From<IdError<StepId>> for Error {
  fn from(err: IdError<StepId>) -> Self {
    Error::StepId(err)
  }
}

impl From<ValidationError> for Error {
  fn from(err: ValidationError) -> Self {
    Error::Invalid(err)
  }
}
