//! CgmFlow walks a patient through the questions that decide whether they can get a replacement
//! CGM device, and which one.
//!
//! # Examples
//! ```
//! # use std::sync::Arc;
//! use cgmflow::{Session, NextOutcome};
//! use cgmflow::data::AnswerField;
//! use cgmflow::step::StepId;
//! use cgmflow::store::MemoryStore;
//!
//! let mut session = Session::new(Arc::new(MemoryStore::new()));
//! session.answer_str(AnswerField::CurrentlyUsingCgm, "true").unwrap();
//! assert_eq!(session.next(), NextOutcome::Moved(StepId::CurrentDevice));
//! ```

// include commonly used traits
pub mod prelude {
  pub use cgmflow_base::KeyValueStore;
  pub use cgmflow_session::CompletionSink;
  pub use cgmflow_eligibility::DeviceSource;
}

pub mod store {
  pub use cgmflow_base::{KeyValueStore, MemoryStore, FileStore, PrefixedStore, StoreError};
}

pub mod data {
  pub use cgmflow_data::{Answers, AnswerField, AnswerKind, AnswerValue};
  pub use cgmflow_data::{DeviceId, TimeRangeId, Device};
  pub use cgmflow_data::InvalidValue;
  pub use cgmflow_data::catalog;
}

pub mod step {
  pub use cgmflow_step::{StepId, ValidationError, StepImage, SummaryRow};
  pub use cgmflow_step::{step_title, step_question, step_image, summary_rows};
  pub use cgmflow_step::engine;
}

pub mod eligibility {
  pub use cgmflow_eligibility::{ApiConfig, ApiClient, ApiError};
  pub use cgmflow_eligibility::{PatientService, CatalogSource, DeviceSource};
  pub use cgmflow_eligibility::{init_dotenv, TEST_PATIENT_ID};
  pub use cgmflow_eligibility::api;
}

pub use cgmflow_base::IdError;
pub use cgmflow_session::{Session, Snapshot, EditMode, NextOutcome};
pub use cgmflow_session::{CallbackSink, NoopSink};
pub use cgmflow_session::Error;
