//! Data for CgmFlow
//!
//! [`Answers`] is the accumulated response record of a flow. Each of its seven slots is tri-state:
//! unanswered (`None`) or one answered value. The [`catalog`] holds the static device and
//! time-range reference data the questions choose from.

mod error;
pub use error::InvalidValue;

mod choice_id;
pub use choice_id::{ DeviceId, TimeRangeId };

mod answers;
pub use answers::{ Answers, AnswerField, AnswerKind, AnswerValue };

pub mod catalog;
pub use catalog::Device;
