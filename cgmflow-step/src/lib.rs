//! Steps for CgmFlow
//!
//! A flow is a fixed set of [`StepId`]s. The [`engine`] decides, from the current step and the
//! [`Answers`](cgmflow_data::Answers) so far, where the flow goes next and whether it may go there.
//! Everything in this crate is a pure function of its inputs.

mod step;
pub use step::StepId;

mod validation;
pub use validation::ValidationError;

pub mod engine;

mod text;
pub use text::{ step_title, step_question, step_image, step_title_by_name, step_question_by_name, StepImage };

mod summary;
pub use summary::{ summary_rows, SummaryRow };
