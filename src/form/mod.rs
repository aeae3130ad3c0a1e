//! Form understanding: what a control is for and what to put in it.
//!
//! - [`heuristics`]: attribute-based role detection
//! - [`answers`]: topic matching and templated answers for free-text questions
//! - [`mapping`]: per-attempt fill bookkeeping with the no-clobber rule

pub mod answers;
pub mod heuristics;
pub mod mapping;

pub use answers::{QuestionTopic, answer_for, topic_of};
pub use heuristics::{FieldRole, detect_role};
pub use mapping::{FieldMapping, FormFill, QuestionPlan};
