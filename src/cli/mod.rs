//! Terminal front end: output helpers and interactive entry forms.

pub mod forms;
pub mod output;
