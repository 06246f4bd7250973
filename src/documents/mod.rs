//! Client-side document helpers: advisory totals and the status workflow.
//! The backend recomputes and validates both.

pub mod calculator;
pub mod workflow;

pub use calculator::{format_amount, line_subtotal, DocumentTotals, LineRow};
pub use workflow::{transition_buttons, TransitionButton};
