//! Presentation helpers shared by every list view.

pub mod pagination;
pub mod table;

pub use pagination::{PageWindow, Pager};
pub use table::{Column, Table};
