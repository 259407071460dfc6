//! Cross-page selection for server-paginated tables
//!
//! - `state` - plain selection bookkeeping (explicit mode / all mode)
//! - `hook` - reactive handle used by list pages

pub mod hook;
pub mod state;

pub use hook::{use_keyed_selection, use_selection_across_pages, Keyed, SelectionAcrossPages};
pub use state::{SelectionState, TotalCount};
