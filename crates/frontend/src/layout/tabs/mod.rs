//! Tab management
//!
//! - `page` - TabPage wrapper around tab content
//! - `registry` - tab key to view mapping
//! - `tab_bar` - tab strip and content area
//! - `tab_labels` - tab titles

pub mod page;
pub mod registry;
pub mod tab_bar;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_bar::Tabs;
pub use tab_labels::tab_label_for_key;
