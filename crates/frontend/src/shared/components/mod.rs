pub mod pagination_controls;
pub mod selection_banner;
pub mod table;
pub mod ui;

pub use pagination_controls::PaginationControls;
pub use selection_banner::SelectionBanner;
