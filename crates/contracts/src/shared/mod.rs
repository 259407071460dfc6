pub mod batch;
pub mod pagination;
