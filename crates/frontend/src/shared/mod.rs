pub mod api_utils;
pub mod components;
pub mod config;
pub mod data_source;
pub mod date_utils;
pub mod http;
pub mod icons;
pub mod number_format;
pub mod page_frame;
pub mod page_standard;
pub mod selection;
pub mod token_storage;
pub mod validate;
