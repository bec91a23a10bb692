pub mod api;
pub mod analysis;
pub mod models;
pub mod report;
pub mod screener;
pub mod utils;
