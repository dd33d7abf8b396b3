pub mod batch;
pub mod categories;
pub mod check_config;
pub mod value;
