pub mod exchangerate_api;
pub mod frankfurter;
