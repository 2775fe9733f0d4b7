pub mod convert;
pub mod history;
pub mod ui;
