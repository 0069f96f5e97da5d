pub mod app_runner;
pub mod widgets;
