// Library crate shared by the `kanapop` binary, integration tests and benchmarks.
// The engine is front-end agnostic; `ui::terminal` and `event` make up the bundled
// line-oriented driver.

pub mod config;
pub mod engine;
pub mod event;
pub mod kana;
pub mod session;
pub mod store;
pub mod ui;
pub mod view;
