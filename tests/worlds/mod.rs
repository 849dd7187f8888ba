//! Cucumber world types for the acceptance suite.
//!
//! Two worlds cover the two scenario families: `ApiWorld` drives the
//! countries API over HTTP and `UiWorld` drives the sports site through the
//! shared browser. Both wrap a fresh [`pitwall::ScenarioContext`], so every
//! scenario starts from default configuration with no state carried over.

pub mod ui;

pub use api::ApiWorld;
pub use ui::UiWorld;
