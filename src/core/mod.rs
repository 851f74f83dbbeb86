pub mod catalog;
pub mod engine;
pub mod ledger;
pub mod mood;
pub mod options;
pub mod render;
pub mod sentiment;
pub mod style;
pub mod template;
