// LogSniff - core/mod.rs
//
// Core logic: classification rules, the directory walk, result model, export.
// Dependencies: util, and platform::fs for the classifier's file reads.
// Must NOT depend on: app or platform::config.

pub mod classifier;
pub mod discovery;
pub mod export;
pub mod model;
