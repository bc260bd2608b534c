// LogSniff - app/mod.rs
//
// Application layer: orchestration of configuration and the core scan.
// Dependencies: core, platform::config.

pub mod scan;
