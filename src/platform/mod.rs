// LogSniff - platform/mod.rs
//
// Platform abstraction layer: config file location and loading, and the
// filesystem access used by the classifier.
// Dependencies: util, directories crate; config also names core's
// ClassifierConfig so the [classifier] section maps onto it directly.

pub mod config;
pub mod fs;
