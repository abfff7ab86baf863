//! navclass - attribute and class overrides for rendered navigation menus
//!
//! Re-exports the merge core and adds layered configuration, input loading
//! and logging setup for embedding applications and the `navclass` binary.

pub mod config;
pub mod input;
pub mod logging;

pub use config::{ConfigError, EffectiveConfig};
pub use navclass_core::{
    merge_attributes, AttributeMerger, Attributes, ElementKind, MergeError, NodePosition,
    OptionsBag, OverrideKeys, RecordOptions, Replacement, UnescapeRules,
};
