//! Visibility toggling for files already inside a directory.
//! The hidden-file convention is a `HideStrategy`; batches go through `set_visibility`.

mod strategy;
mod toggle;

pub use strategy::{
    default_strategy, Change, DotPrefix, FlagStore, HiddenAttribute, HideStrategy, NativeFlag,
};
pub use toggle::{set_visibility, ToggleReport, VisibilityState};

#[cfg(test)]
pub(crate) use strategy::test_support;
