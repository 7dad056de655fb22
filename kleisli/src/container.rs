//! Reference containers used to exercise the capability contracts and combinators.
pub mod identity;
pub mod sequence;

#[cfg(feature = "deferred")]
pub mod deferred;
