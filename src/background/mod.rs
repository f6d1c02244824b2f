//! Deferred work for the widget's single-threaded update loop

pub mod deferred;

pub use deferred::DeferredQueue;
