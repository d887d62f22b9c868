//! Utility types for controller request handling.

pub mod caller;
