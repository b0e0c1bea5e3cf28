//! Inbound adapters: the action handlers and their invocation plumbing.

pub mod actions;
pub mod invocation;
