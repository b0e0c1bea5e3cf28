//! Serverless cat-registry actions.
//!
//! Four independent handlers (fetch, create, update, and email
//! notification), each invoked with a single parameter object and producing
//! a normalized result on every path. Handlers depend on the narrow ports in
//! [`domain::ports`]; the concrete document-store and mail-delivery clients
//! live in [`outbound`].

pub mod domain;
pub mod inbound;
pub mod outbound;
