//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Each port exposes a strongly typed error so adapters map their failures
//! into predictable variants; handlers translate those variants into the
//! outward result shape in exactly one place.

mod macros;
pub(crate) use macros::define_port_error;

mod cat_store;
mod mailer;

#[cfg(test)]
pub use cat_store::MockCatStore;
pub use cat_store::{CatStore, CatStoreError, InMemoryCatStore};
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{FixtureMailer, Mailer, MailerError};
