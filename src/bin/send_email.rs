//! `send-email` action entry point: one transactional notification.

use std::io;

use clap::Parser;
use serde::Deserialize;
use tokio::runtime::Builder;

use clowder::domain::DeliveryStatus;
use clowder::inbound::actions::notify;
use clowder::inbound::actions::params::{MailCredentials, NotifyParams};
use clowder::inbound::invocation::{decode_params, emit, init_tracing, read_payload};
use clowder::outbound::sendgrid::SendGridMailer;

/// `send-email` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "send-email",
    about = "Send a creation notification to one recipient",
    version
)]
struct CliArgs {
    /// Invocation parameters as one JSON object. Read from stdin when
    /// omitted.
    #[arg(long = "params", value_name = "json")]
    params: Option<String>,
}

/// Full invocation payload: credentials plus operation parameters.
#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(flatten)]
    credentials: MailCredentials,
    #[serde(flatten)]
    params: NotifyParams,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    init_tracing();
    let raw = read_payload(args.params)?;
    let status = run(&raw).await;
    emit(&status)
}

async fn run(raw: &str) -> DeliveryStatus {
    let payload = match decode_params::<Payload>(raw) {
        Ok(payload) => payload,
        Err(error) => return DeliveryStatus::failed(error.message()),
    };
    let mailer = match SendGridMailer::new(payload.credentials.mail_api_key.as_str()) {
        Ok(mailer) => mailer,
        Err(error) => {
            return DeliveryStatus::failed(format!("failed to construct mail client: {error}"));
        }
    };
    notify(&mailer, payload.params).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn an_undecodable_payload_still_yields_a_delivery_status() {
        let status = run("{not json").await;
        assert!(!status.is_ok());
        assert!(status.status().starts_with("invalid invocation parameters"));
    }
}
