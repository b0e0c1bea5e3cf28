//! Send-email action.

use chrono::Utc;
use tracing::{error, info};

use crate::domain::DeliveryStatus;
use crate::domain::ports::Mailer;

use super::params::{NotifyParams, NotifyRequest};

/// Send one transactional notification to the given recipient.
///
/// Fire-and-forget: the result only records whether the delivery API
/// accepted the message. Every outcome, including invalid parameters,
/// becomes a [`DeliveryStatus`]; this path never raises.
pub async fn notify(mailer: &impl Mailer, params: NotifyParams) -> DeliveryStatus {
    let request = match NotifyRequest::try_from(params) {
        Ok(request) => request,
        Err(rejection) => return DeliveryStatus::failed(rejection.message()),
    };
    let email = request.template.render(request.to.clone(), Utc::now());
    match mailer.send(&email).await {
        Ok(()) => {
            info!(to = %request.to, "notification accepted");
            DeliveryStatus::ok()
        }
        Err(failure) => {
            error!(to = %request.to, error = %failure, "notification failed");
            DeliveryStatus::failed(failure.to_string())
        }
    }
}
