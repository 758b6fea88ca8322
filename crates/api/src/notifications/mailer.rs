//! Optional SMTP notification for new contact submissions.
//!
//! Delivery failures are logged, never propagated: mail is a courtesy, not
//! part of the submission contract.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use atelier_core::types::DbId;

use crate::config::SmtpConfig;

/// Sends a short notice to the agency inbox when a submission arrives.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    notify_to: Mailbox,
}

/// Error building the mailer from configuration.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

impl Mailer {
    /// Build the mailer from SMTP configuration.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailerError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.relay)?;
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from.parse()?,
            notify_to: config.notify_to.parse()?,
        })
    }

    /// Send the new-submission notice. Logs and swallows failures.
    pub async fn notify_new_submission(&self, id: DbId, name: &str, email: &str) {
        let body = format!(
            "New contact submission #{id}\n\nFrom: {name} <{email}>\n\n\
             Open the admin inbox to read and triage it."
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(self.notify_to.clone())
            .subject(format!("New contact submission #{id}"))
            .body(body);

        let message = match message {
            Ok(m) => m,
            Err(e) => {
                tracing::error!(error = %e, submission_id = id, "Failed to build notification mail");
                return;
            }
        };

        if let Err(e) = self.transport.send(message).await {
            tracing::error!(error = %e, submission_id = id, "Failed to send notification mail");
        } else {
            tracing::debug!(submission_id = id, "Notification mail sent");
        }
    }
}
