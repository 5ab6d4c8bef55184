use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::config::EmailAddress;

const SUBJECT_PREFIX: &str = "[Portfolio]";

/// SMTP settings for the contact form. The user must be an email address
/// since it doubles as the `From` header of outgoing mail.
///
/// Missing fields deserialize to their empty values; an incomplete
/// section only disables the contact form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub user: Option<EmailAddress>,
    pub pass: String,
    pub host: String,
    pub port: u16,
}

impl SmtpConfig {
    /// Every field must carry a value for the mailing service to work.
    pub fn is_complete(&self) -> bool {
        self.user.is_some() && !self.pass.is_empty() && !self.host.is_empty() && self.port != 0
    }
}

#[derive(Error, Debug)]
pub enum BuildMailerError {
    #[error("smtp user is not configured")]
    MissingUser,

    #[error("failed to set up smtp transport: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[derive(Error, Debug)]
pub enum SendMailError {
    #[error("failed to build email: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("failed to send email: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Sends contact-form submissions to the profile address via the
/// configured SMTP relay.
#[derive(Clone)]
pub struct Mailer {
    transport: SmtpTransport,
    from: EmailAddress,
    to: EmailAddress,
}

impl Mailer {
    pub fn new(smtp: &SmtpConfig, recipient: EmailAddress) -> Result<Self, BuildMailerError> {
        let user = smtp.user.clone().ok_or(BuildMailerError::MissingUser)?;

        let transport = SmtpTransport::starttls_relay(&smtp.host)?
            .port(smtp.port)
            .credentials(Credentials::new(
                user.as_str().to_string(),
                smtp.pass.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: user,
            to: recipient,
        })
    }

    /// Sends a plain-text contact message. Replies go to the submitted
    /// address, not the SMTP user.
    pub fn send_contact(
        &self,
        reply_to: &EmailAddress,
        sender_name: &str,
        message: &str,
    ) -> Result<(), SendMailError> {
        let email = Message::builder()
            .to(Mailbox::new(None, self.to.0.clone()))
            .from(Mailbox::new(
                Some(format!("{SUBJECT_PREFIX}: {sender_name}")),
                self.from.0.clone(),
            ))
            .reply_to(Mailbox::new(None, reply_to.0.clone()))
            .subject(format!("{SUBJECT_PREFIX} New message from {sender_name}"))
            .header(ContentType::TEXT_PLAIN)
            .body(message.to_string())?;

        self.transport.send(&email)?;

        info!(to = %self.to, "sent contact email");

        Ok(())
    }
}
