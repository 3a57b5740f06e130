//! Notification dispatch using lettre.
//!
//! The dispatcher turns a validated [`InquiryRecord`] into one outbound email
//! and reports the outcome. Exactly one send attempt is made per call; retry,
//! if ever wanted, belongs to the caller.

use std::sync::Arc;

use anyhow::Context;
use askama::Template;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, Message, SmtpTransport, Transport};
use thiserror::Error;
use tracing::{error, info};

use crate::config::SmtpConfig;
use crate::inquiry::InquiryRecord;

/// The transport refused or failed to deliver; carries the transport's
/// diagnostic text verbatim.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct DispatchError(pub String);

/// Outbound mail capability.
///
/// The dispatcher only ever talks to this trait, so tests can substitute an
/// in-memory transport for the SMTP relay.
pub trait MailTransport: Send + Sync {
    fn send(&self, message: &Message) -> Result<(), DispatchError>;
}

/// SMTP-backed transport. Relay with STARTTLS when `tls` is set, direct
/// unencrypted connection otherwise (local MailDev-style development).
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let mut builder = if config.tls {
            SmtpTransport::relay(&config.host)
                .context("failed to create SMTP transport")?
                .port(config.port)
        } else {
            info!(
                host = %config.host,
                port = config.port,
                "SMTP encryption disabled, using direct connection"
            );
            SmtpTransport::builder_dangerous(&config.host).port(config.port)
        };

        if !config.username.is_empty() && !config.password.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        builder = builder.timeout(Some(std::time::Duration::from_secs(config.timeout_seconds)));

        Ok(Self {
            transport: builder.build(),
        })
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, message: &Message) -> Result<(), DispatchError> {
        self.transport
            .send(message)
            .map(|_| ())
            .map_err(|e| DispatchError(e.to_string()))
    }
}

#[derive(Template)]
#[template(path = "emails/inquiry.html")]
struct InquiryEmailTemplate<'a> {
    record: &'a InquiryRecord,
}

/// Composes inquiry notifications and hands them to the mail transport.
///
/// Sender and recipient come from static configuration; the reply-to header
/// is set to the inquirer so replies route straight back to them.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn MailTransport>,
    from: Mailbox,
    to: Mailbox,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn MailTransport>, config: &SmtpConfig) -> anyhow::Result<Self> {
        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_email)
            .parse()
            .context("failed to parse sender address")?;
        let to: Mailbox = config
            .to_email
            .parse()
            .context("failed to parse recipient address")?;

        Ok(Self {
            transport,
            from,
            to,
        })
    }

    /// Send the notification for an already-validated record.
    ///
    /// One send attempt, no internal retry. A failure is terminal for this
    /// submission only; the caller surfaces the diagnostic to the user.
    pub fn dispatch(&self, record: &InquiryRecord) -> Result<(), DispatchError> {
        let message = self.compose(record)?;

        match self.transport.send(&message) {
            Ok(()) => {
                info!(name = %record.name, "inquiry notification sent");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, name = %record.name, "failed to send inquiry notification");
                Err(e)
            }
        }
    }

    fn compose(&self, record: &InquiryRecord) -> Result<Message, DispatchError> {
        let html_body = InquiryEmailTemplate { record }
            .render()
            .map_err(|e| DispatchError(format!("failed to render notification body: {e}")))?;

        let reply_to_address: Address = record
            .email
            .parse()
            .map_err(|e| DispatchError(format!("invalid reply-to address: {e}")))?;
        let reply_to = Mailbox::new(Some(record.name.clone()), reply_to_address);

        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .reply_to(reply_to)
            .subject(format!("New Wedding Inquiry from {}", record.name))
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| DispatchError(format!("failed to build notification: {e}")))
    }
}
