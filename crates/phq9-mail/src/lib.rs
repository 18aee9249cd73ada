//! SMTP delivery of clinician reports.
//!
//! [`SmtpNotifier`] implements [`phq9_core::notify::Notifier`] over an
//! authenticated mail-submission connection upgraded with STARTTLS. Each
//! notification opens its own connection, sends one message, and closes it.
//! Nothing is retried or queued.

pub mod error;

use std::time::Duration;

use lettre::{
  Address, AsyncSmtpTransport, AsyncTransport as _, Message, Tokio1Executor,
  message::{Mailbox, header::ContentType},
  transport::smtp::authentication::Credentials,
};
use phq9_core::notify::{Notification, Notifier};
use tracing::info;

pub use error::{Error, Result};

/// Connection and addressing settings for [`SmtpNotifier`].
#[derive(Debug, Clone)]
pub struct MailConfig {
  pub host:      String,
  pub port:      u16,
  /// Account used to authenticate; also the `From` address.
  pub username:  String,
  pub password:  String,
  /// The single clinician mailbox every report is sent to.
  pub recipient: String,
  pub timeout:   Duration,
}

impl MailConfig {
  /// Whether both credentials are set. Missing credentials are not an error
  /// until a message is actually sent.
  pub fn has_credentials(&self) -> bool {
    !self.username.is_empty() && !self.password.is_empty()
  }
}

fn mailbox(address: &str) -> Result<Mailbox> {
  let parsed: Address = address.parse().map_err(|source| Error::Address {
    address: address.to_owned(),
    source,
  })?;
  Ok(Mailbox::new(None, parsed))
}

/// Sends each [`Notification`] as one plain-text email.
pub struct SmtpNotifier {
  transport: AsyncSmtpTransport<Tokio1Executor>,
  config:    MailConfig,
}

impl SmtpNotifier {
  /// Build the transport. No connection is made until the first send.
  pub fn new(config: MailConfig) -> Result<Self> {
    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
      .port(config.port)
      .credentials(Credentials::new(
        config.username.clone(),
        config.password.clone(),
      ))
      .timeout(Some(config.timeout))
      .build();
    Ok(Self { transport, config })
  }

  pub fn config(&self) -> &MailConfig { &self.config }

  /// Assemble the outgoing message for `notification`.
  pub fn build_message(&self, notification: &Notification) -> Result<Message> {
    Ok(
      Message::builder()
        .from(mailbox(&self.config.username)?)
        .to(mailbox(&self.config.recipient)?)
        .subject(notification.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(notification.body.clone())?,
    )
  }

  async fn send(&self, notification: &Notification) -> Result<()> {
    let message = self.build_message(notification)?;
    self.transport.send(message).await?;
    info!(
      sequence_number = notification.sequence_number,
      "report delivered to clinician for {}",
      notification.patient_identifier,
    );
    Ok(())
  }
}

impl Notifier for SmtpNotifier {
  type Error = Error;

  async fn notify(&self, notification: &Notification) -> Result<()> {
    self.send(notification).await
  }
}
