use std::sync::{Arc, Mutex};

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use thiserror::Error;

use crate::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Outbound mail transport. `Log` only traces the message (local dev without
/// SMTP credentials); `Memory` records messages so tests can read the OTP code
/// that would have been delivered.
#[derive(Clone)]
pub enum Mailer {
    Smtp(SmtpMailer),
    Log,
    Memory(Arc<Mutex<Vec<OutgoingMail>>>),
}

impl Mailer {
    pub fn from_config(config: Option<&SmtpConfig>) -> Result<Self, MailError> {
        match config {
            Some(smtp) => Ok(Self::Smtp(SmtpMailer::new(smtp)?)),
            None => {
                tracing::warn!("SMTP not configured, OTP codes will only be logged");
                Ok(Self::Log)
            }
        }
    }

    pub fn in_memory() -> (Self, Arc<Mutex<Vec<OutgoingMail>>>) {
        let outbox = Arc::new(Mutex::new(Vec::new()));
        (Self::Memory(outbox.clone()), outbox)
    }

    pub async fn send_otp_code(&self, to: &str, code: &str) -> Result<(), MailError> {
        let subject = "Your Pet Koi admin verification code";
        let body = format!(
            "Your one-time verification code is {code}.\n\n\
             It expires in 5 minutes. If you did not request it, ignore this email."
        );
        self.send(to, subject, &body).await
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        match self {
            Mailer::Smtp(smtp) => smtp.send(to, subject, body).await,
            Mailer::Log => {
                tracing::info!(to = %to, subject = %subject, body = %body, "mail (log only)");
                Ok(())
            }
            Mailer::Memory(outbox) => {
                let mut outbox = outbox
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                outbox.push(OutgoingMail {
                    to: to.to_string(),
                    subject: subject.to_string(),
                    body: body.to_string(),
                });
                Ok(())
            }
        }
    }
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();
        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| MailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| MailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(message).await?;
        tracing::info!(to = %to, subject = %subject, "email sent");
        Ok(())
    }
}
