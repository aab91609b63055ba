//! SMTP notifier.
//!
//! One outbound message per run: plain-text body plus the PDF report as
//! a generically-typed attachment, over an authenticated STARTTLS
//! session to Gmail.

use crate::config::Config;
use crate::error::{Result, SimError};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fs;
use std::path::Path;

/// Fixed mail relay.
pub const SMTP_HOST: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 587;

const BODY_TEXT: &str = "Se adjunta el reporte de movilidad actualizado.";

/// Authenticated mailer bound to the configured sender account.
#[derive(Debug)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
}

impl Mailer {
    /// Build the transport. Missing credentials surface here, at the
    /// mail stage, not at startup.
    pub fn new(config: &Config) -> Result<Self> {
        let sender = config.sender_email()?.to_string();
        let password = config.sender_password()?.to_string();
        let creds = Credentials::new(sender.clone(), password);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(SMTP_HOST)
            .map_err(|e| SimError::Mail(format!("SMTP relay error: {e}")))?
            .port(SMTP_PORT)
            .credentials(creds)
            .build();

        Ok(Self { transport, sender })
    }

    /// Send the report PDF to `destination`.
    pub async fn send_report(&self, destination: &str, city: &str, pdf_path: &Path) -> Result<()> {
        let email = self.build_message(destination, city, pdf_path)?;
        tracing::debug!(%destination, "sending report mail");
        self.transport
            .send(email)
            .await
            .map_err(|e| SimError::Mail(format!("Failed to send email: {e}")))?;
        Ok(())
    }

    fn build_message(&self, destination: &str, city: &str, pdf_path: &Path) -> Result<Message> {
        let payload = fs::read(pdf_path)?;
        let content_type = ContentType::parse("application/octet-stream")
            .unwrap_or_else(|_| ContentType::TEXT_PLAIN);

        let body = SinglePart::builder()
            .header(ContentType::TEXT_PLAIN)
            .body(BODY_TEXT.to_string());
        let attachment =
            Attachment::new(format!("Reporte_{city}.pdf")).body(payload, content_type);

        Message::builder()
            .from(
                self.sender
                    .parse()
                    .map_err(|e| SimError::Mail(format!("Invalid from address: {e}")))?,
            )
            .to(destination
                .parse()
                .map_err(|e| SimError::Mail(format!("Invalid to address: {e}")))?)
            .subject(format!("ALERTA SIM: {city}"))
            .multipart(MultiPart::mixed().singlepart(body).singlepart(attachment))
            .map_err(|e| SimError::Mail(format!("Failed to build email: {e}")))
    }
}
