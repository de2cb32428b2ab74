//! Mailer trait and SMTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment as MailAttachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use printorder_core::order::DeliveryError;

use super::{Attachment, Email, EmailBody};
use crate::config::{Config, TlsMode};

/// Async email sending trait.
///
/// Implement this trait to provide alternative email backends.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send an email. Implementations must not retry.
    async fn send(&self, email: &Email) -> Result<(), DeliveryError>;
}

/// SMTP-based mailer using lettre.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    timeout: Duration,
}

impl SmtpMailer {
    /// Create a mailer from the application configuration.
    ///
    /// No connection is opened until the first send.
    pub fn from_config(config: &Config) -> Result<Self, DeliveryError> {
        let host = config.smtp_host.as_str();
        let mut builder = match config.smtp_tls {
            TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| DeliveryError::Transport(e.to_string()))?,
            TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| DeliveryError::Transport(e.to_string()))?,
        };

        builder = builder
            .port(config.smtp_port)
            .timeout(Some(config.smtp_timeout()));

        if !config.email_pass.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.email_user.clone(),
                config.email_pass.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            timeout: config.smtp_timeout(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<(), DeliveryError> {
        let message = build_message(email)?;

        match tokio::time::timeout(self.timeout, self.transport.send(message)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(DeliveryError::Transport(e.to_string())),
            Err(_) => Err(DeliveryError::Timeout {
                seconds: self.timeout.as_secs(),
            }),
        }
    }
}

fn parse_address(address: &str) -> Result<Address, DeliveryError> {
    address
        .parse()
        .map_err(|_| DeliveryError::InvalidAddress(address.to_string()))
}

/// Build a lettre Message from our Email type.
fn build_message(email: &Email) -> Result<Message, DeliveryError> {
    let from = Mailbox::new(email.from_name.clone(), parse_address(&email.from)?);
    let mut builder = Message::builder().from(from);

    for to in &email.to {
        builder = builder.to(Mailbox::new(None, parse_address(to)?));
    }

    // Reply-to comes from the customer; a malformed one should not block the order.
    if let Some(reply_to) = &email.reply_to {
        match parse_address(reply_to) {
            Ok(address) => builder = builder.reply_to(Mailbox::new(None, address)),
            Err(_) => tracing::warn!(reply_to = %reply_to, "Skipping unparseable reply-to"),
        }
    }

    builder = builder.subject(&email.subject);

    let result = if email.attachments.is_empty() {
        match &email.body {
            EmailBody::Text(text) => builder.singlepart(SinglePart::plain(text.clone())),
            EmailBody::Html(html) => builder.singlepart(SinglePart::html(html.clone())),
            EmailBody::Multipart { text, html } => builder.multipart(
                MultiPart::alternative_plain_html(text.clone(), html.clone()),
            ),
        }
    } else {
        let mut mixed = match &email.body {
            EmailBody::Text(text) => MultiPart::mixed().singlepart(SinglePart::plain(text.clone())),
            EmailBody::Html(html) => MultiPart::mixed().singlepart(SinglePart::html(html.clone())),
            EmailBody::Multipart { text, html } => MultiPart::mixed().multipart(
                MultiPart::alternative_plain_html(text.clone(), html.clone()),
            ),
        };
        for attachment in &email.attachments {
            mixed = mixed.singlepart(attachment_part(attachment)?);
        }
        builder.multipart(mixed)
    };

    result.map_err(|e| DeliveryError::Compose(e.to_string()))
}

fn attachment_part(attachment: &Attachment) -> Result<SinglePart, DeliveryError> {
    let content_type = ContentType::parse(&attachment.content_type)
        .or_else(|_| ContentType::parse("application/octet-stream"))
        .map_err(|e| DeliveryError::Compose(e.to_string()))?;

    Ok(MailAttachment::new(attachment.filename.clone())
        .body(attachment.content.clone(), content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_email() -> Email {
        Email::builder()
            .from(Some("Print Service".to_string()), "shop@example.com")
            .to("owner@example.com")
            .reply_to("asha@example.com")
            .subject("New Document Order")
            .text("Name: Asha")
            .html("<p>Name: Asha</p>")
            .attach("notes.pdf", "application/pdf", b"%PDF-1.7".to_vec())
            .attach("paid.png", "image/png", vec![0x89, 0x50, 0x4E, 0x47])
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_message_with_attachments() {
        let message = build_message(&order_email()).unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(raw.contains("Subject: New Document Order"));
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("notes.pdf"));
        assert!(raw.contains("paid.png"));
        assert!(raw.contains("Reply-To: asha@example.com"));
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let email = Email {
            to: vec!["not an address".to_string()],
            ..order_email()
        };

        assert_eq!(
            build_message(&email).unwrap_err(),
            DeliveryError::InvalidAddress("not an address".to_string())
        );
    }

    #[test]
    fn test_build_message_skips_bad_reply_to() {
        let email = Email {
            reply_to: Some("asha at example".to_string()),
            ..order_email()
        };

        let message = build_message(&email).unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(!raw.contains("Reply-To"));
    }

    #[test]
    fn test_unknown_content_type_falls_back() {
        let attachment = Attachment {
            filename: "blob".to_string(),
            content_type: "not a mime type".to_string(),
            content: vec![1, 2, 3],
        };

        assert!(attachment_part(&attachment).is_ok());
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });
        let config = Config {
            smtp_host: "127.0.0.1".to_string(),
            smtp_port: port,
            smtp_tls: TlsMode::None,
            smtp_timeout_secs: 1,
            ..Config::default()
        };
        let mailer = SmtpMailer::from_config(&config).unwrap();

        let error = mailer.send(&order_email()).await.unwrap_err();

        assert_eq!(error, DeliveryError::Timeout { seconds: 1 });
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_delivery_error() {
        let config = Config {
            smtp_host: "127.0.0.1".to_string(),
            smtp_port: 1,
            smtp_tls: TlsMode::None,
            smtp_timeout_secs: 2,
            ..Config::default()
        };
        let mailer = SmtpMailer::from_config(&config).unwrap();

        let error = mailer.send(&order_email()).await.unwrap_err();

        assert!(matches!(
            error,
            DeliveryError::Transport(_) | DeliveryError::Timeout { .. }
        ));
    }
}
