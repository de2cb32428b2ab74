//! Email message types and builder.

use printorder_core::order::DeliveryError;

/// The body content of an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    /// Plain text only.
    Text(String),
    /// HTML only.
    Html(String),
    /// Both plain text and HTML (multipart/alternative).
    Multipart { text: String, html: String },
}

/// A file attached to an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// A complete email message ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Sender display name.
    pub from_name: Option<String>,
    /// Sender address.
    pub from: String,
    /// Primary recipients.
    pub to: Vec<String>,
    /// Optional reply-to address.
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: EmailBody,
    pub attachments: Vec<Attachment>,
}

impl Email {
    /// Create a new email builder.
    pub fn builder() -> EmailBuilder {
        EmailBuilder::default()
    }
}

/// Builder for constructing [`Email`] instances.
#[derive(Debug, Default)]
pub struct EmailBuilder {
    from_name: Option<String>,
    from: Option<String>,
    to: Vec<String>,
    reply_to: Option<String>,
    subject: Option<String>,
    text: Option<String>,
    html: Option<String>,
    attachments: Vec<Attachment>,
}

impl EmailBuilder {
    /// Set the sender address (required) and display name.
    pub fn from(mut self, name: Option<String>, address: impl Into<String>) -> Self {
        self.from_name = name;
        self.from = Some(address.into());
        self
    }

    /// Add a primary recipient.
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Set the reply-to address.
    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set plain text body content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set HTML body content.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Attach a file.
    pub fn attach(
        mut self,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        self.attachments.push(Attachment {
            filename: filename.into(),
            content_type: content_type.into(),
            content,
        });
        self
    }

    /// Build the email, validating required fields.
    pub fn build(self) -> Result<Email, DeliveryError> {
        if self.to.is_empty() {
            return Err(DeliveryError::Compose(
                "at least one recipient required".into(),
            ));
        }

        let from = self
            .from
            .ok_or_else(|| DeliveryError::Compose("from address required".into()))?;

        let subject = self
            .subject
            .ok_or_else(|| DeliveryError::Compose("subject required".into()))?;

        let body = match (self.text, self.html) {
            (Some(text), Some(html)) => EmailBody::Multipart { text, html },
            (Some(text), None) => EmailBody::Text(text),
            (None, Some(html)) => EmailBody::Html(html),
            (None, None) => {
                return Err(DeliveryError::Compose(
                    "body required (text or html)".into(),
                ))
            }
        };

        Ok(Email {
            from_name: self.from_name,
            from,
            to: self.to,
            reply_to: self.reply_to,
            subject,
            body,
            attachments: self.attachments,
        })
    }
}
