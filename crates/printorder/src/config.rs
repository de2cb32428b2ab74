use std::{env, path::PathBuf, str::FromStr, time::Duration};

use printorder_core::{pricing::PricingScheme, upload::UploadRules};

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Implicit TLS (SMTPS, usually port 465).
    Tls,
    /// Plain connection upgraded with STARTTLS (usually port 587).
    StartTls,
    /// Unencrypted. Only for local test servers.
    None,
}

impl TlsMode {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tls" | "ssl" => Some(TlsMode::Tls),
            "starttls" => Some(TlsMode::StartTls),
            "none" | "plain" => Some(TlsMode::None),
            _ => None,
        }
    }
}

/// Application configuration loaded from environment variables.
///
/// Built once in `main` and shared read-only through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Mail account used as sender and SMTP username (default: "orders@localhost")
    pub email_user: String,
    /// SMTP password; empty disables authentication (default: "")
    pub email_pass: String,
    /// Address that receives order notifications (default: `email_user`)
    pub receiver_email: String,
    /// Display name of the sender (default: "Print Service")
    pub sender_name: String,
    /// SMTP server hostname (default: "smtp.gmail.com")
    pub smtp_host: String,
    /// SMTP server port (default: 465)
    pub smtp_port: u16,
    /// SMTP security (default: implicit TLS)
    pub smtp_tls: TlsMode,
    /// Upper bound for a single send, in seconds (default: 30)
    pub smtp_timeout_secs: u64,
    /// Per-file upload limit in MB (default: 10)
    pub max_upload_mb: u64,
    /// Request body limit in MB, must fit both files (default: 25)
    pub max_body_mb: usize,
    /// Whole-request timeout in seconds (default: 60)
    pub request_timeout_secs: u64,
    /// Directory served for static assets (default: "public")
    pub static_dir: PathBuf,
    /// Pricing rule set (default: per-page)
    pub pricing_scheme: PricingScheme,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `EMAIL_USER`, `EMAIL_PASS` - mail account credentials
    /// - `RECEIVER_EMAIL` - notification recipient
    /// - `SENDER_NAME` - sender display name
    /// - `SMTP_HOST`, `SMTP_PORT`, `SMTP_TLS` (`tls`, `starttls`, `none`)
    /// - `SMTP_TIMEOUT_SECS` - mail send timeout
    /// - `MAX_UPLOAD_MB`, `MAX_BODY_MB` - upload limits
    /// - `REQUEST_TIMEOUT_SECS` - request timeout
    /// - `STATIC_DIR` - static asset directory
    /// - `PRICING_SCHEME` - `per-page` or `flat-tier`
    ///
    /// Missing or unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let email_user = var("EMAIL_USER").unwrap_or_else(|| "orders@localhost".to_string());
        let receiver_email = var("RECEIVER_EMAIL").unwrap_or_else(|| email_user.clone());

        let pricing_scheme = match var("PRICING_SCHEME") {
            Some(value) => value.parse().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Falling back to per-page pricing");
                PricingScheme::default()
            }),
            None => PricingScheme::default(),
        };

        Self {
            email_pass: var("EMAIL_PASS").unwrap_or_default(),
            receiver_email,
            email_user,
            sender_name: var("SENDER_NAME").unwrap_or_else(|| "Print Service".to_string()),
            smtp_host: var("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            smtp_port: parsed(var("SMTP_PORT")).unwrap_or(465),
            smtp_tls: var("SMTP_TLS")
                .and_then(|v| TlsMode::from_env_value(&v))
                .unwrap_or(TlsMode::Tls),
            smtp_timeout_secs: parsed(var("SMTP_TIMEOUT_SECS")).unwrap_or(30),
            max_upload_mb: parsed(var("MAX_UPLOAD_MB")).unwrap_or(10),
            max_body_mb: parsed(var("MAX_BODY_MB")).unwrap_or(25),
            request_timeout_secs: parsed(var("REQUEST_TIMEOUT_SECS")).unwrap_or(60),
            static_dir: var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            pricing_scheme,
        }
    }

    /// Get the mail send timeout as a Duration.
    pub fn smtp_timeout(&self) -> Duration {
        Duration::from_secs(self.smtp_timeout_secs)
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Request body limit in bytes.
    ///
    /// Never below two maximum-size files plus 1 MB for the text fields, so an
    /// oversized file trips the per-file check before the body limit.
    pub fn max_body_bytes(&self) -> usize {
        let upload_mb = usize::try_from(self.max_upload_mb).unwrap_or(usize::MAX);
        let floor_mb = upload_mb.saturating_mul(2).saturating_add(1);

        self.max_body_mb.max(floor_mb).saturating_mul(1024 * 1024)
    }

    /// Upload limits derived from this configuration.
    pub fn upload_rules(&self) -> UploadRules {
        UploadRules::with_max_file_mb(self.max_upload_mb)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

fn parsed<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}
