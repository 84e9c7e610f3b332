/// Why a contact notification could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The relay rejected our credentials.
    Authentication(String),
    /// The relay could not be reached, or the TLS/connection layer failed.
    Connection(String),
    Other(String),
}

/// SMTP reply codes that mean the relay refused our login.
const AUTH_FAILURE_CODES: &[&str] = &["530", "534", "535"];

impl NotifyError {
    /// Classify an SMTP failure from its reply code (if the relay answered at
    /// all) and whether it happened below the SMTP conversation.
    pub fn classify(code: Option<&str>, connection_level: bool, detail: String) -> Self {
        match code {
            Some(code) if AUTH_FAILURE_CODES.contains(&code) => NotifyError::Authentication(detail),
            Some(_) => NotifyError::Other(detail),
            None if connection_level => NotifyError::Connection(detail),
            None => NotifyError::Other(detail),
        }
    }

    /// Message safe to show to the submitter.
    pub fn public_message(&self) -> &'static str {
        match self {
            NotifyError::Authentication(_) => {
                "Email service authentication failed. Please try again later."
            }
            NotifyError::Connection(_) => {
                "Could not connect to email service. Please try again later."
            }
            NotifyError::Other(_) => "Failed to send message. Please try again.",
        }
    }
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyError::Authentication(msg) => write!(f, "SMTP authentication failed: {msg}"),
            NotifyError::Connection(msg) => write!(f, "SMTP connection failed: {msg}"),
            NotifyError::Other(msg) => write!(f, "Notification failed: {msg}"),
        }
    }
}

impl std::error::Error for NotifyError {}

impl From<&lettre::transport::smtp::Error> for NotifyError {
    fn from(err: &lettre::transport::smtp::Error) -> Self {
        let code = err.status().map(|code| code.to_string());
        let connection_level =
            err.is_timeout() || err.is_tls() || !(err.is_client() || err.is_response());
        NotifyError::classify(code.as_deref(), connection_level, err.to_string())
    }
}
