use std::{fmt, future::Future};

use relay_models::{
    email::EmailId,
    email_address::{EmailAddress, EmailMailbox},
};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Submit the email to the provider. Exactly one attempt is made.
    ///
    /// Returns an error if the provider could not be reached or its response
    /// could not be understood.
    fn send(&self, email: Email) -> impl Future<Output = anyhow::Result<EmailDispatchResult>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailMailbox,
    pub subject: String,
    pub body: String,
    pub content_type: ContentType,
    pub reply_to: Option<EmailAddress>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailDispatchResult {
    /// The provider accepted the email.
    Sent(EmailId),
    /// The provider refused the email.
    Rejected(ProviderError),
}

/// Error details reported by the email provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub status: u16,
    pub name: String,
    pub message: String,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.status, self.message)
    }
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: EmailDispatchResult) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_error(mut self, email: Email, error: &'static str) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }
}
