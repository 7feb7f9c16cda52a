use std::future::Future;

use relay_models::{contact::ContactSubmission, email::EmailId};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Notify the operator inbox about a validated contact form submission.
    ///
    /// Every call sends a new email, identical submissions are not
    /// deduplicated.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<EmailId, ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Failed to send email.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<EmailId, ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
