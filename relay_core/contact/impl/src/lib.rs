use std::sync::Arc;

use relay_core_contact_contracts::{ContactSendMessageError, ContactService};
use relay_email_contracts::{ContentType, Email, EmailDispatchResult, EmailService};
use relay_models::{contact::ContactSubmission, email::EmailId, email_address::EmailMailbox};
use relay_shared_contracts::time::TimeService;
use relay_templates_contracts::{ContactTemplate, TemplateService};
use relay_utils::html::escape_html;
use tracing::{error, info};

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S UTC";

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Time, Email, Template> {
    pub time: Time,
    pub email: Email,
    pub template: Template,
    pub config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// The inbox that receives all contact requests.
    pub recipient: Arc<EmailMailbox>,
}

impl<Time, EmailS, Template> ContactService for ContactServiceImpl<Time, EmailS, Template>
where
    Time: TimeService,
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<EmailId, ContactSendMessageError> {
        let ContactSubmission {
            full_name,
            company,
            company_size,
            business_email,
            message,
        } = submission;

        let body = self.template.render(&ContactTemplate {
            full_name: escape_html(&full_name),
            company: escape_html(&company),
            company_size: escape_html(&company_size),
            business_email: business_email.as_str().into(),
            message: escape_html(&message),
            submitted_at: self.time.now().format(TIMESTAMP_FORMAT).to_string(),
        })?;

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: format!(
                "New contact request: {} ({})",
                single_line(&company),
                single_line(&full_name)
            ),
            body,
            content_type: ContentType::Html,
            reply_to: Some(business_email),
        };

        match self.email.send(email).await {
            Ok(EmailDispatchResult::Sent(id)) => {
                info!(%id, "contact request has been sent");
                Ok(id)
            }
            Ok(EmailDispatchResult::Rejected(err)) => {
                error!("email provider rejected contact request: {err}");
                Err(ContactSendMessageError::Send)
            }
            Err(err) => {
                error!("failed to send contact request: {err:#}");
                Err(ContactSendMessageError::Send)
            }
        }
    }
}

/// Collapses every run of whitespace and control characters into a single
/// space, so the value cannot break out of a mail header.
fn single_line(value: &str) -> String {
    value
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
