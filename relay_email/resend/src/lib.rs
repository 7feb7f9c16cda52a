use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use relay_email_contracts::{
    ContentType, Email, EmailDispatchResult, EmailService, ProviderError,
};
use relay_models::email_address::EmailMailbox;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace_span, Instrument};
use url::Url;

use crate::http::HttpClient;

pub mod http;

pub const DEFAULT_API_URL: &str = "https://api.resend.com/";

/// Email service backed by the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendEmailService {
    config: Arc<ResendEmailServiceConfig>,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ResendEmailServiceConfig {
    /// Base url of the api, the `emails` endpoint is resolved relative to it.
    /// A missing trailing slash is implied, so `https://host/v1` and
    /// `https://host/v1/` both send to `https://host/v1/emails`.
    pub api_url: Url,
    /// Without an api key every [`EmailService::send`] call fails.
    pub api_key: Option<String>,
    pub from: EmailMailbox,
    pub timeout: Option<Duration>,
}

impl ResendEmailService {
    pub fn new(config: ResendEmailServiceConfig) -> anyhow::Result<Self> {
        let client = HttpClient::new(config.timeout).context("Failed to build http client")?;

        Ok(Self {
            config: config.into(),
            client,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }
}

impl EmailService for ResendEmailService {
    async fn send(&self, email: Email) -> anyhow::Result<EmailDispatchResult> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("No api key has been configured for the email provider"))?;

        let endpoint = endpoint(&self.config.api_url)?;
        let from = self.config.from.to_string();
        let to = [email.recipient.to_string()];
        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body.as_str()), None),
            ContentType::Text => (None, Some(email.body.as_str())),
        };
        let request = SendEmailRequest {
            from: &from,
            to: &to,
            subject: &email.subject,
            reply_to: email.reply_to.as_ref().map(|x| x.as_str()),
            html,
            text,
        };

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .instrument(trace_span!("resend-send"))
            .await?;

        let status = response.status();
        debug!(%status, "email provider responded");

        if status.is_success() {
            let SendEmailResponse { id } = response.json().await?;
            return Ok(EmailDispatchResult::Sent(id.into()));
        }

        let error = match response.json::<ErrorResponse>().await {
            Ok(ErrorResponse { name, message }) => ProviderError {
                status: status.as_u16(),
                name,
                message,
            },
            Err(_) => ProviderError {
                status: status.as_u16(),
                name: "unknown_error".into(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .into(),
            },
        };

        Ok(EmailDispatchResult::Rejected(error))
    }
}

fn endpoint(api_url: &Url) -> Result<Url, url::ParseError> {
    if api_url.path().ends_with('/') {
        return api_url.join("emails");
    }

    let mut base = api_url.clone();
    base.set_path(&format!("{}/", api_url.path()));
    base.join("emails")
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    name: String,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_relative_to_api_url() {
        for (api_url, expected) in [
            ("https://api.resend.com/", "https://api.resend.com/emails"),
            ("https://api.resend.com", "https://api.resend.com/emails"),
            ("http://localhost:8003/v1", "http://localhost:8003/v1/emails"),
            ("http://localhost:8003/v1/", "http://localhost:8003/v1/emails"),
        ] {
            let api_url = api_url.parse().unwrap();
            assert_eq!(endpoint(&api_url).unwrap().as_str(), expected);
        }
    }
}
