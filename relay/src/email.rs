use relay_config::EmailConfig;
use relay_email_resend::{ResendEmailService, ResendEmailServiceConfig};
use tracing::warn;

/// Create the client for the email provider
pub fn connect(config: &EmailConfig) -> anyhow::Result<ResendEmailService> {
    let service = ResendEmailService::new(ResendEmailServiceConfig {
        api_url: config.api_url.clone(),
        api_key: config.api_key.clone(),
        from: config.from.clone(),
        timeout: config.timeout.map(Into::into),
    })?;

    if !service.has_api_key() {
        warn!(
            "No api key for the email provider has been configured, sending emails will fail. \
             Set {} to fix this.",
            relay_config::API_KEY_ENV
        );
    }

    Ok(service)
}
