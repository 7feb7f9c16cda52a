use anyhow::bail;
use clap::Subcommand;
use relay_config::Config;
use relay_email_contracts::{ContentType, Email, EmailDispatchResult, EmailService};
use relay_models::email_address::EmailMailbox;
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailMailbox },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailMailbox) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;

    let result = email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;

    match result {
        EmailDispatchResult::Sent(id) => {
            info!(%id, "Email has been accepted by the provider");
            Ok(())
        }
        EmailDispatchResult::Rejected(err) => bail!("Email provider rejected the email: {err}"),
    }
}
