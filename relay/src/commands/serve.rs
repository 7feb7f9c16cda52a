use relay_config::Config;
use tracing::info;

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Creating email provider client");
    let email = email::connect(&config.email)?;

    let server = environment::build(&config, email)?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
