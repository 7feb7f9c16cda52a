use std::sync::Arc;

use relay_config::Config;
use relay_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use relay_shared_impl::time::TimeServiceImpl;
use relay_templates_impl::TemplateServiceImpl;
use types::{Email, RestServer};

pub mod types;

/// Assemble the rest server and all services it depends on.
pub fn build(config: &Config, email: Email) -> anyhow::Result<RestServer> {
    let contact = ContactServiceImpl {
        time: TimeServiceImpl,
        email,
        template: TemplateServiceImpl::new()?,
        config: ContactServiceConfig {
            recipient: Arc::new(config.contact.recipient.clone()),
        },
    };

    Ok(RestServer::new(contact))
}
