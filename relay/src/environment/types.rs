use relay_core_contact_impl::ContactServiceImpl;
use relay_email_resend::ResendEmailService;
use relay_shared_impl::time::TimeServiceImpl;
use relay_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = relay_api_rest::RestServer<Contact>;

// Email
pub type Email = ResendEmailService;

// Core
pub type Contact = ContactServiceImpl<TimeServiceImpl, Email, TemplateServiceImpl>;
