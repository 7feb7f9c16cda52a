use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

/// A template rendered into an email body.
///
/// Values are inserted verbatim. Anything user supplied must be escaped
/// before it is put into a template.
pub trait Template: Serialize {
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

pub const BASE_TEMPLATE: &str = include_str!("../templates/base.html");

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = stringify!($ident);
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    ContactTemplate("contact.html"),
}

/// Notification about a new contact form submission. All text fields except
/// `business_email` are HTML escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactTemplate {
    pub full_name: String,
    pub company: String,
    pub company_size: String,
    pub business_email: String,
    pub message: String,
    pub submitted_at: String,
}
