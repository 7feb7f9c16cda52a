use std::sync::Arc;

use anyhow::Context;
use relay_templates_contracts::{Template, TemplateService, BASE_TEMPLATE, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    tera: Arc<Tera>,
}

impl TemplateServiceImpl {
    /// Compiles all templates.
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_template("base", BASE_TEMPLATE)
            .context("Failed to compile base template")?;

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template)
                .with_context(|| format!("Failed to compile template {name}"))?;
        }

        Ok(Self { tera: tera.into() })
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.tera.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use relay_templates_contracts::ContactTemplate;
    use relay_utils::html::escape_html;

    use super::*;

    fn contact_template() -> ContactTemplate {
        ContactTemplate {
            full_name: "Max Mustermann".into(),
            company: "Example &amp; Co".into(),
            company_size: "11-50".into(),
            business_email: "max.mustermann@example.de".into(),
            message: escape_html("<script>alert(1)</script>\nsecond line"),
            submitted_at: "17/10/2026, 12:34:56 UTC".into(),
        }
    }

    #[test]
    fn contact() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut.render(&contact_template()).unwrap();

        // Assert
        assert!(result.contains("<td style=\"padding: 6px 0;\">Max Mustermann</td>"));
        assert!(result.contains(
            "<a href=\"mailto:max.mustermann@example.de\">max.mustermann@example.de</a>"
        ));
        assert!(result.contains("Received on 17/10/2026, 12:34:56 UTC"));
        assert!(result.contains("<title>New contact request</title>"));
    }

    #[test]
    fn values_are_inserted_verbatim() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut.render(&contact_template()).unwrap();

        // Assert
        assert!(result.contains("Example &amp; Co"));
        assert!(result.contains("&lt;script&gt;alert(1)&lt;/script&gt;<br/>second line"));
        assert!(!result.contains("<script>"));
    }
}
