use relay_models::{
    contact::{
        ContactCompany, ContactCompanySize, ContactFieldViolation, ContactFullName,
        ContactMessageContent, ContactSubmission,
    },
    email_address::EmailAddress,
};
use serde::Deserialize;
use serde_json::Value;

use super::ApiFieldError;

/// Untrusted contact form body. Every field is kept as raw json so that type
/// errors can be reported per field instead of rejecting the whole body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactSubmission {
    #[serde(default)]
    pub full_name: Option<Value>,
    #[serde(default)]
    pub company: Option<Value>,
    #[serde(default)]
    pub company_size: Option<Value>,
    #[serde(default)]
    pub business_email: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl ApiContactSubmission {
    /// Parses a raw request body.
    ///
    /// An empty body counts as an empty object. Returns `Ok(None)` if the body
    /// is valid json but not an object.
    pub fn from_body(body: &[u8]) -> serde_json::Result<Option<Self>> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Some(Self::default()));
        }

        match serde_json::from_slice(body)? {
            value @ Value::Object(_) => serde_json::from_value(value).map(Some),
            _ => Ok(None),
        }
    }

    /// Checks every field and collects all violations.
    pub fn validate(self) -> Result<ContactSubmission, Vec<ApiFieldError>> {
        let mut errors = Vec::new();

        let full_name = field(&mut errors, "fullName", self.full_name, |x| {
            ContactFullName::try_new(x).map_err(Into::into)
        });
        let company = field(&mut errors, "company", self.company, |x| {
            ContactCompany::try_new(x).map_err(Into::into)
        });
        let company_size = field(&mut errors, "companySize", self.company_size, |x| {
            ContactCompanySize::try_new(x).map_err(Into::into)
        });
        let business_email = field(&mut errors, "businessEmail", self.business_email, |x| {
            x.trim().parse::<EmailAddress>().map_err(Into::into)
        });
        let message = field(&mut errors, "message", self.message, |x| {
            ContactMessageContent::try_new(x).map_err(Into::into)
        });

        match (full_name, company, company_size, business_email, message) {
            (
                Some(full_name),
                Some(company),
                Some(company_size),
                Some(business_email),
                Some(message),
            ) => Ok(ContactSubmission {
                full_name,
                company,
                company_size,
                business_email,
                message,
            }),
            _ => Err(errors),
        }
    }
}

fn field<T>(
    errors: &mut Vec<ApiFieldError>,
    name: &str,
    value: Option<Value>,
    parse: impl FnOnce(String) -> Result<T, ContactFieldViolation>,
) -> Option<T> {
    let result = match value {
        None | Some(Value::Null) => Err(ContactFieldViolation::Required),
        Some(Value::String(value)) => parse(value),
        Some(_) => Err(ContactFieldViolation::ExpectedString),
    };

    result
        .map_err(|violation| {
            errors.push(ApiFieldError {
                field: name.into(),
                message: violation.to_string(),
            })
        })
        .ok()
}
