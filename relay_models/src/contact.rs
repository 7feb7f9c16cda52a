use nutype::nutype;
use thiserror::Error;

use crate::email_address::EmailAddress;

/// A contact form submission that satisfied all field constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub full_name: ContactFullName,
    pub company: ContactCompany,
    pub company_size: ContactCompanySize,
    pub business_email: EmailAddress,
    pub message: ContactMessageContent,
}

#[nutype(
    sanitize(trim),
    validate(len_char_min = 2),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactFullName(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 2),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactCompany(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 1),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactCompanySize(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 10, len_char_max = 1000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactMessageContent(String);

/// Reason why a single field of a submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactFieldViolation {
    #[error("Required")]
    Required,
    #[error("Expected string")]
    ExpectedString,
    #[error("Must contain at least {0} character(s)")]
    TooShort(usize),
    #[error("Must contain at most {0} character(s)")]
    TooLong(usize),
    #[error("Invalid email address")]
    InvalidEmail,
}

macro_rules! length_violation {
    ($error:ident, min = $min:literal) => {
        impl From<$error> for ContactFieldViolation {
            fn from(err: $error) -> Self {
                match err {
                    $error::LenCharMinViolated => Self::TooShort($min),
                }
            }
        }
    };
    ($error:ident, min = $min:literal, max = $max:literal) => {
        impl From<$error> for ContactFieldViolation {
            fn from(err: $error) -> Self {
                match err {
                    $error::LenCharMinViolated => Self::TooShort($min),
                    $error::LenCharMaxViolated => Self::TooLong($max),
                }
            }
        }
    };
}

length_violation!(ContactFullNameError, min = 2);
length_violation!(ContactCompanyError, min = 2);
length_violation!(ContactCompanySizeError, min = 1);
length_violation!(ContactMessageContentError, min = 10, max = 1000);

impl From<crate::email_address::InvalidEmailAddress> for ContactFieldViolation {
    fn from(_: crate::email_address::InvalidEmailAddress) -> Self {
        Self::InvalidEmail
    }
}

#[cfg(test)]
mod tests {
    use relay_utils::assert_matches;

    use super::*;

    #[test]
    fn full_name_is_trimmed() {
        let name = ContactFullName::try_new("  Max Mustermann \n".to_owned()).unwrap();
        assert_eq!(*name, "Max Mustermann");
    }

    #[test]
    fn full_name_too_short() {
        let err = ContactFullName::try_new(" M ".to_owned()).unwrap_err();
        assert_eq!(ContactFieldViolation::from(err), ContactFieldViolation::TooShort(2));
    }

    #[test]
    fn company_size_empty() {
        let err = ContactCompanySize::try_new("   ".to_owned()).unwrap_err();
        assert_eq!(ContactFieldViolation::from(err), ContactFieldViolation::TooShort(1));
    }

    #[test]
    fn message_bounds() {
        ContactMessageContent::try_new("x".repeat(10)).unwrap();
        ContactMessageContent::try_new("x".repeat(1000)).unwrap();

        assert_matches!(
            ContactMessageContent::try_new("x".repeat(9)).map_err(ContactFieldViolation::from),
            Err(ContactFieldViolation::TooShort(10))
        );
        assert_matches!(
            ContactMessageContent::try_new("x".repeat(1001)).map_err(ContactFieldViolation::from),
            Err(ContactFieldViolation::TooLong(1000))
        );
    }

    #[test]
    fn message_length_counts_characters() {
        ContactMessageContent::try_new("ä".repeat(1000)).unwrap();
    }

    #[test]
    fn violation_messages() {
        assert_eq!(ContactFieldViolation::Required.to_string(), "Required");
        assert_eq!(
            ContactFieldViolation::TooShort(2).to_string(),
            "Must contain at least 2 character(s)"
        );
        assert_eq!(
            ContactFieldViolation::TooLong(1000).to_string(),
            "Must contain at most 1000 character(s)"
        );
    }
}
