use std::{fmt, str::FromStr};

use lettre::{message::Mailbox, Address};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A syntactically valid email address.
///
/// On top of the RFC 5322 syntax check, addresses containing quotes, angle
/// brackets, ampersands, backslashes or whitespace are rejected and the domain
/// must contain at least one dot. Such addresses can therefore be placed into
/// HTML documents and mail headers verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(Address);

/// An email address with an optional display name, e.g.
/// `Contact Form <contact@example.com>`.
///
/// Display names that contain special characters are quoted when printed,
/// e.g. `"Doe, John" <john@example.com>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMailbox(Mailbox);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid email address")]
pub struct InvalidEmailAddress;

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    pub fn with_name(self, name: String) -> EmailMailbox {
        EmailMailbox(Mailbox::new(Some(name), self.0))
    }
}

impl EmailMailbox {
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    pub fn address(&self) -> EmailAddress {
        EmailAddress(self.0.email.clone())
    }
}

impl FromStr for EmailAddress {
    type Err = InvalidEmailAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsafe_char = |c: char| matches!(c, '"' | '<' | '>' | '&' | '\\') || c.is_whitespace();
        let dotted_domain = s
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.'));

        if !email_address::EmailAddress::is_valid(s) || !dotted_domain || s.contains(unsafe_char) {
            return Err(InvalidEmailAddress);
        }

        s.parse().map(Self).map_err(|_| InvalidEmailAddress)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = InvalidEmailAddress;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<EmailAddress> for EmailMailbox {
    fn from(address: EmailAddress) -> Self {
        Self(Mailbox::new(None, address.0))
    }
}

impl FromStr for EmailMailbox {
    type Err = InvalidEmailAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Mailbox { name, email } = s.trim().parse().map_err(|_| InvalidEmailAddress)?;
        let address = EmailAddress::try_from(email.as_ref())?;
        let name = name.filter(|name| !name.trim().is_empty());

        Ok(Self(Mailbox::new(name, address.0)))
    }
}

impl fmt::Display for EmailMailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! serde_via_str {
    ($($ty:ty),*) => {$(
        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer)?
                    .parse()
                    .map_err(serde::de::Error::custom)
            }
        }
    )*};
}

serde_via_str!(EmailAddress, EmailMailbox);
