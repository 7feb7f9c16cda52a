//! Demo data shared by the tests of all crates.

use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use relay_models::email_address::EmailMailbox;

pub mod contact;

pub static RECIPIENT: LazyLock<EmailMailbox> =
    LazyLock::new(|| "Sales Inbox <sales@example.com>".parse().unwrap());

pub static NOW: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| Utc.with_ymd_and_hms(2026, 10, 17, 12, 34, 56).unwrap());

/// [`NOW`] as rendered into contact emails.
pub const NOW_FORMATTED: &str = "17/10/2026, 12:34:56 UTC";
