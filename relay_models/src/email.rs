use nutype::nutype;

/// Identifier the email provider assigned to an accepted message.
#[nutype(derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    From,
    Deref,
    Display,
    Serialize,
    Deserialize
))]
pub struct EmailId(String);
