use std::sync::LazyLock;

use relay_models::contact::ContactSubmission;

pub static FOO: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    full_name: "Max Mustermann".to_owned().try_into().unwrap(),
    company: "Mustermann GmbH".to_owned().try_into().unwrap(),
    company_size: "11-50".to_owned().try_into().unwrap(),
    business_email: "max.mustermann@example.de".parse().unwrap(),
    message: "Hello, we would like to hear more about your services."
        .to_owned()
        .try_into()
        .unwrap(),
});

/// A submission trying to inject markup into the notification email.
pub static BAR: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    full_name: "Erika <b>Musterfrau</b>".to_owned().try_into().unwrap(),
    company: "Bar & Baz".to_owned().try_into().unwrap(),
    company_size: "1-10".to_owned().try_into().unwrap(),
    business_email: "erika@bar-baz.example".parse().unwrap(),
    message: "<script>alert('pwned')</script>\nPlease call me back."
        .to_owned()
        .try_into()
        .unwrap(),
});
