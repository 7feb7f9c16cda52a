use std::{ops::Deref, sync::LazyLock, time::Duration};

use relay_utils::{relay_version, Apply};

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let homepage = env!("CARGO_PKG_HOMEPAGE");
    let repository = env!("CARGO_PKG_REPOSITORY");
    let version = relay_version();

    format!("Contact Relay ({homepage}, {repository}, Version {version})")
});

const _: () = {
    assert!(!env!("CARGO_PKG_HOMEPAGE").is_empty());
    assert!(!env!("CARGO_PKG_REPOSITORY").is_empty());
};

#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new(timeout: Option<Duration>) -> reqwest::Result<Self> {
        reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .apply_map(timeout, reqwest::ClientBuilder::timeout)
            .build()
            .map(Self)
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
