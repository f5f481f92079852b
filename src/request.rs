use std::collections::BTreeMap;

/// One HTTP call to issue.
///
/// Only `url` is populated today; the other fields are carried so a richer
/// input format can fill them without changing the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: String,
    url: String,
    headers: BTreeMap<String, String>,
    body: String,
}

impl RequestDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        RequestDescriptor {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}
