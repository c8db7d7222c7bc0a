use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    pub from_address: SmolStr,
    pub service: ServiceConfiguration,
}

/// Delivery service, selected by its `name`
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum ServiceConfiguration {
    Postmark(PostmarkConfiguration),
    Smtp(SmtpConfiguration),
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PostmarkConfiguration {
    pub server_token: SmolStr,
    #[serde(default)]
    pub api_url: Option<SmolStr>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SmtpConfiguration {
    pub host: SmolStr,
    pub username: SmolStr,
    pub password: SmolStr,
    pub starttls: bool,
}
