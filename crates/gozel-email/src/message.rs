use crate::error::{Error, Result};
use typed_builder::TypedBuilder;

/// Addressing, subject and bodies of an email to deliver
#[derive(Clone, Debug, TypedBuilder)]
pub struct SendConfig {
    #[builder(setter(into))]
    pub from: String,
    #[builder(setter(into))]
    pub to: Vec<String>,
    #[builder(default, setter(into))]
    pub cc: Vec<String>,
    #[builder(default, setter(into))]
    pub bcc: Vec<String>,
    #[builder(setter(into))]
    pub subject: String,
    #[builder(default, setter(strip_option, into))]
    pub html_body: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub plain_body: Option<String>,
}

/// The single body a delivery carries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Body<'a> {
    Html(&'a str),
    Plain(&'a str),
}

/// Validated view of a [`SendConfig`], handed to the backends
#[derive(Clone, Copy, Debug)]
pub struct OutgoingEmail<'a> {
    pub from: &'a str,
    pub to: &'a [String],
    pub cc: &'a [String],
    pub bcc: &'a [String],
    pub subject: &'a str,
    pub body: Body<'a>,
}

impl<'a> TryFrom<&'a SendConfig> for OutgoingEmail<'a> {
    type Error = Error;

    fn try_from(config: &'a SendConfig) -> Result<Self, Self::Error> {
        if config.to.is_empty() {
            return Err(Error::MissingRecipient);
        }

        // The HTML body wins whenever it has content
        let non_empty = |body: Option<&'a str>| body.filter(|body| !body.is_empty());
        let body = non_empty(config.html_body.as_deref())
            .map(Body::Html)
            .or_else(|| non_empty(config.plain_body.as_deref()).map(Body::Plain))
            .ok_or(Error::MissingBody)?;

        Ok(Self {
            from: &config.from,
            to: &config.to,
            cc: &config.cc,
            bcc: &config.bcc,
            subject: &config.subject,
            body,
        })
    }
}

/// Join addresses into the comma separated list most providers expect
#[must_use]
pub fn join_addresses(addresses: &[String]) -> String {
    addresses.join(",")
}
