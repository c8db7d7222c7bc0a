use super::MailingBackend;
use crate::{
    error::{Error, Result},
    message::{join_addresses, Body, OutgoingEmail},
};
use reqwest::{header::ACCEPT, Client, StatusCode};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;
use typed_builder::TypedBuilder;

pub const DEFAULT_API_URL: &str = "https://api.postmarkapp.com";
const SERVER_TOKEN_HEADER: &str = "X-Postmark-Server-Token";

#[derive(Debug, Error)]
pub enum PostmarkBackendError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Postmark rejected the email ({status}, error code {code}): {message}")]
    Rejected {
        status: StatusCode,
        code: i64,
        message: String,
    },
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Message<'a> {
    from: &'a str,
    to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bcc: Option<String>,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_body: Option<&'a str>,
}

impl<'a> From<&OutgoingEmail<'a>> for Message<'a> {
    fn from(email: &OutgoingEmail<'a>) -> Self {
        let addresses =
            |addresses: &[String]| (!addresses.is_empty()).then(|| join_addresses(addresses));
        let (html_body, text_body) = match email.body {
            Body::Html(html) => (Some(html), None),
            Body::Plain(plain) => (None, Some(plain)),
        };

        Self {
            from: email.from,
            to: join_addresses(email.to),
            cc: addresses(email.cc),
            bcc: addresses(email.bcc),
            subject: email.subject,
            html_body,
            text_body,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorResponse {
    error_code: i64,
    message: String,
}

/// Delivery through the Postmark email API
#[derive(Clone, TypedBuilder)]
pub struct Postmark {
    #[builder(default)]
    client: Client,
    #[builder(default = SmolStr::new(DEFAULT_API_URL), setter(into))]
    api_url: SmolStr,
    #[builder(setter(into))]
    server_token: SmolStr,
}

impl Postmark {
    fn endpoint(&self) -> String {
        format!("{}/email", self.api_url.trim_end_matches('/'))
    }

    async fn deliver(&self, email: &OutgoingEmail<'_>) -> Result<(), PostmarkBackendError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(ACCEPT, "application/json")
            .header(SERVER_TOKEN_HEADER, self.server_token.as_str())
            .json(&Message::from(email))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let (code, message) = match response.json::<ErrorResponse>().await {
            Ok(body) => (body.error_code, body.message),
            Err(error) => {
                debug!(?error, "failed to decode Postmark error response");
                (-1, String::from("unreadable error response"))
            }
        };

        Err(PostmarkBackendError::Rejected {
            status,
            code,
            message,
        })
    }
}

impl MailingBackend for Postmark {
    #[instrument(skip_all, fields(api_url = %self.api_url))]
    async fn send_email(&self, email: &OutgoingEmail<'_>) -> Result<()> {
        self.deliver(email)
            .await
            .map_err(|err| Error::Transport(err.into()))
    }
}
