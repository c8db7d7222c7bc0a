use super::MailingBackend;
use crate::{
    error::{Error, Result},
    message::{Body, OutgoingEmail},
};
use lettre::{
    address::AddressError,
    message::{header::ContentType, Mailbox, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use typed_builder::TypedBuilder;

#[derive(Debug, Error)]
pub enum SmtpBackendError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Lettre(#[from] lettre::error::Error),

    #[error(transparent)]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Delivery through an SMTP relay
#[derive(Clone, TypedBuilder)]
pub struct Smtp {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Smtp {
    pub fn from_credentials(
        host: &str,
        username: &str,
        password: &str,
        starttls: bool,
    ) -> Result<Self, SmtpBackendError> {
        let transport = if starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        };

        let transport = transport
            .credentials(Credentials::new(username.into(), password.into()))
            .build();

        Ok(Self { transport })
    }
}

fn build_message(email: &OutgoingEmail<'_>) -> Result<Message, SmtpBackendError> {
    let mut builder = Message::builder()
        .from(email.from.parse::<Mailbox>()?)
        .subject(email.subject);

    for address in email.to {
        builder = builder.to(address.parse()?);
    }
    for address in email.cc {
        builder = builder.cc(address.parse()?);
    }
    for address in email.bcc {
        builder = builder.bcc(address.parse()?);
    }

    let message = match email.body {
        Body::Html(html) => builder.singlepart(SinglePart::html(html.to_owned()))?,
        Body::Plain(plain) => builder
            .header(ContentType::TEXT_PLAIN)
            .body(plain.to_owned())?,
    };

    Ok(message)
}

impl MailingBackend for Smtp {
    #[instrument(skip_all)]
    async fn send_email(&self, email: &OutgoingEmail<'_>) -> Result<()> {
        let message = build_message(email).map_err(|err| Error::Transport(err.into()))?;

        self.transport
            .send(message)
            .await
            .map_err(|err| Error::Transport(SmtpBackendError::from(err).into()))?;

        Ok(())
    }
}
