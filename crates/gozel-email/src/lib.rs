#[macro_use]
extern crate tracing;

use crate::{
    backend::{AnyBackend, MailingBackend, PostmarkBackend, SmtpBackend},
    error::{Error, Result},
    layout::Layout,
    message::{OutgoingEmail, SendConfig},
};
use gozel_config::email::{Configuration, ServiceConfiguration};
use typed_builder::TypedBuilder;

pub use self::compose::{Composer, ProductImage, ProductName};
pub use lettre;

pub mod backend;
pub mod compose;
pub mod error;
pub mod layout;
pub mod message;
pub mod template;

#[derive(Clone, TypedBuilder)]
pub struct Mailer<B> {
    backend: B,
}

impl Mailer<AnyBackend> {
    /// Build a mailer delivering through the configured service
    pub fn from_config(config: &Configuration) -> Result<Self> {
        let backend = match config.service {
            ServiceConfiguration::Postmark(ref postmark) => {
                let builder = PostmarkBackend::builder().server_token(postmark.server_token.clone());
                let backend = match postmark.api_url {
                    Some(ref api_url) => builder.api_url(api_url.clone()).build(),
                    None => builder.build(),
                };

                AnyBackend::from(backend)
            }
            ServiceConfiguration::Smtp(ref smtp) => SmtpBackend::from_credentials(
                smtp.host.as_str(),
                smtp.username.as_str(),
                smtp.password.as_str(),
                smtp.starttls,
            )
            .map_err(|err| Error::Transport(err.into()))?
            .into(),
        };

        Ok(Self { backend })
    }
}

impl<B> Mailer<B> {
    /// Start composing an email in the default layout
    #[must_use]
    pub fn composer(&self) -> Composer {
        Composer::new(Layout::default().templates())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B> Mailer<B>
where
    B: MailingBackend,
{
    #[instrument(skip_all, fields(subject = %config.subject))]
    pub async fn send(&self, config: &SendConfig) -> Result<()> {
        let email = OutgoingEmail::try_from(config)?;

        debug!(recipients = email.to.len(), "sending email");
        self.backend.send_email(&email).await?;
        info!("email handed to the delivery service");

        Ok(())
    }
}
