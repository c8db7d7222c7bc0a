use crate::{error::Result, message::OutgoingEmail};
use enum_dispatch::enum_dispatch;

pub use self::postmark::{Postmark as PostmarkBackend, PostmarkBackendError};
pub use self::smtp::{Smtp as SmtpBackend, SmtpBackendError};

mod postmark;
mod smtp;

#[enum_dispatch(MailingBackend)]
#[derive(Clone)]
pub enum AnyBackend {
    Postmark(PostmarkBackend),
    Smtp(SmtpBackend),
}

#[enum_dispatch]
#[allow(async_fn_in_trait)] // Because of `enum_dispatch`
pub trait MailingBackend: Send + Sync {
    /// Hand one email to the delivery service. Exactly one request is made per call.
    async fn send_email(&self, email: &OutgoingEmail<'_>) -> Result<()>;
}
