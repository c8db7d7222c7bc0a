use miette::Diagnostic;
use std::error::Error as StdError;
use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync>;
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Reserved for image descriptors that can't be turned into markup.
    /// Descriptors are currently accepted as-is.
    #[error("Invalid product reference: {0}")]
    InvalidProductReference(String),

    #[error("Unknown layout \"{0}\"")]
    #[diagnostic(help("the only available layout is \"simple\""))]
    LayoutNotFound(String),

    #[error("Both of the HTML body and the plain body are missing")]
    MissingBody,

    #[error("No recipient addresses given")]
    MissingRecipient,

    #[error(transparent)]
    Transport(BoxError),
}
