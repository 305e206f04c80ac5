//! Error taxonomy for the extraction and matching pipeline.
//!
//! Only two things are fatal here: input that is not well-formed XML, and a
//! package container that cannot be unpacked. Missing or empty sub-elements
//! during extraction are never errors; extractors degrade the affected field
//! to `None`/empty and keep going. An unsatisfiable requirement is a normal
//! matching outcome, reported in the match result rather than raised.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Input bytes are not well-formed XML for the expected dialect. Carries
    /// the underlying parser's message unmodified.
    #[error("document is not well-formed XML: {0}")]
    Parse(#[from] roxmltree::Error),

    /// Packaged-document unpacking failed: bad archive, unreadable manifest,
    /// or a part that cannot be re-serialized. Staged files are cleaned up
    /// before this propagates.
    #[error("package unreadable: {0}")]
    Container(String),
}

impl Error {
    pub(crate) fn container(message: impl Into<String>) -> Self {
        Error::Container(message.into())
    }
}
