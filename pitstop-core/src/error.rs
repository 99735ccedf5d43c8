use crate::{
    gateways,
    util::validate::{CommentInvalidation, EntryInvalidation},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The name is empty")]
    EmptyName,
    #[error("Empty comment")]
    EmptyComment,
    #[error("There is no new entry to submit")]
    NotComposing,
    #[error("There is no selected entry to comment on")]
    NotViewing,
    #[error("The entry does not exist")]
    EntryNotFound,
    #[error("Invalid position")]
    InvalidPosition,
    #[error(transparent)]
    Gateway(#[from] gateways::Error),
}

impl From<EntryInvalidation> for Error {
    fn from(err: EntryInvalidation) -> Self {
        match err {
            EntryInvalidation::Name => Self::EmptyName,
            EntryInvalidation::Position => Self::InvalidPosition,
        }
    }
}

impl From<CommentInvalidation> for Error {
    fn from(err: CommentInvalidation) -> Self {
        match err {
            CommentInvalidation::Text => Self::EmptyComment,
        }
    }
}
