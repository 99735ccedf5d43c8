use crate::mutation::{NewComment, NewEntry};
use thiserror::Error;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

#[derive(Debug, Error)]
pub enum EntryInvalidation {
    #[error("Empty name")]
    Name,
    #[error("Invalid position")]
    Position,
}

impl Validate for NewEntry {
    type Error = EntryInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.name.trim().is_empty() {
            return Err(Self::Error::Name);
        }
        if !self.pos.is_valid() {
            return Err(Self::Error::Position);
        }
        Ok(())
    }
}

impl AutoCorrect for NewEntry {
    fn auto_correct(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self
    }
}

#[derive(Debug, Error)]
pub enum CommentInvalidation {
    #[error("Empty text")]
    Text,
}

impl Validate for NewComment {
    type Error = CommentInvalidation;
    fn validate(&self) -> Result<(), Self::Error> {
        if self.text.trim().is_empty() {
            return Err(Self::Error::Text);
        }
        Ok(())
    }
}

impl AutoCorrect for NewComment {
    fn auto_correct(mut self) -> Self {
        self.text = self.text.trim().to_owned();
        self
    }
}
