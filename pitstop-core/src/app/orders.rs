use std::fmt;

use super::Cmd;

/// A message for the user that does not belong to a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EntryCreated(String),
    CreateEntryFailed(String),
    AddCommentFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EntryCreated(name) => write!(f, "'{name}' has been added"),
            Self::CreateEntryFailed(reason) => {
                write!(f, "Something went wrong, the entry was not saved: {reason}")
            }
            Self::AddCommentFailed(reason) => {
                write!(f, "Failed to add the comment: {reason}")
            }
        }
    }
}

/// Side effects requested by [`super::update`].
pub trait Orders {
    fn perform_cmd(&mut self, cmd: Cmd);
    fn notify(&mut self, notice: Notice);
}

/// Collects all orders so that the caller can
/// dispatch them after the update returned.
#[derive(Debug, Default)]
pub struct OrderQueue {
    pub cmds: Vec<Cmd>,
    pub notices: Vec<Notice>,
}

impl OrderQueue {
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty() && self.notices.is_empty()
    }
}

impl Orders for OrderQueue {
    fn perform_cmd(&mut self, cmd: Cmd) {
        self.cmds.push(cmd);
    }
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
