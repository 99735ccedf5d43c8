use super::Result;
use crate::mutation::{NewComment, NewEntry};
use pitstop_entities::{entry::Entry, id::Id};

/// The remote collection of entries.
pub trait EntryGateway {
    fn all_entries(&self) -> Result<Vec<Entry>>;

    /// Returns the entry as stored by the backend,
    /// including the identifier it assigned.
    fn create_entry(&self, new_entry: &NewEntry) -> Result<Entry>;

    /// The backend only acknowledges the comment and
    /// does not return the updated entry.
    fn add_comment(&self, entry_id: &Id, comment: &NewComment) -> Result<()>;
}
