use pitstop_entities::rating::*;

/// Input fields of the new entry composer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntryForm {
    pub name: String,
    pub description: String,
    pub ratings: RatingTriple,
}

impl EntryForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Input fields of the comment form below the entry details.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommentForm {
    pub text: String,
    pub ratings: RatingTriple,
}

impl CommentForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
