use crate::{rating::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text       : String,
    // Set by the client at the moment of submission.
    pub created_at : Timestamp,
    // Missing only for the comment that is created together
    // with its entry.
    pub ratings    : Option<RatingTriple>,
}

impl Comment {
    pub fn new(text: impl Into<String>, ratings: Option<RatingTriple>) -> Self {
        Self {
            text: text.into(),
            created_at: Timestamp::now(),
            ratings,
        }
    }
}

/// Order comments for display, newest first.
///
/// The stored order is the submission order and stays untouched.
pub fn newest_first(comments: &[Comment]) -> Vec<&Comment> {
    let mut sorted: Vec<_> = comments.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}
