use crate::{comment::*, geo::*, id::*, rating::*, time::*};

/// A point of interest.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id          : Id,
    pub name        : String,
    pub description : String,
    pub address     : String,
    pub summary     : String,
    pub pos         : MapPoint,
    pub created_at  : Timestamp,
    // Submission order, not display order
    pub comments    : Vec<Comment>,
    pub ratings     : Ratings,
}

impl Entry {
    /// Record a comment together with the votes that came with it.
    pub fn add_comment(&mut self, comment: Comment, ratings: RatingTriple) {
        self.comments.push(comment);
        self.ratings.push(ratings);
    }

    /// URL of a route planner that navigates to this entry.
    pub fn directions_url(&self) -> String {
        let (lat, lng) = self.pos.to_lat_lng_deg();
        format!("https://www.google.com/maps/dir/?api=1&destination={lat},{lng}")
    }
}
