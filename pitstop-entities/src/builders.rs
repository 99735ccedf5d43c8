pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::entry_builder::*;

pub mod entry_builder {

    use super::*;
    use crate::{comment::*, entry::*, geo::*, id::*, rating::*, time::*};

    #[derive(Debug)]
    pub struct EntryBuild {
        entry: Entry,
    }

    impl EntryBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.entry.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.entry.name = name.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.entry.description = desc.into();
            self
        }
        pub fn address(mut self, address: &str) -> Self {
            self.entry.address = address.into();
            self
        }
        pub fn summary(mut self, summary: &str) -> Self {
            self.entry.summary = summary.into();
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.entry.pos = pos;
            self
        }
        pub fn lat_lng(self, lat: f64, lng: f64) -> Self {
            self.pos(MapPoint::from_lat_lng_deg(lat, lng))
        }
        pub fn created_at(mut self, created_at: Timestamp) -> Self {
            self.entry.created_at = created_at;
            self
        }
        /// Add a comment without votes.
        pub fn comment(mut self, text: &str) -> Self {
            self.entry.comments.push(Comment::new(text, None));
            self
        }
        /// Add a vote without a comment.
        pub fn ratings(mut self, triple: RatingTriple) -> Self {
            self.entry.ratings.push(triple);
            self
        }
        pub fn finish(self) -> Entry {
            self.entry
        }
    }

    impl Builder for Entry {
        type Build = EntryBuild;
        fn build() -> Self::Build {
            Self::Build {
                entry: Entry {
                    id: Id::new(),
                    name: "".into(),
                    description: "".into(),
                    address: "".into(),
                    summary: "".into(),
                    pos: MapPoint::from_lat_lng_deg(0.0, 0.0),
                    created_at: Timestamp::now(),
                    comments: vec![],
                    ratings: Default::default(),
                },
            }
        }
    }
}
