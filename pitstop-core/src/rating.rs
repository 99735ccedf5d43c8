use pitstop_entities::{entry::*, rating::*};

pub trait Rated {
    fn avg_ratings(&self) -> AvgRatings;
}

impl Rated for Entry {
    fn avg_ratings(&self) -> AvgRatings {
        summarize(&self.ratings)
    }
}

/// Reduce the voting history of an entry to one mean per axis.
///
/// Axes without any vote yield [`AxisAverage::NoData`].
pub fn summarize(ratings: &Ratings) -> AvgRatings {
    let avg = |axis: RatingAxis| {
        ratings
            .samples(axis)
            .iter()
            .collect::<AvgRatingValueBuilder>()
            .build()
    };
    AvgRatings {
        cleanliness: avg(RatingAxis::Cleanliness),
        accessibility: avg(RatingAxis::Accessibility),
        crowd: avg(RatingAxis::Crowd),
    }
}
