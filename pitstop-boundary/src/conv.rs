use super::*;
use pitstop_entities as e;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Position(#[from] e::geo::MapPointParseError),
    #[error(transparent)]
    Timestamp(#[from] e::time::TimestampParseError),
    #[error(transparent)]
    RatingValue(#[from] e::rating::RatingValueError),
}

impl From<e::rating::RatingTriple> for RatingTriple {
    fn from(from: e::rating::RatingTriple) -> Self {
        let e::rating::RatingTriple {
            cleanliness,
            accessibility,
            crowd,
        } = from;
        Self {
            cleanliness: cleanliness.to_u8().into(),
            accessibility: accessibility.to_u8().into(),
            crowd: crowd.to_u8().into(),
        }
    }
}

impl TryFrom<RatingTriple> for e::rating::RatingTriple {
    type Error = ConversionError;
    fn try_from(from: RatingTriple) -> Result<Self, Self::Error> {
        let RatingTriple {
            cleanliness,
            accessibility,
            crowd,
        } = from;
        Ok(Self {
            cleanliness: cleanliness.try_into()?,
            accessibility: accessibility.try_into()?,
            crowd: crowd.try_into()?,
        })
    }
}

fn samples_from_entity(samples: Vec<e::rating::RatingValue>) -> Vec<i64> {
    samples.into_iter().map(|v| v.to_u8().into()).collect()
}

fn samples_into_entity(
    samples: Vec<i64>,
) -> Result<Vec<e::rating::RatingValue>, ConversionError> {
    samples
        .into_iter()
        .map(|v| e::rating::RatingValue::try_from(v).map_err(ConversionError::from))
        .collect()
}

impl From<e::rating::Ratings> for Ratings {
    fn from(from: e::rating::Ratings) -> Self {
        let e::rating::Ratings {
            cleanliness,
            accessibility,
            crowd,
        } = from;
        Self {
            cleanliness: samples_from_entity(cleanliness),
            accessibility: samples_from_entity(accessibility),
            crowd: samples_from_entity(crowd),
        }
    }
}

impl TryFrom<Ratings> for e::rating::Ratings {
    type Error = ConversionError;
    fn try_from(from: Ratings) -> Result<Self, Self::Error> {
        let Ratings {
            cleanliness,
            accessibility,
            crowd,
        } = from;
        Ok(Self {
            cleanliness: samples_into_entity(cleanliness)?,
            accessibility: samples_into_entity(accessibility)?,
            crowd: samples_into_entity(crowd)?,
        })
    }
}

impl From<e::comment::Comment> for Comment {
    fn from(from: e::comment::Comment) -> Self {
        let e::comment::Comment {
            text,
            created_at,
            ratings,
        } = from;
        Self {
            text,
            timestamp: created_at.to_rfc3339(),
            ratings: ratings.map(Into::into),
        }
    }
}

impl TryFrom<Comment> for e::comment::Comment {
    type Error = ConversionError;
    fn try_from(from: Comment) -> Result<Self, Self::Error> {
        let Comment {
            text,
            timestamp,
            ratings,
        } = from;
        Ok(Self {
            text,
            created_at: timestamp.parse()?,
            ratings: ratings
                .map(e::rating::RatingTriple::try_from)
                .transpose()?,
        })
    }
}

impl From<e::entry::Entry> for Entry {
    fn from(from: e::entry::Entry) -> Self {
        let e::entry::Entry {
            id,
            name,
            description,
            address,
            summary,
            pos,
            created_at,
            comments,
            ratings,
        } = from;
        let (lat, lng) = pos.to_lat_lng_deg();
        Self {
            id: id.into(),
            name,
            description,
            address,
            summary,
            lat,
            lng,
            comments: comments.into_iter().map(Into::into).collect(),
            ratings: ratings.into(),
            created_at: created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<Entry> for e::entry::Entry {
    type Error = ConversionError;
    fn try_from(from: Entry) -> Result<Self, Self::Error> {
        let Entry {
            id,
            name,
            description,
            address,
            summary,
            lat,
            lng,
            comments,
            ratings,
            created_at,
        } = from;
        Ok(Self {
            id: id.into(),
            name,
            description,
            address,
            summary,
            pos: e::geo::MapPoint::try_from_lat_lng_deg(lat, lng)?,
            created_at: created_at.parse()?,
            comments: comments
                .into_iter()
                .map(e::comment::Comment::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            ratings: e::rating::Ratings::try_from(ratings)?,
        })
    }
}
