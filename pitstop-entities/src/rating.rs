use std::fmt;

use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// The independent axes a community member rates an entry on.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, EnumCount, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RatingAxis {
    Cleanliness,
    Accessibility,
    Crowd,
}

impl RatingAxis {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A single vote on one axis.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RatingValue(u8);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Rating value {0} is out of range")]
pub struct RatingValueError(pub i64);

impl RatingValue {
    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(5)
    }

    pub const fn is_valid(self) -> bool {
        self.0 >= Self::min().0 && self.0 <= Self::max().0
    }

    pub const fn to_u8(self) -> u8 {
        self.0
    }
}

impl Default for RatingValue {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<i64> for RatingValue {
    type Error = RatingValueError;
    fn try_from(from: i64) -> Result<Self, Self::Error> {
        u8::try_from(from)
            .ok()
            .map(Self)
            .filter(|v| v.is_valid())
            .ok_or(RatingValueError(from))
    }
}

impl TryFrom<u8> for RatingValue {
    type Error = RatingValueError;
    fn try_from(from: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(from))
    }
}

impl From<RatingValue> for u8 {
    fn from(from: RatingValue) -> Self {
        from.0
    }
}

impl From<RatingValue> for f64 {
    fn from(from: RatingValue) -> Self {
        f64::from(from.0)
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One value per axis, as submitted together with a comment.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct RatingTriple {
    pub cleanliness: RatingValue,
    pub accessibility: RatingValue,
    pub crowd: RatingValue,
}

impl RatingTriple {
    pub const fn get(&self, axis: RatingAxis) -> RatingValue {
        match axis {
            RatingAxis::Cleanliness => self.cleanliness,
            RatingAxis::Accessibility => self.accessibility,
            RatingAxis::Crowd => self.crowd,
        }
    }

    pub fn set(&mut self, axis: RatingAxis, value: RatingValue) {
        match axis {
            RatingAxis::Cleanliness => self.cleanliness = value,
            RatingAxis::Accessibility => self.accessibility = value,
            RatingAxis::Crowd => self.crowd = value,
        }
    }
}

/// The full voting history of an entry, one sample sequence per axis.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Ratings {
    pub cleanliness: Vec<RatingValue>,
    pub accessibility: Vec<RatingValue>,
    pub crowd: Vec<RatingValue>,
}

impl Ratings {
    /// A history that consists of a single vote.
    pub fn seeded(triple: RatingTriple) -> Self {
        let mut ratings = Self::default();
        ratings.push(triple);
        ratings
    }

    pub fn samples(&self, axis: RatingAxis) -> &[RatingValue] {
        match axis {
            RatingAxis::Cleanliness => &self.cleanliness,
            RatingAxis::Accessibility => &self.accessibility,
            RatingAxis::Crowd => &self.crowd,
        }
    }

    pub fn push(&mut self, triple: RatingTriple) {
        self.cleanliness.push(triple.cleanliness);
        self.accessibility.push(triple.accessibility);
        self.crowd.push(triple.crowd);
    }

    /// `true` if every axis holds the same number of samples.
    pub fn is_balanced(&self) -> bool {
        self.cleanliness.len() == self.accessibility.len()
            && self.accessibility.len() == self.crowd.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AvgRatingValue(f64);

impl AvgRatingValue {
    /// Round to one decimal place.
    pub fn rounded(self) -> Self {
        Self((self.0 * 10.0).round() / 10.0)
    }

    pub fn clamp(self) -> Self {
        Self(
            self.0
                .max(f64::from(RatingValue::min()))
                .min(f64::from(RatingValue::max())),
        )
    }
}

impl From<f64> for AvgRatingValue {
    fn from(from: f64) -> Self {
        Self(from)
    }
}

impl From<AvgRatingValue> for f64 {
    fn from(from: AvgRatingValue) -> Self {
        from.0
    }
}

impl From<RatingValue> for AvgRatingValue {
    fn from(from: RatingValue) -> Self {
        f64::from(from).into()
    }
}

impl fmt::Display for AvgRatingValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// The mean of one axis, or nothing if nobody voted yet.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum AxisAverage {
    #[default]
    NoData,
    Mean(AvgRatingValue),
}

impl AxisAverage {
    pub const fn is_no_data(self) -> bool {
        matches!(self, Self::NoData)
    }
}

impl fmt::Display for AxisAverage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoData => f.write_str("-"),
            Self::Mean(avg) => write!(f, "{avg}"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct AvgRatingValueBuilder {
    acc: u64,
    cnt: usize,
}

impl AvgRatingValueBuilder {
    fn add(&mut self, val: RatingValue) {
        debug_assert!(val.is_valid());
        self.acc += u64::from(val.0);
        self.cnt += 1;
    }

    pub fn build(self) -> AxisAverage {
        if self.cnt > 0 {
            AxisAverage::Mean(
                AvgRatingValue::from(self.acc as f64 / self.cnt as f64)
                    .clamp()
                    .rounded(),
            )
        } else {
            AxisAverage::NoData
        }
    }
}

impl std::ops::AddAssign<RatingValue> for AvgRatingValueBuilder {
    fn add_assign(&mut self, rhs: RatingValue) {
        self.add(rhs);
    }
}

impl<'a> FromIterator<&'a RatingValue> for AvgRatingValueBuilder {
    fn from_iter<I: IntoIterator<Item = &'a RatingValue>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut acc, v| {
            acc += *v;
            acc
        })
    }
}

/// Human readable summary of all votes of an entry.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AvgRatings {
    pub cleanliness: AxisAverage,
    pub accessibility: AxisAverage,
    pub crowd: AxisAverage,
}

impl AvgRatings {
    pub const fn get(&self, axis: RatingAxis) -> AxisAverage {
        match axis {
            RatingAxis::Cleanliness => self.cleanliness,
            RatingAxis::Accessibility => self.accessibility,
            RatingAxis::Crowd => self.crowd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn values(raw: &[u8]) -> Vec<RatingValue> {
        raw.iter()
            .map(|v| RatingValue::try_from(*v).unwrap())
            .collect()
    }

    #[test]
    fn rating_value_range() {
        assert!(RatingValue::try_from(0_u8).is_err());
        assert!(RatingValue::try_from(1_u8).is_ok());
        assert!(RatingValue::try_from(5_i64).is_ok());
        assert!(RatingValue::try_from(6_i64).is_err());
        assert!(RatingValue::try_from(-1_i64).is_err());
        assert_eq!(RatingValue::default().to_u8(), 3);
    }

    #[test]
    fn parse_axis() {
        assert_eq!("crowd".parse::<RatingAxis>().ok(), Some(RatingAxis::Crowd));
        assert_eq!(
            "Cleanliness".parse::<RatingAxis>().ok(),
            Some(RatingAxis::Cleanliness)
        );
        assert!("fairness".parse::<RatingAxis>().is_err());
        assert_eq!(RatingAxis::Accessibility.as_str(), "accessibility");
        assert_eq!(RatingAxis::iter().count(), 3);
    }

    #[test]
    fn push_triple_keeps_axes_balanced() {
        let mut ratings = Ratings::default();
        assert!(ratings.is_balanced());
        ratings.push(RatingTriple::default());
        ratings.push(RatingTriple {
            cleanliness: RatingValue::max(),
            ..Default::default()
        });
        assert!(ratings.is_balanced());
        assert_eq!(ratings.samples(RatingAxis::Cleanliness), values(&[3, 5]));
        assert_eq!(ratings.samples(RatingAxis::Crowd), values(&[3, 3]));
    }

    #[test]
    fn average_of_no_samples() {
        let avg: AvgRatingValueBuilder = values(&[]).iter().collect();
        assert_eq!(avg.build(), AxisAverage::NoData);
        assert_eq!(AxisAverage::NoData.to_string(), "-");
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let avg: AvgRatingValueBuilder = values(&[5, 4, 4]).iter().collect();
        let avg = avg.build();
        assert_eq!(avg, AxisAverage::Mean(4.3.into()));
        assert_eq!(avg.to_string(), "4.3");

        let avg: AvgRatingValueBuilder = values(&[2]).iter().collect();
        assert_eq!(avg.build().to_string(), "2.0");
    }
}
