use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use self::conv::*;

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id          : String,
    pub name        : String,
    #[serde(default)]
    pub description : String,
    #[serde(default)]
    pub address     : String,
    #[serde(default)]
    pub summary     : String,
    pub lat         : f64,
    pub lng         : f64,
    #[serde(default)]
    pub comments    : Vec<Comment>,
    #[serde(default)]
    pub ratings     : Ratings,
    pub created_at  : String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Comment {
    pub text: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<RatingTriple>,
}

/// All votes of an entry, one list per axis.
#[derive(Default, Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct Ratings {
    #[serde(default)]
    pub cleanliness: Vec<i64>,
    #[serde(default)]
    pub accessibility: Vec<i64>,
    #[serde(default)]
    pub crowd: Vec<i64>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
pub struct RatingTriple {
    pub cleanliness: i64,
    pub accessibility: i64,
    pub crowd: i64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub name        : String,
    pub description : String,
    pub lat         : f64,
    pub lng         : f64,
    pub address     : String,
    pub summary     : String,
    pub comments    : Vec<Comment>,
    pub ratings     : RatingTriple,
    pub created_at  : String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct NewComment {
    pub text: String,
    pub timestamp: String,
    pub ratings: RatingTriple,
}

/// Acknowledgement of a write that returns no resource.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
pub struct Ack {
    #[serde(default)]
    pub ok: bool,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq, thiserror::Error))]
#[cfg_attr(feature = "extra-derive", error("{message} ({http_status})"))]
pub struct Error {
    #[serde(default)]
    pub http_status: u16,
    #[serde(alias = "detail")]
    pub message: String,
}
