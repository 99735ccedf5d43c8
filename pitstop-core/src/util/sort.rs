use std::cmp::Ordering;

use pitstop_entities::{entry::*, geo::*};

pub trait DistanceTo {
    fn distance_to(&self, pos: MapPoint) -> Option<Distance>;
}

impl DistanceTo for Entry {
    fn distance_to(&self, pos: MapPoint) -> Option<Distance> {
        MapPoint::distance(self.pos, pos)
    }
}

/// An entry annotated with its distance to the map center.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a> {
    pub entry: &'a Entry,
    pub distance: Option<Distance>,
}

/// Project the entries onto a list ordered by ascending distance
/// to `center`.
///
/// Entries at the same distance keep their relative order. Entries with
/// invalid coordinates are moved to the end. Without a known center the
/// entries are returned in their original order and without distances.
pub fn rank_by_distance(entries: &[Entry], center: Option<MapPoint>) -> Vec<Ranked<'_>> {
    let center = center.filter(|c| c.is_valid());
    let mut ranked: Vec<_> = entries
        .iter()
        .map(|entry| Ranked {
            entry,
            distance: center.and_then(|c| entry.distance_to(c)),
        })
        .collect();
    if center.is_none() {
        return ranked;
    }
    for r in ranked.iter().filter(|r| r.distance.is_none()) {
        log::warn!("Invalid coordinate of entry {}: {}", r.entry.id, r.entry.pos);
    }
    ranked.sort_by(|a, b| match (a.distance, b.distance) {
        (Some(a), Some(b)) => a
            .to_meters()
            .partial_cmp(&b.to_meters())
            .unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked
}
