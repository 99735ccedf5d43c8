use super::Msg;
use crate::{
    gateways::{backend::*, geocode::*, geolocation::*},
    mutation::{NewComment, NewEntry, RequestId},
    view::CompositionId,
};
use pitstop_entities::{geo::MapPoint, id::Id};

/// The outbound collaborators of the client.
pub struct Gateways {
    pub backend: Box<dyn EntryGateway + Send + Sync>,
    pub geocoding: Box<dyn GeoCodingGateway + Send + Sync>,
    pub geolocation: Box<dyn GeoLocationGateway + Send + Sync>,
}

impl std::fmt::Debug for Gateways {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Gateways").finish_non_exhaustive()
    }
}

/// An asynchronous request whose completion is reported as a [`Msg`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    FetchEntries,
    Locate,
    ReverseGeocode {
        composition: CompositionId,
        pos: MapPoint,
    },
    CreateEntry {
        request: RequestId,
        new_entry: NewEntry,
    },
    AddComment {
        request: RequestId,
        entry_id: Id,
        comment: NewComment,
    },
}

impl Cmd {
    /// Run the command to completion.
    ///
    /// This blocks until the gateway answered and never fails:
    /// failures are reported within the returned message.
    pub fn perform(self, gw: &Gateways) -> Msg {
        match self {
            Self::FetchEntries => Msg::GotEntries(gw.backend.all_entries()),
            Self::Locate => Msg::Located(gw.geolocation.current_position()),
            Self::ReverseGeocode { composition, pos } => {
                let address = gw.geocoding.resolve_address(pos).unwrap_or_default();
                Msg::GotAddress {
                    composition,
                    address,
                }
            }
            Self::CreateEntry { request, new_entry } => Msg::EntryCreated {
                request,
                result: gw.backend.create_entry(&new_entry),
            },
            Self::AddComment {
                request,
                entry_id,
                comment,
            } => Msg::CommentAdded {
                request,
                result: gw.backend.add_comment(&entry_id, &comment),
            },
        }
    }
}
