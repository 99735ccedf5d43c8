//! The application model of the client.
//!
//! Every external event is a [`Msg`]. [`update`] processes one message
//! at a time and to completion, mutating the [`Mdl`] and requesting
//! side effects through [`Orders`].

use crate::{
    form::*,
    gateways::{self, geolocation},
    mutation::{MutationCoordinator, Reconciled, RequestId},
    rating::Rated,
    store::EntryStore,
    util::sort::{rank_by_distance, Ranked},
    view::{CompositionId, ViewStateMachine},
    viewport::{StartupPolicy, ViewportController},
    Error,
};
use pitstop_entities::{comment, entry::*, geo::*, id::*, rating::*, time::*};

mod cmd;
mod orders;

pub use self::{cmd::*, orders::*};

/// Marker images handed to the map widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcons {
    pub icon_url: String,
    pub icon_retina_url: String,
    pub shadow_url: String,
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub startup: StartupPolicy,
    pub mobile_breakpoint: u32,
    pub display_width: u32,
    pub marker_icons: MarkerIcons,
}

#[derive(Debug)]
pub struct Mdl {
    pub settings: Settings,
    pub display_width: u32,
    pub store: EntryStore,
    pub view: ViewStateMachine,
    pub viewport: ViewportController,
    pub mutations: MutationCoordinator,
    pub entry_form: EntryForm,
    pub comment_form: CommentForm,
    /// Local validation failure of the last submission.
    pub form_feedback: Option<Error>,
}

#[derive(Debug)]
pub enum Msg {
    FetchEntries,
    GotEntries(gateways::Result<Vec<Entry>>),
    LocateMe,
    Located(Result<MapPoint, geolocation::Error>),
    MapMoved(MapPoint),
    MapClicked(MapPoint),
    GotAddress {
        composition: CompositionId,
        address: String,
    },
    SelectEntry(Id),
    GoBack,
    CancelComposer,
    SetEntryName(String),
    SetEntryDescription(String),
    SetEntryRating(RatingAxis, RatingValue),
    SubmitEntry,
    EntryCreated {
        request: RequestId,
        result: gateways::Result<Entry>,
    },
    SetCommentText(String),
    SetCommentRating(RatingAxis, RatingValue),
    SubmitComment,
    CommentAdded {
        request: RequestId,
        result: gateways::Result<()>,
    },
    TogglePanel,
    DisplayResized(u32),
}

/// A marker on the map that selects its entry when clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub pos: MapPoint,
    pub entry_id: Id,
}

impl Marker {
    pub fn on_click(&self) -> Msg {
        Msg::SelectEntry(self.entry_id.clone())
    }
}

/// The initial entry fetch and the initial geolocation request
/// are issued together, without any ordering between them.
pub fn init(settings: Settings, orders: &mut impl Orders) -> Mdl {
    orders.perform_cmd(Cmd::FetchEntries);
    orders.perform_cmd(Cmd::Locate);
    Mdl {
        viewport: ViewportController::new(settings.startup),
        display_width: settings.display_width,
        settings,
        store: EntryStore::default(),
        view: ViewStateMachine::default(),
        mutations: MutationCoordinator::default(),
        entry_form: EntryForm::default(),
        comment_form: CommentForm::default(),
        form_feedback: None,
    }
}

pub fn update(msg: Msg, mdl: &mut Mdl, orders: &mut impl Orders) {
    match msg {
        Msg::FetchEntries => {
            orders.perform_cmd(Cmd::FetchEntries);
        }
        Msg::GotEntries(Ok(entries)) => {
            log::info!("Loaded {} entries", entries.len());
            mdl.store.replace_all(entries);
            if let Some(id) = mdl.view.viewing().cloned() {
                if !mdl.store.contains(&id) {
                    log::warn!("The selected entry {id} is gone");
                    mdl.view.forget(&id);
                }
            }
        }
        Msg::GotEntries(Err(err)) => {
            log::warn!("Failed to load entries: {err}");
        }
        Msg::LocateMe => {
            orders.perform_cmd(Cmd::Locate);
        }
        Msg::Located(Ok(pos)) => {
            if mdl.viewport.on_located(pos) {
                log::debug!("Located at {pos}");
            }
        }
        Msg::Located(Err(err)) => {
            mdl.viewport.on_locate_failed(&err);
        }
        Msg::MapMoved(pos) => {
            mdl.viewport.on_map_moved(pos);
        }
        Msg::MapClicked(pos) => {
            if !pos.is_valid() {
                log::warn!("Ignoring click at invalid position {pos}");
                return;
            }
            mdl.form_feedback = None;
            let composition = mdl.view.click_map(pos);
            orders.perform_cmd(Cmd::ReverseGeocode { composition, pos });
        }
        Msg::GotAddress {
            composition,
            address,
        } => {
            if !mdl.view.set_address(composition, address) {
                log::debug!("Discarding address of abandoned composition {composition}");
            }
        }
        Msg::SelectEntry(id) => {
            if !mdl.store.contains(&id) {
                log::warn!("Cannot select entry {id}: {}", Error::EntryNotFound);
                return;
            }
            mdl.form_feedback = None;
            mdl.view.select(id);
        }
        Msg::GoBack => {
            mdl.view.go_back();
        }
        Msg::CancelComposer => {
            if mdl.view.cancel() {
                mdl.form_feedback = None;
            }
        }
        Msg::SetEntryName(name) => {
            mdl.entry_form.name = name;
        }
        Msg::SetEntryDescription(description) => {
            mdl.entry_form.description = description;
        }
        Msg::SetEntryRating(axis, value) => {
            mdl.entry_form.ratings.set(axis, value);
        }
        Msg::SubmitEntry => {
            match mdl
                .mutations
                .begin_create(&mdl.view, &mdl.entry_form, Timestamp::now())
            {
                Ok((request, new_entry)) => {
                    mdl.form_feedback = None;
                    orders.perform_cmd(Cmd::CreateEntry { request, new_entry });
                }
                Err(err) => {
                    log::debug!("Rejected new entry: {err}");
                    mdl.form_feedback = Some(err);
                }
            }
        }
        Msg::EntryCreated { request, result } => {
            match mdl
                .mutations
                .finish_create(request, result, &mut mdl.store, &mut mdl.view)
            {
                Reconciled::Applied { id, current: true } => {
                    let name = mdl
                        .store
                        .get(&id)
                        .map(|e| e.name.clone())
                        .unwrap_or_default();
                    mdl.entry_form.reset();
                    orders.notify(Notice::EntryCreated(name));
                }
                Reconciled::Failed { current: true, err } => {
                    orders.notify(Notice::CreateEntryFailed(err.to_string()));
                }
                Reconciled::Applied { current: false, .. }
                | Reconciled::Failed { current: false, .. }
                | Reconciled::Unknown => {}
            }
        }
        Msg::SetCommentText(text) => {
            mdl.comment_form.text = text;
        }
        Msg::SetCommentRating(axis, value) => {
            mdl.comment_form.ratings.set(axis, value);
        }
        Msg::SubmitComment => {
            match mdl.mutations.begin_comment(
                &mdl.view,
                &mdl.store,
                &mdl.comment_form,
                Timestamp::now(),
            ) {
                Ok((request, entry_id, comment)) => {
                    mdl.form_feedback = None;
                    orders.perform_cmd(Cmd::AddComment {
                        request,
                        entry_id,
                        comment,
                    });
                }
                Err(err) => {
                    log::debug!("Rejected comment: {err}");
                    mdl.form_feedback = Some(err);
                }
            }
        }
        Msg::CommentAdded { request, result } => {
            match mdl
                .mutations
                .finish_comment(request, result, &mut mdl.store, &mdl.view)
            {
                Reconciled::Applied { current: true, .. } => {
                    mdl.comment_form.reset();
                }
                Reconciled::Failed { current: true, err } => {
                    // The draft is kept for another attempt.
                    orders.notify(Notice::AddCommentFailed(err.to_string()));
                }
                Reconciled::Applied { current: false, .. }
                | Reconciled::Failed { current: false, .. }
                | Reconciled::Unknown => {}
            }
        }
        Msg::TogglePanel => {
            mdl.view.toggle_panel();
        }
        Msg::DisplayResized(width) => {
            mdl.display_width = width;
        }
    }
}

impl Mdl {
    /// The entries ordered by their distance to the map center.
    pub fn ranked_entries(&self) -> Vec<Ranked<'_>> {
        rank_by_distance(self.store.entries(), self.viewport.center())
    }

    /// One marker per entry in collection order.
    ///
    /// Nothing is shown on the map as long as its center is unknown.
    pub fn markers(&self) -> Vec<Marker> {
        if !self.viewport.is_known() {
            return vec![];
        }
        self.store
            .entries()
            .iter()
            .filter(|e| e.pos.is_valid())
            .map(|e| Marker {
                pos: e.pos,
                entry_id: e.id.clone(),
            })
            .collect()
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.view.viewing().and_then(|id| self.store.get(id))
    }

    /// The comments of the selected entry, newest first.
    pub fn selected_comments(&self) -> Vec<&comment::Comment> {
        self.selected_entry()
            .map(|e| comment::newest_first(&e.comments))
            .unwrap_or_default()
    }

    pub fn selected_ratings(&self) -> Option<AvgRatings> {
        self.selected_entry().map(|e| e.avg_ratings())
    }

    pub fn panel_shown(&self) -> bool {
        self.view
            .panel_shown(self.display_width, self.settings.mobile_breakpoint)
    }
}
