use std::collections::HashMap;

use crate::{
    form::*,
    gateways,
    store::EntryStore,
    util::validate::{AutoCorrect, Validate},
    view::{CompositionId, ViewStateMachine},
    Error,
};
use pitstop_entities::{comment::*, entry::*, geo::*, id::*, rating::*, time::*};

/// The payload of a create request.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub name        : String,
    pub description : String,
    pub pos         : MapPoint,
    pub address     : String,
    pub summary     : String,
    pub comments    : Vec<Comment>,
    pub ratings     : RatingTriple,
    pub created_at  : Timestamp,
}

impl NewEntry {
    /// The description doubles as the text of the first comment.
    pub fn new(
        name: String,
        description: String,
        pos: MapPoint,
        address: String,
        ratings: RatingTriple,
        created_at: Timestamp,
    ) -> Self {
        let comments = vec![Comment {
            text: description.clone(),
            created_at,
            ratings: None,
        }];
        Self {
            name,
            description,
            pos,
            address,
            summary: String::new(),
            comments,
            ratings,
            created_at,
        }
    }
}

/// The payload of an append comment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub text: String,
    pub created_at: Timestamp,
    pub ratings: RatingTriple,
}

impl NewComment {
    fn into_comment(self) -> (Comment, RatingTriple) {
        let Self {
            text,
            created_at,
            ratings,
        } = self;
        let comment = Comment {
            text,
            created_at,
            ratings: Some(ratings),
        };
        (comment, ratings)
    }
}

/// Correlates a dispatched write with its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
enum Pending {
    Create { composition: CompositionId },
    Comment { entry_id: Id, comment: NewComment },
}

/// How a completed write has been reconciled.
#[derive(Debug)]
pub enum Reconciled {
    /// `current` tells if the user still looks at the
    /// composer or entry the write was issued from.
    Applied { id: Id, current: bool },
    Failed { current: bool, err: gateways::Error },
    /// No write with this ID is in flight.
    Unknown,
}

/// Orchestrates the two write flows.
///
/// A write is validated locally, dispatched and then reconciled with
/// the [`EntryStore`] once its completion arrives. Nothing is written
/// to the store before the backend confirmed the write. A completion
/// that arrives after the user moved on is still recorded in the store
/// but leaves the view alone.
#[derive(Debug, Default)]
pub struct MutationCoordinator {
    last_request: u64,
    pending: HashMap<RequestId, Pending>,
}

impl MutationCoordinator {
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    fn next_request(&mut self, pending: Pending) -> RequestId {
        self.last_request += 1;
        let request = RequestId(self.last_request);
        self.pending.insert(request, pending);
        request
    }

    pub fn begin_create(
        &mut self,
        view: &ViewStateMachine,
        form: &EntryForm,
        created_at: Timestamp,
    ) -> Result<(RequestId, NewEntry), Error> {
        let composition = view.composing().ok_or(Error::NotComposing)?;
        let new_entry = NewEntry::new(
            form.name.clone(),
            form.description.clone(),
            composition.pos,
            composition.address.clone(),
            form.ratings,
            created_at,
        )
        .auto_correct();
        new_entry.validate()?;
        let request = self.next_request(Pending::Create {
            composition: composition.id,
        });
        log::debug!("Creating entry '{}' ({request})", new_entry.name);
        Ok((request, new_entry))
    }

    pub fn finish_create(
        &mut self,
        request: RequestId,
        result: gateways::Result<Entry>,
        store: &mut EntryStore,
        view: &mut ViewStateMachine,
    ) -> Reconciled {
        let Some(Pending::Create { composition }) = self.pending.remove(&request) else {
            log::warn!("Unexpected completion of create request {request}");
            return Reconciled::Unknown;
        };
        match result {
            Ok(entry) => {
                let id = entry.id.clone();
                store.append(entry);
                let current = view.submitted(composition);
                if !current {
                    log::info!("Entry {id} has been created after its composer was closed");
                }
                Reconciled::Applied { id, current }
            }
            Err(err) => {
                let current = view.is_composing(composition);
                if current {
                    log::warn!("Failed to create entry: {err}");
                } else {
                    log::info!("Discarding failed create request {request}: {err}");
                }
                Reconciled::Failed { current, err }
            }
        }
    }

    pub fn begin_comment(
        &mut self,
        view: &ViewStateMachine,
        store: &EntryStore,
        form: &CommentForm,
        created_at: Timestamp,
    ) -> Result<(RequestId, Id, NewComment), Error> {
        let entry_id = view.viewing().ok_or(Error::NotViewing)?;
        if !store.contains(entry_id) {
            return Err(Error::EntryNotFound);
        }
        let comment = NewComment {
            text: form.text.clone(),
            created_at,
            ratings: form.ratings,
        }
        .auto_correct();
        comment.validate()?;
        let entry_id = entry_id.clone();
        let request = self.next_request(Pending::Comment {
            entry_id: entry_id.clone(),
            comment: comment.clone(),
        });
        log::debug!("Commenting on entry {entry_id} ({request})");
        Ok((request, entry_id, comment))
    }

    pub fn finish_comment(
        &mut self,
        request: RequestId,
        result: gateways::Result<()>,
        store: &mut EntryStore,
        view: &ViewStateMachine,
    ) -> Reconciled {
        let Some(Pending::Comment { entry_id, comment }) = self.pending.remove(&request) else {
            log::warn!("Unexpected completion of comment request {request}");
            return Reconciled::Unknown;
        };
        let current = view.viewing() == Some(&entry_id);
        match result {
            Ok(()) => {
                // The backend does not echo the updated entry,
                // so the local copy has to be updated here.
                let (comment, ratings) = comment.into_comment();
                if let Err(err) = store.append_comment(&entry_id, comment, ratings) {
                    log::warn!("Unable to record the comment on entry {entry_id}: {err}");
                }
                Reconciled::Applied {
                    id: entry_id,
                    current,
                }
            }
            Err(err) => {
                if current {
                    log::warn!("Failed to comment on entry {entry_id}: {err}");
                } else {
                    log::info!("Discarding failed comment request {request}: {err}");
                }
                Reconciled::Failed { current, err }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitstop_entities::builders::*;

    fn pos() -> MapPoint {
        MapPoint::from_lat_lng_deg(35.001, 139.001)
    }

    fn transport_error() -> gateways::Error {
        gateways::Error::Transport("connection refused".into())
    }

    fn composing() -> ViewStateMachine {
        let mut view = ViewStateMachine::default();
        view.click_map(pos());
        view
    }

    fn entry_form(name: &str) -> EntryForm {
        EntryForm {
            name: name.into(),
            description: "Spotless".into(),
            ..Default::default()
        }
    }

    fn store_with(id: &str) -> EntryStore {
        let mut store = EntryStore::default();
        store.append(
            Entry::build()
                .id(id)
                .ratings(RatingTriple::default())
                .comment("created")
                .finish(),
        );
        store
    }

    fn viewing(id: &str) -> ViewStateMachine {
        let mut view = ViewStateMachine::default();
        view.select(id.into());
        view
    }

    #[test]
    fn create_requires_composer() {
        let mut mc = MutationCoordinator::default();
        let res = mc.begin_create(
            &ViewStateMachine::default(),
            &entry_form("Stop"),
            Timestamp::now(),
        );
        assert!(matches!(res, Err(Error::NotComposing)));
        assert_eq!(mc.in_flight(), 0);
    }

    #[test]
    fn create_requires_name() {
        let mut mc = MutationCoordinator::default();
        let res = mc.begin_create(&composing(), &entry_form("  "), Timestamp::now());
        assert!(matches!(res, Err(Error::EmptyName)));
        assert_eq!(mc.in_flight(), 0);
    }

    #[test]
    fn create_payload() {
        let mut mc = MutationCoordinator::default();
        let mut view = composing();
        let composition = view.composing().unwrap().id;
        view.set_address(composition, "Tokyo, JP".into());
        let now = Timestamp::from_secs(1_714_564_800);
        let (_, new_entry) = mc
            .begin_create(&view, &entry_form(" Clean Stop "), now)
            .unwrap();
        assert_eq!(new_entry.name, "Clean Stop");
        assert_eq!(new_entry.address, "Tokyo, JP");
        assert_eq!(new_entry.pos, pos());
        assert_eq!(new_entry.summary, "");
        assert_eq!(new_entry.created_at, now);
        assert_eq!(new_entry.comments.len(), 1);
        assert_eq!(new_entry.comments[0].text, "Spotless");
        assert_eq!(new_entry.comments[0].created_at, now);
        assert!(new_entry.comments[0].ratings.is_none());
    }

    #[test]
    fn successful_create() {
        let mut mc = MutationCoordinator::default();
        let mut view = composing();
        let mut store = EntryStore::default();
        let (request, _) = mc
            .begin_create(&view, &entry_form("Stop"), Timestamp::now())
            .unwrap();
        assert!(store.is_empty());

        let created = Entry::build().id("server-id").pos(pos()).finish();
        let res = mc.finish_create(request, Ok(created), &mut store, &mut view);
        assert!(matches!(res, Reconciled::Applied { current: true, .. }));
        assert!(view.is_browsing());
        assert!(store.contains(&"server-id".into()));
        assert_eq!(mc.in_flight(), 0);
    }

    #[test]
    fn failed_create_keeps_composing() {
        let mut mc = MutationCoordinator::default();
        let mut view = composing();
        let composition = view.composing().unwrap().id;
        view.set_address(composition, "Tokyo, JP".into());
        let mut store = EntryStore::default();
        let (request, _) = mc
            .begin_create(&view, &entry_form("Stop"), Timestamp::now())
            .unwrap();
        let res = mc.finish_create(request, Err(transport_error()), &mut store, &mut view);
        assert!(matches!(res, Reconciled::Failed { current: true, .. }));
        assert_eq!(view.composing().unwrap().address, "Tokyo, JP");
        assert!(store.is_empty());
    }

    #[test]
    fn create_completes_after_cancel() {
        let mut mc = MutationCoordinator::default();
        let mut view = composing();
        let mut store = EntryStore::default();
        let (request, _) = mc
            .begin_create(&view, &entry_form("Stop"), Timestamp::now())
            .unwrap();
        view.cancel();
        view.select("other".into());
        let created = Entry::build().id("late").finish();
        let res = mc.finish_create(request, Ok(created), &mut store, &mut view);
        assert!(matches!(res, Reconciled::Applied { current: false, .. }));
        assert!(store.contains(&"late".into()));
        assert_eq!(view.viewing(), Some(&"other".into()));
    }

    #[test]
    fn create_leaves_a_reopened_composer_at_the_same_position_alone() {
        let mut mc = MutationCoordinator::default();
        let mut view = composing();
        let mut store = EntryStore::default();
        let (request, _) = mc
            .begin_create(&view, &entry_form("Stop"), Timestamp::now())
            .unwrap();
        view.cancel();
        view.click_map(pos());
        let created = Entry::build().id("late").pos(pos()).finish();
        let res = mc.finish_create(request, Ok(created), &mut store, &mut view);
        assert!(matches!(res, Reconciled::Applied { current: false, .. }));
        assert!(store.contains(&"late".into()));
        assert_eq!(view.composing().unwrap().pos, pos());
    }

    #[test]
    fn failed_create_is_not_reported_to_a_reopened_composer() {
        let mut mc = MutationCoordinator::default();
        let mut view = composing();
        let (request, _) = mc
            .begin_create(&view, &entry_form("Stop"), Timestamp::now())
            .unwrap();
        view.cancel();
        view.click_map(pos());
        let res = mc.finish_create(
            request,
            Err(transport_error()),
            &mut EntryStore::default(),
            &mut view,
        );
        assert!(matches!(res, Reconciled::Failed { current: false, .. }));
        assert!(view.composing().is_some());
    }

    #[test]
    fn unknown_completion() {
        let mut mc = MutationCoordinator::default();
        let res = mc.finish_comment(
            RequestId(42),
            Ok(()),
            &mut EntryStore::default(),
            &ViewStateMachine::default(),
        );
        assert!(matches!(res, Reconciled::Unknown));
    }

    #[test]
    fn comment_requires_viewing() {
        let mut mc = MutationCoordinator::default();
        let form = CommentForm {
            text: "nice".into(),
            ..Default::default()
        };
        let res = mc.begin_comment(
            &ViewStateMachine::default(),
            &store_with("a"),
            &form,
            Timestamp::now(),
        );
        assert!(matches!(res, Err(Error::NotViewing)));
    }

    #[test]
    fn blank_comment_is_rejected() {
        let mut mc = MutationCoordinator::default();
        let form = CommentForm {
            text: "   ".into(),
            ..Default::default()
        };
        let res = mc.begin_comment(&viewing("a"), &store_with("a"), &form, Timestamp::now());
        assert!(matches!(res, Err(Error::EmptyComment)));
        assert_eq!(mc.in_flight(), 0);
    }

    #[test]
    fn successful_comment() {
        let mut mc = MutationCoordinator::default();
        let view = viewing("a");
        let mut store = store_with("a");
        let mut form = CommentForm {
            text: "  tidy  ".into(),
            ..Default::default()
        };
        form.ratings.set(RatingAxis::Cleanliness, RatingValue::max());
        let (request, entry_id, comment) = mc
            .begin_comment(&view, &store, &form, Timestamp::now())
            .unwrap();
        assert_eq!(entry_id, Id::from("a"));
        assert_eq!(comment.text, "tidy");

        let res = mc.finish_comment(request, Ok(()), &mut store, &view);
        assert!(matches!(res, Reconciled::Applied { current: true, .. }));
        let entry = store.get(&"a".into()).unwrap();
        assert_eq!(entry.comments.len(), 2);
        assert_eq!(entry.comments[1].text, "tidy");
        assert_eq!(entry.ratings.cleanliness, [RatingValue::default(), RatingValue::max()]);
        assert_eq!(entry.ratings.crowd.len(), 2);
    }

    #[test]
    fn failed_comment_leaves_the_entry_alone() {
        let mut mc = MutationCoordinator::default();
        let view = viewing("a");
        let mut store = store_with("a");
        let form = CommentForm {
            text: "tidy".into(),
            ..Default::default()
        };
        let (request, _, _) = mc
            .begin_comment(&view, &store, &form, Timestamp::now())
            .unwrap();
        let res = mc.finish_comment(request, Err(transport_error()), &mut store, &view);
        assert!(matches!(res, Reconciled::Failed { current: true, .. }));
        let entry = store.get(&"a".into()).unwrap();
        assert_eq!(entry.comments.len(), 1);
        assert_eq!(entry.ratings.accessibility.len(), 1);
    }

    #[test]
    fn comment_completes_after_going_back() {
        let mut mc = MutationCoordinator::default();
        let mut view = viewing("a");
        let mut store = store_with("a");
        let form = CommentForm {
            text: "tidy".into(),
            ..Default::default()
        };
        let (request, _, _) = mc
            .begin_comment(&view, &store, &form, Timestamp::now())
            .unwrap();
        view.go_back();
        let res = mc.finish_comment(request, Ok(()), &mut store, &view);
        assert!(matches!(res, Reconciled::Applied { current: false, .. }));
        assert_eq!(store.get(&"a".into()).unwrap().comments.len(), 2);
    }
}
