use pitstop_entities::{geo::*, id::*};

/// Identifies a single opening of the composer.
///
/// Clicking the same position twice yields two different IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositionId(u64);

impl std::fmt::Display for CompositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A new entry that is anchored on the map but not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub id: CompositionId,
    pub pos: MapPoint,
    /// Empty until the reverse geocoding lookup returned.
    pub address: String,
}

impl Composition {
    fn new(id: CompositionId, pos: MapPoint) -> Self {
        Self {
            id,
            pos,
            address: String::new(),
        }
    }

    /// The address or, while it is unknown, the coordinates.
    pub fn location_label(&self) -> String {
        if self.address.is_empty() {
            let (lat, lng) = self.pos.to_lat_lng_deg();
            format!("{lat:.5}, {lng:.5}")
        } else {
            self.address.clone()
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub enum ViewState {
    #[default]
    Browsing,
    Viewing(Id),
    Composing(Composition),
}

/// Decides which of the three panels is active.
///
/// The visibility of the side panel is tracked separately. It starts
/// visible and entering [`ViewState::Viewing`] or [`ViewState::Composing`]
/// shows it again after it has been toggled off.
#[derive(Debug, Clone)]
pub struct ViewStateMachine {
    state: ViewState,
    panel_visible: bool,
    last_composition: u64,
}

impl Default for ViewStateMachine {
    fn default() -> Self {
        Self {
            state: ViewState::default(),
            panel_visible: true,
            last_composition: 0,
        }
    }
}

impl ViewStateMachine {
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn viewing(&self) -> Option<&Id> {
        match &self.state {
            ViewState::Viewing(id) => Some(id),
            _ => None,
        }
    }

    pub fn composing(&self) -> Option<&Composition> {
        match &self.state {
            ViewState::Composing(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_browsing(&self) -> bool {
        self.state == ViewState::Browsing
    }

    /// Select an entry, abandoning a pending composition.
    pub fn select(&mut self, id: Id) {
        self.state = ViewState::Viewing(id);
        self.panel_visible = true;
    }

    /// Start composing a new entry at `pos`, clearing any selection.
    pub fn click_map(&mut self, pos: MapPoint) -> CompositionId {
        self.last_composition += 1;
        let id = CompositionId(self.last_composition);
        self.state = ViewState::Composing(Composition::new(id, pos));
        self.panel_visible = true;
        id
    }

    /// Leave the detail view.
    pub fn go_back(&mut self) -> bool {
        if self.viewing().is_none() {
            return false;
        }
        self.state = ViewState::Browsing;
        true
    }

    /// Leave the composer without submitting.
    pub fn cancel(&mut self) -> bool {
        if self.composing().is_none() {
            return false;
        }
        self.state = ViewState::Browsing;
        true
    }

    /// Close the composer after the entry that was composed in it
    /// has been stored.
    ///
    /// Returns `false` if the user moved on in the meantime.
    pub fn submitted(&mut self, composition: CompositionId) -> bool {
        if !self.is_composing(composition) {
            return false;
        }
        self.state = ViewState::Browsing;
        true
    }

    /// Fill in the address of the given composition.
    ///
    /// Returns `false` if the composer has been closed or reopened.
    pub fn set_address(&mut self, composition: CompositionId, address: String) -> bool {
        match &mut self.state {
            ViewState::Composing(c) if c.id == composition => {
                c.address = address;
                true
            }
            _ => false,
        }
    }

    /// Leave a detail view that shows the given entry.
    pub fn forget(&mut self, id: &Id) {
        if self.viewing() == Some(id) {
            self.state = ViewState::Browsing;
        }
    }

    pub fn is_composing(&self, composition: CompositionId) -> bool {
        self.composing().is_some_and(|c| c.id == composition)
    }

    pub const fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn toggle_panel(&mut self) {
        self.panel_visible = !self.panel_visible;
    }

    /// Wide displays always show the side panel, narrow ones
    /// only if it has been made visible.
    pub const fn panel_shown(&self, display_width: u32, mobile_breakpoint: u32) -> bool {
        display_width > mobile_breakpoint || self.panel_visible
    }
}
