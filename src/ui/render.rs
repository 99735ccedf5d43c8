use std::{
    collections::HashMap,
    fmt::{self, Display},
};

use pitstop_core::{
    app::{MarkerIcons, Mdl},
    rating::Rated as _,
    view::{Composition, ViewState},
};
use pitstop_entities::{entry::Entry, geo::MapPoint, id::Id, rating::*};

const NO_SUMMARY: &str = "No summary yet";

/// The map pane followed by the side panel.
#[derive(Debug)]
pub struct Screen<'a> {
    pub mdl: &'a Mdl,
    pub zoom: u8,
}

impl Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        map_pane(f, self.mdl, self.zoom)?;
        writeln!(f)?;
        if !self.mdl.panel_shown() {
            return writeln!(f, "(side panel hidden, type 'panel' to show it)");
        }
        match self.mdl.view.state() {
            ViewState::Browsing => browse_list(f, self.mdl),
            ViewState::Viewing(id) => detail(f, self.mdl, id),
            ViewState::Composing(composition) => composer(f, self.mdl, composition),
        }
    }
}

struct RatingSummary(AvgRatings);

impl Display for RatingSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let AvgRatings {
            cleanliness,
            accessibility,
            crowd,
        } = self.0;
        write!(f, "🧼 {cleanliness} ♿ {accessibility} 🚶 {crowd}")
    }
}

struct Triple(RatingTriple);

impl Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let RatingTriple {
            cleanliness,
            accessibility,
            crowd,
        } = self.0;
        write!(
            f,
            "cleanliness {cleanliness}, accessibility {accessibility}, crowd {crowd}"
        )
    }
}

fn lat_lng(pos: MapPoint) -> String {
    let (lat, lng) = pos.to_lat_lng_deg();
    format!("{lat:.5}, {lng:.5}")
}

fn map_pane(f: &mut impl fmt::Write, mdl: &Mdl, zoom: u8) -> fmt::Result {
    let Some(center) = mdl.viewport.center() else {
        return writeln!(f, "🗺  Waiting for your position ...");
    };
    writeln!(f, "🗺  {} (zoom {zoom})", lat_lng(center))?;
    // Markers are labeled with their position in the browse list
    // so that `select <n>` picks the same entry.
    let list_positions: HashMap<&Id, usize> = mdl
        .ranked_entries()
        .into_iter()
        .enumerate()
        .map(|(i, r)| (&r.entry.id, i + 1))
        .collect();
    for marker in mdl.markers() {
        let name = mdl
            .store
            .get(&marker.entry_id)
            .map(|e| e.name.as_str())
            .unwrap_or_default();
        match list_positions.get(&marker.entry_id) {
            Some(n) => writeln!(f, "  📍 [{n}] {name} at {}", lat_lng(marker.pos))?,
            None => writeln!(f, "  📍 {name} at {}", lat_lng(marker.pos))?,
        }
    }
    writeln!(f, "  📍 You are here")
}

fn browse_list(f: &mut impl fmt::Write, mdl: &Mdl) -> fmt::Result {
    writeln!(f, "Nearby (closest first)")?;
    let ranked = mdl.ranked_entries();
    if ranked.is_empty() {
        return writeln!(f, "  Nothing here yet. Click on the map to add an entry.");
    }
    for (i, r) in ranked.iter().enumerate() {
        let Entry { name, summary, .. } = r.entry;
        let ratings = RatingSummary(r.entry.avg_ratings());
        write!(f, "{:>3}. {name}  {ratings}", i + 1)?;
        if let Some(distance) = r.distance {
            write!(f, "  {:.0} m", distance.to_meters())?;
        }
        writeln!(f)?;
        let summary = if summary.is_empty() {
            NO_SUMMARY
        } else {
            summary.as_str()
        };
        writeln!(f, "     {summary}")?;
    }
    Ok(())
}

fn detail(f: &mut impl fmt::Write, mdl: &Mdl, id: &Id) -> fmt::Result {
    let (Some(entry), Some(ratings)) = (mdl.selected_entry(), mdl.selected_ratings()) else {
        return writeln!(f, "Entry {id} not found");
    };
    writeln!(f, "← back")?;
    writeln!(f, "{}  {}", entry.name, RatingSummary(ratings))?;
    if !entry.description.is_empty() {
        writeln!(f, "{}", entry.description)?;
    }
    if !entry.address.is_empty() {
        writeln!(f, "{}", entry.address)?;
    }
    writeln!(f, "🧭 {}", entry.directions_url())?;
    writeln!(f)?;
    writeln!(f, "💬 Reviews")?;
    for comment in mdl.selected_comments() {
        writeln!(f, "  - {} ({})", comment.text, comment.created_at)?;
    }
    writeln!(f)?;
    let form = &mdl.comment_form;
    writeln!(f, "Your review: {:?}", form.text)?;
    writeln!(f, "  {}", Triple(form.ratings))?;
    feedback(f, mdl)
}

fn composer(f: &mut impl fmt::Write, mdl: &Mdl, composition: &Composition) -> fmt::Result {
    let form = &mdl.entry_form;
    writeln!(f, "New entry")?;
    writeln!(f, "📍 {}", composition.location_label())?;
    writeln!(f, "Name: {:?}", form.name)?;
    writeln!(f, "Description: {:?}", form.description)?;
    writeln!(f, "  {}", Triple(form.ratings))?;
    feedback(f, mdl)
}

fn feedback(f: &mut impl fmt::Write, mdl: &Mdl) -> fmt::Result {
    match &mdl.form_feedback {
        Some(err) => writeln!(f, "⚠ {err}"),
        None => Ok(()),
    }
}

/// The list position of an entry as shown in the browse list.
pub fn entry_at(mdl: &Mdl, position: usize) -> Option<Id> {
    position
        .checked_sub(1)
        .and_then(|i| mdl.ranked_entries().get(i).map(|r| r.entry.id.clone()))
}

pub fn marker_icons(mdl: &Mdl) -> String {
    let MarkerIcons {
        icon_url,
        icon_retina_url,
        shadow_url,
    } = &mdl.settings.marker_icons;
    format!(
        "Marker icon: {icon_url}\nMarker icon (retina): {icon_retina_url}\nMarker shadow: {shadow_url}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitstop_core::{
        app::{init, Msg, OrderQueue, Settings},
        viewport::StartupPolicy,
    };
    use pitstop_entities::{builders::*, comment::Comment, time::Timestamp};

    fn mdl(startup: StartupPolicy, display_width: u32) -> Mdl {
        let settings = Settings {
            startup,
            mobile_breakpoint: 768,
            display_width,
            marker_icons: MarkerIcons {
                icon_url: "icon.png".into(),
                icon_retina_url: "icon-2x.png".into(),
                shadow_url: "shadow.png".into(),
            },
        };
        let mut mdl = init(settings, &mut OrderQueue::default());
        let mut near = Entry::build()
            .id("near")
            .name("Station WC")
            .lat_lng(35.001, 139.0)
            .ratings(RatingTriple {
                cleanliness: RatingValue::max(),
                ..Default::default()
            })
            .finish();
        near.comments = vec![
            Comment {
                text: "old".into(),
                created_at: Timestamp::from_secs(1_000),
                ratings: None,
            },
            Comment {
                text: "new".into(),
                created_at: Timestamp::from_secs(2_000),
                ratings: None,
            },
        ];
        let far = Entry::build()
            .id("far")
            .name("Park")
            .summary("Behind the fountain")
            .lat_lng(35.1, 139.0)
            .finish();
        mdl.store.replace_all(vec![far, near]);
        mdl
    }

    fn here() -> StartupPolicy {
        StartupPolicy::FallbackCenter(MapPoint::from_lat_lng_deg(35.0, 139.0))
    }

    fn render(mdl: &Mdl) -> String {
        Screen { mdl, zoom: 14 }.to_string()
    }

    #[test]
    fn browse_list_is_ranked_by_distance() {
        let mdl = mdl(here(), 1024);
        let screen = render(&mdl);
        let near = screen.find("1. Station WC").unwrap();
        let far = screen.find("2. Park").unwrap();
        assert!(near < far);
        assert!(screen.contains("🧼 5.0 ♿ 3.0 🚶 3.0  111 m"));
        assert!(screen.contains("🧼 - ♿ - 🚶 -  11119 m"));
        assert!(screen.contains(NO_SUMMARY));
        assert!(screen.contains("Behind the fountain"));
    }

    #[test]
    fn map_pane_lists_markers_in_collection_order() {
        let mdl = mdl(here(), 1024);
        let screen = render(&mdl);
        assert!(screen.contains("🗺  35.00000, 139.00000 (zoom 14)"));
        let park = screen.find("[2] Park at 35.10000, 139.00000").unwrap();
        let station = screen.find("[1] Station WC at 35.00100, 139.00000").unwrap();
        assert!(park < station);
        assert!(screen.contains("You are here"));
    }

    #[test]
    fn marker_labels_match_list_positions() {
        let mdl = mdl(here(), 1024);
        let screen = render(&mdl);
        assert_eq!(entry_at(&mdl, 1), Some("near".into()));
        assert!(screen.contains("[1] Station WC"));
        assert_eq!(entry_at(&mdl, 2), Some("far".into()));
        assert!(screen.contains("[2] Park"));
    }

    #[test]
    fn deferred_map_shows_no_markers_and_distances() {
        let mdl = mdl(StartupPolicy::Defer, 1024);
        let screen = render(&mdl);
        assert!(screen.contains("Waiting for your position"));
        assert!(!screen.contains("📍"));
        assert!(!screen.contains(" m\n"));
        assert!(screen.contains("Park"));
    }

    #[test]
    fn detail_shows_newest_comment_first() {
        let mut mdl = mdl(here(), 1024);
        mdl.view.select("near".into());
        let screen = render(&mdl);
        assert!(screen.contains("Station WC  🧼 5.0 ♿ 3.0 🚶 3.0"));
        assert!(screen.contains("https://www.google.com/maps/dir/?api=1&destination=35.001,139"));
        let new = screen.find("- new").unwrap();
        let old = screen.find("- old").unwrap();
        assert!(new < old);
        assert!(screen.contains("Your review: \"\""));
    }

    #[test]
    fn composer_shows_coordinates_until_address_is_known() {
        let mut mdl = mdl(here(), 1024);
        let pos = MapPoint::from_lat_lng_deg(35.001, 139.001);
        let composition = mdl.view.click_map(pos);
        assert!(render(&mdl).contains("📍 35.00100, 139.00100"));
        mdl.view.set_address(composition, "1-1 Marunouchi".into());
        let screen = render(&mdl);
        assert!(screen.contains("📍 1-1 Marunouchi"));
        assert!(screen.contains("cleanliness 3, accessibility 3, crowd 3"));
    }

    #[test]
    fn narrow_display_shows_the_list_until_toggled() {
        let mut mdl = mdl(here(), 480);
        assert!(render(&mdl).contains("Nearby (closest first)"));
        pitstop_core::app::update(Msg::TogglePanel, &mut mdl, &mut OrderQueue::default());
        assert!(render(&mdl).contains("side panel hidden"));
        pitstop_core::app::update(Msg::TogglePanel, &mut mdl, &mut OrderQueue::default());
        assert!(render(&mdl).contains("Nearby (closest first)"));
    }

    #[test]
    fn validation_feedback_is_shown() {
        let mut mdl = mdl(here(), 1024);
        let mut orders = OrderQueue::default();
        pitstop_core::app::update(
            Msg::MapClicked(MapPoint::from_lat_lng_deg(35.0, 139.0)),
            &mut mdl,
            &mut orders,
        );
        pitstop_core::app::update(Msg::SubmitEntry, &mut mdl, &mut orders);
        assert!(render(&mdl).contains('⚠'));
    }

    #[test]
    fn list_positions_start_at_one() {
        let mdl = mdl(here(), 1024);
        assert_eq!(entry_at(&mdl, 0), None);
        assert_eq!(entry_at(&mdl, 1), Some("near".into()));
        assert_eq!(entry_at(&mdl, 2), Some("far".into()));
        assert_eq!(entry_at(&mdl, 3), None);
    }

    #[test]
    fn marker_icon_urls() {
        let mdl = mdl(here(), 1024);
        assert!(marker_icons(&mdl).contains("shadow.png"));
    }
}
