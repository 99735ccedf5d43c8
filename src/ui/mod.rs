//! Text front end: reads commands line by line and
//! renders the map pane together with the side panel.

use pitstop_core::app::{Mdl, Msg};

pub mod input;
pub mod render;

use self::input::Command;

/// What the session loop should do next.
#[derive(Debug)]
pub enum Action {
    Update(Msg),
    Render,
    Help,
    Quit,
    /// The input is not applicable in the current state.
    Reject(String),
}

/// Translate a command into a message of the application model.
///
/// Some commands depend on the active panel: ratings and
/// submissions go to the composer or to the comment form.
pub fn action(cmd: Command, mdl: &Mdl) -> Action {
    let msg = match cmd {
        Command::Help => return Action::Help,
        Command::Show => return Action::Render,
        Command::Quit => return Action::Quit,
        Command::Reload => Msg::FetchEntries,
        Command::LocateMe => Msg::LocateMe,
        Command::Move(pos) => Msg::MapMoved(pos),
        Command::Click(pos) => Msg::MapClicked(pos),
        Command::Select(selector) => {
            let id = selector
                .parse::<usize>()
                .ok()
                .and_then(|position| render::entry_at(mdl, position))
                .unwrap_or_else(|| selector.as_str().into());
            Msg::SelectEntry(id)
        }
        Command::Back => Msg::GoBack,
        Command::Cancel => Msg::CancelComposer,
        Command::Name(name) => Msg::SetEntryName(name),
        Command::Description(description) => Msg::SetEntryDescription(description),
        Command::Comment(text) => Msg::SetCommentText(text),
        Command::Rate(axis, value) => {
            if mdl.view.composing().is_some() {
                Msg::SetEntryRating(axis, value)
            } else if mdl.view.viewing().is_some() {
                Msg::SetCommentRating(axis, value)
            } else {
                return Action::Reject("Select an entry or click on the map first".into());
            }
        }
        Command::Submit => {
            if mdl.view.composing().is_some() {
                Msg::SubmitEntry
            } else {
                // Rejected by the model if no entry is selected.
                Msg::SubmitComment
            }
        }
        Command::TogglePanel => Msg::TogglePanel,
        Command::Resize(width) => Msg::DisplayResized(width),
    };
    Action::Update(msg)
}
