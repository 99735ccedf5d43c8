use pitstop_entities::{
    geo::{MapPoint, MapPointParseError},
    rating::{RatingAxis, RatingValue, RatingValueError},
};
use thiserror::Error;

/// A line typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Show,
    Quit,
    Reload,
    LocateMe,
    /// Report the map center after dragging.
    Move(MapPoint),
    Click(MapPoint),
    /// Select by list position (1-based) or by ID.
    Select(String),
    Back,
    Cancel,
    Name(String),
    Description(String),
    Comment(String),
    Rate(RatingAxis, RatingValue),
    Submit,
    TogglePanel,
    Resize(u32),
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Unknown command '{0}' (type 'help')")]
    UnknownCommand(String),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Position(#[from] MapPointParseError),
    #[error("Unknown rating '{0}'")]
    Axis(String),
    #[error("Invalid rating '{0}'")]
    Number(String),
    #[error(transparent)]
    RatingValue(#[from] RatingValueError),
    #[error("Invalid display width '{0}'")]
    Width(String),
}

pub const HELP: &str = "\
Commands:
  list | show                 render the current view
  reload                      fetch all entries again
  locate                      center the map on your position
  move <lat>,<lng>            report the map center after dragging
  click <lat>,<lng>           click on the map to add a new entry
  select <n|id>               show an entry
  back                        return to the list
  cancel                      close the composer
  name <text>                 name of the new entry
  desc <text>                 description of the new entry
  comment <text>              text of a comment
  rate <axis> <1-5>           rate cleanliness, accessibility or crowd
  submit                      save the new entry or the comment
  panel                       toggle the side panel
  width <px>                  resize the display
  quit";

/// Parse a single line of input.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse(line: &str) -> Result<Option<Command>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };
    let required = |name| {
        if arg.is_empty() {
            Err(InputError::MissingArgument(name))
        } else {
            Ok(arg)
        }
    };
    let cmd = match cmd.to_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "list" | "show" => Command::Show,
        "quit" | "exit" | "q" => Command::Quit,
        "reload" | "refresh" => Command::Reload,
        "locate" => Command::LocateMe,
        "move" => Command::Move(required("<lat>,<lng>")?.parse()?),
        "click" => Command::Click(required("<lat>,<lng>")?.parse()?),
        "select" => Command::Select(required("<n|id>")?.to_owned()),
        "back" => Command::Back,
        "cancel" => Command::Cancel,
        "name" => Command::Name(arg.to_owned()),
        "desc" | "description" => Command::Description(arg.to_owned()),
        "comment" => Command::Comment(arg.to_owned()),
        "rate" => {
            let (axis, value) = required("<axis> <1-5>")?
                .split_once(char::is_whitespace)
                .ok_or(InputError::MissingArgument("<1-5>"))?;
            let axis = axis
                .parse::<RatingAxis>()
                .map_err(|_| InputError::Axis(axis.to_owned()))?;
            let value = value.trim();
            let value = value
                .parse::<i64>()
                .map_err(|_| InputError::Number(value.to_owned()))?;
            Command::Rate(axis, RatingValue::try_from(value)?)
        }
        "submit" | "save" => Command::Submit,
        "panel" => Command::TogglePanel,
        "width" => {
            let width = required("<px>")?;
            Command::Resize(
                width
                    .parse()
                    .map_err(|_| InputError::Width(width.to_owned()))?,
            )
        }
        _ => return Err(InputError::UnknownCommand(cmd.to_owned())),
    };
    Ok(Some(cmd))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(line: &str) -> Command {
        parse(line).unwrap().unwrap()
    }

    #[test]
    fn ignore_blank_lines() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn parse_positions() {
        assert_eq!(
            parse_ok("click 35.001, 139.001"),
            Command::Click(MapPoint::from_lat_lng_deg(35.001, 139.001))
        );
        assert_eq!(
            parse_ok("MOVE 48.1,9.2"),
            Command::Move(MapPoint::from_lat_lng_deg(48.1, 9.2))
        );
        assert!(matches!(parse("click 91,0"), Err(InputError::Position(_))));
        assert_eq!(
            parse("click"),
            Err(InputError::MissingArgument("<lat>,<lng>"))
        );
    }

    #[test]
    fn parse_text_arguments() {
        assert_eq!(
            parse_ok("name   Station  WC "),
            Command::Name("Station  WC".into())
        );
        assert_eq!(parse_ok("desc"), Command::Description(String::new()));
        assert_eq!(parse_ok("comment Clean!"), Command::Comment("Clean!".into()));
        assert_eq!(parse_ok("select 2"), Command::Select("2".into()));
    }

    #[test]
    fn parse_ratings() {
        assert_eq!(
            parse_ok("rate crowd 5"),
            Command::Rate(RatingAxis::Crowd, RatingValue::max())
        );
        assert_eq!(
            parse("rate crowd 6"),
            Err(InputError::RatingValue(RatingValueError(6)))
        );
        assert_eq!(parse("rate 5"), Err(InputError::MissingArgument("<1-5>")));
        assert_eq!(
            parse("rate smell 2"),
            Err(InputError::Axis("smell".into()))
        );
        assert_eq!(
            parse("rate crowd many"),
            Err(InputError::Number("many".into()))
        );
    }

    #[test]
    fn parse_width() {
        assert_eq!(parse_ok("width 480"), Command::Resize(480));
        assert_eq!(parse("width -1"), Err(InputError::Width("-1".into())));
    }

    #[test]
    fn reject_unknown_commands() {
        assert_eq!(
            parse("dance"),
            Err(InputError::UnknownCommand("dance".into()))
        );
    }
}
