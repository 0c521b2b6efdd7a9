//! Line commands understood by the terminal front-end.

use crate::types::{Filter, TodoAction};
use std::str::FromStr;
use thiserror::Error;

/// Help text listing every command
pub const HELP: &str =
    "commands: all | active | completed | dismiss | add <title> | clear | toggle | show | quit";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select a filter
    Filter(Filter),
    /// Close the error notice
    Dismiss,
    /// Submit the new-todo form
    Add(String),
    /// Click clear-completed
    Clear,
    /// Click toggle-all
    Toggle,
    /// Redraw without changing anything
    Show,
    /// Leave the program
    Quit,
}

/// Input that is not a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command `{0}` ({})", HELP)]
pub struct ParseCommandError(String);

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match word.to_ascii_lowercase().as_str() {
            "dismiss" => Ok(Self::Dismiss),
            "add" => Ok(Self::Add(rest.to_string())),
            "clear" => Ok(Self::Clear),
            "toggle" => Ok(Self::Toggle),
            "show" | "" => Ok(Self::Show),
            "quit" | "exit" => Ok(Self::Quit),
            other => other
                .parse()
                .map(Self::Filter)
                .map_err(|_| ParseCommandError(line.to_string())),
        }
    }
}

impl Command {
    /// Action this command dispatches, if any
    #[must_use]
    pub fn into_action(self) -> Option<TodoAction> {
        match self {
            Self::Filter(filter) => Some(TodoAction::FilterSelected { filter }),
            Self::Dismiss => Some(TodoAction::DismissError),
            Self::Add(title) => Some(TodoAction::AddTodoSubmitted { title }),
            Self::Clear => Some(TodoAction::ClearCompletedClicked),
            Self::Toggle => Some(TodoAction::ToggleAllClicked),
            Self::Show | Self::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("active".parse::<Command>(), Ok(Command::Filter(Filter::Active)));
        assert_eq!(" Completed ".parse::<Command>(), Ok(Command::Filter(Filter::Completed)));
        assert_eq!("dismiss".parse::<Command>(), Ok(Command::Dismiss));
        assert_eq!("add Buy  milk".parse::<Command>(), Ok(Command::Add("Buy  milk".to_string())));
        assert_eq!("add".parse::<Command>(), Ok(Command::Add(String::new())));
        assert_eq!("".parse::<Command>(), Ok(Command::Show));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
        assert!("frobnicate".parse::<Command>().is_err());
    }

    #[test]
    fn maps_commands_to_actions() {
        assert_eq!(
            Command::Filter(Filter::All).into_action(),
            Some(TodoAction::FilterSelected { filter: Filter::All })
        );
        assert_eq!(
            Command::Add("x".into()).into_action(),
            Some(TodoAction::AddTodoSubmitted { title: "x".into() })
        );
        assert_eq!(Command::Toggle.into_action(), Some(TodoAction::ToggleAllClicked));
        assert_eq!(Command::Show.into_action(), None);
        assert_eq!(Command::Quit.into_action(), None);
    }
}
