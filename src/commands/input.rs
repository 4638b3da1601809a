//! Session input parsing
//!
//! One command per line: a keyword, optionally followed by a single argument
//! that runs to the end of the line. Blank lines and lines starting with `#`
//! are ignored.

use thiserror::Error;

/// A parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    /// Replace the query text (may be empty)
    Query(String),
    /// Search immediately
    Enter,
    /// Empty the query
    Clear,
    /// Move the result cursor
    Up,
    Down,
    /// Tag or untag the result under the cursor
    Toggle,
    /// Tag a path
    Tag(String),
    /// Untag a path, or the browse selection when no path is given
    Untag(Option<String>),
    /// Print the result list
    Show,
    /// Print the tagged files
    Tagged,
    /// Move the browse selection
    Next,
    Prev,
    /// Toggle and print the browse preview
    Preview,
    /// Set the compose prompt
    Prompt(String),
    /// Print the composed document
    Compose,
    Help,
    Quit,
}

/// Why a line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{command}' needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{command}' takes no argument")]
    UnexpectedArgument { command: &'static str },
}

/// Help text listing every command
pub const HELP: &str = "\
query <text>   set the search query (debounced)
enter          search now
clear          empty the query
up | down      move the result cursor
toggle         tag/untag the result under the cursor
tag <path>     tag a file
untag [path]   untag a file (default: browse selection)
show           print the results
tagged         print the tagged files
next | prev    move the browse selection
preview        toggle the browse preview
prompt <text>  set the compose prompt
compose        print the composed document
quit           leave the session";

/// Parse one input line; `Ok(None)` for blank lines and comments
///
/// # Errors
///
/// Returns an `InputError` for unknown commands or wrong arguments.
pub fn parse_line(line: &str) -> Result<Option<SessionInput>, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, argument) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, Some(rest.trim()).filter(|rest| !rest.is_empty())),
        None => (line, None),
    };

    let input = match keyword {
        "query" | "q" => SessionInput::Query(argument.unwrap_or_default().to_string()),
        "tag" => SessionInput::Tag(required("tag", "path", argument)?),
        "untag" => SessionInput::Untag(argument.map(str::to_string)),
        "prompt" => SessionInput::Prompt(argument.unwrap_or_default().to_string()),
        "enter" => no_argument("enter", argument, SessionInput::Enter)?,
        "clear" => no_argument("clear", argument, SessionInput::Clear)?,
        "up" => no_argument("up", argument, SessionInput::Up)?,
        "down" => no_argument("down", argument, SessionInput::Down)?,
        "toggle" => no_argument("toggle", argument, SessionInput::Toggle)?,
        "show" => no_argument("show", argument, SessionInput::Show)?,
        "tagged" => no_argument("tagged", argument, SessionInput::Tagged)?,
        "next" => no_argument("next", argument, SessionInput::Next)?,
        "prev" => no_argument("prev", argument, SessionInput::Prev)?,
        "preview" => no_argument("preview", argument, SessionInput::Preview)?,
        "compose" => no_argument("compose", argument, SessionInput::Compose)?,
        "help" => SessionInput::Help,
        "quit" | "exit" => SessionInput::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(Some(input))
}

fn required(command: &'static str, argument: &'static str, value: Option<&str>) -> Result<String, InputError> {
    value
        .map(str::to_string)
        .ok_or(InputError::MissingArgument { command, argument })
}

fn no_argument(
    command: &'static str,
    value: Option<&str>,
    input: SessionInput,
) -> Result<SessionInput, InputError> {
    match value {
        Some(_) => Err(InputError::UnexpectedArgument { command }),
        None => Ok(input),
    }
}
