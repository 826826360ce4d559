//! Shell command parsing.

use crate::error::ShellError;

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `GET <key>`
    Get(String),
    /// `SET <key> <value...>`
    Set(String, String),
    /// `DELETE <key>` or `DEL <key>`
    Delete(String),
    /// `BEGIN`
    Begin,
    /// `COMMIT`
    Commit,
    /// `ROLLBACK`
    Rollback,
    /// `DEPTH`
    Depth,
    /// `STATS`
    Stats,
    /// `HELP`
    Help,
    /// `EXIT` or `QUIT`
    Exit,
}

/// Command summary printed by `HELP`.
pub const HELP: &str = "\
GET <key>            print the value of a key
SET <key> <value>    set a key (value is the rest of the line)
DELETE <key>         delete a key (alias DEL)
BEGIN                start a nested transaction
COMMIT               commit the innermost transaction
ROLLBACK             roll back the innermost transaction
DEPTH                print the number of open transactions
STATS                print operation counters
HELP                 print this summary
EXIT                 end the session (alias QUIT)";

impl Command {
    /// Parses one line of input.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (keyword, rest) = split_word(line);
        let command = match keyword.to_ascii_uppercase().as_str() {
            "GET" => Self::Get(single_key("GET", rest)?),
            "SET" => {
                let (key, value) = split_word(rest);
                if key.is_empty() {
                    return Err(missing("SET", "key"));
                }
                if value.is_empty() {
                    return Err(missing("SET", "value"));
                }
                Self::Set(key.to_string(), value.trim_end().to_string())
            }
            "DELETE" | "DEL" => Self::Delete(single_key("DELETE", rest)?),
            "BEGIN" => no_args("BEGIN", rest, Self::Begin)?,
            "COMMIT" => no_args("COMMIT", rest, Self::Commit)?,
            "ROLLBACK" => no_args("ROLLBACK", rest, Self::Rollback)?,
            "DEPTH" => no_args("DEPTH", rest, Self::Depth)?,
            "STATS" => no_args("STATS", rest, Self::Stats)?,
            "HELP" => no_args("HELP", rest, Self::Help)?,
            "EXIT" | "QUIT" => no_args("EXIT", rest, Self::Exit)?,
            _ => return Err(ShellError::UnknownCommand(keyword.to_string())),
        };
        Ok(Some(command))
    }
}

/// Splits off the first whitespace-delimited word.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(|c: char| c.is_ascii_whitespace()) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

fn single_key(command: &'static str, rest: &str) -> Result<String, ShellError> {
    let (key, extra) = split_word(rest);
    if key.is_empty() {
        return Err(missing(command, "key"));
    }
    if !extra.is_empty() {
        return Err(ShellError::UnexpectedArgument {
            command,
            extra: extra.trim_end().to_string(),
        });
    }
    Ok(key.to_string())
}

fn no_args(command: &'static str, rest: &str, parsed: Command) -> Result<Command, ShellError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(ShellError::UnexpectedArgument {
            command,
            extra: rest.trim_end().to_string(),
        })
    }
}

fn missing(command: &'static str, argument: &'static str) -> ShellError {
    ShellError::MissingArgument { command, argument }
}
