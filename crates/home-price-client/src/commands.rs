use form_core::Purpose;
use thiserror::Error;

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Theme,
    Purpose(Purpose),
    Set { field: String, value: String },
    ClearForm,
    Submit,
    Status,
    History,
    ToggleHistory,
    ClearHistory,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("usage: set <field> <value>")]
    MissingField,
    #[error("unknown command `{0}`, type `help`")]
    Unknown(String),
}

pub fn parse_command(line: &str) -> Result<Command, ParseCommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Err(ParseCommandError::Empty),
        "theme" => Command::Theme,
        "buy" => Command::Purpose(Purpose::Buy),
        "sell" => Command::Purpose(Purpose::Sell),
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err(ParseCommandError::MissingField);
            }
            Command::Set {
                field: field.to_string(),
                value: value.to_string(),
            }
        }
        "clear-form" => Command::ClearForm,
        "submit" | "predict" => Command::Submit,
        "status" => Command::Status,
        "history" => Command::History,
        "toggle-history" => Command::ToggleHistory,
        "clear-history" => Command::ClearHistory,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(ParseCommandError::Unknown(word.to_string())),
    };
    Ok(command)
}
