//! REPL command parsing
//!
//! Input lines are split on whitespace; the first token names the command
//! and the rest are its arguments.

use std::fmt;

use crate::error::{MarketError, MarketResult};

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Save and end the session
    Quit,
    /// Show the working directory
    Dir,
    /// Show the program version
    Version,
    /// Show the current balance
    Balance,
    /// List catalog items
    Items,
    /// List catalog jobs
    Jobs,
    /// Show recent transactions
    History(Option<usize>),
    /// Buy an item by key
    Buy(String),
    /// Complete a job by key
    Job(String),
    /// Run a command `count` times
    Repeat { count: usize, command: Box<Command> },
}

impl Command {
    /// Parse a tokenized input line
    pub fn parse(tokens: &[&str]) -> MarketResult<Self> {
        let (name, args) = tokens
            .split_first()
            .ok_or_else(|| MarketError::Validation("Empty command".into()))?;

        let command = match *name {
            "q" | "quit" => Command::Quit,
            "dir" => Command::Dir,
            "version" => Command::Version,
            "balance" => Command::Balance,
            "items" => Command::Items,
            "jobs" => Command::Jobs,
            "history" => Command::History(match args.first() {
                Some(count) => Some(parse_positive_count(count)?),
                None => None,
            }),
            "buy" => Command::Buy(required(args, "buy <item>")?),
            "job" => Command::Job(required(args, "job <job>")?),
            "r" => {
                let count = args
                    .first()
                    .ok_or_else(|| usage("r <count> <command...>"))
                    .and_then(|c| parse_count(c))?;
                if args.len() < 2 {
                    return Err(usage("r <count> <command...>"));
                }
                Command::Repeat {
                    count,
                    command: Box::new(Command::parse(&args[1..])?),
                }
            }
            other => return Err(MarketError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }

    /// Parse a raw input line; `None` for blank lines
    pub fn parse_line(line: &str) -> MarketResult<Option<Self>> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(None);
        }
        Command::parse(&tokens).map(Some)
    }

    /// Whether a successful run of this command is recorded as a transaction
    pub fn is_transactional(&self) -> bool {
        matches!(self, Command::Buy(_) | Command::Job(_))
    }
}

/// Canonical command text, as stored in the transaction history
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Quit => write!(f, "q"),
            Command::Dir => write!(f, "dir"),
            Command::Version => write!(f, "version"),
            Command::Balance => write!(f, "balance"),
            Command::Items => write!(f, "items"),
            Command::Jobs => write!(f, "jobs"),
            Command::History(None) => write!(f, "history"),
            Command::History(Some(n)) => write!(f, "history {}", n),
            Command::Buy(key) => write!(f, "buy {}", key),
            Command::Job(key) => write!(f, "job {}", key),
            Command::Repeat { count, command } => write!(f, "r {} {}", count, command),
        }
    }
}

fn required(args: &[&str], usage_text: &str) -> MarketResult<String> {
    args.first()
        .map(|arg| arg.to_string())
        .ok_or_else(|| usage(usage_text))
}

fn parse_count(raw: &str) -> MarketResult<usize> {
    raw.parse()
        .map_err(|_| MarketError::Validation(format!("Invalid count \"{}\"", raw)))
}

fn parse_positive_count(raw: &str) -> MarketResult<usize> {
    match parse_count(raw)? {
        0 => Err(MarketError::Validation("Count must be at least 1".into())),
        count => Ok(count),
    }
}

fn usage(text: &str) -> MarketError {
    MarketError::Validation(format!("Usage: {}", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> MarketResult<Command> {
        Command::parse_line(line).map(|c| c.unwrap())
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("q").unwrap(), Command::Quit);
        assert_eq!(parse("quit").unwrap(), Command::Quit);
        assert_eq!(parse("balance").unwrap(), Command::Balance);
        assert_eq!(parse("  items  ").unwrap(), Command::Items);
        assert_eq!(parse("history").unwrap(), Command::History(None));
        assert_eq!(parse("history 3").unwrap(), Command::History(Some(3)));
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(parse("buy apple").unwrap(), Command::Buy("apple".into()));
        assert_eq!(parse("job   primary").unwrap(), Command::Job("primary".into()));
    }

    #[test]
    fn test_missing_argument_is_validation_error() {
        let err = parse("buy").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: Usage: buy <item>");
    }

    #[test]
    fn test_unknown_command() {
        let err = parse("sell apple").unwrap_err();
        assert!(matches!(err, MarketError::UnknownCommand(ref c) if c == "sell"));
        assert_eq!(err.to_string(), "Unrecognized command \"sell\"");
    }

    #[test]
    fn test_history_count_must_be_positive() {
        let err = parse("history 0").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: Count must be at least 1");
        assert!(parse("history -1").unwrap_err().is_validation());
    }

    #[test]
    fn test_repeat() {
        assert_eq!(
            parse("r 3 job primary").unwrap(),
            Command::Repeat {
                count: 3,
                command: Box::new(Command::Job("primary".into())),
            }
        );
    }

    #[test]
    fn test_repeat_errors() {
        assert!(parse("r").unwrap_err().is_validation());
        assert!(parse("r 2").unwrap_err().is_validation());
        assert!(parse("r two job primary").unwrap_err().is_validation());
        assert!(matches!(
            parse("r 2 dance").unwrap_err(),
            MarketError::UnknownCommand(_)
        ));
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse_line("   ").unwrap(), None);
        assert_eq!(Command::parse_line("").unwrap(), None);
    }

    #[test]
    fn test_canonical_text() {
        assert_eq!(parse("buy   apple").unwrap().to_string(), "buy apple");
        assert_eq!(parse("r 2 job primary").unwrap().to_string(), "r 2 job primary");
    }

    #[test]
    fn test_transactional() {
        assert!(Command::Buy("a".into()).is_transactional());
        assert!(Command::Job("a".into()).is_transactional());
        assert!(!Command::Balance.is_transactional());
        assert!(!parse("r 2 buy a").unwrap().is_transactional());
    }
}
