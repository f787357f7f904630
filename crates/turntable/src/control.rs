use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_NAME: &str = "carousel.sock";

/// `$XDG_RUNTIME_DIR/carousel.sock`, or `/tmp/carousel.sock` without one.
pub fn socket_path() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(SOCKET_NAME)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Select(usize),
    Next,
    Prev,
}

impl ControlCommand {
    /// Signed slide offset for `Next`/`Prev`.
    pub fn step(self) -> Option<i64> {
        match self {
            ControlCommand::Next => Some(1),
            ControlCommand::Prev => Some(-1),
            ControlCommand::Select(_) => None,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("'select' needs a slide number, got '{0}'")]
    BadIndex(String),
}

impl FromStr for ControlCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseCommandError::Empty);
        };
        match verb.to_ascii_lowercase().as_str() {
            "select" => {
                let arg = words.next().unwrap_or_default();
                arg.parse()
                    .map(ControlCommand::Select)
                    .map_err(|_| ParseCommandError::BadIndex(arg.to_string()))
            }
            "next" => Ok(ControlCommand::Next),
            "prev" | "previous" => Ok(ControlCommand::Prev),
            _ => Err(ParseCommandError::Unknown(verb.to_string())),
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlCommand::Select(i) => write!(f, "select {i}"),
            ControlCommand::Next => f.write_str("next"),
            ControlCommand::Prev => f.write_str("prev"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cases = vec![
            ("select 3", ControlCommand::Select(3)),
            ("  SELECT   0 ", ControlCommand::Select(0)),
            ("next", ControlCommand::Next),
            ("Prev", ControlCommand::Prev),
            ("previous", ControlCommand::Prev),
        ];
        for (line, expected) in cases {
            assert_eq!(line.parse::<ControlCommand>().unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("".parse::<ControlCommand>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "select".parse::<ControlCommand>(),
            Err(ParseCommandError::BadIndex(String::new()))
        );
        assert_eq!(
            "select -1".parse::<ControlCommand>(),
            Err(ParseCommandError::BadIndex("-1".to_string()))
        );
        assert_eq!(
            "show".parse::<ControlCommand>(),
            Err(ParseCommandError::Unknown("show".to_string()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        for cmd in [ControlCommand::Select(7), ControlCommand::Next, ControlCommand::Prev] {
            assert_eq!(cmd.to_string().parse::<ControlCommand>().unwrap(), cmd);
        }
    }

    #[test]
    fn test_step_offsets() {
        assert_eq!(ControlCommand::Next.step(), Some(1));
        assert_eq!(ControlCommand::Prev.step(), Some(-1));
        assert_eq!(ControlCommand::Select(2).step(), None);
    }
}
