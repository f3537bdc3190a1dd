pub const UNKNOWN_COMMAND: &str = "Unknown command";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Say(String),
    Unknown,
    Problem(String),
}

impl From<anyhow::Result<String>> for Response {
    fn from(res: anyhow::Result<String>) -> Self {
        match res {
            Ok(s) => Self::Say(s),
            Err(err) => Self::Problem(err.to_string()),
        }
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Say(msg) => f.write_str(msg),
            Self::Unknown => f.write_str(UNKNOWN_COMMAND),
            Self::Problem(msg) => write!(f, "a problem occurred: {msg}"),
        }
    }
}
