use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitBarsError>;

#[derive(Error, Debug)]
pub enum GitBarsError {
    #[error("Commit log unavailable: {0}")]
    SourceUnavailable(String),
    #[error("Malformed log record on line {line} ({reason}): {content:?}")]
    MalformedRecord {
        line: usize,
        content: String,
        reason: String,
    },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Cannot normalize: every bucket has {count} commits")]
    DegenerateNormalization { count: u64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GitBarsError {
    pub fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        GitBarsError::MalformedRecord {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }
}

// Every gix failure means the log could not be produced.
macro_rules! source_unavailable_from {
    ($($err:ty),+ $(,)?) => {
        $(
            impl From<$err> for GitBarsError {
                fn from(err: $err) -> Self {
                    GitBarsError::SourceUnavailable(err.to_string())
                }
            }
        )+
    };
}

source_unavailable_from!(
    gix::discover::Error,
    gix::object::find::existing::Error,
    gix::object::find::existing::with_conversion::Error,
    gix::objs::decode::Error,
    gix::object::commit::Error,
    gix::date::parse::Error,
    gix::reference::find::existing::Error,
    gix::head::peel::to_commit::Error,
);
