// Error taxonomy for the bracket core. Anything recoverable travels through
// this enum; bad slot indices are caller bugs and stay as assertions.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A team record in the team info stream was truncated or had an
    /// unparsable numeric field. Fatal to startup.
    #[error("team info line {line}: {msg}")]
    DataFormat { line: usize, msg: String },

    /// The seeding stream did not supply exactly 64 names.
    #[error("seeding must supply exactly 64 teams, got {got}")]
    InvalidSeeding { got: usize },

    /// A slot value did not resolve to a registered team.
    #[error("no such team: {name}")]
    UnknownTeam { name: String },

    /// A slot that should have held a team was blank.
    #[error("slot {slot} holds no team")]
    EmptySlot { slot: usize },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A saved prediction record could not be read or written. The caller
    /// decides whether to skip the record or abort.
    #[error("saved bracket {}: {msg}", path.display())]
    Persistence { path: PathBuf, msg: String },
}
