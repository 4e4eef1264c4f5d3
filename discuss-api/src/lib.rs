mod error;
pub use error::ApiError;

mod target;
pub use target::VoteTarget;

mod vote;
pub use vote::{UserVote, VoteDirection, VoteKind, VoteResponse};
