#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("href does not point at a vote endpoint: {0:?}")]
    UnrecognizedVoteHref(String),
}
