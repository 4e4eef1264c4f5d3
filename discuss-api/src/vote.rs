use serde::{Deserialize, Deserializer};

/// Which kind of entity a vote applies to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VoteKind {
    Post,
    Comment,
}

impl VoteKind {
    /// Lowercase name, as used in durable storage keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteKind::Post => "post",
            VoteKind::Comment => "comment",
        }
    }

    /// Capitalized name, as used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            VoteKind::Post => "Post",
            VoteKind::Comment => "Comment",
        }
    }
}

/// The direction of a single vote action.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "upvote",
            VoteDirection::Down => "downvote",
        }
    }

    /// Past-tense verb for announcements.
    pub fn verb(&self) -> &'static str {
        match self {
            VoteDirection::Up => "upvoted",
            VoteDirection::Down => "downvoted",
        }
    }
}

/// The user's resulting vote on an entity, as reported by the server.
///
/// `Neutral` covers everything the endpoint may send besides `1` and `-1`
/// (typically `0` or an absent field), meaning the user currently has no
/// vote on the entity.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum UserVote {
    Up,
    Down,
    Neutral,
}

impl UserVote {
    pub fn neutral() -> UserVote {
        UserVote::Neutral
    }

    /// Value written to durable storage.
    pub fn as_stored(&self) -> &'static str {
        match self {
            UserVote::Up => "1",
            UserVote::Down => "-1",
            UserVote::Neutral => "0",
        }
    }

    /// Parse a durable storage value; anything unrecognized yields `None`.
    pub fn from_stored(raw: &str) -> Option<UserVote> {
        match raw {
            "1" => Some(UserVote::Up),
            "-1" => Some(UserVote::Down),
            "0" => Some(UserVote::Neutral),
            _ => None,
        }
    }

    pub fn matches(&self, direction: VoteDirection) -> bool {
        matches!(
            (self, direction),
            (UserVote::Up, VoteDirection::Up) | (UserVote::Down, VoteDirection::Down)
        )
    }
}

/// Response body of the vote endpoint.
///
/// The endpoint names its id field after the entity kind (`post_id` or
/// `comment_id`); both map onto `id` here. Ids may be sent as JSON numbers
/// or strings.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct VoteResponse {
    #[serde(
        alias = "post_id",
        alias = "comment_id",
        deserialize_with = "de_entity_id"
    )]
    pub id: String,
    pub vote_count: i64,
    #[serde(default = "UserVote::neutral", deserialize_with = "de_user_vote")]
    pub user_vote: UserVote,
}

fn de_entity_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Str(String),
    }
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Num(n) => n.to_string(),
        RawId::Str(s) => s,
    })
}

fn de_user_vote<'de, D>(deserializer: D) -> Result<UserVote, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<i64>::deserialize(deserializer)? {
        Some(1) => UserVote::Up,
        Some(-1) => UserVote::Down,
        _ => UserVote::Neutral,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_post_response() {
        let resp: VoteResponse =
            serde_json::from_str(r#"{"post_id": 42, "vote_count": 7, "user_vote": 1}"#)
                .expect("parsing post response");
        assert_eq!(
            resp,
            VoteResponse {
                id: "42".to_string(),
                vote_count: 7,
                user_vote: UserVote::Up,
            }
        );
    }

    #[test]
    fn parses_comment_response() {
        let resp: VoteResponse =
            serde_json::from_str(r#"{"comment_id": "17", "vote_count": -2, "user_vote": -1}"#)
                .expect("parsing comment response");
        assert_eq!(resp.id, "17");
        assert_eq!(resp.vote_count, -2);
        assert_eq!(resp.user_vote, UserVote::Down);
    }

    #[test]
    fn zero_null_and_missing_user_vote_are_neutral() {
        for body in [
            r#"{"post_id": 1, "vote_count": 0, "user_vote": 0}"#,
            r#"{"post_id": 1, "vote_count": 0, "user_vote": null}"#,
            r#"{"post_id": 1, "vote_count": 0}"#,
        ] {
            let resp: VoteResponse = serde_json::from_str(body).expect("parsing response");
            assert_eq!(resp.user_vote, UserVote::Neutral, "body: {}", body);
        }
    }

    #[test]
    fn malformed_response_is_an_error() {
        assert!(serde_json::from_str::<VoteResponse>(r#"{"vote_count": 3}"#).is_err());
        assert!(serde_json::from_str::<VoteResponse>("not json").is_err());
    }

    #[test]
    fn stored_values_round_trip() {
        for vote in [UserVote::Up, UserVote::Down, UserVote::Neutral] {
            assert_eq!(UserVote::from_stored(vote.as_stored()), Some(vote));
        }
        assert_eq!(UserVote::from_stored("2"), None);
        assert_eq!(UserVote::from_stored(""), None);
    }

    #[test]
    fn matches_direction() {
        assert!(UserVote::Up.matches(VoteDirection::Up));
        assert!(UserVote::Down.matches(VoteDirection::Down));
        assert!(!UserVote::Up.matches(VoteDirection::Down));
        assert!(!UserVote::Neutral.matches(VoteDirection::Up));
        assert!(!UserVote::Neutral.matches(VoteDirection::Down));
    }
}
