use discuss_api::{UserVote, VoteDirection, VoteKind, VoteResponse};

/// Everything the DOM and cache need changed after a successful vote
/// response. Computed purely from the server payload: on failure nothing
/// is computed and nothing changes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteOutcome {
    /// Replaces the displayed count verbatim.
    pub count_text: String,
    /// Accessible label for the count element.
    pub count_label: String,
    /// Live-region announcement describing the action and new score.
    pub announcement: String,
    /// Whether the upvote control carries the voted/pressed state.
    pub up_active: bool,
    /// Whether the downvote control carries the voted/pressed state.
    pub down_active: bool,
    /// Direction written to the local vote cache.
    pub cached: UserVote,
}

pub fn apply_response(
    kind: VoteKind,
    clicked: VoteDirection,
    resp: &VoteResponse,
) -> VoteOutcome {
    VoteOutcome {
        count_text: resp.vote_count.to_string(),
        count_label: format!("{} score: {}", kind.label(), resp.vote_count),
        announcement: format!(
            "{} {}. Score is now {}",
            kind.label(),
            clicked.verb(),
            resp.vote_count,
        ),
        up_active: resp.user_vote == UserVote::Up,
        down_active: resp.user_vote == UserVote::Down,
        cached: resp.user_vote,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upvote_on_post_42() {
        let resp = VoteResponse {
            id: "42".to_string(),
            vote_count: 7,
            user_vote: UserVote::Up,
        };
        let outcome = apply_response(VoteKind::Post, VoteDirection::Up, &resp);
        assert_eq!(outcome.count_text, "7");
        assert_eq!(outcome.count_label, "Post score: 7");
        assert_eq!(outcome.announcement, "Post upvoted. Score is now 7");
        assert!(outcome.up_active);
        assert!(!outcome.down_active);
        assert_eq!(outcome.cached, UserVote::Up);
    }

    #[test]
    fn downvote_on_comment() {
        let resp = VoteResponse {
            id: "17".to_string(),
            vote_count: -1,
            user_vote: UserVote::Down,
        };
        let outcome = apply_response(VoteKind::Comment, VoteDirection::Down, &resp);
        assert_eq!(outcome.count_text, "-1");
        assert_eq!(outcome.count_label, "Comment score: -1");
        assert_eq!(outcome.announcement, "Comment downvoted. Score is now -1");
        assert!(!outcome.up_active);
        assert!(outcome.down_active);
        assert_eq!(outcome.cached, UserVote::Down);
    }

    #[test]
    fn server_side_unvote_clears_both_controls() {
        // clicking upvote on an already-upvoted post removes the vote
        let resp = VoteResponse {
            id: "42".to_string(),
            vote_count: 6,
            user_vote: UserVote::Neutral,
        };
        let outcome = apply_response(VoteKind::Post, VoteDirection::Up, &resp);
        assert!(!outcome.up_active);
        assert!(!outcome.down_active);
        assert_eq!(outcome.cached, UserVote::Neutral);
        assert_eq!(outcome.announcement, "Post upvoted. Score is now 6");
    }
}
