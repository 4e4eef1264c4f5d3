use crate::{ApiError, VoteDirection, VoteKind};

/// The entity and direction a vote control points at, recovered from its
/// `href`.
///
/// The rendering layer encodes vote targets as navigable links of the form
/// `…/posts/<id>/vote/upvote` (or `comments`, `downvote`), so the same
/// markup keeps working without script support.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteTarget {
    pub kind: VoteKind,
    pub id: String,
    pub direction: VoteDirection,
}

impl VoteTarget {
    pub fn parse_href(href: &str) -> Result<VoteTarget, ApiError> {
        let path = href
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or(href);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        for window in segments.windows(4) {
            let kind = match window[0] {
                "posts" => VoteKind::Post,
                "comments" => VoteKind::Comment,
                _ => continue,
            };
            if window[2] != "vote" {
                continue;
            }
            let direction = match window[3] {
                "upvote" => VoteDirection::Up,
                "downvote" => VoteDirection::Down,
                _ => continue,
            };
            let id = window[1];
            if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
                return Ok(VoteTarget {
                    kind,
                    id: id.to_string(),
                    direction,
                });
            }
        }
        Err(ApiError::UnrecognizedVoteHref(href.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_post_upvote() {
        assert_eq!(
            VoteTarget::parse_href("/posts/42/vote/upvote"),
            Ok(VoteTarget {
                kind: VoteKind::Post,
                id: "42".to_string(),
                direction: VoteDirection::Up,
            }),
        );
    }

    #[test]
    fn parses_comment_downvote_with_prefix_and_query() {
        assert_eq!(
            VoteTarget::parse_href("https://example.org/comments/17/vote/downvote?next=/"),
            Ok(VoteTarget {
                kind: VoteKind::Comment,
                id: "17".to_string(),
                direction: VoteDirection::Down,
            }),
        );
    }

    #[test]
    fn rejects_login_redirects_and_garbage() {
        assert!(VoteTarget::parse_href("/accounts/login/?next=/posts/42/").is_err());
        assert!(VoteTarget::parse_href("/posts/abc/vote/upvote").is_err());
        assert!(VoteTarget::parse_href("/posts/42/vote/sideways").is_err());
        assert!(VoteTarget::parse_href("/posts/42/unvote/upvote").is_err());
        assert!(VoteTarget::parse_href("").is_err());
    }
}
