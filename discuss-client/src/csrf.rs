//! CSRF token discovery.
//!
//! The token can be exposed three ways by the rendering layer; the first
//! source that actually carries a value wins: a `csrf-token` meta tag,
//! the `csrftoken` cookie, a hidden `csrfmiddlewaretoken` form input.

pub fn select_csrf(
    meta: Option<String>,
    cookie: Option<String>,
    form_input: Option<String>,
) -> Option<String> {
    present(meta)
        .or_else(|| present(cookie))
        .or_else(|| present(form_input))
}

fn present(source: Option<String>) -> Option<String> {
    source.filter(|token| !token.is_empty())
}

/// Extract the `csrftoken` cookie from a `document.cookie` string.
pub fn csrf_from_cookies(cookies: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|row| row.strip_prefix("csrftoken="))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn meta_tag_wins_over_cookie_and_input() {
        assert_eq!(select_csrf(s("m"), s("c"), s("i")), s("m"));
        assert_eq!(select_csrf(None, s("c"), s("i")), s("c"));
        assert_eq!(select_csrf(None, None, s("i")), s("i"));
        assert_eq!(select_csrf(None, None, None), None);
    }

    #[test]
    fn empty_sources_fall_through() {
        assert_eq!(select_csrf(s(""), s("c"), None), s("c"));
        assert_eq!(select_csrf(s(""), s(""), s("")), None);
    }

    #[test]
    fn finds_csrftoken_cookie() {
        assert_eq!(
            csrf_from_cookies("sessionid=abc; csrftoken=tok123; theme=dark"),
            s("tok123"),
        );
        assert_eq!(csrf_from_cookies("csrftoken=tok123"), s("tok123"));
        assert_eq!(csrf_from_cookies("sessionid=abc"), None);
        assert_eq!(csrf_from_cookies(""), None);
        // a different cookie whose name merely ends in csrftoken must not match
        assert_eq!(csrf_from_cookies("xcsrftoken=nope"), None);
    }
}
