//! Share-link route matching
//!
//! Shared notes live at `/shared/{token}`. The matcher looks at the last two
//! path segments only, so a mount prefix such as `/app/shared/{token}` also
//! matches. Paths arrive percent-encoded; the token is stored decoded and the
//! API client encodes it again as a single segment.

use std::fmt;

/// Literal segment that precedes a share token
pub const SHARED_SEGMENT: &str = "shared";

/// Opaque share token taken from a share link
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareToken(String);

impl ShareToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of matching a page path against the share-link pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareRoute {
    /// Path has the `/shared/{token}` shape
    Token(ShareToken),
    /// Path does not carry a token
    NoToken,
}

impl ShareRoute {
    /// Match a percent-encoded URL path (no query string or fragment)
    pub fn match_path(path: &str) -> Self {
        let mut segments = path.rsplit('/');
        let last = segments.next();
        let parent = segments.next();

        match (parent, last) {
            (Some(SHARED_SEGMENT), Some(token)) if !token.is_empty() => {
                // Invalid UTF-8 after decoding: keep the segment as written
                let token = urlencoding::decode(token)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| token.to_string());
                ShareRoute::Token(ShareToken(token))
            }
            _ => ShareRoute::NoToken,
        }
    }

    pub fn token(&self) -> Option<&ShareToken> {
        match self {
            ShareRoute::Token(token) => Some(token),
            ShareRoute::NoToken => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_shared_path() {
        let route = ShareRoute::match_path("/shared/3f2b9c1e-aaaa-bbbb-cccc-0123456789ab");
        assert_eq!(
            route.token().map(ShareToken::as_str),
            Some("3f2b9c1e-aaaa-bbbb-cccc-0123456789ab")
        );
    }

    #[test]
    fn test_matches_under_prefix() {
        let route = ShareRoute::match_path("/notes-app/shared/tok123");
        assert_eq!(route.token().map(ShareToken::as_str), Some("tok123"));
    }

    #[test]
    fn test_rejects_other_paths() {
        assert_eq!(ShareRoute::match_path("/"), ShareRoute::NoToken);
        assert_eq!(ShareRoute::match_path(""), ShareRoute::NoToken);
        assert_eq!(ShareRoute::match_path("/notes/12"), ShareRoute::NoToken);
        assert_eq!(ShareRoute::match_path("/shared"), ShareRoute::NoToken);
        assert_eq!(ShareRoute::match_path("/shared/tok/extra"), ShareRoute::NoToken);
    }

    #[test]
    fn test_token_is_percent_decoded() {
        let route = ShareRoute::match_path("/shared/a%20b");
        assert_eq!(route.token().map(ShareToken::as_str), Some("a b"));
    }

    #[test]
    fn test_undecodable_token_kept_raw() {
        let route = ShareRoute::match_path("/shared/%FF%FE");
        assert_eq!(route.token().map(ShareToken::as_str), Some("%FF%FE"));
    }

    #[test]
    fn test_trailing_slash_has_no_token() {
        assert_eq!(ShareRoute::match_path("/shared/"), ShareRoute::NoToken);
    }

    #[test]
    fn test_segment_is_case_sensitive() {
        assert_eq!(ShareRoute::match_path("/Shared/tok"), ShareRoute::NoToken);
    }
}
