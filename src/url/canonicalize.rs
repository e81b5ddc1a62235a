use crate::url::location::{sanitize, Location};
use url::Url;

/// A URI reference split into its RFC 3986 components, fragment discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reference<'a> {
    scheme: Option<&'a str>,
    authority: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
}

/// Resolves a link found on `base` into a canonical Location
///
/// # Canonicalization Steps
///
/// 1. Strip leading control characters/spaces and embedded tab, CR and LF
/// 2. Drop the fragment (everything after `#`)
/// 3. Resolve the reference against `base` (RFC 3986 section 5.2):
///    - Absolute links are kept as written
///    - Links naming the scheme of `base` but no host (`http:page`,
///      `http:///page`) are resolved like scheme-less links
///    - Scheme-relative links (`//host/path`) take the scheme of `base`
///    - Root-relative links replace the whole path of `base`
///    - Path-relative links are merged with the directory of `base`, with
///      `.` and `..` segments collapsed
///    - An empty link (or a fragment-only one) resolves to `base`
/// 4. Reject the result if it is not a well-formed URL, or if it has a host
///    that is not spelled out in its own text
///
/// No other normalization happens. Host case, default ports, trailing
/// slashes and query parameter order are preserved, which means some
/// Locations that a browser would treat as the same page stay distinct.
///
/// # Arguments
///
/// * `base` - The Location of the page the link was found on
/// * `link` - The raw href value
///
/// # Returns
///
/// * `Some(Location)` - The canonical Location of the link
/// * `None` - The link is malformed and should be dropped
///
/// # Examples
///
/// ```
/// use sumi_frontier::url::{canonicalize, Location};
///
/// let base = Location::parse("http://example.com/company/").unwrap();
/// let link = canonicalize(&base, "../careers#open-roles").unwrap();
/// assert_eq!(link.as_str(), "http://example.com/careers");
/// ```
pub fn canonicalize(base: &Location, link: &str) -> Option<Location> {
    let cleaned = sanitize(link);
    let resolved = resolve(split(base.as_str()), split(&cleaned));

    match Url::parse(&resolved) {
        Ok(parsed) if parsed.has_host() && !has_literal_authority(&resolved) => {
            tracing::trace!(
                "Dropping link {:?} on {}: host {:?} is implied, not written",
                link,
                base,
                parsed.host_str()
            );
            None
        }
        Ok(_) => Some(Location::from_resolved(resolved)),
        Err(e) => {
            tracing::trace!("Dropping malformed link {:?} on {}: {}", link, base, e);
            None
        }
    }
}

/// Checks that a URL carries a non-empty `//authority` component
///
/// `Url::parse` repairs `http:host/path` and `http:///host/path` into
/// `http://host/path`, so a host it reports is only trusted when the text
/// itself names one.
pub(crate) fn has_literal_authority(text: &str) -> bool {
    split(text).authority.map_or(false, |authority| !authority.is_empty())
}

/// Splits a reference into scheme, authority, path and query
fn split(input: &str) -> Reference<'_> {
    let input = match input.find('#') {
        Some(index) => &input[..index],
        None => input,
    };

    let (scheme, rest) = match input.find(':') {
        Some(index) if is_scheme(&input[..index]) => (Some(&input[..index]), &input[index + 1..]),
        _ => (None, input),
    };

    let (authority, rest) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(|c: char| c == '/' || c == '?').unwrap_or(after.len());
            (Some(&after[..end]), &after[end..])
        }
        None => (None, rest),
    };

    let (path, query) = match rest.find('?') {
        Some(index) => (&rest[..index], Some(&rest[index + 1..])),
        None => (rest, None),
    };

    Reference {
        scheme,
        authority,
        path,
        query,
    }
}

/// Checks the scheme grammar: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Resolves `reference` against `base` and recomposes the target
fn resolve(base: Reference<'_>, mut reference: Reference<'_>) -> String {
    let base_scheme = base.scheme.unwrap_or_default();

    // An empty authority names no host, and a repeated base scheme without a
    // host is a relative reference.
    if reference.authority == Some("") {
        reference.authority = None;
    }
    if reference.authority.is_none()
        && reference
            .scheme
            .map_or(false, |scheme| scheme.eq_ignore_ascii_case(base_scheme))
    {
        reference.scheme = None;
    }

    // Links that carry their own authority are taken as written.
    let (scheme, authority, path, query) = if let Some(scheme) = reference.scheme {
        (
            scheme,
            reference.authority,
            reference.path.to_string(),
            reference.query,
        )
    } else if reference.authority.is_some() {
        (
            base_scheme,
            reference.authority,
            reference.path.to_string(),
            reference.query,
        )
    } else if reference.path.is_empty() {
        (
            base_scheme,
            base.authority,
            base.path.to_string(),
            reference.query.or(base.query),
        )
    } else if reference.path.starts_with('/') {
        (
            base_scheme,
            base.authority,
            remove_dot_segments(reference.path),
            reference.query,
        )
    } else {
        (
            base_scheme,
            base.authority,
            remove_dot_segments(&merge(&base, reference.path)),
            reference.query,
        )
    };

    let mut target = String::with_capacity(
        scheme.len() + authority.map_or(0, str::len) + path.len() + query.map_or(0, str::len) + 4,
    );
    target.push_str(scheme);
    target.push(':');
    if let Some(authority) = authority {
        target.push_str("//");
        target.push_str(authority);
    }
    target.push_str(&path);
    if let Some(query) = query {
        target.push('?');
        target.push_str(query);
    }
    target
}

/// Merges a relative path with the directory part of the base path
fn merge(base: &Reference<'_>, relative: &str) -> String {
    if base.authority.is_some() && base.path.is_empty() {
        return format!("/{}", relative);
    }

    match base.path.rfind('/') {
        Some(index) => format!("{}{}", &base.path[..=index], relative),
        None => relative.to_string(),
    }
}

/// Collapses `.` and `..` segments (RFC 3986 section 5.2.4)
fn remove_dot_segments(path: &str) -> String {
    let mut input = path;
    let mut output = String::with_capacity(path.len());

    while !input.is_empty() {
        if let Some(rest) = input.strip_prefix("../") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix("./") {
            input = rest;
        } else if input.starts_with("/./") {
            input = &input[2..];
        } else if input == "/." {
            input = "/";
        } else if input.starts_with("/../") {
            input = &input[3..];
            pop_last_segment(&mut output);
        } else if input == "/.." {
            input = "/";
            pop_last_segment(&mut output);
        } else if input == "." || input == ".." {
            input = "";
        } else {
            let start = usize::from(input.starts_with('/'));
            let end = input[start..]
                .find('/')
                .map_or(input.len(), |index| index + start);
            output.push_str(&input[..end]);
            input = &input[end..];
        }
    }

    output
}

fn pop_last_segment(output: &mut String) {
    match output.rfind('/') {
        Some(index) => output.truncate(index),
        None => output.clear(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(url: &str) -> Location {
        Location::parse(url).unwrap()
    }

    fn resolve_str(base_url: &str, link: &str) -> Option<String> {
        canonicalize(&base(base_url), link).map(Location::into_string)
    }

    #[test]
    fn test_relative_forms_from_directory_base() {
        let base_url = "http://example.com/company/";
        let cases = [
            ("/about", "http://example.com/about"),
            ("contact.html", "http://example.com/company/contact.html"),
            ("../careers", "http://example.com/careers"),
            ("//otherdomain.com/path", "http://otherdomain.com/path"),
            ("http://fulldomain.com/specific", "http://fulldomain.com/specific"),
        ];

        for (link, expected) in cases {
            assert_eq!(
                resolve_str(base_url, link).as_deref(),
                Some(expected),
                "link {:?}",
                link
            );
        }
    }

    #[test]
    fn test_root_relative_from_bare_host() {
        assert_eq!(
            resolve_str("http://example.com", "/page1").as_deref(),
            Some("http://example.com/page1")
        );
    }

    #[test]
    fn test_path_relative_from_bare_host() {
        assert_eq!(
            resolve_str("http://example.com", "page1").as_deref(),
            Some("http://example.com/page1")
        );
    }

    #[test]
    fn test_path_relative_replaces_last_segment() {
        assert_eq!(
            resolve_str("http://example.com/docs/intro.html", "setup.html").as_deref(),
            Some("http://example.com/docs/setup.html")
        );
    }

    #[test]
    fn test_fragment_equivalence() {
        for base_url in [
            "http://example.com",
            "http://example.com/company/",
            "https://example.com/a/b?q=1",
        ] {
            for path in ["x", "/x", "../x", "http://other.com/x", ""] {
                let a = resolve_str(base_url, &format!("{}#a", path));
                let b = resolve_str(base_url, &format!("{}#b", path));
                assert!(a.is_some());
                assert_eq!(a, b, "base {} path {:?}", base_url, path);
            }
        }
    }

    #[test]
    fn test_absolute_link_kept_as_written() {
        assert_eq!(
            resolve_str("http://example.com", "http://EXAMPLE.com:80/a/../b").as_deref(),
            Some("http://EXAMPLE.com:80/a/../b")
        );
    }

    #[test]
    fn test_self_link_matches_seed() {
        assert_eq!(
            resolve_str("http://example.com", "http://example.com").as_deref(),
            Some("http://example.com")
        );
    }

    #[test]
    fn test_trailing_slash_not_normalized() {
        let bare = resolve_str("http://example.com/a", "http://x.com");
        let slashed = resolve_str("http://example.com/a", "http://x.com/");
        assert_ne!(bare, slashed);
    }

    #[test]
    fn test_query_preserved() {
        assert_eq!(
            resolve_str("http://example.com/list", "?page=2&sort=asc#top").as_deref(),
            Some("http://example.com/list?page=2&sort=asc")
        );
    }

    #[test]
    fn test_empty_link_resolves_to_base() {
        assert_eq!(
            resolve_str("http://example.com/a?q=1", "").as_deref(),
            Some("http://example.com/a?q=1")
        );
        assert_eq!(
            resolve_str("http://example.com/a?q=1", "#frag").as_deref(),
            Some("http://example.com/a?q=1")
        );
    }

    #[test]
    fn test_dot_segments_collapsed() {
        assert_eq!(
            resolve_str("http://example.com/a/b/c", "./d/../e/.").as_deref(),
            Some("http://example.com/a/b/e/")
        );
        assert_eq!(
            resolve_str("http://example.com/a/b/c", "../../../../g").as_deref(),
            Some("http://example.com/g")
        );
        assert_eq!(
            resolve_str("http://example.com/a/b/c", "/./x/../y").as_deref(),
            Some("http://example.com/y")
        );
    }

    #[test]
    fn test_scheme_relative_inherits_https() {
        assert_eq!(
            resolve_str("https://example.com/", "//cdn.example.com/lib").as_deref(),
            Some("https://cdn.example.com/lib")
        );
    }

    #[test]
    fn test_other_schemes_kept() {
        // Filtering these is up to the link extractor
        assert_eq!(
            resolve_str("http://example.com/", "mailto:someone@example.com").as_deref(),
            Some("mailto:someone@example.com")
        );
        assert_eq!(
            resolve_str("http://example.com/", "ftp://files.example.com/x").as_deref(),
            Some("ftp://files.example.com/x")
        );
    }

    #[test]
    fn test_whitespace_hygiene() {
        assert_eq!(
            resolve_str("http://example.com/", "  /pa\nge\t1").as_deref(),
            Some("http://example.com/page1")
        );
    }

    #[test]
    fn test_malformed_links_dropped() {
        assert_eq!(resolve_str("http://example.com/", "http://[::1"), None);
        assert_eq!(resolve_str("http://example.com/", "//exa mple.com/"), None);
    }

    #[test]
    fn test_base_scheme_without_host_is_relative() {
        let base_url = "http://example.com/a/b";
        let cases = [
            ("http:c", "http://example.com/a/c"),
            ("HTTP:c", "http://example.com/a/c"),
            ("http:/c", "http://example.com/c"),
            ("http:?q=1", "http://example.com/a/b?q=1"),
            ("///path", "http://example.com/path"),
            ("http:///path", "http://example.com/path"),
            ("http://", "http://example.com/a/b"),
        ];

        for (link, expected) in cases {
            assert_eq!(
                resolve_str(base_url, link).as_deref(),
                Some(expected),
                "link {:?}",
                link
            );
        }
    }

    #[test]
    fn test_implied_host_dropped() {
        // Another web scheme without a written host would be read as `https://c/`
        assert_eq!(resolve_str("http://example.com/a/b", "https:c"), None);
        assert_eq!(resolve_str("http://example.com/a/b", "https:///path"), None);
        assert_eq!(resolve_str("http://example.com/a/b", "ftp:host/file"), None);
    }

    #[test]
    fn test_has_literal_authority() {
        assert!(has_literal_authority("http://example.com/a"));
        assert!(!has_literal_authority("http:///a"));
        assert!(!has_literal_authority("http:example.com/a"));
        assert!(!has_literal_authority("mailto:someone@example.com"));
    }

    #[test]
    fn test_invalid_scheme_chars_are_path() {
        assert_eq!(
            resolve_str("http://example.com/dir/", "1http:x").as_deref(),
            Some("http://example.com/dir/1http:x")
        );
    }

    #[test]
    fn test_remove_dot_segments() {
        assert_eq!(remove_dot_segments("/a/b/c/./../../g"), "/a/g");
        assert_eq!(remove_dot_segments("mid/content=5/../6"), "mid/6");
        assert_eq!(remove_dot_segments("/.."), "/");
        assert_eq!(remove_dot_segments(""), "");
    }

    #[test]
    fn test_split() {
        let reference = split("http://example.com/a?b=c#d");
        assert_eq!(reference.scheme, Some("http"));
        assert_eq!(reference.authority, Some("example.com"));
        assert_eq!(reference.path, "/a");
        assert_eq!(reference.query, Some("b=c"));

        let relative = split("../x?y");
        assert_eq!(relative.scheme, None);
        assert_eq!(relative.authority, None);
        assert_eq!(relative.path, "../x");
        assert_eq!(relative.query, Some("y"));
    }
}
