use crate::url::canonicalize::has_literal_authority;
use crate::UrlError;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A canonical page identity: an absolute URL with its fragment removed
///
/// Two Locations are equal iff their text is byte-equal. A Location never
/// carries a fragment; the only ways to build one are [`Location::parse`]
/// and [`crate::url::canonicalize`], and both strip it.
///
/// Seeds parsed with [`Location::parse`] are always `http` or `https`.
/// Locations produced by [`crate::url::canonicalize`] keep whatever scheme
/// the link was written with (`mailto:`, `ftp:`, ...); such Locations fail
/// to fetch like any other unreachable page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(String);

impl Location {
    /// Parses a seed Location from user input
    ///
    /// The input must be an absolute `http` or `https` URL with a host. The
    /// fragment is dropped; everything else is kept exactly as written.
    ///
    /// # Arguments
    ///
    /// * `input` - The URL string to parse
    ///
    /// # Returns
    ///
    /// * `Ok(Location)` - The seed Location
    /// * `Err(UrlError)` - The input is not a crawlable absolute URL
    ///
    /// # Examples
    ///
    /// ```
    /// use sumi_frontier::url::Location;
    ///
    /// let seed = Location::parse("http://example.com#top").unwrap();
    /// assert_eq!(seed.as_str(), "http://example.com");
    /// ```
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let cleaned = sanitize(input);
        let without_fragment = match cleaned.find('#') {
            Some(index) => &cleaned[..index],
            None => cleaned.as_str(),
        };

        let parsed = Url::parse(without_fragment).map_err(|e| UrlError::Parse(e.to_string()))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                parsed.scheme()
            )));
        }

        if parsed.host_str().map_or(true, str::is_empty)
            || !has_literal_authority(without_fragment)
        {
            return Err(UrlError::MissingDomain);
        }

        Ok(Self(without_fragment.to_string()))
    }

    /// Wraps text that has already been resolved and checked
    pub(crate) fn from_resolved(text: String) -> Self {
        debug_assert!(!text.contains('#'));
        Self(text)
    }

    /// Returns the Location as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the Location, returning its text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Location {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Strips leading C0 controls and spaces, and removes embedded tab/CR/LF
///
/// Hrefs copied out of HTML routinely carry stray whitespace and line breaks.
pub(crate) fn sanitize(input: &str) -> String {
    input
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect()
}
