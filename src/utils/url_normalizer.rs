//! URL canonicalization.
//!
//! Splits arbitrary input into URL components without rejecting anything, then
//! applies the host and scheme rules from [`NormalizationConfig`] to produce a
//! stable identity for deduplication.

use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::config::NormalizationConfig;
use crate::domain::entities::CanonicalUrl;

/// Generic URI component grammar. Matches every input string.
static URI_COMPONENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$").unwrap()
});

const WWW_PREFIX: &str = "www.";

/// Hosts rewritten to a Medium front-end regardless of configuration.
const MEDIUM_HOST: &str = "medium.com";
const MEDIUM_SUBDOMAIN_SUFFIX: &str = ".medium.com";
const MEDIUM_REPLACEMENT: &str = "scribe.rip";

/// A URL split into its components on a best-effort basis.
///
/// Parsing never fails. The scheme is lowercased; every other component keeps
/// its original bytes, so [`fmt::Display`] reassembles the input apart from
/// scheme case. The host keeps any `:port` suffix; rules match against that
/// full string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedUrl {
    pub scheme: Option<String>,
    pub userinfo: Option<String>,
    /// `None` when the input has no `//` authority section.
    pub host: Option<String>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl ParsedUrl {
    /// Splits `input` into components.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookmarks_core::utils::url_normalizer::ParsedUrl;
    ///
    /// let url = ParsedUrl::parse("https://user@example.com:8080/a?b=1#c");
    /// assert_eq!(url.scheme.as_deref(), Some("https"));
    /// assert_eq!(url.userinfo.as_deref(), Some("user"));
    /// assert_eq!(url.host.as_deref(), Some("example.com:8080"));
    /// assert_eq!(url.path, "/a");
    /// assert_eq!(url.to_string(), "https://user@example.com:8080/a?b=1#c");
    /// ```
    pub fn parse(input: &str) -> Self {
        let Some(caps) = URI_COMPONENTS.captures(input) else {
            return Self {
                path: input.to_string(),
                ..Self::default()
            };
        };

        let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());

        let (userinfo, host) = match caps.get(2).map(|m| m.as_str()) {
            Some(authority) => match authority.rsplit_once('@') {
                Some((user, host)) => (Some(user.to_string()), Some(host.to_string())),
                None => (None, Some(authority.to_string())),
            },
            None => (None, None),
        };

        Self {
            scheme: group(1).map(|s| s.to_ascii_lowercase()),
            userinfo,
            host,
            path: group(3).unwrap_or_default(),
            query: group(4),
            fragment: group(5),
        }
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(host) = &self.host {
            f.write_str("//")?;
            if let Some(userinfo) = &self.userinfo {
                write!(f, "{userinfo}@")?;
            }
            f.write_str(host)?;
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// Rule engine turning parsed URLs into canonical identities.
///
/// Holds an immutable rule set built once at startup; share it as
/// `Arc<Normalizer>` across the import pipeline.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    rules: Arc<NormalizationConfig>,
}

impl Normalizer {
    /// Creates a normalizer that owns `rules` for its whole lifetime.
    pub fn new(rules: NormalizationConfig) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Applies every rule, in order, to `url`.
    ///
    /// # Rule Order
    ///
    /// 1. **add-www**: listed hosts gain a `www.` prefix
    /// 2. **remove-www**: listed hosts lose a leading `www.`
    /// 3. **replace-domain**: exact host substitution
    /// 4. **Medium**: `medium.com` and `*.medium.com` become `scribe.rip` (fixed, not configurable)
    /// 5. **force-https**: listed hosts get the `https` scheme
    ///
    /// Each step sees the host produced by the previous one. Path, query and
    /// fragment are never touched, so `https://a.com` and `https://a.com/`
    /// stay distinct.
    pub fn normalize(&self, mut url: ParsedUrl) -> ParsedUrl {
        let Some(host) = url.host.take() else {
            return url;
        };
        url.host = Some(self.normalize_host(host));

        if url
            .host
            .as_deref()
            .is_some_and(|h| self.rules.force_https.contains(h))
            && url.scheme.as_deref() != Some("https")
        {
            url.scheme = Some("https".to_string());
        }

        url
    }

    /// Parses and normalizes `input` into the identity used for storage lookups.
    pub fn canonicalize(&self, input: &str) -> CanonicalUrl {
        let normalized = self.normalize(ParsedUrl::parse(input));
        CanonicalUrl::from_normalized(normalized.to_string())
    }

    /// Host part of the pipeline (steps 1 to 4).
    fn normalize_host(&self, mut host: String) -> String {
        if self.rules.add_www.contains(&host) {
            host.insert_str(0, WWW_PREFIX);
        }

        if self.rules.remove_www.contains(&host)
            && let Some(stripped) = host.strip_prefix(WWW_PREFIX)
        {
            host = stripped.to_string();
        }

        if let Some(replacement) = self
            .rules
            .replace_domain
            .get(&host)
            .filter(|r| !r.is_empty())
        {
            host = replacement.clone();
        }

        if host == MEDIUM_HOST || host.ends_with(MEDIUM_SUBDOMAIN_SUFFIX) {
            host = MEDIUM_REPLACEMENT.to_string();
        }

        host
    }

    /// Hosts whose normalization must be checked for stability: every host a
    /// rule names, plus the fixed Medium rewrite.
    fn rule_hosts(&self) -> impl Iterator<Item = &str> {
        let rules = &self.rules;
        rules
            .add_www
            .iter()
            .chain(&rules.remove_www)
            .chain(&rules.force_https)
            .chain(rules.replace_domain.keys())
            .chain(rules.replace_domain.values())
            .map(String::as_str)
            .chain([MEDIUM_HOST, MEDIUM_REPLACEMENT])
    }

    /// Returns the first host for which normalizing twice differs from
    /// normalizing once.
    pub fn find_unstable_host(&self) -> Option<String> {
        self.rule_hosts().find_map(|host| {
            let once = self.normalize_host(host.to_string());
            let twice = self.normalize_host(once.clone());
            (once != twice).then(|| host.to_string())
        })
    }
}
