//! The `Prefer` request header ([RFC 7240]) as used by LDP repositories.
//!
//! A preference carries a return mode and two sets of URIs naming groups of
//! triples to include in or omit from a representation. Short tokens such as
//! `PreferContainment` expand to their full namespace URI through a fixed table
//! ([`PreferToken`]); anything else is passed through unchanged.
//!
//! # Examples
//!
//! ```
//! use fcrepo_http::protocol::{Prefer, ReturnMode};
//!
//! let prefer = Prefer::representation()
//!     .include("PreferContainment")
//!     .omit("ServerManaged");
//! let header = prefer.to_string();
//! assert_eq!(
//!     header,
//!     r#"return=representation; include="http://www.w3.org/ns/ldp#PreferContainment"; omit="http://fedora.info/definitions/v4/repository#ServerManaged""#
//! );
//!
//! let parsed: Prefer = header.parse().unwrap();
//! assert_eq!(parsed, prefer);
//! assert_eq!(parsed.return_mode, ReturnMode::Representation);
//! ```
//!
//! [RFC 7240]: https://datatracker.ietf.org/doc/html/rfc7240

use crate::error::{FcrepoError, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

const LDP_NS: &str = "http://www.w3.org/ns/ldp#";
const REPOSITORY_NS: &str = "http://fedora.info/definitions/v4/repository#";

/// Well-known short forms accepted in include/omit lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreferToken {
    /// `ldp:PreferContainment`
    PreferContainment,
    /// `ldp:PreferMembership`
    PreferMembership,
    /// `ldp:PreferMinimalContainer`
    PreferMinimalContainer,
    /// Repository-managed triples
    ServerManaged,
    /// Embed the descriptions of child resources
    EmbedResources,
    /// Triples from other resources that point at this one
    InboundReferences,
}

impl PreferToken {
    /// Every known token.
    pub const ALL: [PreferToken; 6] = [
        PreferToken::PreferContainment,
        PreferToken::PreferMembership,
        PreferToken::PreferMinimalContainer,
        PreferToken::ServerManaged,
        PreferToken::EmbedResources,
        PreferToken::InboundReferences,
    ];

    /// The short name of the token.
    pub fn name(self) -> &'static str {
        match self {
            PreferToken::PreferContainment => "PreferContainment",
            PreferToken::PreferMembership => "PreferMembership",
            PreferToken::PreferMinimalContainer => "PreferMinimalContainer",
            PreferToken::ServerManaged => "ServerManaged",
            PreferToken::EmbedResources => "EmbedResources",
            PreferToken::InboundReferences => "InboundReferences",
        }
    }

    /// The full URI the token stands for.
    pub fn uri(self) -> &'static str {
        match self {
            PreferToken::PreferContainment => "http://www.w3.org/ns/ldp#PreferContainment",
            PreferToken::PreferMembership => "http://www.w3.org/ns/ldp#PreferMembership",
            PreferToken::PreferMinimalContainer => {
                "http://www.w3.org/ns/ldp#PreferMinimalContainer"
            }
            PreferToken::ServerManaged => {
                "http://fedora.info/definitions/v4/repository#ServerManaged"
            }
            PreferToken::EmbedResources => {
                "http://fedora.info/definitions/v4/repository#EmbedResources"
            }
            PreferToken::InboundReferences => {
                "http://fedora.info/definitions/v4/repository#InboundReferences"
            }
        }
    }

    /// Look a token up by its short name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.name() == name)
    }

    fn namespace(self) -> &'static str {
        match self {
            PreferToken::PreferContainment
            | PreferToken::PreferMembership
            | PreferToken::PreferMinimalContainer => LDP_NS,
            _ => REPOSITORY_NS,
        }
    }
}

impl fmt::Display for PreferToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.namespace(), self.name())
    }
}

/// Expand a short token to its URI; unknown values come back unchanged.
///
/// # Examples
///
/// ```
/// use fcrepo_http::protocol::expand_prefer_token;
///
/// assert_eq!(expand_prefer_token("PreferMembership"), "http://www.w3.org/ns/ldp#PreferMembership");
/// assert_eq!(expand_prefer_token("http://example.org/ns#Custom"), "http://example.org/ns#Custom");
/// ```
pub fn expand_prefer_token(token: &str) -> String {
    let token = token.trim();
    PreferToken::from_name(token)
        .map(|known| known.uri().to_string())
        .unwrap_or_else(|| token.to_string())
}

/// The `return` preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReturnMode {
    /// `return=minimal`
    Minimal,
    /// `return=representation`
    Representation,
    /// No `return` preference given
    #[default]
    Unspecified,
}

/// A parsed `Prefer` header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Prefer {
    /// Requested return mode
    pub return_mode: ReturnMode,
    include: BTreeSet<String>,
    omit: BTreeSet<String>,
}

impl Prefer {
    /// An empty preference.
    pub fn new() -> Self {
        Self::default()
    }

    /// `return=minimal`
    pub fn minimal() -> Self {
        Prefer {
            return_mode: ReturnMode::Minimal,
            ..Default::default()
        }
    }

    /// `return=representation`
    pub fn representation() -> Self {
        Prefer {
            return_mode: ReturnMode::Representation,
            ..Default::default()
        }
    }

    /// Add a URI (or short token) to the include set.
    pub fn include(mut self, uri: impl AsRef<str>) -> Self {
        self.include.insert(expand_prefer_token(uri.as_ref()));
        self
    }

    /// Add a URI (or short token) to the omit set.
    pub fn omit(mut self, uri: impl AsRef<str>) -> Self {
        self.omit.insert(expand_prefer_token(uri.as_ref()));
        self
    }

    /// URIs to include.
    pub fn includes(&self) -> &BTreeSet<String> {
        &self.include
    }

    /// URIs to omit.
    pub fn omits(&self) -> &BTreeSet<String> {
        &self.omit
    }

    /// Build a `return=representation` preference from configured token lists.
    ///
    /// Returns `None` when both lists are empty, meaning no header is sent.
    pub fn from_lists<S: AsRef<str>>(include: &[S], omit: &[S]) -> Option<Self> {
        let prefer = include
            .iter()
            .flat_map(|value| split_uris(value.as_ref()))
            .fold(Prefer::representation(), |p, uri| p.include(uri));
        let prefer = omit
            .iter()
            .flat_map(|value| split_uris(value.as_ref()))
            .fold(prefer, |p, uri| p.omit(uri));

        if prefer.include.is_empty() && prefer.omit.is_empty() {
            None
        } else {
            Some(prefer)
        }
    }
}

fn split_uris(value: &str) -> impl Iterator<Item = &str> {
    value.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty())
}

/// Split on `;` and `,` that are not inside double quotes.
fn split_preferences(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ';' | ',' if !quoted => {
                parts.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

impl FromStr for Prefer {
    type Err = FcrepoError;

    fn from_str(value: &str) -> Result<Self> {
        let mut prefer = Prefer::new();

        for part in split_preferences(value) {
            let (key, raw) = match part.split_once('=') {
                Some((key, raw)) => (key.trim(), raw.trim()),
                None => (part, ""),
            };
            let raw = raw.trim_matches('"');

            match key.to_ascii_lowercase().as_str() {
                "return" => {
                    prefer.return_mode = match raw.to_ascii_lowercase().as_str() {
                        "minimal" => ReturnMode::Minimal,
                        "representation" => ReturnMode::Representation,
                        other => {
                            return Err(FcrepoError::HeaderParse(format!(
                                "Invalid Prefer return value: '{}'",
                                other
                            )))
                        }
                    };
                }
                "include" => prefer
                    .include
                    .extend(split_uris(raw).map(str::to_string)),
                "omit" => prefer.omit.extend(split_uris(raw).map(str::to_string)),
                _ => {}
            }
        }

        Ok(prefer)
    }
}

impl fmt::Display for Prefer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        match self.return_mode {
            ReturnMode::Minimal => parts.push("return=minimal".to_string()),
            ReturnMode::Representation => parts.push("return=representation".to_string()),
            ReturnMode::Unspecified => {}
        }
        if !self.include.is_empty() {
            let uris: Vec<&str> = self.include.iter().map(String::as_str).collect();
            parts.push(format!("include=\"{}\"", uris.join(" ")));
        }
        if !self.omit.is_empty() {
            let uris: Vec<&str> = self.omit.iter().map(String::as_str).collect();
            parts.push(format!("omit=\"{}\"", uris.join(" ")));
        }
        f.write_str(&parts.join("; "))
    }
}
