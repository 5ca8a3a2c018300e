//! HTTP verbs understood by the repository.

use crate::error::{FcrepoError, Result};
use std::fmt;
use std::str::FromStr;

/// The six verbs the protocol client can issue.
///
/// The default is `Get`: an operation that does not name a verb never mutates
/// the repository, even when it carries a body.
///
/// # Examples
///
/// ```
/// use fcrepo_http::Verb;
///
/// assert_eq!("patch".parse::<Verb>().unwrap(), Verb::Patch);
/// assert_eq!(Verb::default(), Verb::Get);
/// assert!("TRACE".parse::<Verb>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `HEAD`
    Head,
    /// `GET`
    #[default]
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Verb {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Head => "HEAD",
            Verb::Get => "GET",
            Verb::Put => "PUT",
            Verb::Post => "POST",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }

    /// Whether the verb carries a request body.
    #[inline]
    pub fn has_body(self) -> bool {
        matches!(self, Verb::Put | Verb::Post | Verb::Patch)
    }
}

impl FromStr for Verb {
    type Err = FcrepoError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_uppercase().as_str() {
            "HEAD" => Ok(Verb::Head),
            "GET" => Ok(Verb::Get),
            "PUT" => Ok(Verb::Put),
            "POST" => Ok(Verb::Post),
            "PATCH" => Ok(Verb::Patch),
            "DELETE" => Ok(Verb::Delete),
            other => Err(FcrepoError::InvalidRequest(format!(
                "Unsupported HTTP method: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Verb> for http::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Head => http::Method::HEAD,
            Verb::Get => http::Method::GET,
            Verb::Put => http::Method::PUT,
            Verb::Post => http::Method::POST,
            Verb::Patch => http::Method::PATCH,
            Verb::Delete => http::Method::DELETE,
        }
    }
}
