//! Launch configuration
//!
//! Parsed once from the page query string and handed to the widget.

use serde::{Deserialize, Serialize};
use url::Url;
use url::form_urlencoded;

use crate::consts::{DEFAULT_NAME, RESET_VALUE};

/// Query parameter names
pub mod params {
    pub const NAME: &str = "name";
    pub const CONTACT: &str = "whatsapp";
    pub const RESET: &str = "reset";
}

/// Inputs read from the URL at load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Name shown in the greeting (first letter capitalized)
    pub display_name: String,
    /// Messaging contact for the share link
    pub contact: Option<String>,
    /// Wipe saved state and reload without parameters
    pub reset: bool,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_NAME.to_string(),
            contact: None,
            reset: false,
        }
    }
}

impl LaunchConfig {
    /// Parse from a raw query string (leading `?` optional)
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let display_name = first_param(query, params::NAME)
            .filter(|name| !name.is_empty())
            .map(|name| capitalize_first(&name))
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        let contact = first_param(query, params::CONTACT).filter(|c| !c.is_empty());

        let reset = first_param(query, params::RESET).as_deref() == Some(RESET_VALUE);

        Self {
            display_name,
            contact,
            reset,
        }
    }
}

/// First value for `key`, form-decoded
fn first_param(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Upper-case the first character, leave the rest untouched
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Where the reset escape hatch navigates: same page, no query, no fragment
pub fn reset_destination(href: &str) -> Option<String> {
    let mut url = Url::parse(href).ok()?;
    url.set_query(None);
    url.set_fragment(None);
    Some(url.into())
}
