//! Share link
//!
//! Builds a WhatsApp deep-link; delivery is left to whatever opens it.

/// Pre-filled share message
pub const SHARE_MESSAGE: &str = "I just said YES 💍💖 Happy Valentine's!";
/// Share button text
pub const SHARE_LABEL: &str = "Share the love 💖";
/// Deep-link base (contact goes in the path)
pub const SHARE_BASE: &str = "https://wa.me/";

/// `https://wa.me/<contact>?text=<message>`, or the generic share form
/// when there is no contact
pub fn share_link(contact: Option<&str>, message: &str) -> String {
    let text = urlencoding::encode(message);
    match contact.map(str::trim).filter(|c| !c.is_empty()) {
        Some(contact) => format!("{SHARE_BASE}{}?text={text}", urlencoding::encode(contact)),
        None => format!("{SHARE_BASE}?text={text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_with_contact() {
        let link = share_link(Some("15551234567"), SHARE_MESSAGE);
        assert!(link.starts_with("https://wa.me/15551234567?text="));
        assert!(link.contains("I%20just%20said%20YES%20"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn test_link_without_contact() {
        let link = share_link(None, SHARE_MESSAGE);
        assert!(link.starts_with("https://wa.me/?text=I%20just"));
        assert_eq!(share_link(Some("  "), SHARE_MESSAGE), link);
    }

    #[test]
    fn test_message_round_trips() {
        let link = share_link(Some("1"), SHARE_MESSAGE);
        let (_, text) = link.split_once("?text=").unwrap();
        assert_eq!(urlencoding::decode(text).unwrap(), SHARE_MESSAGE);
        assert!(text.contains("%F0%9F%92%8D")); // 💍
    }

    #[test]
    fn test_contact_cannot_escape_path() {
        let link = share_link(Some("123/../evil?x=1"), "hi");
        assert_eq!(link, "https://wa.me/123%2F..%2Fevil%3Fx%3D1?text=hi");
    }
}
