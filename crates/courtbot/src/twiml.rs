//! TwiML rendering for SMS webhook replies.

/// Content type of a TwiML document.
pub const TWIML_CONTENT_TYPE: &str = "text/xml";

/// Render one or more messages as a `<Response>` document.
pub fn messaging_response<S: AsRef<str>>(messages: &[S]) -> String {
    let mut out = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);
    for message in messages {
        out.push_str("<Message>");
        out.push_str(&escape_xml(message.as_ref()));
        out.push_str("</Message>");
    }
    out.push_str("</Response>");
    out
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_message() {
        assert_eq!(
            messaging_response(&["Hi there"]),
            r#"<?xml version="1.0" encoding="UTF-8"?><Response><Message>Hi there</Message></Response>"#
        );
    }

    #[test]
    fn test_escapes_markup() {
        let doc = messaging_response(&["a < b & \"c\""]);
        assert!(doc.contains("<Message>a &lt; b &amp; &quot;c&quot;</Message>"));
    }

    #[test]
    fn test_empty_response() {
        let none: [&str; 0] = [];
        assert_eq!(
            messaging_response(&none),
            r#"<?xml version="1.0" encoding="UTF-8"?><Response></Response>"#
        );
    }
}
