//! Escaping of untrusted text for embedding into HTML documents.

/// Escapes `&`, `<` and `>` and turns line breaks (`\n`, `\r\n` or a lone
/// `\r`) into `<br/>` tags.
///
/// Quotes are left untouched, so the result must only be placed in element
/// content, never inside an attribute value.
///
/// #### Example
/// ```rust
/// # use relay_utils::html::escape_html;
/// assert_eq!(escape_html("a < b\nc"), "a &lt; b<br/>c");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' => out.push_str("<br/>"),
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push_str("<br/>");
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_html("Hello World!"), "Hello World!");
    }

    #[test]
    fn script_tag() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert('x')&lt;/script&gt;"
        );
    }

    #[test]
    fn ampersand_is_escaped_once() {
        assert_eq!(escape_html("&lt; & co"), "&amp;lt; &amp; co");
    }

    #[test]
    fn line_breaks() {
        assert_eq!(escape_html("a\nb\r\nc\rd"), "a<br/>b<br/>c<br/>d");
        assert_eq!(escape_html("a\r\rb\n\r\nc"), "a<br/><br/>b<br/><br/>c");
    }
}
