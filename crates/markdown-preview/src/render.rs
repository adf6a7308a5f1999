use pulldown_cmark::{html, Options, Parser};

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options
}

/// Render markdown source to an HTML fragment.
///
/// Every input is accepted. Bytes that are not valid UTF-8 are replaced with
/// U+FFFD before parsing, so rendering never fails.
pub fn render(source: &[u8]) -> String {
    let text = String::from_utf8_lossy(source);
    let parser = Parser::new_ext(&text, markdown_options());

    let mut output = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_atx_heading() {
        assert_eq!(render(b"# Hello"), "<h1>Hello</h1>\n");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render(b""), "");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let html = render(&[b'a', 0xff, 0xfe, b'b']);
        assert_eq!(html, "<p>a\u{FFFD}\u{FFFD}b</p>\n");
    }

    #[test]
    fn tables_and_strikethrough_are_enabled() {
        let html = render(b"| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n");
        assert!(html.contains("<table>"), "{html}");
        assert!(html.contains("<del>gone</del>"), "{html}");
    }

    #[test]
    fn rendering_is_deterministic() {
        let source = b"* one\n* two\n\n[link](https://example.com)\n";
        assert_eq!(render(source), render(source));
    }
}
