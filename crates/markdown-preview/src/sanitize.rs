use std::borrow::Cow;
use std::sync::LazyLock;

use ammonia::Builder;

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Elements whose first newline is dropped by the HTML parser.
const NEWLINE_ELIDING_TAGS: [&str; 3] = ["pre", "textarea", "listing"];

static UGC_POLICY: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::default();
    for tag in HEADINGS {
        builder.add_tag_attributes(tag, &["id"]);
    }
    builder.add_tag_attributes("code", &["class"]);
    builder.attribute_filter(language_class_only);
    builder.link_rel(Some("nofollow noopener noreferrer"));
    builder
});

/// Strip markup outside the user-generated content allowlist.
///
/// Formatting, links with safe schemes, images, lists, tables and code survive;
/// scripts, styles, event handlers and unsafe URLs do not. Sanitizing an
/// already sanitized fragment returns it unchanged.
pub fn sanitize(html: &str) -> String {
    restore_leading_newlines(&UGC_POLICY.clean(html).to_string())
}

/// Keeps `class` on `code` only for fenced-code language hints.
fn language_class_only<'u>(
    element: &str,
    attribute: &str,
    value: &'u str,
) -> Option<Cow<'u, str>> {
    if element != "code" || attribute != "class" {
        return Some(Cow::Borrowed(value));
    }

    let language = value.strip_prefix("language-")?;
    if !language.is_empty() && language.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        Some(Cow::Borrowed(value))
    } else {
        None
    }
}

/// Re-emit the newline the parser swallows after `<pre>`-like start tags.
///
/// A serialized body that starts with `\n` gets one extra `\n` so the next
/// parse yields the same text.
fn restore_leading_newlines(html: &str) -> String {
    let mut output = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        let (before, tail) = rest.split_at(start);
        output.push_str(before);

        match eliding_start_tag_len(tail) {
            Some(len) => {
                output.push_str(&tail[..len]);
                rest = &tail[len..];
                if rest.starts_with('\n') {
                    output.push('\n');
                }
            }
            None => {
                output.push('<');
                rest = &tail[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// Byte length of a `pre`/`textarea`/`listing` start tag at the front of `tail`.
fn eliding_start_tag_len(tail: &str) -> Option<usize> {
    let name = NEWLINE_ELIDING_TAGS.iter().find(|tag| {
        tail[1..]
            .get(..tag.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(tag))
    })?;

    let attributes = &tail[1 + name.len()..];
    if !attributes.starts_with(['>', ' ', '\t', '\n', '/']) {
        return None;
    }

    let mut quoted = false;
    for (idx, ch) in attributes.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            '>' if !quoted => return Some(1 + name.len() + idx + 1),
            _ => {}
        }
    }
    None
}
