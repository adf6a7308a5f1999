/// Fixed start of every generated page, up to and including the opening `<body>`.
pub const HEADER: &str = "<!DOCTYPE html>
<html>
<head>
<meta http-equiv=\"content-type\" content=\"text/html; charset=utf-8\">
<title>Markdown Preview Tool</title>
</head>
<body>
";

/// Fixed end of every generated page.
pub const FOOTER: &str = "
</body>
</html>
";

/// Wrap a sanitized fragment in the standalone page template.
pub fn wrap(fragment: &str) -> String {
    let mut document = String::with_capacity(HEADER.len() + fragment.len() + FOOTER.len());
    document.push_str(HEADER);
    document.push_str(fragment);
    document.push_str(FOOTER);
    document
}

/// Recover the fragment from a document produced by [`wrap`].
pub fn unwrap(document: &str) -> Option<&str> {
    document.strip_prefix(HEADER)?.strip_suffix(FOOTER)
}
