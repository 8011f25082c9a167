//! Textual script-tag injection.
//!
//! Deliberately a text transformation, not a DOM edit: the pages this
//! runs against are written back byte-for-byte except for the inserted
//! line, so nothing else on the page is disturbed (attribute order,
//! entity choices, whitespace).

use regex::Regex;

/// Insert `script_tag` (plus a newline and the original indentation's
/// two spaces) immediately before the first `<script ... src="...">` tag
/// whose src ends with `target_src`.
///
/// Returns `None` when no such script tag exists in the page, in which
/// case the caller should leave the file untouched.
#[must_use]
pub fn inject_script_before(html: &str, target_src: &str, script_tag: &str) -> Option<String> {
    let pattern = format!(
        r#"<script[^>]*src="[^"]*{}"[^>]*>"#,
        regex::escape(target_src)
    );
    // The pattern embeds an escaped literal, so compilation cannot fail
    // on caller input; treat a failure like a missing target anyway.
    let target = Regex::new(&pattern).ok()?;

    let found = target.find(html)?;
    let mut out = String::with_capacity(html.len() + script_tag.len() + 3);
    out.push_str(&html[..found.start()]);
    out.push_str(script_tag);
    out.push_str("\n  ");
    out.push_str(&html[found.start()..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::inject_script_before;

    #[test]
    fn test_injects_before_target() {
        let html = r#"<body><script src="js/webflow-script.js"></script></body>"#;
        let out = inject_script_before(
            html,
            "webflow-script.js",
            r#"<script src="js/analyze-webflow.js"></script>"#,
        )
        .unwrap();
        assert_eq!(
            out,
            "<body><script src=\"js/analyze-webflow.js\"></script>\n  \
             <script src=\"js/webflow-script.js\"></script></body>"
        );
    }

    #[test]
    fn test_target_must_end_the_src() {
        let html = r#"<script src="js/webflow-script.js.bak"></script>"#;
        assert!(inject_script_before(html, "webflow-script.js", "<script></script>").is_none());
    }

    #[test]
    fn test_missing_target_returns_none() {
        assert!(inject_script_before("<body></body>", "webflow-script.js", "<script></script>").is_none());
    }

    #[test]
    fn test_only_first_occurrence_is_injected() {
        let html = concat!(
            r#"<script src="a/webflow-script.js"></script>"#,
            r#"<script src="b/webflow-script.js"></script>"#,
        );
        let out = inject_script_before(html, "webflow-script.js", "<script>x</script>").unwrap();
        assert_eq!(out.matches("<script>x</script>").count(), 1);
        assert!(out.starts_with("<script>x</script>\n  <script src=\"a/"));
    }
}
