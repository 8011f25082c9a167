//! Tree-rewriting tests: href extension fixup and critical-asset inlining.

use webfold_html::{parse, serialize};
use webfold_site::{add_html_extension, inline_critical_assets};

#[test]
fn test_add_html_extension_rewrites_internal_anchors() {
    let mut tree = parse(
        r#"<html><body>
            <a href="/about">About</a>
            <a href="/work/project">Project</a>
        </body></html>"#,
    );

    assert_eq!(add_html_extension(&mut tree), 2);
    let out = serialize(&tree);
    assert!(out.contains(r#"href="/about.html""#));
    assert!(out.contains(r#"href="/work/project.html""#));
}

#[test]
fn test_add_html_extension_leaves_other_hrefs_alone() {
    let html = r##"<html><body>
        <a href="/">Home</a>
        <a href="/about.html">About</a>
        <a href="https://example.com/faq">External</a>
        <a href="#top">Anchor</a>
    </body></html>"##;
    let mut tree = parse(html);

    assert_eq!(add_html_extension(&mut tree), 0);
    let out = serialize(&tree);
    assert!(out.contains(r#"href="/""#));
    assert!(out.contains(r#"href="/about.html""#));
    assert!(out.contains(r#"href="https://example.com/faq""#));
    assert!(out.contains(r##"href="#top""##));
}

#[test]
fn test_add_html_extension_is_idempotent() {
    let mut tree = parse(r#"<html><body><a href="/about">About</a></body></html>"#);
    assert_eq!(add_html_extension(&mut tree), 1);
    assert_eq!(add_html_extension(&mut tree), 0);
    assert!(serialize(&tree).contains(r#"href="/about.html""#));
}

#[test]
fn test_inline_replaces_critical_stylesheet_link() {
    let mut tree = parse(
        r#"<html><head>
            <link rel="stylesheet" href="css/critical.css">
            <link rel="stylesheet" href="css/site.css">
        </head></html>"#,
    );

    let report = inline_critical_assets(&mut tree, |href| {
        assert_eq!(href, "css/critical.css");
        Some(".hero{color:red}".to_string())
    });

    assert_eq!(report.inlined_stylesheets, 1);
    let out = serialize(&tree);
    assert!(out.contains("<style>.hero{color:red}</style>"));
    assert!(!out.contains("css/critical.css"));
    assert!(out.contains("css/site.css"));
}

#[test]
fn test_inline_defers_non_critical_scripts() {
    let mut tree = parse(
        r#"<html><body>
            <script src="js/webflow.js"></script>
            <script src="js/critical-boot.js"></script>
            <script>var x = 1;</script>
        </body></html>"#,
    );

    let report = inline_critical_assets(&mut tree, |_| None);

    assert_eq!(report.deferred_scripts, 1);
    let out = serialize(&tree);
    assert!(out.contains(r#"<script defer="defer" src="js/webflow.js">"#));
    assert!(!out.contains(r#"defer="defer" src="js/critical-boot.js""#));
}

#[test]
fn test_inline_resolver_miss_keeps_link() {
    let mut tree = parse(r#"<html><head><link rel="stylesheet" href="css/critical.css"></head></html>"#);

    let report = inline_critical_assets(&mut tree, |_| None);

    assert_eq!(report.inlined_stylesheets, 0);
    assert!(serialize(&tree).contains("css/critical.css"));
}

#[test]
fn test_inline_already_deferred_script_is_not_recounted() {
    let mut tree = parse(r#"<html><body><script defer="defer" src="js/webflow.js"></script></body></html>"#);

    let report = inline_critical_assets(&mut tree, |_| None);

    assert_eq!(report.deferred_scripts, 0);
    assert!(!report.changed());
}

#[test]
fn test_inline_report_changed() {
    let mut tree = parse(r#"<html><body><script src="js/webflow.js"></script></body></html>"#);
    let report = inline_critical_assets(&mut tree, |_| None);
    assert!(report.changed());
}
