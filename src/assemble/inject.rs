//! Asset tag construction and document injection.
//!
//! Injection is plain string surgery on the rendered document: stylesheets
//! go immediately before the closing head tag (falling back to the closing
//! body tag), the bootstrap script and bundle scripts go immediately before
//! the closing body tag. A document missing an anchor silently skips that
//! insertion; malformed templates are the template author's problem, not an
//! assembly error.

pub fn stylesheet_tag(href: &str) -> String {
    format!(r#"<link rel="stylesheet" href="{href}" />"#)
}

pub fn script_tag(src: &str) -> String {
    format!(r#"<script src="{src}"></script>"#)
}

/// Insert a fragment immediately before `</head>`, falling back to
/// `</body>`. Empty fragments leave the document alone.
pub fn inject_into_head(html: &str, fragment: &str) -> String {
    if fragment.is_empty() {
        return html.to_string();
    }

    if html.contains("</head>") {
        html.replacen("</head>", &format!("{fragment}\n</head>"), 1)
    } else {
        inject_into_body(html, fragment)
    }
}

/// Insert a fragment immediately before `</body>`. With no anchor present
/// the document is returned unchanged.
pub fn inject_into_body(html: &str, fragment: &str) -> String {
    if fragment.is_empty() {
        return html.to_string();
    }

    html.replacen("</body>", &format!("{fragment}\n</body>"), 1)
}
