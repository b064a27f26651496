//! Runtime bootstrap script generation.
//!
//! Every document carries a small inline script defining two globals the
//! client router reads before any bundle executes: `window.routerBase` (the
//! effective root the application is mounted under) and `window.publicPath`
//! (the base URL assets are served from).

use super::paths::{PublicPath, strip_leading_slash};

/// JavaScript expression for `window.routerBase`, plus the optional legacy
/// rebasing shim.
///
/// With a configured base URL the base is emitted as a JSON string literal
/// and the shim rebases it at load time, so the same build keeps working
/// when a host mounts the application under an additional prefix. Without
/// one, the base is derived from `location.pathname` by stripping the
/// route's trailing segments; the root route collapses to the literal `'/'`.
pub fn router_base(route: &str, base_url: Option<&str>) -> (String, Option<String>) {
    if let Some(base) = base_url {
        let literal =
            serde_json::to_string(base).expect("JSON-encoding a string cannot fail");
        let trailing = if base.ends_with('/') { "" } else { " + '/'" };
        let shim = format!(
            "if (window.routerBase !== '') {{\n    \
             var idx = location.pathname.indexOf(window.routerBase);\n    \
             if (idx > -1) {{\n      \
             window.routerBase = location.pathname.substr(0, idx) + window.routerBase{trailing};\n    \
             }}\n  \
             }}"
        );
        (literal, Some(shim))
    } else if route.is_empty() || route == "/" {
        ("'/'".to_string(), None)
    } else {
        let strip = route.split('/').count() - 1;
        (
            format!("location.pathname.split('/').slice(0, -{strip}).concat('').join('/')"),
            None,
        )
    }
}

/// JavaScript expression for `window.publicPath`.
pub fn public_path_expr(public: &PublicPath) -> String {
    match public {
        PublicPath::Absolute(path) => format!("'{path}'"),
        PublicPath::Relative(path) => format!(
            "location.origin + window.routerBase + '{}'",
            strip_leading_slash(path)
        ),
    }
}

/// The complete bootstrap `<script>` block for a route.
pub fn bootstrap_script(route: &str, base_url: Option<&str>, public: &PublicPath) -> String {
    let (base, shim) = router_base(route, base_url);

    let mut lines = Vec::with_capacity(5);
    lines.push("<script>".to_string());
    lines.push(format!("  window.routerBase = {base};"));
    if let Some(shim) = shim {
        lines.push(format!("  {shim}"));
    }
    lines.push(format!("  window.publicPath = {};", public_path_expr(public)));
    lines.push("</script>".to_string());
    lines.join("\n")
}
