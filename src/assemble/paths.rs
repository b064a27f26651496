//! Path-prefix computation for asset URLs.
//!
//! Documents reference their bundles either through an absolute public path
//! (rooted or CDN deployments) or through a relative ascent from the route's
//! directory depth back to the asset root. Everything here is string work on
//! URL-shaped paths; no filesystem access.

/// The literal public-path placeholder token.
///
/// A configured public path equal to this token is resolved by a later build
/// stage and passes through untouched: it gets no trailing-slash
/// normalization and counts as absolute.
pub const PUBLIC_PATH_PLACEHOLDER: &str = "{{ publicPath }}";

/// Normalize a path-like string to end with `/`.
///
/// The placeholder token is left untouched.
pub fn ensure_trailing_slash(path: &str) -> String {
    if path == PUBLIC_PATH_PLACEHOLDER || path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Strip a single leading `/`.
pub fn strip_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Whether a public path needs no relative ascent: rooted paths, full URLs,
/// and the deferred placeholder.
pub fn is_absolute_public_path(path: &str) -> bool {
    path.starts_with('/')
        || path.starts_with("http://")
        || path.starts_with("https://")
        || path == PUBLIC_PATH_PLACEHOLDER
}

/// Relative ascent from a route's directory depth back to the asset root.
///
/// # Examples
/// ```ignore
/// path_to_static("/a/b") => "../"
/// path_to_static("/a/b/") => "../../"
/// path_to_static("/") => "./"
/// path_to_static("") => "./"
/// ```
pub fn path_to_static(route: &str) -> String {
    let ascents = strip_leading_slash(route).split('/').count() - 1;
    if ascents == 0 {
        "./".to_string()
    } else {
        "../".repeat(ascents)
    }
}

/// Prefix with `./` unless already rooted or relative.
pub fn add_relative_prefix(path: &str) -> String {
    if path.starts_with('/') || path.starts_with('.') {
        path.to_string()
    } else {
        format!("./{path}")
    }
}

/// How the runtime `publicPath` global is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicPath {
    /// Known at build time; emitted as a string literal.
    Absolute(String),
    /// Served relative to wherever the application is mounted; computed at
    /// load time from `location.origin` and the runtime router base.
    Relative(String),
}

/// Resolve the configured public path against a route's relative ascent.
///
/// Returns the prefix used to construct asset URLs in the document, plus the
/// normalized public path tagged with how the runtime global is emitted.
pub fn resolve_public_path(configured: &str, ascent: &str) -> (String, PublicPath) {
    let public = ensure_trailing_slash(configured);

    if is_absolute_public_path(&public) {
        (public.clone(), PublicPath::Absolute(public))
    } else {
        let joined =
            format!("{ascent}{}", public.trim_start_matches("./")).replace('\\', "/");
        (add_relative_prefix(&joined), PublicPath::Relative(public))
    }
}

/// Join an asset file name onto a computed prefix.
///
/// A leading `/` on the file is dropped, and a doubled `./` produced by the
/// join collapses to a single one.
pub fn asset_path(prefix: &str, file: &str) -> String {
    let joined = format!("{prefix}{}", strip_leading_slash(file));
    match joined.strip_prefix("././") {
        Some(rest) => format!("./{rest}"),
        None => joined,
    }
}
