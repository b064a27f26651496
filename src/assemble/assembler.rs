//! The page document assembler.

use std::collections::HashMap;
use std::path::PathBuf;

use html_minifier::HTMLMinifier;

use crate::chunks::ChunkMap;
use crate::config::ShellConfig;
use crate::hooks::{Hooks, ModifyHtmlArgs};

use super::inject::{inject_into_body, inject_into_head, script_tag, stylesheet_tag};
use super::paths::{asset_path, ensure_trailing_slash, path_to_static, resolve_public_path};
use super::script::bootstrap_script;
use super::template::{TemplatePaths, render_document, select_template};

#[derive(thiserror::Error, Debug)]
pub enum AssembleError {
    #[error("failed to read template {}: {source}", path.display())]
    ReadTemplate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Render(#[from] tera::Error),

    #[error("hook '{hook}' failed: {source}")]
    Hook {
        hook: &'static str,
        source: anyhow::Error,
    },

    #[error("failed to minify HTML: {0}")]
    Minify(String),
}

/// One page to assemble.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// The route path the document is generated for.
    pub path: String,
    /// Resolve bundles through the chunk map and include the CSS bundle.
    pub is_production: bool,
    /// Compress the final document.
    pub minify: bool,
}

/// Assembles one static HTML document per route.
///
/// Assembly is a pure function of the inputs held here plus the request
/// (the only I/O is reading the selected template file), so repeated calls
/// with unchanged inputs produce byte-identical documents. The borrowed
/// inputs are all read-only; assemblers for different routes can run in
/// parallel over the same configuration.
pub struct Assembler<'a> {
    config: &'a ShellConfig,
    templates: &'a TemplatePaths,
    chunks: &'a ChunkMap,
    hooks: &'a Hooks,
}

impl<'a> Assembler<'a> {
    pub fn new(
        config: &'a ShellConfig,
        templates: &'a TemplatePaths,
        chunks: &'a ChunkMap,
        hooks: &'a Hooks,
    ) -> Self {
        Self {
            config,
            templates,
            chunks,
            hooks,
        }
    }

    /// Assemble the document for one route.
    ///
    /// Steps:
    /// 1. Select the template and run the default-template hook
    /// 2. Render it with the page context
    /// 3. Resolve the asset prefix and runtime publicPath shape
    /// 4. Generate the bootstrap script and run the script hook
    /// 5. Inject bundle references and the script
    /// 6. Run the document hook, then optionally minify
    pub fn assemble(&self, request: &PageRequest) -> Result<String, AssembleError> {
        let page = self.config.pages.get(&request.path);

        // Step 1: custom templates never see the default-template hook.
        let template = select_template(page, self.templates)?;
        let template_text = if template.is_custom {
            template.text
        } else {
            self.hooks
                .apply_default_template(template.text)
                .map_err(|source| AssembleError::Hook {
                    hook: "modify_default_template",
                    source,
                })?
        };

        // Exported routes are served from directories; the path gains its
        // trailing slash before it reaches the template or the depth math.
        let route = match &self.config.export_static {
            Some(export) if !export.html_suffix => ensure_trailing_slash(&request.path),
            _ => request.path.clone(),
        };

        // Step 2
        let empty = HashMap::new();
        let page_context = page.map(|p| &p.context).unwrap_or(&empty);
        let html = render_document(&template_text, &route, page_context)?;

        // Step 3
        let ascent = path_to_static(&route);
        let (static_prefix, public_path) =
            resolve_public_path(&self.config.site.public_path, &ascent);

        // Step 4
        let script = bootstrap_script(&route, self.config.site.base_url.as_deref(), &public_path);
        let script = self
            .hooks
            .apply_html_script(script)
            .map_err(|source| AssembleError::Hook {
                hook: "modify_html_script",
                source,
            })?;

        // Step 5: the CSS bundle only exists in production and may
        // legitimately be absent from the manifest; the JS bundle is always
        // referenced.
        let library = &self.config.site.library_name;
        let css_fragment = if request.is_production {
            self.chunks
                .resolve(&format!("{library}.css"), true)
                .map(|file| stylesheet_tag(&asset_path(&static_prefix, &file)))
                .unwrap_or_default()
        } else {
            String::new()
        };
        let js_file = self
            .chunks
            .resolve(&format!("{library}.js"), request.is_production)
            .unwrap_or_else(|| format!("{library}.js"));
        let js_tag = script_tag(&asset_path(&static_prefix, &js_file));

        let html = inject_into_head(&html, &css_fragment);
        let html = inject_into_body(&html, &format!("{script}\n{js_tag}"));

        // Step 6
        let args = ModifyHtmlArgs::new(&route);
        let html = self
            .hooks
            .apply_html(html, &args)
            .map_err(|source| AssembleError::Hook {
                hook: "modify_html",
                source,
            })?;

        if request.minify { minify(&html) } else { Ok(html) }
    }
}

/// Compress a document, collapsing whitespace runs while leaving attribute
/// quoting untouched (consumers require quoted attributes).
fn minify(html: &str) -> Result<String, AssembleError> {
    let mut minifier = HTMLMinifier::new();
    minifier
        .digest(html)
        .map_err(|e| AssembleError::Minify(e.to_string()))?;

    Ok(String::from_utf8_lossy(minifier.get_html()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use crate::config::{ExportStatic, PageConfig, SiteConfig, TemplateConfig};

    const DOCUMENT: &str = "<html>\n<head>\n  <title>{{ title | default(value=\"App\") }}</title>\n</head>\n<body>\n  <div id=\"root\"></div>\n</body>\n</html>\n";

    fn config_in(root: &Path, public_path: &str) -> ShellConfig {
        std::fs::create_dir_all(root.join("templates")).unwrap();
        std::fs::write(root.join("templates/document.html"), DOCUMENT).unwrap();

        ShellConfig {
            site: SiteConfig {
                library_name: "mylib".to_string(),
                public_path: public_path.to_string(),
                base_url: None,
                output: PathBuf::from("dist"),
                manifest: PathBuf::from("dist/asset-manifest.json"),
            },
            export_static: None,
            templates: TemplateConfig::default(),
            pages: HashMap::new(),
        }
    }

    fn request(path: &str) -> PageRequest {
        PageRequest {
            path: path.to_string(),
            is_production: false,
            minify: false,
        }
    }

    fn assemble(config: &ShellConfig, root: &Path, request: &PageRequest) -> String {
        let templates = TemplatePaths::resolve(&config.templates, root);
        let chunks = ChunkMap::default();
        let hooks = Hooks::new();
        Assembler::new(config, &templates, &chunks, &hooks)
            .assemble(request)
            .unwrap()
    }

    #[test]
    fn absolute_public_path_is_emitted_as_a_literal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/static/");

        let html = assemble(&config, dir.path(), &request("/"));

        assert!(html.contains("window.publicPath = '/static/';"));
        assert!(html.contains(r#"<script src="/static/mylib.js"></script>"#));
        assert!(html.contains("window.routerBase = '/';"));
    }

    #[test]
    fn relative_public_path_ascends_from_the_route_depth() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "assets/");

        let html = assemble(&config, dir.path(), &request("/a/b"));

        assert!(html.contains(r#"<script src="../assets/mylib.js"></script>"#));
        assert!(html.contains(
            "window.publicPath = location.origin + window.routerBase + 'assets/';"
        ));
        assert!(html.contains(
            "window.routerBase = location.pathname.split('/').slice(0, -2).concat('').join('/');"
        ));
    }

    #[test]
    fn development_builds_reference_no_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/");

        let html = assemble(&config, dir.path(), &request("/"));

        assert!(!html.contains("<link rel=\"stylesheet\""));
        assert!(html.contains(r#"<script src="/mylib.js"></script>"#));
    }

    #[test]
    fn production_resolves_bundles_through_the_chunk_map() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/");
        let templates = TemplatePaths::resolve(&config.templates, dir.path());
        let chunks: ChunkMap = [
            ("mylib.js".to_string(), "mylib.3f9c01.js".to_string()),
            ("mylib.css".to_string(), "mylib.b2a4e7.css".to_string()),
        ]
        .into_iter()
        .collect();
        let hooks = Hooks::new();

        let html = Assembler::new(&config, &templates, &chunks, &hooks)
            .assemble(&PageRequest {
                path: "/".to_string(),
                is_production: true,
                minify: false,
            })
            .unwrap();

        assert!(html.contains(r#"<link rel="stylesheet" href="/mylib.b2a4e7.css" />"#));
        assert!(html.contains(r#"<script src="/mylib.3f9c01.js"></script>"#));
    }

    #[test]
    fn a_missing_css_chunk_omits_the_stylesheet_but_keeps_the_script() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/");
        let templates = TemplatePaths::resolve(&config.templates, dir.path());
        let chunks: ChunkMap = [("mylib.js".to_string(), "mylib.3f9c01.js".to_string())]
            .into_iter()
            .collect();
        let hooks = Hooks::new();

        let html = Assembler::new(&config, &templates, &chunks, &hooks)
            .assemble(&PageRequest {
                path: "/".to_string(),
                is_production: true,
                minify: false,
            })
            .unwrap();

        assert!(!html.contains("<link rel=\"stylesheet\""));
        assert!(html.contains(r#"<script src="/mylib.3f9c01.js"></script>"#));
    }

    #[test]
    fn stylesheets_go_to_the_head_and_scripts_to_the_body() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/");
        let templates = TemplatePaths::resolve(&config.templates, dir.path());
        let chunks: ChunkMap = [
            ("mylib.js".to_string(), "mylib.js".to_string()),
            ("mylib.css".to_string(), "mylib.css".to_string()),
        ]
        .into_iter()
        .collect();
        let hooks = Hooks::new();

        let html = Assembler::new(&config, &templates, &chunks, &hooks)
            .assemble(&PageRequest {
                path: "/".to_string(),
                is_production: true,
                minify: false,
            })
            .unwrap();

        let link = html.find("<link rel=\"stylesheet\"").unwrap();
        let head_close = html.find("</head>").unwrap();
        let script = html.find("<script>").unwrap();
        let bundle = html.find("<script src=").unwrap();
        let body_close = html.find("</body>").unwrap();

        assert!(link < head_close);
        assert!(head_close < script);
        assert!(script < bundle);
        assert!(bundle < body_close);
    }

    #[test]
    fn a_template_with_only_a_body_receives_everything_before_it_closes() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/");
        std::fs::write(
            dir.path().join("templates/document.html"),
            "<body><div id=\"root\"></div></body>",
        )
        .unwrap();

        let templates = TemplatePaths::resolve(&config.templates, dir.path());
        let chunks: ChunkMap = [
            ("mylib.js".to_string(), "mylib.js".to_string()),
            ("mylib.css".to_string(), "mylib.css".to_string()),
        ]
        .into_iter()
        .collect();
        let hooks = Hooks::new();

        let html = Assembler::new(&config, &templates, &chunks, &hooks)
            .assemble(&PageRequest {
                path: "/".to_string(),
                is_production: true,
                minify: false,
            })
            .unwrap();

        let link = html.find("<link rel=\"stylesheet\"").unwrap();
        let script = html.find("<script>").unwrap();
        let bundle = html.find("<script src=").unwrap();
        let body_close = html.find("</body>").unwrap();

        assert!(link < script);
        assert!(script < bundle);
        assert!(bundle < body_close);
    }

    #[test]
    fn a_template_without_anchors_passes_through_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/");
        std::fs::write(
            dir.path().join("templates/document.html"),
            "<div id=\"root\"></div>",
        )
        .unwrap();

        let html = assemble(&config, dir.path(), &request("/"));

        assert_eq!(html, "<div id=\"root\"></div>");
    }

    #[test]
    fn exported_routes_gain_a_trailing_slash() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "assets/");
        config.export_static = Some(ExportStatic { html_suffix: false });
        std::fs::write(
            dir.path().join("templates/document.html"),
            "<body>{{ path }}</body>",
        )
        .unwrap();

        let html = assemble(&config, dir.path(), &request("/a/b"));

        // "/a/b/" is one directory deeper than "/a/b"
        assert!(html.starts_with("<body>/a/b/"));
        assert!(html.contains("../../assets/mylib.js"));
    }

    #[test]
    fn the_html_suffix_keeps_routes_unnormalized() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "assets/");
        config.export_static = Some(ExportStatic { html_suffix: true });
        std::fs::write(
            dir.path().join("templates/document.html"),
            "<body>{{ path }}</body>",
        )
        .unwrap();

        let html = assemble(&config, dir.path(), &request("/a/b"));

        assert!(html.starts_with("<body>/a/b<"));
        assert!(html.contains("../assets/mylib.js"));
    }

    #[test]
    fn the_base_url_shim_is_embedded_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "/");
        config.site.base_url = Some("/app/".to_string());

        let html = assemble(&config, dir.path(), &request("/a/b"));

        assert!(html.contains("window.routerBase = \"/app/\";"));
        assert!(html.contains("location.pathname.indexOf(window.routerBase)"));
    }

    #[test]
    fn page_context_reaches_the_template() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "/");
        config.pages.insert(
            "/".to_string(),
            PageConfig {
                document: None,
                context: HashMap::from([(
                    "title".to_string(),
                    serde_json::Value::String("Home".to_string()),
                )]),
            },
        );

        let html = assemble(&config, dir.path(), &request("/"));

        assert!(html.contains("<title>Home</title>"));
    }

    #[test]
    fn the_default_template_hook_skips_custom_templates() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/");
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(
            dir.path().join("src/document.html"),
            "<body>custom</body>",
        )
        .unwrap();

        let templates = TemplatePaths::resolve(&config.templates, dir.path());
        let chunks = ChunkMap::default();
        let mut hooks = Hooks::new();
        hooks.on_modify_default_template(|_| {
            panic!("must not run for custom templates");
        });

        let html = Assembler::new(&config, &templates, &chunks, &hooks)
            .assemble(&request("/"))
            .unwrap();

        assert!(html.contains("custom"));
    }

    #[test]
    fn hooks_rewrite_script_and_document() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/");
        let templates = TemplatePaths::resolve(&config.templates, dir.path());
        let chunks = ChunkMap::default();

        let mut hooks = Hooks::new();
        hooks.on_modify_html_script(|script| Ok(format!("<!-- injected -->\n{script}")));
        hooks.on_modify_html(|html, args| Ok(format!("{html}<!-- page {} -->", args.path)));

        let html = Assembler::new(&config, &templates, &chunks, &hooks)
            .assemble(&request("/a/b"))
            .unwrap();

        assert!(html.contains("<!-- injected -->\n<script>"));
        assert!(html.ends_with("<!-- page /a/b -->"));
    }

    #[test]
    fn a_failing_hook_aborts_assembly() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/");
        let templates = TemplatePaths::resolve(&config.templates, dir.path());
        let chunks = ChunkMap::default();

        let mut hooks = Hooks::new();
        hooks.on_modify_html(|_, _| Err(anyhow::anyhow!("plugin exploded")));

        let err = Assembler::new(&config, &templates, &chunks, &hooks)
            .assemble(&request("/"))
            .unwrap_err();

        assert!(matches!(err, AssembleError::Hook { hook: "modify_html", .. }));
    }

    #[test]
    fn assembly_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "assets/");

        let first = assemble(&config, dir.path(), &request("/a/b"));
        let second = assemble(&config, dir.path(), &request("/a/b"));

        assert_eq!(first, second);
    }

    #[test]
    fn minified_documents_keep_quoted_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "/static/");
        let templates = TemplatePaths::resolve(&config.templates, dir.path());
        let chunks = ChunkMap::default();
        let hooks = Hooks::new();

        let html = Assembler::new(&config, &templates, &chunks, &hooks)
            .assemble(&PageRequest {
                path: "/".to_string(),
                is_production: false,
                minify: true,
            })
            .unwrap();

        // No whitespace runs between tags, but attributes stay quoted
        assert!(!html.contains("  <"));
        assert!(!html.contains(">\n\n"));
        assert!(html.contains(r#"src="/static/mylib.js""#));
        assert!(html.contains(r#"id="root""#));
    }
}
