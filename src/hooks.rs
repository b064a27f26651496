//! Build extension hooks.
//!
//! Other build stages register transformers against three named extension
//! points. Each point holds an ordered list of fallible transformers that
//! are applied in registration order, each receiving the previous output as
//! its input; with none registered a value passes through unchanged.
//!
//! A failing transformer aborts assembly for that page. Hooks are not
//! isolated from each other: a plugin failure is a build-configuration bug
//! and is surfaced, never swallowed.

/// Arguments handed to `modify_html` transformers.
///
/// Read by registered plugins, not by the assembler itself.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct ModifyHtmlArgs {
    /// The route path the document was assembled for.
    pub path: String,
    /// Kept for transformers written against the older two-field signature.
    pub route: Route,
}

/// Route metadata in the older hook signature's shape.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Route {
    pub path: String,
}

impl ModifyHtmlArgs {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            route: Route {
                path: path.to_string(),
            },
        }
    }
}

type TextTransform = Box<dyn Fn(String) -> anyhow::Result<String> + Send + Sync>;
type HtmlTransform = Box<dyn Fn(String, &ModifyHtmlArgs) -> anyhow::Result<String> + Send + Sync>;

/// Registered transformers for the three extension points.
#[derive(Default)]
pub struct Hooks {
    modify_default_template: Vec<TextTransform>,
    modify_html_script: Vec<TextTransform>,
    modify_html: Vec<HtmlTransform>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transformer over the default document template.
    ///
    /// Runs only when no custom per-page template is selected.
    #[allow(dead_code)]
    pub fn on_modify_default_template<F>(&mut self, transform: F) -> &mut Self
    where
        F: Fn(String) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.modify_default_template.push(Box::new(transform));
        self
    }

    /// Register a transformer over the runtime bootstrap script.
    #[allow(dead_code)]
    pub fn on_modify_html_script<F>(&mut self, transform: F) -> &mut Self
    where
        F: Fn(String) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.modify_html_script.push(Box::new(transform));
        self
    }

    /// Register a transformer over the fully assembled document.
    #[allow(dead_code)]
    pub fn on_modify_html<F>(&mut self, transform: F) -> &mut Self
    where
        F: Fn(String, &ModifyHtmlArgs) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.modify_html.push(Box::new(transform));
        self
    }

    /// Fold the default-template transformers over the template text.
    pub fn apply_default_template(&self, initial: String) -> anyhow::Result<String> {
        self.modify_default_template
            .iter()
            .try_fold(initial, |value, transform| transform(value))
    }

    /// Fold the script transformers over the bootstrap script text.
    pub fn apply_html_script(&self, initial: String) -> anyhow::Result<String> {
        self.modify_html_script
            .iter()
            .try_fold(initial, |value, transform| transform(value))
    }

    /// Fold the document transformers over the assembled HTML.
    pub fn apply_html(&self, initial: String, args: &ModifyHtmlArgs) -> anyhow::Result<String> {
        self.modify_html
            .iter()
            .try_fold(initial, |value, transform| transform(value, args))
    }
}
