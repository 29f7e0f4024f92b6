//! Template rendering backends and dispatch by file extension.
//!
//! Two backends are supported:
//! - Handlebars (`.hbs`, `.handlebars`): logic-less, missing paths render empty.
//! - MiniJinja (`.j2`, `.jinja`, `.jinja2`): directive-based; attribute access
//!   through an undefined value is an error, which is why templates feeding
//!   module generation go through [`rewrite`] first.

pub(crate) mod filters;
mod handlebars;
mod helpers;
mod minijinja;
pub mod rewrite;

use std::fmt::Display;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::extensions;
use crate::error::{Error, Result};
use crate::ext::PathExt;

pub use self::handlebars::HandlebarsRenderer;
pub use self::minijinja::MiniJinjaRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Handlebars,
    Jinja,
}

impl TemplateKind {
    /// Detects the backend from the final extension, case-insensitively.
    ///
    /// # Examples
    /// ```
    /// use codesmith::renderer::TemplateKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(TemplateKind::from_path(Path::new("entity.java.j2")), Some(TemplateKind::Jinja));
    /// assert_eq!(TemplateKind::from_path(Path::new("dto.hbs")), Some(TemplateKind::Handlebars));
    /// assert_eq!(TemplateKind::from_path(Path::new("entity.java.vm")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension_lowercase()?;
        if extensions::HANDLEBARS.contains(&ext.as_str()) {
            Some(TemplateKind::Handlebars)
        } else if extensions::JINJA.contains(&ext.as_str()) {
            Some(TemplateKind::Jinja)
        } else {
            None
        }
    }

    /// Like [`TemplateKind::from_path`] but reports unknown extensions as an error.
    pub fn detect(file: &str) -> Result<Self> {
        Self::from_path(Path::new(file))
            .ok_or_else(|| Error::UnsupportedTemplateKind { file: file.to_string() })
    }

    /// Whether templates must go through [`rewrite::rewrite_field_paths`]
    /// before rendering flattened module fields.
    pub fn requires_path_rewrite(self) -> bool {
        matches!(self, TemplateKind::Jinja)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Handlebars => "handlebars",
            TemplateKind::Jinja => "jinja",
        }
    }
}

impl Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    fn kind(&self) -> TemplateKind;

    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered text, or [`Error::RenderError`] carrying the backend message
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// Both backends, selected per template file.
#[derive(Default)]
pub struct TemplateEngine {
    handlebars: HandlebarsRenderer,
    jinja: MiniJinjaRenderer,
}

impl TemplateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renderer(&self, kind: TemplateKind) -> &dyn TemplateRenderer {
        match kind {
            TemplateKind::Handlebars => &self.handlebars,
            TemplateKind::Jinja => &self.jinja,
        }
    }

    /// Renders `template` with the backend selected by `file`'s extension.
    pub fn render_file(
        &self,
        file: &str,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<String> {
        let kind = TemplateKind::detect(file)?;
        self.renderer(kind).render(template, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_kinds_case_insensitively() {
        assert_eq!(TemplateKind::from_path(Path::new("A.HBS")), Some(TemplateKind::Handlebars));
        assert_eq!(TemplateKind::from_path(Path::new("a.jinja2")), Some(TemplateKind::Jinja));
        assert_eq!(TemplateKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn unsupported_extension_is_reported() {
        let err = TemplateEngine::new().render_file("a.vm", "x", &json!({})).unwrap_err();
        assert!(matches!(err, Error::UnsupportedTemplateKind { file } if file == "a.vm"));
    }

    #[test]
    fn dispatches_by_extension() {
        let engine = TemplateEngine::new();
        let context = json!({ "name": "World" });
        assert_eq!(engine.render_file("a.hbs", "Hi {{name}}", &context).unwrap(), "Hi World");
        assert_eq!(engine.render_file("a.j2", "Hi {{ name }}", &context).unwrap(), "Hi World");
    }

    #[test]
    fn only_jinja_requires_rewrite() {
        assert!(TemplateKind::Jinja.requires_path_rewrite());
        assert!(!TemplateKind::Handlebars.requires_path_rewrite());
    }
}
