use super::filters::*;
use super::{TemplateKind, TemplateRenderer};
use crate::error::{Error, Result};
use minijinja::{AutoEscape, Environment};

const TEMPLATE_NAME: &str = "template";

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer with the case filters registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Generated files are source code, never HTML.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        env.add_filter("camel_case", to_camel_case);
        env.add_filter("kebab_case", to_kebab_case);
        env.add_filter("pascal_case", to_pascal_case);
        env.add_filter("screaming_snake_case", to_screaming_snake_case);
        env.add_filter("snake_case", to_snake_case);
        env.add_filter("table_case", to_table_case);
        env.add_filter("train_case", to_train_case);
        env.add_filter("plural", to_plural);
        env.add_filter("singular", to_singular);
        env.add_filter("foreign_key", to_foreign_key);
        env.add_filter("lower_first", lower_first);
        env.add_filter("upper_first", upper_first);
        env.add_filter("regex", regex_filter);

        Self { env }
    }

    fn render_internal(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let mut env = self.env.clone();
        env.add_template(TEMPLATE_NAME, template)?;
        let tmpl = env.get_template(TEMPLATE_NAME)?;
        Ok(tmpl.render(context)?)
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::RenderError { kind: TemplateKind::Jinja, message: err.to_string() }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Jinja
    }

    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.render_internal(template, context)
    }
}
