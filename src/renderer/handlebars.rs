use handlebars::Handlebars;

use super::{helpers, TemplateKind, TemplateRenderer};
use crate::error::{Error, Result};

/// Handlebars-based template rendering engine.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        helpers::register(&mut registry);
        Self { registry }
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Handlebars
    }

    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.registry.render_template(template, context).map_err(|err| Error::RenderError {
            kind: TemplateKind::Handlebars,
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(template: &str, context: serde_json::Value) -> String {
        HandlebarsRenderer::new().render(template, &context).unwrap()
    }

    #[test]
    fn case_helpers() {
        let ctx = json!({ "name": "user_name" });
        assert_eq!(render("{{camelCase name}}", ctx.clone()), "userName");
        assert_eq!(render("{{pascalCase name}}", ctx.clone()), "UserName");
        assert_eq!(render("{{kebabCase name}}", ctx.clone()), "user-name");
        assert_eq!(render("{{capitalize \"user\"}}", ctx.clone()), "User");
        assert_eq!(render("{{underscore \"userName\"}}", ctx), "user_name");
    }

    #[test]
    fn logic_helpers() {
        let ctx = json!({ "tags": ["a", "b"], "n": 3 });
        assert_eq!(render("{{#if (includes tags \"b\")}}yes{{/if}}", ctx.clone()), "yes");
        assert_eq!(render("{{#if (eq n 3)}}three{{/if}}", ctx.clone()), "three");
        assert_eq!(render("{{concat \"a\" n \"c\"}}", ctx.clone()), "a3c");
        assert_eq!(render("{{default missing \"fallback\"}}", ctx.clone()), "fallback");
        assert_eq!(render("{{#if (isArray tags)}}list{{/if}}", ctx), "list");
    }

    #[test]
    fn missing_paths_render_empty() {
        let ctx = json!({ "field": { "name": "id" } });
        assert_eq!(render("[{{field._rules.enum.name}}]", ctx.clone()), "[]");
        assert_eq!(render("{{#if field._rules.enum}}x{{else}}y{{/if}}", ctx), "y");
    }

    #[test]
    fn output_is_not_html_escaped() {
        assert_eq!(render("{{t}}", json!({ "t": "Map<K, V>" })), "Map<K, V>");
    }

    #[test]
    fn unclosed_block_is_render_error() {
        let err = HandlebarsRenderer::new().render("{{#if x}}", &json!({})).unwrap_err();
        assert!(matches!(err, Error::RenderError { kind: TemplateKind::Handlebars, .. }));
    }
}
