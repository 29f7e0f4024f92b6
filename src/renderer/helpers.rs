//! Helpers registered on the Handlebars backend.

use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;

use super::filters::{
    to_camel_case, to_kebab_case, to_pascal_case, to_snake_case, underscore, upper_first,
};

/// Applies `convert` to strings and passes every other value through.
fn map_str(value: &Value, convert: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(text) => Value::String(convert(text)),
        other => other.clone(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

handlebars_helper!(capitalize: |value: Json| map_str(value, upper_first));
handlebars_helper!(camel_case: |value: Json| map_str(value, to_camel_case));
handlebars_helper!(pascal_case: |value: Json| map_str(value, to_pascal_case));
handlebars_helper!(snake_case: |value: Json| map_str(value, to_snake_case));
handlebars_helper!(kebab_case: |value: Json| map_str(value, to_kebab_case));
handlebars_helper!(underscore_case: |value: Json| map_str(value, underscore));
handlebars_helper!(includes: |list: Json, value: Json| {
    list.as_array().is_some_and(|items| items.contains(value))
});
handlebars_helper!(concat: |*args| args.iter().map(|arg| stringify(arg)).collect::<String>());
handlebars_helper!(default_value: |value: Json, fallback: Json| {
    if value.is_null() { fallback.clone() } else { value.clone() }
});
handlebars_helper!(is_string: |value: Json| value.is_string());
handlebars_helper!(is_number: |value: Json| value.is_number());
handlebars_helper!(is_array: |value: Json| value.is_array());
handlebars_helper!(is_object: |value: Json| value.is_object());

pub(super) fn register(registry: &mut Handlebars<'static>) {
    registry.register_helper("capitalize", Box::new(capitalize));
    registry.register_helper("camelCase", Box::new(camel_case));
    registry.register_helper("pascalCase", Box::new(pascal_case));
    registry.register_helper("snakeCase", Box::new(snake_case));
    registry.register_helper("kebabCase", Box::new(kebab_case));
    registry.register_helper("underscore", Box::new(underscore_case));
    registry.register_helper("includes", Box::new(includes));
    registry.register_helper("concat", Box::new(concat));
    registry.register_helper("default", Box::new(default_value));
    registry.register_helper("isString", Box::new(is_string));
    registry.register_helper("isNumber", Box::new(is_number));
    registry.register_helper("isArray", Box::new(is_array));
    registry.register_helper("isObject", Box::new(is_object));
}
