use log::warn;
use regex::Regex;

pub use cruet::{
    case::{
        camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
        screaming_snake::to_screaming_snake_case, snake::to_snake_case,
        table::to_table_case, train::to_train_case,
    },
    string::{pluralize::to_plural, singularize::to_singular},
    suffix::foreign_key::to_foreign_key,
};

/// Tests if a string matches a given regular expression pattern.
///
/// An invalid pattern is logged and treated as a non-match.
pub fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}

/// `AiProject` -> `aiProject`
pub fn lower_first(val: &str) -> String {
    let mut chars = val.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `user` -> `User`
pub fn upper_first(val: &str) -> String {
    let mut chars = val.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Splits lower-to-upper boundaries with `_` and lowercases, leaving other
/// separators alone: `userName-v2` -> `user_name-v2`.
pub fn underscore(val: &str) -> String {
    let mut out = String::with_capacity(val.len() + 4);
    let mut prev_lower = false;
    for ch in val.chars() {
        if ch.is_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = ch.is_lowercase();
        out.extend(ch.to_lowercase());
    }
    out
}
