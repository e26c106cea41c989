//! Environment placeholder expansion for configuration values.
//!
//! Supports `${NAME}` syntax inside string values, replaced by the value of
//! the environment variable `NAME`. Use `$${...}` to escape and produce a
//! literal `${...}`. Keys, comments and non-string values are never touched.

use toml::{Table, Value};

use super::ParseError;

/// Expands `${NAME}` placeholders in every string value of `table` from the
/// process environment.
pub fn expand_env(table: &mut Table) -> Result<(), ParseError> {
    expand_table(table, &|name: &str| std::env::var(name).ok())
}

/// Expands placeholders in every string value of `table` using `lookup`.
pub fn expand_table<F>(table: &mut Table, lookup: &F) -> Result<(), ParseError>
where
    F: Fn(&str) -> Option<String>,
{
    for (_key, value) in table.iter_mut() {
        expand_value(value, lookup)?;
    }
    Ok(())
}

/// Expands placeholders in a single value (recursively for tables/arrays).
fn expand_value<F>(value: &mut Value, lookup: &F) -> Result<(), ParseError>
where
    F: Fn(&str) -> Option<String>,
{
    match value {
        Value::String(s) => {
            *s = expand_placeholders(s, lookup)?;
            Ok(())
        }
        Value::Table(t) => expand_table(t, lookup),
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                expand_value(item, lookup)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Expands `${NAME}` placeholders in a string using `lookup`.
///
/// Expansion is a single pass: a substituted value is never expanded again.
pub fn expand_placeholders<F>(input: &str, lookup: F) -> Result<String, ParseError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                // $$ -> $
                chars.next();
                result.push('$');
            }
            Some('{') => {
                chars.next();
                let name =
                    consume_until(&mut chars, '}').ok_or(ParseError::UnclosedPlaceholder)?;
                let name = name.trim();
                if name.is_empty() || name.contains(char::is_whitespace) {
                    return Err(ParseError::InvalidPlaceholder(name.to_string()));
                }
                let value = lookup(name).ok_or_else(|| ParseError::EnvVarNotFound {
                    name: name.to_string(),
                })?;
                result.push_str(&value);
            }
            _ => result.push('$'),
        }
    }

    Ok(result)
}

/// Consumes characters until the delimiter, returning the collected string.
fn consume_until(chars: &mut std::iter::Peekable<std::str::Chars>, delim: char) -> Option<String> {
    let mut result = String::new();
    for ch in chars.by_ref() {
        if ch == delim {
            return Some(result);
        }
        result.push(ch);
    }
    None
}
