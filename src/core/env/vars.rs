use super::EnvError;
use std::env;

/// Set an environment variable for the shell and its future children.
/// PATH values are sanitized first: quote characters stripped, empty and
/// duplicate segments dropped.
pub fn set_var(name: &str, value: &str) -> Result<(), EnvError> {
    if name.is_empty() {
        return Err(EnvError::InvalidValue("empty variable name"));
    }

    let clean_value = if name == "PATH" {
        sanitize_path(value)
    } else {
        value.to_string()
    };

    env::set_var(name, clean_value);
    Ok(())
}

/// The whole environment table as `KEY=VALUE` lines.
pub fn format_env() -> Vec<String> {
    env::vars()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect()
}

fn sanitize_path(path: &str) -> String {
    let parts: Vec<&str> = path
        .split([':', '"', '\''])
        .filter(|s| !s.is_empty())
        .collect();

    let mut seen = std::collections::HashSet::new();
    let unique_parts: Vec<&str> = parts
        .into_iter()
        .filter(|part| seen.insert(*part))
        .collect();

    unique_parts.join(":")
}
