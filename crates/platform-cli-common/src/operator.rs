//! Local operator identity for the `Owner` tag

/// Environment variables checked, in order, for the login name
const OPERATOR_ENV_VARS: &[&str] = &["USER", "LOGNAME", "USERNAME"];

/// Resolve the name of the local operator from the process environment.
///
/// Falls back to `fallback` when none of the login variables is set.
pub fn resolve_operator_identity(fallback: &str) -> String {
    resolve_operator_identity_with(|key| std::env::var(key).ok(), fallback)
}

/// Resolve the operator name through an arbitrary variable lookup.
pub fn resolve_operator_identity_with<F>(lookup: F, fallback: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    OPERATOR_ENV_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
