//! Identifier derivation for generated TypeScript symbols.
//!
//! Every name that appears in more than one artifact (function names, hook
//! names, type aliases) is derived here so the emitters cannot disagree.

use std::collections::HashSet;
use std::sync::LazyLock;

/// TypeScript reserved words that cannot be used as identifiers.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Identifier used when a path template derives to nothing (e.g. `/`).
const ROOT_IDENTIFIER: &str = "root";

/// Check if a property name needs quoting to be used as an object key.
pub fn needs_bracket_notation(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use in JavaScript/TypeScript double-quoted literals.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a property key if it is not a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_bracket_notation(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Turn `/` and `-` into camel-case boundaries and drop every other
/// non-alphanumeric character.
///
/// Only a word character (ASCII alphanumeric or `_`) directly after a run of
/// delimiters is upper-cased.
pub fn camelize(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut upper_next = false;

    for c in input.chars() {
        if c == '/' || c == '-' {
            upper_next = true;
            continue;
        }
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        let c = if upper_next && is_word {
            c.to_ascii_uppercase()
        } else {
            c
        };
        upper_next = false;
        if c.is_ascii_alphanumeric() {
            result.push(c);
        }
    }

    result
}

/// Convert a URL path template into a camelCase identifier.
///
/// `/users/{id}/posts` becomes `usersByIdPosts`, `/v1/auth-tokens` becomes
/// `v1AuthTokens`.
pub fn path_to_identifier(path: &str) -> String {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let mut expanded = String::with_capacity(trimmed.len() + 8);
    let mut rest = trimmed;

    while let Some(open) = rest.find('{') {
        expanded.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            // Unbalanced brace: keep the remainder, camelize strips the brace.
            expanded.push_str(after);
            rest = "";
            break;
        };
        expanded.push_str("By");
        expanded.push_str(&capitalize_first(&camelize(&after[..close])));
        rest = &after[close + 1..];
    }
    expanded.push_str(rest);

    let identifier = camelize(&expanded);
    if identifier.is_empty() {
        ROOT_IDENTIFIER.to_string()
    } else {
        identifier
    }
}

/// Apply a module prefix to a raw camel name (`crm` + `users` = `crmUsers`).
pub fn qualify(prefix: &str, raw: &str) -> String {
    if prefix.is_empty() {
        raw.to_string()
    } else {
        format!("{prefix}{}", capitalize_first(raw))
    }
}

/// Type-name stem for an endpoint: `I` + method + capitalized camel name.
pub fn endpoint_type_name(method: &str, camel_name: &str) -> String {
    format!("I{method}{}", capitalize_first(camel_name))
}

/// Request function name: method + capitalized camel name.
pub fn function_name(method: &str, camel_name: &str) -> String {
    format!("{method}{}", capitalize_first(camel_name))
}

/// Hook name wrapping a request function.
pub fn hook_name(function_name: &str) -> String {
    format!("use{}", capitalize_first(function_name))
}

/// Sanitize an identifier to be a valid TypeScript identifier.
/// - Replaces `-`, `.`, ` ` with separators and converts to camelCase
/// - Drops any other character that cannot appear in an identifier
/// - Prepends `_` if starts with digit
/// - Escapes reserved words with `_` prefix
pub fn sanitize_ts_identifier(name: &str) -> String {
    let mut result = String::new();
    for (i, part) in name.split(['-', '.', ' ']).enumerate() {
        let part: String = part
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
            .collect();
        if part.is_empty() {
            continue;
        }
        if i == 0 || result.is_empty() {
            result.push_str(&part);
        } else {
            result.push_str(&capitalize_first(&part));
        }
    }

    if result.is_empty() {
        return "_empty".to_string();
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result = format!("_{result}");
    }

    if TS_RESERVED_WORDS.contains(result.as_str()) {
        result = format!("_{result}");
    }

    result
}

/// PascalCase type symbol for a reusable component schema
/// (`app.models.User` becomes `AppModelsUser`).
pub fn pascal_identifier(name: &str) -> String {
    let mut result: String = name
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|part| !part.is_empty())
        .map(capitalize_first)
        .collect();

    if result.is_empty() {
        return "Schema".to_string();
    }
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_identifier_examples() {
        assert_eq!(path_to_identifier("/users/{id}"), "usersById");
        assert_eq!(path_to_identifier("/users/{id}/posts"), "usersByIdPosts");
        assert_eq!(path_to_identifier("/v1/auth-tokens"), "v1AuthTokens");
        assert_eq!(path_to_identifier("/users"), "users");
    }

    #[test]
    fn test_path_to_identifier_placeholder_casing() {
        assert_eq!(
            path_to_identifier("/orgs/{org_id}/members/{member-id}"),
            "orgsByOrgidMembersByMemberId"
        );
        assert_eq!(path_to_identifier("/items/{itemId}"), "itemsByItemId");
    }

    #[test]
    fn test_path_to_identifier_strips_punctuation() {
        assert_eq!(path_to_identifier("/v1.0/user_profile"), "v10Userprofile");
        assert_eq!(path_to_identifier("/files//raw"), "filesRaw");
        assert_eq!(path_to_identifier("/health/"), "health");
    }

    #[test]
    fn test_path_to_identifier_root_path() {
        assert_eq!(path_to_identifier("/"), "root");
        assert_eq!(path_to_identifier(""), "root");
    }

    #[test]
    fn test_path_to_identifier_is_alphanumeric_and_stable() {
        for path in [
            "/users/{id}",
            "/v1/auth-tokens",
            "/a/{b}/c-d/{e.f}/g_h",
            "/weird/{unclosed",
            "/ünïcode/path",
        ] {
            let first = path_to_identifier(path);
            assert!(
                first.chars().all(|c| c.is_ascii_alphanumeric()),
                "{path} -> {first}"
            );
            assert_eq!(first, path_to_identifier(path));
            assert_eq!(camelize(&first), first);
        }
    }

    #[test]
    fn test_qualify_applies_prefix() {
        assert_eq!(qualify("", "users"), "users");
        assert_eq!(qualify("crm", "users"), "crmUsers");
        assert_eq!(qualify("auth", "usersById"), "authUsersById");
    }

    #[test]
    fn test_endpoint_symbol_names() {
        assert_eq!(endpoint_type_name("get", "users"), "IgetUsers");
        assert_eq!(
            endpoint_type_name("post", "usersByIdComments"),
            "IpostUsersByIdComments"
        );
        assert_eq!(function_name("get", "crmUsers"), "getCrmUsers");
        assert_eq!(hook_name("getUsers"), "useGetUsers");
    }

    #[test]
    fn test_needs_bracket_notation() {
        assert!(!needs_bracket_notation("foo"));
        assert!(!needs_bracket_notation("_foo"));
        assert!(!needs_bracket_notation("$foo"));
        assert!(!needs_bracket_notation("foo123"));

        assert!(needs_bracket_notation(""));
        assert!(needs_bracket_notation("123foo"));
        assert!(needs_bracket_notation("foo-bar"));
        assert!(needs_bracket_notation("foo.bar"));
        assert!(needs_bracket_notation("foo bar"));
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("foo"), "foo");
        assert_eq!(quote_if_needed("foo-bar"), "\"foo-bar\"");
        assert_eq!(quote_if_needed("say\"hi"), "\"say\\\"hi\"");
    }

    #[test]
    fn test_sanitize_ts_identifier() {
        assert_eq!(sanitize_ts_identifier("foo"), "foo");
        assert_eq!(sanitize_ts_identifier("foo-bar"), "fooBar");
        assert_eq!(sanitize_ts_identifier("foo.bar"), "fooBar");
        assert_eq!(sanitize_ts_identifier("ids[]"), "ids");
        assert_eq!(sanitize_ts_identifier("123foo"), "_123foo");
        assert_eq!(sanitize_ts_identifier("delete"), "_delete");
        assert_eq!(sanitize_ts_identifier("---"), "_empty");
    }

    #[test]
    fn test_pascal_identifier() {
        assert_eq!(pascal_identifier("Node"), "Node");
        assert_eq!(pascal_identifier("app.models.User"), "AppModelsUser");
        assert_eq!(pascal_identifier("tree-node"), "TreeNode");
        assert_eq!(pascal_identifier("3dModel"), "_3dModel");
        assert_eq!(pascal_identifier("..."), "Schema");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("foo"), "Foo");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("ABC"), "ABC");
    }
}
