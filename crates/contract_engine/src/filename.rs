use chrono::NaiveDate;

pub const DEFAULT_FILENAME_PREFIX: &str = "GlowLink_Contract";

const MAX_NAME_CHARS: usize = 80;

/// Output filename: `{prefix}_{client_name}_{YYYY-MM-DD}.pdf`, with whitespace
/// runs in the client name turned into `_` and path-unsafe characters removed.
pub fn contract_filename(prefix: &str, client_name: &str, issued_on: NaiveDate) -> String {
    let name = sanitize_client_name(client_name);
    let date = issued_on.format("%Y-%m-%d");
    if prefix.is_empty() {
        format!("{name}_{date}.pdf")
    } else {
        format!("{prefix}_{name}_{date}.pdf")
    }
}

fn sanitize_client_name(input: &str) -> String {
    let mut compacted = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let c = if c.is_whitespace() || is_forbidden(c) {
            '_'
        } else {
            c
        };
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }

    let truncated: String = compacted
        .trim_start_matches(&['_', '.'][..])
        .chars()
        .take(MAX_NAME_CHARS)
        .collect();
    let trimmed = truncated.trim_end_matches(&['_', '.'][..]);
    if trimmed.is_empty() {
        return "client".to_string();
    }
    trimmed.to_string()
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

#[cfg(test)]
mod tests {
    use super::sanitize_client_name;

    #[test]
    fn whitespace_runs_collapse_to_one_underscore() {
        assert_eq!(sanitize_client_name("Jane \t  Doe"), "Jane_Doe");
        assert_eq!(sanitize_client_name(" Jane Doe "), "Jane_Doe");
    }

    #[test]
    fn path_characters_are_replaced() {
        assert_eq!(sanitize_client_name("../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_client_name("A: B?"), "A_B");
    }

    #[test]
    fn empty_names_get_a_placeholder() {
        assert_eq!(sanitize_client_name("  "), "client");
        assert_eq!(sanitize_client_name("///"), "client");
    }

    #[test]
    fn long_names_are_truncated_on_char_boundaries() {
        let name = "é".repeat(200);
        let sanitized = sanitize_client_name(&name);
        assert_eq!(sanitized.chars().count(), 80);
    }

    #[test]
    fn truncation_never_leaves_a_trailing_separator() {
        let name = format!("{} {}", "a".repeat(79), "b".repeat(10));
        let sanitized = sanitize_client_name(&name);
        assert_eq!(sanitized, "a".repeat(79));
    }
}
