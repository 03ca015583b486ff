//! Unknown-name detection with "did you mean?" suggestions.
//!
//! Used for config keys (checked against the raw TOML tree before serde
//! sees it) and for CSV headers / JSON keys that match no known field.
//! Unknown names are only ever warned about.

/// Dotted key paths `ImportConfig` understands, tables included.
pub const KNOWN_CONFIG_KEYS: &[&str] = &[
    "batch",
    "batch.max_rows",
    "output",
    "output.directory",
    "output.file_prefix",
    "output.file_suffix",
    "output.sequence_width",
    "sql",
    "sql.table",
];

/// Largest edit distance still offered as a suggestion
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// A config key no section defines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey {
    pub key: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}'", self.key)?;
        if let Some(s) = &self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

/// Unknown keys in `raw_toml`, nested keys listed before their table.
///
/// Text that is not valid TOML yields nothing; the serde pass reports it.
pub fn unknown_config_keys(raw_toml: &str) -> Vec<UnknownKey> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let mut paths = Vec::new();
    collect_key_paths(&value, "", &mut paths);

    paths
        .into_iter()
        .filter(|path| !KNOWN_CONFIG_KEYS.contains(&path.as_str()))
        .map(|key| UnknownKey {
            suggestion: suggest_correction(&key, KNOWN_CONFIG_KEYS.iter().copied()),
            key,
        })
        .collect()
}

fn collect_key_paths(value: &toml::Value, prefix: &str, out: &mut Vec<String>) {
    let toml::Value::Table(table) = value else {
        return;
    };
    for (k, v) in table {
        let path = if prefix.is_empty() {
            k.clone()
        } else {
            format!("{prefix}.{k}")
        };
        collect_key_paths(v, &path, out);
        out.push(path);
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Closest known name to `unknown`, if any is within a few edits.
///
/// Ties go to the alphabetically first candidate so suggestions are stable.
pub fn suggest_correction<'a, I>(unknown: &str, known: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    known
        .into_iter()
        .map(|k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= MAX_SUGGESTION_DISTANCE)
        .min()
        .map(|(_, k)| k.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("hello", "hello"), 0);
        assert_eq!(levenshtein("max_row", "max_rows"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_typo_warns_with_suggestion() {
        let unknown = unknown_config_keys("[batch]\nmax_row = 10\n");
        assert_eq!(
            unknown,
            vec![UnknownKey {
                key: "batch.max_row".to_string(),
                suggestion: Some("batch.max_rows".to_string()),
            }]
        );
        assert_eq!(
            unknown[0].to_string(),
            "unknown config key 'batch.max_row' (did you mean 'batch.max_rows'?)"
        );
    }

    #[test]
    fn test_unknown_table_reports_table_and_children() {
        let unknown = unknown_config_keys("[outptu]\ndirectory = \"x\"\n");
        let keys: Vec<&str> = unknown.iter().map(|u| u.key.as_str()).collect();
        assert_eq!(keys, vec!["outptu.directory", "outptu"]);
        assert_eq!(unknown[1].suggestion.as_deref(), Some("output"));
    }

    #[test]
    fn test_valid_config_has_no_unknown_keys() {
        let unknown = unknown_config_keys(
            r#"
[batch]
max_rows = 500

[output]
directory = "out"
sequence_width = 3

[sql]
table = "wells"
"#,
        );
        assert!(unknown.is_empty(), "unexpected: {unknown:?}");
    }

    #[test]
    fn test_far_key_has_no_suggestion() {
        let unknown = unknown_config_keys("completely_unrelated = 1\n");
        assert_eq!(unknown.len(), 1);
        assert!(unknown[0].suggestion.is_none());
    }

    #[test]
    fn test_invalid_toml_yields_nothing() {
        assert!(unknown_config_keys("[batch\n").is_empty());
    }

    #[test]
    fn test_suggestion_tie_is_stable() {
        assert_eq!(
            suggest_correction("ab", ["ac", "aa"]).as_deref(),
            Some("aa")
        );
    }
}
