use std::fmt;

/// Keys accepted in each section, in their kebab-case spelling
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    ("render", &["theme", "show-code-language"]),
    ("quiz", &["submit-on-leave"]),
    ("session", &["storage-path"]),
];

/// A non-fatal problem found in a config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationWarning {
    pub message: String,
    pub section: Option<String>,
    pub key: Option<String>,
}

impl fmt::Display for ConfigValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Keys match case-sensitively, in kebab-case or the snake_case alias.
fn is_known_key(key: &str, keys: &[&str]) -> bool {
    keys.iter().any(|known| *known == key || known.replace('-', "_") == key)
}

/// Report unknown sections and keys, with "did you mean" hints.
pub fn validate_config_toml(value: &toml::Value) -> Vec<ConfigValidationWarning> {
    let mut warnings = Vec::new();
    let Some(table) = value.as_table() else {
        return warnings;
    };
    let section_names: Vec<String> = KNOWN_KEYS.iter().map(|(name, _)| name.to_string()).collect();

    for (section, content) in table {
        let Some((_, keys)) = KNOWN_KEYS.iter().find(|(name, _)| *name == section.as_str()) else {
            let mut message = format!("Unknown section [{section}]");
            if let Some(suggestion) = suggest_similar_key(section, &section_names) {
                message.push_str(&format!(" (did you mean [{suggestion}]?)"));
            }
            warnings.push(ConfigValidationWarning {
                message,
                section: Some(section.clone()),
                key: None,
            });
            continue;
        };

        let Some(entries) = content.as_table() else {
            warnings.push(ConfigValidationWarning {
                message: format!("[{section}] should be a table"),
                section: Some(section.clone()),
                key: None,
            });
            continue;
        };

        let valid: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        for key in entries.keys() {
            if is_known_key(key, keys) {
                continue;
            }
            let mut message = format!("Unknown key '{key}' in [{section}]");
            if let Some(suggestion) = suggest_similar_key(&key.replace('_', "-"), &valid) {
                message.push_str(&format!(" (did you mean '{suggestion}'?)"));
            }
            warnings.push(ConfigValidationWarning {
                message,
                section: Some(section.clone()),
                key: Some(key.clone()),
            });
        }
    }

    warnings
}

fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        for j in 1..=len2 {
            let cost = usize::from(s1_chars[i - 1] != s2_chars[j - 1]);
            curr_row[j] = (prev_row[j] + 1).min(curr_row[j - 1] + 1).min(prev_row[j - 1] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Closest valid key within a small edit distance, if any.
pub fn suggest_similar_key(unknown: &str, valid_keys: &[String]) -> Option<String> {
    let unknown_lower = unknown.to_lowercase();
    let max_distance = 2.max(unknown.len() / 3);

    valid_keys
        .iter()
        .map(|valid| (valid, levenshtein_distance(&unknown_lower, &valid.to_lowercase())))
        .filter(|(_, distance)| *distance <= max_distance)
        .min_by_key(|(_, distance)| *distance)
        .map(|(key, _)| key.clone())
}
