//! Environment variable validation with helpful warnings
//!
//! Invalid values never abort a run: the validator prints a warning
//! (with a typo suggestion when the value is close to a valid one) and
//! falls back to the default.

use std::io::Write;

/// What a variable accepts, used for the warning's hint line
#[derive(Debug, Clone, Copy)]
pub enum Accepts<'a> {
    /// One of a fixed set of keywords
    OneOf(&'a [&'a str]),
    /// Free-form value described in words
    Described(&'a str),
}

/// Validator for one environment variable
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    accepts: Accepts<'a>,
}

impl<'a> EnvVarValidator<'a> {
    pub fn one_of(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            accepts: Accepts::OneOf(valid_values),
        }
    }

    pub fn described(var_name: &'a str, description: &'a str) -> Self {
        Self {
            var_name,
            accepts: Accepts::Described(description),
        }
    }

    /// Parse a value, returning `default` if invalid (warning to `writer`)
    pub fn parse_with_writer<T, F, W>(&self, value: &str, parser: F, default: T, writer: &mut W) -> T
    where
        F: Fn(&str) -> Option<T>,
        W: Write,
    {
        if let Some(parsed) = parser(value.trim()) {
            return parsed;
        }

        tracing::debug!(var = self.var_name, value, "ignoring invalid environment value");
        let _ = writeln!(
            writer,
            "Warning: Invalid {} value '{}'{}",
            self.var_name,
            value,
            self.suggest(value)
        );
        let _ = match self.accepts {
            Accepts::OneOf(values) => writeln!(writer, "Valid values: {}", values.join(", ")),
            Accepts::Described(what) => writeln!(writer, "Expected {}", what),
        };
        default
    }

    fn suggest(&self, value: &str) -> String {
        let Accepts::OneOf(values) = self.accepts else {
            return String::new();
        };

        let input = value.trim().to_lowercase();
        let best = values
            .iter()
            .map(|valid| (*valid, levenshtein(&input, valid)))
            .min_by_key(|(_, dist)| *dist);

        match best {
            Some((suggested, dist)) if dist > 0 && dist <= 2 => {
                format!(". Did you mean '{}'?", suggested)
            }
            _ => String::new(),
        }
    }
}

/// Levenshtein edit distance over bytes
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row = vec![0; b.len() + 1];

    for (i, a_byte) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_byte) in b.iter().enumerate() {
            let cost = usize::from(a_byte != b_byte);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("staged", "staged"), 0);
        assert_eq!(levenshtein("stagd", "staged"), 1);
        assert_eq!(levenshtein("drect", "direct"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn test_valid_keyword_parses() {
        let validator = EnvVarValidator::one_of("DISTFIX_MERGE", &["direct", "staged"]);
        let mut output = Vec::new();
        let result =
            validator.parse_with_writer(" staged ", |s| (s == "staged").then_some(2), 0, &mut output);
        assert_eq!(result, 2);
        assert!(output.is_empty());
    }

    #[test]
    fn test_invalid_keyword_warns_with_suggestion() {
        let validator = EnvVarValidator::one_of("DISTFIX_MERGE", &["direct", "staged"]);
        let mut output = Vec::new();
        let result = validator.parse_with_writer("stagd", |_| None::<u8>, 7, &mut output);

        assert_eq!(result, 7, "should fall back to default");
        let msg = String::from_utf8(output).unwrap();
        assert!(msg.contains("Warning: Invalid DISTFIX_MERGE value 'stagd'"), "{}", msg);
        assert!(msg.contains("Did you mean 'staged'?"), "{}", msg);
        assert!(msg.contains("Valid values: direct, staged"), "{}", msg);
    }

    #[test]
    fn test_distant_value_gets_no_suggestion() {
        let validator = EnvVarValidator::one_of("DISTFIX_MERGE", &["direct", "staged"]);
        let mut output = Vec::new();
        validator.parse_with_writer("transactional", |_| None::<u8>, 0, &mut output);

        let msg = String::from_utf8(output).unwrap();
        assert!(!msg.contains("Did you mean"), "{}", msg);
    }

    #[test]
    fn test_described_value_shows_expectation() {
        let validator =
            EnvVarValidator::described("DISTFIX_BUILD_TIMEOUT", "a positive number of seconds");
        let mut output = Vec::new();
        let result = validator.parse_with_writer("soon", |s| s.parse::<u64>().ok(), 180, &mut output);

        assert_eq!(result, 180);
        let msg = String::from_utf8(output).unwrap();
        assert!(msg.contains("Expected a positive number of seconds"), "{}", msg);
    }
}
