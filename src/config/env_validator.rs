//! Environment variable validation with helpful warnings
//!
//! An invalid value never aborts: the caller gets the fallback plus a
//! warning line (with a Levenshtein-based typo suggestion) to report
//! through the event sink.

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

/// Parsed value and the warning raised while parsing, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T> {
    pub value: T,
    pub warning: Option<String>,
}

impl<'a> EnvVarValidator<'a> {
    /// Create a new validator for the given environment variable
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse a value, falling back to `default` with a warning if invalid
    ///
    /// # Arguments
    /// * `value` - The raw string value from the environment
    /// * `parser` - A function that attempts to parse the value
    /// * `default` - The value to use if parsing fails
    pub fn parse<T, F>(&self, value: &str, parser: F, default: T) -> Validated<T>
    where
        F: Fn(&str) -> Option<T>,
    {
        match parser(value) {
            Some(parsed) => Validated {
                value: parsed,
                warning: None,
            },
            None => Validated {
                value: default,
                warning: Some(format!(
                    "Invalid {} value '{}'{}. Valid values: {}",
                    self.var_name,
                    value,
                    self.suggest(value),
                    self.valid_values.join(", ")
                )),
            },
        }
    }

    /// Suggest a valid value based on Levenshtein distance
    fn suggest(&self, value: &str) -> String {
        let input = value.to_lowercase();
        let mut best: Option<(&str, usize)> = None;

        for &valid in self.valid_values {
            let dist = levenshtein(&input, valid);
            match best {
                None => best = Some((valid, dist)),
                Some((_, best_dist)) if dist < best_dist => best = Some((valid, dist)),
                _ => {}
            }
        }

        // Only suggest if distance is reasonable (≤ 2 edits)
        match best {
            Some((suggested, dist)) if dist <= 2 && dist > 0 => {
                format!(" (did you mean '{}'?)", suggested)
            }
            _ => String::new(),
        }
    }
}

/// Simple Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let a_len = a_bytes.len();
    let b_len = b_bytes.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}
