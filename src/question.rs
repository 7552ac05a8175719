//! Question splitter: separate a raw question into its stem and options block.

use regex::Regex;
use std::sync::OnceLock;

/// A question as received, split once per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Question text without the enumerated options
    pub stem: String,
    /// Options block starting at the first `1.` line, if present
    pub options: Option<String>,
}

/// Line that opens the options block
fn first_option() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^1\.").expect("first option regex is valid"))
}

fn option_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^(\d+)\.").expect("option marker regex is valid"))
}

impl Question {
    /// Split `raw` at the first line that begins with `1.`.
    ///
    /// The stem is everything before that line (separating line break removed,
    /// `\r\n` included) and the options block is everything from that line on.
    /// Input with no such line, or with nothing before it, is a question
    /// without options.
    pub fn parse(raw: &str) -> Self {
        let split = first_option()
            .find_iter(raw)
            .map(|m| m.start())
            .find(|&start| start > 0);

        if let Some(start) = split {
            // `start` is a line start, so the byte before it is '\n'.
            let stem = raw[..start - 1].trim_end_matches('\r');
            if !stem.trim().is_empty() {
                return Self {
                    stem: stem.to_string(),
                    options: Some(raw[start..].to_string()),
                };
            }
        }

        Self {
            stem: raw.to_string(),
            options: None,
        }
    }

    pub fn has_options(&self) -> bool {
        self.options.is_some()
    }

    /// Option numbers in the order they appear, e.g. `["1", "2", "3", "4"]`.
    pub fn option_numbers(&self) -> Vec<String> {
        let Some(options) = &self.options else {
            return Vec::new();
        };
        option_marker()
            .captures_iter(options)
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
