//! Date/time format pattern translation

use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};

/// One token substitution, applied in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatRule {
    pub token: String,
    pub replacement: String,
}

impl FormatRule {
    pub fn new(token: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            replacement: replacement.into(),
        }
    }
}

/// Substitution rules plus literal-text quoting for a dialect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateFormatRules {
    /// Earlier rules win when several tokens start at the same position, so
    /// longer tokens must come before their prefixes.
    #[serde(default)]
    pub rules: Vec<FormatRule>,
    /// Delimiter around literal text in the input pattern
    #[serde(default = "default_literal_quote")]
    pub literal_quote: char,
    /// Delimiter around literal text in the output; the input delimiter is
    /// kept when absent
    #[serde(default)]
    pub output_quote: Option<String>,
}

fn default_literal_quote() -> char {
    '\''
}

impl Default for DateFormatRules {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            literal_quote: default_literal_quote(),
            output_quote: None,
        }
    }
}

impl DateFormatRules {
    pub fn new(rules: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(token, replacement)| FormatRule::new(token, replacement))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_output_quote(mut self, quote: impl Into<String>) -> Self {
        self.output_quote = Some(quote.into());
        self
    }
}

/// Compiled form of [`DateFormatRules`].
///
/// All tokens are matched in a single left-to-right pass, so replacement
/// output is never rescanned by a later rule.
#[derive(Debug, Clone)]
pub struct DateFormatTranslator {
    rules: DateFormatRules,
    matcher: Option<AhoCorasick>,
    replacements: Vec<String>,
}

impl DateFormatTranslator {
    pub fn new(rules: DateFormatRules) -> Result<Self> {
        if let Some(rule) = rules.rules.iter().find(|r| r.token.is_empty()) {
            return Err(DialectError::InvalidFormatRules(format!(
                "empty token mapped to '{}'",
                rule.replacement
            )));
        }
        if let Some(rule) = rules
            .rules
            .iter()
            .find(|r| r.token.contains(rules.literal_quote))
        {
            return Err(DialectError::InvalidFormatRules(format!(
                "token '{}' contains the literal quote character",
                rule.token
            )));
        }

        let matcher = if rules.rules.is_empty() {
            None
        } else {
            let patterns = rules.rules.iter().map(|r| r.token.as_str());
            let matcher = AhoCorasick::builder()
                .match_kind(MatchKind::LeftmostFirst)
                .build(patterns)
                .map_err(|e| DialectError::InvalidFormatRules(e.to_string()))?;
            Some(matcher)
        };
        let replacements = rules.rules.iter().map(|r| r.replacement.clone()).collect();

        Ok(Self {
            rules,
            matcher,
            replacements,
        })
    }

    pub fn rules(&self) -> &DateFormatRules {
        &self.rules
    }

    /// Translate a pattern. Text between literal quotes is copied verbatim
    /// and re-delimited; a doubled quote outside literal text stands for
    /// the quote character itself. Tokens without a rule pass through.
    pub fn translate(&self, pattern: &str) -> String {
        let quote = self.rules.literal_quote;
        let mut out = String::with_capacity(pattern.len() + 8);
        let mut quoted = false;

        for chunk in pattern.split(quote) {
            if !quoted {
                out.push_str(&self.substitute(chunk));
            } else if chunk.is_empty() {
                out.push(quote);
            } else {
                match &self.rules.output_quote {
                    Some(delimiter) => {
                        out.push_str(delimiter);
                        out.push_str(chunk);
                        out.push_str(delimiter);
                    }
                    None => {
                        out.push(quote);
                        out.push_str(chunk);
                        out.push(quote);
                    }
                }
            }
            quoted = !quoted;
        }
        out
    }

    fn substitute(&self, chunk: &str) -> String {
        match &self.matcher {
            Some(matcher) => matcher.replace_all(chunk, &self.replacements),
            None => chunk.to_string(),
        }
    }
}
