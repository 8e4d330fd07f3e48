//! Grammar checkers: a local rule-based checker and a LanguageTool HTTP client.

use std::time::Duration;

use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;

/// One flagged issue; offsets are byte positions in the checked text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub rule_id: String,
    pub message: String,
    pub offset: usize,
    pub length: usize,
}

pub trait GrammarChecker: Send + Sync {
    fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, AnalyzerError>;
}

/* ----------------------------
Local rules
---------------------------- */

static SENTENCE_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[.!?]\s+)(\p{Ll})").expect("sentence start regex"));
static LOWER_I_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bi\b").expect("pronoun regex"));
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word regex"));
static SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("spaces regex"));

/// Cheap, deterministic rules in the spirit of LanguageTool's most common hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleGrammarChecker;

impl RuleGrammarChecker {
    fn issue(rule_id: &str, message: &str, offset: usize, length: usize) -> GrammarIssue {
        GrammarIssue {
            rule_id: rule_id.to_string(),
            message: message.to_string(),
            offset,
            length,
        }
    }
}

impl GrammarChecker for RuleGrammarChecker {
    fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, AnalyzerError> {
        let mut issues = Vec::new();

        for caps in SENTENCE_START_RE.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                issues.push(Self::issue(
                    "UPPERCASE_SENTENCE_START",
                    "This sentence does not start with an uppercase letter.",
                    m.start(),
                    m.len(),
                ));
            }
        }

        for m in LOWER_I_RE.find_iter(text) {
            issues.push(Self::issue(
                "I_LOWERCASE",
                "The personal pronoun \"I\" should be uppercase.",
                m.start(),
                m.len(),
            ));
        }

        // Pairs of adjacent words separated only by whitespace.
        let words: Vec<_> = WORD_RE.find_iter(text).collect();
        for pair in words.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let gap = &text[prev.end()..next.start()];
            if gap.is_empty() || !gap.chars().all(char::is_whitespace) {
                continue;
            }
            let (p, n) = (prev.as_str().to_lowercase(), next.as_str().to_lowercase());

            if p == n && n.chars().all(char::is_alphabetic) {
                issues.push(Self::issue(
                    "WORD_REPEAT",
                    "Possible typo: you repeated a word.",
                    prev.start(),
                    next.end() - prev.start(),
                ));
                continue;
            }

            let first = n.chars().next().unwrap_or(' ');
            // "a unique", "a university": 'u' is left alone.
            if p == "a" && matches!(first, 'a' | 'e' | 'i' | 'o') {
                issues.push(Self::issue(
                    "EN_A_VS_AN",
                    "Use \"an\" instead of \"a\" before a vowel sound.",
                    prev.start(),
                    prev.len(),
                ));
            } else if p == "an"
                && first.is_alphabetic()
                && !matches!(first, 'a' | 'e' | 'i' | 'o' | 'u' | 'h')
            {
                issues.push(Self::issue(
                    "EN_A_VS_AN",
                    "Use \"a\" instead of \"an\" before a consonant sound.",
                    prev.start(),
                    prev.len(),
                ));
            }
        }

        for m in SPACES_RE.find_iter(text) {
            issues.push(Self::issue(
                "WHITESPACE_RULE",
                "Possible typo: you repeated a whitespace.",
                m.start(),
                m.len(),
            ));
        }

        let trimmed = text.trim_end();
        if let Some(last) = trimmed.chars().last() {
            if !matches!(last, '.' | '!' | '?' | '"' | '\'' | ')') {
                issues.push(Self::issue(
                    "PUNCTUATION_PARAGRAPH_END",
                    "Add punctuation at the end of the text.",
                    trimmed.len() - last.len_utf8(),
                    last.len_utf8(),
                ));
            }
        }

        issues.sort_by_key(|i| i.offset);
        Ok(issues)
    }
}

/* ----------------------------
LanguageTool HTTP
---------------------------- */

/// Client for a LanguageTool server (`POST /v2/check`).
///
/// The HTTP client is built on first use so construction never blocks an async context.
/// Every request is bounded by `timeout`; any failure surfaces as `AnalyzerError`, which the
/// surrounding [`Analyzer`](super::Analyzer) turns into a permanent fallback.
pub struct LanguageToolChecker {
    endpoint: String,
    language: String,
    timeout: Duration,
    client: OnceCell<reqwest::blocking::Client>,
}

impl LanguageToolChecker {
    pub fn new(base_url: &str, language: &str, timeout: Duration) -> Self {
        Self {
            endpoint: format!("{}/v2/check", base_url.trim_end_matches('/')),
            language: language.to_string(),
            timeout,
            client: OnceCell::new(),
        }
    }

    fn client(&self) -> Result<&reqwest::blocking::Client, AnalyzerError> {
        self.client.get_or_try_init(|| {
            reqwest::blocking::Client::builder()
                .user_agent("rubric-scorer/0.1")
                .connect_timeout(self.timeout)
                .timeout(self.timeout)
                .build()
                .map_err(|e| AnalyzerError::transport("building LanguageTool client", e))
        })
    }
}

#[derive(Deserialize)]
struct LtResponse {
    #[serde(default)]
    matches: Vec<LtMatch>,
}

#[derive(Deserialize)]
struct LtMatch {
    #[serde(default)]
    message: String,
    offset: usize,
    length: usize,
    rule: LtRule,
}

#[derive(Deserialize)]
struct LtRule {
    id: String,
}

impl GrammarChecker for LanguageToolChecker {
    fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, AnalyzerError> {
        let resp = self
            .client()?
            .post(&self.endpoint)
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()
            .map_err(|e| AnalyzerError::transport("calling LanguageTool", e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AnalyzerError::Status {
                context: "calling LanguageTool",
                status: status.as_u16(),
            });
        }

        let body: LtResponse = resp
            .json()
            .map_err(|e| AnalyzerError::malformed("decoding LanguageTool response", e))?;

        Ok(body
            .matches
            .into_iter()
            .map(|m| GrammarIssue {
                rule_id: m.rule.id,
                message: m.message,
                offset: m.offset,
                length: m.length,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_ids(text: &str) -> Vec<String> {
        RuleGrammarChecker
            .check(text)
            .unwrap()
            .into_iter()
            .map(|i| i.rule_id)
            .collect()
    }

    #[test]
    fn clean_text_has_no_issues() {
        let ids = rule_ids("Hello everyone. My name is Asha and I am 10 years old. Thank you!");
        assert!(ids.is_empty(), "{ids:?}");
    }

    #[test]
    fn lowercase_start_and_pronoun() {
        let ids = rule_ids("hello. i like a apple.");
        assert_eq!(
            ids,
            vec![
                "UPPERCASE_SENTENCE_START",
                "UPPERCASE_SENTENCE_START",
                "I_LOWERCASE",
                "EN_A_VS_AN"
            ]
        );
    }

    #[test]
    fn repeated_word_and_missing_period() {
        let ids = rule_ids("My my name is Ravi");
        assert!(ids.contains(&"WORD_REPEAT".to_string()));
        assert!(ids.contains(&"PUNCTUATION_PARAGRAPH_END".to_string()));
    }

    #[test]
    fn a_unique_fact_is_fine() {
        let ids = rule_ids("I have a unique fact and an hour to share it.");
        assert!(ids.is_empty(), "{ids:?}");
    }

    #[test]
    fn an_before_consonant_is_flagged() {
        let ids = rule_ids("She is an teacher.");
        assert_eq!(ids, vec!["EN_A_VS_AN"]);
    }

    #[test]
    fn double_space_is_flagged() {
        let ids = rule_ids("My name  is Asha.");
        assert_eq!(ids, vec!["WHITESPACE_RULE"]);
    }

    #[test]
    fn unreachable_languagetool_is_an_error() {
        let lt = LanguageToolChecker::new("http://127.0.0.1:9/", "en-US", Duration::from_millis(200));
        assert_eq!(lt.endpoint, "http://127.0.0.1:9/v2/check");
        assert!(lt.check("Hello there.").is_err());
    }
}
