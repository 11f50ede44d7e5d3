//! `@agent` mention detection in free-form comment text.

use regex::Regex;

use crate::IntakeError;

/// A compiled `@<agent_name>` pattern, built once per agent and reused for
/// every comment body.
///
/// Matching is case-insensitive. The character before the `@` and the
/// character after the name must each be a non-word character or a string
/// boundary, so `@francois` does not match `francis` and neither does a bare
/// `francis`. The name is matched literally.
#[derive(Debug, Clone)]
pub struct MentionMatcher {
    pattern: Regex,
}

impl MentionMatcher {
    /// Compiles the matcher for `agent_name` (surrounding whitespace ignored).
    ///
    /// # Errors
    ///
    /// [`IntakeError::ConfigurationError`] if the name is blank, or too long
    /// to compile within the regex size limit.
    pub fn new(agent_name: &str) -> Result<Self, IntakeError> {
        let name = agent_name.trim().to_lowercase();
        if name.is_empty() {
            return Err(IntakeError::ConfigurationError {
                message: "agent name must not be blank".to_string(),
            });
        }

        let pattern = format!(r"(?i)(?:^|\W)@{}(?:\W|$)", regex::escape(&name));
        let pattern = Regex::new(&pattern).map_err(|err| IntakeError::ConfigurationError {
            message: format!("agent name cannot be used as a mention pattern: {err}"),
        })?;

        Ok(Self { pattern })
    }

    /// Returns `true` if `body` mentions the agent. A blank body never does.
    pub fn is_match(&self, body: &str) -> bool {
        !body.trim().is_empty() && self.pattern.is_match(&body.to_lowercase())
    }
}

/// Returns `true` if `body` contains `@<agent_name>` as a whole token.
///
/// One-off form of [`MentionMatcher::is_match`]. Blank inputs never match.
pub fn contains_mention(body: &str, agent_name: &str) -> bool {
    MentionMatcher::new(agent_name).is_ok_and(|matcher| matcher.is_match(body))
}

#[cfg(test)]
#[path = "mention_tests.rs"]
mod tests;
