//! Template value types with `{name}` placeholder substitution.

use std::collections::HashMap;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Maximum number of characters shown before the preview is truncated.
const PREVIEW_LEN: usize = 50;

/// Errors that can occur while parsing or rendering a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A placeholder referenced by the template was not supplied.
    #[error("missing template variable: {name}")]
    MissingVariable {
        /// Name of the missing placeholder.
        name: String,
    },

    /// The template text is not well formed.
    #[error("malformed template: {reason}")]
    Malformed {
        /// Reason the template could not be parsed.
        reason: String,
    },
}

/// Parses a template into the placeholder names it references, without
/// rendering. Duplicates are dropped; first-occurrence order is kept.
///
/// Placeholders use single-brace `{name}` syntax. `{{` and `}}` are
/// escapes for literal braces and reference nothing.
///
/// # Errors
///
/// Returns [`TemplateError::Malformed`] on unbalanced braces or an empty
/// placeholder name.
pub fn variable_names(source: &str) -> TemplateResult<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
            }
            '{' => {
                let name = take_placeholder_name(&mut chars)?;
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            '}' => return Err(unmatched_close()),
            _ => {}
        }
    }

    Ok(names)
}

/// A prompt template sent as the primary input of a model invocation.
///
/// Templates are values: [`Prompt::render`] produces a new `Prompt` whose
/// source is the substituted text and leaves the original untouched. Two
/// prompts are equal iff their source strings are equal.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prompt {
    source: String,
}

impl Prompt {
    /// Creates a prompt template from the supplied text.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the literal, unrendered template text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the placeholder names this template references.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Malformed`] if the template text cannot be
    /// parsed.
    pub fn variable_names(&self) -> TemplateResult<Vec<String>> {
        variable_names(&self.source)
    }

    /// Renders the template against the supplied variables.
    ///
    /// Variables the template does not reference are silently ignored, so
    /// callers may pass a superset of the available context.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingVariable`] when a referenced
    /// placeholder has no entry in `variables`, and
    /// [`TemplateError::Malformed`] when the template text cannot be
    /// parsed.
    pub fn render(&self, variables: &HashMap<String, String>) -> TemplateResult<Self> {
        render_source(&self.source, variables).map(Self::new)
    }
}

impl fmt::Debug for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prompt({})", preview(&self.source))
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&preview(&self.source))
    }
}

/// An instructions template sent as secondary input of a model invocation.
///
/// Different models consume instructions differently; chat models usually
/// receive them as the system message. Rendering and equality behave
/// exactly as for [`Prompt`], and a `Prompt` never equals an
/// `Instructions`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instructions {
    source: String,
}

impl Instructions {
    /// Creates an instructions template from the supplied text.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the literal, unrendered template text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the placeholder names this template references.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Malformed`] if the template text cannot be
    /// parsed.
    pub fn variable_names(&self) -> TemplateResult<Vec<String>> {
        variable_names(&self.source)
    }

    /// Renders the template against the supplied variables, ignoring any
    /// the template does not reference.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingVariable`] when a referenced
    /// placeholder has no entry in `variables`, and
    /// [`TemplateError::Malformed`] when the template text cannot be
    /// parsed.
    pub fn render(&self, variables: &HashMap<String, String>) -> TemplateResult<Self> {
        render_source(&self.source, variables).map(Self::new)
    }
}

impl fmt::Debug for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instructions({})", preview(&self.source))
    }
}

impl fmt::Display for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&preview(&self.source))
    }
}

fn render_source(source: &str, variables: &HashMap<String, String>) -> TemplateResult<String> {
    let referenced = variable_names(source)?;
    let filtered: HashMap<&str, &str> = variables
        .iter()
        .filter(|(name, _)| referenced.iter().any(|r| r == *name))
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    let ignored = variables.len() - filtered.len();
    if ignored > 0 {
        debug!(ignored, "ignoring variables not referenced by the template");
    }

    substitute(source, &filtered)
}

fn substitute(source: &str, variables: &HashMap<&str, &str>) -> TemplateResult<String> {
    let mut rendered = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                rendered.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                rendered.push('}');
            }
            '{' => {
                let name = take_placeholder_name(&mut chars)?;
                let value = variables
                    .get(name.as_str())
                    .ok_or_else(|| TemplateError::MissingVariable { name: name.clone() })?;
                rendered.push_str(value);
            }
            '}' => return Err(unmatched_close()),
            other => rendered.push(other),
        }
    }

    Ok(rendered)
}

fn take_placeholder_name(chars: &mut Peekable<Chars<'_>>) -> TemplateResult<String> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some('}') => break,
            Some('{') => {
                return Err(TemplateError::Malformed {
                    reason: "'{' inside placeholder".to_owned(),
                });
            }
            Some(ch) => name.push(ch),
            None => {
                return Err(TemplateError::Malformed {
                    reason: "unterminated placeholder".to_owned(),
                });
            }
        }
    }

    if name.is_empty() {
        return Err(TemplateError::Malformed {
            reason: "placeholder name must not be empty".to_owned(),
        });
    }

    Ok(name)
}

fn unmatched_close() -> TemplateError {
    TemplateError::Malformed {
        reason: "unmatched '}'".to_owned(),
    }
}

fn preview(source: &str) -> String {
    let mut out: String = source.chars().take(PREVIEW_LEN).collect();
    if source.chars().nth(PREVIEW_LEN).is_some() {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn renders_simple_template() {
        let prompt = Prompt::new("List {n} fruits");
        let rendered = prompt.render(&vars(&[("n", "3")])).unwrap();
        assert_eq!(rendered.source(), "List 3 fruits");
        // The original is a value and stays untouched.
        assert_eq!(prompt.source(), "List {n} fruits");
    }

    #[test]
    fn ignores_unreferenced_variables() {
        let prompt = Prompt::new("Hello {name}");
        let rendered = prompt
            .render(&vars(&[("name", "Ada"), ("extra", "ignored")]))
            .unwrap();
        assert_eq!(rendered.source(), "Hello Ada");
    }

    #[test]
    fn missing_variable_is_a_hard_error() {
        let prompt = Prompt::new("Hello {name}, meet {other}");
        let err = prompt
            .render(&vars(&[("name", "Ada")]))
            .expect_err("missing placeholder should fail");
        match err {
            TemplateError::MissingVariable { name } => assert_eq!(name, "other"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn extracts_variable_names_in_order() {
        let names = variable_names("{a} then {b}, {a} again").unwrap();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn numeric_placeholders_are_ordinary_names() {
        let prompt = Prompt::new("{0} and {1}");
        let rendered = prompt.render(&vars(&[("0", "zero"), ("1", "one")])).unwrap();
        assert_eq!(rendered.source(), "zero and one");
    }

    #[test]
    fn brace_escapes_render_literally() {
        assert_eq!(variable_names("{{not_a_var}}").unwrap(), Vec::<String>::new());

        let prompt = Prompt::new("schema: {{\"n\": {n}}}");
        let rendered = prompt.render(&vars(&[("n", "3")])).unwrap();
        assert_eq!(rendered.source(), "schema: {\"n\": 3}");
    }

    #[test]
    fn malformed_templates_fail() {
        assert!(matches!(
            variable_names("{}"),
            Err(TemplateError::Malformed { .. })
        ));
        assert!(matches!(
            variable_names("{open"),
            Err(TemplateError::Malformed { .. })
        ));
        assert!(matches!(
            variable_names("close}"),
            Err(TemplateError::Malformed { .. })
        ));
        assert!(matches!(
            variable_names("{a{b}}"),
            Err(TemplateError::Malformed { .. })
        ));
    }

    #[test]
    fn equality_follows_source_text() {
        assert_eq!(Prompt::new("same text"), Prompt::new("same text"));
        assert_ne!(Prompt::new("same text"), Prompt::new("same text!"));
        assert_eq!(Instructions::new("be terse"), Instructions::new("be terse"));
    }

    #[test]
    fn preview_truncates_past_fifty_chars() {
        let exactly_fifty = "x".repeat(50);
        let prompt = Prompt::new(exactly_fifty.clone());
        assert_eq!(format!("{prompt:?}"), format!("Prompt({exactly_fifty})"));
        assert_eq!(prompt.to_string(), exactly_fifty);

        let fifty_one = "x".repeat(51);
        let prompt = Prompt::new(fifty_one);
        assert_eq!(format!("{prompt:?}"), format!("Prompt({}...)", "x".repeat(50)));
        assert_eq!(prompt.to_string(), format!("{}...", "x".repeat(50)));

        let instructions = Instructions::new("y".repeat(60));
        assert_eq!(
            format!("{instructions:?}"),
            format!("Instructions({}...)", "y".repeat(50))
        );
    }

    #[test]
    fn rendering_keeps_the_template_type() {
        let instructions = Instructions::new("You answer in {language}");
        let rendered = instructions.render(&vars(&[("language", "French")])).unwrap();
        assert_eq!(rendered, Instructions::new("You answer in French"));
    }

    #[test]
    fn templates_serialize_as_their_source() {
        let prompt = Prompt::new("Hello {name}");
        let json = serde_json::to_string(&prompt).unwrap();
        assert_eq!(json, "\"Hello {name}\"");
        let back: Prompt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prompt);
    }
}
