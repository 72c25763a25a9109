use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::ExplorerError;

/// `$$` escapes a dollar, `$name` and `${name}` are placeholders, any other
/// `$` is invalid. The empty `invalid` alternative must stay last.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|(?P<named>[_A-Za-z][_A-Za-z0-9]*)|\{(?P<braced>[_A-Za-z][_A-Za-z0-9]*)\}|(?P<invalid>))",
    )
    .expect("placeholder pattern is valid")
});

static BRACED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^}]*\}").expect("braced token pattern is valid"));

enum Token<'t> {
    Escaped,
    Named(&'t str),
    Invalid,
}

impl<'t> Token<'t> {
    fn from_captures(caps: &Captures<'t>) -> Self {
        if caps.name("escaped").is_some() {
            Token::Escaped
        } else if let Some(name) = caps.name("named").or_else(|| caps.name("braced")) {
            Token::Named(name.as_str())
        } else {
            Token::Invalid
        }
    }
}

/// A text blob with named `$` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace every placeholder with its value.
    ///
    /// Fails on the first name missing from `values` and on any `$` that does
    /// not start a valid placeholder. Values are inserted verbatim and are not
    /// scanned again.
    pub fn substitute(&self, values: &HashMap<&str, &str>) -> Result<String, ExplorerError> {
        self.render(values, true)
    }

    /// Like [`Template::substitute`], but unknown and invalid placeholders
    /// are left in the output as written.
    pub fn safe_substitute(&self, values: &HashMap<&str, &str>) -> String {
        // Lenient rendering never produces an error.
        self.render(values, false).unwrap_or_else(|_| self.text.clone())
    }

    /// Names of all placeholders referenced by the text.
    pub fn placeholders(&self) -> BTreeSet<String> {
        PLACEHOLDER
            .captures_iter(&self.text)
            .filter_map(|caps| match Token::from_captures(&caps) {
                Token::Named(name) => Some(name.to_string()),
                _ => None,
            })
            .collect()
    }

    fn render(&self, values: &HashMap<&str, &str>, strict: bool) -> Result<String, ExplorerError> {
        let mut out = String::with_capacity(self.text.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(&self.text) {
            let whole = caps.get_match();
            out.push_str(&self.text[last..whole.start()]);
            last = whole.end();

            match Token::from_captures(&caps) {
                Token::Escaped => out.push('$'),
                Token::Named(name) => match values.get(name) {
                    Some(value) => out.push_str(value),
                    None if strict => {
                        return Err(ExplorerError::UnknownPlaceholder(name.to_string()))
                    }
                    None => out.push_str(whole.as_str()),
                },
                Token::Invalid if strict => {
                    let (line, column) = line_and_column(&self.text, whole.start());
                    return Err(ExplorerError::InvalidPlaceholder { line, column });
                }
                Token::Invalid => out.push_str(whole.as_str()),
            }
        }

        out.push_str(&self.text[last..]);
        Ok(out)
    }
}

/// `${...}` tokens still present in `text`, in order of appearance.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    BRACED_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// 1-based line and column of a byte offset.
fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
