use std::fmt;

/// Classification of one non-blank line of a geometry file
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token<'a> {
    /// `begin_<tag> label`
    Begin { tag: &'a str, label: &'a str },
    /// `end_<tag>`
    End { tag: &'a str },
    /// `key values...`
    Field { key: &'a str, values: &'a str },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Line<'a> {
    /// 1-based line number in the source text
    pub(crate) number: usize,
    pub(crate) token: Token<'a>,
}

pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.lines().enumerate().filter_map(|(n, raw)| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Line {
                number: n + 1,
                token: classify(trimmed),
            })
        }
    })
}

fn classify(line: &str) -> Token<'_> {
    if let Some((tag, label)) = line
        .strip_prefix("begin_<")
        .and_then(|rest| rest.split_once('>'))
    {
        return Token::Begin {
            tag,
            label: label.trim(),
        };
    }

    if let Some((tag, _)) = line
        .strip_prefix("end_<")
        .and_then(|rest| rest.split_once('>'))
    {
        return Token::End { tag };
    }

    match line.split_once(char::is_whitespace) {
        Some((key, values)) => Token::Field {
            key,
            values: values.trim(),
        },
        None => Token::Field {
            key: line,
            values: "",
        },
    }
}

/// Owned description of a line for error messages
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSummary {
    line: usize,
    description: String,
}

impl TokenSummary {
    pub(crate) fn new(line: &Line<'_>) -> Self {
        let description = match line.token {
            Token::Begin { tag, .. } => format!("`begin_<{tag}>`"),
            Token::End { tag } => format!("`end_<{tag}>`"),
            Token::Field { key, .. } => format!("field `{key}`"),
        };

        Self {
            line: line.number,
            description,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

impl fmt::Display for TokenSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on line {}", self.description, self.line)
    }
}
