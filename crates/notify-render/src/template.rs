//! Output pattern with a fixed set of `{name}` placeholders.

use std::str::FromStr;

/// Fields a pattern may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Timetag,
    AppName,
    Summary,
    Body,
    Urgency,
    RestTime,
    SenderPid,
    AppIcon,
    ReplacesId,
    Actions,
    ExpireTimeout,
}

impl Placeholder {
    pub const ALL: [Placeholder; 11] = [
        Self::Timetag,
        Self::AppName,
        Self::Summary,
        Self::Body,
        Self::Urgency,
        Self::RestTime,
        Self::SenderPid,
        Self::AppIcon,
        Self::ReplacesId,
        Self::Actions,
        Self::ExpireTimeout,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Timetag => "timetag",
            Self::AppName => "app_name",
            Self::Summary => "summary",
            Self::Body => "body",
            Self::Urgency => "urgency",
            Self::RestTime => "rest_time",
            Self::SenderPid => "sender_pid",
            Self::AppIcon => "app_icon",
            Self::ReplacesId => "replaces_id",
            Self::Actions => "actions",
            Self::ExpireTimeout => "expire_timeout",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),

    #[error("unclosed '{{' at offset {0}")]
    Unclosed(usize),

    #[error("unmatched '}}' at offset {0}")]
    UnmatchedClose(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// A parsed pattern. `{{` and `}}` stand for literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(pattern: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.peek().is_some_and(|&(_, n)| n == '{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, ch)) => name.push(ch),
                            None => return Err(TemplateError::Unclosed(offset)),
                        }
                    }
                    let field = Placeholder::from_name(name.trim())
                        .ok_or(TemplateError::UnknownPlaceholder(name))?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' if chars.peek().is_some_and(|&(_, n)| n == '}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::UnmatchedClose(offset)),
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Placeholders referenced, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(p) => Some(*p),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute each placeholder with the value produced by `value`.
    pub fn render<F>(&self, mut value: F) -> String
    where
        F: FnMut(Placeholder) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(p) => out.push_str(&value(*p)),
            }
        }
        out
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
