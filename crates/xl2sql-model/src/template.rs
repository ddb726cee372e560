//! Statement templates with named placeholders.
//!
//! Templates use the brace syntax `{name}` for a verbatim value and
//! `{name:.Nf}` for a number with `N` fixed decimal places. Literal braces are
//! written `{{` and `}}`.

use std::fmt;

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    Literal(String),
    Placeholder {
        name: String,
        /// Fixed decimal places for numeric values; `None` inserts the value as is.
        precision: Option<usize>,
    },
}

/// A parsed statement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<TemplateSegment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((position, ch)) = chars.next() {
            match ch {
                '{' => {
                    if chars.next_if(|&(_, next)| next == '{').is_some() {
                        literal.push('{');
                        continue;
                    }
                    let mut body = String::new();
                    let mut closed = false;
                    for (_, next) in chars.by_ref() {
                        if next == '}' {
                            closed = true;
                            break;
                        }
                        body.push(next);
                    }
                    if !closed {
                        return Err(malformed(source, position));
                    }
                    let placeholder = parse_placeholder(&body)
                        .map_err(|err| err.unwrap_or_else(|| malformed(source, position)))?;
                    if !literal.is_empty() {
                        segments.push(TemplateSegment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(placeholder);
                }
                '}' => {
                    if chars.next_if(|&(_, next)| next == '}').is_none() {
                        return Err(malformed(source, position));
                    }
                    literal.push('}');
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(TemplateSegment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    /// Placeholder names in order of appearance (repeats included).
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            TemplateSegment::Placeholder { name, .. } => Some(name.as_str()),
            TemplateSegment::Literal(_) => None,
        })
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn malformed(source: &str, position: usize) -> ModelError {
    ModelError::MalformedTemplate {
        template: source.to_string(),
        position,
    }
}

/// `Err(None)` signals a structural problem the caller reports with position.
fn parse_placeholder(body: &str) -> std::result::Result<TemplateSegment, Option<ModelError>> {
    let (name, spec) = match body.split_once(':') {
        Some((name, spec)) => (name.trim(), Some(spec.trim())),
        None => (body.trim(), None),
    };
    if name.is_empty() || name.contains('{') {
        return Err(None);
    }
    let precision = match spec {
        None | Some("") => None,
        Some(spec) => Some(parse_fixed_precision(spec).ok_or_else(|| {
            Some(ModelError::UnsupportedFormatSpec {
                placeholder: name.to_string(),
                spec: spec.to_string(),
            })
        })?),
    };
    Ok(TemplateSegment::Placeholder {
        name: name.to_string(),
        precision,
    })
}

fn parse_fixed_precision(spec: &str) -> Option<usize> {
    let digits = spec.strip_prefix('.')?.strip_suffix('f')?;
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
