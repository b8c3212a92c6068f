//! Node port URL formatting
//!
//! URL formats use Go-template style actions so existing format strings
//! keep working: `{{.IP}}`, `{{.Port}}` and `{{.Name}}` (the port name).

use std::fmt;
use std::str::FromStr;

/// Format used when none is configured
pub const DEFAULT_URL_TEMPLATE: &str = "http://{{.IP}}:{{.Port}}";

/// URL format parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlTemplateError {
    #[error("unclosed action starting at byte {0}")]
    Unclosed(usize),

    #[error("unknown field {{{{{0}}}}} (expected .IP, .Port or .Name)")]
    UnknownField(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Ip,
    Port,
    Name,
}

/// Values substituted into a URL format
#[derive(Debug, Clone, Copy)]
pub struct UrlParams<'a> {
    pub ip: &'a str,
    pub port: i32,
    pub name: &'a str,
}

/// A parsed URL format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    pub fn parse(source: &str) -> Result<Self, UrlTemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after_open = &rest[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or(UrlTemplateError::Unclosed(offset + start))?;

            let field = after_open[..end].trim();
            segments.push(match field {
                ".IP" => Segment::Ip,
                ".Port" => Segment::Port,
                ".Name" => Segment::Name,
                other => return Err(UrlTemplateError::UnknownField(other.to_string())),
            });

            let consumed = start + 2 + end + 2;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn render(&self, params: &UrlParams<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Ip => out.push_str(params.ip),
                Segment::Port => out.push_str(&params.port.to_string()),
                Segment::Name => out.push_str(params.name),
            }
        }
        out
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for UrlTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_URL_TEMPLATE.to_string(),
            segments: vec![
                Segment::Literal("http://".to_string()),
                Segment::Ip,
                Segment::Literal(":".to_string()),
                Segment::Port,
            ],
        }
    }
}

impl FromStr for UrlTemplate {
    type Err = UrlTemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
