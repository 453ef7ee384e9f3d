//! Content line parsing.
//!
//! A logical line has the shape `NAME[;KEY=VALUE...]:VALUE`. Only the first
//! colon separates the head from the value, so values may contain colons
//! (`ATTENDEE:mailto:a@b.com`).

use std::fmt;

/// The properties the event assembler interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Begin,
    End,
    Summary,
    Attendee,
    DtStart,
    DtEnd,
    /// Any other property. Ignored.
    Other,
}

impl PropertyKind {
    /// Classifies a property name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Self {
        match name {
            "BEGIN" => Self::Begin,
            "END" => Self::End,
            "SUMMARY" => Self::Summary,
            "ATTENDEE" => Self::Attendee,
            "DTSTART" => Self::DtStart,
            "DTEND" => Self::DtEnd,
            _ => Self::Other,
        }
    }
}

/// One `KEY=VALUE` property parameter.
///
/// A token without `=` has no value at all, which is distinct from `KEY=`.
/// Surrounding double quotes are removed from the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
}

impl<'a> Parameter<'a> {
    /// Parses a single parameter token.
    pub fn parse(token: &'a str) -> Self {
        let Some((key, value)) = token.split_once('=') else {
            return Self {
                key: token,
                value: None,
            };
        };
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        Self {
            key,
            value: Some(value),
        }
    }

    /// Returns true if this parameter is exactly `key=value`.
    pub fn is(&self, key: &str, value: &str) -> bool {
        self.key == key && self.value == Some(value)
    }
}

impl fmt::Display for Parameter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}={}", self.key, value),
            None => f.write_str(self.key),
        }
    }
}

/// A logical line split into name, parameters, and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine<'a> {
    pub name: &'a str,
    pub kind: PropertyKind,
    pub params: Vec<Parameter<'a>>,
    pub value: &'a str,
}

impl<'a> ContentLine<'a> {
    /// Parses a logical line. Returns `None` if it has no colon.
    pub fn parse(line: &'a str) -> Option<Self> {
        let (head, value) = line.split_once(':')?;
        let mut segments = head.split(';');
        let name = segments.next().unwrap_or_default();
        Some(Self {
            name,
            kind: PropertyKind::from_name(name),
            params: segments.map(Parameter::parse).collect(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_colon_only() {
        let line = ContentLine::parse("ATTENDEE;CN=Alice:mailto:alice@example.com").unwrap();
        assert_eq!(line.name, "ATTENDEE");
        assert_eq!(line.kind, PropertyKind::Attendee);
        assert_eq!(line.params, vec![Parameter { key: "CN", value: Some("Alice") }]);
        assert_eq!(line.value, "mailto:alice@example.com");
    }

    #[test]
    fn keeps_parameter_order() {
        let line = ContentLine::parse("DTSTART;TZID=Europe/Paris;X-FOO=bar:20200101T120000").unwrap();
        assert_eq!(line.kind, PropertyKind::DtStart);
        assert_eq!(line.params.len(), 2);
        assert!(line.params[0].is("TZID", "Europe/Paris"));
        assert!(line.params[1].is("X-FOO", "bar"));
    }

    #[test]
    fn names_are_case_sensitive() {
        let line = ContentLine::parse("summary:lowercase").unwrap();
        assert_eq!(line.kind, PropertyKind::Other);
    }

    #[test]
    fn empty_value_is_allowed() {
        let line = ContentLine::parse("SUMMARY:").unwrap();
        assert_eq!(line.kind, PropertyKind::Summary);
        assert_eq!(line.value, "");
    }

    #[test]
    fn line_without_colon_is_rejected() {
        assert!(ContentLine::parse("GARBAGE").is_none());
        assert!(ContentLine::parse("").is_none());
    }

    #[test]
    fn quoted_parameter_value_is_unquoted() {
        let param = Parameter::parse("TZID=\"America/New_York\"");
        assert_eq!(param.value, Some("America/New_York"));
    }

    #[test]
    fn bare_parameter_token() {
        let param = Parameter::parse("X-FLAG");
        assert_eq!(param, Parameter { key: "X-FLAG", value: None });
        assert_eq!(param.to_string(), "X-FLAG");

        let empty = Parameter::parse("TZID=");
        assert_eq!(empty.value, Some(""));
        assert_eq!(empty.to_string(), "TZID=");
        assert_eq!(Parameter::parse("VALUE=DATE").to_string(), "VALUE=DATE");
    }
}
