//! URL templates with named `{placeholder}` segments.

use winnow::{
    Parser, Result as WResult,
    combinator::{alt, delimited, repeat},
    token::take_till,
};

use crate::error::{Result, TemplateError};
use crate::kind::ReferenceKind;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    /// `{{` / `}}` collapse to a single brace.
    Brace(char),
    Placeholder(&'a str),
}

/// A parsed URL template.
///
/// `{name}` is a placeholder; `{{` and `}}` are literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate<'a> {
    source: &'a str,
    segments: Vec<Segment<'a>>,
}

impl<'a> UriTemplate<'a> {
    /// Parse `source` into segments.
    ///
    /// An unclosed `{`, a nested `{` or a lone `}` is an error reported at
    /// the offset of the offending brace.
    pub fn parse(source: &'a str) -> Result<Self> {
        let segments: Vec<Segment<'a>> = repeat(0.., segment)
            .parse(source)
            .map_err(|e| TemplateError::Unterminated {
                template: source.to_string(),
                offset: e.offset(),
            })?;
        Ok(Self { source, segments })
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Placeholder names in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(*name),
            _ => None,
        })
    }

    /// True when the template interpolates a `group/project` scope.
    pub fn uses_scope(&self) -> bool {
        self.placeholders()
            .any(|name| name == "group" || name == "project")
    }

    /// Ensure the template only uses placeholders `kind` knows about and
    /// that the identifier placeholder is present.
    pub fn check(&self, kind: ReferenceKind) -> Result<()> {
        let allowed = kind.allowed_placeholders();
        if let Some(unknown) = self
            .placeholders()
            .find(|name| !allowed.iter().any(|known| known == name))
        {
            return Err(TemplateError::UnknownPlaceholder {
                kind,
                name: unknown.to_string(),
                template: self.source.to_string(),
            }
            .into());
        }
        if !self.placeholders().any(|name| name == kind.placeholder()) {
            return Err(TemplateError::MissingIdentifier {
                kind,
                template: self.source.to_string(),
                placeholder: kind.placeholder(),
            }
            .into());
        }
        Ok(())
    }

    /// Substitute placeholders from `values`.
    ///
    /// A placeholder without a value is reported against `kind` rather than
    /// left in the output.
    pub fn render(&self, kind: ReferenceKind, values: &[(&str, &str)]) -> Result<String> {
        let mut out = String::with_capacity(self.source.len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Brace(c) => out.push(*c),
                Segment::Placeholder(name) => {
                    let value = values
                        .iter()
                        .find(|(key, _)| key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| TemplateError::UnknownPlaceholder {
                            kind,
                            name: name.to_string(),
                            template: self.source.to_string(),
                        })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

// One segment: `{{`, `}}`, `{name}` or a run of non-brace text
fn segment<'a>(input: &mut &'a str) -> WResult<Segment<'a>> {
    alt((
        "{{".value(Segment::Brace('{')),
        "}}".value(Segment::Brace('}')),
        placeholder.map(Segment::Placeholder),
        take_till(1.., ['{', '}']).map(Segment::Literal),
    ))
    .parse_next(input)
}

// Placeholder: {name}
fn placeholder<'a>(input: &mut &'a str) -> WResult<&'a str> {
    delimited('{', take_till(0.., ['{', '}']), '}').parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReferenceError;

    #[test]
    fn parses_placeholders_in_order() {
        let template = UriTemplate::parse("https://x/{group}/{project}/issues/{issue}").unwrap();
        let names: Vec<_> = template.placeholders().collect();
        assert_eq!(names, vec!["group", "project", "issue"]);
        assert!(template.uses_scope());
    }

    #[test]
    fn renders_values() {
        let template = UriTemplate::parse("https://x/{group}/{project}/pull/{pr}").unwrap();
        let url = template
            .render(
                ReferenceKind::PullRequest,
                &[("group", "sloria"), ("project", "webargs"), ("pr", "42")],
            )
            .unwrap();
        assert_eq!(url, "https://x/sloria/webargs/pull/42");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let template = UriTemplate::parse("https://x/{{raw}}/{user}").unwrap();
        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["user"]);
        let url = template
            .render(ReferenceKind::User, &[("user", "sloria")])
            .unwrap();
        assert_eq!(url, "https://x/{raw}/sloria");
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        for bad in ["https://x/{issue", "https://x/{is{sue}", "https://x/}"] {
            let err = UriTemplate::parse(bad).unwrap_err();
            assert!(
                matches!(err, ReferenceError::Template(TemplateError::Unterminated { .. })),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn unterminated_error_points_at_brace() {
        let cases = [("https://x/{issue", 10), ("a{{b}}c{d{e}", 7), ("{x}}", 3)];
        for (bad, expected) in cases {
            match UriTemplate::parse(bad) {
                Err(ReferenceError::Template(TemplateError::Unterminated { offset, .. })) => {
                    assert_eq!(offset, expected, "{bad:?}");
                }
                other => panic!("{bad:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn literal_only_template() {
        let template = UriTemplate::parse("https://example.com/").unwrap();
        assert_eq!(template.placeholders().count(), 0);
        assert_eq!(
            template.render(ReferenceKind::Issue, &[]).unwrap(),
            "https://example.com/"
        );
        assert!(UriTemplate::parse("").unwrap().placeholders().next().is_none());
    }

    #[test]
    fn check_rejects_foreign_placeholder() {
        let template = UriTemplate::parse("https://x/{group}/{project}/pull/{issue}").unwrap();
        let err = template.check(ReferenceKind::PullRequest).unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::Template(TemplateError::UnknownPlaceholder { ref name, .. }) if name == "issue"
        ));
    }

    #[test]
    fn check_requires_identifier() {
        let template = UriTemplate::parse("https://x/{group}/{project}/issues").unwrap();
        let err = template.check(ReferenceKind::Issue).unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::Template(TemplateError::MissingIdentifier { placeholder: "issue", .. })
        ));
    }

    #[test]
    fn template_without_scope() {
        let template =
            UriTemplate::parse("https://github.com/marshmallow-code/marshmallow/issues/{issue}")
                .unwrap();
        assert!(!template.uses_scope());
        assert!(template.check(ReferenceKind::Issue).is_ok());
    }
}
