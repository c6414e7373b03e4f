//! Assertion rewriting: `pm.expect(...)` into `client.assert(...)`.
//!
//! Postman expresses checks as chained matchers (`.to.satisfy(...)`,
//! `.to.be.a("type")`); the HTTP Client dialect takes a single boolean
//! expression plus an optional message. This module extracts the subject and
//! predicate names from one source line and renders the combined form.
//!
//! Extraction is regex-based on purpose. The source dialect is line-regular
//! (one matcher chain per line), so a full JavaScript parse buys nothing here.

use once_cell::sync::Lazy;
use regex::Regex;

static SUBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^pm\.expect\(\s*([^,)]+?)\s*[,)]").unwrap());
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).unwrap());
static TYPE_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\.to\.be\.an?\(\s*"([^"]+)"\s*\)"#).unwrap());
static SATISFY_RETURN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"return\s+([A-Za-z_$][\w$]*)\s*\([^)]*\)(?:\s*\|\|\s*([A-Za-z_$][\w$]*)\s*\()?")
        .unwrap()
});

/// One candidate check against the assertion subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// A named predicate function applied to the subject: `f(subject)`.
    Func(String),
    /// A typeof check: `typeof subject === "type"`.
    TypeOf(String),
    /// The array check: `Array.isArray(subject)`.
    IsArray,
}

impl Predicate {
    fn render(&self, subject: &str) -> String {
        match self {
            Predicate::Func(name) => format!("{name}({subject})"),
            Predicate::TypeOf(ty) => format!("typeof {subject} === \"{ty}\""),
            Predicate::IsArray => format!("Array.isArray({subject})"),
        }
    }
}

/// A single source assertion, decomposed. Built and consumed within one
/// line's conversion; never persisted.
#[derive(Debug, Clone)]
pub struct Assertion {
    pub subject: String,
    pub description: Option<String>,
    /// Candidate predicates in declaration order. Rendering combines them
    /// last-declared-first without mutating this list.
    pub predicates: Vec<Predicate>,
}

impl Assertion {
    /// Renders the target assertion statement.
    ///
    /// Predicates are OR-combined in reverse declaration order, so the last
    /// declared predicate becomes the left-most operand. An assertion with no
    /// extracted predicates renders as an unconditional failure naming the
    /// subject, which keeps the missing coverage visible in test results.
    pub fn render(&self) -> String {
        if self.predicates.is_empty() {
            return format!(
                "client.assert(false, \"no predicate found for {}\");",
                self.subject
            );
        }
        let expr = self
            .predicates
            .iter()
            .rev()
            .map(|p| p.render(&self.subject))
            .collect::<Vec<_>>()
            .join(" || ");
        match &self.description {
            Some(desc) => format!("client.assert({expr}, \"{desc}\");"),
            None => format!("client.assert({expr});"),
        }
    }
}

/// Parses one `pm.expect(...)` line into an [`Assertion`].
///
/// Returns a reason string when the subject cannot be extracted; the caller
/// logs it and drops the line, conversion continues.
pub fn rewrite_assertion(line: &str) -> Result<Assertion, String> {
    let subject = SUBJECT
        .captures(line)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "cannot extract assertion subject".to_string())?;

    if line.contains(".satisfy(") {
        let mut predicates = Vec::new();
        if let Some(caps) = SATISFY_RETURN.captures(line) {
            predicates.push(Predicate::Func(caps[1].to_string()));
            if let Some(second) = caps.get(2) {
                predicates.push(Predicate::Func(second.as_str().to_string()));
            }
        }
        let description = QUOTED.captures(line).map(|c| c[1].to_string());
        return Ok(Assertion {
            subject,
            description,
            predicates,
        });
    }

    if line.contains(".to.be.a(") || line.contains(".to.be.an(") {
        if let Some(caps) = TYPE_CLAUSE.captures(line) {
            let ty = caps[1].to_string();
            let article = match ty.chars().next() {
                Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
                _ => "a",
            };
            let description = Some(format!("{subject} should be {article} {ty}"));
            let predicate = if ty == "array" {
                Predicate::IsArray
            } else {
                Predicate::TypeOf(ty)
            };
            return Ok(Assertion {
                subject,
                description,
                predicates: vec![predicate],
            });
        }
        // No quoted type name: fall back to the line's second dot-segment
        // as a bare predicate name.
        let predicates = line
            .split('.')
            .nth(1)
            .map(|segment| {
                let name = segment.split('(').next().unwrap_or(segment).trim();
                vec![Predicate::Func(name.to_string())]
            })
            .unwrap_or_default();
        return Ok(Assertion {
            subject,
            description: None,
            predicates,
        });
    }

    // Unrecognized matcher chain: no predicates, rendered as a visible
    // always-failing assertion.
    Ok(Assertion {
        subject,
        description: None,
        predicates: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satisfy_with_single_predicate_and_description() {
        let line = r#"pm.expect(obj.mc, "obj.mc should be a number or null").to.satisfy((value) => { return nullOrNumber(value); });"#;
        let assertion = rewrite_assertion(line).unwrap();
        assert_eq!(assertion.subject, "obj.mc");
        assert_eq!(
            assertion.render(),
            r#"client.assert(nullOrNumber(obj.mc), "obj.mc should be a number or null");"#
        );
    }

    #[test]
    fn satisfy_predicates_combine_in_reverse_declaration_order() {
        let line = r#"pm.expect(obj.patient, "obj.patient should be an object, number or null").to.satisfy((value) => { return nullOrObject(value) || nullOrNumber(value); });"#;
        let assertion = rewrite_assertion(line).unwrap();
        assert_eq!(
            assertion.predicates,
            vec![
                Predicate::Func("nullOrObject".into()),
                Predicate::Func("nullOrNumber".into())
            ]
        );
        // Last declared predicate is the left-most operand.
        assert_eq!(
            assertion.render(),
            r#"client.assert(nullOrNumber(obj.patient) || nullOrObject(obj.patient), "obj.patient should be an object, number or null");"#
        );
    }

    #[test]
    fn satisfy_without_description_renders_without_message() {
        let line = "pm.expect(obj.id).to.satisfy((v) => { return isId(v); });";
        let assertion = rewrite_assertion(line).unwrap();
        assert_eq!(assertion.render(), "client.assert(isId(obj.id));");
    }

    #[test]
    fn type_assertion_renders_typeof_check() {
        let line = r#"pm.expect(obj.id).to.be.a("number");"#;
        let assertion = rewrite_assertion(line).unwrap();
        assert_eq!(
            assertion.render(),
            r#"client.assert(typeof obj.id === "number", "obj.id should be a number");"#
        );
    }

    #[test]
    fn array_type_uses_is_array_and_an_article() {
        let line = r#"pm.expect(items).to.be.an("array");"#;
        let assertion = rewrite_assertion(line).unwrap();
        assert_eq!(
            assertion.render(),
            r#"client.assert(Array.isArray(items), "items should be an array");"#
        );
    }

    #[test]
    fn vowel_types_get_an_article() {
        let line = r#"pm.expect(obj.patient).to.be.an("object");"#;
        let assertion = rewrite_assertion(line).unwrap();
        assert_eq!(
            assertion.render(),
            r#"client.assert(typeof obj.patient === "object", "obj.patient should be an object");"#
        );
    }

    #[test]
    fn missing_predicates_render_as_visible_failure() {
        let line = "pm.expect(obj.total).to.eql(totals);";
        let assertion = rewrite_assertion(line).unwrap();
        assert!(assertion.predicates.is_empty());
        assert_eq!(
            assertion.render(),
            r#"client.assert(false, "no predicate found for obj.total");"#
        );
    }

    #[test]
    fn unextractable_subject_is_an_error() {
        assert!(rewrite_assertion("pm.expect()").is_err());
        assert!(rewrite_assertion("pm.expect").is_err());
    }

    #[test]
    fn rendering_does_not_consume_predicates() {
        let line = r#"pm.expect(x).to.satisfy((v) => { return f(v) || g(v); });"#;
        let assertion = rewrite_assertion(line).unwrap();
        let first = assertion.render();
        let second = assertion.render();
        assert_eq!(first, second);
        assert_eq!(assertion.predicates.len(), 2);
    }
}
