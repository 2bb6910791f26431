use crate::parser::Record;
use memchr::memmem::Finder;
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

/// How a needle is pinned inside the text it is tested against
#[derive(Debug, Clone)]
pub enum TextMatch {
    /// `text` anywhere
    Contains(Finder<'static>),
    /// `^text`
    Prefix(Vec<u8>),
    /// `text$`
    Suffix(Vec<u8>),
    /// `^text$`
    Exact(Vec<u8>),
}

impl TextMatch {
    pub fn contains(needle: &[u8]) -> Self {
        TextMatch::Contains(Finder::new(needle).into_owned())
    }

    pub fn is_match(&self, haystack: &[u8]) -> bool {
        match self {
            TextMatch::Contains(finder) => finder.find(haystack).is_some(),
            TextMatch::Prefix(needle) => haystack.starts_with(needle),
            TextMatch::Suffix(needle) => haystack.ends_with(needle),
            TextMatch::Exact(needle) => haystack == needle.as_slice(),
        }
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextMatch::Contains(finder) => write!(f, "{}", String::from_utf8_lossy(finder.needle())),
            TextMatch::Prefix(needle) => write!(f, "^{}", String::from_utf8_lossy(needle)),
            TextMatch::Suffix(needle) => write!(f, "{}$", String::from_utf8_lossy(needle)),
            TextMatch::Exact(needle) => write!(f, "^{}$", String::from_utf8_lossy(needle)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    Greater,
}

impl Comparison {
    fn symbol(self) -> char {
        match self {
            Comparison::Less => '<',
            Comparison::Greater => '>',
        }
    }

    fn accepts(self, ordering: Option<Ordering>) -> bool {
        matches!(
            (self, ordering),
            (Comparison::Less, Some(Ordering::Less)) | (Comparison::Greater, Some(Ordering::Greater))
        )
    }
}

/// Right-hand side of a `<`/`>` filter, with its numeric reading cached
#[derive(Debug, Clone)]
pub struct Operand {
    raw: Vec<u8>,
    number: Option<f64>,
}

impl Operand {
    pub fn new(raw: &[u8]) -> Self {
        Self {
            raw: raw.to_vec(),
            number: parse_number(raw),
        }
    }

    /// Ordering of `value` relative to this operand: numeric when both sides
    /// read as numbers, byte-lexicographic otherwise.
    pub fn order(&self, value: &[u8]) -> Option<Ordering> {
        match (parse_number(value), self.number) {
            (Some(value), Some(operand)) => value.partial_cmp(&operand),
            _ => Some(value.cmp(self.raw.as_slice())),
        }
    }
}

fn parse_number(bytes: &[u8]) -> Option<f64> {
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

/// A test applied to one field value
#[derive(Debug, Clone)]
pub enum FieldTest {
    Text(TextMatch),
    Compare(Comparison, Operand),
    /// Comparator-level negation, `N:!...`
    Not(Box<FieldTest>),
}

impl FieldTest {
    pub fn evaluate(&self, value: &[u8]) -> bool {
        match self {
            FieldTest::Text(text) => text.is_match(value),
            FieldTest::Compare(comparison, operand) => comparison.accepts(operand.order(value)),
            FieldTest::Not(inner) => !inner.evaluate(value),
        }
    }
}

impl fmt::Display for FieldTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldTest::Text(text) => write!(f, "{text}"),
            FieldTest::Compare(comparison, operand) => write!(
                f,
                "{}{}",
                comparison.symbol(),
                String::from_utf8_lossy(&operand.raw)
            ),
            FieldTest::Not(inner) => write!(f, "!{inner}"),
        }
    }
}

/// A user-facing field number that is not the timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIndex(i64);

impl FieldIndex {
    /// `None` for 0, which names the timestamp
    pub fn new(number: i64) -> Option<Self> {
        (number != 0).then_some(FieldIndex(number))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// Compiled filter, evaluated against one record at a time
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Every child must match; an empty list always matches
    All(Vec<Predicate>),
    /// Expression-level negation, `!...`
    Not(Box<Predicate>),
    /// Test against the whole raw line
    Line(TextMatch),
    /// Test against one field; false when the field does not exist on the record
    Field { index: FieldIndex, test: FieldTest },
}

impl Predicate {
    /// A predicate that accepts every record
    pub fn always() -> Self {
        Predicate::All(Vec::new())
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::All(children) => children.iter().all(|child| child.matches(record)),
            Predicate::Not(inner) => {
                let result = !inner.matches(record);
                trace!(filter = %self, result, "filter.not");
                result
            }
            Predicate::Line(text) => {
                let result = text.is_match(record.line());
                trace!(filter = %text, result, "filter.line");
                result
            }
            Predicate::Field { index, test } => match record.field_by_number(index.get()) {
                Some(value) => {
                    let result = test.evaluate(value);
                    trace!(
                        field = index.get(),
                        filter = %test,
                        value = %String::from_utf8_lossy(value),
                        result,
                        "filter.field"
                    );
                    result
                }
                None => {
                    trace!(
                        field = index.get(),
                        filter = %test,
                        fields = record.field_count(),
                        "filter.field: too few fields"
                    );
                    false
                }
            },
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::All(children) if children.is_empty() => write!(f, "*"),
            Predicate::All(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " AND ")?;
                    }
                    write!(f, "{child}")?;
                }
                Ok(())
            }
            Predicate::Not(inner) => write!(f, "!{inner}"),
            Predicate::Line(text) => write!(f, "{text}"),
            Predicate::Field { index, test } => write!(f, "{}:{test}", index.get()),
        }
    }
}
