use super::error::CompileError;
use super::matcher::{Comparison, FieldIndex, FieldTest, Operand, Predicate, TextMatch};

/// Compile a set of filter expressions into one predicate.
///
/// Expressions combine with AND. Compilation is all-or-nothing: the first
/// invalid expression fails the whole set.
pub fn compile_filters<I, S>(expressions: I) -> Result<Predicate, CompileError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let predicates = expressions
        .into_iter()
        .map(|expr| parse_filter(expr.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match predicates.len() {
        1 => predicates.into_iter().next().unwrap_or_else(Predicate::always),
        _ => Predicate::All(predicates),
    })
}

/// Parse a single filter expression.
///
/// ```text
/// expr   := { '!' } target
/// target := text | index ':' { '!' } ( '<' value | '>' value | ['^'] text ['$'] )
/// ```
pub fn parse_filter(expression: &str) -> Result<Predicate, CompileError> {
    if expression.is_empty() {
        return Err(CompileError::EmptyExpression);
    }

    let (negations, body) = strip_negations(expression);
    if body.is_empty() {
        return Err(CompileError::EmptyMatch(expression.to_string()));
    }

    let predicate = match body.split_once(':') {
        None => Predicate::Line(parse_text_match(body, expression)?),
        Some((index, field_filter)) => {
            if field_filter.is_empty() {
                return Err(CompileError::MissingFieldMatch(expression.to_string()));
            }
            Predicate::Field {
                index: parse_field_index(index, expression)?,
                test: parse_field_test(field_filter, expression)?,
            }
        }
    };

    Ok((0..negations).fold(predicate, |inner, _| Predicate::Not(Box::new(inner))))
}

fn strip_negations(text: &str) -> (usize, &str) {
    let rest = text.trim_start_matches('!');
    (text.len() - rest.len(), rest)
}

fn parse_field_index(index: &str, expression: &str) -> Result<FieldIndex, CompileError> {
    let number = index
        .parse::<i64>()
        .map_err(|source| CompileError::InvalidFieldIndex {
            index: index.to_string(),
            expression: expression.to_string(),
            source,
        })?;
    FieldIndex::new(number).ok_or_else(|| CompileError::TimestampNotFilterable(expression.to_string()))
}

fn parse_field_test(filter: &str, expression: &str) -> Result<FieldTest, CompileError> {
    let (negations, body) = strip_negations(filter);

    let test = if let Some(operand) = body.strip_prefix('<') {
        FieldTest::Compare(Comparison::Less, parse_operand(operand, expression)?)
    } else if let Some(operand) = body.strip_prefix('>') {
        FieldTest::Compare(Comparison::Greater, parse_operand(operand, expression)?)
    } else {
        FieldTest::Text(parse_text_match(body, expression)?)
    };

    Ok((0..negations).fold(test, |inner, _| FieldTest::Not(Box::new(inner))))
}

fn parse_operand(operand: &str, expression: &str) -> Result<Operand, CompileError> {
    if operand.is_empty() {
        return Err(CompileError::EmptyOperand(expression.to_string()));
    }
    Ok(Operand::new(operand.as_bytes()))
}

fn parse_text_match(text: &str, expression: &str) -> Result<TextMatch, CompileError> {
    let (anchored_start, rest) = match text.strip_prefix('^') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (anchored_end, needle) = match rest.strip_suffix('$') {
        Some(needle) => (true, needle),
        None => (false, rest),
    };

    if needle.is_empty() {
        return Err(CompileError::EmptyMatch(expression.to_string()));
    }

    let needle = needle.as_bytes();
    Ok(match (anchored_start, anchored_end) {
        (true, true) => TextMatch::Exact(needle.to_vec()),
        (true, false) => TextMatch::Prefix(needle.to_vec()),
        (false, true) => TextMatch::Suffix(needle.to_vec()),
        (false, false) => TextMatch::contains(needle),
    })
}
