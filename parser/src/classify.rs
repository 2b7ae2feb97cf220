//! Statement classification.
//!
//! A block of console text is split into `;`-separated segments. Each segment
//! is classified by its leading keyword; the block kind is derived from the
//! segment kinds. Kind never depends on anything but the text.

use std::ops::Range;

use tabula_core::messages::ERR_EMPTY_STATEMENT;
use tabula_core::TableName;

use crate::lexer::{Lexer, Token, TokenKind};
use crate::{
    ClassifiedStatement, MetaCommand, ParseError, ParseResult, Quote, Span, StatementKind,
    TableRef, TableRole,
};

const WRITE_KEYWORDS: &[&str] = &[
    "INSERT", "UPDATE", "DELETE", "GRANT", "REVOKE", "ALTER", "DROP", "REPLACE", "UPSERT",
];

/// Keywords directly followed by a table name.
const TABLE_POSITION_KEYWORDS: &[&str] = &["FROM", "JOIN", "INTO", "UPDATE", "TABLE"];

/// Words that can never be a table name or a table alias.
const RESERVED: &[&str] = &[
    "SELECT", "FROM", "WHERE", "GROUP", "ORDER", "BY", "LIMIT", "OFFSET", "HAVING", "UNION",
    "ALL", "EXCEPT", "INTERSECT", "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "OUTER", "CROSS",
    "NATURAL", "ON", "USING", "SET", "VALUES", "AS", "WITH", "RETURNING", "DEFAULT", "INTO",
    "TABLE", "IF", "NOT", "EXISTS", "AND", "OR", "TO", "WINDOW", "DO", "CONFLICT",
];

fn is_reserved(word: &str) -> bool {
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(word))
}

fn upper_word(token: &Token) -> Option<String> {
    match &token.kind {
        TokenKind::Word(w) => Some(w.to_ascii_uppercase()),
        _ => None,
    }
}

/// Returns true if the text is a console directive rather than SQL.
pub fn is_meta_command(text: &str) -> bool {
    text.trim_start().starts_with('.')
}

/// Classify a complete statement block.
pub fn classify(text: &str) -> ParseResult<ClassifiedStatement> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(ERR_EMPTY_STATEMENT, Span::new(0, 0, 1, 1)));
    }
    if is_meta_command(trimmed) {
        return classify_meta(trimmed);
    }

    let tokens = Lexer::new(text).tokenize()?;
    let normalized = Normalized::build(text, &tokens);

    let segments = split_segments(&tokens);
    if segments.is_empty() {
        return Err(ParseError::new(ERR_EMPTY_STATEMENT, tokens[0].span));
    }

    let mut kinds = Vec::with_capacity(segments.len());
    let mut refs = Vec::new();
    for range in &segments {
        let (kind, created) = segment_kind(&tokens[range.clone()])?;
        kinds.push((kind, tokens[range.start].span));
        collect_refs(
            &tokens[range.clone()],
            &normalized.spans[range.clone()],
            created,
            &mut refs,
        );
    }

    let kind = combine(&kinds)?;

    Ok(ClassifiedStatement {
        kind,
        text: normalized.text,
        refs,
        segments: segments.len(),
    })
}

fn classify_meta(trimmed: &str) -> ParseResult<ClassifiedStatement> {
    let word = trimmed[1..]
        .trim_end_matches(';')
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();

    let command = match word.as_str() {
        "exit" | "quit" => MetaCommand::Exit,
        "help" => MetaCommand::Help,
        "history" => MetaCommand::History,
        _ => {
            return Err(ParseError::new(
                format!("unknown command '.{}' (enter .help for usage hints)", word),
                Span::new(0, trimmed.len(), 1, 1),
            ));
        }
    };

    Ok(ClassifiedStatement {
        kind: StatementKind::Meta(command),
        text: trimmed.to_string(),
        refs: Vec::new(),
        segments: 1,
    })
}

/// Whitespace-normalized text plus the position of every token in it.
struct Normalized {
    text: String,
    spans: Vec<Span>,
}

impl Normalized {
    /// Rebuild the text from token slices, collapsing whitespace and comments to one space.
    fn build(source: &str, tokens: &[Token]) -> Self {
        let mut text = String::with_capacity(source.len());
        let mut spans = Vec::with_capacity(tokens.len());
        let mut chars = 0usize;
        let mut prev_end: Option<usize> = None;

        for token in tokens {
            if matches!(token.kind, TokenKind::Eof) {
                spans.push(Span::new(text.len(), text.len(), 1, chars + 1));
                break;
            }
            if prev_end.is_some_and(|end| end != token.span.start) {
                text.push(' ');
                chars += 1;
            }
            let slice = &source[token.span.start..token.span.end];
            let start = text.len();
            let column = chars + 1;
            text.push_str(slice);
            chars += slice.chars().count();
            spans.push(Span::new(start, text.len(), 1, column));
            prev_end = Some(token.span.end);
        }

        Self { text, spans }
    }
}

/// Token index ranges between `;` separators, skipping empty segments.
fn split_segments(tokens: &[Token]) -> Vec<Range<usize>> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if matches!(token.kind, TokenKind::Semicolon | TokenKind::Eof) {
            if i > start {
                segments.push(start..i);
            }
            start = i + 1;
        }
    }
    segments
}

/// Kind of one segment, plus the index of the created table name for creates.
fn segment_kind(tokens: &[Token]) -> ParseResult<(StatementKind, Option<usize>)> {
    let Some(leading) = upper_word(&tokens[0]) else {
        return Ok((StatementKind::Read, None));
    };

    if leading == "CREATE" {
        let mut idx = 1;
        match tokens.get(idx) {
            Some(t) if t.kind.is_keyword("TABLE") => idx += 1,
            Some(t) => {
                return Err(ParseError::expected(t.span, "TABLE", &t.kind.name()));
            }
            None => return Err(ParseError::end_of_input(tokens[0].span, "TABLE")),
        }
        if tokens.get(idx).is_some_and(|t| t.kind.is_keyword("IF")) {
            for keyword in ["NOT", "EXISTS"] {
                idx += 1;
                match tokens.get(idx) {
                    Some(t) if t.kind.is_keyword(keyword) => {}
                    Some(t) => {
                        return Err(ParseError::expected(t.span, keyword, &t.kind.name()));
                    }
                    None => return Err(ParseError::end_of_input(tokens[idx - 1].span, keyword)),
                }
            }
            idx += 1;
        }
        return match tokens.get(idx) {
            Some(t) if table_ident(t).is_some() => Ok((StatementKind::Create, Some(idx))),
            Some(t) => Err(ParseError::expected(t.span, "table name", &t.kind.name())),
            None => Err(ParseError::end_of_input(tokens[idx - 1].span, "table name")),
        };
    }

    if WRITE_KEYWORDS.contains(&leading.as_str()) {
        return Ok((StatementKind::Write, None));
    }

    Ok((StatementKind::Read, None))
}

/// Identifier usable as a table name, with its delimiter.
fn table_ident(token: &Token) -> Option<(&str, Option<Quote>)> {
    match &token.kind {
        TokenKind::Word(w) if !is_reserved(w) => Some((w, None)),
        TokenKind::Quoted(q, quote) => Some((q, Some(*quote))),
        _ => None,
    }
}

fn collect_refs(
    tokens: &[Token],
    spans: &[Span],
    created: Option<usize>,
    refs: &mut Vec<TableRef>,
) {
    let grants = tokens[0].kind.is_keyword("GRANT") || tokens[0].kind.is_keyword("REVOKE");
    let first = refs.len();
    let mut expect_table = false;
    let mut in_from_list = false;

    for (i, token) in tokens.iter().enumerate() {
        if created == Some(i) {
            if let Some((name, quote)) = table_ident(token) {
                refs.push(TableRef {
                    name: name.to_string(),
                    quote,
                    span: spans[i],
                    role: TableRole::Created,
                });
            }
            expect_table = false;
            continue;
        }

        if expect_table {
            expect_table = false;
            if let Some((name, quote)) = table_ident(token) {
                refs.push(TableRef {
                    name: name.to_string(),
                    quote,
                    span: spans[i],
                    role: TableRole::Reference,
                });
                continue;
            }
            in_from_list = false;
        }

        match &token.kind {
            TokenKind::Word(w) => {
                let upper = w.to_ascii_uppercase();
                if TABLE_POSITION_KEYWORDS.contains(&upper.as_str()) || (grants && upper == "ON") {
                    expect_table = true;
                    in_from_list = upper == "FROM";
                    continue;
                }
                if in_from_list && (upper == "AS" || !is_reserved(w)) {
                    // table alias
                    continue;
                }
                in_from_list = false;
            }
            TokenKind::Comma if in_from_list => {
                expect_table = true;
                continue;
            }
            _ => in_from_list = false,
        }

        // Canonical names count wherever they appear, e.g. as column qualifiers.
        if let Some(name) = token.kind.ident() {
            if TableName::is_canonical(name) {
                let quote = match &token.kind {
                    TokenKind::Quoted(_, quote) => Some(*quote),
                    _ => None,
                };
                refs.push(TableRef {
                    name: name.to_string(),
                    quote,
                    span: spans[i],
                    role: TableRole::Reference,
                });
            }
        }
    }

    collect_qualifiers(tokens, spans, first, refs);
}

/// Add `name.column` qualifiers that name a table already referenced in the
/// segment starting at `refs[first]`. Keeps the segment's refs in text order.
fn collect_qualifiers(tokens: &[Token], spans: &[Span], first: usize, refs: &mut Vec<TableRef>) {
    let tables: Vec<String> = refs[first..]
        .iter()
        .filter(|r| r.role == TableRole::Reference)
        .map(|r| r.name.clone())
        .collect();
    if tables.is_empty() {
        return;
    }

    let mut added = false;
    for (i, pair) in tokens.windows(2).enumerate() {
        if pair[1].kind != TokenKind::Dot {
            continue;
        }
        let Some((name, quote)) = table_ident(&pair[0]) else {
            continue;
        };
        // canonical names were collected already
        if TableName::is_canonical(name) || !tables.iter().any(|t| t == name) {
            continue;
        }
        if refs[first..].iter().any(|r| r.span == spans[i]) {
            continue;
        }
        refs.push(TableRef {
            name: name.to_string(),
            quote,
            span: spans[i],
            role: TableRole::Reference,
        });
        added = true;
    }

    if added {
        refs[first..].sort_by_key(|r| r.span.start);
    }
}

fn combine(kinds: &[(StatementKind, Span)]) -> ParseResult<StatementKind> {
    if let Some((_, span)) = kinds.iter().find(|(k, _)| *k == StatementKind::Create) {
        if kinds.len() > 1 {
            return Err(ParseError::new(
                "create statements must be sent on their own",
                *span,
            ));
        }
        return Ok(StatementKind::Create);
    }

    let writes = kinds.iter().filter(|(k, _)| *k == StatementKind::Write).count();
    if writes == kinds.len() {
        return Ok(StatementKind::Write);
    }
    if writes > 0 {
        let (_, span) = kinds[1];
        return Err(ParseError::new(
            "read and write statements cannot be mixed in one block",
            span,
        ));
    }
    if kinds.len() > 1 {
        let (_, span) = kinds[1];
        return Err(ParseError::new(
            "only one read statement can be sent at a time",
            span,
        ));
    }
    Ok(StatementKind::Read)
}
