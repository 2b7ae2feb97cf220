//! Classified statement types.

use std::fmt;

use tabula_core::TableName;

/// Source location span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Delimiter wrapped around an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// `[name]`
    Bracket,
    /// `` `name` ``
    Backtick,
    /// `"name"`
    Double,
}

/// Console directives interpreted by the session itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    /// `.exit` / `.quit`
    Exit,
    /// `.help`
    Help,
    /// `.history`
    History,
}

impl MetaCommand {
    pub fn name(&self) -> &'static str {
        match self {
            MetaCommand::Exit => ".exit",
            MetaCommand::Help => ".help",
            MetaCommand::History => ".history",
        }
    }
}

/// Statement kind, determined purely from the statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Read,
    Write,
    Create,
    Meta(MetaCommand),
}

impl StatementKind {
    /// Write and create statements need confirmation before dispatch.
    pub fn is_mutating(&self) -> bool {
        matches!(self, StatementKind::Write | StatementKind::Create)
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatementKind::Read => "read",
            StatementKind::Write => "write",
            StatementKind::Create => "create",
            StatementKind::Meta(_) => "meta",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a table reference is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    /// Read from or written to; may be an alias.
    Reference,
    /// Prefix given to `CREATE TABLE`; never an alias.
    Created,
}

/// One occurrence of a table reference in the normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Identifier text without delimiters.
    pub name: String,
    /// Delimiter used in the statement, if any.
    pub quote: Option<Quote>,
    /// Location in the normalized text, delimiters included.
    pub span: Span,
    pub role: TableRole,
}

impl TableRef {
    pub fn is_canonical(&self) -> bool {
        TableName::is_canonical(&self.name)
    }
}

/// Immutable result of classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedStatement {
    pub(crate) kind: StatementKind,
    pub(crate) text: String,
    pub(crate) refs: Vec<TableRef>,
    pub(crate) segments: usize,
}

impl ClassifiedStatement {
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Normalized statement text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every table reference occurrence, in text order.
    pub fn refs(&self) -> &[TableRef] {
        &self.refs
    }

    /// Number of `;`-separated segments in the block.
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Distinct referenced table tokens, in first-seen order.
    pub fn tables(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for r in self.refs.iter().filter(|r| r.role == TableRole::Reference) {
            if !seen.contains(&r.name.as_str()) {
                seen.push(&r.name);
            }
        }
        seen
    }

    /// Distinct tokens that are not canonical and so need resolving.
    pub fn alias_candidates(&self) -> Vec<&str> {
        self.tables()
            .into_iter()
            .filter(|t| !TableName::is_canonical(t))
            .collect()
    }

    /// The prefix given to `CREATE TABLE`, for create statements.
    pub fn created_prefix(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.role == TableRole::Created)
            .map(|r| r.name.as_str())
    }

    pub fn meta(&self) -> Option<MetaCommand> {
        match self.kind {
            StatementKind::Meta(cmd) => Some(cmd),
            _ => None,
        }
    }
}
