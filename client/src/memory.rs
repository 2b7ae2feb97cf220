//! In-process table store.
//!
//! `MemoryChain` stands in for the network in offline mode and in tests. It
//! understands a small SQL subset, enough to exercise the console end to end:
//!
//! - `CREATE TABLE [IF NOT EXISTS] prefix (col type, ...)`
//! - `INSERT INTO t [(cols)] VALUES (...), (...)`
//! - `UPDATE t SET col = v, ... [WHERE col = v]`
//! - `DELETE FROM t [WHERE col = v]`
//! - `SELECT * | col, ... FROM t [WHERE col = v]`
//!
//! Clones share one store, so a test can keep a handle and inspect state
//! after the console has consumed (and closed) its own.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tabula_core::{Chain, Column, CreatedTable, RowSet, TableName, TxnReceipt, Value};
use tabula_parser::{Lexer, TokenKind};
use tracing::debug;

use crate::client::ChainClient;
use crate::error::{ChainError, ChainResult};

/// Column constraints that open a table definition entry without naming a column.
const CONSTRAINT_KEYWORDS: &[&str] = &["PRIMARY", "UNIQUE", "CHECK", "FOREIGN", "CONSTRAINT"];

#[derive(Debug, Clone)]
struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    fn column_index(&self, name: &str) -> Result<usize, String> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("no such column: {}", name))
    }
}

#[derive(Debug, Clone)]
struct Store {
    tables: BTreeMap<String, Table>,
    next_table_id: u64,
    block: u64,
}

impl Store {
    fn table(&self, name: &str) -> ChainResult<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| ChainError::NoSuchTable(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table, ChainError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| ChainError::NoSuchTable(name.to_string()))
    }

    /// Advance the block and mint a synthetic transaction hash.
    fn next_receipt(&mut self, chain_id: u64) -> TxnReceipt {
        self.block += 1;
        TxnReceipt::new(format!("0x{:064x}", self.block), chain_id).with_block(self.block)
    }
}

/// In-memory `ChainClient`.
#[derive(Debug, Clone)]
pub struct MemoryChain {
    chain: Chain,
    store: Arc<Mutex<Store>>,
    closes: Arc<AtomicUsize>,
}

impl MemoryChain {
    /// An empty store on `chain`.
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            store: Arc::new(Mutex::new(Store {
                tables: BTreeMap::new(),
                next_table_id: 1,
                block: 0,
            })),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A store holding `healthbot_{chainId}_1` with a single `counter = 1` row.
    pub fn seeded(chain: Chain) -> Self {
        let memory = Self::new(chain);
        if let Ok(mut store) = memory.store.lock() {
            let name = format!("healthbot_{}_1", chain.chain_id);
            store.tables.insert(
                name,
                Table {
                    columns: vec!["counter".to_string()],
                    rows: vec![vec![Value::Int(1)]],
                },
            );
            store.next_table_id = 2;
        }
        memory
    }

    /// How many times a handle on this store has been closed.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Full contents of a table, if it exists.
    pub fn snapshot(&self, name: &str) -> Option<RowSet> {
        let store = self.lock().ok()?;
        let table = store.tables.get(name)?;
        Some(RowSet::new(
            table.columns.iter().map(Column::new).collect(),
            table.rows.clone(),
        ))
    }

    /// Names of all tables, sorted.
    pub fn table_names(&self) -> Vec<String> {
        self.lock()
            .map(|store| store.tables.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> ChainResult<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| ChainError::ConnectionFailed("memory store poisoned".to_string()))
    }

    fn run_query(&self, statement: &str) -> ChainResult<RowSet> {
        let mut segments = segments(statement).map_err(ChainError::QueryFailed)?;
        if segments.len() != 1 {
            return Err(ChainError::QueryFailed(
                "expected exactly one query".to_string(),
            ));
        }
        let mut cursor = segments.remove(0);
        let store = self.lock()?;
        select(&mut cursor, &store)
    }

    fn run_write(&self, statement: &str) -> ChainResult<TxnReceipt> {
        let segments = segments(statement).map_err(ChainError::TransactionFailed)?;
        if segments.is_empty() {
            return Err(ChainError::TransactionFailed("empty statement".to_string()));
        }

        let mut store = self.lock()?;
        // Apply to a scratch copy so a failing segment leaves no trace.
        let mut scratch = store.clone();
        for mut cursor in segments {
            mutate(&mut cursor, &mut scratch)?;
        }
        let receipt = scratch.next_receipt(self.chain.chain_id);
        *store = scratch;
        Ok(receipt)
    }

    fn run_create(&self, statement: &str) -> ChainResult<CreatedTable> {
        let mut segments = segments(statement).map_err(ChainError::TransactionFailed)?;
        if segments.len() != 1 {
            return Err(ChainError::TransactionFailed(
                "expected exactly one create statement".to_string(),
            ));
        }
        let mut cursor = segments.remove(0);
        let (prefix, columns) = create(&mut cursor).map_err(ChainError::TransactionFailed)?;

        let mut store = self.lock()?;
        let name = TableName::new(prefix, self.chain.chain_id, store.next_table_id)
            .map_err(|e| ChainError::TransactionFailed(e.to_string()))?;
        store.next_table_id += 1;
        store.tables.insert(
            name.to_string(),
            Table {
                columns,
                rows: Vec::new(),
            },
        );
        let receipt = store.next_receipt(self.chain.chain_id);
        debug!(table = %name, "created table");
        Ok(CreatedTable { name, receipt })
    }
}

impl ChainClient for MemoryChain {
    fn chain(&self) -> Chain {
        self.chain
    }

    async fn read(&self, statement: &str) -> ChainResult<RowSet> {
        self.run_query(statement)
    }

    async fn write(&self, statement: &str) -> ChainResult<TxnReceipt> {
        self.run_write(statement)
    }

    async fn create(&self, statement: &str) -> ChainResult<CreatedTable> {
        self.run_create(statement)
    }

    async fn close(self) {
        let closes = self.closes.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(closes, "memory chain closed");
    }
}

// ==================== Statement cursor ====================

/// Token cursor over one `;`-delimited segment.
struct Cursor {
    tokens: Vec<TokenKind>,
    pos: usize,
}

/// Lex `statement` and split it into non-empty segments.
fn segments(statement: &str) -> Result<Vec<Cursor>, String> {
    let tokens = Lexer::new(statement).tokenize().map_err(|e| e.to_string())?;

    let mut out = Vec::new();
    let mut current = Vec::new();
    for token in tokens {
        match token.kind {
            TokenKind::Semicolon | TokenKind::Eof => {
                if !current.is_empty() {
                    out.push(Cursor {
                        tokens: std::mem::take(&mut current),
                        pos: 0,
                    });
                }
            }
            kind => current.push(kind),
        }
    }
    Ok(out)
}

impl Cursor {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) -> Option<TokenKind> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn found(&self) -> String {
        self.peek()
            .map(TokenKind::name)
            .unwrap_or_else(|| "end of statement".to_string())
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), String> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(format!("expected {}, found {}", kind.name(), self.found()))
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_keyword(keyword)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), String> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(format!("expected {}, found {}", keyword, self.found()))
        }
    }

    fn ident(&mut self) -> Result<String, String> {
        match self.peek().and_then(TokenKind::ident) {
            Some(name) => {
                let name = name.to_string();
                self.pos += 1;
                Ok(name)
            }
            None => Err(format!("expected identifier, found {}", self.found())),
        }
    }

    fn literal(&mut self) -> Result<Value, String> {
        let negative = self.eat(&TokenKind::Symbol('-'));
        match self.advance() {
            Some(TokenKind::Number(n)) => {
                let text = if negative { format!("-{}", n) } else { n };
                text.parse::<i64>()
                    .map(Value::Int)
                    .or_else(|_| text.parse::<f64>().map(Value::Float))
                    .map_err(|_| format!("invalid number {}", text))
            }
            Some(TokenKind::String(s)) if !negative => Ok(Value::Text(s)),
            Some(TokenKind::Word(w)) if !negative => match w.to_ascii_uppercase().as_str() {
                "NULL" => Ok(Value::Null),
                "TRUE" => Ok(Value::Int(1)),
                "FALSE" => Ok(Value::Int(0)),
                _ => Err(format!("expected value, found '{}'", w)),
            },
            other => Err(format!(
                "expected value, found {}",
                other
                    .map(|t| t.name())
                    .unwrap_or_else(|| "end of statement".to_string())
            )),
        }
    }

    fn finish(&self) -> Result<(), String> {
        if self.at_end() {
            Ok(())
        } else {
            Err(format!("unexpected {}", self.found()))
        }
    }
}

/// `WHERE col = value`, resolved against `table`.
fn filter(cursor: &mut Cursor, table: &Table) -> Result<Option<(usize, Value)>, String> {
    if !cursor.eat_keyword("WHERE") {
        return Ok(None);
    }
    let column = cursor.ident()?;
    cursor.expect(&TokenKind::Symbol('='))?;
    let value = cursor.literal()?;
    Ok(Some((table.column_index(&column)?, value)))
}

fn matches(row: &[Value], filter: &Option<(usize, Value)>) -> bool {
    match filter {
        Some((idx, value)) => row.get(*idx) == Some(value),
        None => true,
    }
}

// ==================== Statements ====================

fn select(cursor: &mut Cursor, store: &Store) -> ChainResult<RowSet> {
    let failed = ChainError::QueryFailed;
    cursor.expect_keyword("SELECT").map_err(failed)?;

    let mut projection = Vec::new();
    if !cursor.eat(&TokenKind::Star) {
        loop {
            projection.push(cursor.ident().map_err(failed)?);
            if !cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
    }
    cursor.expect_keyword("FROM").map_err(failed)?;
    let name = cursor.ident().map_err(failed)?;
    let table = store.table(&name)?;
    let filter = filter(cursor, table).map_err(failed)?;
    cursor.finish().map_err(failed)?;

    let indices: Vec<usize> = if projection.is_empty() {
        (0..table.columns.len()).collect()
    } else {
        projection
            .iter()
            .map(|c| table.column_index(c))
            .collect::<Result<_, _>>()
            .map_err(failed)?
    };

    let columns = indices
        .iter()
        .map(|&i| Column::new(table.columns[i].clone()))
        .collect();
    let rows = table
        .rows
        .iter()
        .filter(|row| matches(row, &filter))
        .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
        .collect();
    Ok(RowSet::new(columns, rows))
}

fn mutate(cursor: &mut Cursor, store: &mut Store) -> ChainResult<()> {
    let failed = ChainError::TransactionFailed;
    if cursor.eat_keyword("INSERT") {
        insert(cursor, store)
    } else if cursor.eat_keyword("UPDATE") {
        update(cursor, store)
    } else if cursor.eat_keyword("DELETE") {
        delete(cursor, store)
    } else {
        Err(failed(format!("unsupported statement at {}", cursor.found())))
    }
}

fn insert(cursor: &mut Cursor, store: &mut Store) -> ChainResult<()> {
    let failed = ChainError::TransactionFailed;
    cursor.expect_keyword("INTO").map_err(failed)?;
    let name = cursor.ident().map_err(failed)?;
    let table = store.table_mut(&name)?;

    let targets: Vec<usize> = if cursor.eat(&TokenKind::LParen) {
        let mut targets = Vec::new();
        loop {
            let column = cursor.ident().map_err(failed)?;
            targets.push(table.column_index(&column).map_err(failed)?);
            if !cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        cursor.expect(&TokenKind::RParen).map_err(failed)?;
        targets
    } else {
        (0..table.columns.len()).collect()
    };

    cursor.expect_keyword("VALUES").map_err(failed)?;
    loop {
        cursor.expect(&TokenKind::LParen).map_err(failed)?;
        let mut values = Vec::new();
        loop {
            values.push(cursor.literal().map_err(failed)?);
            if !cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        cursor.expect(&TokenKind::RParen).map_err(failed)?;

        if values.len() != targets.len() {
            return Err(failed(format!(
                "{} values for {} columns",
                values.len(),
                targets.len()
            )));
        }
        let mut row = vec![Value::Null; table.columns.len()];
        for (idx, value) in targets.iter().zip(values) {
            row[*idx] = value;
        }
        table.rows.push(row);

        if !cursor.eat(&TokenKind::Comma) {
            break;
        }
    }
    cursor.finish().map_err(failed)
}

fn update(cursor: &mut Cursor, store: &mut Store) -> ChainResult<()> {
    let failed = ChainError::TransactionFailed;
    let name = cursor.ident().map_err(failed)?;
    let table = store.table_mut(&name)?;
    cursor.expect_keyword("SET").map_err(failed)?;

    let mut assignments = Vec::new();
    loop {
        let column = cursor.ident().map_err(failed)?;
        let idx = table.column_index(&column).map_err(failed)?;
        cursor.expect(&TokenKind::Symbol('=')).map_err(failed)?;
        assignments.push((idx, cursor.literal().map_err(failed)?));
        if !cursor.eat(&TokenKind::Comma) {
            break;
        }
    }
    let filter = filter(cursor, table).map_err(failed)?;
    cursor.finish().map_err(failed)?;

    for row in table.rows.iter_mut().filter(|row| matches(row, &filter)) {
        for (idx, value) in &assignments {
            row[*idx] = value.clone();
        }
    }
    Ok(())
}

fn delete(cursor: &mut Cursor, store: &mut Store) -> ChainResult<()> {
    let failed = ChainError::TransactionFailed;
    cursor.expect_keyword("FROM").map_err(failed)?;
    let name = cursor.ident().map_err(failed)?;
    let table = store.table_mut(&name)?;
    let filter = filter(cursor, table).map_err(failed)?;
    cursor.finish().map_err(failed)?;

    table.rows.retain(|row| !matches(row, &filter));
    Ok(())
}

/// Parse a create statement into its prefix and column names.
fn create(cursor: &mut Cursor) -> Result<(String, Vec<String>), String> {
    cursor.expect_keyword("CREATE")?;
    cursor.expect_keyword("TABLE")?;
    if cursor.eat_keyword("IF") {
        cursor.expect_keyword("NOT")?;
        cursor.expect_keyword("EXISTS")?;
    }
    let prefix = cursor.ident()?;
    cursor.expect(&TokenKind::LParen)?;

    let mut columns = Vec::new();
    loop {
        let first = cursor.ident()?;
        if !CONSTRAINT_KEYWORDS
            .iter()
            .any(|k| first.eq_ignore_ascii_case(k))
        {
            columns.push(first);
        }

        // Skip the rest of this definition, including nested parens.
        let mut depth = 0usize;
        loop {
            match cursor.peek() {
                None => return Err("unterminated column list".to_string()),
                Some(TokenKind::LParen) => depth += 1,
                Some(TokenKind::RParen) if depth == 0 => break,
                Some(TokenKind::RParen) => depth -= 1,
                Some(TokenKind::Comma) if depth == 0 => break,
                Some(_) => {}
            }
            cursor.pos += 1;
        }
        if !cursor.eat(&TokenKind::Comma) {
            break;
        }
    }
    cursor.expect(&TokenKind::RParen)?;
    cursor.finish()?;

    if columns.is_empty() {
        return Err("table must define at least one column".to_string());
    }
    Ok((prefix, columns))
}
