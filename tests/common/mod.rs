//! Shared test harness: an in-memory store and an in-process server.

#![allow(dead_code)]

use async_trait::async_trait;
use customer_product_api::{transport, QueryExecutor, ResourceRegistry, SqlValue, StoreFault};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: Vec<Map<String, JsonValue>>,
}

#[derive(Default)]
struct MemState {
    tables: HashMap<String, Table>,
    statements: Vec<String>,
}

/// A `QueryExecutor` that understands the four statement shapes the CRUD service emits.
///
/// Every statement is recorded, even when a fault is injected, so tests can assert that
/// validation failures never reach the store.
pub struct InMemoryExecutor {
    state: Mutex<MemState>,
    failing: AtomicBool,
}

impl InMemoryExecutor {
    /// A store holding empty `customer` and `product` tables.
    pub fn new() -> Self {
        let mut state = MemState::default();
        for table in ["customer", "product"] {
            state.tables.insert(table.to_string(), Table::default());
        }
        Self {
            state: Mutex::new(state),
            failing: AtomicBool::new(false),
        }
    }

    /// While set, every statement fails with a connection fault.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn statement_count(&self) -> usize {
        self.state.lock().unwrap().statements.len()
    }

    pub fn statements(&self) -> Vec<String> {
        self.state.lock().unwrap().statements.clone()
    }

    pub fn rows(&self, table: &str) -> Vec<JsonValue> {
        let state = self.state.lock().unwrap();
        state
            .tables
            .get(table)
            .map(|t| t.rows.iter().cloned().map(JsonValue::Object).collect())
            .unwrap_or_default()
    }

    fn apply(
        state: &mut MemState,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Vec<JsonValue>, StoreFault> {
        if sql.starts_with("SELECT ") {
            let table = table_mut(state, word_after(sql, " FROM ")?)?;
            return Ok(table.rows.iter().cloned().map(JsonValue::Object).collect());
        }

        if sql.starts_with("INSERT INTO ") {
            let table = table_mut(state, word_after(sql, "INSERT INTO ")?)?;
            let columns = split_list(between(sql, "(", ")")?);
            let placeholders = split_list(between(sql, "VALUES (", ")")?);
            if columns.len() != placeholders.len() {
                return Err(malformed(sql));
            }
            let mut row = Map::new();
            for (col, ph) in columns.iter().zip(placeholders.iter()) {
                row.insert(col.to_string(), bind(ph, params)?);
            }
            table.next_id += 1;
            row.insert("id".to_string(), JsonValue::from(table.next_id));
            table.rows.push(row.clone());
            return Ok(vec![JsonValue::Object(row)]);
        }

        if sql.starts_with("UPDATE ") {
            let table = table_mut(state, word_after(sql, "UPDATE ")?)?;
            let target = where_id(sql, params)?;
            // Resolve every value before touching the row so a bad value changes nothing.
            let mut changes = Vec::new();
            for assignment in split_list(between(sql, " SET ", " WHERE ")?) {
                let (col, ph) = assignment.split_once(" = ").ok_or_else(|| malformed(sql))?;
                changes.push((col.to_string(), bind(ph, params)?));
            }
            let Some(row) = table.rows.iter_mut().find(|r| row_id(r) == Some(target)) else {
                return Ok(Vec::new());
            };
            for (col, value) in changes {
                row.insert(col, value);
            }
            return Ok(vec![JsonValue::Object(row.clone())]);
        }

        if sql.starts_with("DELETE FROM ") {
            let table = table_mut(state, word_after(sql, "DELETE FROM ")?)?;
            let target = where_id(sql, params)?;
            return Ok(match table.rows.iter().position(|r| row_id(r) == Some(target)) {
                Some(idx) => vec![JsonValue::Object(table.rows.remove(idx))],
                None => Vec::new(),
            });
        }

        Err(malformed(sql))
    }
}

#[async_trait]
impl QueryExecutor for InMemoryExecutor {
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<JsonValue>, StoreFault> {
        let mut state = self.state.lock().unwrap();
        state.statements.push(sql.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreFault::Connection("injected fault".to_string()));
        }
        Self::apply(&mut state, sql, params)
    }

    async fn ping(&self) -> Result<(), StoreFault> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreFault::Connection("injected fault".to_string()));
        }
        Ok(())
    }
}

fn malformed(sql: &str) -> StoreFault {
    StoreFault::Statement(format!("syntax error in: {}", sql))
}

fn table_mut<'a>(state: &'a mut MemState, name: &str) -> Result<&'a mut Table, StoreFault> {
    state
        .tables
        .get_mut(name)
        .ok_or_else(|| StoreFault::Statement(format!("relation \"{}\" does not exist", name)))
}

fn word_after<'a>(sql: &'a str, keyword: &str) -> Result<&'a str, StoreFault> {
    let start = sql.find(keyword).ok_or_else(|| malformed(sql))? + keyword.len();
    sql[start..].split_whitespace().next().ok_or_else(|| malformed(sql))
}

fn between<'a>(s: &'a str, start: &str, end: &str) -> Result<&'a str, StoreFault> {
    let from = s.find(start).ok_or_else(|| malformed(s))? + start.len();
    let to = s[from..].find(end).ok_or_else(|| malformed(s))? + from;
    Ok(&s[from..to])
}

fn split_list(s: &str) -> Vec<&str> {
    s.split(',').map(str::trim).collect()
}

fn where_id(sql: &str, params: &[SqlValue]) -> Result<i64, StoreFault> {
    let clause = between(sql, " WHERE ", " RETURNING")?;
    let (_, ph) = clause.split_once(" = ").ok_or_else(|| malformed(sql))?;
    bind(ph, params)?
        .as_i64()
        .ok_or_else(|| StoreFault::Statement("id must be an integer".to_string()))
}

fn row_id(row: &Map<String, JsonValue>) -> Option<i64> {
    row.get("id").and_then(JsonValue::as_i64)
}

fn bind(placeholder: &str, params: &[SqlValue]) -> Result<JsonValue, StoreFault> {
    let placeholder = placeholder.trim();
    let (index, cast) = match placeholder.split_once("::") {
        Some((index, cast)) => (index, Some(cast)),
        None => (placeholder, None),
    };
    let position: usize = index
        .trim_start_matches('$')
        .parse()
        .map_err(|_| malformed(placeholder))?;
    let param = position
        .checked_sub(1)
        .and_then(|i| params.get(i))
        .ok_or_else(|| StoreFault::Statement(format!("missing parameter {}", index)))?;

    match (param, cast) {
        (SqlValue::Text(s), None) => Ok(JsonValue::String(s.clone())),
        (SqlValue::Text(s), Some("bigint")) => {
            s.trim().parse::<i64>().map(JsonValue::from).map_err(|_| {
                StoreFault::Statement(format!("invalid input syntax for type bigint: \"{}\"", s))
            })
        }
        (SqlValue::Text(s), Some("numeric")) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(JsonValue::Number)
            .ok_or_else(|| {
                StoreFault::Statement(format!("invalid input syntax for type numeric: \"{}\"", s))
            }),
        (_, Some(other)) => Err(StoreFault::Statement(format!("unsupported cast {}", other))),
    }
}

/// A running server bound to an ephemeral port, backed by an `InMemoryExecutor`.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub store: Arc<InMemoryExecutor>,
    server: JoinHandle<()>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server.abort();
    }
}

pub async fn spawn_app() -> TestApp {
    let store = Arc::new(InMemoryExecutor::new());
    let router = transport::http::create_router(&ResourceRegistry::standard(), store.clone());

    // Bind to an ephemeral port so tests can run in parallel.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        store,
        server,
    }
}
