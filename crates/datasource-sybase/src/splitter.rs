//! Statement splitting for Sybase Transact-SQL scripts
//!
//! Tokenizing is done by `sqlparser` with [`SybaseDialect`]; this module only
//! drops comment tokens and cuts the token stream at top-level semicolons.
//! Semicolons inside `BEGIN ... END` and `CASE ... END` stay in their
//! statement. Statement text is copied from the script as written, so
//! escapes, literals and operators are never rewritten.

use datasource_api::error::{Error, Result};
use sqlparser::dialect::Dialect;
use sqlparser::tokenizer::{Location, Token, TokenWithSpan, Tokenizer, Whitespace};

/// Statement terminator appended to every split statement
pub const STATEMENT_TERMINATOR: char = ';';

/// Sybase Transact-SQL lexical rules
///
/// `[name]` and `"name"` are delimited identifiers; `@var`, `@@global` and
/// `#temp` are plain identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SybaseDialect;

impl Dialect for SybaseDialect {
    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        ch == '"' || ch == '['
    }

    fn is_identifier_start(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch == '_' || ch == '#' || ch == '@'
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        ch.is_alphabetic() || ch.is_ascii_digit() || matches!(ch, '_' | '#' | '@' | '$')
    }
}

fn is_keyword(token: &Token, keyword: &str) -> bool {
    matches!(token, Token::Word(w) if w.quote_style.is_none() && w.value.eq_ignore_ascii_case(keyword))
}

fn is_trivia(token: &Token) -> bool {
    matches!(token, Token::Whitespace(_))
}

/// `BEGIN` opens a block unless it starts a transaction
fn opens_block(tokens: &[TokenWithSpan], begin_idx: usize) -> bool {
    let next = tokens[begin_idx + 1..]
        .iter()
        .map(|t| &t.token)
        .find(|t| !is_trivia(t));
    !matches!(next, Some(t) if is_keyword(t, "TRAN") || is_keyword(t, "TRANSACTION"))
}

/// Maps tokenizer locations (1-based line and char column) to byte offsets
struct SourceMap<'a> {
    sql: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> SourceMap<'a> {
    fn new(sql: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(sql.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self { sql, line_starts }
    }

    fn offset(&self, location: &Location) -> usize {
        let line = (location.line as usize).saturating_sub(1);
        let column = (location.column as usize).saturating_sub(1);
        let Some(&line_start) = self.line_starts.get(line) else {
            return self.sql.len();
        };
        self.sql[line_start..]
            .char_indices()
            .nth(column)
            .map_or(self.sql.len(), |(idx, _)| line_start + idx)
    }
}

fn flush(current: &mut String, statements: &mut Vec<String>) {
    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
    current.clear();
}

/// Remove comments and split a script into statements
///
/// Every returned statement ends with [`STATEMENT_TERMINATOR`]; it is
/// appended unconditionally. An empty or comment-only script yields an
/// empty vector.
pub fn split_and_remove_comment(sql: &str) -> Result<Vec<String>> {
    let dialect = SybaseDialect;
    let tokens = Tokenizer::new(&dialect, sql)
        .tokenize_with_location()
        .map_err(|e| Error::parse(format!("Failed to tokenize SQL: {}", e)))?;

    let source = SourceMap::new(sql);
    let starts: Vec<usize> = tokens.iter().map(|t| source.offset(&t.span.start)).collect();

    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;

    for (idx, token) in tokens.iter().enumerate() {
        let end = starts.get(idx + 1).copied().unwrap_or(sql.len());
        let text = sql.get(starts[idx]..end).unwrap_or_default();

        match &token.token {
            Token::EOF => {}
            Token::Whitespace(Whitespace::SingleLineComment { comment, .. }) => {
                if comment.ends_with('\n') {
                    current.push('\n');
                }
            }
            Token::Whitespace(Whitespace::MultiLineComment(_)) => {
                if !current.ends_with(char::is_whitespace) {
                    current.push(' ');
                }
            }
            Token::SemiColon if depth == 0 => flush(&mut current, &mut statements),
            t => {
                if is_keyword(t, "CASE") || (is_keyword(t, "BEGIN") && opens_block(&tokens, idx)) {
                    depth += 1;
                } else if is_keyword(t, "END") {
                    depth = depth.saturating_sub(1);
                }
                current.push_str(text);
            }
        }
    }
    flush(&mut current, &mut statements);

    tracing::debug!(statements = statements.len(), "Split Sybase SQL script");

    Ok(statements
        .into_iter()
        .map(|mut statement| {
            statement.push(STATEMENT_TERMINATOR);
            statement
        })
        .collect())
}
