//! Delimited-file storage for token records
//!
//! The table carries one header row with [`TOKEN_COLUMNS`] (any order,
//! extra columns ignored) and one row per token.

use super::{InputError, InputResult, TokenRecord, Upos};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Columns every token table must carry
pub const TOKEN_COLUMNS: [&str; 6] = [
    "doc_id",
    "sentence_id",
    "token_id",
    "head_token_id",
    "lemma",
    "upos",
];

/// Read token records from any reader
pub fn read_tokens<R: Read>(reader: R) -> InputResult<Vec<TokenRecord>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut positions = [0usize; 6];
    for (slot, column) in positions.iter_mut().zip(TOKEN_COLUMNS.iter()) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
            .ok_or_else(|| InputError::MissingColumn(column.to_string()))?;
    }

    let mut tokens = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // Row numbers are 1-based and count the header
        let row = i + 2;
        tokens.push(parse_row(&record, &positions, row)?);
    }

    debug!("Read {} token records", tokens.len());
    Ok(tokens)
}

/// Read token records from a file
pub fn read_tokens_path(path: impl AsRef<Path>) -> InputResult<Vec<TokenRecord>> {
    read_tokens(File::open(path)?)
}

/// Write token records with the canonical header
pub fn write_tokens<W: Write>(writer: W, tokens: &[TokenRecord]) -> InputResult<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(TOKEN_COLUMNS)?;
    for token in tokens {
        wtr.write_record([
            token.doc_id.to_string(),
            token.sentence_id.to_string(),
            token.token_id.to_string(),
            token.head_token_id.to_string(),
            token.lemma.clone(),
            token.upos.as_str().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write token records to a file
pub fn write_tokens_path(path: impl AsRef<Path>, tokens: &[TokenRecord]) -> InputResult<()> {
    write_tokens(File::create(path)?, tokens)
}

fn parse_row(
    record: &StringRecord,
    positions: &[usize; 6],
    row: usize,
) -> InputResult<TokenRecord> {
    let raw = |i: usize| record.get(positions[i]).unwrap_or("");

    let tag = raw(5);
    let upos = Upos::from_str(tag).map_err(|_| InputError::UnknownTag {
        row,
        tag: tag.to_string(),
    })?;

    Ok(TokenRecord {
        doc_id: number(raw(0), TOKEN_COLUMNS[0], row)?,
        sentence_id: number(raw(1), TOKEN_COLUMNS[1], row)?,
        token_id: number(raw(2), TOKEN_COLUMNS[2], row)?,
        head_token_id: number(raw(3), TOKEN_COLUMNS[3], row)?,
        lemma: raw(4).to_string(),
        upos,
    })
}

fn number<T: FromStr>(value: &str, column: &str, row: usize) -> InputResult<T> {
    value.parse().map_err(|_| InputError::Malformed {
        row,
        column: column.to_string(),
        value: value.to_string(),
    })
}
