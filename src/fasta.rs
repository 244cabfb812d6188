use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::SequenceError;
use crate::types::SequenceRecord;

/// Columns per line when writing FASTA bodies.
pub const FASTA_LINE_WIDTH: usize = 80;

/// Reads every record of a FASTA file, transparently decompressing `.gz`.
pub fn read_fasta_records<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>, SequenceError> {
    let path = path.as_ref();
    let f = File::open(path)?;

    // If the file ends with ".gz", wrap it in a MultiGzDecoder
    let is_gz = path.extension().map(|ext| ext == "gz").unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };

    parse_fasta(reader)
}

/// Parses FASTA text from any reader: each record is a `>` header line
/// followed by one or more sequence lines. Input with no record at all is
/// a `NoRecords` error; a record whose body fails validation aborts the
/// whole parse.
pub fn parse_fasta<R: BufRead>(mut reader: R) -> Result<Vec<SequenceRecord>, SequenceError> {
    let mut records = Vec::new();
    let mut header: Option<String> = None;
    let mut body = String::new();
    let mut line = String::new();
    let mut skipped_lines = 0usize;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix('>') {
            if let Some(h) = header.take() {
                records.push(record_from_parts(&h, &body)?);
            }
            header = Some(rest.to_string());
            body.clear();
        } else if header.is_some() {
            body.push_str(trimmed);
        } else if !trimmed.is_empty() {
            // content before the first header is not part of any record
            skipped_lines += 1;
        }
    }
    if let Some(h) = header.take() {
        records.push(record_from_parts(&h, &body)?);
    }

    if skipped_lines > 0 {
        log::warn!("skipped {} line(s) before the first FASTA header", skipped_lines);
    }
    if records.is_empty() {
        return Err(SequenceError::NoRecords);
    }
    Ok(records)
}

/// Splits a header line into identifier (first word) and description,
/// then normalizes and validates the body.
fn record_from_parts(header: &str, body: &str) -> Result<SequenceRecord, SequenceError> {
    let header = header.trim();
    let (id, description) = match header.split_once(char::is_whitespace) {
        Some((id, rest)) => (id, rest.trim()),
        None => (header, ""),
    };
    let id = (!id.is_empty()).then(|| id.to_string());
    let description = (!description.is_empty()).then(|| description.to_string());
    SequenceRecord::from_raw(id, description, body)
}

/// Loads the first record of a FASTA file.
///
/// Multi-record files are accepted; records past the first are skipped and
/// a warning says how many. Use [`read_fasta_records`] to get all of them.
pub fn load_sequence<P: AsRef<Path>>(path: P) -> Result<SequenceRecord, SequenceError> {
    let path = path.as_ref();
    let records = read_fasta_records(path)?;
    if records.len() > 1 {
        log::warn!(
            "{}: {} FASTA records found, analyzing the first only",
            path.display(),
            records.len()
        );
    }
    records.into_iter().next().ok_or(SequenceError::NoRecords)
}

/// Parses pasted text: FASTA-formatted when the first non-blank line starts
/// with `>`, raw bases otherwise. FASTA text follows the same first-record
/// policy as [`load_sequence`].
pub fn parse_input(text: &str) -> Result<SequenceRecord, SequenceError> {
    let looks_like_fasta = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .map(|l| l.trim_start().starts_with('>'))
        .unwrap_or(false);

    if looks_like_fasta {
        let records = parse_fasta(text.as_bytes())?;
        if records.len() > 1 {
            log::warn!(
                "{} FASTA records in pasted text, analyzing the first only",
                records.len()
            );
        }
        records.into_iter().next().ok_or(SequenceError::NoRecords)
    } else {
        SequenceRecord::from_raw(None, None, text)
    }
}

/// Formats one sequence as a FASTA record, wrapping the body at
/// [`FASTA_LINE_WIDTH`] columns.
pub fn format_fasta(header: &str, seq: &str) -> String {
    let mut out = String::with_capacity(header.len() + seq.len() + seq.len() / FASTA_LINE_WIDTH + 4);
    out.push('>');
    out.push_str(header);
    out.push('\n');
    for chunk in seq.as_bytes().chunks(FASTA_LINE_WIDTH) {
        out.push_str(&String::from_utf8_lossy(chunk));
        out.push('\n');
    }
    out
}
