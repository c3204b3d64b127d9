//! Record sources: JSON Lines and CSV.
//!
//! Sources are streaming iterators. Every input record yields one
//! [`SourceItem`] tagged with its line number; records that fail to parse
//! carry the error instead of being dropped.

use std::io::{BufRead, ErrorKind, Read};

use clap::ValueEnum;
use tracing::warn;

use linkscan_common::{LinkscanError, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One JSON object per line.
    Jsonl,
    /// Header row followed by data rows.
    Csv,
}

#[derive(Debug)]
pub struct SourceItem {
    /// 1-based line number in the input.
    pub line: u64,
    pub record: Result<Record, LinkscanError>,
}

impl SourceItem {
    fn new(line: u64, record: Result<Record, LinkscanError>) -> Self {
        if let Err(e) = &record {
            warn!("Line {}: {}", line, e);
        }
        Self { line, record }
    }
}

pub fn records<'a, R: BufRead + 'a>(
    reader: R,
    format: InputFormat,
) -> Box<dyn Iterator<Item = SourceItem> + 'a> {
    match format {
        InputFormat::Jsonl => Box::new(JsonlSource::new(reader)),
        InputFormat::Csv => Box::new(CsvSource::new(reader)),
    }
}

/// Blank lines are skipped but still counted. Lines that are not valid
/// UTF-8 are tagged and reading continues; only real I/O errors end the stream.
struct JsonlSource<R> {
    reader: R,
    buf: Vec<u8>,
    line: u64,
    done: bool,
}

impl<R: BufRead> JsonlSource<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for JsonlSource<R> {
    type Item = SourceItem;

    fn next(&mut self) -> Option<SourceItem> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    let raw = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf[..]);
                    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
                    let text = match std::str::from_utf8(raw) {
                        Ok(text) => text,
                        Err(e) => {
                            let err = LinkscanError::Parse(format!("invalid UTF-8: {e}"));
                            return Some(SourceItem::new(self.line, Err(err)));
                        }
                    };
                    if text.trim().is_empty() {
                        continue;
                    }
                    let record = serde_json::from_str::<serde_json::Value>(text)
                        .map_err(LinkscanError::from)
                        .and_then(Record::from_json);
                    return Some(SourceItem::new(self.line, record));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.done = true;
                    return Some(SourceItem::new(self.line + 1, Err(LinkscanError::Io(e))));
                }
            }
        }
        None
    }
}

struct CsvSource<R> {
    rdr: csv::Reader<R>,
    headers: Option<csv::StringRecord>,
    row: csv::StringRecord,
    done: bool,
}

impl<R: Read> CsvSource<R> {
    fn new(reader: R) -> Self {
        let rdr = csv::ReaderBuilder::new()
            .flexible(false)
            .trim(csv::Trim::Fields)
            .from_reader(reader);
        Self {
            rdr,
            headers: None,
            row: csv::StringRecord::new(),
            done: false,
        }
    }
}

impl<R: Read> Iterator for CsvSource<R> {
    type Item = SourceItem;

    fn next(&mut self) -> Option<SourceItem> {
        if self.done {
            return None;
        }
        if self.headers.is_none() {
            match self.rdr.headers() {
                Ok(h) => self.headers = Some(h.clone()),
                Err(e) => {
                    self.done = true;
                    let err = LinkscanError::Parse(format!("unreadable CSV header: {e}"));
                    return Some(SourceItem::new(1, Err(err)));
                }
            }
        }

        let line = self.rdr.position().line();
        match self.rdr.read_record(&mut self.row) {
            Ok(false) => {
                self.done = true;
                None
            }
            Ok(true) => {
                let headers = self.headers.as_ref()?;
                let record = headers
                    .iter()
                    .zip(self.row.iter())
                    .filter(|(_, value)| !value.is_empty())
                    .collect::<Record>();
                Some(SourceItem::new(line, Ok(record)))
            }
            Err(e) => {
                self.done = matches!(e.kind(), csv::ErrorKind::Io(_));
                Some(SourceItem::new(line, Err(LinkscanError::Parse(e.to_string()))))
            }
        }
    }
}
