use crate::config::AttributeSet;
use crate::error::{ImportError, Result};
use crate::models::Observation;
use crate::utils::constants::{
    DATE_TOKEN, DEFAULT_BUFFER_SIZE, HEADER_TOKEN, LATITUDE_TOKEN, LOCATION_CLASS_TOKEN,
    LONGITUDE_TOKEN, TAG_ID_TOKEN, TIME_TOKEN,
};
use crate::utils::coordinates::{parse_compass_coordinate, Axis};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Fields lifted from an ARGOS header line
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFields {
    pub tag_id: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location_class: Option<String>,
}

/// A fix that could not be converted; the scan carries on past it
#[derive(Debug)]
pub struct SkippedRecord {
    pub line_number: usize,
    pub tag_id: Option<String>,
    pub reason: ImportError,
}

#[derive(Debug)]
pub enum RecordOutcome {
    Parsed {
        line_number: usize,
        observation: Observation,
    },
    Skipped(SkippedRecord),
}

pub struct ArgosReader {
    header_token: String,
    attributes: AttributeSet,
}

impl ArgosReader {
    pub fn new() -> Self {
        Self {
            header_token: HEADER_TOKEN.to_string(),
            attributes: AttributeSet::Full,
        }
    }

    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_header_token(mut self, header_token: &str) -> Self {
        self.header_token = header_token.to_string();
        self
    }

    pub fn is_header_line(&self, line: &str) -> bool {
        line.contains(&self.header_token)
    }

    /// Open an ARGOS file and stream its records
    pub fn open(&self, path: &Path) -> Result<ArgosRecords<'_, BufReader<File>>> {
        let file = File::open(path)?;
        Ok(self.records(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)))
    }

    pub fn records<R: BufRead>(&self, reader: R) -> ArgosRecords<'_, R> {
        ArgosRecords {
            parser: self,
            reader,
            line_number: 0,
            buffer: Vec::new(),
        }
    }

    /// Read every record of a file into memory
    pub fn read_file(&self, path: &Path) -> Result<Vec<RecordOutcome>> {
        self.open(path)?.collect()
    }

    /// Split a header line into tag, date, time and location class tokens
    pub fn parse_header_line(&self, line: &str) -> Result<HeaderFields> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let tag_id = token(&tokens, TAG_ID_TOKEN, "tag ID")?.to_string();

        if !self.attributes.includes_details() {
            return Ok(HeaderFields {
                tag_id,
                date: None,
                time: None,
                location_class: None,
            });
        }

        Ok(HeaderFields {
            date: Some(token(&tokens, DATE_TOKEN, "date")?.to_string()),
            time: Some(token(&tokens, TIME_TOKEN, "time")?.to_string()),
            location_class: Some(token(&tokens, LOCATION_CLASS_TOKEN, "location class")?.to_string()),
            tag_id,
        })
    }

    /// Extract signed (latitude, longitude) from the line after a header
    pub fn parse_coordinate_line(&self, line: &str) -> Result<(f64, f64)> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let latitude = parse_compass_coordinate(token(&tokens, LATITUDE_TOKEN, "latitude")?, Axis::Latitude)?;
        let longitude =
            parse_compass_coordinate(token(&tokens, LONGITUDE_TOKEN, "longitude")?, Axis::Longitude)?;

        Ok((latitude, longitude))
    }

    /// Combine a header and its coordinate line into an observation
    pub fn parse_record(&self, header: &HeaderFields, coordinate_line: Option<&str>) -> Result<Observation> {
        let tag_id = header
            .tag_id
            .parse::<i64>()
            .map_err(|_| ImportError::InvalidTagId(header.tag_id.clone()))?;

        let coordinate_line = coordinate_line
            .ok_or_else(|| ImportError::MissingField("coordinate line after header".to_string()))?;
        let (latitude, longitude) = self.parse_coordinate_line(coordinate_line)?;

        let timestamp = match (&header.date, &header.time) {
            (Some(date), Some(time)) => Some(Observation::format_timestamp(date, time)),
            _ => None,
        };

        Observation::new(
            tag_id,
            latitude,
            longitude,
            header.location_class.clone(),
            timestamp,
        )
    }
}

impl Default for ArgosReader {
    fn default() -> Self {
        Self::new()
    }
}

fn token<'a>(tokens: &[&'a str], index: usize, name: &str) -> Result<&'a str> {
    tokens
        .get(index)
        .copied()
        .ok_or_else(|| ImportError::MissingField(format!("{} (token {})", name, index)))
}

/// Streaming iterator over the fixes of one ARGOS file.
///
/// Record-level failures surface as `RecordOutcome::Skipped`; only I/O
/// errors are yielded as `Err`.
pub struct ArgosRecords<'a, R> {
    parser: &'a ArgosReader,
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: BufRead> ArgosRecords<'_, R> {
    /// Next line without its terminator; None at end of input
    fn next_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let line = decode_line(&self.buffer);
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for ArgosRecords<'_, R> {
    type Item = Result<RecordOutcome>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            };

            if !self.parser.is_header_line(&line) {
                continue;
            }

            let header_line_number = self.line_number;

            // The line after a header always belongs to it, even if it is
            // another header.
            let coordinate_line = match self.next_line() {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };

            let parsed = self
                .parser
                .parse_header_line(&line)
                .and_then(|header| self.parser.parse_record(&header, coordinate_line.as_deref()));

            return Some(Ok(match parsed {
                Ok(observation) => RecordOutcome::Parsed {
                    line_number: header_line_number,
                    observation,
                },
                Err(reason) if !reason.is_record_level() => return Some(Err(reason)),
                Err(reason) => RecordOutcome::Skipped(SkippedRecord {
                    line_number: header_line_number,
                    tag_id: line.split_whitespace().next().map(str::to_string),
                    reason,
                }),
            }));
        }
    }
}

fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}
