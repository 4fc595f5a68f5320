use crate::error::Result;
use crate::interfaces::batch::{Outcome, Status};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct OutcomeRecord<'a> {
    row: usize,
    r#type: &'a str,
    status: &'a str,
    reference: &'a str,
    detail: &'a str,
}

/// Writes batch outcomes as CSV with a `row,type,status,reference,detail` header.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_outcome(&mut self, outcome: &Outcome) -> Result<()> {
        let status = match outcome.status {
            Status::Ok => "ok",
            Status::Error => "error",
        };
        self.writer.serialize(OutcomeRecord {
            row: outcome.row,
            r#type: outcome.kind,
            status,
            reference: outcome.reference.as_deref().unwrap_or(""),
            detail: &outcome.detail,
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
