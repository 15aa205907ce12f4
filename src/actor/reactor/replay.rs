//! Recording and replaying event streams as JSON lines.
//!
//! Query events carry response channels and are skipped on both sides; a
//! replayed session reproduces mutations, not observations.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use tracing::warn;

use crate::actor::reactor::{Event, Sender};

pub struct Record {
    out: BufWriter<File>,
}

impl Record {
    pub fn create(path: &Path) -> anyhow::Result<Record> {
        let file = File::create(path)
            .with_context(|| format!("creating event log at {}", path.display()))?;
        Ok(Record { out: BufWriter::new(file) })
    }

    pub fn log(&mut self, event: &Event) -> anyhow::Result<()> {
        if matches!(event, Event::Query(_)) {
            return Ok(());
        }
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Feeds every event in the log into the reactor, skipping lines that no
/// longer parse. Returns how many events were sent.
pub fn replay(path: &Path, tx: &Sender) -> anyhow::Result<usize> {
    let file =
        File::open(path).with_context(|| format!("opening event log at {}", path.display()))?;
    let mut sent = 0;
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Event>(&line) {
            Ok(event) => {
                tx.send(event);
                sent += 1;
            }
            Err(err) => warn!(line = number + 1, %err, "skipping unparsable event"),
        }
    }
    Ok(sent)
}
