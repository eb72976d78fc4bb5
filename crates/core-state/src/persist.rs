//! Line-oriented document persistence.
//!
//! A saved document is plain text: the document's own path on the first
//! line, the current buffer index on the second, then each buffer as a
//! `B<name>` line, its serialized elements one per line, and an `EOB`
//! terminator; a final `EOF` line closes the document. Lines starting with
//! `#` inside a buffer are comments; blank lines are ignored.
//!
//! Loading is atomic: nothing of a partially parsed document survives an
//! error.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use core_doc::{Buffer, Element, ParseError};
use thiserror::Error;
use tracing::info;

use crate::State;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("end of file before the document name line")]
    MissingFilename,
    #[error("end of file before the current buffer index")]
    MissingIndex,
    #[error("current buffer index {0:?} is not a number")]
    BadIndex(String),
    #[error("current buffer index {index} out of range for {buffers} buffer(s)")]
    IndexRange { index: usize, buffers: usize },
    #[error("end of file while reading buffer {name:?}")]
    UnterminatedBuffer { name: String },
    #[error("bad element line in buffer {name:?}: {source}")]
    Element { name: String, source: ParseError },
}

impl State {
    /// Write the document to `path` and mark every buffer clean. The
    /// recorded document name is written as-is, so a crash-save to an
    /// alternate path still points back at the real document.
    pub fn save_to(&mut self, path: &Path) -> io::Result<()> {
        let mut out = String::new();
        out.push_str(self.filename());
        out.push('\n');
        out.push_str(&self.current().to_string());
        out.push('\n');
        for buf in self.buffers() {
            out.push('B');
            out.push_str(buf.name());
            out.push('\n');
            for line in buf.serialize_elems() {
                out.push_str(&line);
                out.push('\n');
            }
            out.push_str("EOB\n");
        }
        out.push_str("EOF\n");

        let mut file = fs::File::create(path)?;
        file.write_all(out.as_bytes())?;
        for buf in self.buffers_mut() {
            buf.mark_clean();
        }
        info!(path = %path.display(), "document saved");
        Ok(())
    }

    /// Save to the document's recorded path.
    pub fn save(&mut self) -> io::Result<()> {
        let path = self.filename().to_string();
        self.save_to(Path::new(&path))
    }

    /// Load a document from `path`. Every structural problem is an error;
    /// a missing trailing `EOF` line is tolerated.
    pub fn load(path: &Path) -> Result<State, LoadError> {
        let text = fs::read_to_string(path)?;
        let mut lines = text.lines();

        let filename = lines.next().ok_or(LoadError::MissingFilename)?.to_string();
        let idx_line = lines.next().ok_or(LoadError::MissingIndex)?;
        let current: usize = idx_line
            .trim()
            .parse()
            .map_err(|_| LoadError::BadIndex(idx_line.to_string()))?;

        let mut bufs = Vec::new();
        while let Some(line) = lines.next() {
            if line.is_empty() {
                continue;
            }
            if line == "EOF" {
                break;
            }
            let Some(name) = line.strip_prefix('B') else {
                continue;
            };
            let mut elems = Vec::new();
            let mut terminated = false;
            for line in lines.by_ref() {
                if line == "EOB" {
                    terminated = true;
                    break;
                }
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let elem = Element::deserialize(line).map_err(|source| LoadError::Element {
                    name: name.to_string(),
                    source,
                })?;
                elems.push(elem);
            }
            if !terminated {
                return Err(LoadError::UnterminatedBuffer {
                    name: name.to_string(),
                });
            }
            bufs.push(Buffer::from_elems(name, elems));
        }

        if current >= bufs.len() {
            return Err(LoadError::IndexRange {
                index: current,
                buffers: bufs.len(),
            });
        }

        info!(path = %path.display(), buffers = bufs.len(), "document loaded");
        Ok(State::from_parts(filename, bufs, current))
    }
}
