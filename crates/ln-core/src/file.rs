//! Size/count rotated file sink.
//!
//! The sink writes to a fixed ring of `max_count` files whose paths come from
//! a template with `%g` standing for the ring index:
//!
//! ```text
//! /var/log/app/ln.%g.log  ->  ln.0.log, ln.1.log, ln.2.log
//! ```
//!
//! When the next line would push the active file past `max_bytes`, the sink
//! advances to `(index + 1) % max_count` and truncates that file, so the
//! oldest file is overwritten and disk use stays below
//! `max_count * max_bytes` (plus one oversized line). The index lives only in
//! memory: a new process starts again at index 0.
//!
//! Every line is flushed to the OS before `write` returns, so a crash loses
//! nothing that was already logged.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::LnError;
use crate::format::Format;
use crate::level::Level;
use crate::sink::Sink;

/// Position in the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationState {
    pub index: u32,
    pub bytes: u64,
}

/// Path of ring slot `index` for `template`.
///
/// `%g` is replaced by the index and `%%` yields a literal `%`. A template
/// without `%g` gets `.<index>` appended.
pub fn path_for(template: &str, index: u32) -> PathBuf {
    let mut out = String::with_capacity(template.len() + 4);
    let mut substituted = false;
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.peek() {
                Some(&'g') => {
                    chars.next();
                    out.push_str(&index.to_string());
                    substituted = true;
                    continue;
                }
                Some(&'%') => {
                    chars.next();
                    out.push('%');
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    if !substituted {
        out.push('.');
        out.push_str(&index.to_string());
    }
    PathBuf::from(out)
}

/// Ring of fixed-size log files.
#[derive(Debug)]
pub struct RotatingFileSink {
    template: String,
    max_bytes: u64,
    max_count: u32,
    state: RotationState,
    file: Option<BufWriter<File>>,
}

impl RotatingFileSink {
    /// Open slot 0 of the ring, truncating it.
    pub fn open(template: impl Into<String>, max_bytes: u64, max_count: u32) -> Result<Self, LnError> {
        let template = template.into();
        if max_bytes == 0 || max_count == 0 {
            return Err(LnError::Config(format!(
                "file sink needs max_bytes > 0 and max_count > 0 (got {max_bytes}, {max_count})"
            )));
        }
        let path = path_for(&template, 0);
        let file = open_truncated(&path).map_err(|e| LnError::init("file", e))?;
        Ok(Self { template, max_bytes, max_count, state: RotationState::default(), file: Some(file) })
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Path of the active ring slot.
    pub fn current_path(&self) -> PathBuf {
        path_for(&self.template, self.state.index)
    }

    fn rotate(&mut self) -> std::io::Result<()> {
        if let Some(mut old) = self.file.take() {
            // The old slot is finished; a failed flush loses only its tail.
            let _ = old.flush();
        }
        self.state.index = (self.state.index + 1) % self.max_count;
        self.state.bytes = 0;
        self.file = Some(open_truncated(&self.current_path())?);
        Ok(())
    }

    fn write_inner(&mut self, text: &str) -> std::io::Result<()> {
        let len = text.len() as u64;
        if self.state.bytes > 0 && self.state.bytes + len > self.max_bytes {
            self.rotate()?;
        }
        let file = match self.file.take() {
            Some(file) => file,
            None => {
                // A previous rotation could not open its slot; retry it.
                self.state.bytes = 0;
                open_truncated(&self.current_path())?
            }
        };
        let file = self.file.insert(file);
        file.write_all(text.as_bytes())?;
        file.flush()?;
        self.state.bytes += len;
        Ok(())
    }
}

impl Sink for RotatingFileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn format(&self) -> Format {
        Format::File
    }

    fn write(&mut self, _level: Level, text: &str) -> Result<(), LnError> {
        self.write_inner(text).map_err(|e| LnError::write("file", e))
    }

    fn flush(&mut self) -> Result<(), LnError> {
        match self.file.as_mut() {
            Some(file) => file.flush().map_err(|e| LnError::write("file", e)),
            None => Ok(()),
        }
    }
}

impl Drop for RotatingFileSink {
    fn drop(&mut self) {
        if let Some(file) = self.file.as_mut() {
            let _ = file.flush();
        }
    }
}

fn open_truncated(path: &Path) -> std::io::Result<BufWriter<File>> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let file = OpenOptions::new().create(true).write(true).truncate(true).open(path)?;
    Ok(BufWriter::new(file))
}
