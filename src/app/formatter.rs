use crate::app::models::{FileEntry, FileOutcome, RunResult};
use std::fs;
use std::io::{self, ErrorKind, Write};

/// Streams scanned entries into the output document.
///
/// Each entry becomes a `FILE: <relative-path>` header followed by the file's
/// content with line endings normalized to LF and a single blank separator
/// line. A file that cannot be read keeps its header and gets an inline error
/// note instead of content; only output-side I/O errors abort the run.
pub struct OutputWriter<W: Write> {
    out: W,
    max_bytes: u64,
    files_written: usize,
}

impl<W: Write> OutputWriter<W> {
    pub fn new(out: W, max_bytes: u64) -> Self {
        Self {
            out,
            max_bytes,
            files_written: 0,
        }
    }

    pub fn write_entry(&mut self, entry: &FileEntry) -> io::Result<FileOutcome> {
        // Size is checked at stat time; the content is read afterwards, so a
        // file that grows in between is emitted at its new size.
        let meta = match fs::metadata(&entry.path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                // Vanished between listing and stat. Nothing left to report.
                log::debug!("Skipping vanished file {}", entry.relative_path);
                return Ok(FileOutcome::Skipped);
            }
            Err(err) => return self.write_error_note(entry, &err),
        };
        if self.max_bytes > 0 && meta.len() > self.max_bytes {
            log::debug!(
                "Skipping {} ({} bytes over limit)",
                entry.relative_path,
                meta.len() - self.max_bytes
            );
            return Ok(FileOutcome::Skipped);
        }

        match fs::read(&entry.path) {
            Ok(bytes) => {
                let content = normalize_line_endings(&String::from_utf8_lossy(&bytes));
                write!(self.out, "FILE: {}\n{}\n", entry.relative_path, content)?;
                self.files_written += 1;
                Ok(FileOutcome::Written)
            }
            Err(err) => self.write_error_note(entry, &err),
        }
    }

    fn write_error_note(&mut self, entry: &FileEntry, err: &io::Error) -> io::Result<FileOutcome> {
        log::warn!("Cannot read {}: {}", entry.relative_path, err);
        write!(
            self.out,
            "FILE: {}\n[Skipped due to read error: {}]\n\n",
            entry.relative_path, err
        )?;
        Ok(FileOutcome::Failed)
    }

    pub fn finish(mut self) -> io::Result<RunResult> {
        self.out.flush()?;
        Ok(RunResult {
            files_written: self.files_written,
        })
    }
}

/// Collapses CRLF and bare CR terminators to a single LF each. Content with
/// no trailing newline passes through unchanged.
fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}
