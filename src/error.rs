use crate::parser::error::ParseError;
use std::io;
use thiserror::Error;

/// Top-level failures of one generator run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to scan {path}: {source}")]
    Scan {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// A formatted diagnostic: the message plus the file (and byte offset, for
/// parse errors) it refers to.
#[derive(Debug, Clone)]
pub struct Report {
    msg: String,
    path: Option<String>,
    offset: Option<usize>,
}

impl Report {
    pub fn new(msg: String, path: Option<String>, offset: Option<usize>) -> Self {
        Self { msg, path, offset }
    }
}

impl From<&Error> for Report {
    fn from(err: &Error) -> Self {
        match err {
            Error::Scan { path, source } => {
                Report::new(source.to_string(), Some(path.clone()), None)
            }
            Error::Parse { path, source } => {
                Report::new(source.to_string(), Some(path.clone()), source.offset())
            }
            Error::Write { path, source } => {
                Report::new(source.to_string(), Some(path.clone()), None)
            }
        }
    }
}

pub fn report(report: &Report) {
    eprintln!("\x1b[31mError\x1b[0m: {}", report.msg);
    if let Some(path) = &report.path {
        if let Some(offset) = report.offset {
            eprintln!(" --> {} (byte offset {})", path, offset);
        } else {
            eprintln!(" --> {}", path);
        }
    }
}
