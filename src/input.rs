//! Input line sources.

use fsmi_core::CoreError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

/// Where the line of symbols comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// First line of a file.
    File(PathBuf),
    /// One line typed at the terminal (or piped on stdin).
    Interactive,
}

impl InputSource {
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => InputSource::File(path),
            None => InputSource::Interactive,
        }
    }

    /// Reads one line, without its terminator.
    ///
    /// An empty file or end of input yields an empty line.
    pub fn read_line(&self) -> Result<String, CoreError> {
        match self {
            InputSource::File(path) => {
                let file = File::open(path).map_err(|source| CoreError::SourceNotFound {
                    path: path.clone(),
                    source,
                })?;
                let mut bytes = Vec::new();
                BufReader::new(file).read_until(b'\n', &mut bytes)?;
                // Undecodable bytes become U+FFFD symbols
                Ok(strip_terminator(String::from_utf8_lossy(&bytes).into_owned()))
            }
            InputSource::Interactive => {
                let mut rl = DefaultEditor::new().map_err(readline_error)?;
                match rl.readline("") {
                    Ok(line) => Ok(strip_terminator(line)),
                    Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(String::new()),
                    Err(e) => Err(readline_error(e)),
                }
            }
        }
    }
}

fn strip_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

fn readline_error(e: ReadlineError) -> CoreError {
    match e {
        ReadlineError::Io(e) => CoreError::Io(e),
        other => CoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            other.to_string(),
        )),
    }
}
