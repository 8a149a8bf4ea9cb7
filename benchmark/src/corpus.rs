use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
};
use flate2::read::GzDecoder;
use crate::{fmt_open_err, path_str};

/*
 * Value corpus for string benchmarks.
 *
 * A gzip compressed text file holding one value per line. Lines end at
 * "\n", "\r\n" or a lone "\r". Trailing whitespace is stripped from each
 * value and blank lines are kept as empty values.
 */

#[derive(Debug)]
pub enum ReadError {
    Io(io::Error),
    Decode { line: usize },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "{}", e),
            ReadError::Decode { line } =>
                write!(f, "line {} is not valid utf-8", line),
        }
    }
}

impl std::error::Error for ReadError {}

pub fn from_reader(reader: impl Read) -> Result<Vec<String>, ReadError> {
    let chunks = BufReader::new(GzDecoder::new(reader)).split(b'\n');

    let mut values: Vec<String> = Vec::new();
    for chunk in chunks {
        let mut bytes = chunk.map_err(ReadError::Io)?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        let text = String::from_utf8(bytes)
            .map_err(|_| ReadError::Decode { line: values.len() + 1 })?;

        values.extend(text.split('\r').map(|value| value.trim_end().to_string()));
    }
    Ok(values)
}

pub fn from_path(path: &Path) -> Result<Vec<String>, String> {
    let file = File::open(path)
        .map_err(|e| fmt_open_err(e, path))?;

    from_reader(file)
        .map_err(|e| format!(
            "invalid values file {}: {}",
            path_str(path), e
        ))
}
