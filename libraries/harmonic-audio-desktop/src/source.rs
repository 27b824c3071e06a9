//! File decoding

use crate::error::{AudioError, Result};
use rodio::{Decoder, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

pub(crate) type FileSource = Decoder<BufReader<File>>;

/// Open and decode `path`, returning the source and its duration if known
pub(crate) fn open_source(path: &Path) -> Result<(FileSource, Option<Duration>)> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let duration = decoder.total_duration();
    Ok((decoder, duration))
}
