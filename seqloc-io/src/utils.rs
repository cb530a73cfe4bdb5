use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

/// Get a reader for a submission file, decompressing transparently when
/// the path carries a `.gz` extension.
///
/// # Arguments
///
/// - path: path to the file to read
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let is_gzipped = path.extension().is_some_and(|ext| ext == "gz");
    let reader: Box<dyn Read> = if is_gzipped {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    Ok(BufReader::new(reader))
}
