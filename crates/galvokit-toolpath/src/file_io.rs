//! Toolpath file reading and writing
//!
//! Files are read through a buffered line reader and written through a
//! buffered writer. Handles are released when they go out of scope, on
//! success and on every error path.

use crate::gcode::{encode, DecodedToolpath, ToolpathDecoder};
use galvokit_core::{CodecError, ToolpathMode, Waypoint};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Buffer size for toolpath files (256 KB)
const IO_BUFFER_SIZE: usize = 256 * 1024;

fn io_error(path: &Path, err: std::io::Error) -> CodecError {
    CodecError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Read and decode a toolpath file
pub fn read_toolpath(path: impl AsRef<Path>) -> Result<DecodedToolpath, CodecError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let reader = BufReader::with_capacity(IO_BUFFER_SIZE, file);

    let mut decoder = ToolpathDecoder::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| io_error(path, e))?;
        decoder.feed_line(index + 1, &line)?;
    }

    let decoded = decoder.finish()?;
    tracing::debug!(
        "Read {} commands from {}",
        decoded.commands.len(),
        path.display()
    );
    Ok(decoded)
}

/// Encode waypoints and write them to a toolpath file, replacing it
pub fn write_toolpath(
    path: impl AsRef<Path>,
    waypoints: &[Waypoint],
    mode: ToolpathMode,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::with_capacity(IO_BUFFER_SIZE, file);

    writer
        .write_all(encode(waypoints, mode).as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| io_error(path, e))?;

    tracing::debug!("Wrote {} waypoints to {}", waypoints.len(), path.display());
    Ok(())
}
