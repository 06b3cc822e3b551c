//! Chunk file staging and reassembly.
//!
//! Each completed `Task` is written to its own file under the download
//! directory, named after its `min_range` offset. Once every task for a
//! URL has landed, `reassemble` streams the chunk files back together in
//! range order into the final output file, deleting each chunk as it is
//! consumed.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{io_error, GetterError};

/// Write one task's result bytes to `<download_dir>/<min_range>`. A `/` in
/// the offset (never happens for a `u64`, but mirrors the historical
/// client's defensive path sanitizing) is replaced with `|`.
pub fn write_chunk(download_dir: &Path, min_range: u64, body: &[u8]) -> Result<(), GetterError> {
    let name = min_range.to_string().replace('/', "|");
    let path = download_dir.join(name);
    let mut file =
        File::create(&path).map_err(|e| io_error("write_chunk", path.to_str(), e))?;
    file.write_all(body)
        .map_err(|e| io_error("write_chunk", path.to_str(), e))
}

/// Derive the output file name for a URL: every `/` becomes `_`.
pub fn output_file_name(url: &str) -> String {
    url.replace('/', "_")
}

/// Concatenate chunk files `0, chunk_size, 2*chunk_size, ...` (`num_tasks`
/// of them) into `<download_dir>/<output_file_name(url)>`, in order,
/// deleting each chunk once copied. Stops at the first missing chunk,
/// leaving whatever was already written in place.
pub fn reassemble(
    download_dir: &Path,
    url: &str,
    chunk_size: u64,
    num_tasks: u32,
) -> Result<u64, GetterError> {
    let out_path = download_dir.join(output_file_name(url));
    let mut out = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&out_path)
        .map_err(|e| io_error("reassemble", out_path.to_str(), e))?;

    let mut total = 0u64;
    for i in 0..num_tasks {
        let offset = i as u64 * chunk_size;
        let chunk_path = chunk_path(download_dir, offset);
        let mut chunk = match File::open(&chunk_path) {
            Ok(f) => f,
            Err(_) => break,
        };
        let mut buf = Vec::new();
        chunk
            .read_to_end(&mut buf)
            .map_err(|e| io_error("reassemble", chunk_path.to_str(), e))?;
        out.write_all(&buf)
            .map_err(|e| io_error("reassemble", out_path.to_str(), e))?;
        total += buf.len() as u64;
        drop(chunk);
        let _ = fs::remove_file(&chunk_path);
    }
    Ok(total)
}

fn chunk_path(download_dir: &Path, offset: u64) -> PathBuf {
    download_dir.join(offset.to_string().replace('/', "|"))
}
