use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;
use url::Url;

use crate::error::{BenchError, BenchResult};
use crate::request::RequestDescriptor;

/// Reads a URL list file, one URL per line.
pub fn load_requests(path: impl AsRef<Path>) -> BenchResult<Vec<RequestDescriptor>> {
    let path = path.as_ref();
    let read_err = |source| BenchError::ReadInput {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    parse_requests(BufReader::new(file)).map_err(read_err)
}

/// Parses URL lines from any buffered source.
///
/// Blank lines are skipped and a last line without a trailing newline is
/// kept. Lines that are not absolute URLs are kept too; they fail at
/// request time and show up in the fail count. Invalid UTF-8 is replaced
/// rather than rejected, so only real I/O errors abort the load.
pub fn parse_requests<R: BufRead>(mut reader: R) -> std::io::Result<Vec<RequestDescriptor>> {
    let mut requests = Vec::new();
    let mut buf = Vec::new();
    let mut index = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        index += 1;
        let line = String::from_utf8_lossy(&buf);
        let url = line.trim();
        if url.is_empty() {
            continue;
        }
        if let Err(err) = Url::parse(url) {
            warn!(line = index, url, "unparseable url kept in workload: {}", err);
        }
        requests.push(RequestDescriptor::new(url));
    }
    Ok(requests)
}
