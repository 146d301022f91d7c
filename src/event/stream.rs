use bytes::{Buf, Bytes};
use flate2::read::GzDecoder;
use std::io::{BufRead, BufReader, Lines};

/// Lazy line iterator over a gzip-compressed payload.
pub type GzipLines = Lines<BufReader<GzDecoder<bytes::buf::Reader<Bytes>>>>;

/// Wrap a fetched payload as a decompressed sequence of text lines. The
/// stream is finite, forward-only and non-restartable; a corrupt or
/// truncated payload surfaces as an `Err` item mid-iteration.
pub fn gzip_lines(payload: Bytes) -> GzipLines {
    BufReader::new(GzDecoder::new(payload.reader())).lines()
}
