use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

/// How a log file is stored on disk. Classification is pure; the open
/// happens separately in `LineReader::open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    PlainText,
    Gzip,
}

impl FileKind {
    pub fn of_path(path: &Path) -> FileKind {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => FileKind::Gzip,
            _ => FileKind::PlainText,
        }
    }
}

enum Source {
    PlainText(BufReader<File>),
    Gzip(BufReader<GzDecoder<File>>),
}

/// Reads a log file line by line, decompressing transparently.
///
/// Finite and forward-only; the file handle is released when the reader is
/// dropped. Lines keep their trailing newline so plain output can be passed
/// through byte-exact.
pub struct LineReader {
    source: Source,
    buf: Vec<u8>,
}

impl LineReader {
    pub fn open(path: &Path) -> io::Result<LineReader> {
        let file = File::open(path)?;
        let source = match FileKind::of_path(path) {
            FileKind::PlainText => Source::PlainText(BufReader::new(file)),
            FileKind::Gzip => Source::Gzip(BufReader::new(GzDecoder::new(file))),
        };
        Ok(LineReader {
            source,
            buf: Vec::with_capacity(256),
        })
    }

    /// Next line, or `None` at end of file.
    ///
    /// Invalid UTF-8 is replaced rather than raised; served logs routinely
    /// contain stray binary. I/O and decompression faults surface as `Err`.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        let read = match &mut self.source {
            Source::PlainText(reader) => reader.read_until(b'\n', &mut self.buf)?,
            Source::Gzip(reader) => reader.read_until(b'\n', &mut self.buf)?,
        };
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    #[test]
    fn test_file_kind_by_extension() {
        assert_eq!(FileKind::of_path(Path::new("a.txt")), FileKind::PlainText);
        assert_eq!(FileKind::of_path(Path::new("a.txt.gz")), FileKind::Gzip);
        assert_eq!(FileKind::of_path(Path::new("noext")), FileKind::PlainText);
        // Only the final extension decides.
        assert_eq!(FileKind::of_path(Path::new("a.gz.txt")), FileKind::PlainText);
    }

    #[test]
    fn test_reads_plain_lines_with_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        std::fs::write(&path, "first\nsecond\nlast without newline").unwrap();

        let mut reader = LineReader::open(&path).unwrap();
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("first\n"));
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("second\n"));
        assert_eq!(
            reader.next_line().unwrap().as_deref(),
            Some("last without newline")
        );
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_reads_gzip_transparently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt.gz");
        let mut encoder =
            GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"alpha\nbeta\n").unwrap();
        encoder.finish().unwrap();

        let mut reader = LineReader::open(&path).unwrap();
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("alpha\n"));
        assert_eq!(reader.next_line().unwrap().as_deref(), Some("beta\n"));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, b"ok \xff\xfe here\n").unwrap();

        let mut reader = LineReader::open(&path).unwrap();
        let line = reader.next_line().unwrap().unwrap();
        assert!(line.starts_with("ok "));
        assert!(line.contains('\u{FFFD}'));
    }

    #[test]
    fn test_corrupt_gzip_errors_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt.gz");
        std::fs::write(&path, b"this is not gzip data").unwrap();

        let mut reader = LineReader::open(&path).unwrap();
        assert!(reader.next_line().is_err());
    }
}
