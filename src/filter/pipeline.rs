use std::path::PathBuf;

use tracing::warn;

use crate::domain::Severity;
use crate::filter::classify::severity_of_line;
use crate::filter::path::{self, ResolveError};
use crate::filter::reader::LineReader;
use crate::filter::render;

/// Everything the engine needs to answer one request. Built once by the
/// caller; the engine never looks at the outside world beyond it.
#[derive(Debug, Clone)]
pub struct FilterRequest {
    /// Root directory requested files are resolved against.
    pub root: PathBuf,
    /// Relative file name, used verbatim as the routable identifier.
    pub file: String,
    /// Minimum severity a line must reach to pass.
    pub min_level: Severity,
    /// Render HTML instead of passing lines through.
    pub html: bool,
}

/// Result shape of [`run`]: a fixed sentinel when resolution failed before
/// any streaming, or a lazy chunk stream. Callers must branch on the shape;
/// only the sentinel maps to an error status.
pub enum FilterOutcome {
    Denied(ResolveError),
    Stream(ChunkStream),
}

/// Resolve and open the requested file.
///
/// All resolution errors are reported here, before any output exists. Once
/// a `Stream` is returned the only remaining failure mode is a mid-stream
/// read fault, which truncates the stream without retracting anything.
pub fn run(request: &FilterRequest) -> FilterOutcome {
    let resolved = match path::resolve(&request.root, &request.file) {
        Ok(resolved) => resolved,
        Err(reason) => return FilterOutcome::Denied(reason),
    };
    let reader = match LineReader::open(&resolved) {
        Ok(reader) => reader,
        // Vanished between the existence check and the open.
        Err(_) => return FilterOutcome::Denied(ResolveError::NotFound),
    };
    FilterOutcome::Stream(ChunkStream::new(reader, request.min_level, request.html))
}

enum Stage {
    Preamble,
    Lines,
    Footer,
    Done,
}

/// Lazy, forward-only stream of output chunks.
///
/// One line is in flight at a time regardless of file size. The severity
/// accumulator lives here, so concurrent requests never share state, and
/// the stream is not restartable once exhausted. Dropping the stream closes
/// the underlying file, which is how an abandoned response releases its
/// handle.
pub struct ChunkStream {
    reader: Option<LineReader>,
    min_level: Severity,
    html: bool,
    last_severity: Severity,
    stage: Stage,
}

impl ChunkStream {
    fn new(reader: LineReader, min_level: Severity, html: bool) -> ChunkStream {
        let stage = if html { Stage::Preamble } else { Stage::Lines };
        ChunkStream {
            reader: Some(reader),
            min_level,
            html,
            last_severity: Severity::None,
            stage,
        }
    }

    /// Pull lines until one passes the threshold. Advances `stage` past
    /// `Lines` on end of file or on a read fault.
    fn next_passing_line(&mut self) -> Option<String> {
        let Some(reader) = self.reader.as_mut() else {
            self.stage = Stage::Done;
            return None;
        };
        loop {
            match reader.next_line() {
                Ok(Some(line)) => {
                    self.last_severity = severity_of_line(&line, self.last_severity);
                    if self.last_severity >= self.min_level {
                        return Some(line);
                    }
                }
                Ok(None) => {
                    self.reader = None;
                    self.stage = if self.html { Stage::Footer } else { Stage::Done };
                    return None;
                }
                Err(e) => {
                    warn!("read failed mid-stream, truncating output: {e}");
                    self.reader = None;
                    self.stage = Stage::Done;
                    return None;
                }
            }
        }
    }
}

impl Iterator for ChunkStream {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            match self.stage {
                Stage::Preamble => {
                    self.stage = Stage::Lines;
                    return Some(render::preamble().to_string());
                }
                Stage::Lines => match self.next_passing_line() {
                    Some(line) => {
                        return Some(if self.html {
                            render::render_html(&line, self.last_severity)
                        } else {
                            line
                        });
                    }
                    // Stage advanced to Footer or Done; loop to emit it.
                    None => {}
                },
                Stage::Footer => {
                    self.stage = Stage::Done;
                    return Some(render::footer().to_string());
                }
                Stage::Done => return None,
            }
        }
    }
}
