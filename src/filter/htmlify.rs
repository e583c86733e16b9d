use std::io::{self, BufRead, Write};

use crate::domain::Severity;
use crate::filter::classify::severity_of_line;
use crate::filter::render;

/// Render log text from `input` as a complete HTML document on `output`.
///
/// The piped-input twin of the HTTP endpoint: no filtering, every line is
/// rendered. Lets operators turn captured console output into something
/// linkable without standing up the server.
pub fn htmlify<R: BufRead, W: Write>(input: R, mut output: W) -> io::Result<()> {
    output.write_all(render::preamble().as_bytes())?;
    let mut severity = Severity::None;
    for line in input.lines() {
        let line = line?;
        severity = severity_of_line(&line, severity);
        output.write_all(render::render_html(&line, severity).as_bytes())?;
    }
    output.write_all(render::footer().as_bytes())?;
    output.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_htmlify_wraps_document() {
        let input = "x INFO start\nx ERROR boom\ncontinuation\n";
        let mut out = Vec::new();
        htmlify(input.as_bytes(), &mut out).unwrap();

        let html = String::from_utf8(out).unwrap();
        assert!(html.starts_with("<html>"));
        assert!(html.ends_with("</pre></body></html>\n"));
        assert!(html.contains("<span class='INFO'>x INFO start</span>"));
        // Sticky severity carries into the continuation line.
        assert!(html.contains("<span class='ERROR'>continuation</span>"));
    }
}
