use std::borrow::Cow;
use std::sync::LazyLock;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;

use crate::domain::Severity;

/// Characters that cannot appear verbatim in an anchor id or fragment href.
const ANCHOR: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'&')
    .add(b'#')
    .add(b'%');

/// Leading `YYYY-MM-DD HH:MM:SS[.frac]` timestamp, as emitted by the served
/// log format. Matched against already-escaped text, which leaves digits,
/// dashes and colons untouched.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(?:\.\d+)?) ")
        .expect("timestamp pattern compiles")
});

/// Document opening for HTML output. The stylesheet carries one class per
/// severity so a client can color or collapse lines by level.
pub fn preamble() -> &'static str {
    "<html>\n\
     <head>\n\
     <style>\n\
     a {color: #000; text-decoration: none}\n\
     a:hover {text-decoration: underline}\n\
     .DEBUG, .DEBUG a {color: #888}\n\
     .INFO, .INFO a {color: #006}\n\
     .AUDIT, .AUDIT a {color: #562}\n\
     .TRACE, .TRACE a {color: #c60}\n\
     .WARNING, .WARNING a {color: #D89100; font-weight: bold}\n\
     .ERROR, .ERROR a {color: #c00; font-weight: bold}\n\
     </style>\n\
     </head>\n\
     <body>\n\
     <pre>\n"
}

/// Document closing, emitted once after the last line chunk.
pub fn footer() -> &'static str {
    "</pre></body></html>\n"
}

/// Escape text for inclusion in the HTML stream. Served logs routinely
/// contain dumped XML; unescaped it would render as invisible markup.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Render one line as HTML: escaped, deep-linkable when it starts with a
/// timestamp, and severity-tagged unless the severity is still `None`.
/// Infallible; anything unrenderable has already been replaced upstream.
pub fn render_html(line: &str, severity: Severity) -> String {
    let content = line.trim_end_matches(['\n', '\r']);
    let escaped = escape_html(content);
    let linked = link_timestamp(&escaped);
    match severity {
        Severity::None => format!("{linked}\n"),
        tagged => format!("<span class='{tagged}'>{linked}</span>\n"),
    }
}

/// Wrap a leading timestamp in a named self-referencing anchor so operators
/// can hand out links straight to a line.
fn link_timestamp(line: &str) -> Cow<'_, str> {
    let Some(caps) = TIMESTAMP.captures(line) else {
        return Cow::Borrowed(line);
    };
    let (Some(whole), Some(stamp)) = (caps.get(0), caps.get(1)) else {
        return Cow::Borrowed(line);
    };
    let rest = &line[whole.end()..];
    let stamp = stamp.as_str();
    let id = utf8_percent_encode(stamp, ANCHOR);
    Cow::Owned(format!(
        "<a name='{id}' class='date' href='#{id}'>{stamp}</a> {rest}"
    ))
}
