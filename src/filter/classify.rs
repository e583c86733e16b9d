use crate::domain::Severity;

/// Determine the severity of `line`, falling back to `previous` when the
/// line carries no label of its own. The fallback is what keeps multi-line
/// records together: every line of a traceback filters with the line that
/// introduced it.
///
/// Labels only count as standalone ` LABEL ` tokens. When several appear in
/// one line, the occurrence starting last wins.
pub fn severity_of_line(line: &str, previous: Severity) -> Severity {
    let mut current = previous;
    let mut latest: Option<usize> = None;
    for severity in Severity::ALL {
        if let Some(at) = line.rfind(severity.token()) {
            if latest.is_none_or(|seen| at > seen) {
                latest = Some(at);
                current = severity;
            }
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_token() {
        let line = "2013-09-27 18:15:04.062 12345 DEBUG nova.api [-] starting\n";
        assert_eq!(severity_of_line(line, Severity::None), Severity::Debug);
    }

    #[test]
    fn test_unlabelled_line_inherits_previous() {
        let line = "    File \"/opt/stack/nova/api.py\", line 42, in wrapped\n";
        assert_eq!(severity_of_line(line, Severity::Error), Severity::Error);
        assert_eq!(severity_of_line(line, Severity::None), Severity::None);
    }

    #[test]
    fn test_last_occurrence_wins() {
        let line = "x DEBUG retrying after ERROR from upstream\n";
        assert_eq!(severity_of_line(line, Severity::None), Severity::Error);

        let flipped = "x ERROR recovered, now DEBUG tracing\n";
        assert_eq!(severity_of_line(flipped, Severity::None), Severity::Debug);
    }

    #[test]
    fn test_token_requires_both_spaces() {
        // Label at line start has no leading space: no match.
        assert_eq!(
            severity_of_line("ERROR at start\n", Severity::Info),
            Severity::Info
        );
        // Punctuation-bounded labels do not count either.
        assert_eq!(
            severity_of_line("x [ERROR] bracketed\n", Severity::Info),
            Severity::Info
        );
        assert_eq!(
            severity_of_line("x ERROR: suffixed\n", Severity::Info),
            Severity::Info
        );
    }

    #[test]
    fn test_explicit_none_token_resets() {
        assert_eq!(
            severity_of_line("x NONE marker\n", Severity::Error),
            Severity::None
        );
    }
}
