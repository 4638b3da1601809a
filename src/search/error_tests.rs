//! Unit tests for search error types

#[cfg(test)]
mod tests {
    use crate::search::error::{ProcessReport, SearchError};
    use std::error::Error;

    #[test]
    fn test_provider_error() {
        let error = SearchError::Provider("rg: command not found".to_string());
        assert_eq!(
            error.to_string(),
            "Candidate listing failed: rg: command not found"
        );
    }

    #[test]
    fn test_matcher_spawn_error_has_source() {
        let error = SearchError::MatcherSpawn {
            program: "fzf".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };

        assert!(error.to_string().contains("Failed to start matcher 'fzf'"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_matcher_exit_carries_both_diagnostics() {
        let error = SearchError::MatcherExit {
            filter: ProcessReport::new("fzf", Some(2), b"unknown option\n"),
            lister: ProcessReport::new("git", Some(128), b"fatal: not a git repository"),
        };

        let display = error.to_string();
        assert!(display.contains("fzf exited with status 2"));
        assert!(display.contains("(stderr: unknown option)"));
        assert!(display.contains("git exited with status 128"));
        assert!(display.contains("fatal: not a git repository"));
    }

    #[test]
    fn test_process_report_signal_and_empty_stderr() {
        let report = ProcessReport::new("rg", None, b"   ");
        assert_eq!(report.to_string(), "rg was terminated by a signal");
    }

    #[test]
    fn test_pipe_and_malformed_display() {
        let pipe = SearchError::Pipe("listing stdout was not captured".to_string());
        assert!(pipe.to_string().starts_with("Failed to connect listing to matcher"));

        let malformed = SearchError::Malformed("record 3 is not valid UTF-8".to_string());
        assert_eq!(
            malformed.to_string(),
            "Malformed process output: record 3 is not valid UTF-8"
        );
    }

    #[test]
    fn test_error_debug() {
        let error = SearchError::Worker("cancelled".to_string());
        let debug = format!("{error:?}");
        assert!(debug.contains("Worker"));
    }
}
