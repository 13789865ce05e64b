//! solrnav CLI Library
//!
//! Command-line interface components for querying and updating a Solr core.

use solrnav_core::SolrError;

pub mod commands;
pub mod config;
pub mod output;

pub use commands::*;
pub use config::*;
pub use output::*;

/// CLI version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check if running in CI environment
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Get the appropriate exit code for an error
pub fn exit_code_for_error(error: &SolrError) -> i32 {
    match error {
        SolrError::Validation { .. } | SolrError::Config(_) | SolrError::Url(_) => 2,
        SolrError::MultipleDocuments { .. } => 3,
        SolrError::Transport { .. } => 4,
        SolrError::HttpStatus { .. } => 5,
        SolrError::SolrReported { .. } => 6,
        SolrError::Decode { .. } => 7,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let validation_error = SolrError::validation("test");
        assert_eq!(exit_code_for_error(&validation_error), 2);

        let transport_error = SolrError::transport("connection refused");
        assert_eq!(exit_code_for_error(&transport_error), 4);

        let reported = SolrError::solr_reported(400, "undefined field");
        assert_eq!(exit_code_for_error(&reported), 6);

        let io_error: SolrError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert_eq!(exit_code_for_error(&io_error), 1);
    }
}
