//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use zotag_core::ProcessingOptions;

/// Tag Zotero library items with language-model suggestions.
///
/// Zotag walks the top-level items of a Zotero library, asks a language
/// model for 3-5 descriptive tags per item (constrained against a growing
/// controlled vocabulary), and writes the tags back.
#[derive(Parser, Debug)]
#[command(name = "zotag")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Fetch the item URL only when no PDF is attached
    #[arg(short = 'u', long)]
    pub url_fallback: bool,

    /// Always fetch the item URL content
    #[arg(short = 'U', long)]
    pub url_always: bool,

    /// Download and parse PDF attachments
    #[arg(short = 'p', long)]
    pub parse_pdf: bool,

    /// Path to the tag vocabulary file (one tag per line)
    #[arg(short = 't', long, value_name = "PATH")]
    pub tags_file: Option<PathBuf>,

    /// Limit the number of items processed
    #[arg(short = 'l', long, value_name = "N")]
    pub limit: Option<u32>,
}

impl Args {
    /// Converts the content-policy flags into [`ProcessingOptions`].
    #[must_use]
    pub fn processing_options(&self) -> ProcessingOptions {
        ProcessingOptions {
            url_fallback: self.url_fallback,
            url_always: self.url_always,
            parse_pdf: self.parse_pdf,
            tags_file: self.tags_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["zotag"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert!(!args.url_fallback);
        assert!(!args.url_always);
        assert!(!args.parse_pdf);
        assert!(args.tags_file.is_none());
        assert!(args.limit.is_none());
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["zotag", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["zotag", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_short_policy_flags() {
        let args = Args::try_parse_from(["zotag", "-u", "-p"]).unwrap();
        assert!(args.url_fallback);
        assert!(!args.url_always);
        assert!(args.parse_pdf);
    }

    #[test]
    fn test_cli_url_always_is_capital_u() {
        let args = Args::try_parse_from(["zotag", "-U"]).unwrap();
        assert!(args.url_always);
        assert!(!args.url_fallback);
    }

    #[test]
    fn test_cli_long_policy_flags() {
        let args =
            Args::try_parse_from(["zotag", "--url-fallback", "--url-always", "--parse-pdf"])
                .unwrap();
        assert!(args.url_fallback);
        assert!(args.url_always);
        assert!(args.parse_pdf);
    }

    #[test]
    fn test_cli_tags_file_path() {
        let args = Args::try_parse_from(["zotag", "-t", "tags.txt"]).unwrap();
        assert_eq!(args.tags_file, Some(PathBuf::from("tags.txt")));

        let args = Args::try_parse_from(["zotag", "--tags-file", "/tmp/vocab.txt"]).unwrap();
        assert_eq!(args.tags_file, Some(PathBuf::from("/tmp/vocab.txt")));
    }

    #[test]
    fn test_cli_limit_parses_int() {
        let args = Args::try_parse_from(["zotag", "-l", "25"]).unwrap();
        assert_eq!(args.limit, Some(25));
    }

    #[test]
    fn test_cli_limit_rejects_non_numeric() {
        let result = Args::try_parse_from(["zotag", "-l", "many"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let result = Args::try_parse_from(["zotag", "--invalid-flag"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let result = Args::try_parse_from(["zotag", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_processing_options_mirror_flags() {
        let args = Args::try_parse_from(["zotag", "-U", "-p", "-t", "tags.txt"]).unwrap();
        let options = args.processing_options();
        assert!(options.url_always);
        assert!(!options.url_fallback);
        assert!(options.parse_pdf);
        assert_eq!(options.tags_file, Some(PathBuf::from("tags.txt")));
    }
}
