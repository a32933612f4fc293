//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Download a single file over HTTP(S).
///
/// The file name comes from the server's Content-Disposition header, then the
/// URL path, then falls back to index.html, unless --output is given.
#[derive(Parser, Debug)]
#[command(name = "libdl")]
#[command(author, version, about)]
pub struct Args {
    /// URL to download
    pub url: String,

    /// Directory to save the file in (defaults to the current directory)
    #[arg(short = 'd', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Output file name, used verbatim
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Connect timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// Overall request deadline in seconds, body included (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: Option<u64>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.example.com/file.zip";

    #[test]
    fn test_cli_url_only_parses_with_defaults() {
        let args = Args::try_parse_from(["libdl", URL]).unwrap();
        assert_eq!(args.url, URL);
        assert!(args.dir.is_none());
        assert!(args.output.is_none());
        assert!(args.connect_timeout.is_none());
        assert!(args.timeout.is_none());
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_missing_url_rejected() {
        let result = Args::try_parse_from(["libdl"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_dir_and_output_flags() {
        let args = Args::try_parse_from(["libdl", URL, "-d", "/tmp/out", "-o", "name.bin"]).unwrap();
        assert_eq!(args.dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(args.output.as_deref(), Some("name.bin"));

        let args =
            Args::try_parse_from(["libdl", URL, "--dir", "out", "--output", "x.zip"]).unwrap();
        assert_eq!(args.dir, Some(PathBuf::from("out")));
        assert_eq!(args.output.as_deref(), Some("x.zip"));
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["libdl", URL, "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["libdl", URL, "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["libdl", URL, "--quiet"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_timeouts_in_range() {
        let args =
            Args::try_parse_from(["libdl", URL, "--connect-timeout", "5", "--timeout", "3600"])
                .unwrap();
        assert_eq!(args.connect_timeout, Some(5));
        assert_eq!(args.timeout, Some(3600));
    }

    #[test]
    fn test_cli_timeout_zero_rejected() {
        let err = Args::try_parse_from(["libdl", URL, "--timeout", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_connect_timeout_over_max_rejected() {
        let err = Args::try_parse_from(["libdl", URL, "--connect-timeout", "3601"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["libdl", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
