//! Binary entry point for the tugtags CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Tag a tree, writing a sorted tags file next to it
//! tugtags -R -f tags .
//!
//! # Tag files listed on stdin, with qualified names and receiver usages
//! find . -name '*.go' | tugtags -L - --extra=+qr
//!
//! # JSON lines instead of ctags
//! tugtags --format json main.go
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, ValueEnum};

use tugtags::cli::{run, RunConfig};
use tugtags::files::FileListOptions;
use tugtags_core::error::{OutputErrorCode, TagsError};
use tugtags_core::{ExtraSet, FieldSet, OutputFormat, OutputOptions, TagBundle, TagOptions};

// ============================================================================
// CLI Structure
// ============================================================================

/// Generate ctags-compatible tag files for Go source code.
#[derive(Parser, Debug)]
#[command(
    name = "tugtags",
    version,
    about = "Generate ctags-compatible tag files for Go source code"
)]
struct Cli {
    /// Go source files, or directories with `--recurse`.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Read file names from FILE, one per line (`-` reads stdin).
    #[arg(short = 'L', long, value_name = "FILE")]
    input_list: Option<PathBuf>,

    /// Recurse into directories, collecting `*.go` files.
    #[arg(short = 'R', long)]
    recurse: bool,

    /// Exclude files and directories matching PATTERN (repeatable).
    ///
    /// Matched against the full path and the base name; `*` does not cross `/`.
    #[arg(long, value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Write tags to FILE (`-` writes to stdout).
    #[arg(short = 'f', long, value_name = "FILE", default_value = "-")]
    output: PathBuf,

    /// Sort output by the full tag line.
    #[arg(long, value_name = "BOOL", action = ArgAction::Set, default_value_t = true)]
    sort: bool,

    /// Do not report parse errors.
    #[arg(long)]
    silent: bool,

    /// Write file paths relative to `--base`.
    #[arg(long)]
    tag_relative: bool,

    /// Base directory for `--tag-relative` (default: the output file's
    /// directory, or the current directory when writing to stdout).
    #[arg(long, value_name = "DIR")]
    base: Option<PathBuf>,

    /// Extension fields: `+l` language, `+c` column.
    #[arg(long, value_name = "FLAGS", allow_hyphen_values = true)]
    fields: Option<String>,

    /// Extra tags: `+q` package-qualified names, `+r` receiver usages.
    #[arg(long, value_name = "FLAGS", allow_hyphen_values = true)]
    extra: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "ctags")]
    format: Format,

    /// Omit the `!_TAG_` header lines.
    #[arg(long)]
    no_header: bool,

    /// Log level for tracing output.
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Output format for tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Tab-separated ctags lines with a header (default).
    #[default]
    Ctags,
    /// One JSON object per tag.
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Ctags => OutputFormat::Ctags,
            Format::Json => OutputFormat::Json,
        }
    }
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.log_level);

    let silent = cli.silent;
    match execute(cli) {
        Ok(bundle) => {
            if !silent {
                report_failures(&bundle);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("tugtags: {}", err);
            ExitCode::from(OutputErrorCode::from(&err).code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn execute(cli: Cli) -> Result<TagBundle, TagsError> {
    let config = run_config(cli)?;
    run(&config)
}

/// Resolve parsed flags into a run configuration.
fn run_config(cli: Cli) -> Result<RunConfig, TagsError> {
    let fields = match &cli.fields {
        Some(flags) => flags.parse::<FieldSet>()?,
        None => FieldSet::default(),
    };
    let extra = match &cli.extra {
        Some(flags) => flags.parse::<ExtraSet>()?,
        None => ExtraSet::default(),
    };
    let output = if cli.output.as_os_str() == "-" {
        None
    } else {
        Some(cli.output)
    };

    Ok(RunConfig {
        files: FileListOptions {
            inputs: cli.files,
            input_list: cli.input_list,
            recurse: cli.recurse,
            exclude: cli.exclude,
        },
        output,
        tag_relative: cli.tag_relative,
        base: cli.base,
        tag_options: TagOptions { fields, extra },
        output_options: OutputOptions {
            format: cli.format.into(),
            sort: cli.sort,
            header: !cli.no_header,
        },
    })
}

fn report_failures(bundle: &TagBundle) {
    for err in &bundle.failed_files {
        eprintln!("parse error: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    mod cli_parsing {
        use super::*;

        #[test]
        fn defaults() {
            let cli = parse(&["tugtags", "main.go"]);
            assert_eq!(cli.files, vec![PathBuf::from("main.go")]);
            assert!(cli.sort);
            assert!(!cli.recurse);
            assert!(!cli.silent);
            assert_eq!(cli.output, PathBuf::from("-"));
            assert_eq!(cli.format, Format::Ctags);
        }

        #[test]
        fn short_flags() {
            let cli = parse(&["tugtags", "-R", "-L", "list.txt", "-f", "tags", "."]);
            assert!(cli.recurse);
            assert_eq!(cli.input_list, Some(PathBuf::from("list.txt")));
            assert_eq!(cli.output, PathBuf::from("tags"));
        }

        #[test]
        fn sort_takes_a_value() {
            assert!(!parse(&["tugtags", "--sort=false", "a.go"]).sort);
            assert!(parse(&["tugtags", "--sort", "true", "a.go"]).sort);
            assert!(Cli::try_parse_from(["tugtags", "--sort=maybe", "a.go"]).is_err());
        }

        #[test]
        fn repeated_excludes() {
            let cli = parse(&["tugtags", "--exclude", "*_test.go", "--exclude", "vendor", "."]);
            assert_eq!(cli.exclude, vec!["*_test.go", "vendor"]);
        }

        #[test]
        fn flag_strings_may_start_with_a_dash() {
            let cli = parse(&["tugtags", "--fields", "-l", "--extra", "+q-r", "a.go"]);
            assert_eq!(cli.fields.as_deref(), Some("-l"));
            assert_eq!(cli.extra.as_deref(), Some("+q-r"));
        }

        #[test]
        fn json_format() {
            let cli = parse(&["tugtags", "--format", "json", "--no-header", "a.go"]);
            assert_eq!(cli.format, Format::Json);
            assert!(cli.no_header);
        }
    }

    mod config {
        use super::*;

        #[test]
        fn stdout_is_no_output_path() {
            let config = run_config(parse(&["tugtags", "a.go"])).unwrap();
            assert_eq!(config.output, None);
            assert!(config.output_options.header);

            let config = run_config(parse(&["tugtags", "-f", "out/tags", "a.go"])).unwrap();
            assert_eq!(config.output, Some(PathBuf::from("out/tags")));
        }

        #[test]
        fn flags_build_tag_options() {
            let config =
                run_config(parse(&["tugtags", "--fields=+lc", "--extra=+qr", "a.go"])).unwrap();
            assert!(config.tag_options.fields.language);
            assert!(config.tag_options.fields.column);
            assert!(config.tag_options.extra.qualified);
            assert!(config.tag_options.extra.receivers);
        }

        #[test]
        fn unknown_flag_letter_is_invalid_arguments() {
            let err = run_config(parse(&["tugtags", "--extra=+z", "a.go"])).unwrap_err();
            assert_eq!(OutputErrorCode::from(&err), OutputErrorCode::InvalidArguments);
        }
    }
}
