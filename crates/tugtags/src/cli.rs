//! One tagging run: collect files, tag them, write the result.
//!
//! Files are processed one at a time in input order. A file that cannot be
//! read or parsed is recorded in the bundle's failures and the run carries
//! on; only failures to assemble the file list or to write the output abort
//! the run.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use tugtags_core::output::write_tags;
use tugtags_core::{
    FrontEnd, OutputOptions, ParseError, ProgramInfo, Tag, TagBundle, TagOptions, Tagger,
    TagsError,
};
use tugtags_go::GoFrontEnd;

use crate::files::{collect_file_names, relative_to, FileListOptions};

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub files: FileListOptions,
    /// Output file; `None` writes to stdout.
    pub output: Option<PathBuf>,
    pub tag_relative: bool,
    /// Base directory for `tag_relative`. Defaults to the output file's
    /// directory, or the current directory when writing to stdout.
    pub base: Option<PathBuf>,
    pub tag_options: TagOptions,
    pub output_options: OutputOptions,
}

/// Header identity for this build.
pub fn program_info() -> ProgramInfo {
    ProgramInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        author: env!("CARGO_PKG_AUTHORS").to_string(),
        url: env!("CARGO_PKG_REPOSITORY").to_string(),
    }
}

/// Run a full pass and write the output.
///
/// Returns the bundle so the caller can report the files that were skipped.
pub fn run(config: &RunConfig) -> Result<TagBundle, TagsError> {
    if config.files.inputs.is_empty() && config.files.input_list.is_none() {
        return Err(TagsError::invalid_args("no file specified"));
    }

    let tagger = Tagger::new(GoFrontEnd::new(), config.tag_options);
    let files = collect_file_names(&config.files, tagger.front_end())?;
    let base = if config.tag_relative {
        Some(resolve_base(config)?)
    } else {
        None
    };

    let bundle = tag_files(&tagger, &files, base.as_deref());
    info!(
        files = files.len(),
        tags = bundle.tags.len(),
        failed = bundle.failed_files.len(),
        "tagging finished"
    );

    match &config.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_tags(&bundle.tags, &program_info(), &config.output_options, &mut out)?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_tags(&bundle.tags, &program_info(), &config.output_options, &mut out)?;
        }
    }
    Ok(bundle)
}

/// Tag every file in order, collecting failures instead of stopping.
///
/// With a `base`, each tag's file column is the path relative to it.
pub fn tag_files<F: FrontEnd>(
    tagger: &Tagger<F>,
    files: &[PathBuf],
    base: Option<&Path>,
) -> TagBundle {
    let mut bundle = TagBundle::default();
    for file in files {
        bundle.add(tag_file(tagger, file, base));
    }
    bundle
}

fn tag_file<F: FrontEnd>(
    tagger: &Tagger<F>,
    file: &Path,
    base: Option<&Path>,
) -> Result<Vec<Tag>, ParseError> {
    let path = file.to_string_lossy().into_owned();
    let source = fs::read_to_string(file).map_err(|e| ParseError::new(&path, e.to_string()))?;

    let display_path = match base {
        Some(base) => relative_to(base, file)
            .map_err(|e| ParseError::new(&path, e.to_string()))?
            .to_string_lossy()
            .into_owned(),
        None => path.clone(),
    };
    debug!(path = %path, display = %display_path, "tagging");
    tagger.tag_source(&path, &display_path, &source)
}

fn resolve_base(config: &RunConfig) -> Result<PathBuf, TagsError> {
    if let Some(base) = &config.base {
        return Ok(base.clone());
    }
    let from_output = config
        .output
        .as_deref()
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty());
    match from_output {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(std::env::current_dir()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tugtags_core::TagKind;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn tagger() -> Tagger<GoFrontEnd> {
        Tagger::new(GoFrontEnd::new(), TagOptions::default())
    }

    #[test]
    fn no_inputs_is_a_usage_error() {
        let err = run(&RunConfig::default()).unwrap_err();
        assert!(matches!(err, TagsError::InvalidArguments { .. }));
    }

    #[test]
    fn failures_are_collected_and_tagging_continues() {
        let dir = TempDir::new().unwrap();
        let good = write(dir.path(), "good.go", "package good\n\nfunc F() {}\n");
        let bad = write(dir.path(), "bad.go", "package bad\n\nfunc (\n");
        let missing = dir.path().join("missing.go");

        let bundle = tag_files(&tagger(), &[bad, missing, good], None);
        assert_eq!(bundle.failed_files.len(), 2);
        let kinds: Vec<TagKind> = bundle.tags.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TagKind::Package, TagKind::Function]);
    }

    #[test]
    fn relative_file_column() {
        let dir = TempDir::new().unwrap();
        let file = write(dir.path(), "a.go", "package a\n");
        let bundle = tag_files(&tagger(), &[file], Some(dir.path()));
        assert_eq!(bundle.tags[0].file, "a.go");
    }

    #[test]
    fn base_defaults_to_output_directory() {
        let config = RunConfig {
            output: Some(PathBuf::from("/work/tags")),
            tag_relative: true,
            ..RunConfig::default()
        };
        assert_eq!(resolve_base(&config).unwrap(), PathBuf::from("/work"));

        let config = RunConfig {
            output: Some(PathBuf::from("tags")),
            ..RunConfig::default()
        };
        assert_eq!(resolve_base(&config).unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn explicit_base_wins() {
        let config = RunConfig {
            output: Some(PathBuf::from("/work/tags")),
            base: Some(PathBuf::from("/src")),
            ..RunConfig::default()
        };
        assert_eq!(resolve_base(&config).unwrap(), PathBuf::from("/src"));
    }

    #[test]
    fn program_info_names_the_binary() {
        let info = program_info();
        assert_eq!(info.name, "tugtags");
        assert!(!info.version.is_empty());
    }
}
