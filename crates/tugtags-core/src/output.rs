//! Output assembly: header lines, global ordering, and rendering.
//!
//! ## Ordering
//!
//! When sorting is enabled the sort key is the **entire ctags line**, compared
//! bytewise. Consumers binary-search a sorted tags file directly on its
//! content, so the key must be exactly what they search. Header lines take
//! part in the sort and land first, since `!` orders before identifier bytes.
//!
//! ## Formats
//!
//! - [`OutputFormat::Ctags`]: header lines (optional) then one tag line each
//! - [`OutputFormat::Json`]: one JSON object per tag, no header, in the same
//!   order the ctags lines would have

use std::io::{self, Write};

use crate::tag::Tag;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Ctags,
    Json,
}

/// How the assembled output is ordered and decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub sort: bool,
    /// Emit `!_TAG_` header lines (ctags format only).
    pub header: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            format: OutputFormat::Ctags,
            sort: true,
            header: true,
        }
    }
}

/// Identity of the program, written into the header lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub name: String,
    pub version: String,
    pub author: String,
    pub url: String,
}

/// The `!_TAG_` header lines.
pub fn header_lines(info: &ProgramInfo, sorted: bool) -> Vec<String> {
    vec![
        "!_TAG_FILE_FORMAT\t2".to_string(),
        format!(
            "!_TAG_FILE_SORTED\t{}\t/0=unsorted, 1=sorted/",
            u8::from(sorted)
        ),
        format!("!_TAG_PROGRAM_AUTHOR\t{}", info.author),
        format!("!_TAG_PROGRAM_NAME\t{}", info.name),
        format!("!_TAG_PROGRAM_URL\t{}", info.url),
        format!("!_TAG_PROGRAM_VERSION\t{}", info.version),
    ]
}

/// Assemble ctags output lines, headers included when enabled.
pub fn ctags_lines(tags: &[Tag], info: &ProgramInfo, options: &OutputOptions) -> Vec<String> {
    let mut lines = if options.header {
        header_lines(info, options.sort)
    } else {
        Vec::new()
    };
    lines.extend(tags.iter().map(Tag::to_string));
    if options.sort {
        lines.sort();
    }
    lines
}

/// Tags in output order.
pub fn ordered_tags<'a>(tags: &'a [Tag], sort: bool) -> Vec<&'a Tag> {
    if !sort {
        return tags.iter().collect();
    }
    let mut keyed: Vec<(String, &Tag)> = tags.iter().map(|tag| (tag.to_string(), tag)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, tag)| tag).collect()
}

/// Write the assembled output, one newline-terminated line per record.
pub fn write_tags<W: Write>(
    tags: &[Tag],
    info: &ProgramInfo,
    options: &OutputOptions,
    out: &mut W,
) -> io::Result<()> {
    match options.format {
        OutputFormat::Ctags => {
            for line in ctags_lines(tags, info, options) {
                writeln!(out, "{}", line)?;
            }
        }
        OutputFormat::Json => {
            for tag in ordered_tags(tags, options.sort) {
                serde_json::to_writer(&mut *out, tag).map_err(io::Error::other)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{Position, TagField, TagKind};

    fn info() -> ProgramInfo {
        ProgramInfo {
            name: "tugtags".to_string(),
            version: "0.1.0".to_string(),
            author: "Ken Kocienda".to_string(),
            url: "https://github.com/tugtool/tugtool".to_string(),
        }
    }

    fn tags() -> Vec<Tag> {
        vec![
            Tag::new("main", "b.go", Position::line(1), TagKind::Package),
            Tag::new("Zed", "a.go", Position::line(4), TagKind::Function)
                .with(TagField::Access, "public")
                .with(TagField::Signature, "()"),
            Tag::new("Alpha", "a.go", Position::line(7), TagKind::Variable)
                .with(TagField::Access, "public"),
        ]
    }

    #[test]
    fn header_reflects_sort_flag() {
        let header = header_lines(&info(), true);
        assert_eq!(header.len(), 6);
        assert_eq!(header[0], "!_TAG_FILE_FORMAT\t2");
        assert_eq!(header[1], "!_TAG_FILE_SORTED\t1\t/0=unsorted, 1=sorted/");
        assert_eq!(header[3], "!_TAG_PROGRAM_NAME\ttugtags");
        assert_eq!(header[5], "!_TAG_PROGRAM_VERSION\t0.1.0");
        assert!(header_lines(&info(), false)[1].starts_with("!_TAG_FILE_SORTED\t0"));
    }

    #[test]
    fn sorted_output_orders_full_lines() {
        let lines = ctags_lines(&tags(), &info(), &OutputOptions::default());
        assert!(lines[..6].iter().all(|l| l.starts_with("!_TAG_")));
        assert!(lines[6].starts_with("Alpha\t"));
        assert!(lines[7].starts_with("Zed\t"));
        assert!(lines[8].starts_with("main\t"));
    }

    #[test]
    fn unsorted_output_keeps_input_order() {
        let options = OutputOptions {
            sort: false,
            header: false,
            ..OutputOptions::default()
        };
        let lines = ctags_lines(&tags(), &info(), &options);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("main\t"));
        assert!(lines[2].starts_with("Alpha\t"));
    }

    #[test]
    fn sorting_twice_is_stable() {
        let once = ctags_lines(&tags(), &info(), &OutputOptions::default());
        let mut twice = once.clone();
        twice.sort();
        assert_eq!(once, twice);
    }

    #[test]
    fn same_name_sorts_by_rest_of_line() {
        let tags = vec![
            Tag::new("F", "b.go", Position::line(2), TagKind::Function),
            Tag::new("F", "a.go", Position::line(9), TagKind::Function),
        ];
        let ordered = ordered_tags(&tags, true);
        assert_eq!(ordered[0].file, "a.go");
        assert_eq!(ordered[1].file, "b.go");
    }

    #[test]
    fn write_ctags() {
        let mut out = Vec::new();
        let options = OutputOptions {
            header: false,
            ..OutputOptions::default()
        };
        write_tags(&tags()[..1], &info(), &options, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "main\tb.go\t1;\"\tp\tline:1\n");
    }

    #[test]
    fn write_json_lines() {
        let mut out = Vec::new();
        let options = OutputOptions {
            format: OutputFormat::Json,
            ..OutputOptions::default()
        };
        write_tags(&tags(), &info(), &options, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let records: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["name"], "Alpha");
        assert_eq!(records[0]["kind"], "variable");
        assert_eq!(records[2]["name"], "main");
    }
}
