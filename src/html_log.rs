//! HTML export of the word count log.

use crate::locale::Labels;
use crate::wclog::DeltaRow;
use std::fmt::{self, Write as FmtWrite};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SUFFIX: &str = "_wordcount_log";
pub const EXTENSION: &str = ".html";

const CSS_STYLES: &str = r#"<style type="text/css">
body {font-family: sans-serif}
p.title {font-size: larger; font-weight: bold}
td {padding: 10}
tr.heading {font-size:smaller; font-weight: bold; background-color:lightgray}
table {border-spacing: 0}
table, td {border: lightgrey solid 1px; vertical-align: top}
td.chtitle {font-weight: bold}
</style>
"#;

/// Errors from the backup/write protocol.
#[derive(Debug)]
pub enum ExportError {
    /// The existing target could not be renamed aside for backup.
    CannotOverwrite { path: PathBuf, source: io::Error },
    /// The new content could not be written; any backup has been restored.
    CannotWrite { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::CannotOverwrite { path, .. } => {
                write!(f, "cannot overwrite file \"{}\"", path.display())
            }
            ExportError::CannotWrite { path, .. } => {
                write!(f, "cannot write file \"{}\"", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::CannotOverwrite { source, .. } => Some(source),
            ExportError::CannotWrite { source, .. } => Some(source),
        }
    }
}

/// HTML word count log file.
pub struct HtmlWcLog {
    path: PathBuf,
}

impl HtmlWcLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Export path for a project file: `<stem>_wordcount_log.html` next to it.
    pub fn for_project(project_path: &Path) -> Self {
        let stem = project_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = format!("{}{}{}", stem, SUFFIX, EXTENSION);
        Self {
            path: project_path.with_file_name(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render a complete, self-contained document from precomputed delta rows.
    pub fn render(title: &str, author: &str, rows: &[DeltaRow], labels: &Labels) -> String {
        let mut html = String::with_capacity(2048 + rows.len() * 160);
        let _ = write!(
            html,
            "<html>\n<head>\n<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\"/>\n{css}<title>{log} ({title})</title>\n</head>\n\n<body>\n<p class=title>{title} {by} {author} - {log}</p>\n<table>\n<tr class=\"heading\">\n<td class=\"chtitle\">{date}</td>\n<td>{words}</td>\n<td>{inc}</td>\n<td>{unused}</td>\n<td>{inc}</td>\n</tr>\n",
            css = CSS_STYLES,
            log = labels.word_count_log,
            title = title,
            by = labels.by,
            author = author,
            date = labels.date,
            words = labels.word_count,
            inc = labels.increment,
            unused = labels.with_unused,
        );
        for row in rows {
            let words_color = delta_color(row.words_delta);
            let total_color = delta_color(row.total_delta);
            let _ = write!(
                html,
                "<tr>\n<td>{}</td>\n<td>{}</td>\n<td><font color={}>{}</font></td>\n<td><font color=grey>{}</font></td>\n<td><font color={}>{}</font></td>\n</tr>\n",
                row.date, row.words, words_color, row.words_delta, row.total, total_color,
                row.total_delta,
            );
        }
        html.push_str("</table>\n</body>\n</html>\n");
        html
    }

    /// Write the document, keeping the previous file as `<path>.bak`.
    ///
    /// Either the new content is written, or the original file is left in
    /// place: a failed write renames the backup back. The backup is not
    /// removed on success.
    pub fn write(&self, text: &str) -> Result<(), ExportError> {
        let backup = backup_path(&self.path);
        let mut backed_up = false;
        if self.path.is_file() {
            fs::rename(&self.path, &backup).map_err(|source| ExportError::CannotOverwrite {
                path: self.path.clone(),
                source,
            })?;
            backed_up = true;
        }
        if let Err(source) = fs::write(&self.path, text) {
            if backed_up {
                let _ = fs::rename(&backup, &self.path);
            }
            return Err(ExportError::CannotWrite {
                path: self.path.clone(),
                source,
            });
        }
        Ok(())
    }
}

fn delta_color(delta: i64) -> &'static str {
    if delta > 0 {
        "green"
    } else {
        "red"
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wclog::Sign;

    fn rows() -> Vec<DeltaRow> {
        vec![
            DeltaRow {
                date: "2023-01-01".into(),
                words: 100,
                words_delta: 100,
                total: 120,
                total_delta: 120,
                sign: Sign::Positive,
            },
            DeltaRow {
                date: "2023-01-02".into(),
                words: 90,
                words_delta: -10,
                total: 120,
                total_delta: 0,
                sign: Sign::Negative,
            },
        ]
    }

    #[test]
    fn render_contains_title_line_and_rows() {
        let labels = Labels::default();
        let html = HtmlWcLog::render("Draft", "A. Writer", &rows(), &labels);
        assert!(html.contains("<p class=title>Draft by A. Writer - Word count log</p>"));
        assert!(html.contains("<td>2023-01-01</td>"));
        assert!(html.contains("<font color=green>100</font>"));
        assert!(html.contains("<font color=red>-10</font>"));
        assert!(html.contains("<font color=grey>120</font>"));
        assert!(html.ends_with("</table>\n</body>\n</html>\n"));
    }

    #[test]
    fn render_is_deterministic() {
        let labels = Labels::default();
        let a = HtmlWcLog::render("Draft", "A. Writer", &rows(), &labels);
        let b = HtmlWcLog::render("Draft", "A. Writer", &rows(), &labels);
        assert_eq!(a, b);
    }

    #[test]
    fn for_project_derives_suffixed_name() {
        let export = HtmlWcLog::for_project(Path::new("/tmp/work/draft.json"));
        assert_eq!(
            export.path(),
            Path::new("/tmp/work/draft_wordcount_log.html")
        );
    }

    #[test]
    fn write_keeps_previous_content_as_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft_wordcount_log.html");
        fs::write(&path, "old").unwrap();

        HtmlWcLog::new(&path).write("new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        let backup = dir.path().join("draft_wordcount_log.html.bak");
        assert_eq!(fs::read_to_string(backup).unwrap(), "old");
    }

    #[test]
    fn write_to_fresh_path_creates_file_without_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft_wordcount_log.html");
        HtmlWcLog::new(&path).write("fresh").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
        assert!(!dir.path().join("draft_wordcount_log.html.bak").exists());
    }

    #[test]
    fn blocked_backup_reports_cannot_overwrite_and_leaves_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft_wordcount_log.html");
        fs::write(&path, "old").unwrap();
        // A non-empty directory at the backup path makes the rename fail.
        let backup = dir.path().join("draft_wordcount_log.html.bak");
        fs::create_dir(&backup).unwrap();
        fs::write(backup.join("keep"), "x").unwrap();

        let err = HtmlWcLog::new(&path).write("new").unwrap_err();
        assert!(matches!(err, ExportError::CannotOverwrite { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }

    #[test]
    fn unwritable_target_reports_cannot_write_and_leaves_it_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // A directory occupying the target path cannot be written as a file.
        let path = dir.path().join("draft_wordcount_log.html");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("inside"), "x").unwrap();

        let err = HtmlWcLog::new(&path).write("new").unwrap_err();
        assert!(matches!(err, ExportError::CannotWrite { .. }));
        assert_eq!(fs::read_to_string(path.join("inside")).unwrap(), "x");
    }
}
