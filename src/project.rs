//! Novel project file loading and live word counting.

use crate::wclog::{self, DeltaRow, WcLog, WcLogError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One scene of manuscript text. Scenes marked `unused` are excluded from the
/// primary word count but still included in the total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub unused: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

/// In-memory view of a novel project file.
///
/// `wc_log` is the historical per-day record written by previous sessions;
/// `wc_log_update` holds counts captured when the project was opened during
/// the current session and supersedes `wc_log` for the same dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub wc_log: WcLog,
    #[serde(default)]
    pub wc_log_update: WcLog,
}

impl Project {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("cannot read project file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("cannot parse project file {}", path.display()))
    }

    /// Count words in the manuscript right now.
    ///
    /// Returns `(words, words_with_unused)`.
    pub fn count_words(&self) -> (i64, i64) {
        let mut words = 0i64;
        let mut total = 0i64;
        for chapter in &self.chapters {
            for scene in &chapter.scenes {
                let n = scene.content.split_whitespace().count() as i64;
                total += n;
                if !scene.unused {
                    words += n;
                }
            }
        }
        (words, total)
    }

    /// Full merge/delta pipeline against the current project state.
    pub fn progress_rows(&self, today: &str) -> Result<Vec<DeltaRow>, WcLogError> {
        let merged = wclog::merge_logs(&self.wc_log, &self.wc_log_update, self.count_words(), today);
        wclog::compute_deltas(&merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(content: &str, unused: bool) -> Scene {
        Scene {
            title: String::new(),
            content: content.to_string(),
            unused,
        }
    }

    fn project_with_scenes(scenes: Vec<Scene>) -> Project {
        Project {
            title: "Test Novel".into(),
            author: "A. Writer".into(),
            chapters: vec![Chapter {
                title: "One".into(),
                scenes,
            }],
            wc_log: WcLog::new(),
            wc_log_update: WcLog::new(),
        }
    }

    #[test]
    fn count_words_excludes_unused_from_primary_count() {
        let project = project_with_scenes(vec![
            scene("one two three", false),
            scene("four five", true),
        ]);
        assert_eq!(project.count_words(), (3, 5));
    }

    #[test]
    fn count_words_empty_project() {
        let project = project_with_scenes(vec![]);
        assert_eq!(project.count_words(), (0, 0));
    }

    #[test]
    fn progress_rows_include_live_count_as_today() {
        let mut project = project_with_scenes(vec![scene("a b c d", false)]);
        project
            .wc_log
            .insert("2023-01-01".into(), ["2".into(), "2".into()]);
        let rows = project.progress_rows("2023-01-02").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].date, "2023-01-02");
        assert_eq!(rows[1].words, 4);
        assert_eq!(rows[1].words_delta, 2);
    }

    #[test]
    fn parses_minimal_project_json() {
        let project: Project = serde_json::from_str(
            r#"{
                "title": "Draft",
                "wc_log": {"2023-01-01": ["100", "120"]}
            }"#,
        )
        .unwrap();
        assert_eq!(project.title, "Draft");
        assert!(project.author.is_empty());
        assert_eq!(project.wc_log["2023-01-01"][1], "120");
    }
}
