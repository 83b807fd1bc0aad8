//! Application shell: project lifecycle, key handling and the event loop.

use crate::config::ViewerSettings;
use crate::html_log::HtmlWcLog;
use crate::locale::Labels;
use crate::project::Project;
use crate::theme::Theme;
use crate::viewer::Viewer;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::io;
use std::path::PathBuf;

/// Today's date as an ISO 8601 string, the synthetic log key for the live count.
pub fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

pub struct App {
    project: Option<Project>,
    project_path: Option<PathBuf>,
    settings: ViewerSettings,
    config_path: PathBuf,
    labels: Labels,
    theme: Theme,
    viewer: Option<Viewer>,
    progress_enabled: bool,
    status: Option<String>,
    exit: bool,
    should_redraw: bool,
    terminal_size: Rect,
}

impl App {
    pub fn new(settings: ViewerSettings, config_path: PathBuf, labels: Labels) -> Self {
        Self {
            project: None,
            project_path: None,
            settings,
            config_path,
            labels,
            theme: Theme,
            viewer: None,
            progress_enabled: false,
            status: None,
            exit: false,
            should_redraw: true,
            terminal_size: Rect::default(),
        }
    }

    /// A project is now open; the progress log action becomes available.
    pub fn on_project_opened(&mut self, project: Project, path: PathBuf) {
        self.project = Some(project);
        self.project_path = Some(path);
        self.progress_enabled = true;
    }

    /// The project went away; close the viewer and disable its action.
    pub fn on_project_closed(&mut self) {
        self.close_viewer();
        self.project = None;
        self.project_path = None;
        self.progress_enabled = false;
    }

    pub fn viewer_is_open(&self) -> bool {
        self.viewer.as_ref().is_some_and(|v| v.is_open())
    }

    /// Open the progress viewer, or refresh the one already on screen.
    pub fn open_viewer(&mut self) {
        if !self.progress_enabled {
            self.status = Some("No project is open".into());
            return;
        }
        let Some(project) = &self.project else {
            return;
        };
        if self.viewer.is_none() {
            self.viewer = Some(Viewer::open(&project.title, &self.settings, &self.labels));
        }
        let mut failure = None;
        if let Some(viewer) = self.viewer.as_mut() {
            if let Err(e) = viewer.rebuild(project, &today()) {
                failure = Some(e.to_string());
            }
        }
        if let Some(message) = failure {
            self.status = Some(message);
            self.close_viewer();
        }
    }

    pub fn close_viewer(&mut self) {
        if let Some(viewer) = &mut self.viewer {
            let size = (self.terminal_size.width, self.terminal_size.height);
            viewer.close(&mut self.settings, size);
        }
        self.viewer = None;
    }

    /// Write the HTML word count log next to the project file.
    pub fn export_html(&mut self) {
        let (Some(project), Some(path)) = (&self.project, &self.project_path) else {
            self.status = Some("No project is open".into());
            return;
        };
        let result = project.progress_rows(&today()).map_err(anyhow::Error::from).and_then(|rows| {
            let export = HtmlWcLog::for_project(path);
            let text = HtmlWcLog::render(&project.title, &project.author, &rows, &self.labels);
            export.write(&text)?;
            Ok(export.path().display().to_string())
        });
        self.status = Some(match result {
            Ok(path) => {
                log::info!("wrote word count log to {}", path);
                format!("Exported {}", path)
            }
            Err(e) => e.to_string(),
        });
    }

    /// Flush viewer layout and settings. Called once before process exit.
    pub fn shutdown(&mut self) {
        self.close_viewer();
        if let Err(e) = self.settings.save(&self.config_path) {
            log::error!(
                "cannot write settings file {}: {}",
                self.config_path.display(),
                e
            );
        }
    }

    pub fn run(&mut self, terminal: &mut ratatui::DefaultTerminal) -> io::Result<()> {
        self.should_redraw = true;
        let size = terminal.size()?;
        self.terminal_size = Rect::new(0, 0, size.width, size.height);

        while !self.exit {
            if event::poll(std::time::Duration::from_millis(200))? {
                while event::poll(std::time::Duration::from_millis(0))? {
                    match event::read()? {
                        Event::Key(key) => {
                            if key.kind == KeyEventKind::Press {
                                self.handle_key_event(key);
                                self.should_redraw = true;
                                if self.exit {
                                    return Ok(());
                                }
                            }
                        }
                        Event::Resize(w, h) => {
                            self.terminal_size = Rect::new(0, 0, w, h);
                            self.should_redraw = true;
                        }
                        _ => {}
                    }
                }
            }

            if self.should_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.should_redraw = false;
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key: crossterm::event::KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.exit = true;
            return;
        }

        self.status = None;
        if self.viewer_is_open() {
            self.handle_viewer_key(key.code);
        } else {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
                KeyCode::Char('v') => self.open_viewer(),
                KeyCode::Char('e') => self.export_html(),
                _ => {}
            }
        }
    }

    fn handle_viewer_key(&mut self, code: KeyCode) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_viewer(),
            KeyCode::Up => viewer.scroll_up(1),
            KeyCode::Down => viewer.scroll_down(1),
            KeyCode::PageUp => {
                let page = viewer.page_size();
                viewer.scroll_up(page);
            }
            KeyCode::PageDown => {
                let page = viewer.page_size();
                viewer.scroll_down(page);
            }
            KeyCode::Left => viewer.select_prev_column(),
            KeyCode::Right => viewer.select_next_column(),
            KeyCode::Char('+') => viewer.widen_column(),
            KeyCode::Char('-') => viewer.narrow_column(),
            KeyCode::Char('r') | KeyCode::Char('v') => self.open_viewer(),
            KeyCode::Char('e') => self.export_html(),
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        if self.viewer_is_open() {
            let theme = self.theme;
            if let Some(viewer) = self.viewer.as_mut() {
                viewer.render(frame, chunks[0], &theme);
            }
        } else {
            self.render_home(frame, chunks[0]);
        }
        self.render_status(frame, chunks[1]);
    }

    fn render_home(&self, frame: &mut Frame, area: Rect) {
        let colors = self.theme.colors();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border_default))
            .title(
                Line::from(Span::styled(
                    format!(" {} ", self.labels.app_name),
                    Style::default()
                        .fg(colors.border_focus)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            );

        let muted = Style::default().fg(colors.text_muted);
        let mut lines: Vec<Line> = Vec::with_capacity(10);
        match &self.project {
            Some(project) => {
                let (words, total) = project.count_words();
                lines.push(Line::from(vec![
                    Span::styled("Project   ", muted),
                    Span::styled(
                        project.title.clone(),
                        Style::default()
                            .fg(colors.text_primary)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Author    ", muted),
                    Span::styled(
                        project.author.clone(),
                        Style::default().fg(colors.text_secondary),
                    ),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Words     ", muted),
                    Span::styled(words.to_string(), Style::default().fg(colors.accent_cyan)),
                    Span::styled("  with unused ", muted),
                    Span::styled(total.to_string(), Style::default().fg(colors.accent_yellow)),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Log days  ", muted),
                    Span::styled(
                        project.wc_log.len().to_string(),
                        Style::default().fg(colors.info),
                    ),
                ]));
            }
            None => {
                lines.push(Line::from(Span::styled("No project is open", muted)));
            }
        }
        lines.push(Line::default());
        lines.push(self.menu_line("v", "View progress log", self.progress_enabled));
        lines.push(self.menu_line("e", "Export HTML word count log", self.progress_enabled));
        lines.push(self.menu_line("q", "Quit", true));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn menu_line(&self, key: &str, label: &str, enabled: bool) -> Line<'static> {
        let colors = self.theme.colors();
        let (key_style, label_style) = if enabled {
            (
                Style::default()
                    .fg(colors.success)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(colors.text_primary),
            )
        } else {
            (
                Style::default().fg(colors.text_muted),
                Style::default().fg(colors.text_muted),
            )
        };
        Line::from(vec![
            Span::styled(format!("  {}  ", key), key_style),
            Span::styled(label.to_string(), label_style),
        ])
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let colors = self.theme.colors();
        let text = self.status.clone().unwrap_or_default();
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(colors.accent_yellow))),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{Chapter, Scene};
    use crate::wclog::WcLog;

    fn project() -> Project {
        let mut wc_log = WcLog::new();
        wc_log.insert("2023-01-01".into(), ["10".into(), "10".into()]);
        Project {
            title: "Draft".into(),
            author: "A. Writer".into(),
            chapters: vec![Chapter {
                title: "One".into(),
                scenes: vec![Scene {
                    title: String::new(),
                    content: "some words here".into(),
                    unused: false,
                }],
            }],
            wc_log,
            wc_log_update: WcLog::new(),
        }
    }

    fn app_in(dir: &std::path::Path) -> App {
        App::new(
            ViewerSettings::default(),
            dir.join("progress.json"),
            Labels::default(),
        )
    }

    #[test]
    fn viewer_unavailable_without_project() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.open_viewer();
        assert!(!app.viewer_is_open());
        assert_eq!(app.status.as_deref(), Some("No project is open"));
    }

    #[test]
    fn opening_twice_reuses_the_viewer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.on_project_opened(project(), dir.path().join("draft.json"));
        app.open_viewer();
        assert!(app.viewer_is_open());
        let rows = app.viewer.as_ref().unwrap().rows().len();
        app.open_viewer();
        assert!(app.viewer_is_open());
        assert_eq!(app.viewer.as_ref().unwrap().rows().len(), rows);
    }

    #[test]
    fn closing_project_disables_and_closes_viewer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.on_project_opened(project(), dir.path().join("draft.json"));
        app.open_viewer();
        app.on_project_closed();
        assert!(!app.viewer_is_open());
        assert!(!app.progress_enabled);
    }

    #[test]
    fn close_viewer_when_none_is_open_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.close_viewer();
        assert!(!app.viewer_is_open());
    }

    #[test]
    fn export_writes_log_next_to_project() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.on_project_opened(project(), dir.path().join("draft.json"));
        app.export_html();
        let out = dir.path().join("draft_wordcount_log.html");
        let html = std::fs::read_to_string(out).unwrap();
        assert!(html.contains("Draft by A. Writer - Word count log"));
        assert!(html.contains("2023-01-01"));
    }

    #[test]
    fn shutdown_persists_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.shutdown();
        assert_eq!(
            ViewerSettings::load(&dir.path().join("progress.json")),
            ViewerSettings::default()
        );
    }
}
