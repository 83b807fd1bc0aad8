//! Progress log viewer: the interactive table over the merged word count log.

use crate::config::ViewerSettings;
use crate::locale::Labels;
use crate::project::Project;
use crate::theme::{DeltaColors, Theme};
use crate::wclog::{DeltaRow, Sign, WcLogError};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// One visible field of a delta row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    WordCount,
    WordCountDelta,
    TotalCount,
    TotalCountDelta,
}

impl Field {
    fn text(&self, row: &DeltaRow) -> String {
        match self {
            Field::Date => row.date.clone(),
            Field::WordCount => row.words.to_string(),
            Field::WordCountDelta => row.words_delta.to_string(),
            Field::TotalCount => row.total.to_string(),
            Field::TotalCountDelta => row.total_delta.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub field: Field,
    pub heading: String,
    /// Relative width weight; all-equal by default.
    pub width: u16,
}

/// Explicit column configuration, one place for layout instead of per-variant
/// copies.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub columns: Vec<Column>,
}

const MIN_COLUMN_WIDTH: u16 = 20;
const COLUMN_WIDTH_STEP: u16 = 10;

impl ColumnLayout {
    pub fn from_settings(settings: &ViewerSettings, labels: &Labels) -> Self {
        let column = |field, heading: &str, width| Column {
            field,
            heading: heading.to_string(),
            width,
        };
        Self {
            columns: vec![
                column(Field::Date, &labels.date, settings.date_width),
                column(Field::WordCount, &labels.word_count, settings.wordcount_width),
                column(
                    Field::WordCountDelta,
                    &labels.daily,
                    settings.wordcount_delta_width,
                ),
                column(
                    Field::TotalCount,
                    &labels.with_unused,
                    settings.totalcount_width,
                ),
                column(
                    Field::TotalCountDelta,
                    &labels.daily,
                    settings.totalcount_delta_width,
                ),
            ],
        }
    }

    /// Write current widths back into the settings.
    pub fn store(&self, settings: &mut ViewerSettings) {
        for column in &self.columns {
            let slot = match column.field {
                Field::Date => &mut settings.date_width,
                Field::WordCount => &mut settings.wordcount_width,
                Field::WordCountDelta => &mut settings.wordcount_delta_width,
                Field::TotalCount => &mut settings.totalcount_width,
                Field::TotalCountDelta => &mut settings.totalcount_delta_width,
            };
            *slot = column.width;
        }
    }

    fn constraints(&self) -> Vec<Constraint> {
        self.columns.iter().map(|c| Constraint::Fill(c.width)).collect()
    }
}

/// The interactive progress log window.
pub struct Viewer {
    title: String,
    layout: ColumnLayout,
    newest_first: bool,
    rows: Vec<DeltaRow>,
    scroll: usize,
    selected_col: usize,
    visible_rows: u16,
    is_open: bool,
}

impl Viewer {
    pub fn open(project_title: &str, settings: &ViewerSettings, labels: &Labels) -> Self {
        Self {
            title: format!("{} - {}", project_title, labels.app_name),
            layout: ColumnLayout::from_settings(settings, labels),
            newest_first: settings.newest_first,
            rows: Vec::new(),
            scroll: 0,
            selected_col: 0,
            visible_rows: 0,
            is_open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn rows(&self) -> &[DeltaRow] {
        &self.rows
    }

    /// Re-run the merge/delta pipeline and replace all displayed rows.
    pub fn rebuild(&mut self, project: &Project, today: &str) -> Result<(), WcLogError> {
        let mut rows = project.progress_rows(today)?;
        if self.newest_first {
            rows.reverse();
        }
        self.rows = rows;
        self.scroll = self.scroll.min(self.rows.len().saturating_sub(1));
        Ok(())
    }

    /// Persist the current layout and release the window. Safe to call twice.
    pub fn close(&mut self, settings: &mut ViewerSettings, term_size: (u16, u16)) {
        if !self.is_open {
            return;
        }
        self.layout.store(settings);
        settings.window_geometry = format!("{}x{}", term_size.0, term_size.1);
        self.rows.clear();
        self.is_open = false;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max = self
            .rows
            .len()
            .saturating_sub(self.visible_rows.max(1) as usize);
        self.scroll = (self.scroll + lines).min(max);
    }

    pub fn page_size(&self) -> usize {
        self.visible_rows.max(1) as usize
    }

    pub fn select_prev_column(&mut self) {
        if self.selected_col > 0 {
            self.selected_col -= 1;
        }
    }

    pub fn select_next_column(&mut self) {
        if self.selected_col + 1 < self.layout.columns.len() {
            self.selected_col += 1;
        }
    }

    pub fn widen_column(&mut self) {
        let column = &mut self.layout.columns[self.selected_col];
        column.width = column.width.saturating_add(COLUMN_WIDTH_STEP);
    }

    pub fn narrow_column(&mut self) {
        let column = &mut self.layout.columns[self.selected_col];
        column.width = column.width.saturating_sub(COLUMN_WIDTH_STEP).max(MIN_COLUMN_WIDTH);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let colors = theme.colors();
        self.visible_rows = area.height.saturating_sub(3);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border_default))
            .title(
                Line::from(Span::styled(
                    format!(" {} ", self.title),
                    Style::default()
                        .fg(colors.border_focus)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            )
            .title_bottom(
                Line::from(Span::styled(
                    " ↑↓: scroll │ ←→ +/-: columns │ r: refresh │ e: export │ Esc: close ",
                    Style::default().fg(colors.text_muted),
                ))
                .alignment(Alignment::Center),
            );

        let header = Row::new(self.layout.columns.iter().enumerate().map(|(i, c)| {
            let style = if i == self.selected_col {
                Style::default()
                    .fg(colors.border_focus)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(colors.text_secondary)
                    .add_modifier(Modifier::BOLD)
            };
            Cell::from(Span::styled(c.heading.clone(), style))
        }));

        let delta = DeltaColors::DEFAULT;
        let rows = self.rows.iter().skip(self.scroll).map(|row| {
            let row_style = match row.sign {
                Sign::Positive => Style::default().fg(colors.text_primary),
                Sign::Negative => Style::default().fg(colors.error),
            };
            let delta_style = |value: i64| {
                if value > 0 {
                    Style::default().fg(delta.gain)
                } else {
                    Style::default().fg(delta.loss)
                }
            };
            Row::new(self.layout.columns.iter().map(|c| {
                let cell = Cell::from(c.field.text(row));
                match c.field {
                    Field::WordCountDelta => cell.style(delta_style(row.words_delta)),
                    Field::TotalCountDelta => cell.style(delta_style(row.total_delta)),
                    _ => cell,
                }
            }))
            .style(row_style)
        });

        let table = Table::new(rows, self.layout.constraints())
            .header(header)
            .column_spacing(1)
            .block(block);
        frame.render_widget(table, area);
    }
}
