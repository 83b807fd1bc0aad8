//! Application entry point

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

mod config;
mod html_log;
mod locale;
mod project;
mod theme;
mod ui;
mod viewer;
mod wclog;

/// Daily progress log viewer for novel projects.
#[derive(Parser)]
#[command(name = "novel-progress-tui", version, about)]
struct Args {
    /// Project file to open.
    project: Option<PathBuf>,

    /// Write the HTML word count log next to the project file and exit.
    #[arg(long)]
    export: bool,

    /// Settings file location (defaults to the XDG config directory).
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Restore terminal to normal mode.
fn cleanup_terminal() {
    use std::io::Write;
    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    );
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

/// Install panic hook to restore terminal before printing error.
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));
}

/// Headless export: merge, compute deltas, write the HTML file.
fn export_word_count_log(project_path: &Path, labels: &locale::Labels) -> anyhow::Result<()> {
    let project = project::Project::load(project_path)?;
    let rows = project.progress_rows(&ui::today())?;
    let export = html_log::HtmlWcLog::for_project(project_path);
    let text = html_log::HtmlWcLog::render(&project.title, &project.author, &rows, labels);
    export.write(&text)?;
    println!("{}", export.path().display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let labels = locale::Labels::default();

    if args.export {
        let path = args
            .project
            .context("--export requires a project file argument")?;
        return export_word_count_log(&path, &labels);
    }

    let config_path = args.config.unwrap_or_else(config::default_config_path);
    let settings = config::ViewerSettings::load(&config_path);
    let mut app = ui::App::new(settings, config_path, labels);

    // Load the project before touching the terminal, so a parse error prints
    // like a normal CLI failure.
    if let Some(path) = args.project {
        let project = project::Project::load(&path)?;
        app.on_project_opened(project, path);
    }

    setup_panic_hook();
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    crossterm::terminal::enable_raw_mode()?;

    let backend = ratatui::backend::CrosstermBackend::new(std::io::stdout());
    let mut terminal = ratatui::Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    app.shutdown();
    cleanup_terminal();

    result?;
    Ok(())
}
