mod app;
mod config;
mod content;
mod event;
mod logging;
mod markup;
mod session;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use tracing::{info, warn};

use app::{App, AppScreen, SETTINGS_FIELDS};
use config::Config;
use content::Catalog;
use event::{AppEvent, EventHandler};
use session::{Action, View};
use ui::components::adaptive_view::AdaptiveView;
use ui::components::analysis_view::AnalysisView;
use ui::components::home::MenuEntry;
use ui::components::problem_view::ProblemView;
use ui::components::scroll_view::ScrollView;
use ui::layout::{AppLayout, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "chemdrill",
    version,
    about = "Terminal chemistry exam practice with diagnosis and remediation"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Problem catalog (TOML) to use instead of the bundled one")]
    catalog: Option<PathBuf>,

    #[arg(long, help = "Open directly on chapter N (1-based)")]
    chapter: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render marked-up text and print the segments as JSON
    Render { text: String },
    /// Validate a problem catalog and print a summary
    Check { path: Option<PathBuf> },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.normalize(&Theme::available_themes());

    match cli.command {
        Some(Command::Render { text }) => {
            let segments = markup::render(&text);
            println!("{}", serde_json::to_string_pretty(&segments)?);
            return Ok(());
        }
        Some(Command::Check { path }) => return check_catalog(path.as_deref()),
        None => {}
    }

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("warning: logging disabled: {e:#}");
    }
    if let Some(e) = config_error {
        warn!("config unreadable, using defaults: {e:#}");
    }

    let catalog_path = cli
        .catalog
        .or_else(|| config.catalog_path.as_ref().map(PathBuf::from));
    let catalog = match &catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::bundled()?,
    };
    let catalog: &'static Catalog = Box::leak(Box::new(catalog));

    if let Some(theme_name) = cli.theme {
        if Theme::load(&theme_name).is_some() {
            config.theme = theme_name;
        } else {
            warn!(theme = %theme_name, "unknown theme, keeping {}", config.theme);
        }
    }
    let theme: &'static Theme = Box::leak(Box::new(Theme::load(&config.theme).unwrap_or_default()));

    let chapter = cli.chapter.map(|n| n.saturating_sub(1));
    let mut app = App::new(catalog, config, theme, chapter);
    info!(problems = catalog.len(), "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new();

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn check_catalog(path: Option<&std::path::Path>) -> Result<()> {
    let catalog = match path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("checking {}", path.display()))?,
        None => Catalog::bundled().context("checking the bundled catalog")?,
    };

    for (i, problem) in catalog.problems().iter().enumerate() {
        println!(
            "{:>3}. {:<28} {} questions, {} branches",
            i + 1,
            problem.id,
            problem.questions.len(),
            problem.branches.len()
        );
    }
    println!("ok: {} problems", catalog.len());
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.screen == AppScreen::Settings {
        handle_settings_key(app, key);
        return;
    }

    match app.session.view() {
        View::Home => handle_home_key(app, key),
        View::Problem => handle_problem_key(app, key),
        View::Analysis => handle_analysis_key(app, key),
        View::Adaptive { .. } => handle_adaptive_key(app, key),
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('s') => {
            app.apply(Action::Start);
        }
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected_entry() {
            MenuEntry::Start => {
                app.apply(Action::Start);
            }
            MenuEntry::Settings => app.go_to_settings(),
            MenuEntry::Quit => app.should_quit = true,
        },
        _ => {}
    }
}

fn handle_problem_key(app: &mut App, key: KeyEvent) {
    if app.editor.is_some() {
        app.handle_editor_key(key);
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('h') => {
            app.apply(Action::Home);
        }
        KeyCode::Left | KeyCode::Char('p') => {
            app.apply(Action::Prev);
        }
        KeyCode::Right | KeyCode::Char('n') => {
            app.apply(Action::Next);
        }
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate(),
        KeyCode::Char(ch @ '1'..='9') => {
            app.choose_option(digit_index(ch));
        }
        KeyCode::Char('r') => {
            app.apply(Action::Reveal);
        }
        KeyCode::Char('a') => {
            app.apply(Action::Analyze);
        }
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::PageUp => app.scroll_up(),
        _ => {}
    }
}

fn handle_analysis_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => {
            app.apply(Action::Back);
        }
        KeyCode::Up | KeyCode::Char('k') => app.branch_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.branch_next(),
        KeyCode::Enter => {
            app.select_branch(app.branch_cursor);
        }
        KeyCode::Char(ch @ '1'..='9') => {
            app.select_branch(digit_index(ch));
        }
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::PageUp => app.scroll_up(),
        _ => {}
    }
}

fn handle_adaptive_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => {
            app.apply(Action::Back);
        }
        KeyCode::Enter | KeyCode::Char('h') => {
            app.apply(Action::Home);
        }
        KeyCode::PageDown | KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::PageUp | KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_settings(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected + 1 < SETTINGS_FIELDS {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        _ => {}
    }
}

fn digit_index(ch: char) -> usize {
    (ch as usize).saturating_sub('1' as usize)
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    if app.screen == AppScreen::Settings {
        render_settings(frame, app);
        return;
    }

    match app.session.view() {
        View::Home => render_home(frame, app),
        View::Problem => render_problem(frame, app),
        View::Analysis => render_analysis(frame, app),
        View::Adaptive { branch } => {
            let lines = AdaptiveView {
                branch,
                theme: app.theme,
            }
            .lines();
            let hints = ["[b] Back to analysis", "[Enter/h] Finish", "[PgUp/PgDn] Scroll"];
            render_session_screen(frame, app, "Remediation", lines, &hints);
        }
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect, subtitle: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " chemdrill ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {subtitle}"),
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect, lines: Vec<String>) {
    let colors = &app.theme.colors;
    let footer = Paragraph::new(
        lines
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.muted()))))
            .collect::<Vec<_>>(),
    );
    frame.render_widget(footer, area);
}

fn render_home(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let subtitle = format!("{} chapters", app.session.problem_count());
    render_header(frame, app, layout[0], &subtitle);

    let menu_area = ui::layout::centered_rect(60, 80, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    let hints = pack_hint_lines(&["[s] Start", "[c] Settings", "[q] Quit"], area.width as usize);
    render_footer(frame, app, layout[2], hints);
}

fn render_problem(frame: &mut ratatui::Frame, app: &App) {
    let lines = ProblemView {
        session: &app.session,
        theme: app.theme,
        focused_question: app.focused_question,
        option_cursor: app.option_cursor,
        editor: app.editor.as_ref(),
    }
    .lines();

    let hints: Vec<&str> = if app.editor.is_some() {
        vec!["[Enter] Save answer", "[Esc] Cancel", "[Ctrl-U] Clear", "[Ctrl-W] Delete word", "[Ctrl-←→] Word"]
    } else {
        vec![
            if app.session.has_prev() { "[←/p] Prev" } else { "" },
            if app.session.has_next() { "[→/n] Next" } else { "" },
            "[↑↓] Move",
            "[Enter] Answer",
            "[1-9] Pick option",
            if app.session.is_revealed() { "" } else { "[r] Reveal" },
            if app.session.can_analyze() { "[a] Analyze" } else { "" },
            "[PgUp/PgDn] Scroll",
            "[h] Home",
        ]
    };
    let title = app.session.current_problem().title.as_str();
    render_session_screen(frame, app, title, lines, &hints);
}

fn render_analysis(frame: &mut ratatui::Frame, app: &App) {
    let lines = AnalysisView {
        problem: app.session.current_problem(),
        cursor: app.branch_cursor,
        theme: app.theme,
    }
    .lines();
    let hints = ["[↑↓] Move", "[Enter/1-9] Choose", "[b] Back to problem"];
    render_session_screen(frame, app, "Analysis", lines, &hints);
}

fn render_session_screen(
    frame: &mut ratatui::Frame,
    app: &App,
    subtitle: &str,
    lines: Vec<Line<'static>>,
    hints: &[&str],
) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let hint_lines = pack_hint_lines(hints, area.width as usize);
    let layout = AppLayout::new(area, hint_lines.len() as u16);

    let chapter = format!(
        "{}/{}  {subtitle}",
        app.session.index() + 1,
        app.session.problem_count()
    );
    render_header(frame, app, layout.header, &chapter);

    let block = Block::bordered()
        .border_style(Style::default().fg(colors.border()))
        .style(Style::default().bg(colors.bg()));
    let view = ScrollView::new(lines, block, app.scroll);
    app.max_scroll.set(view.max_scroll(layout.main));
    frame.render_widget(view, layout.main);

    render_footer(frame, app, layout.footer, hint_lines);
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 60, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: [(&str, String); SETTINGS_FIELDS] = [
        ("Theme", app.config.theme.clone()),
        ("Scroll Step", format!("{} lines", app.config.scroll_step)),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.muted()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = Style::default()
            .fg(if is_selected { colors.accent() } else { colors.fg() })
            .add_modifier(if is_selected { Modifier::BOLD } else { Modifier::empty() });
        let value_style = Style::default().fg(if is_selected {
            colors.marker()
        } else {
            colors.muted()
        });

        let lines = vec![
            Line::from(Span::styled(format!("{indicator}{label}:"), label_style)),
            Line::from(Span::styled(format!("  < {value} >"), value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [ESC] Save & back  [Enter/arrows] Change value",
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
