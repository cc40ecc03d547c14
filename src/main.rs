mod app;
mod catalog;
mod config;
mod engine;
mod event;
mod session;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use app::{App, AppScreen};
use engine::priority;
use event::{AppEvent, EventHandler};
use session::learn::LearnStep;
use ui::components::example_card::ExampleCard;
use ui::components::intro_card::IntroCard;
use ui::components::kanji_grid::KanjiGrid;
use ui::components::progress_bar::ProgressBar;
use ui::components::quiz_card::QuizCard;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "kanjidr", version, about = "Terminal kanji drill with sequenced lessons")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(
        short,
        long,
        help = "One-shot priority list for this run, e.g. \"食 水\" (not saved)"
    )]
    priority: Option<String>,

    #[arg(short, long, help = "Override the data directory")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new(cli.data_dir);

    if let Some(theme_name) = cli.theme
        && let Some(theme) = ui::theme::Theme::load(&theme_name)
    {
        let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
        app.theme = theme;
        app.menu.theme = theme;
    }
    if let Some(ref input) = cli.priority {
        app.priority = priority::parse_priority_input(input);
    }

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

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            // The tick fires the delayed advance after a correct answer.
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Learn => handle_learn_key(app, key),
        AppScreen::Progress => handle_progress_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('l') => app.start_learning(),
        KeyCode::Char('p') => app.go_to_progress(),
        KeyCode::Char('s') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected {
            0 => app.start_learning(),
            1 => app.go_to_progress(),
            2 => app.go_to_settings(),
            _ => {}
        },
        _ => {}
    }
}

fn handle_learn_key(app: &mut App, key: KeyEvent) {
    let Some(ref session) = app.session else {
        // All entries completed: any of the usual keys returns to the menu.
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.go_to_menu();
        }
        return;
    };
    let step = session.step;

    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Enter => match step {
            LearnStep::Intro => app.ready(),
            LearnStep::Example => app.mark_learned(),
            _ => {}
        },
        KeyCode::Char('r') => app.retry(),
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            if let Some(n) = ch.to_digit(10)
                && n >= 1
            {
                app.select_option(n as usize - 1);
            }
        }
        _ => {}
    }
}

fn handle_progress_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
        app.go_to_menu();
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    // Confirmation dialog takes priority over everything else.
    if app.confirm_clear {
        match key.code {
            KeyCode::Char('y') => app.confirm_clear_progress(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_clear_progress(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            let _ = app.config.save();
            app.go_to_menu();
        }
        KeyCode::Enter => app.apply_priority_input(),
        KeyCode::Backspace => app.settings_backspace(),
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.cycle_theme();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_priority();
        }
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.request_clear_progress();
        }
        KeyCode::Char(ch) => app.settings_input_char(ch),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Learn => render_learn(frame, app),
        AppScreen::Progress => render_progress(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " kanjidr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info.to_string(),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hint: &str) {
    let colors = &app.theme.colors;
    let footer = Paragraph::new(Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    let stats = app.stats();

    render_header(
        frame,
        app,
        layout.header,
        &format!(
            " {}/{} kanji learned | {}%",
            stats.learned, stats.total, stats.percentage
        ),
    );

    let menu_area = ui::layout::centered_rect(50, 80, layout.main);
    frame.render_widget(&app.menu, menu_area);

    render_footer(
        frame,
        app,
        layout.footer,
        " [l] Learn  [p] Progress  [s] Settings  [q] Quit ",
    );
}

fn render_learn(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    let stats = app.stats();

    let Some(ref session) = app.session else {
        render_header(frame, app, layout.header, " all done");
        let centered = ui::layout::centered_rect(60, 50, layout.main);
        let congrats = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Congratulations!",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "You have learned all available kanji. Great job!",
                Style::default().fg(colors.fg()),
            )),
            Line::from(Span::styled(
                "Add kanji to your priority list in Settings,",
                Style::default().fg(colors.muted()),
            )),
            Line::from(Span::styled(
                "or clear your progress to start over.",
                Style::default().fg(colors.muted()),
            )),
        ])
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::bordered()
                .border_style(Style::default().fg(colors.success()))
                .style(Style::default().bg(colors.bg())),
        );
        frame.render_widget(congrats, centered);
        render_footer(frame, app, layout.footer, " [Esc] Back to menu ");
        return;
    };

    render_header(
        frame,
        app,
        layout.header,
        &format!(
            " {}/{} kanji learned | Step {} of {}",
            stats.learned,
            stats.total,
            session.step.number(),
            LearnStep::COUNT
        ),
    );

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10)])
        .split(layout.main);

    frame.render_widget(ProgressBar::new(stats, app.theme), main_layout[0]);

    let card_area = ui::layout::centered_rect(70, 90, main_layout[1]);
    let Some(entry) = session.entry(&app.catalog) else {
        return;
    };
    let vocab = &entry.vocabulary_word;

    match session.step {
        LearnStep::Intro => {
            frame.render_widget(
                IntroCard {
                    entry,
                    theme: app.theme,
                },
                card_area,
            );
        }
        LearnStep::MeaningQuiz => {
            frame.render_widget(
                QuizCard {
                    title: "What does this word mean?",
                    prompt: &vocab.word,
                    options: &session.options,
                    selected: session.selected,
                    feedback: session.feedback,
                    correct_value: &vocab.meaning,
                    theme: app.theme,
                },
                card_area,
            );
        }
        LearnStep::PronunciationQuiz => {
            frame.render_widget(
                QuizCard {
                    title: "How do you read this word?",
                    prompt: &vocab.word,
                    options: &session.options,
                    selected: session.selected,
                    feedback: session.feedback,
                    correct_value: &vocab.reading,
                    theme: app.theme,
                },
                card_area,
            );
        }
        LearnStep::SentenceQuiz => {
            // The session skips this step when no example exists.
            if let Some(example) = entry.first_example() {
                frame.render_widget(
                    QuizCard {
                        title: "What does this sentence mean?",
                        prompt: &example.sentence,
                        options: &session.options,
                        selected: session.selected,
                        feedback: session.feedback,
                        correct_value: &example.sentence_meaning,
                        theme: app.theme,
                    },
                    card_area,
                );
            }
        }
        LearnStep::Example => {
            frame.render_widget(
                ExampleCard {
                    entry,
                    theme: app.theme,
                },
                card_area,
            );
        }
    }

    let hint = match session.step {
        LearnStep::Intro => " [Enter] Start quiz  [Esc] Menu ",
        LearnStep::Example => " [Enter] Mark as learned  [Esc] Menu ",
        _ if session.can_retry() => " [r] Try again  [Esc] Menu ",
        _ => " [1-4] Answer  [Esc] Menu ",
    };
    render_footer(frame, app, layout.footer, hint);
}

fn render_progress(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    let stats = app.stats();

    render_header(frame, app, layout.header, " your progress");

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(5)])
        .split(layout.main);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(main_layout[0]);

    let stat_cell = |label: &str, value: String| {
        Paragraph::new(vec![
            Line::from(Span::styled(
                value,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                label.to_string(),
                Style::default().fg(colors.muted()),
            )),
        ])
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::bordered()
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg())),
        )
    };

    frame.render_widget(stat_cell("Kanji Learned", stats.learned.to_string()), cells[0]);
    frame.render_widget(stat_cell("Total Available", stats.total.to_string()), cells[1]);
    frame.render_widget(
        stat_cell("Progress", format!("{}%", stats.percentage)),
        cells[2],
    );

    let characters = app.learned_characters();
    frame.render_widget(
        KanjiGrid {
            catalog: &app.catalog,
            characters: &characters,
            theme: app.theme,
        },
        main_layout[1],
    );

    render_footer(frame, app, layout.footer, " [Esc] Back to menu ");
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    let stats = app.stats();

    render_header(frame, app, layout.header, " settings");

    let centered = ui::layout::centered_rect(70, 90, layout.main);
    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Priority List",
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Kanji you want to learn first, space or comma separated.",
            Style::default().fg(colors.muted()),
        )),
        Line::from(Span::styled(
            "Only characters in the catalog are kept.",
            Style::default().fg(colors.muted()),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  > ", Style::default().fg(colors.accent())),
            Span::styled(
                format!("{}_", app.priority_input),
                Style::default().fg(colors.fg()),
            ),
        ]),
        Line::from(""),
    ];

    if !app.priority.is_empty() {
        let current: String = app
            .priority
            .iter()
            .map(|ch| ch.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::from(Span::styled(
            format!("  Current list ({}): {}", app.priority.len(), current),
            Style::default().fg(colors.accent()),
        )));
        lines.push(Line::from(""));
    }

    if let Some(ref message) = app.settings_message {
        lines.push(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(colors.warning()),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Theme",
        Style::default()
            .fg(colors.fg())
            .add_modifier(Modifier::BOLD),
    )));
    let mut theme_spans = vec![Span::styled("  ", Style::default())];
    for name in ui::theme::Theme::available_themes() {
        let style = if name == app.config.theme {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.accent_dim())
        };
        theme_spans.push(Span::styled(format!("{name}  "), style));
    }
    lines.push(Line::from(theme_spans));
    lines.push(Line::from(Span::styled(
        "  [Ctrl+t] Next theme",
        Style::default().fg(colors.muted()),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Danger Zone",
        Style::default()
            .fg(colors.error())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!("  Current progress: {} kanji learned", stats.learned),
        Style::default().fg(colors.fg()),
    )));

    if app.confirm_clear {
        lines.push(Line::from(Span::styled(
            format!(
                "  Clear all {} learned kanji? This cannot be undone.  [y] Yes  [n] No",
                stats.learned
            ),
            Style::default()
                .fg(colors.error())
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  [Ctrl+x] Clear all progress",
            Style::default().fg(colors.muted()),
        )));
    }

    Paragraph::new(lines).render(inner, frame.buffer_mut());

    render_footer(
        frame,
        app,
        layout.footer,
        " [Enter] Save list  [Ctrl+u] Clear list  [Ctrl+t] Theme  [Esc] Back ",
    );
}
