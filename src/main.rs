mod config;
mod dispatch;
mod engine;
mod error;
mod history;
mod metrics;
mod operation;

use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use tokio::sync::{mpsc, watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Settings, SettingsStore};
use dispatch::{FixedDelay, ShellRunner, DEFAULT_TIMEOUT};
use engine::{report, Engine, EngineSnapshot, LogLevel, Notification};
use metrics::{ProcessLoad, ProcessSample, SystemMetrics};
use operation::OperationRegistry;

/// Max entries kept in the log panel
const LOG_BUFFER: usize = 100;
/// Rows in the process pane and `score` output
const PROCESS_ROWS: usize = 8;

#[derive(Parser)]
#[command(name = "booster", version, about = "Run system tweak operations and track a health score")]
struct Cli {
    /// Directory for settings, logs and reports
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Per-command timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal UI (default)
    Tui,
    /// List registered operations
    List,
    /// Run one or more operations and wait for them
    Run {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Run every operation in order
    Sweep,
    /// Sample system metrics and print the health score
    Score,
    /// Write a performance report
    Report,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);
    let timeout = Duration::from_secs(cli.timeout);

    let store = SettingsStore::new(&data_dir);
    let settings = store.load();
    init_logging(&data_dir, &settings)?;
    tracing::info!(data_dir = %data_dir.display(), "Starting booster");

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let mut app = App::new(data_dir, store, settings, timeout);
            run_tui(&mut app)
        }
        Command::List => {
            list_operations(&settings);
            Ok(())
        }
        Command::Run { ids } => run_operations(&settings, timeout, &ids).await,
        Command::Sweep => run_sweep(&data_dir, &settings, timeout).await,
        Command::Score => print_score(&settings).await,
        Command::Report => write_report(&data_dir, &settings).await,
    }
}

/// `--data-dir`, なければ OS のデータディレクトリ配下
fn resolve_data_dir(arg: Option<PathBuf>) -> PathBuf {
    arg.or_else(|| dirs::data_local_dir().map(|d| d.join("booster")))
        .unwrap_or_else(|| PathBuf::from(".booster"))
}

/// ログはファイルへ (端末は TUI が使う)
fn init_logging(data_dir: &Path, settings: &Settings) -> anyhow::Result<()> {
    let log_dir = data_dir.join("logs");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let path = log_dir.join(format!("booster_{}.log", Local::now().format("%Y%m%d")));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let default_filter = if settings.get_bool("performance", "enable_logging") {
        "booster=info"
    } else {
        "booster=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn build_engine(
    settings: &Settings,
    timeout: Duration,
) -> (Engine, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let engine = Engine::new(
        Arc::new(OperationRegistry::builtin()),
        Arc::new(ShellRunner::default()),
        Arc::new(FixedDelay::default()),
        tx,
    )
    .with_timeout(timeout)
    .with_locale(settings.locale());
    (engine, rx)
}

fn list_operations(settings: &Settings) {
    let registry = OperationRegistry::builtin();
    let locale = settings.locale();
    for (i, op) in registry.iter().enumerate() {
        println!(
            "{:>2}. {:<20} {:<12} {} ({} command(s))",
            i + 1,
            op.id,
            op.category.display_name(),
            op.label(locale),
            op.commands().len()
        );
    }
}

/// 不明な ID が1つでもあれば何も実行せずにエラー
async fn run_operations(
    settings: &Settings,
    timeout: Duration,
    ids: &[String],
) -> anyhow::Result<()> {
    let (mut engine, mut notifications) = build_engine(settings, timeout);
    engine.request_runs(ids)?;
    wait_headless(&mut engine, &mut notifications).await;
    println!();
    print!("{}", engine.statistics());
    Ok(())
}

async fn run_sweep(data_dir: &Path, settings: &Settings, timeout: Duration) -> anyhow::Result<()> {
    let (mut engine, mut notifications) = build_engine(settings, timeout);
    engine.request_run_all()?;
    wait_headless(&mut engine, &mut notifications).await;

    println!();
    print!("{}", engine.statistics());
    if settings.get_bool("general", "auto_save_reports") {
        let system = SystemMetrics::new().system_info();
        let path =
            report::write_report(data_dir, &engine.snapshot(), settings, Some(&system))?;
        println!("Report saved: {}", path.display());
    }
    Ok(())
}

/// CPU 使用率は2回の計測が必要なので少し待つ
async fn sample_metrics(engine: &mut Engine, provider: &SystemMetrics) -> u8 {
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
    engine.refresh_metrics(provider)
}

async fn print_score(settings: &Settings) -> anyhow::Result<()> {
    let (mut engine, _notifications) = build_engine(settings, DEFAULT_TIMEOUT);
    let provider = SystemMetrics::new();
    let health = sample_metrics(&mut engine, &provider).await;
    let snapshot = engine.snapshot();

    println!("Performance score: {}/100", snapshot.score);
    println!("System health: {health}/100");
    if let Some(m) = snapshot.metrics {
        println!("CPU:  {}", format_percent(m.cpu_percent));
        println!("RAM:  {}", format_percent(m.ram_percent));
        println!("Disk: {}", format_percent(m.disk_percent));
    } else {
        println!("Metrics unavailable");
    }
    if health < settings.auto_boost_threshold() {
        println!("Health is below {}: consider `booster sweep`", settings.auto_boost_threshold());
    }

    let processes = provider.top_processes(PROCESS_ROWS);
    if !processes.is_empty() {
        println!();
        println!("Top processes:");
        for process in &processes {
            println!("[{:<6}] {}", process.load().display_name(), process.display_line());
        }
    }
    Ok(())
}

async fn write_report(data_dir: &Path, settings: &Settings) -> anyhow::Result<()> {
    let (mut engine, _notifications) = build_engine(settings, DEFAULT_TIMEOUT);
    let provider = SystemMetrics::new();
    sample_metrics(&mut engine, &provider).await;
    let system = provider.system_info();
    let path = report::write_report(data_dir, &engine.snapshot(), settings, Some(&system))?;
    println!("Report saved: {}", path.display());
    Ok(())
}

/// すべての要求が終わるまで待ち、通知を標準出力へ
async fn wait_headless(
    engine: &mut Engine,
    notifications: &mut mpsc::UnboundedReceiver<Notification>,
) {
    loop {
        while let Ok(notification) = notifications.try_recv() {
            print_notification(&notification);
        }
        if engine.is_idle() || !engine.next_event().await {
            break;
        }
    }
    while let Ok(notification) = notifications.try_recv() {
        print_notification(&notification);
    }
}

fn print_notification(notification: &Notification) {
    match notification {
        Notification::Log {
            level: LogLevel::Info,
            ..
        } => {}
        Notification::Log {
            level,
            operation,
            message,
        } => println!("[{}] {}: {}", level.display_name(), operation, message),
        Notification::Completed {
            operation,
            success,
            excerpt,
        } => {
            let mark = if *success { "✅" } else { "❌" };
            if excerpt.is_empty() {
                println!("{mark} {operation}");
            } else {
                println!("{mark} {operation}: {excerpt}");
            }
        }
        Notification::SweepFinished { steps } => {
            println!("🚀 Full sweep finished ({steps} commands)");
        }
    }
}

fn format_percent(value: Option<f32>) -> String {
    value
        .map(|v| format!("{v:.0}%"))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq)]
enum InputMode {
    Normal,
    /// Confirming the full sweep
    ConfirmSweep,
    /// Viewing statistics
    Statistics,
}

/// Log panel line
struct LogEntry {
    time: String,
    level: LogLevel,
    operation: String,
    message: String,
}

/// Application state
struct App {
    engine: Engine,
    /// Engine notifications
    notifications: mpsc::UnboundedReceiver<Notification>,
    /// Engine state updates
    updates: watch::Receiver<EngineSnapshot>,
    /// Latest engine state
    snapshot: EngineSnapshot,
    metrics: SystemMetrics,
    /// Busiest processes at the last refresh
    processes: Vec<ProcessSample>,
    store: SettingsStore,
    settings: Settings,
    data_dir: PathBuf,
    /// Selected operation index
    selected: usize,
    input_mode: InputMode,
    status_message: Option<String>,
    logs: VecDeque<LogEntry>,
    last_refresh: Option<Instant>,
}

impl App {
    fn new(
        data_dir: PathBuf,
        store: SettingsStore,
        settings: Settings,
        timeout: Duration,
    ) -> Self {
        let (engine, notifications) = build_engine(&settings, timeout);
        let mut updates = engine.subscribe();
        let snapshot = updates.borrow_and_update().clone();

        Self {
            engine,
            notifications,
            updates,
            snapshot,
            metrics: SystemMetrics::new(),
            processes: Vec::new(),
            store,
            settings,
            data_dir,
            selected: 0,
            input_mode: InputMode::Normal,
            status_message: None,
            logs: VecDeque::with_capacity(LOG_BUFFER),
            last_refresh: None,
        }
    }

    fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn move_down(&mut self) {
        let registry = self.engine.registry();
        if !registry.is_empty() && self.selected < registry.len() - 1 {
            self.selected += 1;
        }
    }

    fn run_selected(&mut self) {
        let Some(id) = self
            .engine
            .registry()
            .get_by_index(self.selected)
            .map(|op| op.id.clone())
        else {
            return;
        };

        match self.engine.request_run(&id) {
            Ok(count) => {
                self.status_message = Some(format!("🚀 {id}: {count} command(s) started"));
            }
            Err(e) => self.status_message = Some(format!("❌ {e}")),
        }
    }

    fn start_sweep(&mut self) {
        if self.settings.get_bool("optimizations", "confirm_dangerous_ops") {
            self.input_mode = InputMode::ConfirmSweep;
        } else {
            self.execute_sweep();
        }
    }

    fn execute_sweep(&mut self) {
        self.input_mode = InputMode::Normal;
        match self.engine.request_run_all() {
            Ok(_) => self.status_message = Some("🚀 Full sweep started".to_string()),
            Err(e) => self.status_message = Some(format!("❌ {e}")),
        }
    }

    fn show_statistics(&mut self) {
        self.input_mode = InputMode::Statistics;
    }

    fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    fn save_report(&mut self) {
        let system = self.metrics.system_info();
        let saved = report::write_report(&self.data_dir, &self.snapshot, &self.settings, Some(&system));
        match saved {
            Ok(path) => self.status_message = Some(format!("📄 Report saved: {}", path.display())),
            Err(e) => {
                tracing::error!(error = %e, "Failed to save report");
                self.status_message = Some(format!("❌ Report error: {e}"));
            }
        }
    }

    fn clear_history(&mut self) {
        self.engine.clear_history();
        self.status_message = Some("🗑 History cleared".to_string());
    }

    /// Switch language and persist it
    fn toggle_language(&mut self) {
        let locale = self.engine.locale().toggle();
        self.engine.set_locale(locale);
        self.settings.set("general", "language", locale.code());

        if let Err(e) = self.store.save(&self.settings) {
            tracing::warn!(error = %e, "Failed to save settings");
            self.status_message = Some(format!("❌ Save error: {e}"));
        } else {
            self.status_message = Some(format!("🌐 Language: {}", locale.code()));
        }
    }

    fn refresh_metrics_if_due(&mut self) {
        let interval = self.settings.monitor_interval();
        let due = self
            .last_refresh
            .map_or(true, |last| last.elapsed() >= interval);
        if due {
            self.engine.refresh_metrics(&self.metrics);
            self.processes = self.metrics.top_processes(PROCESS_ROWS);
            self.last_refresh = Some(Instant::now());
        }
    }

    /// Process engine events and notifications (non-blocking)
    fn process_events(&mut self) {
        self.engine.process_events();
        if self.updates.has_changed().unwrap_or(false) {
            self.snapshot = self.updates.borrow_and_update().clone();
        }

        while let Ok(notification) = self.notifications.try_recv() {
            match notification {
                Notification::Log {
                    level,
                    operation,
                    message,
                } => self.push_log(level, operation, message),
                Notification::Completed {
                    operation, success, ..
                } => {
                    let mark = if success { "✅" } else { "❌" };
                    self.status_message = Some(format!("{mark} {operation}"));
                }
                Notification::SweepFinished { steps } => {
                    self.push_log(
                        LogLevel::Success,
                        "MEGA BOOST".to_string(),
                        format!("Finished {steps} commands"),
                    );
                    self.status_message = Some("🚀 Full sweep finished".to_string());
                    if self.settings.get_bool("general", "auto_save_reports") {
                        self.save_report();
                    }
                }
            }
        }
    }

    fn push_log(&mut self, level: LogLevel, operation: String, message: String) {
        if self.logs.len() >= LOG_BUFFER {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            time: Local::now().format("%H:%M:%S").to_string(),
            level,
            operation,
            message,
        });
    }
}

fn run_tui(app: &mut App) -> anyhow::Result<()> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        app.refresh_metrics_if_due();
        app.process_events();

        terminal.draw(|frame| ui(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.input_mode {
                        InputMode::Normal => match key.code {
                            KeyCode::Char('q') => break,
                            KeyCode::Char('k') | KeyCode::Up => app.move_up(),
                            KeyCode::Char('j') | KeyCode::Down => app.move_down(),
                            KeyCode::Enter => app.run_selected(),
                            KeyCode::Char('b') => app.start_sweep(),
                            KeyCode::Char('r') => app.save_report(),
                            KeyCode::Char('c') => app.clear_history(),
                            KeyCode::Char('l') => app.toggle_language(),
                            KeyCode::Char('s') => app.show_statistics(),
                            _ => {}
                        },
                        InputMode::ConfirmSweep => match key.code {
                            KeyCode::Char('y') | KeyCode::Enter => app.execute_sweep(),
                            KeyCode::Char('n') | KeyCode::Esc => app.cancel_input(),
                            _ => {}
                        },
                        InputMode::Statistics => match key.code {
                            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                                app.cancel_input()
                            }
                            _ => {}
                        },
                    }
                }
            }
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}

fn score_color(score: u8) -> Color {
    match score {
        80..=100 => Color::Green,
        50..=79 => Color::Yellow,
        _ => Color::Red,
    }
}

fn load_color(load: ProcessLoad) -> Color {
    match load {
        ProcessLoad::High => Color::Red,
        ProcessLoad::Medium => Color::Yellow,
        ProcessLoad::Normal => Color::Green,
    }
}

fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Info => Color::Cyan,
        LogLevel::Success => Color::Green,
        LogLevel::Warning => Color::Yellow,
        LogLevel::Error => Color::Red,
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let snapshot = &app.snapshot;

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(8), // Log panel
            Constraint::Length(3), // Footer
        ])
        .split(area);

    // Header
    let health = match snapshot.health {
        Some(health) => Span::styled(
            format!("{health}/100"),
            Style::default().fg(score_color(health)),
        ),
        None => Span::styled("N/A", Style::default().fg(Color::DarkGray)),
    };
    let metrics = snapshot.metrics.unwrap_or_default();
    let running = if snapshot.in_flight > 0 {
        format!("  🚀{} running", snapshot.in_flight)
    } else {
        String::new()
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " BOOSTER ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Score: "),
        Span::styled(
            format!("{}/100", snapshot.score),
            Style::default().fg(score_color(snapshot.score)),
        ),
        Span::raw("  Health: "),
        health,
        Span::raw(format!(
            "  CPU {}  RAM {}  Disk {}  [{}]{}",
            format_percent(metrics.cpu_percent),
            format_percent(metrics.ram_percent),
            format_percent(metrics.disk_percent),
            snapshot.locale.code(),
            running
        )),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, main_layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_layout[1]);

    // Operations
    let items: Vec<ListItem> = app
        .engine
        .registry()
        .iter()
        .enumerate()
        .map(|(i, op)| {
            let style = if i == app.selected {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            let mark = if app.engine.is_applied(&op.id) { "✅" } else { "  " };
            ListItem::new(format!(
                " {} {} [{}]",
                mark,
                op.label(snapshot.locale),
                op.category.display_name()
            ))
            .style(style)
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title(format!(
                " ⚡ Operations ({}/{} applied) ",
                snapshot.applied_count,
                app.engine.registry().len()
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(list, body[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(PROCESS_ROWS as u16 + 2)])
        .split(body[1]);

    // History
    let history_height = right[0].height.saturating_sub(2) as usize;
    let history_lines: Vec<Line> = snapshot
        .history
        .iter()
        .rev()
        .take(history_height)
        .map(|entry| {
            let color = if entry.success {
                Color::Green
            } else if entry.is_timeout() {
                Color::Yellow
            } else {
                Color::Red
            };
            Line::styled(entry.summary_line(), Style::default().fg(color))
        })
        .collect();
    let history = Paragraph::new(history_lines).block(
        Block::default()
            .title(format!(
                " 🕘 History ({}/{}) ",
                snapshot.history_len, snapshot.history_capacity
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(history, right[0]);

    // Processes
    let process_lines: Vec<Line> = app
        .processes
        .iter()
        .map(|process| {
            Line::styled(
                process.display_line(),
                Style::default().fg(load_color(process.load())),
            )
        })
        .collect();
    let processes = Paragraph::new(process_lines).block(
        Block::default()
            .title(" 🔥 Processes ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(processes, right[1]);

    // Log panel
    let log_lines: Vec<Line> = app
        .logs
        .iter()
        .rev()
        .take(6)
        .rev()
        .map(|entry| {
            Line::from(vec![
                Span::styled(format!("{} ", entry.time), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("[{}] ", entry.level.display_name()),
                    Style::default().fg(level_color(entry.level)),
                ),
                Span::styled(
                    format!("{}: ", entry.operation.chars().take(24).collect::<String>()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(&entry.message),
            ])
        })
        .collect();
    let log_panel = Paragraph::new(log_lines)
        .block(
            Block::default()
                .title(" 📜 Logs ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(log_panel, main_layout[2]);

    // Footer
    let footer_text = app.status_message.as_deref().unwrap_or(
        " [Enter]run [b]oost all [r]eport [s]tats [c]lear [l]ang [q]uit ",
    );
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, main_layout[3]);

    match app.input_mode {
        InputMode::ConfirmSweep => {
            let popup_area = centered_rect(50, 25, area);
            frame.render_widget(Clear, popup_area);

            let lines = vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled("Run all ", Style::default().fg(Color::White)),
                    Span::styled(
                        app.engine.registry().len().to_string(),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" operations?", Style::default().fg(Color::White)),
                ]),
                Line::from(""),
                Line::styled("[y] Yes  [n] No", Style::default().fg(Color::Yellow)),
            ];
            let confirm = Paragraph::new(lines).alignment(Alignment::Center).block(
                Block::default()
                    .title("🚀 Confirm Full Sweep")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
            frame.render_widget(confirm, popup_area);
        }
        InputMode::Statistics => {
            let popup_area = centered_rect(60, 50, area);
            frame.render_widget(Clear, popup_area);

            let stats = Paragraph::new(report::statistics_text(&app.snapshot))
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .title("📊 Statistics [ESC close]")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                );
            frame.render_widget(stats, popup_area);
        }
        InputMode::Normal => {}
    }
}

/// Calculate centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
