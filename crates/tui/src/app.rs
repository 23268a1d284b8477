use std::{
    io, thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use matchgrid_core::{
    InputEvent, Phase, RenderCommand, ResultDialog, Session, SessionConfig, SettingChange,
    SettingsPanel, Theme,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

const TICK_RATE: Duration = Duration::from_millis(250);
const MENU_ITEMS: [&str; 3] = ["Start", "Settings", "Quit"];
const SETTING_FIELDS: usize = 6;

#[derive(Debug, Clone)]
struct Palette {
    primary_bg: Color,
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    selection_fg: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                primary_bg: Color::White,
                primary_fg: Color::Black,
                accent: Color::Blue,
                muted: Color::Gray,
                selection_bg: Color::LightBlue,
                selection_fg: Color::Black,
                success: Color::Green,
                warning: Color::Magenta,
                danger: Color::Red,
            },
            Theme::Dark => Self {
                primary_bg: Color::Black,
                primary_fg: Color::White,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                selection_bg: Color::DarkGray,
                selection_fg: Color::White,
                success: Color::Green,
                warning: Color::Yellow,
                danger: Color::Red,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.primary_fg).bg(self.primary_bg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Settings,
    Play,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardFace {
    Hidden,
    Revealed,
    Matched,
    Shaking,
}

/// What the play area currently shows, rebuilt from render commands.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Board {
    columns: u32,
    rows: u32,
    card_width: u32,
    card_height: u32,
    faces: Vec<CardFace>,
    moves: u32,
    score: u32,
    remaining: Option<u32>,
    preview: bool,
    dialog: Option<ResultDialog>,
    controls_enabled: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            columns: 0,
            rows: 0,
            card_width: 0,
            card_height: 0,
            faces: Vec::new(),
            moves: 0,
            score: 0,
            remaining: None,
            preview: false,
            dialog: None,
            controls_enabled: true,
        }
    }
}

impl Board {
    /// Apply one command. Commands that concern the whole screen are left to the caller.
    fn apply(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::ShowGame {
                columns,
                rows,
                card_width,
                card_height,
            } => {
                self.columns = *columns;
                self.rows = *rows;
                self.card_width = *card_width;
                self.card_height = *card_height;
                self.faces = vec![CardFace::Hidden; *columns as usize * *rows as usize];
                self.preview = false;
            }
            RenderCommand::ClearGrid => {
                self.faces.clear();
                self.preview = false;
            }
            RenderCommand::PreviewAll => self.preview = true,
            RenderCommand::HidePreview => self.preview = false,
            RenderCommand::Reveal { index } => self.set_face(*index, CardFace::Revealed),
            RenderCommand::ShowMatched { index } => self.set_face(*index, CardFace::Matched),
            RenderCommand::ShakeMismatch { index } => self.set_face(*index, CardFace::Shaking),
            RenderCommand::Unflip { index } => self.set_face(*index, CardFace::Hidden),
            RenderCommand::UpdateStats { moves, score } => {
                self.moves = *moves;
                self.score = *score;
            }
            RenderCommand::UpdateTimer { remaining } => self.remaining = Some(*remaining),
            RenderCommand::ClearTimer => self.remaining = None,
            RenderCommand::ShowResult(dialog) => self.dialog = Some(dialog.clone()),
            RenderCommand::HideResult => self.dialog = None,
            RenderCommand::SetControlsEnabled { enabled } => self.controls_enabled = *enabled,
            RenderCommand::ShowMenu | RenderCommand::SetTheme { .. } => {}
        }
    }

    fn set_face(&mut self, index: usize, face: CardFace) {
        if let Some(slot) = self.faces.get_mut(index) {
            *slot = face;
        }
    }

    fn shows_face(&self, index: usize) -> bool {
        self.preview
            || self
                .faces
                .get(index)
                .map(|face| *face != CardFace::Hidden)
                .unwrap_or(false)
    }

    /// Terminal cells per card, scaled down from the configured pixel size.
    fn cell_size(&self) -> (u16, u16) {
        let width = (self.card_width / 6).clamp(5, 14) as u16;
        let height = (self.card_height / 12).clamp(3, 7) as u16;
        (width, height)
    }
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Terminal front-end driving one game session.
pub struct MatchGridApp {
    session: Session,
    screen: Screen,
    board: Board,
    palette: Palette,
    theme_label: String,
    settings: Option<SettingsPanel>,
    settings_cursor: usize,
    menu_cursor: usize,
    cursor: usize,
    status: String,
    should_quit: bool,
    last_tick: Instant,
}

impl MatchGridApp {
    pub fn new(session: Session) -> Self {
        let theme = session.config().theme;
        Self {
            session,
            screen: Screen::Menu,
            board: Board::default(),
            palette: Palette::for_theme(theme),
            theme_label: theme.label(),
            settings: None,
            settings_cursor: 0,
            menu_cursor: 0,
            cursor: 0,
            status: "Ready".to_string(),
            should_quit: false,
            last_tick: Instant::now(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.apply_commands();

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen, EnableFocusChange)
            .context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);
        self.last_tick = Instant::now();
        info!("terminal ready");

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) || self.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        self.advance_clock();
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    error!(%err, "input failed");
                    self.status = format!("Error: {err}");
                }
                true
            }
            Some(AppEvent::Tick) => true,
            None => false,
        }
    }

    fn advance_clock(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.session.advance(elapsed);
        self.apply_commands();
    }

    fn dispatch(&mut self, event: InputEvent) -> Result<()> {
        self.session.handle(event)?;
        self.apply_commands();
        Ok(())
    }

    fn apply_commands(&mut self) {
        for command in self.session.drain_commands() {
            debug!(?command, "render");
            self.board.apply(&command);
            match command {
                RenderCommand::ShowMenu => {
                    if self.screen != Screen::Settings {
                        self.screen = Screen::Menu;
                    }
                }
                RenderCommand::ShowGame { .. } => {
                    self.screen = Screen::Play;
                    self.cursor = self.cursor.min(self.board.faces.len().saturating_sub(1));
                    self.status = "Find every pair before the clock runs out".to_string();
                }
                RenderCommand::SetTheme { theme, label, .. } => {
                    self.palette = Palette::for_theme(theme);
                    self.theme_label = label;
                }
                RenderCommand::ShowResult(dialog) => {
                    self.status = dialog.title;
                }
                _ => {}
            }
        }
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        match event {
            Event::FocusLost => self.dispatch(InputEvent::PointerLeave),
            Event::FocusGained => self.dispatch(InputEvent::PointerEnter),
            Event::Key(key) if key.kind == KeyEventKind::Press => match self.screen {
                Screen::Menu => self.handle_menu_key(key),
                Screen::Settings => self.handle_settings_key(key),
                Screen::Play => self.handle_play_key(key),
            },
            _ => Ok(()),
        }
    }

    fn toggle_theme(&mut self) -> Result<()> {
        let theme = self.session.config().theme.toggled();
        self.dispatch(InputEvent::SetTheme { theme })
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.menu_cursor = (self.menu_cursor + 1) % MENU_ITEMS.len();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.menu_cursor = (self.menu_cursor + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
            }
            KeyCode::Char('t') => self.toggle_theme()?,
            KeyCode::Char('s') => self.open_settings(),
            KeyCode::Enter => match self.menu_cursor {
                0 => {
                    self.cursor = 0;
                    self.dispatch(InputEvent::Start)?;
                }
                1 => self.open_settings(),
                _ => self.should_quit = true,
            },
            _ => {}
        }
        Ok(())
    }

    fn open_settings(&mut self) {
        self.settings = Some(SettingsPanel::open(&self.session));
        self.settings_cursor = 0;
        self.screen = Screen::Settings;
        self.status = "Left/right to change, Enter to save".to_string();
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(panel) = self.settings.as_mut() else {
            self.screen = Screen::Menu;
            return Ok(());
        };
        let delta = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.settings_cursor = (self.settings_cursor + 1) % SETTING_FIELDS;
                return Ok(());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.settings_cursor = (self.settings_cursor + SETTING_FIELDS - 1) % SETTING_FIELDS;
                return Ok(());
            }
            KeyCode::Char('h') | KeyCode::Char('-') | KeyCode::Left => -1,
            KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Right => 1,
            KeyCode::Enter | KeyCode::Esc => {
                if !panel.can_close() {
                    self.status = "Fix the highlighted settings first".to_string();
                    return Ok(());
                }
                panel.commit(&mut self.session)?;
                info!(config = ?self.session.config(), "settings saved");
                self.settings = None;
                self.screen = Screen::Menu;
                self.status = "Settings saved".to_string();
                self.apply_commands();
                return Ok(());
            }
            _ => return Ok(()),
        };

        let change = step_setting(panel.draft(), self.settings_cursor, delta);
        self.status = match panel.set(change) {
            Ok(()) => change.label(),
            Err(err) => format!("{}: {err}", change.label()),
        };
        Ok(())
    }

    fn handle_play_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.board.dialog.is_some() {
            return match key.code {
                KeyCode::Char('p') | KeyCode::Enter => self.dispatch(InputEvent::PlayAgain),
                KeyCode::Char('m') | KeyCode::Esc => self.dispatch(InputEvent::ExitToMenu),
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1, 0),
            KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1, 0),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(0, -1),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.dispatch(InputEvent::SelectCard { index: self.cursor })?;
            }
            KeyCode::Char('r') | KeyCode::Char('x') | KeyCode::Esc
                if !self.board.controls_enabled =>
            {
                self.status = "Controls are disabled until you choose play again or exit".to_string();
            }
            KeyCode::Char('r') => self.dispatch(InputEvent::Restart)?,
            KeyCode::Char('x') | KeyCode::Esc => self.dispatch(InputEvent::Exit)?,
            KeyCode::Char('t') => self.toggle_theme()?,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
        Ok(())
    }

    fn move_cursor(&mut self, dx: i64, dy: i64) {
        let columns = i64::from(self.board.columns.max(1));
        let rows = i64::from(self.board.rows.max(1));
        let index = self.cursor as i64;
        let col = (index % columns + dx).rem_euclid(columns);
        let row = (index / columns + dy).rem_euclid(rows);
        self.cursor = (row * columns + col) as usize;
    }

    fn draw(&mut self, frame: &mut Frame) {
        frame.render_widget(Block::default().style(self.palette.base()), frame.size());
        match self.screen {
            Screen::Menu => self.draw_menu(frame),
            Screen::Settings => self.draw_settings(frame),
            Screen::Play => self.draw_play(frame),
        }
    }

    fn draw_menu(&self, frame: &mut Frame) {
        let area = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(area);

        let banner = Paragraph::new(Line::from(Span::styled(
            "M A T C H G R I D",
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(banner, layout[0]);

        let menu_height = (MENU_ITEMS.len() as u16)
            .saturating_mul(2)
            .saturating_add(2)
            .min(layout[1].height);
        let menu_area = centered_rect(28, menu_height, layout[1]);
        let menu_lines: Vec<Line> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                if idx == self.menu_cursor {
                    Line::from(Span::styled(
                        format!("▶ {item}"),
                        Style::default()
                            .fg(self.palette.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {item}"),
                        Style::default().fg(self.palette.primary_fg),
                    ))
                }
            })
            .collect();
        let menu = Paragraph::new(menu_lines)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .alignment(Alignment::Center);
        frame.render_widget(menu, menu_area);

        self.render_status(frame, layout[2]);
    }

    fn draw_settings(&self, frame: &mut Frame) {
        let area = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);

        let Some(panel) = self.settings.as_ref() else {
            return;
        };
        let draft = panel.draft();
        let fields = [
            SettingChange::CardWidth(draft.card_width),
            SettingChange::CardHeight(draft.card_height),
            SettingChange::Columns(draft.columns),
            SettingChange::Rows(draft.rows),
            SettingChange::TimeLimit(draft.time_limit),
            SettingChange::Theme(draft.theme),
        ];
        let mut lines: Vec<Line> = fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let flagged = panel.dimensions_invalid()
                    && matches!(field, SettingChange::Columns(_) | SettingChange::Rows(_));
                let mut style = Style::default().fg(if flagged {
                    self.palette.danger
                } else {
                    self.palette.primary_fg
                });
                let marker = if idx == self.settings_cursor {
                    style = style
                        .bg(self.palette.selection_bg)
                        .add_modifier(Modifier::BOLD);
                    "▶"
                } else {
                    " "
                };
                Line::from(Span::styled(format!("{marker} {}", field.label()), style))
            })
            .collect();
        lines.push(Line::from(""));
        if let Some(err) = panel.error() {
            lines.push(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(self.palette.danger),
            )));
        }

        let height = (lines.len() as u16 + 2).min(layout[0].height);
        let panel_area = centered_rect(44, height, layout[0]);
        frame.render_widget(Clear, panel_area);
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Settings"))
            .style(self.palette.base())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, panel_area);

        self.render_status(frame, layout[1]);
    }

    fn draw_play(&self, frame: &mut Frame) {
        let area = frame.size();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_stats(frame, rows[0]);
        self.render_grid(frame, rows[1]);
        self.render_status(frame, rows[2]);

        if let Some(dialog) = self.board.dialog.as_ref() {
            self.render_result(frame, area, dialog);
        }
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let timer = match self.board.remaining {
            Some(secs) => format!("{secs}s"),
            None => "--".to_string(),
        };
        let timer_style = match self.board.remaining {
            Some(secs) if secs <= 10 => Style::default().fg(self.palette.warning),
            _ => Style::default().fg(self.palette.primary_fg),
        };
        let controls = if self.board.controls_enabled {
            Style::default().fg(self.palette.primary_fg)
        } else {
            Style::default().fg(self.palette.muted)
        };
        let line = Line::from(vec![
            Span::raw(format!("Moves: {}   ", self.board.moves)),
            Span::raw(format!("Score: {}   ", self.board.score)),
            Span::styled(format!("Time: {timer}"), timer_style),
            Span::raw("   "),
            Span::styled("[r] restart  [x] exit", controls),
            Span::styled(
                format!("  [t] {}", self.theme_label),
                Style::default().fg(self.palette.muted),
            ),
        ]);
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(format!(
            "{}x{}",
            self.board.columns, self.board.rows
        ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cell_size = self.board.cell_size();
        let grid_w = span(cell_size.0, self.board.columns);
        let grid_h = span(cell_size.1, self.board.rows);
        let origin = centered_rect(grid_w, grid_h, inner);
        let columns = self.board.columns.max(1) as usize;
        let playing = self.session.phase() == Phase::Playing;

        for index in 0..self.board.faces.len() {
            let Some(cell) = card_rect(origin, inner, cell_size, index, columns) else {
                continue;
            };

            let face = self.board.faces[index];
            let mut style = match face {
                CardFace::Hidden => Style::default().fg(self.palette.muted),
                CardFace::Revealed => Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
                CardFace::Matched => Style::default().fg(self.palette.success),
                CardFace::Shaking => Style::default()
                    .fg(self.palette.danger)
                    .add_modifier(Modifier::BOLD),
            };
            if playing && index == self.cursor {
                style = style
                    .bg(self.palette.selection_bg)
                    .fg(self.palette.selection_fg);
            }

            let label = if self.board.shows_face(index) {
                self.session
                    .grid()
                    .and_then(|grid| grid.card(index))
                    .map(|card| card_symbol(card.value()))
                    .unwrap_or_default()
            } else {
                "?".to_string()
            };
            let pad = cell_size.1.saturating_sub(3) / 2;
            let mut lines = vec![Line::from(""); pad as usize];
            lines.push(Line::from(label));
            let card = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(style));
            frame.render_widget(card, cell);
        }
    }

    fn render_result(&self, frame: &mut Frame, area: Rect, dialog: &ResultDialog) {
        let width = 56.min(area.width.saturating_sub(4));
        let popup = centered_rect(width, 7, area);
        frame.render_widget(Clear, popup);
        let lines = vec![
            Line::from(dialog.text.clone()),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("[p] {}", dialog.retry_label),
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled("[m] exit", Style::default().fg(self.palette.primary_fg)),
            ]),
        ];
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(dialog.title.clone()),
            )
            .style(self.palette.base())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let paragraph = Paragraph::new(Line::from(self.status.clone()))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

/// Next value of the settings field at `field` after one step in `delta`'s direction.
fn step_setting(draft: &SessionConfig, field: usize, delta: i32) -> SettingChange {
    let step = |value: u32, by: u32| {
        if delta < 0 {
            value.saturating_sub(by)
        } else {
            value.saturating_add(by)
        }
    };
    match field {
        0 => SettingChange::CardWidth(step(draft.card_width, 10)),
        1 => SettingChange::CardHeight(step(draft.card_height, 10)),
        2 => SettingChange::Columns(step(draft.columns, 1)),
        3 => SettingChange::Rows(step(draft.rows, 1)),
        4 => SettingChange::TimeLimit(step(draft.time_limit, 5)),
        _ => SettingChange::Theme(draft.theme.toggled()),
    }
}

/// Cells taken by `count` cards of `cell` cells each, clamped to the terminal range.
fn span(cell: u16, count: u32) -> u16 {
    u16::try_from(count).map_or(u16::MAX, |count| cell.saturating_mul(count))
}

/// Screen area of card `index`, or `None` when it falls outside `bounds`.
fn card_rect(
    origin: Rect,
    bounds: Rect,
    (cell_w, cell_h): (u16, u16),
    index: usize,
    columns: usize,
) -> Option<Rect> {
    let col = u16::try_from(index % columns).ok()?;
    let row = u16::try_from(index / columns).ok()?;
    let x = origin.x.checked_add(col.checked_mul(cell_w)?)?;
    let y = origin.y.checked_add(row.checked_mul(cell_h)?)?;
    if x.checked_add(cell_w)? > bounds.right() || y.checked_add(cell_h)? > bounds.bottom() {
        return None;
    }
    Some(Rect::new(x, y, cell_w, cell_h))
}

fn card_symbol(value: u32) -> String {
    match char::from_u32('A' as u32 + value) {
        Some(ch) if value < 26 => ch.to_string(),
        _ => (value + 1).to_string(),
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
