use std::io::{self, Stdout, stdout};
use std::process;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::Frame;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::board::{Node, TOKEN_NODE_COUNT};
use crate::game::PlayerState;
use crate::players::TurnView;
use crate::types::SpecialStatus;

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// One blocking prompt: the table on the left, the question and its answers
/// on the right, recent turns underneath.
pub struct TuiApp<'a> {
    view: TurnView<'a>,
    history: &'a [String],
    question: String,
    choices: Vec<String>,
    selected: usize,
    show_tokens: bool,
    show_help: bool,
    history_scroll: u16,
    history_max_scroll: u16,
}

impl<'a> TuiApp<'a> {
    pub fn new(
        view: TurnView<'a>,
        history: &'a [String],
        question: impl Into<String>,
        choices: Vec<String>,
    ) -> Self {
        Self {
            view,
            history,
            question: question.into(),
            choices,
            selected: 0,
            show_tokens: false,
            show_help: false,
            history_scroll: u16::MAX,
            history_max_scroll: 0,
        }
    }

    /// Blocks until an answer is picked and returns its index.
    pub fn run(&mut self) -> io::Result<usize> {
        enable_raw_mode()?;
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(choice) = self.handle_key(key) {
                            break Ok(choice);
                        }
                    }
                }
            }
        };

        let _ = terminal.clear();
        let _ = disable_raw_mode();
        let _ = terminal.show_cursor();
        result
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<usize> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => quit(),
                KeyCode::Up => self.scroll_history(-1),
                KeyCode::Down => self.scroll_history(1),
                _ => {}
            }
            return None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => quit(),
            KeyCode::Char('h') => self.show_help = !self.show_help,
            KeyCode::Char('t') => self.show_tokens = !self.show_tokens,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.choices.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char(digit @ '0'..='9') => {
                let index = digit as usize - '0' as usize;
                if index < self.choices.len() {
                    return Some(index);
                }
            }
            KeyCode::Enter if !self.choices.is_empty() => return Some(self.selected),
            _ => {}
        }
        None
    }

    fn render(&mut self, f: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(12),
                Constraint::Length(10),
                Constraint::Length(3),
            ])
            .split(f.size());
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        if self.show_tokens {
            self.render_tokens(f, top[0]);
        } else {
            self.render_players(f, top[0]);
        }
        self.render_choices(f, top[1]);
        self.render_history(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);
    }

    fn render_players(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines = vec![Line::from(vec![
            Span::raw("Turn "),
            Span::styled(
                self.view.turn_no.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(if self.view.star_found {
                "   The Star of Africa has been found"
            } else {
                ""
            }),
        ])];

        for player in self.view.players {
            let is_current = player.seat == self.view.player.seat;
            let marker = if is_current { "> " } else { "  " };
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(
                    player.name.clone(),
                    Style::default()
                        .fg(seat_color(player.seat))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(if player.archetype.is_ai() { " (computer)" } else { "" }),
                Span::raw(format!("  {} pounds", player.money)),
                Span::styled(carrying(player), Style::default().fg(Color::Yellow)),
            ]));
            lines.push(Line::from(format!(
                "  {}{}",
                player.position.describe(player.offshore, &self.view.unflipped),
                status_note(player.status)
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Players"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_tokens(&self, f: &mut Frame<'_>, area: Rect) {
        let items: Vec<ListItem<'_>> = Node::ALL[..TOKEN_NODE_COUNT]
            .iter()
            .map(|&node| {
                let (label, style) = if self.view.unflipped.contains(node) {
                    ("not flipped", Style::default().fg(Color::Green))
                } else {
                    ("flipped", Style::default().fg(Color::DarkGray))
                };
                ListItem::new(format!("{}: {label}", node.full_name())).style(style)
            })
            .collect();
        let title = format!("Tokens ({} face down)", self.view.unflipped.len());
        f.render_widget(
            List::new(items).block(Block::default().borders(Borders::ALL).title(title)),
            area,
        );
    }

    fn render_choices(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3)])
            .split(area);

        let player = self.view.player;
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("{}, it is your turn. You have {} pounds.", player.name, player.money),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(self.question.clone()),
        ])
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
        f.render_widget(header, chunks[0]);

        let items: Vec<ListItem<'_>> = self
            .choices
            .iter()
            .enumerate()
            .map(|(index, choice)| ListItem::new(format!("[{index}] {choice}")))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Options"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        let mut state = ListState::default();
        state.select(Some(self.selected));
        f.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn render_history(&mut self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line<'_>> = if self.history.is_empty() {
            vec![Line::from("Nothing has happened yet.")]
        } else {
            self.history.iter().map(|entry| Line::from(entry.as_str())).collect()
        };

        let viewport_height = area.height.saturating_sub(2);
        self.history_max_scroll = (lines.len() as u16).saturating_sub(viewport_height);
        self.history_scroll = self.history_scroll.min(self.history_max_scroll);

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("History"))
            .wrap(Wrap { trim: false })
            .scroll((self.history_scroll, 0));
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let help_text = if self.show_help {
            "Up/Down: Navigate | Enter or 0-9: Choose | t: Tokens | Ctrl+Up/Down: Scroll history | q/Esc: Quit"
        } else {
            "Press 'h' for help | 't' toggles the token overview"
        };
        let paragraph = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }

    fn scroll_history(&mut self, delta: i32) {
        let scrolled = (i32::from(self.history_scroll) + delta).clamp(0, i32::from(self.history_max_scroll));
        self.history_scroll = scrolled as u16;
    }
}

fn quit() -> ! {
    let _ = disable_raw_mode();
    process::exit(0);
}

fn seat_color(seat: usize) -> Color {
    const PALETTE: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Magenta,
        Color::Green,
        Color::Cyan,
        Color::White,
    ];
    PALETTE[seat % PALETTE.len()]
}

fn carrying(player: &PlayerState) -> &'static str {
    if player.has_star {
        "  carrying the Star of Africa"
    } else if player.has_horseshoe {
        "  carrying a horseshoe"
    } else {
        ""
    }
}

fn status_note(status: SpecialStatus) -> String {
    match status {
        SpecialStatus::Free => String::new(),
        SpecialStatus::ForcedSlowSea => ", sailing slowly".to_string(),
        SpecialStatus::Ambushed => ", held by beduins".to_string(),
        SpecialStatus::Captured => ", held by pirates".to_string(),
        SpecialStatus::Enslaved(turns) => format!(", enslaved for {turns} more turns"),
    }
}
