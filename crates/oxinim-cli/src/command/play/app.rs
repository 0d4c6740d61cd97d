use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use oxinim_engine::{GameSeed, Move, SessionState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Text},
    widgets::Block,
};

use crate::{
    game::{GameConfig, Match},
    schema::record::RecordedGame,
    tui::{App, Tui},
    ui::widgets::{HeapsDisplay, Selection, StatusDisplay, style},
};

#[derive(Debug)]
pub struct PlayApp {
    game: Match,
    selection: Selection,
    message: Option<String>,
    ai_delay: Duration,
    recordings: Vec<RecordedGame>,
    error: Option<anyhow::Error>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(config: GameConfig, seed: GameSeed, ai_delay: Duration) -> Self {
        let game = Match::new(config, seed);
        let mut app = Self {
            game,
            selection: Selection { heap: 0, count: 1 },
            message: None,
            ai_delay,
            recordings: vec![],
            error: None,
            is_exiting: false,
        };
        app.normalize_selection();
        app
    }

    /// Returns the recorded games and the error that stopped the session, if any.
    ///
    /// A game quit before its last move is recorded without a winner.
    pub fn finish(mut self) -> (Vec<RecordedGame>, anyhow::Result<()>) {
        if self.game.session().state().is_playing() && self.game.session().turn() > 0 {
            self.recordings.push(self.game.to_record());
        }
        let result = self.error.map_or(Ok(()), Err);
        (self.recordings, result)
    }

    fn selected_heap_size(&self) -> u32 {
        self.game.session().heaps()[self.selection.heap]
    }

    /// Moves the selection to a nonempty heap and clamps the count to its size.
    fn normalize_selection(&mut self) {
        let heaps = self.game.session().heaps();
        if heaps[self.selection.heap] == 0
            && let Some(heap) = heaps
                .nonempty_indices()
                .find(|&i| i > self.selection.heap)
                .or_else(|| heaps.nonempty_indices().next())
        {
            self.selection.heap = heap;
        }
        self.selection.count = self.selection.count.clamp(1, self.selected_heap_size().max(1));
    }

    fn select_heap(&mut self, forward: bool) {
        let heaps = self.game.session().heaps();
        let current = self.selection.heap;
        let next = if forward {
            heaps.nonempty_indices().find(|&i| i > current)
        } else {
            heaps.nonempty_indices().filter(|&i| i < current).last()
        };
        if let Some(heap) = next {
            self.selection.heap = heap;
            self.normalize_selection();
        }
    }

    fn change_count(&mut self, increase: bool) {
        let size = self.selected_heap_size().max(1);
        self.selection.count = if increase {
            (self.selection.count + 1).min(size)
        } else {
            (self.selection.count - 1).max(1)
        };
    }

    fn take(&mut self, tui: &mut Tui) {
        let mv = Move::new(self.selection.heap, self.selection.count);
        match self.game.play_human_move(mv) {
            Ok(()) => {
                self.message = None;
                self.after_move(tui);
            }
            Err(err) => self.message = Some(format!("Can't {mv}: {err}")),
        }
    }

    fn after_move(&mut self, tui: &mut Tui) {
        if self.game.session().state().is_finished() {
            self.recordings.push(self.game.to_record());
            tui.set_wakeup(None);
            return;
        }
        self.normalize_selection();
        if self.game.is_computer_turn() {
            tui.wake_after(self.ai_delay);
        }
    }

    fn new_game(&mut self, tui: &mut Tui) {
        self.game = self.game.next_game();
        self.message = None;
        self.selection = Selection { heap: 0, count: 1 };
        self.normalize_selection();
        if self.game.is_computer_turn() {
            tui.wake_after(self.ai_delay);
        }
    }

    fn help_text(&self) -> &'static str {
        match self.game.session().state() {
            SessionState::Playing if self.game.is_human_turn() => {
                "Controls: ↑ ↓ (Heap) | ← → (Count) | Enter (Take) | Q (Quit)"
            }
            SessionState::Playing => "Computer is thinking... | Q (Quit)",
            SessionState::Finished { .. } => "Controls: N (New Game) | Q (Quit)",
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        if self.game.is_computer_turn() {
            tui.wake_after(self.ai_delay);
        }
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        let is_human_turn = self.game.is_human_turn();
        let is_finished = self.game.session().state().is_finished();

        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Up if is_human_turn => self.select_heap(false),
                KeyCode::Down if is_human_turn => self.select_heap(true),
                KeyCode::Left if is_human_turn => self.change_count(false),
                KeyCode::Right if is_human_turn => self.change_count(true),
                KeyCode::Enter if is_human_turn => self.take(tui),
                KeyCode::Char('n') if is_finished => self.new_game(tui),
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let heaps = self.game.session().heaps();
        let selection = self.game.is_human_turn().then_some(self.selection);
        let title = if self.game.session().win_condition().is_misere() {
            " NIM (misère) "
        } else {
            " NIM "
        };
        let heaps_display = HeapsDisplay::new(heaps).selection(selection).block(
            Block::bordered()
                .title(Line::from(title).centered())
                .style(style::DEFAULT),
        );
        let status_display = StatusDisplay::new(&self.game)
            .message(self.message.as_deref())
            .block(Block::bordered().style(style::DEFAULT));
        let help_text = Text::from(self.help_text())
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let width = u16::max(heaps_display.width(), status_display.width());
        let [heaps_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(heaps_display.height()),
            Constraint::Length(status_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let heaps_area = heaps_area.centered_horizontally(Constraint::Length(width));
        let status_area = status_area.centered_horizontally(Constraint::Length(width));

        frame.render_widget(heaps_display, heaps_area);
        frame.render_widget(status_display, status_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        if !self.game.is_computer_turn() {
            return;
        }
        match self.game.play_computer_move() {
            Ok(_) => self.after_move(tui),
            Err(err) => {
                self.error = Some(err.context("computer failed to move"));
                self.is_exiting = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use oxinim_engine::{HeapLayout, Side};

    use super::*;
    use crate::game::{FirstMover, Opponent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app(opponent: Opponent, first: FirstMover) -> PlayApp {
        let config = GameConfig {
            opponent,
            first,
            layout: HeapLayout::Staircase,
            ..GameConfig::default()
        };
        PlayApp::new(config, GameSeed::from_bytes([11; 16]), Duration::ZERO)
    }

    #[test]
    fn test_count_is_clamped_to_heap_size() {
        let mut app = app(Opponent::Human, FirstMover::You);
        let mut tui = Tui::new();
        // staircase: heap #1 holds a single item
        app.handle_event(&mut tui, key(KeyCode::Right));
        assert_eq!(app.selection, Selection { heap: 0, count: 1 });

        app.handle_event(&mut tui, key(KeyCode::Down));
        app.handle_event(&mut tui, key(KeyCode::Right));
        app.handle_event(&mut tui, key(KeyCode::Right));
        app.handle_event(&mut tui, key(KeyCode::Right));
        assert_eq!(app.selection, Selection { heap: 1, count: 3 });

        app.handle_event(&mut tui, key(KeyCode::Left));
        assert_eq!(app.selection.count, 2);
        app.handle_event(&mut tui, key(KeyCode::Up));
        assert_eq!(app.selection, Selection { heap: 0, count: 1 });
    }

    #[test]
    fn test_take_skips_emptied_heap() {
        let mut app = app(Opponent::Human, FirstMover::You);
        let mut tui = Tui::new();
        app.handle_event(&mut tui, key(KeyCode::Enter));

        assert_eq!(app.game.session().heaps()[0], 0);
        assert_eq!(app.game.session().to_move(), Side::Second);
        assert_eq!(app.selection.heap, 1);
        app.handle_event(&mut tui, key(KeyCode::Up));
        assert_eq!(app.selection.heap, 1);
        assert!(!tui.is_wakeup_scheduled());
    }

    #[test]
    fn test_rejected_move_shows_message() {
        let mut app = app(Opponent::Human, FirstMover::You);
        let mut tui = Tui::new();
        app.selection.count = 99;
        app.handle_event(&mut tui, key(KeyCode::Enter));

        assert_eq!(app.game.session().turn(), 0);
        assert!(app.message.as_deref().is_some_and(|msg| msg.starts_with("Can't take 99")));
    }

    #[test]
    fn test_computer_moves_on_wakeup() {
        let mut app = app(Opponent::Computer, FirstMover::Opponent);
        let mut tui = Tui::new();
        app.init(&mut tui);
        assert!(tui.is_wakeup_scheduled());

        // keys are ignored while the computer is to move
        app.handle_event(&mut tui, key(KeyCode::Enter));
        assert_eq!(app.game.session().turn(), 0);

        app.update(&mut tui);
        assert_eq!(app.game.session().turn(), 1);
        assert!(app.game.is_human_turn());
    }

    #[test]
    fn test_quit_records_unfinished_game() {
        let mut app = app(Opponent::Human, FirstMover::You);
        let mut tui = Tui::new();
        app.handle_event(&mut tui, key(KeyCode::Enter));
        app.handle_event(&mut tui, key(KeyCode::Char('q')));
        assert!(app.should_exit());

        let (recordings, result) = app.finish();
        assert!(result.is_ok());
        assert_eq!(recordings.len(), 1);
        assert_eq!(recordings[0].winner, None);
        assert_eq!(recordings[0].moves.len(), 1);
    }

    #[test]
    fn test_finished_game_then_new_game() {
        let mut app = app(Opponent::Human, FirstMover::You);
        let mut tui = Tui::new();
        while app.game.session().state().is_playing() {
            app.selection.count = app.selected_heap_size();
            app.handle_event(&mut tui, key(KeyCode::Enter));
        }
        assert_eq!(app.recordings.len(), 1);
        assert!(app.recordings[0].winner.is_some());

        app.handle_event(&mut tui, key(KeyCode::Char('n')));
        assert!(app.game.session().state().is_playing());
        assert_eq!(app.game.session().turn(), 0);

        let (recordings, _) = app.finish();
        assert_eq!(recordings.len(), 1);
    }
}
