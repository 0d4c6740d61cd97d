use std::iter;

use oxinim_engine::SessionState;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::{game::Match, ui::widgets::style};

const ROWS: u16 = 6;
const MIN_WIDTH: u16 = 36;

/// Rules, turn, side to move, last move and result of a match.
pub struct StatusDisplay<'a> {
    game: &'a Match,
    message: Option<&'a str>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatusDisplay<'a> {
    pub fn new(game: &'a Match) -> Self {
        Self {
            game,
            message: None,
            block: None,
        }
    }

    /// Shows `message` (a rejected move, for instance) on the last row.
    pub fn message(self, message: Option<&'a str>) -> Self {
        Self { message, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        MIN_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        ROWS + super::block_vertical_margin(self.block.as_ref())
    }

    fn lines(&self) -> [Line<'_>; ROWS as usize] {
        let session = self.game.session();
        let label_value = |label: &str, value: String, value_style: Style| {
            Line::from(vec![
                Span::styled(format!("{label:<10}"), style::DIM),
                Span::styled(value, value_style),
            ])
        };

        let to_move = match session.state() {
            SessionState::Playing => self.game.current_player().name.clone(),
            SessionState::Finished { .. } => "-".to_owned(),
        };
        let last_move = session.last_move().map_or_else(
            || "-".to_owned(),
            |(side, mv)| {
                let name = &self.game.player(side).name;
                format!("{name} took {} from #{}", mv.count, mv.heap + 1)
            },
        );
        let result = match session.state() {
            SessionState::Playing => Line::default(),
            SessionState::Finished { winner } => Line::styled(
                format!("{} wins!", self.game.player(winner).name),
                style::WINNER,
            ),
        };
        let message = self
            .message
            .map_or_else(Line::default, |msg| Line::styled(msg.to_owned(), style::ERROR));

        [
            label_value("Rules:", session.win_condition().to_string(), style::DEFAULT),
            label_value("Turn:", (session.turn() + 1).to_string(), style::DEFAULT),
            label_value("To move:", to_move, style::SELECTED),
            label_value("Last:", last_move, style::DEFAULT),
            result,
            message,
        ]
    }
}

impl Widget for StatusDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let inner = self.block.inner_if_some(area);

        let rows_areas = Layout::vertical((0..ROWS).map(|_| Constraint::Length(1))).split(inner);
        for (line, area) in iter::zip(self.lines(), rows_areas.iter().copied()) {
            line.render(area, buf);
        }
    }
}
