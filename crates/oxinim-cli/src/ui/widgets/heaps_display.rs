use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

const ITEM: &str = "● ";
/// Width of the `> #1   13 ` prefix in front of the items.
const LABEL_WIDTH: u16 = 10;

/// The heap and count the player is about to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub heap: usize,
    pub count: u32,
}

/// Draws one row per heap, with the pending selection highlighted.
#[derive(Debug)]
pub struct HeapsDisplay<'a> {
    heaps: &'a [u32],
    selection: Option<Selection>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> HeapsDisplay<'a> {
    pub fn new(heaps: &'a [u32]) -> Self {
        Self {
            heaps,
            selection: None,
            block: None,
        }
    }

    pub fn selection(self, selection: Option<Selection>) -> Self {
        Self { selection, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let max_items = self.heaps.iter().copied().max().unwrap_or(0);
        let items_width = u16::try_from(max_items)
            .unwrap_or(u16::MAX)
            .saturating_mul(2);
        LABEL_WIDTH
            .saturating_add(items_width)
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        let rows = u16::try_from(self.heaps.len()).unwrap_or(u16::MAX);
        rows.saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }

    fn row(&self, index: usize, size: u32) -> Line<'static> {
        let taken = match self.selection {
            Some(sel) if sel.heap == index => Some(sel.count.min(size)),
            _ => None,
        };
        let (marker, label_style) = if taken.is_some() {
            ('>', style::SELECTED)
        } else if size == 0 {
            (' ', style::DIM)
        } else {
            (' ', style::DEFAULT)
        };

        let kept = size - taken.unwrap_or(0);
        let mut spans = vec![Span::styled(
            format!("{marker} #{:<2} {size:>3} ", index + 1),
            label_style,
        )];
        spans.extend((0..kept).map(|_| Span::styled(ITEM, style::ITEM)));
        spans.extend((kept..size).map(|_| Span::styled(ITEM, style::ITEM_TAKEN)));
        Line::from(spans)
    }
}

impl Widget for HeapsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows_areas =
            Layout::vertical((0..self.heaps.len()).map(|_| Constraint::Length(1))).split(area);
        for ((index, size), area) in self.heaps.iter().copied().enumerate().zip(rows_areas.iter()) {
            self.row(index, size).render(*area, buf);
        }
    }
}
