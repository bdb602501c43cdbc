use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellRects {
    pub top: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub fn shell_layout(area: Rect) -> ShellRects {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // top bar + rule
            Constraint::Min(1),    // body
            Constraint::Length(1), // footer
        ])
        .split(area);

    ShellRects {
        top: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}

/// Split `body` into `count` equal slots, choosing the column count that
/// gives each gauge the most room. `aspect` is a gauge's width over its
/// height in cells.
pub fn gauge_grid(body: Rect, count: usize, aspect: f64) -> Vec<Rect> {
    if count == 0 || body.width == 0 || body.height == 0 {
        return Vec::new();
    }
    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };

    let mut best = (1, f64::MIN);
    for cols in 1..=count {
        let rows = count.div_ceil(cols);
        let slot_w = body.width as f64 / cols as f64;
        let slot_h = body.height as f64 / rows as f64;
        let scale = (slot_w / aspect).min(slot_h);
        if scale > best.1 {
            best = (cols, scale);
        }
    }
    let cols = best.0;
    let rows = count.div_ceil(cols);

    let row_rects = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(body);
    row_rects
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
                .split(*row)
                .to_vec()
        })
        .take(count)
        .collect()
}

/// Index of the slot containing the cell at `(column, row)`.
pub fn hit_test(slots: &[Rect], column: u16, row: u16) -> Option<usize> {
    slots
        .iter()
        .position(|slot| slot.contains(Position::new(column, row)))
}
