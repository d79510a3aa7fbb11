//! Interactive tone-curve editor in the terminal.
//!
//! Click inside the plot to add a point and drag to move it. Double-click an
//! interior point to delete it. The R/G/B buttons switch channels. The graph
//! below the editor shows the active channel's lookup table.
//!
//! Keys:
//!   W        cycle waveform shape
//!   + / -    change frequency
//!   [ / ]    shift phase offset
//!   I        toggle invert
//!   A        apply waveform to the active channel
//!   R        reset the active channel
//!   D        delete the selected point
//!   1 2 3    select red, green, blue
//!   Q / ESC  quit

mod common;

use anyhow::Result;
use common::{KeyAction, is_quit_key, run_interactive_example};
use crossterm::{
    cursor::MoveTo,
    event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};
use std::time::{Duration, Instant};
use tonecurve::editor::{Color, Pos, Rect, TextAlign, TextStyle};
use tonecurve::{
    Channel, CurvePlot, EditSession, EditorConfig, InputRouter, PointerEvent, RenderSurface,
    WaveformKind,
};

/// Pixel size of one terminal cell.
const CELL_W: f64 = 4.0;
const CELL_H: f64 = 8.0;
const DOUBLE_CLICK: Duration = Duration::from_millis(400);
const STATUS_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    fg: Option<TermColor>,
    bg: Option<TermColor>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
        }
    }
}

/// A character grid that the editor draws onto.
struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols * rows],
        }
    }

    fn cell_at(&mut self, col: i64, row: i64) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        self.cells.get_mut(row as usize * self.cols + col as usize)
    }

    fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        let (col, row) = cell_index(pos);
        self.cell_at(col, row)
    }

    /// Every cell whose center lies inside `rect`.
    fn cells_in(&self, rect: Rect) -> Vec<(i64, i64)> {
        let mut found = Vec::new();
        for row in 0..self.rows as i64 {
            for col in 0..self.cols as i64 {
                if rect.contains(cell_center(col, row)) {
                    found.push((col, row));
                }
            }
        }
        found
    }

    fn flush(&self, out: &mut impl Write) -> Result<()> {
        for (row, line) in self.cells.chunks(self.cols.max(1)).enumerate() {
            queue!(out, MoveTo(0, row as u16))?;
            for cell in line {
                queue!(
                    out,
                    SetBackgroundColor(cell.bg.unwrap_or(TermColor::Reset)),
                    SetForegroundColor(cell.fg.unwrap_or(TermColor::Reset)),
                    Print(cell.ch)
                )?;
            }
        }
        queue!(out, ResetColor)?;
        Ok(())
    }
}

fn cell_index(pos: Pos) -> (i64, i64) {
    ((pos.x / CELL_W).floor() as i64, (pos.y / CELL_H).floor() as i64)
}

fn cell_center(col: i64, row: i64) -> Pos {
    Pos::new((col as f64 + 0.5) * CELL_W, (row as f64 + 0.5) * CELL_H)
}

/// Blends translucent colours against the widget background.
fn term_color(color: Color) -> TermColor {
    let bg = Color::BACKGROUND;
    let mix = |v: u8, b: u8| (v as f64 * color.a + b as f64 * (1.0 - color.a)).round() as u8;
    TermColor::Rgb {
        r: mix(color.r, bg.r),
        g: mix(color.g, bg.g),
        b: mix(color.b, bg.b),
    }
}

impl RenderSurface for Grid {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        for (col, row) in self.cells_in(rect) {
            if let Some(cell) = self.cell_at(col, row) {
                *cell = Cell {
                    bg: Some(term_color(color)),
                    ..Cell::default()
                };
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, _width: f64) {
        let cells = self.cells_in(rect);
        let Some(&(first_col, first_row)) = cells.first() else {
            return;
        };
        let Some(&(last_col, last_row)) = cells.last() else {
            return;
        };
        for (col, row) in cells {
            let edge = col == first_col || col == last_col || row == first_row || row == last_row;
            if let Some(cell) = self.cell_at(col, row).filter(|_| edge) {
                cell.bg = Some(term_color(color));
            }
        }
    }

    fn stroke_path(&mut self, points: &[Pos], color: Color, _width: f64) {
        let fg = term_color(color);
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let steps = ((b.x - a.x).abs() / CELL_W)
                .max((b.y - a.y).abs() / CELL_H)
                .ceil() as usize
                * 2
                + 1;
            for i in 0..=steps {
                let t = i as f64 / steps as f64;
                let pos = Pos::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
                if let Some(cell) = self.cell_mut(pos) {
                    cell.ch = '•';
                    cell.fg = Some(fg);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Pos, radius: f64, color: Color) {
        if let Some(cell) = self.cell_mut(center) {
            cell.ch = if radius > 5.0 { '◉' } else { '●' };
            cell.fg = Some(term_color(color));
        }
    }

    // Point outlines are thinner than a cell.
    fn stroke_circle(&mut self, _center: Pos, _radius: f64, _color: Color, _width: f64) {}

    fn text(&mut self, text: &str, at: Pos, style: TextStyle) {
        let len = text.chars().count() as i64;
        let (col, row) = cell_index(at);
        let start = match style.align {
            TextAlign::Left => col,
            TextAlign::Center => col - len / 2,
            TextAlign::Right => col - len,
        };
        let fg = term_color(style.color);
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_at(start + i as i64, row) {
                cell.ch = ch;
                cell.fg = Some(fg);
            }
        }
    }
}

/// Classifies crossterm mouse events, turning two quick presses on the same
/// cell into a double-click.
#[derive(Default)]
struct MouseRouter {
    last_press: Option<(Instant, u16, u16)>,
}

impl InputRouter for MouseRouter {
    type Raw = MouseEvent;

    fn classify(&mut self, raw: &MouseEvent) -> Option<PointerEvent> {
        let pos = cell_center(raw.column as i64, raw.row as i64);
        match raw.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let now = Instant::now();
                let double = self.last_press.is_some_and(|(at, col, row)| {
                    now.duration_since(at) < DOUBLE_CLICK && col == raw.column && row == raw.row
                });
                if double {
                    self.last_press = None;
                    Some(PointerEvent::double_click(pos))
                } else {
                    self.last_press = Some((now, raw.column, raw.row));
                    Some(PointerEvent::down(pos))
                }
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                Some(PointerEvent::moved(pos))
            }
            MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::up(pos)),
            _ => None,
        }
    }
}

struct DemoState {
    session: EditSession,
    router: MouseRouter,
    plot: CurvePlot,
}

impl DemoState {
    fn new() -> Self {
        let session = EditSession::new(EditorConfig::advanced());
        let plot = lut_plot(&session);
        Self {
            session,
            router: MouseRouter::default(),
            plot,
        }
    }

    fn update_waveform(&mut self, edit: impl FnOnce(&mut tonecurve::WaveformParameters)) {
        let mut params = *self.session.waveform();
        edit(&mut params);
        self.session.set_waveform(params.sanitized());
    }
}

fn lut_plot(session: &EditSession) -> CurvePlot {
    let luts = session.output();
    CurvePlot::from_values(luts.get(session.active_channel()).values().iter().copied())
}

fn next_kind(kind: WaveformKind) -> WaveformKind {
    let index = WaveformKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(0);
    WaveformKind::ALL[(index + 1) % WaveformKind::ALL.len()]
}

fn draw_ui(state: &mut DemoState) -> Result<()> {
    let (cols, rows) = crossterm::terminal::size()?;
    let grid_rows = rows.saturating_sub(STATUS_ROWS);
    let mut grid = Grid::new(cols as usize, grid_rows as usize);

    let min_width = state.session.min_size().0;
    let width = (cols as f64 * CELL_W).max(min_width);
    let (_, editor_height) = state.session.compute_size(width);

    state.session.draw(&mut grid, width, 0.0);
    if state.session.take_dirty() {
        state.plot = lut_plot(&state.session);
    }
    state.plot.draw(&mut grid, width, editor_height + CELL_H);

    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;
    grid.flush(&mut out)?;

    let params = state.session.waveform();
    queue!(
        out,
        MoveTo(0, grid_rows),
        Print(format!(
            "{} | {} x{} offset {:+.1}{} | {} points",
            state.session.active_channel(),
            params.kind,
            params.frequency,
            params.offset,
            if params.invert { " inverted" } else { "" },
            state.session.curve(state.session.active_channel()).len(),
        )),
        MoveTo(0, grid_rows + 1),
        Print("W=shape +/-=freq [/]=offset I=invert A=apply R=reset D=delete 1-3=channel Q=quit"),
    )?;
    out.flush()?;
    Ok(())
}

fn handle_key(state: &mut DemoState, code: KeyCode) -> KeyAction {
    match code {
        code if is_quit_key(code) => return KeyAction::Exit,
        KeyCode::Char('w') | KeyCode::Char('W') => {
            state.update_waveform(|p| p.kind = next_kind(p.kind))
        }
        KeyCode::Char('+') | KeyCode::Char('=') => state.update_waveform(|p| p.frequency += 1.0),
        KeyCode::Char('-') => state.update_waveform(|p| p.frequency -= 1.0),
        KeyCode::Char('[') => state.update_waveform(|p| p.offset -= 0.1),
        KeyCode::Char(']') => state.update_waveform(|p| p.offset += 0.1),
        KeyCode::Char('i') | KeyCode::Char('I') => state.update_waveform(|p| p.invert = !p.invert),
        KeyCode::Char('a') | KeyCode::Char('A') => state.session.apply_waveform(),
        KeyCode::Char('r') | KeyCode::Char('R') => state.session.reset_channel(),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            state.session.delete_selected();
        }
        KeyCode::Char('1') => state.session.set_active_channel(Channel::Red),
        KeyCode::Char('2') => state.session.set_active_channel(Channel::Green),
        KeyCode::Char('3') => state.session.set_active_channel(Channel::Blue),
        _ => {}
    }
    KeyAction::Continue
}

fn main() -> Result<()> {
    run_interactive_example(DemoState::new(), draw_ui, |state, event| {
        Ok(match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key.code),
            Event::Mouse(mouse) => {
                state.session.route(&mut state.router, mouse);
                KeyAction::Continue
            }
            _ => KeyAction::Continue,
        })
    })
}
