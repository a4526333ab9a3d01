use crossterm::event::KeyEvent;
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Rect, Size},
    style::{Modifier, Style},
    widgets::Widget,
    Terminal,
};

use crate::error::Result;
use crate::runtime::{KeySource, Wait};

/// Character-grid display the game draws on and reads keys from
pub trait Surface {
    /// Current size in cells.
    fn size(&self) -> Size;

    /// Write `text` starting at (`row`, `col`). Cells outside the surface are dropped.
    fn put(&mut self, row: u16, col: u16, text: &str, style: Style);

    /// Blank the whole surface. Takes effect on the next `present`.
    fn clear(&mut self) -> Result<()>;

    /// Flush pending writes to the screen and park the cursor at the origin.
    fn present(&mut self) -> Result<()>;

    fn read_key(&mut self, wait: Wait) -> Result<Option<KeyEvent>>;
}

pub fn plain() -> Style {
    Style::default()
}

pub fn reversed() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

/// Copies an off-screen canvas into the frame
struct CanvasView<'a>(&'a Buffer);

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let shared = area.intersection(self.0.area);
        for y in shared.top()..shared.bottom() {
            for x in shared.left()..shared.right() {
                buf[(x, y)] = self.0[(x, y)].clone();
            }
        }
    }
}

/// Surface backed by a ratatui terminal and a key source
pub struct TerminalSurface<B: Backend, K: KeySource> {
    terminal: Terminal<B>,
    canvas: Buffer,
    keys: K,
}

impl<B: Backend, K: KeySource> TerminalSurface<B, K> {
    pub fn new(terminal: Terminal<B>, keys: K) -> Result<Self> {
        let size = terminal.size()?;
        Ok(Self {
            terminal,
            canvas: Buffer::empty(Rect::new(0, 0, size.width, size.height)),
            keys,
        })
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.terminal.backend_mut()
    }

    pub fn canvas(&self) -> &Buffer {
        &self.canvas
    }
}

impl<B: Backend, K: KeySource> Surface for TerminalSurface<B, K> {
    fn size(&self) -> Size {
        Size::new(self.canvas.area.width, self.canvas.area.height)
    }

    fn put(&mut self, row: u16, col: u16, text: &str, style: Style) {
        let area = self.canvas.area;
        if row >= area.height || col >= area.width {
            return;
        }
        let room = (area.width - col) as usize;
        self.canvas.set_stringn(col, row, text, room, style);
    }

    fn clear(&mut self) -> Result<()> {
        // pick up terminal resizes between rounds
        let size = self.terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        if area != self.canvas.area {
            self.canvas.resize(area);
        }
        self.canvas.reset();
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let canvas = &self.canvas;
        self.terminal.draw(|f| {
            f.render_widget(CanvasView(canvas), f.area());
            f.set_cursor_position((0, 0));
        })?;
        Ok(())
    }

    fn read_key(&mut self, wait: Wait) -> Result<Option<KeyEvent>> {
        self.keys.next_key(wait)
    }
}

/// Text of one buffer row with trailing blanks removed
pub fn row_text(buf: &Buffer, row: u16) -> String {
    let area = buf.area;
    if row >= area.height {
        return String::new();
    }
    (area.left()..area.right())
        .map(|x| buf[(x, area.top() + row)].symbol())
        .collect::<String>()
        .trim_end()
        .to_string()
}
