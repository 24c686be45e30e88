use super::Cell;
use crate::layout::Rect;
use crate::text::char_width;

/// A frame of terminal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Fill every cell of `area` with `template`.
    pub fn fill(&mut self, area: Rect, template: Cell) {
        for y in area.top()..area.bottom().min(self.height) {
            for x in area.left()..area.right().min(self.width) {
                self.set(x, y, template);
            }
        }
    }

    /// Write `text` starting at `(x, y)` using `template` for colors and
    /// attributes. Characters that would cross `max_x` are dropped.
    ///
    /// Returns the column after the last written character.
    pub fn write_str(&mut self, x: u16, y: u16, text: &str, max_x: u16, template: Cell) -> u16 {
        let max_x = max_x.min(self.width);
        let mut cursor = x;

        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if cursor + w > max_x {
                break;
            }
            self.set(
                cursor,
                y,
                Cell {
                    char: ch,
                    wide_continuation: false,
                    ..template
                },
            );
            for extra in 1..w {
                self.set(
                    cursor + extra,
                    y,
                    Cell {
                        char: ' ',
                        wide_continuation: true,
                        ..template
                    },
                );
            }
            cursor += w;
        }

        cursor
    }

    /// The characters of row `y`, skipping wide-char continuation cells.
    pub fn line(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Cells of `self` that differ from `other`, with their coordinates.
    /// Both buffers must have the same dimensions.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}
