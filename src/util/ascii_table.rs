/// An ascii table
#[derive(Debug)]
pub struct AsciiTable {
    data: Vec<Vec<String>>,

    max_cell_widths: Vec<usize>,
    padding: usize,
}

impl AsciiTable {
    /// Make a new table
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![vec![String::new(); width]; height],
            max_cell_widths: vec![0; width],
            padding: 0,
        }
    }

    /// Set the number of spaces added around each cell's contents.
    pub fn set_padding(&mut self, padding: usize) {
        self.padding = padding;
    }

    /// Set the value of the given cell.
    ///
    /// Indexing starts at 0. It starts at the top left corner and ends at the bottom right.
    pub fn set_cell(&mut self, x: usize, y: usize, data: impl Into<String>) {
        let data = data.into();
        self.max_cell_widths[x] = std::cmp::max(self.max_cell_widths[x], data.len());
        self.data[y][x] = data;
    }

    fn fmt_row_border(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+")?;
        for max_cell_width in self.max_cell_widths.iter() {
            write!(f, "{}+", "-".repeat(max_cell_width + self.padding * 2))?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl std::fmt::Display for AsciiTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.data.iter() {
            self.fmt_row_border(f)?;

            for (cell, max_cell_width) in row.iter().zip(self.max_cell_widths.iter()) {
                let padding = max_cell_width.saturating_sub(cell.len());
                let left = padding / 2 + self.padding;
                let right = (padding / 2) + padding % 2 + self.padding;

                write!(f, "|{}{}{}", " ".repeat(left), cell, " ".repeat(right))?;
            }
            writeln!(f, "|")?;
        }
        self.fmt_row_border(f)?;

        Ok(())
    }
}
