use crate::{
    Team,
    NUM_TILES,
};

/// The side length of the board
pub const BOARD_SIZE: u8 = 3;

// Allow unusual_byte_groupings as we group by 3 to visualize the board.
// Bit `row * 3 + col` is a tile, so the top left tile is the rightmost bit.
#[allow(clippy::unusual_byte_groupings)]
const COLUMN_WIN: u16 = 0b001_001_001;
const ROW_WIN: u16 = 0b111;
#[allow(clippy::unusual_byte_groupings)]
const DESCENDING_DIAGONAL_WIN: u16 = 0b100_010_001;
#[allow(clippy::unusual_byte_groupings)]
const ASCENDING_DIAGONAL_WIN: u16 = 0b001_010_100;

/// A coordinate was out of bounds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("({row}, {col}) is not on the board")]
pub struct InvalidCoordError {
    pub row: u8,
    pub col: u8,
}

/// A tile position on the board.
///
/// Both components are in `0..3`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    /// Make a new [`Coord`].
    ///
    /// # Panics
    /// Panics if either component is >= 3.
    pub fn new(row: u8, col: u8) -> Self {
        Self::try_new(row, col).expect("coord out of bounds")
    }

    /// Make a new [`Coord`], returning an error if it is off the board.
    pub fn try_new(row: u8, col: u8) -> Result<Self, InvalidCoordError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(InvalidCoordError { row, col });
        }

        Ok(Self { row, col })
    }

    /// Make a [`Coord`] from a row-major tile index.
    ///
    /// # Panics
    /// Panics if the index >= 9.
    pub fn from_index(index: u8) -> Self {
        assert!(index < NUM_TILES);
        Self {
            row: index / BOARD_SIZE,
            col: index % BOARD_SIZE,
        }
    }

    /// Get the row-major tile index.
    pub fn index(self) -> u8 {
        self.row * BOARD_SIZE + self.col
    }

    fn mask(self) -> u16 {
        1 << self.index()
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A line of 3 tiles that wins the game when filled by one team.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Line {
    /// A column, by index
    Column(u8),

    /// A row, by index
    Row(u8),

    /// Top left to bottom right
    DescendingDiagonal,

    /// Bottom left to top right
    AscendingDiagonal,
}

impl Line {
    /// All lines, in the order they are checked for a win.
    pub const ALL: [Self; 8] = [
        Self::Column(0),
        Self::Column(1),
        Self::Column(2),
        Self::Row(0),
        Self::Row(1),
        Self::Row(2),
        Self::DescendingDiagonal,
        Self::AscendingDiagonal,
    ];

    fn mask(self) -> u16 {
        match self {
            Self::Column(col) => COLUMN_WIN << col,
            Self::Row(row) => ROW_WIN << (row * BOARD_SIZE),
            Self::DescendingDiagonal => DESCENDING_DIAGONAL_WIN,
            Self::AscendingDiagonal => ASCENDING_DIAGONAL_WIN,
        }
    }

    /// Get the tiles that make up this line.
    ///
    /// The first and last are the ends of the line, for drawing a strike-through.
    pub fn coords(self) -> [Coord; 3] {
        match self {
            Self::Column(col) => [Coord::new(0, col), Coord::new(1, col), Coord::new(2, col)],
            Self::Row(row) => [Coord::new(row, 0), Coord::new(row, 1), Coord::new(row, 2)],
            Self::DescendingDiagonal => [Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)],
            Self::AscendingDiagonal => [Coord::new(2, 0), Coord::new(1, 1), Coord::new(0, 2)],
        }
    }
}

/// The line that won a game, and who filled it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WinLine {
    /// The winning team
    pub team: Team,

    /// The filled line
    pub line: Line,
}

/// A Tic Tac Toe board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    // the bitboard
    // 9 tiles, so it cannot fit in a u8 but can fit in a u16
    x_state: u16,
    o_state: u16,
}

impl Board {
    /// Make a new, empty [`Board`].
    pub fn new() -> Self {
        Board {
            x_state: 0,
            o_state: 0,
        }
    }

    fn occupied(self) -> u16 {
        self.x_state | self.o_state
    }

    /// Mark an empty tile for a team.
    ///
    /// # Panics
    /// Panics if the tile is already marked.
    /// Callers must check [`Self::is_cell_empty`] first.
    pub fn mark(&mut self, coord: Coord, team: Team) {
        assert!(self.is_cell_empty(coord), "tile {coord} is already marked");

        match team {
            Team::X => self.x_state |= coord.mask(),
            Team::O => self.o_state |= coord.mask(),
        }
    }

    /// Return a copy of this board with the tile marked.
    ///
    /// # Panics
    /// Panics if the tile is already marked.
    #[must_use]
    pub fn with_mark(mut self, coord: Coord, team: Team) -> Self {
        self.mark(coord, team);
        self
    }

    /// Get the tile at the coord.
    pub fn get(self, coord: Coord) -> Option<Team> {
        let mask = coord.mask();
        if self.x_state & mask != 0 {
            Some(Team::X)
        } else if self.o_state & mask != 0 {
            Some(Team::O)
        } else {
            None
        }
    }

    /// Returns true if nobody has marked the tile.
    pub fn is_cell_empty(self, coord: Coord) -> bool {
        self.occupied() & coord.mask() == 0
    }

    /// The number of marked tiles.
    pub fn marked_count(self) -> u8 {
        // At most 9, so this cannot truncate.
        self.occupied().count_ones() as u8
    }

    /// Returns true if every tile is marked.
    ///
    /// This does not check for wins.
    pub fn is_full(self) -> bool {
        self.marked_count() >= NUM_TILES
    }

    /// Returns true if no tile is marked.
    pub fn is_empty(self) -> bool {
        self.marked_count() == 0
    }

    /// Get the winning team, if there is one.
    pub fn terminal_state(self) -> Option<Team> {
        self.winning_line().map(|win| win.team)
    }

    /// Get the first filled line.
    ///
    /// Lines are checked in the order of [`Line::ALL`]:
    /// columns, then rows, then the descending and ascending diagonals.
    pub fn winning_line(self) -> Option<WinLine> {
        Line::ALL.into_iter().find_map(|line| {
            let mask = line.mask();
            let team = if self.x_state & mask == mask {
                Team::X
            } else if self.o_state & mask == mask {
                Team::O
            } else {
                return None;
            };

            Some(WinLine { team, line })
        })
    }

    /// Get an iterator over the empty tiles, in row-major order.
    pub fn empty_cells(self) -> EmptyCells {
        EmptyCells {
            occupied: self.occupied(),
            index: 0,
        }
    }

    /// Get an iterator over the tiles.
    ///
    /// The iterator starts at the top left and ends at the bottom right.
    pub fn iter(self) -> impl Iterator<Item = (Coord, Option<Team>)> {
        (0..NUM_TILES).map(move |index| {
            let coord = Coord::from_index(index);
            (coord, self.get(coord))
        })
    }
}

/// An iterator over the empty tiles of a [`Board`].
#[derive(Debug, Clone)]
pub struct EmptyCells {
    occupied: u16,
    index: u8,
}

impl Iterator for EmptyCells {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < NUM_TILES {
            let index = self.index;
            self.index += 1;

            if self.occupied & (1 << index) == 0 {
                return Some(Coord::from_index(index));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(usize::from(NUM_TILES - self.index)))
    }
}

impl std::iter::FusedIterator for EmptyCells {}

#[cfg(test)]
mod test {
    use super::*;

    fn board_from_str(s: &str) -> Board {
        let mut board = Board::new();
        for (index, c) in s.chars().filter(|c| !c.is_whitespace()).enumerate() {
            let coord = Coord::from_index(index.try_into().unwrap());
            match c {
                'X' => board.mark(coord, Team::X),
                'O' => board.mark(coord, Team::O),
                '.' => {}
                c => panic!("invalid tile `{c}`"),
            }
        }
        board
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(!board.is_full());
        assert_eq!(board.marked_count(), 0);
        assert_eq!(board.empty_cells().count(), 9);
        assert_eq!(board.terminal_state(), None);
    }

    #[test]
    fn mark_counts() {
        let mut board = Board::new();
        board.mark(Coord::new(1, 1), Team::X);
        board.mark(Coord::new(0, 2), Team::O);

        assert_eq!(board.marked_count(), 2);
        assert!(!board.is_empty());
        assert!(!board.is_cell_empty(Coord::new(1, 1)));
        assert_eq!(board.get(Coord::new(1, 1)), Some(Team::X));
        assert_eq!(board.get(Coord::new(0, 2)), Some(Team::O));
        assert_eq!(board.get(Coord::new(0, 0)), None);
    }

    #[test]
    #[should_panic(expected = "already marked")]
    fn mark_occupied_panics() {
        let mut board = Board::new();
        board.mark(Coord::new(0, 0), Team::X);
        board.mark(Coord::new(0, 0), Team::O);
    }

    #[test]
    fn empty_cells_row_major() {
        let board = board_from_str("X.O ... O.X");
        let cells: Vec<_> = board.empty_cells().collect();
        assert_eq!(
            cells,
            [
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 1),
                Coord::new(1, 2),
                Coord::new(2, 1),
            ]
        );
    }

    #[test]
    fn every_line_wins() {
        for line in Line::ALL {
            for team in [Team::X, Team::O] {
                let mut board = Board::new();
                for coord in line.coords() {
                    board.mark(coord, team);
                }

                assert_eq!(
                    board.winning_line(),
                    Some(WinLine { team, line }),
                    "{line:?} for {team}"
                );
                assert_eq!(board.terminal_state(), Some(team));
            }
        }
    }

    #[test]
    fn line_order() {
        // Both a column and a row are filled, columns are checked first.
        let board = board_from_str("XXX X.. X..");
        assert_eq!(
            board.winning_line(),
            Some(WinLine {
                team: Team::X,
                line: Line::Column(0)
            })
        );

        // An impossible board where both teams won, the first line found decides.
        let board = board_from_str("XXX OOO ...");
        assert_eq!(
            board.winning_line(),
            Some(WinLine {
                team: Team::X,
                line: Line::Row(0)
            })
        );
        let board = board_from_str("OOO XXX ...");
        assert_eq!(board.terminal_state(), Some(Team::O));
    }

    #[test]
    fn diagonals() {
        let board = board_from_str("O.X .X. XO.");
        assert_eq!(
            board.winning_line(),
            Some(WinLine {
                team: Team::X,
                line: Line::AscendingDiagonal
            })
        );

        let board = board_from_str("O.X .OX X.O");
        assert_eq!(
            board.winning_line(),
            Some(WinLine {
                team: Team::O,
                line: Line::DescendingDiagonal
            })
        );
    }

    #[test]
    fn draw() {
        let board = board_from_str("XOX XOO OXX");
        assert!(board.is_full());
        assert_eq!(board.terminal_state(), None);
        assert_eq!(board.empty_cells().next(), None);
    }

    #[test]
    fn ongoing() {
        let board = board_from_str("XO. ... ...");
        assert_eq!(board.terminal_state(), None);
        assert!(!board.is_full());
    }

    #[test]
    fn coord_bounds() {
        assert!(Coord::try_new(2, 2).is_ok());
        assert_eq!(
            Coord::try_new(3, 0),
            Err(InvalidCoordError { row: 3, col: 0 })
        );
        assert_eq!(Coord::from_index(5), Coord::new(1, 2));
        assert_eq!(Coord::new(2, 1).index(), 7);
    }

    #[test]
    fn line_coords() {
        assert_eq!(
            Line::AscendingDiagonal.coords(),
            [Coord::new(2, 0), Coord::new(1, 1), Coord::new(0, 2)]
        );
        assert_eq!(
            Line::Column(2).coords(),
            [Coord::new(0, 2), Coord::new(1, 2), Coord::new(2, 2)]
        );
    }

    #[test]
    fn iter_row_major() {
        let board = board_from_str("X.. .O. ..X");
        let tiles: Vec<_> = board.iter().collect();
        assert_eq!(tiles.len(), usize::from(NUM_TILES));
        assert_eq!(tiles[0], (Coord::new(0, 0), Some(Team::X)));
        assert_eq!(tiles[1], (Coord::new(0, 1), None));
        assert_eq!(tiles[3], (Coord::new(1, 0), None));
        assert_eq!(tiles[4], (Coord::new(1, 1), Some(Team::O)));
        assert_eq!(tiles[8], (Coord::new(2, 2), Some(Team::X)));

        for (index, (coord, team)) in tiles.into_iter().enumerate() {
            assert_eq!(usize::from(coord.index()), index);
            assert_eq!(team, board.get(coord));
        }
    }
}
