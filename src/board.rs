use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use crate::types::{Cell, Move, Player};

pub const BOARD_SIZE: usize = 8;
const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Othello board: an 8x8 grid plus the side to move.
///
/// `Board` is `Copy`; every move produces a new value, so search code can
/// branch freely without sharing mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    current: Player,
}

impl Board {
    /// Creates the initial board:
    /// d4=light, e4=dark, d5=dark, e5=light, dark to move.
    pub fn new() -> Self {
        let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        grid[3][3] = Cell::Light;
        grid[3][4] = Cell::Dark;
        grid[4][3] = Cell::Dark;
        grid[4][4] = Cell::Light;
        Self {
            grid,
            current: Player::Dark,
        }
    }

    /// Builds a board from an arbitrary grid. Dark always moves first.
    pub fn from_cells(grid: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self {
            grid,
            current: Player::Dark,
        }
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.grid[row][col]
    }

    /// Advances the turn to the opponent. Pass rules live in the session.
    pub fn switch_turn(&mut self) {
        self.current = self.current.opponent();
    }

    /// Returns legal moves for `player` in row-major order.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        let mut legal = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.is_valid_move(player, row, col) {
                    legal.push(Move::new(row, col));
                }
            }
        }
        legal
    }

    /// True when placing at `(row, col)` would close at least one flip run.
    /// Occupied and off-board squares are never valid.
    pub fn is_valid_move(&self, player: Player, row: usize, col: usize) -> bool {
        if !in_bounds(row as isize, col as isize) || !self.grid[row][col].is_empty() {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| !self.closed_run(row, col, dr, dc, player).is_empty())
    }

    /// Opponent pieces flipped by `player` placing at `(row, col)`.
    /// Runs that reach the edge or an empty square are discarded.
    pub fn pieces_to_flip(&self, row: usize, col: usize, player: Player) -> Vec<Move> {
        DIRECTIONS
            .iter()
            .flat_map(|&(dr, dc)| self.closed_run(row, col, dr, dc, player))
            .collect()
    }

    /// Returns a new board with `mv` placed for `player` and its runs flipped.
    ///
    /// Legality is not checked here; callers validate with `is_valid_move`.
    pub fn apply_move(&self, mv: Move, player: Player) -> Board {
        let mut next = *self;
        let stone = Cell::from(player);
        next.grid[mv.row][mv.col] = stone;
        for flip in self.pieces_to_flip(mv.row, mv.col, player) {
            next.grid[flip.row][flip.col] = stone;
        }
        next
    }

    pub fn is_board_full(&self) -> bool {
        self.grid.iter().flatten().all(|cell| !cell.is_empty())
    }

    pub fn piece_count(&self, player: Player) -> usize {
        let stone = Cell::from(player);
        self.grid.iter().flatten().filter(|&&cell| cell == stone).count()
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=dark, 2=light.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                board[Move::new(row, col).index()] = self.grid[row][col].code();
            }
        }
        board
    }

    /// Contiguous opponent run from `(row, col)` along `(dr, dc)`, or empty
    /// when the run is not closed by a `player` piece.
    fn closed_run(&self, row: usize, col: usize, dr: isize, dc: isize, player: Player) -> Vec<Move> {
        let me = Cell::from(player);
        let opp = Cell::from(player.opponent());
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        let mut line = Vec::new();

        while in_bounds(r, c) {
            let cell = self.grid[r as usize][c as usize];
            if cell == opp {
                line.push(Move::new(r as usize, c as usize));
            } else if cell == me {
                return line;
            } else {
                break;
            }
            r += dr;
            c += dc;
        }

        Vec::new()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses eight rows of `X` (dark), `O` (light) and `.` (empty).
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(GameError::InvalidLayout(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != BOARD_SIZE {
                return Err(GameError::InvalidLayout(format!(
                    "row {row} has {} cells",
                    chars.len()
                )));
            }
            for (col, ch) in chars.into_iter().enumerate() {
                grid[row][col] = match ch {
                    'X' => Cell::Dark,
                    'O' => Cell::Light,
                    '.' => Cell::Empty,
                    other => {
                        return Err(GameError::InvalidLayout(format!(
                            "unexpected '{other}' at ({row}, {col})"
                        )));
                    }
                };
            }
        }

        Ok(Self::from_cells(grid))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            for cell in row {
                let ch = match cell {
                    Cell::Dark => 'X',
                    Cell::Light => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn in_bounds(row: isize, col: isize) -> bool {
    (0..BOARD_SIZE as isize).contains(&row) && (0..BOARD_SIZE as isize).contains(&col)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    use super::*;

    fn checkerboard() -> Board {
        let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = if (row + col) % 2 == 0 {
                    Cell::Dark
                } else {
                    Cell::Light
                };
            }
        }
        Board::from_cells(grid)
    }

    #[test]
    fn t01_initial_dark_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        assert_eq!(board.piece_count(Player::Dark), 2);
        assert_eq!(board.piece_count(Player::Light), 2);
        assert_eq!(board.current_player(), Player::Dark);
        assert_eq!(
            board.legal_moves(Player::Dark),
            vec![
                Move::new(2, 3),
                Move::new(3, 2),
                Move::new(4, 5),
                Move::new(5, 4)
            ]
        );
    }

    #[test]
    fn apply_move_flips_opponent_stones_and_updates_counts() {
        let board = Board::new();

        assert_eq!(board.pieces_to_flip(2, 3, Player::Dark), vec![Move::new(3, 3)]);
        let next = board.apply_move(Move::new(2, 3), Player::Dark);

        assert_eq!(next.piece_count(Player::Dark), 4);
        assert_eq!(next.piece_count(Player::Light), 1);
        assert_eq!(next.cell(2, 3), Cell::Dark);
        assert_eq!(next.cell(3, 3), Cell::Dark);
        assert_eq!(next.cell(4, 4), Cell::Light);
        // The source board is untouched.
        assert_eq!(board, Board::new());
    }

    #[test]
    fn apply_move_is_deterministic() {
        let board = Board::new();

        let a = board.apply_move(Move::new(4, 5), Player::Dark);
        let b = board.apply_move(Move::new(4, 5), Player::Dark);

        assert_eq!(a.to_array(), b.to_array());
    }

    #[test]
    fn switch_turn_is_an_involution() {
        let mut board = Board::new();

        board.switch_turn();
        assert_eq!(board.current_player(), Player::Light);
        board.switch_turn();
        assert_eq!(board.current_player(), Player::Dark);
    }

    #[test]
    fn illegal_squares_are_rejected() {
        let board = Board::new();

        assert!(!board.is_valid_move(Player::Dark, 0, 0));
        // Occupied square.
        assert!(!board.is_valid_move(Player::Dark, 3, 3));
        // Off the board.
        assert!(!board.is_valid_move(Player::Dark, 8, 2));
    }

    #[test]
    fn runs_open_at_the_edge_or_a_gap_are_not_flipped() {
        let board: Board = "
            .OOX....
            ........
            O.......
            O.......
            ........
            ........
            ........
            .OO.X...
        "
        .parse()
        .unwrap();

        // East run closes on X; south run reaches an empty gap.
        assert_eq!(
            board.pieces_to_flip(0, 0, Player::Dark),
            vec![Move::new(0, 1), Move::new(0, 2)]
        );
        // West run stops at an empty square; the east neighbour is already dark.
        assert!(board.pieces_to_flip(7, 3, Player::Dark).is_empty());
        assert!(!board.is_valid_move(Player::Dark, 7, 3));
        // South run stops at a gap; north-east run leaves the board.
        assert!(board.pieces_to_flip(1, 0, Player::Dark).is_empty());
    }

    #[test]
    fn checkerboard_is_full() {
        let board = checkerboard();

        assert!(board.is_board_full());
        assert!(!Board::new().is_board_full());
        assert_eq!(board.piece_count(Player::Dark), 32);
        assert!(board.legal_moves(Player::Dark).is_empty());
    }

    #[test]
    fn legal_moves_agree_with_is_valid_move_over_random_playouts() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let mut board = Board::new();
            let mut passes = 0;
            while passes < 2 {
                let player = board.current_player();
                let legal = board.legal_moves(player);
                for row in 0..BOARD_SIZE {
                    for col in 0..BOARD_SIZE {
                        assert_eq!(
                            board.is_valid_move(player, row, col),
                            legal.contains(&Move::new(row, col))
                        );
                    }
                }
                match legal.choose(&mut rng) {
                    Some(&mv) => {
                        let flips = board.pieces_to_flip(mv.row, mv.col, player);
                        assert!(!flips.is_empty());
                        let before = board.piece_count(player);
                        board = board.apply_move(mv, player);
                        assert_eq!(board.piece_count(player), before + flips.len() + 1);
                        passes = 0;
                    }
                    None => passes += 1,
                }
                board.switch_turn();
            }
        }
    }

    #[test]
    fn to_array_is_row_major() {
        let cells = Board::new().to_array();

        assert_eq!(cells[Move::new(3, 3).index()], 2);
        assert_eq!(cells[Move::new(3, 4).index()], 1);
        assert_eq!(cells[27], 2);
        assert_eq!(cells[28], 1);
        assert_eq!(cells.iter().filter(|&&code| code == 0).count(), 60);
    }

    #[test]
    fn layout_round_trips_through_display() {
        let board = Board::new();
        let text = board.to_string();

        assert_eq!(text.lines().nth(3), Some("...OX..."));
        assert_eq!(text.parse::<Board>().unwrap(), board);
    }

    #[test]
    fn malformed_layout_is_rejected() {
        assert!(matches!(
            "XO".parse::<Board>(),
            Err(GameError::InvalidLayout(_))
        ));
        let bad = "........\n".repeat(7) + ".......Z";
        assert!(matches!(bad.parse::<Board>(), Err(GameError::InvalidLayout(_))));
    }
}
