use std::time::Duration;

use tracing::debug;
use web_time::Instant;

use crate::ai::MoveSelector;
use crate::board::Board;
use crate::types::{Move, Player};

const DEFAULT_BUDGET_SECS: u64 = 5;
const DEFAULT_MAX_DEPTH: u8 = 4;
const MIN_SCORE: i32 = i32::MIN;
const MAX_SCORE: i32 = i32::MAX;

/// Time source for the iterative-deepening cutoff.
pub trait Clock: Send + Sync {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by `web_time::Instant`, usable on wasm32.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Score and move of one alpha-beta node. `mv` is `None` at leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub mv: Option<Move>,
}

/// Outcome of a search, with node-visit diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    pub best_score: i32,
    /// Deepest iteration that ran to completion.
    pub completed_depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
}

impl SearchReport {
    fn empty() -> Self {
        Self {
            best_move: None,
            best_score: MIN_SCORE,
            completed_depth: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Visited nodes per second; used to calibrate search parameters.
    pub fn nodes_per_second(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        (secs > 0.0).then(|| self.nodes as f64 / secs)
    }
}

/// Hard tier: iterative-deepening alpha-beta on material difference.
pub struct SearchSelector<C: Clock = SystemClock> {
    clock: C,
    budget: Duration,
    max_depth: u8,
}

impl SearchSelector<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for SearchSelector<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SearchSelector<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            budget: Duration::from_secs(DEFAULT_BUDGET_SECS),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Runs depths `1..=max_depth` for the side to move.
    ///
    /// A deeper iteration only replaces the best move when it strictly
    /// improves the best score so far. The ladder stops once a completed
    /// depth took longer than the budget; depths are never interrupted.
    pub fn search(&self, board: &Board) -> SearchReport {
        let player = board.current_player();
        if board.legal_moves(player).is_empty() {
            return SearchReport::empty();
        }

        let started = self.clock.now();
        let mut report = SearchReport::empty();

        for depth in 1..=self.max_depth {
            let depth_start = self.clock.now();
            let result = alpha_beta(
                board,
                depth,
                MIN_SCORE,
                MAX_SCORE,
                true,
                player,
                player,
                &mut report.nodes,
            );
            let depth_elapsed = self.clock.now().saturating_sub(depth_start);
            report.completed_depth = depth;

            if let Some(mv) = result.mv
                && result.score > report.best_score
            {
                report.best_move = Some(mv);
                report.best_score = result.score;
            }

            debug!(
                depth,
                score = result.score,
                best_score = report.best_score,
                nodes = report.nodes,
                ?depth_elapsed,
                "search depth completed"
            );

            if depth_elapsed > self.budget {
                debug!(depth, budget = ?self.budget, "search budget exceeded");
                break;
            }
        }

        report.elapsed = self.clock.now().saturating_sub(started);
        report
    }

    /// Single fixed-depth alpha-beta, timed, for difficulty calibration.
    pub fn probe(&self, board: &Board, depth: u8) -> SearchReport {
        let player = board.current_player();
        let started = self.clock.now();
        let mut nodes = 0;
        let result = alpha_beta(
            board, depth, MIN_SCORE, MAX_SCORE, true, player, player, &mut nodes,
        );

        SearchReport {
            best_move: result.mv,
            best_score: result.score,
            completed_depth: depth,
            nodes,
            elapsed: self.clock.now().saturating_sub(started),
        }
    }
}

impl<C: Clock> MoveSelector for SearchSelector<C> {
    fn select_move(&self, board: &Board) -> Option<Move> {
        self.search(board).best_move
    }
}

/// Minimax with alpha-beta pruning. Scores are always material difference
/// from `root`'s point of view; `maximizing` alternates with `mover`.
///
/// Only `depth == 0` is treated as terminal. A mover without legal moves
/// has no children, so that node is scored statically as well.
#[allow(clippy::too_many_arguments)]
fn alpha_beta(
    board: &Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    mover: Player,
    root: Player,
    nodes: &mut u64,
) -> SearchResult {
    *nodes += 1;

    if depth == 0 {
        return leaf(board, root);
    }

    let moves = board.legal_moves(mover);
    if moves.is_empty() {
        return leaf(board, root);
    }

    let mut best = SearchResult {
        score: if maximizing { MIN_SCORE } else { MAX_SCORE },
        mv: None,
    };

    for mv in moves {
        let next = board.apply_move(mv, mover);
        let score = alpha_beta(
            &next,
            depth - 1,
            alpha,
            beta,
            !maximizing,
            mover.opponent(),
            root,
            nodes,
        )
        .score;

        if maximizing {
            if best.mv.is_none() || score > best.score {
                best = SearchResult { score, mv: Some(mv) };
            }
            alpha = alpha.max(best.score);
        } else {
            if best.mv.is_none() || score < best.score {
                best = SearchResult { score, mv: Some(mv) };
            }
            beta = beta.min(best.score);
        }

        if alpha >= beta {
            break;
        }
    }

    best
}

fn leaf(board: &Board, root: Player) -> SearchResult {
    SearchResult {
        score: material(board, root),
        mv: None,
    }
}

fn material(board: &Board, player: Player) -> i32 {
    board.piece_count(player) as i32 - board.piece_count(player.opponent()) as i32
}
