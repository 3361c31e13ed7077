use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::ai::MoveSelector;
use crate::board::{BOARD_SIZE, Board};
use crate::error::{GameError, Result};
use crate::settings::{GameMode, Settings};
use crate::types::{GameResult, GameState, Move, Player};

/// Where the session stands between inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingMove(Player),
    /// `mover` has no legal move and must pass. `count` is the number of
    /// consecutive movers found without a move, this one included.
    Passed { mover: Player, count: u8 },
    GameOver,
}

/// Identifies the session state an AI turn was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTicket(u64);

/// A board snapshot handed to the AI while the session is locked.
pub struct AiTurn {
    board: Board,
    selector: Arc<dyn MoveSelector>,
    ticket: AiTicket,
}

impl AiTurn {
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Must be passed back to `GameInstance::finish_ai_turn`.
    pub fn ticket(&self) -> AiTicket {
        self.ticket
    }

    pub fn think(&self) -> Option<Move> {
        self.selector.select_move(&self.board)
    }

    /// Runs the selector on a worker thread.
    pub fn spawn(self) -> JoinHandle<Option<Move>> {
        thread::spawn(move || self.think())
    }
}

pub struct GameInstance {
    board: Board,
    settings: Settings,
    phase: Phase,
    ai_thinking: bool,
    /// Bumped on every applied move, pass and reset.
    generation: u64,
    flipped: Vec<Move>,
    selector: Arc<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(settings: Settings, selector: Arc<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            settings,
            phase: Phase::AwaitingMove(Player::Dark),
            ai_thinking: false,
            generation: 0,
            flipped: Vec::new(),
            selector,
        }
    }

    /// Uses the selector for `settings.ai_difficulty`.
    pub fn with_settings(settings: Settings) -> Self {
        Self::new(settings, settings.ai_difficulty.selector())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_ai_thinking(&self) -> bool {
        self.ai_thinking
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// True when the light side is AI-controlled and it is light's turn.
    pub fn is_ai_turn(&self) -> bool {
        self.settings.game_mode == GameMode::PlayerVsAi
            && !self.is_game_over()
            && self.board.current_player() == Player::Light
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves(self.board.current_player())
    }

    /// Human move for the side to move. Rejections leave the session unchanged.
    pub fn place(&mut self, row: usize, col: usize) -> Result<()> {
        self.ensure_accepting_input()?;
        if self.is_ai_turn() || matches!(self.phase, Phase::Passed { .. }) {
            return Err(GameError::NotYourTurn);
        }
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(GameError::OutOfRange { row, col });
        }

        self.apply_move(Move::new(row, col))
    }

    /// Explicit pass for a human mover without legal moves.
    pub fn pass(&mut self) -> Result<()> {
        self.ensure_accepting_input()?;
        if self.is_ai_turn() {
            return Err(GameError::NotYourTurn);
        }
        self.pass_pending()
    }

    /// Locks human input and hands the current board to the AI.
    pub fn begin_ai_turn(&mut self) -> Result<AiTurn> {
        self.ensure_accepting_input()?;
        if !self.is_ai_turn() {
            return Err(GameError::NotYourTurn);
        }

        self.ai_thinking = true;
        debug!("AI turn started");
        Ok(AiTurn {
            board: self.board,
            selector: Arc::clone(&self.selector),
            ticket: AiTicket(self.generation),
        })
    }

    /// Unlocks input and applies the AI's choice. `None` passes when a pass
    /// is pending and is rejected otherwise.
    ///
    /// A ticket from before the last move, pass or reset is rejected and
    /// leaves any current AI turn locked.
    pub fn finish_ai_turn(&mut self, ticket: AiTicket, mv: Option<Move>) -> Result<()> {
        if ticket != AiTicket(self.generation) {
            warn!(?ticket, generation = self.generation, "stale AI turn");
            return Err(GameError::StaleAiTurn);
        }
        if !self.ai_thinking {
            return Err(GameError::NotYourTurn);
        }
        self.ai_thinking = false;

        match mv {
            Some(mv) => self.apply_move(mv).inspect_err(|err| {
                warn!(row = mv.row, col = mv.col, %err, "AI move rejected");
            }),
            None => self.pass_pending().map_err(|_| GameError::NoMoveSelected),
        }
    }

    /// Runs a whole AI turn on the calling thread.
    pub fn play_ai_turn(&mut self) -> Result<()> {
        let turn = self.begin_ai_turn()?;
        let mv = turn.think();
        self.finish_ai_turn(turn.ticket(), mv)
    }

    /// Back to the opening position with dark to move.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.phase = Phase::AwaitingMove(Player::Dark);
        self.ai_thinking = false;
        self.generation += 1;
        self.flipped.clear();
        info!("game reset");
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.board.current_player().code(),
            dark_count: self.board.piece_count(Player::Dark),
            light_count: self.board.piece_count(Player::Light),
            is_game_over: self.is_game_over(),
            is_pass: matches!(self.phase, Phase::Passed { .. }),
            legal_moves: if self.settings.show_legal_moves {
                self.legal_moves()
            } else {
                Vec::new()
            },
            flipped: self.flipped.clone(),
            is_ai_thinking: self.ai_thinking,
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let dark_count = self.board.piece_count(Player::Dark);
        let light_count = self.board.piece_count(Player::Light);
        GameResult {
            winner: if dark_count > light_count {
                Some(Player::Dark)
            } else if light_count > dark_count {
                Some(Player::Light)
            } else {
                None
            },
            dark_count,
            light_count,
        }
    }

    fn ensure_accepting_input(&self) -> Result<()> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if self.ai_thinking {
            return Err(GameError::AiThinking);
        }
        Ok(())
    }

    fn apply_move(&mut self, mv: Move) -> Result<()> {
        let player = self.board.current_player();
        if !self.board.is_valid_move(player, mv.row, mv.col) {
            return Err(GameError::IllegalMove {
                row: mv.row,
                col: mv.col,
            });
        }

        self.flipped = self.board.pieces_to_flip(mv.row, mv.col, player);
        self.board = self.board.apply_move(mv, player);
        self.board.switch_turn();
        self.generation += 1;
        debug!(
            ?player,
            row = mv.row,
            col = mv.col,
            flipped = self.flipped.len(),
            "move applied"
        );

        self.settle(0);
        Ok(())
    }

    fn pass_pending(&mut self) -> Result<()> {
        let Phase::Passed { mover, count } = self.phase else {
            return Err(GameError::NoPassPending);
        };

        self.flipped.clear();
        self.board.switch_turn();
        self.generation += 1;
        debug!(?mover, count, "turn passed");

        self.settle(count);
        Ok(())
    }

    /// Derives the phase for the side now to move.
    fn settle(&mut self, prior_passes: u8) {
        if self.board.is_board_full() {
            self.end_game();
            return;
        }

        let mover = self.board.current_player();
        if !self.board.legal_moves(mover).is_empty() {
            self.phase = Phase::AwaitingMove(mover);
            return;
        }

        let count = prior_passes + 1;
        if !self.settings.enable_pass_turns || count >= 2 {
            self.end_game();
        } else {
            self.phase = Phase::Passed { mover, count };
        }
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        let result = self.to_game_result();
        info!(
            dark = result.dark_count,
            light = result.light_count,
            winner = ?result.winner,
            "game over"
        );
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board) {
        self.board = board;
        self.ai_thinking = false;
        self.flipped.clear();
        self.settle(0);
    }
}
