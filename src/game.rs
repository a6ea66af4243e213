use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::board::{apply_hops, MoveDelta, Position, Side};
use crate::error::GameError;
use crate::search::alphabeta::{SearchParams, Searcher};
use crate::search::mcts::{search, MctsParams};

/// Who plays a side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    Human,
    Mcts,
    Minimax,
}

impl Controller {
    pub fn is_computer(self) -> bool {
        self != Controller::Human
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Side),
    Draw,
}

/// Per-match setup. Controllers live here, never in global state.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub white: Controller,
    pub black: Controller,
    /// The game is drawn once more plies than this have been played.
    pub draw_plies: usize,
    pub mcts: MctsParams,
    pub minimax: SearchParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            white: Controller::Human,
            black: Controller::Mcts,
            draw_plies: 100,
            mcts: MctsParams::default(),
            minimax: SearchParams { depth: 4, order_captures: true, threads: 1, ..Default::default() },
        }
    }
}

impl MatchConfig {
    pub fn controller(&self, side: Side) -> Controller {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }
}

/// Turn orchestration around a position: legal successors, draw counter and
/// result classification.
pub struct Match {
    config: MatchConfig,
    position: Position,
    moves: Vec<Position>,
    plies: usize,
}

impl Match {
    pub fn new(config: MatchConfig) -> Self {
        Self::from_position(config, Position::startpos())
    }

    pub fn from_position(config: MatchConfig, position: Position) -> Self {
        let moves = position.moves().collect();
        Self { config, position, moves, plies: 0 }
    }

    pub fn config(&self) -> &MatchConfig { &self.config }
    pub fn position(&self) -> &Position { &self.position }
    pub fn legal_moves(&self) -> &[Position] { &self.moves }
    pub fn plies(&self) -> usize { self.plies }

    pub fn is_draw(&self) -> bool {
        self.plies > self.config.draw_plies
    }

    /// A side loses when it has no pieces, or has the move and cannot move.
    pub fn is_loss(&self, side: Side) -> bool {
        if side == self.position.side_to_move() && self.moves.is_empty() {
            return true;
        }
        self.position.pieces(side) == 0
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_draw() {
            return Some(Outcome::Draw);
        }
        let side = self.position.side_to_move();
        if self.is_loss(side) {
            return Some(Outcome::Win(!side));
        }
        if self.is_loss(!side) {
            return Some(Outcome::Win(side));
        }
        None
    }

    /// Side to move, or `None` once the game is over.
    pub fn active_side(&self) -> Option<Side> {
        match self.outcome() {
            Some(_) => None,
            None => Some(self.position.side_to_move()),
        }
    }

    pub fn is_computer_turn(&self) -> bool {
        self.active_side().map_or(false, |s| self.config.controller(s).is_computer())
    }

    /// Play a successor chosen from `legal_moves`.
    pub fn play(&mut self, next: Position) -> Result<MoveDelta, GameError> {
        if self.active_side().is_none() {
            return Err(GameError::Finished);
        }
        if !self.moves.contains(&next) {
            warn!("rejected position that is not a successor");
            return Err(GameError::NotASuccessor);
        }
        let delta = MoveDelta::between(&self.position, &next);
        self.position = next;
        self.moves = next.moves().collect();
        self.plies += 1;
        Ok(delta)
    }

    /// Play a single hop given in check indices.
    pub fn play_hop(&mut self, from: usize, to: usize) -> Result<MoveDelta, GameError> {
        self.play_path(&[from, to])
    }

    /// Play a full hop path `[from, to, to, ...]` in check indices.
    pub fn play_path(&mut self, path: &[usize]) -> Result<MoveDelta, GameError> {
        if self.active_side().is_none() {
            return Err(GameError::Finished);
        }
        let next = apply_hops(&self.position, path)?;
        self.play(next)
    }

    /// What the configured engine would play now; `None` for a human side or
    /// a finished game.
    pub fn computer_move(&self) -> Option<Position> {
        let side = self.active_side()?;
        match self.config.controller(side) {
            Controller::Human => None,
            Controller::Mcts => search(&self.position, &self.config.mcts),
            Controller::Minimax => {
                let mut s = Searcher::default();
                s.search_with_params(&self.position, self.config.minimax.clone()).best
            }
        }
    }

    /// Let the engine for the side to move play, if there is one.
    pub fn step_computer(&mut self) -> Result<Option<MoveDelta>, GameError> {
        let Some(next) = self.computer_move() else { return Ok(None) };
        let delta = self.play(next)?;
        info!("ply {}: {} plays {}", self.plies, !self.position.side_to_move(), delta);
        Ok(Some(delta))
    }

    pub fn occupied_checks(&self) -> Vec<usize> { self.position.occupied_checks() }
    pub fn is_queen(&self, check: usize) -> bool { self.position.is_queen(check) }
    pub fn is_white(&self, check: usize) -> bool { self.position.is_white(check) }
}
