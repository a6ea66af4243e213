use crate::board::Position;
use crate::search::eval::{eval_stm, WIN_SCORE};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Default, Debug, Clone)]
pub struct SearchParams {
    pub depth: u32,
    pub max_nodes: Option<u64>,
    pub movetime: Option<Duration>,
    pub order_captures: bool,
    pub threads: usize,
    pub stop: Option<Arc<AtomicBool>>,
}

#[derive(Default, Debug, Clone)]
pub struct SearchResult {
    pub best: Option<Position>,
    pub score: i32,
    pub nodes: u64,
}

/// Depth-limited negamax with alpha-beta over turn-complete successors.
pub struct Searcher {
    pub(crate) nodes: u64,
    node_limit: u64,
    deadline: Option<Instant>,
    order_captures: bool,
    threads: usize,
    abort: Option<Arc<AtomicBool>>,
}

impl Default for Searcher {
    fn default() -> Self {
        Self {
            nodes: 0,
            node_limit: u64::MAX,
            deadline: None,
            order_captures: false,
            threads: 1,
            abort: None,
        }
    }
}

impl Searcher {
    pub fn search_depth(&mut self, pos: &Position, depth: u32) -> SearchResult {
        let mut moves: Vec<Position> = pos.moves().collect();
        if moves.is_empty() {
            return SearchResult { best: None, score: -WIN_SCORE, nodes: self.nodes };
        }
        self.order(pos, &mut moves);
        if self.threads > 1 && depth > 1 {
            return self.search_depth_parallel(moves, depth);
        }

        let mut alpha = -WIN_SCORE - 1;
        let beta = WIN_SCORE + 1;
        let mut best: Option<(Position, i32)> = None;
        for child in moves {
            let score = -self.alphabeta(&child, depth.saturating_sub(1), -beta, -alpha, 1);
            if best.map_or(true, |(_, bs)| score > bs) { best = Some((child, score)); }
            if score > alpha { alpha = score; }
        }
        match best {
            Some((bm, sc)) => SearchResult { best: Some(bm), score: sc, nodes: self.nodes },
            None => SearchResult { best: None, score: -WIN_SCORE, nodes: self.nodes },
        }
    }

    fn search_depth_parallel(&mut self, moves: Vec<Position>, depth: u32) -> SearchResult {
        // Evaluate each root move independently with full window in parallel
        let deadline = self.deadline;
        let order_captures = self.order_captures;
        let abort = self.abort.clone();
        let results: Vec<(Position, i32, u64)> = moves.par_iter().map(|&child| {
            let mut w = Searcher::default();
            w.deadline = deadline;
            w.order_captures = order_captures;
            w.abort = abort.clone();
            let score = -w.alphabeta(&child, depth - 1, -WIN_SCORE - 1, WIN_SCORE + 1, 1);
            (child, score, w.nodes)
        }).collect();

        // Reduce to best, first wins on ties so the result matches the serial order
        let mut best: Option<(Position, i32)> = None;
        let mut total_nodes = 0u64;
        for (m, s, n) in results {
            total_nodes += n;
            if best.map_or(true, |(_, bs)| s > bs) { best = Some((m, s)); }
        }
        self.nodes += total_nodes;
        match best {
            Some((bm, sc)) => SearchResult { best: Some(bm), score: sc, nodes: self.nodes },
            None => SearchResult { best: None, score: -WIN_SCORE, nodes: self.nodes },
        }
    }

    fn alphabeta(&mut self, pos: &Position, depth: u32, mut alpha: i32, beta: i32, ply: i32) -> i32 {
        if let Some(ref flag) = self.abort { if flag.load(Ordering::Relaxed) { return eval_stm(pos); } }
        self.nodes += 1;
        if self.nodes >= self.node_limit { return eval_stm(pos); }
        if let Some(dl) = self.deadline { if Instant::now() >= dl { return eval_stm(pos); } }

        let mut moves: Vec<Position> = pos.moves().collect();
        // No successors: the side to move has lost; prefer the quickest win
        if moves.is_empty() { return -WIN_SCORE + ply; }
        if depth == 0 { return eval_stm(pos); }
        self.order(pos, &mut moves);

        let mut best = -WIN_SCORE - 1;
        for child in moves {
            let score = -self.alphabeta(&child, depth - 1, -beta, -alpha, ply + 1);
            if score > best { best = score; }
            if best > alpha { alpha = best; }
            if alpha >= beta { break; }
        }
        best
    }

    // Captures first (fewer opponent pieces left), stable otherwise.
    fn order(&self, pos: &Position, moves: &mut [Position]) {
        if !self.order_captures { return; }
        let opp = !pos.side_to_move();
        moves.sort_by_key(|m| m.pieces(opp).count_ones());
    }

    pub fn search_with_params(&mut self, pos: &Position, params: SearchParams) -> SearchResult {
        self.nodes = 0;
        self.node_limit = params.max_nodes.unwrap_or(u64::MAX);
        self.order_captures = params.order_captures;
        self.threads = params.threads.max(1);
        self.abort = params.stop.clone();
        self.deadline = params.movetime.map(|d| Instant::now() + d);
        let mut last = SearchResult { best: None, score: 0, nodes: 0 };
        // Iterative deepening; an interrupted iteration keeps the previous answer
        for d in 1..=params.depth.max(1) {
            let r = self.search_depth(pos, d);
            let interrupted = d > 1 && self.out_of_budget();
            if !interrupted || last.best.is_none() { last = r; }
            last.nodes = self.nodes;
            if self.out_of_budget() { break; }
        }
        last
    }

    fn out_of_budget(&self) -> bool {
        if self.nodes >= self.node_limit { return true; }
        if let Some(dl) = self.deadline { if Instant::now() >= dl { return true; } }
        self.abort.as_ref().map_or(false, |f| f.load(Ordering::Relaxed))
    }

    pub fn get_threads(&self) -> usize { self.threads }
}
