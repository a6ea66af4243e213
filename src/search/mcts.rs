use log::{debug, info, warn};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::{MoveDelta, Position, Side};
use crate::search::eval::evaluate;

pub type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
pub struct MctsParams {
    /// Wall-clock budget for one episode.
    pub movetime: Duration,
    /// Stop after this many selection batches even if time remains.
    pub max_iterations: Option<u64>,
    /// Rollout workers: 0 uses the global rayon pool, 1 rolls out inline.
    pub threads: usize,
    /// Play-outs longer than this end without a result.
    pub rollout_plies: usize,
    pub stop: Option<Arc<AtomicBool>>,
}

impl Default for MctsParams {
    fn default() -> Self {
        Self {
            movetime: Duration::from_secs(1),
            max_iterations: None,
            threads: 0,
            rollout_plies: 50,
            stop: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MctsResult {
    pub best: Option<Position>,
    pub iterations: u64,
    pub rollouts: u64,
    pub nodes: usize,
    pub elapsed: Duration,
}

/// A tree node. `wins` counts play-outs won by the side that moved into
/// this node, i.e. the opponent of its side to move.
#[derive(Debug, Clone)]
pub struct Node {
    position: Position,
    parent: Option<NodeId>,
    children: Option<Vec<NodeId>>,
    visits: u32,
    wins: u32,
    score: i32,
}

impl Node {
    fn new(position: Position, parent: Option<NodeId>) -> Self {
        // static score for the side that just moved
        let score = evaluate(&position, !position.side_to_move());
        Self { position, parent, children: None, visits: 0, wins: 0, score }
    }

    pub fn position(&self) -> &Position { &self.position }
    pub fn parent(&self) -> Option<NodeId> { self.parent }
    pub fn visits(&self) -> u32 { self.visits }
    pub fn wins(&self) -> u32 { self.wins }
    pub fn score(&self) -> i32 { self.score }

    pub fn children(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 { 0.0 } else { self.wins as f64 / self.visits as f64 }
    }

    fn uct(&self, parent_visits: u32) -> f64 {
        let n = self.visits.max(1) as f64;
        let total = parent_visits.max(1) as f64;
        self.win_rate() + (2.0 * total.ln() / n).sqrt()
    }
}

/// First maximum, so ties resolve in generation order.
fn first_max<K: PartialOrd>(ids: &[NodeId], key: impl Fn(NodeId) -> K) -> Option<NodeId> {
    let mut best: Option<(NodeId, K)> = None;
    for &id in ids {
        let k = key(id);
        if best.as_ref().map_or(true, |(_, bk)| k > *bk) { best = Some((id, k)); }
    }
    best.map(|(id, _)| id)
}

/// Greedy play-out step: the successor the mover scores highest.
fn greedy_successor(pos: &Position) -> Option<Position> {
    if pos.one_side_empty() { return None; }
    let mover = pos.side_to_move();
    let mut best: Option<(Position, i32)> = None;
    for next in pos.moves() {
        let s = evaluate(&next, mover);
        if best.map_or(true, |(_, bs)| s > bs) { best = Some((next, s)); }
    }
    best.map(|(p, _)| p)
}

/// Arena-backed search tree for one episode; parents are indices, never owners.
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(root: Position) -> Self {
        Self { nodes: vec![Node::new(root, None)] }
    }

    pub fn root(&self) -> &Node { &self.nodes[ROOT] }
    pub fn node(&self, id: NodeId) -> &Node { &self.nodes[id] }
    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Children of `id`, generating them on first access.
    pub fn expand(&mut self, id: NodeId) -> &[NodeId] {
        if self.nodes[id].children.is_none() {
            let pos = self.nodes[id].position;
            let kids: Vec<Position> = if pos.one_side_empty() { Vec::new() } else { pos.moves().collect() };
            let first = self.nodes.len();
            self.nodes.extend(kids.into_iter().map(|p| Node::new(p, Some(id))));
            self.nodes[id].children = Some((first..self.nodes.len()).collect());
        }
        self.nodes[id].children()
    }

    /// Walk down from the root. Returns every unvisited child of the first
    /// node that has one, or the childless node the walk ended on.
    pub fn select(&mut self) -> Vec<NodeId> {
        let mut id = ROOT;
        loop {
            let children = self.expand(id).to_vec();
            if children.is_empty() { return vec![id]; }
            let unvisited: Vec<NodeId> = children.iter().copied().filter(|&c| self.nodes[c].visits == 0).collect();
            if !unvisited.is_empty() { return unvisited; }
            let total = self.nodes[id].visits;
            match first_max(&children, |c| self.nodes[c].uct(total)) {
                Some(next) => id = next,
                None => return vec![id],
            }
        }
    }

    /// Heuristic play-out from `id`; the winner, or `None` when capped.
    pub fn rollout(&self, id: NodeId, max_plies: usize) -> Option<Side> {
        let node = &self.nodes[id];
        let mut pos = node.position;
        let mut plies = 0;
        // first step reuses the cached child scores
        if max_plies > 0 {
            if let Some(best) = first_max(node.children(), |c| self.nodes[c].score) {
                pos = self.nodes[best].position;
                plies = 1;
            }
        }
        while plies < max_plies {
            let Some(next) = greedy_successor(&pos) else { break };
            pos = next;
            plies += 1;
        }
        pos.winner()
    }

    pub fn backpropagate(&mut self, id: NodeId, winner: Option<Side>) {
        let mut cursor = Some(id);
        while let Some(id) = cursor {
            let node = &mut self.nodes[id];
            node.visits += 1;
            if winner == Some(!node.position.side_to_move()) { node.wins += 1; }
            cursor = node.parent;
        }
    }

    /// Root child with the best empirical win rate, static score breaking ties.
    pub fn best_child(&self) -> Option<NodeId> {
        let kids = self.root().children();
        first_max(kids, |c| (self.nodes[c].win_rate(), self.nodes[c].score))
    }

    pub fn statistics_string(&self) -> String {
        let root = self.root();
        let mut s = String::from("|   move   |  visits  |   wins   |   rate   |   uct    |  score   |\n");
        let mut kids: Vec<NodeId> = root.children().to_vec();
        kids.sort_by(|&a, &b| self.nodes[b].visits.cmp(&self.nodes[a].visits));
        for id in kids.into_iter().take(10) {
            let n = &self.nodes[id];
            let mv = MoveDelta::between(&root.position, &n.position).to_string();
            s.push_str(&format!(
                "|{:^10}|{:^10}|{:^10}|{:^10.4}|{:^10.4}|{:^10}|\n",
                mv, n.visits, n.wins, n.win_rate(), n.uct(root.visits), n.score
            ));
        }
        s
    }
}

pub struct Mcts {
    tree: Tree,
}

impl Mcts {
    pub fn new(root: Position) -> Self {
        Self { tree: Tree::new(root) }
    }

    pub fn tree(&self) -> &Tree { &self.tree }

    /// One episode: select a batch, roll it out in parallel, wait for the
    /// whole batch, then apply every result from this thread.
    pub fn run(&mut self, params: &MctsParams) -> MctsResult {
        let start = Instant::now();
        let deadline = start + params.movetime;
        if self.tree.expand(ROOT).is_empty() {
            return MctsResult { nodes: self.tree.len(), elapsed: start.elapsed(), ..Default::default() };
        }

        let pool = if params.threads > 1 {
            match rayon::ThreadPoolBuilder::new().num_threads(params.threads).build() {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!("rollout pool unavailable ({e}), using the global pool");
                    None
                }
            }
        } else {
            None
        };

        let mut iterations = 0u64;
        let mut rollouts = 0u64;
        loop {
            if params.stop.as_ref().map_or(false, |f| f.load(Ordering::Relaxed)) { break; }
            if params.max_iterations.map_or(false, |cap| iterations >= cap) { break; }
            if Instant::now() >= deadline { break; }

            let batch = self.tree.select();
            for &id in &batch {
                self.tree.expand(id);
            }

            let tree = &self.tree;
            let plies = params.rollout_plies;
            let play = |&id: &NodeId| (id, tree.rollout(id, plies));
            let results: Vec<(NodeId, Option<Side>)> = match &pool {
                Some(pool) => pool.install(|| batch.par_iter().map(play).collect()),
                None if params.threads == 1 => batch.iter().map(play).collect(),
                None => batch.par_iter().map(play).collect(),
            };

            let decisive = results.iter().filter(|(_, w)| w.is_some()).count();
            for &(id, winner) in &results {
                self.tree.backpropagate(id, winner);
            }
            iterations += 1;
            rollouts += results.len() as u64;
            debug!("mcts batch {iterations}: {} rollouts, {decisive} decisive, {} nodes", results.len(), self.tree.len());
        }

        let best = self.tree.best_child().map(|id| self.tree.nodes[id].position);
        let elapsed = start.elapsed();
        info!(
            "mcts: {iterations} iterations, {rollouts} rollouts, {} nodes in {:.3}s",
            self.tree.len(),
            elapsed.as_secs_f64()
        );
        MctsResult { best, iterations, rollouts, nodes: self.tree.len(), elapsed }
    }
}

/// Pick the next position for the side to move, or `None` without legal moves.
pub fn search(pos: &Position, params: &MctsParams) -> Option<Position> {
    Mcts::new(*pos).run(params).best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backpropagation_credits_the_side_that_moved() {
        let mut tree = Tree::new(Position::startpos());
        let kids = tree.expand(ROOT).to_vec();
        let child = kids[0];
        tree.backpropagate(child, Some(Side::White));
        // White moved into the child; the root has White to move
        assert_eq!(tree.node(child).wins(), 1);
        assert_eq!(tree.node(child).visits(), 1);
        assert_eq!(tree.root().wins(), 0);
        assert_eq!(tree.root().visits(), 1);
        tree.backpropagate(child, None);
        assert_eq!(tree.node(child).wins(), 1);
        assert_eq!(tree.node(child).visits(), 2);
    }

    #[test]
    fn first_selection_batches_all_root_children() {
        let mut tree = Tree::new(Position::startpos());
        let batch = tree.select();
        assert_eq!(batch.len(), 7);
        for id in batch {
            assert_eq!(tree.node(id).parent(), Some(ROOT));
        }
    }
}
