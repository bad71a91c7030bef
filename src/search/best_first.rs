//! Best-first graph search: A* and greedy

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, hash_map::Entry},
};

use log::debug;

use super::problem::{SearchProblem, Solution};

/// How frontier nodes are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// `path cost + heuristic`
    AStar,
    /// `heuristic` only
    Greedy,
}

impl Ranking {
    fn key(self, path_cost: f64, heuristic: f64) -> f64 {
        match self {
            Ranking::AStar => path_cost + heuristic,
            Ranking::Greedy => heuristic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Ranking::AStar => "A*",
            Ranking::Greedy => "greedy",
        }
    }
}

/// A* search. Optimal when the heuristic is admissible.
pub fn astar<P: SearchProblem>(problem: &P) -> Option<Solution<P::State, P::Action>> {
    best_first(problem, Ranking::AStar)
}

/// Greedy best-first search, ranking purely by the heuristic.
pub fn greedy<P: SearchProblem>(problem: &P) -> Option<Solution<P::State, P::Action>> {
    best_first(problem, Ranking::Greedy)
}

struct Node<S, A> {
    state: S,
    action: Option<A>,
    parent: Option<usize>,
    path_cost: f64,
}

/// Heap entry; ordered so the smallest key (then earliest insertion) pops first.
struct FrontierEntry {
    key: f64,
    sequence: u64,
    node: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
}

impl Frontier {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    fn push(&mut self, key: f64, node: usize) {
        self.heap.push(FrontierEntry {
            key,
            sequence: self.next_sequence,
            node,
        });
        self.next_sequence += 1;
    }

    fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|entry| entry.node)
    }
}

/// Generic best-first graph search.
///
/// Nodes live in an arena and refer to their parent by index. The best known
/// path cost of every generated state is remembered: under A* a successor is
/// only pushed when it strictly improves on that cost (so a closed state can
/// be reopened by a cheaper path), while greedy search never revisits a state
/// it has already generated. Returns `None` once the frontier is exhausted.
pub fn best_first<P: SearchProblem>(
    problem: &P,
    ranking: Ranking,
) -> Option<Solution<P::State, P::Action>> {
    let mut nodes: Vec<Node<P::State, P::Action>> = Vec::new();
    let mut best_cost: HashMap<P::State, f64> = HashMap::new();
    let mut frontier = Frontier::new();
    let mut expanded = 0usize;

    let initial = problem.initial_state();
    best_cost.insert(initial.clone(), 0.0);
    frontier.push(ranking.key(0.0, problem.heuristic(&initial)), 0);
    nodes.push(Node {
        state: initial,
        action: None,
        parent: None,
        path_cost: 0.0,
    });

    debug!("{} search started", ranking.name());

    while let Some(index) = frontier.pop() {
        let node = &nodes[index];

        // Stale entry superseded by a cheaper path to the same state.
        if best_cost
            .get(&node.state)
            .is_some_and(|&cost| node.path_cost > cost)
        {
            continue;
        }

        if problem.is_goal(&node.state) {
            let solution = reconstruct(&nodes, index, expanded);
            debug!(
                "{} search found a goal: {} steps, cost {}, {} expanded",
                ranking.name(),
                solution.len(),
                solution.cost,
                expanded
            );
            return Some(solution);
        }

        expanded += 1;
        let state = node.state.clone();
        let path_cost = node.path_cost;

        for action in problem.actions(&state) {
            let next = problem.result(&state, &action);
            let next_cost = path_cost + problem.cost(&state, &action, &next);

            match best_cost.entry(next.clone()) {
                Entry::Occupied(mut known) => {
                    if ranking == Ranking::Greedy || *known.get() <= next_cost {
                        continue;
                    }
                    known.insert(next_cost);
                }
                Entry::Vacant(slot) => {
                    slot.insert(next_cost);
                }
            }

            let key = ranking.key(next_cost, problem.heuristic(&next));
            frontier.push(key, nodes.len());
            nodes.push(Node {
                state: next,
                action: Some(action),
                parent: Some(index),
                path_cost: next_cost,
            });
        }
    }

    debug!(
        "{} search exhausted the frontier after {} expansions",
        ranking.name(),
        expanded
    );
    None
}

fn reconstruct<S: Clone, A: Clone>(
    nodes: &[Node<S, A>],
    goal: usize,
    expanded: usize,
) -> Solution<S, A> {
    let mut path = Vec::new();
    let mut cursor = Some(goal);
    while let Some(index) = cursor {
        let node = &nodes[index];
        path.push((node.action.clone(), node.state.clone()));
        cursor = node.parent;
    }
    path.reverse();

    Solution {
        path,
        cost: nodes[goal].path_cost,
        expanded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Weighted graph given as adjacency lists, goal is the last node.
    struct Graph {
        edges: Vec<Vec<(usize, f64)>>,
        estimates: Vec<f64>,
    }

    impl SearchProblem for Graph {
        type State = usize;
        type Action = usize;

        fn initial_state(&self) -> usize {
            0
        }

        fn actions(&self, state: &usize) -> Vec<usize> {
            self.edges[*state].iter().map(|(to, _)| *to).collect()
        }

        fn result(&self, _state: &usize, action: &usize) -> usize {
            *action
        }

        fn is_goal(&self, state: &usize) -> bool {
            *state == self.edges.len() - 1
        }

        fn cost(&self, state: &usize, action: &usize, _next: &usize) -> f64 {
            self.edges[*state]
                .iter()
                .find(|(to, _)| to == action)
                .map(|(_, cost)| *cost)
                .unwrap_or(f64::INFINITY)
        }

        fn heuristic(&self, state: &usize) -> f64 {
            self.estimates[*state]
        }
    }

    fn diamond() -> Graph {
        // 0 -> 1 -> 3 costs 1 + 10, 0 -> 2 -> 3 costs 4 + 1
        Graph {
            edges: vec![vec![(1, 1.0), (2, 4.0)], vec![(3, 10.0)], vec![(3, 1.0)], vec![]],
            estimates: vec![0.0, 0.0, 0.0, 0.0],
        }
    }

    #[test]
    fn test_astar_finds_cheapest_path() {
        let solution = astar(&diamond()).unwrap();
        assert_eq!(solution.cost, 5.0);
        assert_eq!(solution.actions().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(solution.path[0], (None, 0));
    }

    #[test]
    fn test_astar_reopens_state_reached_more_cheaply() {
        // The inconsistent estimate on node 2 makes A* expand node 3 through
        // the expensive route before the cheap one is discovered.
        let graph = Graph {
            edges: vec![
                vec![(1, 1.0), (2, 1.0)],
                vec![(3, 5.0)],
                vec![(3, 1.0)],
                vec![(4, 10.0)],
                vec![],
            ],
            estimates: vec![0.0, 0.0, 7.0, 0.0, 0.0],
        };
        let solution = astar(&graph).unwrap();
        assert_eq!(solution.cost, 12.0);
        assert_eq!(solution.actions().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_greedy_follows_heuristic() {
        let mut graph = diamond();
        graph.estimates = vec![0.0, 0.5, 3.0, 0.0];
        let solution = greedy(&graph).unwrap();
        assert_eq!(solution.cost, 11.0);
    }

    #[test]
    fn test_unreachable_goal_returns_none() {
        let graph = Graph {
            edges: vec![vec![(1, 1.0)], vec![(0, 1.0)], vec![]],
            estimates: vec![0.0; 3],
        };
        assert!(astar(&graph).is_none());
        assert!(greedy(&graph).is_none());
    }

    #[test]
    fn test_initial_goal_has_empty_path() {
        let graph = Graph {
            edges: vec![vec![]],
            estimates: vec![0.0],
        };
        let solution = astar(&graph).unwrap();
        assert!(solution.is_empty());
        assert_eq!(solution.expanded, 0);
    }

    #[test]
    fn test_ties_resolve_in_insertion_order() {
        // Two equal-cost routes to the goal; the first generated one wins.
        let graph = Graph {
            edges: vec![vec![(1, 1.0), (2, 1.0)], vec![(3, 1.0)], vec![(3, 1.0)], vec![]],
            estimates: vec![0.0; 4],
        };
        let solution = astar(&graph).unwrap();
        assert_eq!(solution.actions().copied().collect::<Vec<_>>(), vec![1, 3]);
    }
}
