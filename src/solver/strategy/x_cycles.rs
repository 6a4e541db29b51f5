//! X-Cycles. See <http://www.sudokuwiki.org/X_Cycles> and
//! <http://www.sudokuwiki.org/X_Cycles_Part_2> for an explanation of the
//! technique.

use crate::{all_units, CandidateGrid, Position};
use crate::modification::{merge_removals, merge_set_values, Modification};
use crate::solver::graph::{self, Strength};
use crate::solver::strategy::Strategy;
use crate::util::{zip_every_pair, DigitSet};

use petgraph::graphmap::{GraphMap, UnGraphMap};

// An X-Cycles graph is for a single digit and its vertices are the unsolved
// cells which have that digit as a candidate. A strong link connects two
// cells in a unit when they are the only such cells in that unit. A weak
// link connects two cells in a unit when they are not. An X-Cycle is a cycle
// in the graph whose edges alternate between strong and weak links, where a
// strong link may take the place of a weak link.

/// Rule 1:
///
/// If an X-Cycle has an even number of vertices and therefore continuously
/// alternates between strong and weak, then the graph is perfect and has no
/// flaws. Each of the weak links can be treated as a strong link. The digit
/// can be removed from any other cell which is in the same unit as both
/// vertices of a weak link.
pub fn x_cycles_rule_1(grid: &CandidateGrid) -> Vec<Modification> {
    let mut removals = Vec::new();

    for digit in DigitSet::full() {
        let mut chain = create_strong_links(grid, digit);
        add_weak_links(&mut chain);
        graph::trim(&mut chain);

        for (source, target) in graph::weak_edges_in_alternating_cycle(&chain) {
            removals.extend(
                removals_in_shared_units(grid, digit, source, target));
        }
    }

    merge_removals(removals)
}

/// Rule 2:
///
/// If an X-Cycle has an odd number of vertices and the edges alternate
/// between strong and weak, except for one vertex which is connected by two
/// strong links, then the graph is a contradiction. Removing the digit from
/// the vertex of interest implies that the digit must be the solution for
/// that vertex, thus causing the cycle to contradict itself. However,
/// considering the digit to be the solution for that vertex does not cause
/// any contradiction in the cycle. Therefore, the digit must be the solution
/// for that vertex.
pub fn x_cycles_rule_2(grid: &CandidateGrid) -> Vec<Modification> {
    let mut set_values = Vec::new();

    for digit in DigitSet::full() {
        let mut chain = create_strong_links(grid, digit);
        add_weak_links(&mut chain);
        set_values.extend(chain.nodes()
            .filter(|&vertex|
                graph::alternating_cycle_exists(&chain, vertex,
                    Strength::Strong))
            .map(|vertex| (vertex, digit)));
    }

    merge_set_values(set_values)
}

/// Rule 3:
///
/// If an X-Cycle has an odd number of vertices and the edges alternate
/// between strong and weak, except for one vertex which is connected by two
/// weak links, then the graph is a contradiction. Considering the digit to
/// be the solution for the vertex of interest implies that the digit must be
/// removed from that vertex, thus causing the cycle to contradict itself.
/// However, removing the digit from that vertex does not cause any
/// contradiction in the cycle. Therefore, the digit can be removed from the
/// vertex.
pub fn x_cycles_rule_3(grid: &CandidateGrid) -> Vec<Modification> {
    let mut removals = Vec::new();

    for digit in DigitSet::full() {
        let mut chain = create_strong_links(grid, digit);
        add_weak_links(&mut chain);
        additional_weak_links(&mut chain, grid, digit);
        removals.extend(chain.nodes()
            .filter(|&vertex|
                graph::alternating_cycle_exists(&chain, vertex,
                    Strength::Weak))
            .map(|vertex| (vertex, digit)));
    }

    merge_removals(removals)
}

pub(crate) fn removals_in_shared_units(grid: &CandidateGrid, digit: usize,
        source: Position, target: Position) -> Vec<(Position, usize)> {
    let shared_units = [
        (source.row == target.row, crate::row_positions(source.row)),
        (source.column == target.column,
            crate::column_positions(source.column)),
        (source.block() == target.block(),
            crate::block_positions(source.block()))
    ];

    shared_units.iter()
        .filter(|(shared, _)| *shared)
        .flat_map(|(_, unit)| unit.iter().copied())
        .filter(|&cell| {
            cell != source && cell != target &&
                grid.candidates(cell)
                    .map_or(false, |candidates| candidates.contains(digit))
        })
        .map(|cell| (cell, digit))
        .collect()
}

fn create_strong_links(grid: &CandidateGrid, digit: usize)
        -> UnGraphMap<Position, Strength> {
    let edges = all_units().into_iter()
        .map(|unit| {
            unit.into_iter()
                .filter(|&position|
                    grid.candidates(position)
                        .map_or(false,
                            |candidates| candidates.contains(digit)))
                .collect::<Vec<_>>()
        })
        .filter_map(|with_candidate| match with_candidate[..] {
            [a, b] => Some((a, b, Strength::Strong)),
            _ => None
        });
    GraphMap::from_edges(edges)
}

fn add_weak_links(chain: &mut UnGraphMap<Position, Strength>) {
    let vertices: Vec<Position> = chain.nodes().collect();
    let edges: Vec<_> = zip_every_pair(&vertices)
        .filter(|(a, b)| a.sees(*b) && !chain.contains_edge(*a, *b))
        .map(|(a, b)| (a, b, Strength::Weak))
        .collect();

    for (a, b, strength) in edges {
        chain.add_edge(a, b, strength);
    }
}

fn additional_weak_links(chain: &mut UnGraphMap<Position, Strength>,
        grid: &CandidateGrid, digit: usize) {
    let edges: Vec<_> = grid.positions_with_candidate(digit).into_iter()
        .filter(|&cell| !chain.contains_node(cell))
        .flat_map(|cell| {
            chain.nodes()
                .filter(|vertex| vertex.sees(cell))
                .map(|vertex| (vertex, cell, Strength::Weak))
                .collect::<Vec<_>>()
        })
        .collect();

    for (a, b, strength) in edges {
        chain.add_edge(a, b, strength);
    }
}

/// A [Strategy] which applies X-Cycles, trying the rules in order.
#[derive(Clone)]
pub struct XCyclesStrategy;

impl Strategy for XCyclesStrategy {
    fn apply(&self, grid: &CandidateGrid) -> Vec<Modification> {
        let rules = [x_cycles_rule_1, x_cycles_rule_2, x_cycles_rule_3];

        for rule in &rules {
            let modifications = rule(grid);

            if !modifications.is_empty() {
                return modifications;
            }
        }

        Vec::new()
    }
}
