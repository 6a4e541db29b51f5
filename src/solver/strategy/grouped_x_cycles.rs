//! Grouped X-Cycles. See <https://www.sudokuwiki.org/Grouped_X_Cycles> for an
//! explanation of the technique.

use crate::{all_units, CandidateGrid, Position, SIZE};
use crate::error::SudokuResult;
use crate::modification::{merge_removals, merge_set_values, Modification};
use crate::solver::graph::{self, Group, Node, Strength};
use crate::solver::strategy::Strategy;
use crate::util::{zip_every_pair, DigitSet};

use petgraph::graph::{NodeIndex, UnGraph};

use std::collections::HashMap;

// Grouped X-Cycles extend X-Cycles by allowing a vertex to be a group of
// cells in addition to a single cell. A group is a set of cells with the
// candidate which share two units, that is, a block and a row or a block and
// a column. A strong link connects two vertices in a unit when they are the
// only non-overlapping vertices in that unit, a weak link connects them when
// they are not.
//
// Since vertices can overlap, a standard graph is not sufficient: two
// vertices may be connected by edges of different strengths through
// different units, so the graph is built as a multigraph.

/// Rule 1:
///
/// If a Grouped X-Cycle has an even number of vertices and therefore
/// continuously alternates between strong and weak, then the graph is
/// perfect and has no flaws. Each of the weak links can be treated as a
/// strong link. The candidate can be removed from any cell which is in the
/// same unit as both vertices of a weak link, but not contained in either of
/// the vertices.
pub fn grouped_x_cycles_rule_1(grid: &CandidateGrid) -> Vec<Modification> {
    let mut removals = Vec::new();

    for digit in DigitSet::full() {
        let mut graph = build_graph(grid, digit);
        trim(&mut graph);

        for (source_index, target_index) in
                graph::weak_edges_in_alternating_cycle(&graph) {
            let source = &graph[source_index];
            let target = &graph[target_index];
            removals.extend(removals_between_nodes(grid, digit, source,
                target));
        }
    }

    merge_removals(removals)
}

/// Rule 2:
///
/// If a Grouped X-Cycle has an odd number of vertices and the edges
/// alternate between strong and weak, except for one vertex which is a cell
/// and is connected by two strong links, then the graph is a contradiction.
/// Removing the candidate from the vertex of interest implies that the
/// candidate must be the solution for that vertex, thus causing the cycle to
/// contradict itself. Therefore, the candidate must be the solution for that
/// vertex.
pub fn grouped_x_cycles_rule_2(grid: &CandidateGrid) -> Vec<Modification> {
    let mut set_values = Vec::new();

    for digit in DigitSet::full() {
        let graph = build_graph(grid, digit);
        set_values.extend(graph.node_indices()
            .filter_map(|index| graph[index].as_cell()
                .filter(|_| graph::alternating_cycle_exists(&graph, index,
                    Strength::Strong)))
            .map(|cell| (cell, digit)));
    }

    merge_set_values(set_values)
}

/// Rule 3:
///
/// If a Grouped X-Cycle has an odd number of vertices and the edges
/// alternate between strong and weak, except for one vertex which is a cell
/// and is connected by two weak links, then the graph is a contradiction.
/// Considering the candidate to be the solution for the vertex of interest
/// implies that the candidate must be removed from that vertex, thus causing
/// the cycle to contradict itself. Therefore, the candidate can be removed
/// from the vertex.
pub fn grouped_x_cycles_rule_3(grid: &CandidateGrid) -> Vec<Modification> {
    let mut removals = Vec::new();

    for digit in DigitSet::full() {
        let graph = build_graph(grid, digit);
        removals.extend(graph.node_indices()
            .filter_map(|index| graph[index].as_cell()
                .filter(|_| graph::alternating_cycle_exists(&graph, index,
                    Strength::Weak)))
            .map(|cell| (cell, digit)));
    }

    merge_removals(removals)
}

fn removals_between_nodes(grid: &CandidateGrid, digit: usize, source: &Node,
        target: &Node) -> Vec<(Position, usize)> {
    let mut units = Vec::new();

    if let (Some(source_row), Some(target_row)) =
            (source.row(), target.row()) {
        if source_row == target_row {
            units.push(crate::row_positions(source_row));
        }
    }

    if let (Some(source_column), Some(target_column)) =
            (source.column(), target.column()) {
        if source_column == target_column {
            units.push(crate::column_positions(source_column));
        }
    }

    if source.block() == target.block() {
        units.push(crate::block_positions(source.block()));
    }

    units.into_iter()
        .flatten()
        .filter(|&cell| {
            !source.contains(cell) && !target.contains(cell) &&
                grid.candidates(cell)
                    .map_or(false, |candidates| candidates.contains(digit))
        })
        .map(|cell| (cell, digit))
        .collect()
}

// GraphMap cannot be used here since parallel edges between overlapping
// vertices are significant, so the graph is built on index-based vertices.
fn build_graph(grid: &CandidateGrid, digit: usize)
        -> UnGraph<Node, Strength> {
    let mut graph = UnGraph::new_undirected();

    for unit in all_units() {
        let with_candidate: Vec<Position> = unit.into_iter()
            .filter(|&position| has_candidate(grid, position, digit))
            .collect();
        let strength = if with_candidate.len() == 2 {
            Strength::Strong
        }
        else {
            Strength::Weak
        };

        for (a, b) in zip_every_pair(&with_candidate) {
            let a_index = cell_index(&mut graph, a);
            let b_index = cell_index(&mut graph, b);
            graph.add_edge(a_index, b_index, strength);
        }
    }

    let row_group_indices = create_groups(&mut graph, grid, digit,
        (0..SIZE).map(crate::row_positions), Group::new_row, Node::RowGroup);
    let column_group_indices = create_groups(&mut graph, grid, digit,
        (0..SIZE).map(crate::column_positions), Group::new_column,
        Node::ColumnGroup);
    let mut group_indices = row_group_indices.clone();
    group_indices.extend(&column_group_indices);

    connect_groups_to_cells(&mut graph, grid, digit, &row_group_indices,
        |node| node.row().map(crate::row_positions));
    connect_groups_to_cells(&mut graph, grid, digit, &column_group_indices,
        |node| node.column().map(crate::column_positions));
    connect_groups_to_cells(&mut graph, grid, digit, &group_indices,
        |node| Some(crate::block_positions(node.block())));

    connect_groups_to_groups(&mut graph, grid, digit, &row_group_indices,
        |node| node.row(), crate::row_positions);
    connect_groups_to_groups(&mut graph, grid, digit, &column_group_indices,
        |node| node.column(), crate::column_positions);
    connect_groups_to_groups(&mut graph, grid, digit, &group_indices,
        |node| Some(node.block()), crate::block_positions);

    graph
}

fn has_candidate(grid: &CandidateGrid, position: Position, digit: usize)
        -> bool {
    grid.candidates(position)
        .map_or(false, |candidates| candidates.contains(digit))
}

fn cell_index(graph: &mut UnGraph<Node, Strength>, cell: Position)
        -> NodeIndex {
    let existing = graph.node_indices()
        .find(|&index| graph[index].as_cell() == Some(cell));

    match existing {
        Some(index) => index,
        None => graph.add_node(Node::Cell(cell))
    }
}

fn create_groups(graph: &mut UnGraph<Node, Strength>, grid: &CandidateGrid,
        digit: usize, units: impl Iterator<Item = Vec<Position>>,
        construct: impl Fn(Vec<Position>) -> SudokuResult<Group>,
        wrap: impl Fn(Group) -> Node) -> Vec<NodeIndex> {
    let mut indices = Vec::new();

    for unit in units {
        let mut by_block: HashMap<usize, Vec<Position>> = HashMap::new();

        for position in unit {
            if has_candidate(grid, position, digit) {
                by_block.entry(position.block())
                    .or_insert_with(Vec::new)
                    .push(position);
            }
        }

        for (_, cells) in by_block {
            if cells.len() >= 2 {
                if let Ok(group) = construct(cells) {
                    indices.push(graph.add_node(wrap(group)));
                }
            }
        }
    }

    indices
}

fn connect_groups_to_cells(graph: &mut UnGraph<Node, Strength>,
        grid: &CandidateGrid, digit: usize, group_indices: &[NodeIndex],
        unit_positions: impl Fn(&Node) -> Option<Vec<Position>>) {
    for &group_index in group_indices {
        let group = graph[group_index].clone();
        let unit = match unit_positions(&group) {
            Some(unit) => unit,
            None => continue
        };
        let other_cells_in_unit: Vec<Position> = unit.into_iter()
            .filter(|&cell|
                has_candidate(grid, cell, digit) && !group.contains(cell))
            .collect();
        let strength = if other_cells_in_unit.len() == 1 {
            Strength::Strong
        }
        else {
            Strength::Weak
        };

        for cell in other_cells_in_unit {
            let cell_index = cell_index(graph, cell);
            graph.add_edge(group_index, cell_index, strength);
        }
    }
}

fn connect_groups_to_groups(graph: &mut UnGraph<Node, Strength>,
        grid: &CandidateGrid, digit: usize, group_indices: &[NodeIndex],
        unit_index: impl Fn(&Node) -> Option<usize>,
        unit_positions: impl Fn(usize) -> Vec<Position>) {
    for (a_index, b_index) in zip_every_pair(group_indices) {
        let strength = {
            let a = &graph[a_index];
            let b = &graph[b_index];
            let shared_unit = match (unit_index(a), unit_index(b)) {
                (Some(a_unit), Some(b_unit)) if a_unit == b_unit => a_unit,
                _ => continue
            };

            if a.cells().iter().any(|&cell| b.contains(cell)) {
                continue;
            }

            let has_other_cells = unit_positions(shared_unit).into_iter()
                .any(|cell|
                    has_candidate(grid, cell, digit) &&
                        !a.contains(cell) && !b.contains(cell));

            if has_other_cells {
                Strength::Weak
            }
            else {
                Strength::Strong
            }
        };

        graph.add_edge(a_index, b_index, strength);
    }
}

// Trims the graph of vertices that cannot be part of a cycle for rule 1,
// like graph::trim, but operating on the index-based multigraph.
fn trim(graph: &mut UnGraph<Node, Strength>) {
    loop {
        let to_remove = graph.node_indices().find(|&index| {
            let edges: Vec<_> = graph.edges(index).collect();
            edges.len() < 2 ||
                !edges.iter().any(|edge| *edge.weight() == Strength::Strong)
        });

        match to_remove {
            Some(to_remove) => graph.remove_node(to_remove),
            None => break
        };
    }
}

/// A [Strategy] which applies Grouped X-Cycles, trying the rules in order.
#[derive(Clone)]
pub struct GroupedXCyclesStrategy;

impl Strategy for GroupedXCyclesStrategy {
    fn apply(&self, grid: &CandidateGrid) -> Vec<Modification> {
        let rules = [
            grouped_x_cycles_rule_1,
            grouped_x_cycles_rule_2,
            grouped_x_cycles_rule_3
        ];

        for rule in &rules {
            let modifications = rule(grid);

            if !modifications.is_empty() {
                return modifications;
            }
        }

        Vec::new()
    }
}
