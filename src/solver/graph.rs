//! This module contains the link-graph infrastructure shared by the chain
//! strategies in [strategy](../strategy/index.html).
//!
//! Vertices are either plain [Position]s (single-digit graphs), [Candidate]s
//! (one vertex per digit per cell), or [Node]s (cells and cell groups for
//! Grouped X-Cycles). Edges carry a [Strength]. A strong link is one where,
//! if one endpoint is not the solution, the other must be. A weak link only
//! states that both endpoints cannot be the solution simultaneously. The
//! searches in this module find cycles and paths whose edges alternate
//! between strong and weak links, with the relaxation that a strong link may
//! stand in for a weak one.

use crate::Position;
use crate::error::{SudokuError, SudokuResult};

use petgraph::graphmap::{NodeTrait, UnGraphMap};
use petgraph::visit::{
    depth_first_search,
    Data,
    DfsEvent,
    EdgeRef,
    IntoEdgeReferences,
    IntoEdges
};

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// The strength of a link between two vertices of a candidate link graph.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Strength {

    /// If one endpoint of the link is not the solution, the other one must
    /// be, and vice versa.
    Strong,

    /// At most one endpoint of the link is the solution.
    Weak
}

impl Strength {

    /// The opposite strength.
    pub fn opposite(self) -> Strength {
        match self {
            Strength::Strong => Strength::Weak,
            Strength::Weak => Strength::Strong
        }
    }

    /// Indicates whether a link of this strength may be used where a link of
    /// the required strength is expected. A strong link can always take the
    /// place of a weak link, but not the other way around.
    pub fn is_compatible_with(self, required_type: Strength) -> bool {
        match self {
            Strength::Strong => true,
            Strength::Weak => required_type == Strength::Weak
        }
    }
}

/// One of the two alternating colors assigned to the vertices of a connected
/// link graph. Each color represents one of the two possible solutions of the
/// chain.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Color {

    /// The color of the start vertex of the coloring traversal.
    First,

    /// The color of all neighbors of [Color::First] vertices.
    Second
}

impl Color {

    /// The opposite color.
    pub fn opposite(self) -> Color {
        match self {
            Color::First => Color::Second,
            Color::Second => Color::First
        }
    }
}

/// A specific candidate digit in a specific cell, used as the vertex type of
/// graphs that span multiple digits.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Candidate {

    /// The position of the cell.
    pub position: Position,

    /// The candidate digit.
    pub digit: usize
}

/// Two or three cells which share a block as well as a row or a column. In a
/// Grouped X-Cycles graph such a group acts as a single vertex: the group
/// contains the solution if any of its cells does.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Group {
    cells: Vec<Position>
}

impl Group {
    fn validate(cells: &[Position]) -> SudokuResult<()> {
        if cells.len() < 2 || cells.len() > crate::BLOCK_SIZE {
            return Err(SudokuError::InvalidGroup);
        }

        let block = cells[0].block();

        if cells.iter().any(|cell| cell.block() != block) {
            return Err(SudokuError::InvalidGroup);
        }

        Ok(())
    }

    fn new(mut cells: Vec<Position>) -> Group {
        cells.sort();
        Group { cells }
    }

    /// Creates a group whose cells lie in the same row (and block).
    ///
    /// # Errors
    ///
    /// If the cells do not form a valid row group, i.e. there are fewer than
    /// 2 or more than 3 of them or they do not all share a block and a row.
    /// In that case, `SudokuError::InvalidGroup` is returned.
    pub fn new_row(cells: Vec<Position>) -> SudokuResult<Group> {
        Group::validate(&cells)?;

        if cells.iter().any(|cell| cell.row != cells[0].row) {
            return Err(SudokuError::InvalidGroup);
        }

        Ok(Group::new(cells))
    }

    /// Creates a group whose cells lie in the same column (and block).
    ///
    /// # Errors
    ///
    /// If the cells do not form a valid column group, i.e. there are fewer
    /// than 2 or more than 3 of them or they do not all share a block and a
    /// column. In that case, `SudokuError::InvalidGroup` is returned.
    pub fn new_column(cells: Vec<Position>) -> SudokuResult<Group> {
        Group::validate(&cells)?;

        if cells.iter().any(|cell| cell.column != cells[0].column) {
            return Err(SudokuError::InvalidGroup);
        }

        Ok(Group::new(cells))
    }

    /// The cells of this group, sorted by position.
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// The index of the block that contains this group.
    pub fn block(&self) -> usize {
        self.cells[0].block()
    }

    /// Indicates whether the given position is one of this group's cells.
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }
}

/// A vertex of a Grouped X-Cycles graph, which is either a single cell or a
/// [Group] of cells.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Node {

    /// A single cell.
    Cell(Position),

    /// A group of cells which share a block and a row.
    RowGroup(Group),

    /// A group of cells which share a block and a column.
    ColumnGroup(Group)
}

impl Node {

    /// The row shared by all cells of this node, if there is one.
    pub fn row(&self) -> Option<usize> {
        match self {
            Node::Cell(position) => Some(position.row),
            Node::RowGroup(group) => Some(group.cells()[0].row),
            Node::ColumnGroup(_) => None
        }
    }

    /// The column shared by all cells of this node, if there is one.
    pub fn column(&self) -> Option<usize> {
        match self {
            Node::Cell(position) => Some(position.column),
            Node::RowGroup(_) => None,
            Node::ColumnGroup(group) => Some(group.cells()[0].column)
        }
    }

    /// The index of the block that contains all cells of this node.
    pub fn block(&self) -> usize {
        match self {
            Node::Cell(position) => position.block(),
            Node::RowGroup(group) => group.block(),
            Node::ColumnGroup(group) => group.block()
        }
    }

    /// The cells covered by this node.
    pub fn cells(&self) -> Vec<Position> {
        match self {
            Node::Cell(position) => vec![*position],
            Node::RowGroup(group) => group.cells().to_vec(),
            Node::ColumnGroup(group) => group.cells().to_vec()
        }
    }

    /// Indicates whether the given position is covered by this node.
    pub fn contains(&self, position: Position) -> bool {
        match self {
            Node::Cell(cell) => *cell == position,
            Node::RowGroup(group) => group.contains(position),
            Node::ColumnGroup(group) => group.contains(position)
        }
    }

    /// The position of this node's cell, if it is a single cell.
    pub fn as_cell(&self) -> Option<Position> {
        match self {
            Node::Cell(position) => Some(*position),
            _ => None
        }
    }
}

pub(crate) fn opposite_vertex<E>(edge: E, vertex: E::NodeId) -> E::NodeId
where
    E: EdgeRef,
    E::NodeId: PartialEq
{
    if edge.source() == vertex {
        edge.target()
    }
    else {
        edge.source()
    }
}

/// Splits the given graph into its connected components, each represented by
/// its own graph.
pub(crate) fn connected_components<N>(graph: &UnGraphMap<N, ()>)
        -> Vec<UnGraphMap<N, ()>>
where
    N: NodeTrait
{
    petgraph::algo::tarjan_scc(graph).into_iter()
        .map(|vertices| {
            let mut component = UnGraphMap::new();

            for &vertex in &vertices {
                component.add_node(vertex);
            }

            let edges = crate::util::zip_every_pair(&vertices)
                .filter(|(a, b)| graph.contains_edge(*a, *b));

            for (a, b) in edges {
                component.add_edge(a, b, ());
            }

            component
        })
        .collect()
}

/// Assigns alternating colors to the vertices of the given graph by a
/// depth-first traversal. The graph is assumed to be connected, otherwise
/// only the component of the first vertex is colored.
pub(crate) fn color_map<N>(graph: &UnGraphMap<N, ()>) -> HashMap<N, Color>
where
    N: NodeTrait
{
    let mut colors = HashMap::new();

    if let Some(start) = graph.nodes().next() {
        colors.insert(start, Color::First);
        depth_first_search(graph, Some(start), |event| {
            if let DfsEvent::TreeEdge(a, b) = event {
                let color = colors[&a].opposite();
                colors.insert(b, color);
            }
        });
    }

    colors
}

/// Like [color_map], but returns the vertices of each color as a pair of
/// lists.
pub(crate) fn color_lists<N>(graph: &UnGraphMap<N, ()>) -> (Vec<N>, Vec<N>)
where
    N: NodeTrait
{
    let mut first = Vec::new();
    let mut second = Vec::new();

    if let Some(start) = graph.nodes().next() {
        first.push(start);
        depth_first_search(graph, Some(start), |event| {
            if let DfsEvent::TreeEdge(a, b) = event {
                if first.contains(&a) {
                    second.push(b);
                }
                else {
                    first.push(b);
                }
            }
        });
    }

    (first, second)
}

/// Continuously removes vertices that cannot be part of an alternating
/// cycle: vertices with fewer than two incident edges or without any
/// incident strong link. The resulting graph is either empty or only
/// contains vertices with a degree of two or more that are connected by at
/// least one strong link.
pub(crate) fn trim<N>(graph: &mut UnGraphMap<N, Strength>)
where
    N: NodeTrait
{
    loop {
        let to_remove = graph.nodes().find(|&vertex| {
            let edges: Vec<_> = graph.edges(vertex).collect();
            edges.len() < 2 ||
                !edges.iter().any(|edge| *edge.weight() == Strength::Strong)
        });

        match to_remove {
            Some(to_remove) => graph.remove_node(to_remove),
            None => break
        };
    }
}

/// Indicates whether the graph contains a cycle through the given vertex
/// whose edges alternate between strong and weak links, except that both
/// edges incident to the given vertex have the specified type. Strong links
/// may take the place of weak links everywhere.
pub(crate) fn alternating_cycle_exists<G>(graph: G, vertex: G::NodeId,
        adjacent_edges_type: Strength) -> bool
where
    G: IntoEdges + Data<EdgeWeight = Strength>,
    G::NodeId: Eq + Hash
{
    let adjacent_edges: Vec<_> = graph.edges(vertex)
        .filter(|edge| *edge.weight() == adjacent_edges_type)
        .collect();

    let found = crate::util::zip_every_pair(&adjacent_edges)
        .any(|(edge_a, edge_b)| {
            let start = opposite_vertex(edge_a, vertex);
            let end = opposite_vertex(edge_b, vertex);
            let mut visited = HashSet::new();
            visited.insert(vertex);
            visited.insert(start);
            cycle_search(graph, adjacent_edges_type, end, start,
                adjacent_edges_type.opposite(), &mut visited)
        });
    found
}

fn cycle_search<G>(graph: G, adjacent_edges_type: Strength, end: G::NodeId,
        current_vertex: G::NodeId, next_type: Strength,
        visited: &mut HashSet<G::NodeId>) -> bool
where
    G: IntoEdges + Data<EdgeWeight = Strength>,
    G::NodeId: Eq + Hash
{
    let next_vertices: Vec<_> = graph.edges(current_vertex)
        .filter(|edge| edge.weight().is_compatible_with(next_type))
        .map(|edge| opposite_vertex(edge, current_vertex))
        .collect();

    if adjacent_edges_type.opposite() == next_type &&
            next_vertices.contains(&end) {
        return true;
    }

    for next_vertex in next_vertices {
        if next_vertex == end || visited.contains(&next_vertex) {
            continue;
        }

        visited.insert(next_vertex);
        let found = cycle_search(graph, adjacent_edges_type, end, next_vertex,
            next_type.opposite(), visited);
        visited.remove(&next_vertex);

        if found {
            return true;
        }
    }

    false
}

/// Collects the endpoint pairs of all weak edges that lie on some cycle
/// whose links alternate between strong and weak, where strong links may
/// take the place of weak links. This powers rule 1 of the cycle-based
/// strategies: every such weak link behaves like a strong link.
pub(crate) fn weak_edges_in_alternating_cycle<G>(graph: G)
        -> Vec<(G::NodeId, G::NodeId)>
where
    G: IntoEdgeReferences + IntoEdges + Data<EdgeWeight = Strength>,
    G::NodeId: Eq + Hash
{
    let mut collected = HashSet::new();
    let mut result = Vec::new();
    let weak_edges: Vec<_> = graph.edge_references()
        .filter(|edge| *edge.weight() == Strength::Weak)
        .map(|edge| (edge.source(), edge.target()))
        .collect();

    for &(source, target) in &weak_edges {
        if collected.contains(&(source, target)) {
            continue;
        }

        for (a, b) in alternating_cycle_weak_edges(graph, source, target) {
            if collected.insert((a, b)) {
                collected.insert((b, a));
                result.push((a, b));
            }
        }
    }

    result
}

fn alternating_cycle_weak_edges<G>(graph: G, start: G::NodeId,
        end: G::NodeId) -> Vec<(G::NodeId, G::NodeId)>
where
    G: IntoEdges + Data<EdgeWeight = Strength>,
    G::NodeId: Eq + Hash
{
    fn search<G>(graph: G, end: G::NodeId, current_vertex: G::NodeId,
            next_type: Strength, visited: &mut HashSet<G::NodeId>,
            weak_edges: &mut Vec<(G::NodeId, G::NodeId)>) -> bool
    where
        G: IntoEdges + Data<EdgeWeight = Strength>,
        G::NodeId: Eq + Hash
    {
        let next_edges: Vec<(Strength, G::NodeId)> = graph
            .edges(current_vertex)
            .filter(|edge| edge.weight().is_compatible_with(next_type))
            .map(|edge|
                (*edge.weight(), opposite_vertex(edge, current_vertex)))
            .collect();

        if next_type == Strength::Strong &&
                next_edges.iter().any(|(_, vertex)| *vertex == end) {
            return true;
        }

        for (strength, next_vertex) in next_edges {
            if next_vertex == end || visited.contains(&next_vertex) {
                continue;
            }

            visited.insert(next_vertex);

            if strength == Strength::Weak {
                weak_edges.push((current_vertex, next_vertex));
            }

            if search(graph, end, next_vertex, next_type.opposite(), visited,
                    weak_edges) {
                return true;
            }

            if strength == Strength::Weak {
                weak_edges.pop();
            }

            visited.remove(&next_vertex);
        }

        false
    }

    let mut visited = HashSet::new();
    visited.insert(start);
    let mut weak_edges = vec![(start, end)];

    if search(graph, end, start, Strength::Strong, &mut visited,
            &mut weak_edges) {
        weak_edges
    }
    else {
        Vec::new()
    }
}

/// Indicates whether the graph contains a path from `start` to `end` whose
/// edges alternate between strong and weak links, beginning and ending with
/// a strong link. Strong links may take the place of weak links.
pub(crate) fn alternating_path_exists<G>(graph: G, start: G::NodeId,
        end: G::NodeId) -> bool
where
    G: IntoEdges + Data<EdgeWeight = Strength>,
    G::NodeId: Eq + Hash
{
    fn search<G>(graph: G, end: G::NodeId, current_vertex: G::NodeId,
            next_type: Strength, visited: &mut HashSet<G::NodeId>) -> bool
    where
        G: IntoEdges + Data<EdgeWeight = Strength>,
        G::NodeId: Eq + Hash
    {
        let next_vertices: Vec<_> = graph.edges(current_vertex)
            .filter(|edge| edge.weight().is_compatible_with(next_type))
            .map(|edge| opposite_vertex(edge, current_vertex))
            .collect();

        if next_type == Strength::Strong && next_vertices.contains(&end) {
            return true;
        }

        for next_vertex in next_vertices {
            if next_vertex == end || visited.contains(&next_vertex) {
                continue;
            }

            visited.insert(next_vertex);
            let found = search(graph, end, next_vertex, next_type.opposite(),
                visited);
            visited.remove(&next_vertex);

            if found {
                return true;
            }
        }

        false
    }

    let mut visited = HashSet::new();
    visited.insert(start);
    search(graph, end, start, Strength::Strong, &mut visited)
}

#[cfg(test)]
mod tests {

    use super::*;

    fn pos(row: usize, column: usize) -> Position {
        Position::new(row, column).unwrap()
    }

    #[test]
    fn strength_compatibility() {
        assert!(Strength::Strong.is_compatible_with(Strength::Strong));
        assert!(Strength::Strong.is_compatible_with(Strength::Weak));
        assert!(Strength::Weak.is_compatible_with(Strength::Weak));
        assert!(!Strength::Weak.is_compatible_with(Strength::Strong));
        assert_eq!(Strength::Weak, Strength::Strong.opposite());
        assert_eq!(Strength::Strong, Strength::Weak.opposite());
    }

    #[test]
    fn row_group_validation() {
        assert!(Group::new_row(vec![pos(0, 0), pos(0, 1)]).is_ok());
        assert!(Group::new_row(vec![pos(0, 0), pos(0, 1), pos(0, 2)]).is_ok());
        assert_eq!(Err(SudokuError::InvalidGroup),
            Group::new_row(vec![pos(0, 0)]));
        assert_eq!(Err(SudokuError::InvalidGroup),
            Group::new_row(vec![pos(0, 0), pos(1, 0)]));
        assert_eq!(Err(SudokuError::InvalidGroup),
            Group::new_row(vec![pos(0, 2), pos(0, 3)]));
    }

    #[test]
    fn column_group_validation() {
        assert!(Group::new_column(vec![pos(3, 4), pos(5, 4)]).is_ok());
        assert_eq!(Err(SudokuError::InvalidGroup),
            Group::new_column(vec![pos(2, 4), pos(3, 4)]));
        assert_eq!(Err(SudokuError::InvalidGroup),
            Group::new_column(vec![pos(3, 4), pos(3, 5)]));
    }

    #[test]
    fn node_accessors() {
        let cell = Node::Cell(pos(4, 7));
        assert_eq!(Some(4), cell.row());
        assert_eq!(Some(7), cell.column());
        assert_eq!(5, cell.block());
        assert_eq!(Some(pos(4, 7)), cell.as_cell());

        let row_group =
            Node::RowGroup(Group::new_row(vec![pos(1, 3), pos(1, 5)]).unwrap());
        assert_eq!(Some(1), row_group.row());
        assert_eq!(None, row_group.column());
        assert_eq!(1, row_group.block());
        assert_eq!(None, row_group.as_cell());
        assert!(row_group.contains(pos(1, 5)));
        assert!(!row_group.contains(pos(1, 4)));
    }

    #[test]
    fn connected_components_split() {
        let mut graph: UnGraphMap<usize, ()> = UnGraphMap::new();
        graph.add_edge(1, 2, ());
        graph.add_edge(2, 3, ());
        graph.add_edge(4, 5, ());

        let mut components = connected_components(&graph);
        components.sort_by_key(UnGraphMap::node_count);
        assert_eq!(2, components.len());
        assert_eq!(2, components[0].node_count());
        assert_eq!(3, components[1].node_count());
        assert!(components[1].contains_edge(1, 2));
        assert!(components[1].contains_edge(2, 3));
        assert!(!components[1].contains_edge(1, 3));
    }

    #[test]
    fn color_map_alternates() {
        let mut graph: UnGraphMap<usize, ()> = UnGraphMap::new();
        graph.add_edge(1, 2, ());
        graph.add_edge(2, 3, ());
        graph.add_edge(3, 4, ());

        let colors = color_map(&graph);
        assert_eq!(4, colors.len());
        assert_ne!(colors[&1], colors[&2]);
        assert_ne!(colors[&2], colors[&3]);
        assert_ne!(colors[&3], colors[&4]);
    }

    #[test]
    fn color_lists_partition_vertices() {
        let mut graph: UnGraphMap<usize, ()> = UnGraphMap::new();
        graph.add_edge(1, 2, ());
        graph.add_edge(2, 3, ());

        let (first, second) = color_lists(&graph);
        assert_eq!(3, first.len() + second.len());
        let ones: Vec<_> =
            if first.contains(&2) { second.clone() } else { first.clone() };
        assert!(ones.contains(&1));
        assert!(ones.contains(&3));
    }

    #[test]
    fn trim_removes_leaves_and_strongless_vertices() {
        let mut graph: UnGraphMap<usize, Strength> = UnGraphMap::new();
        // 1-2-3-4-1 square of alternating links with a dangling vertex 5.
        graph.add_edge(1, 2, Strength::Strong);
        graph.add_edge(2, 3, Strength::Weak);
        graph.add_edge(3, 4, Strength::Strong);
        graph.add_edge(4, 1, Strength::Weak);
        graph.add_edge(4, 5, Strength::Strong);

        trim(&mut graph);
        assert_eq!(4, graph.node_count());
        assert!(!graph.contains_node(5));
    }

    #[test]
    fn trim_clears_weak_only_graph() {
        let mut graph: UnGraphMap<usize, Strength> = UnGraphMap::new();
        graph.add_edge(1, 2, Strength::Weak);
        graph.add_edge(2, 3, Strength::Weak);
        graph.add_edge(3, 1, Strength::Weak);

        trim(&mut graph);
        assert_eq!(0, graph.node_count());
    }

    #[test]
    fn alternating_cycle_found_through_double_strong_vertex() {
        let mut graph: UnGraphMap<usize, Strength> = UnGraphMap::new();
        // Odd cycle: vertex 1 has two strong links, the rest alternates.
        graph.add_edge(1, 2, Strength::Strong);
        graph.add_edge(2, 3, Strength::Weak);
        graph.add_edge(3, 4, Strength::Strong);
        graph.add_edge(4, 5, Strength::Weak);
        graph.add_edge(5, 1, Strength::Strong);

        assert!(alternating_cycle_exists(&graph, 1, Strength::Strong));
        assert!(!alternating_cycle_exists(&graph, 3, Strength::Strong));
        assert!(!alternating_cycle_exists(&graph, 1, Strength::Weak));
    }

    #[test]
    fn alternating_cycle_found_through_double_weak_vertex() {
        let mut graph: UnGraphMap<usize, Strength> = UnGraphMap::new();
        graph.add_edge(1, 2, Strength::Weak);
        graph.add_edge(2, 3, Strength::Strong);
        graph.add_edge(3, 4, Strength::Weak);
        graph.add_edge(4, 5, Strength::Strong);
        graph.add_edge(5, 1, Strength::Weak);

        assert!(alternating_cycle_exists(&graph, 1, Strength::Weak));
        assert!(!alternating_cycle_exists(&graph, 1, Strength::Strong));
    }

    #[test]
    fn weak_edges_collected_from_even_cycle() {
        let mut graph: UnGraphMap<usize, Strength> = UnGraphMap::new();
        graph.add_edge(1, 2, Strength::Strong);
        graph.add_edge(2, 3, Strength::Weak);
        graph.add_edge(3, 4, Strength::Strong);
        graph.add_edge(4, 1, Strength::Weak);

        let mut weak_edges = weak_edges_in_alternating_cycle(&graph);

        for edge in weak_edges.iter_mut() {
            if edge.0 > edge.1 {
                *edge = (edge.1, edge.0);
            }
        }

        weak_edges.sort();
        assert_eq!(vec![(1, 4), (2, 3)], weak_edges);
    }

    #[test]
    fn weak_edges_empty_without_cycle() {
        let mut graph: UnGraphMap<usize, Strength> = UnGraphMap::new();
        graph.add_edge(1, 2, Strength::Strong);
        graph.add_edge(2, 3, Strength::Weak);
        graph.add_edge(3, 4, Strength::Strong);

        assert!(weak_edges_in_alternating_cycle(&graph).is_empty());
    }

    #[test]
    fn alternating_path_requires_strong_ends() {
        let mut graph: UnGraphMap<usize, Strength> = UnGraphMap::new();
        graph.add_edge(1, 2, Strength::Strong);
        graph.add_edge(2, 3, Strength::Weak);
        graph.add_edge(3, 4, Strength::Strong);

        assert!(alternating_path_exists(&graph, 1, 4));
        assert!(!alternating_path_exists(&graph, 2, 3));
    }

    #[test]
    fn alternating_path_tolerates_strong_for_weak() {
        let mut graph: UnGraphMap<usize, Strength> = UnGraphMap::new();
        graph.add_edge(1, 2, Strength::Strong);
        graph.add_edge(2, 3, Strength::Strong);
        graph.add_edge(3, 4, Strength::Strong);

        assert!(alternating_path_exists(&graph, 1, 4));
    }
}
