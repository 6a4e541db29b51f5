//! 3D Medusa. See <https://www.sudokuwiki.org/3D_Medusa> for an explanation
//! of the technique.

use crate::{all_units, CandidateGrid, Position};
use crate::modification::{merge_removals, merge_set_values, Modification};
use crate::solver::graph::{self, Candidate, Color};
use crate::solver::strategy::Strategy;
use crate::util::{zip_every_pair, DigitSet};

use petgraph::graphmap::UnGraphMap;

use std::collections::HashMap;

// A 3D Medusa is a graph in which each vertex is a particular candidate in a
// cell and each edge is a strong link. When a digit is a candidate in only
// two cells of a unit, there is an edge between those two vertices.
// Additionally, when a cell contains only two candidates, there is an edge
// between them. Each medusa is colored with alternating colors. The two
// colors represent the two possible solutions: either the first color is the
// solution for the medusa or the second color is.

/// Rule 1: Twice in a Cell
///
/// If there are two vertices with the same color that are in the same cell,
/// then that color cannot be the solution and the opposite color must be
/// the solution. All vertices with the opposite color can be set as the
/// solution.
pub fn medusa_rule_1(grid: &CandidateGrid) -> Vec<Modification> {
    let mut set_values = Vec::new();

    for component in create_connected_components(grid) {
        let colors = graph::color_map(&component);
        let vertices: Vec<Candidate> = component.nodes().collect();
        let conflict = zip_every_pair(&vertices)
            .find(|(a, b)|
                a.position == b.position && colors[a] == colors[b]);

        if let Some((a, _)) = conflict {
            let color_to_set = colors[&a].opposite();
            set_values.extend(colored_vertices(&vertices, &colors,
                color_to_set));
        }
    }

    merge_set_values(set_values)
}

/// Rule 2: Twice in a Unit
///
/// If there are two vertices with the same color and the same digit that
/// are in the same unit, then that color cannot be the solution and the
/// opposite color must be the solution. All vertices with the opposite
/// color can be set as the solution.
pub fn medusa_rule_2(grid: &CandidateGrid) -> Vec<Modification> {
    let mut set_values = Vec::new();

    for component in create_connected_components(grid) {
        let colors = graph::color_map(&component);
        let vertices: Vec<Candidate> = component.nodes().collect();
        let conflict = zip_every_pair(&vertices)
            .find(|(a, b)|
                a.digit == b.digit && colors[a] == colors[b] &&
                    a.position.sees(b.position));

        if let Some((a, _)) = conflict {
            let color_to_set = colors[&a].opposite();
            set_values.extend(colored_vertices(&vertices, &colors,
                color_to_set));
        }
    }

    merge_set_values(set_values)
}

/// Rule 3: Two colors in a cell
///
/// If there are two differently colored candidates in a cell, then the
/// solution must be one of the two candidates. All other candidates in the
/// cell can be removed.
pub fn medusa_rule_3(grid: &CandidateGrid) -> Vec<Modification> {
    let mut removals = Vec::new();

    for component in create_connected_components(grid) {
        let colors = graph::color_map(&component);
        let vertices: Vec<Candidate> = component.nodes()
            .filter(|vertex|
                grid.candidates(vertex.position)
                    .map_or(false, |candidates| candidates.len() > 2))
            .collect();
        let bicolored = zip_every_pair(&vertices)
            .find(|(a, b)|
                a.position == b.position && colors[a] != colors[b]);

        if let Some((a, _)) = bicolored {
            let position = a.position;

            if let Some(candidates) = grid.candidates(position) {
                removals.extend(candidates.iter()
                    .map(|digit| Candidate { position, digit })
                    .filter(|vertex| !component.contains_node(*vertex))
                    .map(|vertex| (vertex.position, vertex.digit)));
            }
        }
    }

    merge_removals(removals)
}

/// Rule 4: Two colors 'elsewhere'
///
/// If an uncolored candidate of an unsolved cell can see two differently
/// colored vertices with the same digit, then the digit must be the
/// solution to one of the colored cells, and the uncolored candidate can be
/// removed.
pub fn medusa_rule_4(grid: &CandidateGrid) -> Vec<Modification> {
    let mut removals = Vec::new();

    for component in create_connected_components(grid) {
        let (first, second) = graph::color_lists(&component);
        removals.extend(uncolored_candidates(grid, &component)
            .filter(|vertex|
                can_see_color(*vertex, &first) &&
                    can_see_color(*vertex, &second))
            .map(|vertex| (vertex.position, vertex.digit)));
    }

    merge_removals(removals)
}

/// Rule 5: Two colors Unit + Cell
///
/// If an unsolved cell has an uncolored candidate, that candidate can see a
/// colored vertex with the same digit, and the cell contains a candidate
/// colored with the opposite color, then in either scenario the uncolored
/// candidate cannot be the solution and can be removed.
pub fn medusa_rule_5(grid: &CandidateGrid) -> Vec<Modification> {
    let mut removals = Vec::new();

    for component in create_connected_components(grid) {
        let (first, second) = graph::color_lists(&component);
        removals.extend(uncolored_candidates(grid, &component)
            .filter(|&vertex| {
                let sees_first = can_see_color(vertex, &first);
                let sees_second = can_see_color(vertex, &second);
                sees_first && color_in_cell(grid, vertex.position, &second) ||
                    sees_second &&
                        color_in_cell(grid, vertex.position, &first)
            })
            .map(|vertex| (vertex.position, vertex.digit)));
    }

    merge_removals(removals)
}

/// Rule 6: Cell Emptied by Color
///
/// If there is an unsolved cell in which every candidate is uncolored and
/// every candidate can see the same color, then that color cannot be the
/// solution, since it would empty the cell of candidates. All vertices with
/// the opposite color can be set as the solution.
pub fn medusa_rule_6(grid: &CandidateGrid) -> Vec<Modification> {
    let mut set_values = Vec::new();

    for component in create_connected_components(grid) {
        let (first, second) = graph::color_lists(&component);
        let color_to_set = grid.unsolved_positions().into_iter()
            .filter(|&position|
                grid.candidates(position)
                    .map_or(false, |candidates|
                        candidates.iter().all(|digit|
                            !component.contains_node(
                                Candidate { position, digit }))))
            .find_map(|position| {
                if every_candidate_sees_color(grid, position, &first) {
                    Some(second.clone())
                }
                else if every_candidate_sees_color(grid, position, &second) {
                    Some(first.clone())
                }
                else {
                    None
                }
            });

        if let Some(color_to_set) = color_to_set {
            set_values.extend(color_to_set.into_iter()
                .map(|vertex| (vertex.position, vertex.digit)));
        }
    }

    merge_set_values(set_values)
}

fn colored_vertices<'a>(vertices: &'a [Candidate],
        colors: &'a HashMap<Candidate, Color>, color: Color)
        -> impl Iterator<Item = (Position, usize)> + 'a {
    vertices.iter()
        .filter(move |vertex| colors[vertex] == color)
        .map(|vertex| (vertex.position, vertex.digit))
}

fn uncolored_candidates<'a>(grid: &'a CandidateGrid,
        component: &'a UnGraphMap<Candidate, ()>)
        -> impl Iterator<Item = Candidate> + 'a {
    grid.unsolved_positions().into_iter()
        .flat_map(move |position| {
            grid.candidates(position).into_iter()
                .flat_map(move |candidates|
                    candidates.into_iter()
                        .map(move |digit| Candidate { position, digit }))
        })
        .filter(move |vertex| !component.contains_node(*vertex))
}

fn can_see_color(vertex: Candidate, color: &[Candidate]) -> bool {
    color.iter().any(|colored|
        vertex.digit == colored.digit &&
            vertex.position.sees(colored.position))
}

fn color_in_cell(grid: &CandidateGrid, position: Position,
        color: &[Candidate]) -> bool {
    grid.candidates(position)
        .map_or(false, |candidates|
            candidates.iter().any(|digit|
                color.contains(&Candidate { position, digit })))
}

fn every_candidate_sees_color(grid: &CandidateGrid, position: Position,
        color: &[Candidate]) -> bool {
    grid.candidates(position)
        .map_or(false, |candidates|
            candidates.iter().all(|digit|
                can_see_color(Candidate { position, digit }, color)))
}

fn create_connected_components(grid: &CandidateGrid)
        -> Vec<UnGraphMap<Candidate, ()>> {
    let mut medusa = UnGraphMap::new();

    for position in grid.unsolved_positions() {
        if let Some(candidates) = grid.candidates(position) {
            if candidates.len() == 2 {
                let mut digits = candidates.iter();

                if let (Some(first), Some(second)) =
                        (digits.next(), digits.next()) {
                    medusa.add_edge(
                        Candidate { position, digit: first },
                        Candidate { position, digit: second },
                        ());
                }
            }
        }
    }

    for unit in all_units() {
        for digit in DigitSet::full() {
            let with_candidate: Vec<Position> = unit.iter().copied()
                .filter(|&position|
                    grid.candidates(position)
                        .map_or(false,
                            |candidates| candidates.contains(digit)))
                .collect();

            if let [a, b] = with_candidate[..] {
                medusa.add_edge(
                    Candidate { position: a, digit },
                    Candidate { position: b, digit },
                    ());
            }
        }
    }

    graph::connected_components(&medusa)
}

/// A [Strategy] which applies 3D Medusa, trying the rules in order.
#[derive(Clone)]
pub struct MedusaStrategy;

impl Strategy for MedusaStrategy {
    fn apply(&self, grid: &CandidateGrid) -> Vec<Modification> {
        let rules = [
            medusa_rule_1,
            medusa_rule_2,
            medusa_rule_3,
            medusa_rule_4,
            medusa_rule_5,
            medusa_rule_6
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
