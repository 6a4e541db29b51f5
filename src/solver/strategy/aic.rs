//! Alternating Inference Chains. See
//! <https://www.sudokuwiki.org/Alternating_Inference_Chains> for an
//! explanation of the technique.

use crate::{all_units, CandidateGrid, Position};
use crate::modification::{merge_removals, merge_set_values, Modification};
use crate::solver::graph::{self, Candidate, Strength};
use crate::solver::strategy::{x_cycles, Strategy};
use crate::util::{zip_every_pair, DigitSet};

use petgraph::graphmap::{GraphMap, UnGraphMap};
use petgraph::visit::EdgeRef;

use std::collections::HashSet;

// An Alternating Inference Chains graph includes all digits at once. Each
// vertex is a particular candidate in a cell. A strong link connects two
// vertices of a digit in a unit when they are in the only cells of that unit
// with the digit as a candidate, and it connects two vertices of a cell when
// they are the only candidates of that cell. A weak link connects such
// vertices when they are not. An Alternating Inference Chain is a cycle in
// the graph whose edges alternate between strong and weak links, where a
// strong link may take the place of a weak link.

/// Rule 1:
///
/// If an Alternating Inference Chain has an even number of vertices and
/// therefore continuously alternates between strong and weak, then the graph
/// is perfect and has no flaws. Each of the weak links can be treated as a
/// strong link. If a weak link connects a common candidate across two
/// different cells, then that candidate can be removed from any other cell
/// which is in the same unit as the two vertices. If a weak link connects
/// two candidates of the same cell, then all other candidates can be removed
/// from that cell.
pub fn alternating_inference_chains_rule_1(grid: &CandidateGrid)
        -> Vec<Modification> {
    let mut chain = build_graph(grid);
    graph::trim(&mut chain);

    let mut removals = Vec::new();

    for (source, target) in graph::weak_edges_in_alternating_cycle(&chain) {
        removals.extend(removals_for_weak_edge(grid, source, target));
    }

    merge_removals(removals)
}

/// Rule 2:
///
/// If an Alternating Inference Chain has an odd number of vertices and the
/// edges alternate between strong and weak, except for one vertex which is
/// connected by two strong links, then the graph is a contradiction.
/// Removing the candidate from the cell of interest implies that the
/// candidate must be the solution for that cell, thus causing the cycle to
/// contradict itself. Therefore, the candidate must be the solution for that
/// cell.
pub fn alternating_inference_chains_rule_2(grid: &CandidateGrid)
        -> Vec<Modification> {
    let mut chain = build_graph(grid);
    graph::trim(&mut chain);

    let set_values = chain.nodes()
        .filter(|&vertex|
            alternating_cycle_exists(&chain, vertex, Strength::Strong))
        .map(|vertex| (vertex.position, vertex.digit))
        .collect();

    merge_set_values(set_values)
}

/// Rule 3:
///
/// If an Alternating Inference Chain has an odd number of vertices and the
/// edges alternate between strong and weak, except for one vertex which is
/// connected by two weak links, then the graph is a contradiction.
/// Considering the candidate to be the solution for the cell of interest
/// implies that the candidate must be removed from that cell, thus causing
/// the cycle to contradict itself. Therefore, the candidate can be removed
/// from the cell.
pub fn alternating_inference_chains_rule_3(grid: &CandidateGrid)
        -> Vec<Modification> {
    let chain = build_graph(grid);
    let removals = chain.nodes()
        .filter(|&vertex|
            alternating_cycle_exists(&chain, vertex, Strength::Weak))
        .map(|vertex| (vertex.position, vertex.digit))
        .collect();

    merge_removals(removals)
}

fn removals_for_weak_edge(grid: &CandidateGrid, source: Candidate,
        target: Candidate) -> Vec<(Position, usize)> {
    if source.position == target.position {
        grid.candidates(source.position)
            .map_or_else(Vec::new, |candidates| candidates.iter()
                .filter(|&digit|
                    digit != source.digit && digit != target.digit)
                .map(|digit| (source.position, digit))
                .collect())
    }
    else {
        x_cycles::removals_in_shared_units(grid, source.digit,
            source.position, target.position)
    }
}

fn build_graph(grid: &CandidateGrid) -> UnGraphMap<Candidate, Strength> {
    let mut edges = Vec::new();

    for unit in all_units() {
        for digit in DigitSet::full() {
            let with_candidate: Vec<Position> = unit.iter().copied()
                .filter(|&position|
                    grid.candidates(position)
                        .map_or(false,
                            |candidates| candidates.contains(digit)))
                .collect();
            let strength = if with_candidate.len() == 2 {
                Strength::Strong
            }
            else {
                Strength::Weak
            };
            edges.extend(zip_every_pair(&with_candidate)
                .map(|(a, b)| (
                    Candidate { position: a, digit },
                    Candidate { position: b, digit },
                    strength
                )));
        }
    }

    // Cell-internal edges are added last so that they overwrite unit edges
    // between the same pair of vertices.
    for position in grid.unsolved_positions() {
        if let Some(candidates) = grid.candidates(position) {
            let strength = if candidates.len() == 2 {
                Strength::Strong
            }
            else {
                Strength::Weak
            };
            let digits: Vec<usize> = candidates.iter().collect();
            edges.extend(zip_every_pair(&digits)
                .map(|(a, b)| (
                    Candidate { position, digit: a },
                    Candidate { position, digit: b },
                    strength
                )));
        }
    }

    GraphMap::from_edges(edges)
}

// Unlike graph::alternating_cycle_exists, this search does not allow a digit
// to be revisited in the chain. A digit can appear multiple times in a
// chain, but only if all the occurrences are consecutive. Without this
// restriction, chains could revisit a digit in a way that no longer carries
// an inference.
fn alternating_cycle_exists(graph: &UnGraphMap<Candidate, Strength>,
        vertex: Candidate, adjacent_edges_type: Strength) -> bool {
    let adjacent_edges: Vec<_> = graph.edges(vertex)
        .filter(|edge| *edge.weight() == adjacent_edges_type)
        .collect();

    let found = zip_every_pair(&adjacent_edges).any(|(edge_a, edge_b)| {
        let start = graph::opposite_vertex(edge_a, vertex);
        let end = graph::opposite_vertex(edge_b, vertex);
        let mut visited = HashSet::new();
        visited.insert(vertex);
        visited.insert(start);
        let mut visited_digits = HashSet::new();
        visited_digits.insert(vertex.digit);
        visited_digits.insert(start.digit);
        visited_digits.remove(&end.digit);
        cycle_search(graph, adjacent_edges_type, end, start,
            adjacent_edges_type.opposite(), &mut visited, &mut visited_digits)
    });
    found
}

fn cycle_search(graph: &UnGraphMap<Candidate, Strength>,
        adjacent_edges_type: Strength, end: Candidate,
        current_vertex: Candidate, next_type: Strength,
        visited: &mut HashSet<Candidate>, visited_digits: &mut HashSet<usize>)
        -> bool {
    let next_vertices: Vec<Candidate> = graph.edges(current_vertex)
        .filter(|edge| edge.weight().is_compatible_with(next_type))
        .map(|edge| graph::opposite_vertex(edge, current_vertex))
        .filter(|next_vertex|
            next_vertex.digit == current_vertex.digit ||
                !visited_digits.contains(&next_vertex.digit))
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
        let new_digit = current_vertex.digit != next_vertex.digit;

        if new_digit {
            visited_digits.insert(next_vertex.digit);
        }

        let found = cycle_search(graph, adjacent_edges_type, end, next_vertex,
            next_type.opposite(), visited, visited_digits);

        if new_digit {
            visited_digits.remove(&next_vertex.digit);
        }

        visited.remove(&next_vertex);

        if found {
            return true;
        }
    }

    false
}

/// A [Strategy] which applies Alternating Inference Chains, trying the rules
/// in order.
#[derive(Clone)]
pub struct AlternatingInferenceChainsStrategy;

impl Strategy for AlternatingInferenceChainsStrategy {
    fn apply(&self, grid: &CandidateGrid) -> Vec<Modification> {
        let rules = [
            alternating_inference_chains_rule_1,
            alternating_inference_chains_rule_2,
            alternating_inference_chains_rule_3
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

#[cfg(test)]
mod tests {

    use super::*;

    use crate::{remove_candidates, set_value};
    use crate::solver::strategy::assertions::assert_logical_solution;

    #[test]
    fn rule_1_removes_along_weak_links() {
        let board = "\
            {179}384{27}{125}{259}{1569}{269}\
            2{47}{17}9{67}{156}{45}38\
            {149}6538{12}7{19}{249}\
            {578}{589}{279}{2678}3{269}14{269}\
            6{4789}3{278}1{249}{289}{79}5\
            {478}1{279}{2678}5{2469}{289}{679}3\
            {78}{78}4593621\
            32{169}{16}{46}8{459}{59}7\
            {15}{59}{169}{126}{246}738{49}\
        ";
        let expected = [
            remove_candidates!(0, 0; 1),
            remove_candidates!(1, 2; 7),
            remove_candidates!(1, 5; 1),
            remove_candidates!(2, 0; 1),
            remove_candidates!(3, 0; 7),
            remove_candidates!(4, 1; 7),
            remove_candidates!(5, 0; 7),
            remove_candidates!(8, 4; 6)
        ];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_1);
    }

    #[test]
    fn rule_1_second_board() {
        let board = "\
            5{489}{469}{1248}7{248}{124}{2469}3\
            {39}1{3479}6{345}{2345}{2457}8{4579}\
            {368}{478}2{13458}{13458}9{1457}{456}{14567}\
            {123}6{1345}{234578}{13458}{234578}9{345}{457}\
            7{459}{13459}{1345}{134569}{3456}8{3456}2\
            {239}{2459}8{23457}{34569}{3457}{3457}1{4567}\
            {128}{2578}{157}9{3458}{34578}6{2345}{145}\
            {2689}3{569}{458}{4568}1{245}7{459}\
            4{579}{15679}{357}2{3567}{135}{359}8\
        ";
        let expected = [
            remove_candidates!(0, 7; 4, 9),
            remove_candidates!(7, 0; 8, 9)
        ];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_1);
    }

    #[test]
    fn rule_1_third_board() {
        let board = "\
            {4589}{48}613{479}{57}2{789}\
            {89}31{79}5264{789}\
            72{459}{69}8{469}3{59}1\
            26{49}5718{39}{34}\
            {159}{57}84632{179}{79}\
            {14}{47}3298{147}65\
            3{458}{245}{789}{12}{579}{1457}{157}6\
            {456}973{12}{56}{145}8{24}\
            {568}1{25}{68}4{567}9{357}{23}\
        ";
        let expected =
            [remove_candidates!(0, 0; 4), remove_candidates!(2, 5; 9)];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_1);
    }

    #[test]
    fn rule_2_solves_double_strong_vertices() {
        let board = "\
            {179}384{27}{125}{259}{1569}{269}\
            2{47}{17}9{67}{156}{45}38\
            {149}6538{12}7{19}{249}\
            {578}{589}{279}{2678}3{269}14{269}\
            6{4789}3{278}1{249}{289}{79}5\
            {478}1{279}{2678}5{2469}{289}{679}3\
            {78}{78}4593621\
            32{169}{16}{46}8{459}{59}7\
            {15}{59}{169}{126}{246}738{49}\
        ";
        let expected = [
            set_value!(0, 4, 7),
            set_value!(1, 2, 1),
            set_value!(1, 4, 6),
            set_value!(1, 6, 4),
            set_value!(2, 0, 4),
            set_value!(4, 1, 4),
            set_value!(5, 5, 4),
            set_value!(7, 3, 1),
            set_value!(7, 4, 4),
            set_value!(8, 8, 4)
        ];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_2);
    }

    #[test]
    fn rule_2_second_board() {
        let board = "\
            7{158}{168}9{136}{168}42{1358}\
            {156}92{34}{346}{18}{56}{367}{1578}\
            {468}{148}32579{168}{18}\
            3{16}478{56}2{156}9\
            97{18}{45}{46}2{36}{135}{138}\
            2{68}51937{68}4\
            {58}{358}96241{37}{57}\
            {146}{34}{16}{35}7{15}892\
            {15}278{13}9{35}46\
        ";
        let expected = [
            set_value!(0, 1, 5),
            set_value!(1, 5, 8),
            set_value!(6, 0, 8)
        ];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_2);
    }

    #[test]
    fn rule_2_third_board() {
        let board = "\
            869{47}51{247}{23}{34}\
            347286915\
            521{479}{79}3{47}68\
            953{68}{26}{28}147\
            784319{25}{25}6\
            612547389\
            {14}{37}8{1679}{679}5{46}{39}2\
            {124}95{168}3{28}{468}7{14}\
            {12}{37}6{1789}{279}4{58}{359}{13}\
        ";
        let expected = [
            set_value!(0, 3, 7),
            set_value!(0, 6, 2),
            set_value!(0, 7, 3),
            set_value!(0, 8, 4),
            set_value!(2, 3, 4),
            set_value!(2, 4, 9),
            set_value!(2, 6, 7),
            set_value!(4, 6, 5),
            set_value!(4, 7, 2),
            set_value!(6, 1, 3),
            set_value!(6, 7, 9),
            set_value!(7, 8, 1),
            set_value!(8, 6, 8),
            set_value!(8, 7, 5),
            set_value!(8, 8, 3)
        ];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_2);
    }

    #[test]
    fn rule_2_fourth_board() {
        let board = "\
            {689}{145}3{145}2{46}7{15689}{5689}\
            {69}{145}27{45}83{1569}{569}\
            {68}{15}7{135}9{36}{12}{12568}4\
            3942{58}16{58}7\
            1256{48}7{49}3{89}\
            786{45}39{124}{125}{25}\
            439862571\
            261975843\
            578{34}1{34}{29}{269}{269}\
        ";
        let expected = [
            set_value!(1, 4, 4),
            set_value!(2, 0, 8),
            set_value!(3, 4, 5),
            set_value!(3, 7, 8),
            set_value!(4, 4, 8),
            set_value!(4, 6, 4),
            set_value!(4, 8, 9),
            set_value!(5, 3, 4),
            set_value!(8, 5, 4),
            set_value!(8, 6, 9)
        ];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_2);
    }

    #[test]
    fn rule_2_fifth_board() {
        let board = "\
            9{1267}3{267}54{1267}{127}8\
            5{1267}{1267}{2367}8{3679}{1267}{12379}4\
            48{267}{2367}1{3679}{2567}{23579}{279}\
            1{379}542{37}86{79}\
            84{279}56{17}3{1279}{1279}\
            6{237}{27}{378}9{1378}4{127}5\
            3{16}894{56}{1257}{1257}{127}\
            2{169}{169}{68}7{568}{15}43\
            754132986\
        ";
        let expected = [
            set_value!(2, 7, 5),
            set_value!(6, 1, 6),
            set_value!(6, 5, 5),
            set_value!(7, 6, 5)
        ];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_2);
    }

    #[test]
    fn rule_2_sixth_board() {
        let board = "\
            415{69}{69}2387\
            382147{69}5{69}\
            796853142\
            95{34}{2347}16{27}{237}8\
            17{38}{239}{289}54{2369}{369}\
            62{348}{3479}{789}{48}{79}15\
            {258}{346}7{2456}{268}9{268}{236}1\
            {258}{346}9{24567}{2678}1{2678}{2367}{346}\
            {28}{46}1{2467}3{48}5{2679}{469}\
        ";
        let expected = [set_value!(8, 7, 9)];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_2);
    }

    #[test]
    fn rule_2_seventh_board() {
        let board = "\
            {23468}1{234}{568}{689}{25}{79}{48}{479}\
            7{28}94{18}{12}365\
            {468}{458}{45}7{689}32{148}{149}\
            56{237}1{23}489{27}\
            9{234}1{358}{2358}76{45}{24}\
            {24}{247}89{25}6{17}{145}3\
            {48}{478}62{147}953{18}\
            19{357}{35}{357}8426\
            {2348}{23458}{2345}{356}{1456}{15}{19}7{189}\
        ";
        let expected = [set_value!(4, 3, 8), set_value!(8, 3, 6)];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_2);
    }

    #[test]
    fn rule_2_eighth_board() {
        let board = "\
            79{36}21{36}584\
            {356}284{357}{367}{139}{1369}{16}\
            14{356}{56}897{236}{26}\
            {2369}5{1367}8{379}{367}4{12369}{1267}\
            {369}{67}4{156}{3579}2{139}{1369}8\
            {2369}8{1367}{16}{379}4{1239}5{1267}\
            {56}{67}{567}921843\
            439768{12}{12}5\
            812345679\
        ";
        let expected = [
            set_value!(1, 4, 5),
            set_value!(1, 5, 7),
            set_value!(2, 2, 5),
            set_value!(4, 3, 5),
            set_value!(6, 0, 5)
        ];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_2);
    }

    #[test]
    fn rule_2_ninth_board() {
        let board = "\
            {23468}1{234}{568}{689}{25}{79}{48}{479}\
            7{28}94{18}{12}365\
            {468}{458}{45}7{689}32{148}{149}\
            56{237}1{23}489{27}\
            9{34}1{358}{2358}76{45}{24}\
            {24}{247}89{25}6{17}{145}3\
            {48}{4578}62{147}9{15}3{18}\
            19{357}{35}{357}8426\
            {2348}{23458}{2345}{356}{1456}{15}{159}7{189}\
        ";
        let expected = [set_value!(4, 3, 8), set_value!(6, 6, 5)];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_2);
    }

    #[test]
    fn rule_3_removes_double_weak_vertices() {
        let board = "\
            {4589}{48}613{479}{57}2{789}\
            {89}31{79}5264{789}\
            72{459}{69}8{469}3{59}1\
            26{49}5718{39}{34}\
            {159}{57}84632{179}{79}\
            {14}{47}3298{147}65\
            3{458}{245}{789}{12}{579}{1457}{157}6\
            {456}973{12}{56}{145}8{24}\
            {568}1{25}{678}4{567}9{357}{23}\
        ";
        let expected =
            [remove_candidates!(2, 5; 9), remove_candidates!(8, 3; 7)];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_3);
    }

    #[test]
    fn rule_3_second_board() {
        let board = "\
            {4589}{458}613{479}{57}2{789}\
            {89}31{79}5264{789}\
            72{459}{69}8{469}3{59}1\
            26{49}5718{39}{34}\
            {159}{57}84632{179}{79}\
            {14}{47}3298{147}65\
            3{458}{245}{789}{12}{579}{1457}{157}6\
            {456}973{12}{56}{145}8{24}\
            {568}1{25}{678}4{567}9{357}{23}\
        ";
        let expected =
            [remove_candidates!(0, 1; 5), remove_candidates!(8, 3; 7)];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_3);
    }

    #[test]
    fn rule_3_third_board() {
        let board = "\
            {23468}1{234}{568}{689}{25}{379}{348}{479}\
            7{238}94{18}{12}{13}65\
            {468}{458}{45}7{1689}32{148}{1489}\
            56{237}1{23}489{27}\
            9{234}1{358}{2358}76{45}{24}\
            {24}{247}89{25}6{157}{145}3\
            {348}{4578}62{1457}9{135}{1358}{18}\
            19{357}{35}{357}8426\
            {2348}{23458}{2345}{356}{1456}{15}{1359}7{189}\
        ";
        let expected = [
            remove_candidates!(0, 6; 3),
            remove_candidates!(4, 1; 2),
            remove_candidates!(6, 7; 1),
            remove_candidates!(8, 6; 3)
        ];
        assert_logical_solution(&expected, board,
            alternating_inference_chains_rule_3);
    }
}
