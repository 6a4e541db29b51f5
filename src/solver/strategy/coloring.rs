//! Simple Coloring, also known as Single's Chains. See
//! <http://www.sudokuwiki.org/Singles_Chains> for an explanation of the
//! technique.

use crate::{all_units, CandidateGrid, Position};
use crate::modification::{merge_removals, Modification};
use crate::solver::graph;
use crate::solver::strategy::Strategy;
use crate::util::{zip_every_pair, DigitSet};

use petgraph::graphmap::UnGraphMap;

// A single's chain is a graph for a particular digit that connects two cells
// when those are the only two cells in a unit with that digit as a candidate.
// Each chain is colored with alternating colors such that all neighbors of a
// vertex have the opposite color. The two colors represent the two possible
// solutions for each cell in the chain: either the first color is the
// solution for the chain or the second color is.

/// Rule 2: Twice in a Unit
///
/// If there are two or more vertices with the same color that are in the
/// same unit, then that color cannot be the solution. The digit can be
/// removed from all candidates with that color in that chain.
pub fn simple_coloring_rule_2(grid: &CandidateGrid) -> Vec<Modification> {
    let mut removals = Vec::new();

    for digit in DigitSet::full() {
        for component in create_connected_components(grid, digit) {
            let colors = graph::color_map(&component);
            let vertices: Vec<Position> = component.nodes().collect();
            let conflict = zip_every_pair(&vertices)
                .find(|(a, b)| colors[a] == colors[b] && a.sees(*b));

            if let Some((a, _)) = conflict {
                let color_to_remove = colors[&a];
                removals.extend(component.nodes()
                    .filter(|vertex| colors[vertex] == color_to_remove)
                    .map(|vertex| (vertex, digit)));
            }
        }
    }

    merge_removals(removals)
}

/// Rule 4: Two colors 'elsewhere'
///
/// If an unsolved cell with a given candidate is outside the chain, and it
/// is in the same units as two differently colored vertices, then one of
/// those two vertices must be the solution for the digit. The digit can be
/// removed from the cell outside the chain.
pub fn simple_coloring_rule_4(grid: &CandidateGrid) -> Vec<Modification> {
    let mut removals = Vec::new();

    for digit in DigitSet::full() {
        for component in create_connected_components(grid, digit) {
            let (first, second) = graph::color_lists(&component);
            removals.extend(grid.positions_with_candidate(digit).into_iter()
                .filter(|&cell|
                    !component.contains_node(cell) &&
                        first.iter().any(|&colored| cell.sees(colored)) &&
                        second.iter().any(|&colored| cell.sees(colored)))
                .map(|cell| (cell, digit)));
        }
    }

    merge_removals(removals)
}

fn create_connected_components(grid: &CandidateGrid, digit: usize)
        -> Vec<UnGraphMap<Position, ()>> {
    let mut chain = UnGraphMap::new();

    for unit in all_units() {
        let with_candidate: Vec<Position> = unit.into_iter()
            .filter(|&position|
                grid.candidates(position)
                    .map_or(false, |candidates| candidates.contains(digit)))
            .collect();

        if let [a, b] = with_candidate[..] {
            chain.add_edge(a, b, ());
        }
    }

    graph::connected_components(&chain)
}

/// A [Strategy] which applies Simple Coloring, trying rule 2 before rule 4.
#[derive(Clone)]
pub struct SimpleColoringStrategy;

impl Strategy for SimpleColoringStrategy {
    fn apply(&self, grid: &CandidateGrid) -> Vec<Modification> {
        let rule_2 = simple_coloring_rule_2(grid);

        if !rule_2.is_empty() {
            return rule_2;
        }

        simple_coloring_rule_4(grid)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::remove_candidates;
    use crate::solver::strategy::assertions::assert_logical_solution;

    #[test]
    fn rule_2_colors_conflicting_chain() {
        let board = "\
            {145}{15}7{25}836{149}{1249}\
            {145}397{25}68{14}{124}\
            826419753\
            64{25}19{25}387\
            {159}8{12}367{245}{149}{1459}\
            {19}73{25}48{25}6{19}\
            39{15}87{14}{45}26\
            7649{25}{25}138\
            2{15}863{14}97{45}\
        ";
        let expected = [
            remove_candidates!(0, 1; 5),
            remove_candidates!(0, 3; 5),
            remove_candidates!(1, 0; 5),
            remove_candidates!(3, 5; 5),
            remove_candidates!(4, 0; 5),
            remove_candidates!(5, 6; 5),
            remove_candidates!(6, 2; 5),
            remove_candidates!(7, 4; 5),
            remove_candidates!(8, 8; 5)
        ];
        assert_logical_solution(&expected, board, simple_coloring_rule_2);
    }

    #[test]
    fn rule_2_second_board() {
        let board = "\
            2{79}{38}{38}41{79}56\
            4{379}56{78}2{789}1{37}\
            {78}16{37}95{278}{23}4\
            35{78}12964{78}\
            142{78}6{37}59{38}\
            {78}695{38}4{27}{23}1\
            584216379\
            92{37}4{37}8165\
            6{37}195{37}482\
        ";
        let expected = [
            remove_candidates!(1, 8; 7),
            remove_candidates!(2, 0; 7),
            remove_candidates!(2, 3; 7),
            remove_candidates!(3, 2; 7),
            remove_candidates!(4, 5; 7),
            remove_candidates!(5, 6; 7),
            remove_candidates!(7, 4; 7),
            remove_candidates!(8, 1; 7)
        ];
        assert_logical_solution(&expected, board, simple_coloring_rule_2);
    }

    #[test]
    fn rule_2_third_board() {
        let board = "\
            4{279}{259}8{279}6{25}13\
            {257}86{27}134{25}9\
            {23}{239}1{29}45867\
            {357}1{35}468{37}92\
            {27}{279}83{279}1645\
            64{239}{279}5{27}{37}81\
            1546{237}{27}9{237}8\
            9{23}75841{23}6\
            86{23}1{237}9{25}{2357}4\
        ";
        let expected = [
            remove_candidates!(0, 2; 9),
            remove_candidates!(0, 4; 9),
            remove_candidates!(2, 1; 9),
            remove_candidates!(4, 1; 9),
            remove_candidates!(5, 3; 9)
        ];
        assert_logical_solution(&expected, board, simple_coloring_rule_2);
    }

    #[test]
    fn rule_2_fourth_board() {
        let board = "\
            289{16}{46}{14}375\
            364{57}9{57}812\
            517283964\
            893{457}2{457}6{45}1\
            145836729\
            726{19}{45}{19}{45}83\
            451378296\
            {69}72{4569}1{459}{45}38\
            {69}38{4569}{56}21{45}7\
        ";
        let expected = [
            remove_candidates!(5, 6; 5),
            remove_candidates!(8, 4; 5),
            remove_candidates!(8, 7; 5)
        ];
        assert_logical_solution(&expected, board, simple_coloring_rule_2);
    }

    #[test]
    fn rule_4_sees_both_colors() {
        let board = "\
            {145}{15}7{25}836{149}{1249}\
            {145}397{25}68{14}{124}\
            826419753\
            64{25}19{25}387\
            {159}8{125}367{245}{149}{1459}\
            {19}73{25}48{25}6{19}\
            39{15}87{14}{45}26\
            7649{25}{25}138\
            2{15}863{14}97{45}\
        ";
        let expected =
            [remove_candidates!(4, 0; 5), remove_candidates!(4, 2; 5)];
        assert_logical_solution(&expected, board, simple_coloring_rule_4);
    }

    #[test]
    fn rule_4_second_board() {
        let board = "\
            2{3579}{3578}{378}41{789}{35}6\
            4{3579}{3578}6{3578}2{789}1{378}\
            {78}16{378}9{357}{278}{235}4\
            3{57}{578}12964{78}\
            142{378}6{37}59{378}\
            {78}695{378}4{278}{23}1\
            584216379\
            92{37}4{37}8165\
            6{37}19{357}{357}482\
        ";
        let expected =
            [remove_candidates!(1, 4; 3), remove_candidates!(1, 8; 8)];
        assert_logical_solution(&expected, board, simple_coloring_rule_4);
    }

    #[test]
    fn rule_4_third_board() {
        let board = "\
            12845{37}{37}96\
            {37}46{37}91285\
            9{37}582641{37}\
            {678}{67}35{678}2149\
            {678}91{367}4{37}{68}52\
            4521{68}9{68}{37}{37}\
            {36}{36}4{27}159{27}8\
            287934561\
            519{267}{67}8{37}{237}4\
        ";
        let expected = [
            remove_candidates!(3, 4; 7),
            remove_candidates!(4, 0; 7),
            remove_candidates!(8, 3; 7)
        ];
        assert_logical_solution(&expected, board, simple_coloring_rule_4);
    }

    #[test]
    fn rule_4_fourth_board() {
        let board = "\
            4{378}{2378}956{23}{238}1\
            6{35}9{24}18{2345}{234}7\
            1{58}{28}37{24}{2456}{2468}9\
            316{24}8975{24}\
            824537196\
            7956{24}18{24}3\
            2{34}{13}7659{134}8\
            9{367}{137}8{24}{24}{36}{1367}5\
            5{4678}{78}193{246}{2467}{24}\
        ";
        let expected = [remove_candidates!(1, 7; 2, 4)];
        assert_logical_solution(&expected, board, simple_coloring_rule_4);
    }

    #[test]
    fn rule_4_fifth_board() {
        let board = "\
            89{67}2{67}4351\
            {457}12{56}{5679}3{469}{467}8\
            3{46}{57}1{579}8{29}{27}{46}\
            {245}{24}9817{2456}{246}3\
            631{45}{45}2789\
            {2457}8{457}936{245}1{45}\
            9537{46}18{46}2\
            {24}{246}{46}385197\
            178{46}29{456}3{456}\
        ";
        let expected = [remove_candidates!(1, 7; 6)];
        assert_logical_solution(&expected, board, simple_coloring_rule_4);
    }

    #[test]
    fn rule_4_sixth_board() {
        let board = "\
            {38}62945{78}{1378}{178}\
            154378692\
            7{38}91624{358}{58}\
            62{57}831{57}49\
            {89}{789}34562{178}{178}\
            41{58}297{58}63\
            5{78}16239{78}4\
            24{68}7193{58}{568}\
            {39}{39}{67}58412{67}\
        ";
        let expected = [
            remove_candidates!(0, 7; 7, 8),
            remove_candidates!(2, 7; 8),
            remove_candidates!(4, 8; 7)
        ];
        assert_logical_solution(&expected, board, simple_coloring_rule_4);
    }
}
