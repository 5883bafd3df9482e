use std::cmp::{max, min};
use std::fmt;

use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::constants::*;
use crate::coord::CoordCube;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::facelet::FaceCube;
use crate::moves::{self, Move, MoveTables};
use crate::pruning::PruningTables;

/// The process-wide move and pruning tables.
///
/// Built once, read-only afterwards; concurrent solves share them freely.
pub struct SolverTables {
    pub mv: MoveTables,
    pub pr: PruningTables,
}

impl SolverTables {
    fn new() -> Result<Self, Error> {
        let mv = MoveTables::new()?;
        let pr = PruningTables::new(&mv)?;
        Ok(Self { mv, pr })
    }
}

static TABLES: OnceCell<SolverTables> = OnceCell::new();

/// Initialize the global tables, or return the already built ones.
///
/// The first call pays the construction (or cache load) cost; call it at
/// startup to keep that cost out of the first solve.
pub fn tables() -> Result<&'static SolverTables, Error> {
    TABLES.get_or_try_init(SolverTables::new)
}

/// Per-phase depth caps for the two-phase search.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    pub max_phase1_depth: u8,
    pub max_phase2_depth: u8,
    pub max_total_depth: u8,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_phase1_depth: 18,
            max_phase2_depth: 18,
            max_total_depth: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SolveStats {
    /// Search tree nodes expanded over both phases.
    pub nodes: u64,
    pub phase1_length: usize,
    pub phase2_length: usize,
}

/// A solved cube: the maneuver, its inverse, and the per-phase parts.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// Moves that bring the input cube to the solved state.
    pub solution: Vec<Move>,
    /// Moves that bring the solved cube to the input state.
    pub scramble: Vec<Move>,
    pub phase1: Vec<Move>,
    pub phase2: Vec<Move>,
    pub stats: SolveStats,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self.solution.iter().map(|m| m.to_string()).collect();
        write!(f, "{}", s.join(" "))
    }
}

/// Skip successive moves on the same face, and same-axis pairs in the
/// non-canonical order; both collapse into branches visited elsewhere.
fn skip_move(m: Move, last: Option<Move>) -> bool {
    match last {
        Some(p) => {
            let diff = p as i8 / 3 - m as i8 / 3;
            diff == 0 || diff == 3
        }
        None => false,
    }
}

/// Iterative-deepening A* over coordinate triples.
///
/// DFS visits moves in table order, so with fixed depth caps the first
/// solution found is the same on every run.
struct PhaseSearch<'a> {
    tables: &'a SolverTables,
    sofar: Vec<Move>,
    nodes: u64,
}

impl<'a> PhaseSearch<'a> {
    fn new(tables: &'a SolverTables) -> Self {
        Self {
            tables,
            sofar: Vec::new(),
            nodes: 0,
        }
    }

    fn search_phase1(&mut self, flip: u16, twist: u16, slice: u16, max_depth: u8) -> Option<Vec<Move>> {
        if flip == 0 && twist == 0 && slice == 0 {
            return Some(Vec::new());
        }
        let start = max(1, self.tables.pr.phase1_distance(flip, twist, slice));
        for bound in start..=max_depth {
            self.sofar.clear();
            if self.dfs_phase1(flip, twist, slice, 0, bound, None) {
                return Some(self.sofar.clone());
            }
        }
        None
    }

    fn dfs_phase1(
        &mut self,
        flip: u16,
        twist: u16,
        slice: u16,
        g: u8,
        bound: u8,
        last: Option<Move>,
    ) -> bool {
        if flip == 0 && twist == 0 && slice == 0 {
            return true;
        }
        if g + self.tables.pr.phase1_distance(flip, twist, slice) > bound {
            return false;
        }
        let mv = &self.tables.mv;
        for &m in ALL_MOVES.iter() {
            if skip_move(m, last) {
                continue;
            }
            let mi = m as usize;
            let flip1 = mv.flip_move[N_MOVE * flip as usize + mi];
            let twist1 = mv.twist_move[N_MOVE * twist as usize + mi];
            let slice1 = mv.slice_move[N_MOVE * slice as usize + mi];
            self.nodes += 1;
            self.sofar.push(m);
            if self.dfs_phase1(flip1, twist1, slice1, g + 1, bound, Some(m)) {
                return true;
            }
            self.sofar.pop();
        }
        false
    }

    fn search_phase2(
        &mut self,
        corners: u16,
        ud_edges: u16,
        slice_perm: u16,
        max_depth: u8,
    ) -> Option<Vec<Move>> {
        if corners == 0 && ud_edges == 0 && slice_perm == 0 {
            return Some(Vec::new());
        }
        let start = max(1, self.tables.pr.phase2_distance(corners, ud_edges, slice_perm));
        for bound in start..=max_depth {
            self.sofar.clear();
            if self.dfs_phase2(corners, ud_edges, slice_perm, 0, bound, None) {
                return Some(self.sofar.clone());
            }
        }
        None
    }

    fn dfs_phase2(
        &mut self,
        corners: u16,
        ud_edges: u16,
        slice_perm: u16,
        g: u8,
        bound: u8,
        last: Option<Move>,
    ) -> bool {
        if corners == 0 && ud_edges == 0 && slice_perm == 0 {
            return true;
        }
        if g + self.tables.pr.phase2_distance(corners, ud_edges, slice_perm) > bound {
            return false;
        }
        let mv = &self.tables.mv;
        for &m in PHASE2_MOVES.iter() {
            if skip_move(m, last) {
                continue;
            }
            let mi = m as usize;
            let corners1 = mv.corners_move[N_MOVE * corners as usize + mi];
            let ud_edges1 = mv.ud_edges_move[N_MOVE * ud_edges as usize + mi];
            let slice_perm1 = mv.slice_perm_move[N_MOVE * slice_perm as usize + mi];
            self.nodes += 1;
            self.sofar.push(m);
            if self.dfs_phase2(corners1, ud_edges1, slice_perm1, g + 1, bound, Some(m)) {
                return true;
            }
            self.sofar.pop();
        }
        false
    }
}

/// Solve a cube with the default depth caps.
pub fn solve(cc: &CubieCube) -> Result<Solution, Error> {
    solve_with(cc, &SolverConfig::default())
}

/// Solve a cube with the two phase algorithm.
///
/// Phase 1 drives the cube into the G1 subgroup, phase 2 finishes it with
/// the ten moves that stay inside G1. The returned maneuver is verified
/// against the input cube before it is handed out.
pub fn solve_with(cc: &CubieCube, config: &SolverConfig) -> Result<Solution, Error> {
    let coord = CoordCube::try_from(cc)?;
    let tables = tables()?;

    if coord.is_phase1_solved() && coord.is_phase2_solved() {
        return Ok(Solution {
            solution: Vec::new(),
            scramble: Vec::new(),
            phase1: Vec::new(),
            phase2: Vec::new(),
            stats: SolveStats::default(),
        });
    }

    let mut search = PhaseSearch::new(tables);
    let phase1 = search
        .search_phase1(coord.flip, coord.twist, coord.slice, config.max_phase1_depth)
        .ok_or(Error::Phase1Exhausted)?;

    let cc1 = cc.apply_moves(&phase1);
    if cc1.get_flip() != 0 || cc1.get_twist() != 0 || cc1.get_slice() != 0 {
        return Err(Error::G1Breach);
    }

    let budget = min(
        config.max_phase2_depth,
        config.max_total_depth.saturating_sub(phase1.len() as u8),
    );
    let phase2 = search
        .search_phase2(
            cc1.get_corners(),
            cc1.get_ud_edges(),
            cc1.get_slice_perm(),
            budget,
        )
        .ok_or(Error::Phase2Exhausted)?;

    let mut solution = phase1.clone();
    solution.extend_from_slice(&phase2);
    // the two phases may meet on the same face
    let solution = moves::simplify_moves(&solution);

    if !cc.apply_moves(&solution).is_solved() {
        return Err(Error::VerificationFailure);
    }

    let scramble = moves::inverse_moves(&solution);
    Ok(Solution {
        stats: SolveStats {
            nodes: search.nodes,
            phase1_length: phase1.len(),
            phase2_length: phase2.len(),
        },
        solution,
        scramble,
        phase1,
        phase2,
    })
}

/// Solve a cube given by its facelet definition string.
pub fn solve_facelet(cubestring: &str) -> Result<Solution, Error> {
    let fc = FaceCube::try_from(cubestring)?;
    let cc = CubieCube::try_from(&fc)?;
    solve(&cc)
}

#[cfg(test)]
mod test {
    use crate::cubie::CubieCube;
    use crate::error::Error;
    use crate::moves::Move::*;
    use crate::scramble;
    use crate::solver::*;

    #[test]
    fn test_solve_solved_cube() {
        let solution = solve(&CubieCube::default()).unwrap();
        assert!(solution.solution.is_empty());
        assert!(solution.scramble.is_empty());
    }

    #[test]
    fn test_solve_single_move() {
        let cc = CubieCube::default().apply_move(U);
        let solution = solve(&cc).unwrap();
        assert_eq!(solution.solution, vec![U3]);
        assert_eq!(solution.scramble, vec![U]);
    }

    #[test]
    fn test_solve_two_moves() {
        let cc = CubieCube::default().apply_move(U).apply_move(R);
        let solution = solve(&cc).unwrap();
        assert_eq!(solution.solution, vec![R3, U3]);
        assert_eq!(solution.scramble, vec![U, R]);
    }

    #[test]
    fn test_solve_handmade_scramble() {
        // R U R' U' R' F R2 U' R' U' R U R' F'
        let scramble = vec![R, U, R3, U3, R3, F, R2, U3, R3, U3, R, U, R3, F3];
        let cc = CubieCube::from(&scramble);
        let solution = solve(&cc).unwrap();
        assert!(solution.solution.len() <= 30);
        assert!(cc.apply_moves(&solution.solution).is_solved());
    }

    #[test]
    fn test_solve_is_deterministic() {
        let cc = scramble::random_state(7);
        let first = solve(&cc).unwrap();
        let second = solve(&cc).unwrap();
        assert_eq!(first.solution, second.solution);
        assert_eq!(first.scramble, second.scramble);
    }

    #[test]
    fn test_solve_seeded_random_state() {
        let cc = scramble::random_state(12345);
        let solution = solve(&cc).unwrap();
        assert!(solution.solution.len() >= 12);
        assert!(solution.solution.len() <= 30);
        assert!(cc.apply_moves(&solution.solution).is_solved());
        let again = solve(&scramble::random_state(12345)).unwrap();
        assert_eq!(solution.solution, again.solution);
    }

    #[test]
    fn test_solve_random_batch() {
        for seed in 0..10 {
            let cc = scramble::random_state(seed);
            let solution = solve(&cc).unwrap();
            assert!(cc.apply_moves(&solution.solution).is_solved());
            assert!(solution.solution.len() <= 30);
        }
    }

    #[test]
    fn test_scramble_restores_input_state() {
        let cc = scramble::random_state(99);
        let solution = solve(&cc).unwrap();
        let rebuilt = CubieCube::default().apply_moves(&solution.scramble);
        assert_eq!(rebuilt, cc);
        let again = solve(&rebuilt).unwrap();
        assert_eq!(solution.solution, again.solution);
    }

    #[test]
    fn test_solve_refuses_invalid_cube() {
        let mut cc = CubieCube::default();
        cc.eo[0] = 1; // single flipped edge
        assert!(matches!(solve(&cc), Err(Error::FlipError)));
    }

    #[test]
    fn test_solve_facelet_string() {
        let solution =
            solve_facelet("UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB").unwrap();
        assert!(solution.solution.is_empty());

        let cc = CubieCube::from(&vec![F2, D, L, B3, U2, R]);
        let faces = crate::facelet::FaceCube::try_from(&cc).unwrap().to_string();
        let solution = solve_facelet(&faces).unwrap();
        assert!(cc.apply_moves(&solution.solution).is_solved());
    }

    #[test]
    fn test_phase_moves_stay_legal() {
        let cc = scramble::random_state(4242);
        let solution = solve(&cc).unwrap();
        for m in &solution.phase2 {
            assert!(crate::constants::PHASE2_MOVES.contains(m));
        }
        assert!(
            solution.stats.phase1_length + solution.stats.phase2_length
                >= solution.solution.len()
        );
    }
}
