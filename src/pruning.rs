use std::collections::VecDeque;

use crate::constants::*;
use crate::error::Error;
use crate::moves::{Move, MoveTables};
use crate::{decode_table, write_table, TABLE_DIR};

/// Upper clamp for stored distances; no single coordinate needs more moves than
/// this under its phase's legal move set.
pub const MAX_PRUNE_DEPTH: u8 = 20;

const UNKNOWN: u8 = 0xff;

/// The pruning tables cut the search tree during the search.
///
/// Every entry is the exact number of phase-legal moves needed to bring that
/// coordinate back to 0, found by breadth-first flood-fill from the goal.
pub struct PruningTables {
    pub flip_dist: Vec<u8>,
    pub twist_dist: Vec<u8>,
    pub slice_dist: Vec<u8>,
    pub corners_dist: Vec<u8>,
    pub ud_edges_dist: Vec<u8>,
    pub slice_perm_dist: Vec<u8>,
    /// Composite corners x slice_perm distance, tightening the phase 2 bound.
    pub cornslice_dist: Vec<u8>,
}

impl PruningTables {
    pub fn new(mv: &MoveTables) -> Result<Self, Error> {
        let flip_dist = load_or_bfs("prune_flip", N_FLIP, &ALL_MOVES, |k, m| {
            mv.flip_move[N_MOVE * k + m as usize] as usize
        })?;
        let twist_dist = load_or_bfs("prune_twist", N_TWIST, &ALL_MOVES, |k, m| {
            mv.twist_move[N_MOVE * k + m as usize] as usize
        })?;
        let slice_dist = load_or_bfs("prune_slice", N_SLICE, &ALL_MOVES, |k, m| {
            mv.slice_move[N_MOVE * k + m as usize] as usize
        })?;
        let corners_dist = load_or_bfs("prune_corners", N_CORNERS, &PHASE2_MOVES, |k, m| {
            mv.corners_move[N_MOVE * k + m as usize] as usize
        })?;
        let ud_edges_dist = load_or_bfs("prune_ud_edges", N_UD_EDGES, &PHASE2_MOVES, |k, m| {
            mv.ud_edges_move[N_MOVE * k + m as usize] as usize
        })?;
        let slice_perm_dist =
            load_or_bfs("prune_slice_perm", N_SLICE_PERM, &PHASE2_MOVES, |k, m| {
                mv.slice_perm_move[N_MOVE * k + m as usize] as usize
            })?;
        let cornslice_dist = load_or_bfs(
            "prune_cornslice",
            N_CORNERS * N_SLICE_PERM,
            &PHASE2_MOVES,
            |k, m| {
                let corners = k / N_SLICE_PERM;
                let slice_perm = k % N_SLICE_PERM;
                N_SLICE_PERM * mv.corners_move[N_MOVE * corners + m as usize] as usize
                    + mv.slice_perm_move[N_MOVE * slice_perm + m as usize] as usize
            },
        )?;
        Ok(Self {
            flip_dist,
            twist_dist,
            slice_dist,
            corners_dist,
            ud_edges_dist,
            slice_perm_dist,
            cornslice_dist,
        })
    }

    /// Lower bound for the number of moves to bring a cube into G1.
    pub fn phase1_distance(&self, flip: u16, twist: u16, slice: u16) -> u8 {
        self.flip_dist[flip as usize]
            .max(self.twist_dist[twist as usize])
            .max(self.slice_dist[slice as usize])
    }

    /// Lower bound for the number of phase 2 moves to solve a cube in G1.
    pub fn phase2_distance(&self, corners: u16, ud_edges: u16, slice_perm: u16) -> u8 {
        self.cornslice_dist[N_SLICE_PERM * corners as usize + slice_perm as usize]
            .max(self.corners_dist[corners as usize])
            .max(self.ud_edges_dist[ud_edges as usize])
            .max(self.slice_perm_dist[slice_perm as usize])
    }
}

/// Breadth-first flood-fill from coordinate 0 under the given move set.
fn bfs_distances<F>(size: usize, moves: &[Move], succ: F) -> Vec<u8>
where
    F: Fn(usize, Move) -> usize,
{
    let mut dist = vec![UNKNOWN; size];
    dist[0] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(0usize);
    while let Some(k) = queue.pop_front() {
        let d = dist[k];
        for &m in moves {
            let k1 = succ(k, m);
            if dist[k1] == UNKNOWN {
                dist[k1] = (d + 1).min(MAX_PRUNE_DEPTH);
                queue.push_back(k1);
            }
        }
    }
    dist
}

fn load_or_bfs<F>(
    name: &'static str,
    size: usize,
    moves: &[Move],
    succ: F,
) -> Result<Vec<u8>, Error>
where
    F: Fn(usize, Move) -> usize,
{
    let _guard = crate::table_guard();
    let fname = format!("{TABLE_DIR}/{name}");
    let raw = std::fs::read(&fname).unwrap_or_default();
    if raw.is_empty() {
        let dist = bfs_distances(size, moves, succ);
        // every value inside the coordinate's domain must be reachable
        if dist.iter().any(|&d| d == UNKNOWN) {
            return Err(Error::TableCorrupt(name));
        }
        write_table(fname, &dist)?;
        Ok(dist)
    } else {
        let dist: Vec<u8> = decode_table(&raw)?;
        if dist.len() != size || dist.iter().any(|&d| d > MAX_PRUNE_DEPTH) {
            return Err(Error::TableCorrupt(name));
        }
        Ok(dist)
    }
}

#[cfg(test)]
mod test {
    use crate::constants::*;
    use crate::moves::MoveTables;
    use crate::pruning::*;

    fn tables() -> (MoveTables, PruningTables) {
        let mv = MoveTables::new().unwrap();
        let pr = PruningTables::new(&mv).unwrap();
        (mv, pr)
    }

    #[test]
    fn test_goal_distance_is_zero_only_at_goal() {
        let (_, pr) = tables();
        for dist in [
            &pr.flip_dist,
            &pr.twist_dist,
            &pr.slice_dist,
            &pr.corners_dist,
            &pr.ud_edges_dist,
            &pr.slice_perm_dist,
            &pr.cornslice_dist,
        ] {
            assert_eq!(dist[0], 0);
            assert_eq!(dist.iter().filter(|&&d| d == 0).count(), 1);
            assert!(dist.iter().all(|&d| d <= MAX_PRUNE_DEPTH));
        }
    }

    #[test]
    fn test_bfs_level_property_phase1() {
        let (mv, pr) = tables();
        // every non-goal value has a legal move that decreases its distance by one
        for k in (1..N_FLIP).step_by(19) {
            let best = ALL_MOVES
                .iter()
                .map(|&m| pr.flip_dist[mv.flip_move[N_MOVE * k + m as usize] as usize])
                .min()
                .unwrap();
            assert_eq!(best, pr.flip_dist[k] - 1);
        }
        for k in (1..N_TWIST).step_by(19) {
            let best = ALL_MOVES
                .iter()
                .map(|&m| pr.twist_dist[mv.twist_move[N_MOVE * k + m as usize] as usize])
                .min()
                .unwrap();
            assert_eq!(best, pr.twist_dist[k] - 1);
        }
        for k in 1..N_SLICE {
            let best = ALL_MOVES
                .iter()
                .map(|&m| pr.slice_dist[mv.slice_move[N_MOVE * k + m as usize] as usize])
                .min()
                .unwrap();
            assert_eq!(best, pr.slice_dist[k] - 1);
        }
    }

    #[test]
    fn test_bfs_level_property_phase2() {
        let (mv, pr) = tables();
        for k in (1..N_CORNERS).step_by(53) {
            let best = PHASE2_MOVES
                .iter()
                .map(|&m| pr.corners_dist[mv.corners_move[N_MOVE * k + m as usize] as usize])
                .min()
                .unwrap();
            assert_eq!(best, pr.corners_dist[k] - 1);
        }
        for k in (1..N_UD_EDGES).step_by(53) {
            let best = PHASE2_MOVES
                .iter()
                .map(|&m| pr.ud_edges_dist[mv.ud_edges_move[N_MOVE * k + m as usize] as usize])
                .min()
                .unwrap();
            assert_eq!(best, pr.ud_edges_dist[k] - 1);
        }
        for k in 1..N_SLICE_PERM {
            let best = PHASE2_MOVES
                .iter()
                .map(|&m| {
                    pr.slice_perm_dist[mv.slice_perm_move[N_MOVE * k + m as usize] as usize]
                })
                .min()
                .unwrap();
            assert_eq!(best, pr.slice_perm_dist[k] - 1);
        }
    }

    #[test]
    fn test_cornslice_dominates_components() {
        let (_, pr) = tables();
        for k in (0..N_CORNERS * N_SLICE_PERM).step_by(101) {
            let corners = k / N_SLICE_PERM;
            let slice_perm = k % N_SLICE_PERM;
            assert!(pr.cornslice_dist[k] >= pr.corners_dist[corners]);
            assert!(pr.cornslice_dist[k] >= pr.slice_perm_dist[slice_perm]);
        }
    }
}
