use std::fmt;

use crate::constants::*;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::moves::{Move, MoveTables};

/// Marks the phase 2 coordinates while the cube is still outside G1.
pub const INVALID: u16 = 0xffff;

/// Represent a cube on the coordinate level.
///
/// In phase 1 a state is uniquely determined by the three coordinates flip, twist and slice.
///
/// In phase 2 a state is uniquely determined by the three coordinates corners, ud_edges
/// and slice_perm.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CoordCube {
    pub flip: u16,       // flip of edges
    pub twist: u16,      // twist of corners
    pub slice: u16,      // location of the FR, FL, BL, BR edges, order ignored
    pub corners: u16,    // corner permutation
    pub ud_edges: u16,   // permutation of the U and D edges, valid only in phase 2
    pub slice_perm: u16, // permutation of the E-slice edges, valid only in phase 2
}

impl Default for CoordCube {
    fn default() -> Self {
        Self {
            flip: 0,
            twist: 0,
            slice: 0,
            corners: 0,
            ud_edges: 0,
            slice_perm: 0,
        }
    }
}

impl fmt::Display for CoordCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(flip: {}, twist: {}, slice: {}, corners: {}, ud_edges: {}, slice_perm: {})",
            self.flip, self.twist, self.slice, self.corners, self.ud_edges, self.slice_perm
        )
    }
}

impl TryFrom<&CubieCube> for CoordCube {
    type Error = Error;

    fn try_from(cc: &CubieCube) -> Result<Self, Self::Error> {
        cc.verify()?;

        let flip = cc.get_flip();
        let twist = cc.get_twist();
        let slice = cc.get_slice();
        let corners = cc.get_corners();

        // the phase 2 edge coordinates only exist once the E-slice edges are home
        let (ud_edges, slice_perm) = match slice {
            0 => (cc.get_ud_edges(), cc.get_slice_perm()),
            _ => (INVALID, INVALID),
        };

        Ok(Self {
            flip,
            twist,
            slice,
            corners,
            ud_edges,
            slice_perm,
        })
    }
}

impl CoordCube {
    /// Update the phase 1 coordinates when a move is applied.
    ///
    /// The phase 2 edge coordinates are invalidated; they are recomputed from the cubie
    /// cube at the phase boundary.
    pub fn phase1_move(&mut self, mv: &MoveTables, m: Move) {
        let m = m as usize;
        self.flip = mv.flip_move[N_MOVE * self.flip as usize + m];
        self.twist = mv.twist_move[N_MOVE * self.twist as usize + m];
        self.slice = mv.slice_move[N_MOVE * self.slice as usize + m];
        self.corners = mv.corners_move[N_MOVE * self.corners as usize + m];
        self.ud_edges = INVALID;
        self.slice_perm = INVALID;
    }

    /// Update the phase 2 coordinates when a phase 2 move is applied.
    pub fn phase2_move(&mut self, mv: &MoveTables, m: Move) {
        debug_assert!(PHASE2_MOVES.contains(&m));
        let m = m as usize;
        self.corners = mv.corners_move[N_MOVE * self.corners as usize + m];
        self.ud_edges = mv.ud_edges_move[N_MOVE * self.ud_edges as usize + m];
        self.slice_perm = mv.slice_perm_move[N_MOVE * self.slice_perm as usize + m];
    }

    /// All phase 1 coordinates at their goal, i.e. the cube is in G1.
    pub fn is_phase1_solved(&self) -> bool {
        self.flip == 0 && self.twist == 0 && self.slice == 0
    }

    /// All phase 2 coordinates at their goal, i.e. the cube is solved.
    pub fn is_phase2_solved(&self) -> bool {
        self.corners == 0 && self.ud_edges == 0 && self.slice_perm == 0
    }
}
