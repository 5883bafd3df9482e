use crate::cubie::Corner::{self, *};
use crate::cubie::Edge::{self, *};
use crate::facelet::Color;
use crate::moves::Move::{self, *};

pub const ALL_CORNERS: [Corner; 8] = [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB];
pub const ALL_EDGES: [Edge; 12] = [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR];
pub const ALL_COLORS: [Color; 6] = [Color::U, Color::R, Color::F, Color::D, Color::L, Color::B];
pub const ALL_MOVES: [Move; 18] = [
    U, U2, U3, R, R2, R3, F, F2, F3, D, D2, D3, L, L2, L3, B, B2, B3,
];

/// The ten moves that stabilize the G1 subgroup, in search order.
pub const PHASE2_MOVES: [Move; 10] = [U, U2, U3, R2, F2, D, D2, D3, L2, B2];

/// number of possible face moves
pub const N_MOVE: usize = 18;
/// 3^7 possible corner orientations in phase 1
pub const N_TWIST: usize = 2187;
/// 2^11 possible edge orientations in phase 1
pub const N_FLIP: usize = 2048;
/// 12 choose 4 possible position sets of the FR, FL, BL, BR edges in phase 1
pub const N_SLICE: usize = 495;
/// 8! corner permutations in phase 2
pub const N_CORNERS: usize = 40320;
/// 8! permutations of the edges in the U-face and D-face in phase 2
pub const N_UD_EDGES: usize = 40320;
/// 4! permutations of the FR, FL, BL, BR edges inside their slice in phase 2
pub const N_SLICE_PERM: usize = 24;
