use std::{fmt, str::FromStr};

use self::Move::*;
use crate::constants::*;
use crate::cubie::{Corner::*, CubieCube, Edge::*};
use crate::error::Error;
use crate::{decode_table, write_table, TABLE_DIR};

/// Layer moves, Up, Right, Front, Down, Left, Back.
///
/// $ clockwise, $2 double, $3 counter-clockwise.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Move {
    U, U2, U3,
    R, R2, R3,
    F, F2, F3,
    D, D2, D3,
    L, L2, L3,
    B, B2, B3,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            D3 => write!(f, "D'"),
            R3 => write!(f, "R'"),
            L3 => write!(f, "L'"),
            F3 => write!(f, "F'"),
            B3 => write!(f, "B'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl serde::Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// One token of the grammar `[UDLRFB]('|P|2)?`, case-insensitively.
/// `'` and `P` both mean a counter-clockwise quarter turn.
impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('U') => 0,
            Some('R') => 1,
            Some('F') => 2,
            Some('D') => 3,
            Some('L') => 4,
            Some('B') => 5,
            _ => return Err(Error::InvalidScramble),
        };
        let power = match (chars.next(), chars.next()) {
            (None, _) => 0,
            (Some('2'), None) => 1,
            (Some('\''), None) | (Some('P'), None) | (Some('p'), None) => 2,
            _ => return Err(Error::InvalidScramble),
        };
        Ok(ALL_MOVES[3 * face + power])
    }
}

#[rustfmt::skip]
impl Move {
    pub fn is_inverse(&self, other: Move) -> bool {
        matches!(
            (&self, other),
            (U | U2 | U3, D | D2 | D3)
            | (R | R2 | R3, L | L2 | L3)
            | (F | F2 | F3, B | B2 | B3),
        )
    }

    pub fn is_same_layer(&self, other: Move) -> bool {
        self.face() == other.face()
    }

    /// Face of the move, 0..6 in the order U, R, F, D, L, B.
    pub fn face(self) -> usize {
        self as usize / 3
    }

    /// Number of clockwise quarter turns, 1..4.
    pub fn turns(self) -> usize {
        self as usize % 3 + 1
    }

    pub fn get_inverse(self) -> Self {
        match self {
            U => U3,
            U3 => U,
            D => D3,
            D3 => D,
            R => R3,
            R3 => R,
            L => L3,
            L3 => L,
            F => F3,
            F3 => F,
            B => B3,
            B3 => B,
            _ => self,
        }
    }
}

/// Reverse a sequence and invert every move; applying both in order is the identity.
pub fn inverse_moves(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|m| m.get_inverse()).collect()
}

/// Collapse runs of moves on the same face into a single turn mod 4,
/// dropping turns that cancel completely.
pub fn simplify_moves(moves: &[Move]) -> Vec<Move> {
    let mut result: Vec<Move> = Vec::new();
    for &m in moves {
        match result.last() {
            Some(&p) if p.face() == m.face() => {
                let total = (p.turns() + m.turns()) % 4;
                result.pop();
                if total != 0 {
                    result.push(ALL_MOVES[3 * m.face() + total - 1]);
                }
            }
            _ => result.push(m),
        }
    }
    result
}

/// The basic six cube moves described by permutations and changes in orientation.
///
/// U_MOVE
pub const U_MOVE: CubieCube = CubieCube {
    cp: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UB, UR, UF, UL, DR, DF, DL, DB, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// R_MOVE
pub const R_MOVE: CubieCube = CubieCube {
    cp: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR], //permutation of the corners
    co: [2, 0, 0, 1, 1, 0, 0, 2],                 //changes of the orientations of the corners
    ep: [FR, UF, UL, UB, BR, DF, DL, DB, DR, FL, BL, UR], //permutation of the edges
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],     //changes of the permutations of the edges
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// F_MOVE
pub const F_MOVE: CubieCube = CubieCube {
    cp: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
    co: [1, 2, 0, 0, 2, 1, 0, 0],
    ep: [UR, FL, UL, UB, DR, FR, DL, DB, UF, DF, BL, BR],
    eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// D_MOVE
pub const D_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UR, UF, UL, UB, DF, DL, DB, DR, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// L_MOVE
pub const L_MOVE: CubieCube = CubieCube {
    cp: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
    co: [0, 1, 2, 0, 0, 2, 1, 0],
    ep: [UR, UF, BL, UB, DR, DF, FL, DB, FR, UL, DL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

/// The basic six cube moves described by permutations and changes in orientation.
///
/// B_MOVE
pub const B_MOVE: CubieCube = CubieCube {
    cp: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
    co: [0, 0, 1, 2, 0, 0, 2, 1],
    ep: [UR, UF, UL, BR, DR, DF, DL, BL, FR, FL, UB, DB],
    eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
};

/// The 90° generator cubes in face order U, R, F, D, L, B.
pub const BASIC_MOVE_CUBES: [CubieCube; 6] = [U_MOVE, R_MOVE, F_MOVE, D_MOVE, L_MOVE, B_MOVE];

lazy_static! {
    /// All 18 face turns as cubie cubes, indexed like `ALL_MOVES`.
    static ref MOVE_CUBES: [CubieCube; 18] = {
        let mut cubes = [CubieCube::default(); N_MOVE];
        for (f, base) in BASIC_MOVE_CUBES.iter().enumerate() {
            let mut acc = *base;
            for t in 0..3 {
                cubes[3 * f + t] = acc;
                acc = acc * *base;
            }
        }
        cubes
    };
}

/// The cubie cube of a single face turn.
pub fn move_cube(m: Move) -> CubieCube {
    MOVE_CUBES[m as usize]
}

/// Create a move table, or load it from the cache when a copy is on disk.
/// Loaded tables are checked for shape and entry range.
fn load_or_create<F>(name: &'static str, size: usize, build: F) -> Result<Vec<u16>, Error>
where
    F: FnOnce() -> Vec<u16>,
{
    let _guard = crate::table_guard();
    let fname = format!("{TABLE_DIR}/{name}");
    let raw = std::fs::read(&fname).unwrap_or_default();
    if raw.is_empty() {
        let table = build();
        write_table(fname, &table)?;
        Ok(table)
    } else {
        let table: Vec<u16> = decode_table(&raw)?;
        if table.len() != size * N_MOVE || table.iter().any(|&v| v as usize >= size) {
            return Err(Error::TableCorrupt(name));
        }
        Ok(table)
    }
}

/// Move table for the twists of the corners.
///
/// The twist coordinate describes the 3^7 = 2187 possible orientations of the 8 corners
///
/// 0 <= twist < 2187 in phase 1, twist = 0 in phase 2
pub fn move_twist() -> Result<Vec<u16>, Error> {
    load_or_create("move_twist", N_TWIST, || {
        let mut twist_move = vec![0; N_TWIST * N_MOVE];
        let mut a = CubieCube::default();
        for i in 0..N_TWIST {
            a.set_twist(i as u16);
            for j in 0..6 {
                // three moves for each face, for example U, U2, U3 = U'
                for k in 0..3 {
                    a.corner_multiply(BASIC_MOVE_CUBES[j]);
                    twist_move[N_MOVE * i + 3 * j + k] = a.get_twist();
                }
                a.corner_multiply(BASIC_MOVE_CUBES[j]); // 4. move restores face
            }
        }
        twist_move
    })
}

/// Move table for the flip of the edges.
///
/// The flip coordinate describes the 2^11 = 2048 possible orientations of the 12 edges
///
/// 0 <= flip < 2048 in phase 1, flip = 0 in phase 2
pub fn move_flip() -> Result<Vec<u16>, Error> {
    load_or_create("move_flip", N_FLIP, || {
        let mut flip_move = vec![0; N_FLIP * N_MOVE];
        let mut a = CubieCube::default();
        for i in 0..N_FLIP {
            a.set_flip(i as u16);
            for j in 0..6 {
                for k in 0..3 {
                    a.edge_multiply(BASIC_MOVE_CUBES[j]);
                    flip_move[N_MOVE * i + 3 * j + k] = a.get_flip();
                }
                a.edge_multiply(BASIC_MOVE_CUBES[j]);
            }
        }
        flip_move
    })
}

/// Move table for the locations of the four E-slice edges FR, FL, BL and BR.
///
/// The slice coordinate describes the 12 choose 4 = 495 possible position sets of the
/// E-slice edges, ignoring their order.
///
/// 0 <= slice < 495 in phase 1, slice = 0 in phase 2
pub fn move_slice() -> Result<Vec<u16>, Error> {
    load_or_create("move_slice", N_SLICE, || {
        let mut slice_move = vec![0; N_SLICE * N_MOVE];
        let mut a = CubieCube::default();
        for i in 0..N_SLICE {
            a.set_slice(i as u16);
            for j in 0..6 {
                for k in 0..3 {
                    a.edge_multiply(BASIC_MOVE_CUBES[j]);
                    slice_move[N_MOVE * i + 3 * j + k] = a.get_slice();
                }
                a.edge_multiply(BASIC_MOVE_CUBES[j]);
            }
        }
        slice_move
    })
}

/// Move table for the corners coordinate in phase 2
///
/// The corners coordinate describes the 8! = 40320 permutations of the corners.
///
/// 0 <= corners < 40320 defined but unused in phase 1, 0 <= corners < 40320 in phase 2,
/// corners = 0 for solved cube
pub fn move_corners() -> Result<Vec<u16>, Error> {
    load_or_create("move_corners", N_CORNERS, || {
        let mut corners_move = vec![0; N_CORNERS * N_MOVE];
        let mut a = CubieCube::default();
        for i in 0..N_CORNERS {
            a.set_corners(i as u16);
            for j in 0..6 {
                for k in 0..3 {
                    a.corner_multiply(BASIC_MOVE_CUBES[j]);
                    corners_move[N_MOVE * i + 3 * j + k] = a.get_corners();
                }
                a.corner_multiply(BASIC_MOVE_CUBES[j]);
            }
        }
        corners_move
    })
}

/// Move table for the edges in the U-face and D-face.
///
/// The ud_edges coordinate describes the 40320 permutations of the edges UR, UF, UL, UB,
/// DR, DF, DL and DB in phase 2.
///
/// ud_edges undefined in phase 1, 0 <= ud_edges < 40320 in phase 2, ud_edges = 0 for solved cube.
/// Only the ten phase 2 move columns are filled; the others stay zero and are never read.
pub fn move_ud_edges() -> Result<Vec<u16>, Error> {
    load_or_create("move_ud_edges", N_UD_EDGES, || {
        let mut ud_edges_move = vec![0; N_UD_EDGES * N_MOVE];
        let mut a = CubieCube::default();
        for i in 0..N_UD_EDGES {
            a.set_ud_edges(i as u16);
            for j in 0..6 {
                for k in 0..3 {
                    a.edge_multiply(BASIC_MOVE_CUBES[j]);
                    // only U, U2, U', D, D2, D', R2, F2, L2, B2 in phase 2
                    if (j == 1 || j == 2 || j == 4 || j == 5) && k != 1 {
                        continue;
                    }
                    ud_edges_move[N_MOVE * i + 3 * j + k] = a.get_ud_edges();
                }
                a.edge_multiply(BASIC_MOVE_CUBES[j]);
            }
        }
        ud_edges_move
    })
}

/// Move table for the permutation of the E-slice edges inside their slice.
///
/// The slice_perm coordinate describes the 4! = 24 orders of FR, FL, BL and BR in phase 2.
///
/// slice_perm undefined in phase 1, 0 <= slice_perm < 24 in phase 2, slice_perm = 0 for solved cube.
/// Only the ten phase 2 move columns are filled; the others stay zero and are never read.
pub fn move_slice_perm() -> Result<Vec<u16>, Error> {
    load_or_create("move_slice_perm", N_SLICE_PERM, || {
        let mut slice_perm_move = vec![0; N_SLICE_PERM * N_MOVE];
        let mut a = CubieCube::default();
        for i in 0..N_SLICE_PERM {
            a.set_slice_perm(i as u16);
            for j in 0..6 {
                for k in 0..3 {
                    a.edge_multiply(BASIC_MOVE_CUBES[j]);
                    if (j == 1 || j == 2 || j == 4 || j == 5) && k != 1 {
                        continue;
                    }
                    slice_perm_move[N_MOVE * i + 3 * j + k] = a.get_slice_perm();
                }
                a.edge_multiply(BASIC_MOVE_CUBES[j]);
            }
        }
        slice_perm_move
    })
}

/// The six coordinate move tables, row-major `[coordinate * 18 + move]`.
pub struct MoveTables {
    pub twist_move: Vec<u16>,
    pub flip_move: Vec<u16>,
    pub slice_move: Vec<u16>,
    pub corners_move: Vec<u16>,
    pub ud_edges_move: Vec<u16>,
    pub slice_perm_move: Vec<u16>,
}

impl MoveTables {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            twist_move: move_twist()?,
            flip_move: move_flip()?,
            slice_move: move_slice()?,
            corners_move: move_corners()?,
            ud_edges_move: move_ud_edges()?,
            slice_perm_move: move_slice_perm()?,
        })
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use crate::constants::*;
    use crate::cubie::CubieCube;
    use crate::moves::{Move::*, *};

    #[test]
    fn test_parse() {
        assert_eq!(Move::from_str("R").unwrap(), R);
        assert_eq!(Move::from_str("R'").unwrap(), R3);
        assert_eq!(Move::from_str("r2").unwrap(), R2);
        assert_eq!(Move::from_str("u'").unwrap(), U3);
        assert_eq!(Move::from_str("BP").unwrap(), B3);
        assert_eq!(Move::from_str("fp").unwrap(), F3);
        assert!(Move::from_str("X").is_err());
        assert!(Move::from_str("R3").is_err());
        assert!(Move::from_str("R2'").is_err());
        assert!(Move::from_str("").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(U.to_string(), "U");
        assert_eq!(U2.to_string(), "U2");
        assert_eq!(U3.to_string(), "U'");
        assert_eq!(B3.to_string(), "B'");
    }

    #[test]
    fn test_move_cubes() {
        assert_eq!(move_cube(U), U_MOVE);
        assert_eq!(move_cube(U2), U_MOVE * U_MOVE);
        assert_eq!(move_cube(U3), U_MOVE * U_MOVE * U_MOVE);
        assert_eq!(move_cube(B2), B_MOVE * B_MOVE);
        for m in ALL_MOVES {
            let cc = move_cube(m).apply_move(m.get_inverse());
            assert_eq!(cc, CubieCube::default());
        }
    }

    #[test]
    fn test_apply_then_inverse_move() {
        let scramble = vec![D2, B, L3, U, F2, R];
        let cc = CubieCube::from(&scramble);
        for m in ALL_MOVES {
            assert_eq!(cc.apply_move(m).apply_move(m.get_inverse()), cc);
        }
    }

    #[test]
    fn test_inverse_moves() {
        let scramble = vec![F2, D3, L, U2, B3];
        let inverse = inverse_moves(&scramble);
        assert_eq!(inverse, vec![B, U2, L3, D, F2]);
        let cc = CubieCube::from(&scramble).apply_moves(&inverse);
        assert_eq!(cc, CubieCube::default());
    }

    #[test]
    fn test_simplify() {
        assert_eq!(simplify_moves(&[R, R2]), vec![R3]);
        assert_eq!(simplify_moves(&[U, U3]), vec![]);
        assert_eq!(simplify_moves(&[R, L, R]), vec![R, L, R]);
        assert_eq!(simplify_moves(&[U, R, R3, U]), vec![U2]);
        assert_eq!(simplify_moves(&[F2, F2, B]), vec![B]);
        let scramble = vec![U, R, R3, U, F2, B, B3, F2, D];
        let simplified = simplify_moves(&scramble);
        assert_eq!(
            CubieCube::from(&scramble),
            CubieCube::default().apply_moves(&simplified)
        );
    }

    #[test]
    fn test_move_twist_table() {
        let twist_move = move_twist().unwrap();
        assert_eq!(twist_move.len(), N_TWIST * N_MOVE);
        let mut cc = CubieCube::default();
        for i in (0..N_TWIST).step_by(35) {
            cc.set_twist(i as u16);
            for (mi, &m) in ALL_MOVES.iter().enumerate() {
                assert_eq!(twist_move[N_MOVE * i + mi], cc.apply_move(m).get_twist());
            }
        }
    }

    #[test]
    fn test_move_flip_table() {
        let flip_move = move_flip().unwrap();
        assert_eq!(flip_move.len(), N_FLIP * N_MOVE);
        let mut cc = CubieCube::default();
        for i in (0..N_FLIP).step_by(33) {
            cc.set_flip(i as u16);
            for (mi, &m) in ALL_MOVES.iter().enumerate() {
                assert_eq!(flip_move[N_MOVE * i + mi], cc.apply_move(m).get_flip());
            }
        }
    }

    #[test]
    fn test_move_slice_table() {
        let slice_move = move_slice().unwrap();
        assert_eq!(slice_move.len(), N_SLICE * N_MOVE);
        let mut cc = CubieCube::default();
        for i in 0..N_SLICE {
            cc.set_slice(i as u16);
            for (mi, &m) in ALL_MOVES.iter().enumerate() {
                assert_eq!(slice_move[N_MOVE * i + mi], cc.apply_move(m).get_slice());
            }
        }
    }

    #[test]
    fn test_move_corners_table() {
        let corners_move = move_corners().unwrap();
        assert_eq!(corners_move.len(), N_CORNERS * N_MOVE);
        let mut cc = CubieCube::default();
        for i in (0..N_CORNERS).step_by(97) {
            cc.set_corners(i as u16);
            for (mi, &m) in ALL_MOVES.iter().enumerate() {
                assert_eq!(
                    corners_move[N_MOVE * i + mi],
                    cc.apply_move(m).get_corners()
                );
            }
        }
    }

    #[test]
    fn test_move_ud_edges_table() {
        let ud_edges_move = move_ud_edges().unwrap();
        assert_eq!(ud_edges_move.len(), N_UD_EDGES * N_MOVE);
        let mut cc = CubieCube::default();
        for i in (0..N_UD_EDGES).step_by(97) {
            cc.set_ud_edges(i as u16);
            for &m in PHASE2_MOVES.iter() {
                assert_eq!(
                    ud_edges_move[N_MOVE * i + m as usize],
                    cc.apply_move(m).get_ud_edges()
                );
            }
        }
    }

    #[test]
    fn test_move_slice_perm_table() {
        let slice_perm_move = move_slice_perm().unwrap();
        assert_eq!(slice_perm_move.len(), N_SLICE_PERM * N_MOVE);
        let mut cc = CubieCube::default();
        for i in 0..N_SLICE_PERM {
            cc.set_slice_perm(i as u16);
            for &m in PHASE2_MOVES.iter() {
                assert_eq!(
                    slice_perm_move[N_MOVE * i + m as usize],
                    cc.apply_move(m).get_slice_perm()
                );
            }
        }
    }
}
