use std::fmt;
use std::ops::Mul;

use self::{Corner::*, Edge::*};
use crate::constants::*;
use crate::error::Error;
use crate::facelet::{FaceCube, CORNER_COLOR, CORNER_FACELET, EDGE_COLOR, EDGE_FACELET};
use crate::facelet::Color;
use crate::moves::{self, Move};

/// Represents the 8 corners on the cube, described by the layer they are on.
///
/// Example: `ULB` (Up, Left, Bottom).
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub enum Corner {
    URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB,
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Corner {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(URF),
            1 => Ok(UFL),
            2 => Ok(ULB),
            3 => Ok(UBR),
            4 => Ok(DFR),
            5 => Ok(DLF),
            6 => Ok(DBL),
            7 => Ok(DRB),
            _ => Err(Error::InvalidCorner),
        }
    }
}

/// Represents the 12 edges on the cube, described by the layer they are on.
///
/// Example: `BL` (Bottom, Left).
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Eq, Hash)]
pub enum Edge {
    UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Edge {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(UR),
            1 => Ok(UF),
            2 => Ok(UL),
            3 => Ok(UB),
            4 => Ok(DR),
            5 => Ok(DF),
            6 => Ok(DL),
            7 => Ok(DB),
            8 => Ok(FR),
            9 => Ok(FL),
            10 => Ok(BL),
            11 => Ok(BR),
            _ => Err(Error::InvalidEdge),
        }
    }
}

/// Cube on the cubie level.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CubieCube {
    /// Corner permutation, relative to SOLVED_CUBIE_CUBE.
    pub cp: [Corner; 8],
    /// Corner orientation, 3 possible values: 0 (correctly oriented), 1 (twisted clockwise), 2 (twisted counter-clockwise).
    pub co: [u8; 8],
    /// Edge permutation, relative to SOLVED_CUBIE_CUBE.
    pub ep: [Edge; 12],
    /// Edge orientation, 2 possible values: 0 (correctly oriented), 1 (flipped).
    pub eo: [u8; 12],
}

/// Solved cube on the Cubie level.
pub const SOLVED_CUBIE_CUBE: CubieCube = CubieCube {
    cp: [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

impl Default for CubieCube {
    fn default() -> Self {
        SOLVED_CUBIE_CUBE
    }
}

impl Mul for CubieCube {
    type Output = Self;

    fn mul(self, rhs: CubieCube) -> Self::Output {
        let mut res = CubieCube::default();
        // (A * B).c = A(B(x).c).c
        // (A * B).o = A(B(x).c).o + B(x).o

        for i in 0..8 {
            res.cp[i] = self.cp[rhs.cp[i] as usize];
            res.co[i] = (self.co[rhs.cp[i] as usize] + rhs.co[i]) % 3;
        }

        for i in 0..12 {
            res.ep[i] = self.ep[rhs.ep[i] as usize];
            res.eo[i] = (self.eo[rhs.ep[i] as usize] + rhs.eo[i]) % 2;
        }
        res
    }
}

impl fmt::Display for CubieCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        for i in 0..8 {
            let cs: String = format!("({},{})", self.cp[i], self.co[i]);
            s.push_str(&cs);
        }
        for i in 0..12 {
            let es: String = format!("({},{})", self.ep[i], self.eo[i]);
            s.push_str(&es);
        }
        write!(f, "{s}")
    }
}

impl From<&Vec<Move>> for CubieCube {
    fn from(moves: &Vec<Move>) -> Self {
        CubieCube::default().apply_moves(moves)
    }
}

/// Gives cubie representation of a face cube (facelet).
impl TryFrom<&FaceCube> for CubieCube {
    type Error = Error;
    fn try_from(face_cube: &FaceCube) -> Result<Self, Self::Error> {
        let mut state = CubieCube::default();
        let mut ori: usize = 0;
        let mut col1;
        let mut col2;

        for i in 0..8 {
            let i = Corner::try_from(i)?;
            // get the colors of the cubie at corner i, starting with U/D
            for index in 0..3 {
                ori = index;
                if face_cube.f[CORNER_FACELET[i as usize][ori] as usize] == Color::U
                    || face_cube.f[CORNER_FACELET[i as usize][ori] as usize] == Color::D
                {
                    break;
                }
            }

            col1 = face_cube.f[CORNER_FACELET[i as usize][(ori + 1) % 3] as usize];
            col2 = face_cube.f[CORNER_FACELET[i as usize][(ori + 2) % 3] as usize];

            for j in 0..8 {
                let j = Corner::try_from(j)?;
                if col1 == CORNER_COLOR[j as usize][1] && col2 == CORNER_COLOR[j as usize][2] {
                    // in cornerposition i we have cornercubie j
                    state.cp[i as usize] = j;
                    state.co[i as usize] = ori as u8 % 3;
                    break;
                }
            }
        }

        for i in 0..12 {
            let i = Edge::try_from(i)?;
            for j in 0..12 {
                let j = Edge::try_from(j)?;
                if face_cube.f[EDGE_FACELET[i as usize][0] as usize] == EDGE_COLOR[j as usize][0]
                    && face_cube.f[EDGE_FACELET[i as usize][1] as usize]
                        == EDGE_COLOR[j as usize][1]
                {
                    state.ep[i as usize] = j;
                    state.eo[i as usize] = 0;
                    break;
                }
                if face_cube.f[EDGE_FACELET[i as usize][0] as usize] == EDGE_COLOR[j as usize][1]
                    && face_cube.f[EDGE_FACELET[i as usize][1] as usize]
                        == EDGE_COLOR[j as usize][0]
                {
                    state.ep[i as usize] = j;
                    state.eo[i as usize] = 1;
                    break;
                }
            }
        }

        if !state.is_solvable() {
            Err(Error::InvalidFaceletValue)
        } else {
            Ok(state)
        }
    }
}

impl CubieCube {
    /// Applies a move to the current state.
    pub fn apply_move(self, m: Move) -> Self {
        self * moves::move_cube(m)
    }

    /// Applies the sequence of moves to the current state.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        moves.iter().fold(*self, |acc, &m| acc.apply_move(m))
    }

    /// Multiply this cubie cube with another cubie cube b, restricted to the corners.
    pub fn corner_multiply(&mut self, b: CubieCube) {
        let mut c_perm = [URF; 8];
        let mut c_ori = [0; 8];
        for c in 0..8 {
            c_perm[c] = self.cp[b.cp[c] as usize];
            c_ori[c] = (self.co[b.cp[c] as usize] + b.co[c]) % 3;
        }
        self.cp = c_perm;
        self.co = c_ori;
    }

    /// Multiply this cubie cube with another cubie cube b, restricted to the edges.
    pub fn edge_multiply(&mut self, b: CubieCube) {
        let mut e_perm = [UR; 12];
        let mut e_ori = [0; 12];
        for e in 0..12 {
            e_perm[e] = self.ep[b.ep[e] as usize];
            e_ori[e] = (self.eo[b.ep[e] as usize] + b.eo[e]) % 2;
        }
        self.ep = e_perm;
        self.eo = e_ori;
    }

    /// Multiply this cubie cube with another cubie cube b.
    pub fn multiply(&mut self, b: CubieCube) {
        self.corner_multiply(b);
        self.edge_multiply(b);
    }

    /// Apply single move to this cubie cube.
    pub fn multiply_move(&mut self, m: Move) {
        self.multiply(moves::move_cube(m));
    }

    /// Apply some moves to this cubie cube.
    pub fn multiply_moves(&mut self, moves: &[Move]) {
        moves.iter().for_each(|&m| self.multiply_move(m));
    }

    /// Return the inverse of this cubiecube.
    pub fn inverse_cubie_cube(&self) -> Self {
        let mut d = CubieCube::default();
        for e in 0..12 {
            d.ep[self.ep[e] as usize] = ALL_EDGES[e];
        }
        for e in 0..12 {
            d.eo[e] = self.eo[d.ep[e] as usize];
        }

        for c in 0..8 {
            d.cp[self.cp[c] as usize] = ALL_CORNERS[c];
        }
        for c in 0..8 {
            d.co[c] = (3 - self.co[d.cp[c] as usize]) % 3;
        }
        d
    }

    /// Get the twist of the 8 corners. 0 <= twist < 2187 in phase 1, twist = 0 in phase 2.
    pub fn get_twist(&self) -> u16 {
        let mut twist = 0;
        for i in (URF as usize)..(DRB as usize) {
            twist = 3 * twist + self.co[i] as u16;
        }
        twist
    }

    /// Set the twist of the 8 corners. 0 <= twist < 2187 in phase 1, twist = 0 in phase 2.
    pub fn set_twist(&mut self, twist: u16) {
        let mut twistparity = 0;
        let mut twist = twist;
        for i in ((URF as usize)..(DRB as usize)).rev() {
            self.co[i] = (twist % 3) as u8;
            twistparity += self.co[i];
            twist /= 3;
        }
        self.co[DRB as usize] = (3 - twistparity % 3) % 3;
    }

    /// Get the flip of the 12 edges. 0 <= flip < 2048 in phase 1, flip = 0 in phase 2.
    pub fn get_flip(&self) -> u16 {
        let mut flip = 0;
        for i in (UR as usize)..(BR as usize) {
            flip = 2 * flip + self.eo[i] as u16;
        }
        flip
    }

    /// Set the flip of the 12 edges. 0 <= flip < 2048 in phase 1, flip = 0 in phase 2.
    pub fn set_flip(&mut self, flip: u16) {
        let mut flipparity = 0;
        let mut flip = flip;
        for i in ((UR as usize)..(BR as usize)).rev() {
            self.eo[i] = (flip % 2) as u8;
            flipparity += self.eo[i];
            flip /= 2;
        }
        self.eo[BR as usize] = (2 - flipparity % 2) % 2;
    }

    /// Get the location of the E-slice edges FR,FL,BL and BR ignoring their permutation.
    ///
    /// 0 <= slice < 495 in phase 1, slice = 0 in phase 2.
    pub fn get_slice(&self) -> u16 {
        let mut a = 0;
        let mut x = 0;
        // Compute the index a < (12 choose 4)
        for j in ((UR as usize)..=(BR as usize)).rev() {
            if FR <= self.ep[j] && self.ep[j] <= BR {
                a += c_nk((11 - j) as u32, x + 1);
                x += 1;
            }
        }
        a as u16
    }

    /// Set the location of the E-slice edges FR,FL,BL and BR ignoring their permutation.
    ///
    /// 0 <= slice < 495 in phase 1, slice = 0 in phase 2.
    pub fn set_slice(&mut self, idx: u16) {
        let slice_edge = [FR, FL, BL, BR];
        let other_edge = [UR, UF, UL, UB, DR, DF, DL, DB];
        let mut a = idx as u32;
        let mut filled = [false; 12];

        let mut x: u32 = 4; // set slice edges
        for j in 0..12 {
            if x > 0 && a >= c_nk(11 - j as u32, x) {
                a -= c_nk(11 - j as u32, x);
                self.ep[j] = slice_edge[(4 - x) as usize];
                filled[j] = true;
                x -= 1;
            }
        }
        let mut x = 0; // set the remaining edges UR..DB
        for j in 0..12 {
            if !filled[j] {
                self.ep[j] = other_edge[x];
                x += 1;
            }
        }
    }

    /// Get the permutation of the 8 corners.
    ///
    /// 0 <= corners < 40320, corners = 0 for solved cube.
    pub fn get_corners(&self) -> u16 {
        let mut perm = self.cp;
        let mut b = 0;
        for j in ((UFL as usize)..=(DRB as usize)).rev() {
            let mut k = 0;
            while perm[j] as usize != j {
                rotate_left(&mut perm, 0, j);
                k += 1;
            }
            b = (j as u16 + 1) * b + k;
        }
        b
    }

    /// Set the permutation of the 8 corners.
    ///
    /// 0 <= corners < 40320, corners = 0 for solved cube.
    pub fn set_corners(&mut self, idx: u16) {
        self.cp = ALL_CORNERS;
        let mut idx = idx;
        for j in ALL_CORNERS {
            let mut k = idx % (j as u16 + 1);
            idx /= j as u16 + 1;
            while k > 0 {
                rotate_right(&mut self.cp, 0, j as usize);
                k -= 1;
            }
        }
    }

    /// Get the permutation of the 8 U and D edges.
    ///
    /// Defined only when the E-slice edges are home (phase 2); 0 <= ud_edges < 40320.
    pub fn get_ud_edges(&self) -> u16 {
        let mut perm = [UR; 8];
        perm.copy_from_slice(&self.ep[..8]);
        let mut b = 0;
        for j in ((UF as usize)..=(DB as usize)).rev() {
            let mut k = 0;
            while perm[j] as usize != j {
                rotate_left(&mut perm, 0, j);
                k += 1;
            }
            b = (j as u16 + 1) * b + k;
        }
        b
    }

    /// Set the permutation of the 8 U and D edges.
    ///
    /// 0 <= ud_edges < 40320, ud_edges = 0 for solved cube.
    pub fn set_ud_edges(&mut self, idx: u16) {
        let mut edges = [UR, UF, UL, UB, DR, DF, DL, DB];
        let mut idx = idx;
        for j in 0..8 {
            let mut k = idx % (j as u16 + 1);
            idx /= j as u16 + 1;
            while k > 0 {
                rotate_right(&mut edges, 0, j);
                k -= 1;
            }
        }
        self.ep[..8].copy_from_slice(&edges);
    }

    /// Get the permutation of the E-slice edges inside their slice.
    ///
    /// Defined only when the E-slice edges are home (phase 2); 0 <= slice_perm < 24.
    pub fn get_slice_perm(&self) -> u16 {
        let mut perm = [0u8; 4];
        for i in 0..4 {
            perm[i] = self.ep[8 + i] as u8 - 8;
        }
        let mut b = 0;
        for j in (1..4).rev() {
            let mut k = 0;
            while perm[j] as usize != j {
                rotate_left(&mut perm, 0, j);
                k += 1;
            }
            b = (j as u16 + 1) * b + k;
        }
        b
    }

    /// Set the permutation of the E-slice edges inside their slice.
    ///
    /// 0 <= slice_perm < 24, slice_perm = 0 for solved cube.
    pub fn set_slice_perm(&mut self, idx: u16) {
        let mut edges = [FR, FL, BL, BR];
        let mut idx = idx;
        for j in 0..4 {
            let mut k = idx % (j as u16 + 1);
            idx /= j as u16 + 1;
            while k > 0 {
                rotate_right(&mut edges, 0, j);
                k -= 1;
            }
        }
        self.ep[8..].copy_from_slice(&edges);
    }

    /// Give the parity of the corner permutation.
    pub fn corner_parity(&self) -> bool {
        let mut s = 0;
        for i in ((URF as usize + 1)..=(DRB as usize)).rev() {
            for j in ((URF as usize)..=(i - 1)).rev() {
                if self.cp[j] > self.cp[i] {
                    s += 1
                }
            }
        }
        (s % 2) == 0
    }

    /// Give the parity of the edge permutation. A solvable cube has the same corner and edge parity.
    pub fn edge_parity(&self) -> bool {
        let mut s = 0;
        for i in ((UR as usize + 1)..=(BR as usize)).rev() {
            for j in ((UR as usize)..=(i - 1)).rev() {
                if self.ep[j] > self.ep[i] {
                    s += 1;
                }
            }
        }
        (s % 2) == 0
    }

    /// Check if this cubie cube is the solved cube.
    pub fn is_solved(&self) -> bool {
        *self == SOLVED_CUBIE_CUBE
    }

    /// Checks if CubieCube is a valid cubie representation.
    pub fn is_solvable(&self) -> bool {
        self.verify().is_ok()
    }

    /// Check if cubiecube is valid, naming the violated invariant.
    pub fn verify(&self) -> Result<(), Error> {
        let mut edge_count = [0; 12];
        for i in 0..12 {
            edge_count[self.ep[i] as usize] += 1;
        }
        if edge_count.iter().any(|&c| c != 1) {
            return Err(Error::InvalidEdge);
        }
        if self.eo.iter().map(|&o| o as u32).sum::<u32>() % 2 != 0 {
            return Err(Error::FlipError);
        }

        let mut corner_count = [0; 8];
        for i in 0..8 {
            corner_count[self.cp[i] as usize] += 1;
        }
        if corner_count.iter().any(|&c| c != 1) {
            return Err(Error::InvalidCorner);
        }
        if self.co.iter().map(|&o| o as u32).sum::<u32>() % 3 != 0 {
            return Err(Error::TwistError);
        }

        if self.edge_parity() != self.corner_parity() {
            return Err(Error::ParityError);
        }
        Ok(())
    }
}

/// Rotate array arr right between left and right. right is included.
pub fn rotate_right<T: Copy>(arr: &mut [T], left: usize, right: usize) {
    let temp = arr[right];
    for i in (left + 1..=right).rev() {
        arr[i] = arr[i - 1];
    }
    arr[left] = temp;
}

/// Rotate array arr left between left and right. right is included.
pub fn rotate_left<T: Copy>(arr: &mut [T], left: usize, right: usize) {
    let temp = arr[left];
    for i in left..right {
        arr[i] = arr[i + 1];
    }
    arr[right] = temp;
}

/// Binomial coefficient [n choose k].
pub fn c_nk(n: u32, k: u32) -> u32 {
    let mut k = k;
    if n < k {
        return 0;
    }
    if k > (n / 2) {
        k = n - k;
    }
    let mut s = 1;
    let mut i = n;
    let mut j = 1;
    while i != n - k {
        s *= i;
        s /= j;
        i -= 1;
        j += 1;
    }
    s
}
