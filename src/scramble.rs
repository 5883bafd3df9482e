use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::cubie::{Corner, CubieCube, Edge};
use crate::error::Error;
use crate::moves::Move;
use crate::solver::{self, Solution};

/// Parse a whitespace separated move sequence like `R U R' U'`.
pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace()
        .map(|word| Move::from_str(word.trim()))
        .collect()
}

/// Format a move sequence as a whitespace separated string.
pub fn scramble_to_str(s: &[Move]) -> String {
    let words: Vec<String> = s.iter().map(|m| m.to_string()).collect();
    words.join(" ")
}

/// Draw a uniformly random valid cube.
///
/// Corner and edge permutations are shuffled independently and two edges are
/// swapped when the permutation parities disagree; the last corner twist and
/// edge flip are fixed by the orientation sum invariants.
pub fn random_cubie(rng: &mut impl Rng) -> CubieCube {
    let mut cp: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];
    let mut ep: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
    cp.shuffle(rng);
    ep.shuffle(rng);
    if perm_parity(&cp) != perm_parity(&ep) {
        ep.swap(0, 1);
    }

    let mut co = [0u8; 8];
    let mut twist_sum = 0;
    for o in co.iter_mut().take(7) {
        *o = rng.gen_range(0..3);
        twist_sum += *o;
    }
    co[7] = (3 - twist_sum % 3) % 3;

    let mut eo = [0u8; 12];
    let mut flip_sum = 0;
    for o in eo.iter_mut().take(11) {
        *o = rng.gen_range(0..2);
        flip_sum += *o;
    }
    eo[11] = flip_sum % 2;

    let mut cc = CubieCube::default();
    for i in 0..8 {
        cc.cp[i] = Corner::try_from(cp[i]).unwrap();
    }
    for i in 0..12 {
        cc.ep[i] = Edge::try_from(ep[i]).unwrap();
    }
    cc.co = co;
    cc.eo = eo;
    cc
}

/// Draw the random cube for a seed; the same seed always yields the same cube.
pub fn random_state(seed: u64) -> CubieCube {
    let mut rng = StdRng::seed_from_u64(seed);
    random_cubie(&mut rng)
}

/// Solve a state and return the inverse of the solution, i.e. the move
/// sequence that produces the state from a solved cube.
pub fn scramble_for_state(cc: &CubieCube) -> Result<Vec<Move>, Error> {
    Ok(solver::solve(cc)?.scramble)
}

/// Generate a scramble for a fresh random state.
///
/// Returns the sampled state together with the full solve result; the
/// scramble is `solution.scramble`.
pub fn random_scramble(seed: u64) -> Result<(CubieCube, Solution), Error> {
    let cc = random_state(seed);
    let solution = solver::solve(&cc)?;
    Ok((cc, solution))
}

fn perm_parity(perm: &[u8]) -> bool {
    let mut s = 0;
    for i in 0..perm.len() {
        for j in i + 1..perm.len() {
            if perm[i] > perm[j] {
                s += 1;
            }
        }
    }
    s % 2 == 0
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::moves::Move::*;

    #[test]
    fn test_scramble_from_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B2, R3, U3];
        assert_eq!(scramble_from_str("R U R' U' F L' D' B2 R' U'").unwrap(), m);
    }

    #[test]
    fn test_scramble_from_str_loose_notation() {
        let m = vec![R, U2, F3, B3, L];
        assert_eq!(scramble_from_str("r u2 fp B' l").unwrap(), m);
        assert!(scramble_from_str("R U X'").is_err());
    }

    #[test]
    fn test_scramble_to_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B2, R3, U3];
        assert_eq!(scramble_to_str(&m), "R U R' U' F L' D' B2 R' U'");
    }

    #[test]
    fn test_random_states_are_valid() {
        for seed in 0..1000 {
            let cc = random_state(seed);
            assert!(cc.verify().is_ok(), "seed {} produced an invalid cube", seed);
        }
    }

    #[test]
    fn test_random_state_is_deterministic() {
        assert_eq!(random_state(12345), random_state(12345));
        assert_ne!(random_state(12345), random_state(12346));
    }

    #[test]
    fn test_random_scramble_roundtrip() {
        let (cc, solution) = random_scramble(2024).unwrap();
        let rebuilt = CubieCube::default().apply_moves(&solution.scramble);
        assert_eq!(rebuilt, cc);
    }
}
