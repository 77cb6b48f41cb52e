//! Hand-tuned piece-square evaluation standing in for a value head.
//!
//! Own planes are scored as stored; opponent planes are flipped vertically
//! first so both sides read the same tables from their own back rank.

pub mod policy;
pub mod tables;

use crate::bits::{iterate_bits, num_bits, reverse_bytes_in_bytes};
use crate::planes::{InputPlane, PieceKind, PIECE_PLANES};
use tables::{BISHOPS, KINGS, KINGS_ENDGAME, KNIGHTS, PAWNS, QUEENS, ROOKS};

/// Slope of the logistic squash applied to the raw score.
pub const LOGISTIC_SLOPE: f32 = 10.0;

/// Largest magnitude `evaluate` returns; keeps results inside (-1, 1).
pub const VALUE_BOUND: f32 = 1.0 - f32::EPSILON / 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Middlegame,
    Endgame,
}

impl GamePhase {
    pub fn king_table(self) -> &'static [f32; 64] {
        match self {
            GamePhase::Middlegame => &KINGS,
            GamePhase::Endgame => &KINGS_ENDGAME,
        }
    }
}

/// Weight table for a piece kind; the king table depends on the phase.
pub fn table_for(kind: PieceKind, phase: GamePhase) -> &'static [f32; 64] {
    match kind {
        PieceKind::Pawn => &PAWNS,
        PieceKind::Knight => &KNIGHTS,
        PieceKind::Bishop => &BISHOPS,
        PieceKind::Rook => &ROOKS,
        PieceKind::Queen => &QUEENS,
        PieceKind::King => phase.king_table(),
    }
}

#[inline]
pub fn dot_product(plane: u64, weights: &[f32; 64]) -> f32 {
    let mut result = 0.0f32;
    for idx in iterate_bits(plane) { result += weights[idx]; }
    result
}

/// True when the side whose planes start at `base` has no queen, or has no
/// rook and at most one minor piece.
fn side_in_endgame(planes: &[InputPlane], base: usize) -> bool {
    let mask = |kind: PieceKind| planes[base + kind as usize].mask;
    mask(PieceKind::Queen) == 0
        || (mask(PieceKind::Rook) == 0 && num_bits(mask(PieceKind::Knight) | mask(PieceKind::Bishop)) <= 1)
}

/// Endgame only when both sides qualify; one choice covers both king terms.
pub fn game_phase(planes: &[InputPlane]) -> GamePhase {
    let own = PieceKind::Pawn.own_plane();
    let opp = PieceKind::Pawn.opponent_plane();
    if side_in_endgame(planes, own) && side_in_endgame(planes, opp) {
        GamePhase::Endgame
    } else {
        GamePhase::Middlegame
    }
}

#[inline]
pub fn is_endgame(planes: &[InputPlane]) -> bool { game_phase(planes) == GamePhase::Endgame }

/// Own minus opponent score of one piece kind, before squashing.
pub fn piece_term(planes: &[InputPlane], kind: PieceKind, phase: GamePhase) -> f32 {
    let weights = table_for(kind, phase);
    let own = dot_product(planes[kind.own_plane()].mask, weights);
    let opp = dot_product(reverse_bytes_in_bytes(planes[kind.opponent_plane()].mask), weights);
    own - opp
}

/// Unsquashed score `q` from the side to move's point of view.
///
/// # Panics
/// If fewer than twelve planes are supplied.
pub fn raw_score(planes: &[InputPlane]) -> f32 {
    assert!(planes.len() >= PIECE_PLANES, "need {PIECE_PLANES} piece planes, got {}", planes.len());
    let phase = game_phase(planes);
    let mut q = 0.0f32;
    for kind in PieceKind::ALL {
        q += piece_term(planes, kind, phase);
    }
    q
}

/// Maps a raw score onto (-1, 1).
#[inline]
pub fn squash(q: f32) -> f32 {
    let v = 2.0 / (1.0 + (q * -LOGISTIC_SLOPE).exp()) - 1.0;
    v.clamp(-VALUE_BOUND, VALUE_BOUND)
}

/// Expected outcome for the side to move, strictly inside (-1, 1).
#[inline]
pub fn evaluate(planes: &[InputPlane]) -> f32 { squash(raw_score(planes)) }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planes::from_piece_masks;

    #[test]
    fn empty_planes_score_zero() {
        assert_eq!(dot_product(0, &QUEENS), 0.0);
        let planes = from_piece_masks([0; 6], [0; 6]);
        assert_eq!(raw_score(&planes), 0.0);
        assert_eq!(evaluate(&planes), 0.0);
    }

    #[test]
    fn squash_saturates_inside_bounds() {
        assert!(squash(50.0) < 1.0);
        assert!(squash(-50.0) > -1.0);
        assert!(squash(0.05) > 0.0);
        assert!((squash(0.3) + squash(-0.3)).abs() < 1e-6);
    }

    #[test]
    fn dot_product_sums_selected_squares() {
        // e2 and d4
        let mask = (1u64 << 12) | (1u64 << 27);
        assert_eq!(dot_product(mask, &PAWNS), PAWNS[12] + PAWNS[27]);
    }
}
