use cozy_chess::{Board, Color, File, Piece};
use thiserror::Error;

use crate::bits::reverse_bytes_in_bytes;
use crate::network::InputFormat;
use crate::planes::{InputPlane, InputPlanes, AUX_PLANE_BASE, INPUT_PLANES};

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },
    #[error("input format {0:?} is not supported by the encoder")]
    UnsupportedFormat(InputFormat),
}

const PIECE_ORDER: [Piece; 6] = [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King];

const RANK_8_SHIFT: usize = 56;

#[inline]
fn orient(mask: u64, flip: bool) -> u64 {
    if flip { reverse_bytes_in_bytes(mask) } else { mask }
}

fn opponent(color: Color) -> Color {
    match color {
        Color::White => Color::Black,
        Color::Black => Color::White,
    }
}

#[inline]
fn file_bit(file: File, rank_shift: usize) -> u64 { 1u64 << (rank_shift + file as usize) }

/// Encodes `board` into 112 planes from the side to move's point of view.
///
/// Only the current position is written; the seven history slots stay
/// empty. When black is to move every mask is flipped vertically so the
/// mover always plays up the board.
pub fn encode_position(board: &Board, format: InputFormat) -> Result<InputPlanes, EncodeError> {
    if !matches!(format, InputFormat::Classical112 | InputFormat::Classical112WithCastlingPlane) {
        return Err(EncodeError::UnsupportedFormat(format));
    }
    let us = board.side_to_move();
    let them = opponent(us);
    let flip = us == Color::Black;

    let mut planes = vec![InputPlane::empty(); INPUT_PLANES];
    for (i, &piece) in PIECE_ORDER.iter().enumerate() {
        planes[i] = InputPlane::from_mask(orient(board.colored_pieces(us, piece).0, flip));
        planes[6 + i] = InputPlane::from_mask(orient(board.colored_pieces(them, piece).0, flip));
    }
    // Plane 12 (repetitions) stays empty: a single position never repeats.

    let ours = board.castle_rights(us);
    let theirs = board.castle_rights(them);
    let aux = AUX_PLANE_BASE;
    if format == InputFormat::Classical112WithCastlingPlane {
        planes[aux].mask = ours.long.map_or(0, |f| file_bit(f, 0)) | theirs.long.map_or(0, |f| file_bit(f, RANK_8_SHIFT));
        planes[aux + 1].mask =
            ours.short.map_or(0, |f| file_bit(f, 0)) | theirs.short.map_or(0, |f| file_bit(f, RANK_8_SHIFT));
    } else {
        let flags = [ours.long, ours.short, theirs.long, theirs.short];
        for (i, right) in flags.iter().enumerate() {
            if right.is_some() { planes[aux + i] = InputPlane::filled(1.0); }
        }
    }
    if flip { planes[aux + 4] = InputPlane::filled(1.0); }
    planes[aux + 5] = InputPlane::filled(board.halfmove_clock() as f32);
    planes[aux + 7] = InputPlane::filled(1.0);
    Ok(planes)
}

pub fn parse_fen(fen: &str) -> Result<Board, EncodeError> {
    Board::from_fen(fen.trim(), false)
        .map_err(|e| EncodeError::InvalidFen { fen: fen.to_string(), reason: format!("{e:?}") })
}

pub fn encode_fen(fen: &str, format: InputFormat) -> Result<InputPlanes, EncodeError> {
    encode_position(&parse_fen(fen)?, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_piece_planes() {
        let planes = encode_position(&Board::default(), InputFormat::Classical112).unwrap();
        assert_eq!(planes.len(), INPUT_PLANES);
        assert_eq!(planes[0].mask, 0xFF00);
        assert_eq!(planes[6].mask, 0x00FF_0000_0000_0000);
        assert_eq!(planes[5].mask, 1 << 4);
        assert_eq!(planes[11].mask, 1 << 60);
        assert_eq!(planes[12].mask, 0);
        for i in 0..4 { assert_eq!(planes[AUX_PLANE_BASE + i].mask, u64::MAX); }
        assert_eq!(planes[AUX_PLANE_BASE + 4].mask, 0);
        assert_eq!(planes[AUX_PLANE_BASE + 7].mask, u64::MAX);
    }

    #[test]
    fn black_to_move_is_flipped() {
        let planes = encode_fen(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
            InputFormat::Classical112,
        )
        .unwrap();
        // Black pawns read from black's side sit on rank 2.
        assert_eq!(planes[0].mask, 0xFF00);
        // White pawns: rank 7 minus e7, plus e5.
        assert_eq!(planes[6].mask, (0x00EF_0000_0000_0000) | (1u64 << 36));
        assert_eq!(planes[AUX_PLANE_BASE + 4].mask, u64::MAX);
    }

    #[test]
    fn castling_plane_format_marks_rooks() {
        let planes =
            encode_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 3 10", InputFormat::Classical112WithCastlingPlane).unwrap();
        assert_eq!(planes[AUX_PLANE_BASE].mask, 1u64 << 56);
        assert_eq!(planes[AUX_PLANE_BASE + 1].mask, 1u64 << 7);
        assert_eq!(planes[AUX_PLANE_BASE + 2].mask, 0);
        assert_eq!(planes[AUX_PLANE_BASE + 5].value, 3.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(encode_fen("not a fen", InputFormat::Classical112), Err(EncodeError::InvalidFen { .. })));
        assert!(matches!(
            encode_position(&Board::default(), InputFormat::WithCanonicalization),
            Err(EncodeError::UnsupportedFormat(_))
        ));
    }
}
