use crate::bits::reverse_bytes_in_bytes;

/// Planes describing one position in the history stack: 12 piece planes plus repetition.
pub const PLANES_PER_POSITION: usize = 13;
pub const HISTORY_LENGTH: usize = 8;
pub const AUX_PLANE_BASE: usize = PLANES_PER_POSITION * HISTORY_LENGTH;
pub const INPUT_PLANES: usize = AUX_PLANE_BASE + 8;
/// Piece planes: 0..6 for the side to move, 6..12 for the opponent.
pub const PIECE_PLANES: usize = 12;

/// One 8x8 input plane: every set square carries `value`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputPlane {
    pub mask: u64,
    pub value: f32,
}

impl InputPlane {
    pub fn empty() -> Self { Self { mask: 0, value: 1.0 } }
    pub fn from_mask(mask: u64) -> Self { Self { mask, value: 1.0 } }
    pub fn filled(value: f32) -> Self { Self { mask: u64::MAX, value } }
}

impl Default for InputPlane {
    fn default() -> Self { Self::empty() }
}

pub type InputPlanes = Vec<InputPlane>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub fn own_plane(self) -> usize { self as usize }

    #[inline]
    pub fn opponent_plane(self) -> usize { 6 + self as usize }
}

/// Color-mirrors the piece planes: sides swap and each plane is flipped
/// vertically. Planes past the first twelve are copied unchanged.
pub fn mirror_position(planes: &[InputPlane]) -> InputPlanes {
    let mut out = planes.to_vec();
    for kind in PieceKind::ALL {
        let own = planes[kind.own_plane()];
        let opp = planes[kind.opponent_plane()];
        out[kind.own_plane()] = InputPlane { mask: reverse_bytes_in_bytes(opp.mask), value: opp.value };
        out[kind.opponent_plane()] = InputPlane { mask: reverse_bytes_in_bytes(own.mask), value: own.value };
    }
    out
}

/// Builds a bare 12-plane position from (own, opponent) masks per piece kind.
pub fn from_piece_masks(own: [u64; 6], opponent: [u64; 6]) -> InputPlanes {
    own.iter().chain(opponent.iter()).map(|&m| InputPlane::from_mask(m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_constants() {
        assert_eq!(AUX_PLANE_BASE, 104);
        assert_eq!(INPUT_PLANES, 112);
        assert_eq!(PieceKind::Queen.own_plane(), 4);
        assert_eq!(PieceKind::King.opponent_plane(), 11);
    }

    #[test]
    fn mirror_is_an_involution() {
        let mut planes = from_piece_masks(
            [0xFF00, 0x42, 0x24, 0x81, 0x08, 0x10],
            [0x00FF << 48, 0x42 << 56, 0x24 << 56, 0x81 << 56, 0x08 << 56, 0x10 << 56],
        );
        planes.push(InputPlane::filled(3.0));
        let once = mirror_position(&planes);
        assert_eq!(once[0].mask, 0xFF00);
        assert_eq!(once[12], planes[12]);
        assert_eq!(mirror_position(&once), planes);
    }
}
