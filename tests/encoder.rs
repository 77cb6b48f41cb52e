use trivialnet::encoder::{encode_fen, encode_position, EncodeError};
use trivialnet::eval::evaluate;
use trivialnet::planes::{AUX_PLANE_BASE, INPUT_PLANES};
use trivialnet::positions::{random_positions, read_fen_lines};
use trivialnet::InputFormat;

#[test]
fn random_positions_encode_consistently() {
    for board in random_positions(32, 80, 99) {
        let planes = encode_position(&board, InputFormat::Classical112).unwrap();
        assert_eq!(planes.len(), INPUT_PLANES);
        // Exactly one king per side.
        assert_eq!(planes[5].mask.count_ones(), 1);
        assert_eq!(planes[11].mask.count_ones(), 1);
        // No square is claimed by two piece planes.
        let mut seen = 0u64;
        for p in &planes[..12] {
            assert_eq!(seen & p.mask, 0);
            seen |= p.mask;
        }
        assert_eq!(planes[AUX_PLANE_BASE + 7].mask, u64::MAX);
    }
}

#[test]
fn colour_flipped_fens_encode_identically() {
    // Same position with colours swapped and the board flipped.
    let white = encode_fen("4k3/8/8/8/8/2N5/PP6/4K3 w - - 0 1", InputFormat::Classical112).unwrap();
    let black = encode_fen("4k3/pp6/2n5/8/8/8/8/4K3 b - - 0 1", InputFormat::Classical112).unwrap();
    for i in 0..12 {
        assert_eq!(white[i].mask, black[i].mask, "plane {i}");
    }
    assert_eq!(evaluate(&white), evaluate(&black));
}

#[test]
fn canonical_formats_are_rejected() {
    let err = encode_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1", InputFormat::WithCanonicalizationV2).unwrap_err();
    assert!(matches!(err, EncodeError::UnsupportedFormat(InputFormat::WithCanonicalizationV2)));
}

#[test]
fn fen_file_skips_comments_and_blanks() {
    std::fs::create_dir_all("target").unwrap();
    let path = "target/fens_sample.txt";
    std::fs::write(path, "# sample\n\nrnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n  4k3/8/8/8/8/8/8/4K3 w - - 0 1  \n")
        .unwrap();
    let fens = read_fen_lines(path).unwrap();
    assert_eq!(fens.len(), 2);
    assert_eq!(fens[1], "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    for fen in &fens {
        assert!(encode_fen(fen, InputFormat::Classical112).is_ok());
    }
}
