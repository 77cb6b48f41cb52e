use anyhow::{Context, Result};
use cozy_chess::{Board, Move};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    board.generate_moves(|ml| { moves.extend(ml); false });
    moves
}

/// Random-walk positions from the start position, reproducible per `seed`.
///
/// Each walk plays up to `max_plies` uniformly chosen legal moves and stops
/// early at mate or stalemate.
pub fn random_positions(count: usize, max_plies: usize, seed: u64) -> Vec<Board> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let mut board = Board::default();
        let plies = if max_plies == 0 { 0 } else { rng.gen_range(0..=max_plies) };
        for _ in 0..plies {
            let moves = legal_moves(&board);
            if moves.is_empty() { break; }
            board.play(moves[rng.gen_range(0..moves.len())]);
        }
        out.push(board);
    }
    out
}

/// One FEN per line; blank lines and `#` comments are skipped.
pub fn read_fen_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open positions file: {}", path.display()))?;
    let mut out = Vec::new();
    for (n, line) in BufReader::new(f).lines().enumerate() {
        let line = line.with_context(|| format!("read {} line {}", path.display(), n + 1))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        out.push(line.to_string());
    }
    Ok(out)
}
