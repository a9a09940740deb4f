//! Perft: exhaustive legal-move tree counting, the standard correctness
//! benchmark for the generator/executor pair.

use crate::board::Position;
use crate::moves::execute::{generate_legal, make_move, undo_move};
use crate::moves::tables::AttackTables;
use crate::moves::types::{Move, MoveList};
use tracing::{debug, instrument};

const MAX_PERFT_PLY: usize = 24;

fn perft_recursive(
    pos: &mut Position,
    tables: &AttackTables,
    depth: u32,
    ply: usize,
    buffers: &mut [MoveList],
) -> u64 {
    if depth == 0 {
        return 1;
    }

    {
        let buffer = &mut buffers[ply];
        buffer.clear();
        generate_legal(pos, tables, buffer);
    }
    if depth == 1 {
        return buffers[ply].len() as u64;
    }

    let count = buffers[ply].len();
    let mut nodes = 0u64;
    for i in 0..count {
        let mv = buffers[ply][i];
        let undo = make_move(pos, mv).expect("legal move applies");
        nodes += perft_recursive(pos, tables, depth - 1, ply + 1, buffers);
        undo_move(pos, undo);
    }
    nodes
}

/// Number of legal move sequences of length `depth` from `pos`.
#[instrument(skip(pos, tables))]
pub fn perft(pos: &mut Position, tables: &AttackTables, depth: u32) -> u64 {
    assert!((depth as usize) < MAX_PERFT_PLY);
    let mut buffers: Vec<MoveList> = (0..MAX_PERFT_PLY).map(|_| MoveList::new()).collect();
    perft_recursive(pos, tables, depth, 0, &mut buffers)
}

/// Per-root-move subtree counts, with the total. The workhorse for
/// localizing a generator bug to one root move.
pub fn perft_divide(
    pos: &mut Position,
    tables: &AttackTables,
    depth: u32,
) -> (Vec<(Move, u64)>, u64) {
    assert!(depth >= 1);
    let mut roots = MoveList::new();
    generate_legal(pos, tables, &mut roots);

    let mut buffers: Vec<MoveList> = (0..MAX_PERFT_PLY).map(|_| MoveList::new()).collect();
    let mut rows = Vec::with_capacity(roots.len());
    let mut total = 0u64;

    for &mv in roots.iter() {
        let undo = make_move(pos, mv).expect("legal move applies");
        let nodes = perft_recursive(pos, tables, depth - 1, 1, &mut buffers);
        undo_move(pos, undo);
        debug!(mv = %mv, nodes, "divide");
        rows.push((mv, nodes));
        total += nodes;
    }

    (rows, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::tables::attack_tables;

    #[test]
    fn shallow_startpos_counts() {
        let mut pos = Position::new_initial();
        let t = attack_tables();
        assert_eq!(perft(&mut pos, t, 0), 1);
        assert_eq!(perft(&mut pos, t, 1), 20);
        assert_eq!(perft(&mut pos, t, 2), 400);
    }

    #[test]
    fn divide_total_matches_perft() {
        let mut pos = Position::new_initial();
        let t = attack_tables();
        let (rows, total) = perft_divide(&mut pos, t, 2);
        assert_eq!(rows.len(), 20);
        assert_eq!(total, 400);
    }

    #[test]
    fn perft_leaves_position_untouched() {
        let mut pos = Position::new_initial();
        let before = pos.clone();
        let _ = perft(&mut pos, attack_tables(), 3);
        assert_eq!(pos, before);
    }
}
