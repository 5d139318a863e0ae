//! Peephole rewrite of transfer loops.
//!
//! A loop of the shape
//!
//! ```text
//! while B not 0 do;
//!     incr A;
//!     decr B;
//! end;
//! ```
//!
//! (the two body statements in either order, `A` distinct from `B`) moves
//! the value of `B` onto `A`. It is replaced by a single
//! [`StatementKind::AddClear`] that does the same in one step. Loops that
//! do not match are left in place and their bodies are searched instead.

use crate::language::ast::{Program, Statement, StatementKind};
use crate::runtime::environment::VarId;

/// What a single optimizer pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OptimizeStats {
    /// Loops inspected, including loops nested in bodies that were kept.
    pub loops_visited: usize,
    /// Loops rewritten into `AddClear`.
    pub transfers: usize,
}

/// Runs one top-to-bottom pass over the program. Not iterated to a fixed
/// point.
pub fn optimize(program: &mut Program) -> OptimizeStats {
    let mut stats = OptimizeStats::default();
    optimize_block(&mut program.statements, &mut stats);
    tracing::debug!(
        loops = stats.loops_visited,
        transfers = stats.transfers,
        "optimizer pass finished"
    );
    stats
}

pub fn optimize_block(block: &mut [Statement], stats: &mut OptimizeStats) {
    for statement in block.iter_mut() {
        let StatementKind::While { control, body } = &mut statement.kind else {
            continue;
        };
        stats.loops_visited += 1;
        match match_transfer(*control, body) {
            Some((src, dest)) => {
                tracing::debug!(line = statement.line, "rewrote transfer loop");
                statement.kind = StatementKind::AddClear { src, dest };
                stats.transfers += 1;
            }
            None => optimize_block(body, stats),
        }
    }
}

/// Returns `(src, dest)` when `body` is exactly `incr dest; decr control;`
/// in either order with `dest != control`.
fn match_transfer(control: VarId, body: &[Statement]) -> Option<(VarId, VarId)> {
    let [first, second] = body else {
        return None;
    };
    match (&first.kind, &second.kind) {
        (StatementKind::Incr(dest), StatementKind::Decr(src))
        | (StatementKind::Decr(src), StatementKind::Incr(dest))
            if *src == control && *dest != control =>
        {
            Some((*src, *dest))
        }
        _ => None,
    }
}
