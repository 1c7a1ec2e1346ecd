//! Pulls the shell command out of a model reply.
//!
//! Models are asked to answer with a single fenced code block. The reply is
//! scanned line by line with a two-state toggle: outside a fence, lines are
//! skipped; inside, they are collected. The first closing fence ends the
//! scan.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fence {
    Outside,
    Inside,
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

/// Extract the command from `reply`.
///
/// - Returns the lines of the first fenced block, joined with `\n`.
/// - An unterminated block yields everything after the opening fence.
/// - A reply without any fence is returned trimmed, as-is.
pub fn extract_command(reply: &str) -> String {
    let mut state = Fence::Outside;
    let mut block = Vec::new();

    for line in reply.lines() {
        match (state, is_fence(line)) {
            (Fence::Outside, true) => state = Fence::Inside,
            (Fence::Outside, false) => {}
            (Fence::Inside, true) => return block.join("\n"),
            (Fence::Inside, false) => block.push(line),
        }
    }

    match state {
        Fence::Inside => block.join("\n"),
        Fence::Outside => reply.trim().to_string(),
    }
}
