//! Text presenter for a classification result: the audit trail, the
//! per-category score bars and the final summary line. Pure string
//! building so callers decide where it goes.

use crate::classifier::{ClassificationResult, Vote};

const BAR_WIDTH: usize = 28;
// Non-zero scores always get a visible sliver, as the original page's
// score board does.
const MIN_VISIBLE_BAR: usize = 2;

fn vote_line(vote: &Vote) -> String {
    let mark = if vote.triggered { "[x]" } else { "[ ]" };
    let targets = vote
        .targets
        .iter()
        .map(|category| category.pretty())
        .collect::<Vec<_>>()
        .join(", ");
    let mut line = format!("  {mark} {}", vote.rule);
    if vote.weight > 0 {
        let sign = if vote.triggered { "+" } else { "" };
        line.push_str(&format!(" ({sign}{}: {targets})", vote.weight));
    }
    if !vote.detail.is_empty() {
        line.push_str(&format!("\n      {}", vote.detail));
    }
    line
}

fn score_bar(score: u32, top_score: u32) -> String {
    let filled = if score == 0 || top_score == 0 {
        0
    } else {
        let scaled = (score as f64 / top_score as f64 * BAR_WIDTH as f64).round() as usize;
        scaled.clamp(MIN_VISIBLE_BAR, BAR_WIDTH)
    };
    let mut bar = String::with_capacity(BAR_WIDTH);
    bar.push_str(&"#".repeat(filled));
    bar.push_str(&" ".repeat(BAR_WIDTH - filled));
    bar
}

/// Render the full report: every vote, the tie-break entry when one was
/// needed, the normalized score board and the summary.
pub fn render_report(result: &ClassificationResult) -> String {
    let mut out = String::from("Signals\n");
    for vote in &result.votes {
        out.push_str(&vote_line(vote));
        out.push('\n');
    }

    if let Some(tie) = &result.tie_break {
        let candidates = tie
            .candidates
            .iter()
            .map(|category| category.pretty())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str("\nTie-break\n");
        out.push_str(&format!("  candidates: {candidates}\n"));
        match tie.winner {
            Some(winner) => {
                out.push_str(&format!("  winner: {} ({})\n", winner.pretty(), tie.reason))
            }
            None => out.push_str(&format!("  unresolved ({})\n", tie.reason)),
        }
    }

    out.push_str("\nScores\n");
    for (category, score) in result.scores.ranked() {
        out.push_str(&format!(
            "  {:<7} |{}| {:>3}\n",
            category.pretty(),
            score_bar(score, result.top_score),
            score
        ));
    }

    out.push_str(&format!(
        "\nDetected: {} (score {}, {}% confidence)\n",
        result.top_category.pretty(),
        result.top_score,
        result.confidence
    ));
    out
}
