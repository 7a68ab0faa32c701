//! Plain-text rendering of a plan.

use coach_core::{format_timestamp, Notice, Placement, Plan, ScoredTask};

pub fn render_ranked(ranked: &[ScoredTask], with_scores: bool) -> String {
    let mut s = String::from("Prioritized Tasks:\n");
    for (i, st) in ranked.iter().enumerate() {
        if with_scores {
            s.push_str(&format!(
                "{}. {} [score={:.1}, urgency={:.1}]\n",
                i + 1,
                st.task,
                st.score,
                st.urgency
            ));
        } else {
            s.push_str(&format!("{}. {}\n", i + 1, st.task));
        }
    }
    s
}

/// One line per placement. Evening plans can overlap an earlier slot;
/// such lines name the slot they collide with.
pub fn render_schedule(placements: &[Placement]) -> String {
    let mut s = String::from("Suggested Schedule:\n");
    if placements.is_empty() {
        s.push_str("(nothing could be scheduled)\n");
    }
    for (i, p) in placements.iter().enumerate() {
        s.push_str(&format!(
            "{}: {} - {}",
            p.task.name(),
            format_timestamp(p.start),
            format_timestamp(p.end)
        ));
        if let Some(earlier) = placements[..i].iter().find(|q| q.overlaps(p)) {
            s.push_str(&format!(" (overlaps '{}')", earlier.task.name()));
        }
        s.push('\n');
    }
    s
}

pub fn render_notices(notices: &[Notice]) -> String {
    let mut s = String::new();
    for n in notices {
        s.push_str(&format!("Warning: {n}\n"));
    }
    s
}

pub fn render_plan(plan: &Plan) -> String {
    let mut s = String::new();
    let warnings = render_notices(&plan.outcome.notices);
    if !warnings.is_empty() {
        s.push_str(&warnings);
        s.push('\n');
    }
    s.push_str(&render_ranked(&plan.ranked, false));
    s.push('\n');
    s.push_str(&render_schedule(&plan.outcome.placements));
    s
}
