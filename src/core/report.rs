//! Purpose: Render the end-of-run summary and trailing action log.
//! Exports: `ACTION_TAIL`, `render_report`.
//! Role: Pure formatting; the binary owns the actual stdout write.
//! Invariants: At most `ACTION_TAIL` action lines, in original sorted order.

use std::fmt::Write;

use super::stage::StageOutcome;

/// How many trailing action lines the report shows.
pub const ACTION_TAIL: usize = 20;

pub fn render_report(outcome: &StageOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total target images: {}", outcome.total);
    let _ = writeln!(out, "Copied: {}", outcome.copied);
    let _ = writeln!(out, "Used placeholder: {}", outcome.used_placeholder);
    let _ = writeln!(out, "Missing: {}", outcome.missing);

    let skip = outcome.actions.len().saturating_sub(ACTION_TAIL);
    for action in &outcome.actions[skip..] {
        let _ = writeln!(out, "{action}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stage::Action;

    fn outcome_with_actions(actions: Vec<Action>) -> StageOutcome {
        StageOutcome {
            total: actions.len() as u64,
            copied: actions.len() as u64,
            used_placeholder: 0,
            missing: 0,
            actions,
        }
    }

    #[test]
    fn report_lists_counters_then_actions() {
        let outcome = outcome_with_actions(vec![Action::Copied {
            src: "/src/a.webp".into(),
            dst: "/dst/a.webp".into(),
        }]);
        let report = render_report(&outcome);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Total target images: 1",
                "Copied: 1",
                "Used placeholder: 0",
                "Missing: 0",
                "COPIED /src/a.webp -> /dst/a.webp",
            ]
        );
    }

    #[test]
    fn action_tail_is_capped_at_twenty() {
        let actions: Vec<Action> = (0..25)
            .map(|i| Action::Copied {
                src: format!("/src/{i}.webp"),
                dst: format!("/dst/{i}.webp"),
            })
            .collect();
        let report = render_report(&outcome_with_actions(actions));
        let action_lines: Vec<&str> = report
            .lines()
            .filter(|line| line.starts_with("COPIED"))
            .collect();
        assert_eq!(action_lines.len(), ACTION_TAIL);
        assert_eq!(action_lines[0], "COPIED /src/5.webp -> /dst/5.webp");
        assert_eq!(action_lines[19], "COPIED /src/24.webp -> /dst/24.webp");
    }

    #[test]
    fn short_runs_list_every_action() {
        let outcome = outcome_with_actions(vec![]);
        let report = render_report(&outcome);
        assert_eq!(report.lines().count(), 4);
    }
}
