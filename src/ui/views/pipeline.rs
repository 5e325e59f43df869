use std::time::Duration;

use riepete_deploy::domain::entities::SyncReport;
use riepete_deploy::{DeployTarget, StepKind, Task};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_task_header(
    task: Task,
    target: &DeployTarget,
    transfer: &str,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let icon = if target.is_remote() {
        Icon::Remote
    } else {
        Icon::Deploy
    };
    let mut header = CommandHeader::new(icon, format!("riepete {}", task));
    header.add("Target", target.to_string());
    if matches!(task, Task::Deploy | Task::Step(StepKind::Sync)) {
        header.add("Transfer", transfer);
    }
    if dry_run {
        header.add("Mode", "dry run (commands are printed, not executed)");
    }
    header.render(supports_color, supports_unicode)
}

pub fn render_step_started(kind: StepKind, supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "{} {}",
        Icon::Progress.colored(supports_color, supports_unicode),
        ColoredText::plain(kind.as_str()).bold().render(supports_color)
    )
}

pub fn render_step_succeeded(
    kind: StepKind,
    elapsed: Duration,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "{} {} {}",
        Icon::Success.colored(supports_color, supports_unicode),
        kind,
        ColoredText::dim(format!("({})", format_elapsed(elapsed))).render(supports_color)
    )
}

pub fn render_step_skipped(
    kind: StepKind,
    reason: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "{} {} {}",
        Icon::Skipped.colored(supports_color, supports_unicode),
        kind,
        ColoredText::dim(format!("skipped: {}", reason)).render(supports_color)
    )
}

/// The error itself is printed once, by the top-level error handler.
pub fn render_step_failed(kind: StepKind, supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "{} {}",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(kind.as_str()).bold().render(supports_color)
    )
}

pub fn render_sync_summary(report: &SyncReport, supports_color: bool, supports_unicode: bool) -> String {
    let verb = if report.dry_run { "would change" } else { "changed" };
    let text = format!(
        "{} {} ({} created, {} updated, {} deleted, {} unchanged)",
        verb,
        plural(report.change_count(), "path"),
        report.created.len(),
        report.updated.len(),
        report.deleted.len(),
        report.unchanged
    );
    format!(
        "  {} {}",
        Icon::Arrow.colored(supports_color, supports_unicode),
        ColoredText::dim(text).render(supports_color)
    )
}

pub fn render_completed(
    task: Task,
    success: bool,
    elapsed: Duration,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    if success {
        format!(
            "{} {} finished in {}",
            Icon::Success.colored(supports_color, supports_unicode),
            ColoredText::success(task.as_str()).bold().render(supports_color),
            format_elapsed(elapsed)
        )
    } else {
        format!(
            "{} {} failed after {}",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error(task.as_str()).bold().render(supports_color),
            format_elapsed(elapsed)
        )
    }
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", elapsed.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{}m{:02}s", elapsed.as_secs() / 60, elapsed.as_secs() % 60)
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
