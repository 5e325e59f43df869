use std::path::{Path, PathBuf};

use riepete_deploy::domain::entities::SyncReport;
use riepete_deploy::DeployTarget;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Render a sync preview: one line per change, then a count.
pub fn render_plan(
    source: &Path,
    target: &DeployTarget,
    report: &SyncReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Plan, "riepete plan");
    header.add("Source", source.display().to_string());
    header.add("Target", target.to_string());
    let mut out = header.render(supports_color, supports_unicode);
    out.push('\n');

    if report.is_noop() {
        out.push_str(&format!(
            "{} target is up to date ({} unchanged)\n",
            Icon::Success.colored(supports_color, supports_unicode),
            report.unchanged
        ));
        return out;
    }

    let lines = |out: &mut String, paths: &[PathBuf], mark: ColoredText| {
        let mark = mark.render(supports_color);
        for path in paths {
            out.push_str(&format!("  {} {}\n", mark, path.display()));
        }
    };
    lines(&mut out, &report.created, ColoredText::success("+"));
    lines(&mut out, &report.updated, ColoredText::warning("~"));
    lines(&mut out, &report.deleted, ColoredText::error("-"));

    out.push_str(&format!(
        "\n{} created, {} updated, {} deleted, {} unchanged\n",
        report.created.len(),
        report.updated.len(),
        report.deleted.len(),
        report.unchanged
    ));
    out
}
