use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

#[derive(Debug, Clone)]
pub struct CommandHeader {
    icon: Icon,
    title: String,
    items: Vec<(String, String)>,
}

impl CommandHeader {
    pub fn new(icon: Icon, title: impl Into<String>) -> Self {
        Self {
            icon,
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.items.push((label.into(), value.into()));
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut out = String::new();
        let title = ColoredText::info(self.title.as_str())
            .bold()
            .render(supports_color);
        out.push_str(&format!(
            "{} {}\n",
            self.icon.colored(supports_color, supports_unicode),
            title
        ));
        let width = self.items.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (label, value) in &self.items {
            let label = format!("{:width$}", label, width = width);
            out.push_str(&format!(
                "  {}  {}\n",
                ColoredText::dim(label).render(supports_color),
                value
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_ascii_icon_when_unicode_unsupported() {
        let mut header = CommandHeader::new(Icon::Deploy, "riepete deploy");
        header.add("Target", "riepete:/opt/riepete");

        let rendered = header.render(false, false);
        assert!(rendered.starts_with("[DEPLOY] riepete deploy\n"));
        assert!(rendered.contains("  Target  riepete:/opt/riepete\n"));
    }

    #[test]
    fn labels_are_aligned() {
        let mut header = CommandHeader::new(Icon::Plan, "plan");
        header.add("Source", "dist");
        header.add("Target", "/srv");
        header.add("Via", "local");

        let rendered = header.render(false, true);
        assert!(rendered.contains("  Via     local\n"));
    }
}
