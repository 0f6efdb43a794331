/// Line-number labels for the gutter panel, rebuilt from scratch on every
/// document change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineGutter {
    labels: Vec<String>,
}

impl LineGutter {
    pub fn render(&mut self, line_count: usize) {
        self.labels.clear();
        self.labels.extend((1..=line_count).map(|n| n.to_string()));
    }

    #[cfg(test)]
    pub(crate) fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The panel contents as text: each label followed by a line separator.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for label in &self.labels {
            out.push_str(label);
            out.push('\n');
        }
        out
    }

    /// Width in columns of the widest label.
    pub(crate) fn width(&self) -> usize {
        self.labels.last().map(|l| l.len()).unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sequential_labels() {
        let mut gutter = LineGutter::default();
        gutter.render(3);
        assert_eq!(gutter.labels(), ["1", "2", "3"]);
        assert_eq!(gutter.text(), "1\n2\n3\n");
    }

    #[test]
    fn rerender_replaces_previous_labels() {
        let mut gutter = LineGutter::default();
        gutter.render(12);
        gutter.render(2);
        assert_eq!(gutter.labels(), ["1", "2"]);
        let before = gutter.clone();
        gutter.render(2);
        assert_eq!(gutter, before);
    }

    #[test]
    fn empty_document_has_empty_gutter() {
        let mut gutter = LineGutter::default();
        gutter.render(0);
        assert!(gutter.labels().is_empty());
        assert_eq!(gutter.text(), "");
        assert_eq!(gutter.width(), 1);
    }

    #[test]
    fn width_tracks_widest_label() {
        let mut gutter = LineGutter::default();
        gutter.render(100);
        assert_eq!(gutter.width(), 3);
        assert_eq!(gutter.labels().last().map(String::as_str), Some("100"));
    }
}
