/// DOM changes the reply-panel controller asks the glue layer to apply.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PanelChange {
    /// Hide the panel for this comment and mark its toggle not-expanded.
    Close(String),
    /// Show the panel for this comment and mark its toggle expanded.
    Open(String),
    /// Focus the panel's text field (after layout has settled).
    FocusInput(String),
    /// Return focus to the toggle that opened the panel.
    FocusToggle(String),
}

/// Tracks which reply panel is open; at most one at a time.
#[derive(Debug, Default)]
pub struct ReplyPanels {
    open: Option<String>,
}

impl ReplyPanels {
    pub fn new() -> ReplyPanels {
        ReplyPanels::default()
    }

    pub fn open_panel(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// Open the panel for `comment_id`, closing any other open panel
    /// first.
    pub fn open(&mut self, comment_id: &str) -> Vec<PanelChange> {
        let mut changes = Vec::new();
        if let Some(prev) = self.open.take() {
            if prev != comment_id {
                changes.push(PanelChange::Close(prev));
            }
        }
        changes.push(PanelChange::Open(comment_id.to_string()));
        changes.push(PanelChange::FocusInput(comment_id.to_string()));
        self.open = Some(comment_id.to_string());
        changes
    }

    /// Close the panel for `comment_id` and hand focus back to its
    /// toggle. Closing an already-closed panel still emits the hide so
    /// the DOM converges even if it was left visible by markup.
    pub fn close(&mut self, comment_id: &str) -> Vec<PanelChange> {
        if self.open.as_deref() == Some(comment_id) {
            self.open = None;
        }
        vec![
            PanelChange::Close(comment_id.to_string()),
            PanelChange::FocusToggle(comment_id.to_string()),
        ]
    }

    /// Toggle the panel for `comment_id`: close it if it is the open one,
    /// open it otherwise.
    pub fn toggle(&mut self, comment_id: &str) -> Vec<PanelChange> {
        if self.open.as_deref() == Some(comment_id) {
            self.open = None;
            vec![PanelChange::Close(comment_id.to_string())]
        } else {
            self.open(comment_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_a_second_panel_closes_the_first() {
        let mut panels = ReplyPanels::new();
        assert_eq!(
            panels.open("1"),
            vec![
                PanelChange::Open("1".to_string()),
                PanelChange::FocusInput("1".to_string()),
            ],
        );
        assert_eq!(
            panels.open("2"),
            vec![
                PanelChange::Close("1".to_string()),
                PanelChange::Open("2".to_string()),
                PanelChange::FocusInput("2".to_string()),
            ],
        );
        assert_eq!(panels.open_panel(), Some("2"));
    }

    #[test]
    fn at_most_one_panel_open_after_any_sequence() {
        let mut panels = ReplyPanels::new();
        for id in ["1", "2", "3", "2", "1", "1", "3"] {
            let changes = panels.toggle(id);
            let opens = changes
                .iter()
                .filter(|c| matches!(c, PanelChange::Open(_)))
                .count();
            assert!(opens <= 1);
        }
        // every toggle left either zero or one panel open
        assert!(panels.open_panel().is_none() || panels.open_panel() == Some("3"));
    }

    #[test]
    fn toggling_the_open_panel_closes_it_without_focus_move() {
        let mut panels = ReplyPanels::new();
        panels.toggle("5");
        assert_eq!(panels.toggle("5"), vec![PanelChange::Close("5".to_string())]);
        assert_eq!(panels.open_panel(), None);
    }

    #[test]
    fn cancel_returns_focus_to_the_toggle() {
        let mut panels = ReplyPanels::new();
        panels.open("5");
        assert_eq!(
            panels.close("5"),
            vec![
                PanelChange::Close("5".to_string()),
                PanelChange::FocusToggle("5".to_string()),
            ],
        );
        assert_eq!(panels.open_panel(), None);
        // closing a panel that is not open leaves the open one alone
        panels.open("7");
        panels.close("5");
        assert_eq!(panels.open_panel(), Some("7"));
    }
}
