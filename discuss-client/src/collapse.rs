/// Where inside a comment a click landed, for deciding whether it toggles
/// the surrounding thread.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClickRegion {
    /// The dedicated collapse line/indicator.
    Affordance,
    /// The metadata header area (author, timestamp, score).
    Header,
    Body,
    Actions,
    ReplyForm,
}

/// Clicks inside the body, action bar or an open reply form never toggle
/// collapse, even though those regions are descendants of the clickable
/// header area.
pub fn toggles_collapse(region: ClickRegion) -> bool {
    matches!(region, ClickRegion::Affordance | ClickRegion::Header)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ThreadState {
    Expanded,
    Collapsed,
}

/// Presentation change to apply to a thread's DOM subtree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CollapseEffect {
    pub collapsed: bool,
    /// Whether the nested-comments container gets its animation classes
    /// swapped. False only for the initial re-collapse at page load.
    pub animate: bool,
}

impl ThreadState {
    pub fn from_collapsed(collapsed: bool) -> ThreadState {
        match collapsed {
            true => ThreadState::Collapsed,
            false => ThreadState::Expanded,
        }
    }

    pub fn toggled(self) -> (ThreadState, CollapseEffect) {
        match self {
            ThreadState::Expanded => (
                ThreadState::Collapsed,
                CollapseEffect {
                    collapsed: true,
                    animate: true,
                },
            ),
            ThreadState::Collapsed => (
                ThreadState::Expanded,
                CollapseEffect {
                    collapsed: false,
                    animate: true,
                },
            ),
        }
    }

    /// Effect applying a remembered collapse at page load, without
    /// animating.
    pub fn restore_collapsed() -> CollapseEffect {
        CollapseEffect {
            collapsed: true,
            animate: false,
        }
    }
}
