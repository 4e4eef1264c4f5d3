mod cache;
pub use cache::{CollapsedThreads, KvStore, StoreError, VoteCache, COLLAPSED_THREADS_KEY};

mod collapse;
pub use collapse::{toggles_collapse, ClickRegion, CollapseEffect, ThreadState};

mod csrf;
pub use csrf::{csrf_from_cookies, select_csrf};

mod panels;
pub use panels::{PanelChange, ReplyPanels};

mod scale;
pub use scale::{scale_for_width, MAX_SCALE, MIN_SCALE};

mod vote;
pub use vote::{apply_response, VoteOutcome};

pub mod api {
    pub use discuss_api::*;
}
