//! Infinite-scroll controller.
//!
//! The controller never fetches. It turns "the end of the list is close"
//! into at most one load-more request per page, using the `loading` and
//! `has_more` flags the caller reports.

/// Phase of the infinite-scroll state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    #[default]
    Idle,
    /// A request was issued and has not completed yet.
    LoadingMore,
    /// The caller reported that no more data exists.
    Exhausted,
}

#[derive(Debug, Clone, Default)]
pub struct InfiniteScroll {
    phase: ScrollPhase,
    /// Distance (in pixels) before the end at which loading starts.
    margin: u32,
    /// Set once the caller has reported `loading == true` for the current request.
    seen_loading: bool,
}

impl InfiniteScroll {
    pub fn new(margin: u32) -> Self {
        Self {
            margin,
            ..Default::default()
        }
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Applies the caller's flags.
    ///
    /// `has_more == false` exhausts the controller from any phase. A request
    /// completes once the caller has reported `loading` and then cleared it.
    pub fn observe(&mut self, loading: bool, has_more: bool) {
        if !has_more {
            if self.phase != ScrollPhase::Exhausted {
                log::debug!("[scroll] exhausted");
            }
            self.phase = ScrollPhase::Exhausted;
            self.seen_loading = false;
            return;
        }

        match self.phase {
            // More data appeared again, e.g. after a new query.
            ScrollPhase::Exhausted => {
                self.phase = if loading {
                    ScrollPhase::LoadingMore
                } else {
                    ScrollPhase::Idle
                };
                self.seen_loading = loading;
            }
            ScrollPhase::LoadingMore if loading => self.seen_loading = true,
            ScrollPhase::LoadingMore if self.seen_loading => self.finish(),
            ScrollPhase::LoadingMore => {}
            ScrollPhase::Idle => {}
        }
    }

    /// Ends the outstanding request because the caller reported a failure.
    ///
    /// The next sentinel may trigger a retry.
    pub fn fail(&mut self) {
        if self.phase == ScrollPhase::LoadingMore {
            log::debug!("[scroll] request failed, sentinel re-armed");
        }
        self.finish();
    }

    /// Marks the outstanding request as complete (a page arrived, possibly empty).
    pub fn finish(&mut self) {
        if self.phase == ScrollPhase::LoadingMore {
            self.phase = ScrollPhase::Idle;
        }
        self.seen_loading = false;
    }

    /// Reports how far the sentinel is below the viewport (0 when visible).
    ///
    /// Returns `true` exactly when the caller should start loading the next
    /// page.
    pub fn sentinel(&mut self, distance: u32, loading: bool, has_more: bool) -> bool {
        self.observe(loading, has_more);

        if distance > self.margin || loading || self.phase != ScrollPhase::Idle {
            return false;
        }

        log::debug!("[scroll] sentinel within {}px, loading more", distance);
        self.phase = ScrollPhase::LoadingMore;
        self.seen_loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_once_while_loading() {
        let mut scroll = InfiniteScroll::new(100);
        assert!(scroll.sentinel(0, false, true));
        assert_eq!(scroll.phase(), ScrollPhase::LoadingMore);

        // Caller has not flipped `loading` yet.
        assert!(!scroll.sentinel(0, false, true));
        // Caller reports loading.
        assert!(!scroll.sentinel(0, true, true));
        // Completion.
        scroll.observe(false, true);
        assert_eq!(scroll.phase(), ScrollPhase::Idle);
        assert!(scroll.sentinel(0, false, true));
    }

    #[test]
    fn test_margin() {
        let mut scroll = InfiniteScroll::new(100);
        assert!(!scroll.sentinel(101, false, true));
        assert!(scroll.sentinel(100, false, true));
    }

    #[test]
    fn test_exhausted_never_triggers() {
        let mut scroll = InfiniteScroll::new(0);
        scroll.observe(false, false);
        assert_eq!(scroll.phase(), ScrollPhase::Exhausted);
        assert!(!scroll.sentinel(0, false, false));
    }

    #[test]
    fn test_exhausted_from_loading() {
        let mut scroll = InfiniteScroll::new(0);
        assert!(scroll.sentinel(0, false, true));
        scroll.observe(false, false);
        assert_eq!(scroll.phase(), ScrollPhase::Exhausted);
    }

    #[test]
    fn test_reopens_when_more_data_appears() {
        let mut scroll = InfiniteScroll::new(0);
        scroll.observe(false, false);
        scroll.observe(false, true);
        assert_eq!(scroll.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn test_external_loading_blocks_trigger() {
        let mut scroll = InfiniteScroll::new(0);
        assert!(!scroll.sentinel(0, true, true));
        assert_eq!(scroll.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn test_failure_rearms_sentinel() {
        let mut scroll = InfiniteScroll::new(0);
        assert!(scroll.sentinel(0, false, true));
        // The caller awaited the request and never reported `loading`.
        assert!(!scroll.sentinel(0, false, true));

        scroll.fail();
        assert_eq!(scroll.phase(), ScrollPhase::Idle);
        assert!(scroll.sentinel(0, false, true));
    }

    #[test]
    fn test_failure_does_not_reopen_exhausted() {
        let mut scroll = InfiniteScroll::new(0);
        scroll.observe(false, false);
        scroll.fail();
        assert_eq!(scroll.phase(), ScrollPhase::Exhausted);
    }

    #[test]
    fn test_finish_after_page() {
        let mut scroll = InfiniteScroll::new(0);
        assert!(scroll.sentinel(0, false, true));
        scroll.finish();
        assert_eq!(scroll.phase(), ScrollPhase::Idle);
    }
}
