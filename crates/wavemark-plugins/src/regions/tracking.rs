//! Active-region tracking
//!
//! On every playback tick the set of regions containing the cursor is
//! recomputed and diffed against the previous tick. Only membership changes
//! produce transitions, so a region that stays active across ticks is
//! reported exactly once on entry and once on exit.

use super::events::RegionHandle;
use super::region::Bounds;

/// Whether playback at `time` is inside the region
///
/// A marker has no width, so it counts as active for `marker_window` seconds
/// after its point.
pub fn is_active(bounds: Bounds, time: f64, marker_window: f64) -> bool {
    let end = if bounds.is_marker() {
        bounds.start + marker_window
    } else {
        bounds.end
    };
    bounds.start <= time && end >= time
}

/// Regions that entered and left the active set on one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transitions {
    pub entered: Vec<RegionHandle>,
    pub left: Vec<RegionHandle>,
}

impl Transitions {
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.left.is_empty()
    }
}

/// Previous-tick active set plus the diffing logic
#[derive(Debug, Clone)]
pub struct PlaybackTracker {
    marker_window: f64,
    active: Vec<RegionHandle>,
}

impl PlaybackTracker {
    pub fn new(marker_window: f64) -> Self {
        Self {
            marker_window,
            active: Vec::new(),
        }
    }

    /// Handles active as of the last tick, in collection order
    pub fn active(&self) -> &[RegionHandle] {
        &self.active
    }

    /// Recompute the active set for `time` and report what changed
    pub fn update(
        &mut self,
        time: f64,
        regions: impl IntoIterator<Item = (RegionHandle, Bounds)>,
    ) -> Transitions {
        let now: Vec<RegionHandle> = regions
            .into_iter()
            .filter(|(_, bounds)| is_active(*bounds, time, self.marker_window))
            .map(|(handle, _)| handle)
            .collect();

        let transitions = Transitions {
            entered: now.iter().filter(|h| !self.active.contains(h)).copied().collect(),
            left: self.active.iter().filter(|h| !now.contains(h)).copied().collect(),
        };
        self.active = now;
        transitions
    }

    /// Drop a region without reporting it as left
    pub fn forget(&mut self, handle: RegionHandle) {
        self.active.retain(|&h| h != handle);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
