//! Region-level and collection-level events

use super::params::Side;

/// Stable key for a region, independent of its (mutable) `id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionHandle(pub(crate) u64);

/// Events a single region emits to its own subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum RegionEvent {
    Click,
    /// Pointer entered the region
    Over,
    /// Pointer left the region
    Leave,
    DoubleClick,
    /// Bounds changed; `None` is a move, `Some(side)` a resize
    Update { side: Option<Side> },
    /// An interaction session (drag, resize, label edit) finished
    UpdateEnd,
    Play,
    /// Terminal: the region has been removed
    Remove,
}

/// Point-in-time view of a region carried by collection events
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSnapshot {
    pub handle: RegionHandle,
    pub id: String,
    pub start: f64,
    pub end: f64,
}

/// Events the region plugin emits to its subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum RegionsEvent {
    /// `add_region` built the region (it may still be waiting for the duration)
    Initialized(RegionSnapshot),
    /// The region joined the collection
    Created(RegionSnapshot),
    /// The region moved or was resized
    Update {
        region: RegionSnapshot,
        side: Option<Side>,
    },
    /// An interaction session on the region finished
    Updated(RegionSnapshot),
    Clicked(RegionSnapshot),
    DoubleClicked(RegionSnapshot),
    Removed(RegionSnapshot),
    /// Playback entered the region
    In(RegionSnapshot),
    /// Playback left the region
    Out(RegionSnapshot),
}

impl RegionsEvent {
    /// The region this event is about
    pub fn region(&self) -> &RegionSnapshot {
        match self {
            RegionsEvent::Initialized(r)
            | RegionsEvent::Created(r)
            | RegionsEvent::Updated(r)
            | RegionsEvent::Clicked(r)
            | RegionsEvent::DoubleClicked(r)
            | RegionsEvent::Removed(r)
            | RegionsEvent::In(r)
            | RegionsEvent::Out(r) => r,
            RegionsEvent::Update { region, .. } => region,
        }
    }

    /// Wire name, matching the event names hosts expect
    pub fn name(&self) -> &'static str {
        match self {
            RegionsEvent::Initialized(_) => "region-initialized",
            RegionsEvent::Created(_) => "region-created",
            RegionsEvent::Update { .. } => "region-update",
            RegionsEvent::Updated(_) => "region-updated",
            RegionsEvent::Clicked(_) => "region-clicked",
            RegionsEvent::DoubleClicked(_) => "region-double-clicked",
            RegionsEvent::Removed(_) => "region-removed",
            RegionsEvent::In(_) => "region-in",
            RegionsEvent::Out(_) => "region-out",
        }
    }
}
