//! Wavemark Plugins - interactive overlays for waveform displays
//!
//! Three plugins that run against any [`wavemark_core::WaveformHost`]:
//!
//! - **Regions** (`regions`): draggable/resizable intervals and markers with
//!   drag-to-create, scroll virtualization, label stacking and playback
//!   enter/leave tracking
//! - **Timeline** (`timeline`): time-axis ruler with zoom-dependent notches
//! - **Zoom** (`zoom`): wheel zoom anchored on the pointer
//!
//! ## Driving a plugin
//!
//! ```ignore
//! let mut host = HeadlessHost::new(1000.0, 128.0);
//! let mut regions = RegionsPlugin::default();
//! regions.init(&mut host)?;
//! let intro = regions.add_region(&mut host, RegionParams::new(0.0, 4.5).with_content("Intro"))?;
//!
//! host.load(30.0, 2);
//! for event in host.take_events() {
//!     regions.on_host_event(&mut host, &event);
//! }
//! regions.advance(&mut host, 16);
//! ```

pub mod config;
pub mod regions;
pub mod timeline;
pub mod zoom;

pub use config::OverlayConfig;

pub use regions::{
    DragSelection, Region, RegionContent, RegionEvent, RegionHandle, RegionOptions,
    RegionParams, RegionSnapshot, RegionsConfig, RegionsEvent, RegionsPlugin, Side,
};

pub use timeline::{NotchKind, TimelineConfig, TimelineEvent, TimelinePlugin};

pub use zoom::{ZoomConfig, ZoomEvent, ZoomPlugin};
