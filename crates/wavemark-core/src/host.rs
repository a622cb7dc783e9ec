//! Waveform host interface
//!
//! Plugins never decode or draw audio themselves. They read the host's
//! duration, scroll position and surfaces through [`WaveformHost`], drive
//! playback and zoom through it, and react to the [`HostEvent`]s it emits.
//!
//! [`HeadlessHost`] is a complete in-memory host: it lays out a viewport and
//! a scrollable wrapper in its own [`Dom`], keeps a playback clock, and
//! queues the events a real engine would emit so callers can forward them.

use std::collections::VecDeque;

use crate::dom::{Dom, ElementId};
use crate::geometry::Rect;

/// Signals emitted by the waveform engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Audio is decoded and the duration is known
    Ready { duration: f64 },
    /// Playback clock moved
    TimeUpdate { time: f64 },
    /// Visible window changed
    ///
    /// `start_time`/`end_time` are the visible bounds as fractions of the
    /// duration; `left`/`right` are the same bounds in pixels.
    Scroll {
        start_time: f64,
        end_time: f64,
        left: f64,
        right: f64,
    },
    /// Pixels-per-second changed
    Zoom { px_per_sec: f64 },
    /// The waveform was re-rendered (after zoom or resize)
    Redraw,
}

/// Services a waveform engine offers to overlay plugins
pub trait WaveformHost {
    fn dom(&self) -> &Dom;

    fn dom_mut(&mut self) -> &mut Dom;

    /// Total duration in seconds; 0 while unknown
    fn duration(&self) -> f64;

    /// Number of decoded channels, once decoded
    fn channel_count(&self) -> Option<usize>;

    /// The scrollable surface overlays attach to
    fn wrapper(&self) -> Option<ElementId>;

    /// Horizontal scroll offset in pixels
    fn scroll(&self) -> f64;

    fn set_scroll(&mut self, px: f64);

    /// Visible (viewport) width in pixels
    fn width(&self) -> f64;

    /// Current zoom level in pixels per second
    fn min_px_per_sec(&self) -> f64;

    fn zoom(&mut self, px_per_sec: f64);

    /// Seek to `seconds`
    fn set_time(&mut self, seconds: f64);

    fn play(&mut self);
}

/// In-memory waveform host
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    dom: Dom,
    viewport: ElementId,
    wrapper: ElementId,
    width: f64,
    height: f64,
    duration: f64,
    channels: Option<usize>,
    scroll: f64,
    min_px_per_sec: f64,
    current_time: f64,
    playing: bool,
    events: VecDeque<HostEvent>,
}

impl HeadlessHost {
    /// Create a host with a `width` × `height` viewport and nothing loaded
    pub fn new(width: f64, height: f64) -> Self {
        let mut dom = Dom::new();
        let root = dom.root();
        let viewport = dom.create_element("div");
        dom.set_attribute(viewport, "part", "scroll");
        let wrapper = dom.create_element("div");
        dom.set_attribute(wrapper, "part", "wrapper");
        dom.append_child(root, viewport);
        dom.append_child(viewport, wrapper);

        let mut host = Self {
            dom,
            viewport,
            wrapper,
            width,
            height,
            duration: 0.0,
            channels: None,
            scroll: 0.0,
            min_px_per_sec: 0.0,
            current_time: 0.0,
            playing: false,
            events: VecDeque::new(),
        };
        host.relayout();
        host
    }

    /// Builder-style zoom level before anything is loaded
    pub fn with_min_px_per_sec(mut self, px_per_sec: f64) -> Self {
        self.min_px_per_sec = px_per_sec.max(0.0);
        self.relayout();
        self
    }

    /// Simulate decoding finishing: sets duration/channels and queues `Ready`
    pub fn load(&mut self, duration: f64, channels: usize) {
        self.duration = duration.max(0.0);
        self.channels = Some(channels);
        self.current_time = 0.0;
        self.relayout();
        log::debug!("HeadlessHost: loaded {:.3}s, {} channels", self.duration, channels);
        self.events.push_back(HostEvent::Ready {
            duration: self.duration,
        });
    }

    /// Advance the playback clock and queue a `TimeUpdate`
    pub fn tick_time(&mut self, time: f64) {
        self.current_time = time;
        self.events.push_back(HostEvent::TimeUpdate { time });
    }

    /// Take every event queued since the last call
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        self.events.drain(..).collect()
    }

    pub fn viewport(&self) -> ElementId {
        self.viewport
    }

    /// Full scrollable width of the wrapper
    pub fn scroll_width(&self) -> f64 {
        self.dom.client_width(self.wrapper)
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn max_scroll(&self) -> f64 {
        (self.scroll_width() - self.width).max(0.0)
    }

    fn relayout(&mut self) {
        let content = (self.duration * self.min_px_per_sec).max(self.width);
        self.dom
            .set_fixed_rect(self.viewport, Rect::new(0.0, 0.0, self.width, self.height));
        self.dom
            .set_fixed_rect(self.wrapper, Rect::new(0.0, 0.0, content, self.height));
        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
    }

    fn scroll_event(&self) -> HostEvent {
        let scroll_width = self.scroll_width();
        let left = self.scroll;
        let right = left + self.width;
        let fraction = |px: f64| if scroll_width > 0.0 { px / scroll_width } else { 0.0 };
        HostEvent::Scroll {
            start_time: fraction(left),
            end_time: fraction(right).min(1.0),
            left,
            right,
        }
    }
}

impl WaveformHost for HeadlessHost {
    fn dom(&self) -> &Dom {
        &self.dom
    }

    fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn channel_count(&self) -> Option<usize> {
        self.channels
    }

    fn wrapper(&self) -> Option<ElementId> {
        Some(self.wrapper)
    }

    fn scroll(&self) -> f64 {
        self.scroll
    }

    fn set_scroll(&mut self, px: f64) {
        let clamped = px.clamp(0.0, self.max_scroll());
        if clamped == self.scroll {
            return;
        }
        self.scroll = clamped;
        let event = self.scroll_event();
        self.events.push_back(event);
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn min_px_per_sec(&self) -> f64 {
        self.min_px_per_sec
    }

    fn zoom(&mut self, px_per_sec: f64) {
        self.min_px_per_sec = px_per_sec.max(0.0);
        self.relayout();
        self.events.push_back(HostEvent::Zoom {
            px_per_sec: self.min_px_per_sec,
        });
        self.events.push_back(HostEvent::Redraw);
    }

    fn set_time(&mut self, seconds: f64) {
        self.current_time = seconds.clamp(0.0, self.duration.max(0.0));
        self.events.push_back(HostEvent::TimeUpdate {
            time: self.current_time,
        });
    }

    fn play(&mut self) {
        self.playing = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_fills_viewport_until_zoomed() {
        let mut host = HeadlessHost::new(1000.0, 128.0);
        host.load(10.0, 2);
        assert_eq!(host.scroll_width(), 1000.0);

        host.zoom(500.0);
        assert_eq!(host.scroll_width(), 5000.0);
        assert_eq!(
            host.take_events(),
            vec![
                HostEvent::Ready { duration: 10.0 },
                HostEvent::Zoom { px_per_sec: 500.0 },
                HostEvent::Redraw,
            ]
        );
    }

    #[test]
    fn test_scroll_clamped_and_reported() {
        let mut host = HeadlessHost::new(1000.0, 128.0).with_min_px_per_sec(100.0);
        host.load(100.0, 1);
        host.take_events();

        host.set_scroll(99_999.0);
        assert_eq!(host.scroll(), 9000.0);
        assert_eq!(
            host.take_events(),
            vec![HostEvent::Scroll {
                start_time: 0.9,
                end_time: 1.0,
                left: 9000.0,
                right: 10000.0,
            }]
        );

        // Unchanged scroll emits nothing
        host.set_scroll(9000.0);
        assert!(host.take_events().is_empty());
    }

    #[test]
    fn test_seek_and_play() {
        let mut host = HeadlessHost::new(1000.0, 128.0);
        host.load(10.0, 1);
        host.take_events();

        host.set_time(4.0);
        host.play();
        assert!(host.is_playing());
        assert_eq!(host.current_time(), 4.0);
        assert_eq!(host.take_events(), vec![HostEvent::TimeUpdate { time: 4.0 }]);
    }
}
