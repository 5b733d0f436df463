//! The drawing side of the frame loop.
//!
//! The engine never draws anything itself; it hands segments and indicator
//! colors to a [`Renderer`] and keeps the returned handles until the segment
//! is replaced or cleared.

use std::collections::HashMap;

use log::{debug, trace};
use serde::Serialize;

use crate::{proximity::ColorDirective, segment::Segment};

/// Which of the driver's lines a segment is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Incident,
    Bounce,
}

/// Sink for everything the frame driver produces.
///
/// Handles are move-only: releasing one consumes it, so a segment can be
/// released at most once.
pub trait Renderer {
    type Handle;

    fn draw_segment(&mut self, kind: SegmentKind, segment: Segment) -> Self::Handle;
    fn release_segment(&mut self, handle: Self::Handle);
    fn set_indicator(&mut self, color: ColorDirective);
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SegmentHandle(u64);

impl SegmentHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// In-memory renderer that keeps the live segment set and resource counters.
#[derive(Debug, Default)]
pub struct SegmentLog {
    live: HashMap<u64, (SegmentKind, Segment)>,
    next_id: u64,
    pub created: u64,
    pub released: u64,
    pub indicator: ColorDirective,
}

impl SegmentLog {
    pub fn new() -> SegmentLog {
        SegmentLog::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live(&self, kind: SegmentKind) -> Option<Segment> {
        self.live
            .values()
            .find(|(k, _)| *k == kind)
            .map(|(_, segment)| *segment)
    }
}

impl Renderer for SegmentLog {
    type Handle = SegmentHandle;

    fn draw_segment(&mut self, kind: SegmentKind, segment: Segment) -> SegmentHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.created += 1;
        trace!("draw {:?} #{}: {} -> {}", kind, id, segment.start, segment.end);
        self.live.insert(id, (kind, segment));
        return SegmentHandle(id);
    }

    fn release_segment(&mut self, handle: SegmentHandle) {
        match self.live.remove(&handle.0) {
            Some((kind, _)) => {
                self.released += 1;
                trace!("release {:?} #{}", kind, handle.0);
            },
            None => debug!("release of unknown segment #{}", handle.0),
        }
    }

    fn set_indicator(&mut self, color: ColorDirective) {
        if color != self.indicator {
            debug!("indicator -> {:?}", color);
        }
        self.indicator = color;
    }
}
