//! JSON-lines frame dump.
//!
//! Each frame becomes one line holding the rectangles a rotated-rectangle
//! host would fill, plus the radar. Write errors are held until
//! [`JsonRenderer::finish`].

use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use arena_shared::radar::RadarFrame;
use arena_shared::render::{RenderBackend, Segment, SegmentRect};

#[derive(Serialize)]
struct FrameDump<'a> {
    frame: u64,
    rects: &'a [SegmentRect],
    radar: Option<&'a RadarFrame>,
}

pub struct JsonRenderer<W: Write> {
    out: W,
    frame: u64,
    rects: Vec<SegmentRect>,
    radar: Option<RadarFrame>,
    error: Option<anyhow::Error>,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frame: 0,
            rects: Vec::new(),
            radar: None,
            error: None,
        }
    }

    /// Frames written so far.
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Flushes the writer and reports the first error seen, if any.
    pub fn finish(mut self) -> anyhow::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush().context("flush frame dump")?;
        Ok(self.out)
    }

    fn write_frame(&mut self) -> anyhow::Result<()> {
        let dump = FrameDump {
            frame: self.frame,
            rects: &self.rects,
            radar: self.radar.as_ref(),
        };
        serde_json::to_writer(&mut self.out, &dump).context("encode frame")?;
        self.out.write_all(b"\n").context("write frame")?;
        Ok(())
    }
}

impl<W: Write> RenderBackend for JsonRenderer<W> {
    fn begin_frame(&mut self) {
        self.rects.clear();
        self.radar = None;
    }

    fn draw_segment(&mut self, segment: &Segment) {
        self.rects.push(segment.to_rect());
    }

    fn draw_radar(&mut self, radar: &RadarFrame) {
        self.radar = Some(radar.clone());
    }

    fn end_frame(&mut self) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_frame() {
            self.error = Some(e);
            return;
        }
        self.frame += 1;
    }
}
