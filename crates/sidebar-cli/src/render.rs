//! Offline rendering of a layout into wire frames.
//!
//! A single local viewer is attached to a fresh registry, the redraw driver
//! runs for a number of ticks and every frame the board sends is captured.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use serde::Serialize;
use sidebar_core::{
    BoardRegistry, KeyedLine, RedrawDriver, Transport, ViewerDirectory, ViewerId, lock_board,
};
use sidebar_text::translate_alternate_codes;
use sidebar_wire::{Packet, decode_frame};
use tracing::info;
use uuid::Uuid;

use crate::layout::Layout;

/// Records every frame instead of sending it.
#[derive(Debug, Default)]
pub struct CaptureTransport {
    frames: Mutex<Vec<Vec<u8>>>,
}

impl CaptureTransport {
    pub fn drain(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut *self.frames.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Transport for CaptureTransport {
    fn send(&self, _viewer: ViewerId, frame: &[u8]) -> io::Result<()> {
        self.frames
            .lock()
            .map_err(|_| io::Error::other("capture lock poisoned"))?
            .push(frame.to_vec());
        Ok(())
    }
}

/// The one viewer a local render draws for.
struct LocalViewer(ViewerId);

impl ViewerDirectory for LocalViewer {
    fn is_online(&self, viewer: ViewerId) -> bool {
        viewer == self.0
    }
}

/// When a frame was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "tick", rename_all = "snake_case")]
pub enum Stage {
    Tick(usize),
    Keyed,
    Detach,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tick(tick) => write!(f, "tick {tick}"),
            Self::Keyed => f.write_str("keyed"),
            Self::Detach => f.write_str("detach"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    #[serde(flatten)]
    pub stage: Stage,
    pub packet: Packet,
    /// The complete frame, hex encoded.
    pub frame: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub ticks: usize,
    /// Destroy the board after the last tick.
    pub detach: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ticks: 1,
            detach: false,
        }
    }
}

/// Render `layout` and return every frame in send order.
///
/// Keyed lines are created after the first tick, once the objective exists.
pub fn render_layout(layout: &Layout, options: RenderOptions) -> Result<Vec<FrameRecord>> {
    let viewer = ViewerId::new(Uuid::nil());
    let transport = Arc::new(CaptureTransport::default());
    let registry = Arc::new(BoardRegistry::new(
        Arc::new(LocalViewer(viewer)),
        transport.clone(),
    ));
    let board = registry.attach(viewer)?;

    let mut driver = RedrawDriver::new(
        Arc::clone(&registry),
        Arc::new(layout.clone()),
        &layout.config,
    );
    if layout.animate_title {
        driver = driver.with_title_animation(layout.config.animation);
    }

    let mut records = Vec::new();
    for tick in 1..=options.ticks {
        let report = driver.tick();
        if report.failed > 0 {
            tracing::warn!(tick, "redraw failed, see earlier warnings");
        }
        collect(&transport, Stage::Tick(tick), &mut records)?;

        if tick == 1 {
            create_keyed(layout, &board)?;
            collect(&transport, Stage::Keyed, &mut records)?;
        }
    }
    if options.ticks == 0 {
        create_keyed(layout, &board)?;
        collect(&transport, Stage::Keyed, &mut records)?;
    }

    if options.detach {
        registry.detach(viewer)?;
        collect(&transport, Stage::Detach, &mut records)?;
    }

    info!(frames = records.len(), ticks = options.ticks, "rendered layout");
    Ok(records)
}

fn create_keyed(layout: &Layout, board: &sidebar_core::SharedBoard) -> Result<()> {
    let marker = layout.config.color_marker;
    let mut board = lock_board(board);
    for entry in &layout.keyed {
        let key = translate_alternate_codes(marker, &entry.key);
        board
            .create_line(&KeyedLine::new(entry.index, key))
            .with_context(|| format!("failed to create keyed line {}", entry.index))?;
        if let Some(value) = &entry.value {
            board
                .set_value(entry.index, &translate_alternate_codes(marker, value))
                .with_context(|| format!("failed to set value of line {}", entry.index))?;
        }
    }
    Ok(())
}

fn collect(transport: &CaptureTransport, stage: Stage, records: &mut Vec<FrameRecord>) -> Result<()> {
    for frame in transport.drain() {
        let (_, packet) = decode_frame(&frame)?.context("captured a partial frame")?;
        records.push(FrameRecord {
            stage,
            packet,
            frame: hex::encode(&frame),
        });
    }
    Ok(())
}
