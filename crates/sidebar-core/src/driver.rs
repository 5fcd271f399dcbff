//! Periodic redraw of every attached board.
//!
//! Each tick asks the [`ContentSource`] for every online viewer's title and
//! lines and pushes them onto the viewer's board. The first listed line is
//! drawn in the highest slot, since the sidebar sorts by descending score.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use sidebar_text::{HighlightAnimation, strip, translate_alternate_codes};
use sidebar_wire::TITLE_LIMIT;
use tracing::{debug, warn};

use crate::board::{Board, SLOT_COUNT};
use crate::config::{AnimationSettings, SidebarConfig};
use crate::error::BoardError;
use crate::registry::{BoardRegistry, lock_board};
use crate::viewer::{ContentSource, ViewerId};

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub drawn: usize,
    /// Viewers offline or detached before their board was redrawn.
    pub skipped: usize,
    pub failed: usize,
}

pub struct RedrawDriver {
    registry: Arc<BoardRegistry>,
    source: Arc<dyn ContentSource>,
    marker: char,
    title_animation: Option<AnimationSettings>,
    /// Held for the whole tick, so ticks never overlap.
    animations: Mutex<HashMap<ViewerId, HighlightAnimation>>,
}

impl RedrawDriver {
    pub fn new(
        registry: Arc<BoardRegistry>,
        source: Arc<dyn ContentSource>,
        config: &SidebarConfig,
    ) -> Self {
        Self {
            registry,
            source,
            marker: config.color_marker,
            title_animation: None,
            animations: Mutex::new(HashMap::new()),
        }
    }

    /// Sweep a highlight across each title, one frame per tick.
    #[must_use]
    pub fn with_title_animation(mut self, settings: AnimationSettings) -> Self {
        self.title_animation = Some(settings);
        self
    }

    pub fn registry(&self) -> &Arc<BoardRegistry> {
        &self.registry
    }

    /// Redraw every attached, online viewer once.
    ///
    /// A failure on one board is logged and the tick moves on.
    pub fn tick(&self) -> TickReport {
        let mut animations = self
            .animations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let boards = self.registry.snapshot();
        animations.retain(|viewer, _| boards.iter().any(|(attached, _)| attached == viewer));

        let mut report = TickReport::default();
        for (viewer, board) in boards {
            if !self.registry.is_online(viewer) {
                report.skipped += 1;
                continue;
            }
            let mut guard = lock_board(&board);
            // A detach between the snapshot and the lock has already torn
            // this board down.
            if !self
                .registry
                .board(viewer)
                .is_some_and(|current| Arc::ptr_eq(&current, &board))
            {
                debug!(%viewer, "board detached during tick");
                report.skipped += 1;
                continue;
            }
            match self.redraw(viewer, &mut guard, &mut animations) {
                Ok(()) => report.drawn += 1,
                Err(error) => {
                    warn!(%viewer, %error, "abandoning redraw for viewer");
                    report.failed += 1;
                }
            }
        }
        debug!(?report, "tick complete");
        report
    }

    fn redraw(
        &self,
        viewer: ViewerId,
        board: &mut Board,
        animations: &mut HashMap<ViewerId, HighlightAnimation>,
    ) -> Result<(), BoardError> {
        let title = translate_alternate_codes(self.marker, &self.source.title(viewer));
        let title = match &self.title_animation {
            Some(settings) => {
                let text = strip(&title)?;
                let animation = animations
                    .entry(viewer)
                    .or_insert_with(|| settings.animate(text.as_str()));
                if animation.text() != text {
                    animation.set_text(text);
                }
                let frame = animation.next_frame();
                // Highlight tokens can push a long title past the field limit.
                if frame.chars().count() > TITLE_LIMIT {
                    animation.still_frame()
                } else {
                    frame
                }
            }
            None => title,
        };
        board.set_title(&title)?;

        let mut lines = self.source.lines(viewer);
        if lines.len() > SLOT_COUNT {
            warn!(
                %viewer,
                count = lines.len(),
                capacity = SLOT_COUNT,
                "dropping lines beyond sidebar capacity"
            );
            lines.truncate(SLOT_COUNT);
        }

        let count = lines.len();
        board.truncate_lines(count)?;
        for (position, line) in lines.iter().enumerate() {
            let text = translate_alternate_codes(self.marker, line);
            board.set_line(count - 1 - position, &text)?;
        }
        Ok(())
    }

    /// Run [`tick`](Self::tick) every `period` on a background thread.
    ///
    /// The thread stops when the handle is stopped or dropped.
    pub fn spawn(self: Arc<Self>, period: Duration) -> std::io::Result<DriverHandle> {
        let stop = Arc::new(AtomicBool::new(false));
        let driver = self;
        let flag = Arc::clone(&stop);
        let thread = std::thread::Builder::new()
            .name("sidebar-redraw".to_string())
            .spawn(move || {
                while !flag.load(Ordering::SeqCst) {
                    driver.tick();
                    std::thread::park_timeout(period);
                }
            })?;
        Ok(DriverHandle {
            stop,
            thread: Some(thread),
        })
    }
}

/// Stops the background redraw thread when stopped or dropped.
#[derive(Debug)]
pub struct DriverHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl DriverHandle {
    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }

    /// Stop the thread and wait for the current tick to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            thread.thread().unpark();
            if thread.join().is_err() {
                warn!("redraw thread panicked");
            }
        }
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
