//! Shared test doubles.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use sidebar_core::{Board, ContentSource, Transport, ViewerDirectory, ViewerId};
use sidebar_wire::{Packet, decode_frame};

/// Decodes every frame it receives.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(ViewerId, Packet)>>,
    fail_all: AtomicBool,
    fail_teams: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Drain the packets recorded so far.
    pub fn take(&self) -> Vec<Packet> {
        self.sent
            .lock()
            .unwrap()
            .drain(..)
            .map(|(_, packet)| packet)
            .collect()
    }

    pub fn take_for(&self, viewer: ViewerId) -> Vec<Packet> {
        let mut sent = self.sent.lock().unwrap();
        let (mine, others): (Vec<_>, Vec<_>) = sent.drain(..).partition(|(to, _)| *to == viewer);
        *sent = others;
        mine.into_iter().map(|(_, packet)| packet).collect()
    }

    pub fn fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    pub fn fail_teams(&self, fail: bool) {
        self.fail_teams.store(fail, Ordering::SeqCst);
    }
}

impl Transport for RecordingTransport {
    fn send(&self, viewer: ViewerId, frame: &[u8]) -> io::Result<()> {
        let (consumed, packet) = decode_frame(frame)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "partial frame"))?;
        assert_eq!(consumed, frame.len(), "one packet per frame");

        if self.fail_all.load(Ordering::SeqCst)
            || (self.fail_teams.load(Ordering::SeqCst) && matches!(packet, Packet::Team(_)))
        {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection reset"));
        }
        self.sent.lock().unwrap().push((viewer, packet));
        Ok(())
    }
}

/// Viewers are online until marked offline.
#[derive(Default)]
pub struct Directory {
    online: Mutex<HashSet<ViewerId>>,
}

impl Directory {
    pub fn with(viewers: &[ViewerId]) -> Arc<Self> {
        Arc::new(Self {
            online: Mutex::new(viewers.iter().copied().collect()),
        })
    }

    pub fn set_online(&self, viewer: ViewerId, online: bool) {
        let mut set = self.online.lock().unwrap();
        if online {
            set.insert(viewer);
        } else {
            set.remove(&viewer);
        }
    }
}

impl ViewerDirectory for Directory {
    fn is_online(&self, viewer: ViewerId) -> bool {
        self.online.lock().unwrap().contains(&viewer)
    }
}

/// Fixed title and lines per viewer.
#[derive(Default)]
pub struct StaticContent {
    content: Mutex<HashMap<ViewerId, (String, Vec<String>)>>,
}

impl StaticContent {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, viewer: ViewerId, title: &str, lines: &[&str]) {
        self.content.lock().unwrap().insert(
            viewer,
            (
                title.to_string(),
                lines.iter().map(|line| (*line).to_string()).collect(),
            ),
        );
    }
}

impl ContentSource for StaticContent {
    fn title(&self, viewer: ViewerId) -> String {
        self.content
            .lock()
            .unwrap()
            .get(&viewer)
            .map(|(title, _)| title.clone())
            .unwrap_or_default()
    }

    fn lines(&self, viewer: ViewerId) -> Vec<String> {
        self.content
            .lock()
            .unwrap()
            .get(&viewer)
            .map(|(_, lines)| lines.clone())
            .unwrap_or_default()
    }
}

pub fn board() -> (Board, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new();
    let board = Board::new(ViewerId::random(), transport.clone());
    (board, transport)
}
