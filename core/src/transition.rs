//! Time-based interpolation of a block set from one snapshot to another.
//!
//! The animator is clock-agnostic: callers pass `now_ms` on every call, the
//! browser driver feeds it animation-frame timestamps and tests feed it numbers.

use crate::block::{BlockId, BlockLike, Position, Size};

pub const TRANSITION_MS_DEFAULT: f64 = 250.0;
pub const TRANSITION_MS_MIN: f64 = 0.0;
pub const TRANSITION_MS_MAX: f64 = 2000.0;

/// Smoothstep on `[0, 1]`, monotonic, exact at both ends.
pub fn ease(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Track {
    id: BlockId,
    from_pos: Position,
    from_size: Size,
    to_pos: Position,
    to_size: Size,
    start_ms: f64,
    /// Last value handed out, used to tell an untouched block from a moved one.
    shown_pos: Position,
    shown_size: Size,
}

impl Track {
    fn progress(&self, now_ms: f64, duration_ms: f64) -> f64 {
        if duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms).max(0.0) / duration_ms).min(1.0)
    }

    fn is_shown_as<B: BlockLike>(&self, block: &B) -> bool {
        block.position() == self.shown_pos && block.size() == self.shown_size
    }

    fn sample<B: BlockLike>(&mut self, block: &B, t: f64) -> B {
        if t >= 1.0 {
            self.shown_pos = block.position();
            self.shown_size = block.size();
            return block.clone();
        }
        let eased = ease(t);
        let pos = Position {
            x: lerp(self.from_pos.x, self.to_pos.x, eased),
            y: lerp(self.from_pos.y, self.to_pos.y, eased),
        };
        let mut moved = block.with_position(pos);
        if self.from_size != self.to_size {
            moved = moved.with_size(Size {
                width: lerp(self.from_size.width, self.to_size.width, eased),
                height: lerp(self.from_size.height, self.to_size.height, eased),
            });
        }
        self.shown_pos = moved.position();
        self.shown_size = moved.size();
        moved
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame<B> {
    pub blocks: Vec<B>,
    pub finished: bool,
}

#[derive(Clone, Debug)]
struct Active<B> {
    target: Vec<B>,
    tracks: Vec<Track>,
}

pub struct Animator<B> {
    duration_ms: f64,
    active: Option<Active<B>>,
}

impl<B: BlockLike> Animator<B> {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms: sanitize_duration(duration_ms),
            active: None,
        }
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn set_duration_ms(&mut self, duration_ms: f64) {
        self.duration_ms = sanitize_duration(duration_ms);
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Ids currently being interpolated.
    pub fn animating_ids(&self) -> Vec<BlockId> {
        self.active
            .as_ref()
            .map(|active| active.tracks.iter().map(|track| track.id).collect())
            .unwrap_or_default()
    }

    /// Starts moving every block of `target` from its value in `from`, matched
    /// by id. Blocks found in only one of the sets are not interpolated.
    ///
    /// Only ids the new pair moves are superseded. A block still in flight that
    /// `target` carries exactly as last shown keeps its running track and its
    /// previous destination.
    pub fn start(&mut self, from: &[B], target: &[B], now_ms: f64) {
        let mut target = target.to_vec();
        let mut tracks = Vec::new();
        for block in &target {
            let id = block.id();
            let Some(source) = from.iter().find(|candidate| candidate.id() == id) else {
                continue;
            };
            if source.position() == block.position() && source.size() == block.size() {
                continue;
            }
            tracks.push(Track {
                id,
                from_pos: source.position(),
                from_size: source.size(),
                to_pos: block.position(),
                to_size: block.size(),
                start_ms: now_ms,
                shown_pos: source.position(),
                shown_size: source.size(),
            });
        }

        if let Some(previous) = self.active.take() {
            for track in previous.tracks {
                if tracks.iter().any(|fresh| fresh.id == track.id) {
                    continue;
                }
                let Some(slot) = target.iter_mut().find(|block| block.id() == track.id) else {
                    continue;
                };
                if !track.is_shown_as(slot) {
                    continue;
                }
                let Some(destination) = previous.target.iter().find(|block| block.id() == track.id) else {
                    continue;
                };
                *slot = destination.clone();
                tracks.push(track);
            }
        }

        self.active = Some(Active { target, tracks });
    }

    /// Drops the running transition without emitting anything.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Produces the frame for `now_ms`, or `None` when idle. The last frame of
    /// a transition is the exact target set and has `finished` set.
    pub fn tick(&mut self, now_ms: f64) -> Option<Frame<B>> {
        let duration_ms = self.duration_ms;
        let active = self.active.as_mut()?;
        let done = active
            .tracks
            .iter()
            .all(|track| track.progress(now_ms, duration_ms) >= 1.0);
        if done {
            let active = self.active.take()?;
            return Some(Frame {
                blocks: active.target,
                finished: true,
            });
        }
        let Active { target, tracks } = active;
        let blocks = target
            .iter()
            .map(|block| {
                let id = block.id();
                match tracks.iter_mut().find(|track| track.id == id) {
                    Some(track) => {
                        let t = track.progress(now_ms, duration_ms);
                        track.sample(block, t)
                    }
                    None => block.clone(),
                }
            })
            .collect();
        Some(Frame {
            blocks,
            finished: false,
        })
    }
}

fn sanitize_duration(duration_ms: f64) -> f64 {
    if !duration_ms.is_finite() {
        return TRANSITION_MS_DEFAULT;
    }
    duration_ms.clamp(TRANSITION_MS_MIN, TRANSITION_MS_MAX)
}
