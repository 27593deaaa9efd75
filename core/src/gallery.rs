//! Scattered polaroid layout: initial placement, stacking order, drag,
//! flip and the temporary "focus" that pulls one photo to the center.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const LEFT_BAND: (f64, f64) = (4.0, 18.0);
pub const RIGHT_BAND: (f64, f64) = (82.0, 96.0);
pub const TOP_RANGE: (f64, f64) = (8.0, 86.0);
pub const ROTATION_RANGE_DEG: (f64, f64) = (-16.0, 16.0);
pub const INITIAL_RANK: u32 = 1;
pub const FOCUS_SCALE: f64 = 2.2;
pub const FOCUS_HOLD_MS: u32 = 3000;
pub const FOCUS_Z_INDEX: i32 = 9999;

pub const PLACEHOLDER_IMAGE_SRC: &str = "data:image/svg+xml;utf8,%3Csvg xmlns='http://www.w3.org/2000/svg' width='400' height='300'%3E%3Crect width='100%25' height='100%25' fill='%23222'/%3E%3Ctext x='50%25' y='50%25' font-size='18' fill='%23fff' text-anchor='middle' alignment-baseline='middle'%3EImage not found%3C/text%3E%3C/svg%3E";

/// Percent coordinates of a photo's center inside the gallery, both axes
/// clamped to `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

impl Position {
    pub fn clamped(left: f64, top: f64) -> Self {
        Self {
            left: left.clamp(0.0, 100.0),
            top: top.clamp(0.0, 100.0),
        }
    }

    /// Converts a pointer location in page pixels to gallery percentages.
    /// Returns `None` for a collapsed container or a non-finite pointer.
    pub fn from_pointer(x: f64, y: f64, bounds: Bounds) -> Option<Self> {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return None;
        }
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let left = (x - bounds.left) / bounds.width * 100.0;
        let top = (y - bounds.top) / bounds.height * 100.0;
        Some(Self::clamped(left, top))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryItem {
    pub id: usize,
    pub position: Position,
    pub rotation_deg: f64,
    pub flipped: bool,
    pub rank: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FocusToken(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Focus {
    index: usize,
    token: FocusToken,
}

/// How one item should be drawn right now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub scale: f64,
    pub rotation_deg: f64,
    pub z_index: i32,
    pub flipped: bool,
    pub focused: bool,
}

#[derive(Clone, Debug)]
pub struct Gallery {
    items: Vec<GalleryItem>,
    top_rank: u32,
    focus: Option<Focus>,
    focus_serial: u64,
}

impl Gallery {
    /// Scatters `count` photos: the first half (rounded up) near the left
    /// edge, the rest near the right edge.
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let half = count.div_ceil(2);
        let items = (0..count)
            .map(|id| {
                let band = if id < half { LEFT_BAND } else { RIGHT_BAND };
                GalleryItem {
                    id,
                    position: Position {
                        left: rng.random_range(band.0..band.1),
                        top: rng.random_range(TOP_RANGE.0..TOP_RANGE.1),
                    },
                    rotation_deg: rng.random_range(ROTATION_RANGE_DEG.0..ROTATION_RANGE_DEG.1),
                    flipped: false,
                    rank: INITIAL_RANK,
                }
            })
            .collect();
        Self {
            items,
            top_rank: INITIAL_RANK,
            focus: None,
            focus_serial: 0,
        }
    }

    pub fn with_entropy(count: usize) -> Self {
        Self::new(count, entropy_seed())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn item(&self, id: usize) -> Option<&GalleryItem> {
        self.items.get(id)
    }

    pub fn top_rank(&self) -> u32 {
        self.top_rank
    }

    /// Gives `id` a rank above every other item and returns it.
    pub fn bring_to_front(&mut self, id: usize) -> Option<u32> {
        let item = self.items.get_mut(id)?;
        self.top_rank = self.top_rank.saturating_add(1);
        item.rank = self.top_rank;
        Some(self.top_rank)
    }

    pub fn begin_drag(&mut self, id: usize) -> Option<u32> {
        self.bring_to_front(id)
    }

    /// Stores the drop location. Leaves the item untouched when the
    /// container has no usable size.
    pub fn end_drag(&mut self, id: usize, pointer: (f64, f64), bounds: Bounds) -> Option<Position> {
        let position = Position::from_pointer(pointer.0, pointer.1, bounds)?;
        let item = self.items.get_mut(id)?;
        item.position = position;
        Some(position)
    }

    /// Flips the card and raises it. Returns the new flip state.
    pub fn click(&mut self, id: usize) -> Option<bool> {
        let item = self.items.get_mut(id)?;
        item.flipped = !item.flipped;
        let flipped = item.flipped;
        self.bring_to_front(id);
        Some(flipped)
    }

    /// Focuses `index`, replacing any focus in progress. The token must be
    /// handed back to [`Gallery::release_focus`] when the hold expires.
    pub fn focus(&mut self, index: usize) -> Option<FocusToken> {
        if index >= self.items.len() {
            return None;
        }
        self.focus_serial = self.focus_serial.wrapping_add(1);
        let token = FocusToken(self.focus_serial);
        self.focus = Some(Focus { index, token });
        Some(token)
    }

    /// Clears the focus if `token` is still the current one. A stale token
    /// from a superseded focus is ignored.
    pub fn release_focus(&mut self, token: FocusToken) -> bool {
        match self.focus {
            Some(focus) if focus.token == token => {
                self.focus = None;
                true
            }
            _ => false,
        }
    }

    pub fn focused(&self) -> Option<usize> {
        self.focus.map(|focus| focus.index)
    }

    pub fn placement(&self, id: usize) -> Option<Placement> {
        let item = self.items.get(id)?;
        if self.focused() == Some(id) {
            return Some(Placement {
                left: 50.0,
                top: 50.0,
                scale: FOCUS_SCALE,
                rotation_deg: 0.0,
                z_index: FOCUS_Z_INDEX,
                flipped: item.flipped,
                focused: true,
            });
        }
        Some(Placement {
            left: item.position.left,
            top: item.position.top,
            scale: 1.0,
            rotation_deg: item.rotation_deg,
            z_index: i32::try_from(item.rank).unwrap_or(FOCUS_Z_INDEX - 1).min(FOCUS_Z_INDEX - 1),
            flipped: item.flipped,
            focused: false,
        })
    }
}

/// Seed for layouts that are not meant to be reproducible. Browser builds
/// pass their own seed since the wasm target has no OS entropy here.
pub fn entropy_seed() -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let mut hasher = RandomState::new().build_hasher();
    #[cfg(not(target_arch = "wasm32"))]
    {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(0);
        hasher.write_u64(nanos);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_land_on_opposite_edges() {
        let gallery = Gallery::new(5, 7);
        for item in gallery.items() {
            let band = if item.id < 3 { LEFT_BAND } else { RIGHT_BAND };
            assert!(item.position.left >= band.0 && item.position.left < band.1);
            assert!(item.position.top >= TOP_RANGE.0 && item.position.top < TOP_RANGE.1);
            assert!(item.rotation_deg >= ROTATION_RANGE_DEG.0);
            assert!(item.rotation_deg < ROTATION_RANGE_DEG.1);
            assert_eq!(item.rank, INITIAL_RANK);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        assert_eq!(Gallery::new(6, 99).items(), Gallery::new(6, 99).items());
    }

    #[test]
    fn focus_out_of_range_is_ignored() {
        let mut gallery = Gallery::new(2, 1);
        assert!(gallery.focus(2).is_none());
        assert!(gallery.focused().is_none());
    }

    #[test]
    fn collapsed_container_keeps_position() {
        let mut gallery = Gallery::new(1, 3);
        let before = gallery.items()[0].position;
        assert!(gallery
            .end_drag(0, (10.0, 10.0), Bounds::new(0.0, 0.0, 0.0, 500.0))
            .is_none());
        assert_eq!(gallery.items()[0].position, before);
    }
}
