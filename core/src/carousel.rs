pub const ROTATE_MS: u32 = 3500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxKey {
    Next,
    Previous,
    Close,
}

impl LightboxKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(LightboxKey::Next),
            "ArrowLeft" => Some(LightboxKey::Previous),
            "Escape" => Some(LightboxKey::Close),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
    lightbox: Option<usize>,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            lightbox: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn lightbox(&self) -> Option<usize> {
        self.lightbox
    }

    pub fn advance(&mut self) {
        self.index = step(self.index, self.len, true);
    }

    pub fn back(&mut self) {
        self.index = step(self.index, self.len, false);
    }

    pub fn goto(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    pub fn open_lightbox(&mut self) {
        if self.len > 0 {
            self.lightbox = Some(self.index);
        }
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox = None;
    }

    pub fn lightbox_step(&mut self, forward: bool) {
        if let Some(current) = self.lightbox {
            self.lightbox = Some(step(current, self.len, forward));
        }
    }

    /// Applies a key press; only acts while the lightbox is open.
    pub fn handle_key(&mut self, key: LightboxKey) -> bool {
        if self.lightbox.is_none() {
            return false;
        }
        match key {
            LightboxKey::Next => self.lightbox_step(true),
            LightboxKey::Previous => self.lightbox_step(false),
            LightboxKey::Close => self.close_lightbox(),
        }
        true
    }
}

fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_only_work_with_lightbox_open() {
        let mut carousel = Carousel::new(3);
        assert!(!carousel.handle_key(LightboxKey::Next));
        carousel.advance();
        carousel.open_lightbox();
        assert_eq!(carousel.lightbox(), Some(1));
        assert!(carousel.handle_key(LightboxKey::Previous));
        assert!(carousel.handle_key(LightboxKey::Previous));
        assert_eq!(carousel.lightbox(), Some(2));
        assert!(carousel.handle_key(LightboxKey::Close));
        assert_eq!(carousel.lightbox(), None);
    }

    #[test]
    fn empty_carousel_stays_put() {
        let mut carousel = Carousel::new(0);
        carousel.advance();
        carousel.back();
        carousel.open_lightbox();
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.lightbox(), None);
    }

    #[test]
    fn key_names_map() {
        assert_eq!(LightboxKey::from_key("Escape"), Some(LightboxKey::Close));
        assert_eq!(LightboxKey::from_key("Enter"), None);
    }
}
