use crate::config::Song;

pub const BACKGROUNDS: [&str; 3] = [
    "linear-gradient(135deg,#ff9a9e 0%,#fad0c4 100%)",
    "linear-gradient(135deg,#a18cd1 0%,#fbc2eb 100%)",
    "linear-gradient(135deg,#fbc2eb 0%,#a6c1ee 100%)",
];
pub const VISUALIZER_BARS: usize = 12;
pub const BAR_MIN_HEIGHT: u32 = 4;
pub const BAR_MAX_HEIGHT: u32 = 36;
pub const BAR_IDLE_HEIGHT: u32 = 6;
pub const ANALYSER_FFT_SIZE: u32 = 64;

/// Song player state. An empty playlist ignores every command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playlist {
    len: usize,
    index: usize,
    playing: bool,
    progress_pct: f64,
}

impl Playlist {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            playing: false,
            progress_pct: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn progress_pct(&self) -> f64 {
        self.progress_pct
    }

    pub fn current<'a>(&self, songs: &'a [Song]) -> Option<&'a Song> {
        songs.get(self.index)
    }

    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + 1) % self.len;
        self.progress_pct = 0.0;
    }

    pub fn previous(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + self.len - 1) % self.len;
        self.progress_pct = 0.0;
    }

    /// Jumps to `index` and starts playback. Out-of-range requests are
    /// ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        self.playing = true;
        self.progress_pct = 0.0;
        true
    }

    pub fn toggle(&mut self) {
        if self.len == 0 {
            return;
        }
        self.playing = !self.playing;
    }

    pub fn play(&mut self) {
        if self.len > 0 {
            self.playing = true;
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Track finished: stop, rewind the bar and move to the next song.
    pub fn ended(&mut self) {
        self.playing = false;
        self.next();
    }

    pub fn set_progress(&mut self, current_secs: f64, duration_secs: f64) {
        if !current_secs.is_finite() {
            return;
        }
        let duration = if duration_secs.is_finite() {
            duration_secs.max(1.0)
        } else {
            1.0
        };
        self.progress_pct = (current_secs / duration * 100.0).clamp(0.0, 100.0);
    }
}

pub fn background_for(index: usize) -> &'static str {
    BACKGROUNDS[index % BACKGROUNDS.len()]
}

/// Averages analyser bins into `bars` heights between
/// [`BAR_MIN_HEIGHT`] and [`BAR_MAX_HEIGHT`].
pub fn spectrum_bars(bins: &[u8], bars: usize) -> Vec<u32> {
    if bars == 0 {
        return Vec::new();
    }
    let step = (bins.len() / bars).max(1);
    (0..bars)
        .map(|bar| {
            let sum: u32 = (0..step)
                .map(|offset| bins.get(bar * step + offset).copied().unwrap_or(0) as u32)
                .sum();
            let avg = f64::from(sum) / step as f64;
            let height = (avg / 255.0 * f64::from(BAR_MAX_HEIGHT)).round() as u32;
            height.max(BAR_MIN_HEIGHT)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_both_ways() {
        let mut playlist = Playlist::new(3);
        playlist.previous();
        assert_eq!(playlist.index(), 2);
        playlist.next();
        assert_eq!(playlist.index(), 0);
    }

    #[test]
    fn empty_playlist_is_inert() {
        let mut playlist = Playlist::new(0);
        playlist.next();
        playlist.previous();
        playlist.toggle();
        playlist.play();
        assert_eq!(playlist.index(), 0);
        assert!(!playlist.is_playing());
        assert!(!playlist.select(0));
    }

    #[test]
    fn ended_advances_and_stops() {
        let mut playlist = Playlist::new(2);
        playlist.select(1);
        playlist.set_progress(30.0, 60.0);
        assert_eq!(playlist.progress_pct(), 50.0);
        playlist.ended();
        assert_eq!(playlist.index(), 0);
        assert!(!playlist.is_playing());
        assert_eq!(playlist.progress_pct(), 0.0);
    }

    #[test]
    fn unknown_duration_does_not_divide_by_zero() {
        let mut playlist = Playlist::new(1);
        playlist.set_progress(0.5, f64::NAN);
        assert_eq!(playlist.progress_pct(), 50.0);
        playlist.set_progress(0.0, 0.0);
        assert_eq!(playlist.progress_pct(), 0.0);
    }

    #[test]
    fn spectrum_bars_stay_in_range() {
        let loud = vec![255u8; 32];
        let quiet = vec![0u8; 32];
        assert!(spectrum_bars(&loud, VISUALIZER_BARS)
            .iter()
            .all(|h| *h == BAR_MAX_HEIGHT));
        assert!(spectrum_bars(&quiet, VISUALIZER_BARS)
            .iter()
            .all(|h| *h == BAR_MIN_HEIGHT));
        assert_eq!(spectrum_bars(&[], 4), vec![BAR_MIN_HEIGHT; 4]);
    }

    #[test]
    fn backgrounds_cycle() {
        assert_eq!(background_for(0), background_for(3));
        assert_ne!(background_for(0), background_for(1));
    }
}
