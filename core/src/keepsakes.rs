use crate::config::{OpenWhenLetter, Photo, Trip};

const MIN_KEYWORD_LEN: usize = 3;

/// Badge text for an open-when letter: the first two characters of the
/// label's last word, uppercased.
pub fn monogram(label: &str) -> String {
    label
        .split_whitespace()
        .next_back()
        .unwrap_or("")
        .chars()
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LetterPayload<'a> {
    Image(&'a str),
    Text(&'a str),
}

impl OpenWhenLetter {
    pub fn payload(&self) -> LetterPayload<'_> {
        if self.kind.eq_ignore_ascii_case("gif") {
            LetterPayload::Image(&self.content)
        } else {
            LetterPayload::Text(&self.content)
        }
    }

    pub fn monogram(&self) -> String {
        monogram(&self.label)
    }
}

fn keywords(title: &str) -> Vec<String> {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= MIN_KEYWORD_LEN)
        .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_lowercase)
        .collect()
}

/// Picks the photo that best matches a trip: its name or caption must
/// mention a word from the trip title, and a photo that also mentions the
/// trip year wins over one that does not. Ties go to the earliest photo.
pub fn photo_for_trip(trip: &Trip, photos: &[Photo]) -> Option<usize> {
    let words = keywords(&trip.title);
    if words.is_empty() {
        return None;
    }
    let year = trip.year.map(|year| year.to_string());
    photos
        .iter()
        .enumerate()
        .filter_map(|(index, photo)| {
            let haystack = format!("{} {}", photo.name, photo.caption).to_lowercase();
            let hits = words.iter().filter(|word| haystack.contains(word.as_str())).count();
            if hits == 0 {
                return None;
            }
            let dated = year
                .as_deref()
                .is_some_and(|year| haystack.contains(year));
            Some((usize::from(dated), hits, index))
        })
        .max_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)).then(b.2.cmp(&a.2)))
        .map(|(_, _, index)| index)
}
