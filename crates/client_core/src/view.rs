//! Filter/sort/present pipeline over the last fetched artist collection.
//!
//! Everything here is synchronous and pure: the derived view is a function of
//! the collection and the [`ViewQuery`] alone.

use std::{cmp::Ordering, collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use shared::domain::Artist;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    GenreAsc,
    GenreDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Genre,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::GenreAsc,
        SortKey::GenreDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::GenreAsc => "genre-asc",
            Self::GenreDesc => "genre-desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "Name A-Z",
            Self::NameDesc => "Name Z-A",
            Self::GenreAsc => "Genre A-Z",
            Self::GenreDesc => "Genre Z-A",
        }
    }

    pub fn field(self) -> SortField {
        match self {
            Self::NameAsc | Self::NameDesc => SortField::Name,
            Self::GenreAsc | Self::GenreDesc => SortField::Genre,
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(self, Self::NameDesc | Self::GenreDesc)
    }

    fn key(self, artist: &Artist) -> &str {
        match self.field() {
            SortField::Name => &artist.name,
            SortField::Genre => &artist.genre,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| {
                format!("unknown sort key '{value}' (expected name-asc, name-desc, genre-asc or genre-desc)")
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenreFilter {
    #[default]
    All,
    Only(String),
}

impl GenreFilter {
    pub fn from_option(genre: Option<String>) -> Self {
        match genre {
            Some(genre) if genre != "all" => Self::Only(genre),
            _ => Self::All,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Exact, case-sensitive match against the stored genre label.
    pub fn matches(&self, genre: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == genre,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "All Genres",
            Self::Only(genre) => genre,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    pub search: String,
    pub genre: GenreFilter,
    pub sort: SortKey,
}

impl ViewQuery {
    /// No search text and no genre restriction. Sort order does not count.
    pub fn is_default(&self) -> bool {
        self.search.is_empty() && self.genre.is_all()
    }

    pub fn matches(&self, artist: &Artist) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = artist.name.to_lowercase().contains(&needle)
            || artist.genre.to_lowercase().contains(&needle);
        matches_search && self.genre.matches(&artist.genre)
    }
}

/// Which placeholder to show when the derived view is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoArtistsYet,
    NoMatches,
}

impl EmptyState {
    pub fn title(self) -> &'static str {
        match self {
            Self::NoArtistsYet => "No artists yet",
            Self::NoMatches => "No artists found",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Self::NoArtistsYet => {
                "Start building your music collection by adding your first artist"
            }
            Self::NoMatches => {
                "Try adjusting your search or filter criteria to find what you're looking for"
            }
        }
    }
}

/// Indices into `artists` for the filtered, sorted view.
pub fn derive_view_indices(artists: &[Artist], query: &ViewQuery) -> Vec<usize> {
    let mut keyed: Vec<(CollationKey, usize)> = artists
        .iter()
        .enumerate()
        .filter(|(_, artist)| query.matches(artist))
        .map(|(index, artist)| (CollationKey::new(query.sort.key(artist)), index))
        .collect();

    // `sort_by` is stable, so equal keys keep collection order in both directions.
    if query.sort.is_descending() {
        keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    } else {
        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    keyed.into_iter().map(|(_, index)| index).collect()
}

pub fn derive_view<'a>(artists: &'a [Artist], query: &ViewQuery) -> Vec<&'a Artist> {
    derive_view_indices(artists, query)
        .into_iter()
        .map(|index| &artists[index])
        .collect()
}

/// Distinct genres across the whole collection, first occurrence wins.
pub fn distinct_genres(artists: &[Artist]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut genres = Vec::new();
    for artist in artists {
        if seen.insert(artist.genre.as_str()) {
            genres.push(artist.genre.clone());
        }
    }
    genres
}

pub fn empty_state(visible_len: usize, query: &ViewQuery) -> Option<EmptyState> {
    if visible_len > 0 {
        None
    } else if query.is_default() {
        Some(EmptyState::NoArtistsYet)
    } else {
        Some(EmptyState::NoMatches)
    }
}

/// Locale-style comparison: letters compare case- and accent-insensitively
/// first, then accents break ties, then lowercase sorts before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CollationKey {
    primary: String,
    secondary: String,
    tertiary: String,
}

impl CollationKey {
    fn new(text: &str) -> Self {
        let secondary = text.to_lowercase();
        let primary = secondary
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(fold_letter)
            .collect();
        Self {
            primary,
            secondary,
            tertiary: text.to_string(),
        }
    }
}

impl Ord for CollationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .cmp(&other.primary)
            .then_with(|| self.secondary.cmp(&other.secondary))
            // Reversed so "a" < "A", the usual locale convention.
            .then_with(|| other.tertiary.cmp(&self.tertiary))
    }
}

impl PartialOrd for CollationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Letters that carry no canonical decomposition but still sort with a base
/// letter. Accented letters are handled by NFD before this runs.
fn fold_letter(c: char) -> FoldedChar {
    let folded = match c {
        'đ' => 'd',
        'ħ' => 'h',
        'ı' => 'i',
        'ł' => 'l',
        'ø' => 'o',
        'ŧ' => 't',
        'ß' => return FoldedChar::Pair('s', 's'),
        'æ' => return FoldedChar::Pair('a', 'e'),
        'œ' => return FoldedChar::Pair('o', 'e'),
        other => other,
    };
    FoldedChar::Single(folded)
}

enum FoldedChar {
    Single(char),
    Pair(char, char),
    Done,
}

impl Iterator for FoldedChar {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match std::mem::replace(self, FoldedChar::Done) {
            FoldedChar::Single(c) => Some(c),
            FoldedChar::Pair(first, second) => {
                *self = FoldedChar::Single(second);
                Some(first)
            }
            FoldedChar::Done => None,
        }
    }
}

/// The view-state store: the last fetched collection, the user's query and
/// the derived view, recomputed whenever either input changes.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    artists: Vec<Artist>,
    query: ViewQuery,
    visible: Vec<usize>,
    loaded: bool,
}

impl ViewState {
    pub fn new(query: ViewQuery) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    /// Replaces the source collection with a fresh fetch result.
    pub fn replace_artists(&mut self, artists: Vec<Artist>) {
        self.artists = artists;
        self.loaded = true;
        self.recompute();
    }

    /// The initial fetch finished without data; the list stays as it was.
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.query.search != search {
            self.query.search = search;
            self.recompute();
        }
    }

    pub fn set_genre(&mut self, genre: GenreFilter) {
        if self.query.genre != genre {
            self.query.genre = genre;
            self.recompute();
        }
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        if self.query.sort != sort {
            self.query.sort = sort;
            self.recompute();
        }
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn total(&self) -> usize {
        self.artists.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Artist> + '_ {
        self.visible.iter().map(|&index| &self.artists[index])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn genres(&self) -> Vec<String> {
        distinct_genres(&self.artists)
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        empty_state(self.visible.len(), &self.query)
    }

    fn recompute(&mut self) {
        self.visible = derive_view_indices(&self.artists, &self.query);
    }
}

pub fn artist_count_label(count: usize) -> String {
    if count == 1 {
        "1 Artist".to_string()
    } else {
        format!("{count} Artists")
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
