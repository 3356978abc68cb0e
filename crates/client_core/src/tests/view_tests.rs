use super::*;

use shared::domain::ArtistId;

fn artist(id: &str, name: &str, genre: &str) -> Artist {
    Artist {
        id: ArtistId::new(id),
        name: name.to_string(),
        genre: genre.to_string(),
        image: None,
        created_at: None,
    }
}

fn fixture() -> Vec<Artist> {
    vec![
        artist("1", "Radiohead", "Rock"),
        artist("2", "Miles Davis", "Jazz"),
        artist("3", "adele", "Pop"),
        artist("4", "Björk", "Art Pop"),
        artist("5", "Beyoncé", "Pop"),
        artist("6", "The Rolling Stones", "Rock"),
        artist("7", "John Coltrane", "Jazz"),
    ]
}

fn ids(view: &[&Artist]) -> Vec<String> {
    view.iter().map(|artist| artist.id.to_string()).collect()
}

fn query(search: &str, genre: GenreFilter, sort: SortKey) -> ViewQuery {
    ViewQuery {
        search: search.to_string(),
        genre,
        sort,
    }
}

#[test]
fn sort_keys_round_trip_through_their_wire_names() {
    for key in SortKey::ALL {
        assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
    }
    assert!("name".parse::<SortKey>().is_err());
    assert_eq!(SortKey::default(), SortKey::NameAsc);
}

#[test]
fn default_query_sorts_by_name_ascending_case_insensitively() {
    let artists = fixture();
    let view = derive_view(&artists, &ViewQuery::default());
    assert_eq!(
        view.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        vec![
            "adele",
            "Beyoncé",
            "Björk",
            "John Coltrane",
            "Miles Davis",
            "Radiohead",
            "The Rolling Stones",
        ]
    );
}

#[test]
fn search_matches_name_or_genre_ignoring_case() {
    let artists = fixture();
    let view = derive_view(&artists, &query("POP", GenreFilter::All, SortKey::NameAsc));
    // "Pop" genre plus "Art Pop"; no name contains "pop".
    assert_eq!(ids(&view), vec!["3", "5", "4"]);

    let view = derive_view(&artists, &query("davis", GenreFilter::All, SortKey::NameAsc));
    assert_eq!(ids(&view), vec!["2"]);
}

#[test]
fn genre_filter_is_exact_and_combines_with_search() {
    let artists = fixture();
    let pop_only = GenreFilter::Only("Pop".into());

    let view = derive_view(&artists, &query("", pop_only.clone(), SortKey::NameAsc));
    assert_eq!(ids(&view), vec!["3", "5"]);

    let view = derive_view(&artists, &query("bey", pop_only, SortKey::NameAsc));
    assert_eq!(ids(&view), vec!["5"]);

    let lowercase = GenreFilter::Only("pop".into());
    assert!(derive_view(&artists, &query("", lowercase, SortKey::NameAsc)).is_empty());
}

#[test]
fn derived_view_is_exactly_the_matching_subset() {
    let artists = fixture();
    let searches = ["", "o", "ROCK", "z", " "];
    let genres = [
        GenreFilter::All,
        GenreFilter::Only("Jazz".into()),
        GenreFilter::Only("Rock".into()),
        GenreFilter::Only("Metal".into()),
    ];

    for search in searches {
        for genre in &genres {
            for sort in SortKey::ALL {
                let q = query(search, genre.clone(), sort);
                let view = derive_view(&artists, &q);
                let mut got = ids(&view);
                got.sort();
                let mut expected: Vec<String> = artists
                    .iter()
                    .filter(|a| {
                        let s = search.to_lowercase();
                        (a.name.to_lowercase().contains(&s) || a.genre.to_lowercase().contains(&s))
                            && genre.matches(&a.genre)
                    })
                    .map(|a| a.id.to_string())
                    .collect();
                expected.sort();
                assert_eq!(got, expected, "query {q:?}");
            }
        }
    }
}

#[test]
fn adjacent_elements_respect_the_active_direction() {
    let artists = fixture();
    for sort in SortKey::ALL {
        let view = derive_view(&artists, &query("", GenreFilter::All, sort));
        for pair in view.windows(2) {
            let ordering = collate(sort.key(pair[0]), sort.key(pair[1]));
            if sort.is_descending() {
                assert_ne!(ordering, Ordering::Less, "{sort} out of order");
            } else {
                assert_ne!(ordering, Ordering::Greater, "{sort} out of order");
            }
        }
    }
}

#[test]
fn equal_keys_keep_collection_order_in_both_directions() {
    let artists = fixture();
    let asc = derive_view(&artists, &query("", GenreFilter::All, SortKey::GenreAsc));
    assert_eq!(ids(&asc), vec!["4", "2", "7", "3", "5", "1", "6"]);

    let desc = derive_view(&artists, &query("", GenreFilter::All, SortKey::GenreDesc));
    assert_eq!(ids(&desc), vec!["1", "6", "3", "5", "2", "7", "4"]);
}

#[test]
fn recomputing_is_idempotent() {
    let artists = fixture();
    let q = query("o", GenreFilter::All, SortKey::NameDesc);
    let first = derive_view_indices(&artists, &q);
    let second = derive_view_indices(&artists, &q);
    assert_eq!(first, second);
}

#[test]
fn collation_folds_case_and_accents_before_breaking_ties() {
    assert_eq!(collate("apple", "Banana"), Ordering::Less);
    assert_eq!(collate("Émile", "Eric"), Ordering::Less);
    assert_eq!(collate("Zoë", "zoe"), Ordering::Greater);
    assert_eq!(collate("a", "A"), Ordering::Less);
    assert_eq!(collate("Straße", "Strasse"), Ordering::Greater);
    assert_eq!(collate("same", "same"), Ordering::Equal);
}

#[test]
fn accented_letters_sort_beside_their_base_letter() {
    assert_eq!(collate("Ğazi", "Hakan"), Ordering::Less);
    assert_eq!(collate("Ŵyn", "Xavier"), Ordering::Less);
    assert_eq!(collate("Sơn Tùng", "Son Tung"), Ordering::Greater);
    assert_eq!(collate("Sơn Tùng", "Sop"), Ordering::Less);
    assert_eq!(collate("Łukasz", "Lukas"), Ordering::Greater);
    assert_eq!(collate("Łukasz", "Lux"), Ordering::Less);
}

#[test]
fn distinct_genres_come_from_the_full_collection() {
    let artists = fixture();
    assert_eq!(
        distinct_genres(&artists),
        vec!["Rock", "Jazz", "Pop", "Art Pop"]
    );

    let mut state = ViewState::default();
    state.replace_artists(artists);
    state.set_genre(GenreFilter::Only("Jazz".into()));
    assert_eq!(state.visible_len(), 2);
    assert_eq!(state.genres().len(), 4);
}

#[test]
fn empty_collection_without_filters_is_no_artists_yet() {
    let mut state = ViewState::default();
    assert!(state.is_loading());
    state.replace_artists(Vec::new());
    assert!(!state.is_loading());
    assert_eq!(state.empty_state(), Some(EmptyState::NoArtistsYet));

    state.set_sort(SortKey::GenreDesc);
    assert_eq!(state.empty_state(), Some(EmptyState::NoArtistsYet));
}

#[test]
fn filters_with_zero_matches_are_no_results() {
    let mut state = ViewState::default();
    state.replace_artists(fixture());
    assert_eq!(state.empty_state(), None);

    state.set_search("zzz");
    assert_eq!(state.empty_state(), Some(EmptyState::NoMatches));

    state.set_search("");
    state.set_genre(GenreFilter::Only("Metal".into()));
    assert_eq!(state.empty_state(), Some(EmptyState::NoMatches));

    let mut empty = ViewState::default();
    empty.replace_artists(Vec::new());
    empty.set_search("x");
    assert_eq!(empty.empty_state(), Some(EmptyState::NoMatches));
}

#[test]
fn view_state_recomputes_when_collection_is_replaced() {
    let mut state = ViewState::new(query("", GenreFilter::All, SortKey::NameAsc));
    state.replace_artists(fixture());
    assert_eq!(state.visible().next().map(|a| a.name.as_str()), Some("adele"));

    state.replace_artists(vec![artist("9", "Aaliyah", "R&B")]);
    assert_eq!(
        state.visible().map(|a| a.id.to_string()).collect::<Vec<_>>(),
        vec!["9"]
    );
    assert_eq!(state.total(), 1);
}

#[test]
fn genre_filter_parses_all_sentinel() {
    assert_eq!(GenreFilter::from_option(None), GenreFilter::All);
    assert_eq!(
        GenreFilter::from_option(Some("all".into())),
        GenreFilter::All
    );
    assert_eq!(
        GenreFilter::from_option(Some("Jazz".into())),
        GenreFilter::Only("Jazz".into())
    );
}

#[test]
fn count_label_is_singular_for_one() {
    assert_eq!(artist_count_label(0), "0 Artists");
    assert_eq!(artist_count_label(1), "1 Artist");
    assert_eq!(artist_count_label(12), "12 Artists");
}
