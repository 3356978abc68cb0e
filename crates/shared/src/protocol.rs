//! Query vocabulary for the hosted `artists` table.

use crate::domain::ArtistId;

pub const ARTISTS_TABLE: &str = "artists";
pub const REST_PATH_PREFIX: &str = "rest/v1";

pub const COLUMN_ID: &str = "id";
pub const COLUMN_CREATED_AT: &str = "created_at";

/// `select=*&order=created_at.desc`: every column, newest first.
pub fn fetch_all_query() -> [(&'static str, String); 2] {
    [
        ("select", "*".to_string()),
        ("order", format!("{COLUMN_CREATED_AT}.desc")),
    ]
}

/// Equality filter on the primary key, e.g. `id=eq.42`.
pub fn id_filter(id: &ArtistId) -> (&'static str, String) {
    (COLUMN_ID, format!("eq.{}", id.as_str()))
}

/// Inverse of [`id_filter`]; used by store emulators.
pub fn parse_eq_filter(value: &str) -> Option<&str> {
    value.strip_prefix("eq.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_newest_first_listing_query() {
        let query = fetch_all_query();
        assert_eq!(query[0], ("select", "*".to_string()));
        assert_eq!(query[1], ("order", "created_at.desc".to_string()));
    }

    #[test]
    fn id_filter_round_trips_through_parser() {
        let (column, value) = id_filter(&ArtistId::new("9b2e"));
        assert_eq!(column, "id");
        assert_eq!(parse_eq_filter(&value), Some("9b2e"));
        assert_eq!(parse_eq_filter("gt.3"), None);
    }
}
