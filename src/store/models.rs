use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{artist_genres, artists, shows, venue_genres, venues};

#[derive(Queryable, Identifiable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = venues)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub facebook_link: String,
    pub image_link: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = venues, treat_none_as_null = true)]
pub struct NewVenue {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub facebook_link: String,
    pub image_link: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
}

#[derive(Queryable, Identifiable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = artists)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub facebook_link: String,
    pub image_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = artists, treat_none_as_null = true)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub facebook_link: String,
    pub image_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub website: Option<String>,
}

/// A booking linking one artist to one venue at one point in time.
#[derive(Queryable, Identifiable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = shows)]
pub struct Show {
    pub id: i32,
    pub start_time: NaiveDateTime,
    pub venue_id: i32,
    pub artist_id: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = shows)]
pub struct NewShow {
    pub start_time: NaiveDateTime,
    pub venue_id: i32,
    pub artist_id: i32,
}

// Genre tags are one row per tag, keyed by owner. Duplicate genre strings
// per owner are tolerated. Reads select the genre column directly, so only
// the insertable side needs a struct.

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = venue_genres)]
pub struct NewVenueGenre {
    pub genre: String,
    pub venue_id: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = artist_genres)]
pub struct NewArtistGenre {
    pub genre: String,
    pub artist_id: i32,
}

// View structures handed to the pages. These are plain data; the handlers
// assemble them and the presentation boundary renders them.

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub id: i32,
    pub name: String,
}

/// One (city, state) group of the venues listing.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntityRef>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchEntry {
    pub id: i32,
    pub name: String,
    /// Only present for artist results. Counts every show of the artist,
    /// not just future ones, despite the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_upcoming_shows: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchEntry>,
}

/// A show as seen from one side of the booking: the counterpart entity
/// (artist on a venue page, venue on an artist page) plus the start time
/// already formatted for display.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BookingInfo {
    pub id: i32,
    pub name: String,
    pub image_link: String,
    pub start_time: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VenueDetails {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: String,
    pub past_shows: Vec<BookingInfo>,
    pub upcoming_shows: Vec<BookingInfo>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

// The artist payload carries fewer fields than the venue one; the artist
// page never shows a website or seeking description.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ArtistDetails {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub image_link: String,
    pub past_shows: Vec<BookingInfo>,
    pub upcoming_shows: Vec<BookingInfo>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// One row of the shows listing, denormalized across all three tables.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ShowListing {
    pub show_id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artist_search_entry_serializes_its_show_count() {
        let entry = SearchEntry {
            id: 4,
            name: "Guns N Petals".to_string(),
            num_upcoming_shows: Some(3),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["num_upcoming_shows"], 3);
    }

    #[test]
    fn venue_search_entry_omits_the_show_count_field() {
        let entry = SearchEntry {
            id: 1,
            name: "The Musical Hop".to_string(),
            num_upcoming_shows: None,
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("num_upcoming_shows").is_none());
    }
}
