//! Read and write queries against the booking schema.
//!
//! Everything in here runs on a plain connection so the handlers can wrap
//! calls in the pooled [`Store`](super::Store) and the tests can run them
//! against an in-memory database. Each mutating function is one transaction.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::SqliteConnection;

use super::models::{
    Artist, ArtistDetails, BookingInfo, EntityRef, LocationGroup, NewArtist, NewArtistGenre,
    NewShow, NewVenue, NewVenueGenre, SearchEntry, SearchResults, Show, ShowListing, Venue,
    VenueDetails,
};
use crate::schema::{artist_genres, artists, shows, venue_genres, venues};

define_sql_function! { fn last_insert_rowid() -> Integer; }

fn format_start_time(start: &NaiveDateTime) -> String {
    start.format("%Y-%m-%d %H:%M:%S").to_string()
}

// Listings

/// Groups all venues by their distinct (city, state) pairs, one query per
/// pair, in whatever order the distinct query yields them.
pub fn venues_by_location(conn: &mut SqliteConnection) -> QueryResult<Vec<LocationGroup>> {
    let locations = venues::table
        .select((venues::city, venues::state))
        .distinct()
        .load::<(String, String)>(conn)?;

    let mut groups = Vec::with_capacity(locations.len());
    for (city, state) in locations {
        let entries = venues::table
            .filter(venues::city.eq(&city))
            .filter(venues::state.eq(&state))
            .select((venues::id, venues::name))
            .load::<(i32, String)>(conn)?
            .into_iter()
            .map(|(id, name)| EntityRef { id, name })
            .collect();

        groups.push(LocationGroup {
            city,
            state,
            venues: entries,
        });
    }

    Ok(groups)
}

pub fn all_artists(conn: &mut SqliteConnection) -> QueryResult<Vec<EntityRef>> {
    Ok(artists::table
        .select((artists::id, artists::name))
        .load::<(i32, String)>(conn)?
        .into_iter()
        .map(|(id, name)| EntityRef { id, name })
        .collect())
}

/// Denormalizes every booking, resolving venue and artist with one lookup
/// per show like the listing page always has.
pub fn all_shows(conn: &mut SqliteConnection) -> QueryResult<Vec<ShowListing>> {
    let bookings = shows::table.load::<Show>(conn)?;

    let mut listing = Vec::with_capacity(bookings.len());
    for show in bookings {
        let venue: Venue = venues::table.find(show.venue_id).first(conn)?;
        let artist: Artist = artists::table.find(show.artist_id).first(conn)?;

        listing.push(ShowListing {
            show_id: show.id,
            venue_id: venue.id,
            venue_name: venue.name,
            artist_id: artist.id,
            artist_name: artist.name,
            artist_image_link: artist.image_link,
            start_time: format_start_time(&show.start_time),
        });
    }

    Ok(listing)
}

// Search

/// Case-insensitive substring match on the venue name.
pub fn search_venues(conn: &mut SqliteConnection, term: &str) -> QueryResult<SearchResults> {
    let pattern = format!("%{}%", term);
    let matches = venues::table
        .filter(venues::name.like(pattern))
        .select((venues::id, venues::name))
        .load::<(i32, String)>(conn)?;

    let data: Vec<SearchEntry> = matches
        .into_iter()
        .map(|(id, name)| SearchEntry {
            id,
            name,
            num_upcoming_shows: None,
        })
        .collect();

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

/// Case-insensitive substring match on the artist name. The
/// `num_upcoming_shows` attached to each entry is the artist's total show
/// count, past ones included.
pub fn search_artists(conn: &mut SqliteConnection, term: &str) -> QueryResult<SearchResults> {
    let pattern = format!("%{}%", term);
    let matches = artists::table
        .filter(artists::name.like(pattern))
        .select((artists::id, artists::name))
        .load::<(i32, String)>(conn)?;

    let mut data = Vec::with_capacity(matches.len());
    for (id, name) in matches {
        let show_count: i64 = shows::table
            .filter(shows::artist_id.eq(id))
            .count()
            .get_result(conn)?;

        data.push(SearchEntry {
            id,
            name,
            num_upcoming_shows: Some(show_count),
        });
    }

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

// Details

/// Loads one venue with its genre tags and its shows partitioned around
/// `now`, resolving the booked artist per row.
pub fn venue_details(
    conn: &mut SqliteConnection,
    venue_id: i32,
    now: NaiveDateTime,
) -> QueryResult<VenueDetails> {
    let venue: Venue = venues::table.find(venue_id).first(conn)?;
    let genres = venue_genre_list(conn, venue_id)?;

    let upcoming_rows = shows::table
        .filter(shows::venue_id.eq(venue_id))
        .filter(shows::start_time.ge(now))
        .load::<Show>(conn)?;
    let upcoming_shows = booked_artists(conn, &upcoming_rows)?;

    let past_rows = shows::table
        .filter(shows::venue_id.eq(venue_id))
        .filter(shows::start_time.lt(now))
        .load::<Show>(conn)?;
    let past_shows = booked_artists(conn, &past_rows)?;

    Ok(VenueDetails {
        id: venue.id,
        name: venue.name,
        genres,
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: venue.phone,
        website: venue.website,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

pub fn artist_details(
    conn: &mut SqliteConnection,
    artist_id: i32,
    now: NaiveDateTime,
) -> QueryResult<ArtistDetails> {
    let artist: Artist = artists::table.find(artist_id).first(conn)?;
    let genres = artist_genre_list(conn, artist_id)?;

    let upcoming_rows = shows::table
        .filter(shows::artist_id.eq(artist_id))
        .filter(shows::start_time.ge(now))
        .load::<Show>(conn)?;
    let upcoming_shows = booked_venues(conn, &upcoming_rows)?;

    let past_rows = shows::table
        .filter(shows::artist_id.eq(artist_id))
        .filter(shows::start_time.lt(now))
        .load::<Show>(conn)?;
    let past_shows = booked_venues(conn, &past_rows)?;

    Ok(ArtistDetails {
        id: artist.id,
        name: artist.name,
        genres,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        image_link: artist.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

fn booked_artists(conn: &mut SqliteConnection, rows: &[Show]) -> QueryResult<Vec<BookingInfo>> {
    let mut bookings = Vec::with_capacity(rows.len());
    for show in rows {
        let artist: Artist = artists::table.find(show.artist_id).first(conn)?;
        bookings.push(BookingInfo {
            id: artist.id,
            name: artist.name,
            image_link: artist.image_link,
            start_time: format_start_time(&show.start_time),
        });
    }
    Ok(bookings)
}

fn booked_venues(conn: &mut SqliteConnection, rows: &[Show]) -> QueryResult<Vec<BookingInfo>> {
    let mut bookings = Vec::with_capacity(rows.len());
    for show in rows {
        let venue: Venue = venues::table.find(show.venue_id).first(conn)?;
        bookings.push(BookingInfo {
            id: venue.id,
            name: venue.name,
            image_link: venue.image_link,
            start_time: format_start_time(&show.start_time),
        });
    }
    Ok(bookings)
}

// Single-row reads used by the edit and delete handlers.

pub fn venue(conn: &mut SqliteConnection, venue_id: i32) -> QueryResult<Venue> {
    venues::table.find(venue_id).first(conn)
}

pub fn artist(conn: &mut SqliteConnection, artist_id: i32) -> QueryResult<Artist> {
    artists::table.find(artist_id).first(conn)
}

pub fn venue_name(conn: &mut SqliteConnection, venue_id: i32) -> QueryResult<String> {
    venues::table
        .find(venue_id)
        .select(venues::name)
        .first(conn)
}

pub fn venue_ref(conn: &mut SqliteConnection, venue_id: i32) -> QueryResult<Option<EntityRef>> {
    Ok(venues::table
        .find(venue_id)
        .select((venues::id, venues::name))
        .first::<(i32, String)>(conn)
        .optional()?
        .map(|(id, name)| EntityRef { id, name }))
}

pub fn artist_ref(conn: &mut SqliteConnection, artist_id: i32) -> QueryResult<Option<EntityRef>> {
    Ok(artists::table
        .find(artist_id)
        .select((artists::id, artists::name))
        .first::<(i32, String)>(conn)
        .optional()?
        .map(|(id, name)| EntityRef { id, name }))
}

pub fn venue_genre_list(conn: &mut SqliteConnection, venue_id: i32) -> QueryResult<Vec<String>> {
    venue_genres::table
        .filter(venue_genres::venue_id.eq(venue_id))
        .select(venue_genres::genre)
        .load(conn)
}

pub fn artist_genre_list(conn: &mut SqliteConnection, artist_id: i32) -> QueryResult<Vec<String>> {
    artist_genres::table
        .filter(artist_genres::artist_id.eq(artist_id))
        .select(artist_genres::genre)
        .load(conn)
}

// Writes

/// Inserts the venue and one tag row per submitted genre, atomically, and
/// returns the generated id.
pub fn create_venue(
    conn: &mut SqliteConnection,
    new_venue: NewVenue,
    genres: &[String],
) -> QueryResult<i32> {
    conn.transaction(|conn| {
        diesel::insert_into(venues::table)
            .values(&new_venue)
            .execute(conn)?;
        let venue_id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;

        for genre in genres {
            diesel::insert_into(venue_genres::table)
                .values(&NewVenueGenre {
                    genre: genre.clone(),
                    venue_id,
                })
                .execute(conn)?;
        }

        Ok(venue_id)
    })
}

pub fn create_artist(
    conn: &mut SqliteConnection,
    new_artist: NewArtist,
    genres: &[String],
) -> QueryResult<i32> {
    conn.transaction(|conn| {
        diesel::insert_into(artists::table)
            .values(&new_artist)
            .execute(conn)?;
        let artist_id: i32 = diesel::select(last_insert_rowid()).get_result(conn)?;

        for genre in genres {
            diesel::insert_into(artist_genres::table)
                .values(&NewArtistGenre {
                    genre: genre.clone(),
                    artist_id,
                })
                .execute(conn)?;
        }

        Ok(artist_id)
    })
}

/// Overwrites every scalar field of the venue, then replaces its tag rows
/// with the submitted genres. Fails with `NotFound` when the venue is gone.
pub fn update_venue(
    conn: &mut SqliteConnection,
    venue_id: i32,
    fields: NewVenue,
    genres: &[String],
) -> QueryResult<()> {
    conn.transaction(|conn| {
        let _: Venue = venues::table.find(venue_id).first(conn)?;

        diesel::update(venues::table.find(venue_id))
            .set(&fields)
            .execute(conn)?;

        diesel::delete(venue_genres::table.filter(venue_genres::venue_id.eq(venue_id)))
            .execute(conn)?;
        for genre in genres {
            diesel::insert_into(venue_genres::table)
                .values(&NewVenueGenre {
                    genre: genre.clone(),
                    venue_id,
                })
                .execute(conn)?;
        }

        Ok(())
    })
}

pub fn update_artist(
    conn: &mut SqliteConnection,
    artist_id: i32,
    fields: NewArtist,
    genres: &[String],
) -> QueryResult<()> {
    conn.transaction(|conn| {
        let _: Artist = artists::table.find(artist_id).first(conn)?;

        diesel::update(artists::table.find(artist_id))
            .set(&fields)
            .execute(conn)?;

        diesel::delete(artist_genres::table.filter(artist_genres::artist_id.eq(artist_id)))
            .execute(conn)?;
        for genre in genres {
            diesel::insert_into(artist_genres::table)
                .values(&NewArtistGenre {
                    genre: genre.clone(),
                    artist_id,
                })
                .execute(conn)?;
        }

        Ok(())
    })
}

/// Bulk-deletes every venue row matching the id together with its tag and
/// show rows. The children go explicitly since SQLite only enforces the
/// declared cascade when `foreign_keys` is switched on per connection.
pub fn delete_venue(conn: &mut SqliteConnection, venue_id: i32) -> QueryResult<()> {
    conn.transaction(|conn| {
        diesel::delete(venue_genres::table.filter(venue_genres::venue_id.eq(venue_id)))
            .execute(conn)?;
        diesel::delete(shows::table.filter(shows::venue_id.eq(venue_id))).execute(conn)?;
        diesel::delete(venues::table.filter(venues::id.eq(venue_id))).execute(conn)?;
        Ok(())
    })
}

pub fn create_show(conn: &mut SqliteConnection, new_show: NewShow) -> QueryResult<()> {
    diesel::insert_into(shows::table)
        .values(&new_show)
        .execute(conn)
        .map(|_| ())
}
