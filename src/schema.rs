table! {
    venues (id) {
        id -> Integer,
        name -> Text,
        address -> Text,
        city -> Text,
        state -> Text,
        phone -> Text,
        facebook_link -> Text,
        image_link -> Text,
        seeking_talent -> Bool,
        seeking_description -> Nullable<Text>,
        website -> Nullable<Text>,
    }
}

table! {
    artists (id) {
        id -> Integer,
        name -> Text,
        city -> Text,
        state -> Text,
        phone -> Text,
        facebook_link -> Text,
        image_link -> Text,
        seeking_venue -> Bool,
        seeking_description -> Nullable<Text>,
        website -> Nullable<Text>,
    }
}

table! {
    shows (id) {
        id -> Integer,
        start_time -> Timestamp,
        venue_id -> Integer,
        artist_id -> Integer,
    }
}

table! {
    venue_genres (id) {
        id -> Integer,
        genre -> Text,
        venue_id -> Integer,
    }
}

table! {
    artist_genres (id) {
        id -> Integer,
        genre -> Text,
        artist_id -> Integer,
    }
}

joinable!(shows -> venues (venue_id));
joinable!(shows -> artists (artist_id));
joinable!(venue_genres -> venues (venue_id));
joinable!(artist_genres -> artists (artist_id));

allow_tables_to_appear_in_same_query!(venues, artists, shows, venue_genres, artist_genres);
