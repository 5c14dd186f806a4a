pub mod models;
pub mod queries;

use chrono::Local;
use diesel::QueryResult;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::error;
use rocket::fairing::AdHoc;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::{Build, Rocket};
use rocket_sync_db_pools::database;

use models::{
    ArtistDetails, EntityRef, LocationGroup, NewArtist, NewShow, NewVenue, SearchResults,
    ShowListing, VenueDetails,
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[database("gigbook")]
pub struct Connection(diesel::SqliteConnection);

/// Per-request handle on the booking database. Handlers take it as a request
/// guard; every call borrows one pooled connection for the duration of the
/// query and releases it afterwards.
pub struct Store(Connection);

impl Store {
    /// Attaches the connection pool and runs the embedded migration chain,
    /// refusing to launch when the chain cannot be applied.
    pub fn fairing() -> AdHoc {
        AdHoc::on_ignite("Booking Store", |rocket| async {
            rocket
                .attach(Connection::fairing())
                .attach(AdHoc::try_on_ignite("Database Migrations", run_migrations))
        })
    }

    pub async fn venues_by_location(&self) -> QueryResult<Vec<LocationGroup>> {
        self.0.run(queries::venues_by_location).await
    }

    pub async fn all_artists(&self) -> QueryResult<Vec<EntityRef>> {
        self.0.run(queries::all_artists).await
    }

    pub async fn all_shows(&self) -> QueryResult<Vec<ShowListing>> {
        self.0.run(queries::all_shows).await
    }

    pub async fn search_venues(&self, term: String) -> QueryResult<SearchResults> {
        self.0.run(move |c| queries::search_venues(c, &term)).await
    }

    pub async fn search_artists(&self, term: String) -> QueryResult<SearchResults> {
        self.0.run(move |c| queries::search_artists(c, &term)).await
    }

    pub async fn venue_details(&self, venue_id: i32) -> QueryResult<VenueDetails> {
        let now = Local::now().naive_local();
        self.0
            .run(move |c| queries::venue_details(c, venue_id, now))
            .await
    }

    pub async fn artist_details(&self, artist_id: i32) -> QueryResult<ArtistDetails> {
        let now = Local::now().naive_local();
        self.0
            .run(move |c| queries::artist_details(c, artist_id, now))
            .await
    }

    pub async fn venue(&self, venue_id: i32) -> QueryResult<models::Venue> {
        self.0.run(move |c| queries::venue(c, venue_id)).await
    }

    pub async fn artist(&self, artist_id: i32) -> QueryResult<models::Artist> {
        self.0.run(move |c| queries::artist(c, artist_id)).await
    }

    pub async fn venue_name(&self, venue_id: i32) -> QueryResult<String> {
        self.0.run(move |c| queries::venue_name(c, venue_id)).await
    }

    pub async fn venue_ref(&self, venue_id: i32) -> QueryResult<Option<EntityRef>> {
        self.0.run(move |c| queries::venue_ref(c, venue_id)).await
    }

    pub async fn artist_ref(&self, artist_id: i32) -> QueryResult<Option<EntityRef>> {
        self.0.run(move |c| queries::artist_ref(c, artist_id)).await
    }

    pub async fn venue_genre_list(&self, venue_id: i32) -> QueryResult<Vec<String>> {
        self.0
            .run(move |c| queries::venue_genre_list(c, venue_id))
            .await
    }

    pub async fn artist_genre_list(&self, artist_id: i32) -> QueryResult<Vec<String>> {
        self.0
            .run(move |c| queries::artist_genre_list(c, artist_id))
            .await
    }

    pub async fn create_venue(&self, new_venue: NewVenue, genres: Vec<String>) -> QueryResult<i32> {
        self.0
            .run(move |c| queries::create_venue(c, new_venue, &genres))
            .await
    }

    pub async fn create_artist(
        &self,
        new_artist: NewArtist,
        genres: Vec<String>,
    ) -> QueryResult<i32> {
        self.0
            .run(move |c| queries::create_artist(c, new_artist, &genres))
            .await
    }

    pub async fn update_venue(
        &self,
        venue_id: i32,
        fields: NewVenue,
        genres: Vec<String>,
    ) -> QueryResult<()> {
        self.0
            .run(move |c| queries::update_venue(c, venue_id, fields, &genres))
            .await
    }

    pub async fn update_artist(
        &self,
        artist_id: i32,
        fields: NewArtist,
        genres: Vec<String>,
    ) -> QueryResult<()> {
        self.0
            .run(move |c| queries::update_artist(c, artist_id, fields, &genres))
            .await
    }

    pub async fn delete_venue(&self, venue_id: i32) -> QueryResult<()> {
        self.0.run(move |c| queries::delete_venue(c, venue_id)).await
    }

    pub async fn create_show(&self, new_show: NewShow) -> QueryResult<()> {
        self.0.run(move |c| queries::create_show(c, new_show)).await
    }
}

async fn run_migrations(rocket: Rocket<Build>) -> Result<Rocket<Build>, Rocket<Build>> {
    let conn = match Connection::get_one(&rocket).await {
        Some(conn) => conn,
        None => {
            error!("database connection for migrations unavailable");
            return Err(rocket);
        }
    };

    let outcome = conn
        .run(|c| {
            c.run_pending_migrations(MIGRATIONS)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .await;

    match outcome {
        Ok(()) => Ok(rocket),
        Err(e) => {
            error!("failed to run database migrations: {}", e);
            Err(rocket)
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Store {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Connection::from_request(request).await.map(Store)
    }
}
