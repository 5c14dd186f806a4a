//! Form schemas for the create and edit pages.
//!
//! Parsing is deliberately lenient (every field defaults to empty) so that a
//! submission always reaches [`validate`], which reports a field-to-message
//! mapping the handlers turn into notices while re-rendering the form with
//! the submitted values intact.

use rocket::FromForm;

use crate::store::models::{Artist, NewArtist, NewVenue, Venue};

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// One message per failing field, in field order.
pub type FieldErrors = Vec<(&'static str, String)>;

#[derive(FromForm, Default, Debug, Clone)]
pub struct VenueForm {
    #[field(default = "")]
    pub name: String,
    #[field(default = "")]
    pub city: String,
    #[field(default = "")]
    pub state: String,
    #[field(default = "")]
    pub address: String,
    #[field(default = "")]
    pub phone: String,
    #[field(default = "")]
    pub image_link: String,
    pub genres: Vec<String>,
    #[field(default = "")]
    pub facebook_link: String,
    #[field(default = "")]
    pub website_link: String,
    /// Checkboxes submit the literal "y" when ticked and nothing otherwise.
    pub seeking_talent: Option<String>,
    #[field(default = "")]
    pub seeking_description: String,
}

#[derive(FromForm, Default, Debug, Clone)]
pub struct ArtistForm {
    #[field(default = "")]
    pub name: String,
    #[field(default = "")]
    pub city: String,
    #[field(default = "")]
    pub state: String,
    #[field(default = "")]
    pub phone: String,
    #[field(default = "")]
    pub image_link: String,
    pub genres: Vec<String>,
    #[field(default = "")]
    pub facebook_link: String,
    #[field(default = "")]
    pub website_link: String,
    pub seeking_venue: Option<String>,
    #[field(default = "")]
    pub seeking_description: String,
}

#[derive(FromForm, Default, Debug, Clone)]
pub struct SearchForm {
    #[field(default = "")]
    pub search_term: String,
}

#[derive(FromForm, Default, Debug, Clone)]
pub struct ShowForm {
    #[field(default = "")]
    pub artist_id: String,
    #[field(default = "")]
    pub venue_id: String,
    #[field(default = "")]
    pub start_time: String,
}

/// A form field is truthy only for the literal checkbox value.
fn checkbox_checked(value: &Option<String>) -> bool {
    value.as_deref() == Some("y")
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn valid_phone(phone: &str) -> bool {
    !phone.is_empty() && phone.chars().all(|c| c.is_ascii_digit() || c == '-')
}

fn valid_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn validate_common(
    errors: &mut FieldErrors,
    name: &str,
    state: &str,
    phone: &str,
    genres: &[String],
    facebook_link: &str,
    website_link: &str,
) {
    if name.trim().is_empty() {
        errors.push(("name", "This field is required.".to_string()));
    }
    if !STATES.contains(&state) {
        errors.push(("state", "Not a valid choice.".to_string()));
    }
    if !phone.is_empty() && !valid_phone(phone) {
        errors.push(("phone", "Invalid phone number.".to_string()));
    }
    if genres.is_empty() {
        errors.push(("genres", "This field is required.".to_string()));
    } else if genres.iter().any(|g| !GENRES.contains(&g.as_str())) {
        errors.push(("genres", "Not a valid choice.".to_string()));
    }
    if !facebook_link.is_empty() && !valid_url(facebook_link) {
        errors.push(("facebook_link", "Invalid URL.".to_string()));
    }
    if !website_link.is_empty() && !valid_url(website_link) {
        errors.push(("website_link", "Invalid URL.".to_string()));
    }
}

impl VenueForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate_common(
            &mut errors,
            &self.name,
            &self.state,
            &self.phone,
            &self.genres,
            &self.facebook_link,
            &self.website_link,
        );
        errors
    }

    pub fn seeking_talent(&self) -> bool {
        checkbox_checked(&self.seeking_talent)
    }

    pub fn to_new_venue(&self) -> NewVenue {
        NewVenue {
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            facebook_link: self.facebook_link.clone(),
            image_link: self.image_link.clone(),
            seeking_talent: self.seeking_talent(),
            seeking_description: optional(&self.seeking_description),
            website: optional(&self.website_link),
        }
    }

    /// Prefill for the edit page from the stored row and its tags.
    pub fn from_venue(venue: &Venue, genres: Vec<String>) -> Self {
        VenueForm {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            image_link: venue.image_link.clone(),
            genres,
            facebook_link: venue.facebook_link.clone(),
            website_link: venue.website.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent.then(|| "y".to_string()),
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }
}

impl ArtistForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate_common(
            &mut errors,
            &self.name,
            &self.state,
            &self.phone,
            &self.genres,
            &self.facebook_link,
            &self.website_link,
        );
        errors
    }

    pub fn seeking_venue(&self) -> bool {
        checkbox_checked(&self.seeking_venue)
    }

    pub fn to_new_artist(&self) -> NewArtist {
        NewArtist {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            facebook_link: self.facebook_link.clone(),
            image_link: self.image_link.clone(),
            seeking_venue: self.seeking_venue(),
            seeking_description: optional(&self.seeking_description),
            website: optional(&self.website_link),
        }
    }

    pub fn from_artist(artist: &Artist, genres: Vec<String>) -> Self {
        ArtistForm {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            image_link: artist.image_link.clone(),
            genres,
            facebook_link: artist.facebook_link.clone(),
            website_link: artist.website.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue.then(|| "y".to_string()),
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }
}
