//! HTML rendering. Every function takes plain data assembled by a handler
//! and produces the full page; none of them touch the database.

use maud::{html, Markup, DOCTYPE};

use crate::forms::{ArtistForm, ShowForm, VenueForm, GENRES, STATES};
use crate::store::models::{
    ArtistDetails, BookingInfo, EntityRef, LocationGroup, SearchResults, ShowListing, VenueDetails,
};

#[derive(PartialEq)]
enum Page {
    Home,
    Venues,
    Artists,
    Shows,
}

impl Page {
    fn url(&self) -> &'static str {
        use Page::*;

        match self {
            Home => "/",
            Venues => "/venues",
            Artists => "/artists",
            Shows => "/shows",
        }
    }

    fn title(&self) -> &'static str {
        use Page::*;

        match self {
            Home => "Home",
            Venues => "Venues",
            Artists => "Artists",
            Shows => "Shows",
        }
    }
}

fn base_html(main: Markup, current_page: &Page, notices: &[String]) -> Markup {
    use Page::*;
    html! {
        ( DOCTYPE )
        html lang="en" {
            head {
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "GigBook" }
                link href="/static/main.css" rel="stylesheet";
            }
            body {
                header {
                    div.header {
                        a.title href="/" { h1 { "GigBook" } }
                        nav {
                            ol {
                                @for page in [Home, Venues, Artists, Shows] {
                                    li { ( nav_entry(page, current_page) ) }
                                }
                            }
                        }
                    }
                }
                @if !notices.is_empty() {
                    ul.flashes {
                        @for notice in notices {
                            li { ( notice ) }
                        }
                    }
                }
                main {
                    ( main )
                }
            }
        }
    }
}

fn nav_entry(page: Page, current: &Page) -> Markup {
    html! {
        a.current[current == &page] href=( page.url() ) { ( page.title() ) }
    }
}

pub fn home(notices: &[String]) -> Markup {
    base_html(
        html! {
            div.hero {
                h2 { "Find the perfect stage." }
                p { "Browse venues and artists, or post a new show." }
                p.cta {
                    a href="/venues/create" { "Post a venue" }
                    a href="/artists/create" { "Post an artist" }
                    a href="/shows/create" { "Post a show" }
                }
            }
        },
        &Page::Home,
        notices,
    )
}

// Venues

pub fn venues(areas: &[LocationGroup], notices: &[String]) -> Markup {
    base_html(
        html! {
            h2 { "Venues" }
            ( search_box("/venues/search") )
            @for area in areas {
                div.area {
                    h3 { ( format!("{}, {}", area.city, area.state) ) }
                    ul.venues {
                        @for venue in &area.venues {
                            li { a href=( format!("/venues/{}", venue.id) ) { ( venue.name ) } }
                        }
                    }
                }
            }
            p { a href="/venues/create" { "List a new venue" } }
        },
        &Page::Venues,
        notices,
    )
}

pub fn search_venues(results: &SearchResults, search_term: &str, notices: &[String]) -> Markup {
    base_html(
        search_results_html("/venues", "venue", results, search_term),
        &Page::Venues,
        notices,
    )
}

pub fn venue(details: Option<&VenueDetails>, notices: &[String]) -> Markup {
    let main = match details {
        Some(venue) => html! {
            div.venue {
                h2 { ( venue.name ) }
                ( genre_list(&venue.genres) )
                p.address { ( venue.address ) }
                p.location { ( format!("{}, {}", venue.city, venue.state) ) }
                @if !venue.phone.is_empty() { p.phone { ( venue.phone ) } }
                @if let Some(website) = &venue.website {
                    p.website { a href=( website ) { ( website ) } }
                }
                @if !venue.facebook_link.is_empty() {
                    p.facebook { a href=( venue.facebook_link ) { ( venue.facebook_link ) } }
                }
                @if venue.seeking_talent {
                    div.seeking {
                        p { "Seeking talent" }
                        @if let Some(description) = &venue.seeking_description {
                            p { ( description ) }
                        }
                    }
                }
                img src=( venue.image_link ) alt=( venue.name );
                ( booking_list("Upcoming Shows", &venue.upcoming_shows, venue.upcoming_shows_count, "/artists") )
                ( booking_list("Past Shows", &venue.past_shows, venue.past_shows_count, "/artists") )
                p.actions {
                    a href=( format!("/venues/{}/edit", venue.id) ) { "Edit" }
                    button id="delete-button" data-id=( venue.id ) { "Delete" }
                }
            }
            script src="/static/js/venue.js" {}
        },
        None => html! {
            div.venue.missing {
                p { "This venue is not listed." }
            }
        },
    };
    base_html(main, &Page::Venues, notices)
}

pub fn venue_form(heading: &str, action: &str, form: &VenueForm, notices: &[String]) -> Markup {
    base_html(
        html! {
            h2 { ( heading ) }
            form method="post" action=( action ) {
                ( text_field("name", "Name", &form.name) )
                ( text_field("city", "City", &form.city) )
                ( state_select(&form.state) )
                ( text_field("address", "Address", &form.address) )
                ( text_field("phone", "Phone", &form.phone) )
                ( text_field("image_link", "Image Link", &form.image_link) )
                ( genre_select(&form.genres) )
                ( text_field("facebook_link", "Facebook Link", &form.facebook_link) )
                ( text_field("website_link", "Website Link", &form.website_link) )
                ( checkbox("seeking_talent", "Looking for Talent", form.seeking_talent()) )
                ( text_field("seeking_description", "Seeking Description", &form.seeking_description) )
                button type="submit" { ( heading ) }
            }
        },
        &Page::Venues,
        notices,
    )
}

// Artists

pub fn artists(artists: &[EntityRef], notices: &[String]) -> Markup {
    base_html(
        html! {
            h2 { "Artists" }
            ( search_box("/artists/search") )
            ul.artists {
                @for artist in artists {
                    li { a href=( format!("/artists/{}", artist.id) ) { ( artist.name ) } }
                }
            }
            p { a href="/artists/create" { "List a new artist" } }
        },
        &Page::Artists,
        notices,
    )
}

pub fn search_artists(results: &SearchResults, search_term: &str, notices: &[String]) -> Markup {
    base_html(
        search_results_html("/artists", "artist", results, search_term),
        &Page::Artists,
        notices,
    )
}

pub fn artist(details: Option<&ArtistDetails>, notices: &[String]) -> Markup {
    let main = match details {
        Some(artist) => html! {
            div.artist {
                h2 { ( artist.name ) }
                ( genre_list(&artist.genres) )
                p.location { ( format!("{}, {}", artist.city, artist.state) ) }
                @if !artist.phone.is_empty() { p.phone { ( artist.phone ) } }
                @if !artist.facebook_link.is_empty() {
                    p.facebook { a href=( artist.facebook_link ) { ( artist.facebook_link ) } }
                }
                @if artist.seeking_venue {
                    div.seeking { p { "Seeking a venue" } }
                }
                img src=( artist.image_link ) alt=( artist.name );
                ( booking_list("Upcoming Shows", &artist.upcoming_shows, artist.upcoming_shows_count, "/venues") )
                ( booking_list("Past Shows", &artist.past_shows, artist.past_shows_count, "/venues") )
                p.actions {
                    a href=( format!("/artists/{}/edit", artist.id) ) { "Edit" }
                }
            }
        },
        None => html! {
            div.artist.missing {
                p { "This artist is not listed." }
            }
        },
    };
    base_html(main, &Page::Artists, notices)
}

pub fn artist_form(heading: &str, action: &str, form: &ArtistForm, notices: &[String]) -> Markup {
    base_html(
        html! {
            h2 { ( heading ) }
            form method="post" action=( action ) {
                ( text_field("name", "Name", &form.name) )
                ( text_field("city", "City", &form.city) )
                ( state_select(&form.state) )
                ( text_field("phone", "Phone", &form.phone) )
                ( text_field("image_link", "Image Link", &form.image_link) )
                ( genre_select(&form.genres) )
                ( text_field("facebook_link", "Facebook Link", &form.facebook_link) )
                ( text_field("website_link", "Website Link", &form.website_link) )
                ( checkbox("seeking_venue", "Looking for Venues", form.seeking_venue()) )
                ( text_field("seeking_description", "Seeking Description", &form.seeking_description) )
                button type="submit" { ( heading ) }
            }
        },
        &Page::Artists,
        notices,
    )
}

// Shows

pub fn shows(listing: &[ShowListing], notices: &[String]) -> Markup {
    base_html(
        html! {
            h2 { "Shows" }
            ol.shows {
                @for show in listing {
                    li.show {
                        img src=( show.artist_image_link ) alt=( show.artist_name );
                        a href=( format!("/artists/{}", show.artist_id) ) { ( show.artist_name ) }
                        " playing at "
                        a href=( format!("/venues/{}", show.venue_id) ) { ( show.venue_name ) }
                        span.start-time { ( show.start_time ) }
                    }
                }
            }
            p { a href="/shows/create" { "Post a new show" } }
        },
        &Page::Shows,
        notices,
    )
}

pub fn show_form(form: &ShowForm, notices: &[String]) -> Markup {
    base_html(
        html! {
            h2 { "List a new show" }
            form method="post" action="/shows/create" {
                ( text_field("artist_id", "Artist Id", &form.artist_id) )
                ( text_field("venue_id", "Venue Id", &form.venue_id) )
                ( text_field("start_time", "Start Time", &form.start_time) )
                button type="submit" { "Create Show" }
            }
        },
        &Page::Shows,
        notices,
    )
}

// Error pages

pub fn not_found() -> Markup {
    base_html(
        html! {
            h2 { "404 Not Found" }
            p { "The page you are looking for does not exist." }
        },
        &Page::Home,
        &[],
    )
}

pub fn server_error() -> Markup {
    base_html(
        html! {
            h2 { "500 Internal Server Error" }
            p { "Something went wrong." }
        },
        &Page::Home,
        &[],
    )
}

// Shared fragments

fn search_box(action: &str) -> Markup {
    html! {
        form.search method="post" action=( action ) {
            input type="search" name="search_term" placeholder="Find by name";
            button type="submit" { "Search" }
        }
    }
}

fn search_results_html(
    prefix: &str,
    noun: &str,
    results: &SearchResults,
    search_term: &str,
) -> Markup {
    html! {
        h2 { ( format!("Found {} {}(s) for \"{}\"", results.count, noun, search_term) ) }
        ul.results {
            @for entry in &results.data {
                li {
                    a href=( format!("{}/{}", prefix, entry.id) ) { ( entry.name ) }
                    @if let Some(count) = entry.num_upcoming_shows {
                        span.upcoming { ( format!("{} upcoming shows", count) ) }
                    }
                }
            }
        }
    }
}

fn genre_list(genres: &[String]) -> Markup {
    html! {
        ul.genres {
            @for genre in genres {
                li { ( genre ) }
            }
        }
    }
}

fn booking_list(heading: &str, bookings: &[BookingInfo], count: usize, prefix: &str) -> Markup {
    html! {
        section.bookings {
            h3 { ( format!("{} ({})", heading, count) ) }
            ol {
                @for booking in bookings {
                    li {
                        img src=( booking.image_link ) alt=( booking.name );
                        a href=( format!("{}/{}", prefix, booking.id) ) { ( booking.name ) }
                        span.start-time { ( booking.start_time ) }
                    }
                }
            }
        }
    }
}

fn text_field(name: &str, label: &str, value: &str) -> Markup {
    html! {
        label {
            ( label )
            input type="text" name=( name ) value=( value );
        }
    }
}

fn state_select(selected: &str) -> Markup {
    html! {
        label {
            "State"
            select name="state" {
                @for state in STATES {
                    option value=( state ) selected[*state == selected] { ( state ) }
                }
            }
        }
    }
}

fn genre_select(chosen: &[String]) -> Markup {
    html! {
        label {
            "Genres"
            select name="genres" multiple {
                @for genre in GENRES {
                    option value=( genre ) selected[chosen.iter().any(|g| g == genre)] { ( genre ) }
                }
            }
        }
    }
}

fn checkbox(name: &str, label: &str, checked: bool) -> Markup {
    html! {
        label.checkbox {
            input type="checkbox" name=( name ) value="y" checked[checked];
            ( label )
        }
    }
}
