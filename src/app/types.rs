// src/app/types.rs
use eframe::egui::TextureHandle;

use super::tmdb::LookupError;
use super::utils;

// ---- detail overlay ----

/// Display-ready details for one movie. Every field already carries its fallback text.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailRecord {
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub genres: Vec<String>,
    pub rating: Option<f64>,
    pub poster_url: String,
}

impl DetailRecord {
    pub fn genres_text(&self) -> String {
        utils::join_genres(&self.genres)
    }

    pub fn rating_text(&self) -> String {
        utils::format_rating(self.rating)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayState {
    Hidden,
    Loading { title: String },
    Loaded(DetailRecord),
    Errored(String),
}

impl OverlayState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

// ---- cross-thread messages ----

pub struct LookupMsg {
    pub token: u64,
    pub title: String,
    pub result: Result<DetailRecord, LookupError>,
}

/// RGBA8 pixels ready for upload.
pub struct DecodedPoster {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub struct PosterDone {
    pub url: String,
    pub result: Result<DecodedPoster, String>,
}

// ---- posters ----

pub enum PosterState {
    Pending,
    Decoded(DecodedPoster), // waiting for a texture upload slot
    Ready(TextureHandle),   // UI thread only
    Failed,
}

/// What a card or the overlay should paint for a poster URL.
#[derive(Clone)]
pub enum PosterView {
    Loading,
    Ready(TextureHandle),
    Missing,
}
