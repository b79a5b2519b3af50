// src/app/utils.rs
use chrono::NaiveDate;

pub const NO_POSTER_URL: &str = "https://via.placeholder.com/300x450?text=No+Poster+Available";

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const NO_OVERVIEW: &str = "No overview available";
pub const UNKNOWN_RELEASE: &str = "Unknown";
pub const NO_GENRES: &str = "No genres available";
pub const NO_RATING: &str = "N/A";

/// `Some("")` and whitespace-only strings count as missing.
pub(crate) fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

/// "2024-03-05" -> "March 5, 2024". Anything that is not an ISO date is shown as given.
pub fn format_release_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return UNKNOWN_RELEASE.to_string();
    };
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// One decimal place. Exact halves (8.25) round up rather than to even.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.is_finite() => {
            let scaled = r * 10.0;
            // mul_add yields the product's rounding error; zero means `scaled` is exact
            let exact_half = scaled.fract().abs() == 0.5 && r.mul_add(10.0, -scaled) == 0.0;
            if exact_half {
                format!("{:.1}", scaled.round() / 10.0)
            } else {
                format!("{r:.1}")
            }
        }
        _ => NO_RATING.to_string(),
    }
}

pub fn join_genres(genres: &[String]) -> String {
    if genres.is_empty() {
        NO_GENRES.to_string()
    } else {
        genres.join(", ")
    }
}

pub fn compose_poster_url(image_base: &str, poster_path: Option<&str>) -> String {
    match poster_path.filter(|p| !p.trim().is_empty()) {
        Some(path) => format!("{image_base}{path}"),
        None => NO_POSTER_URL.to_string(),
    }
}

pub fn is_placeholder_poster(url: &str) -> bool {
    url.is_empty() || url == NO_POSTER_URL
}
