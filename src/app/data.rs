// src/app/data.rs

/// One catalog entry. Built once at startup and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movie {
    pub title: String,
    pub year: String,
    pub rating: String,
    pub poster_url: String,
}

impl Movie {
    pub fn new(title: &str, year: &str, rating: &str, poster_url: &str) -> Self {
        Self {
            title: title.to_string(),
            year: year.to_string(),
            rating: rating.to_string(),
            poster_url: poster_url.to_string(),
        }
    }

    /// "2024 · 8.4" line under the card title.
    pub fn meta_line(&self) -> String {
        format!("{} · {}", self.year, self.rating)
    }
}

const WIKI: &str = "https://upload.wikimedia.org/wikipedia/en";

// (title, year, rating, poster path under WIKI)
const BUILTIN: &[(&str, &str, &str, &str)] = &[
    ("Tourist Family", "2025", "8.3", "/7/75/Tourist_Family.jpg"),
    ("Dragon", "2025", "7.9", "/0/0f/Dragon_2025_poster.jpg"),
    ("Veera Dheera Sooran: Part 2", "2025", "6.9", "/5/5e/Veera_Dheera_Sooran.jpg"),
    ("Kudumbasthan", "2025", "7.3", "/d/d9/Kudumbasthan.jpg"),
    ("Retro", "2025", "6.9", "/d/df/Retro_film_poster.jpg"),
    (
        "Kaadhal Enbadhu Podhu Udamai",
        "2025",
        "6.0",
        "/9/9f/Kaadhal_Enbadhu_Podhu_Udamai_poster.jpg",
    ),
    ("Good Bad Ugly", "2025", "7.1", "/8/83/Good_Bad_Ugly_poster.jpg"),
    ("Thug Life", "2025", "4.3", "/9/95/Thug_Life_2025.jpg"),
    ("Devil's Double Next Level", "2025", "5.0", "/e/eb/DD_Next_Level_Poster.jpg"),
    ("ACE", "2025", "8.6", "/4/40/Ace_film_poster.jpg"),
    ("Jora Kaiya Thattunga", "2025", "5.4", "/f/f5/Jora_Kaiya_Thattunga.jpg"),
    ("Lal Salaam", "2025", "4.5", "/3/35/Lal_Salaam_2024_poster.jpg"),
    ("Padai Thalaivan", "2025", "7.4", "/e/e7/Padai_Thalaivan.jpg"),
    ("Madras Matinee", "2025", "9.0", "/4/45/Madras_Matinee.jpg"),
    ("Chennai City Gangsters", "2025", "4.9", "/e/e2/Chennai_City_Gangsters.jpg"),
    ("Kannappa", "2025", "9.2", "/e/ed/Kannappa_%28film%29.jpg"),
    ("Amaran", "2024", "8.1", "/5/54/Amaran_2024_poster.jpg"),
    ("Kanguva", "2024", "4.5", "/e/e8/Kanguva_poster.jpg"),
    ("Aranmanai 4", "2024", "5.0", "/c/cf/Aranmanai_4.jpg"),
    ("Raayan", "2024", "6.5", "/e/e4/Raayan_poster.jpg"),
    ("Demonte Colony 2", "2024", "6.6", "/5/5c/Demonte_Colony_2.jpg"),
    ("Sorgavaasal", "2024", "6.6", "/6/6f/Sorgavaasal.jpg"),
    ("Neela Nira Sooriyan", "2024", "8.1", "/9/9c/Neela_Nira_Sooriyan.jpg"),
    ("Kadaisi Ulaga Por", "2024", "6.1", "/8/82/Kadaisi_Ulaga_Por_poster.jpg"),
    ("Lubber Pandhu", "2024", "8.2", "/9/91/Lubber_Pandhu.jpg"),
    ("Maharaja", "2024", "8.4", "/8/82/Maharaja_2024_film_poster.jpg"),
    ("Vettaiyan", "2024", "6.9", "/6/68/Vettaiyan_poster.jpg"),
    (
        "The Greatest of All Time",
        "2024",
        "5.7",
        "/1/1e/The_Greatest_of_All_Time.jpg",
    ),
    ("Indian 2", "2024", "3.8", "/6/6f/Indian_2_poster.jpg"),
    ("Eleven", "2025", "7.8", "/f/f3/Eleven_film_poster.jpg"),
];

/// The fixed catalog shown at startup, in display order.
pub fn builtin_movies() -> Vec<Movie> {
    BUILTIN
        .iter()
        .map(|(title, year, rating, path)| {
            Movie::new(title, year, rating, &format!("{WIKI}{path}"))
        })
        .collect()
}
