use super::data::Movie;

/// Trim and case-fold a search term.
pub fn normalize_term(s: &str) -> String {
    s.trim().to_lowercase()
}

/// `term` must already be normalized. Years match as substrings, so "202" hits 2024 and 2025.
pub fn movie_matches(movie: &Movie, term: &str) -> bool {
    movie.title.to_lowercase().contains(term) || movie.year.contains(term)
}

/// Indices into `movies` that match `term`, in catalog order. An empty term keeps everything.
pub fn filtered_indices(movies: &[Movie], term: &str) -> Vec<usize> {
    let term = normalize_term(term);
    if term.is_empty() {
        return (0..movies.len()).collect();
    }
    movies
        .iter()
        .enumerate()
        .filter(|(_, m)| movie_matches(m, &term))
        .map(|(i, _)| i)
        .collect()
}

/// Consecutive groups of `per_row`; only the last group may be shorter.
pub fn partition_rows(indices: &[usize], per_row: usize) -> Vec<Vec<usize>> {
    indices
        .chunks(per_row.max(1))
        .map(<[usize]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::builtin_movies;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_term("  MahaRAJA \t"), "maharaja");
        assert_eq!(normalize_term("   "), "");
    }

    #[test]
    fn year_prefix_matches_both_years() {
        let movies = builtin_movies();
        assert_eq!(filtered_indices(&movies, "202").len(), movies.len());
        let only_2024 = filtered_indices(&movies, "2024");
        assert!(only_2024.iter().all(|&i| movies[i].year == "2024"));
    }

    #[test]
    fn title_match_is_case_insensitive_substring() {
        let movies = builtin_movies();
        let hits = filtered_indices(&movies, "SOOR");
        let titles: Vec<&str> = hits.iter().map(|&i| movies[i].title.as_str()).collect();
        assert_eq!(titles, vec!["Veera Dheera Sooran: Part 2", "Neela Nira Sooriyan"]);
    }

    #[test]
    fn every_result_contains_term_and_every_exclusion_does_not() {
        let movies = builtin_movies();
        for term in ["a", "the", "2", "025", "part", "x", "ACE", " lubber ", "zzz", "'"] {
            let norm = normalize_term(term);
            let hits = filtered_indices(&movies, term);
            for (i, m) in movies.iter().enumerate() {
                let expected = m.title.to_lowercase().contains(&norm) || m.year.contains(&norm);
                assert_eq!(hits.contains(&i), expected, "term {term:?} movie {}", m.title);
            }
            assert!(hits.windows(2).all(|w| w[0] < w[1]), "order kept for {term:?}");
        }
    }

    #[test]
    fn partition_sizes() {
        for n in 0..=17usize {
            let idx: Vec<usize> = (0..n).collect();
            let rows = partition_rows(&idx, 5);
            assert_eq!(rows.len(), n.div_ceil(5));
            if let Some((last, full)) = rows.split_last() {
                assert!(full.iter().all(|r| r.len() == 5));
                assert!((1..=5).contains(&last.len()));
            }
            assert_eq!(rows.concat(), idx);
        }
    }
}
