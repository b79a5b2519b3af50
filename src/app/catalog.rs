// src/app/catalog.rs
use tracing::debug;

use super::data::Movie;
use super::filters;

pub const MOVIES_PER_ROW: usize = 5;

/// What the grid should show. Rows hold indices into the full catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridLayout {
    Placeholder,
    Rows(Vec<Vec<usize>>),
}

impl GridLayout {
    pub fn row_count(&self) -> usize {
        match self {
            Self::Placeholder => 0,
            Self::Rows(rows) => rows.len(),
        }
    }
}

/// Static movie list plus the view derived from the current search term.
pub struct Catalog {
    all: Vec<Movie>,
    filtered: Vec<usize>,
    layout: GridLayout,
}

impl Catalog {
    pub fn initialize(movies: Vec<Movie>) -> Self {
        let filtered = (0..movies.len()).collect();
        let mut catalog = Self {
            all: movies,
            filtered,
            layout: GridLayout::Placeholder,
        };
        catalog.render();
        catalog
    }

    /// Full rescan of the catalog; always re-renders.
    pub fn search(&mut self, term: &str) {
        self.filtered = filters::filtered_indices(&self.all, term);
        debug!(
            "search {:?}: {}/{} movies",
            term,
            self.filtered.len(),
            self.all.len()
        );
        self.render();
    }

    /// Rebuild the layout from scratch, replacing whatever was rendered before.
    pub fn render(&mut self) -> &GridLayout {
        self.layout = if self.filtered.is_empty() {
            GridLayout::Placeholder
        } else {
            GridLayout::Rows(filters::partition_rows(&self.filtered, MOVIES_PER_ROW))
        };
        &self.layout
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn all(&self) -> &[Movie] {
        &self.all
    }

    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Movie> + '_ {
        self.filtered.iter().filter_map(|&i| self.all.get(i))
    }

    pub fn movie(&self, idx: usize) -> Option<&Movie> {
        self.all.get(idx)
    }
}
