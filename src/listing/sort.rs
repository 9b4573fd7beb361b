//! Comparison-based ordering for result and favorites lists.

use crate::domain::{CatalogItem, MovieSummary};
use chrono::NaiveDate;
use deunicode::deunicode;
use std::cmp::Ordering;

/// Field a list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Title,
    ReleaseDate,
    VoteAverage,
    Popularity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortField {
    /// Direction used when the user picks a field without choosing one.
    ///
    /// Popularity reads most naturally highest first; everything else ascends.
    #[must_use]
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::Popularity => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    /// Cycles to the next field, used by the favorites panel sort key.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::ReleaseDate,
            Self::ReleaseDate => Self::VoteAverage,
            Self::VoteAverage => Self::Popularity,
            Self::Popularity => Self::Title,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::ReleaseDate => "release date",
            Self::VoteAverage => "rating",
            Self::Popularity => "popularity",
        }
    }
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Anything with the fields a list can be sorted on.
pub trait Sortable {
    fn sort_title(&self) -> &str;
    fn sort_release_date(&self) -> Option<NaiveDate>;
    fn sort_vote_average(&self) -> Option<f64>;
    fn sort_popularity(&self) -> Option<f64>;
}

impl Sortable for MovieSummary {
    fn sort_title(&self) -> &str {
        &self.title
    }

    fn sort_release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    fn sort_vote_average(&self) -> Option<f64> {
        self.vote_average
    }

    fn sort_popularity(&self) -> Option<f64> {
        self.popularity
    }
}

impl Sortable for CatalogItem {
    fn sort_title(&self) -> &str {
        self.title()
    }

    fn sort_release_date(&self) -> Option<NaiveDate> {
        self.as_movie().and_then(|m| m.release_date)
    }

    fn sort_vote_average(&self) -> Option<f64> {
        self.as_movie().and_then(|m| m.vote_average)
    }

    fn sort_popularity(&self) -> Option<f64> {
        match self {
            Self::Movie(m) => m.popularity,
            Self::Person(p) => p.popularity,
            Self::Company(_) => None,
        }
    }
}

/// Locale-aware, case-insensitive title ordering.
///
/// Accented letters fold to their base letter before comparing, so "Édith"
/// files under E. Titles that differ only in case or accents compare equal
/// and keep their incoming order under a stable sort.
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

fn collation_key(title: &str) -> String {
    deunicode(title).to_lowercase()
}

/// Missing values order lowest.
fn compare_optional_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Builds a comparator for `field` in `direction`.
///
/// # Ordering rules
///
/// - `Title`: case-insensitive
/// - `ReleaseDate`: chronological, missing dates earliest
/// - `VoteAverage`: numeric, missing ratings lowest
/// - `Popularity`: numeric, missing popularity lowest
///
/// Pass [`SortField::default_direction`] to get popularity highest first.
///
/// # Example
///
/// ```
/// use marquee::domain::MovieSummary;
/// use marquee::listing::{compare_by_field, SortDirection, SortField};
///
/// let mut movies = vec![MovieSummary::new(2, "heat"), MovieSummary::new(1, "Alien")];
/// movies.sort_by(compare_by_field(SortField::Title, SortDirection::Ascending));
/// assert_eq!(movies[0].title, "Alien");
/// ```
pub fn compare_by_field<T: Sortable>(
    field: SortField,
    direction: SortDirection,
) -> impl Fn(&T, &T) -> Ordering {
    move |a, b| {
        let ordering = match field {
            SortField::Title => compare_titles(a.sort_title(), b.sort_title()),
            SortField::ReleaseDate => a.sort_release_date().cmp(&b.sort_release_date()),
            SortField::VoteAverage => {
                compare_optional_f64(a.sort_vote_average(), b.sort_vote_average())
            }
            SortField::Popularity => {
                compare_optional_f64(a.sort_popularity(), b.sort_popularity())
            }
        };
        direction.apply(ordering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str, date: Option<(i32, u32, u32)>, rating: Option<f64>) -> MovieSummary {
        let mut m = MovieSummary::new(id, title);
        m.release_date = date.and_then(|(y, mo, d)| NaiveDate::from_ymd_opt(y, mo, d));
        m.vote_average = rating;
        m.popularity = rating.map(|r| r * 10.0);
        m
    }

    fn titles(movies: &[MovieSummary]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn title_sort_ignores_case_and_reverses() {
        let mut movies = vec![
            movie(1, "zodiac", None, None),
            movie(2, "Alien", None, None),
            movie(3, "heat", None, None),
        ];

        movies.sort_by(compare_by_field(SortField::Title, SortDirection::Ascending));
        assert_eq!(titles(&movies), vec!["Alien", "heat", "zodiac"]);

        movies.sort_by(compare_by_field(SortField::Title, SortDirection::Descending));
        assert_eq!(titles(&movies), vec!["zodiac", "heat", "Alien"]);
    }

    #[test]
    fn accented_titles_file_under_their_base_letter() {
        assert_eq!(compare_titles("Édith", "Zorro"), Ordering::Less);
        assert_eq!(compare_titles("Amélie", "Amen"), Ordering::Less);
        assert_eq!(compare_titles("amélie", "AMELIE"), Ordering::Equal);

        let mut movies = vec![
            movie(1, "Zorro", None, None),
            movie(2, "Amen", None, None),
            movie(3, "Édith", None, None),
            movie(4, "Amélie", None, None),
        ];
        movies.sort_by(compare_by_field(SortField::Title, SortDirection::Ascending));
        assert_eq!(titles(&movies), vec!["Amélie", "Amen", "Édith", "Zorro"]);
    }

    #[test]
    fn titles_differing_only_in_case_keep_incoming_order() {
        let mut movies = vec![
            movie(1, "heat", None, None),
            movie(2, "Alien", None, None),
            movie(3, "Heat", None, None),
            movie(4, "alien", None, None),
        ];

        movies.sort_by(compare_by_field(SortField::Title, SortDirection::Ascending));
        assert_eq!(titles(&movies), vec!["Alien", "alien", "heat", "Heat"]);

        movies.sort_by(compare_by_field(SortField::Title, SortDirection::Descending));
        assert_eq!(titles(&movies), vec!["heat", "Heat", "Alien", "alien"]);
    }

    #[test]
    fn missing_release_date_sorts_earliest() {
        let mut movies = vec![
            movie(1, "B", Some((2001, 1, 1)), None),
            movie(2, "A", None, None),
            movie(3, "C", Some((1999, 6, 1)), None),
        ];

        movies.sort_by(compare_by_field(SortField::ReleaseDate, SortDirection::Ascending));
        assert_eq!(titles(&movies), vec!["A", "C", "B"]);
    }

    #[test]
    fn missing_rating_sorts_lowest() {
        let mut movies = vec![
            movie(1, "A", None, Some(7.5)),
            movie(2, "B", None, None),
            movie(3, "C", None, Some(8.1)),
        ];

        movies.sort_by(compare_by_field(SortField::VoteAverage, SortDirection::Descending));
        assert_eq!(titles(&movies), vec!["C", "A", "B"]);
    }

    #[test]
    fn popularity_defaults_to_descending() {
        let mut movies = vec![
            movie(1, "low", None, Some(1.0)),
            movie(2, "high", None, Some(9.0)),
        ];
        let direction = SortField::Popularity.default_direction();

        movies.sort_by(compare_by_field(SortField::Popularity, direction));
        assert_eq!(titles(&movies), vec!["high", "low"]);
        assert_eq!(SortField::Title.default_direction(), SortDirection::Ascending);
    }
}
