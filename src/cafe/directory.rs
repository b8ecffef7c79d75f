//! Cafe directory module
//!
//! Read-only mapping from city identifier to the ordered list of cafes in
//! that city. Built once at start-up and shared by every request.

use serde::Deserialize;
use std::collections::HashMap;

use super::query::CafeQuery;

/// A single venue listed for a city
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Cafe {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl Cafe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// `needle` must already be lowercased.
    fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

/// City identifier to cafes, in listing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CafeDirectory {
    cities: HashMap<String, Vec<Cafe>>,
}

impl CafeDirectory {
    pub const fn new(cities: HashMap<String, Vec<Cafe>>) -> Self {
        Self { cities }
    }

    /// Directory served when the configuration has no `cafes` table
    pub fn builtin() -> Self {
        let moscow = [
            "Мир кофе",
            "Сладкоежка",
            "Кофе и завтраки",
            "Сытый студент",
            "Вилка-ложка",
        ];
        let tula = ["Тульский пряник", "Самовар", "Оружейная кухня"];

        [("moscow", &moscow[..]), ("tula", &tula[..])]
            .into_iter()
            .map(|(city, names)| {
                (
                    city.to_string(),
                    names.iter().copied().map(Cafe::new).collect::<Vec<_>>(),
                )
            })
            .collect()
    }

    pub fn contains_city(&self, city: &str) -> bool {
        self.cities.contains_key(city)
    }

    pub fn cafes(&self, city: &str) -> Option<&[Cafe]> {
        self.cities.get(city).map(Vec::as_slice)
    }

    /// City identifiers in sorted order
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = self.cities.keys().map(String::as_str).collect();
        cities.sort_unstable();
        cities
    }

    /// Total number of cafes across all cities
    pub fn len(&self) -> usize {
        self.cities.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.values().all(Vec::is_empty)
    }

    /// Apply the search filter and count limit of a validated query
    ///
    /// Names are compared after full Unicode lowercasing of both sides, so
    /// `кофе` matches `Кофе и завтраки`. Directory order is preserved and
    /// the limit is applied after filtering.
    pub fn select(&self, query: &CafeQuery) -> Vec<&Cafe> {
        let Some(cafes) = self.cafes(&query.city) else {
            return Vec::new();
        };

        let needle = query.search.as_deref().map(str::to_lowercase);
        let limit = query.count.unwrap_or(usize::MAX);

        cafes
            .iter()
            .filter(|cafe| needle.as_deref().map_or(true, |n| cafe.name_contains(n)))
            .take(limit)
            .collect()
    }
}

impl FromIterator<(String, Vec<Cafe>)> for CafeDirectory {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Cafe>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Join cafe names with a bare comma
pub fn render_names(cafes: &[&Cafe]) -> String {
    cafes
        .iter()
        .map(|cafe| cafe.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(city: &str, count: Option<usize>, search: Option<&str>) -> CafeQuery {
        CafeQuery {
            city: city.to_string(),
            count,
            search: search.map(ToString::to_string),
        }
    }

    fn names<'a>(cafes: &[&'a Cafe]) -> Vec<&'a str> {
        cafes.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_builtin_cities() {
        let dir = CafeDirectory::builtin();
        assert_eq!(dir.cities(), vec!["moscow", "tula"]);
        assert!(dir.contains_city("moscow"));
        assert!(!dir.contains_city("Moscow"));
        assert!(!dir.contains_city("omsk"));
        assert!(dir.cafes("moscow").is_some_and(|c| c.len() >= 2));
    }

    #[test]
    fn test_select_keeps_directory_order() {
        let dir = CafeDirectory::builtin();
        let all = dir.select(&query("moscow", None, None));
        let expected: Vec<&str> = dir
            .cafes("moscow")
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names(&all), expected);
    }

    #[test]
    fn test_select_count() {
        let dir = CafeDirectory::builtin();
        let total = dir.cafes("moscow").unwrap().len();

        for (count, want) in [(0, 0), (1, 1), (2, 2), (100, total)] {
            let selected = dir.select(&query("moscow", Some(count), None));
            assert_eq!(selected.len(), want, "count={count}");
        }
    }

    #[test]
    fn test_select_search_unicode_case() {
        let dir = CafeDirectory::builtin();

        let coffee = dir.select(&query("moscow", None, Some("кофе")));
        assert_eq!(names(&coffee), vec!["Мир кофе", "Кофе и завтраки"]);

        let upper = dir.select(&query("moscow", None, Some("КОФЕ")));
        assert_eq!(names(&upper), names(&coffee));

        assert_eq!(dir.select(&query("moscow", None, Some("вилка"))).len(), 1);
        assert!(dir.select(&query("moscow", None, Some("фасоль"))).is_empty());
    }

    #[test]
    fn test_select_search_then_count() {
        let dir = CafeDirectory::builtin();
        let selected = dir.select(&query("moscow", Some(1), Some("кофе")));
        assert_eq!(names(&selected), vec!["Мир кофе"]);
    }

    #[test]
    fn test_select_unknown_city_is_empty() {
        let dir = CafeDirectory::builtin();
        assert!(dir.select(&query("omsk", None, None)).is_empty());
    }

    #[test]
    fn test_fixture_directory() {
        let dir: CafeDirectory = [(
            "kazan".to_string(),
            vec![
                Cafe::new("Чак-чак").with_address("ул. Баумана, 1"),
                Cafe::new("Эчпочмак"),
            ],
        )]
        .into_iter()
        .collect();

        assert_eq!(dir.len(), 2);
        assert!(!dir.is_empty());
        assert_eq!(
            dir.cafes("kazan").unwrap()[0].address.as_deref(),
            Some("ул. Баумана, 1")
        );
        assert!(CafeDirectory::default().is_empty());
    }

    #[test]
    fn test_render_names() {
        let a = Cafe::new("Мир кофе");
        let b = Cafe::new("Самовар");
        assert_eq!(render_names(&[&a, &b]), "Мир кофе,Самовар");
        assert_eq!(render_names(&[&a]), "Мир кофе");
        assert_eq!(render_names(&[]), "");
    }
}
