//! Derived view: client-side type filter and sort over the loaded page

use std::cmp::Ordering;

use crate::state::{PokemonSummary, SortField, SortOrder};

/// Filters and sorts the loaded page without touching it.
///
/// The filter only sees the current page, so a filtered view may hold fewer
/// than `limit` cards while paging still follows the unfiltered total.
/// Sorting is stable; `Desc` flips the comparator, so equal keys keep their
/// page order in both directions.
pub fn apply_view_transform<'a>(
    items: &'a [PokemonSummary],
    filter_type: &str,
    sort_field: SortField,
    sort_order: SortOrder,
) -> Vec<&'a PokemonSummary> {
    let mut view: Vec<&PokemonSummary> = items
        .iter()
        .filter(|item| filter_type.is_empty() || item.has_type(filter_type))
        .collect();

    view.sort_by(|a, b| {
        let ordering = compare_by(a, b, sort_field);
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    view
}

fn compare_by(a: &PokemonSummary, b: &PokemonSummary, field: SortField) -> Ordering {
    match field {
        SortField::Name => locale_cmp(&a.name, &b.name),
        SortField::BaseExperience => a.base_experience.cmp(&b.base_experience),
    }
}

/// Root-locale style ordering. Primary weights put punctuation and spaces
/// before digits and digits before letters, case-insensitively. Remaining
/// ties are broken lowercase-first, then by the raw string.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn primary_key(value: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(|ch| (char_class(ch), ch))
}

fn char_class(ch: char) -> u8 {
    if ch.is_alphabetic() {
        2
    } else if ch.is_numeric() {
        1
    } else {
        0
    }
}

/// First differing case decides; lowercase sorts before uppercase.
fn case_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .map(|(x, y)| x.is_uppercase().cmp(&y.is_uppercase()))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mon(name: &str, base_experience: u32, types: &[&str]) -> PokemonSummary {
        PokemonSummary {
            id: 0,
            name: name.to_string(),
            base_experience,
            height: 0,
            weight: 0,
            types: types.iter().map(|t| t.to_string()).collect(),
            stats: Vec::new(),
            artwork_url: None,
        }
    }

    fn names(view: &[&PokemonSummary]) -> Vec<String> {
        view.iter().map(|item| item.name.clone()).collect()
    }

    #[test]
    fn sorts_by_name_ascending_and_descending() {
        let items = vec![
            mon("squirtle", 63, &["water"]),
            mon("bulbasaur", 64, &["grass"]),
            mon("charmander", 62, &["fire"]),
        ];

        let asc = apply_view_transform(&items, "", SortField::Name, SortOrder::Asc);
        let desc = apply_view_transform(&items, "", SortField::Name, SortOrder::Desc);

        assert_eq!(names(&asc), vec!["bulbasaur", "charmander", "squirtle"]);
        let mut reversed = names(&desc);
        reversed.reverse();
        assert_eq!(names(&asc), reversed);
    }

    #[test]
    fn sorts_by_base_experience_numerically() {
        let items = vec![
            mon("a", 100, &[]),
            mon("b", 9, &[]),
            mon("c", 55, &[]),
        ];

        let asc = apply_view_transform(&items, "", SortField::BaseExperience, SortOrder::Asc);
        assert_eq!(names(&asc), vec!["b", "c", "a"]);

        let desc = apply_view_transform(&items, "", SortField::BaseExperience, SortOrder::Desc);
        assert_eq!(names(&desc), vec!["a", "c", "b"]);
    }

    #[test]
    fn ties_keep_page_order_in_both_directions() {
        let items = vec![
            mon("first", 50, &[]),
            mon("second", 50, &[]),
            mon("low", 10, &[]),
        ];

        let asc = apply_view_transform(&items, "", SortField::BaseExperience, SortOrder::Asc);
        assert_eq!(names(&asc), vec!["low", "first", "second"]);

        let desc = apply_view_transform(&items, "", SortField::BaseExperience, SortOrder::Desc);
        assert_eq!(names(&desc), vec!["first", "second", "low"]);
    }

    #[test]
    fn filter_keeps_only_matching_type_in_page_order() {
        let mut items = Vec::new();
        for index in 0..12 {
            let kind = if index % 4 == 1 { "fire" } else { "normal" };
            items.push(mon(&format!("mon-{index:02}"), index, &[kind]));
        }

        let view = apply_view_transform(&items, "fire", SortField::BaseExperience, SortOrder::Asc);

        assert_eq!(names(&view), vec!["mon-01", "mon-05", "mon-09"]);
        assert!(view.iter().all(|item| item.has_type("fire")));
    }

    #[test]
    fn transform_is_repeatable_and_leaves_input_alone() {
        let items = vec![mon("zubat", 49, &["poison", "flying"]), mon("abra", 62, &["psychic"])];
        let before = items.clone();

        let first = apply_view_transform(&items, "", SortField::Name, SortOrder::Desc);
        let second = apply_view_transform(&items, "", SortField::Name, SortOrder::Desc);

        assert_eq!(first, second);
        assert_eq!(items, before);
    }

    #[test]
    fn locale_cmp_weighs_punctuation_then_digits_then_letters() {
        assert_eq!(locale_cmp("porygon-z", "porygon2"), Ordering::Less);
        assert_eq!(locale_cmp("ho-oh", "hoopa"), Ordering::Less);
        assert_eq!(locale_cmp("porygon2", "porygonz"), Ordering::Less);
        assert_eq!(locale_cmp("mr mime", "mr-mime"), Ordering::Less);
    }

    #[test]
    fn locale_cmp_ignores_case_until_tie_then_lowercase_first() {
        assert_eq!(locale_cmp("Mr-Mime", "mr-mime"), Ordering::Greater);
        assert_eq!(locale_cmp("mr-mime", "Mr-Mime"), Ordering::Less);
        assert_eq!(locale_cmp("Zubat", "abra"), Ordering::Greater);
        assert_eq!(locale_cmp("abra", "Abra"), Ordering::Less);
        assert_eq!(locale_cmp("pikachu", "pikachu"), Ordering::Equal);
    }

    #[test]
    fn name_sort_places_hyphenated_forms_first() {
        let items = vec![
            mon("porygon2", 180, &["normal"]),
            mon("porygon-z", 241, &["normal"]),
            mon("porygon", 79, &["normal"]),
        ];

        let asc = apply_view_transform(&items, "", SortField::Name, SortOrder::Asc);

        assert_eq!(names(&asc), vec!["porygon", "porygon-z", "porygon2"]);
    }
}
