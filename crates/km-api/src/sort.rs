use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::listing::Listing;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    Name,
}

impl SortKey {
    pub fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            SortKey::Name => collate(&a.name, &b.name),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// A new vector ordered by `key`. Equal keys keep their input order.
pub fn sort(listings: &[Listing], key: SortKey, direction: SortDirection) -> Vec<Listing> {
    let mut sorted = listings.to_vec();
    sorted.sort_by(|a, b| direction.orient(key.compare(a, b)));
    sorted
}

/// Compare two display strings the way a Polish reader expects.
///
/// Letters compare case-insensitively. Polish letters are letters of their
/// own and sort right after their base letter (`a < ą < b`, `l < ł < m`).
/// Other accented letters count as their base letter, and their accents only
/// break ties (`e < é < f`, but `éa < eb`). Case breaks the remaining ties,
/// lowercase first.
pub fn collate(a: &str, b: &str) -> Ordering {
    letters(a)
        .map(|(letter, _)| letter)
        .cmp(letters(b).map(|(letter, _)| letter))
        .then_with(|| {
            letters(a)
                .map(|(_, accent)| accent)
                .cmp(letters(b).map(|(_, accent)| accent))
        })
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}

fn letters(s: &str) -> impl Iterator<Item = ((char, u8), u8)> + '_ {
    s.chars().flat_map(char::to_lowercase).map(fold)
}

/// Letter (base letter and Polish rank) and secondary accent rank.
fn fold(c: char) -> ((char, u8), u8) {
    match c {
        'ą' => (('a', 1), 0),
        'ć' => (('c', 1), 0),
        'ę' => (('e', 1), 0),
        'ł' => (('l', 1), 0),
        'ń' => (('n', 1), 0),
        'ó' => (('o', 1), 0),
        'ś' => (('s', 1), 0),
        'ź' => (('z', 1), 0),
        'ż' => (('z', 2), 0),
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => (('a', 0), 1),
        'ç' | 'č' => (('c', 0), 1),
        'é' | 'è' | 'ê' | 'ë' | 'ě' => (('e', 0), 1),
        'í' | 'ì' | 'î' | 'ï' => (('i', 0), 1),
        'ñ' | 'ň' => (('n', 0), 1),
        'ò' | 'ô' | 'ö' | 'õ' => (('o', 0), 1),
        'š' => (('s', 0), 1),
        'ú' | 'ù' | 'û' | 'ü' | 'ů' => (('u', 0), 1),
        'ý' | 'ÿ' => (('y', 0), 1),
        'ž' => (('z', 0), 1),
        other => ((other, 0), 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Status;

    fn named(id: &str, name: &str) -> Listing {
        Listing {
            id: id.to_string(),
            name: name.to_string(),
            address: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            status: Status::Unknown,
            craft_rating: false,
            in_chain: false,
        }
    }

    fn names(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn collate_ignores_case() {
        assert_eq!(collate("amir", "Bafra"), Ordering::Less);
        assert_eq!(collate("kebab", "Kebab"), Ordering::Less);
        assert_eq!(collate("Kebab", "Kebab"), Ordering::Equal);
    }

    #[test]
    fn collate_places_polish_letters_after_base() {
        assert_eq!(collate("Lulu", "Łódź"), Ordering::Less);
        assert_eq!(collate("Łódź", "Mama"), Ordering::Less);
        assert_eq!(collate("Saray", "Śródmieście"), Ordering::Less);
        assert_eq!(collate("Źródło", "Żak"), Ordering::Less);
    }

    #[test]
    fn collate_treats_foreign_accents_as_tie_breakers() {
        assert_eq!(collate("éa", "eb"), Ordering::Less);
        assert_eq!(collate("eb", "éa"), Ordering::Greater);
        assert_eq!(collate("Cafe", "Café"), Ordering::Less);
        assert_eq!(collate("Café", "Cafg"), Ordering::Less);
        assert_eq!(collate("Döner", "Doner"), Ordering::Greater);
        // Polish letters stay letters of their own.
        assert_eq!(collate("ąa", "ab"), Ordering::Greater);
    }

    #[test]
    fn sort_ascending_and_descending() {
        let listings = vec![named("1", "Kebab 2"), named("2", "Kebab 3"), named("3", "Kebab 1")];
        let asc = sort(&listings, SortKey::Name, SortDirection::Ascending);
        assert_eq!(names(&asc), vec!["Kebab 1", "Kebab 2", "Kebab 3"]);
        let desc = sort(&listings, SortKey::Name, SortDirection::Descending);
        assert_eq!(names(&desc), vec!["Kebab 3", "Kebab 2", "Kebab 1"]);
    }

    #[test]
    fn sort_is_stable_for_equal_names() {
        let listings = vec![named("a", "Same"), named("b", "Other"), named("c", "Same")];
        let asc = sort(&listings, SortKey::Name, SortDirection::Ascending);
        let ids: Vec<_> = asc.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        let desc = sort(&listings, SortKey::Name, SortDirection::Descending);
        let ids: Vec<_> = desc.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn toggled_flips_direction() {
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
    }
}
