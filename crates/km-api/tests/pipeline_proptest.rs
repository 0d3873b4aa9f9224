use std::{collections::BTreeSet, num::NonZeroUsize};

use km_api::filter::FilterSpec;
use km_api::paginate::Paginator;
use km_api::sort::{sort, SortDirection, SortKey};
use km_api::{Listing, Status};
use proptest::prelude::*;

fn status() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Open),
        Just(Status::Closed),
        Just(Status::Planned),
        Just(Status::Unknown),
    ]
}

fn listing() -> impl Strategy<Value = Listing> {
    (
        "[0-9]{1,4}",
        "[a-zA-ZąćęłńóśźżĄŁŻ ]{0,8}",
        status(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(id, name, status, craft_rating, in_chain)| Listing {
            id,
            name,
            address: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            status,
            craft_rating,
            in_chain,
        })
}

fn filter_spec() -> impl Strategy<Value = FilterSpec> {
    (
        proptest::option::of(status()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(status, craft_rating, in_chain)| FilterSpec {
            status,
            craft_rating,
            in_chain,
        })
}

proptest! {
    #[test]
    fn empty_filter_keeps_everything(listings in prop::collection::vec(listing(), 0..30)) {
        prop_assert_eq!(FilterSpec::default().apply(&listings), listings);
    }

    #[test]
    fn filter_is_idempotent(
        listings in prop::collection::vec(listing(), 0..30),
        spec in filter_spec(),
    ) {
        let once = spec.apply(&listings);
        prop_assert_eq!(spec.apply(&once), once);
    }

    #[test]
    fn filters_commute(
        listings in prop::collection::vec(listing(), 0..30),
        a in filter_spec(),
        b in filter_spec(),
    ) {
        prop_assert_eq!(b.apply(&a.apply(&listings)), a.apply(&b.apply(&listings)));
    }

    #[test]
    fn descending_is_reversed_ascending_for_distinct_names(
        names in prop::collection::btree_set("[a-zA-ZąćęłńóśźżĄŁŻ]{1,6}", 0..20),
    ) {
        let names: BTreeSet<String> = names;
        let listings: Vec<Listing> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Listing {
                id: i.to_string(),
                name,
                address: String::new(),
                latitude: 0.0,
                longitude: 0.0,
                status: Status::Open,
                craft_rating: false,
                in_chain: false,
            })
            .collect();
        let mut ascending = sort(&listings, SortKey::Name, SortDirection::Ascending);
        let descending = sort(&listings, SortKey::Name, SortDirection::Descending);
        ascending.reverse();
        prop_assert_eq!(ascending, descending);
    }

    #[test]
    fn sort_keeps_every_listing(listings in prop::collection::vec(listing(), 0..30)) {
        let sorted = sort(&listings, SortKey::Name, SortDirection::Ascending);
        prop_assert_eq!(sorted.len(), listings.len());
        for listing in &listings {
            prop_assert!(sorted.contains(listing));
        }
    }

    #[test]
    fn pages_concatenate_to_input(
        listings in prop::collection::vec(listing(), 0..50),
        page_size in 1_usize..12,
    ) {
        let paginator = Paginator::new(NonZeroUsize::new(page_size).unwrap());
        let page_count = paginator.page_count(listings.len());
        let joined: Vec<Listing> = (1..=page_count)
            .flat_map(|page| paginator.page(&listings, page).to_vec())
            .collect();
        prop_assert_eq!(joined, listings.clone());
        prop_assert!(paginator.page(&listings, page_count + 1).is_empty());
        for page in 1..=page_count {
            prop_assert!(paginator.page(&listings, page).len() <= page_size);
        }
    }
}
