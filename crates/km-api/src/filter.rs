use serde::{Deserialize, Serialize};

use crate::listing::{Listing, Status};

/// Optional constraints on a listing. `None` places no constraint on that field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub status: Option<Status>,
    pub craft_rating: Option<bool>,
    pub in_chain: Option<bool>,
}

impl FilterSpec {
    /// True when no field constrains anything.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.craft_rating.is_none() && self.in_chain.is_none()
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.status.map_or(true, |s| listing.status == s)
            && self.craft_rating.map_or(true, |c| listing.craft_rating == c)
            && self.in_chain.map_or(true, |c| listing.in_chain == c)
    }

    /// Listings satisfying every set constraint, in input order.
    pub fn apply(&self, listings: &[Listing]) -> Vec<Listing> {
        listings
            .iter()
            .filter(|listing| self.matches(listing))
            .cloned()
            .collect()
    }
}
