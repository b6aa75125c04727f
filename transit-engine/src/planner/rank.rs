//! Itinerary ranking.
//!
//! Orders candidates for presentation:
//! 1. Transfer count (direct rides first)
//! 2. Total distance, including last-mile walks (shorter is better)
//! 3. Route id sequence (determinism tie-break)

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::domain::Itinerary;

/// Rank itineraries best-first.
///
/// The ordering is total: running the same query twice yields identical
/// output, byte for byte.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    itineraries.sort_by(compare);
    itineraries
}

fn compare(a: &Itinerary, b: &Itinerary) -> Ordering {
    a.transfer_count()
        .cmp(&b.transfer_count())
        .then_with(|| a.total_distance_m().total_cmp(&b.total_distance_m()))
        .then_with(|| a.route_ids().cmp(b.route_ids()))
}

/// Collapse candidates with identical leg structure.
///
/// Two candidates are structural duplicates when their legs ride the same
/// routes between the same stops (a transfer stop shared at several
/// positions produces these). The shorter one survives.
pub fn deduplicate(itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    if itineraries.len() <= 1 {
        return itineraries;
    }

    let mut best: HashMap<String, Itinerary> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for itinerary in itineraries {
        let key: String = itinerary
            .legs()
            .iter()
            .map(|leg| format!("{}|{}|{}", leg.route, leg.board, leg.alight))
            .collect::<Vec<_>>()
            .join(";");

        match best.entry(key) {
            Entry::Occupied(mut entry) => {
                if itinerary.total_distance_m() < entry.get().total_distance_m() {
                    entry.insert(itinerary);
                }
            }
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                entry.insert(itinerary);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| best.remove(&key))
        .collect()
}
