//! Offline planner serving a fixed catalog.
//!
//! Used when no planning endpoint is configured. Entries tagged with one of
//! the group's preferences are listed first, and the one matching the
//! budget tier is flagged `best`.

use async_trait::async_trait;
use huddle_application::ports::planner::{PlannerError, PlanningCollaborator};
use huddle_domain::{BudgetTier, PlanKind, PlanRequest, Recommendation};

struct Entry {
    /// `{city}` is replaced with the session city
    name: &'static str,
    tags: &'static [&'static str],
    cost: [f64; 3],
}

const LOCATIONS: &[Entry] = &[
    Entry {
        name: "{city} Botanical Garden",
        tags: &["outdoor", "park", "nature", "relax"],
        cost: [0.0, 8.0, 15.0],
    },
    Entry {
        name: "{city} Museum of Art",
        tags: &["museum", "art", "history", "indoor"],
        cost: [10.0, 18.0, 30.0],
    },
    Entry {
        name: "Old Town walking tour",
        tags: &["history", "walking", "outdoor", "culture"],
        cost: [0.0, 15.0, 40.0],
    },
    Entry {
        name: "Waterfront promenade",
        tags: &["outdoor", "views", "beach", "walking"],
        cost: [0.0, 0.0, 0.0],
    },
    Entry {
        name: "Live music district",
        tags: &["music", "nightlife", "bars"],
        cost: [5.0, 20.0, 50.0],
    },
];

const RESTAURANTS: &[Entry] = &[
    Entry {
        name: "Street food market",
        tags: &["casual", "variety", "outdoor"],
        cost: [12.0, 15.0, 20.0],
    },
    Entry {
        name: "Neighbourhood bistro",
        tags: &["local", "cozy"],
        cost: [25.0, 30.0, 40.0],
    },
    Entry {
        name: "Chef's tasting menu",
        tags: &["fine dining", "wine"],
        cost: [70.0, 90.0, 120.0],
    },
];

fn tier_index(budget: BudgetTier) -> usize {
    match budget {
        BudgetTier::Low => 0,
        BudgetTier::Medium => 1,
        BudgetTier::High => 2,
    }
}

fn matches_preferences(entry: &Entry, preferences: &[String]) -> bool {
    preferences.iter().any(|preference| {
        let preference = preference.to_lowercase();
        entry.tags.iter().any(|tag| preference.contains(tag))
    })
}

fn render(entry: &Entry, request: &PlanRequest) -> Recommendation {
    Recommendation::new(entry.name.replace("{city}", &request.city))
        .with_cost(entry.cost[tier_index(request.budget)])
        .with_detail("tags", entry.tags.to_vec())
}

/// Catalog entries, preference matches first; original order otherwise
fn ranked_locations(request: &PlanRequest) -> Vec<Recommendation> {
    let (mut matching, rest): (Vec<&Entry>, Vec<&Entry>) = LOCATIONS
        .iter()
        .partition(|entry| matches_preferences(entry, &request.preferences));
    matching.extend(rest);

    let mut recommendations: Vec<Recommendation> =
        matching.into_iter().map(|entry| render(entry, request)).collect();
    if let Some(first) = recommendations.first_mut() {
        first.best = true;
    }
    recommendations
}

fn restaurants(request: &PlanRequest) -> Vec<Recommendation> {
    let best = tier_index(request.budget);
    RESTAURANTS
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let recommendation = render(entry, request);
            if i == best {
                recommendation.marked_best()
            } else {
                recommendation
            }
        })
        .collect()
}

fn transport(request: &PlanRequest) -> Vec<Recommendation> {
    let near = request
        .context
        .get("location")
        .map(|place| format!(" to {}", place))
        .unwrap_or_default();

    let transit = Recommendation::new(format!("Public transit{}", near)).with_cost(3.0);
    let rideshare = Recommendation::new(format!("Rideshare{}", near))
        .with_cost((40.0 / request.group_size.max(1) as f64).ceil())
        .with_detail("vehicles", request.group_size.div_ceil(4).max(1));

    if request.group_size > 4 || request.budget == BudgetTier::High {
        vec![rideshare.marked_best(), transit]
    } else {
        vec![transit.marked_best(), rideshare]
    }
}

pub struct CatalogPlanner;

#[async_trait]
impl PlanningCollaborator for CatalogPlanner {
    async fn plan(&self, request: &PlanRequest) -> Result<Vec<Recommendation>, PlannerError> {
        Ok(match request.kind {
            PlanKind::Locations => ranked_locations(request),
            PlanKind::Restaurants => restaurants(request),
            PlanKind::Transport => transport(request),
            PlanKind::Weather => vec![
                Recommendation::new(format!(
                    "No live forecast for {} offline; check before heading out",
                    request.city
                ))
                .marked_best(),
            ],
            PlanKind::Insights => vec![
                Recommendation::new(format!(
                    "Book ahead for a group of {}",
                    request.group_size
                ))
                .marked_best(),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_domain::canonical;
    use std::collections::BTreeMap;

    fn request(kind: PlanKind, preferences: &[&str], budget: BudgetTier) -> PlanRequest {
        PlanRequest {
            kind,
            city: "Lisbon".to_string(),
            group_size: 4,
            preferences: preferences.iter().map(|p| p.to_string()).collect(),
            budget,
            context: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_locations_rank_preference_matches_first() {
        let list = CatalogPlanner
            .plan(&request(PlanKind::Locations, &["Museum!"], BudgetTier::Medium))
            .await
            .unwrap();

        assert_eq!(list[0].name, "Lisbon Museum of Art");
        assert!(list[0].best);
        assert_eq!(list.len(), LOCATIONS.len());
    }

    #[tokio::test]
    async fn test_locations_keep_catalog_order_without_matches() {
        let list = CatalogPlanner
            .plan(&request(PlanKind::Locations, &["skydiving"], BudgetTier::Low))
            .await
            .unwrap();

        assert_eq!(list[0].name, "Lisbon Botanical Garden");
        assert_eq!(list[0].estimated_cost_per_person, Some(0.0));
    }

    #[tokio::test]
    async fn test_restaurant_best_follows_budget() {
        let list = CatalogPlanner
            .plan(&request(PlanKind::Restaurants, &[], BudgetTier::High))
            .await
            .unwrap();

        assert_eq!(canonical(&list).unwrap().name, "Chef's tasting menu");
        assert_eq!(list[0].name, "Street food market");
    }

    #[tokio::test]
    async fn test_transport_mentions_selected_location() {
        let mut req = request(PlanKind::Transport, &[], BudgetTier::Low);
        req.context
            .insert("location".to_string(), "Belém".to_string());

        let list = CatalogPlanner.plan(&req).await.unwrap();

        assert_eq!(canonical(&list).unwrap().name, "Public transit to Belém");
    }

    #[tokio::test]
    async fn test_large_group_prefers_rideshare() {
        let mut req = request(PlanKind::Transport, &[], BudgetTier::Medium);
        req.group_size = 7;

        let list = CatalogPlanner.plan(&req).await.unwrap();

        assert!(list[0].name.starts_with("Rideshare"));
        assert_eq!(list[0].details["vehicles"], 2);
    }
}
