use crate::models::{Provider, SearchQuery};

/// Evaluate a query against a provider list
///
/// Pure and deterministic: providers that pass every predicate come back
/// in their original relative order, nothing is re-ranked. The individual
/// predicates:
///
/// - symptom: case-insensitive substring match against any symptom tag,
///   condition tag, or the display name; empty matches everything
/// - radius: excluded when a known distance exceeds the radius; providers
///   without a distance pass (absence is not failure)
/// - specialties: at least one overlap with the query set, when non-empty
/// - quality: excluded when a known score is below the minimum
pub fn evaluate(providers: &[Provider], query: &SearchQuery) -> Vec<Provider> {
    providers
        .iter()
        .filter(|p| matches(p, query))
        .cloned()
        .collect()
}

fn matches(provider: &Provider, query: &SearchQuery) -> bool {
    if !query.symptom.is_empty() {
        let needle = query.symptom.to_lowercase();
        let symptom_hit = provider
            .symptoms
            .iter()
            .chain(provider.conditions.iter())
            .any(|tag| tag.to_lowercase().contains(&needle))
            || provider.name.to_lowercase().contains(&needle);
        if !symptom_hit {
            return false;
        }
    }

    if let Some(distance) = provider.distance {
        if distance > query.radius {
            return false;
        }
    }

    if !query.specialties.is_empty() {
        let specialty_hit = provider
            .specialties
            .iter()
            .any(|s| query.specialties.contains(s));
        if !specialty_hit {
            return false;
        }
    }

    if let Some(score) = provider.hcahps_score {
        if score < query.min_hcahps {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled::BundledData;

    fn provider(id: &str, specialties: &[&str], symptoms: &[&str]) -> Provider {
        Provider {
            id: id.to_string(),
            npi: format!("99{}", id),
            name: format!("Dr. Test {}", id),
            first_name: "Test".into(),
            last_name: id.to_string(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            hospital_id: None,
            hospital_name: None,
            hcahps_score: Some(85),
            lat: 0.0,
            lng: 0.0,
            distance: Some(5.0),
            conditions: Vec::new(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            phone: None,
            address: None,
        }
    }

    fn ids(providers: &[Provider]) -> Vec<&str> {
        providers.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let providers = BundledData::new().providers;
        let results = evaluate(&providers, &SearchQuery::default());
        assert_eq!(results.len(), providers.len());
        assert_eq!(ids(&results), ids(&providers));
    }

    #[test]
    fn test_symptom_matches_tags_conditions_and_name() {
        let mut by_condition = provider("cond", &["Cardiology"], &[]);
        by_condition.conditions = vec!["Coronary Artery Disease".into()];
        let providers = vec![
            provider("tag", &["Cardiology"], &["chest pain"]),
            by_condition,
            provider("Chester", &["Dermatology"], &["rash"]), // name hit
            provider("none", &["Neurology"], &["headache"]),
        ];

        let query = SearchQuery {
            symptom: "ches".into(),
            ..Default::default()
        };
        assert_eq!(ids(&evaluate(&providers, &query)), vec!["tag", "Chester"]);

        let query = SearchQuery {
            symptom: "coronary".into(),
            ..Default::default()
        };
        assert_eq!(ids(&evaluate(&providers, &query)), vec!["cond"]);
    }

    #[test]
    fn test_symptom_match_is_case_insensitive() {
        let providers = vec![provider("a", &["Cardiology"], &["Chest Pain"])];
        let query = SearchQuery {
            symptom: "CHEST pain".into(),
            ..Default::default()
        };
        assert_eq!(evaluate(&providers, &query).len(), 1);
    }

    #[test]
    fn test_radius_excludes_far_providers_only() {
        let mut near = provider("near", &[], &[]);
        near.distance = Some(9.9);
        let mut far = provider("far", &[], &[]);
        far.distance = Some(10.1);
        let mut unknown = provider("unknown", &[], &[]);
        unknown.distance = None;

        let query = SearchQuery {
            radius: 10.0,
            ..Default::default()
        };
        let results = evaluate(&[near, far, unknown], &query);
        assert_eq!(ids(&results), vec!["near", "unknown"]);
        assert!(results
            .iter()
            .all(|p| p.distance.map(|d| d <= 10.0).unwrap_or(true)));
    }

    #[test]
    fn test_specialty_filter_is_an_or() {
        let providers = vec![
            provider("cardio", &["Cardiology"], &[]),
            provider("both", &["Cardiology", "Internal Medicine"], &[]),
            provider("derm", &["Dermatology"], &[]),
        ];
        let query = SearchQuery {
            specialties: vec!["Cardiology".into(), "Neurology".into()],
            ..Default::default()
        };
        assert_eq!(ids(&evaluate(&providers, &query)), vec!["cardio", "both"]);
    }

    #[test]
    fn test_min_score_excludes_low_but_not_unknown() {
        let mut low = provider("low", &[], &[]);
        low.hcahps_score = Some(79);
        let mut high = provider("high", &[], &[]);
        high.hcahps_score = Some(80);
        let mut unknown = provider("unknown", &[], &[]);
        unknown.hcahps_score = None;

        let query = SearchQuery {
            min_hcahps: 80,
            ..Default::default()
        };
        assert_eq!(ids(&evaluate(&[low, high, unknown], &query)), vec![
            "high", "unknown"
        ]);
    }

    #[test]
    fn test_combined_predicates_over_bundled_dataset() {
        // Cardiology within 10 miles, scoring at least 80, mentioning
        // chest pain: the demo dataset has exactly three such providers.
        let providers = BundledData::new().providers;
        let query = SearchQuery {
            symptom: "chest pain".into(),
            radius: 10.0,
            specialties: vec!["Cardiology".into()],
            min_hcahps: 80,
        };

        let results = evaluate(&providers, &query);
        assert_eq!(ids(&results), vec!["prov-001", "prov-006", "prov-010"]);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let providers = BundledData::new().providers;
        let query = SearchQuery {
            symptom: "pain".into(),
            ..Default::default()
        };
        let first = evaluate(&providers, &query);
        let second = evaluate(&providers, &query);
        assert_eq!(ids(&first), ids(&second));
    }
}
