use std::sync::Arc;

use healthnav_store::SetStore;
use tracing::debug;

use crate::models::{Provider, RecentSearch};
use crate::Result;

/// Most-recent-first cap on the search history
pub const MAX_RECENT_SEARCHES: usize = 10;

const PROVIDERS_KEY: &str = "healthnav_saved_providers";
const SEARCHES_KEY: &str = "healthnav_recent_searches";

/// Saved providers plus the recent-search history
///
/// Saves are idempotent and unbounded; the search history is a small
/// most-recent-first ring that dedupes by id. Both collections restore
/// from the durable store on construction and write back on mutation.
pub struct SavedManager {
    providers: Vec<Provider>,
    searches: Vec<RecentSearch>,
    store: Arc<SetStore>,
}

impl SavedManager {
    pub fn new(store: Arc<SetStore>) -> Self {
        let providers: Vec<Provider> = store.load(PROVIDERS_KEY);
        let searches: Vec<RecentSearch> = store.load(SEARCHES_KEY);
        debug!(
            "Restored {} saved providers, {} recent searches",
            providers.len(),
            searches.len()
        );
        Self {
            providers,
            searches,
            store,
        }
    }

    /// Save a provider; already-saved ids are left untouched
    pub fn save(&mut self, provider: Provider) -> Result<()> {
        if self.is_saved(&provider.id) {
            return Ok(());
        }
        self.providers.push(provider);
        self.store.save(PROVIDERS_KEY, &self.providers)?;
        Ok(())
    }

    /// Remove a saved provider; unknown ids are a no-op and skip the write
    pub fn unsave(&mut self, id: &str) -> Result<()> {
        let before = self.providers.len();
        self.providers.retain(|p| p.id != id);
        if self.providers.len() != before {
            self.store.save(PROVIDERS_KEY, &self.providers)?;
        }
        Ok(())
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.providers.iter().any(|p| p.id == id)
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Record a search at the front of the history
    ///
    /// An entry with a previously-seen id replaces the old one and moves
    /// to the front; the list then truncates to the newest ten.
    pub fn add_recent_search(&mut self, search: RecentSearch) -> Result<()> {
        self.searches.retain(|s| s.id != search.id);
        self.searches.insert(0, search);
        self.searches.truncate(MAX_RECENT_SEARCHES);
        self.store.save(SEARCHES_KEY, &self.searches)?;
        Ok(())
    }

    pub fn remove_recent_search(&mut self, id: &str) -> Result<()> {
        self.searches.retain(|s| s.id != id);
        self.store.save(SEARCHES_KEY, &self.searches)?;
        Ok(())
    }

    pub fn clear_recent_searches(&mut self) -> Result<()> {
        self.searches.clear();
        self.store.save(SEARCHES_KEY, &self.searches)?;
        Ok(())
    }

    /// Most recent first
    pub fn recent_searches(&self) -> &[RecentSearch] {
        &self.searches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchQuery;

    fn provider(id: &str) -> Provider {
        Provider {
            id: id.to_string(),
            npi: format!("88{}", id),
            name: format!("Dr. {}", id),
            first_name: id.to_string(),
            last_name: "Test".into(),
            specialties: vec!["Neurology".into()],
            hospital_id: None,
            hospital_name: None,
            hcahps_score: Some(85),
            lat: 0.0,
            lng: 0.0,
            distance: None,
            conditions: Vec::new(),
            symptoms: Vec::new(),
            phone: None,
            address: None,
        }
    }

    fn search(id: &str) -> RecentSearch {
        RecentSearch::from_query(id.to_string(), &SearchQuery::default())
    }

    fn manager() -> SavedManager {
        SavedManager::new(Arc::new(SetStore::open_in_memory().unwrap()))
    }

    #[test]
    fn test_save_is_idempotent() {
        let mut saved = manager();
        saved.save(provider("a")).unwrap();
        saved.save(provider("a")).unwrap();
        assert_eq!(saved.providers().len(), 1);
        assert!(saved.is_saved("a"));
    }

    #[test]
    fn test_unsave_removes_and_tolerates_unknown_ids() {
        let mut saved = manager();
        saved.save(provider("a")).unwrap();
        saved.unsave("a").unwrap();
        assert!(!saved.is_saved("a"));

        // Unknown id: no error, no corruption
        saved.unsave("never-saved").unwrap();
        assert!(saved.providers().is_empty());
    }

    #[test]
    fn test_recent_searches_cap_at_ten_dropping_oldest() {
        let mut saved = manager();
        for i in 0..11 {
            saved.add_recent_search(search(&format!("s{}", i))).unwrap();
        }

        assert_eq!(saved.recent_searches().len(), 10);
        // s0 was the oldest and fell off; s10 leads
        assert_eq!(saved.recent_searches()[0].id, "s10");
        assert!(!saved.recent_searches().iter().any(|s| s.id == "s0"));
    }

    #[test]
    fn test_recent_search_dedup_moves_to_front_without_growing() {
        let mut saved = manager();
        saved.add_recent_search(search("a")).unwrap();
        saved.add_recent_search(search("b")).unwrap();
        saved.add_recent_search(search("c")).unwrap();

        saved.add_recent_search(search("a")).unwrap();

        let ids: Vec<_> = saved.recent_searches().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_recent_search_ordering_is_most_recent_first() {
        let mut saved = manager();
        saved.add_recent_search(search("first")).unwrap();
        saved.add_recent_search(search("second")).unwrap();
        assert_eq!(saved.recent_searches()[0].id, "second");
    }

    #[test]
    fn test_remove_and_clear_recent_searches() {
        let mut saved = manager();
        saved.add_recent_search(search("a")).unwrap();
        saved.add_recent_search(search("b")).unwrap();

        saved.remove_recent_search("a").unwrap();
        assert_eq!(saved.recent_searches().len(), 1);

        saved.clear_recent_searches().unwrap();
        assert!(saved.recent_searches().is_empty());
    }

    #[test]
    fn test_state_survives_reconstruction() {
        let store = Arc::new(SetStore::open_in_memory().unwrap());

        let mut saved = SavedManager::new(Arc::clone(&store));
        saved.save(provider("a")).unwrap();
        saved.add_recent_search(search("s1")).unwrap();
        drop(saved);

        let restored = SavedManager::new(store);
        assert!(restored.is_saved("a"));
        assert_eq!(restored.recent_searches().len(), 1);
    }

    #[test]
    fn test_saved_and_compare_keys_do_not_collide() {
        let store = Arc::new(SetStore::open_in_memory().unwrap());

        let mut saved = SavedManager::new(Arc::clone(&store));
        saved.save(provider("a")).unwrap();
        drop(saved);

        let mut compare = crate::CompareManager::new(Arc::clone(&store));
        compare.add(provider("b")).unwrap();
        drop(compare);

        let saved = SavedManager::new(Arc::clone(&store));
        let compare = crate::CompareManager::new(store);
        assert!(saved.is_saved("a"));
        assert!(!saved.is_saved("b"));
        assert!(compare.contains("b"));
        assert!(!compare.contains("a"));
    }
}
