use std::sync::Arc;

use healthnav_store::SetStore;
use tracing::debug;

use crate::models::Provider;
use crate::Result;

/// Hard cap on the comparison set - the UI renders three columns, full stop
pub const MAX_COMPARE: usize = 3;

const STORAGE_KEY: &str = "healthnav_compare_list";

/// What happened on an `add` attempt
///
/// Rejections are ordinary answers here, not errors: the caller relays
/// them to the user ("already comparing", "tray is full") and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    Full,
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

/// The comparison set: up to three providers, unique by id, in the order
/// the user picked them
///
/// Restored from the durable store on construction; every successful
/// mutation writes the whole list back before returning.
pub struct CompareManager {
    providers: Vec<Provider>,
    tray_open: bool,
    store: Arc<SetStore>,
}

impl CompareManager {
    pub fn new(store: Arc<SetStore>) -> Self {
        let providers: Vec<Provider> = store.load(STORAGE_KEY);
        debug!("Restored {} compared providers", providers.len());
        Self {
            providers,
            tray_open: false,
            store,
        }
    }

    /// Try to add a provider to the comparison
    ///
    /// Rejected without touching state when the id is already present or
    /// the set is full. `Err` only means the persistence write failed.
    pub fn add(&mut self, provider: Provider) -> Result<AddOutcome> {
        if self.contains(&provider.id) {
            return Ok(AddOutcome::AlreadyPresent);
        }
        if self.providers.len() >= MAX_COMPARE {
            return Ok(AddOutcome::Full);
        }

        self.providers.push(provider);
        self.persist()?;
        Ok(AddOutcome::Added)
    }

    /// Remove by id; unknown ids are a silent no-op
    pub fn remove(&mut self, id: &str) -> Result<()> {
        self.providers.retain(|p| p.id != id);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.providers.clear();
        self.persist()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.providers.iter().any(|p| p.id == id)
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.providers.len() >= MAX_COMPARE
    }

    /// The compared provider with the highest HCAHPS score
    ///
    /// Missing scores rank below every known score. Ties go to whichever
    /// provider was added first - strict greater-than while scanning keeps
    /// the earliest maximum.
    pub fn best_match(&self) -> Option<&Provider> {
        let mut best: Option<&Provider> = None;
        for candidate in &self.providers {
            match best {
                Some(current) if rank(candidate) <= rank(current) => {}
                _ => best = Some(candidate),
            }
        }
        best
    }

    /// UI-facing flag for the comparison tray/modal; no invariants attached
    pub fn set_tray_open(&mut self, open: bool) {
        self.tray_open = open;
    }

    pub fn is_tray_open(&self) -> bool {
        self.tray_open
    }

    fn persist(&self) -> Result<()> {
        self.store.save(STORAGE_KEY, &self.providers)?;
        Ok(())
    }
}

fn rank(provider: &Provider) -> i16 {
    provider.hcahps_score.map(i16::from).unwrap_or(-1)
}
