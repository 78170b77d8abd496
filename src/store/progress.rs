use crate::config::Config;
use crate::kana::Variant;
use crate::store::schema::ExportData;
use crate::store::{MistakeLedger, Storage, StoreError};

/// Fixed storage key the whole ledger document lives under.
pub const STORAGE_KEY: &str = "kanaMistakes";

/// Owns the persisted mistake ledger. Every mutation writes the full ledger back
/// to storage before returning.
pub struct ProgressStore<S> {
    storage: S,
    ledger: MistakeLedger,
}

impl<S: Storage> ProgressStore<S> {
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            ledger: MistakeLedger::default(),
        };
        store.ledger = store.load();
        store
    }

    /// Read the persisted ledger, merged over a zero ledger so every known glyph has
    /// an entry. Missing, unreadable or corrupt data yields the zero ledger.
    pub fn load(&self) -> MistakeLedger {
        let mut ledger = MistakeLedger::zeroed();
        let content = match self.storage.read(STORAGE_KEY) {
            Ok(Some(content)) => content,
            Ok(None) => return ledger,
            Err(e) => {
                tracing::warn!("could not read mistake ledger, starting fresh: {e}");
                return ledger;
            }
        };
        match serde_json::from_str::<MistakeLedger>(&content) {
            Ok(saved) => ledger.merge_from(saved),
            Err(e) => tracing::warn!("mistake ledger is corrupt, starting fresh: {e}"),
        }
        ledger
    }

    pub fn ledger(&self) -> &MistakeLedger {
        &self.ledger
    }

    pub fn mistakes(&self, variant: Variant, glyph: &str) -> u32 {
        self.ledger.get(variant, glyph)
    }

    /// Count one mistake against `glyph` and persist. Returns the new count.
    pub fn record_mistake(&mut self, variant: Variant, glyph: &str) -> u32 {
        let count = self.ledger.increment(variant, glyph);
        tracing::debug!("mistake on {glyph} ({variant}), now {count}");
        self.persist_or_warn();
        count
    }

    /// Zero every entry and persist.
    pub fn reset(&mut self) {
        self.ledger.clear();
        tracing::info!("mistake ledger reset");
        self.persist_or_warn();
    }

    pub fn persist(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.ledger)?;
        self.storage.write(STORAGE_KEY, &json)
    }

    fn persist_or_warn(&mut self) {
        if let Err(e) = self.persist() {
            tracing::warn!("failed to persist mistake ledger: {e}");
        }
    }

    pub fn export(&self, config: &Config) -> ExportData {
        ExportData::new(config, &self.ledger)
    }

    /// Replace the ledger with an imported one. Unlike in-game mutations, a failed
    /// write is returned to the caller.
    pub fn import(&mut self, data: ExportData) -> Result<(), StoreError> {
        data.check_version()?;
        let mut ledger = MistakeLedger::zeroed();
        ledger.merge_from(data.mistakes);
        self.ledger = ledger;
        self.persist()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
