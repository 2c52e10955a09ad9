use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::Category;

/// Optional label-translation collaborator.
///
/// Implementations must answer without blocking; `None` means "use the
/// caller-provided label".
pub trait LabelTranslator {
    fn try_translate(&self, key: &str) -> Option<String>;
}

impl<F> LabelTranslator for F
where
    F: Fn(&str) -> Option<String>,
{
    fn try_translate(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Display label of `category`, translated when the collaborator knows the key.
#[must_use]
pub fn resolve_label(translator: Option<&dyn LabelTranslator>, category: &Category) -> String {
    translator
        .and_then(|translator| translator.try_translate(&category.id))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| category.label.clone())
}

/// Runtime metrics exposed by [`TranslationCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranslationCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Memoizing wrapper around a translator. Misses are cached too, so a key the
/// collaborator does not know is only asked once.
pub struct TranslationCache<T: LabelTranslator> {
    inner: T,
    entries: RefCell<HashMap<String, Option<String>>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<T: LabelTranslator> TranslationCache<T> {
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            entries: RefCell::new(HashMap::new()),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    #[must_use]
    pub fn stats(&self) -> TranslationCacheStats {
        TranslationCacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
            size: self.entries.borrow().len(),
        }
    }

    /// Drops every cached entry, e.g. after a locale switch.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<T: LabelTranslator> LabelTranslator for TranslationCache<T> {
    fn try_translate(&self, key: &str) -> Option<String> {
        if let Some(cached) = self.entries.borrow().get(key) {
            self.hits.set(self.hits.get() + 1);
            return cached.clone();
        }
        self.misses.set(self.misses.get() + 1);
        let resolved = self.inner.try_translate(key);
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), resolved.clone());
        resolved
    }
}
