//! The translation table.

use serde_json::Value;

use crate::config::{
    DefaultTarget,
    TableOptions,
};
use crate::error::TableError;
use crate::events::{
    KEY_INITIALIZED,
    KeyInitialized,
    SubscriptionId,
    Subscribers,
};
use crate::format::{
    self,
    Format,
};
use crate::interpolate::{
    self,
    Replacements,
};
use crate::validate::{
    Entries,
    validate_entries,
};

/// In-memory translations keyed by source text.
///
/// Lookups go through [`tr`](Self::tr), which resolves the source text in
/// the active language.
///
/// **`tr` mutates the table.** Looking up an unknown source text inserts an
/// empty entry for it, and when auto-init languages are configured it fills
/// every missing one with the source text. Tables therefore grow through
/// use, and [`dump`](Self::dump) writes out every source text ever looked
/// up.
///
/// # Examples
/// ```
/// use cocorita::{Format, TableOptions, TranslationTable};
///
/// let mut table = TranslationTable::new(TableOptions::new().language("it"));
/// table.load_str(r#"{"hello": {"it": "ciao", "es": "hola"}}"#, Format::Json).unwrap();
///
/// assert_eq!(table.tr("hello").unwrap(), "ciao");
/// table.set_active_language("es");
/// assert_eq!(table.tr("hello").unwrap(), "hola");
/// ```
#[derive(Debug, Default)]
pub struct TranslationTable {
    /// Target language of `tr`, empty when unset
    active_language: String,
    /// Source text to its translations
    entries: Entries,
    /// Languages filled with the source text when missing; fixed at construction
    auto_init_languages: Option<Vec<String>>,
    /// Result of a lookup that misses
    default_target: DefaultTarget,
    /// Key-initialized handlers
    subscribers: Subscribers,
}

impl TranslationTable {
    #[must_use]
    pub fn new(options: TableOptions) -> Self {
        let TableOptions { language, initialize, default_target } = options;
        let table = Self {
            active_language: language.unwrap_or_default(),
            entries: Entries::new(),
            auto_init_languages: initialize,
            default_target: default_target.unwrap_or_default(),
            subscribers: Subscribers::default(),
        };
        tracing::debug!(
            language = %table.active_language,
            initialize = ?table.auto_init_languages,
            default_target = %table.default_target,
            "Created translation table"
        );
        table
    }

    /// Create a table from a dynamic options object.
    ///
    /// # Errors
    /// See [`TableOptions::from_value`].
    pub fn from_options_value(options: &Value) -> Result<Self, TableError> {
        TableOptions::from_value(options).map(Self::new)
    }

    #[must_use]
    pub fn active_language(&self) -> &str {
        &self.active_language
    }

    pub fn set_active_language(&mut self, language: impl Into<String>) {
        self.active_language = language.into();
        tracing::debug!(language = %self.active_language, "Active language changed");
    }

    /// Set the active language from a dynamic argument.
    ///
    /// # Errors
    /// [`TableError::InvalidConfig`] if `language` is not a string.
    pub fn set_active_language_value(&mut self, language: &Value) -> Result<(), TableError> {
        let Value::String(language) = language else {
            return Err(TableError::config("language must be a string"));
        };
        self.set_active_language(language.as_str());
        Ok(())
    }

    #[must_use]
    pub fn auto_init_languages(&self) -> Option<&[String]> {
        self.auto_init_languages.as_deref()
    }

    #[must_use]
    pub const fn default_target(&self) -> DefaultTarget {
        self.default_target
    }

    /// Borrow the current entries.
    #[must_use]
    pub const fn entries(&self) -> &Entries {
        &self.entries
    }

    /// Copy of the current entries.
    #[must_use]
    pub fn get_data(&self) -> Entries {
        self.entries.clone()
    }

    /// Load a translations object or a serialized payload.
    ///
    /// An object is copied and validated. A string is decoded with `format`,
    /// which is then required. Entries are replaced only on success.
    ///
    /// # Errors
    /// - `source` absent or not an object/string → [`TableError::InvalidInput`]
    /// - invalid object or payload → [`TableError::InvalidData`]
    /// - string `source` with a bad `format` → see [`Format::from_arg`]
    pub fn load(
        &mut self,
        source: Option<&Value>,
        format: Option<&Value>,
    ) -> Result<(), TableError> {
        match source {
            None => Err(TableError::input("source parameter is required")),
            Some(Value::String(text)) => self.load_str(text, Format::from_arg(format)?),
            Some(value) => self.load_value(value),
        }
    }

    /// Load a serialized payload.
    ///
    /// # Errors
    /// [`TableError::InvalidData`] if the payload does not parse or is not a
    /// translations object.
    pub fn load_str(&mut self, text: &str, format: Format) -> Result<(), TableError> {
        let entries = format::decode(text, format).inspect_err(|_| {
            tracing::warn!(%format, "Rejected translations payload");
        })?;
        self.replace_entries(entries);
        Ok(())
    }

    /// Load a translations object.
    ///
    /// The table keeps its own copy; later changes to `value` have no effect.
    ///
    /// # Errors
    /// - `value` is not an object → [`TableError::InvalidInput`]
    /// - `value` is not a valid translations object → [`TableError::InvalidData`]
    pub fn load_value(&mut self, value: &Value) -> Result<(), TableError> {
        if !value.is_object() {
            return Err(TableError::input(
                "source parameter must be a valid translations object or a string",
            ));
        }
        let entries = validate_entries(value).map_err(|cause| {
            tracing::warn!(%cause, "Rejected translations object");
            TableError::InvalidData("invalid translations object".to_string())
        })?;
        self.replace_entries(entries);
        Ok(())
    }

    /// Replace the entries with a copy of `entries`.
    pub fn load_entries(&mut self, entries: &Entries) {
        self.replace_entries(entries.clone());
    }

    /// Swap in freshly validated entries.
    fn replace_entries(&mut self, entries: Entries) {
        tracing::debug!(count = entries.len(), "Loaded translations");
        self.entries = entries;
    }

    /// Serialize the entries.
    ///
    /// JSON output lists source texts in lexicographic order with two space
    /// indentation. YAML output sorts keys at every level.
    ///
    /// # Errors
    /// Only if the encoder fails, which string maps do not trigger.
    pub fn dump(&self, format: Format) -> Result<String, TableError> {
        tracing::debug!(%format, count = self.entries.len(), "Dumping translations");
        format::encode(&self.entries, format)
    }

    /// Serialize the entries with a dynamic format argument.
    ///
    /// # Errors
    /// See [`Format::from_arg`].
    pub fn dump_value(&self, format: Option<&Value>) -> Result<String, TableError> {
        self.dump(Format::from_arg(format)?)
    }

    /// Translate `source` into the active language.
    ///
    /// Shorthand for [`tr_with`](Self::tr_with) without replacements.
    ///
    /// # Errors
    /// Never fails without replacements; the `Result` mirrors `tr_with`.
    pub fn tr(&mut self, source: &str) -> Result<String, TableError> {
        self.tr_with(source, &Replacements::new())
    }

    /// Translate `source` into the active language and fill placeholders.
    ///
    /// 1. An unknown `source` gets an empty entry.
    /// 2. Missing auto-init languages are set to `source`; if any were set,
    ///    key-initialized handlers run before this returns.
    /// 3. A translation in the active language is returned with every
    ///    `{{ name }}` replaced, one replacement at a time in order.
    /// 4. Otherwise the result is `source` or `""`, per [`DefaultTarget`].
    ///
    /// # Errors
    /// [`TableError::InvalidReplacementKey`] if a replacement name is not
    /// `^[a-zA-Z0-9_]+$`. The table is not touched in that case.
    pub fn tr_with(
        &mut self,
        source: &str,
        replacements: &Replacements,
    ) -> Result<String, TableError> {
        let compiled = replacements.compile()?;

        if self.initialize_entry(source) {
            self.notify_key_initialized(source);
        }

        let translation =
            self.entries.get(source).and_then(|targets| targets.get(&self.active_language));
        if let Some(text) = translation {
            return Ok(interpolate::apply(text, &compiled));
        }

        Ok(match self.default_target {
            DefaultTarget::Source => source.to_string(),
            DefaultTarget::Blank => String::new(),
        })
    }

    /// Translate with dynamic arguments.
    ///
    /// An absent `source` yields `""` without touching the table.
    ///
    /// # Errors
    /// - `source` not a string → [`TableError::InvalidInput`]
    /// - see [`Replacements::from_value`] and [`tr_with`](Self::tr_with)
    pub fn tr_value(
        &mut self,
        source: Option<&Value>,
        replacements: Option<&Value>,
    ) -> Result<String, TableError> {
        let source = match source {
            None => return Ok(String::new()),
            Some(Value::String(source)) => source,
            Some(_) => return Err(TableError::input("source parameter must be a string")),
        };
        let replacements =
            replacements.map(Replacements::from_value).transpose()?.unwrap_or_default();
        self.tr_with(source, &replacements)
    }

    /// Ensure an entry for `source` exists and fill missing auto-init
    /// languages. Returns whether any language was filled.
    fn initialize_entry(&mut self, source: &str) -> bool {
        let targets = self.entries.entry(source.to_string()).or_default();
        let Some(languages) = &self.auto_init_languages else {
            return false;
        };

        let mut initialized = false;
        for language in languages {
            if !targets.contains_key(language) {
                targets.insert(language.clone(), source.to_string());
                initialized = true;
            }
        }
        initialized
    }

    /// Run key-initialized handlers for `source`.
    fn notify_key_initialized(&mut self, source: &str) {
        tracing::debug!(event = KEY_INITIALIZED, source, "Initialized missing translations");

        let mut subscribers = std::mem::take(&mut self.subscribers);
        if let Some(targets) = self.entries.get(source) {
            subscribers.notify(&KeyInitialized {
                table: &*self,
                entries: &self.entries,
                source,
                targets,
            });
        }
        self.subscribers = subscribers;
    }

    /// Register a handler for key initialization.
    ///
    /// Handlers run synchronously inside [`tr_with`](Self::tr_with), in
    /// registration order, once per call that filled at least one auto-init
    /// language.
    pub fn on_key_initialized<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&KeyInitialized<'_>) + Send + 'static,
    {
        self.subscribers.subscribe(Box::new(handler))
    }

    /// Remove a handler. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}
