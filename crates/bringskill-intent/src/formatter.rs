//! Response formatter: renders intent results as spoken sentences.
//!
//! Every public method returns non-empty text.  Variants are picked at
//! random; [`ResponseFormatter::seeded`] makes the choice reproducible.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::intent::IntentKind;
use crate::phrases::{GroupPhrase, Locale, Phrasebook, SplitPhrase};

/// Renders spoken replies in one locale.
pub struct ResponseFormatter {
    locale: Locale,
    phrases: &'static Phrasebook,
    rng: Mutex<StdRng>,
}

impl ResponseFormatter {
    /// Create a formatter with an entropy-seeded variant choice.
    pub fn new(locale: Locale) -> Self {
        Self::with_rng(locale, StdRng::from_entropy())
    }

    /// Create a formatter whose variant choice is reproducible.
    pub fn seeded(locale: Locale, seed: u64) -> Self {
        Self::with_rng(locale, StdRng::seed_from_u64(seed))
    }

    fn with_rng(locale: Locale, rng: StdRng) -> Self {
        Self {
            locale,
            phrases: locale.phrasebook(),
            rng: Mutex::new(rng),
        }
    }

    /// The locale replies are rendered in.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The phrase templates in use.
    pub fn phrases(&self) -> &'static Phrasebook {
        self.phrases
    }

    // -----------------------------------------------------------------------
    // Intent results
    // -----------------------------------------------------------------------

    /// Items added, and items that were already on the list.
    pub fn added(&self, added: &[String], existing: &[String]) -> String {
        self.split(&self.phrases.add, added, existing)
    }

    /// Items removed, and items that were not on the list.
    pub fn removed(&self, removed: &[String], missing: &[String]) -> String {
        self.split(&self.phrases.remove, removed, missing)
    }

    /// Items found on the list, and items that are missing.
    pub fn queried(&self, found: &[String], missing: &[String]) -> String {
        self.split(&self.phrases.query, found, missing)
    }

    /// The whole list read aloud.
    pub fn read_list(&self, items: &[String]) -> String {
        let read = &self.phrases.read;
        match items.len() {
            0 => self.choose(read.none).to_string(),
            1 => self.fill_items(read.one, items),
            _ => self.fill_items(read.multi, items),
        }
    }

    /// Question asked when an item intent arrived without items.
    pub fn ask_items(&self, kind: IntentKind) -> String {
        let split = match kind {
            IntentKind::AddItem => &self.phrases.add,
            IntentKind::RemoveItem => &self.phrases.remove,
            IntentKind::QueryItem | IntentKind::ReadList => &self.phrases.query,
        };
        self.choose(split.ask).to_string()
    }

    /// Apology spoken when the shopping-list service failed.
    pub fn vendor_unavailable(&self) -> String {
        self.choose(self.phrases.vendor_unavailable).to_string()
    }

    /// Apology spoken for a message that is not one of our intents.
    pub fn not_understood(&self) -> String {
        self.choose(self.phrases.not_understood).to_string()
    }

    // -----------------------------------------------------------------------
    // Composition
    // -----------------------------------------------------------------------

    /// Render several item names as one phrase: `A, B und C`.
    pub fn join_items(&self, items: &[String]) -> String {
        match items.split_last() {
            None => String::new(),
            Some((last, [])) => last.clone(),
            Some((last, head)) => fill(
                self.choose(self.phrases.list),
                &[("{first}", head.join(", ").as_str()), ("{last}", last.as_str())],
            ),
        }
    }

    /// Combine the two result groups of an item intent.
    ///
    /// - first only: first group plus an `end` suffix
    /// - second only: second group
    /// - both: the two joined by a connector
    fn split(&self, phrase: &SplitPhrase, first: &[String], second: &[String]) -> String {
        let rendered_first = (!first.is_empty()).then(|| self.group(&phrase.first, first));

        if second.is_empty() {
            let mut text = rendered_first.unwrap_or_default();
            text.push_str(self.choose(phrase.end));
            return text.trim_start().to_string();
        }

        let rendered_second = self.group(&phrase.second, second);
        match rendered_first {
            Some(text) => fill(
                self.choose(phrase.connector),
                &[("{first}", text.as_str()), ("{second}", rendered_second.as_str())],
            ),
            None => rendered_second,
        }
    }

    fn group(&self, phrase: &GroupPhrase, items: &[String]) -> String {
        let variants = if items.len() > 1 { phrase.multi } else { phrase.one };
        self.fill_items(variants, items)
    }

    fn fill_items(&self, variants: &'static [&'static str], items: &[String]) -> String {
        fill(self.choose(variants), &[("{items}", self.join_items(items).as_str())])
    }

    fn choose(&self, variants: &'static [&'static str]) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        variants.choose(&mut *rng).copied().unwrap_or_default()
    }
}

/// Substitute placeholders in one pass over `template`.  Substituted text
/// is never scanned again, so item names containing `{...}` stay verbatim.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

impl std::fmt::Debug for ResponseFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseFormatter")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
