//! core::collate
//!
//! Locale-aware string ordering for category labels.
//!
//! Labels are ordered by the CLDR root collation (the Unicode Collation
//! Algorithm with the default CLDR tailoring), through ICU4X:
//!
//! 1. Base letters, ignoring accents and case. Whitespace sorts before
//!    punctuation and symbols, which sort before digits, which sort before
//!    letters. Letters such as `Ł`, `Ø` and `ß` sort with their base
//!    letters instead of after `z`.
//! 2. Accents (an unaccented letter sorts before its accented forms).
//! 3. Case (lowercase before uppercase).
//!
//! Strings the collator finds equal fall back to code-point order, so
//! distinct strings never compare equal.
//!
//! # Example
//!
//! ```
//! use std::cmp::Ordering;
//! use wooflat::core::collate::compare;
//!
//! assert_eq!(compare("apple", "Banana"), Ordering::Less);
//! assert_eq!(compare("Électronique", "Fruits"), Ordering::Less);
//! assert_eq!(compare("Łóżka", "Meble"), Ordering::Less);
//! assert_eq!(compare("Shoes", "Shoes > Boots"), Ordering::Less);
//! ```

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

thread_local! {
    static ROOT: Option<Collator> = root_collator();
}

fn root_collator() -> Option<Collator> {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!(error = %e, "root collator unavailable, sorting by code point");
            None
        }
    }
}

fn compare_with(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    collator
        .map_or(Ordering::Equal, |c| c.compare(a, b))
        .then_with(|| a.cmp(b))
}

/// Compare two strings with locale-aware ordering.
pub fn compare(a: &str, b: &str) -> Ordering {
    ROOT.with(|collator| compare_with(collator.as_ref(), a, b))
}

/// Sort `items` in place by a string field, preserving the relative order of
/// equal strings.
pub fn sort_by_collation<T, F>(items: &mut [T], field: F)
where
    F: Fn(&T) -> &str,
{
    ROOT.with(|collator| {
        items.sort_by(|a, b| compare_with(collator.as_ref(), field(a), field(b)));
    });
}
