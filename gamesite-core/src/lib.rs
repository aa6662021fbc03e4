//! Core types shared by the gamesite tools: game keys, categories and the
//! filename-based category classifier.

pub mod category;
pub mod classifier;
pub mod key;
pub mod util;

pub use category::{Category, CategoryParseError};
pub use classifier::{Classifier, KeywordRule, SecondaryRule, classify, classify_legacy_dir};
pub use key::{GameKey, KeyParseError};
