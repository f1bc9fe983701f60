use std::{collections::HashMap, path::Path};

use serde::Deserialize;

use crate::error::TranslationError;

/// Turns a raw timetable label into the one shown to the user.
pub trait Translator {
    fn translate(&self, label: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Translator for Identity {
    fn translate(&self, label: &str) -> String {
        label.to_owned()
    }
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, label: &str) -> String {
        self(label)
    }
}

#[derive(Deserialize, Debug)]
struct Entry {
    label: String,
    translation: String,
}

/// Label lookup read from a `label,translation` CSV file. Unknown labels pass through.
#[derive(Debug, Default)]
pub struct LabelTable(HashMap<String, String>);

impl LabelTable {
    pub fn from_path(path: &Path) -> Result<Self, TranslationError> {
        let csv_error = |source| TranslationError::Csv {
            path: path.display().to_string(),
            source,
        };

        csv::Reader::from_path(path)
            .map_err(csv_error)?
            .deserialize::<Entry>()
            .map(move |parse_result| {
                parse_result
                    .map(|entry| (entry.label, entry.translation))
                    .map_err(csv_error)
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for LabelTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Translator for LabelTable {
    fn translate(&self, label: &str) -> String {
        self.0
            .get(label)
            .cloned()
            .unwrap_or_else(|| label.to_owned())
    }
}
