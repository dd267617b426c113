use std::io::{prelude::*, BufReader, Read};

use crate::dictionary::lexicon::{
    LexType, Lexicon, RawWordEntry, WordFeatures, WordMap, WordParam, WordParams,
};
use crate::errors::{Result, TsumugiError};
use crate::utils;

impl Lexicon {
    /// Builds a new instance from a lexicon file in the CSV format.
    pub fn from_reader<R>(rdr: R, lex_type: LexType) -> Result<Self>
    where
        R: Read,
    {
        let mut entries = vec![];
        let reader = BufReader::new(rdr);
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let e = Self::parse_csv(&line, "lex.csv")?;
            if e.surface.is_empty() {
                tracing::warn!(line = i + 1, "skipped an empty surface");
            } else {
                entries.push(e);
            }
        }
        Self::from_entries(entries, lex_type)
    }

    /// Builds a new instance from parsed entries.
    pub fn from_entries<I>(entries: I, lex_type: LexType) -> Result<Self>
    where
        I: IntoIterator<Item = RawWordEntry>,
    {
        let entries: Vec<_> = entries.into_iter().collect();
        if let Some(e) = entries.iter().find(|e| e.surface.is_empty()) {
            return Err(TsumugiError::invalid_argument(
                "entries",
                format!("an entry must have a non-empty surface, {e:?}"),
            ));
        }

        let map = WordMap::new(entries.iter().map(|e| &e.surface))?;
        let params = WordParams::new(entries.iter().map(|e| e.param));
        let features = WordFeatures::new(entries.iter().map(|e| &e.feature));

        tracing::debug!(?lex_type, num_entries = entries.len(), "built a lexicon");

        Ok(Self {
            map,
            params,
            features,
            lex_type,
        })
    }

    /// Parses a row of `lex.csv` or `unk.def`.
    pub(crate) fn parse_csv(row: &str, name: &'static str) -> Result<RawWordEntry> {
        let cols = utils::parse_csv_row(row);
        if cols.len() < 4 {
            let msg = format!("A csv row of lexicon must have four items at least, {row}");
            return Err(TsumugiError::invalid_format(name, msg));
        }

        let surface = cols[0].to_string();
        let left_id = cols[1].parse()?;
        let right_id = cols[2].parse()?;
        let word_cost = cols[3].parse()?;
        let feature = utils::join_csv_row(&cols[4..]);

        Ok(RawWordEntry {
            surface,
            param: WordParam::new(left_id, right_id, word_cost),
            feature,
        })
    }
}
