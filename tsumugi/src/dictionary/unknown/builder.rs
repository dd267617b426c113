use std::io::{prelude::*, BufReader, Read};

use crate::dictionary::character::CharProperty;
use crate::dictionary::lexicon::Lexicon;
use crate::dictionary::unknown::{UnkEntry, UnkHandler};
use crate::errors::{Result, TsumugiError};

impl UnkHandler {
    /// Creates a new instance from `unk.def`.
    ///
    /// # Arguments
    ///
    ///  - `rdr`: A reader of the file.
    ///  - `char_prop`: Character definitions that the categories refer to.
    pub fn from_reader<R>(rdr: R, char_prop: &CharProperty) -> Result<Self>
    where
        R: Read,
    {
        let mut map = vec![vec![]; char_prop.num_categories()];

        let reader = BufReader::new(rdr);
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let item = Lexicon::parse_csv(&line, "unk.def")?;
            let cate_id = char_prop.cate_id(&item.surface).ok_or_else(|| {
                let msg = format!("Undefined category: {}", item.surface);
                TsumugiError::invalid_format("unk.def", msg)
            })?;
            let e = UnkEntry {
                cate_id: u16::try_from(cate_id)?,
                left_id: item.param.left_id,
                right_id: item.param.right_id,
                word_cost: item.param.word_cost,
                feature: item.feature,
            };
            map[cate_id as usize].push(e);
        }

        if map.first().map_or(true, |v| v.is_empty()) {
            return Err(TsumugiError::invalid_format(
                "unk.def",
                "DEFAULT must have one entry at least.",
            ));
        }

        let mut offsets = vec![];
        let mut entries = vec![];
        for mut v in map {
            offsets.push(entries.len());
            entries.append(&mut v);
        }
        offsets.push(entries.len());

        tracing::debug!(num_entries = entries.len(), "built unknown-word entries");

        Ok(Self { offsets, entries })
    }
}
