use std::collections::BTreeMap;
use std::io::{prelude::*, BufReader, Read};

use crate::dictionary::character::{CharInfo, CharProperty, DEFAULT_ORDER, MAX_CATEGORIES};
use crate::errors::{Result, TsumugiError};
use crate::utils::FromU32;

struct CharRange {
    start: usize,
    end: usize,
    // Need to use Vec, not a bit set, to preserve the order defined in char.def.
    categories: Vec<String>,
}

impl CharProperty {
    /// Creates a new instance from `char.def`.
    ///
    /// # Arguments
    ///
    ///  - `rdr`: A reader of the file.
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut cate2info = BTreeMap::new();
        let mut cate_map = BTreeMap::new(); // Name -> Id
        let mut char_ranges = vec![];

        cate_map.insert("DEFAULT".to_string(), 0);

        let reader = BufReader::new(rdr);
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if !line.starts_with("0x") {
                let (category, invoke, group, length) = Self::parse_char_category(line)?;
                let new_cate_id = u32::try_from(cate_map.len())?;
                let cate_id = *cate_map.entry(category).or_insert(new_cate_id);
                if usize::from_u32(cate_id) >= MAX_CATEGORIES {
                    let msg = format!("At most {MAX_CATEGORIES} categories can be defined.");
                    return Err(TsumugiError::invalid_format("char.def", msg));
                }
                let cinfo = CharInfo::new(0, cate_id, invoke, group, length).ok_or_else(|| {
                    TsumugiError::invalid_format("char.def", "LENGTH must be less than 16.")
                })?;
                cate2info.insert(cate_id, cinfo);
            } else {
                char_ranges.push(Self::parse_char_range(line)?);
            }
        }

        let mut categories = vec![String::new(); cate_map.len()];
        let mut cate_infos = vec![CharInfo::default(); cate_map.len()];
        for (k, &v) in cate_map.iter() {
            let info = cate2info.get(&v).ok_or_else(|| {
                let msg = format!("Undefined category: {k}");
                TsumugiError::invalid_format("char.def", msg)
            })?;
            categories[usize::from_u32(v)] = k.clone();
            cate_infos[usize::from_u32(v)] = *info;
        }

        let default_cinfo = Self::encode_names(&["DEFAULT"], &cate_map, &cate_infos)?.0;
        let mut chr2inf = vec![default_cinfo; 1 << 16];
        let mut cate_orders = vec![DEFAULT_ORDER.to_vec()];
        let mut chr2order = vec![0; 1 << 16];

        for r in &char_ranges {
            let (cinfo, cate_ids) = Self::encode_names(&r.categories, &cate_map, &cate_infos)?;
            let order = Self::intern_order(&mut cate_orders, &cate_ids).ok_or_else(|| {
                TsumugiError::invalid_format("char.def", "Too many orders of categories.")
            })?;
            for e in chr2inf.iter_mut().take(r.end).skip(r.start) {
                *e = cinfo;
            }
            for o in chr2order.iter_mut().take(r.end).skip(r.start) {
                *o = order;
            }
        }

        tracing::debug!(
            num_categories = categories.len(),
            num_ranges = char_ranges.len(),
            "built character definitions"
        );

        Ok(Self {
            chr2inf,
            default_cinfo,
            categories,
            cate_infos,
            chr2order,
            cate_orders,
        })
    }

    fn encode_names<S>(
        targets: &[S],
        cate_map: &BTreeMap<String, u32>,
        cate_infos: &[CharInfo],
    ) -> Result<(CharInfo, Vec<u32>)>
    where
        S: AsRef<str>,
    {
        let mut ids = Vec::with_capacity(targets.len());
        for target in targets {
            let id = cate_map.get(target.as_ref()).ok_or_else(|| {
                let msg = format!("Undefined category: {}", target.as_ref());
                TsumugiError::invalid_format("char.def", msg)
            })?;
            ids.push(*id);
        }
        let cinfo = Self::encode_cate_info(&ids, cate_infos)
            .ok_or_else(|| TsumugiError::invalid_format("char.def", "A range has no category."))?;
        Ok((cinfo, ids))
    }

    fn parse_char_category(line: &str) -> Result<(String, bool, bool, u16)> {
        debug_assert!(!line.is_empty());
        debug_assert!(!line.starts_with("0x"));

        let cols: Vec<_> = line.split_whitespace().collect();
        if cols.len() < 4 {
            let msg = format!(
                "A character category must consists of four items separated by spaces, {line}",
            );
            return Err(TsumugiError::invalid_format("char.def", msg));
        }

        let category = cols[0].to_string();
        let invoke = ["1", "0"]
            .contains(&cols[1])
            .then(|| cols[1] == "1")
            .ok_or_else(|| TsumugiError::invalid_format("char.def", "INVOKE must be 1 or 0."))?;
        let group = ["1", "0"]
            .contains(&cols[2])
            .then(|| cols[2] == "1")
            .ok_or_else(|| TsumugiError::invalid_format("char.def", "GROUP must be 1 or 0."))?;
        let length = cols[3].parse()?;

        Ok((category, invoke, group, length))
    }

    fn parse_char_range(line: &str) -> Result<CharRange> {
        debug_assert!(!line.is_empty());
        debug_assert!(line.starts_with("0x"));

        let cols: Vec<_> = line.split_whitespace().collect();
        if cols.len() < 2 {
            let msg = format!("A character range must have two items at least, {line}");
            return Err(TsumugiError::invalid_format("char.def", msg));
        }

        let r: Vec<_> = cols[0].split("..").collect();
        let start = usize::from_str_radix(r[0].trim_start_matches("0x"), 16)?;
        let end = if r.len() > 1 {
            usize::from_str_radix(r[1].trim_start_matches("0x"), 16)? + 1
        } else {
            start + 1
        };
        if start >= end {
            let msg =
                format!("The start of a character range must be no more than the end, {line}");
            return Err(TsumugiError::invalid_format("char.def", msg));
        }
        if start > 0xFFFF || end > 0x10000 {
            let msg = format!("A character range must be no more 0xFFFF, {line}");
            return Err(TsumugiError::invalid_format("char.def", msg));
        }

        let categories: Vec<_> = cols[1..]
            .iter()
            .take_while(|&&col| !col.starts_with('#'))
            .map(|&cate| cate.to_string())
            .collect();
        if categories.is_empty() {
            let msg = format!("A character range must have a category, {line}");
            return Err(TsumugiError::invalid_format("char.def", msg));
        }

        Ok(CharRange {
            start,
            end,
            categories,
        })
    }
}
