mod builder;

use std::fmt;

use bincode::{Decode, Encode};

use crate::errors::{Result, TsumugiError};
use crate::utils::FromU32;

const CATE_IDSET_BITS: usize = 18;
const CATE_IDSET_MASK: u32 = (1 << CATE_IDSET_BITS) - 1;
const BASE_ID_BITS: usize = 8;
const BASE_ID_MASK: u32 = (1 << BASE_ID_BITS) - 1;
const LENGTH_BITS: usize = 4;

/// The maximum number of categories that can be defined in `char.def`.
pub const MAX_CATEGORIES: usize = CATE_IDSET_BITS;

const DEFAULT_ORDER: &[u32] = &[0];

/// Information of a character defined in `char.def`.
///
/// The memory layout is
///   cate_idset = 18 bits
///      base_id =  8 bits
///       invoke =  1 bit
///        group =  1 bit
///       length =  4 bits
#[derive(Default, Clone, Copy, Eq, PartialEq, Decode, Encode)]
pub struct CharInfo(u32);

impl fmt::Debug for CharInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharInfo")
            .field("cate_idset", &self.cate_idset())
            .field("base_id", &self.base_id())
            .field("invoke", &self.invoke())
            .field("group", &self.group())
            .field("length", &self.length())
            .finish()
    }
}

impl CharInfo {
    pub fn new(
        cate_idset: u32,
        base_id: u32,
        invoke: bool,
        group: bool,
        length: u16,
    ) -> Option<Self> {
        if cate_idset >> CATE_IDSET_BITS != 0 {
            return None;
        }
        if base_id >> BASE_ID_BITS != 0 {
            return None;
        }
        if length >> LENGTH_BITS != 0 {
            return None;
        }
        Some(Self(
            cate_idset
                | (base_id << CATE_IDSET_BITS)
                | (u32::from(invoke) << (CATE_IDSET_BITS + BASE_ID_BITS))
                | (u32::from(group) << (CATE_IDSET_BITS + BASE_ID_BITS + 1))
                | ((u32::from(length)) << (CATE_IDSET_BITS + BASE_ID_BITS + 2)),
        ))
    }

    #[inline(always)]
    pub fn reset_cate_idset(&mut self, cate_idset: u32) {
        self.0 &= !CATE_IDSET_MASK;
        self.0 |= cate_idset;
    }

    /// Set of category ids the character belongs to.
    #[inline(always)]
    pub const fn cate_idset(&self) -> u32 {
        self.0 & CATE_IDSET_MASK
    }

    /// Id of the first-listed category, used to select unknown-word entries.
    #[inline(always)]
    pub const fn base_id(&self) -> u32 {
        (self.0 >> CATE_IDSET_BITS) & BASE_ID_MASK
    }

    /// Whether unknown words are generated even if a lexicon word matches.
    #[inline(always)]
    pub const fn invoke(&self) -> bool {
        (self.0 >> (CATE_IDSET_BITS + BASE_ID_BITS)) & 1 != 0
    }

    /// Whether a run of characters in the base category forms one unknown word.
    #[inline(always)]
    pub const fn group(&self) -> bool {
        (self.0 >> (CATE_IDSET_BITS + BASE_ID_BITS + 1)) & 1 != 0
    }

    /// Maximum length of prefix unknown words generated besides the grouped one.
    #[inline(always)]
    pub const fn length(&self) -> u16 {
        (self.0 >> (CATE_IDSET_BITS + BASE_ID_BITS + 2)) as u16
    }

    /// Checks if the character belongs to the category.
    #[inline(always)]
    pub const fn has_category(&self, cate_id: u32) -> bool {
        (self.cate_idset() >> cate_id) & 1 != 0
    }
}

/// Mapping from characters to their categories.
#[derive(Decode, Encode)]
pub struct CharProperty {
    chr2inf: Vec<CharInfo>,
    default_cinfo: CharInfo,
    categories: Vec<String>, // indexed by category id
    cate_infos: Vec<CharInfo>, // indexed by category id, with empty id sets
    // Category ids of each character in the order listed in char.def.
    chr2order: Vec<u16>,
    cate_orders: Vec<Vec<u32>>,
}

impl CharProperty {
    #[inline(always)]
    pub fn char_info(&self, c: char) -> CharInfo {
        self.chr2inf
            .get(usize::from_u32(u32::from(c)))
            .copied()
            .unwrap_or(self.default_cinfo)
    }

    #[inline(always)]
    pub fn cate_id(&self, category: &str) -> Option<u32> {
        self.categories
            .iter()
            .position(|cate| cate == category)
            .and_then(|id| u32::try_from(id).ok())
    }

    #[inline(always)]
    pub fn cate_str(&self, cate_id: u32) -> Option<&str> {
        self.categories
            .get(usize::from_u32(cate_id))
            .map(|c| c.as_str())
    }

    #[inline(always)]
    pub fn num_categories(&self) -> usize {
        self.categories.len()
    }

    /// Checks that every character refers to defined categories only.
    pub(crate) fn is_consistent(&self) -> bool {
        let n = self.categories.len();
        n != 0
            && n <= MAX_CATEGORIES
            && self.cate_infos.len() == n
            && self.chr2order.len() == self.chr2inf.len()
            && self
                .chr2order
                .iter()
                .all(|&o| usize::from(o) < self.cate_orders.len())
            && self
                .cate_orders
                .iter()
                .all(|ids| !ids.is_empty() && ids.iter().all(|&id| usize::from_u32(id) < n))
            && std::iter::once(&self.default_cinfo)
                .chain(self.chr2inf.iter())
                .all(|c| usize::from_u32(c.base_id()) < n && c.cate_idset() >> n == 0)
    }

    /// Returns the category names of the character in the order listed in
    /// `char.def`, the base category first.
    pub fn categories(&self, c: char) -> Vec<&str> {
        self.cate_order(c)
            .iter()
            .filter_map(|&id| self.cate_str(id))
            .collect()
    }

    fn cate_order(&self, c: char) -> &[u32] {
        self.chr2order
            .get(usize::from_u32(u32::from(c)))
            .and_then(|&o| self.cate_orders.get(usize::from(o)))
            .map_or(DEFAULT_ORDER, Vec::as_slice)
    }

    /// Gets the index of the category order, appending it if new.
    /// Duplicated ids are dropped.
    fn intern_order(cate_orders: &mut Vec<Vec<u32>>, cate_ids: &[u32]) -> Option<u16> {
        let mut order = Vec::with_capacity(cate_ids.len());
        for &id in cate_ids {
            if !order.contains(&id) {
                order.push(id);
            }
        }
        if let Some(i) = cate_orders.iter().position(|o| *o == order) {
            return u16::try_from(i).ok();
        }
        let i = u16::try_from(cate_orders.len()).ok()?;
        cate_orders.push(order);
        Some(i)
    }

    /// Returns the id set of the given categories, ignoring undefined names.
    pub fn cate_idset_of<S>(&self, names: &[S]) -> u32
    where
        S: AsRef<str>,
    {
        names
            .iter()
            .filter_map(|name| self.cate_id(name.as_ref()))
            .fold(0, |set, id| set | (1 << id))
    }

    /// Reassigns the categories of a character.
    pub(crate) fn set_categories<S>(&mut self, c: char, names: &[S]) -> Result<()>
    where
        S: AsRef<str>,
    {
        let index = usize::from_u32(u32::from(c));
        if self.chr2inf.len() <= index {
            let msg = format!("Only characters up to U+FFFF can be reassigned, {c:?}");
            return Err(TsumugiError::invalid_argument("c", msg));
        }
        let mut cate_ids = Vec::with_capacity(names.len());
        for name in names {
            let id = self.cate_id(name.as_ref()).ok_or_else(|| {
                let msg = format!("Undefined category: {}", name.as_ref());
                TsumugiError::invalid_argument("names", msg)
            })?;
            cate_ids.push(id);
        }
        let cinfo = Self::encode_cate_info(&cate_ids, &self.cate_infos)
            .ok_or_else(|| TsumugiError::invalid_argument("names", "No category is given."))?;
        let order = Self::intern_order(&mut self.cate_orders, &cate_ids).ok_or_else(|| {
            TsumugiError::invalid_argument("names", "Too many orders of categories.")
        })?;
        self.chr2inf[index] = cinfo;
        self.chr2order[index] = order;
        Ok(())
    }

    fn encode_cate_info(target_ids: &[u32], cate_infos: &[CharInfo]) -> Option<CharInfo> {
        let mut base = *cate_infos.get(usize::from_u32(*target_ids.first()?))?;
        let mut cate_idset = base.cate_idset();
        for &target_id in target_ids {
            cate_idset |= 1 << target_id;
        }
        base.reset_cate_idset(cate_idset);
        Some(base)
    }
}
