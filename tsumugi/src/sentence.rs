use crate::dictionary::character::{CharInfo, CharProperty, MAX_CATEGORIES};

/// Input sentence with per-character information precomputed.
#[derive(Default, Clone, Debug)]
pub struct Sentence {
    input: String,
    chars: Vec<char>,
    c2b: Vec<usize>,
    cinfos: Vec<CharInfo>,
    groupable: Vec<usize>,
    kanji_run: Vec<usize>,
}

impl Sentence {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.input.clear();
        self.chars.clear();
        self.c2b.clear();
        self.cinfos.clear();
        self.groupable.clear();
        self.kanji_run.clear();
    }

    pub fn set_sentence<S>(&mut self, input: S)
    where
        S: AsRef<str>,
    {
        self.clear();
        self.input.push_str(input.as_ref());
    }

    /// Computes character information.
    ///
    /// `kanji_cate_idset` is the set of categories regarded as kanji.
    pub fn compile(&mut self, char_prop: &CharProperty, kanji_cate_idset: u32) {
        self.compute_basic();
        self.compute_categories(char_prop);
        self.compute_groupable();
        self.compute_kanji_run(kanji_cate_idset);
    }

    fn compute_basic(&mut self) {
        for (bi, ch) in self.input.char_indices() {
            self.chars.push(ch);
            self.c2b.push(bi);
        }
        self.c2b.push(self.input.len());
    }

    fn compute_categories(&mut self, char_prop: &CharProperty) {
        self.cinfos.reserve(self.chars.len());
        for &c in &self.chars {
            self.cinfos.push(char_prop.char_info(c));
        }
    }

    /// `groupable[i]` is the length of the run starting at `i` whose characters
    /// all belong to the base category of the `i`-th character.
    ///
    /// Runs of every category are counted in one backward scan.
    fn compute_groupable(&mut self) {
        debug_assert_eq!(self.chars.len(), self.cinfos.len());

        let mut runs = [0; MAX_CATEGORIES];
        self.groupable.resize(self.chars.len(), 1);
        for i in (0..self.chars.len()).rev() {
            let cinfo = self.cinfos[i];
            for (cate_id, run) in (0..).zip(runs.iter_mut()) {
                if cinfo.has_category(cate_id) {
                    *run += 1;
                } else {
                    *run = 0;
                }
            }
            self.groupable[i] = runs[cinfo.base_id() as usize];
        }
    }

    /// `kanji_run[i]` is the length of the run of kanji characters starting at `i`.
    fn compute_kanji_run(&mut self, kanji_cate_idset: u32) {
        self.kanji_run.resize(self.chars.len(), 0);
        let mut run = 0;
        for i in (0..self.chars.len()).rev() {
            if self.cinfos[i].cate_idset() & kanji_cate_idset != 0 {
                run += 1;
            } else {
                run = 0;
            }
            self.kanji_run[i] = run;
        }
    }

    #[inline(always)]
    pub fn raw(&self) -> &str {
        &self.input
    }

    #[inline(always)]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    #[inline(always)]
    pub fn len_char(&self) -> usize {
        self.chars.len()
    }

    #[inline(always)]
    pub fn byte_position(&self, pos_char: usize) -> usize {
        self.c2b[pos_char]
    }

    #[inline(always)]
    pub fn char_info(&self, pos_char: usize) -> CharInfo {
        self.cinfos[pos_char]
    }

    #[inline(always)]
    pub fn groupable(&self, pos_char: usize) -> usize {
        self.groupable[pos_char]
    }

    /// Checks if all the characters in the range are kanji.
    #[inline(always)]
    pub fn is_kanji_only(&self, start_char: usize, end_char: usize) -> bool {
        debug_assert!(start_char < end_char);
        self.kanji_run[start_char] >= end_char - start_char
    }
}
