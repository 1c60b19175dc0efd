use crate::moves::types::Move;

// Make sure MATE_THRESHOLD matches what we define in search.rs (30000)
pub const MATE_THRESHOLD: i32 = 30000;

/// An existing EXACT entry is only protected from replacement while
/// `new.age - existing.age <= AGE_THRESHOLD`; past that it is aged out.
pub const AGE_THRESHOLD: u8 = 16;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeType {
    Exact = 0,
    LowerBound = 1, // Beta cutoff (failed high)
    UpperBound = 2, // Alpha cutoff (failed low)
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub key: u64,
    pub best_move: Option<Move>,
    pub score: i16,
    pub depth: u8,
    pub bound: u8, // 0=Exact, 1=Lower, 2=Upper
    pub age: u8,
}

pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    pub age: u8,
}

impl TranspositionTable {
    pub fn new(size_mb: usize) -> Self {
        // Allocate TT based on size in MB.
        let entry_size = std::mem::size_of::<TTEntry>();
        let num_entries = (size_mb * 1024 * 1024) / entry_size;

        // Round down to power of 2
        let mut capacity = 1;
        while capacity * 2 <= num_entries {
            capacity *= 2;
        }

        Self {
            entries: vec![
                TTEntry {
                    key: 0,
                    best_move: None,
                    score: 0,
                    depth: 0,
                    bound: 0,
                    age: 0,
                };
                capacity
            ],

            age: 0,
        }
    }

    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.key = 0;
            entry.best_move = None;
            entry.score = 0;
            entry.depth = 0;
            entry.bound = 0;
            entry.age = 0;
        }
        self.age = 0;
    }

    /// Applies the §4.7 replacement policy to `entry` for an incoming entry
    /// of the given depth/bound/age:
    ///   - empty slot -> accept
    ///   - same key, existing is EXACT and not aged out, and not out-depthed
    ///     -> refuse
    ///   - otherwise -> accept (aged-out EXACT, deeper search, non-EXACT
    ///     bound, or a different key occupying the slot)
    fn should_replace(entry: &TTEntry, key: u64, depth: u8, new_age: u8) -> bool {
        if entry.key == 0 {
            return true;
        }
        if entry.key != key {
            return true;
        }

        let aged_out = new_age.wrapping_sub(entry.age) > AGE_THRESHOLD;
        let out_depthed = depth >= entry.depth;
        let existing_is_protected_exact = entry.bound == NodeType::Exact as u8;

        !(existing_is_protected_exact && !aged_out && !out_depthed)
    }

    /// Store `entry` tagged with the table's current search age. This is
    /// what search calls on every node.
    pub fn save(
        &mut self,
        key: u64,
        mv: Option<Move>,
        score: i32,
        depth: u8,
        bound: u8,
        _ply: i32,
    ) {
        let age = self.age;
        self.save_with_age(key, mv, score, depth, bound, age);
    }

    /// Store `entry` tagged with an explicit age, bypassing the table's own
    /// search-age counter. Exists so the §4.7 replacement matrix can be
    /// exercised directly against concrete (existing, incoming) age pairs.
    pub fn save_with_age(
        &mut self,
        key: u64,
        mv: Option<Move>,
        score: i32,
        depth: u8,
        bound: u8,
        age: u8,
    ) {
        // Safety clamp
        let score_i16 = score.clamp(-32000, 32000) as i16;

        let index = (key as usize) & (self.entries.len() - 1);
        let entry = &mut self.entries[index];

        if Self::should_replace(entry, key, depth, age) {
            // Preserve existing best_move if the new entry doesn't provide one.
            let best_move = if mv.is_some() { mv } else { entry.best_move };

            entry.key = key;
            entry.best_move = best_move;
            entry.score = score_i16;
            entry.depth = depth;
            entry.bound = bound;
            entry.age = age;
        }
    }

    pub fn probe(
        &self,
        key: u64,
        _depth: u8,
        _alpha: i32,
        _beta: i32,
        _ply: i32,
    ) -> Option<(Option<Move>, i32, u8, u8)> {
        let index = (key as usize) & (self.entries.len() - 1);
        let entry = &self.entries[index];

        if entry.key == key {
            let score = entry.score as i32;
            return Some((entry.best_move, score, entry.depth, entry.bound));
        }
        None
    }
}
