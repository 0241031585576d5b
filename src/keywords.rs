//! Reserved-word lookup.
//!
//! Identifier lexemes are checked against a two-probe FNV perfect hash:
//! each keyword lives in one of the two slots its seeded hashes select, so
//! a lookup is at most two probes and one byte comparison against the
//! packed keyword text. The table is built once, on first use; slot
//! placement uses cuckoo-style eviction and reseeds until every keyword
//! fits, so the construction is correct for any future edit to the word
//! list.

use once_cell::sync::Lazy;

use crate::token::TokenType;

/// Every word the lexer reclassifies: the ES2020 reserved words, the
/// contextual keywords, and the future reserved words of strict mode.
const KEYWORDS: &[(&str, TokenType)] = &[
    ("await", TokenType::Await),
    ("break", TokenType::Break),
    ("case", TokenType::Case),
    ("catch", TokenType::Catch),
    ("class", TokenType::Class),
    ("const", TokenType::Const),
    ("continue", TokenType::Continue),
    ("debugger", TokenType::Debugger),
    ("default", TokenType::Default),
    ("delete", TokenType::Delete),
    ("do", TokenType::Do),
    ("else", TokenType::Else),
    ("enum", TokenType::Enum),
    ("export", TokenType::Export),
    ("extends", TokenType::Extends),
    ("false", TokenType::False),
    ("finally", TokenType::Finally),
    ("for", TokenType::For),
    ("function", TokenType::Function),
    ("if", TokenType::If),
    ("import", TokenType::Import),
    ("in", TokenType::In),
    ("instanceof", TokenType::Instanceof),
    ("new", TokenType::New),
    ("null", TokenType::Null),
    ("return", TokenType::Return),
    ("super", TokenType::Super),
    ("switch", TokenType::Switch),
    ("this", TokenType::This),
    ("throw", TokenType::Throw),
    ("true", TokenType::True),
    ("try", TokenType::Try),
    ("typeof", TokenType::Typeof),
    ("var", TokenType::Var),
    ("void", TokenType::Void),
    ("while", TokenType::While),
    ("with", TokenType::With),
    ("yield", TokenType::Yield),
    ("as", TokenType::As),
    ("async", TokenType::Async),
    ("from", TokenType::From),
    ("get", TokenType::Get),
    ("let", TokenType::Let),
    ("meta", TokenType::Meta),
    ("of", TokenType::Of),
    ("set", TokenType::Set),
    ("static", TokenType::Static),
    ("target", TokenType::Target),
    ("implements", TokenType::Implements),
    ("interface", TokenType::Interface),
    ("package", TokenType::Package),
    ("private", TokenType::Private),
    ("protected", TokenType::Protected),
    ("public", TokenType::Public),
];

const TABLE_SIZE: usize = 128;
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

#[derive(Clone, Copy)]
struct Slot {
    /// Offset into the packed keyword text; `len == 0` marks an empty slot.
    off: u32,
    len: u8,
    token: TokenType,
}

const EMPTY_SLOT: Slot = Slot {
    off: 0,
    len: 0,
    token: TokenType::Identifier,
};

pub struct KeywordTable {
    packed: String,
    slots: Vec<Slot>,
    seeds: (u64, u64),
}

fn fnv1a(seed: u64, word: &str) -> u64 {
    let mut hash = seed;
    for &b in word.as_bytes() {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

impl KeywordTable {
    fn probes(&self, word: &str) -> (usize, usize) {
        (
            (fnv1a(self.seeds.0, word) as usize) & (TABLE_SIZE - 1),
            (fnv1a(self.seeds.1, word) as usize) & (TABLE_SIZE - 1),
        )
    }

    /// Maps an identifier lexeme to its keyword token, or
    /// [`TokenType::Identifier`] when it is not a keyword.
    pub fn lookup(&self, word: &str) -> TokenType {
        if word.len() < 2 || word.len() > 10 {
            return TokenType::Identifier;
        }
        let (h1, h2) = self.probes(word);
        for idx in [h1, h2] {
            let slot = self.slots[idx];
            if slot.len as usize == word.len() {
                let off = slot.off as usize;
                if &self.packed[off..off + slot.len as usize] == word {
                    return slot.token;
                }
            }
        }
        TokenType::Identifier
    }
}

fn try_build(seeds: (u64, u64)) -> Option<Vec<usize>> {
    // slot -> keyword index
    let mut placed: Vec<Option<usize>> = vec![None; TABLE_SIZE];
    for start in 0..KEYWORDS.len() {
        let mut key = start;
        let mut slot = (fnv1a(seeds.0, KEYWORDS[key].0) as usize) & (TABLE_SIZE - 1);
        let mut evictions = 0;
        loop {
            match placed[slot] {
                None => {
                    placed[slot] = Some(key);
                    break;
                }
                Some(other) => {
                    if evictions > 8 * KEYWORDS.len() {
                        return None;
                    }
                    evictions += 1;
                    placed[slot] = Some(key);
                    // Move the evicted keyword to its alternate slot.
                    let (h1, h2) = (
                        (fnv1a(seeds.0, KEYWORDS[other].0) as usize) & (TABLE_SIZE - 1),
                        (fnv1a(seeds.1, KEYWORDS[other].0) as usize) & (TABLE_SIZE - 1),
                    );
                    if h1 == h2 {
                        return None;
                    }
                    slot = if slot == h1 { h2 } else { h1 };
                    key = other;
                }
            }
        }
    }
    Some(placed.into_iter().map(|p| p.map_or(usize::MAX, |k| k)).collect())
}

fn build() -> KeywordTable {
    let mut packed = String::new();
    let mut offsets = Vec::with_capacity(KEYWORDS.len());
    for (word, _) in KEYWORDS {
        offsets.push(packed.len() as u32);
        packed.push_str(word);
    }

    let mut seeds = (FNV_OFFSET, 0x9e3779b97f4a7c15);
    loop {
        if let Some(placed) = try_build(seeds) {
            let mut slots = vec![EMPTY_SLOT; TABLE_SIZE];
            for (idx, &key) in placed.iter().enumerate() {
                if key != usize::MAX {
                    let (word, token) = KEYWORDS[key];
                    slots[idx] = Slot {
                        off: offsets[key],
                        len: word.len() as u8,
                        token,
                    };
                }
            }
            return KeywordTable { packed, slots, seeds };
        }
        seeds.1 = seeds
            .1
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
    }
}

static TABLE: Lazy<KeywordTable> = Lazy::new(build);

/// Reclassifies a completed identifier lexeme.
pub fn keyword_token(word: &str) -> TokenType {
    TABLE.lookup(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_round_trips() {
        for (word, token) in KEYWORDS {
            assert_eq!(keyword_token(word), *token, "lookup of {:?}", word);
        }
    }

    #[test]
    fn non_keywords_stay_identifiers() {
        for word in ["foo", "classy", "awaits", "le", "Function", "reverts", "x"] {
            assert_eq!(keyword_token(word), TokenType::Identifier, "{:?}", word);
        }
    }

    #[test]
    fn lookup_is_at_most_two_probes() {
        for (word, _) in KEYWORDS {
            let (h1, h2) = TABLE.probes(word);
            let hit = [h1, h2].into_iter().any(|idx| {
                let slot = TABLE.slots[idx];
                slot.len as usize == word.len()
                    && &TABLE.packed[slot.off as usize..slot.off as usize + slot.len as usize]
                        == *word
            });
            assert!(hit, "{:?} not found within two probes", word);
        }
    }

    #[test]
    fn packed_text_is_contiguous() {
        assert!(TABLE.packed.starts_with("await"));
        assert!(TABLE.packed.ends_with("public"));
    }
}
