use crate::DOMAIN_SIZE;

const WORD_BITS: usize = u64::BITS as usize;

/// Membership bitmap over the whole 24-bit value domain.
#[derive(Debug, Clone)]
pub struct SeenSet {
    words: Vec<u64>,
    len: usize,
}

impl SeenSet {
    pub fn new() -> Self {
        Self {
            words: vec![0; DOMAIN_SIZE / WORD_BITS],
            len: 0,
        }
    }

    /// Returns true if `n` wasn't in the set before.
    pub fn insert(&mut self, n: usize) -> bool {
        debug_assert!(n < DOMAIN_SIZE, "{} is outside of the 24-bit domain", n);
        let (word_ind, bit) = Self::locate(n);
        let word = &mut self.words[word_ind];
        if *word & bit != 0 {
            false
        } else {
            *word |= bit;
            self.len += 1;
            true
        }
    }

    pub fn contains(&self, n: usize) -> bool {
        let (word_ind, bit) = Self::locate(n);
        self.words
            .get(word_ind)
            .map(|word| word & bit != 0)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn locate(n: usize) -> (usize, u64) {
        (n / WORD_BITS, 1 << (n % WORD_BITS))
    }
}

impl Default for SeenSet {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_seen_set_insert() {
    let mut seen = SeenSet::new();
    assert!(seen.is_empty());
    assert!(seen.insert(0));
    assert!(seen.insert(63));
    assert!(seen.insert(64));
    assert!(seen.insert(DOMAIN_SIZE - 1));
    assert!(!seen.insert(63));
    assert!(seen.len() == 4);
}

#[test]
fn test_seen_set_contains() {
    let mut seen = SeenSet::new();
    seen.insert(7967233);
    assert!(seen.contains(7967233));
    assert!(!seen.contains(7967232));
    assert!(!seen.contains(7967234));
    assert!(!seen.contains(DOMAIN_SIZE));
}
