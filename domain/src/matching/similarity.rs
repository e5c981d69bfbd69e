//! Gestalt (Ratcliff/Obershelp) sequence similarity.
//!
//! The ratio is `2 * M / T`, where `T` is the combined length of both
//! strings and `M` is the number of characters covered by matching blocks.
//! Blocks are found by taking the longest common contiguous run, then
//! recursing into the unmatched text on either side of it.
//!
//! The query side is indexed once ([`QueryIndex`]) and compared against
//! many candidates. When the query is 200 characters or longer, characters
//! that make up more than 1% of it are not used to seed matches (they can
//! still extend a match that was seeded elsewhere). This keeps long, repetitive
//! queries from degenerating into quadratic work.

use std::collections::HashMap;

/// Query length from which frequent characters stop seeding matches.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Similarity of `candidate` and `query`, in `[0.0, 1.0]`
pub fn ratio(candidate: &str, query: &str) -> f64 {
    QueryIndex::new(query).ratio(candidate)
}

/// A query prepared for repeated comparison against candidates.
#[derive(Debug, Clone)]
pub struct QueryIndex {
    chars: Vec<char>,
    /// Positions of every non-popular character
    positions: HashMap<char, Vec<usize>>,
    /// Full character histogram (popular characters included)
    counts: HashMap<char, usize>,
}

impl QueryIndex {
    pub fn new(query: &str) -> Self {
        let chars: Vec<char> = query.chars().collect();

        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in chars.iter().enumerate() {
            positions.entry(*c).or_default().push(j);
        }

        let counts = positions.iter().map(|(c, js)| (*c, js.len())).collect();

        let n = chars.len();
        if n >= AUTOJUNK_MIN_LEN {
            let limit = n / 100 + 1;
            positions.retain(|_, js| js.len() <= limit);
        }

        Self {
            chars,
            positions,
            counts,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Exact gestalt ratio against `candidate`
    pub fn ratio(&self, candidate: &str) -> f64 {
        let a: Vec<char> = candidate.chars().collect();
        score(self.matched_chars(&a), a.len() + self.chars.len())
    }

    /// Upper bound on [`ratio`](Self::ratio) from lengths alone
    pub fn length_bound(&self, candidate: &str) -> f64 {
        let la = candidate.chars().count();
        score(la.min(self.chars.len()), la + self.chars.len())
    }

    /// Upper bound on [`ratio`](Self::ratio) from shared character counts,
    /// ignoring order
    pub fn histogram_bound(&self, candidate: &str) -> f64 {
        let mut avail: HashMap<char, usize> = HashMap::new();
        let mut shared = 0;
        let mut la = 0;
        for c in candidate.chars() {
            la += 1;
            let left = avail
                .entry(c)
                .or_insert_with(|| self.counts.get(&c).copied().unwrap_or(0));
            if *left > 0 {
                *left -= 1;
                shared += 1;
            }
        }
        score(shared, la + self.chars.len())
    }

    /// Total size of all matching blocks between `a` and the query
    fn matched_chars(&self, a: &[char]) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, a.len(), 0, self.chars.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_match(a, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }

    /// Longest common run of `a[alo..ahi]` and `query[blo..bhi]`.
    ///
    /// Returns `(i, j, size)`. Among equally long runs, the one starting
    /// earliest in `a` wins, then earliest in the query.
    fn longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let b = &self.chars;
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);

        // j2len[j] = length of the run ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(js) = self.positions.get(c) {
                for &j in js {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    };
                    let k = prev + 1;
                    next.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = next;
        }

        // Grow across characters that were excluded from seeding
        while besti > alo && bestj > blo && a[besti - 1] == b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }

        (besti, bestj, bestsize)
    }
}

fn score(matches: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        2.0 * matches as f64 / total as f64
    }
}
