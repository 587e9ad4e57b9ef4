//! Secondary structure as a symmetric pairing map.
//!
//! `pairs[i] == Some(j)` iff `pairs[j] == Some(i)`; no position pairs
//! with itself. Every constructor and mutator below keeps that invariant.

use std::fmt;

use crate::error::{Error, Result};
use crate::nucleotide::can_pair;
use crate::parser;
use crate::sequence::Sequence;

/// A base pair `(i, j)`, written from the 5' side.
pub type BasePair = (usize, usize);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecStruct {
    pairs: Vec<Option<usize>>,
}

impl SecStruct {
    /// All positions unpaired.
    pub fn unpaired(len: usize) -> Self {
        Self {
            pairs: vec![None; len],
        }
    }

    /// Build from a partner table in the `-1 = unpaired` convention.
    ///
    /// Only entries pointing forward (`partners[i] > i`) are read and
    /// mirrored onto their partner, so a one-sided table is symmetrized.
    /// When two positions claim the same partner, the later claim wins and
    /// the earlier one is left unpaired.
    pub fn from_partners(partners: &[isize]) -> Result<Self> {
        let mut ss = Self::unpaired(partners.len());
        for (i, &p) in partners.iter().enumerate() {
            if p < 0 || (p as usize) < i {
                continue;
            }
            ss.set_pairing_partner(i, p as usize)?;
        }
        Ok(ss)
    }

    /// Parse dot-bracket notation, optionally with `{}`, `[]`, `<>` pseudoknots.
    pub fn from_dot_bracket(input: &str, pseudoknots: bool) -> Result<Self> {
        Ok(Self {
            pairs: parser::parse(input, pseudoknots)?,
        })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns true if there are any pairs.
    pub fn nonempty(&self) -> bool {
        self.pairs.iter().any(Option::is_some)
    }

    pub fn pairs(&self) -> &[Option<usize>] {
        &self.pairs
    }

    /// Partner table with `-1` for unpaired positions.
    pub fn to_partners(&self) -> Vec<isize> {
        self.pairs
            .iter()
            .map(|p| p.map_or(-1, |j| j as isize))
            .collect()
    }

    pub fn is_paired(&self, index: usize) -> bool {
        self.pairing_partner(index).is_some()
    }

    pub fn pairing_partner(&self, index: usize) -> Option<usize> {
        self.pairs.get(index).copied().flatten()
    }

    /// Pair `index` with `partner`, unpairing any previous partner of either.
    pub fn set_pairing_partner(&mut self, index: usize, partner: usize) -> Result<()> {
        let len = self.len();
        if index >= len || partner >= len || index == partner {
            return Err(Error::InvalidPartner {
                index,
                partner,
                len,
            });
        }
        for (a, b) in [(index, partner), (partner, index)] {
            if let Some(stale) = self.pairs[a] {
                if stale != b {
                    self.pairs[stale] = None;
                }
            }
        }
        self.pairs[index] = Some(partner);
        self.pairs[partner] = Some(index);
        Ok(())
    }

    /// Unpair `index` and its former partner. Out-of-range indices are ignored.
    pub fn set_unpaired(&mut self, index: usize) {
        if let Some(partner) = self.pairs.get_mut(index).and_then(Option::take) {
            self.pairs[partner] = None;
        }
    }

    /// Pairs `(i, j)` with `i < j`, ordered by `i`.
    pub fn pair_list(&self) -> Vec<BasePair> {
        self.pairs
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.filter(|&j| j > i).map(|j| (i, j)))
            .collect()
    }

    pub fn num_pairs(&self) -> usize {
        self.pair_list().len()
    }

    /// Copy of positions `start..end`, re-indexed from zero.
    ///
    /// Pairs reaching outside the slice are dropped; both the kept end and
    /// everything else outside stay consistent.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.len());
        let start = start.min(end);
        let pairs = self.pairs[start..end]
            .iter()
            .map(|p| p.filter(|j| (start..end).contains(j)).map(|j| j - start))
            .collect();
        Self { pairs }
    }

    /// Keep only the pairs whose bases can pair in `seq`.
    pub fn satisfied_pairs(&self, seq: &Sequence) -> Self {
        let mut ret = Self::unpaired(self.len());
        for (i, j) in self.pair_list() {
            if can_pair(seq.nt(i), seq.nt(j)) {
                ret.pairs[i] = Some(j);
                ret.pairs[j] = Some(i);
            }
        }
        ret
    }

    /// Maximal runs of stacked pairs `(i, j), (i+1, j-1), ...`.
    ///
    /// Each stem is listed outermost pair first.
    pub fn stems(&self) -> Vec<Vec<BasePair>> {
        group_stems(&self.pair_list())
    }

    /// The stem holding the pair at `index`, if `index` is paired.
    pub fn stem_with(&self, index: usize) -> Option<Vec<BasePair>> {
        let partner = self.pairing_partner(index)?;
        let bp = (index.min(partner), index.max(partner));
        self.stems().into_iter().find(|stem| stem.contains(&bp))
    }

    /// Loop positions if `index` is an unpaired base of a simple internal
    /// loop, i.e. flanked by two pairs with nothing paired between their
    /// partners.
    ///
    /// The result lists the 5' side (flanking pair to flanking pair) and
    /// then the 3' side.
    pub fn is_internal(&self, index: usize) -> Option<Vec<usize>> {
        if index >= self.len() || self.is_paired(index) {
            return None;
        }
        let start_here = (0..index).rev().find(|&w| self.is_paired(w))?;
        let end_here = (index + 1..self.len()).find(|&w| self.is_paired(w))?;
        let start_there = self.pairs[start_here]?;
        let end_there = self.pairs[end_here]?;

        let there_start = start_there.min(end_there);
        let there_end = start_there.max(end_there);
        if start_here == there_start {
            return None;
        }
        if (there_start + 1..there_end).any(|w| self.is_paired(w)) {
            return None;
        }

        Some((start_here..=end_here).chain(there_start..=there_end).collect())
    }

    /// Length of the longest run of stacked pairs.
    pub fn longest_stack_length(&self) -> usize {
        // (run start, partner of the last pair in the run)
        let mut run: Option<(usize, usize)> = None;
        let mut longest = 0;

        for (i, p) in self.pairs.iter().enumerate() {
            match p {
                Some(j) if *j > i => {
                    run = match run {
                        Some((start, last)) if last == j + 1 => Some((start, *j)),
                        Some((start, _)) => {
                            longest = longest.max(i - start);
                            Some((i, *j))
                        }
                        None => Some((i, *j)),
                    };
                }
                _ => {
                    if let Some((start, _)) = run.take() {
                        longest = longest.max(i - start);
                    }
                }
            }
        }
        if let Some((start, _)) = run {
            longest = longest.max(self.len() - start);
        }
        longest
    }

    /// Dot-bracket notation with `(`, `)`, `.` only; `&` at the sequence's
    /// cut positions.
    pub fn to_dot_bracket(&self, seq: Option<&Sequence>) -> String {
        parser::write(&self.pairs, seq)
    }

    /// Dot-bracket notation giving each crossing stem its own bracket class.
    pub fn to_pseudoknot_dot_bracket(&self) -> Result<String> {
        parser::write_stems(self.len(), &self.stems())
    }

    /// Structure with every pseudoknotted stem removed.
    pub fn filter_for_pseudoknots(&self) -> Result<Self> {
        let dbn = self.to_pseudoknot_dot_bracket()?;
        Self::from_dot_bracket(&parser::blank_classes(&dbn, &[1, 2, 3]), false)
    }

    /// Structure with only the pseudoknotted stems.
    pub fn only_pseudoknots(&self) -> Result<Self> {
        let dbn = self.to_pseudoknot_dot_bracket()?;
        Self::from_dot_bracket(&parser::blank_classes(&dbn, &[0]), true)
    }
}

/// Group pairs into stems by adjacency: a pair joins the first stem that
/// already holds its directly enclosing or directly enclosed neighbor.
pub(crate) fn group_stems(pairs: &[BasePair]) -> Vec<Vec<BasePair>> {
    let mut stems: Vec<Vec<BasePair>> = Vec::new();
    for &(i, j) in pairs {
        let adjacent = |&(a, b): &BasePair| {
            (a + 1 == i && b == j + 1) || (a == i + 1 && b + 1 == j)
        };
        match stems.iter_mut().find(|stem| stem.iter().any(adjacent)) {
            Some(stem) => stem.push((i, j)),
            None => stems.push(vec![(i, j)]),
        }
    }
    stems
}

impl TryFrom<&str> for SecStruct {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::from_dot_bracket(s, false)
    }
}

impl fmt::Display for SecStruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot_bracket(None))
    }
}
