use crate::error::{Error, Result};
use crate::sequence::Sequence;

/// Bracket classes in assignment order. Class 0 is the nested structure,
/// the others carry pseudoknotted stems.
pub const BRACKETS: [(char, char); 4] = [('(', ')'), ('{', '}'), ('[', ']'), ('<', '>')];

/// Parse dot-bracket notation into a symmetric partner table.
///
/// `(` / `)` always pair. With `pseudoknots`, `{}`, `[]` and `<>` pair too,
/// each class on its own stack. Every other character, including cut
/// markers, occupies one unpaired position.
///
/// Returns Err on an unmatched closing or unclosed opening bracket.
pub fn parse(input: &str, pseudoknots: bool) -> Result<Vec<Option<usize>>> {
    let chars: Vec<char> = input.chars().collect();
    let mut pairs: Vec<Option<usize>> = vec![None; chars.len()];
    let classes = if pseudoknots { &BRACKETS[..] } else { &BRACKETS[..1] };

    for &(open, close) in classes {
        let mut stack: Vec<usize> = Vec::new();
        for (pos, &ch) in chars.iter().enumerate() {
            if ch == open {
                stack.push(pos);
            } else if ch == close {
                let i = stack.pop().ok_or(Error::UnmatchedClose {
                    bracket: close,
                    position: pos,
                })?;
                pairs[i] = Some(pos);
                pairs[pos] = Some(i);
            }
        }
        if let Some(&pos) = stack.last() {
            return Err(Error::UnclosedOpen {
                bracket: open,
                position: pos,
            });
        }
    }

    Ok(pairs)
}

/// Write a partner table using only `(`, `)` and `.`.
///
/// Unpaired positions the sequence declares as cuts are written as `&`.
pub fn write(pairs: &[Option<usize>], seq: Option<&Sequence>) -> String {
    pairs
        .iter()
        .enumerate()
        .map(|(i, partner)| match partner {
            Some(j) if *j > i => '(',
            Some(_) => ')',
            None if seq.is_some_and(|s| s.has_cut(i)) => '&',
            None => '.',
        })
        .collect()
}

/// Write stems with one bracket class per stem.
///
/// Stems are visited in order; each takes the lowest class that is not
/// left half-open between the endpoints of its first pair by the stems
/// already written.
pub fn write_stems(len: usize, stems: &[Vec<(usize, usize)>]) -> Result<String> {
    let mut dbn: Vec<char> = vec!['.'; len];

    for stem in stems {
        let Some(&(first_i, first_j)) = stem.first() else {
            continue;
        };
        let inner = &dbn[first_i + 1..first_j];
        let class = BRACKETS
            .iter()
            .position(|&(open, close)| inner.contains(&open) == inner.contains(&close))
            .ok_or(Error::BracketClassesExhausted { position: first_i })?;
        let (open, close) = BRACKETS[class];
        for &(i, j) in stem {
            dbn[i] = open;
            dbn[j] = close;
        }
    }

    Ok(dbn.into_iter().collect())
}

/// Replace every bracket of the given classes with `.`.
pub fn blank_classes(dbn: &str, classes: &[usize]) -> String {
    dbn.chars()
        .map(|c| {
            let hit = classes.iter().any(|&k| {
                let (open, close) = BRACKETS[k];
                c == open || c == close
            });
            if hit { '.' } else { c }
        })
        .collect()
}
