mod error;
pub mod geometry;
mod layout;
pub mod nucleotide;
pub mod parser;
mod secstruct;
mod sequence;
pub mod tree;
mod types;

pub use error::{Error, Result};
pub use geometry::{Placement, Rotation};
pub use layout::{LayoutOptions, RnaLayout};
pub use nucleotide::{can_pair, pair_type, RnaBase};
pub use secstruct::{BasePair, SecStruct};
pub use sequence::Sequence;
pub use tree::{LayoutTree, NodeKind};
pub use types::*;

/// Lay out a raw partner table (-1 = unpaired) over base codes with the
/// default 45/45 spacing.
pub fn compute_rna(pairs: &[isize], bases: &[u8]) -> Result<LayoutResult> {
    let ss = SecStruct::from_partners(pairs)?;
    let seq = Sequence::from_codes(bases);
    let mut result = layout_secstruct(&ss, seq.len(), &LayoutOptions::default())?;
    result.sequence = Some(seq.to_string());
    Ok(result)
}

/// Lay out dot-bracket notation.
///
/// With `pseudoknots`, `{}`, `[]` and `<>` pairs are parsed; they are kept
/// in `pairs` but not drawn. The output covers every structure position.
pub fn layout_structure(
    structure: &str,
    sequence: Option<&str>,
    pseudoknots: bool,
    opts: &LayoutOptions,
) -> Result<LayoutResult> {
    let ss = SecStruct::from_dot_bracket(structure, pseudoknots)?;
    let seq = sequence.map(|s| s.parse::<Sequence>()).transpose()?;
    let mut result = layout_secstruct(&ss, ss.len(), opts)?;
    result.sequence = seq.map(|s| s.to_string());
    Ok(result)
}

fn layout_secstruct(ss: &SecStruct, length: usize, opts: &LayoutOptions) -> Result<LayoutResult> {
    let mut layout = RnaLayout::with_options(opts.clone())?;
    layout.setup_tree(ss)?;
    layout.draw_tree();
    Ok(LayoutResult {
        structure: ss.to_pseudoknot_dot_bracket()?,
        pairs: ss.to_partners(),
        sequence: None,
        coords: layout.coords(length),
        rotation: layout.rotation_signs(length),
    })
}

/// Main entry point: takes dot-bracket notation (pseudoknots allowed),
/// returns a JSON string, empty on invalid input.
pub fn draw_structure(input: &str) -> String {
    layout_structure(input, None, true, &LayoutOptions::default())
        .ok()
        .and_then(|r| serde_json::to_string(&r).ok())
        .unwrap_or_default()
}
