use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{self, Placement, Rotation};
use crate::secstruct::SecStruct;
use crate::tree::LayoutTree;
use crate::types::Coords;

/// Unstructured strands up to this length are drawn as a straight line.
const LINE_FALLBACK_MAX: usize = 4;

/// Spacing constants and orientation for one layout pass.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LayoutOptions {
    /// Distance between consecutive unpaired bases or stacked pairs (default: 45.0)
    pub primary_space: f64,
    /// Distance between the two bases of a pair (default: 45.0)
    pub pair_space: f64,
    /// Backbone direction at the root, inherited by every node (default: clockwise)
    pub rotation: Rotation,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            primary_space: 45.0,
            pair_space: 45.0,
            rotation: Rotation::Clockwise,
        }
    }
}

impl LayoutOptions {
    /// Both spacings must be positive and finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("primary_space", self.primary_space),
            ("pair_space", self.pair_space),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidSpacing { name, value });
            }
        }
        Ok(())
    }
}

/// Turns a pairing map into base coordinates.
///
/// `setup_tree` builds the skeleton, `draw_tree` places it and `coords`
/// reads the positions back. Each `setup_tree` discards the previous tree.
#[derive(Debug, Clone, Default)]
pub struct RnaLayout {
    options: LayoutOptions,
    tree: Option<LayoutTree>,
    placements: Vec<Placement>,
}

impl RnaLayout {
    /// Clockwise layout with the given spacings; both must be positive.
    pub fn new(primary_space: f64, pair_space: f64) -> Result<Self> {
        Self::with_options(LayoutOptions {
            primary_space,
            pair_space,
            ..LayoutOptions::default()
        })
    }

    pub fn with_options(options: LayoutOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            ..Self::default()
        })
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Build the layout tree for `pairs`.
    ///
    /// No tree is built when nothing is paired; `coords` then falls back to
    /// a line or a circle. Pseudoknotted stems are dropped before building.
    pub fn setup_tree(&mut self, pairs: &SecStruct) -> Result<()> {
        self.tree = None;
        self.placements.clear();

        if !pairs.nonempty() {
            log::debug!(
                "no pairs in {} bases, using {} fallback",
                pairs.len(),
                if pairs.len() <= LINE_FALLBACK_MAX { "line" } else { "circle" }
            );
            return Ok(());
        }

        let nested = pairs.filter_for_pseudoknots()?;
        let dropped = pairs.num_pairs() - nested.num_pairs();
        if dropped > 0 {
            log::debug!("dropped {dropped} pseudoknotted pairs before layout");
        }

        self.tree = LayoutTree::build(nested.pairs())?;
        if let Some(tree) = &self.tree {
            self.placements = vec![Placement::default(); tree.len()];
        }
        Ok(())
    }

    /// Assign positions to every node of the current tree.
    pub fn draw_tree(&mut self) {
        if let Some(tree) = &self.tree {
            self.placements = geometry::place(tree, &self.options);
        }
    }

    /// Coordinates of `length` bases plus their bounding box.
    pub fn coords(&self, length: usize) -> Coords {
        match &self.tree {
            Some(tree) => geometry::extract(tree, &self.placements, &self.options, length),
            None if length <= LINE_FALLBACK_MAX => geometry::line(length, &self.options),
            None => geometry::circle(length, &self.options),
        }
    }

    /// Rotation sign of `length` bases; all +1 without a tree.
    pub fn rotation_signs(&self, length: usize) -> Vec<i8> {
        match &self.tree {
            Some(tree) => geometry::rotation_signs(tree, &self.placements, length),
            None => vec![1; length],
        }
    }

    pub fn tree(&self) -> Option<&LayoutTree> {
        self.tree.as_ref()
    }

    /// Node placements, indexed like `tree().nodes()`.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }
}
