//! Category selection from CLI flags.

use crate::catalog::Category;
use std::collections::BTreeSet;

/// Raw category flags as given on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryFlags {
    pub official: bool,
    pub unofficial: bool,
    pub private: bool,
    pub all: bool,
}

/// Categories a run acts on, iterated in official, unofficial, private order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    categories: BTreeSet<Category>,
}

impl Selection {
    /// Resolve flags to categories.
    ///
    /// With no official/unofficial/all flag the run covers official and
    /// unofficial. Private is never implied; it only joins a selection that
    /// already covers unofficial plugins, so `--private` on its own (or with
    /// just `--official`) adds nothing.
    pub fn from_flags(flags: CategoryFlags) -> Self {
        let all = flags.all || !(flags.official || flags.unofficial || flags.private);
        let mut categories = BTreeSet::new();
        if flags.official || all {
            categories.insert(Category::Official);
        }
        if flags.unofficial || all {
            categories.insert(Category::Unofficial);
            if flags.private {
                categories.insert(Category::Private);
            }
        }
        Self { categories }
    }

    pub fn from_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
        }
    }

    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
