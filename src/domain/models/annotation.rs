use serde::{Deserialize, Serialize};
use std::fmt;

/// How a taxon name is turned into an encyclopedia page title.
///
/// Strategies are tried in `AnnotationQuery::ORDER`, stopping at the
/// first success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationQuery {
    /// Whole name with spaces replaced by underscores (`Tyrannosaurus_rex`)
    FullName,
    /// Genus only (`Tyrannosaurus`)
    FirstWord,
}

impl AnnotationQuery {
    pub const ORDER: [Self; 2] = [Self::FullName, Self::FirstWord];

    /// Page title for `taxon` under this strategy, or `None` if the name
    /// has nothing to query with.
    pub fn title_for(self, taxon: &str) -> Option<String> {
        let taxon = taxon.trim();
        let title = match self {
            Self::FullName => taxon.split_whitespace().collect::<Vec<_>>().join("_"),
            Self::FirstWord => taxon.split_whitespace().next().unwrap_or_default().to_string(),
        };
        (!title.is_empty()).then_some(title)
    }
}

impl fmt::Display for AnnotationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullName => f.write_str("full_name"),
            Self::FirstWord => f.write_str("first_word"),
        }
    }
}

/// A relative link inside an annotation, resolved to its absolute page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationLink {
    /// Original href, e.g. `./Late_Cretaceous`
    pub relative: String,
    /// Absolute page opened in a new browsing context
    pub absolute: String,
}

/// Rendered annotation for one taxon, ready to put in a popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationDocument {
    /// Taxon the annotation was requested for
    pub taxon: String,
    /// Page title that answered
    pub title: String,
    /// Strategy that produced `title`
    pub query: AnnotationQuery,
    /// Body fragment with relative anchors rewritten
    pub html: String,
    pub links: Vec<AnnotationLink>,
}
