//! Tag queries: tag names in, sorted note ids out.

use crate::backend::KeyStore;
use crate::domain::{NoteId, Tag};
use crate::engine::error::{NoteResult, ValidationError};
use crate::engine::keys::KeyLayout;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How the sets of several query tags are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStrategy {
    /// Notes carrying every listed tag.
    #[default]
    Intersection,
    /// Notes carrying the first tag and none of the others.
    Difference,
}

impl QueryStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intersection => "intersection",
            Self::Difference => "difference",
        }
    }
}

impl fmt::Display for QueryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone)]
pub struct ParseStrategyError(String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy '{}': expected 'intersection' or 'difference'",
            self.0
        )
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for QueryStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "intersection" | "and" => Ok(Self::Intersection),
            "difference" | "diff" => Ok(Self::Difference),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Resolves tag names against the inverted index.
#[derive(Debug, Clone)]
pub struct QueryResolver {
    layout: KeyLayout,
}

impl QueryResolver {
    pub fn new(layout: KeyLayout) -> Self {
        Self { layout }
    }

    /// Returns the ids matching `names` under `strategy`, ascending.
    ///
    /// Names are normalized like note tags. An empty query matches
    /// nothing. Index members that are not valid ids are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidTag` for a name that is not a valid
    /// tag, before the store is touched.
    pub fn resolve<S, N>(
        &self,
        store: &mut S,
        names: &[N],
        strategy: QueryStrategy,
    ) -> NoteResult<Vec<NoteId>>
    where
        S: KeyStore + ?Sized,
        N: AsRef<str>,
    {
        let keys = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                Tag::new(name)
                    .map(|tag| self.layout.tag_set(tag.as_str()))
                    .map_err(|e| ValidationError::InvalidTag {
                        name: name.to_string(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let members = match strategy {
            QueryStrategy::Intersection => store.sinter(&keys)?,
            QueryStrategy::Difference => store.sdiff(&keys)?,
        };

        let mut ids = BTreeSet::new();
        for member in members {
            match member.parse::<NoteId>() {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(e) => log::warn!("skipping index member: {e}"),
            }
        }
        log::debug!(
            "{} over {:?} matched {} notes",
            strategy,
            keys,
            ids.len()
        );
        Ok(ids.into_iter().collect())
    }
}
