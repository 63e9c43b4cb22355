//! Maven versions and Maven version-range specifications.
//!
//! Versions split on `.` and `-` into numeric and qualifier items. Numbers
//! compare numerically, known qualifiers by their release order
//! (`alpha` < `beta` < `milestone` < `rc` < `snapshot` < release < `sp`),
//! other text case-insensitively below release. Missing trailing items
//! behave like `0` or the release qualifier, so `1.0 == 1.0.0`.
//!
//! Range specs follow Maven's grammar: a comma-separated list of
//! restrictions (`[1.0,2.0)`, `(,1.5]`, `[1.2]`), or a bare version which
//! only *recommends* that version and restricts nothing.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct MavenVersion {
    raw: String,
    items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Number(u64),
    Known(Qualifier),
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Qualifier {
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    Release,
    Sp,
}

impl MavenVersion {
    pub fn parse(version: &str) -> Self {
        let items = version
            .split(['.', '-'])
            .filter(|token| !token.is_empty())
            .map(Item::from_token)
            .collect();
        Self {
            raw: version.to_string(),
            items,
        }
    }
}

impl Item {
    fn from_token(token: &str) -> Self {
        if let Ok(n) = token.parse::<u64>() {
            return Item::Number(n);
        }
        let qualifier = match token.to_ascii_lowercase().as_str() {
            "alpha" | "a" => Qualifier::Alpha,
            "beta" | "b" => Qualifier::Beta,
            "milestone" | "m" => Qualifier::Milestone,
            "rc" | "cr" => Qualifier::Rc,
            "snapshot" => Qualifier::Snapshot,
            "ga" | "final" | "release" => Qualifier::Release,
            "sp" => Qualifier::Sp,
            _ => return Item::Other(token.to_string()),
        };
        Item::Known(qualifier)
    }

    /// Ordering of this item against a missing one.
    fn cmp_padding(&self) -> Ordering {
        match self {
            Item::Number(n) => n.cmp(&0),
            Item::Known(q) => q.cmp(&Qualifier::Release),
            Item::Other(_) => Ordering::Less,
        }
    }

    fn cmp_item(&self, other: &Item) -> Ordering {
        use Item::*;
        match (self, other) {
            (Number(a), Number(b)) => a.cmp(b),
            (Number(_), _) => Ordering::Greater,
            (_, Number(_)) => Ordering::Less,
            (Known(a), Known(b)) => a.cmp(b),
            (Other(a), Other(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Known(q), Other(_)) => {
                if *q >= Qualifier::Release {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (Other(_), Known(_)) => other.cmp_item(self).reverse(),
        }
    }
}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        (0..len)
            .map(|i| match (self.items.get(i), other.items.get(i)) {
                (Some(a), Some(b)) => a.cmp_item(b),
                (Some(a), None) => a.cmp_padding(),
                (None, Some(b)) => b.cmp_padding().reverse(),
                (None, None) => Ordering::Equal,
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for MavenVersion {}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Why a range spec was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("empty version range")]
    Empty,
    #[error("unbalanced brackets in range '{0}'")]
    Unbalanced(String),
    #[error("single version '{0}' must be enclosed in []")]
    SinglePointNotInclusive(String),
    #[error("range '{0}' cannot have identical exclusive bounds")]
    IdenticalExclusiveBounds(String),
    #[error("range '{0}' has its lower bound above its upper bound")]
    Inverted(String),
    #[error("range '{0}' has too many bounds")]
    TooManyBounds(String),
    #[error("ranges overlap in '{0}'")]
    Overlapping(String),
    #[error("'{0}' mixes a bare version with ranges")]
    MixedBareVersion(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub version: MavenVersion,
    pub inclusive: bool,
}

/// One bracketed interval; a missing bound is unbounded on that side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

impl Restriction {
    fn unbounded() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    fn parse(text: &str) -> Result<Self, RangeError> {
        let lower_inclusive = text.starts_with('[');
        let upper_inclusive = text.ends_with(']');
        let inner = text[1..text.len() - 1].trim();

        let Some((low, high)) = inner.split_once(',') else {
            if inner.is_empty() {
                return Err(RangeError::Empty);
            }
            if !lower_inclusive || !upper_inclusive {
                return Err(RangeError::SinglePointNotInclusive(text.to_string()));
            }
            let version = MavenVersion::parse(inner);
            return Ok(Self {
                lower: Some(Bound {
                    version: version.clone(),
                    inclusive: true,
                }),
                upper: Some(Bound {
                    version,
                    inclusive: true,
                }),
            });
        };
        if high.contains(',') {
            return Err(RangeError::TooManyBounds(text.to_string()));
        }

        let bound = |s: &str, inclusive| {
            let s = s.trim();
            (!s.is_empty()).then(|| Bound {
                version: MavenVersion::parse(s),
                inclusive,
            })
        };
        let lower = bound(low, lower_inclusive);
        let upper = bound(high, upper_inclusive);

        if let (Some(l), Some(u)) = (&lower, &upper) {
            match u.version.cmp(&l.version) {
                Ordering::Less => return Err(RangeError::Inverted(text.to_string())),
                Ordering::Equal if !(l.inclusive && u.inclusive) => {
                    return Err(RangeError::IdenticalExclusiveBounds(text.to_string()))
                }
                _ => {}
            }
        }
        Ok(Self { lower, upper })
    }

    pub fn contains(&self, version: &MavenVersion) -> bool {
        let above_lower = self.lower.as_ref().map_or(true, |b| match version.cmp(&b.version) {
            Ordering::Greater => true,
            Ordering::Equal => b.inclusive,
            Ordering::Less => false,
        });
        let below_upper = self.upper.as_ref().map_or(true, |b| match version.cmp(&b.version) {
            Ordering::Less => true,
            Ordering::Equal => b.inclusive,
            Ordering::Greater => false,
        });
        above_lower && below_upper
    }

    fn is_single_point(&self) -> bool {
        matches!((&self.lower, &self.upper), (Some(l), Some(u))
            if l.inclusive && u.inclusive && l.version == u.version)
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_point() {
            if let Some(l) = &self.lower {
                return write!(f, "[{}]", l.version);
            }
        }
        let open = match &self.lower {
            Some(b) if !b.inclusive => '(',
            None => '(',
            Some(_) => '[',
        };
        let close = match &self.upper {
            Some(b) if b.inclusive => ']',
            _ => ')',
        };
        write!(f, "{open}")?;
        if let Some(l) = &self.lower {
            write!(f, "{}", l.version)?;
        }
        f.write_str(",")?;
        if let Some(u) = &self.upper {
            write!(f, "{}", u.version)?;
        }
        write!(f, "{close}")
    }
}

/// A parsed Maven version-range specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    restrictions: Vec<Restriction>,
    recommended: Option<MavenVersion>,
}

impl VersionRange {
    pub fn parse(spec: &str) -> Result<Self, RangeError> {
        let mut rest = spec.trim();
        if rest.is_empty() {
            return Err(RangeError::Empty);
        }

        let mut restrictions: Vec<Restriction> = Vec::new();
        while rest.starts_with('[') || rest.starts_with('(') {
            let end = rest
                .find([']', ')'])
                .ok_or_else(|| RangeError::Unbalanced(spec.to_string()))?;
            let restriction = Restriction::parse(&rest[..=end])?;

            if let Some(previous) = restrictions.last() {
                let overlaps = match (&previous.upper, &restriction.lower) {
                    (Some(prev_upper), Some(lower)) => lower.version < prev_upper.version,
                    _ => true,
                };
                if overlaps {
                    return Err(RangeError::Overlapping(spec.to_string()));
                }
            }
            restrictions.push(restriction);

            rest = rest[end + 1..].trim_start();
            if let Some(stripped) = rest.strip_prefix(',') {
                rest = stripped.trim_start();
            }
        }

        if rest.is_empty() {
            return Ok(Self {
                restrictions,
                recommended: None,
            });
        }
        if !restrictions.is_empty() {
            return Err(RangeError::MixedBareVersion(spec.to_string()));
        }
        if rest.contains([']', ')']) {
            return Err(RangeError::Unbalanced(spec.to_string()));
        }
        Ok(Self {
            restrictions: vec![Restriction::unbounded()],
            recommended: Some(MavenVersion::parse(rest)),
        })
    }

    /// `[version,)`: the given version or anything newer.
    pub fn at_least(version: &str) -> Self {
        Self {
            restrictions: vec![Restriction {
                lower: Some(Bound {
                    version: MavenVersion::parse(version),
                    inclusive: true,
                }),
                upper: None,
            }],
            recommended: None,
        }
    }

    /// True when the range constrains versions through bounds rather than a
    /// recommendation.
    pub fn has_restrictions(&self) -> bool {
        !self.restrictions.is_empty() && self.recommended.is_none()
    }

    pub fn recommended(&self) -> Option<&MavenVersion> {
        self.recommended.as_ref()
    }

    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    pub fn contains(&self, version: &MavenVersion) -> bool {
        if self.recommended.is_some() {
            return true;
        }
        self.restrictions.iter().any(|r| r.contains(version))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(recommended) = &self.recommended {
            return write!(f, "{recommended}");
        }
        for (i, restriction) in self.restrictions.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{restriction}")?;
        }
        Ok(())
    }
}
