use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{PayloadError, Result};
use crate::platform::ALL;

/// Targeting dimension of an audience
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AudienceKind {
    /// Devices carrying any of the tags
    Tag,
    /// Devices carrying all of the tags
    TagAnd,
    /// Devices carrying none of the tags
    TagNot,
    Alias,
    /// Registration ids reported by the client application
    RegistrationId,
    Segment,
    Abtest,
}

impl AudienceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudienceKind::Tag => "tag",
            AudienceKind::TagAnd => "tag_and",
            AudienceKind::TagNot => "tag_not",
            AudienceKind::Alias => "alias",
            AudienceKind::RegistrationId => "registration_id",
            AudienceKind::Segment => "segment",
            AudienceKind::Abtest => "abtest",
        }
    }
}

impl FromStr for AudienceKind {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tag" => Ok(AudienceKind::Tag),
            "tag_and" => Ok(AudienceKind::TagAnd),
            "tag_not" => Ok(AudienceKind::TagNot),
            "alias" => Ok(AudienceKind::Alias),
            "registration_id" => Ok(AudienceKind::RegistrationId),
            "segment" => Ok(AudienceKind::Segment),
            "abtest" => Ok(AudienceKind::Abtest),
            other => Err(PayloadError::schema(format!("unknown audience criterion: {other}"))),
        }
    }
}

/// Recipients of a push
///
/// Encodes as `"all"` or as an object mapping each criterion to its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    All,
    Criteria(BTreeMap<AudienceKind, BTreeSet<String>>),
}

impl Audience {
    pub fn all() -> Self {
        Audience::All
    }

    /// Audience selected by a single criterion
    pub fn target<I, S>(kind: AudienceKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Audience::Criteria(BTreeMap::new()).and(kind, values)
    }

    pub fn tag<I: IntoIterator<Item = S>, S: Into<String>>(values: I) -> Self {
        Self::target(AudienceKind::Tag, values)
    }

    pub fn tag_and<I: IntoIterator<Item = S>, S: Into<String>>(values: I) -> Self {
        Self::target(AudienceKind::TagAnd, values)
    }

    pub fn tag_not<I: IntoIterator<Item = S>, S: Into<String>>(values: I) -> Self {
        Self::target(AudienceKind::TagNot, values)
    }

    pub fn alias<I: IntoIterator<Item = S>, S: Into<String>>(values: I) -> Self {
        Self::target(AudienceKind::Alias, values)
    }

    pub fn registration_id<I: IntoIterator<Item = S>, S: Into<String>>(values: I) -> Self {
        Self::target(AudienceKind::RegistrationId, values)
    }

    pub fn segment<I: IntoIterator<Item = S>, S: Into<String>>(values: I) -> Self {
        Self::target(AudienceKind::Segment, values)
    }

    pub fn abtest<I: IntoIterator<Item = S>, S: Into<String>>(values: I) -> Self {
        Self::target(AudienceKind::Abtest, values)
    }

    /// Add values under a criterion. Adding to `All` leaves it unchanged.
    pub fn and<I, S>(self, kind: AudienceKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self {
            Audience::All => Audience::All,
            Audience::Criteria(mut criteria) => {
                criteria
                    .entry(kind)
                    .or_default()
                    .extend(values.into_iter().map(Into::into));
                Audience::Criteria(criteria)
            }
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Audience::All)
    }

    pub fn values(&self, kind: AudienceKind) -> Option<&BTreeSet<String>> {
        match self {
            Audience::All => None,
            Audience::Criteria(criteria) => criteria.get(&kind),
        }
    }

    pub fn check(&self) -> Result<()> {
        let Audience::Criteria(criteria) = self else {
            return Ok(());
        };
        if criteria.is_empty() {
            return Err(PayloadError::schema("audience has no criteria"));
        }
        if let Some((kind, _)) = criteria.iter().find(|(_, values)| values.is_empty()) {
            return Err(PayloadError::schema(format!(
                "audience criterion {} has no values",
                kind.as_str()
            )));
        }
        Ok(())
    }

    /// Decode the wire form, rejecting unknown criteria and empty collections
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) if s.eq_ignore_ascii_case(ALL) => Ok(Audience::All),
            Value::Object(map) => {
                let mut criteria = BTreeMap::new();
                for (key, values) in map {
                    let kind = key.parse::<AudienceKind>()?;
                    let Value::Array(items) = values else {
                        return Err(PayloadError::schema(format!(
                            "audience criterion {key} must be an array"
                        )));
                    };
                    let set = items
                        .iter()
                        .map(|item| match item {
                            Value::String(v) => Ok(v.clone()),
                            other => Err(PayloadError::schema(format!(
                                "audience value must be a string, got {other}"
                            ))),
                        })
                        .collect::<Result<BTreeSet<_>>>()?;
                    criteria.insert(kind, set);
                }
                let audience = Audience::Criteria(criteria);
                audience.check()?;
                Ok(audience)
            }
            other => Err(PayloadError::schema(format!(
                "audience must be \"all\" or an object, got {other}"
            ))),
        }
    }
}

impl Serialize for Audience {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Audience::All => ALL.serialize(serializer),
            Audience::Criteria(criteria) => criteria.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Audience {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Audience::from_value(&value).map_err(serde::de::Error::custom)
    }
}
