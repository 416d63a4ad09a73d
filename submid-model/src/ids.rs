use std::str::FromStr;

use crate::error::ModelError;

/// Strongly typed ID for promotions.
///
/// The site keys promos by an autoincrement integer. Serialized as a bare
/// number; deserialization also accepts the numeric string form that route
/// parameters and form fields carry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct PromoId(pub i64);

impl PromoId {
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for PromoId {
    fn from(value: i64) -> Self {
        PromoId(value)
    }
}

impl FromStr for PromoId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(PromoId)
            .map_err(|_| ModelError::InvalidId(s.to_string()))
    }
}

impl std::fmt::Display for PromoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PromoId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PromoIdVisitor;

        impl serde::de::Visitor<'_> for PromoIdVisitor {
            type Value = PromoId;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an integer promo id or its decimal string")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<PromoId, E> {
                Ok(PromoId(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<PromoId, E> {
                i64::try_from(v).map(PromoId).map_err(|_| {
                    E::invalid_value(serde::de::Unexpected::Unsigned(v), &self)
                })
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<PromoId, E> {
                v.parse()
                    .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(PromoIdVisitor)
    }
}
