use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Strongly typed controller identity backed by ULID.
///
/// Every [`ControllerSpec`](crate::controller::ControllerSpec) receives one at
/// construction; the inventory cache compares ids instead of hashing names.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct ControllerId(pub ulid::Ulid);

impl ControllerId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    #[must_use]
    pub fn from_ulid(id: ulid::Ulid) -> Self {
        Self(id)
    }
}

impl Default for ControllerId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ControllerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ControllerId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = ulid::Ulid::from_string(s)?;
        Ok(ControllerId(id))
    }
}

impl Serialize for ControllerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ControllerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<ControllerId>()
            .map_err(|_| serde::de::Error::custom("invalid controller id"))
    }
}

#[cfg(test)]
mod tests {
    use super::ControllerId;

    #[test]
    fn test_controller_ids_are_unique() {
        let a = ControllerId::new();
        let b = ControllerId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_controller_id_parse_round_trip() {
        let id = ControllerId::new();
        let parsed: ControllerId = id.to_string().parse().expect("valid ulid");
        assert_eq!(id, parsed);
        assert!("not-a-ulid".parse::<ControllerId>().is_err());
    }
}
