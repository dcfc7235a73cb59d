use core::fmt;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }
    };
}

opaque_id!(BoardId);
opaque_id!(ListId);
opaque_id!(CardId);
opaque_id!(MemberId);
opaque_id!(
    /// Identifier of an account in the external user store.
    UserId
);

const ID_BYTES: usize = 12;

/// Produces 24-character lowercase hex identifiers.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: SmallRng,
}

impl IdGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn next_hex(&mut self) -> String {
        let mut bytes = [0u8; ID_BYTES];
        self.rng.fill_bytes(&mut bytes);
        bytes.iter().map(|byte| format!("{byte:02x}")).collect()
    }

    pub fn board(&mut self) -> BoardId {
        BoardId(self.next_hex())
    }

    pub fn list(&mut self) -> ListId {
        ListId(self.next_hex())
    }

    pub fn card(&mut self) -> CardId {
        CardId(self.next_hex())
    }

    pub fn member(&mut self) -> MemberId {
        MemberId(self.next_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::{CardId, IdGenerator};

    #[test]
    fn generated_ids_are_hex_and_24_chars() {
        let mut ids = IdGenerator::from_seed(7);
        let id = ids.next_hex();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = IdGenerator::from_seed(42);
        let mut b = IdGenerator::from_seed(42);
        assert_eq!(a.card(), b.card());
        assert_ne!(a.card(), a.card());
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = CardId::new("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
        assert_eq!(id.to_string(), "abc123");
    }
}
