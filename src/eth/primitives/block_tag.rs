use std::fmt::Display;

use crate::eth::primitives::BlockNumber;

/// Block parameter of state queries such as `eth_getProof` and `eth_getTransactionCount`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockTag {
    /// Symbolic reference to the chain head.
    #[default]
    Latest,

    /// Concrete block, sent as a `0x`-prefixed quantity.
    Number(BlockNumber),
}

impl Display for BlockTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Number(number) => write!(f, "{}", number.to_hex()),
        }
    }
}

impl serde::Serialize for BlockTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<BlockNumber> for BlockTag {
    fn from(value: BlockNumber) -> Self {
        Self::Number(value)
    }
}
