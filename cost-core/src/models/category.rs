use std::fmt;

use serde::{Deserialize, Serialize};

/// Cost category of a catalog item.
///
/// Serialized with the lowercase identifiers used on the wire and on disk
/// (`ingrediente`, `mao_de_obra`, `outros_custos`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ingrediente,
    MaoDeObra,
    OutrosCustos,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Self::Ingrediente, Self::MaoDeObra, Self::OutrosCustos];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingrediente => "ingrediente",
            Self::MaoDeObra => "mao_de_obra",
            Self::OutrosCustos => "outros_custos",
        }
    }

    /// Exact, case-sensitive match against the wire identifiers.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ingrediente" => Some(Self::Ingrediente),
            "mao_de_obra" => Some(Self::MaoDeObra),
            "outros_custos" => Some(Self::OutrosCustos),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
