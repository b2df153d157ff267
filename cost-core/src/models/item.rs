use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

pub type ItemId = i64;

/// A priced catalog entry as stored by an [`ItemRepository`](crate::ItemRepository).
///
/// `preco_por_quantidade` is the price paid for `quantidade_base` units of
/// `tipo_quantidade` (e.g. R$ 4,00 for 1000 g).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub nome: String,
    pub categoria: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantidade_base: Decimal,
    pub tipo_quantidade: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub preco_por_quantidade: Decimal,
}

impl Item {
    pub fn from_new(
        id: ItemId,
        item: NewItem,
    ) -> Self {
        Self {
            id,
            nome: item.nome,
            categoria: item.categoria,
            quantidade_base: item.quantidade_base,
            tipo_quantidade: item.tipo_quantidade,
            preco_por_quantidade: item.preco_por_quantidade,
        }
    }

    /// Price of a single unit: `preco_por_quantidade / quantidade_base`.
    ///
    /// `None` when the quotient does not fit in a `Decimal`, or when the base
    /// quantity is zero.
    pub fn unit_cost(&self) -> Option<Decimal> {
        self.preco_por_quantidade.checked_div(self.quantidade_base)
    }
}

/// A validated item that has not been assigned an id yet.
///
/// Only [`ItemCandidate::validate`](super::ItemCandidate::validate) builds
/// one, so every `NewItem` satisfies the catalog's field constraints and its
/// text fields are already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    nome: String,
    categoria: Category,
    quantidade_base: Decimal,
    tipo_quantidade: String,
    preco_por_quantidade: Decimal,
}

impl NewItem {
    pub(super) fn new(
        nome: String,
        categoria: Category,
        quantidade_base: Decimal,
        tipo_quantidade: String,
        preco_por_quantidade: Decimal,
    ) -> Self {
        Self {
            nome,
            categoria,
            quantidade_base,
            tipo_quantidade,
            preco_por_quantidade,
        }
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn categoria(&self) -> Category {
        self.categoria
    }

    pub fn quantidade_base(&self) -> Decimal {
        self.quantidade_base
    }

    pub fn tipo_quantidade(&self) -> &str {
        &self.tipo_quantidade
    }

    pub fn preco_por_quantidade(&self) -> Decimal {
        self.preco_por_quantidade
    }
}
