//! Unvalidated item payloads and the rules that turn them into [`NewItem`]s.
//!
//! Candidates are read leniently: numbers may arrive as JSON numbers or as
//! numeric strings, and a field of the wrong type is treated as missing. A
//! bad payload therefore always surfaces as a [`ValidationError`] naming the
//! first rule it breaks, never as a deserialization failure.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::{Category, Item, NewItem};

/// Rule violations, declared in the order they are checked.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("O nome do item é obrigatório.")]
    NameRequired,

    #[error("Categoria inválida.")]
    InvalidCategory,

    #[error("Quantidade base deve ser maior que zero.")]
    BaseQuantityNotPositive,

    #[error("Tipo de quantidade é obrigatório.")]
    QuantityTypeRequired,

    #[error("Preço por quantidade não pode ser negativo.")]
    NegativePrice,
}

/// Item fields as submitted by a client, before any rule is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemCandidate {
    #[serde(default, deserialize_with = "loose_text")]
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub categoria: Option<String>,
    #[serde(default, deserialize_with = "loose_decimal")]
    pub quantidade_base: Option<Decimal>,
    #[serde(default, deserialize_with = "loose_text")]
    pub tipo_quantidade: Option<String>,
    #[serde(default, deserialize_with = "loose_decimal")]
    pub preco_por_quantidade: Option<Decimal>,
}

impl ItemCandidate {
    /// Check every rule in priority order and build the trimmed record.
    ///
    /// # Errors
    ///
    /// The first violated rule, in this order: name, category, base
    /// quantity, quantity type, price.
    pub fn validate(self) -> Result<NewItem, ValidationError> {
        let nome = non_blank(self.nome).ok_or(ValidationError::NameRequired)?;

        let categoria = self
            .categoria
            .as_deref()
            .and_then(Category::parse)
            .ok_or(ValidationError::InvalidCategory)?;

        let quantidade_base = self
            .quantidade_base
            .filter(|q| *q > Decimal::ZERO)
            .ok_or(ValidationError::BaseQuantityNotPositive)?;

        let tipo_quantidade =
            non_blank(self.tipo_quantidade).ok_or(ValidationError::QuantityTypeRequired)?;

        let preco_por_quantidade = self
            .preco_por_quantidade
            .filter(|p| *p >= Decimal::ZERO)
            .ok_or(ValidationError::NegativePrice)?;

        Ok(NewItem::new(
            nome,
            categoria,
            quantidade_base,
            tipo_quantidade,
            preco_por_quantidade,
        ))
    }
}

impl From<&Item> for ItemCandidate {
    fn from(item: &Item) -> Self {
        Self {
            nome: Some(item.nome.clone()),
            categoria: Some(item.categoria.as_str().to_string()),
            quantidade_base: Some(item.quantidade_base),
            tipo_quantidade: Some(item.tipo_quantidade.clone()),
            preco_por_quantidade: Some(item.preco_por_quantidade),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse a user-typed number.
///
/// Accepts `.` as the decimal separator, or `,` when the text has no `.`
/// (`"3,72"`), so values typed the Brazilian way are understood. Returns
/// `None` for blank or non-numeric text.
pub fn parse_decimal_text(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replace(',', ".")
    };
    Decimal::from_str(&normalized).ok()
}

fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    // Display for f64 is the shortest round-trip form and never uses an
    // exponent, so 17.9 becomes exactly 17.9.
    Decimal::from_str(&value.to_string()).ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => Some(s),
        Loose::Number(_) | Loose::Other(_) => None,
    })
}

fn loose_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Number(n) => decimal_from_f64(n),
        Loose::Text(s) => parse_decimal_text(&s),
        Loose::Other(_) => None,
    })
}
