//! The default catalog written the first time a store is opened.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Category, Item, ItemId};

struct SeedItem {
    nome: &'static str,
    quantidade_base: Decimal,
    tipo_quantidade: &'static str,
    preco_por_quantidade: Decimal,
}

const fn ingrediente(
    nome: &'static str,
    quantidade_base: Decimal,
    tipo_quantidade: &'static str,
    preco_por_quantidade: Decimal,
) -> SeedItem {
    SeedItem {
        nome,
        quantidade_base,
        tipo_quantidade,
        preco_por_quantidade,
    }
}

const DEFAULT_ITEMS: [SeedItem; 39] = [
    ingrediente("Abacaxi", dec!(1250), "g", dec!(10.0)),
    ingrediente("Achocolatado", dec!(370), "g", dec!(7.8)),
    ingrediente("Açúcar cristal", dec!(1000), "g", dec!(3.72)),
    ingrediente("Açúcar de confeiteiro", dec!(500), "g", dec!(4.0)),
    ingrediente("Açúcar demerara", dec!(1000), "g", dec!(5.0)),
    ingrediente("Açúcar refinado", dec!(1000), "g", dec!(4.0)),
    ingrediente("Amido de milho", dec!(200), "g", dec!(7.0)),
    ingrediente("Bicarbonato de sódio", dec!(500), "g", dec!(10.55)),
    ingrediente("Biscoito maisena", dec!(400), "g", dec!(9.0)),
    ingrediente("Cacau em pó", dec!(250), "g", dec!(10.0)),
    ingrediente("Canela em pó", dec!(50), "g", dec!(5.0)),
    ingrediente("Cenoura", dec!(1000), "g", dec!(11.0)),
    ingrediente("Chantilly", dec!(1000), "g", dec!(12.0)),
    ingrediente("Chocolate ao leite", dec!(380), "g", dec!(13.0)),
    ingrediente("Chocolate branco", dec!(1000), "g", dec!(14.0)),
    ingrediente("Chocolate em pó", dec!(1000), "g", dec!(26.0)),
    ingrediente("Chocolate meio amargo", dec!(1000), "g", dec!(16.0)),
    ingrediente("Coco ralado", dec!(100), "g", dec!(17.0)),
    ingrediente("Confeitos", dec!(100), "g", dec!(18.0)),
    ingrediente("Cravo em pó", dec!(250), "g", dec!(7.29)),
    ingrediente("Creme de leite", dec!(200), "g", dec!(19.0)),
    ingrediente("Doce de leite", dec!(395), "g", dec!(20.0)),
    ingrediente("Doce de leite Itambé", dec!(395), "g", dec!(9.85)),
    ingrediente("Essência de baunilha", dec!(30), "ml", dec!(21.0)),
    ingrediente("Farinha de trigo", dec!(1000), "g", dec!(4.0)),
    ingrediente("Fermento em pó", dec!(100), "g", dec!(2.5)),
    ingrediente("Granulado", dec!(50), "g", dec!(24.0)),
    ingrediente("Leite", dec!(1000), "ml", dec!(300.0)),
    ingrediente("Leite condensado", dec!(395), "g", dec!(4.5)),
    ingrediente("Leite de coco", dec!(400), "ml", dec!(27.0)),
    ingrediente("Leite em pó", dec!(400), "g", dec!(28.0)),
    ingrediente("Limão", dec!(1000), "g", dec!(29.0)),
    ingrediente("Mel", dec!(1000), "g", dec!(38.0)),
    ingrediente("Manteiga", dec!(200), "g", dec!(7.0)),
    ingrediente("Morango", dec!(1000), "g", dec!(32.0)),
    ingrediente("Nutella", dec!(400), "g", dec!(33.0)),
    ingrediente("Óleo", dec!(900), "ml", dec!(7.0)),
    ingrediente("Ovos (em unidades)", dec!(20), "un", dec!(17.9)),
    ingrediente("Laranja", dec!(1000), "g", dec!(2.0)),
];

/// The default catalog, ids `1..=39` in seed order.
pub fn default_catalog() -> Vec<Item> {
    DEFAULT_ITEMS
        .iter()
        .zip(1..)
        .map(|(seed, id)| Item {
            id,
            nome: seed.nome.to_string(),
            categoria: Category::Ingrediente,
            quantidade_base: seed.quantidade_base,
            tipo_quantidade: seed.tipo_quantidade.to_string(),
            preco_por_quantidade: seed.preco_por_quantidade,
        })
        .collect()
}

/// First id handed out after seeding.
pub fn next_id_after_seed() -> ItemId {
    DEFAULT_ITEMS.len() as ItemId + 1
}
