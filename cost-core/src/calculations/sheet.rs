//! Session-scoped cost sheet.
//!
//! Each [`CalculationRow`] prices a quantity of one catalog item:
//!
//! | Value           | Formula                                          |
//! |-----------------|--------------------------------------------------|
//! | `custoUnitario` | `preco_por_quantidade / quantidade_base`         |
//! | `subtotal`      | `custoUnitario × quantidadeUsada`                |
//!
//! Rows keep a copy of the item as it was when the row was added, so later
//! catalog edits never change a row that already exists. Deleting the item
//! from the catalog is different: [`CalculationSheet::remove_item`] drops
//! every row that references it.
//!
//! Totals are recomputed from scratch on every call to
//! [`CalculationSheet::totals`]. A row whose subtotal, or whose effect on
//! the totals, would not fit in a `Decimal` is refused by
//! [`CalculationSheet::add_row`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use cost_core::calculations::CalculationSheet;
//! use cost_core::{Category, Item};
//!
//! let farinha = Item {
//!     id: 25,
//!     nome: "Farinha de trigo".to_string(),
//!     categoria: Category::Ingrediente,
//!     quantidade_base: dec!(1000),
//!     tipo_quantidade: "g".to_string(),
//!     preco_por_quantidade: dec!(4.0),
//! };
//!
//! let mut sheet = CalculationSheet::with_catalog(vec![farinha]);
//! let row = sheet.add_row(25, dec!(250), None).unwrap();
//!
//! assert_eq!(row.custo_unitario(), dec!(0.004));
//! assert_eq!(row.subtotal(), dec!(1.0));
//! assert_eq!(sheet.totals().total_geral, dec!(1.0));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{Category, Item, ItemId};

/// Reasons a row cannot be added.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SheetError {
    #[error("Escolha um item válido e quantidade acima de zero.")]
    ItemNotFound(ItemId),

    #[error("Escolha um item válido e quantidade acima de zero.")]
    QuantityNotPositive(Decimal),

    #[error("Valor calculado excede o limite suportado.")]
    AmountTooLarge,
}

/// One priced line of the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRow {
    item: Item,
    #[serde(with = "rust_decimal::serde::float")]
    quantidade_usada: Decimal,
    observacao: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    custo_unitario: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    subtotal: Decimal,
}

impl CalculationRow {
    fn new(
        item: Item,
        quantidade_usada: Decimal,
        observacao: Option<String>,
    ) -> Result<Self, SheetError> {
        let custo_unitario = item.unit_cost().ok_or(SheetError::AmountTooLarge)?;
        let subtotal = custo_unitario
            .checked_mul(quantidade_usada)
            .ok_or(SheetError::AmountTooLarge)?;
        Ok(Self {
            item,
            quantidade_usada,
            observacao,
            custo_unitario,
            subtotal,
        })
    }

    /// Snapshot of the item taken when the row was added.
    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn quantidade_usada(&self) -> Decimal {
        self.quantidade_usada
    }

    pub fn observacao(&self) -> Option<&str> {
        self.observacao.as_deref()
    }

    pub fn custo_unitario(&self) -> Decimal {
        self.custo_unitario
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }
}

/// Sum of row subtotals per category, plus the grand total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub ingredientes: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub mao_de_obra: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub outros_custos: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_geral: Decimal,
}

impl SheetTotals {
    fn category_mut(
        &mut self,
        categoria: Category,
    ) -> &mut Decimal {
        match categoria {
            Category::Ingrediente => &mut self.ingredientes,
            Category::MaoDeObra => &mut self.mao_de_obra,
            Category::OutrosCustos => &mut self.outros_custos,
        }
    }

    /// Add one row, or `None` if any sum would overflow.
    fn checked_with(
        mut self,
        row: &CalculationRow,
    ) -> Option<Self> {
        let slot = self.category_mut(row.item.categoria);
        *slot = slot.checked_add(row.subtotal)?;
        self.total_geral = self.total_geral.checked_add(row.subtotal)?;
        Some(self)
    }
}

/// Ordered rows plus the catalog snapshot they are priced from.
#[derive(Debug, Clone, Default)]
pub struct CalculationSheet {
    catalog: Vec<Item>,
    rows: Vec<CalculationRow>,
}

impl CalculationSheet {
    pub fn with_catalog(catalog: Vec<Item>) -> Self {
        Self {
            catalog,
            rows: Vec::new(),
        }
    }

    /// Replace the catalog snapshot used by [`add_row`](Self::add_row).
    ///
    /// Existing rows are left untouched.
    pub fn load_catalog(
        &mut self,
        catalog: Vec<Item>,
    ) {
        self.catalog = catalog;
    }

    /// Price `quantidade_usada` of the item and append the row.
    ///
    /// A blank `observacao` is stored as `None`.
    ///
    /// # Errors
    ///
    /// * [`SheetError::ItemNotFound`] if `item_id` is not in the catalog snapshot.
    /// * [`SheetError::QuantityNotPositive`] if `quantidade_usada <= 0`.
    /// * [`SheetError::AmountTooLarge`] if the subtotal or the new totals
    ///   overflow.
    ///
    /// The sheet is unchanged on error.
    pub fn add_row(
        &mut self,
        item_id: ItemId,
        quantidade_usada: Decimal,
        observacao: Option<String>,
    ) -> Result<&CalculationRow, SheetError> {
        let item = self
            .catalog
            .iter()
            .find(|item| item.id == item_id)
            .ok_or(SheetError::ItemNotFound(item_id))?;

        if quantidade_usada <= Decimal::ZERO {
            return Err(SheetError::QuantityNotPositive(quantidade_usada));
        }

        let observacao = observacao
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let row = CalculationRow::new(item.clone(), quantidade_usada, observacao)?;
        self.checked_totals()
            .and_then(|totals| totals.checked_with(&row))
            .ok_or(SheetError::AmountTooLarge)?;
        debug!(item_id, subtotal = %row.subtotal, "row added");
        self.rows.push(row);
        Ok(&self.rows[self.rows.len() - 1])
    }

    /// Remove the row at `index`. Out-of-range indexes are ignored.
    pub fn remove_row(
        &mut self,
        index: usize,
    ) -> Option<CalculationRow> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    /// Drop every row priced from `item_id`, keeping the others in order.
    ///
    /// Also forgets the item from the catalog snapshot. Returns the number of
    /// rows removed.
    pub fn remove_item(
        &mut self,
        item_id: ItemId,
    ) -> usize {
        self.catalog.retain(|item| item.id != item_id);

        let before = self.rows.len();
        self.rows.retain(|row| row.item.id != item_id);
        let removed = before - self.rows.len();
        if removed > 0 {
            debug!(item_id, removed, "rows removed with deleted item");
        }
        removed
    }

    pub fn rows(&self) -> &[CalculationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Per-category subtotals and their sum.
    ///
    /// Subtotals are never negative and `add_row` only accepts rows whose
    /// totals fit, so removing rows keeps every sum in range.
    pub fn totals(&self) -> SheetTotals {
        let mut totals = SheetTotals::default();
        for row in &self.rows {
            let slot = totals.category_mut(row.item.categoria);
            *slot = slot.saturating_add(row.subtotal);
            totals.total_geral = totals.total_geral.saturating_add(row.subtotal);
        }
        totals
    }

    fn checked_totals(&self) -> Option<SheetTotals> {
        self.rows
            .iter()
            .try_fold(SheetTotals::default(), |totals, row| totals.checked_with(row))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn item(
        id: ItemId,
        nome: &str,
        categoria: Category,
        quantidade_base: Decimal,
        preco_por_quantidade: Decimal,
    ) -> Item {
        Item {
            id,
            nome: nome.to_string(),
            categoria,
            quantidade_base,
            tipo_quantidade: "un".to_string(),
            preco_por_quantidade,
        }
    }

    fn test_catalog() -> Vec<Item> {
        vec![
            item(1, "Farinha de trigo", Category::Ingrediente, dec!(1000), dec!(4.0)),
            item(2, "Hora de confeiteira", Category::MaoDeObra, dec!(1), dec!(2.0)),
            item(3, "Embalagem", Category::OutrosCustos, dec!(10), dec!(30.0)),
            item(4, "Ovos", Category::Ingrediente, dec!(20), dec!(17.9)),
        ]
    }

    fn test_sheet() -> CalculationSheet {
        CalculationSheet::with_catalog(test_catalog())
    }

    // =========================================================================
    // add_row tests
    // =========================================================================

    #[test]
    fn add_row_computes_unit_cost_and_subtotal() {
        let mut sheet = test_sheet();

        let row = sheet.add_row(1, dec!(250), None).unwrap();

        assert_eq!(row.custo_unitario(), dec!(0.004));
        assert_eq!(row.subtotal(), dec!(1.0));
        assert_eq!(row.quantidade_usada(), dec!(250));
    }

    #[test]
    fn add_row_appends_in_insertion_order() {
        let mut sheet = test_sheet();

        sheet.add_row(3, dec!(1), None).unwrap();
        sheet.add_row(1, dec!(500), None).unwrap();
        sheet.add_row(2, dec!(3), None).unwrap();

        let ids: Vec<_> = sheet.rows().iter().map(|r| r.item().id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn add_row_keeps_trimmed_note() {
        let mut sheet = test_sheet();

        let row = sheet
            .add_row(4, dec!(3), Some("  para a massa ".to_string()))
            .unwrap();

        assert_eq!(row.observacao(), Some("para a massa"));
    }

    #[test]
    fn add_row_drops_blank_note() {
        let mut sheet = test_sheet();

        let row = sheet.add_row(4, dec!(3), Some("   ".to_string())).unwrap();

        assert_eq!(row.observacao(), None);
    }

    #[test]
    fn add_row_rejects_zero_quantity() {
        let mut sheet = test_sheet();

        let result = sheet.add_row(1, dec!(0), None);

        assert_eq!(result, Err(SheetError::QuantityNotPositive(dec!(0))));
        assert!(sheet.is_empty());
    }

    #[test]
    fn add_row_rejects_negative_quantity() {
        let mut sheet = test_sheet();

        let result = sheet.add_row(1, dec!(-2), None);

        assert_eq!(result, Err(SheetError::QuantityNotPositive(dec!(-2))));
        assert!(sheet.is_empty());
    }

    #[test]
    fn add_row_rejects_unknown_item() {
        let mut sheet = test_sheet();
        sheet.add_row(1, dec!(100), None).unwrap();

        let result = sheet.add_row(99, dec!(1), None);

        assert_eq!(result, Err(SheetError::ItemNotFound(99)));
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn add_row_snapshots_the_item() {
        let mut sheet = test_sheet();
        sheet.add_row(1, dec!(250), None).unwrap();

        let mut edited = test_catalog();
        edited[0].preco_por_quantidade = dec!(8.0);
        sheet.load_catalog(edited);

        assert_eq!(sheet.rows()[0].item().preco_por_quantidade, dec!(4.0));
        assert_eq!(sheet.rows()[0].subtotal(), dec!(1.0));

        let repriced = sheet.add_row(1, dec!(250), None).unwrap();
        assert_eq!(repriced.subtotal(), dec!(2.0));
    }

    // =========================================================================
    // remove_row tests
    // =========================================================================

    #[test]
    fn remove_row_removes_by_position() {
        let mut sheet = test_sheet();
        sheet.add_row(1, dec!(1), None).unwrap();
        sheet.add_row(2, dec!(1), None).unwrap();
        sheet.add_row(3, dec!(1), None).unwrap();

        let removed = sheet.remove_row(1).unwrap();

        assert_eq!(removed.item().id, 2);
        let ids: Vec<_> = sheet.rows().iter().map(|r| r.item().id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn remove_row_ignores_out_of_range_index() {
        let mut sheet = test_sheet();
        sheet.add_row(1, dec!(1), None).unwrap();

        assert_eq!(sheet.remove_row(1), None);
        assert_eq!(sheet.remove_row(usize::MAX), None);
        assert_eq!(sheet.len(), 1);
    }

    // =========================================================================
    // totals tests
    // =========================================================================

    #[test]
    fn totals_of_empty_sheet_are_zero() {
        assert_eq!(test_sheet().totals(), SheetTotals::default());
    }

    #[test]
    fn totals_group_subtotals_by_category() {
        let mut sheet = test_sheet();
        sheet.add_row(1, dec!(250), None).unwrap(); // 1.0
        sheet.add_row(2, dec!(1), None).unwrap(); // 2.0
        sheet.add_row(3, dec!(1), None).unwrap(); // 3.0

        let totals = sheet.totals();

        assert_eq!(totals.ingredientes, dec!(1.0));
        assert_eq!(totals.mao_de_obra, dec!(2.0));
        assert_eq!(totals.outros_custos, dec!(3.0));
        assert_eq!(totals.total_geral, dec!(6.0));
    }

    #[test]
    fn totals_sum_rows_of_the_same_category() {
        let mut sheet = test_sheet();
        sheet.add_row(1, dec!(250), None).unwrap(); // 1.0
        sheet.add_row(4, dec!(10), None).unwrap(); // 8.95

        let totals = sheet.totals();

        assert_eq!(totals.ingredientes, dec!(9.95));
        assert_eq!(totals.mao_de_obra, dec!(0));
        assert_eq!(totals.total_geral, dec!(9.95));
    }

    // =========================================================================
    // overflow tests
    // =========================================================================

    fn oven_sheet() -> CalculationSheet {
        CalculationSheet::with_catalog(vec![
            item(5, "Forno", Category::OutrosCustos, dec!(1), dec!(100)),
            item(
                6,
                "Trufa",
                Category::Ingrediente,
                dec!(0.001),
                dec!(10000000000000000000000000000),
            ),
        ])
    }

    #[test]
    fn add_row_refuses_subtotal_that_overflows() {
        let mut sheet = oven_sheet();

        let result = sheet.add_row(5, dec!(1000000000000000000000000000), None);

        assert_eq!(result, Err(SheetError::AmountTooLarge));
        assert!(sheet.is_empty());
    }

    #[test]
    fn add_row_refuses_unit_cost_that_overflows() {
        let mut sheet = oven_sheet();

        assert_eq!(sheet.add_row(6, dec!(1), None), Err(SheetError::AmountTooLarge));
        assert!(sheet.is_empty());
    }

    #[test]
    fn add_row_refuses_row_that_overflows_totals() {
        let mut sheet = oven_sheet();
        let big = dec!(500000000000000000000000000);
        sheet.add_row(5, big, None).unwrap();

        let result = sheet.add_row(5, big, None);

        assert_eq!(result, Err(SheetError::AmountTooLarge));
        assert_eq!(sheet.len(), 1);
        assert_eq!(
            sheet.totals().total_geral,
            dec!(50000000000000000000000000000)
        );
    }

    // =========================================================================
    // remove_item tests
    // =========================================================================

    #[test]
    fn remove_item_drops_every_referencing_row_in_order() {
        let mut sheet = test_sheet();
        sheet.add_row(1, dec!(250), None).unwrap();
        sheet.add_row(2, dec!(1), None).unwrap();
        sheet.add_row(1, dec!(500), None).unwrap();
        sheet.add_row(3, dec!(1), None).unwrap();

        let removed = sheet.remove_item(1);

        assert_eq!(removed, 2);
        let ids: Vec<_> = sheet.rows().iter().map(|r| r.item().id).collect();
        assert_eq!(ids, vec![2, 3]);

        let totals = sheet.totals();
        assert_eq!(totals.ingredientes, dec!(0));
        assert_eq!(totals.total_geral, dec!(5.0));
    }

    #[test]
    fn remove_item_forgets_the_item_for_new_rows() {
        let mut sheet = test_sheet();

        sheet.remove_item(2);

        assert_eq!(sheet.add_row(2, dec!(1), None), Err(SheetError::ItemNotFound(2)));
        assert!(sheet.add_row(3, dec!(1), None).is_ok());
    }

    #[test]
    fn remove_item_without_rows_removes_nothing() {
        let mut sheet = test_sheet();
        sheet.add_row(2, dec!(1), None).unwrap();

        assert_eq!(sheet.remove_item(3), 0);
        assert_eq!(sheet.len(), 1);
    }

    // =========================================================================
    // serialization
    // =========================================================================

    #[test]
    fn row_serializes_with_camel_case_names() {
        let mut sheet = test_sheet();
        sheet.add_row(1, dec!(250), Some("massa".to_string())).unwrap();

        let value = serde_json::to_value(&sheet.rows()[0]).unwrap();

        assert_eq!(value["quantidadeUsada"], serde_json::json!(250.0));
        assert_eq!(value["custoUnitario"], serde_json::json!(0.004));
        assert_eq!(value["subtotal"], serde_json::json!(1.0));
        assert_eq!(value["observacao"], serde_json::json!("massa"));
        assert_eq!(value["item"]["nome"], serde_json::json!("Farinha de trigo"));
    }

    #[test]
    fn totals_serialize_with_camel_case_names() {
        let value = serde_json::to_value(SheetTotals::default()).unwrap();

        assert_eq!(value["maoDeObra"], serde_json::json!(0.0));
        assert_eq!(value["totalGeral"], serde_json::json!(0.0));
    }
}
