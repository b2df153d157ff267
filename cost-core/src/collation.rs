//! Brazilian Portuguese ordering for item names.
//!
//! Names are compared in three passes, the way a pt-BR collator does:
//!
//! 1. **base letters**: case and accents ignored (`Óleo` sorts with `oleo`,
//!    `Açúcar` with `acucar`);
//! 2. **accents**: an unaccented letter sorts before its accented forms;
//! 3. **case**: lowercase before uppercase.
//!
//! Names that tie on all three passes compare equal, so a stable sort keeps
//! their existing (insertion) order. Decomposed input (a letter followed by a
//! combining mark such as U+0301) weighs the same as the precomposed letter.

use std::cmp::Ordering;

use crate::models::Item;

/// Compare two names under pt-BR collation.
pub fn compare_pt_br(
    a: &str,
    b: &str,
) -> Ordering {
    let a = collate(a);
    let b = collate(b);

    compare_by(&a, &b, |c| c.base)
        .then_with(|| compare_by(&a, &b, |c| c.accent as u32))
        .then_with(|| compare_by(&a, &b, |c| c.upper as u32))
}

/// Sort items by `nome`, ascending, under pt-BR collation.
pub fn sort_by_name(items: &mut [Item]) {
    items.sort_by(|a, b| compare_pt_br(&a.nome, &b.nome));
}

#[derive(Debug, Clone, Copy)]
struct Collated {
    base: u32,
    accent: Accent,
    upper: bool,
}

/// Secondary weights, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Accent {
    None,
    Acute,
    Grave,
    Circumflex,
    Tilde,
    Diaeresis,
    Cedilla,
}

fn compare_by<K: Ord>(
    a: &[Collated],
    b: &[Collated],
    key: impl Fn(&Collated) -> K,
) -> Ordering {
    a.iter().map(&key).cmp(b.iter().map(&key))
}

fn collate(name: &str) -> Vec<Collated> {
    let mut out: Vec<Collated> = Vec::with_capacity(name.len());
    for c in name.chars() {
        match combining_accent(c) {
            Some(accent) => {
                if let Some(last) = out.last_mut().filter(|last| last.accent == Accent::None) {
                    last.accent = accent;
                }
            }
            None if is_combining_mark(c) => {}
            None => out.push(collate_char(c)),
        }
    }
    out
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

fn combining_accent(c: char) -> Option<Accent> {
    match c {
        '\u{0300}' => Some(Accent::Grave),
        '\u{0301}' => Some(Accent::Acute),
        '\u{0302}' => Some(Accent::Circumflex),
        '\u{0303}' => Some(Accent::Tilde),
        '\u{0308}' => Some(Accent::Diaeresis),
        '\u{0327}' => Some(Accent::Cedilla),
        _ => None,
    }
}

fn collate_char(c: char) -> Collated {
    let upper = c.is_uppercase();
    let lower = c.to_lowercase().next().unwrap_or(c);
    let (base, accent) = fold_accent(lower);
    Collated {
        base: base as u32,
        accent,
        upper,
    }
}

fn fold_accent(c: char) -> (char, Accent) {
    match c {
        'á' => ('a', Accent::Acute),
        'à' => ('a', Accent::Grave),
        'â' => ('a', Accent::Circumflex),
        'ã' => ('a', Accent::Tilde),
        'ä' => ('a', Accent::Diaeresis),
        'é' => ('e', Accent::Acute),
        'è' => ('e', Accent::Grave),
        'ê' => ('e', Accent::Circumflex),
        'ë' => ('e', Accent::Diaeresis),
        'í' => ('i', Accent::Acute),
        'ì' => ('i', Accent::Grave),
        'î' => ('i', Accent::Circumflex),
        'ï' => ('i', Accent::Diaeresis),
        'ó' => ('o', Accent::Acute),
        'ò' => ('o', Accent::Grave),
        'ô' => ('o', Accent::Circumflex),
        'õ' => ('o', Accent::Tilde),
        'ö' => ('o', Accent::Diaeresis),
        'ú' => ('u', Accent::Acute),
        'ù' => ('u', Accent::Grave),
        'û' => ('u', Accent::Circumflex),
        'ü' => ('u', Accent::Diaeresis),
        'ç' => ('c', Accent::Cedilla),
        'ñ' => ('n', Accent::Tilde),
        other => (other, Accent::None),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::Category;

    fn item(
        id: i64,
        nome: &str,
    ) -> Item {
        Item {
            id,
            nome: nome.to_string(),
            categoria: Category::Ingrediente,
            quantidade_base: dec!(1),
            tipo_quantidade: "un".to_string(),
            preco_por_quantidade: dec!(1),
        }
    }

    #[test]
    fn accents_do_not_push_names_to_the_end() {
        assert_eq!(compare_pt_br("Óleo", "Ovos"), Ordering::Less);
        assert_eq!(compare_pt_br("Óleo", "Nutella"), Ordering::Greater);
    }

    #[test]
    fn cedilla_sorts_with_c() {
        assert_eq!(compare_pt_br("Achocolatado", "Açúcar cristal"), Ordering::Less);
        assert_eq!(compare_pt_br("Açúcar cristal", "Amido de milho"), Ordering::Less);
    }

    #[test]
    fn case_is_ignored_on_the_first_pass() {
        assert_eq!(compare_pt_br("banana", "Cacau"), Ordering::Less);
        assert_eq!(compare_pt_br("Banana", "cacau"), Ordering::Less);
    }

    #[test]
    fn unaccented_sorts_before_accented_on_tie() {
        assert_eq!(compare_pt_br("limao", "limão"), Ordering::Less);
        assert_eq!(compare_pt_br("cafe", "café"), Ordering::Less);
    }

    #[test]
    fn lowercase_sorts_before_uppercase_on_tie() {
        assert_eq!(compare_pt_br("mel", "Mel"), Ordering::Less);
    }

    #[test]
    fn decomposed_accents_match_precomposed() {
        assert_eq!(compare_pt_br("Lima\u{0303}o", "Limão"), Ordering::Equal);
        assert_eq!(compare_pt_br("Ac\u{0327}u\u{0301}car", "Açúcar"), Ordering::Equal);
        assert_eq!(compare_pt_br("Ca\u{0301}psula", "Cacau"), Ordering::Greater);
        assert_eq!(compare_pt_br("Ca\u{0301}psula", "Castanha"), Ordering::Less);
    }

    #[test]
    fn identical_names_are_equal() {
        assert_eq!(compare_pt_br("Leite", "Leite"), Ordering::Equal);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(compare_pt_br("Leite", "Leite condensado"), Ordering::Less);
        assert_eq!(compare_pt_br("Doce de leite", "Doce de leite Itambé"), Ordering::Less);
    }

    #[test]
    fn sort_by_name_orders_a_mixed_catalog() {
        let mut items = vec![
            item(1, "Óleo"),
            item(2, "Limão"),
            item(3, "açúcar refinado"),
            item(4, "Abacaxi"),
            item(5, "Laranja"),
            item(6, "Ovos (em unidades)"),
            item(7, "Essência de baunilha"),
        ];

        sort_by_name(&mut items);

        let names: Vec<_> = items.iter().map(|i| i.nome.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Abacaxi",
                "açúcar refinado",
                "Essência de baunilha",
                "Laranja",
                "Limão",
                "Óleo",
                "Ovos (em unidades)",
            ]
        );
    }

    #[test]
    fn sort_by_name_is_stable_for_equal_names() {
        let mut items = vec![item(9, "Mel"), item(3, "Mel")];

        sort_by_name(&mut items);

        assert_eq!(items[0].id, 9);
        assert_eq!(items[1].id, 3);
    }
}
