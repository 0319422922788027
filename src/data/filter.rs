use std::cmp::Ordering;

use super::model::{Filters, Product, SortField, SortKey, SortOrder};
use super::normalize::parse_decimal;

// ---------------------------------------------------------------------------
// Price bounds
// ---------------------------------------------------------------------------

/// Parsed numeric bounds. An empty or unreadable bound string is no bound.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceBounds {
    pub min_dp: Option<f64>,
    pub max_dp: Option<f64>,
    pub min_rp: Option<f64>,
    pub max_rp: Option<f64>,
}

impl PriceBounds {
    pub fn from_filters(filters: &Filters) -> Self {
        let bound = |s: &str| if s.is_empty() { None } else { parse_decimal(s) };
        PriceBounds {
            min_dp: bound(&filters.min_dp_price),
            max_dp: bound(&filters.max_dp_price),
            min_rp: bound(&filters.min_rp_price),
            max_rp: bound(&filters.max_rp_price),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        *self == PriceBounds::default()
    }

    /// Inclusive range check on `dp_price` and `rp_price`.
    pub fn contains(&self, p: &Product) -> bool {
        let above = |v: f64, min: Option<f64>| min.map_or(true, |m| v >= m);
        let below = |v: f64, max: Option<f64>| max.map_or(true, |m| v <= m);
        above(p.dp_price, self.min_dp)
            && below(p.dp_price, self.max_dp)
            && above(p.rp_price, self.min_rp)
            && below(p.rp_price, self.max_rp)
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Case-insensitive substring match against name, product number, category
/// and brand. `needle` must already be lowercased.
fn matches_search(p: &Product, needle: &str) -> bool {
    [&p.name, &p.product_no, &p.category, &p.brand]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Exact, case-sensitive match; an empty constraint matches everything.
fn matches_exact(value: &str, wanted: &str) -> bool {
    wanted.is_empty() || value == wanted
}

/// Return indices of products passing all active filters, sorted by the
/// configured column. The input slice is never reordered.
///
/// Predicates apply in order: text search, category, brand, warranty, price
/// bounds. The sort is stable, so products with equal keys keep their
/// catalog order in both directions.
pub fn filtered_indices(products: &[Product], filters: &Filters) -> Vec<usize> {
    if products.is_empty() {
        return Vec::new();
    }

    let needle = (!filters.search.is_empty()).then(|| filters.search.to_lowercase());
    let bounds = PriceBounds::from_filters(filters);
    let check_bounds = !bounds.is_unbounded();

    let mut indices: Vec<usize> = products
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            if let Some(needle) = &needle {
                if !matches_search(p, needle) {
                    return false;
                }
            }
            matches_exact(&p.category, &filters.category)
                && matches_exact(&p.brand, &filters.brand)
                && matches_exact(&p.warranty, &filters.warranty)
                && (!check_bounds || bounds.contains(p))
        })
        .map(|(i, _)| i)
        .collect();

    if !indices.is_empty() {
        indices.sort_by(|&a, &b| {
            compare_products(&products[a], &products[b], filters.sort_by, filters.sort_order)
        });
    }
    indices
}

/// Convenience wrapper over [`filtered_indices`] returning references.
pub fn filter_products<'a>(products: &'a [Product], filters: &Filters) -> Vec<&'a Product> {
    filtered_indices(products, filters)
        .into_iter()
        .map(|i| &products[i])
        .collect()
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Compare two products on one column: numerically for price columns,
/// with [`locale_cmp`] for text columns. `Desc` inverts the result.
pub fn compare_products(a: &Product, b: &Product, field: SortField, order: SortOrder) -> Ordering {
    let ord = match (a.sort_key(field), b.sort_key(field)) {
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (SortKey::Text(x), SortKey::Text(y)) => locale_cmp(x, y),
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    };
    match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

/// Dictionary-style string ordering: letters compare alphabetically
/// regardless of case, whitespace and punctuation sort before digits,
/// digits before letters. Ties on the folded text are broken with lowercase
/// before uppercase, then by code point.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    fn class(c: char) -> u8 {
        if c.is_whitespace() {
            0
        } else if c.is_numeric() {
            2
        } else if c.is_alphabetic() {
            3
        } else {
            1
        }
    }
    fn folded(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
        s.chars().flat_map(char::to_lowercase).map(|c| (class(c), c))
    }
    fn case_rank(s: &str) -> impl Iterator<Item = bool> + '_ {
        s.chars().map(char::is_uppercase)
    }

    folded(a)
        .cmp(folded(b))
        .then_with(|| case_rank(a).cmp(case_rank(b)))
        .then_with(|| a.cmp(b))
}
