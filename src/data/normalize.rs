use super::model::{Field, Product, RawRow, RawValue};

// ---------------------------------------------------------------------------
// Key aliases
// ---------------------------------------------------------------------------

/// Accepted header spellings per canonical column, in lookup priority order.
/// The first entry is always the lowercase canonical name.
pub const fn aliases(field: Field) -> &'static [&'static str] {
    match field {
        Field::Id => &["id", "ID"],
        Field::ProductNo => &["product_no", "PRODUCT_NO"],
        Field::CategoryId => &["category_id", "CATEGORY_ID"],
        Field::Category => &["category", "CATEGORY"],
        Field::BrandId => &["brand_id", "BRAND_ID"],
        Field::Brand => &["brand", "BRAND"],
        Field::Name => &["name", "NAME"],
        Field::WarrantyId => &["warranty_id", "WARRANTY_ID"],
        Field::Warranty => &["warranty", "WARRANTY"],
        Field::DpPrice => &["dp_price", "DP_PRICE"],
        Field::RpPrice => &["rp_price", "RP_PRICE"],
        Field::MapPrice => &["map_price", "MAP_PRICE"],
        Field::MrpPrice => &["mrp_price", "MRP_PRICE"],
        Field::Url => &["url", "URL"],
    }
}

/// Which header spellings a row source may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    /// Headers were lowercased upstream (CSV text); only the canonical
    /// lowercase key is consulted.
    Lowercase,
    /// Headers keep the source's casing (spreadsheets, JSON). The alias list
    /// is tried first, then any header equal to the canonical name ignoring
    /// ASCII case.
    AnyCase,
}

/// Find the first present value for `field` in `row`.
pub fn resolve(row: &RawRow, field: Field, keys: KeyCase) -> Option<&RawValue> {
    let spellings = match keys {
        KeyCase::Lowercase => &aliases(field)[..1],
        KeyCase::AnyCase => aliases(field),
    };

    let listed = spellings
        .iter()
        .filter_map(|key| row.get(*key))
        .find(|v| !v.is_absent());

    match (listed, keys) {
        (Some(v), _) => Some(v),
        (None, KeyCase::Lowercase) => None,
        (None, KeyCase::AnyCase) => row
            .iter()
            .find(|(k, v)| k.eq_ignore_ascii_case(field.as_str()) && !v.is_absent())
            .map(|(_, v)| v),
    }
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Text form of a raw value; absent becomes `""`.
pub fn coerce_text(value: Option<&RawValue>) -> String {
    match value {
        Some(RawValue::Text(s)) => s.clone(),
        Some(v @ RawValue::Number(_)) => v.to_string(),
        Some(RawValue::Absent) | None => String::new(),
    }
}

/// Like [`coerce_text`] but empty text collapses to `None`.
pub fn coerce_optional_text(value: Option<&RawValue>) -> Option<String> {
    Some(coerce_text(value)).filter(|s| !s.is_empty())
}

/// Numeric form of a raw value. Anything that does not read as a finite
/// decimal becomes `0`.
pub fn coerce_number(value: Option<&RawValue>) -> f64 {
    match value {
        Some(RawValue::Number(v)) if v.is_finite() => *v,
        Some(RawValue::Text(s)) => parse_decimal(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Parse the longest leading decimal number of `s` (after trimming):
/// optional sign, digits with an optional fraction, optional exponent.
/// Trailing garbage is ignored (`"12.5kg"` → `12.5`). Returns `None` when no
/// number prefix exists or the result is not finite.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let s = s.trim();
    let b = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut n_digits = int_end - end;
    end = int_end;

    if b.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let n_frac = frac_end - (end + 1);
        if n_digits + n_frac > 0 {
            n_digits += n_frac;
            end = frac_end;
        }
    }
    if n_digits == 0 {
        return None;
    }

    if matches!(b.get(end), Some(b'e' | b'E')) {
        let mut j = end + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Row → Product
// ---------------------------------------------------------------------------

/// Normalize one raw row. Never fails: missing or malformed cells fall back
/// to `""` / `0` / `None`.
pub fn normalize_row(row: &RawRow, keys: KeyCase) -> Product {
    let text = |f: Field| coerce_text(resolve(row, f, keys));
    let opt = |f: Field| coerce_optional_text(resolve(row, f, keys));
    let num = |f: Field| coerce_number(resolve(row, f, keys));

    Product {
        id: opt(Field::Id),
        product_no: text(Field::ProductNo),
        category_id: opt(Field::CategoryId),
        category: text(Field::Category),
        brand_id: opt(Field::BrandId),
        brand: text(Field::Brand),
        name: text(Field::Name),
        warranty_id: opt(Field::WarrantyId),
        warranty: text(Field::Warranty),
        dp_price: num(Field::DpPrice),
        rp_price: num(Field::RpPrice),
        map_price: num(Field::MapPrice),
        mrp_price: num(Field::MrpPrice),
        url: opt(Field::Url),
    }
}

/// Normalize a whole batch of rows, preserving order.
pub fn normalize_rows(rows: &[RawRow], keys: KeyCase) -> Vec<Product> {
    rows.iter().map(|row| normalize_row(row, keys)).collect()
}
