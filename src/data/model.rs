use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ---------------------------------------------------------------------------
// RawValue – a single cell as handed over by a decoder
// ---------------------------------------------------------------------------

/// A loosely-typed cell value. Spreadsheet decoders hand out numbers for
/// numeric cells and text for everything else; CSV only ever yields text.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Absent,
}

impl RawValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, RawValue::Absent)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => write!(f, "{s}"),
            // Integral numbers print without a fractional part, so an id cell
            // holding `1042` reads back as "1042" rather than "1042.0".
            RawValue::Number(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            RawValue::Number(v) => write!(f, "{v}"),
            RawValue::Absent => Ok(()),
        }
    }
}

/// One raw row: column header → cell value. Header spelling is whatever the
/// source file used.
pub type RawRow = BTreeMap<String, RawValue>;

// ---------------------------------------------------------------------------
// Field – canonical product columns
// ---------------------------------------------------------------------------

/// Canonical product columns recognised on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Id,
    ProductNo,
    CategoryId,
    Category,
    BrandId,
    Brand,
    Name,
    WarrantyId,
    Warranty,
    DpPrice,
    RpPrice,
    MapPrice,
    MrpPrice,
    Url,
}

impl Field {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::ProductNo => "product_no",
            Field::CategoryId => "category_id",
            Field::Category => "category",
            Field::BrandId => "brand_id",
            Field::Brand => "brand",
            Field::Name => "name",
            Field::WarrantyId => "warranty_id",
            Field::Warranty => "warranty",
            Field::DpPrice => "dp_price",
            Field::RpPrice => "rp_price",
            Field::MapPrice => "map_price",
            Field::MrpPrice => "mrp_price",
            Field::Url => "url",
        }
    }
}

// ---------------------------------------------------------------------------
// Product – one normalized catalog entry
// ---------------------------------------------------------------------------

/// A catalog entry after normalization. String fields are never missing
/// (empty means unset) and prices are always finite.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Product {
    pub id: Option<String>,
    pub product_no: String,
    pub category_id: Option<String>,
    pub category: String,
    pub brand_id: Option<String>,
    pub brand: String,
    pub name: String,
    pub warranty_id: Option<String>,
    pub warranty: String,
    pub dp_price: f64,
    pub rp_price: f64,
    pub map_price: f64,
    pub mrp_price: f64,
    pub url: Option<String>,
}

impl Product {
    /// Identity used for list rendering: the id when present, otherwise the
    /// product number.
    pub fn key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.product_no)
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed Product"
        } else {
            &self.name
        }
    }

    /// Link target for the "view" affordance, if any.
    pub fn view_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Value of a sortable column.
    pub fn sort_key(&self, field: SortField) -> SortKey<'_> {
        match field {
            SortField::ProductNo => SortKey::Text(&self.product_no),
            SortField::Name => SortKey::Text(&self.name),
            SortField::Category => SortKey::Text(&self.category),
            SortField::Brand => SortKey::Text(&self.brand),
            SortField::DpPrice => SortKey::Number(self.dp_price),
            SortField::RpPrice => SortKey::Number(self.rp_price),
        }
    }
}

/// Format a price for display with two decimals.
pub fn format_price(value: f64) -> String {
    format!("{value:.2}")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
}

// ---------------------------------------------------------------------------
// Sorting configuration
// ---------------------------------------------------------------------------

/// The closed set of columns a catalog view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    ProductNo,
    Name,
    Category,
    Brand,
    DpPrice,
    RpPrice,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::ProductNo,
        SortField::Name,
        SortField::Category,
        SortField::Brand,
        SortField::DpPrice,
        SortField::RpPrice,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SortField::ProductNo => "product_no",
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::Brand => "brand",
            SortField::DpPrice => "dp_price",
            SortField::RpPrice => "rp_price",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            SortField::ProductNo => "Product No",
            SortField::Name => "Name",
            SortField::Category => "Category",
            SortField::Brand => "Brand",
            SortField::DpPrice => "DP Price",
            SortField::RpPrice => "RP Price",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a sortable field")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownSortField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a sort order (expected 'asc' or 'desc')")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Filters – the query configuration for one session
// ---------------------------------------------------------------------------

/// Current query configuration. Empty strings mean "no constraint"; price
/// bounds stay textual so an empty input is distinguishable from zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filters {
    pub search: String,
    pub category: String,
    pub brand: String,
    pub warranty: String,
    pub min_dp_price: String,
    pub max_dp_price: String,
    pub min_rp_price: String,
    pub max_rp_price: String,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Filters {
    /// Set the sort column from its field name. Names outside the sortable
    /// set are ignored and the current column is kept.
    pub fn set_sort_by(&mut self, name: &str) -> bool {
        match name.parse::<SortField>() {
            Ok(field) => {
                self.sort_by = field;
                true
            }
            Err(e) => {
                log::warn!("{e}; keeping sort by {}", self.sort_by.as_str());
                false
            }
        }
    }

    /// Set the sort direction from `"asc"` or `"desc"`. Anything else is
    /// ignored and the current direction is kept.
    pub fn set_sort_order(&mut self, name: &str) -> bool {
        match name.parse::<SortOrder>() {
            Ok(order) => {
                self.sort_order = order;
                true
            }
            Err(e) => {
                log::warn!("{e}; keeping {} order", self.sort_order.as_str());
                false
            }
        }
    }

    fn constraints(&self) -> [&str; 8] {
        [
            &self.search,
            &self.category,
            &self.brand,
            &self.warranty,
            &self.min_dp_price,
            &self.max_dp_price,
            &self.min_rp_price,
            &self.max_rp_price,
        ]
    }

    /// Whether any narrowing constraint is set (sorting does not count).
    pub fn is_active(&self) -> bool {
        self.constraints().iter().any(|c| !c.is_empty())
    }

    /// Number of non-empty constraint fields.
    pub fn active_count(&self) -> usize {
        self.constraints().iter().filter(|c| !c.is_empty()).count()
    }
}
