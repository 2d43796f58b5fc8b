//! # List Query Model
//!
//! Search, filtering, sorting, and pagination for product listings.
//!
//! ## Sort Grammar
//! ```text
//! sort = field ":" direction
//!
//! field     ∈ {id, sku, name, price, created_at}
//!             anything else silently falls back to created_at
//! direction = "asc" (case-insensitive) → ascending
//!             anything else            → descending
//! ```
//! The field and direction tokens are resolved independently, so
//! `"bogus:asc"` sorts ascending by `created_at`.

use crate::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

// =============================================================================
// Sort Field
// =============================================================================

/// The fixed allow-list of sortable columns.
///
/// Modeling the allow-list as an enum means an arbitrary string can never
/// reach the SQL layer; unknown input resolves to the default before any
/// query is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Sku,
    Name,
    Price,
    CreatedAt,
}

impl SortField {
    /// Resolves a field token, falling back to `created_at` for anything
    /// outside the allow-list (including the empty string).
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "id" => SortField::Id,
            "sku" => SortField::Sku,
            "name" => SortField::Name,
            "price" => SortField::Price,
            _ => SortField::CreatedAt,
        }
    }

    /// The column this field sorts by.
    ///
    /// Price sorts on the cents column; at a fixed scale the integer order
    /// is the decimal order.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Sku => "sku",
            SortField::Name => "name",
            SortField::Price => "price_cents",
            SortField::CreatedAt => "created_at",
        }
    }
}

// =============================================================================
// Sort Direction
// =============================================================================

/// Sort direction. Only the literal token `asc` selects ascending; every
/// other token (including typos) means descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

// =============================================================================
// Sort Spec
// =============================================================================

/// A resolved `field:direction` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parses a `field:direction` token pair.
    ///
    /// A missing `:direction` suffix means descending, matching the
    /// direction default.
    pub fn parse(spec: &str) -> Self {
        let (field, direction) = match spec.split_once(':') {
            Some((f, d)) => (f, d),
            None => (spec, ""),
        };
        SortSpec {
            field: SortField::parse(field),
            direction: SortDirection::parse(direction),
        }
    }
}

impl Default for SortSpec {
    /// `created_at:desc` - newest first.
    fn default() -> Self {
        SortSpec {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

// =============================================================================
// Product Query
// =============================================================================

/// A fully-resolved listing query.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    /// Free-text fragment matched against `name` OR `sku` as a
    /// case-insensitive substring. Empty/whitespace disables the filter.
    pub q: Option<String>,

    /// Exact stock-status filter; `None` means no filtering.
    pub in_stock: Option<bool>,

    /// Records to skip from the start of the ordered result.
    pub skip: i64,

    /// Maximum records returned.
    pub limit: i64,

    /// Sort column and direction.
    pub sort: SortSpec,
}

impl ProductQuery {
    /// The search term with emptiness normalized away: a present but
    /// blank `q` behaves exactly like an absent one.
    pub fn search_term(&self) -> Option<&str> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        ProductQuery {
            q: None,
            in_stock: None,
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
            sort: SortSpec::default(),
        }
    }
}

// Compile-time sanity: defaults stay inside the documented bounds.
const _: () = assert!(DEFAULT_PAGE_LIMIT <= MAX_PAGE_LIMIT);

// =============================================================================
// Unit Tests
// =============================================================================
