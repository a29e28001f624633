//! Sorting allow-lists for list endpoints and rating display helpers.
//!
//! Query strings carry `sortBy` and `sortOrder` as free text. Each list
//! endpoint has a closed enum of sortable fields mapped onto SQL columns, so
//! nothing from the request is ever interpolated into a query. Values outside
//! the allow-list are ignored and the endpoint's default ordering is used.

use std::str::FromStr;

use serde::Serializer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

/// A sortable field of one list endpoint.
pub trait SortField: FromStr + Copy {
    /// Column expression used in `ORDER BY`.
    fn column(&self) -> &'static str;
}

macro_rules! sort_fields {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal : $column:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(()),
                }
            }
        }

        impl SortField for $name {
            fn column(&self) -> &'static str {
                match self {
                    $($name::$variant => $column),+
                }
            }
        }
    };
}

sort_fields! {
    /// Admin user list.
    UserSortField {
        Name => "name": "name",
        Email => "email": "email",
        Role => "role": "role",
        CreatedAt => "created_at": "created_at",
    }
}

sort_fields! {
    /// Admin store list.
    AdminStoreSortField {
        Name => "name": "s.name",
        Email => "email": "s.email",
        Address => "address": "s.address",
        AverageRating => "average_rating": "average_rating",
        TotalRatings => "total_ratings": "total_ratings",
        CreatedAt => "created_at": "s.created_at",
    }
}

sort_fields! {
    /// Store browsing for normal users.
    UserStoreSortField {
        Name => "name": "s.name",
        Address => "address": "s.address",
        AverageRating => "average_rating": "average_rating",
    }
}

sort_fields! {
    /// Ratings received by an owner's store.
    OwnerRatingSortField {
        CreatedAt => "created_at": "r.created_at",
        UpdatedAt => "updated_at": "r.updated_at",
        Rating => "rating": "r.rating",
        UserName => "user_name": "u.name",
    }
}

/// Resolves the requested ordering against an allow-list.
///
/// A missing `sortBy` keeps the default field; a missing `sortOrder` is
/// ascending when a field was requested and the default direction otherwise.
/// Any unrecognized value falls back to the full default.
pub fn resolve_sort<F: SortField>(
    sort_by: Option<&str>,
    sort_order: Option<&str>,
    default: (F, SortOrder),
) -> (F, SortOrder) {
    let field = match sort_by {
        None => None,
        Some(raw) => match raw.parse::<F>() {
            Ok(field) => Some(field),
            Err(_) => return default,
        },
    };

    let order = match sort_order {
        None => None,
        Some(raw) => match raw.parse::<SortOrder>() {
            Ok(order) => Some(order),
            Err(_) => return default,
        },
    };

    match (field, order) {
        (Some(field), order) => (field, order.unwrap_or(SortOrder::Asc)),
        (None, order) => (default.0, order.unwrap_or(default.1)),
    }
}

/// `ORDER BY` clause for a resolved ordering, with `tiebreak` appended so the
/// row order is stable.
pub fn order_by_clause<F: SortField>((field, order): (F, SortOrder), tiebreak: &str) -> String {
    format!(" ORDER BY {} {}, {} ASC", field.column(), order.as_sql(), tiebreak)
}

/// `ILIKE` pattern for a free-text search. Blank searches match everything
/// and yield `None`.
pub fn search_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s))
}

/// Renders a mean rating with one decimal place, halves rounding up.
pub fn format_average(average: f64) -> String {
    format!("{:.1}", (average * 10.0).round() / 10.0)
}

pub fn serialize_average<S>(average: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_average(*average))
}
