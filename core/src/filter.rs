//! Guest search: optional filters compiled into an ordered predicate list.
//!
//! Each predicate owns its bind parameters. Placeholders are numbered from
//! the predicate's position in the final parameter list while the SQL is
//! rendered, so the `$n` markers and the bind order cannot drift apart.
//!
//! The same predicate list can be evaluated in memory with
//! [`GuestQuery::matches`], which keeps alternative stores consistent with
//! the SQL semantics.

use crate::guest::Guest;
use serde::Deserialize;
use std::borrow::Cow;

/// Columns and table every guest listing selects from.
pub const GUEST_SELECT: &str = "SELECT id, name, email, phone, status, created_at FROM guests";

/// Query-string filters for `GET /guests`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuestFilter {
    /// Exact status match
    pub status: Option<String>,
    /// Case-insensitive substring of name or email
    pub search: Option<String>,
}

/// One `WHERE` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestPredicate {
    /// `status = $n`
    StatusEquals(String),
    /// Name or email contains the term, ignoring case
    NameOrEmailContains(String),
}

impl GuestPredicate {
    /// Render this predicate with its first placeholder numbered `first`.
    #[must_use]
    pub fn render(&self, first: usize) -> String {
        match self {
            Self::StatusEquals(_) => format!("status = ${first}"),
            Self::NameOrEmailContains(_) => {
                format!(r"(name ILIKE ${first} ESCAPE '\' OR email ILIKE ${first} ESCAPE '\')")
            }
        }
    }

    /// Bind parameters, in placeholder order.
    #[must_use]
    pub fn params(&self) -> Vec<String> {
        match self {
            Self::StatusEquals(status) => vec![status.clone()],
            Self::NameOrEmailContains(term) => vec![format!("%{}%", escape_like(term))],
        }
    }

    /// Evaluate against an already loaded guest.
    #[must_use]
    pub fn matches(&self, guest: &Guest) -> bool {
        match self {
            Self::StatusEquals(status) => guest.status.as_str() == status,
            Self::NameOrEmailContains(term) => {
                let term = term.to_lowercase();
                guest.name.to_lowercase().contains(&term)
                    || guest.email.to_lowercase().contains(&term)
            }
        }
    }
}

/// Rendered SQL plus its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlQuery {
    /// Statement text with `$1..$n` placeholders
    pub sql: String,
    /// Parameters for `$1..$n`
    pub params: Vec<String>,
}

/// An ordered list of predicates joined with `AND`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestQuery {
    predicates: Vec<GuestPredicate>,
}

impl GuestQuery {
    /// A query matching every guest.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Compile request filters. Blank values are treated as absent.
    #[must_use]
    pub fn from_filter(filter: &GuestFilter) -> Self {
        let mut query = Self::all();
        if let Some(status) = present(filter.status.as_deref()) {
            query = query.and(GuestPredicate::StatusEquals(status.to_string()));
        }
        if let Some(search) = present(filter.search.as_deref()) {
            query = query.and(GuestPredicate::NameOrEmailContains(search.to_string()));
        }
        query
    }

    /// Append a predicate.
    #[must_use]
    pub fn and(mut self, predicate: GuestPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Predicates in application order.
    #[must_use]
    pub fn predicates(&self) -> &[GuestPredicate] {
        &self.predicates
    }

    /// Render the full statement, ordered by identifier.
    #[must_use]
    pub fn to_sql(&self) -> SqlQuery {
        let mut sql = String::from(GUEST_SELECT);
        let mut params = Vec::new();

        for (i, predicate) in self.predicates.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&predicate.render(params.len() + 1));
            params.extend(predicate.params());
        }

        sql.push_str(" ORDER BY id");
        SqlQuery { sql, params }
    }

    /// `true` when every predicate holds for `guest`.
    #[must_use]
    pub fn matches(&self, guest: &Guest) -> bool {
        self.predicates.iter().all(|p| p.matches(guest))
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Escape `LIKE` metacharacters. Assumes `ESCAPE '\'` on the clause.
fn escape_like(input: &str) -> Cow<'_, str> {
    if !input.contains(['%', '_', '\\']) {
        return Cow::Borrowed(input);
    }
    let mut output = String::with_capacity(input.len() + 4);
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            output.push('\\');
        }
        output.push(ch);
    }
    Cow::Owned(output)
}
