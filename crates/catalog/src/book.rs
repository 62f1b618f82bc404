use serde::{Deserialize, Serialize};

use booklend_core::{BookId, DomainError, DomainResult, Entity};

/// Physical cover type of a book.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoverType {
    Hard,
    Soft,
}

/// A book in the catalog.
///
/// # Invariants
/// - `inventory` is the number of copies currently available for borrowing and
///   can never go negative (unsigned by construction; decrements are guarded).
/// - `daily_fee_cents` is a fixed-point amount in minor units (2 decimal places).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub cover: CoverType,
    pub inventory: u32,
    pub daily_fee_cents: u64,
}

impl Book {
    /// Build a validated catalog record from untrusted input.
    pub fn new(id: BookId, input: NewBook) -> DomainResult<Self> {
        input.validate()?;
        Ok(Self {
            id,
            title: input.title.trim().to_string(),
            author: input.author.trim().to_string(),
            cover: input.cover,
            inventory: input.inventory,
            daily_fee_cents: input.daily_fee_cents,
        })
    }
}

impl Entity for Book {
    type Id = BookId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for creating or replacing a catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub cover: CoverType,
    pub inventory: u32,
    pub daily_fee_cents: u64,
}

impl NewBook {
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if self.author.trim().is_empty() {
            return Err(DomainError::validation("author cannot be empty"));
        }
        Ok(())
    }
}
