//! Shoe model matching the remote `/shoes` resource.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Image shown when a record carries no photo URL.
pub const PLACEHOLDER_PHOTO: &str = "/placeholder.svg";

/// A shoe held in the catalog. `id` is assigned by the remote store and never changes.
///
/// `imageUrl` and `stock` are accepted on input because older clients wrote those names;
/// when a record carries both spellings the canonical one wins. Output always uses
/// `photoUrl` and `inStock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WireShoe")]
pub struct ShoeRecord {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    pub size: Decimal,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub in_stock: bool,
}

/// The mutable fields of a shoe, as sent on `POST /shoes` and `PUT /shoes/{id}`.
///
/// Built by `validation::validate`; holding one means every field rule passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireShoe")]
pub struct ShoeInput {
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    pub size: Decimal,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub in_stock: bool,
}

/// Shoe as read off the wire, with both spellings of the renamed fields kept apart.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireShoe {
    id: Option<String>,
    name: String,
    brand: String,
    price: Decimal,
    size: Decimal,
    color: String,
    photo_url: Option<String>,
    image_url: Option<String>,
    in_stock: Option<bool>,
    stock: Option<bool>,
}

impl WireShoe {
    fn split(self) -> (Option<String>, ShoeInput) {
        let input = ShoeInput {
            name: self.name,
            brand: self.brand,
            price: self.price,
            size: self.size,
            color: self.color,
            photo_url: self.photo_url.or(self.image_url),
            in_stock: self.in_stock.or(self.stock).unwrap_or(true),
        };
        (self.id, input)
    }
}

impl From<WireShoe> for ShoeInput {
    fn from(wire: WireShoe) -> Self {
        wire.split().1
    }
}

impl TryFrom<WireShoe> for ShoeRecord {
    type Error = &'static str;

    fn try_from(wire: WireShoe) -> Result<Self, Self::Error> {
        match wire.split() {
            (Some(id), input) => Ok(Self::from_input(id, input)),
            (None, _) => Err("missing field `id`"),
        }
    }
}

impl ShoeRecord {
    /// Attach a remote-assigned id to validated input.
    pub fn from_input(id: impl Into<String>, input: ShoeInput) -> Self {
        Self {
            id: id.into(),
            name: input.name,
            brand: input.brand,
            price: input.price,
            size: input.size,
            color: input.color,
            photo_url: input.photo_url,
            in_stock: input.in_stock,
        }
    }

    /// The mutable fields of this record.
    pub fn input(&self) -> ShoeInput {
        ShoeInput {
            name: self.name.clone(),
            brand: self.brand.clone(),
            price: self.price,
            size: self.size,
            color: self.color.clone(),
            photo_url: self.photo_url.clone(),
            in_stock: self.in_stock,
        }
    }

    /// Replace every mutable field, keeping `id`.
    pub fn apply(&mut self, input: ShoeInput) {
        let id = std::mem::take(&mut self.id);
        *self = Self::from_input(id, input);
    }

    pub fn photo_or_placeholder(&self) -> &str {
        self.photo_url.as_deref().unwrap_or(PLACEHOLDER_PHOTO)
    }
}

impl fmt::Display for ShoeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {} ({})  size {}  {}  {:.2}  [{}]",
            self.id,
            self.name,
            self.brand,
            self.size.normalize(),
            self.color,
            self.price,
            if self.in_stock { "in stock" } else { "sold out" },
        )
    }
}
