use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A drink record owned by the store. The recipe is embedded in the
/// record, so removing a drink removes its ingredients with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Drink {
    /// Server-assigned unique identifier
    pub id: i64,
    /// Name of the drink
    pub title: String,
    /// Ordered list of ingredients making up the drink
    pub recipe: Vec<Ingredient>,
}

/// A single ingredient of a drink's recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Ingredient {
    /// Name of the ingredient
    pub name: String,
    /// Number of parts of the drink this ingredient represents
    pub parts: i64,
    /// Display color of the ingredient
    pub color: String,
}

/// An ingredient in short form, with the name withheld
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ShortIngredient {
    pub parts: i64,
    pub color: String,
}

/// A drink with its recipe in short form, visible to anyone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ShortDrink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// A drink with its full recipe, visible to callers holding the
/// `get:drinks-detail` permission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct LongDrink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    /// Formats the drink with the recipe in short form
    pub fn short_form(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| ShortIngredient {
                    parts: ingredient.parts,
                    color: ingredient.color.clone(),
                })
                .collect(),
        }
    }

    /// Formats the drink with the recipe in long form
    pub fn long_form(&self) -> LongDrink {
        LongDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.clone(),
        }
    }
}
