use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of spending categories. Names follow the Brazilian bank
/// exports this tool targets; `Outros` is the catch-all for unmatched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Alimentação", alias = "Alimentacao")]
    Alimentacao,
    Transporte,
    Moradia,
    Lazer,
    #[serde(rename = "Saúde", alias = "Saude")]
    Saude,
    #[serde(rename = "Educação", alias = "Educacao")]
    Educacao,
    Compras,
    #[serde(rename = "Serviços", alias = "Servicos")]
    Servicos,
    #[serde(rename = "Transferências", alias = "Transferencias")]
    Transferencias,
    Outros,
}

pub const ALL_CATEGORIES: [Category; 10] = [
    Category::Alimentacao,
    Category::Transporte,
    Category::Moradia,
    Category::Lazer,
    Category::Saude,
    Category::Educacao,
    Category::Compras,
    Category::Servicos,
    Category::Transferencias,
    Category::Outros,
];

impl Category {
    pub fn fallback() -> Self {
        Category::Outros
    }

    /// Fixed rank used to break categorization ties between categories
    /// whose keywords both match. Higher wins.
    pub fn priority(self) -> u8 {
        match self {
            Category::Alimentacao => 10,
            Category::Transporte => 9,
            Category::Saude => 8,
            Category::Moradia => 7,
            Category::Lazer => 6,
            Category::Educacao => 5,
            Category::Compras => 4,
            Category::Servicos => 3,
            Category::Transferencias => 2,
            Category::Outros => 1,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Alimentacao => write!(f, "Alimentação"),
            Category::Transporte => write!(f, "Transporte"),
            Category::Moradia => write!(f, "Moradia"),
            Category::Lazer => write!(f, "Lazer"),
            Category::Saude => write!(f, "Saúde"),
            Category::Educacao => write!(f, "Educação"),
            Category::Compras => write!(f, "Compras"),
            Category::Servicos => write!(f, "Serviços"),
            Category::Transferencias => write!(f, "Transferências"),
            Category::Outros => write!(f, "Outros"),
        }
    }
}
