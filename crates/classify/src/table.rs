use std::collections::BTreeMap;

use extrato_core::Category;

/// Built-in keyword table for Brazilian bank descriptions. Keywords are
/// stored pre-normalized (lowercase, no accents). Order matters within a
/// list only for readability; ranking at match time is by keyword length
/// and category priority, not list position.
pub(crate) fn default_table() -> BTreeMap<Category, Vec<String>> {
    let entries: [(Category, &[&str]); 10] = [
        (
            Category::Alimentacao,
            &[
                // delivery
                "uber eats", "ifood", "rappi",
                // restaurants
                "restaurante", "lanchonete", "padaria", "cafeteria",
                "burger", "pizza", "sushi",
                // grocery chains
                "carrefour", "extra", "atta", "dia", "gleba",
                "supermercado",
                // generic grocery ("mercado livre" belongs to Compras)
                "mercado",
                "loja de conveniencia",
            ],
        ),
        (
            Category::Transporte,
            &[
                "99 taxi", "cabify", "uber", "taxi",
                "posto", "gasolina", "alcool", "combustivel",
                "shell", "ipiranga", "petrobras",
                "estacionamento", "parking",
                "onibus", "metro", "trem", "bilhete",
            ],
        ),
        (
            Category::Moradia,
            &[
                "eletropaulo", "sabesp",
                "luz", "agua", "esgoto",
                "energia", "energia eletrica", "conta de luz",
                "aluguel", "condominio",
                "net fibra", "vivo fibra", "claro fibra", "tim fibra",
                "reparo", "manutencao", "encanador", "eletricista",
            ],
        ),
        (
            Category::Lazer,
            &[
                "cinema", "teatro", "show", "concerto",
                "jogo", "game", "psn", "xbox", "steam",
                "prime video", "disney plus", "hbo max", "hbo",
                "youtube premium",
                "academia", "personal", "crossfit",
            ],
        ),
        (
            Category::Saude,
            &[
                "hospital", "clinica", "consultorio",
                "medico", "doutor",
                "exame", "consulta",
                "drogasil", "droga raia", "raia",
                "farmacia", "drogaria",
                "plano de saude", "unimed", "bradesco saude",
                "amil", "sulamerica",
            ],
        ),
        (
            Category::Educacao,
            &[
                "escola", "faculdade", "universidade",
                "curso online", "udemy", "coursera", "alura", "rocketseat",
                "livraria cultura", "livraria leitura",
            ],
        ),
        (
            Category::Compras,
            &[
                "mercado livre",
                "magazine luiza", "magazine",
                "amazon", "shopee", "aliexpress",
                "zara", "h&m", "centenario", "riachuelo",
                "renner", "c&a",
                "loja", "shopping",
            ],
        ),
        (
            Category::Servicos,
            &[
                "assinatura", "mensalidade",
                "juros", "tarifa", "anuidade", "iof",
                "advogado", "contador", "consultoria",
            ],
        ),
        (
            Category::Transferencias,
            &[
                "pix transferencia", "pix para",
                "ted", "doc",
                "transferencia", "deposito", "saque",
            ],
        ),
        // Fallback bucket: keywords only arrive via register_keyword.
        (Category::Outros, &[]),
    ];

    entries
        .into_iter()
        .map(|(category, keywords)| {
            (
                category,
                keywords.iter().map(|k| k.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use extrato_core::ALL_CATEGORIES;

    #[test]
    fn every_category_has_an_entry() {
        let table = default_table();
        for category in ALL_CATEGORIES {
            assert!(table.contains_key(&category), "missing {category}");
        }
    }

    #[test]
    fn keywords_are_already_normalized() {
        for (category, keywords) in default_table() {
            for kw in keywords {
                assert_eq!(kw, normalize(&kw), "unnormalized keyword in {category}");
            }
        }
    }

    #[test]
    fn fallback_bucket_starts_empty() {
        assert!(default_table()[&Category::Outros].is_empty());
    }
}
