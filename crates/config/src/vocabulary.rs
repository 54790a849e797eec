//! Domain vocabulary: keyword lists and default category sets
//!
//! Ships with built-in Brazilian-Portuguese defaults and can be overridden
//! from a YAML file. The keyword lists feed both the fast heuristic
//! detector and the classifier prompt; the category sets feed correction
//! menus, onboarding and the classifier prompt.

use serde::{Deserialize, Serialize};
use std::path::Path;

use finia_core::{BusinessContext, Nature, ProfileKind};

use crate::ConfigError;

/// A suggested transaction category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub context: BusinessContext,
    pub nature: Nature,
    /// Display icon for menus and confirmations
    #[serde(default)]
    pub icon: String,
}

impl Category {
    fn new(name: &str, context: BusinessContext, nature: Nature, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            context,
            nature,
            icon: icon.to_string(),
        }
    }
}

/// Keyword lists and category vocabulary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Words that indicate money coming in, personal vocabulary
    #[serde(default)]
    pub income_keywords_personal: Vec<String>,
    /// Words that indicate money coming in, business vocabulary
    #[serde(default)]
    pub income_keywords_business: Vec<String>,
    /// Words that suggest a business context
    #[serde(default)]
    pub business_keywords: Vec<String>,
    /// Words that suggest a personal context
    #[serde(default)]
    pub personal_keywords: Vec<String>,
    /// Default category sets
    #[serde(default)]
    pub categories_personal_profile: Vec<Category>,
    #[serde(default)]
    pub categories_business_profile: Vec<Category>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        let strings = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();

        use BusinessContext::{Business, Personal};
        use Nature::{Expense, Income};

        Self {
            income_keywords_personal: strings(&[
                "recebi",
                "recebimento",
                "recebeu",
                "salário",
                "salario",
                "rendimento",
                "dividendo",
                "reembolso",
                "pix recebido",
                "transferência recebida",
                "depósito",
                "caiu",
                "entrou",
                "ganho",
                "freelance",
                "freela",
                "retorno",
                "aluguel recebido",
            ]),
            income_keywords_business: strings(&[
                "venda",
                "fatura",
                "cliente pagou",
                "pagamento",
                "pagou",
                "honorário",
                "comissão",
                "comissao",
                "royalties",
                "prestação serviço",
                "contrato",
                "projeto",
                "adiantamento",
                "lucro",
                "pró-labore",
            ]),
            business_keywords: strings(&[
                "empresa",
                "cliente",
                "cnpj",
                "nota fiscal",
                "contrato",
                "projeto",
                "serviço",
                "consultoria",
                "fornecedor",
                "corporativo",
                "comercial",
                "b2b",
                "reunião de negócios",
                "escritório",
                "jurídica",
                "pj",
                "profissional",
                "negócio",
                "empreendedor",
                "mei",
                "empresarial",
                "prestação",
                "consultor",
            ]),
            personal_keywords: strings(&[
                "pessoal",
                "casa",
                "família",
                "filhos",
                "supermercado",
                "lazer",
                "restaurante",
                "cinema",
                "shopping",
                "academia",
                "roupas",
                "faculdade",
                "férias",
                "hobby",
                "presente",
                "física",
                "pf",
                "particular",
                "privado",
                "doméstico",
                "residencial",
                "apartamento",
                "condomínio",
                "iptu",
            ]),
            categories_personal_profile: vec![
                Category::new("Alimentação", Personal, Expense, "🍽️"),
                Category::new("Transporte", Personal, Expense, "🚗"),
                Category::new("Moradia", Personal, Expense, "🏠"),
                Category::new("Saúde", Personal, Expense, "⚕️"),
                Category::new("Lazer", Personal, Expense, "🎬"),
                Category::new("Educação", Personal, Expense, "📚"),
                Category::new("Compras", Personal, Expense, "🛒"),
                Category::new("Outros", Personal, Expense, "📋"),
                Category::new("Salário", Personal, Income, "💰"),
                Category::new("Freelance", Personal, Income, "🔨"),
                Category::new("Rendimentos", Personal, Income, "💹"),
                Category::new("Outros Ganhos", Personal, Income, "💸"),
            ],
            categories_business_profile: vec![
                Category::new("Alimentação PJ", Business, Expense, "🍽️"),
                Category::new("Marketing", Business, Expense, "📢"),
                Category::new("Material de Escritório", Business, Expense, "🖊️"),
                Category::new("Software/Assinaturas", Business, Expense, "💻"),
                Category::new("Serviços Terceiros", Business, Expense, "🔧"),
                Category::new("Impostos", Business, Expense, "📑"),
                Category::new("Equipamentos", Business, Expense, "🖥️"),
                Category::new("Outros PJ", Business, Expense, "📋"),
                Category::new("Vendas", Business, Income, "💰"),
                Category::new("Prestação de Serviços", Business, Income, "🔨"),
                Category::new("Consultoria", Business, Income, "📊"),
                Category::new("Comissões", Business, Income, "💹"),
                Category::new("Outros Ganhos PJ", Business, Income, "💸"),
                Category::new("Alimentação PF", Personal, Expense, "🍽️"),
                Category::new("Transporte", Personal, Expense, "🚗"),
                Category::new("Moradia", Personal, Expense, "🏠"),
                Category::new("Saúde", Personal, Expense, "⚕️"),
                Category::new("Lazer", Personal, Expense, "🎬"),
                Category::new("Educação", Personal, Expense, "📚"),
                Category::new("Outros PF", Personal, Expense, "📋"),
                Category::new("Salário", Personal, Income, "💰"),
                Category::new("Rendimentos", Personal, Income, "💹"),
                Category::new("Outros Ganhos PF", Personal, Income, "💸"),
            ],
        }
    }
}

impl Vocabulary {
    /// Load a vocabulary override from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|_| ConfigError::FileNotFound(path.as_ref().display().to_string()))?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Income keywords scoped to a profile. A business profile unions the
    /// business and personal income vocabularies.
    pub fn income_keywords(&self, profile: ProfileKind) -> Vec<&str> {
        let mut keywords: Vec<&str> =
            self.income_keywords_personal.iter().map(String::as_str).collect();
        if profile.has_business_context() {
            keywords.extend(self.income_keywords_business.iter().map(String::as_str));
        }
        keywords
    }

    /// Full category set for a profile kind.
    pub fn categories(&self, profile: ProfileKind) -> &[Category] {
        match profile {
            ProfileKind::Personal => &self.categories_personal_profile,
            ProfileKind::BusinessIndividual => &self.categories_business_profile,
        }
    }

    /// Categories filtered by context and nature, for correction menus.
    pub fn categories_for(
        &self,
        profile: ProfileKind,
        context: BusinessContext,
        nature: Nature,
    ) -> Vec<&Category> {
        self.categories(profile)
            .iter()
            .filter(|c| c.context == context && c.nature == nature)
            .collect()
    }

    /// Comma-separated category names, for prompt assembly.
    pub fn category_names(&self, profile: ProfileKind, context: BusinessContext) -> String {
        self.categories(profile)
            .iter()
            .filter(|c| c.context == context)
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_profile_unions_income_vocabularies() {
        let vocab = Vocabulary::default();
        let personal = vocab.income_keywords(ProfileKind::Personal);
        let business = vocab.income_keywords(ProfileKind::BusinessIndividual);

        assert!(personal.contains(&"salário"));
        assert!(!personal.contains(&"cliente pagou"));
        assert!(business.contains(&"salário"));
        assert!(business.contains(&"cliente pagou"));
        assert!(business.len() > personal.len());
    }

    #[test]
    fn test_categories_for_scoping() {
        let vocab = Vocabulary::default();
        let cats = vocab.categories_for(
            ProfileKind::BusinessIndividual,
            BusinessContext::Business,
            Nature::Income,
        );
        let names: Vec<&str> = cats.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"Vendas"));
        assert!(!names.contains(&"Salário"));
        assert!(!names.contains(&"Marketing"));
    }

    #[test]
    fn test_personal_profile_has_no_business_categories() {
        let vocab = Vocabulary::default();
        assert!(vocab
            .categories(ProfileKind::Personal)
            .iter()
            .all(|c| c.context == BusinessContext::Personal));
    }
}
