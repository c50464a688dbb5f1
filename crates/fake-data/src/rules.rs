//! Field-name heuristics
//!
//! An ordered table of `(keywords, generator)` pairs. A field name is
//! lower-cased and checked against each rule in turn; the first rule with a
//! keyword contained in the name produces the value.

use chrono::Local;
use rand::{Rng, RngCore};
use serde_json::Value;

use crate::national_id;
use crate::vocab;

/// Produces a value for a matched field
pub type Generator = fn(&mut dyn RngCore) -> Value;

/// A single field-name rule
#[derive(Debug, Clone, Copy)]
pub struct NameRule {
    /// Short label used in logs
    pub label: &'static str,
    keywords: &'static [&'static str],
    generator: Generator,
}

impl NameRule {
    pub const fn new(label: &'static str, keywords: &'static [&'static str], generator: Generator) -> Self {
        Self {
            label,
            keywords,
            generator,
        }
    }

    /// Keywords checked by substring against the lower-cased field name
    pub fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }

    /// Whether this rule applies to an already lower-cased field name
    pub fn matches(&self, lowered_name: &str) -> bool {
        self.keywords.iter().any(|k| lowered_name.contains(k))
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> Value {
        (self.generator)(rng)
    }
}

/// Find the first rule matching `field_name` and run its generator
pub fn apply(rules: &[NameRule], field_name: &str, rng: &mut dyn RngCore) -> Option<Value> {
    let lowered = field_name.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.generate(rng))
}

/// The built-in rule table, in priority order
pub fn default_rules() -> Vec<NameRule> {
    vec![
        NameRule::new("cpf", &["cpf"], gen_cpf),
        NameRule::new("cnpj", &["cnpj"], gen_cnpj),
        NameRule::new("person name", &["nome"], gen_full_name),
        NameRule::new("car plate", &["placa"], gen_car_plate),
        NameRule::new("email", &["email"], gen_email),
        NameRule::new("numeric code", &["seq", "cod", "valor", "vlr"], gen_numeric_string),
        NameRule::new("date", &["dta", "data"], gen_timestamp),
        NameRule::new("flag", &["flg", "ativo", "status"], gen_bool),
        NameRule::new("phone", &["celular", "telefone"], gen_phone),
    ]
}

/// Current local time in ISO-8601
pub(crate) fn timestamp() -> Value {
    Value::String(Local::now().to_rfc3339())
}

fn gen_cpf(rng: &mut dyn RngCore) -> Value {
    Value::String(national_id::cpf(rng))
}

fn gen_cnpj(rng: &mut dyn RngCore) -> Value {
    Value::String(national_id::cnpj(rng))
}

fn gen_full_name(rng: &mut dyn RngCore) -> Value {
    Value::String(vocab::full_name(rng))
}

fn gen_car_plate(rng: &mut dyn RngCore) -> Value {
    Value::String(vocab::car_plate(rng))
}

fn gen_email(rng: &mut dyn RngCore) -> Value {
    Value::String(vocab::email(rng))
}

fn gen_numeric_string(rng: &mut dyn RngCore) -> Value {
    Value::String(rng.gen_range(1..=50_000).to_string())
}

fn gen_timestamp(_rng: &mut dyn RngCore) -> Value {
    timestamp()
}

fn gen_bool(rng: &mut dyn RngCore) -> Value {
    Value::Bool(rng.gen())
}

fn gen_phone(rng: &mut dyn RngCore) -> Value {
    Value::String(vocab::phone(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn label_for(name: &str) -> Option<&'static str> {
        let lowered = name.to_lowercase();
        default_rules()
            .into_iter()
            .find(|r| r.matches(&lowered))
            .map(|r| r.label)
    }

    #[test]
    fn test_rule_priority() {
        assert_eq!(label_for("cpfCliente"), Some("cpf"));
        assert_eq!(label_for("CNPJ_EMPRESA"), Some("cnpj"));
        assert_eq!(label_for("nomeCompleto"), Some("person name"));
        assert_eq!(label_for("placaVeiculo"), Some("car plate"));
        assert_eq!(label_for("emailContato"), Some("email"));
        assert_eq!(label_for("codProduto"), Some("numeric code"));
        assert_eq!(label_for("dtaNascimento"), Some("date"));
        assert_eq!(label_for("flgAtivo"), Some("flag"));
        assert_eq!(label_for("telefoneFixo"), Some("phone"));
        assert_eq!(label_for("username"), None);
    }

    #[test]
    fn test_first_match_wins() {
        // "valor" is checked ahead of "data"
        assert_eq!(label_for("dataValor"), Some("numeric code"));
        // "nome" is checked ahead of "email"
        assert_eq!(label_for("nomeEmail"), Some("person name"));
    }

    #[test]
    fn test_apply_produces_expected_kinds() {
        let rules = default_rules();
        let mut rng = SmallRng::seed_from_u64(5);

        let cpf = apply(&rules, "cpf", &mut rng).unwrap();
        assert!(national_id::is_valid_cpf(cpf.as_str().unwrap()));

        let code = apply(&rules, "seqPedido", &mut rng).unwrap();
        let n: u32 = code.as_str().unwrap().parse().unwrap();
        assert!((1..=50_000).contains(&n));

        assert!(apply(&rules, "status", &mut rng).unwrap().is_boolean());
        assert!(apply(&rules, "password", &mut rng).is_none());
    }
}
