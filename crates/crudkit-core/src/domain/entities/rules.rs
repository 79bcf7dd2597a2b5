//! Validation rule derivation for the generated form requests.

use serde::Serialize;

use super::field::FieldList;

const RULE_SEPARATOR: &str = "|";
const LINE_SEPARATOR: &str = ",\n            ";

/// Which request flow a rule set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleMode {
    Creation,
    Update,
}

impl RuleMode {
    /// Leading nullability token.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Creation => "required",
            Self::Update => "nullable",
        }
    }
}

/// Ordered mapping of field name to rule string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRuleSet {
    mode: RuleMode,
    rules: Vec<(String, String)>,
}

impl ValidationRuleSet {
    /// `required|<type>` (creation) or `nullable|<type>` (update) per field.
    ///
    /// The field type token is reused as the rule token verbatim.
    pub fn derive(fields: &FieldList, mode: RuleMode) -> Self {
        let rules = fields
            .iter()
            .map(|f| {
                (
                    f.name.clone(),
                    [mode.marker(), f.field_type.as_str()].join(RULE_SEPARATOR),
                )
            })
            .collect();
        Self { mode, rules }
    }

    pub fn mode(&self) -> RuleMode {
        self.mode
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// `'title' => 'required|string'` lines, joined for the `{{rules}}` slot.
    pub fn to_text(&self) -> String {
        self.rules
            .iter()
            .map(|(field, rule)| format!("'{field}' => '{rule}'"))
            .collect::<Vec<_>>()
            .join(LINE_SEPARATOR)
    }
}

/// Derive both rule sets at once: `(creation, update)`.
pub fn derive_rules(fields: &FieldList) -> (ValidationRuleSet, ValidationRuleSet) {
    (
        ValidationRuleSet::derive(fields, RuleMode::Creation),
        ValidationRuleSet::derive(fields, RuleMode::Update),
    )
}
