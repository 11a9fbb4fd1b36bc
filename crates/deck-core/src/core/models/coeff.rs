use super::params::{Param, TypeRange};
use super::styles::InteractionKind;
use serde::{Deserialize, Serialize};

/// One `*_coeff` line: the type selector(s) followed by the style's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoeffDecl {
    pub kind: InteractionKind,
    pub types: Vec<TypeRange>,
    #[serde(default)]
    pub values: Vec<Param>,
}

impl CoeffDecl {
    pub fn new(kind: InteractionKind, types: Vec<TypeRange>, values: Vec<Param>) -> Self {
        Self {
            kind,
            types,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_selectors_are_stored_as_source_text() {
        let coeff = CoeffDecl::new(
            InteractionKind::Pair,
            vec!["1".parse().unwrap(), "2*".parse().unwrap()],
            vec![Param::Float(0.1), Param::Int(3)],
        );
        let text = toml::to_string(&coeff).unwrap();
        assert!(text.contains("kind = \"pair\""));
        assert!(text.contains("\"2*\""));

        let restored: CoeffDecl = toml::from_str(&text).unwrap();
        assert_eq!(restored, coeff);
    }

    #[test]
    fn malformed_type_selector_is_rejected_on_import() {
        let text = "kind = \"bond\"\ntypes = [\"0\"]\nvalues = [1.0]\n";
        assert!(toml::from_str::<CoeffDecl>(text).is_err());
    }
}
