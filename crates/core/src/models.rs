use serde::{Deserialize, Serialize};

/// Code generation models offered by the generation service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeModel {
    #[default]
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "ft:gpt-3.5-turbo-1106:astronware:generative-manim-2:9OeVevto")]
    FineTunedGpt35,
}

impl CodeModel {
    /// Identifier sent to the generation service
    pub fn id(&self) -> &'static str {
        match self {
            CodeModel::Gpt4o => "gpt-4o",
            CodeModel::FineTunedGpt35 => {
                "ft:gpt-3.5-turbo-1106:astronware:generative-manim-2:9OeVevto"
            }
        }
    }

    /// Human readable name
    pub fn label(&self) -> &'static str {
        match self {
            CodeModel::Gpt4o => "GPT-4o",
            CodeModel::FineTunedGpt35 => "Fine-tuned GPT-3.5",
        }
    }

    pub fn all() -> [CodeModel; 2] {
        [CodeModel::Gpt4o, CodeModel::FineTunedGpt35]
    }

    /// Resolve a model from its identifier
    ///
    /// Only identifiers from the fixed catalogue are accepted.
    pub fn from_id(id: &str) -> Result<CodeModel, String> {
        CodeModel::all()
            .into_iter()
            .find(|model| model.id() == id)
            .ok_or_else(|| {
                let known: Vec<&str> = CodeModel::all().iter().map(|m| m.id()).collect();
                format!("Unknown model: {}. Supported models: {}", id, known.join(", "))
            })
    }

    pub fn is_default(&self) -> bool {
        *self == CodeModel::default()
    }
}

impl std::fmt::Display for CodeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for CodeModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CodeModel::from_id(s)
    }
}
