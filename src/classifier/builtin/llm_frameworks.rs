//! Local LLM runtimes and model caches.

use crate::classifier::{Classifier, KnownPath};
use crate::paths::HostPaths;

pub struct LlmFrameworksClassifier {
    host: HostPaths,
}

impl LlmFrameworksClassifier {
    pub fn new(host: &HostPaths) -> Self {
        Self { host: host.clone() }
    }
}

impl Classifier for LlmFrameworksClassifier {
    fn name(&self) -> &'static str {
        "llm_frameworks"
    }

    fn display_name(&self) -> &'static str {
        "LLM Frameworks"
    }

    fn known_paths(&self) -> Vec<KnownPath> {
        let h = &self.host;
        vec![
            KnownPath::new("Ollama Cache", h.in_home(".ollama/models")),
            KnownPath::new("LM Studio Cache", h.in_home(".cache/lm-studio")),
            KnownPath::new("LLaMA.cpp Cache", h.in_home(".cache/llama.cpp")),
            KnownPath::new("vLLM Cache", h.in_home(".cache/vllm")),
            KnownPath::new("Hugging Face Cache", h.in_home(".cache/huggingface/hub")),
            KnownPath::new("LocalAI Cache", h.in_home(".localai/models")),
            KnownPath::new("LocalAI Logs", h.in_home(".localai/logs")),
        ]
    }
}
