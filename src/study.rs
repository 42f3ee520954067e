//! Study service
//!
//! Wires the catalog, the upload store and the gateway together the way the
//! front end uses them.

use crate::config::Config;
use crate::llm::adapters::{create_adapter, AdapterError};
use crate::llm::{ChatSession, GenerationFailure, GenerationGateway};
use copilot_core::{
    build, chat_scope, AccessDenied, AdminGate, AdminToken, Catalog, Chapter, FileStorage,
    GenerationRequest, Storage, UploadStore, SYSTEM_INSTRUCTION,
};
use std::path::Path;
use tracing::{info, warn};

/// Reply shown in chat when the provider could not be reached
pub const CHAT_APOLOGY: &str = "Error: Failed to reach the AI expert.";

/// The study copilot
#[derive(Debug)]
pub struct StudyCopilot {
    catalog: &'static Catalog,
    uploads: UploadStore,
    gateway: GenerationGateway,
    gate: AdminGate,
}

impl StudyCopilot {
    pub fn new(uploads: UploadStore, gateway: GenerationGateway, gate: AdminGate) -> Self {
        Self {
            catalog: Catalog::builtin(),
            uploads,
            gateway,
            gate,
        }
    }

    /// Build from config, persisting uploads under `data_dir`
    pub fn from_config(config: &Config, data_dir: &Path) -> Result<Self, AdapterError> {
        let adapter = create_adapter(&config.llm)?;
        let gateway = GenerationGateway::new(adapter, config.sampling);
        let uploads = UploadStore::new(Storage::File(FileStorage::new(data_dir)));
        Ok(Self::new(
            uploads,
            gateway,
            AdminGate::new(config.admin.passphrase.clone()),
        ))
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    pub fn gateway(&self) -> &GenerationGateway {
        &self.gateway
    }

    pub fn unlock_admin(&self, passphrase: &str) -> Result<AdminToken, AccessDenied> {
        self.gate.unlock(passphrase)
    }

    /// Prompt that `generate` would send for `request`
    pub fn prompt_for(&self, request: &GenerationRequest) -> String {
        let uploads = self.uploads.find_relevant(
            &request.grade_level,
            &request.subject,
            &request.chapter.name,
        );
        build(request, &uploads)
    }

    /// Generate study content; the failure message is the provider's
    pub fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure> {
        let prompt = self.prompt_for(request);
        info!(
            class = %request.grade_level,
            subject = %request.subject,
            chapter = %request.chapter.number,
            kind = request.output_kind.slug(),
            "generating"
        );
        self.gateway.generate(
            &prompt,
            SYSTEM_INSTRUCTION,
            self.gateway.sampling().content_temperature,
        )
    }

    /// Open a chat limited to one chapter
    pub fn open_chat(&self, grade_level: &str, subject: &str, chapter: &Chapter) -> ChapterChat<'_> {
        ChapterChat {
            session: self
                .gateway
                .open_chat_session(chat_scope(grade_level, subject, chapter)),
        }
    }
}

/// Chapter chat as the student sees it: failures become an apology
#[derive(Debug)]
pub struct ChapterChat<'g> {
    session: ChatSession<'g>,
}

impl ChapterChat<'_> {
    pub fn scope(&self) -> &str {
        self.session.scope()
    }

    pub fn session(&self) -> &ChatSession<'_> {
        &self.session
    }

    pub fn ask(&mut self, text: &str) -> String {
        match self.session.send(text) {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "chat failed, replying with apology");
                CHAT_APOLOGY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SamplingConfig;
    use crate::llm::adapters::stub::StubAdapter;
    use crate::llm::adapters::Adapter;
    use copilot_core::{NewUpload, OutputKind};

    fn copilot(stub: StubAdapter) -> StudyCopilot {
        StudyCopilot::new(
            UploadStore::in_memory(),
            GenerationGateway::new(Adapter::Stub(stub), SamplingConfig::default()),
            AdminGate::default(),
        )
    }

    fn matter_request() -> GenerationRequest {
        let chapter = Catalog::builtin()
            .chapter("Class 9", "Science", "1")
            .cloned()
            .unwrap();
        GenerationRequest::new("Class 9", "Science", chapter, OutputKind::Summary)
    }

    #[test]
    fn test_prompt_includes_matching_uploads() {
        let c = copilot(StubAdapter::new());
        let token = c.unlock_admin("Gentleman").unwrap();
        c.uploads().save(
            &token,
            NewUpload::manual("Class 9", "Science", "Matter", "Notes", "Plasma is the fourth state."),
        );
        c.uploads().save(
            &token,
            NewUpload::manual("Class 10", "Science", "Matter", "Notes", "wrong grade"),
        );

        let prompt = c.prompt_for(&matter_request());
        assert!(prompt.contains("Context from internal repository:"));
        assert!(prompt.contains("[Notes] Plasma is the fourth state."));
        assert!(!prompt.contains("wrong grade"));
    }

    #[test]
    fn test_generate_success() {
        let c = copilot(StubAdapter::with_reply("# Matter"));
        assert_eq!(c.generate(&matter_request()).unwrap(), "# Matter");
    }

    #[test]
    fn test_quota_exceeded_scenario() {
        let c = copilot(StubAdapter::failing("quota exceeded"));
        let err = c.generate(&matter_request()).unwrap_err();
        assert_eq!(err.message, "quota exceeded");

        let request = matter_request();
        let mut chat = c.open_chat(&request.grade_level, &request.subject, &request.chapter);
        assert_eq!(chat.ask("What is diffusion?"), CHAT_APOLOGY);
        assert!(chat.session().turns().is_empty());
    }

    #[test]
    fn test_chat_scope() {
        let c = copilot(StubAdapter::new());
        let request = matter_request();
        let chat = c.open_chat(&request.grade_level, &request.subject, &request.chapter);
        assert_eq!(chat.scope(), "Science: Matter in Our Surroundings (Class 9)");
    }

    #[test]
    fn test_wrong_passphrase() {
        let c = copilot(StubAdapter::new());
        assert_eq!(c.unlock_admin("gentleman").unwrap_err(), AccessDenied);
    }
}
