//! Study Copilot Core
//!
//! Pure domain for the study copilot: the NCERT syllabus catalog, the
//! admin upload store and its storage port, and the prompt builder that
//! turns a student's selection into a model request.
//!
//! Nothing here performs network I/O.

pub mod admin;
pub mod prompt;
pub mod request;
pub mod storage;
pub mod syllabus;
pub mod uploads;

pub use admin::{AccessDenied, AdminGate, AdminToken, DEFAULT_PASSPHRASE};
pub use prompt::{build, chat_instruction, chat_scope, instruction_for, SYSTEM_INSTRUCTION};
pub use request::{GenerationRequest, OutputKind, UnknownOutputKind};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StoragePort};
pub use syllabus::{group_chapters, Catalog, Chapter, SyllabusEntry, CLASSES, CONTENT_TYPES, SUBJECTS};
pub use uploads::{NewUpload, UploadRecord, UploadStore, STORAGE_KEY};
