#![forbid(unsafe_code)]

pub mod bank;
pub mod repository;
pub mod sqlite;

pub use bank::{BankError, BUILTIN_BANK, load_bank_file, parse_bank};
pub use repository::{InMemoryRepository, QuestionRepository, Storage, StorageError};
