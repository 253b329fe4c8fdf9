pub mod jsonl;

pub use jsonl::{write_jsonl, write_jsonl_line};
