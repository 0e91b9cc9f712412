pub mod filetypes;
pub mod parser;
pub mod registry;

pub use filetypes::FiletypeResolver;
pub use parser::ParserFactory;
pub use registry::LanguageRegistry;
