pub mod meta_entry;
pub mod ploidy;
pub mod record;
pub mod source;
pub mod version;

// re-export for cleaner imports
pub use self::meta_entry::{MetaEntry, MetaValue};
pub use self::ploidy::Ploidy;
pub use self::record::{Record, RecordType};
pub use self::source::Source;
pub use self::version::Version;
