pub mod provider;
pub mod resolver;

pub use provider::{AladhanClient, FetchedDay, TimetableSource};
pub use resolver::{NextOccurrenceResolver, OffsetPolicy, ResolveError, remaining};
