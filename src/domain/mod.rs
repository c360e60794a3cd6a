pub mod requests;
pub mod types;

pub use requests::{ClientSearchInput, ClientUpdateInput, EmailSendInput, SelectPropertiesInput};
pub use types::{
    Client, EvaluatedProperty, FinalEmailRecord, NearbySchool, SearchSession, SearchSessionSummary,
};
